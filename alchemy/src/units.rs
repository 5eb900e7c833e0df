use alloy::primitives::U256;

use crate::IndexerError;

/// Parse a JSON-RPC hex quantity into a [`U256`].
///
/// Accepts `0x`/`0X` prefixes, odd digit counts and the zero-padded 32 byte
/// words the token API returns. A bare `0x` is zero.
pub fn parse_quantity<S: AsRef<str>>(raw_hex: S) -> Result<U256, IndexerError> {
    let raw = raw_hex.as_ref().trim();
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|_| IndexerError::Quantity(raw.to_string()))
}

/// `None` once `10^exp` no longer fits in 256 bits.
fn pow10(exp: usize) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exp))
}

/// Scale `amount` down by `10^decimals` and print it with exactly
/// `precision` fractional digits, rounding half up.
///
/// ```
/// # use alloy::primitives::U256;
/// # use alchemy::format_fixed;
/// let one_ether = U256::from(1_000_000_000_000_000_000u128);
/// assert_eq!(format_fixed(one_ether, 18, 2), "1.00");
/// ```
pub fn format_fixed(amount: U256, decimals: u8, precision: usize) -> String {
    let decimals = decimals as usize;
    let scaled = if decimals >= precision {
        // a divisor past U256::MAX is larger than any amount
        match pow10(decimals - precision) {
            Some(divisor) => {
                let half = divisor / U256::from(2u64);
                amount.saturating_add(half) / divisor
            }
            None => U256::ZERO,
        }
    } else {
        amount.saturating_mul(pow10(precision - decimals).unwrap_or(U256::MAX))
    };

    if precision == 0 {
        return scaled.to_string();
    }
    let (whole, frac) = match pow10(precision) {
        Some(unit) => (scaled / unit, scaled % unit),
        None => (U256::ZERO, scaled),
    };
    format!("{whole}.{:0>width$}", frac.to_string(), width = precision)
}
