#[macro_export]
macro_rules! env_lazy {
    ($( $vis:vis $name:ident : $ty:ty = ($key:literal, $default:expr); )* ) => {
        $(
            $vis static $name: ::std::sync::LazyLock<$ty> = ::std::sync::LazyLock::new(|| {
                $crate::libs::config::load_env();
                $crate::libs::config::Config::get_var_t::<$ty>($key, $default)
            });
        )*
    };
}

env_lazy! {
    pub MIN_TERMINAL_HEIGHT: u16 = ("MIN_TERMINAL_HEIGHT", 24);
    pub DISPLAY_DECIMALS: usize  = ("DISPLAY_DECIMALS", 2);
    pub HTTP_TIMEOUT_SECS: u64   = ("HTTP_TIMEOUT_SECS", 20);
    pub NOTICE_SECS: u64         = ("NOTICE_SECS", 5);
    pub METADATA_CONCURRENCY: usize = ("METADATA_CONCURRENCY", 16);
}

/// Decimals assumed when the indexer has none for a contract.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Warnings (bad input) clear faster than the other notices.
pub const WARNING_NOTICE_SECS: u64 = 3;

pub const APP_NAME: &str = "ERC-20 Token Indexer";
