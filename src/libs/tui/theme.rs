use ratatui::prelude::*;

#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_soft: Color,
    pub good: Color,
    pub warn: Color,
    pub bad: Color,
    /// connect / check buttons
    pub action: Color,
    /// disconnect button
    pub danger: Color,
}

impl Theme {
    pub fn tokdex_dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            muted: Color::Gray,
            accent: Color::LightCyan,
            accent_soft: Color::DarkGray,
            good: Color::Green,
            warn: Color::Yellow,
            bad: Color::Red,
            action: Color::Cyan,
            danger: Color::LightRed,
        }
    }
}
