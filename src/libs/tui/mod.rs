pub mod button;
pub mod input;
pub mod main_window;
pub mod panel;
pub mod spinner;
pub mod status;
pub mod table;
pub mod theme;
pub mod title;

pub use button::draw_button;
pub use input::draw_input;
pub use main_window::draw_main_window;
pub use panel::draw_panel;
pub use spinner::draw_spinner;
pub use status::draw_status;
pub use table::draw_table;
pub use theme::Theme;
pub use title::draw_title_bar;

use ratatui::layout::Rect;

/// Hit test for mouse handling.
pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
