// TUI components - one render function per panel

pub mod errors_panel;
pub mod gauge_panel;
pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
