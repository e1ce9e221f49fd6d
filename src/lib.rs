pub mod face;
pub mod logging;
pub mod menu;
pub mod render;
pub mod session;
pub mod settings;
pub mod system_theme;
pub mod theme;
pub mod ticker;

#[cfg(target_os = "windows")]
pub mod tray;

pub use render::render;
pub use theme::Theme;
