//! Desktop dark-mode detection.

use crate::theme::Theme;

/// Theme the desktop currently uses for applications, or `None` when it
/// cannot be determined.
pub fn detect() -> Option<Theme> {
    let theme = apps_use_light_theme().map(theme_from_light_flag);
    tracing::debug!(?theme, "queried desktop theme");
    theme
}

/// Windows stores `AppsUseLightTheme = 0` for dark mode.
pub fn theme_from_light_flag(light: u32) -> Theme {
    Theme::from_dark_flag(light == 0)
}

#[cfg(target_os = "windows")]
fn apps_use_light_theme() -> Option<u32> {
    use windows::core::w;
    use windows::Win32::Foundation::ERROR_SUCCESS;
    use windows::Win32::System::Registry::{RegGetValueW, HKEY_CURRENT_USER, RRF_RT_REG_DWORD};

    let mut value: u32 = 0;
    let mut size = std::mem::size_of::<u32>() as u32;
    let status = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            w!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize"),
            w!("AppsUseLightTheme"),
            RRF_RT_REG_DWORD,
            None,
            Some(&mut value as *mut u32 as *mut core::ffi::c_void),
            Some(&mut size as *mut u32),
        )
    };
    if status != ERROR_SUCCESS {
        tracing::debug!(?status, "AppsUseLightTheme not readable");
        return None;
    }
    Some(value)
}

#[cfg(not(target_os = "windows"))]
fn apps_use_light_theme() -> Option<u32> {
    None
}
