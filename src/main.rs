#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

use analog_tray_clock::logging;
use analog_tray_clock::settings::{self, Settings, SettingsStore};

fn main() -> anyhow::Result<()> {
    let store = SettingsStore::locate();
    let loaded = store.load();
    let debug = matches!(&loaded, Ok(Some(s)) if s.debug_logging);
    logging::init(debug, settings::log_path());

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        settings = ?store.path(),
        "analog tray clock"
    );
    let settings = settings::settings_or_default(loaded);

    run(store, settings)
}

#[cfg(target_os = "windows")]
fn run(store: SettingsStore, settings: Settings) -> anyhow::Result<()> {
    analog_tray_clock::tray::run(store, settings)
}

#[cfg(not(target_os = "windows"))]
fn run(_store: SettingsStore, _settings: Settings) -> anyhow::Result<()> {
    anyhow::bail!("the tray clock needs a Windows notification area")
}
