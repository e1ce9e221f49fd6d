//! Tray session: owns the theme, the ticker and the host tray icon, and
//! re-renders the clock face whenever either the time or the theme changes.

use crate::menu::{self, MenuCommand, MenuEntry, APP_NAME, PROJECT_URL};
use crate::render::render;
use crate::settings::{Settings, SettingsStore};
use crate::system_theme;
use crate::theme::{resolve_theme, Theme};
use crate::ticker::Ticker;
use anyhow::{Context, Result};
use chrono::NaiveTime;
use image::RgbaImage;
use std::time::Instant;

/// Notification-area facilities the session drives. Each `set_icon` call
/// supersedes the previously installed image.
pub trait TrayHost {
    fn set_icon(&mut self, image: RgbaImage) -> Result<()>;
    fn set_tooltip(&mut self, text: &str) -> Result<()>;
    fn set_visible(&mut self, visible: bool) -> Result<()>;
    fn set_context_menu(&mut self, entries: &[MenuEntry]) -> Result<()>;
}

/// Desktop services outside the tray itself.
pub trait Desktop {
    fn now(&self) -> NaiveTime;
    fn system_theme(&self) -> Option<Theme>;
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Local wall clock, OS theme setting and the default URL handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDesktop;

impl Desktop for SystemDesktop {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }

    fn system_theme(&self) -> Option<Theme> {
        system_theme::detect()
    }

    fn open_url(&self, url: &str) -> Result<()> {
        open::that(url).with_context(|| format!("open {url}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

pub struct TraySession<H: TrayHost, D: Desktop> {
    host: H,
    desktop: D,
    store: SettingsStore,
    settings: Settings,
    theme: Theme,
    ticker: Ticker,
    state: SessionState,
}

impl<H: TrayHost, D: Desktop> TraySession<H, D> {
    /// Installs the clock into the tray and starts ticking. `settings` are the
    /// preferences read at startup; without a stored theme the desktop setting
    /// is used, and Dark when that is unavailable too.
    ///
    /// Failing to install the icon is the only fatal error.
    pub fn start(
        mut host: H,
        desktop: D,
        store: SettingsStore,
        settings: Settings,
        now: Instant,
    ) -> Result<Self> {
        let (theme, source) = resolve_theme(settings.theme(), || desktop.system_theme());
        tracing::info!(%theme, ?source, "starting tray clock");

        host.set_tooltip(APP_NAME).context("set tray tooltip")?;
        host.set_context_menu(&menu::context_menu())
            .context("install tray menu")?;
        host.set_icon(render(desktop.now(), theme))
            .context("install tray icon")?;
        host.set_visible(true).context("show tray icon")?;

        let mut ticker = Ticker::default();
        ticker.start(now);

        Ok(Self {
            host,
            desktop,
            store,
            settings,
            theme,
            ticker,
            state: SessionState::Running,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// When the next tick is due; `None` once terminated.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Runs [`Self::on_tick`] if the ticker is due at `now`.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.on_tick();
        true
    }

    pub fn on_tick(&mut self) {
        if self.state == SessionState::Terminated {
            tracing::debug!("tick after exit ignored");
            return;
        }
        self.refresh();
    }

    pub fn on_toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.settings.set_theme(self.theme);
        tracing::info!(theme = %self.theme, "theme toggled");

        if let Err(err) = self.store.save(&self.settings) {
            tracing::warn!(error = %format!("{err:#}"), "could not persist theme");
        }
        self.refresh();
    }

    pub fn on_about(&mut self) {
        if let Err(err) = self.desktop.open_url(PROJECT_URL) {
            tracing::warn!(error = %format!("{err:#}"), "could not open project page");
        }
    }

    /// Stops ticking and hides the icon. Returns `false` if the session had
    /// already terminated.
    pub fn on_exit(&mut self) -> bool {
        if self.state == SessionState::Terminated {
            return false;
        }
        self.ticker.stop();
        if let Err(err) = self.host.set_visible(false) {
            tracing::warn!(error = %format!("{err:#}"), "could not hide tray icon");
        }
        self.state = SessionState::Terminated;
        tracing::info!("tray clock terminated");
        true
    }

    pub fn handle_command(&mut self, command: MenuCommand) -> SessionState {
        tracing::debug!(?command, "menu command");
        match command {
            MenuCommand::ToggleTheme => self.on_toggle_theme(),
            MenuCommand::About => self.on_about(),
            MenuCommand::Exit => {
                self.on_exit();
            }
        }
        self.state
    }

    fn refresh(&mut self) {
        let image = render(self.desktop.now(), self.theme);
        if let Err(err) = self.host.set_icon(image) {
            tracing::warn!(error = %format!("{err:#}"), "could not update tray icon");
        }
    }
}
