//! Native notification-area host built on `tray-icon`, driven by a `winit`
//! event loop on the main thread.

use crate::menu::{MenuCommand, MenuEntry};
use crate::session::{SessionState, SystemDesktop, TrayHost, TraySession};
use crate::settings::{Settings, SettingsStore};
use anyhow::{Context, Result};
use image::RgbaImage;
use std::time::Instant;
use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use winit::event::{Event, StartCause};
use winit::event_loop::{ControlFlow, EventLoopBuilder};

/// The icon is created lazily on the first `set_icon`; tooltip and menu set
/// before then are applied at creation.
#[derive(Default)]
pub struct NativeTray {
    icon: Option<TrayIcon>,
    tooltip: String,
    menu: Option<Menu>,
}

impl TrayHost for NativeTray {
    fn set_icon(&mut self, image: RgbaImage) -> Result<()> {
        let (width, height) = image.dimensions();
        // The previous native icon handle is released when `Icon` is replaced.
        let icon = Icon::from_rgba(image.into_raw(), width, height)
            .context("convert clock face to tray icon")?;

        if let Some(tray) = &self.icon {
            return tray.set_icon(Some(icon)).context("replace tray icon");
        }

        let mut builder = TrayIconBuilder::new()
            .with_icon(icon)
            .with_tooltip(&self.tooltip);
        if let Some(menu) = self.menu.take() {
            builder = builder.with_menu(Box::new(menu));
        }
        self.icon = Some(builder.build().context("create tray icon")?);
        Ok(())
    }

    fn set_tooltip(&mut self, text: &str) -> Result<()> {
        self.tooltip = text.to_string();
        if let Some(tray) = &self.icon {
            tray.set_tooltip(Some(text)).context("set tray tooltip")?;
        }
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        if let Some(tray) = &self.icon {
            tray.set_visible(visible).context("toggle tray visibility")?;
        }
        Ok(())
    }

    fn set_context_menu(&mut self, entries: &[MenuEntry]) -> Result<()> {
        let menu = Menu::new();
        for entry in entries {
            match entry {
                MenuEntry::Item { command, label } => {
                    let item = MenuItem::with_id(command.id(), label, true, None);
                    menu.append(&item).context("append menu item")?;
                }
                MenuEntry::Separator => menu
                    .append(&PredefinedMenuItem::separator())
                    .context("append menu separator")?,
            }
        }

        match &self.icon {
            Some(tray) => tray.set_menu(Some(Box::new(menu))),
            None => self.menu = Some(menu),
        }
        Ok(())
    }
}

enum ClockEvent {
    Menu(MenuEvent),
}

/// Runs the tray clock until the user picks Exit.
pub fn run(store: SettingsStore, settings: Settings) -> Result<()> {
    let event_loop = EventLoopBuilder::<ClockEvent>::with_user_event()
        .build()
        .context("create event loop")?;

    let proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(ClockEvent::Menu(event));
    }));

    let mut session = TraySession::start(
        NativeTray::default(),
        SystemDesktop,
        store,
        settings,
        Instant::now(),
    )?;

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::UserEvent(ClockEvent::Menu(menu_event)) => {
                    match MenuCommand::from_id(menu_event.id.0.as_str()) {
                        Some(command) => {
                            if session.handle_command(command) == SessionState::Terminated {
                                elwt.exit();
                                return;
                            }
                        }
                        None => tracing::debug!(id = ?menu_event.id, "unknown menu item"),
                    }
                }
                Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                    session.poll_tick(Instant::now());
                }
                _ => {}
            }

            match session.next_deadline() {
                Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                None => elwt.exit(),
            }
        })
        .context("run tray event loop")
}
