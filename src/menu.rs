pub const APP_NAME: &str = "Analog Tray Clock";
pub const PROJECT_URL: &str = "https://github.com/adamstrandberg/analog-tray-clock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    ToggleTheme,
    About,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 3] = [
        MenuCommand::ToggleTheme,
        MenuCommand::About,
        MenuCommand::Exit,
    ];

    /// Stable identifier used for the native menu item.
    pub fn id(self) -> &'static str {
        match self {
            MenuCommand::ToggleTheme => "toggle-theme",
            MenuCommand::About => "about",
            MenuCommand::Exit => "exit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item { command: MenuCommand, label: String },
    Separator,
}

pub fn about_label() -> String {
    format!(
        "About {APP_NAME} {}.{}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR")
    )
}

/// Entries of the tray context menu, top to bottom.
pub fn context_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::Item {
            command: MenuCommand::ToggleTheme,
            label: "Toggle Theme".to_string(),
        },
        MenuEntry::Item {
            command: MenuCommand::About,
            label: about_label(),
        },
        MenuEntry::Separator,
        MenuEntry::Item {
            command: MenuCommand::Exit,
            label: "Exit".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for cmd in MenuCommand::ALL {
            assert_eq!(MenuCommand::from_id(cmd.id()), Some(cmd));
        }
        assert_eq!(MenuCommand::from_id("settings"), None);
    }

    #[test]
    fn menu_order_matches_tray_layout() {
        let entries = context_menu();
        assert_eq!(entries.len(), 4);
        assert!(matches!(
            entries[0],
            MenuEntry::Item { command: MenuCommand::ToggleTheme, .. }
        ));
        assert!(matches!(entries[1], MenuEntry::Item { command: MenuCommand::About, .. }));
        assert_eq!(entries[2], MenuEntry::Separator);
        assert!(matches!(entries[3], MenuEntry::Item { command: MenuCommand::Exit, .. }));
    }

    #[test]
    fn about_label_names_app_and_version() {
        assert_eq!(about_label(), "About Analog Tray Clock 1.1");
    }
}
