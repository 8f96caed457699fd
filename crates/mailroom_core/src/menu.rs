//! Main menu commands and selection lookup.
//!
//! Lookup and invocation are separate: `MenuManager::resolve` only maps raw
//! input to a command, the caller decides what to run.

/// Commands offered by the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    AddDonation,
    ListDonors,
    DonorReport,
    CreateThankYouLetters,
    Exit,
}

/// Main menu entries in display order.
pub const MAIN_MENU: [MenuCommand; 5] = [
    MenuCommand::AddDonation,
    MenuCommand::ListDonors,
    MenuCommand::DonorReport,
    MenuCommand::CreateThankYouLetters,
    MenuCommand::Exit,
];

impl MenuCommand {
    /// Single-letter selection token.
    pub fn key(self) -> &'static str {
        match self {
            Self::AddDonation => "A",
            Self::ListDonors => "L",
            Self::DonorReport => "D",
            Self::CreateThankYouLetters => "C",
            Self::Exit => "E",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AddDonation => "Add Donation",
            Self::ListDonors => "List Of Donors",
            Self::DonorReport => "Donor Report",
            Self::CreateThankYouLetters => "Create Thank You Letters For Donors",
            Self::Exit => "Exit Program",
        }
    }
}

/// Result of resolving one raw menu input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSelection {
    Command(MenuCommand),
    /// Input did not map to any command; carries the raw input.
    Invalid(String),
}

/// Resolves raw input against a menu.
#[derive(Debug, Clone, Copy)]
pub struct MenuManager<'a> {
    menu: &'a [MenuCommand],
}

impl<'a> MenuManager<'a> {
    pub fn new(menu: &'a [MenuCommand]) -> Self {
        Self { menu }
    }

    /// Manager over `MAIN_MENU`.
    pub fn main_menu() -> MenuManager<'static> {
        MenuManager::new(&MAIN_MENU)
    }

    pub fn commands(&self) -> &'a [MenuCommand] {
        self.menu
    }

    /// Matches input exactly against command keys; only the line ending is
    /// dropped, so `a` and ` E` are invalid.
    pub fn resolve(&self, input: &str) -> MenuSelection {
        let token = input.trim_end_matches(['\r', '\n']);
        self.menu
            .iter()
            .copied()
            .find(|command| command.key() == token)
            .map_or_else(
                || MenuSelection::Invalid(input.to_string()),
                MenuSelection::Command,
            )
    }
}
