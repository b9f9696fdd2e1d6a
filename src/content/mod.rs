//! Everything the kiosk says, in English and Thai, plus the screen order.

pub mod modules;
pub mod text;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use modules::{info, ModuleInfo, MODULES};
pub use text::{text, Text};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Th,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Th,
            Language::Th => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Th => "TH",
        }
    }

    /// Parse `en`/`th` in any case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "th" => Some(Language::Th),
            _ => None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// The menu and the five exhibition screens.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleId {
    #[default]
    Menu,
    Melody,
    Rhythm,
    Tempo,
    Dynamics,
    Harmony,
}

impl ModuleId {
    /// Visiting order for the previous/next buttons.
    pub const ORDER: [ModuleId; 5] = [
        ModuleId::Melody,
        ModuleId::Rhythm,
        ModuleId::Dynamics,
        ModuleId::Tempo,
        ModuleId::Harmony,
    ];

    fn position(self) -> Option<usize> {
        Self::ORDER.iter().position(|&m| m == self)
    }

    /// The screen after this one, wrapping around. The menu has none.
    pub fn next(self) -> Option<Self> {
        self.position()
            .map(|i| Self::ORDER[(i + 1) % Self::ORDER.len()])
    }

    /// The screen before this one, wrapping around. The menu has none.
    pub fn previous(self) -> Option<Self> {
        let len = Self::ORDER.len();
        self.position().map(|i| Self::ORDER[(i + len - 1) % len])
    }

    pub fn is_menu(self) -> bool {
        self == ModuleId::Menu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_previous_wrap() {
        assert_eq!(ModuleId::Melody.next(), Some(ModuleId::Rhythm));
        assert_eq!(ModuleId::Rhythm.next(), Some(ModuleId::Dynamics));
        assert_eq!(ModuleId::Harmony.next(), Some(ModuleId::Melody));
        assert_eq!(ModuleId::Melody.previous(), Some(ModuleId::Harmony));
        assert_eq!(ModuleId::Tempo.previous(), Some(ModuleId::Dynamics));
    }

    #[test]
    fn menu_is_outside_the_order() {
        assert_eq!(ModuleId::Menu.next(), None);
        assert_eq!(ModuleId::Menu.previous(), None);
    }

    #[test]
    fn a_full_lap_returns_home() {
        let mut module = ModuleId::Tempo;
        for _ in 0..ModuleId::ORDER.len() {
            module = module.next().unwrap_or(ModuleId::Menu);
        }
        assert_eq!(module, ModuleId::Tempo);
    }

    #[test]
    fn codes_parse() {
        assert_eq!(Language::from_code("TH"), Some(Language::Th));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Theme::from_name("Light"), Some(Theme::Light));
        assert_eq!(Language::En.toggle(), Language::Th);
        assert_eq!(Theme::default(), Theme::Dark);
    }
}
