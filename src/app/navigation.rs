//! Screen navigation as a value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A screen of the design flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Welcome.
    Landing,
    /// Gallery or custom design.
    Choice,
    /// Curated rings.
    Gallery,
    /// Description and generation.
    Designer,
    /// The selected design, awaiting confirmation.
    Preview,
    /// After confirmation.
    ThankYou,
}

impl Screen {
    /// Returns the screen name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Choice => "choice",
            Self::Gallery => "gallery",
            Self::Designer => "designer",
            Self::Preview => "preview",
            Self::ThankYou => "thank-you",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current and previous screen. Transitions return a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    current: Screen,
    previous: Option<Screen>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Starts on the landing screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Screen::Landing,
            previous: None,
        }
    }

    /// The screen shown.
    #[must_use]
    pub const fn current(&self) -> Screen {
        self.current
    }

    /// The screen shown before it.
    #[must_use]
    pub const fn previous(&self) -> Option<Screen> {
        self.previous
    }

    /// Shows `screen`, remembering the current one.
    #[must_use]
    pub const fn show(self, screen: Screen) -> Self {
        Self {
            current: screen,
            previous: Some(self.current),
        }
    }

    /// Returns to the gallery or designer if that came before, otherwise to
    /// the choice screen.
    #[must_use]
    pub const fn go_back(self) -> Self {
        match self.previous {
            Some(Screen::Gallery) => self.show(Screen::Gallery),
            Some(Screen::Designer) => self.show(Screen::Designer),
            _ => self.show(Screen::Choice),
        }
    }
}
