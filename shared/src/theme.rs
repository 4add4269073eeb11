//! Light/dark preference resolution.
//!
//! Storage and `matchMedia` access stay in the browser layer; this module only
//! decides which theme is active and whether a system change may replace it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Accessible label for the toggle control while this theme is active.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Switch to dark mode",
            Theme::Dark => "Switch to light mode",
        }
    }
}

pub fn preferred_theme(stored: Option<Theme>, system_dark: bool) -> Theme {
    match stored {
        Some(theme) => theme,
        None if system_dark => Theme::Dark,
        None => Theme::Light,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    active: Theme,
    explicit: bool,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::resolve(None, false)
    }
}

impl ThemeState {
    pub fn resolve(stored: Option<Theme>, system_dark: bool) -> Self {
        Self {
            active: preferred_theme(stored, system_dark),
            explicit: stored.is_some(),
        }
    }

    pub fn active(&self) -> Theme {
        self.active
    }

    /// Whether the active theme came from a stored user choice.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Flips the theme and marks it as an explicit choice. The returned theme
    /// is the value to persist.
    pub fn toggle(&mut self) -> Theme {
        self.active = self.active.toggled();
        self.explicit = true;
        self.active
    }

    /// Follows a system change unless the user has chosen a theme.
    pub fn on_system_change(&mut self, system_dark: bool) -> Option<Theme> {
        if self.explicit {
            return None;
        }
        let next = preferred_theme(None, system_dark);
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(next)
    }

    pub fn clear_preference(&mut self, system_dark: bool) -> Theme {
        *self = Self::resolve(None, system_dark);
        self.active
    }
}
