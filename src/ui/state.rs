/// Top-level tabs, in sidebar order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Search,
    Music,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Search, Tab::Music, Tab::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Music => "Music",
            Tab::Settings => "Settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tab::Search => "⌕",
            Tab::Music => "♫",
            Tab::Settings => "⚙",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Search => 0,
            Tab::Music => 1,
            Tab::Settings => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Default,
    Crosses,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Default => Theme::Crosses,
            Theme::Crosses => Theme::Default,
        }
    }
}

/// State owned by the shell and handed down to panels on every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellState {
    pub active_tab: Tab,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycling_wraps() {
        assert_eq!(Tab::Settings.next(), Tab::Search);
        assert_eq!(Tab::Search.prev(), Tab::Settings);
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
            assert_eq!(Tab::from_index(tab.index()), Some(tab));
        }
        assert_eq!(Tab::from_index(3), None);
    }

    #[test]
    fn theme_toggle_round_trips() {
        for theme in [Theme::Default, Theme::Crosses] {
            assert_ne!(theme.toggled(), theme);
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn shell_starts_on_search_with_default_theme() {
        let state = ShellState::default();
        assert_eq!(state.active_tab, Tab::Search);
        assert_eq!(state.theme, Theme::Default);
    }
}
