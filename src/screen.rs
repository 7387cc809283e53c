//! The fixed set of screens and their paths.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    Cards,
    Reading,
    History,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Self::Home, Self::Cards, Self::Reading, Self::History];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Cards => "/cards",
            Self::Reading => "/reading",
            Self::History => "/history",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Cards => "cards",
            Self::Reading => "reading",
            Self::History => "history",
        }
    }

    /// Resolves a path like `/history` or `#/history`. Unknown paths go home.
    pub fn from_path(path: &str) -> Self {
        let path = path.trim().trim_start_matches('#');
        let path = if path.is_empty() { "/" } else { path };
        Self::ALL
            .into_iter()
            .find(|s| s.path() == path)
            .unwrap_or_default()
    }

    /// Resolves a screen by name (`home`, `cards`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Accepts either a path or a name.
    pub fn resolve(target: &str) -> Self {
        Self::from_name(target.trim()).unwrap_or_else(|| Self::from_path(target))
    }
}
