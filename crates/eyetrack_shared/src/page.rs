//! Page identifiers and their static copy.
//!
//! Pages are pre-existing: the markup ships one container per page and the
//! orchestrator only toggles which one is active.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParsePageError;

/// One logical screen of the prototype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    /// Overview with stats, chart, activity feed and recent tests.
    #[default]
    Dashboard,
    /// Test layout configuration.
    Configure,
    /// Image bank management.
    Images,
    /// Report generation.
    Reports,
    /// Past experiments.
    History,
    /// System preferences.
    Settings,
}

/// Animation recipe a page's content uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationProfile {
    /// Stat cards, chart bars, activity items, table rows.
    DashboardStats,
    /// Content wrapper, icon, feature list, action button.
    Placeholder,
}

/// Display title and subtitle of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageTitle {
    /// Header title.
    pub title: &'static str,
    /// Header subtitle.
    pub subtitle: &'static str,
}

impl PageId {
    /// Every page, in sidebar order (digit keys 1-6 follow this order).
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Configure,
        Self::Images,
        Self::Reports,
        Self::History,
        Self::Settings,
    ];

    /// Returns the identifier used by the markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Configure => "configure",
            Self::Images => "images",
            Self::Reports => "reports",
            Self::History => "history",
            Self::Settings => "settings",
        }
    }

    /// Maps a quick-navigation digit (1-6) to its page.
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1..=6 => Some(Self::ALL[usize::from(digit - 1)]),
            _ => None,
        }
    }

    /// Returns the animation profile of this page's content.
    #[must_use]
    pub const fn profile(self) -> AnimationProfile {
        match self {
            Self::Dashboard => AnimationProfile::DashboardStats,
            _ => AnimationProfile::Placeholder,
        }
    }

    /// Returns the header copy for this page.
    #[must_use]
    pub const fn title(self) -> PageTitle {
        match self {
            Self::Dashboard => PageTitle {
                title: "Dashboard",
                subtitle: "Visão geral dos testes e análises",
            },
            Self::Configure => PageTitle {
                title: "Configurar Layout",
                subtitle: "Definir como o teste será apresentado",
            },
            Self::Images => PageTitle {
                title: "Registrar Imagens",
                subtitle: "Gerenciar banco de imagens para testes",
            },
            Self::Reports => PageTitle {
                title: "Gerar Relatórios",
                subtitle: "Análises detalhadas dos resultados",
            },
            Self::History => PageTitle {
                title: "Testes Anteriores",
                subtitle: "Histórico completo de experimentos",
            },
            Self::Settings => PageTitle {
                title: "Configurações",
                subtitle: "Preferências e configurações do sistema",
            },
        }
    }
}

impl PageTitle {
    /// Looks up the copy for a raw identifier.
    ///
    /// Unknown identifiers fall back to the dashboard entry. Navigation never
    /// takes this path: nav clicks parse into a [`PageId`] first and unknown
    /// strings are rejected there, so the title updater always has a real
    /// page. This is for hosts holding raw `data-page` strings.
    #[must_use]
    pub fn lookup(raw: &str) -> Self {
        raw.parse::<PageId>().unwrap_or_default().title()
    }
}

impl FromStr for PageId {
    type Err = ParsePageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| ParsePageError(s.to_owned()))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
