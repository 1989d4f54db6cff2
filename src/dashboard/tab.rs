use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The dashboard section shown in the main pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Overview,
    Clients,
    Routines,
    Exercises,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::Overview,
        DashboardTab::Clients,
        DashboardTab::Routines,
        DashboardTab::Exercises,
    ];

    /// Stable identifier, also used in the config file and on the CLI.
    pub fn id(self) -> &'static str {
        match self {
            DashboardTab::Overview => "overview",
            DashboardTab::Clients => "clients",
            DashboardTab::Routines => "routines",
            DashboardTab::Exercises => "exercises",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Clients => "Clients",
            DashboardTab::Routines => "Routines",
            DashboardTab::Exercises => "Exercises",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DashboardTab {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.id() == wanted)
            .ok_or_else(|| ConfigError::InvalidTab(s.to_string()))
    }
}
