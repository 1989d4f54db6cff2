use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::dashboard::DashboardTab;

#[derive(Debug, Parser)]
#[command(name = "coachdesk", version, about = "Terminal dashboard for personal trainers")]
pub struct Cli {
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON file with clients, exercises and routines
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Open the dashboard directly on this tab (overview, clients, routines, exercises)
    #[arg(long, value_name = "TAB")]
    pub tab: Option<DashboardTab>,

    /// Log filter, e.g. `debug` or `coachdesk=trace`
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log file location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Layers command-line overrides on top of the loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(data) = &self.data {
            config.data_file = Some(data.clone());
        }
        if let Some(tab) = self.tab {
            config.default_tab = tab;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }

    /// Whether to skip the landing route.
    pub fn starts_in_dashboard(&self) -> bool {
        self.tab.is_some()
    }
}
