//! Runtime settings.
//!
//! Layered with the `config` crate: serde defaults, then an optional TOML file,
//! then `PORTAL_GRID__*` environment variables (`PORTAL_GRID__PAGE_SIZE=25`,
//! `PORTAL_GRID__INITIAL_SORT__DOCUMENTS=submitted:desc`).

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::Table;
use crate::grid::SortState;

const ENV_PREFIX: &str = "PORTAL_GRID";
const ENV_SEPARATOR: &str = "__";

/// Which color theme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Initial sort per table, as `column` or `column:asc|desc` text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InitialSort {
    pub documents: Option<String>,
    pub roles: Option<String>,
    pub users: Option<String>,
    pub departments: Option<String>,
}

impl InitialSort {
    pub fn for_table(&self, table: Table) -> Option<&str> {
        match table {
            Table::Documents => self.documents.as_deref(),
            Table::Roles => self.roles.as_deref(),
            Table::Users => self.users.as_deref(),
            Table::Departments => self.departments.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeChoice,
    /// Rows per page in every table.
    pub page_size: usize,
    /// Clear the current table's selection whenever the search text changes.
    pub clear_selection_on_filter: bool,
    /// Simulated backend latency for row actions.
    pub action_latency_ms: u64,
    pub initial_sort: InitialSort,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Auto,
            page_size: 15,
            clear_selection_on_filter: false,
            action_latency_ms: 150,
            initial_sort: InitialSort::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, None)
    }

    fn build(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                bail!("config file {} not found", path.display());
            }
            builder = builder.add_source(File::from(path));
        }
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env);

        let settings: Settings = builder
            .add_source(environment)
            .build()?
            .try_deserialize()
            .context("invalid settings")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        for table in Table::ALL {
            self.initial_sort_for(table)?;
        }
        Ok(())
    }

    pub fn action_latency(&self) -> Duration {
        Duration::from_millis(self.action_latency_ms)
    }

    /// Parsed initial sort for a table; unsorted when not configured.
    pub fn initial_sort_for(&self, table: Table) -> Result<SortState> {
        match self.initial_sort.for_table(table) {
            Some(text) => text
                .parse::<SortState>()
                .with_context(|| format!("initial_sort.{}", table.key())),
            None => Ok(SortState::unsorted()),
        }
    }
}
