// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use recurcal_ical::recurrence::DEFAULT_MAX_EMPTY_PERIODS;
use recurcal_ical::{FoldingStyle, FormatOptions};

use crate::error::Error;

/// Product identifier written into calendars created by this crate.
pub const DEFAULT_PROD_ID: &str = "-//recurcal//recurcal 0.1//EN";

/// Configuration for building and writing calendars.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// PRODID of calendars and messages created here.
    pub prod_id: String,

    /// Fold content lines longer than this many octets; `0` or `None`
    /// disables folding.
    pub fold_width: Option<usize>,

    /// Continue folded lines with a tab instead of a space.
    pub fold_with_tab: bool,

    /// Periods in a row without an instance before an unbounded expansion
    /// stops.
    pub max_empty_periods: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prod_id: DEFAULT_PROD_ID.to_string(),
            fold_width: Some(75),
            fold_with_tab: false,
            max_empty_periods: DEFAULT_MAX_EMPTY_PERIODS,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text; missing keys take defaults.
    ///
    /// # Errors
    /// If the text is not valid TOML or a key has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    /// If the file cannot be read or parsed.
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(prod_id = %config.prod_id, "configuration loaded");
        Ok(config)
    }

    /// Formatter options for writing calendars.
    #[must_use]
    pub fn format_options(&self) -> FormatOptions {
        let style = if self.fold_with_tab {
            FoldingStyle::Tab
        } else {
            FoldingStyle::Space
        };
        FormatOptions::default()
            .folding(self.fold_width.filter(|&width| width > 0))
            .folding_style(style)
    }
}
