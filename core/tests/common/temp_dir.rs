// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary calendar files for integration tests.
//!
//! The directory is removed when the value is dropped.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary directory holding `.ics` and config files.
#[derive(Debug)]
pub struct TempCalendar {
    dir: TempDir,
}

impl TempCalendar {
    /// Creates an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Writes `content` to `name` inside the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = self.dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Path of `name` inside the directory, whether it exists or not.
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
