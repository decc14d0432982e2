//! Common test utilities for tmplx integration tests
//!
//! [`TestProject`] owns a temporary working directory and builds `tmplx`
//! commands that run inside it with a cleared environment.

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory the binary runs in.
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    /// Create an empty project directory.
    pub fn new() -> Self {
        tmplx_cli::test_utils::init_test_logging(None);
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the project directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `relative` inside the project, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// A `tmplx` command in the project directory with an empty environment.
    ///
    /// Clearing the environment keeps `Env` deterministic and stops
    /// `TMPLX_*` or `RUST_LOG` values of the developer from leaking in.
    pub fn tmplx(&self) -> Command {
        let mut cmd = Command::cargo_bin("tmplx").unwrap();
        cmd.current_dir(self.temp_dir.path()).env_clear();
        cmd
    }
}
