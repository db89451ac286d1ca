// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use owo_colors::{OwoColorize, Style, style};
use std::{error::Error, io};
use supports_color::Stream;
use testdash_reporter::errors::WriteReportError;
use thiserror::Error;

/// An error occurred in a process that the CLI knows how to present.
///
/// Errors that are valid user-facing outcomes (as opposed to bugs) go through
/// this enum so each maps to a stable exit code.
#[derive(Debug, Error)]
pub enum ExpectedError {
    /// The host runner could not be spawned.
    #[error("error spawning host runner `{command}`")]
    RunnerSpawn {
        /// The command that failed to spawn.
        command: String,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// Reading the host runner's output failed mid-run.
    #[error("error reading host runner output")]
    RunnerRead {
        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// A report file could not be produced.
    #[error(transparent)]
    WriteReport(#[from] WriteReportError),
}

impl ExpectedError {
    pub(crate) fn runner_spawn(command: impl Into<String>, error: io::Error) -> Self {
        Self::RunnerSpawn {
            command: command.into(),
            error,
        }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::RunnerSpawn { .. } | Self::RunnerRead { .. } => 101,
            Self::WriteReport(_) => 102,
        }
    }

    /// Displays this error and its cause chain to stderr.
    pub fn display_to_stderr(&self) {
        let (error_style, cause_style) = if supports_color::on_cached(Stream::Stderr).is_some() {
            (style().red().bold(), style().yellow())
        } else {
            (Style::new(), Style::new())
        };

        eprintln!("{}: {self}", "error".style(error_style));
        let mut next_error = self.source();
        while let Some(error) = next_error {
            eprintln!("{}: {error}", "caused by".style(cause_style));
            next_error = error.source();
        }
    }
}
