// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by testdash-reporter.

use camino::Utf8PathBuf;
use std::{fmt, io};
use thiserror::Error;

/// The kind of report being produced, for error messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportKind {
    /// The self-contained HTML dashboard.
    Html,
    /// The machine-readable JSON document.
    Json,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Html => write!(f, "HTML"),
            ReportKind::Json => write!(f, "JSON"),
        }
    }
}

/// An error that occurred while producing a report file.
///
/// A silently missing report is worse than a failed run, so write failures are
/// always propagated to the caller rather than swallowed.
#[derive(Debug, Error)]
pub enum WriteReportError {
    /// An error occurred while serializing report data.
    #[error("error serializing {kind} report data")]
    Serialize {
        /// The report being serialized.
        kind: ReportKind,

        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },

    /// An error occurred while writing the report to disk.
    #[error("error writing {kind} report to `{path}`")]
    Io {
        /// The report being written.
        kind: ReportKind,

        /// The path the report was being written to.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },
}
