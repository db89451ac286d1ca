// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The machine-readable JSON report document.

use crate::{
    errors::{ReportKind, WriteReportError},
    reporter::aggregator::{CategoryTally, ResultAggregator, RunSummary, TestRecord},
};
use camino::Utf8Path;
use chrono::Local;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use tracing::debug;

/// A point-in-time JSON rendering of an aggregator's state.
///
/// The document layout is part of the tool's contract: a top-level object with
/// `summary`, `categories` (in first-sighted order), `tests` (in
/// first-recorded order) and an RFC 3339 `timestamp`.
#[derive(Clone, Debug, Serialize)]
pub struct JsonReport<'a> {
    summary: &'a RunSummary,
    categories: &'a IndexMap<String, CategoryTally>,
    tests: &'a [TestRecord],
    timestamp: String,
}

impl<'a> JsonReport<'a> {
    /// Builds a report document from the aggregator's current state, stamped
    /// with the current local time.
    pub fn new(aggregator: &'a ResultAggregator) -> Self {
        Self {
            summary: aggregator.summary(),
            categories: aggregator.categories(),
            tests: aggregator.records(),
            timestamp: Local::now().to_rfc3339(),
        }
    }

    /// Serializes the document as indented UTF-8 text.
    pub fn to_string_pretty(&self) -> Result<String, WriteReportError> {
        serde_json::to_string_pretty(self).map_err(|error| WriteReportError::Serialize {
            kind: ReportKind::Json,
            error,
        })
    }

    /// Serializes the document and writes it to `path`, returning the
    /// rendered text.
    pub fn save(&self, path: &Utf8Path) -> Result<String, WriteReportError> {
        let rendered = self.to_string_pretty()?;
        fs::write(path, &rendered).map_err(|error| WriteReportError::Io {
            kind: ReportKind::Json,
            path: path.to_owned(),
            error,
        })?;
        debug!(%path, "JSON report written");
        Ok(rendered)
    }
}
