// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Result collection and report generation for [testdash](https://crates.io/crates/testdash-cli).
//!
//! A host test runner drives a [`ResultAggregator`](reporter::ResultAggregator)
//! through the [`SessionListener`](reporter::SessionListener) callbacks; the
//! accumulated state can then be rendered as a self-contained HTML dashboard
//! or a JSON document at any point during or after the run.

pub mod errors;
pub mod reporter;
