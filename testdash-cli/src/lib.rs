// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The testdash command-line interface.
//!
//! Wraps a host test runner: spawns it, consumes the outcome events it prints
//! to stdout, and renders HTML and JSON dashboards when the run ends. See
//! [`TestdashApp`] for the entry point.

mod dispatch;
mod errors;
mod output;

pub use dispatch::TestdashApp;
pub use errors::ExpectedError;
