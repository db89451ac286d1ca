// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collect the results of a test run and render them in human and
//! machine-readable formats.
//!
//! The main type here is [`ResultAggregator`], driven through the
//! [`SessionListener`] callbacks.

mod aggregator;
mod events;
mod html;
mod json;

pub use aggregator::*;
pub use events::*;
pub use html::*;
pub use json::*;
