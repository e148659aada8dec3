// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Regua integration tests.
//!
//! - [`MockProvider`] - scripted chat provider that records every call

pub mod mock_provider;

pub use mock_provider::MockProvider;
