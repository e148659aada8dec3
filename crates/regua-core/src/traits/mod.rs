// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the analysis core and its external collaborators.

pub mod provider;

pub use provider::ChatProvider;
