// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the docent workspace.

pub mod mock_provider;

pub use mock_provider::MockProvider;
