// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only JSON feedback store.
//!
//! Records live in a single JSON-array file. See [`store::FeedbackStore`]
//! for the load/append discipline and its locking.

pub mod record;
pub mod store;

pub use record::{FeedbackDraft, FeedbackRecord};
pub use store::FeedbackStore;
