// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Travel-guide chat service and feedback enrichment pipeline.
//!
//! [`chat::TravelGuide`] answers chat messages with a fixed persona;
//! [`enrich::FeedbackPipeline`] validates, enriches, and persists feedback
//! submissions. Both talk to the completion service only through the
//! [`docent_core::CompletionProvider`] trait.

pub mod chat;
pub mod enrich;

pub use chat::TravelGuide;
pub use enrich::{FeedbackPipeline, FeedbackSubmission};
