//! # Summarization Contract
//!
//! Structured text summaries of a shipment's situation and of its
//! communication log. Like risk assessment, summarization is read-only:
//! it consumes a snapshot or a message slice and returns display text.

use serde::{Deserialize, Serialize};

use hpl_core::Message;
use hpl_lifecycle::ShipmentSnapshot;

use crate::risk::AdvisoryError;

/// A shipment summary: a short prose statement plus attention points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentSummary {
    /// One- or two-sentence summary of the current situation.
    pub summary: String,
    /// Key highlights or attention points.
    pub highlights: Vec<String>,
}

/// Abstract interface for shipment and chat summarization.
pub trait Summarizer: Send + Sync {
    /// Summarize a shipment's current situation.
    ///
    /// # Errors
    ///
    /// Externally-backed implementations surface transport and parsing
    /// failures as [`AdvisoryError`].
    fn summarize_shipment(
        &self,
        snapshot: &ShipmentSnapshot,
    ) -> Result<ShipmentSummary, AdvisoryError>;

    /// Summarize a shipment's communication log.
    ///
    /// # Errors
    ///
    /// As [`Summarizer::summarize_shipment`].
    fn summarize_chat(&self, messages: &[Message]) -> Result<String, AdvisoryError>;
}
