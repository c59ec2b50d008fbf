//! # Risk Assessment Contract
//!
//! Defines the abstract interface for shipment risk analysis. All
//! implementations (heuristic, LLM-backed) must satisfy this trait.
//!
//! Assessment is read-only over a snapshot: the trait takes
//! `&ShipmentSnapshot` and can neither reach the registry nor mutate
//! lifecycle state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hpl_lifecycle::ShipmentSnapshot;

/// Error from an advisory implementation.
///
/// The heuristic implementation is infallible; these variants exist for
/// externally-backed implementations.
#[derive(Error, Debug)]
pub enum AdvisoryError {
    /// The backing service could not be reached.
    #[error("advisory service unavailable: {0}")]
    Unavailable(String),

    /// The backing service returned a response that could not be parsed.
    #[error("malformed advisory response: {0}")]
    MalformedResponse(String),
}

/// Assessed risk grade for a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// No exception states; transit proceeding as planned.
    Low,
    /// Intervention needed or documentation gaps ahead.
    Medium,
    /// At least one milestone is stalled.
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// A risk assessment: a grade plus the analysis points behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Overall risk grade.
    pub risk_level: RiskLevel,
    /// Human-readable factors explaining the grade.
    pub analysis_points: Vec<String>,
}

/// Abstract interface for shipment risk analysis.
pub trait RiskAnalyst: Send + Sync {
    /// Assess a shipment snapshot.
    ///
    /// # Errors
    ///
    /// Externally-backed implementations surface transport and parsing
    /// failures as [`AdvisoryError`].
    fn assess(&self, snapshot: &ShipmentSnapshot) -> Result<RiskAssessment, AdvisoryError>;
}
