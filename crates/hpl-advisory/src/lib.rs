//! # hpl-advisory — Read-Only Advisory Seam
//!
//! The in-process contracts for the collaborators that narrate shipment
//! state: risk assessment, shipment summarization, and chat
//! summarization. All of them consume the engine's serializable
//! [`hpl_lifecycle::ShipmentSnapshot`] and produce commentary for
//! display — nothing they return is ever fed back into the engine's
//! decisions.
//!
//! ## Implementations
//!
//! The traits keep externally-backed implementations (an LLM service, in
//! the deployed product) interchangeable with [`HeuristicAdvisor`], the
//! deterministic offline implementation used when no service is
//! configured and in every test. Both sides of the seam see the same
//! snapshot contract.

pub mod documents;
pub mod heuristic;
pub mod risk;
pub mod summary;

pub use documents::suggested_documents;
pub use heuristic::HeuristicAdvisor;
pub use risk::{AdvisoryError, RiskAnalyst, RiskAssessment, RiskLevel};
pub use summary::{ShipmentSummary, Summarizer};
