//! # Shipment Snapshot
//!
//! The stable, serializable `{milestones, status}` view handed to the
//! read-only collaborators (risk analysis, shipment and chat
//! summarization). Consumers narrate from this snapshot; nothing they
//! produce is ever fed back into the engine's decisions.
//!
//! Field names and enum spellings here are a contract — collaborators
//! and their prompts key off them, so changes are breaking.

use serde::{Deserialize, Serialize};

use hpl_core::{ShipmentId, Timestamp};

use crate::milestone::{MilestoneStage, MilestoneStatus};
use crate::status::ShipmentStatus;

/// Read-only view of one milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneSnapshot {
    /// Which stage this milestone represents.
    pub stage: MilestoneStage,
    /// Current status.
    pub status: MilestoneStatus,
    /// Completion date, when completed.
    pub completion_date: Option<Timestamp>,
    /// Delay/escalation reason text, when present.
    pub details: Option<String>,
    /// Number of attached documents (presence only; content is owned by
    /// the document collaborator).
    pub document_count: usize,
}

/// Read-only view of a shipment for advisory consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSnapshot {
    /// Shipment identity.
    pub id: ShipmentId,
    /// Derived overall status (or the cancellation override).
    pub status: ShipmentStatus,
    /// Milestones in transit order.
    pub milestones: Vec<MilestoneSnapshot>,
}

impl ShipmentSnapshot {
    /// Milestones currently carrying an exception state, in transit order.
    pub fn exceptions(&self) -> impl Iterator<Item = &MilestoneSnapshot> {
        self.milestones.iter().filter(|m| {
            matches!(
                m.status,
                MilestoneStatus::Delayed | MilestoneStatus::RequiresAction
            )
        })
    }
}
