//! # Milestone Model
//!
//! The fixed five-stage milestone sequence and per-milestone state.
//!
//! ## Stages
//!
//! ```text
//! 0 BOOKING_CONFIRMED ──▶ 1 CARGO_RECEIVED_ORIGIN ──▶ 2 DEPARTED_FROM_ORIGIN
//!       ──▶ 3 CUSTOMS_CLEARANCE_DESTINATION ──▶ 4 FINAL_DELIVERY
//! ```
//!
//! Stage order is positional and fixed per shipment. Milestones are never
//! reordered, added, or removed after creation — "which milestone is next"
//! is always a question of index, never of resolution.

use serde::{Deserialize, Serialize};

use hpl_core::{DocumentId, Timestamp};

/// Number of milestones in every shipment.
pub const MILESTONE_COUNT: usize = 5;

/// One stage in a shipment's fixed, ordered lifecycle.
///
/// The enum order IS the transit order; [`MilestoneStage::index()`] and
/// [`MilestoneStage::ALL`] expose it positionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStage {
    /// Booking confirmed with the carrier. Completed at shipment creation.
    BookingConfirmed,
    /// Cargo received at the origin facility.
    CargoReceivedOrigin,
    /// Flight departed from the origin airport.
    DepartedFromOrigin,
    /// Customs clearance at the destination.
    CustomsClearanceDestination,
    /// Final delivery to the customer.
    FinalDelivery,
}

impl MilestoneStage {
    /// All stages in transit order.
    pub const ALL: [MilestoneStage; MILESTONE_COUNT] = [
        Self::BookingConfirmed,
        Self::CargoReceivedOrigin,
        Self::DepartedFromOrigin,
        Self::CustomsClearanceDestination,
        Self::FinalDelivery,
    ];

    /// Positional index of this stage within the fixed sequence.
    pub fn index(&self) -> usize {
        match self {
            Self::BookingConfirmed => 0,
            Self::CargoReceivedOrigin => 1,
            Self::DepartedFromOrigin => 2,
            Self::CustomsClearanceDestination => 3,
            Self::FinalDelivery => 4,
        }
    }

    /// The stage at a positional index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable stage label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BookingConfirmed => "Booking confirmed",
            Self::CargoReceivedOrigin => "Cargo received at origin",
            Self::DepartedFromOrigin => "Departed from origin",
            Self::CustomsClearanceDestination => "Customs clearance at destination",
            Self::FinalDelivery => "Final delivery",
        }
    }
}

impl std::fmt::Display for MilestoneStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BookingConfirmed => "BOOKING_CONFIRMED",
            Self::CargoReceivedOrigin => "CARGO_RECEIVED_ORIGIN",
            Self::DepartedFromOrigin => "DEPARTED_FROM_ORIGIN",
            Self::CustomsClearanceDestination => "CUSTOMS_CLEARANCE_DESTINATION",
            Self::FinalDelivery => "FINAL_DELIVERY",
        };
        f.write_str(s)
    }
}

/// The state of a single milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneStatus {
    /// Not yet started.
    Pending,
    /// Actively being worked.
    InProgress,
    /// Finished; `completion_date` is set.
    Completed,
    /// Stalled with a recorded reason.
    Delayed,
    /// External intervention needed before progress can resume.
    RequiresAction,
    /// Permanently cancelled with the shipment.
    Cancelled,
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Delayed => "DELAYED",
            Self::RequiresAction => "REQUIRES_ACTION",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// One milestone of a shipment.
///
/// `completion_date` is set exactly while `status == Completed`;
/// `details` carries the human-readable reason whenever the milestone is
/// `Delayed` or `RequiresAction`. Attached documents are opaque
/// references owned by the document collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Which stage this milestone represents.
    pub stage: MilestoneStage,
    /// Current status.
    pub status: MilestoneStatus,
    /// When the milestone was completed. `Some` iff `status == Completed`.
    pub completion_date: Option<Timestamp>,
    /// Reason text for `Delayed` / `RequiresAction`; may linger after a
    /// resolution for audit until overwritten.
    pub details: Option<String>,
    /// References to documents attached to this milestone.
    pub documents: Vec<DocumentId>,
}

impl Milestone {
    /// A fresh, pending milestone for the given stage.
    pub fn pending(stage: MilestoneStage) -> Self {
        Self {
            stage,
            status: MilestoneStatus::Pending,
            completion_date: None,
            details: None,
            documents: Vec::new(),
        }
    }

    /// A milestone completed at the given time. Used for the booking
    /// confirmation milestone, which is satisfied at shipment creation.
    pub fn completed_at(stage: MilestoneStage, when: Timestamp) -> Self {
        Self {
            stage,
            status: MilestoneStatus::Completed,
            completion_date: Some(when),
            details: None,
            documents: Vec::new(),
        }
    }
}
