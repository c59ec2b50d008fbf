//! # Status Derivation
//!
//! Computes the overall shipment status from the milestone sequence.
//! This is the most consequential piece of logic in the stack: every
//! list view, dashboard drill-down, and advisory assessment keys off the
//! value computed here.
//!
//! ## Precedence
//!
//! Evaluated in this exact order, first match wins:
//!
//! 1. Final milestone `Completed` → `DELIVERED`.
//! 2. Any milestone `Delayed` → `DELAYED`.
//! 3. Any milestone `RequiresAction` → `REQUIRES_ACTION`.
//! 4. Any milestone `InProgress` → `IN_TRANSIT`.
//! 5. All milestones `Pending`/`Completed`: all complete → `DELIVERED`;
//!    first pending index past the origin-departure threshold →
//!    `IN_TRANSIT`; otherwise `PENDING`.
//! 6. Fallback → `IN_TRANSIT`.
//!
//! Exception states dominate progress states so a shipment with one
//! stalled milestone is never reported as smoothly in transit. Delivery
//! is checked first: explicit completion of the terminal milestone is
//! the strongest signal and must not be masked by a stale delay flag on
//! a milestone that was later resolved.

use serde::{Deserialize, Serialize};

use crate::milestone::{Milestone, MilestoneStatus};

/// First-pending-index threshold separating "just booked" from
/// "physically moving" when no milestone is actively in progress.
///
/// Modeling assumption tied to the fixed five-stage sequence: index 1 is
/// cargo receipt at origin, so a first pending index strictly greater
/// than 1 means the cargo has progressed past booking and origin
/// receipt. The value is an inherited business rule pending product
/// confirmation; do not change it independently of the stage sequence.
pub const ORIGIN_DEPARTURE_THRESHOLD_INDEX: usize = 1;

/// The overall, derived state of a shipment.
///
/// A pure function of the milestones ([`derive_status`]) except for the
/// `Cancelled` override, which is written directly by
/// [`crate::Shipment::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    /// Booked; nothing beyond the confirmation milestone has started.
    Pending,
    /// Cargo is moving between origin and destination.
    InTransit,
    /// Final milestone completed (terminal).
    Delivered,
    /// At least one milestone is stalled.
    Delayed,
    /// At least one milestone needs external intervention.
    RequiresAction,
    /// Explicitly cancelled (terminal).
    Cancelled,
}

impl ShipmentStatus {
    /// Whether this status is terminal — no further milestone
    /// transitions are permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Delayed => "DELAYED",
            Self::RequiresAction => "REQUIRES_ACTION",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// Derive the overall shipment status from a milestone sequence.
///
/// Deterministic and side-effect free; calling it twice on the same
/// sequence always yields the same status. The engine invokes it after
/// every applied transition so the stored status can never lag the
/// milestones.
pub fn derive_status(milestones: &[Milestone]) -> ShipmentStatus {
    // Delivery is defined solely by completion of the final milestone.
    match milestones.last() {
        Some(last) if last.status == MilestoneStatus::Completed => {
            return ShipmentStatus::Delivered;
        }
        None => return ShipmentStatus::Pending,
        Some(_) => {}
    }

    if milestones
        .iter()
        .any(|m| m.status == MilestoneStatus::Delayed)
    {
        return ShipmentStatus::Delayed;
    }
    if milestones
        .iter()
        .any(|m| m.status == MilestoneStatus::RequiresAction)
    {
        return ShipmentStatus::RequiresAction;
    }
    if milestones
        .iter()
        .any(|m| m.status == MilestoneStatus::InProgress)
    {
        return ShipmentStatus::InTransit;
    }

    let all_pending_or_complete = milestones.iter().all(|m| {
        matches!(
            m.status,
            MilestoneStatus::Pending | MilestoneStatus::Completed
        )
    });
    if all_pending_or_complete {
        return match milestones
            .iter()
            .position(|m| m.status == MilestoneStatus::Pending)
        {
            None => ShipmentStatus::Delivered,
            Some(first_pending) if first_pending > ORIGIN_DEPARTURE_THRESHOLD_INDEX => {
                ShipmentStatus::InTransit
            }
            Some(_) => ShipmentStatus::Pending,
        };
    }

    // Only reachable when a milestone is Cancelled without the shipment
    // override having fired.
    ShipmentStatus::InTransit
}
