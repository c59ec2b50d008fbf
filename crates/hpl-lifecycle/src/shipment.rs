//! # Shipment Aggregate and Transition Validator
//!
//! The state-owning shipment type. All milestone mutations flow through
//! [`Shipment::apply_transition`], which validates the request against
//! the current milestone state, applies it, and re-derives the overall
//! status — one atomic step, no partial-update visibility. Rejected
//! requests leave the shipment untouched.
//!
//! ## Allowed Milestone Transitions
//!
//! ```text
//! Pending ──start──▶ InProgress ──complete──▶ Completed
//!                      │      ▲
//!        delay(reason) │      │ resolve
//!                      ▼      │
//!                       Delayed
//!
//! (any) ──escalate(reason)──▶ RequiresAction ──resolve──▶ InProgress
//! ```
//!
//! Delay and escalation always carry a human-readable reason — the one
//! business rule that must never be silently dropped, since the
//! downstream risk and summarization collaborators narrate from it.
//!
//! Cancellation is the single exception to derived status: it forces
//! every non-completed milestone to `Cancelled` and writes the terminal
//! shipment status directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hpl_core::{DocumentId, Hawb, Location, Mawb, Message, Party, ShipmentCost, ShipmentId, Timestamp};

use crate::milestone::{Milestone, MilestoneStage, MilestoneStatus};
use crate::snapshot::{MilestoneSnapshot, ShipmentSnapshot};
use crate::status::{derive_status, ShipmentStatus};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by shipment lifecycle operations.
///
/// All are local, synchronous, and recoverable; none are retried. An
/// operation either fully applies or has no effect at all.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LifecycleError {
    /// Milestone index outside the shipment's fixed range.
    #[error("milestone index {index} out of range for {count}-milestone shipment")]
    MilestoneIndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of milestones in the shipment.
        count: usize,
    },

    /// Requested status change skips required intermediate states or
    /// contradicts the fixed ordering assumptions.
    #[error("illegal milestone transition: {from} -> {to}")]
    IllegalTransition {
        /// Current milestone status.
        from: MilestoneStatus,
        /// Requested target status.
        to: MilestoneStatus,
    },

    /// Missing required reason text for a delay or escalation.
    #[error("details are required when marking a milestone {target}")]
    MissingDetails {
        /// The target status that requires details.
        target: MilestoneStatus,
    },

    /// Operation attempted on a terminal shipment.
    #[error("shipment is terminal: {status}")]
    TerminalShipment {
        /// The terminal status.
        status: ShipmentStatus,
    },
}

// ─── Transition Record ───────────────────────────────────────────────

/// Audit log entry for one applied milestone transition.
///
/// Every applied transition — including the forced milestone
/// cancellations of [`Shipment::cancel`] — is appended here with its
/// timestamp and reason text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The milestone that changed.
    pub stage: MilestoneStage,
    /// Status before the transition.
    pub from_status: MilestoneStatus,
    /// Status after the transition.
    pub to_status: MilestoneStatus,
    /// When the transition was applied (UTC).
    pub timestamp: Timestamp,
    /// Reason text supplied with the transition, if any.
    pub details: Option<String>,
}

// ─── Construction Input ──────────────────────────────────────────────

/// Descriptive data for a new shipment.
///
/// Everything here is inert to the engine — carried for display and
/// advisory snapshots, never read by the transition validator or the
/// status derivation.
#[derive(Debug, Clone)]
pub struct NewShipment {
    /// Master air waybill number.
    pub mawb: Mawb,
    /// House air waybill number.
    pub hawb: Hawb,
    /// Customer name.
    pub customer: String,
    /// Origin endpoint.
    pub origin: Location,
    /// Destination endpoint.
    pub destination: Location,
    /// Commodity description (e.g. "Fresh-cut roses").
    pub commodity: String,
    /// Estimated delivery date.
    pub estimated_delivery: Timestamp,
    /// Cost breakdown quoted to the customer.
    pub cost: ShipmentCost,
    /// Parties attached to the shipment.
    pub parties: Vec<Party>,
    /// Shipment-level document references.
    pub documents: Vec<DocumentId>,
}

// ─── Shipment ────────────────────────────────────────────────────────

/// A shipment: identity, the fixed milestone sequence, the derived
/// overall status, and inert descriptive data.
///
/// The engine exclusively owns `status` — it is recomputed inside every
/// mutating method and written directly only by [`Shipment::cancel`].
/// Callers read milestones and status through accessors; there is no way
/// to update a milestone without the derived status moving in the same
/// call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// Immutable identity, assigned at creation.
    pub id: ShipmentId,
    /// Master air waybill number.
    pub mawb: Mawb,
    /// House air waybill number.
    pub hawb: Hawb,
    /// Customer name.
    pub customer: String,
    /// Origin endpoint.
    pub origin: Location,
    /// Destination endpoint.
    pub destination: Location,
    /// Commodity description.
    pub commodity: String,
    /// Estimated delivery date.
    pub estimated_delivery: Timestamp,
    /// Cost breakdown.
    pub cost: ShipmentCost,
    /// Parties attached to the shipment.
    pub parties: Vec<Party>,
    /// Shipment-level document references.
    pub documents: Vec<DocumentId>,
    /// Communication log (inert; consumed by the chat summarizer).
    pub messages: Vec<Message>,
    milestones: Vec<Milestone>,
    status: ShipmentStatus,
    transitions: Vec<TransitionRecord>,
}

impl Shipment {
    /// Create a shipment with a fresh identity.
    ///
    /// Every shipment is born with its first milestone already satisfied:
    /// booking confirmation happens at creation time. The remaining
    /// milestones start `Pending`, and the derived status is `PENDING`.
    pub fn new(details: NewShipment) -> Self {
        let now = Timestamp::now();
        let milestones: Vec<Milestone> = MilestoneStage::ALL
            .iter()
            .map(|stage| {
                if stage.index() == 0 {
                    Milestone::completed_at(*stage, now)
                } else {
                    Milestone::pending(*stage)
                }
            })
            .collect();
        let status = derive_status(&milestones);

        Self {
            id: ShipmentId::new(),
            mawb: details.mawb,
            hawb: details.hawb,
            customer: details.customer,
            origin: details.origin,
            destination: details.destination,
            commodity: details.commodity,
            estimated_delivery: details.estimated_delivery,
            cost: details.cost,
            parties: details.parties,
            documents: details.documents,
            messages: Vec::new(),
            milestones,
            status,
            transitions: Vec::new(),
        }
    }

    /// The derived overall status.
    pub fn status(&self) -> ShipmentStatus {
        self.status
    }

    /// The milestone sequence, in transit order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// The transition audit log, oldest first.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// Whether the shipment is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    // ── Milestone Transition Validator ───────────────────────────────

    /// Request a status change for one milestone.
    ///
    /// Validates the request against the current milestone state, applies
    /// it, appends an audit record, and re-derives the overall status —
    /// atomically. On error the shipment is unchanged.
    ///
    /// Legal transitions:
    /// - `Pending → InProgress`
    /// - `InProgress → Completed` (sets the completion date, clears details)
    /// - `InProgress → Delayed` (requires non-empty `details`)
    /// - `Delayed → InProgress` / `RequiresAction → InProgress` (the
    ///   resolution paths; prior issue text retained for audit unless
    ///   replaced)
    /// - any → `RequiresAction` (external escalation, requires non-empty
    ///   `details`)
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::TerminalShipment`] — shipment already
    ///   `Delivered` or `Cancelled`.
    /// - [`LifecycleError::MilestoneIndexOutOfRange`] — bad index.
    /// - [`LifecycleError::IllegalTransition`] — status pair not in the
    ///   table above.
    /// - [`LifecycleError::MissingDetails`] — delay/escalation without a
    ///   reason.
    pub fn apply_transition(
        &mut self,
        index: usize,
        target: MilestoneStatus,
        details: Option<String>,
    ) -> Result<(), LifecycleError> {
        if self.status.is_terminal() {
            return Err(LifecycleError::TerminalShipment {
                status: self.status,
            });
        }
        let count = self.milestones.len();
        let Some(milestone) = self.milestones.get(index) else {
            return Err(LifecycleError::MilestoneIndexOutOfRange { index, count });
        };
        let from = milestone.status;

        let legal = matches!(
            (from, target),
            (MilestoneStatus::Pending, MilestoneStatus::InProgress)
                | (MilestoneStatus::InProgress, MilestoneStatus::Completed)
                | (MilestoneStatus::InProgress, MilestoneStatus::Delayed)
                | (MilestoneStatus::Delayed, MilestoneStatus::InProgress)
                | (MilestoneStatus::RequiresAction, MilestoneStatus::InProgress)
        ) || target == MilestoneStatus::RequiresAction;
        if !legal {
            return Err(LifecycleError::IllegalTransition { from, to: target });
        }

        if matches!(
            target,
            MilestoneStatus::Delayed | MilestoneStatus::RequiresAction
        ) && details.as_deref().map_or(true, |d| d.trim().is_empty())
        {
            return Err(LifecycleError::MissingDetails { target });
        }

        // Validation complete — mutate, log, re-derive.
        let milestone = &mut self.milestones[index];
        milestone.status = target;
        match target {
            MilestoneStatus::Completed => {
                milestone.completion_date = Some(Timestamp::now());
                milestone.details = None;
            }
            MilestoneStatus::InProgress => {
                // Resolution keeps the previous issue text for audit
                // unless the caller replaces it.
                if details.is_some() {
                    milestone.details = details.clone();
                } else if !matches!(
                    from,
                    MilestoneStatus::RequiresAction | MilestoneStatus::Delayed
                ) {
                    milestone.details = None;
                }
            }
            MilestoneStatus::Delayed | MilestoneStatus::RequiresAction => {
                milestone.details = details.clone();
                if from == MilestoneStatus::Completed {
                    milestone.completion_date = None;
                }
            }
            MilestoneStatus::Pending | MilestoneStatus::Cancelled => {
                // Unreachable: neither is a legal target above.
            }
        }

        let stage = self.milestones[index].stage;
        self.transitions.push(TransitionRecord {
            stage,
            from_status: from,
            to_status: target,
            timestamp: Timestamp::now(),
            details,
        });
        self.status = derive_status(&self.milestones);

        tracing::debug!(
            shipment = %self.id,
            stage = %stage,
            from = %from,
            to = %target,
            derived = %self.status,
            "milestone transition applied"
        );
        Ok(())
    }

    // ── Cancellation (Terminal Override) ─────────────────────────────

    /// Irrevocably halt the shipment.
    ///
    /// Completed milestones keep their historical record; every other
    /// milestone is forced to `Cancelled`. The shipment status is written
    /// to `CANCELLED` directly — the only place status is not derived.
    /// All subsequent transitions are rejected.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::TerminalShipment`] when the shipment is already
    /// `Delivered` or `Cancelled`.
    pub fn cancel(&mut self) -> Result<(), LifecycleError> {
        if self.status.is_terminal() {
            return Err(LifecycleError::TerminalShipment {
                status: self.status,
            });
        }

        let now = Timestamp::now();
        for index in 0..self.milestones.len() {
            let from = self.milestones[index].status;
            if from == MilestoneStatus::Completed {
                continue;
            }
            self.milestones[index].status = MilestoneStatus::Cancelled;
            self.transitions.push(TransitionRecord {
                stage: self.milestones[index].stage,
                from_status: from,
                to_status: MilestoneStatus::Cancelled,
                timestamp: now,
                details: None,
            });
        }
        self.status = ShipmentStatus::Cancelled;

        tracing::info!(shipment = %self.id, "shipment cancelled");
        Ok(())
    }

    // ── Derived Queries ──────────────────────────────────────────────

    /// The first milestone still needing work (`Pending`, `InProgress`,
    /// or `RequiresAction`), scanning in index order.
    ///
    /// Returns `None` when the shipment is terminal. Safe to call at any
    /// point in the lifecycle; never mutates.
    pub fn next_actionable_milestone(&self) -> Option<&Milestone> {
        if self.status.is_terminal() {
            return None;
        }
        self.milestones.iter().find(|m| {
            matches!(
                m.status,
                MilestoneStatus::Pending
                    | MilestoneStatus::InProgress
                    | MilestoneStatus::RequiresAction
            )
        })
    }

    /// Drive the next actionable milestone one legal step forward.
    ///
    /// `Pending` milestones are started, `InProgress` milestones are
    /// completed, and `RequiresAction` milestones are resolved back to
    /// `InProgress`. Returns the stage that moved, or `Ok(None)` when the
    /// shipment is terminal or nothing is actionable. Never bypasses
    /// [`Shipment::apply_transition`].
    pub fn advance(&mut self) -> Result<Option<MilestoneStage>, LifecycleError> {
        let Some(milestone) = self.next_actionable_milestone() else {
            return Ok(None);
        };
        let index = milestone.stage.index();
        let target = match milestone.status {
            MilestoneStatus::Pending => MilestoneStatus::InProgress,
            MilestoneStatus::InProgress => MilestoneStatus::Completed,
            MilestoneStatus::RequiresAction => MilestoneStatus::InProgress,
            _ => return Ok(None),
        };
        self.apply_transition(index, target, None)?;
        Ok(Some(self.milestones[index].stage))
    }

    /// Attach a document reference to a milestone.
    ///
    /// Input from the document collaborator; the engine tracks presence
    /// only and never inspects content. Does not affect milestone status
    /// or the derived shipment status.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::MilestoneIndexOutOfRange`] for a bad index.
    pub fn attach_milestone_document(
        &mut self,
        index: usize,
        document: DocumentId,
    ) -> Result<(), LifecycleError> {
        let count = self.milestones.len();
        let Some(milestone) = self.milestones.get_mut(index) else {
            return Err(LifecycleError::MilestoneIndexOutOfRange { index, count });
        };
        milestone.documents.push(document);
        Ok(())
    }

    /// A stable, serializable view of `{milestones, status}` for the
    /// read-only risk-analysis and summarization collaborators.
    pub fn snapshot(&self) -> ShipmentSnapshot {
        ShipmentSnapshot {
            id: self.id.clone(),
            status: self.status,
            milestones: self
                .milestones
                .iter()
                .map(|m| MilestoneSnapshot {
                    stage: m.stage,
                    status: m.status,
                    completion_date: m.completion_date,
                    details: m.details.clone(),
                    document_count: m.documents.len(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestone::MILESTONE_COUNT;

    fn new_shipment() -> Shipment {
        Shipment::new(NewShipment {
            mawb: Mawb::new("145-20881194").unwrap(),
            hawb: Hawb::new("HPL-GEN1042").unwrap(),
            customer: "Bloom & Co".to_string(),
            origin: Location {
                country: "Colombia".to_string(),
                city: "Bogotá".to_string(),
                lat: 4.7110,
                lng: -74.0721,
            },
            destination: Location {
                country: "Netherlands".to_string(),
                city: "Amsterdam".to_string(),
                lat: 52.3676,
                lng: 4.9041,
            },
            commodity: "Fresh-cut roses".to_string(),
            estimated_delivery: Timestamp::parse("2026-03-09T12:00:00Z").unwrap(),
            cost: ShipmentCost::itemized(1200, 150, 350),
            parties: Vec::new(),
            documents: Vec::new(),
        })
    }

    use MilestoneStatus::{Completed, Delayed, InProgress, Pending, RequiresAction};

    // ── Creation ─────────────────────────────────────────────────────

    #[test]
    fn test_new_shipment_birth_state() {
        let s = new_shipment();
        assert_eq!(s.status(), ShipmentStatus::Pending);
        assert_eq!(s.milestones().len(), MILESTONE_COUNT);
        assert_eq!(s.milestones()[0].status, Completed);
        assert!(s.milestones()[0].completion_date.is_some());
        for ms in &s.milestones()[1..] {
            assert_eq!(ms.status, Pending);
        }
        assert!(s.transitions().is_empty());
    }

    // ── Legal transitions ────────────────────────────────────────────

    #[test]
    fn test_start_then_complete() {
        let mut s = new_shipment();
        s.apply_transition(1, InProgress, None).unwrap();
        assert_eq!(s.status(), ShipmentStatus::InTransit);
        s.apply_transition(1, Completed, None).unwrap();
        assert_eq!(s.milestones()[1].status, Completed);
        assert!(s.milestones()[1].completion_date.is_some());
        assert_eq!(s.transitions().len(), 2);
    }

    #[test]
    fn test_complete_clears_details() {
        let mut s = new_shipment();
        s.apply_transition(1, InProgress, None).unwrap();
        s.apply_transition(1, RequiresAction, Some("Paperwork mismatch".into()))
            .unwrap();
        s.apply_transition(1, InProgress, None).unwrap();
        s.apply_transition(1, Completed, None).unwrap();
        assert!(s.milestones()[1].details.is_none());
    }

    #[test]
    fn test_delay_requires_details() {
        let mut s = new_shipment();
        s.apply_transition(1, InProgress, None).unwrap();
        let err = s.apply_transition(1, Delayed, None).unwrap_err();
        assert_eq!(err, LifecycleError::MissingDetails { target: Delayed });
        // Whitespace-only reasons are rejected too.
        let err = s.apply_transition(1, Delayed, Some("   ".into())).unwrap_err();
        assert_eq!(err, LifecycleError::MissingDetails { target: Delayed });
        // Shipment unchanged by the rejected calls.
        assert_eq!(s.milestones()[1].status, InProgress);
        assert_eq!(s.status(), ShipmentStatus::InTransit);

        s.apply_transition(1, Delayed, Some("Storm over the Andes".into()))
            .unwrap();
        assert_eq!(s.status(), ShipmentStatus::Delayed);
        assert_eq!(
            s.milestones()[1].details.as_deref(),
            Some("Storm over the Andes")
        );
    }

    #[test]
    fn test_escalation_from_any_state_requires_details() {
        let mut s = new_shipment();
        // From Pending, without prior InProgress.
        let err = s.apply_transition(3, RequiresAction, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::MissingDetails {
                target: RequiresAction
            }
        );
        s.apply_transition(3, RequiresAction, Some("Missing phytosanitary cert".into()))
            .unwrap();
        assert_eq!(s.status(), ShipmentStatus::RequiresAction);
    }

    #[test]
    fn test_escalating_completed_milestone_clears_date() {
        let mut s = new_shipment();
        s.apply_transition(0, RequiresAction, Some("Booking reference disputed".into()))
            .unwrap();
        assert_eq!(s.milestones()[0].status, RequiresAction);
        assert!(s.milestones()[0].completion_date.is_none());
    }

    #[test]
    fn test_resolution_retains_issue_details() {
        let mut s = new_shipment();
        s.apply_transition(2, RequiresAction, Some("Manifest mismatch".into()))
            .unwrap();
        s.apply_transition(2, InProgress, None).unwrap();
        // The previous issue text stays for audit until overwritten.
        assert_eq!(
            s.milestones()[2].details.as_deref(),
            Some("Manifest mismatch")
        );
        assert_eq!(s.status(), ShipmentStatus::InTransit);
    }

    // ── Illegal transitions ──────────────────────────────────────────

    #[test]
    fn test_pending_cannot_jump_to_completed() {
        let mut s = new_shipment();
        let err = s.apply_transition(2, Completed, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::IllegalTransition {
                from: Pending,
                to: Completed
            }
        );
    }

    #[test]
    fn test_pending_cannot_be_delayed_directly() {
        let mut s = new_shipment();
        let err = s
            .apply_transition(2, Delayed, Some("reason".into()))
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::IllegalTransition {
                from: Pending,
                to: Delayed
            }
        );
    }

    #[test]
    fn test_delayed_resolves_back_to_in_progress() {
        let mut s = new_shipment();
        s.apply_transition(1, InProgress, None).unwrap();
        s.apply_transition(1, Delayed, Some("Cold chain breach".into()))
            .unwrap();
        s.apply_transition(1, InProgress, None).unwrap();
        assert_eq!(s.status(), ShipmentStatus::InTransit);
        // The delay reason stays for audit until overwritten.
        assert_eq!(
            s.milestones()[1].details.as_deref(),
            Some("Cold chain breach")
        );
    }

    #[test]
    fn test_delayed_cannot_jump_to_completed() {
        let mut s = new_shipment();
        s.apply_transition(1, InProgress, None).unwrap();
        s.apply_transition(1, Delayed, Some("Cold chain breach".into()))
            .unwrap();
        let err = s.apply_transition(1, Completed, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::IllegalTransition {
                from: Delayed,
                to: Completed
            }
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let mut s = new_shipment();
        let err = s.apply_transition(MILESTONE_COUNT, InProgress, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::MilestoneIndexOutOfRange {
                index: MILESTONE_COUNT,
                count: MILESTONE_COUNT
            }
        );
    }

    // ── Delivery ─────────────────────────────────────────────────────

    fn deliver(s: &mut Shipment) {
        for index in 1..MILESTONE_COUNT {
            s.apply_transition(index, InProgress, None).unwrap();
            s.apply_transition(index, Completed, None).unwrap();
        }
    }

    #[test]
    fn test_full_run_to_delivery() {
        let mut s = new_shipment();
        deliver(&mut s);
        assert_eq!(s.status(), ShipmentStatus::Delivered);
        assert!(s.is_terminal());
        assert_eq!(s.transitions().len(), 2 * (MILESTONE_COUNT - 1));
    }

    #[test]
    fn test_delivered_rejects_further_transitions() {
        let mut s = new_shipment();
        deliver(&mut s);
        let err = s
            .apply_transition(2, RequiresAction, Some("too late".into()))
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::TerminalShipment {
                status: ShipmentStatus::Delivered
            }
        );
    }

    // ── Cancellation ─────────────────────────────────────────────────

    #[test]
    fn test_cancel_preserves_completed_history() {
        let mut s = new_shipment();
        s.apply_transition(1, InProgress, None).unwrap();
        s.apply_transition(1, Completed, None).unwrap();
        s.apply_transition(2, InProgress, None).unwrap();
        s.apply_transition(2, Delayed, Some("Storm".into())).unwrap();

        s.cancel().unwrap();
        assert_eq!(s.status(), ShipmentStatus::Cancelled);
        assert_eq!(s.milestones()[0].status, Completed);
        assert_eq!(s.milestones()[1].status, Completed);
        for ms in &s.milestones()[2..] {
            assert_eq!(ms.status, MilestoneStatus::Cancelled);
        }
    }

    #[test]
    fn test_cancel_is_sticky() {
        let mut s = new_shipment();
        s.cancel().unwrap();
        let err = s.apply_transition(1, InProgress, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::TerminalShipment {
                status: ShipmentStatus::Cancelled
            }
        );
        let err = s.cancel().unwrap_err();
        assert_eq!(
            err,
            LifecycleError::TerminalShipment {
                status: ShipmentStatus::Cancelled
            }
        );
    }

    #[test]
    fn test_cancel_after_delivery_rejected() {
        let mut s = new_shipment();
        deliver(&mut s);
        let err = s.cancel().unwrap_err();
        assert_eq!(
            err,
            LifecycleError::TerminalShipment {
                status: ShipmentStatus::Delivered
            }
        );
    }

    #[test]
    fn test_cancel_logs_forced_milestones() {
        let mut s = new_shipment();
        s.cancel().unwrap();
        // Milestone 0 was completed at birth; the other four are forced.
        let forced: Vec<_> = s
            .transitions()
            .iter()
            .filter(|r| r.to_status == MilestoneStatus::Cancelled)
            .collect();
        assert_eq!(forced.len(), MILESTONE_COUNT - 1);
    }

    // ── Queries and advance ──────────────────────────────────────────

    #[test]
    fn test_next_actionable_scans_in_order() {
        let mut s = new_shipment();
        assert_eq!(
            s.next_actionable_milestone().map(|m| m.stage),
            Some(MilestoneStage::CargoReceivedOrigin)
        );
        s.apply_transition(1, InProgress, None).unwrap();
        s.apply_transition(1, Completed, None).unwrap();
        assert_eq!(
            s.next_actionable_milestone().map(|m| m.stage),
            Some(MilestoneStage::DepartedFromOrigin)
        );
    }

    #[test]
    fn test_next_actionable_skips_delayed() {
        let mut s = new_shipment();
        s.apply_transition(1, InProgress, None).unwrap();
        s.apply_transition(1, Delayed, Some("Storm".into())).unwrap();
        assert_eq!(
            s.next_actionable_milestone().map(|m| m.stage),
            Some(MilestoneStage::DepartedFromOrigin)
        );
    }

    #[test]
    fn test_next_actionable_none_when_terminal() {
        let mut s = new_shipment();
        s.cancel().unwrap();
        assert!(s.next_actionable_milestone().is_none());
    }

    #[test]
    fn test_advance_walks_to_delivery() {
        let mut s = new_shipment();
        // Each remaining milestone needs a start step and a complete step.
        let mut steps = 0;
        while s.advance().unwrap().is_some() {
            steps += 1;
            assert!(steps <= 2 * MILESTONE_COUNT, "advance did not terminate");
        }
        assert_eq!(s.status(), ShipmentStatus::Delivered);
        assert_eq!(steps, 2 * (MILESTONE_COUNT - 1));
    }

    #[test]
    fn test_advance_resolves_escalations() {
        let mut s = new_shipment();
        s.apply_transition(1, RequiresAction, Some("Crate damage reported".into()))
            .unwrap();
        let moved = s.advance().unwrap();
        assert_eq!(moved, Some(MilestoneStage::CargoReceivedOrigin));
        assert_eq!(s.milestones()[1].status, InProgress);
    }

    #[test]
    fn test_advance_noop_on_cancelled() {
        let mut s = new_shipment();
        s.cancel().unwrap();
        assert_eq!(s.advance().unwrap(), None);
    }

    // ── Documents ────────────────────────────────────────────────────

    #[test]
    fn test_attach_milestone_document() {
        let mut s = new_shipment();
        let doc = DocumentId::new();
        s.attach_milestone_document(3, doc.clone()).unwrap();
        assert_eq!(s.milestones()[3].documents, vec![doc]);
        assert!(s
            .attach_milestone_document(MILESTONE_COUNT, DocumentId::new())
            .is_err());
    }

    // ── Snapshot ─────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut s = new_shipment();
        s.apply_transition(1, InProgress, None).unwrap();
        s.apply_transition(1, Delayed, Some("Storm".into())).unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.id, s.id);
        assert_eq!(snap.status, ShipmentStatus::Delayed);
        assert_eq!(snap.milestones.len(), MILESTONE_COUNT);
        assert_eq!(snap.milestones[1].details.as_deref(), Some("Storm"));
    }
}
