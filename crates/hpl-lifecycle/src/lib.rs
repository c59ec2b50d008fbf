//! # hpl-lifecycle — Shipment Lifecycle Engine
//!
//! Implements the shipment lifecycle state machine of the HarvestPath
//! Logistics Stack: the fixed five-milestone sequence, runtime-validated
//! milestone transitions, derivation of the overall shipment status, and
//! the irreversible cancellation override.
//!
//! ## Components
//!
//! - **Milestones** (`milestone.rs`): the fixed, ordered five-stage
//!   sequence (`BookingConfirmed` through `FinalDelivery`) and the
//!   per-milestone status enum. Stage order is positional and never
//!   changes after creation.
//!
//! - **Status derivation** (`status.rs`): `derive_status`, the pure
//!   function computing the overall shipment status from the milestone
//!   sequence with a fixed precedence order. Exception states dominate
//!   progress states; delivery is defined solely by completion of the
//!   final milestone.
//!
//! - **Shipment** (`shipment.rs`): the state-owning aggregate. Every
//!   mutation is a single atomic apply-then-derive step — a reader can
//!   never observe an updated milestone with a stale derived status.
//!   Each applied transition is appended to an audit log.
//!
//! - **Snapshot** (`snapshot.rs`): the stable, serializable
//!   `{milestones, status}` view consumed by the read-only risk-analysis
//!   and summarization collaborators.
//!
//! ## Design
//!
//! Milestone and shipment statuses are closed enums — the transition
//! table is an exhaustive `match`, not string comparison. Illegal
//! transitions, missing delay reasons, out-of-range indices, and writes
//! to terminal shipments are rejected with structured errors before any
//! state is touched.

pub mod milestone;
pub mod shipment;
pub mod snapshot;
pub mod status;

// ─── Milestone re-exports ───────────────────────────────────────────

pub use milestone::{Milestone, MilestoneStage, MilestoneStatus, MILESTONE_COUNT};

// ─── Shipment re-exports ────────────────────────────────────────────

pub use shipment::{
    LifecycleError, NewShipment, Shipment, TransitionRecord,
};

// ─── Status re-exports ──────────────────────────────────────────────

pub use status::{derive_status, ShipmentStatus, ORIGIN_DEPARTURE_THRESHOLD_INDEX};

// ─── Snapshot re-exports ────────────────────────────────────────────

pub use snapshot::{MilestoneSnapshot, ShipmentSnapshot};
