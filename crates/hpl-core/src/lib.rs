//! # hpl-core — Foundational Types for the HarvestPath Logistics Stack
//!
//! This crate is the bedrock of the HarvestPath Logistics Stack. It defines
//! the type-system primitives shared by every other crate in the workspace;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ShipmentId`, `DocumentId`,
//!    `Mawb`, `Hawb` — all newtypes with validated constructors. No bare
//!    strings for identifiers or waybill numbers.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Non-UTC inputs are rejected at
//!    construction.
//!
//! 3. **Inert commercial data stays inert.** `Location`, `Party`, `Message`,
//!    and `ShipmentCost` are carried alongside shipments but never read by
//!    the lifecycle engine. They have no behavior beyond serialization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hpl-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod freight;
pub mod identity;
pub mod party;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use freight::{Location, ShipmentCost};
pub use identity::{DocumentId, Hawb, Mawb, ShipmentId};
pub use party::{Message, Party, PartyRole};
pub use temporal::Timestamp;
