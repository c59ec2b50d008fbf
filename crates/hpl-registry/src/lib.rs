//! # hpl-registry — In-Memory Shipment Collection
//!
//! Owns the set of live shipments and routes every mutation through the
//! lifecycle engine under a single write lock. Callers get cloned
//! snapshots back — a reader can never observe a shipment with an
//! updated milestone but a stale derived status.
//!
//! ## Concurrency Model
//!
//! The engine itself is synchronous and single-threaded per shipment;
//! the registry makes the required "one mutation completes before the
//! next begins" discipline explicit with an `RwLock` around the
//! collection. Concurrent readers are unrestricted; writers serialize.
//! If two transition requests race for the same shipment, last-write-wins.

pub mod registry;

pub use registry::{RegistryError, ShipmentFilter, ShipmentRegistry};
