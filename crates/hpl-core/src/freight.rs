//! # Freight Primitives
//!
//! Geographic endpoints and cost breakdowns carried on a shipment.
//! Inert from the lifecycle engine's perspective — validated once at
//! construction, then only serialized for display and advisory snapshots.

use serde::{Deserialize, Serialize};

/// A geographic endpoint of a shipment leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// ISO country name (e.g. "Colombia").
    pub country: String,
    /// City name (e.g. "Bogotá").
    pub city: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// Cost breakdown for a shipment, in whole currency units.
///
/// `total` is stored rather than derived so that the figure quoted to the
/// customer survives later adjustments to the component lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentCost {
    /// Air freight charge.
    pub freight: u64,
    /// Cargo insurance premium.
    pub insurance: u64,
    /// Customs duties and brokerage.
    pub customs: u64,
    /// Quoted total.
    pub total: u64,
}

impl ShipmentCost {
    /// A cost record whose total is the sum of its components.
    pub fn itemized(freight: u64, insurance: u64, customs: u64) -> Self {
        Self {
            freight,
            insurance,
            customs,
            total: freight + insurance + customs,
        }
    }
}
