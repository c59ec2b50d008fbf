//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in the HarvestPath Stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `DocumentId` where a `ShipmentId` is expected, and a house waybill
//! cannot stand in for a master waybill.
//!
//! Air waybill numbers are validated at construction. A MAWB follows the
//! IATA `NNN-NNNNNNNN` layout (3-digit airline prefix, dash, 8-digit
//! serial); a HAWB is the forwarder's own reference and is only required
//! to be non-empty ASCII alphanumeric with dashes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Unique identifier for a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentId(pub Uuid);

/// Unique identifier for a document attached to a shipment or milestone.
///
/// Document content is owned by the document collaborator; the lifecycle
/// engine only tracks references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl ShipmentId {
    /// Generate a new random shipment identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ShipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentId {
    /// Generate a new random document identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shipment:{}", self.0)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "document:{}", self.0)
    }
}

/// Master air waybill number (carrier-issued).
///
/// Format: `NNN-NNNNNNNN` — 3-digit airline prefix, dash, 8-digit serial.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mawb(String);

/// House air waybill number (forwarder-issued reference).
///
/// Free-form but restricted to non-empty ASCII alphanumerics and dashes,
/// e.g. `HPL-GEN1042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hawb(String);

impl Mawb {
    /// Construct a validated MAWB.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidWaybill`] when the input does not match
    /// the `NNN-NNNNNNNN` layout.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        let ok = matches!(value.split_once('-'), Some((prefix, serial))
            if prefix.len() == 3
                && serial.len() == 8
                && prefix.bytes().all(|b| b.is_ascii_digit())
                && serial.bytes().all(|b| b.is_ascii_digit()));
        if !ok {
            return Err(CoreError::InvalidWaybill {
                kind: "MAWB",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Access the waybill number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Hawb {
    /// Construct a validated HAWB.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidWaybill`] when the input is empty or
    /// contains characters outside ASCII alphanumerics and dashes.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        let ok = !value.is_empty()
            && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
        if !ok {
            return Err(CoreError::InvalidWaybill {
                kind: "HAWB",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Access the waybill number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Mawb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for Hawb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
