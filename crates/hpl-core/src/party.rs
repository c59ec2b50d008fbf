//! # Party and Communication Types
//!
//! The people attached to a shipment and the messages they exchange.
//! Both are inert data from the lifecycle engine's perspective: messages
//! are consumed by the chat-summarization collaborator for display, and
//! parties are rendered in the shipment detail view.

use serde::{Deserialize, Serialize};

use crate::temporal::Timestamp;

/// The role a party plays on a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyRole {
    /// The buyer receiving the cargo.
    Customer,
    /// The grower supplying the cargo.
    Farmer,
    /// The customs or freight agent.
    Agent,
    /// The ground transport driver.
    Driver,
}

impl std::fmt::Display for PartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Customer => "CUSTOMER",
            Self::Farmer => "FARMER",
            Self::Agent => "AGENT",
            Self::Driver => "DRIVER",
        };
        f.write_str(s)
    }
}

/// A named party attached to a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Display name.
    pub name: String,
    /// Role on this shipment.
    pub role: PartyRole,
}

/// One message in a shipment's communication log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent the message.
    pub sender: Party,
    /// Message body.
    pub text: String,
    /// When the message was sent (UTC).
    pub timestamp: Timestamp,
}
