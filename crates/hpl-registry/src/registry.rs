//! # Shipment Registry
//!
//! The owning collection. Shipments are stored newest-first (matching
//! how operators scan the list view) and addressed by identity for
//! mutations. Collection sizes are operational, not archival — linear
//! scans are deliberate.

use std::sync::RwLock;

use thiserror::Error;

use hpl_core::{DocumentId, Message, ShipmentId};
use hpl_lifecycle::{
    LifecycleError, MilestoneStage, MilestoneStatus, NewShipment, Shipment, ShipmentStatus,
};

/// Errors raised by registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No shipment with the given identity exists in the collection.
    #[error("unknown shipment: {id}")]
    UnknownShipment {
        /// The identity that failed to resolve.
        id: ShipmentId,
    },

    /// The lifecycle engine rejected the routed operation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Filter for [`ShipmentRegistry::list`].
///
/// `status` narrows to one overall status; `query` is a case-insensitive
/// substring match over identity, waybill numbers, customer, and the
/// origin/destination cities. Both default to "match everything".
#[derive(Debug, Clone, Default)]
pub struct ShipmentFilter {
    /// Keep only shipments with this overall status.
    pub status: Option<ShipmentStatus>,
    /// Free-text search term.
    pub query: Option<String>,
}

impl ShipmentFilter {
    /// Whether a shipment passes this filter.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        if let Some(status) = self.status {
            if shipment.status() != status {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                [
                    shipment.id.to_string(),
                    shipment.mawb.as_str().to_string(),
                    shipment.hawb.as_str().to_string(),
                    shipment.customer.clone(),
                    shipment.origin.city.clone(),
                    shipment.destination.city.clone(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
            }
        }
    }
}

/// The in-memory shipment collection.
///
/// All mutations go through the lifecycle engine under the write lock;
/// reads hand out clones. `Send + Sync` — share behind an `Arc` for
/// concurrent readers.
#[derive(Debug, Default)]
pub struct ShipmentRegistry {
    shipments: RwLock<Vec<Shipment>>,
}

impl ShipmentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shipment and insert it at the front of the collection.
    ///
    /// Returns a clone of the newly created shipment (first milestone
    /// completed, derived status `PENDING`).
    pub fn create(&self, details: NewShipment) -> Shipment {
        let shipment = Shipment::new(details);
        tracing::info!(shipment = %shipment.id, "shipment registered");
        self.write().insert(0, shipment.clone());
        shipment
    }

    /// Look up a shipment by identity.
    pub fn get(&self, id: &ShipmentId) -> Option<Shipment> {
        self.read().iter().find(|s| &s.id == id).cloned()
    }

    /// Number of shipments in the collection.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Shipments passing the filter, newest first.
    pub fn list(&self, filter: &ShipmentFilter) -> Vec<Shipment> {
        self.read()
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect()
    }

    /// Route a milestone transition to a shipment; returns the updated
    /// shipment on success.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownShipment`] for an unknown identity, or the
    /// lifecycle engine's rejection.
    pub fn apply_transition(
        &self,
        id: &ShipmentId,
        index: usize,
        target: MilestoneStatus,
        details: Option<String>,
    ) -> Result<Shipment, RegistryError> {
        self.mutate(id, |shipment| {
            shipment.apply_transition(index, target, details)
        })
    }

    /// Cancel a shipment; returns the updated shipment on success.
    pub fn cancel(&self, id: &ShipmentId) -> Result<Shipment, RegistryError> {
        self.mutate(id, Shipment::cancel)
    }

    /// Drive a shipment's next actionable milestone one legal step.
    ///
    /// Returns the stage that moved, or `None` when the shipment is
    /// terminal or nothing is actionable.
    pub fn advance(&self, id: &ShipmentId) -> Result<Option<MilestoneStage>, RegistryError> {
        let mut guard = self.write();
        let shipment = Self::find_mut(&mut guard, id)?;
        Ok(shipment.advance()?)
    }

    /// Attach a document reference to a milestone.
    pub fn attach_milestone_document(
        &self,
        id: &ShipmentId,
        index: usize,
        document: DocumentId,
    ) -> Result<Shipment, RegistryError> {
        self.mutate(id, |shipment| {
            shipment.attach_milestone_document(index, document)
        })
    }

    /// Attach a shipment-level document reference.
    pub fn attach_document(
        &self,
        id: &ShipmentId,
        document: DocumentId,
    ) -> Result<Shipment, RegistryError> {
        let mut guard = self.write();
        let shipment = Self::find_mut(&mut guard, id)?;
        shipment.documents.push(document);
        Ok(shipment.clone())
    }

    /// Append a message to a shipment's communication log.
    pub fn add_message(
        &self,
        id: &ShipmentId,
        message: Message,
    ) -> Result<Shipment, RegistryError> {
        let mut guard = self.write();
        let shipment = Self::find_mut(&mut guard, id)?;
        shipment.messages.push(message);
        Ok(shipment.clone())
    }

    // ── Internals ────────────────────────────────────────────────────

    fn mutate(
        &self,
        id: &ShipmentId,
        op: impl FnOnce(&mut Shipment) -> Result<(), LifecycleError>,
    ) -> Result<Shipment, RegistryError> {
        let mut guard = self.write();
        let shipment = Self::find_mut(&mut guard, id)?;
        op(shipment)?;
        Ok(shipment.clone())
    }

    fn find_mut<'a>(
        shipments: &'a mut [Shipment],
        id: &ShipmentId,
    ) -> Result<&'a mut Shipment, RegistryError> {
        shipments
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| RegistryError::UnknownShipment { id: id.clone() })
    }

    // Lock poisoning only means another thread panicked while holding the
    // guard; engine mutations are validate-then-apply, so the data is
    // still internally consistent and the inner value can be recovered.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Shipment>> {
        self.shipments
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Shipment>> {
        self.shipments
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use hpl_core::{Hawb, Location, Mawb, Party, PartyRole, ShipmentCost, Timestamp};

    fn order(customer: &str, origin_city: &str, mawb: &str) -> NewShipment {
        NewShipment {
            mawb: Mawb::new(mawb).unwrap(),
            hawb: Hawb::new("HPL-GEN1042").unwrap(),
            customer: customer.to_string(),
            origin: Location {
                country: "Colombia".to_string(),
                city: origin_city.to_string(),
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
            parties: vec![Party {
                name: "Maria Garcia".to_string(),
                role: PartyRole::Agent,
            }],
            documents: Vec::new(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let registry = ShipmentRegistry::new();
        let created = registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));
        assert_eq!(created.status(), ShipmentStatus::Pending);

        let fetched = registry.get(&created.id).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.status(), ShipmentStatus::Pending);
    }

    #[test]
    fn test_get_unknown_is_none() {
        let registry = ShipmentRegistry::new();
        assert!(registry.get(&ShipmentId::new()).is_none());
    }

    #[test]
    fn test_newest_first_ordering() {
        let registry = ShipmentRegistry::new();
        let first = registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));
        let second = registry.create(order("Tulip Trade BV", "Quito", "729-55001234"));
        let all = registry.list(&ShipmentFilter::default());
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[test]
    fn test_routed_transition_updates_status() {
        let registry = ShipmentRegistry::new();
        let s = registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));
        let updated = registry
            .apply_transition(&s.id, 1, MilestoneStatus::InProgress, None)
            .unwrap();
        assert_eq!(updated.status(), ShipmentStatus::InTransit);
        // The stored copy moved too.
        assert_eq!(
            registry.get(&s.id).unwrap().status(),
            ShipmentStatus::InTransit
        );
    }

    #[test]
    fn test_routed_rejection_leaves_state() {
        let registry = ShipmentRegistry::new();
        let s = registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));
        let err = registry
            .apply_transition(&s.id, 1, MilestoneStatus::Completed, None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::Lifecycle(_)));
        assert_eq!(registry.get(&s.id).unwrap().status(), ShipmentStatus::Pending);
    }

    #[test]
    fn test_unknown_shipment_error() {
        let registry = ShipmentRegistry::new();
        let err = registry
            .apply_transition(&ShipmentId::new(), 1, MilestoneStatus::InProgress, None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownShipment { .. }));
    }

    #[test]
    fn test_cancel_and_advance_routing() {
        let registry = ShipmentRegistry::new();
        let s = registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));

        let moved = registry.advance(&s.id).unwrap();
        assert_eq!(moved, Some(MilestoneStage::CargoReceivedOrigin));

        let cancelled = registry.cancel(&s.id).unwrap();
        assert_eq!(cancelled.status(), ShipmentStatus::Cancelled);
        assert_eq!(registry.advance(&s.id).unwrap(), None);
    }

    // ── Filtering and search ─────────────────────────────────────────

    #[test]
    fn test_filter_by_status() {
        let registry = ShipmentRegistry::new();
        let a = registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));
        let _b = registry.create(order("Tulip Trade BV", "Quito", "729-55001234"));
        registry
            .apply_transition(&a.id, 1, MilestoneStatus::InProgress, None)
            .unwrap();

        let in_transit = registry.list(&ShipmentFilter {
            status: Some(ShipmentStatus::InTransit),
            query: None,
        });
        assert_eq!(in_transit.len(), 1);
        assert_eq!(in_transit[0].id, a.id);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let registry = ShipmentRegistry::new();
        registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));
        registry.create(order("Tulip Trade BV", "Quito", "729-55001234"));

        let hits = registry.list(&ShipmentFilter {
            status: None,
            query: Some("bloom".to_string()),
        });
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer, "Bloom & Co");
    }

    #[test]
    fn test_search_matches_waybill_and_city() {
        let registry = ShipmentRegistry::new();
        registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));
        registry.create(order("Tulip Trade BV", "Quito", "729-55001234"));

        let by_mawb = registry.list(&ShipmentFilter {
            status: None,
            query: Some("729-55".to_string()),
        });
        assert_eq!(by_mawb.len(), 1);

        let by_city = registry.list(&ShipmentFilter {
            status: None,
            query: Some("quito".to_string()),
        });
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].origin.city, "Quito");
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let registry = ShipmentRegistry::new();
        registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));
        let hits = registry.list(&ShipmentFilter {
            status: None,
            query: Some("   ".to_string()),
        });
        assert_eq!(hits.len(), 1);
    }

    // ── Messages and documents ───────────────────────────────────────

    #[test]
    fn test_add_message_and_documents() {
        let registry = ShipmentRegistry::new();
        let s = registry.create(order("Bloom & Co", "Bogotá", "145-20881194"));

        let updated = registry
            .add_message(
                &s.id,
                Message {
                    sender: Party {
                        name: "Maria Garcia".to_string(),
                        role: PartyRole::Agent,
                    },
                    text: "Customs paperwork filed.".to_string(),
                    timestamp: Timestamp::parse("2026-03-02T09:00:00Z").unwrap(),
                },
            )
            .unwrap();
        assert_eq!(updated.messages.len(), 1);

        let doc = DocumentId::new();
        let updated = registry.attach_document(&s.id, doc.clone()).unwrap();
        assert_eq!(updated.documents, vec![doc]);

        let doc = DocumentId::new();
        let updated = registry
            .attach_milestone_document(&s.id, 3, doc.clone())
            .unwrap();
        assert_eq!(updated.milestones()[3].documents, vec![doc]);
    }

    // ── Shared across threads ────────────────────────────────────────

    #[test]
    fn test_concurrent_writers_serialize() {
        let registry = Arc::new(ShipmentRegistry::new());
        let ids: Vec<ShipmentId> = (0..4)
            .map(|_| {
                registry
                    .create(order("Bloom & Co", "Bogotá", "145-20881194"))
                    .id
            })
            .collect();

        let handles: Vec<_> = ids
            .iter()
            .cloned()
            .map(|id| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    // Walk the shipment all the way to delivery.
                    while registry.advance(&id).unwrap().is_some() {}
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for id in &ids {
            assert_eq!(
                registry.get(id).unwrap().status(),
                ShipmentStatus::Delivered
            );
        }
    }
}
