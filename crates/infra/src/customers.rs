//! Customer application service: validation, persistence, cache eviction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bayline_core::AggregateId;
use bayline_customers::{Customer, CustomerId, Vehicle, VehicleId};

use crate::cache::{CUSTOMER_TAG, TagCache};
use crate::error::AppError;
use crate::pipeline::Timed;
use crate::store::CustomerStore;

/// Incoming vehicle fields, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleData {
    /// Absent for vehicles the customer is registering for the first time.
    pub vehicle_id: Option<VehicleId>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerCommand {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub vehicles: Vec<VehicleData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCustomerCommand {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    /// Full desired vehicle list; reconciled by id against the current set.
    pub vehicles: Vec<VehicleData>,
}

/// Read-side projection of a customer, safe to cache as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerView {
    pub id: CustomerId,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub vehicles: Vec<VehicleView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id_typed(),
            name: customer.name().to_string(),
            phone_number: customer.phone_number().to_string(),
            email: customer.email().to_string(),
            vehicles: customer
                .vehicles()
                .iter()
                .map(|v| VehicleView {
                    id: v.id_typed(),
                    make: v.make().to_string(),
                    model: v.model().to_string(),
                    year: v.year(),
                    license_plate: v.license_plate().to_string(),
                })
                .collect(),
        }
    }
}

const CUSTOMERS_ALL_KEY: &str = "customers:all";

pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    cache: Arc<dyn TagCache>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>, cache: Arc<dyn TagCache>) -> Self {
        Self { store, cache }
    }

    pub fn create_customer(&self, command: CreateCustomerCommand) -> Result<CustomerId, AppError> {
        let _timed = Timed::start("create_customer");

        let vehicles = validate_vehicles(&command.vehicles)?;
        let id = CustomerId::new(AggregateId::new());
        let customer = Customer::create(
            id,
            command.name,
            command.phone_number,
            command.email,
            vehicles,
        )?;

        self.store.upsert(customer)?;
        self.cache.remove_by_tag(CUSTOMER_TAG);
        info!(customer_id = %id, "customer created");
        Ok(id)
    }

    /// Update contact details and reconcile the vehicle list, atomically from
    /// the caller's point of view: nothing is saved unless every step passes.
    pub fn update_customer(&self, command: UpdateCustomerCommand) -> Result<(), AppError> {
        let _timed = Timed::start("update_customer");

        let Some(mut customer) = self.store.get(command.customer_id)? else {
            warn!(customer_id = %command.customer_id, "customer not found for update");
            return Err(AppError::NotFound(command.customer_id.to_string()));
        };

        let vehicles = validate_vehicles(&command.vehicles)?;
        customer.update(command.name, command.email, command.phone_number)?;
        customer.upsert_vehicles(vehicles)?;

        self.store.upsert(customer)?;
        self.cache.remove_by_tag(CUSTOMER_TAG);
        info!(customer_id = %command.customer_id, "customer updated");
        Ok(())
    }

    /// Cache-aside list: serve the tagged JSON payload when present, fall
    /// back to the store and repopulate otherwise.
    pub fn get_customers(&self) -> Result<Vec<CustomerView>, AppError> {
        let _timed = Timed::start("get_customers");

        if let Some(cached) = self.cache.get(CUSTOMERS_ALL_KEY) {
            match serde_json::from_str(&cached) {
                Ok(views) => return Ok(views),
                Err(error) => {
                    warn!(%error, "discarding unreadable cached customer list");
                }
            }
        }

        let views: Vec<CustomerView> = self
            .store
            .list()?
            .iter()
            .map(CustomerView::from)
            .collect();

        if let Ok(payload) = serde_json::to_string(&views) {
            self.cache.set(CUSTOMERS_ALL_KEY, payload, &[CUSTOMER_TAG]);
        }
        Ok(views)
    }

    pub fn get_customer(&self, id: CustomerId) -> Result<CustomerView, AppError> {
        let _timed = Timed::start("get_customer");

        self.store
            .get(id)?
            .map(|c| CustomerView::from(&c))
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub fn remove_customer(&self, id: CustomerId) -> Result<(), AppError> {
        let _timed = Timed::start("remove_customer");

        if !self.store.remove(id)? {
            return Err(AppError::NotFound(id.to_string()));
        }
        self.cache.remove_by_tag(CUSTOMER_TAG);
        info!(customer_id = %id, "customer removed");
        Ok(())
    }
}

/// Validate every incoming vehicle before touching the aggregate; the first
/// invalid one fails the whole command.
fn validate_vehicles(incoming: &[VehicleData]) -> Result<Vec<Vehicle>, AppError> {
    let mut validated = Vec::with_capacity(incoming.len());
    for data in incoming {
        let id = data
            .vehicle_id
            .unwrap_or_else(|| VehicleId::new(AggregateId::new()));
        let vehicle = Vehicle::create(
            id,
            data.make.clone(),
            data.model.clone(),
            data.year,
            data.license_plate.clone(),
        )?;
        validated.push(vehicle);
    }
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryTagCache;
    use crate::store::InMemoryCustomerStore;

    fn service() -> (CustomerService, Arc<InMemoryTagCache>) {
        bayline_observability::init();
        let cache = Arc::new(InMemoryTagCache::new());
        let service = CustomerService::new(
            Arc::new(InMemoryCustomerStore::new()),
            cache.clone(),
        );
        (service, cache)
    }

    fn vehicle_data(make: &str) -> VehicleData {
        VehicleData {
            vehicle_id: None,
            make: make.to_string(),
            model: "Focus".to_string(),
            year: 2020,
            license_plate: "AB-123".to_string(),
        }
    }

    fn create_command() -> CreateCustomerCommand {
        CreateCustomerCommand {
            name: "Customer #1".to_string(),
            phone_number: "5555555555".to_string(),
            email: "customer01@localhost".to_string(),
            vehicles: vec![vehicle_data("Ford")],
        }
    }

    #[test]
    fn create_persists_and_is_readable() {
        let (service, _cache) = service();

        let id = service.create_customer(create_command()).unwrap();
        let view = service.get_customer(id).unwrap();

        assert_eq!(view.name, "Customer #1");
        assert_eq!(view.vehicles.len(), 1);
    }

    #[test]
    fn create_surfaces_domain_violations() {
        let (service, _cache) = service();
        let mut command = create_command();
        command.email = "abc".to_string();

        let err = service.create_customer(command).unwrap_err();
        assert_eq!(err.domain_code(), Some("customer.email_invalid"));
    }

    #[test]
    fn create_rejects_invalid_incoming_vehicle_before_saving() {
        let (service, _cache) = service();
        let mut command = create_command();
        command.vehicles.push(vehicle_data(""));

        let err = service.create_customer(command).unwrap_err();
        assert_eq!(err.domain_code(), Some("vehicle.make_required"));
        assert!(service.get_customers().unwrap().is_empty());
    }

    #[test]
    fn update_reconciles_vehicles_and_evicts_cache() {
        let (service, cache) = service();
        let id = service.create_customer(create_command()).unwrap();

        // Warm the cache.
        service.get_customers().unwrap();
        assert!(cache.get("customers:all").is_some());

        let existing = service.get_customer(id).unwrap().vehicles[0].id;
        service
            .update_customer(UpdateCustomerCommand {
                customer_id: id,
                name: "Updated Name".to_string(),
                email: "updated@email.com".to_string(),
                phone_number: "1234567890".to_string(),
                vehicles: vec![
                    VehicleData {
                        vehicle_id: Some(existing),
                        make: "UpdatedFord".to_string(),
                        model: "Focus".to_string(),
                        year: 2020,
                        license_plate: "AB-123".to_string(),
                    },
                    vehicle_data("NewBrand"),
                ],
            })
            .unwrap();

        assert!(cache.get("customers:all").is_none());

        let view = service.get_customer(id).unwrap();
        assert_eq!(view.name, "Updated Name");
        assert_eq!(view.vehicles.len(), 2);
        assert!(view
            .vehicles
            .iter()
            .any(|v| v.id == existing && v.make == "UpdatedFord"));
    }

    #[test]
    fn update_unknown_customer_is_not_found() {
        let (service, _cache) = service();

        let err = service
            .update_customer(UpdateCustomerCommand {
                customer_id: CustomerId::new(AggregateId::new()),
                name: "X Y".to_string(),
                email: "x@localhost".to_string(),
                phone_number: "5555555555".to_string(),
                vehicles: vec![],
            })
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn get_customers_serves_from_cache_until_evicted() {
        let (service, cache) = service();
        service.create_customer(create_command()).unwrap();

        let first = service.get_customers().unwrap();
        assert_eq!(first.len(), 1);

        // Poke a marker into the cached payload to prove the next read hits it.
        let mut cached: Vec<CustomerView> =
            serde_json::from_str(&cache.get("customers:all").unwrap()).unwrap();
        cached[0].name = "from-cache".to_string();
        cache.set(
            "customers:all",
            serde_json::to_string(&cached).unwrap(),
            &["customer"],
        );

        assert_eq!(service.get_customers().unwrap()[0].name, "from-cache");
    }

    #[test]
    fn remove_customer_evicts_and_forgets() {
        let (service, cache) = service();
        let id = service.create_customer(create_command()).unwrap();
        service.get_customers().unwrap();

        service.remove_customer(id).unwrap();

        assert!(cache.get("customers:all").is_none());
        assert!(matches!(
            service.get_customer(id),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.remove_customer(id),
            Err(AppError::NotFound(_))
        ));
    }
}
