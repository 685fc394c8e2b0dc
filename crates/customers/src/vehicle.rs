use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use bayline_core::{AggregateId, DomainErrors, DomainResult, Entity};

use crate::errors;

/// First year a production automobile existed; nothing older rolls into a bay.
const MIN_MODEL_YEAR: i32 = 1886;

/// Vehicle identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub AggregateId);

impl VehicleId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A customer's vehicle.
///
/// Owned by [`crate::Customer`]; constructed through the validating factory
/// and replaced wholesale during vehicle reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    id: VehicleId,
    make: String,
    model: String,
    year: i32,
    license_plate: String,
}

impl Vehicle {
    /// Validate and create a vehicle; collects every field violation.
    pub fn create(
        id: VehicleId,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        license_plate: impl Into<String>,
    ) -> DomainResult<Self> {
        let make = make.into();
        let model = model.into();
        let license_plate = license_plate.into();

        let mut violations = Vec::new();

        if id.0.is_nil() {
            violations.push(errors::vehicle_id_required());
        }
        if make.trim().is_empty() {
            violations.push(errors::make_required());
        }
        if model.trim().is_empty() {
            violations.push(errors::model_required());
        }
        // Next year's models ship early, anything beyond that is a typo.
        if year < MIN_MODEL_YEAR || year > Utc::now().year() + 1 {
            violations.push(errors::year_out_of_range(year));
        }
        if license_plate.trim().is_empty() {
            violations.push(errors::license_plate_required());
        }

        if let Some(errors) = DomainErrors::from_vec(violations) {
            return Err(errors);
        }

        Ok(Self {
            id,
            make,
            model,
            year,
            license_plate,
        })
    }

    pub fn id_typed(&self) -> VehicleId {
        self.id
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }
}

impl Entity for Vehicle {
    type Id = VehicleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
