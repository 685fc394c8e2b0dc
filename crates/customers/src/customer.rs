use serde::{Deserialize, Serialize};

use bayline_core::{AggregateId, AggregateRoot, DomainErrors, DomainResult, Updated};

use crate::errors;
use crate::vehicle::Vehicle;

/// Customer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub AggregateId);

impl CustomerId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Customer.
///
/// Owns a mutable collection of [`Vehicle`]s. Contact details are validated at
/// creation and on every update; the vehicle list changes only through
/// [`Customer::upsert_vehicles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    phone_number: String,
    email: String,
    vehicles: Vec<Vehicle>,
}

impl Customer {
    /// Validate and create a customer; collects every field violation.
    pub fn create(
        id: CustomerId,
        name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
        vehicles: Vec<Vehicle>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let phone_number = phone_number.into();
        let email = email.into();

        let mut violations = Vec::new();
        if id.0.is_nil() {
            violations.push(errors::customer_id_required());
        }
        collect_contact_violations(&name, &email, &phone_number, &mut violations);

        if let Some(errors) = DomainErrors::from_vec(violations) {
            return Err(errors);
        }

        Ok(Self {
            id,
            name,
            phone_number,
            email,
            vehicles,
        })
    }

    /// Replace the customer's contact details, re-validating all of them.
    ///
    /// The aggregate is left unchanged when any field is invalid.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> DomainResult<Updated> {
        let name = name.into();
        let email = email.into();
        let phone_number = phone_number.into();

        let mut violations = Vec::new();
        collect_contact_violations(&name, &email, &phone_number, &mut violations);
        if let Some(errors) = DomainErrors::from_vec(violations) {
            return Err(errors);
        }

        self.name = name;
        self.email = email;
        self.phone_number = phone_number;
        Ok(Updated)
    }

    /// Reconcile the vehicle list against `incoming`, keyed by vehicle id:
    ///
    /// - present in both: the existing entry is overwritten with the incoming
    ///   one (full replacement, not a field merge);
    /// - only incoming: added;
    /// - only existing: removed.
    ///
    /// Incoming vehicles have already passed their own construction
    /// validation, so reconciliation itself cannot fail; the whole operation
    /// is atomic within the caller's transaction boundary.
    pub fn upsert_vehicles(&mut self, incoming: Vec<Vehicle>) -> DomainResult<Updated> {
        let mut next: Vec<Vehicle> = Vec::with_capacity(incoming.len());

        // Surviving vehicles keep their position, with fields overwritten.
        for existing in &self.vehicles {
            if let Some(replacement) = incoming
                .iter()
                .find(|v| v.id_typed() == existing.id_typed())
            {
                next.push(replacement.clone());
            }
        }

        for vehicle in incoming {
            let known = next.iter().any(|v| v.id_typed() == vehicle.id_typed());
            if !known {
                next.push(vehicle);
            }
        }

        self.vehicles = next;
        Ok(Updated)
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn collect_contact_violations(
    name: &str,
    email: &str,
    phone_number: &str,
    violations: &mut Vec<bayline_core::DomainError>,
) {
    if name.trim().is_empty() {
        violations.push(errors::name_required());
    }

    // Length in characters: multibyte digits count once.
    let phone_chars = phone_number.trim().chars().count();
    if !(7..=15).contains(&phone_chars) {
        violations.push(errors::phone_invalid());
    }

    if email.trim().is_empty() {
        violations.push(errors::email_required());
    } else if !is_valid_email(email) {
        violations.push(errors::email_invalid());
    }
}

/// Permissive email shape check: one `@`, non-empty local and domain parts,
/// no whitespace. Intentionally accepts bare hostnames (`user@localhost`).
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.contains('@')
}
