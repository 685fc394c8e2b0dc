//! Structured errors for the customer aggregate and its vehicles.

use bayline_core::DomainError;

pub fn customer_id_required() -> DomainError {
    DomainError::validation("customer.id_required", "customer id is required")
}

pub fn name_required() -> DomainError {
    DomainError::validation("customer.name_required", "customer name is required")
}

pub fn phone_invalid() -> DomainError {
    DomainError::validation(
        "customer.phone_invalid",
        "phone number must be between 7 and 15 characters",
    )
}

pub fn email_required() -> DomainError {
    DomainError::validation("customer.email_required", "email is required")
}

pub fn email_invalid() -> DomainError {
    DomainError::validation("customer.email_invalid", "email format is invalid")
}

pub fn vehicle_id_required() -> DomainError {
    DomainError::validation("vehicle.id_required", "vehicle id is required")
}

pub fn make_required() -> DomainError {
    DomainError::validation("vehicle.make_required", "vehicle make is required")
}

pub fn model_required() -> DomainError {
    DomainError::validation("vehicle.model_required", "vehicle model is required")
}

pub fn year_out_of_range(year: i32) -> DomainError {
    DomainError::validation(
        "vehicle.year_out_of_range",
        format!("vehicle year {year} is out of range"),
    )
}

pub fn license_plate_required() -> DomainError {
    DomainError::validation(
        "vehicle.license_plate_required",
        "vehicle license plate is required",
    )
}
