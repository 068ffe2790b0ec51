//! Validation for customer inquiries: contact messages and vehicle-sale
//! (trade-in) requests submitted from the public site.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::validation::{
    validate_email, validate_optional_text, validate_phone, validate_required_text,
};
use crate::vehicle::validate_year;

const MAX_NAME_LENGTH: usize = 100;
const MAX_PLACE_LENGTH: usize = 100;
const MAX_MESSAGE_LENGTH: usize = 5_000;
const MAX_VEHICLE_TEXT_LENGTH: usize = 100;

/// Largest value that fits the `expected_price NUMERIC(10,2)` column.
const MAX_EXPECTED_PRICE: i64 = 100_000_000;

/// The person behind an inquiry.
#[derive(Debug, Clone, Copy)]
pub struct InquirerRef<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub city: &'a str,
    pub province: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
}

/// Validate the personal details shared by contacts and sale requests.
pub fn validate_inquirer(person: &InquirerRef<'_>) -> Result<(), CoreError> {
    validate_required_text("first_name", person.first_name, MAX_NAME_LENGTH)?;
    validate_required_text("last_name", person.last_name, MAX_NAME_LENGTH)?;
    validate_required_text("city", person.city, MAX_PLACE_LENGTH)?;
    validate_required_text("province", person.province, MAX_PLACE_LENGTH)?;
    validate_phone(person.phone)?;
    validate_email(person.email)
}

/// Validate a contact inquiry. The message is required.
pub fn validate_contact(person: &InquirerRef<'_>, message: &str) -> Result<(), CoreError> {
    validate_inquirer(person)?;
    validate_required_text("message", message, MAX_MESSAGE_LENGTH)
}

/// The vehicle a customer offers to sell.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfferedVehicleRef<'a> {
    pub brand: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub mileage: Option<&'a str>,
    pub fuel: Option<&'a str>,
    pub transmission: Option<&'a str>,
    pub description: Option<&'a str>,
    pub expected_price: Option<Decimal>,
}

/// Validate a vehicle-sale request. The message is optional.
pub fn validate_sale_request(
    person: &InquirerRef<'_>,
    message: Option<&str>,
    vehicle: &OfferedVehicleRef<'_>,
) -> Result<(), CoreError> {
    validate_inquirer(person)?;
    validate_optional_text("message", message, MAX_MESSAGE_LENGTH)?;

    validate_required_text("vehicle_brand", vehicle.brand, MAX_VEHICLE_TEXT_LENGTH)?;
    validate_required_text("vehicle_model", vehicle.model, MAX_VEHICLE_TEXT_LENGTH)?;
    validate_year(vehicle.year)?;
    validate_optional_text("vehicle_mileage", vehicle.mileage, MAX_VEHICLE_TEXT_LENGTH)?;
    validate_optional_text("vehicle_fuel", vehicle.fuel, MAX_VEHICLE_TEXT_LENGTH)?;
    validate_optional_text(
        "vehicle_transmission",
        vehicle.transmission,
        MAX_VEHICLE_TEXT_LENGTH,
    )?;
    validate_optional_text("vehicle_description", vehicle.description, MAX_MESSAGE_LENGTH)?;

    if let Some(price) = vehicle.expected_price {
        if price.is_sign_negative() {
            return Err(CoreError::Validation(
                "expected_price must not be negative".into(),
            ));
        }
        if price >= Decimal::from(MAX_EXPECTED_PRICE) {
            return Err(CoreError::Validation("expected_price is too large".into()));
        }
    }
    Ok(())
}
