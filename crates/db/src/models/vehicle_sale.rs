//! Vehicle-sale request model and DTOs.
//!
//! A vehicle sale is a customer offering their own vehicle to the
//! dealership; staff mark it processed once handled.

use nextcar_core::inquiry::{InquirerRef, OfferedVehicleRef};
use nextcar_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `vehicle_sales` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleSale {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_mileage: Option<String>,
    pub vehicle_fuel: Option<String>,
    pub vehicle_transmission: Option<String>,
    pub vehicle_description: Option<String>,
    pub expected_price: Option<Decimal>,
    pub processed: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a vehicle-sale request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicleSale {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_mileage: Option<String>,
    pub vehicle_fuel: Option<String>,
    pub vehicle_transmission: Option<String>,
    pub vehicle_description: Option<String>,
    pub expected_price: Option<Decimal>,
}

impl CreateVehicleSale {
    pub fn inquirer(&self) -> InquirerRef<'_> {
        InquirerRef {
            first_name: &self.first_name,
            last_name: &self.last_name,
            city: &self.city,
            province: &self.province,
            phone: &self.phone,
            email: &self.email,
        }
    }

    pub fn offered_vehicle(&self) -> OfferedVehicleRef<'_> {
        OfferedVehicleRef {
            brand: &self.vehicle_brand,
            model: &self.vehicle_model,
            year: self.vehicle_year,
            mileage: self.vehicle_mileage.as_deref(),
            fuel: self.vehicle_fuel.as_deref(),
            transmission: self.vehicle_transmission.as_deref(),
            description: self.vehicle_description.as_deref(),
            expected_price: self.expected_price,
        }
    }
}
