//! Vehicle entity model and DTOs.
//!
//! The technical sheet is split into [`VehicleSpecs`] (free-text and numeric
//! details, all nullable) and the equipment checklist. The checklist is
//! [`VehicleEquipment`] on rows and [`EquipmentPatch`] on input, where an
//! omitted flag means "leave as is" (or `false` on create).

use nextcar_core::types::{DbId, Timestamp};
use nextcar_core::vehicle::VehicleFieldsRef;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::image::VehicleImage;
use crate::models::video::VehicleVideo;

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: DbId,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub kind: String,
    pub year: i32,
    pub price: Decimal,
    pub description: String,
    pub featured: bool,
    pub mileage: Option<String>,
    pub notes: Option<String>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub specs: VehicleSpecs,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub equipment: VehicleEquipment,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Nullable technical details. Used as-is on rows, creates, and patches.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct VehicleSpecs {
    pub fuel: Option<String>,
    pub displacement: Option<String>,
    pub power: Option<String>,
    pub fuel_system: Option<String>,
    pub cylinders: Option<i32>,
    pub valves: Option<i32>,
    pub drivetrain: Option<String>,
    pub transmission: Option<String>,
    pub gears: Option<String>,
    pub tires: Option<String>,
    pub front_brakes: Option<String>,
    pub rear_brakes: Option<String>,
    pub power_steering_type: Option<String>,
    pub rear_seats: Option<String>,
    pub upholstery: Option<String>,
    pub door_locking: Option<String>,
    pub front_windows: Option<String>,
    pub rear_windows: Option<String>,
    pub exterior_mirrors: Option<String>,
    pub curtain_airbags: Option<String>,
    pub side_airbags: Option<String>,
    pub airbag_count: Option<i32>,
    pub sound_system: Option<String>,
}

/// Equipment checklist as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct VehicleEquipment {
    pub power_steering: bool,
    pub air_conditioning: bool,
    pub adjustable_front_seat: bool,
    pub adjustable_steering_wheel: bool,
    pub fog_lights: bool,
    pub trip_computer: bool,
    pub alloy_wheels: bool,
    pub parking_camera: bool,
    pub hill_start_assist: bool,
    pub fuel_economy_control: bool,
    pub daytime_running_lights: bool,
    pub abs: bool,
    pub electronic_brake_distribution: bool,
    pub emergency_brake_assist: bool,
    pub front_airbags: bool,
    pub driver_knee_airbag: bool,
    pub alarm: bool,
    pub engine_immobilizer: bool,
    pub child_seat_anchors: bool,
    pub auto_door_lock: bool,
    pub stability_control: bool,
    pub traction_control: bool,
    pub steering_wheel_controls: bool,
    pub aux_input: bool,
    pub usb_port: bool,
    pub bluetooth: bool,
    pub voice_control: bool,
    pub display_screen: bool,
    pub gps_navigation: bool,
    pub apple_carplay: bool,
    pub mirrorlink: bool,
}

/// Equipment checklist on input. `None` leaves the stored flag untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EquipmentPatch {
    pub power_steering: Option<bool>,
    pub air_conditioning: Option<bool>,
    pub adjustable_front_seat: Option<bool>,
    pub adjustable_steering_wheel: Option<bool>,
    pub fog_lights: Option<bool>,
    pub trip_computer: Option<bool>,
    pub alloy_wheels: Option<bool>,
    pub parking_camera: Option<bool>,
    pub hill_start_assist: Option<bool>,
    pub fuel_economy_control: Option<bool>,
    pub daytime_running_lights: Option<bool>,
    pub abs: Option<bool>,
    pub electronic_brake_distribution: Option<bool>,
    pub emergency_brake_assist: Option<bool>,
    pub front_airbags: Option<bool>,
    pub driver_knee_airbag: Option<bool>,
    pub alarm: Option<bool>,
    pub engine_immobilizer: Option<bool>,
    pub child_seat_anchors: Option<bool>,
    pub auto_door_lock: Option<bool>,
    pub stability_control: Option<bool>,
    pub traction_control: Option<bool>,
    pub steering_wheel_controls: Option<bool>,
    pub aux_input: Option<bool>,
    pub usb_port: Option<bool>,
    pub bluetooth: Option<bool>,
    pub voice_control: Option<bool>,
    pub display_screen: Option<bool>,
    pub gps_navigation: Option<bool>,
    pub apple_carplay: Option<bool>,
    pub mirrorlink: Option<bool>,
}

/// DTO for creating a vehicle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicle {
    pub name: String,
    pub brand: String,
    pub model: String,
    /// Defaults to `"auto"` if omitted.
    pub kind: Option<String>,
    pub year: i32,
    pub price: Decimal,
    pub description: String,
    /// Defaults to `false` if omitted.
    pub featured: Option<bool>,
    pub mileage: Option<String>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub specs: VehicleSpecs,
    #[serde(flatten)]
    pub equipment: EquipmentPatch,
}

impl CreateVehicle {
    /// Borrow the headline fields for validation.
    pub fn fields(&self) -> VehicleFieldsRef<'_> {
        VehicleFieldsRef {
            name: Some(&self.name),
            brand: Some(&self.brand),
            model: Some(&self.model),
            kind: self.kind.as_deref(),
            year: Some(self.year),
            price: Some(self.price),
            description: Some(&self.description),
            mileage: self.mileage.as_deref(),
        }
    }
}

/// DTO for updating a vehicle. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVehicle {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub kind: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub featured: Option<bool>,
    pub mileage: Option<String>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub specs: VehicleSpecs,
    #[serde(flatten)]
    pub equipment: EquipmentPatch,
}

impl UpdateVehicle {
    /// Borrow whichever headline fields are being changed.
    pub fn fields(&self) -> VehicleFieldsRef<'_> {
        VehicleFieldsRef {
            name: self.name.as_deref(),
            brand: self.brand.as_deref(),
            model: self.model.as_deref(),
            kind: self.kind.as_deref(),
            year: self.year,
            price: self.price,
            description: self.description.as_deref(),
            mileage: self.mileage.as_deref(),
        }
    }
}

/// Request body for `PATCH /dashboard/vehicles/{id}/highlight`.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightVehicle {
    pub featured: bool,
}

/// Catalog card: headline fields plus the cover image URL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleSummary {
    pub id: DbId,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub kind: String,
    pub year: i32,
    pub price: Decimal,
    pub description: String,
    pub featured: bool,
    pub displacement: Option<String>,
    pub mileage: Option<String>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub drivetrain: Option<String>,
    /// Principal image, else the first image by display order.
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A vehicle together with its ordered images and videos.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleDetail {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub images: Vec<VehicleImage>,
    pub videos: Vec<VehicleVideo>,
}

/// Distinct values offered as catalog filters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub kinds: Vec<String>,
    pub fuels: Vec<String>,
    pub transmissions: Vec<String>,
    pub drivetrains: Vec<String>,
    pub years: Vec<i32>,
}
