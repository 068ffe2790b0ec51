//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is editable

pub mod contact;
pub mod dashboard;
pub mod image;
pub mod user;
pub mod vehicle;
pub mod vehicle_sale;
pub mod video;
