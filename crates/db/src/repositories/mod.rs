//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod contact_repo;
pub mod image_repo;
pub mod user_repo;
pub mod vehicle_repo;
pub mod vehicle_sale_repo;
pub mod video_repo;

pub use contact_repo::ContactRepo;
pub use image_repo::ImageRepo;
pub use user_repo::UserRepo;
pub use vehicle_repo::VehicleRepo;
pub use vehicle_sale_repo::VehicleSaleRepo;
pub use video_repo::VideoRepo;
