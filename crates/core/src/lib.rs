//! Domain logic for the NextCar dealership backend.
//!
//! Everything here is free of database and HTTP dependencies: error types,
//! listing query parameters and page math, field validation, and the media
//! storage seam.

pub mod auth;
pub mod error;
pub mod inquiry;
pub mod media;
pub mod roles;
pub mod types;
pub mod validation;
pub mod vehicle;
