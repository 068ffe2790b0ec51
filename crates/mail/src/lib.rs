//! Outbound email for the NextCar backend.
//!
//! Only transactional mail is sent today: password-reset links.

pub mod email;
pub mod templates;

pub use email::{EmailConfig, EmailDelivery, EmailError};
