//! Contact inquiry model and DTOs.

use nextcar_core::inquiry::InquirerRef;
use nextcar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// DTO for creating a contact inquiry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

impl CreateContact {
    /// Borrow the personal details for validation.
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
}
