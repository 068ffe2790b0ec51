//! Vehicle listing query parameters, pagination math, and field validation.
//!
//! The HTTP layer deserializes a flat [`VehicleListQuery`] from the query
//! string and splits it into validated [`VehicleFilters`], [`VehicleSort`],
//! and [`PageRequest`] values that the repository turns into SQL.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{non_blank, validate_optional_text, validate_required_text};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default page number.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for catalog listings.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Default page size for the featured carousel.
pub const DEFAULT_FEATURED_PAGE_SIZE: i64 = 6;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Oldest model year accepted in filters and listings.
pub const MIN_YEAR: i32 = 1900;

/// Newest model year accepted in filters and listings.
pub const MAX_YEAR: i32 = 2030;

/// Kind assigned to vehicles created without one.
pub const DEFAULT_KIND: &str = "auto";

/// Number of buckets returned by the brand and year statistics.
pub const STATS_BUCKETS: i64 = 10;

const MAX_NAME_LENGTH: usize = 200;
const MAX_SHORT_TEXT_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Brand,
    Price,
    Year,
    #[default]
    #[serde(alias = "createdAt")]
    CreatedAt,
}

impl SortField {
    /// The `vehicles` column this field orders by.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Brand => "brand",
            SortField::Price => "price",
            SortField::Year => "year",
            SortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VehicleSort {
    pub sort_by: SortField,
    pub sort_order: SortDirection,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Build a page request, applying defaults and rejecting out-of-range values.
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Result<Self, CoreError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(default_limit);

        if page < 1 {
            return Err(CoreError::Validation("page must be at least 1".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, limit })
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Pagination metadata for a result set of `total` rows.
    pub fn meta(&self, total: i64) -> PageMeta {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        };
        PageMeta {
            page: self.page,
            limit: self.limit,
            total,
            total_pages,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
        }
    }
}

/// Pagination block included in every paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Predicates applied to a vehicle listing. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivetrain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl VehicleFilters {
    /// Check range bounds. Both bounds of a range are inclusive.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(min) = self.year_min {
            if min < MIN_YEAR {
                return Err(CoreError::Validation(format!(
                    "year_min must be at least {MIN_YEAR}"
                )));
            }
        }
        if let Some(max) = self.year_max {
            if max > MAX_YEAR {
                return Err(CoreError::Validation(format!(
                    "year_max must be at most {MAX_YEAR}"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.year_min, self.year_max) {
            if min > max {
                return Err(CoreError::Validation(
                    "year_min must not exceed year_max".into(),
                ));
            }
        }
        for (name, bound) in [("price_min", self.price_min), ("price_max", self.price_max)] {
            if bound.is_some_and(|p| p.is_sign_negative()) {
                return Err(CoreError::Validation(format!("{name} must not be negative")));
            }
        }
        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(CoreError::Validation(
                    "price_min must not exceed price_max".into(),
                ));
            }
        }
        Ok(())
    }

    /// Whether any predicate is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Raw listing query string, e.g.
/// `?page=2&limit=12&sort_by=price&sort_order=asc&brand=Toyota&year_min=2015`.
///
/// Kept flat because nested/flattened structs lose type information in
/// urlencoded deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortDirection>,
    pub search: Option<String>,
    pub brand: Option<String>,
    pub kind: Option<String>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub drivetrain: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub featured: Option<bool>,
}

impl VehicleListQuery {
    /// Normalize blank strings away and validate every parameter.
    pub fn into_parts(self) -> Result<(VehicleFilters, VehicleSort, PageRequest), CoreError> {
        let page = PageRequest::new(self.page, self.limit, DEFAULT_PAGE_SIZE)?;
        let sort = VehicleSort {
            sort_by: self.sort_by.unwrap_or_default(),
            sort_order: self.sort_order.unwrap_or_default(),
        };
        let filters = VehicleFilters {
            search: non_blank(self.search),
            brand: non_blank(self.brand),
            kind: non_blank(self.kind),
            fuel: non_blank(self.fuel),
            transmission: non_blank(self.transmission),
            drivetrain: non_blank(self.drivetrain),
            year_min: self.year_min,
            year_max: self.year_max,
            price_min: self.price_min,
            price_max: self.price_max,
            featured: self.featured,
        };
        filters.validate()?;
        Ok((filters, sort, page))
    }
}

/// Build a `LIKE` pattern that matches `term` anywhere, with the wildcard
/// characters in `term` escaped (escape character `\`).
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a model year.
pub fn validate_year(year: i32) -> Result<(), CoreError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    Ok(())
}

/// Validate a listing price: non-negative and representable in NUMERIC(12,2).
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price.is_sign_negative() {
        return Err(CoreError::Validation("price must not be negative".into()));
    }
    if price >= Decimal::from(10_000_000_000_i64) {
        return Err(CoreError::Validation("price is too large".into()));
    }
    if price.scale() > 2 && price.round_dp(2) != price {
        return Err(CoreError::Validation(
            "price must have at most 2 decimal places".into(),
        ));
    }
    Ok(())
}

/// Borrowed view over the headline vehicle fields, used by both create
/// (all present) and update (any subset present).
#[derive(Debug, Default, Clone, Copy)]
pub struct VehicleFieldsRef<'a> {
    pub name: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub model: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<&'a str>,
    pub mileage: Option<&'a str>,
}

/// Validate whichever headline vehicle fields are present.
pub fn validate_vehicle_fields(fields: &VehicleFieldsRef<'_>) -> Result<(), CoreError> {
    if let Some(name) = fields.name {
        validate_required_text("name", name, MAX_NAME_LENGTH)?;
    }
    if let Some(brand) = fields.brand {
        validate_required_text("brand", brand, MAX_SHORT_TEXT_LENGTH)?;
    }
    if let Some(model) = fields.model {
        validate_required_text("model", model, MAX_SHORT_TEXT_LENGTH)?;
    }
    if let Some(kind) = fields.kind {
        validate_required_text("kind", kind, MAX_SHORT_TEXT_LENGTH)?;
    }
    if let Some(description) = fields.description {
        validate_required_text("description", description, MAX_DESCRIPTION_LENGTH)?;
    }
    validate_optional_text("mileage", fields.mileage, MAX_SHORT_TEXT_LENGTH)?;
    if let Some(year) = fields.year {
        validate_year(year)?;
    }
    if let Some(price) = fields.price {
        validate_price(price)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
