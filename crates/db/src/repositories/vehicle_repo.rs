//! Repository for the `vehicles` table.
//!
//! Listing queries are assembled with [`QueryBuilder`]: one filter pusher is
//! shared by the page query and its `COUNT(*)` so both always agree. Media is
//! never joined into a listing; cover images come from a correlated subquery
//! and full media lists are batch-loaded per page, so a vehicle with many
//! images still yields exactly one row.

use std::collections::HashMap;

use nextcar_core::types::DbId;
use nextcar_core::vehicle::{like_pattern, PageRequest, VehicleFilters, VehicleSort, DEFAULT_KIND};
use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type};

use crate::models::dashboard::{BrandCount, VehicleTotals, YearCount};
use crate::models::vehicle::{
    CreateVehicle, EquipmentPatch, FilterOptions, UpdateVehicle, Vehicle, VehicleDetail,
    VehicleSpecs, VehicleSummary,
};
use crate::repositories::{ImageRepo, VideoRepo};

/// Columns of a catalog card. `image` picks the principal image, else the
/// first by display order.
const SUMMARY_COLUMNS: &str = "v.id, v.name, v.brand, v.model, v.kind, v.year, v.price, \
     v.description, v.featured, v.displacement, v.mileage, v.fuel, v.transmission, \
     v.drivetrain, \
     (SELECT i.url FROM vehicle_images i WHERE i.vehicle_id = v.id \
      ORDER BY i.is_principal DESC, i.sort_order ASC, i.created_at ASC LIMIT 1) AS image, \
     v.created_at, v.updated_at";

/// Provides CRUD, listing, and aggregate queries for vehicles.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Insert a new vehicle, returning the created row.
    ///
    /// The headline columns are inserted first, then the technical sheet is
    /// applied with the same patch statement `update` uses, inside one
    /// transaction.
    pub async fn create(pool: &PgPool, input: &CreateVehicle) -> Result<Vehicle, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO vehicles
                (name, brand, model, kind, year, price, description, featured, mileage, notes)
             VALUES ($1, $2, $3, COALESCE($4, $5), $6, $7, $8, COALESCE($9, FALSE), $10, $11)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.brand)
        .bind(&input.model)
        .bind(&input.kind)
        .bind(DEFAULT_KIND)
        .bind(input.year)
        .bind(input.price)
        .bind(&input.description)
        .bind(input.featured)
        .bind(&input.mileage)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE vehicles SET updated_at = NOW()");
        push_detail_patch(&mut builder, &input.specs, &input.equipment);
        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
        let vehicle = builder
            .build_query_as::<Vehicle>()
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(vehicle)
    }

    /// Find a vehicle by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vehicle>, sqlx::Error> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a vehicle with its images and videos attached.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<VehicleDetail>, sqlx::Error> {
        let Some(vehicle) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let images = ImageRepo::list_by_vehicle(pool, id).await?;
        let videos = VideoRepo::list_by_vehicle(pool, id).await?;
        Ok(Some(VehicleDetail {
            vehicle,
            images,
            videos,
        }))
    }

    /// Every vehicle with its media, most recently created first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<VehicleDetail>, sqlx::Error> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC, id ASC")
                .fetch_all(pool)
                .await?;
        Self::attach_media(pool, vehicles).await
    }

    /// One page of catalog cards matching `filters`.
    pub async fn list_summaries(
        pool: &PgPool,
        filters: &VehicleFilters,
        sort: VehicleSort,
        page: PageRequest,
    ) -> Result<Vec<VehicleSummary>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {SUMMARY_COLUMNS} FROM vehicles v WHERE 1=1"
        ));
        push_filters(&mut builder, filters);
        push_order_and_page(&mut builder, sort, page);
        builder
            .build_query_as::<VehicleSummary>()
            .fetch_all(pool)
            .await
    }

    /// One page of full vehicles (with media) matching `filters`.
    pub async fn list_details(
        pool: &PgPool,
        filters: &VehicleFilters,
        sort: VehicleSort,
        page: PageRequest,
    ) -> Result<Vec<VehicleDetail>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT v.* FROM vehicles v WHERE 1=1");
        push_filters(&mut builder, filters);
        push_order_and_page(&mut builder, sort, page);
        let vehicles = builder
            .build_query_as::<Vehicle>()
            .fetch_all(pool)
            .await?;
        Self::attach_media(pool, vehicles).await
    }

    /// Number of vehicles matching `filters`.
    pub async fn count(pool: &PgPool, filters: &VehicleFilters) -> Result<i64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM vehicles v WHERE 1=1");
        push_filters(&mut builder, filters);
        builder.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Update a vehicle. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVehicle,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE vehicles SET updated_at = NOW()");
        push_patch(&mut builder, "name", &input.name);
        push_patch(&mut builder, "brand", &input.brand);
        push_patch(&mut builder, "model", &input.model);
        push_patch(&mut builder, "kind", &input.kind);
        push_patch(&mut builder, "year", input.year);
        push_patch(&mut builder, "price", input.price);
        push_patch(&mut builder, "description", &input.description);
        push_patch(&mut builder, "featured", input.featured);
        push_patch(&mut builder, "mileage", &input.mileage);
        push_patch(&mut builder, "notes", &input.notes);
        push_detail_patch(&mut builder, &input.specs, &input.equipment);
        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Vehicle>()
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the featured flag. Returns `None` if the vehicle does not exist.
    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        featured: bool,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET featured = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(featured)
        .fetch_optional(pool)
        .await
    }

    /// Delete a vehicle and its media rows.
    ///
    /// Returns the `public_id` of every image and video that was removed, so
    /// the caller can delete the stored files, or `None` if the vehicle does
    /// not exist. The vehicle row is locked first, so an upload racing the
    /// delete either lands before it (and is returned) or fails afterwards.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let found: Option<DbId> = sqlx::query_scalar("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Ok(None);
        }

        let mut public_ids: Vec<String> = sqlx::query_scalar(
            "DELETE FROM vehicle_images WHERE vehicle_id = $1 AND public_id IS NOT NULL
             RETURNING public_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        let videos: Vec<String> = sqlx::query_scalar(
            "DELETE FROM vehicle_videos WHERE vehicle_id = $1 AND public_id IS NOT NULL
             RETURNING public_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        public_ids.extend(videos);

        // Media without a stored file cascades here.
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(public_ids))
    }

    // -----------------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------------

    /// Total, featured, and average-price figures across all vehicles.
    pub async fn totals(pool: &PgPool) -> Result<VehicleTotals, sqlx::Error> {
        sqlx::query_as::<_, VehicleTotals>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE featured) AS featured,
                    ROUND(COALESCE(AVG(price), 0), 2) AS average_price
             FROM vehicles",
        )
        .fetch_one(pool)
        .await
    }

    /// The `limit` brands with the most vehicles, largest first.
    pub async fn count_by_brand(pool: &PgPool, limit: i64) -> Result<Vec<BrandCount>, sqlx::Error> {
        sqlx::query_as::<_, BrandCount>(
            "SELECT brand, COUNT(*) AS count
             FROM vehicles
             GROUP BY brand
             ORDER BY count DESC, brand ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Vehicle counts for the `limit` newest model years, newest first.
    pub async fn count_by_year(pool: &PgPool, limit: i64) -> Result<Vec<YearCount>, sqlx::Error> {
        sqlx::query_as::<_, YearCount>(
            "SELECT year, COUNT(*) AS count
             FROM vehicles
             GROUP BY year
             ORDER BY year DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Distinct values for each catalog filter.
    pub async fn filter_options(pool: &PgPool) -> Result<FilterOptions, sqlx::Error> {
        let years = sqlx::query_scalar::<_, i32>(
            "SELECT DISTINCT year FROM vehicles ORDER BY year DESC",
        )
        .fetch_all(pool)
        .await?;

        Ok(FilterOptions {
            brands: distinct_text(pool, "brand").await?,
            kinds: distinct_text(pool, "kind").await?,
            fuels: distinct_text(pool, "fuel").await?,
            transmissions: distinct_text(pool, "transmission").await?,
            drivetrains: distinct_text(pool, "drivetrain").await?,
            years,
        })
    }

    // -----------------------------------------------------------------------
    // Media attachment
    // -----------------------------------------------------------------------

    /// Batch-load images and videos for `vehicles`, preserving their order.
    async fn attach_media(
        pool: &PgPool,
        vehicles: Vec<Vehicle>,
    ) -> Result<Vec<VehicleDetail>, sqlx::Error> {
        if vehicles.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = vehicles.iter().map(|v| v.id).collect();

        let mut images: HashMap<DbId, Vec<_>> = HashMap::new();
        for image in ImageRepo::list_for_vehicles(pool, &ids).await? {
            images.entry(image.vehicle_id).or_default().push(image);
        }
        let mut videos: HashMap<DbId, Vec<_>> = HashMap::new();
        for video in VideoRepo::list_for_vehicles(pool, &ids).await? {
            videos.entry(video.vehicle_id).or_default().push(video);
        }

        Ok(vehicles
            .into_iter()
            .map(|vehicle| VehicleDetail {
                images: images.remove(&vehicle.id).unwrap_or_default(),
                videos: videos.remove(&vehicle.id).unwrap_or_default(),
                vehicle,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Query building
// ---------------------------------------------------------------------------

/// Columns a search term is matched against, each on its own.
const SEARCH_COLUMNS: [&str; 4] = ["v.name", "v.brand", "v.model", "v.description"];

/// Append one `AND ...` predicate per set filter. Expects the builder to end
/// in a `WHERE` clause over `vehicles v`.
pub(crate) fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, filters: &'a VehicleFilters) {
    if let Some(search) = &filters.search {
        let pattern = like_pattern(search);
        builder.push(" AND (");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder
                .push(column)
                .push(" ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\'");
        }
        builder.push(")");
    }
    push_equals(builder, "v.brand", &filters.brand);
    push_equals(builder, "v.kind", &filters.kind);
    push_equals(builder, "v.fuel", &filters.fuel);
    push_equals(builder, "v.transmission", &filters.transmission);
    push_equals(builder, "v.drivetrain", &filters.drivetrain);

    if let Some(min) = filters.year_min {
        builder.push(" AND v.year >= ").push_bind(min);
    }
    if let Some(max) = filters.year_max {
        builder.push(" AND v.year <= ").push_bind(max);
    }
    if let Some(min) = filters.price_min {
        builder.push(" AND v.price >= ").push_bind(min);
    }
    if let Some(max) = filters.price_max {
        builder.push(" AND v.price <= ").push_bind(max);
    }
    if let Some(featured) = filters.featured {
        builder.push(" AND v.featured = ").push_bind(featured);
    }
}

fn push_equals<'a>(builder: &mut QueryBuilder<'a, Postgres>, column: &str, value: &'a Option<String>) {
    if let Some(value) = value {
        builder.push(" AND ").push(column).push(" = ").push_bind(value);
    }
}

/// Append `ORDER BY` (whitelisted column, id tie-breaker) and `LIMIT/OFFSET`.
pub(crate) fn push_order_and_page(
    builder: &mut QueryBuilder<'_, Postgres>,
    sort: VehicleSort,
    page: PageRequest,
) {
    builder
        .push(" ORDER BY v.")
        .push(sort.sort_by.column())
        .push(" ")
        .push(sort.sort_order.keyword())
        .push(", v.id ASC");
    builder
        .push(" LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset());
}

/// Append `, column = COALESCE($n, column)`.
fn push_patch<'a, T>(builder: &mut QueryBuilder<'a, Postgres>, column: &str, value: T)
where
    T: 'a + Encode<'a, Postgres> + Type<Postgres>,
{
    builder
        .push(", ")
        .push(column)
        .push(" = COALESCE(")
        .push_bind(value)
        .push(", ")
        .push(column)
        .push(")");
}

/// Patch assignments for the technical sheet and equipment checklist.
fn push_detail_patch<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    specs: &'a VehicleSpecs,
    equipment: &'a EquipmentPatch,
) {
    push_patch(builder, "fuel", &specs.fuel);
    push_patch(builder, "displacement", &specs.displacement);
    push_patch(builder, "power", &specs.power);
    push_patch(builder, "fuel_system", &specs.fuel_system);
    push_patch(builder, "cylinders", specs.cylinders);
    push_patch(builder, "valves", specs.valves);
    push_patch(builder, "drivetrain", &specs.drivetrain);
    push_patch(builder, "transmission", &specs.transmission);
    push_patch(builder, "gears", &specs.gears);
    push_patch(builder, "tires", &specs.tires);
    push_patch(builder, "front_brakes", &specs.front_brakes);
    push_patch(builder, "rear_brakes", &specs.rear_brakes);
    push_patch(builder, "power_steering_type", &specs.power_steering_type);
    push_patch(builder, "rear_seats", &specs.rear_seats);
    push_patch(builder, "upholstery", &specs.upholstery);
    push_patch(builder, "door_locking", &specs.door_locking);
    push_patch(builder, "front_windows", &specs.front_windows);
    push_patch(builder, "rear_windows", &specs.rear_windows);
    push_patch(builder, "exterior_mirrors", &specs.exterior_mirrors);
    push_patch(builder, "curtain_airbags", &specs.curtain_airbags);
    push_patch(builder, "side_airbags", &specs.side_airbags);
    push_patch(builder, "airbag_count", specs.airbag_count);
    push_patch(builder, "sound_system", &specs.sound_system);

    push_patch(builder, "power_steering", equipment.power_steering);
    push_patch(builder, "air_conditioning", equipment.air_conditioning);
    push_patch(builder, "adjustable_front_seat", equipment.adjustable_front_seat);
    push_patch(builder, "adjustable_steering_wheel", equipment.adjustable_steering_wheel);
    push_patch(builder, "fog_lights", equipment.fog_lights);
    push_patch(builder, "trip_computer", equipment.trip_computer);
    push_patch(builder, "alloy_wheels", equipment.alloy_wheels);
    push_patch(builder, "parking_camera", equipment.parking_camera);
    push_patch(builder, "hill_start_assist", equipment.hill_start_assist);
    push_patch(builder, "fuel_economy_control", equipment.fuel_economy_control);
    push_patch(builder, "daytime_running_lights", equipment.daytime_running_lights);
    push_patch(builder, "abs", equipment.abs);
    push_patch(builder, "electronic_brake_distribution", equipment.electronic_brake_distribution);
    push_patch(builder, "emergency_brake_assist", equipment.emergency_brake_assist);
    push_patch(builder, "front_airbags", equipment.front_airbags);
    push_patch(builder, "driver_knee_airbag", equipment.driver_knee_airbag);
    push_patch(builder, "alarm", equipment.alarm);
    push_patch(builder, "engine_immobilizer", equipment.engine_immobilizer);
    push_patch(builder, "child_seat_anchors", equipment.child_seat_anchors);
    push_patch(builder, "auto_door_lock", equipment.auto_door_lock);
    push_patch(builder, "stability_control", equipment.stability_control);
    push_patch(builder, "traction_control", equipment.traction_control);
    push_patch(builder, "steering_wheel_controls", equipment.steering_wheel_controls);
    push_patch(builder, "aux_input", equipment.aux_input);
    push_patch(builder, "usb_port", equipment.usb_port);
    push_patch(builder, "bluetooth", equipment.bluetooth);
    push_patch(builder, "voice_control", equipment.voice_control);
    push_patch(builder, "display_screen", equipment.display_screen);
    push_patch(builder, "gps_navigation", equipment.gps_navigation);
    push_patch(builder, "apple_carplay", equipment.apple_carplay);
    push_patch(builder, "mirrorlink", equipment.mirrorlink);
}

/// Sorted distinct non-blank values of a text column. `column` must be a
/// trusted identifier.
async fn distinct_text(pool: &PgPool, column: &'static str) -> Result<Vec<String>, sqlx::Error> {
    let query = format!(
        "SELECT DISTINCT {column} FROM vehicles
         WHERE {column} IS NOT NULL AND {column} <> ''
         ORDER BY {column} ASC"
    );
    sqlx::query_scalar::<_, String>(&query).fetch_all(pool).await
}
