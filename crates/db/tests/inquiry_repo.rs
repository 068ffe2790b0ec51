//! Integration tests for contact inquiries and vehicle-sale requests.

use nextcar_db::models::contact::CreateContact;
use nextcar_db::models::vehicle_sale::CreateVehicleSale;
use nextcar_db::repositories::{ContactRepo, VehicleSaleRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn new_contact(email: &str) -> CreateContact {
    CreateContact {
        first_name: " Lucía ".into(),
        last_name: "Pérez".into(),
        city: "Córdoba".into(),
        province: "Córdoba".into(),
        phone: "+54 351 555 1234".into(),
        email: email.into(),
        message: "¿Aceptan permuta?".into(),
    }
}

fn new_sale() -> CreateVehicleSale {
    CreateVehicleSale {
        first_name: "Martín".into(),
        last_name: "Gómez".into(),
        city: "Rosario".into(),
        province: "Santa Fe".into(),
        phone: "3415551234".into(),
        email: "martin@example.com".into(),
        message: None,
        vehicle_brand: "Ford".into(),
        vehicle_model: "Fiesta".into(),
        vehicle_year: 2014,
        vehicle_mileage: Some("110000 km".into()),
        vehicle_fuel: None,
        vehicle_transmission: None,
        vehicle_description: None,
        expected_price: Some(Decimal::new(550_000_000, 2)),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_crud(pool: PgPool) {
    let contact = ContactRepo::create(&pool, &new_contact("lucia@example.com"))
        .await
        .unwrap();
    assert_eq!(contact.first_name, "Lucía", "text is trimmed");

    let found = ContactRepo::find_by_id(&pool, contact.id).await.unwrap();
    assert!(found.is_some());
    assert_eq!(ContactRepo::count(&pool).await.unwrap(), 1);

    assert!(ContactRepo::delete(&pool, contact.id).await.unwrap());
    assert!(!ContactRepo::delete(&pool, contact.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_recency_and_monthly_counts(pool: PgPool) {
    ContactRepo::create(&pool, &new_contact("a@example.com")).await.unwrap();
    let old = ContactRepo::create(&pool, &new_contact("b@example.com")).await.unwrap();
    sqlx::query("UPDATE contacts SET created_at = NOW() - INTERVAL '400 days' WHERE id = $1")
        .bind(old.id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(ContactRepo::count_recent(&pool, 30).await.unwrap(), 1);

    let months = ContactRepo::counts_by_month(&pool, 6).await.unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].count, 1);
    assert_eq!(months[0].month.len(), 7);

    let listed = ContactRepo::list(&pool).await.unwrap();
    assert_eq!(listed.last().unwrap().id, old.id, "newest first");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sale_lifecycle(pool: PgPool) {
    let sale = VehicleSaleRepo::create(&pool, &new_sale()).await.unwrap();
    assert!(!sale.processed);
    assert_eq!(sale.expected_price, Some(Decimal::new(550_000_000, 2)));
    assert_eq!(VehicleSaleRepo::count_pending(&pool).await.unwrap(), 1);

    let processed = VehicleSaleRepo::mark_processed(&pool, sale.id)
        .await
        .unwrap()
        .expect("sale exists");
    assert!(processed.processed);
    assert_eq!(VehicleSaleRepo::count_pending(&pool).await.unwrap(), 0);

    assert!(VehicleSaleRepo::delete(&pool, sale.id).await.unwrap());
    assert!(VehicleSaleRepo::mark_processed(&pool, sale.id).await.unwrap().is_none());
    assert!(VehicleSaleRepo::list(&pool).await.unwrap().is_empty());
}
