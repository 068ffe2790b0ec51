pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod images;
pub mod public;
pub mod uploads;
pub mod users;
pub mod vehicle_sales;
pub mod vehicles;
pub mod videos;
