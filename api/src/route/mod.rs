pub mod auth;
pub mod booking;
pub mod facility;
pub mod health;
pub mod kos;
pub mod review;
pub mod room;
pub mod user;
pub mod v1;
