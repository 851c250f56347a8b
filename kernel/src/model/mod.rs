pub mod access;
pub mod auth;
pub mod booking;
pub mod facility;
pub mod id;
pub mod kos;
pub mod review;
pub mod role;
pub mod room;
pub mod user;
