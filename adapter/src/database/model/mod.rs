pub mod booking;
pub mod facility;
pub mod kos;
pub mod review;
pub mod room;
pub mod user;
