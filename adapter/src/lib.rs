pub mod database;
pub mod invoice;
pub mod redis;
pub mod repository;
