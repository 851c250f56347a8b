use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::invoice::FileInvoiceRenderer;
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, booking::BookingRepositoryImpl, facility::FacilityRepositoryImpl,
    health::HealthCheckRepositoryImpl, kos::KosRepositoryImpl, review::ReviewRepositoryImpl,
    room::RoomRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::repository::{
    auth::AuthRepository, booking::BookingRepository, facility::FacilityRepository,
    health::HealthCheckRepository, invoice::InvoiceRenderer, kos::KosRepository,
    review::ReviewRepository, room::RoomRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    kos_repository: Arc<dyn KosRepository>,
    room_repository: Arc<dyn RoomRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    facility_repository: Arc<dyn FacilityRepository>,
    review_repository: Arc<dyn ReviewRepository>,
    invoice_renderer: Arc<dyn InvoiceRenderer>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let kos_repository = Arc::new(KosRepositoryImpl::new(pool.clone()));
        let room_repository = Arc::new(RoomRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let facility_repository = Arc::new(FacilityRepositoryImpl::new(pool.clone()));
        let review_repository = Arc::new(ReviewRepositoryImpl::new(pool.clone()));
        let invoice_renderer = Arc::new(FileInvoiceRenderer::new(
            app_config.invoice.output_dir.clone(),
        ));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            kos_repository,
            room_repository,
            booking_repository,
            facility_repository,
            review_repository,
            invoice_renderer,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn kos_repository(&self) -> Arc<dyn KosRepository> {
        self.kos_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn facility_repository(&self) -> Arc<dyn FacilityRepository> {
        self.facility_repository.clone()
    }

    pub fn review_repository(&self) -> Arc<dyn ReviewRepository> {
        self.review_repository.clone()
    }

    pub fn invoice_renderer(&self) -> Arc<dyn InvoiceRenderer> {
        self.invoice_renderer.clone()
    }
}
