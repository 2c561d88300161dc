use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::auth::AuthRepositoryImpl;
use adapter::repository::availability::AvailabilityRepositoryImpl;
use adapter::repository::booking::BookingRepositoryImpl;
use adapter::repository::dashboard::DashboardRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::history::HistoryRepositoryImpl;
use adapter::repository::room::RoomRepositoryImpl;
use adapter::repository::user::UserRepositoryImpl;
use kernel::repository::auth::AuthRepository;
use kernel::repository::availability::AvailabilityRepository;
use kernel::repository::booking::BookingRepository;
use kernel::repository::dashboard::DashboardRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::history::HistoryRepository;
use kernel::repository::room::RoomRepository;
use kernel::repository::user::UserRepository;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    room_repository: Arc<dyn RoomRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    availability_repository: Arc<dyn AvailabilityRepository>,
    history_repository: Arc<dyn HistoryRepository>,
    dashboard_repository: Arc<dyn DashboardRepository>,
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
        let room_repository = Arc::new(RoomRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let availability_repository = Arc::new(AvailabilityRepositoryImpl::new(pool.clone()));
        let history_repository = Arc::new(HistoryRepositoryImpl::new(pool.clone()));
        let dashboard_repository = Arc::new(DashboardRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            room_repository,
            booking_repository,
            availability_repository,
            history_repository,
            dashboard_repository,
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

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn availability_repository(&self) -> Arc<dyn AvailabilityRepository> {
        self.availability_repository.clone()
    }

    pub fn history_repository(&self) -> Arc<dyn HistoryRepository> {
        self.history_repository.clone()
    }

    pub fn dashboard_repository(&self) -> Arc<dyn DashboardRepository> {
        self.dashboard_repository.clone()
    }
}
