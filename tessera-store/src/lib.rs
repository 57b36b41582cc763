pub mod app_config;
pub mod database;
pub mod event_repo;
pub mod order_repo;

pub use app_config::Config;
pub use database::DbClient;
pub use event_repo::PgEventRepository;
pub use order_repo::PgOrderRepository;
