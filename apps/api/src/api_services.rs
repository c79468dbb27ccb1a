mod bootstrap;
mod database;
mod state_builder;

pub use bootstrap::bootstrap_super_admin;
pub use database::{connect_and_migrate, purge_expired_sessions};
pub use state_builder::build_app_state;
