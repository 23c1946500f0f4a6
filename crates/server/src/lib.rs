pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod students;

pub use routes::{build_router, AppState};
pub use startup::run_with_config;
