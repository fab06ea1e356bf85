pub mod bootstrap;
pub mod state;

pub use bootstrap::run_demo_app;
pub use state::AppState;
