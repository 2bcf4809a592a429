pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod types;

pub use auth::{StaticTokenResolver, ViewerResolver};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
