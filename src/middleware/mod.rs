// Middleware modules
pub mod bearer_auth;
pub mod logging;

// Export bearer auth middleware components
pub use bearer_auth::{bearer_auth_middleware, BearerToken};

// Export logging middleware
pub use logging::logging_middleware;
