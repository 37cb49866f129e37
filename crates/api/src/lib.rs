// API Layer - HTTP Transport Boundary
//
// Request models with validation, routes, correlation-ID middleware, and the
// mapping from the domain error taxonomy onto HTTP responses. Everything
// below this layer is reached exclusively through the command dispatcher.

pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

pub use routes::{build_router, AppState};
