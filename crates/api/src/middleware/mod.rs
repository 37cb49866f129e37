// API Middleware
//
// Cross-cutting request processing for the HTTP layer.

pub mod request_id;

pub use request_id::correlation_id_middleware;
