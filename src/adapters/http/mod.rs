//! HTTP adapters - REST API implementations.
//!
//! `session` exposes the analysis session endpoints; `router` assembles them
//! with the health check and the shared middleware stack.

mod router;
pub mod session;

pub use router::{app_router, RouterConfig};
pub use session::{session_routes, SessionHandlers};
