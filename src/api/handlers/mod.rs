//! HTTP request handlers for API endpoints.

pub mod health;
pub mod purge;
pub mod redirect;
pub mod stats;

pub use health::health_handler;
pub use purge::purge_handler;
pub use redirect::redirect_handler;
pub use stats::stats_handler;
