//! Authenticated HTTP clients for the internal collaborator services.
//!
//! All outbound calls attach the shared internal secret in the
//! [`INTERNAL_SECRET_HEADER`] header and run under an explicit bounded
//! timeout configured at startup.

mod aggregator_client;
mod ingest_client;
mod lookup_client;

pub use aggregator_client::HttpAggregatorClient;
pub use ingest_client::HttpEventSink;
pub use lookup_client::HttpLookupClient;

/// Header carrying the shared internal secret on internal traffic, both
/// inbound (internal endpoints) and outbound (collaborator calls).
pub const INTERNAL_SECRET_HEADER: &str = "x-internal-secret";
