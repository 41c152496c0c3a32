//! Application layer - orchestration of the deprecation lifecycle.
//!
//! This layer coordinates the domain logic and holds the runtime state:
//! - Deprecation registry (backend configuration, counters, scopes)
//! - Delivery metrics
//! - Test expectations built on the query API
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters implement. This keeps the application layer independent from
//! delivery details.

pub mod expectations;
pub mod metrics;
pub mod ports;
pub mod registry;
