//! Concrete collaborators behind the core's provider and enrichment traits.
//!
//! Socrata open-data adapters plus the built-in provider catalog, and HTTP
//! clients for Google Drive imagery, owner skip-trace and mortgage status.
//! All of them share one [`reqwest::Client`] supplied by the caller.

pub mod catalog;
pub mod google_drive;
pub mod http;
pub mod mortgage;
pub mod skip_trace;
pub mod socrata;
