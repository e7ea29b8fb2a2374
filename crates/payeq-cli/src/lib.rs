//! Library side of the `payeq` command: configuration, logging, the shared
//! ingest/derive pipeline, CSV export and terminal rendering.

pub mod config;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod summary;
