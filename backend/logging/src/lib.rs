//! Structured logging for the recibo service.
//!
//! Wraps `tracing` with a console layer for interactive use and a
//! daily-rolling NDJSON file for ingestion.

pub mod logger;

pub use logger::init_logger;
