//! Recibo HTTP gateway.
//!
//! Exposes the liveness, health, and receipt-processing routes and owns the
//! linear pipeline: upload → OCR → structuring → validation → JSON response.

pub mod health;
pub mod process;
pub mod respond;
pub mod server;
pub mod sniff;

pub use server::{AppState, build_router, start_server};
