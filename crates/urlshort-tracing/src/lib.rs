//! Tracing setup shared by the urlshort binaries: fmt logging with optional
//! OTLP export, plus span helpers for request instrumentation.

pub mod config;
pub mod otlp;
pub mod spans;

pub use config::{OtlpProtocol, TracingConfig};
pub use otlp::{init_tracing, TracingGuard};
