//! urlshort: map request paths to redirect targets, delegating everything
//! else to a fallback service.
//!
//! Handlers are plain [`tower::Service`]s, so they mount anywhere axum or
//! tower accepts one and compose with each other:
//!
//! ```no_run
//! use std::collections::HashMap;
//! use axum::Router;
//!
//! let fallback: Router = Router::new().fallback(|| async { "Hello, world!" });
//!
//! let paths = HashMap::from([(
//!     "/urlshort-godoc".to_string(),
//!     "https://godoc.org/github.com/gophercises/urlshort".to_string(),
//! )]);
//! let map = urlshort::map_handler(paths, fallback);
//!
//! let yaml = b"- path: /urlshort\n  url: https://github.com/gophercises/urlshort\n";
//! let handler = urlshort::yaml_handler(yaml, map).unwrap();
//!
//! let app: Router = Router::new().fallback_service(handler);
//! ```

pub mod error;
pub mod handler;
pub mod records;

pub use error::DecodeError;
pub use handler::{map_handler, MapHandler};
pub use records::{json_handler, yaml_handler, PathUrl};
