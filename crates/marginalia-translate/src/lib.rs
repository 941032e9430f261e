//! # marginalia-translate
//!
//! Translation provider backends for marginalia.
//!
//! The server never translates text itself; it forwards requests to an
//! upstream provider and relays the result. This crate provides:
//! - [`HttpTranslationBackend`]: the production passthrough over HTTP
//! - [`MockTranslationBackend`]: a deterministic backend for tests

pub mod http;
pub mod mock;

pub use http::{HttpTranslationBackend, DEFAULT_TRANSLATE_TIMEOUT_SECS};
pub use mock::{MockTranslationBackend, TranslateCall};
