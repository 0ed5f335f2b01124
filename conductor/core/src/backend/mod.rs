//! Classifier Backend Integration
//!
//! Abstracted access to the sentiment classifier through a common trait.
//!
//! # Available Backends
//!
//! - **HTTP**: the remote `/analyze` endpoint (default)
//!
//! # Usage
//!
//! ```ignore
//! use aura_conductor::backend::{Classifier, HttpClassifier};
//!
//! let classifier = HttpClassifier::new("http://localhost:5000/analyze", timeout)?;
//! let result = classifier.classify("What a lovely day").await?;
//! ```

mod http;
mod traits;

pub use http::{HttpClassifier, DEFAULT_ENDPOINT};
pub use traits::Classifier;
