//! Text Analysis - Core of the Interview Copilot
//!
//! Two independent pipelines that share only the confidence-scoring idiom:
//! - Detector: stateful per-session buffering of live transcript fragments,
//!   classifying complete utterances into interview question types
//! - Resume: a pure one-pass pipeline structuring raw document text into a
//!   typed candidate profile
//!
//! Both are synchronous, CPU-only text transformations with no I/O; the
//! resume pipeline is fully stateless, the detector serializes per session.

pub mod catalog;
pub mod detector;
pub mod resume;
pub mod types;

pub use detector::*;
pub use resume::*;
pub use types::*;
