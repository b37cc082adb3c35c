//! Interview Copilot Backend
//!
//! Real-time interview assistance service with:
//! - Streaming question detection over live transcript fragments
//! - Resume text structuring into a typed candidate profile
//! - Session and Q&A history bookkeeping

pub mod analysis;
pub mod api;

pub use analysis::*;
pub use api::*;
