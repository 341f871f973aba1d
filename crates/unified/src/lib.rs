//! Orchestrator tying the index, keyword engine, and history service
//! together behind one explicitly-constructed entry point.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;

pub use engine::UnifiedSearchEngine;
