//! CSV emission for assembled races
//!
//! Flattens completed race records into constant-width rows and appends them
//! to the per-kind CSV sinks.
//!
//! ## Architecture
//!
//! - [`schema`] - fixed column schemas per document kind
//! - [`emitter`] - race record to flat row flattening
//! - [`writer`] - append-mode sink with create-with-header semantics

pub mod emitter;
pub mod schema;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use emitter::{emit_row, program_row, result_row};
pub use schema::{program_headers, result_headers};
pub use writer::append_rows;
