//! Data sources feeding the statistics core.
//!
//! - [`import`]: JSON and CSV files of `(x, y)` points or plain number sequences
//! - [`generator`]: Seeded samples from parametric distributions and preset datasets
//! - [`pattern`]: Sequences synthesized from a free-text description

pub mod generator;
pub mod import;
pub mod pattern;
