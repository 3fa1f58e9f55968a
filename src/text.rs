/// Greedy word wrapping.
pub mod line_breaker;
/// Multi-line size computation.
pub mod metrics;

pub use line_breaker::{break_lines, wrap_text};
pub use metrics::measure_block;
