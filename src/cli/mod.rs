//! CLI output formatting
//!
//! Provides human-readable terminal display for workspace resolution
//! and sweeping.

pub mod display;

pub use display::print_cleaned;
pub use display::print_kept;
pub use display::print_resolved;
pub use display::render_prune_report;
