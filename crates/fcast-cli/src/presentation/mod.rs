//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms. Everything here takes
//! already-decoded core types and renders them for a terminal.

pub mod session_display;
pub mod tables;

pub use session_display::{
    render_license, render_metric_rows, render_profile, render_simulation_rows,
    render_thresholds,
};
pub use tables::{format_optional, mask_secret, print_lines, print_separator, truncate_string};
