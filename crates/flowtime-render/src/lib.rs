//! Report renderers: ANSI console table and self-contained HTML page.
//!
//! Both sinks hold a read-only view of the [`flowtime_types::RuntimeReport`]
//! and share one row-substance vocabulary ([`marker`]), so what they say
//! can only differ in dress, never in content. Group headers, the
//! bottleneck flag and the non-numeric runtime markers all come from the
//! report itself.

mod console;
mod html;
mod marker;

pub use console::render_console;
pub use html::render_html;
pub use marker::{percent_marker, runtime_marker, stamp_marker, subtotal_marker};
