//! Presentation module
//!
//! Pure functions that turn a session snapshot into arc geometry, text and
//! colors, plus the sinks that publish the result.

pub mod format;
pub mod frame;
pub mod geometry;
pub mod sink;
pub mod theme;

// Re-export main types
pub use format::format_time;
pub use frame::{Frame, Layering};
pub use geometry::{describe_arc, fraction_remaining};
pub use sink::{FanoutSink, LogSink, RenderSink, WatchSink};
pub use theme::{resolve_color, Color, Theme};
