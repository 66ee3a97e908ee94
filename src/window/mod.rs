//! Window Module
//!
//! Windowed list rendering: which slice of a long list to materialize for a
//! given scroll offset, with overscan rows on either side.

mod range;
mod viewport;


pub use range::{compute_window, WindowConfig, WindowRange};
pub use viewport::{
    ContainerStyle, ContentStyle, ItemsStyle, LayoutDirectives, Overflow, Position, VirtualWindow,
    VisibleItems,
};

/// Extra rows rendered above and below the viewport by default
pub const DEFAULT_OVERSCAN: usize = 5;
