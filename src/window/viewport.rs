//! Virtual Window Module
//!
//! Scroll-tracking wrapper around [`compute_window`]: holds the latest scroll
//! offset and produces the range, visible items and layout directives for it.

use serde::Serialize;
use tracing::trace;

use crate::window::range::clamp_scroll;
use crate::window::{compute_window, WindowConfig, WindowRange};

// == Virtual Window ==
/// Windowed list state. The only mutable state is the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualWindow {
    config: WindowConfig,
    scroll_top: f64,
}

impl VirtualWindow {
    /// Creates a window scrolled to the top.
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            scroll_top: 0.0,
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Replaces the geometry, keeping the scroll offset.
    pub fn set_config(&mut self, config: WindowConfig) {
        self.config = config;
    }

    /// Latest observed scroll offset.
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    // == On Scroll ==
    /// Records a scroll event and returns the range for `item_count` items.
    pub fn on_scroll(&mut self, scroll_top: f64, item_count: usize) -> WindowRange {
        self.scroll_top = clamp_scroll(scroll_top);
        let range = self.range(item_count);
        trace!(
            scroll_top = self.scroll_top,
            start = range.start_index,
            len = range.len(),
            "Window recomputed"
        );
        range
    }

    /// Scrolls so that `index` is the first fully visible row.
    pub fn scroll_to_index(&mut self, index: usize) {
        self.scroll_top = index as f64 * self.config.item_height();
    }

    /// Range for the current scroll offset.
    pub fn range(&self, item_count: usize) -> WindowRange {
        compute_window(&self.config, self.scroll_top, item_count)
    }

    /// Rendered part of `items` together with absolute indices.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> VisibleItems<'a, T> {
        let range = self.range(items.len());
        VisibleItems {
            items: range.slice(items),
            range,
        }
    }

    /// Layout the renderer applies for `item_count` items.
    pub fn layout(&self, item_count: usize) -> LayoutDirectives {
        LayoutDirectives::for_range(&self.range(item_count), self.config.container_height())
    }
}

// == Visible Items ==
/// Slice of the backing sequence currently materialized.
#[derive(Debug, Clone, Copy)]
pub struct VisibleItems<'a, T> {
    pub range: WindowRange,
    pub items: &'a [T],
}

impl<'a, T> VisibleItems<'a, T> {
    /// Items paired with their index in the full sequence.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        let start = self.range.start_index;
        let items = self.items;
        items.iter().enumerate().map(move |(i, item)| (start + i, item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// == Layout Directives ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Relative,
    Absolute,
}

/// Scrollable viewport box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerStyle {
    pub height: f64,
    pub overflow: Overflow,
    pub position: Position,
}

/// Full-height spacer giving the scrollbar its true extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentStyle {
    pub height: f64,
    pub position: Position,
}

/// Block holding the rendered rows, translated to their true position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemsStyle {
    pub position: Position,
    pub top: f64,
    pub left: f64,
    pub right: f64,
}

/// Ready-to-apply positioning for the three layers of a windowed list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutDirectives {
    pub container: ContainerStyle,
    pub content: ContentStyle,
    pub items: ItemsStyle,
}

impl LayoutDirectives {
    pub fn for_range(range: &WindowRange, container_height: f64) -> Self {
        Self {
            container: ContainerStyle {
                height: container_height,
                overflow: Overflow::Auto,
                position: Position::Relative,
            },
            content: ContentStyle {
                height: range.total_height(),
                position: Position::Relative,
            },
            items: ItemsStyle {
                position: Position::Absolute,
                top: range.offset_y(),
                left: 0.0,
                right: 0.0,
            },
        }
    }
}
