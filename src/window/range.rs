//! Window Range Module
//!
//! Pure computation of the index range a scrolled list must render.

use std::ops::Range;

use crate::error::ConfigurationError;
use crate::window::DEFAULT_OVERSCAN;

// == Window Config ==
/// Fixed geometry of a windowed list.
///
/// Construction validates the geometry, so every computation on a config is
/// total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    item_height: f64,
    container_height: f64,
    overscan: usize,
}

impl WindowConfig {
    /// Creates a config with the default overscan.
    ///
    /// `item_height` must be finite and positive, `container_height` finite
    /// and non-negative.
    pub fn new(item_height: f64, container_height: f64) -> Result<Self, ConfigurationError> {
        if !item_height.is_finite() || item_height <= 0.0 {
            return Err(ConfigurationError(format!(
                "item_height must be a finite positive number, got {}",
                item_height
            )));
        }
        if !container_height.is_finite() || container_height < 0.0 {
            return Err(ConfigurationError(format!(
                "container_height must be a finite non-negative number, got {}",
                container_height
            )));
        }

        Ok(Self {
            item_height,
            container_height,
            overscan: DEFAULT_OVERSCAN,
        })
    }

    /// Sets the number of extra rows rendered on each side of the viewport.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Rows that fit in the viewport, rounding a partial row up.
    pub fn visible_count(&self) -> usize {
        (self.container_height / self.item_height).ceil() as usize
    }
}

// == Window Range ==
/// Inclusive slice of a sequence to materialize, plus its geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRange {
    /// First index to render
    pub start_index: usize,
    /// Rows that fit in the viewport, before overscan
    pub visible_count: usize,
    /// Length of the backing sequence
    pub item_count: usize,
    /// Height of one row
    pub item_height: f64,
    end: usize,
}

impl WindowRange {
    /// Last index to render, or `None` if nothing is rendered.
    pub fn end_index(&self) -> Option<usize> {
        (self.end > self.start_index).then(|| self.end - 1)
    }

    /// Half-open index range, convenient for slicing.
    pub fn indices(&self) -> Range<usize> {
        self.start_index..self.end
    }

    /// Number of rows to render.
    pub fn len(&self) -> usize {
        self.end - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of the full virtual list.
    pub fn total_height(&self) -> f64 {
        self.item_count as f64 * self.item_height
    }

    /// Vertical translation of the rendered block.
    pub fn offset_y(&self) -> f64 {
        self.start_index as f64 * self.item_height
    }

    /// The rendered part of `items`.
    ///
    /// Clamped to `items.len()` in case the sequence changed since the range
    /// was computed.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start_index.min(end);
        &items[start..end]
    }
}

/// Computes the window for a scroll offset.
///
/// `start = max(0, floor(scroll_top / item_height) - overscan)`, clamped to
/// the last index; the inclusive end is
/// `min(item_count - 1, start + visible_count + 2 * overscan)`. Negative or
/// non-finite offsets are treated as 0.
pub fn compute_window(config: &WindowConfig, scroll_top: f64, item_count: usize) -> WindowRange {
    let scroll_top = clamp_scroll(scroll_top);
    let visible_count = config.visible_count();

    let first_visible = (scroll_top / config.item_height).floor() as usize;
    let start_index = first_visible
        .saturating_sub(config.overscan)
        .min(item_count.saturating_sub(1));

    let span = visible_count.saturating_add(config.overscan.saturating_mul(2));
    let end = start_index.saturating_add(span).saturating_add(1).min(item_count);

    WindowRange {
        start_index,
        visible_count,
        item_count,
        item_height: config.item_height,
        end,
    }
}

pub(crate) fn clamp_scroll(scroll_top: f64) -> f64 {
    if scroll_top.is_finite() && scroll_top > 0.0 {
        scroll_top
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(item_height: f64, container_height: f64, overscan: usize) -> WindowConfig {
        WindowConfig::new(item_height, container_height)
            .unwrap()
            .with_overscan(overscan)
    }

    #[test]
    fn test_reference_scenario() {
        let range = compute_window(&config(40.0, 400.0, 5), 2000.0, 1000);

        assert_eq!(range.start_index, 45);
        assert_eq!(range.visible_count, 10);
        assert_eq!(range.end_index(), Some(65));
        assert_eq!(range.offset_y(), 1800.0);
        assert_eq!(range.total_height(), 40000.0);
        assert_eq!(range.len(), 21);
    }

    #[test]
    fn test_top_of_list() {
        let range = compute_window(&config(40.0, 400.0, 5), 0.0, 1000);
        assert_eq!(range.start_index, 0);
        assert_eq!(range.end_index(), Some(20));
        assert_eq!(range.offset_y(), 0.0);
    }

    #[test]
    fn test_empty_sequence() {
        let range = compute_window(&config(40.0, 400.0, 5), 0.0, 0);
        assert!(range.is_empty());
        assert_eq!(range.start_index, 0);
        assert_eq!(range.end_index(), None);
        assert_eq!(range.total_height(), 0.0);

        let items: Vec<u32> = Vec::new();
        assert!(range.slice(&items).is_empty());
    }

    #[test]
    fn test_end_clamped_to_last_item() {
        let range = compute_window(&config(40.0, 400.0, 5), 0.0, 7);
        assert_eq!(range.end_index(), Some(6));
        assert_eq!(range.len(), 7);
    }

    #[test]
    fn test_scrolled_past_end_of_shrunken_list() {
        let range = compute_window(&config(40.0, 400.0, 5), 40_000.0, 10);
        assert!(!range.is_empty());
        assert_eq!(range.start_index, 9);
        assert_eq!(range.end_index(), Some(9));
        assert_eq!(range.offset_y(), 360.0);

        let items: Vec<usize> = (0..10).collect();
        assert_eq!(range.slice(&items), &[9]);
    }

    #[test]
    fn test_zero_overscan() {
        let range = compute_window(&config(50.0, 200.0, 0), 125.0, 100);
        assert_eq!(range.start_index, 2);
        assert_eq!(range.end_index(), Some(6));
    }

    #[test]
    fn test_partial_row_rounds_up() {
        assert_eq!(config(40.0, 410.0, 0).visible_count(), 11);
        assert_eq!(config(40.0, 0.0, 0).visible_count(), 0);
    }

    #[test]
    fn test_negative_and_nan_scroll_treated_as_top() {
        let cfg = config(40.0, 400.0, 5);
        assert_eq!(compute_window(&cfg, -300.0, 100), compute_window(&cfg, 0.0, 100));
        assert_eq!(compute_window(&cfg, f64::NAN, 100), compute_window(&cfg, 0.0, 100));
    }

    #[test]
    fn test_slice_matches_indices() {
        let items: Vec<usize> = (0..1000).collect();
        let range = compute_window(&config(40.0, 400.0, 5), 2000.0, items.len());
        let slice = range.slice(&items);

        assert_eq!(slice.first(), Some(&45));
        assert_eq!(slice.last(), Some(&65));
    }

    #[test]
    fn test_slice_tolerates_shorter_sequence() {
        let range = compute_window(&config(40.0, 400.0, 5), 2000.0, 1000);
        let items: Vec<usize> = (0..50).collect();
        assert_eq!(range.slice(&items), &items[45..50]);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        assert!(WindowConfig::new(0.0, 400.0).is_err());
        assert!(WindowConfig::new(-1.0, 400.0).is_err());
        assert!(WindowConfig::new(f64::NAN, 400.0).is_err());
        assert!(WindowConfig::new(40.0, -1.0).is_err());
        assert!(WindowConfig::new(40.0, f64::INFINITY).is_err());
        assert!(WindowConfig::new(40.0, 0.0).is_ok());
    }

    #[test]
    fn test_default_overscan() {
        assert_eq!(WindowConfig::new(40.0, 400.0).unwrap().overscan(), 5);
    }
}
