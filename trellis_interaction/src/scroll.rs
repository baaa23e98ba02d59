// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll offset math for bringing an item into view.

use kurbo::{Rect, Vec2};

fn nearest_axis(view_start: f64, view_extent: f64, start: f64, end: f64) -> f64 {
    let view_end = view_start + view_extent;
    let offset = if start >= view_start && end <= view_end {
        view_start
    } else if start < view_start {
        start
    } else {
        end - view_extent
    };
    offset.max(0.0)
}

/// The scroll offset that brings `target` fully into `viewport` by the smallest move.
///
/// `viewport` is the visible region in content coordinates, so its origin is the current scroll
/// offset; `target` is the item's bounds in the same space. A target that is already visible
/// leaves the offset unchanged.
pub fn scroll_into_view(viewport: Rect, target: Rect) -> Vec2 {
    Vec2::new(
        nearest_axis(viewport.x0, viewport.width(), target.x0, target.x1),
        nearest_axis(viewport.y0, viewport.height(), target.y0, target.y1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_items_stay_in_place() {
        let view = Rect::new(0.0, 100.0, 200.0, 200.0);
        let item = Rect::new(0.0, 120.0, 200.0, 140.0);
        assert_eq!(scroll_into_view(view, item), Vec2::new(0.0, 100.0));
    }

    #[test]
    fn scrolls_by_the_smallest_amount() {
        let view = Rect::new(0.0, 100.0, 200.0, 200.0);

        let above = Rect::new(0.0, 80.0, 200.0, 100.0);
        assert_eq!(scroll_into_view(view, above).y, 80.0);

        let below = Rect::new(0.0, 210.0, 200.0, 230.0);
        assert_eq!(scroll_into_view(view, below).y, 130.0);
    }

    #[test]
    fn horizontal_axis_and_clamping() {
        let view = Rect::new(50.0, 0.0, 150.0, 30.0);
        let right = Rect::new(160.0, 0.0, 190.0, 10.0);
        assert_eq!(scroll_into_view(view, right), Vec2::new(90.0, 0.0));

        // An item taller than the viewport aligns its top, and never before the content start.
        let tall = Rect::new(50.0, -10.0, 150.0, 60.0);
        assert_eq!(scroll_into_view(view, tall).y, 0.0);
    }
}
