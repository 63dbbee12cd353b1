use std::time::{Duration, Instant};

use crate::order::HoverSide;

/// Minimum spacing between two accepted hover signals on the same row.
pub const HOVER_THROTTLE: Duration = Duration::from_millis(100);

/// Classify the cursor against the vertical midpoint of a row.
///
/// Exactly at the midpoint counts as below, which also covers zero-height rows.
pub fn hover_side(cursor_y: f32, top: f32, bottom: f32) -> HoverSide {
    let midpoint = (top + bottom) / 2.;
    if cursor_y < midpoint {
        HoverSide::Above
    } else {
        HoverSide::Below
    }
}

/// Opacity override for a row: fully transparent while it is being dragged.
pub fn drag_opacity(is_dragging: bool) -> Option<f32> {
    is_dragging.then_some(0.)
}

/// Per-row pointer bookkeeping.
///
/// A region never touches the list order; it only turns pointer-over events into
/// throttled [`HoverSide`]s.
#[derive(Clone, Debug)]
pub struct DragRegion {
    last_hover: Instant,
    throttle: Duration,
}

impl DragRegion {
    pub fn new(created_at: Instant) -> Self {
        Self::with_throttle(created_at, HOVER_THROTTLE)
    }

    pub fn with_throttle(created_at: Instant, throttle: Duration) -> Self {
        Self {
            last_hover: created_at,
            throttle,
        }
    }

    /// Feed a pointer-over event. Returns `None` while inside the throttle window.
    pub fn hover(
        &mut self,
        now: Instant,
        cursor_y: f32,
        top: f32,
        bottom: f32,
    ) -> Option<HoverSide> {
        if now.saturating_duration_since(self.last_hover) < self.throttle {
            return None;
        }
        self.last_hover = now;
        Some(hover_side(cursor_y, top, bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn midpoint_split() {
        assert_eq!(hover_side(10., 0., 40.), HoverSide::Above);
        assert_eq!(hover_side(19.9, 0., 40.), HoverSide::Above);
        assert_eq!(hover_side(20., 0., 40.), HoverSide::Below);
        assert_eq!(hover_side(35., 0., 40.), HoverSide::Below);
    }

    #[test]
    fn zero_height_counts_as_below() {
        assert_eq!(hover_side(12., 12., 12.), HoverSide::Below);
    }

    #[test]
    fn throttle_drops_events_inside_window() {
        let t0 = Instant::now();
        let mut region = DragRegion::new(t0);

        assert_eq!(region.hover(t0 + ms(50), 0., 0., 10.), None);
        assert_eq!(region.hover(t0 + ms(100), 0., 0., 10.), Some(HoverSide::Above));
        assert_eq!(region.hover(t0 + ms(150), 9., 0., 10.), None);
        assert_eq!(region.hover(t0 + ms(200), 9., 0., 10.), Some(HoverSide::Below));
    }

    #[test]
    fn dropped_events_do_not_extend_window() {
        let t0 = Instant::now();
        let mut region = DragRegion::with_throttle(t0, ms(100));
        assert!(region.hover(t0 + ms(120), 0., 0., 10.).is_some());
        assert!(region.hover(t0 + ms(190), 0., 0., 10.).is_none());
        assert!(region.hover(t0 + ms(220), 0., 0., 10.).is_some());
    }

    #[test]
    fn opacity_only_while_dragging() {
        assert_eq!(drag_opacity(true), Some(0.));
        assert_eq!(drag_opacity(false), None);
    }
}
