use std::time::{Duration, Instant};

use crate::item::{ConfigurationError, SortableItem, validate_items};
use crate::order::{DisplayOrder, ItemMove, ReorderState};
use crate::region::{DragRegion, HOVER_THROTTLE};

/// One drag gesture, tied to the setup it started in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragToken {
    generation: u64,
    logical: usize,
}

impl DragToken {
    #[inline]
    pub fn logical(&self) -> usize {
        self.logical
    }
}

/// Items plus drag bookkeeping for one sortable list, independent of any window.
///
/// The gpui shell forwards platform events here:
/// - [`begin_drag`](Self::begin_drag) when the platform starts a drag, then
///   [`flush_start`](Self::flush_start) on the next tick;
/// - [`hover`](Self::hover) for pointer-over events on a row;
/// - [`drop_drag`](Self::drop_drag) on drop and [`release`](Self::release) when the
///   gesture vanished without a drop.
#[derive(Clone, Debug)]
pub struct ListSession<T> {
    items: Vec<SortableItem<T>>,
    reorder: ReorderState,
    regions: Vec<DragRegion>,
    generation: u64,
    hover_throttle: Duration,
    pending_start: Option<DragToken>,
}

impl<T> Default for ListSession<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            reorder: ReorderState::default(),
            regions: Vec::new(),
            generation: 0,
            hover_throttle: HOVER_THROTTLE,
            pending_start: None,
        }
    }
}

impl<T> ListSession<T> {
    pub fn new(items: Vec<SortableItem<T>>) -> Result<Self, ConfigurationError> {
        let mut session = Self::default();
        session.setup(items)?;
        Ok(session)
    }

    /// Replace the items and reset the order. On error nothing changes.
    pub fn setup(&mut self, items: Vec<SortableItem<T>>) -> Result<(), ConfigurationError> {
        validate_items(&items)?;
        self.items = items;
        self.generation = self.generation.wrapping_add(1);
        self.pending_start = None;
        self.reorder.setup(self.items.len());
        self.rebuild_regions();
        tracing::debug!(
            len = self.items.len(),
            generation = self.generation,
            "sortable list set up"
        );
        Ok(())
    }

    pub fn set_hover_throttle(&mut self, throttle: Duration) {
        self.hover_throttle = throttle;
        self.rebuild_regions();
    }

    fn rebuild_regions(&mut self) {
        let now = Instant::now();
        self.regions = (0..self.items.len())
            .map(|_| DragRegion::with_throttle(now, self.hover_throttle))
            .collect();
    }

    #[inline]
    pub fn items(&self) -> &[SortableItem<T>] {
        &self.items
    }

    #[inline]
    pub fn display_order(&self) -> &DisplayOrder {
        self.reorder.display_order()
    }

    pub fn ordered_items(&self) -> impl Iterator<Item = &SortableItem<T>> + '_ {
        self.reorder
            .display_order()
            .iter()
            .filter_map(|&ix| self.items.get(ix))
    }

    #[inline]
    pub fn dragging(&self) -> Option<usize> {
        self.reorder.dragging()
    }

    #[inline]
    pub fn is_dragging(&self, logical: usize) -> bool {
        self.reorder.is_dragging(logical)
    }

    pub fn drag_token(&self, logical: usize) -> DragToken {
        DragToken {
            generation: self.generation,
            logical,
        }
    }

    /// Queue a drag start. It only takes effect in [`flush_start`](Self::flush_start).
    pub fn begin_drag(&mut self, token: DragToken) -> bool {
        if token.generation != self.generation {
            tracing::trace!(
                logical = token.logical,
                "drag begin from previous setup ignored"
            );
            return false;
        }
        self.pending_start = Some(token);
        true
    }

    /// Apply the queued start, provided the platform drag is still running.
    pub fn flush_start(&mut self, drag_active: bool) -> bool {
        let Some(token) = self.pending_start.take() else {
            return false;
        };
        if !drag_active {
            tracing::trace!(
                logical = token.logical,
                "drag start arrived after drag ended"
            );
            return false;
        }
        if token.generation != self.generation {
            return false;
        }
        self.reorder.start_drag(token.logical)
    }

    /// Pointer over row `logical`. Returns `true` when the display order changed.
    pub fn hover(
        &mut self,
        logical: usize,
        now: Instant,
        cursor_y: f32,
        top: f32,
        bottom: f32,
    ) -> bool {
        let Some(region) = self.regions.get_mut(logical) else {
            return false;
        };
        let Some(side) = region.hover(now, cursor_y, top, bottom) else {
            return false;
        };
        self.reorder.hover(logical, side).is_reordered()
    }

    /// The gesture identified by `token` was dropped.
    pub fn drop_drag(&mut self, token: DragToken) -> Option<ItemMove> {
        if token.generation != self.generation {
            tracing::trace!(logical = token.logical, "drop from previous setup ignored");
            return None;
        }
        if self.pending_start == Some(token) {
            self.pending_start = None;
        }
        if self.reorder.dragging() != Some(token.logical) {
            tracing::trace!(logical = token.logical, "drop for unrecorded drag ignored");
            return None;
        }
        self.reorder.end_drag()
    }

    /// The platform drag is gone without a drop reaching the list.
    pub fn release(&mut self, drag_active: bool) -> Option<ItemMove> {
        if drag_active {
            return None;
        }
        self.reorder.dragging()?;
        self.reorder.end_drag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[&'static str]) -> Vec<SortableItem<()>> {
        ids.iter().map(|id| SortableItem::new(*id, *id, ())).collect()
    }

    fn session(ids: &[&'static str]) -> ListSession<()> {
        let mut session = ListSession::new(items(ids)).unwrap();
        session.set_hover_throttle(Duration::ZERO);
        session
    }

    fn ids(session: &ListSession<()>) -> Vec<String> {
        session.items().iter().map(|item| item.id.to_string()).collect()
    }

    /// Rows are 20px tall, stacked from y = 0.
    fn hover_lower_half(session: &mut ListSession<()>, logical: usize) -> bool {
        let top = logical as f32 * 20.;
        session.hover(logical, Instant::now(), top + 15., top, top + 20.)
    }

    fn start(session: &mut ListSession<()>, logical: usize) -> DragToken {
        let token = session.drag_token(logical);
        assert!(session.begin_drag(token));
        assert!(session.flush_start(true));
        token
    }

    #[test]
    fn rejected_setup_keeps_items_order_and_drag() {
        let mut session = session(&["a", "b", "c"]);
        start(&mut session, 0);
        assert!(hover_lower_half(&mut session, 2));
        assert_eq!(session.display_order().to_vec(), vec![1, 2, 0]);

        let err = session.setup(items(&["x", "y", "x"]));
        assert!(matches!(err, Err(ConfigurationError::DuplicateId { .. })));

        assert_eq!(ids(&session), vec!["a", "b", "c"]);
        assert_eq!(session.display_order().to_vec(), vec![1, 2, 0]);
        assert_eq!(session.dragging(), Some(0));
    }

    #[test]
    fn rejected_first_setup_establishes_no_order() {
        assert!(ListSession::new(items(&["a", "a"])).is_err());

        let mut session = ListSession::<()>::default();
        assert!(session.setup(items(&["a", "a"])).is_err());
        assert!(session.items().is_empty());
        assert!(session.display_order().is_empty());
    }

    #[test]
    fn start_is_not_applied_until_flushed() {
        let mut session = session(&["a", "b", "c"]);
        let token = session.drag_token(1);
        assert!(session.begin_drag(token));
        assert_eq!(session.dragging(), None);

        assert!(session.flush_start(true));
        assert_eq!(session.dragging(), Some(1));
    }

    #[test]
    fn one_move_per_completed_drag() {
        let mut session = session(&["a", "b", "c"]);
        let token = start(&mut session, 0);
        hover_lower_half(&mut session, 2);

        assert_eq!(session.drop_drag(token), Some(ItemMove { from: 0, to: 2 }));
        // A second drop listener for the same gesture, then the render-time check.
        assert_eq!(session.drop_drag(token), None);
        assert_eq!(session.release(false), None);
        assert!(session.display_order().is_identity());
    }

    #[test]
    fn drag_ending_before_deferred_start_emits_nothing() {
        let mut session = session(&["a", "b", "c"]);
        let token = session.drag_token(2);
        session.begin_drag(token);

        assert_eq!(session.drop_drag(token), None);
        assert!(!session.flush_start(false));
        assert_eq!(session.release(false), None);
        assert_eq!(session.dragging(), None);
    }

    #[test]
    fn deferred_start_after_gesture_ended_is_ignored() {
        let mut session = session(&["a", "b"]);
        session.begin_drag(session.drag_token(0));
        assert!(!session.flush_start(false));
        assert_eq!(session.dragging(), None);
    }

    #[test]
    fn drop_from_previous_setup_is_ignored() {
        let mut session = session(&["a", "b", "c"]);
        let old = start(&mut session, 0);
        hover_lower_half(&mut session, 1);

        session.setup(items(&["a", "b", "c"])).unwrap();
        assert_eq!(session.drop_drag(old), None);
        assert_eq!(session.release(false), None);
        assert!(!session.begin_drag(old));
    }

    #[test]
    fn drop_for_other_row_than_recorded_is_ignored() {
        let mut session = session(&["a", "b", "c"]);
        start(&mut session, 1);
        assert_eq!(session.drop_drag(session.drag_token(0)), None);
        assert_eq!(session.dragging(), Some(1));
    }

    #[test]
    fn release_outside_list_finishes_drag() {
        let mut session = session(&["a", "b", "c"]);
        start(&mut session, 2);
        session.hover(0, Instant::now(), 2., 0., 20.);
        assert_eq!(session.display_order().to_vec(), vec![2, 0, 1]);

        assert_eq!(session.release(true), None);
        assert_eq!(session.release(false), Some(ItemMove { from: 2, to: 0 }));
        assert_eq!(session.dragging(), None);
    }

    #[test]
    fn hover_respects_region_throttle() {
        let mut session = ListSession::new(items(&["a", "b", "c"])).unwrap();
        let t0 = Instant::now();
        session.set_hover_throttle(Duration::from_secs(3600));
        start(&mut session, 0);
        assert!(!session.hover(2, t0, 55., 40., 60.));
        assert_eq!(session.display_order().to_vec(), vec![0, 1, 2]);
    }
}
