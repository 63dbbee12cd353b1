use std::ops::Deref;

/// Which half of a sibling row the cursor is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverSide {
    Above,
    Below,
}

impl HoverSide {
    #[inline]
    fn offset(self) -> usize {
        match self {
            HoverSide::Above => 0,
            HoverSide::Below => 1,
        }
    }
}

/// The item currently mid-drag, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(usize),
}

/// A committed move, reported once per completed drag.
///
/// `from` is the logical index of the dragged item, `to` is the physical
/// position it occupied when the drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemMove {
    pub from: usize,
    pub to: usize,
}

impl ItemMove {
    /// Apply the move to an owner-side sequence laid out by logical index.
    ///
    /// The result matches the display order that was visible when the drag ended.
    /// Out-of-range moves leave `items` untouched.
    pub fn apply<T>(&self, items: &mut Vec<T>) {
        if self.from >= items.len() || self.to >= items.len() {
            return;
        }
        if self.from != self.to {
            let item = items.remove(self.from);
            items.insert(self.to, item);
        }
    }
}

/// Result of feeding a hover signal into [`ReorderState::hover`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverOutcome {
    /// The display order changed.
    Reordered,
    /// The signal was valid but the dragged item was already on that side.
    Unchanged,
    /// No drag-start has been recorded.
    NoActiveDrag,
    /// The hovered item is the one being dragged.
    SelfHover,
    /// The hovered index is not part of the current setup.
    UnknownTarget,
}

impl HoverOutcome {
    #[inline]
    pub fn is_reordered(self) -> bool {
        matches!(self, HoverOutcome::Reordered)
    }
}

/// `order[physical] = logical`. Always a permutation of `0..len`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayOrder(Vec<usize>);

impl DisplayOrder {
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Physical position of a logical index.
    pub fn position_of(&self, logical: usize) -> Option<usize> {
        self.0.iter().position(|&ix| ix == logical)
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(pos, &ix)| pos == ix)
    }

    fn move_near(&self, dragged: usize, target: usize, side: HoverSide) -> Option<Self> {
        let mut rest: Vec<usize> = self
            .0
            .iter()
            .copied()
            .filter(|&ix| ix != dragged)
            .collect();
        let pivot = rest.iter().position(|&ix| ix == target)?;
        rest.insert(pivot + side.offset(), dragged);
        Some(Self(rest))
    }
}

impl Deref for DisplayOrder {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

/// Order and drag bookkeeping for a sortable list.
///
/// Rows are identified by the logical index they had at the last [`setup`](Self::setup).
/// While a drag is active the display order is rearranged live so the dragged row
/// follows the cursor; when the drag ends the state drops back to the identity
/// order and the owner is handed an [`ItemMove`] to apply.
#[derive(Clone, Debug, Default)]
pub struct ReorderState {
    order: DisplayOrder,
    phase: DragPhase,
}

impl ReorderState {
    pub fn new(len: usize) -> Self {
        let mut state = Self::default();
        state.setup(len);
        state
    }

    /// Reset to the identity order and drop any in-flight drag.
    pub fn setup(&mut self, len: usize) {
        if let DragPhase::Dragging(ix) = self.phase {
            tracing::debug!(dragging = ix, "setup discarded in-flight drag");
        }
        self.order = DisplayOrder::identity(len);
        self.phase = DragPhase::Idle;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn display_order(&self) -> &DisplayOrder {
        &self.order
    }

    #[inline]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    #[inline]
    pub fn dragging(&self) -> Option<usize> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging(ix) => Some(ix),
        }
    }

    #[inline]
    pub fn is_dragging(&self, logical: usize) -> bool {
        self.phase == DragPhase::Dragging(logical)
    }

    #[inline]
    pub fn position_of(&self, logical: usize) -> Option<usize> {
        self.order.position_of(logical)
    }

    /// Record `logical` as the dragged item. Returns `false` if it is out of range.
    pub fn start_drag(&mut self, logical: usize) -> bool {
        if logical >= self.len() {
            tracing::trace!(
                logical,
                len = self.len(),
                "drag start for unknown item ignored"
            );
            return false;
        }
        tracing::debug!(logical, "drag started");
        self.phase = DragPhase::Dragging(logical);
        true
    }

    /// Place the dragged item on `side` of `target`, relative to the other rows.
    pub fn hover(&mut self, target: usize, side: HoverSide) -> HoverOutcome {
        let DragPhase::Dragging(dragged) = self.phase else {
            tracing::trace!(target, "hover without active drag ignored");
            return HoverOutcome::NoActiveDrag;
        };
        if target == dragged {
            return HoverOutcome::SelfHover;
        }

        let Some(next) = self.order.move_near(dragged, target, side) else {
            tracing::trace!(target, "hover over unknown item ignored");
            return HoverOutcome::UnknownTarget;
        };
        if next == self.order {
            return HoverOutcome::Unchanged;
        }

        tracing::trace!(dragged, target, ?side, order = ?next, "display order updated");
        self.order = next;
        HoverOutcome::Reordered
    }

    /// Finish the current drag, resetting to the baseline order.
    ///
    /// Returns `None` when no drag was recorded. A drag that ends where it started
    /// still yields a move with `from == to`.
    pub fn end_drag(&mut self) -> Option<ItemMove> {
        let DragPhase::Dragging(dragged) = self.phase else {
            tracing::trace!("stale drag end ignored");
            return None;
        };

        let to = self.order.position_of(dragged)?;
        self.phase = DragPhase::Idle;
        self.order = DisplayOrder::identity(self.len());

        let item_move = ItemMove { from: dragged, to };
        tracing::debug!(from = item_move.from, to = item_move.to, "drag ended");
        Some(item_move)
    }
}
