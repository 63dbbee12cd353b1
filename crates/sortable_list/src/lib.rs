mod item;
mod list;
mod order;
mod region;
mod session;

pub use item::{ConfigurationError, SortableItem, validate_items};
pub use list::{SortableList, SortableListState, SortableRowState, sortable_list};
pub use order::{DisplayOrder, DragPhase, HoverOutcome, HoverSide, ItemMove, ReorderState};
pub use region::{DragRegion, HOVER_THROTTLE, drag_opacity, hover_side};
pub use session::{DragToken, ListSession};
