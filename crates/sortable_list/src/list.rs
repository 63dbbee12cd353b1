use std::{
    ops::Range,
    rc::Rc,
    time::{Duration, Instant},
};

use gpui::{
    App, AppContext as _, Context, CursorStyle, DragMoveEvent, ElementId, Entity, EntityId,
    EventEmitter, FocusHandle, InteractiveElement as _, IntoElement, ListSizingBehavior,
    ParentElement as _, Pixels, Point, Render, RenderOnce, SharedString,
    StatefulInteractiveElement as _, StyleRefinement, Styled, UniformListScrollHandle, Window, div,
    prelude::FluentBuilder as _, px, uniform_list,
};
use gpui_component::list::ListItem;
use gpui_component::scroll::{Scrollbar, ScrollbarState};
use gpui_component::{ActiveTheme as _, StyledExt as _};

use crate::item::{ConfigurationError, SortableItem};
use crate::order::{DisplayOrder, ItemMove};
use crate::region::drag_opacity;
use crate::session::{DragToken, ListSession};

const CONTEXT: &str = "SortableList";

type RenderItem<T> =
    Rc<dyn Fn(usize, &SortableItem<T>, SortableRowState, &mut Window, &mut App) -> ListItem>;

/// Create a [`SortableList`].
pub fn sortable_list<T, R>(
    state: &Entity<SortableListState<T>>,
    render_item: R,
) -> SortableList<T>
where
    T: 'static,
    R: Fn(usize, &SortableItem<T>, SortableRowState, &mut Window, &mut App) -> ListItem + 'static,
{
    SortableList::new(state, render_item)
}

#[derive(Clone)]
struct SortableDrag {
    list_id: EntityId,
    token: DragToken,
    label: SharedString,
}

struct DragGhost {
    label: SharedString,
}

impl DragGhost {
    fn new(label: SharedString) -> Self {
        Self { label }
    }
}

impl Render for DragGhost {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        div()
            .px(px(10.))
            .py(px(6.))
            .rounded(px(8.))
            .bg(theme.popover)
            .border_1()
            .border_color(theme.border)
            .shadow_md()
            .text_color(theme.popover_foreground)
            .text_sm()
            .child(self.label.clone())
    }
}

/// What the row delegate needs to know about the row it renders.
#[derive(Clone, Copy, Debug, Default)]
pub struct SortableRowState {
    /// This row is the one being dragged. The list already hides it.
    pub dragging: bool,
    /// Current physical position, which moves live during a drag.
    pub position: usize,
}

/// State for a list whose rows can be reordered by dragging.
///
/// The list never reorders `items` itself. Once a drag completes it emits an
/// [`ItemMove`] and goes back to showing `items` in their given order; the owner
/// applies the move and hands the new sequence back through [`set_items`](Self::set_items).
pub struct SortableListState<T> {
    focus_handle: FocusHandle,
    session: ListSession<T>,
    scrollbar_state: ScrollbarState,
    scroll_handle: UniformListScrollHandle,
    drag_handle_width: Option<Pixels>,
    render_item: RenderItem<T>,
}

impl<T: 'static> EventEmitter<ItemMove> for SortableListState<T> {}

impl<T: 'static> SortableListState<T> {
    pub fn new(cx: &mut App) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            session: ListSession::default(),
            scrollbar_state: ScrollbarState::default(),
            scroll_handle: UniformListScrollHandle::default(),
            drag_handle_width: Some(px(32.)),
            render_item: Rc::new(|_, _, _, _, _| ListItem::new("sortable-list-empty")),
        }
    }

    pub fn items(
        mut self,
        items: impl Into<Vec<SortableItem<T>>>,
    ) -> Result<Self, ConfigurationError> {
        self.session.setup(items.into())?;
        Ok(self)
    }

    /// Minimum time between two accepted hovers on the same row.
    pub fn hover_throttle(mut self, throttle: Duration) -> Self {
        self.session.set_hover_throttle(throttle);
        self
    }

    /// Restrict drag start to a left-side handle area with the given width.
    ///
    /// This generally results in a better drag ghost alignment than whole-row dragging.
    pub fn drag_handle_width(mut self, width: Pixels) -> Self {
        self.drag_handle_width = Some(width);
        self
    }

    /// Allow dragging from anywhere on the row.
    pub fn drag_on_row(mut self) -> Self {
        self.drag_handle_width = None;
        self
    }

    /// Replace the items, discarding any drag in progress.
    pub fn set_items(
        &mut self,
        items: impl Into<Vec<SortableItem<T>>>,
        cx: &mut Context<Self>,
    ) -> Result<(), ConfigurationError> {
        self.session.setup(items.into())?;
        cx.notify();
        Ok(())
    }

    pub fn items_ref(&self) -> &[SortableItem<T>] {
        self.session.items()
    }

    pub fn display_order(&self) -> &DisplayOrder {
        self.session.display_order()
    }

    /// Items in the order they are currently shown.
    pub fn ordered_items(&self) -> impl Iterator<Item = &SortableItem<T>> + '_ {
        self.session.ordered_items()
    }

    pub fn dragging_index(&self) -> Option<usize> {
        self.session.dragging()
    }

    fn emit_move(&mut self, item_move: Option<ItemMove>, cx: &mut Context<Self>) {
        let Some(item_move) = item_move else {
            return;
        };
        cx.emit(item_move);
        cx.notify();
    }

    fn on_drag_begin(&mut self, drag: &SortableDrag, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        self.session.begin_drag(drag.token);
    }

    fn on_deferred_drag_start(&mut self, cx: &mut Context<Self>) {
        if self.session.flush_start(cx.has_active_drag()) {
            cx.notify();
        }
    }

    fn on_row_drag_move(
        &mut self,
        logical: usize,
        event: &DragMoveEvent<SortableDrag>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !cx.has_active_drag() {
            return;
        }

        let drag = event.drag(cx);
        if drag.list_id != cx.entity_id() {
            return;
        }

        let mouse_position = event.event.position;
        if !event.bounds.contains(&mouse_position) {
            return;
        }

        let reordered = self.session.hover(
            logical,
            Instant::now(),
            f32::from(mouse_position.y),
            f32::from(event.bounds.top()),
            f32::from(event.bounds.bottom()),
        );
        if reordered {
            cx.notify();
        }
    }

    fn on_drop(&mut self, drag: &SortableDrag, _window: &mut Window, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        let item_move = self.session.drop_drag(drag.token);
        self.emit_move(item_move, cx);
    }
}

impl<T: 'static> Render for SortableListState<T> {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // Released outside of any row: no drop listener fired.
        let item_move = self.session.release(cx.has_active_drag());
        self.emit_move(item_move, cx);

        let render_item = Rc::clone(&self.render_item);
        let state_entity = cx.entity();
        let drag_handle_width = self.drag_handle_width;
        let list_id = cx.entity_id();

        div()
            .id("sortable-list-state")
            .size_full()
            .relative()
            .child(
                uniform_list("items", self.session.items().len(), {
                    cx.processor(move |state, visible_range: Range<usize>, window, cx| {
                        let mut rows = Vec::with_capacity(visible_range.len());
                        for position in visible_range {
                            let Some(&logical) = state.session.display_order().get(position)
                            else {
                                continue;
                            };
                            let Some(item) = state.session.items().get(logical) else {
                                continue;
                            };

                            let dragging = state.session.is_dragging(logical);
                            let opacity = drag_opacity(dragging);
                            let row_state = SortableRowState { dragging, position };

                            let list_item = (render_item)(logical, item, row_state, window, cx);
                            let drag_value = SortableDrag {
                                list_id,
                                token: state.session.drag_token(logical),
                                label: item.label.clone(),
                            };

                            let state_entity = state_entity.clone();
                            let start_drag = move |drag: &SortableDrag,
                                                   _offset: Point<Pixels>,
                                                   _window: &mut Window,
                                                   cx: &mut App| {
                                state_entity.update(cx, |state, cx| {
                                    state.on_drag_begin(drag, cx);
                                });
                                let state_entity = state_entity.clone();
                                // Wait a tick so hiding the row does not leak into the ghost.
                                cx.defer(move |cx| {
                                    state_entity.update(cx, |state, cx| {
                                        state.on_deferred_drag_start(cx);
                                    });
                                });
                                let label = drag.label.clone();
                                cx.new(|_| DragGhost::new(label))
                            };

                            let row = div()
                                .id(ElementId::from(item.id.clone()))
                                .relative()
                                .when_some(opacity, |this, opacity| this.opacity(opacity))
                                .child(list_item)
                                .on_drag_move::<SortableDrag>(cx.listener(
                                    move |this, event: &DragMoveEvent<SortableDrag>, window, cx| {
                                        this.on_row_drag_move(logical, event, window, cx);
                                    },
                                ))
                                .on_drop::<SortableDrag>(cx.listener(Self::on_drop))
                                .map(|this| match drag_handle_width {
                                    Some(handle_width) => this.child(
                                        div()
                                            .id(("sortable-list-handle", logical))
                                            .absolute()
                                            .top_0()
                                            .left_0()
                                            .bottom_0()
                                            .w(handle_width)
                                            .cursor(CursorStyle::OpenHand)
                                            .on_drag(drag_value, start_drag),
                                    ),
                                    None => this.on_drag(drag_value, start_drag),
                                });

                            rows.push(row);
                        }
                        rows
                    })
                })
                .on_drop::<SortableDrag>(cx.listener(Self::on_drop))
                .flex_grow()
                .size_full()
                .track_scroll(self.scroll_handle.clone())
                .with_sizing_behavior(ListSizingBehavior::Auto)
                .into_any_element(),
            )
            .child(
                div()
                    .absolute()
                    .top_0()
                    .right_0()
                    .bottom_0()
                    .w(px(12.))
                    .child(Scrollbar::uniform_scroll(
                        &self.scrollbar_state,
                        &self.scroll_handle,
                    )),
            )
    }
}

/// A list element whose rows can be reordered by dragging.
#[derive(IntoElement)]
pub struct SortableList<T: 'static> {
    id: ElementId,
    state: Entity<SortableListState<T>>,
    style: StyleRefinement,
    render_item: RenderItem<T>,
}

impl<T: 'static> SortableList<T> {
    pub fn new<R>(state: &Entity<SortableListState<T>>, render_item: R) -> Self
    where
        R: Fn(usize, &SortableItem<T>, SortableRowState, &mut Window, &mut App) -> ListItem
            + 'static,
    {
        Self {
            id: ElementId::Name(format!("sortable-list-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_item: Rc::new(render_item),
        }
    }
}

impl<T: 'static> Styled for SortableList<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: 'static> RenderOnce for SortableList<T> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        self.state
            .update(cx, |state, _| state.render_item = self.render_item);

        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .size_full()
            .child(self.state)
            .refine_style(&self.style)
    }
}
