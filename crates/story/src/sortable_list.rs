use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::list::ListItem;
use gpui_component::{Icon, IconName, Sizable as _, h_flex, v_flex};
use gpui_sortable_list::{
    ItemMove, SortableItem, SortableListState, SortableRowState, sortable_list,
};

pub struct SortableListExample {
    list: Entity<SortableListState<()>>,
    last_move: Option<ItemMove>,
    _subscription: Subscription,
}

impl SortableListExample {
    pub fn view(_window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| {
            let list = cx.new(|cx| {
                let mut state = SortableListState::new(cx).drag_on_row();
                if let Err(err) = state.set_items(demo_items(), cx) {
                    tracing::error!(%err, "demo items rejected");
                }
                state
            });
            let subscription = cx.subscribe(&list, Self::on_item_move);

            Self {
                list,
                last_move: None,
                _subscription: subscription,
            }
        })
    }

    fn on_item_move(
        &mut self,
        list: Entity<SortableListState<()>>,
        item_move: &ItemMove,
        cx: &mut Context<Self>,
    ) {
        tracing::info!(from = item_move.from, to = item_move.to, "item moved");
        self.last_move = Some(*item_move);

        let mut items = list.read(cx).items_ref().to_vec();
        item_move.apply(&mut items);
        let result = list.update(cx, |state, cx| state.set_items(items, cx));
        if let Err(err) = result {
            tracing::error!(%err, "reordered items rejected");
        }
        cx.notify();
    }
}

impl Render for SortableListExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let list = self.list.read(cx);
        let dump = list
            .ordered_items()
            .enumerate()
            .map(|(ix, item)| format!("{ix:02}  {}", item.id))
            .collect::<Vec<_>>()
            .join("\n");
        let last_move = self
            .last_move
            .map(|m| format!("Last move: {} -> {}", m.from, m.to))
            .unwrap_or_else(|| "Last move: <none>".to_string());

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Sortable List"),
                    )
                    .child(div().text_sm().text_color(theme.muted_foreground).child(
                        "Drag a row over the upper or lower half of another row to move it above or below.",
                    ))
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.muted_foreground)
                            .child(last_move),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(
                        v_flex()
                            .w(px(420.))
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("List"),
                            )
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .child(sortable_list(
                                        &self.list,
                                        move |ix, item, row_state, _window, cx| {
                                            render_list_row(ix, item, row_state, cx)
                                        },
                                    )),
                            ),
                    )
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("Display order"),
                            )
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .p(px(12.))
                                    .child(render_dump(dump)),
                            ),
                    ),
            )
    }
}

fn render_list_row(
    ix: usize,
    item: &SortableItem<()>,
    row_state: SortableRowState,
    cx: &mut App,
) -> ListItem {
    let theme = cx.theme();

    ListItem::new(ix)
        .when(row_state.position % 2 == 1, |this| {
            this.bg(theme.muted.alpha(0.3))
        })
        .child(
            h_flex()
                .gap_x_2()
                .items_center()
                .child(
                    Icon::from(IconName::Menu)
                        .small()
                        .text_color(theme.muted_foreground),
                )
                .child(
                    Icon::from(IconName::File)
                        .small()
                        .text_color(theme.muted_foreground),
                )
                .child(item.label.clone()),
        )
}

fn render_dump(text: String) -> impl IntoElement {
    let lines = text
        .lines()
        .map(|line| div().text_sm().child(line.to_string()));
    v_flex().gap_y_0p5().children(lines)
}

fn demo_items() -> Vec<SortableItem<()>> {
    vec![
        SortableItem::new("file/a.txt", "a.txt", ()),
        SortableItem::new("file/b.txt", "b.txt", ()),
        SortableItem::new("file/c.txt", "c.txt", ()),
        SortableItem::new("file/d.txt", "d.txt", ()),
        SortableItem::new("file/e.txt", "e.txt", ()),
        SortableItem::new("file/f.txt", "f.txt", ()),
        SortableItem::new("file/g.txt", "g.txt", ()),
    ]
}
