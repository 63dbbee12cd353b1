pub mod logging;
pub mod sortable_list;
