pub mod navigation;
pub mod runner;
pub mod screens;

pub use navigation::{clamp_selection, ui_action_from_key, UiAction};
pub use runner::run_wizard;
pub use screens::{
    agent_type_items, architecture_items, configure_rows, framework_items, review_rows,
    tail_for_display, tool_list_items, tool_rows, FieldRow,
};
