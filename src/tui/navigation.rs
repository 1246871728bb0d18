use crate::wizard::WizardStage;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    MovePrev,
    MoveNext,
    Enter,
    Back,
    Cancel,
    Add,
    Delete,
    Edit,
    Toggle,
    Save,
}

/// Key mapping for the wizard screens. Esc retreats except on the first
/// step, where it cancels the whole wizard.
pub fn ui_action_from_key(stage: WizardStage, key: KeyEvent) -> Option<UiAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UiAction::Cancel);
    }
    match key.code {
        KeyCode::Up => Some(UiAction::MovePrev),
        KeyCode::Down => Some(UiAction::MoveNext),
        KeyCode::Esc => Some(if stage == WizardStage::SelectAgentType {
            UiAction::Cancel
        } else {
            UiAction::Back
        }),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(UiAction::Enter),
        KeyCode::Char('a') => Some(UiAction::Add),
        KeyCode::Char('d') => Some(UiAction::Delete),
        KeyCode::Char('e') => Some(UiAction::Edit),
        KeyCode::Char('t') => Some(UiAction::Toggle),
        KeyCode::Char('s') => Some(UiAction::Save),
        _ => None,
    }
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}
