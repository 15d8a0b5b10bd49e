use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_core::modal::ModalKind;

use crate::app::App;
use crate::scroll::WHEEL_NOTCH;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    OpenAddUser,
    OpenAddTask,
    OpenImagePreview,
    CloseModal,
    /// Scroll the deck through the wheel path by this delta
    Scroll(f64),
    Confirm,
    Cancel,
    NextField,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    // Handle form input inside add-user and add-task
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    if app.top_modal() == Some(ModalKind::ImagePreview) {
        return handle_preview_mode(key);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::OpenAddUser,
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::OpenAddTask,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::OpenImagePreview,
        (KeyCode::Esc, _) => Action::CloseModal,
        (KeyCode::Down, _) | (KeyCode::Right, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
            Action::Scroll(WHEEL_NOTCH)
        }
        (KeyCode::Up, _) | (KeyCode::Left, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
            Action::Scroll(-WHEEL_NOTCH)
        }
        (KeyCode::PageDown, _) => Action::Scroll(WHEEL_NOTCH * 4.0),
        (KeyCode::PageUp, _) => Action::Scroll(-WHEEL_NOTCH * 4.0),
        _ => Action::None,
    }
}

fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Cancel,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Tab => Action::NextField,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

fn handle_preview_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Action::CloseModal,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use taskdeck_core::AppConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_keys() {
        let app = App::new(Arc::new(AppConfig::default()));
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('a')), &app), Action::OpenAddUser);
        assert_eq!(
            handle_key_event(key(KeyCode::Down), &app),
            Action::Scroll(WHEEL_NOTCH)
        );
    }

    #[test]
    fn test_form_captures_characters() {
        let mut app = App::new(Arc::new(AppConfig::default()));
        app.open_add_user();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::Cancel);
    }

    #[test]
    fn test_preview_closes_on_q() {
        let mut app = App::new(Arc::new(AppConfig::default()));
        app.open_image_preview();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::CloseModal);
    }
}
