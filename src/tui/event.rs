use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, FormField, Mode};

/// Result of handling a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit,
    OpenEditor,
    ToggleCompleted,
    Delete,
    Refresh,
    Continue,
}

/// Handle a key press. Returns an action indicating what the event loop should do.
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    if app.form.is_some() {
        return handle_form(app, key);
    }

    match app.mode {
        Mode::Help => {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc
            ) {
                app.toggle_help();
            }
            KeyAction::Continue
        }
        Mode::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Delete,
            _ => {
                app.cancel_delete();
                KeyAction::Continue
            }
        },
        Mode::Normal => handle_normal(app, key),
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            KeyAction::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            KeyAction::Continue
        }
        KeyCode::Char('a') => {
            app.enter_add_mode();
            KeyAction::Continue
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.enter_edit_mode();
            KeyAction::Continue
        }
        KeyCode::Char('x') | KeyCode::Char(' ') => KeyAction::ToggleCompleted,
        KeyCode::Char('d') => {
            app.request_delete();
            KeyAction::Continue
        }
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('?') => {
            app.toggle_help();
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

fn handle_form(app: &mut App, key: KeyEvent) -> KeyAction {
    let Some(form) = app.form.as_mut() else {
        return KeyAction::Continue;
    };
    match key.code {
        KeyCode::Esc => {
            app.cancel_form();
            KeyAction::Continue
        }
        KeyCode::Tab => {
            form.next_field();
            KeyAction::Continue
        }
        KeyCode::BackTab => {
            form.prev_field();
            KeyAction::Continue
        }
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Backspace => {
            form.focused_buf_mut().pop();
            form.error = None;
            KeyAction::Continue
        }
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            match c {
                'e' if form.focused == FormField::Description => return KeyAction::OpenEditor,
                'u' => {
                    form.focused_buf_mut().clear();
                    form.error = None;
                }
                _ => {}
            }
            KeyAction::Continue
        }
        KeyCode::Char(c) => {
            form.push_char(c);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}
