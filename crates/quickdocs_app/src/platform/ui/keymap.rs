use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Submit,
    Insert(char),
    Backspace,
    ClearInput,
    ScrollUp,
    ScrollDown,
}

pub fn resolve(ev: KeyEvent) -> KeyAction {
    match (ev.modifiers, ev.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
            KeyAction::Quit
        }
        (_, KeyCode::Enter) => KeyAction::Submit,
        (_, KeyCode::Backspace) => KeyAction::Backspace,
        (_, KeyCode::Esc) => KeyAction::ClearInput,
        (_, KeyCode::PageUp) => KeyAction::ScrollUp,
        (_, KeyCode::PageDown) => KeyAction::ScrollDown,
        (KeyModifiers::NONE, KeyCode::Char(ch)) | (KeyModifiers::SHIFT, KeyCode::Char(ch)) => {
            KeyAction::Insert(ch)
        }
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_types() {
        assert_eq!(
            resolve(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(
            resolve(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            KeyAction::Insert('c')
        );
        assert_eq!(
            resolve(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            KeyAction::Insert('Q')
        );
    }

    #[test]
    fn editing_and_scroll_keys() {
        assert_eq!(resolve(key(KeyCode::Enter, KeyModifiers::NONE)), KeyAction::Submit);
        assert_eq!(resolve(key(KeyCode::Esc, KeyModifiers::NONE)), KeyAction::ClearInput);
        assert_eq!(resolve(key(KeyCode::PageUp, KeyModifiers::NONE)), KeyAction::ScrollUp);
        assert_eq!(resolve(key(KeyCode::F(5), KeyModifiers::NONE)), KeyAction::None);
    }
}
