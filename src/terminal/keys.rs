use crossterm::event::{KeyCode as TermKey, ModifierKeyCode};

use eggrs_core::{key_from_name, KeyCode};

/// Code fed for keys without a browser equivalent; it resolves to no symbol
pub const UNKNOWN: KeyCode = KeyCode(0);

/// Convert a crossterm key into the raw code the patterns are written against.
///
/// Letters are case-folded, as a browser reports the same code for `a` and `A`.
pub fn to_key_code(key: TermKey) -> KeyCode {
    let code: u16 = match key {
        TermKey::Char(c) => return char_code(c),
        TermKey::Backspace => 8,
        TermKey::Tab | TermKey::BackTab => 9,
        TermKey::Enter => 13,
        TermKey::Pause => 19,
        TermKey::CapsLock => 20,
        TermKey::Esc => 27,
        TermKey::PageUp => 33,
        TermKey::PageDown => 34,
        TermKey::End => 35,
        TermKey::Home => 36,
        TermKey::Left => 37,
        TermKey::Up => 38,
        TermKey::Right => 39,
        TermKey::Down => 40,
        TermKey::PrintScreen => 44,
        TermKey::Insert => 45,
        TermKey::Delete => 46,
        TermKey::Menu => 93,
        TermKey::F(n @ 1..=12) => 111 + n as u16,
        TermKey::NumLock => 144,
        TermKey::ScrollLock => 145,
        TermKey::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => 16,
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => 17,
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => 18,
            ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper
            | ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta => 91,
            _ => return UNKNOWN,
        },
        _ => return UNKNOWN,
    };
    KeyCode::from(code)
}

fn char_code(c: char) -> KeyCode {
    match c {
        'a'..='z' => KeyCode::from(65 + (c as u16 - 'a' as u16)),
        'A'..='Z' => KeyCode::from(65 + (c as u16 - 'A' as u16)),
        '0'..='9' => KeyCode::from(48 + (c as u16 - '0' as u16)),
        ' ' => KeyCode::from(32),
        ',' => KeyCode::from(188),
        other => key_from_name(&other.to_string()).unwrap_or(UNKNOWN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_fold_case() {
        assert_eq!(to_key_code(TermKey::Char('j')), KeyCode::from(74));
        assert_eq!(to_key_code(TermKey::Char('J')), KeyCode::from(74));
        assert_eq!(to_key_code(TermKey::Char('5')), KeyCode::from(53));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(to_key_code(TermKey::Up), KeyCode::from(38));
        assert_eq!(to_key_code(TermKey::Left), KeyCode::from(37));
        assert_eq!(to_key_code(TermKey::F(12)), KeyCode::from(123));
        assert_eq!(to_key_code(TermKey::Enter).name(), "enter");
    }

    #[test]
    fn test_punctuation_and_unknown() {
        assert_eq!(to_key_code(TermKey::Char(';')), KeyCode::from(186));
        assert_eq!(to_key_code(TermKey::Char(',')), KeyCode::from(188));
        assert_eq!(to_key_code(TermKey::Char('é')), UNKNOWN);
        assert_eq!(to_key_code(TermKey::F(20)), UNKNOWN);
        assert_eq!(to_key_code(TermKey::Null), UNKNOWN);
    }
}
