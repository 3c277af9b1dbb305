// Eggrs Key Type
// Represents a single raw key code in browser keyCode numbering

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A raw key code, numbered like DOM `keyCode` values (65 = `a`, 38 = `up`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub fn code(self) -> u16 {
        self.0
    }

    /// Canonical name, or `"unknown"`
    pub fn name(self) -> &'static str {
        key_name(self.0)
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        KeyCode(code)
    }
}

impl From<KeyCode> for u16 {
    fn from(key: KeyCode) -> Self {
        key.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        key_from_name(s).ok_or_else(|| format!("unknown key: {}", s))
    }
}

const LETTERS: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z",
];

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

const NUMPAD: [&str; 10] = [
    "num0", "num1", "num2", "num3", "num4", "num5", "num6", "num7", "num8", "num9",
];

const FUNCTION_KEYS: [&str; 12] = [
    "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
];

/// Named keys outside the contiguous letter/digit/function ranges
const SPECIAL_KEYS: &[(&str, u16)] = &[
    ("backspace", 8),
    ("tab", 9),
    ("enter", 13),
    ("shift", 16),
    ("ctrl", 17),
    ("alt", 18),
    ("pause", 19),
    ("capslock", 20),
    ("esc", 27),
    ("space", 32),
    ("pageup", 33),
    ("pagedown", 34),
    ("end", 35),
    ("home", 36),
    ("left", 37),
    ("up", 38),
    ("right", 39),
    ("down", 40),
    ("printscreen", 44),
    ("insert", 45),
    ("delete", 46),
    ("meta", 91),
    ("menu", 93),
    ("multiply", 106),
    ("add", 107),
    ("subtract", 109),
    ("decimal", 110),
    ("divide", 111),
    ("numlock", 144),
    ("scrolllock", 145),
    ("semicolon", 186),
    ("equal", 187),
    ("comma", 188),
    ("minus", 189),
    ("period", 190),
    ("slash", 191),
    ("backquote", 192),
    ("bracketleft", 219),
    ("backslash", 220),
    ("bracketright", 221),
    ("quote", 222),
];

/// Alternative spellings accepted when parsing key names
const ALIASES: &[(&str, u16)] = &[
    ("escape", 27),
    ("return", 13),
    ("spacebar", 32),
    ("arrowleft", 37),
    ("arrowup", 38),
    ("arrowright", 39),
    ("arrowdown", 40),
    ("pgup", 33),
    ("pgdn", 34),
    ("ins", 45),
    ("del", 46),
    ("control", 17),
    ("option", 18),
    ("cmd", 91),
    ("command", 91),
    ("super", 91),
    ("win", 91),
    (";", 186),
    ("=", 187),
    ("-", 189),
    (".", 190),
    ("/", 191),
    ("`", 192),
    ("[", 219),
    ("\\", 220),
    ("]", 221),
    ("'", 222),
];

/// Canonical (name, code) table, ordered by code
pub fn all_named_keys() -> &'static [(&'static str, u16)] {
    static TABLE: OnceLock<Vec<(&'static str, u16)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: Vec<(&'static str, u16)> = SPECIAL_KEYS.to_vec();
        table.extend(DIGITS.iter().zip(48u16..).map(|(n, c)| (*n, c)));
        table.extend(LETTERS.iter().zip(65u16..).map(|(n, c)| (*n, c)));
        table.extend(NUMPAD.iter().zip(96u16..).map(|(n, c)| (*n, c)));
        table.extend(FUNCTION_KEYS.iter().zip(112u16..).map(|(n, c)| (*n, c)));
        table.sort_by_key(|(_, code)| *code);
        table
    })
}

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    static KEY_NAMES: OnceLock<Vec<&'static str>> = OnceLock::new();
    KEY_NAMES
        .get_or_init(|| {
            let mut names = vec!["unknown"; 0x100];
            for (name, code) in all_named_keys() {
                names[*code as usize] = *name;
            }
            names
        })
        .get(code as usize)
        .copied()
        .unwrap_or("unknown")
}

/// Look up a key code by name, alias or decimal code.
///
/// Names are matched case-insensitively, so `"A"`, `"a"` and `"65"` all
/// resolve to the same key.
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    static BY_NAME: OnceLock<HashMap<&'static str, u16>> = OnceLock::new();
    let map = BY_NAME.get_or_init(|| {
        all_named_keys()
            .iter()
            .chain(ALIASES.iter())
            .map(|(n, c)| (*n, *c))
            .collect()
    });

    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(code) = trimmed.parse::<u16>() {
        // Bare digits name the digit keys, not raw codes
        if trimmed.len() == 1 {
            return map.get(trimmed).map(|c| KeyCode::from(*c));
        }
        return Some(KeyCode::from(code));
    }

    let lower = trimmed.to_lowercase();
    map.get(lower.as_str()).map(|c| KeyCode::from(*c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_name() {
        assert_eq!(key_from_name("a"), Some(KeyCode::from(65)));
        assert_eq!(key_from_name("A"), Some(KeyCode::from(65)));
        assert_eq!(key_from_name("up"), Some(KeyCode::from(38)));
        assert_eq!(key_from_name("ArrowUp"), Some(KeyCode::from(38)));
        assert_eq!(key_from_name("escape"), Some(KeyCode::from(27)));
        assert_eq!(key_from_name("f12"), Some(KeyCode::from(123)));
        assert_eq!(key_from_name("num5"), Some(KeyCode::from(101)));
        assert_eq!(key_from_name("nope"), None);
        assert_eq!(key_from_name("  "), None);
    }

    #[test]
    fn test_digits_and_raw_codes() {
        // A single digit is the digit key
        assert_eq!(key_from_name("7"), Some(KeyCode::from(55)));
        // Longer numbers are raw codes
        assert_eq!(key_from_name("74"), Some(KeyCode::from(74)));
        assert_eq!(key_from_name("300"), Some(KeyCode::from(300)));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(KeyCode::from(74).to_string(), "j");
        assert_eq!(KeyCode::from(13).to_string(), "enter");
        assert_eq!(KeyCode::from(255).to_string(), "unknown");
        assert_eq!(KeyCode::from(4000).to_string(), "unknown");
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("left".parse::<KeyCode>(), Ok(KeyCode::from(37)));
        assert_eq!("bogus".parse::<KeyCode>(), Err("unknown key: bogus".to_string()));
    }

    #[test]
    fn test_key_code_conversions() {
        let key = KeyCode::from(38);
        assert_eq!(key.code(), 38);
        assert_eq!(u16::from(key), 38);
        assert_eq!(key.name(), "up");
        assert!(KeyCode::from(37) < key);
    }

    #[test]
    fn test_table_is_sorted_and_unique() {
        let table = all_named_keys();
        assert!(table.windows(2).all(|w| w[0].1 < w[1].1));
        assert_eq!(table.iter().filter(|(n, _)| LETTERS.contains(n)).count(), 26);
    }
}
