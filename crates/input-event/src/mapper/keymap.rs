//! Key code to text lookup.
//!
//! Lookups never fail: a code without an entry yields [`FALLBACK`]. Supporting
//! another layout means building another [`KeyCharMap`], the parser is unchanged.

use std::collections::HashMap;

use evdev::Key;
use lazy_static::lazy_static;

/// Emitted for key presses whose code has no table entry.
pub const FALLBACK: &str = "?";

// Codes from linux/input-event-codes.h, unshifted US layout.
const US_LAYOUT: &[(Key, &str)] = &[
    (Key::KEY_1, "1"),
    (Key::KEY_2, "2"),
    (Key::KEY_3, "3"),
    (Key::KEY_4, "4"),
    (Key::KEY_5, "5"),
    (Key::KEY_6, "6"),
    (Key::KEY_7, "7"),
    (Key::KEY_8, "8"),
    (Key::KEY_9, "9"),
    (Key::KEY_0, "0"),
    (Key::KEY_Q, "q"),
    (Key::KEY_W, "w"),
    (Key::KEY_E, "e"),
    (Key::KEY_R, "r"),
    (Key::KEY_T, "t"),
    (Key::KEY_Y, "y"),
    (Key::KEY_U, "u"),
    (Key::KEY_I, "i"),
    (Key::KEY_O, "o"),
    (Key::KEY_P, "p"),
    (Key::KEY_A, "a"),
    (Key::KEY_S, "s"),
    (Key::KEY_D, "d"),
    (Key::KEY_F, "f"),
    (Key::KEY_G, "g"),
    (Key::KEY_H, "h"),
    (Key::KEY_J, "j"),
    (Key::KEY_K, "k"),
    (Key::KEY_L, "l"),
    (Key::KEY_Z, "z"),
    (Key::KEY_X, "x"),
    (Key::KEY_C, "c"),
    (Key::KEY_V, "v"),
    (Key::KEY_B, "b"),
    (Key::KEY_N, "n"),
    (Key::KEY_M, "m"),
    (Key::KEY_COMMA, ","),
    (Key::KEY_DOT, "."),
    (Key::KEY_SLASH, "/"),
    (Key::KEY_SEMICOLON, ";"),
    (Key::KEY_APOSTROPHE, "'"),
    (Key::KEY_LEFTBRACE, "["),
    (Key::KEY_RIGHTBRACE, "]"),
    (Key::KEY_KP7, "7"),
    (Key::KEY_KP8, "8"),
    (Key::KEY_KP9, "9"),
    (Key::KEY_KPMINUS, "-"),
    (Key::KEY_KP4, "4"),
    (Key::KEY_KP5, "5"),
    (Key::KEY_KP6, "6"),
    (Key::KEY_KPPLUS, "+"),
    (Key::KEY_KP1, "1"),
    (Key::KEY_KP2, "2"),
    (Key::KEY_KP3, "3"),
    (Key::KEY_KP0, "0"),
    (Key::KEY_KPDOT, "."),
    (Key::KEY_ENTER, "\n"),
    (Key::KEY_BACKSLASH, "\\"),
    (Key::KEY_SPACE, " "),
    (Key::KEY_MINUS, "-"),
    (Key::KEY_EQUAL, "="),
    (Key::KEY_TAB, "\t"),
];

lazy_static! {
    static ref GLOBAL: KeyCharMap = US_LAYOUT.iter().copied().collect();
}

#[derive(Debug, Clone, Default)]
pub struct KeyCharMap {
    chars: HashMap<u16, &'static str>,
}

impl KeyCharMap {
    /// The process-wide US table, built on first use.
    pub fn global() -> &'static KeyCharMap {
        &GLOBAL
    }

    pub fn get(&self, key: Key) -> &'static str {
        self.chars.get(&key.code()).copied().unwrap_or(FALLBACK)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.chars.contains_key(&key.code())
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Earlier entries win over later ones for the same key.
impl FromIterator<(Key, &'static str)> for KeyCharMap {
    fn from_iter<T: IntoIterator<Item = (Key, &'static str)>>(iter: T) -> Self {
        let mut chars = HashMap::new();
        for (key, text) in iter {
            chars.entry(key.code()).or_insert(text);
        }
        KeyCharMap { chars }
    }
}
