//! Key names and their scancodes.
//!
//! Scancodes are USB HID usage ids, which is also what SDL uses for its scancodes, so values
//! coming from an SDL event pump can be compared directly. Names follow SDL's key names and are
//! matched case-insensitively.

const KEY_NAMES: &[(&str, u32)] = &[
    ("Return", 40),
    ("Enter", 40),
    ("Escape", 41),
    ("Backspace", 42),
    ("Tab", 43),
    ("Space", 44),
    ("-", 45),
    ("=", 46),
    ("[", 47),
    ("]", 48),
    ("\\", 49),
    (";", 51),
    ("'", 52),
    ("`", 53),
    (",", 54),
    (".", 55),
    ("/", 56),
    ("CapsLock", 57),
    ("PrintScreen", 70),
    ("ScrollLock", 71),
    ("Pause", 72),
    ("Insert", 73),
    ("Home", 74),
    ("PageUp", 75),
    ("Delete", 76),
    ("End", 77),
    ("PageDown", 78),
    ("Right", 79),
    ("Left", 80),
    ("Down", 81),
    ("Up", 82),
    ("Left Ctrl", 224),
    ("Left Shift", 225),
    ("Left Alt", 226),
    ("Left GUI", 227),
    ("Right Ctrl", 228),
    ("Right Shift", 229),
    ("Right Alt", 230),
    ("Right GUI", 231),
];

/// Looks up the scancode of a key by name, e.g. `"a"`, `"7"`, `"Space"`, `"Left Shift"` or
/// `"F5"`.
pub fn scancode_from_name(name: &str) -> Option<u32> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let c = c.to_ascii_lowercase();
        match c {
            'a'..='z' => return Some(4 + (c as u32 - 'a' as u32)),
            '1'..='9' => return Some(30 + (c as u32 - '1' as u32)),
            '0' => return Some(39),
            _ => {}
        }
    }

    if let Some(n) = name
        .strip_prefix(['F', 'f'])
        .and_then(|n| n.parse::<u32>().ok())
    {
        return match n {
            1..=12 => Some(58 + n - 1),
            13..=24 => Some(104 + n - 13),
            _ => None,
        };
    }

    KEY_NAMES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
}
