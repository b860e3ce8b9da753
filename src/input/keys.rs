//! Named keyboard codes (DOM `keyCode` values).
//!
//! The cabinet shell delivers raw key codes; these names keep the binding
//! table readable. `PULT_*` are the codes sent by the arcade control panel.

pub type KeyCode = u32;

pub const BACKSPACE: KeyCode = 8;
pub const TAB: KeyCode = 9;
pub const ENTER: KeyCode = 13;
pub const SHIFT: KeyCode = 16;
pub const CTRL: KeyCode = 17;
pub const ALT: KeyCode = 18;
pub const PAUSE: KeyCode = 19;
pub const CAPS: KeyCode = 20;
pub const ESC: KeyCode = 27;
pub const SPACE: KeyCode = 32;
pub const PAGE_UP: KeyCode = 33;
pub const PAGE_DOWN: KeyCode = 34;
pub const END: KeyCode = 35;
pub const HOME: KeyCode = 36;
pub const LEFT_ARROW: KeyCode = 37;
pub const UP_ARROW: KeyCode = 38;
pub const RIGHT_ARROW: KeyCode = 39;
pub const DOWN_ARROW: KeyCode = 40;
pub const INSERT: KeyCode = 45;
pub const DELETE: KeyCode = 46;
pub const DIGIT_0: KeyCode = 48;
pub const DIGIT_1: KeyCode = 49;
pub const DIGIT_2: KeyCode = 50;
pub const DIGIT_3: KeyCode = 51;
pub const DIGIT_4: KeyCode = 52;
pub const DIGIT_9: KeyCode = 57;
pub const F: KeyCode = 70;
pub const I: KeyCode = 73;
pub const Q: KeyCode = 81;
pub const LEFT_BRACKET: KeyCode = 91;
pub const RIGHT_BRACKET: KeyCode = 93;
pub const PULT_LEFT: KeyCode = 4;
pub const PULT_RIGHT: KeyCode = 5;
pub const PULT_UP: KeyCode = 29460;
pub const PULT_DOWN: KeyCode = 29461;

/// Full name table, in the order the shell documents it.
pub const NAMED: &[(&str, KeyCode)] = &[
    ("BACKSPACE", BACKSPACE),
    ("TAB", TAB),
    ("ENTER", ENTER),
    ("PAUSE", PAUSE),
    ("CAPS", CAPS),
    ("ESC", ESC),
    ("SPACE", SPACE),
    ("PAGE_UP", PAGE_UP),
    ("PAGE_DOWN", PAGE_DOWN),
    ("END", END),
    ("HOME", HOME),
    ("LEFT_ARROW", LEFT_ARROW),
    ("UP_ARROW", UP_ARROW),
    ("RIGHT_ARROW", RIGHT_ARROW),
    ("DOWN_ARROW", DOWN_ARROW),
    ("INSERT", INSERT),
    ("DELETE", DELETE),
    ("0", 48),
    ("1", 49),
    ("2", 50),
    ("3", 51),
    ("4", 52),
    ("5", 53),
    ("6", 54),
    ("7", 55),
    ("8", 56),
    ("9", 57),
    ("A", 65),
    ("B", 66),
    ("C", 67),
    ("D", 68),
    ("E", 69),
    ("F", 70),
    ("G", 71),
    ("H", 72),
    ("I", 73),
    ("J", 74),
    ("K", 75),
    ("L", 76),
    ("M", 77),
    ("N", 78),
    ("O", 79),
    ("P", 80),
    ("Q", 81),
    ("R", 82),
    ("S", 83),
    ("T", 84),
    ("U", 85),
    ("V", 86),
    ("W", 87),
    ("X", 88),
    ("Y", 89),
    ("Z", 90),
    ("NUMPAD_0", 96),
    ("NUMPAD_1", 97),
    ("NUMPAD_2", 98),
    ("NUMPAD_3", 99),
    ("NUMPAD_4", 100),
    ("NUMPAD_5", 101),
    ("NUMPAD_6", 102),
    ("NUMPAD_7", 103),
    ("NUMPAD_8", 104),
    ("NUMPAD_9", 105),
    ("MULTIPLY", 106),
    ("ADD", 107),
    ("SUBSTRACT", 109),
    ("DECIMAL", 110),
    ("DIVIDE", 111),
    ("F1", 112),
    ("F2", 113),
    ("F3", 114),
    ("F4", 115),
    ("F5", 116),
    ("F6", 117),
    ("F7", 118),
    ("F8", 119),
    ("F9", 120),
    ("F10", 121),
    ("F11", 122),
    ("F12", 123),
    ("SHIFT", SHIFT),
    ("CTRL", CTRL),
    ("ALT", ALT),
    ("PLUS", 187),
    ("COMMA", 188),
    ("MINUS", 189),
    ("PERIOD", 190),
    ("PULT_UP", PULT_UP),
    ("PULT_DOWN", PULT_DOWN),
    ("PULT_LEFT", PULT_LEFT),
    ("PULT_RIGHT", PULT_RIGHT),
    ("LEFT_BRACKET", LEFT_BRACKET),
    ("RIGHT_BRACKET", RIGHT_BRACKET),
];

/// Resolves a key name such as `"SPACE"` or `"F12"` to its code.
pub fn code(name: &str) -> Option<KeyCode> {
    NAMED
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, code)| *code)
}

/// Reverse lookup, mostly for log output.
pub fn name(code: KeyCode) -> Option<&'static str> {
    NAMED
        .iter()
        .find(|(_, key_code)| *key_code == code)
        .map(|(name, _)| *name)
}
