//! Input encoding.
//!
//! Translates key presses into the exact byte sequences applications
//! expect on the PTY, and mouse gestures into xterm mouse reports.
//! These tables must match the source terminal byte-for-byte; tests pin
//! every row.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const CTRL  = 1 << 1;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// A decoded key press from the display backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Keys the terminal distinguishes; everything else arrives as its
/// printable codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Return,
    Backspace,
    Tab,
    Up,
    Down,
    Right,
    Left,
    Char(char),
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write these bytes to the PTY.
    Write(Vec<u8>),
    /// Materialize the selection and publish it to the clipboard.
    CopySelection,
    /// Request the clipboard; bytes arrive via `SelectionNotify`.
    RequestPaste,
    /// Adjust the scrollback view offset by this many lines.
    Scroll(isize),
}

/// Translate a key press into its action.
///
/// Precedence follows the source terminal: the copy/paste chords and
/// Shift+Up/Down scrolling are checked before any bytes are produced.
pub fn encode_key(press: KeyPress) -> Option<Action> {
    let KeyPress { key, modifiers } = press;
    let shift = modifiers.contains(Modifiers::SHIFT);
    let ctrl = modifiers.contains(Modifiers::CTRL);

    if ctrl && shift {
        match key {
            Key::Char('c') | Key::Char('C') => return Some(Action::CopySelection),
            Key::Char('v') | Key::Char('V') => return Some(Action::RequestPaste),
            _ => {}
        }
    }

    if shift && !ctrl {
        match key {
            Key::Up => return Some(Action::Scroll(-1)),
            Key::Down => return Some(Action::Scroll(1)),
            Key::Right => return Some(Action::Write(b"\x1b[1;2C".to_vec())),
            Key::Left => return Some(Action::Write(b"\x1b[1;2D".to_vec())),
            _ => {}
        }
    }

    if ctrl && !shift {
        if let Key::Char('v') = key {
            return Some(Action::RequestPaste);
        }
        // Control characters for letters (Ctrl+C = 0x03, etc.).
        if let Key::Char(c) = key {
            if c.is_ascii_alphabetic() {
                return Some(Action::Write(vec![c.to_ascii_lowercase() as u8 & 0x1f]));
            }
        }
    }

    let bytes: Vec<u8> = match key {
        Key::Return => b"\r".to_vec(),
        Key::Backspace => b"\x08".to_vec(),
        Key::Tab => b"\t".to_vec(),
        Key::Up => b"\x1b[A".to_vec(),
        Key::Down => b"\x1b[B".to_vec(),
        Key::Right => b"\x1b[C".to_vec(),
        Key::Left => b"\x1b[D".to_vec(),
        Key::Char(c) => {
            let mut buf = [0u8; 4];
            c.encode_utf8(&mut buf).as_bytes().to_vec()
        }
    };
    Some(Action::Write(bytes))
}

/// Mouse buttons the display reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

/// Offset applied to mouse report coordinates (xterm wire format).
const MOUSE_BASE: i32 = 32;

/// Encode a button-press report: `ESC [ M` + `(32, col+1+32, row+1+32)`.
///
/// The row may be negative while scrolled back into history; the byte
/// cast then wraps outside the valid wire range (kept as-is from the
/// source).
pub fn mouse_press_report(col: i32, row: i32) -> Vec<u8> {
    vec![
        0x1b,
        b'[',
        b'M',
        MOUSE_BASE as u8,
        (col + 1 + MOUSE_BASE) as u8,
        (row + 1 + MOUSE_BASE) as u8,
    ]
}

/// Encode a button-release report: `ESC [ M !` + `(col+1+32, row+1+32)`.
pub fn mouse_release_report(col: i32, row: i32) -> Vec<u8> {
    vec![
        0x1b,
        b'[',
        b'M',
        b'!',
        (col + 1 + MOUSE_BASE) as u8,
        (row + 1 + MOUSE_BASE) as u8,
    ]
}

/// Encode a drag-motion report: `ESC [ M "` + `(col+1+32, row+1+32)`.
pub fn mouse_motion_report(col: i32, row: i32) -> Vec<u8> {
    vec![
        0x1b,
        b'[',
        b'M',
        b'"',
        (col + 1 + MOUSE_BASE) as u8,
        (row + 1 + MOUSE_BASE) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> KeyPress {
        KeyPress::new(key, Modifiers::empty())
    }

    fn with(key: Key, modifiers: Modifiers) -> KeyPress {
        KeyPress::new(key, modifiers)
    }

    #[test]
    fn plain_keys_produce_expected_bytes() {
        let cases: &[(Key, &[u8])] = &[
            (Key::Return, b"\r"),
            (Key::Backspace, b"\x08"),
            (Key::Tab, b"\t"),
            (Key::Up, b"\x1b[A"),
            (Key::Down, b"\x1b[B"),
            (Key::Right, b"\x1b[C"),
            (Key::Left, b"\x1b[D"),
        ];
        for (key, expected) in cases {
            assert_eq!(
                encode_key(press(*key)),
                Some(Action::Write(expected.to_vec())),
                "key {key:?}"
            );
        }
    }

    #[test]
    fn printable_chars_pass_through() {
        assert_eq!(
            encode_key(press(Key::Char('a'))),
            Some(Action::Write(b"a".to_vec()))
        );
        assert_eq!(
            encode_key(with(Key::Char('A'), Modifiers::SHIFT)),
            Some(Action::Write(b"A".to_vec()))
        );
    }

    #[test]
    fn shifted_horizontal_arrows_use_modifier_encoding() {
        assert_eq!(
            encode_key(with(Key::Right, Modifiers::SHIFT)),
            Some(Action::Write(b"\x1b[1;2C".to_vec()))
        );
        assert_eq!(
            encode_key(with(Key::Left, Modifiers::SHIFT)),
            Some(Action::Write(b"\x1b[1;2D".to_vec()))
        );
    }

    #[test]
    fn shifted_vertical_arrows_scroll_the_view() {
        assert_eq!(
            encode_key(with(Key::Up, Modifiers::SHIFT)),
            Some(Action::Scroll(-1))
        );
        assert_eq!(
            encode_key(with(Key::Down, Modifiers::SHIFT)),
            Some(Action::Scroll(1))
        );
    }

    #[test]
    fn ctrl_c_is_etx() {
        assert_eq!(
            encode_key(with(Key::Char('c'), Modifiers::CTRL)),
            Some(Action::Write(vec![0x03]))
        );
    }

    #[test]
    fn ctrl_letters_become_control_bytes() {
        assert_eq!(
            encode_key(with(Key::Char('d'), Modifiers::CTRL)),
            Some(Action::Write(vec![0x04]))
        );
        assert_eq!(
            encode_key(with(Key::Char('Z'), Modifiers::CTRL)),
            Some(Action::Write(vec![0x1a]))
        );
    }

    #[test]
    fn copy_paste_chords() {
        assert_eq!(
            encode_key(with(Key::Char('c'), Modifiers::CTRL | Modifiers::SHIFT)),
            Some(Action::CopySelection)
        );
        assert_eq!(
            encode_key(with(Key::Char('v'), Modifiers::CTRL | Modifiers::SHIFT)),
            Some(Action::RequestPaste)
        );
        assert_eq!(
            encode_key(with(Key::Char('v'), Modifiers::CTRL)),
            Some(Action::RequestPaste)
        );
    }

    #[test]
    fn mouse_press_report_bytes() {
        // Cell (0, 0): ESC [ M, button 32, col 33, row 33.
        assert_eq!(mouse_press_report(0, 0), vec![0x1b, b'[', b'M', 32, 33, 33]);
        assert_eq!(
            mouse_press_report(10, 5),
            vec![0x1b, b'[', b'M', 32, 43, 38]
        );
    }

    #[test]
    fn mouse_release_and_motion_reports() {
        assert_eq!(
            mouse_release_report(0, 0),
            vec![0x1b, b'[', b'M', b'!', 33, 33]
        );
        assert_eq!(
            mouse_motion_report(2, 3),
            vec![0x1b, b'[', b'M', b'"', 35, 36]
        );
    }

    #[test]
    fn scrolled_back_mouse_row_wraps_as_documented() {
        // Negative rows (pointer in scrollback) produce wrapped bytes.
        let report = mouse_press_report(0, -40);
        assert_eq!(report[5], (-40i32 + 1 + 32) as u8);
    }
}
