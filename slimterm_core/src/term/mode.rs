//! Terminal mode flags (DECSET/DECRST).
//!
//! Each flag corresponds to a mode toggled by `CSI ? n h` / `CSI ? n l`.
//! The default mode has the cursor visible, auto-wrap on, and the
//! source terminal's destructive backspace enabled.

use bitflags::bitflags;

bitflags! {
    /// Bitflags for terminal mode state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TermMode: u16 {
        /// Mode 25 — cursor visible (renderer hint only).
        const SHOW_CURSOR           = 1;
        /// Mode 7 — auto-wrap at end of line.
        const LINE_WRAP             = 1 << 1;
        /// Mode 1 — application cursor keys (tracked, no core effect).
        const APP_CURSOR            = 1 << 2;
        /// Mode 1049 — alternate screen buffer active.
        const ALT_SCREEN            = 1 << 3;
        /// Mode 1000 — report mouse button presses.
        const MOUSE_REPORT_CLICK    = 1 << 4;
        /// Mode 1002 — report button presses and drag motion.
        const MOUSE_DRAG            = 1 << 5;
        /// Mode 1003 — report all mouse motion.
        const MOUSE_MOTION          = 1 << 6;
        /// Backspace erases the vacated cell (configuration knob; not
        /// reachable from escape sequences).
        const DESTRUCTIVE_BACKSPACE = 1 << 7;
        /// Computed: any mouse reporting mode is active.
        const ANY_MOUSE = Self::MOUSE_REPORT_CLICK.bits()
                        | Self::MOUSE_DRAG.bits()
                        | Self::MOUSE_MOTION.bits();
    }
}

impl Default for TermMode {
    fn default() -> Self {
        Self::SHOW_CURSOR | Self::LINE_WRAP | Self::DESTRUCTIVE_BACKSPACE
    }
}
