use std::io::{self, Write};

use ratatui::style::Color;

use super::ThemeNotifier;
use crate::timer::mode::Palette;

const RESET_BACKGROUND: &str = "\x1b]111\x07";

/// Put back the terminal's configured background (OSC 111).
///
/// Harmless when nothing was tinted, so terminal teardown can always call it.
pub fn reset_background(out: &mut impl Write) -> io::Result<()> {
    out.write_all(RESET_BACKGROUND.as_bytes())?;
    out.flush()
}

/// Tints the terminal's own default background to the mode's colour.
///
/// Uses the xterm OSC 11 sequence; terminals that do not understand it
/// ignore it. The original background is put back with OSC 111 on drop.
pub struct TerminalTint<W: Write = io::Stdout> {
    out: W,
    touched: bool,
}

impl TerminalTint<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalTint<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            touched: false,
        }
    }

    fn write_seq(&mut self, seq: &str) -> io::Result<()> {
        self.out.write_all(seq.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> ThemeNotifier for TerminalTint<W> {
    fn apply(&mut self, palette: &Palette) {
        let Some(hex) = hex(palette.background) else {
            return;
        };
        match self.write_seq(&format!("\x1b]11;{hex}\x07")) {
            Ok(()) => self.touched = true,
            Err(e) => tracing::warn!("terminal tint failed: {e}"),
        }
    }
}

impl<W: Write> Drop for TerminalTint<W> {
    fn drop(&mut self) {
        if self.touched {
            let _ = reset_background(&mut self.out);
        }
    }
}

/// `#rrggbb` for RGB colours; named colours have no portable hex value.
fn hex(color: Color) -> Option<String> {
    match color {
        Color::Rgb(r, g, b) => Some(format!("#{r:02x}{g:02x}{b:02x}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::mode::Mode;

    #[test]
    fn hex_formats_rgb() {
        assert_eq!(hex(Color::Rgb(0xE2, 0xD7, 0xD1)).as_deref(), Some("#e2d7d1"));
        assert_eq!(hex(Color::Red), None);
    }

    #[test]
    fn apply_writes_osc11() {
        let mut tint = TerminalTint::new(Vec::new());
        tint.apply(&Mode::Break.palette());
        assert_eq!(tint.out, b"\x1b]11;#d1d7e2\x07");
        // Skip the reset sequence on drop.
        tint.touched = false;
    }

    #[test]
    fn drop_restores_background_after_apply() {
        let mut buf = Vec::new();
        {
            let mut tint = TerminalTint::new(&mut buf);
            tint.apply(&Mode::Work.palette());
        }
        assert!(buf.ends_with(b"\x1b]111\x07"));
    }

    #[test]
    fn reset_background_writes_osc111() {
        let mut buf = Vec::new();
        reset_background(&mut buf).unwrap();
        assert_eq!(buf, b"\x1b]111\x07");
    }

    #[test]
    fn drop_is_silent_when_never_applied() {
        let mut buf = Vec::new();
        drop(TerminalTint::new(&mut buf));
        assert!(buf.is_empty());
    }
}
