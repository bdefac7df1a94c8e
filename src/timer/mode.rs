use ratatui::style::Color;

/// Work preset: 25 minutes.
pub const WORK_SECS: u32 = 25 * 60;
/// Break preset: 5 minutes.
pub const BREAK_SECS: u32 = 5 * 60;

/// Shared foreground colour for digits and labels.
pub const INK: Color = Color::Rgb(0x5E, 0x5E, 0x5E);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    #[default]
    Work,
    Break,
}

/// Colours and labels a mode paints the screen with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub accent: Color,
    /// Shown under the digits ("Deep Work", "Resting").
    pub label: &'static str,
    /// Shown on the mode tab ("Focus", "Relax").
    pub tab: &'static str,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Work, Mode::Break];

    /// Preset length of this mode in seconds.
    pub fn total_secs(self) -> u32 {
        match self {
            Mode::Work => WORK_SECS,
            Mode::Break => BREAK_SECS,
        }
    }

    pub fn other(self) -> Mode {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }

    /// Message raised when a countdown in this mode runs out.
    pub fn completion_message(self) -> &'static str {
        match self {
            Mode::Work => "Focus Session Done!",
            Mode::Break => "Break Over!",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Mode::Work => Palette {
                background: Color::Rgb(0xE2, 0xD7, 0xD1),
                accent: Color::Rgb(0x8E, 0x97, 0x75),
                label: "Deep Work",
                tab: "Focus",
            },
            Mode::Break => Palette {
                background: Color::Rgb(0xD1, 0xD7, 0xE2),
                accent: Color::Rgb(0x7A, 0x8B, 0x99),
                label: "Resting",
                tab: "Relax",
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::Break => "break",
        }
    }
}
