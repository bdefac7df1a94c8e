use clap::{Parser, Subcommand};

use crate::timer::mode::Mode;

#[derive(Parser)]
#[command(name = "tomatick")]
#[command(about = "Pomodoro countdown timer for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the timer screen (default)
    Run {
        /// Mode to start in
        #[arg(long, value_enum, default_value_t = Mode::Work)]
        mode: Mode,

        /// Don't play the completion sound
        #[arg(long)]
        mute: bool,
    },

    /// Show where config and log files are stored
    Paths,

    /// Print the effective configuration as TOML
    Config,
}

impl Default for Command {
    fn default() -> Self {
        Command::Run {
            mode: Mode::Work,
            mute: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["tomatick"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Command::Run { mode: Mode::Work, mute: false }
        ));
    }

    #[test]
    fn run_accepts_mode_and_mute() {
        let cli = Cli::try_parse_from(["tomatick", "run", "--mode", "break", "--mute"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Run { mode: Mode::Break, mute: true })
        ));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["tomatick", "run", "--mode", "nap"]).is_err());
    }
}
