mod app;
mod cli;
mod config;
mod logging;
mod notify;
mod paths;
mod timer;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use console::style;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Command::Run { mode, mute } => {
            logging::init(&paths::log_file())?;
            let mut config = config::load_config()?;
            if mute {
                config.sound.enabled = false;
            }
            app::run(&config, mode)
        }

        Command::Paths => {
            println!("Config: {}", style(paths::config_file().display()).green());
            println!("Log:    {}", style(paths::log_file().display()).green());
            Ok(())
        }

        Command::Config => {
            let config = config::load_config()?;
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render configuration")?;
            print!("{rendered}");
            Ok(())
        }
    }
}
