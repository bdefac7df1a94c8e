use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, Sink};

use super::SoundPlayer;

/// Pitch of the generated beep.
const BEEP_HZ: f32 = 880.0;
/// Length of the generated beep.
const BEEP_MS: u64 = 350;

/// Plays the completion cue on the default output device.
///
/// With no file configured a short sine beep is synthesized, so the app has
/// no audio assets to ship.
#[derive(Debug, Clone)]
pub struct RodioPlayer {
    file: Option<PathBuf>,
    volume: f32,
}

impl RodioPlayer {
    pub fn new(file: Option<PathBuf>, volume: f32) -> Self {
        Self {
            file,
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&self) -> Result<()> {
        let player = self.clone();
        // Playback blocks until the sound ends, so it gets its own thread.
        // Nothing joins it; errors are only logged.
        std::thread::Builder::new()
            .name("alert-sound".into())
            .spawn(move || {
                if let Err(e) = player.play_blocking() {
                    tracing::debug!("alert sound failed: {e:#}");
                }
            })
            .context("Failed to spawn audio thread")?;
        Ok(())
    }
}

impl RodioPlayer {
    fn play_blocking(&self) -> Result<()> {
        // `_stream` must outlive playback; dropping it stops the device.
        let (_stream, stream_handle) =
            OutputStream::try_default().context("Failed to open audio output device")?;
        let sink = Sink::try_new(&stream_handle).context("Failed to create audio sink")?;
        sink.set_volume(self.volume);

        match &self.file {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open: {}", path.display()))?;
                let source = Decoder::new(BufReader::new(file))
                    .with_context(|| format!("Failed to decode: {}", path.display()))?;
                sink.append(source);
            }
            None => sink.append(beep()),
        }

        sink.sleep_until_end();
        Ok(())
    }
}

fn beep() -> impl Source<Item = f32> + Send {
    SineWave::new(BEEP_HZ)
        .take_duration(Duration::from_millis(BEEP_MS))
        .fade_in(Duration::from_millis(10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped() {
        assert_eq!(RodioPlayer::new(None, 3.0).volume, 1.0);
        assert_eq!(RodioPlayer::new(None, -1.0).volume, 0.0);
    }
}
