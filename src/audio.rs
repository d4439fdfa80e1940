use color_eyre::{Result, eyre::WrapErr};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::session::GameEvent;

/// Sound effects the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Laser,
    EnemyHit,
    GameOver,
}

impl Sound {
    pub const ALL: [Sound; 3] = [Sound::Laser, Sound::EnemyHit, Sound::GameOver];

    pub fn file_name(&self) -> &'static str {
        match self {
            Sound::Laser => "laser_shooting.wav",
            Sound::EnemyHit => "enemy_hit.wav",
            Sound::GameOver => "game_over.wav",
        }
    }

    /// The sound a session event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Sound> {
        match event {
            GameEvent::Fired { .. } => Some(Sound::Laser),
            GameEvent::EnemyDestroyed => Some(Sound::EnemyHit),
            GameEvent::GameOver { .. } => Some(Sound::GameOver),
            _ => None,
        }
    }
}

/// Anything that can play sound effects
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
    fn set_volume(&mut self, sound: Sound, level: f32);
}

/// Plays nothing. Used when there is no output device or audio is muted.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _sound: Sound) {}
    fn set_volume(&mut self, _sound: Sound, _level: f32) {}
}

struct Clip {
    /// None when the file failed to load; the clip then plays as silence
    source: Option<Buffered<Decoder<BufReader<File>>>>,
    volume: f32,
}

/// Audio manager for playing sound effects
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    clips: HashMap<Sound, Clip>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads every sound from `sound_dir`.
    /// Only a missing device is an error; a missing file just mutes that sound.
    pub fn new(sound_dir: &Path, volume: f32) -> Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().wrap_err("no audio output device")?;

        let clips = Sound::ALL
            .iter()
            .map(|&sound| {
                let path = sound_dir.join(sound.file_name());
                let source = match load_clip(&path) {
                    Ok(source) => Some(source),
                    Err(err) => {
                        tracing::warn!(?sound, "sound unavailable, playing silence: {err:#}");
                        None
                    }
                };
                (sound, Clip { source, volume })
            })
            .collect();

        Ok(Self {
            _stream: stream,
            stream_handle,
            clips,
        })
    }
}

fn load_clip(path: &Path) -> Result<Buffered<Decoder<BufReader<File>>>> {
    let file = File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let decoder = Decoder::new(BufReader::new(file))
        .wrap_err_with(|| format!("failed to decode {}", path.display()))?;
    Ok(decoder.buffered())
}

impl AudioSink for AudioManager {
    fn play(&mut self, sound: Sound) {
        let Some(clip) = self.clips.get(&sound) else {
            return;
        };
        // Only play if the sound was successfully loaded
        if let Some(source) = &clip.source {
            // Ignore errors for sound playback - don't want to crash the game
            if let Ok(sink) = Sink::try_new(&self.stream_handle) {
                sink.set_volume(clip.volume);
                // Clone the buffered source (fast - just clones references)
                sink.append(source.clone());
                sink.detach();
            }
        }
    }

    fn set_volume(&mut self, sound: Sound, level: f32) {
        if let Some(clip) = self.clips.get_mut(&sound) {
            clip.volume = level.clamp(0.0, 1.0);
        }
    }
}

/// Opens the real audio device, degrading to silence when that is impossible
pub fn open_audio(sound_dir: &Path, volume: f32, mute: bool) -> Box<dyn AudioSink> {
    if mute {
        tracing::info!("audio muted");
        return Box::new(SilentAudio);
    }
    match AudioManager::new(sound_dir, volume) {
        Ok(manager) => Box::new(manager),
        Err(err) => {
            tracing::warn!("continuing without audio: {err:#}");
            Box::new(SilentAudio)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PowerUpKind;

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            Sound::for_event(&GameEvent::Fired { bullets: 2 }),
            Some(Sound::Laser)
        );
        assert_eq!(
            Sound::for_event(&GameEvent::EnemyDestroyed),
            Some(Sound::EnemyHit)
        );
        assert_eq!(
            Sound::for_event(&GameEvent::GameOver { score: 40 }),
            Some(Sound::GameOver)
        );
        assert_eq!(Sound::for_event(&GameEvent::LevelUp(2)), None);
        assert_eq!(
            Sound::for_event(&GameEvent::PowerUpCollected(PowerUpKind::Shield)),
            None
        );
    }

    #[test]
    fn test_missing_clip_is_an_error() {
        assert!(load_clip(Path::new("definitely/not/here.wav")).is_err());
    }

    #[test]
    fn test_muted_audio_is_silent() {
        let mut audio = open_audio(Path::new("nowhere"), 0.5, true);
        audio.set_volume(Sound::Laser, 0.2);
        audio.play(Sound::Laser);
    }
}
