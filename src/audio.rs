//! Sound cues for eating, dying and pausing.
//!
//! Tones are synthesized into in-memory WAV files, so there are no assets to
//! ship. The board stays silent until [`SoundBoard::enable`] runs after the
//! player's first key press or click, and any failure just leaves it silent.

use crate::events::GameEvent;
use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cue {
    Ate,
    Died,
    Paused,
}

impl Cue {
    /// (frequency Hz, duration s, relative loudness)
    fn tone(self) -> (f32, f32, f32) {
        match self {
            Cue::Ate => (880.0, 0.08, 0.35),
            Cue::Died => (110.0, 0.25, 0.6),
            Cue::Paused => (440.0, 0.06, 0.4),
        }
    }

    /// The cue's tone as a mono PCM16 WAV file.
    pub fn wav(self) -> Vec<u8> {
        let (freq, secs, _) = self.tone();
        let samples = sine_samples(freq, secs, 0.7);
        let mut wav = wav_header(samples.len() as u32);
        wav.extend(samples.iter().flat_map(|s| s.to_le_bytes()));
        wav
    }
}

/// Which cue, if any, an engine event should trigger.
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::Ate => Some(Cue::Ate),
        GameEvent::Died => Some(Cue::Died),
        GameEvent::PauseToggled { .. } => Some(Cue::Paused),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to load {cue:?} sound: {reason}")]
    Load { cue: Cue, reason: String },
}

const SAMPLE_RATE: u32 = 44_100;

/// Step between volume levels for the `-` / `=` keys.
pub const VOLUME_STEP: f32 = 0.05;

fn sine_samples(frequency_hz: f32, duration_seconds: f32, volume: f32) -> Vec<i16> {
    let count = (duration_seconds * SAMPLE_RATE as f32) as u32;
    let amplitude = volume.clamp(0.0, 1.0) * 0.7 * i16::MAX as f32;
    (0..count)
        .map(|n| {
            let t = n as f32 / SAMPLE_RATE as f32;
            (amplitude * (std::f32::consts::TAU * frequency_hz * t).sin()) as i16
        })
        .collect()
}

/// 44-byte RIFF header for `num_samples` mono 16-bit samples.
fn wav_header(num_samples: u32) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS: u16 = 16;
    let block_align = CHANNELS * BITS / 8;
    let data_size = num_samples * block_align as u32;

    let mut h = Vec::with_capacity(44 + data_size as usize);
    h.extend_from_slice(b"RIFF");
    h.extend_from_slice(&(36 + data_size).to_le_bytes());
    h.extend_from_slice(b"WAVEfmt ");
    h.extend_from_slice(&16u32.to_le_bytes());
    h.extend_from_slice(&1u16.to_le_bytes()); // PCM
    h.extend_from_slice(&CHANNELS.to_le_bytes());
    h.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    h.extend_from_slice(&(SAMPLE_RATE * block_align as u32).to_le_bytes());
    h.extend_from_slice(&block_align.to_le_bytes());
    h.extend_from_slice(&BITS.to_le_bytes());
    h.extend_from_slice(b"data");
    h.extend_from_slice(&data_size.to_le_bytes());
    h
}

struct Sounds {
    ate: Sound,
    died: Sound,
    paused: Sound,
}

impl Sounds {
    fn get(&self, cue: Cue) -> &Sound {
        match cue {
            Cue::Ate => &self.ate,
            Cue::Died => &self.died,
            Cue::Paused => &self.paused,
        }
    }
}

async fn load_cue(cue: Cue) -> Result<Sound, AudioError> {
    load_sound_from_bytes(&cue.wav())
        .await
        .map_err(|e| AudioError::Load { cue, reason: format!("{e:?}") })
}

pub struct SoundBoard {
    sounds: Option<Sounds>,
    volume: f32,
    gave_up: bool,
}

impl SoundBoard {
    pub fn new(volume: f32) -> Self {
        Self { sounds: None, volume: volume.clamp(0.0, 1.0), gave_up: false }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Shifts the volume by `delta`, clamped to 0..=1, and returns the new level.
    pub fn adjust_volume(&mut self, delta: f32) -> f32 {
        self.volume = (self.volume + delta).clamp(0.0, 1.0);
        self.volume
    }

    pub fn is_enabled(&self) -> bool {
        self.sounds.is_some()
    }

    /// Whether a call to [`enable`](Self::enable) would still do anything.
    pub fn wants_enable(&self) -> bool {
        self.sounds.is_none() && !self.gave_up
    }

    /// Loads the cues. Only call this in response to user input.
    pub async fn enable(&mut self) {
        if !self.wants_enable() {
            return;
        }
        let loaded = async {
            Ok::<_, AudioError>(Sounds {
                ate: load_cue(Cue::Ate).await?,
                died: load_cue(Cue::Died).await?,
                paused: load_cue(Cue::Paused).await?,
            })
        }
        .await;
        match loaded {
            Ok(sounds) => {
                log::info!("audio enabled at volume {:.2}", self.volume);
                self.sounds = Some(sounds);
            }
            Err(e) => {
                log::warn!("{e}; continuing without sound");
                self.gave_up = true;
            }
        }
    }

    pub fn play(&self, cue: Cue) {
        let Some(sounds) = &self.sounds else { return };
        let (_, _, loudness) = cue.tone();
        audio::play_sound(sounds.get(cue), PlaySoundParams { looped: false, volume: loudness * self.volume });
    }

    pub fn handle(&self, event: &GameEvent) {
        if let Some(cue) = cue_for(event) {
            self.play(cue);
        }
    }
}
