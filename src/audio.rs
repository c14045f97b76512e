//! Procedurally generated sound cues
//!
//! Every cue is a short sequence of sine tones rendered to 16-bit mono PCM
//! the first time it plays. Where the samples go is up to an [`AudioSink`].

use std::collections::HashMap;
use std::io::Write;

use crate::sim::GameEvent;

/// Output rate of the synthesized cues
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Pellet eaten
    PelletChomp,
    /// Caught by a ghost
    Death,
    /// Board cleared
    Victory,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::PelletChomp,
        SoundEffect::Death,
        SoundEffect::Victory,
        SoundEffect::GameOver,
    ];

    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::PelletEaten => SoundEffect::PelletChomp,
            GameEvent::Death => SoundEffect::Death,
            GameEvent::Won => SoundEffect::Victory,
            GameEvent::Lost => SoundEffect::GameOver,
        }
    }

    /// Tones played back to back
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::PelletChomp => CHOMP,
            SoundEffect::Death => DEATH,
            SoundEffect::Victory => VICTORY,
            SoundEffect::GameOver => GAME_OVER,
        }
    }
}

/// Short high blip
const CHOMP: &[Tone] = &[Tone::steady(988.0, 50, 3000)];

/// Falling sweep that fades out over a second
const DEATH: &[Tone] = &[Tone {
    start_hz: 440.0,
    end_hz: 140.0,
    millis: 1000,
    amplitude: 5000,
    fade: true,
}];

const VICTORY: &[Tone] = &[
    Tone::steady(400.0, 100, 4000),
    Tone::steady(500.0, 100, 4000),
    Tone::steady(600.0, 100, 4000),
    Tone::fading(800.0, 400, 4000),
];

const GAME_OVER: &[Tone] = &[
    Tone::steady(400.0, 200, 4000),
    Tone::steady(350.0, 200, 4000),
    Tone::steady(300.0, 200, 4000),
    Tone::fading(200.0, 400, 4000),
];

/// One sine segment. The pitch glides linearly from `start_hz` to `end_hz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start_hz: f64,
    pub end_hz: f64,
    pub millis: u32,
    pub amplitude: i16,
    /// Linear fade to silence over the tone
    pub fade: bool,
}

impl Tone {
    const fn steady(hz: f64, millis: u32, amplitude: i16) -> Self {
        Self {
            start_hz: hz,
            end_hz: hz,
            millis,
            amplitude,
            fade: false,
        }
    }

    const fn fading(hz: f64, millis: u32, amplitude: i16) -> Self {
        Self {
            fade: true,
            ..Self::steady(hz, millis, amplitude)
        }
    }

    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (sample_rate as u64 * self.millis as u64 / 1000) as usize
    }

    fn render_into(&self, sample_rate: u32, out: &mut Vec<i16>) {
        let len = self.sample_count(sample_rate);
        let seconds = self.millis as f64 / 1000.0;
        for i in 0..len {
            let t = i as f64 / sample_rate as f64;
            let progress = t / seconds;
            let hz = self.start_hz + (self.end_hz - self.start_hz) * progress;
            let envelope = if self.fade { 1.0 - progress } else { 1.0 };
            let value = self.amplitude as f64 * envelope * (std::f64::consts::TAU * hz * t).sin();
            out.push(value as i16);
        }
    }
}

/// Render a cue to mono PCM
pub fn synthesize(effect: SoundEffect, sample_rate: u32) -> Vec<i16> {
    let tones = effect.tones();
    let mut samples = Vec::with_capacity(tones.iter().map(|t| t.sample_count(sample_rate)).sum());
    for tone in tones {
        tone.render_into(sample_rate, &mut samples);
    }
    samples
}

/// Somewhere to send rendered cues
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, samples: &[i16], volume: f32);
}

/// Rings the terminal bell for deaths and endings.
///
/// A bell cannot play PCM, so the samples and volume are ignored, and pellet
/// chomps (one every few ticks) are not played at all.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    pub fn rings_for(effect: SoundEffect) -> bool {
        effect != SoundEffect::PelletChomp
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, effect: SoundEffect, _samples: &[i16], _volume: f32) {
        if !Self::rings_for(effect) {
            return;
        }
        let mut err = std::io::stderr();
        if let Err(e) = err.write_all(b"\x07").and_then(|()| err.flush()) {
            log::trace!("Terminal bell failed: {e}");
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    /// Cues rendered so far
    bank: HashMap<SoundEffect, Vec<i16>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    /// With no sink, playback is a no-op and nothing is ever rendered
    pub fn new(sink: Option<Box<dyn AudioSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio sink - audio disabled");
        }
        Self {
            sink,
            bank: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &crate::Settings, sink: Option<Box<dyn AudioSink>>) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(sink) = self.sink.as_mut() else { return };
        let samples = self
            .bank
            .entry(effect)
            .or_insert_with(|| synthesize(effect, SAMPLE_RATE));
        sink.play(effect, samples, vol);
    }

    /// Play the cue for each event of a tick, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for &event in events {
            self.play(SoundEffect::for_event(event));
        }
    }
}
