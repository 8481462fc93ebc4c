//! Sound cues
//!
//! The game only emits fire-and-forget events; whatever plays them must never
//! affect the simulation. On wasm32 `AudioManager` synthesizes the cues with
//! the Web Audio API - no external files needed!

/// Events the session reports to the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// A session started
    SessionStart,
    /// A ghost was caught
    Capture,
    /// Time ran out
    SessionEnd,
    /// Sound switched on or off
    MuteToggled { muted: bool },
}

/// Receiver for audio events
pub trait AudioSink {
    fn notify(&mut self, event: AudioEvent);
}

/// Discards every event (native builds, headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn notify(&mut self, _event: AudioEvent) {}
}

/// Keeps every event it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub events: Vec<AudioEvent>,
}

impl AudioSink for RecordingAudio {
    fn notify(&mut self, event: AudioEvent) {
        self.events.push(event);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioEvent, AudioSink};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        /// Set SFX volume (0.0 - 1.0)
        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

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

        /// Context ready to play, resumed if the browser suspended it
        fn live_context(&self) -> Option<&AudioContext> {
            let ctx = self.ctx.as_ref()?;
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// One tone: frequency glides to `freq * glide`, gain decays out
        fn tone(
            &self,
            ctx: &AudioContext,
            freq: f32,
            glide: f32,
            delay: f64,
            duration: f64,
            peak: f32,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time() + delay;

            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(freq * glide, t + duration)
                .ok();
            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + duration).ok();
        }

        /// Session start - rising C major arpeggio
        fn play_start(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [130.0, 164.0, 196.0, 262.0].into_iter().enumerate() {
                let duration = if i == 3 { 1.0 } else { 0.8 };
                self.tone(ctx, freq, 2.0, i as f64 * 0.2, duration, vol * 0.3);
            }
        }

        /// Capture - three quick falling "boo" tones
        fn play_capture(&self, ctx: &AudioContext, vol: f32) {
            for (freq, delay) in [(300.0, 0.0), (200.0, 0.05), (150.0, 0.1)] {
                self.tone(ctx, freq, 0.5, delay, 0.3, vol * 0.4);
            }
        }

        /// Game over - descending chord
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (freq, delay, duration) in [
                (440.0, 0.0, 1.5),
                (349.0, 0.3, 1.5),
                (293.0, 0.6, 1.5),
                (220.0, 0.9, 2.0),
            ] {
                self.tone(ctx, freq, 0.3, delay, duration, vol * 0.3);
            }
        }
    }

    impl AudioSink for AudioManager {
        fn notify(&mut self, event: AudioEvent) {
            if let AudioEvent::MuteToggled { muted } = event {
                self.set_muted(muted);
                return;
            }

            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.live_context() else { return };

            match event {
                AudioEvent::SessionStart => self.play_start(ctx, vol),
                AudioEvent::Capture => self.play_capture(ctx, vol),
                AudioEvent::SessionEnd => self.play_game_over(ctx, vol),
                AudioEvent::MuteToggled { .. } => {}
            }
        }
    }
}
