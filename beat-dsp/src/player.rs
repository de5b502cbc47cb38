use alloc::vec::Vec;

use core::f32::consts::PI;

#[allow(unused_imports)]
use micromath::F32Ext;

#[cfg(feature = "logging")]
use defmt::info;
#[cfg(feature = "logging")]
use defmt_rtt as _;

use crate::analyzer::SpectrumAnalyzer;

const TWO_PI: f32 = 2.0 * PI;

/// Peak output level, leaving headroom below full scale.
const OUTPUT_LEVEL: f32 = 0.8;

/// A synthesized beat: stacked sine partials with the level pulsed at the
/// track's tempo.
#[derive(Clone, Copy, Debug)]
pub struct Track {
    pub title: &'static str,
    pub bpm: u16,
    pub partials: &'static [f32],
}

impl Track {
    pub const fn new(title: &'static str, bpm: u16, partials: &'static [f32]) -> Self {
        Self {
            title,
            bpm,
            partials,
        }
    }
}

/// Playback transport plus the sample source feeding the analyzer.
///
/// While paused, `render_frame` produces nothing and leaves the analyzer
/// untouched, so no further visualization frames appear until playback
/// resumes.
pub struct TrackPlayer {
    sample_rate: u32,
    playing: bool,
    /// Seconds into the loaded track.
    elapsed: f32,
    track: Option<Track>,
    buffer: Vec<i16>,
}

impl TrackPlayer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            playing: false,
            elapsed: 0.0,
            track: None,
            buffer: Vec::new(),
        }
    }

    /// Load a track from the start. The transport state is left as-is, so
    /// switching tracks mid-playback keeps playing.
    pub fn load(&mut self, track: Track) {
        #[cfg(feature = "logging")]
        info!("loading track: {}", track.title);
        self.track = Some(track);
        self.elapsed = 0.0;
    }

    pub fn play(&mut self) {
        #[cfg(feature = "logging")]
        info!("playback started");
        self.playing = true;
    }

    pub fn pause(&mut self) {
        #[cfg(feature = "logging")]
        info!("playback paused");
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_title(&self) -> Option<&'static str> {
        self.track.map(|t| t.title)
    }

    /// Synthesize the next `frames` samples of the loaded track and push them
    /// into the analyzer. Returns whether any samples were produced.
    pub fn render_frame(&mut self, analyzer: &mut SpectrumAnalyzer, frames: usize) -> bool {
        if !self.playing || frames == 0 {
            return false;
        }
        let Some(track) = self.track else {
            return false;
        };

        let dt = 1.0 / self.sample_rate as f32;
        let beat_hz = track.bpm as f32 / 60.0;
        // Partials fall off as 1/(k+1); the weight sum renormalizes to unity.
        let weight_sum: f32 = (0..track.partials.len()).map(|k| 1.0 / (k + 1) as f32).sum();

        self.buffer.clear();
        self.buffer.reserve(frames);
        for _ in 0..frames {
            let t = self.elapsed;
            let pulse = 0.55 + 0.45 * (TWO_PI * beat_hz * t).sin().abs();
            let mut mix = 0.0;
            for (k, &frequency) in track.partials.iter().enumerate() {
                mix += (TWO_PI * frequency * t).sin() / (k + 1) as f32;
            }
            let sample = if weight_sum > 0.0 {
                mix / weight_sum * pulse * OUTPUT_LEVEL
            } else {
                0.0
            };
            self.buffer.push((sample * i16::MAX as f32) as i16);
            self.elapsed += dt;
        }
        analyzer.push_samples(&self.buffer);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TRACK: Track = Track::new("Test Tone", 120, &[220.0]);

    #[test]
    fn test_transport_transitions() {
        let mut player = TrackPlayer::new(44_100);
        assert!(!player.is_playing());
        player.play();
        assert!(player.is_playing());
        player.toggle();
        assert!(!player.is_playing());
        player.toggle();
        assert!(player.is_playing());
        player.pause();
        assert!(!player.is_playing());
    }

    #[test]
    fn test_load_keeps_transport_state() {
        let mut player = TrackPlayer::new(44_100);
        player.play();
        player.load(TEST_TRACK);
        assert!(player.is_playing());
        assert_eq!(player.current_title(), Some("Test Tone"));
    }

    #[test]
    fn test_render_frame_requires_playing_and_track() {
        let mut player = TrackPlayer::new(44_100);
        let mut analyzer = SpectrumAnalyzer::new(256).unwrap();

        assert!(!player.render_frame(&mut analyzer, 512));
        player.play();
        // Playing but nothing loaded.
        assert!(!player.render_frame(&mut analyzer, 512));
        player.load(TEST_TRACK);
        assert!(player.render_frame(&mut analyzer, 512));
        assert!(!player.render_frame(&mut analyzer, 0));
    }

    #[test]
    fn test_synthesis_stays_in_range() {
        let mut player = TrackPlayer::new(44_100);
        let mut analyzer = SpectrumAnalyzer::new(256).unwrap();
        player.load(Track::new("Stacked", 140, &[55.0, 110.0, 220.0, 440.0]));
        player.play();
        assert!(player.render_frame(&mut analyzer, 4096));

        let mut bytes = [0u8; 256];
        analyzer.time_domain_byte_data(&mut bytes).unwrap();
        // Headroom keeps the waveform off the byte rails.
        assert!(bytes.iter().any(|&b| b != 128));
        assert!(bytes.iter().all(|&b| b > 0 && b < 255));
    }
}
