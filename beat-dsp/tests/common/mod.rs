use rand::Rng;
use wavegen::{sine, wf};

pub const SAMPLE_RATE: f32 = 44_100.0;

/// A pure tone as i16 playback samples.
pub fn sine_samples_i16(frequency: f32, amplitude: f32, count: usize) -> Vec<i16> {
    let waveform = wf!(f32, SAMPLE_RATE, sine!(frequency: frequency, amplitude: amplitude));
    waveform
        .iter()
        .take(count)
        .map(|s| (s * i16::MAX as f32) as i16)
        .collect()
}

pub fn silence(count: usize) -> Vec<i16> {
    vec![0; count]
}

pub fn noise_samples_i16(count: usize) -> Vec<i16> {
    let mut rng = rand::rng();
    (0..count).map(|_| rng.random_range(-8000..8000)).collect()
}

/// Index of the strongest frequency byte.
pub fn peak_bin(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .enumerate()
        .max_by_key(|&(_, &value)| value)
        .map(|(index, _)| index)
        .unwrap_or(0)
}
