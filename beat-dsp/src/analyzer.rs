use alloc::{vec, vec::Vec};

use microdsp::common::{apply_window_function, real_fft, WindowFunctionType::Hann};
use microfft::Complex32;
#[allow(unused_imports)]
use micromath::F32Ext;

pub const FFT_SIZE_64: usize = 64;
pub const FFT_SIZE_128: usize = 128;
pub const FFT_SIZE_256: usize = 256;
pub const FFT_SIZE_512: usize = 512;
pub const FFT_SIZE_1024: usize = 1024;

pub const VALID_FFT_SIZES: [usize; 5] = [
    FFT_SIZE_64,
    FFT_SIZE_128,
    FFT_SIZE_256,
    FFT_SIZE_512,
    FFT_SIZE_1024,
];

pub fn is_valid_fft_size(value: usize) -> bool {
    VALID_FFT_SIZES.contains(&value)
}

/// Blend factor between the previous spectrum and the new one. Higher values
/// favour the history, giving the display its slow falloff.
const SMOOTHING_TIME_CONSTANT: f32 = 0.8;

// Decibel range mapped linearly onto the 0..=255 output bytes.
const MIN_DECIBELS: f32 = -100.0;
const MAX_DECIBELS: f32 = -30.0;

/// Normalize a single sample from i16 to f32.
pub fn normalize_sample(sample: i16) -> f32 {
    sample as f32 / i16::MAX as f32
}

/// Compute per-bin magnitudes of a half spectrum, scaled by the transform size.
pub fn compute_magnitude(
    spectrum: &[Complex32],
    fft_size: usize,
    out: &mut [f32],
) -> Result<(), &'static str> {
    if out.len() != spectrum.len() {
        return Err("magnitude buffer must match the spectrum length");
    }
    let scale = 1.0 / fft_size as f32;
    for (mag, bin) in out.iter_mut().zip(spectrum) {
        *mag = (bin.re * bin.re + bin.im * bin.im).sqrt() * scale;
    }
    Ok(())
}

fn db_to_byte(magnitude: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS) * 255.0;
    scaled.clamp(0.0, 255.0) as u8
}

fn sample_to_byte(sample: f32) -> u8 {
    (128.0 * (1.0 + sample)).clamp(0.0, 255.0) as u8
}

/// Produces the two per-frame byte buffers the visualizer consumes: smoothed
/// frequency magnitudes and the raw time-domain waveform, both from the most
/// recent `fft_size` playback samples.
pub struct SpectrumAnalyzer {
    fft_size: usize,
    /// Most recent `fft_size` normalized samples, oldest first.
    samples: Vec<f32>,
    /// Windowed copy handed to the in-place FFT.
    scratch: Vec<f32>,
    magnitudes: Vec<f32>,
    smoothed: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_size: usize) -> Result<Self, &'static str> {
        if !is_valid_fft_size(fft_size) {
            return Err("unsupported transform size");
        }
        Ok(Self {
            fft_size,
            samples: vec![0.0; fft_size],
            scratch: vec![0.0; fft_size],
            magnitudes: vec![0.0; fft_size / 2],
            smoothed: vec![0.0; fft_size / 2],
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Append playback samples, keeping only the most recent `fft_size`.
    /// Missing history reads as silence.
    pub fn push_samples(&mut self, samples: &[i16]) {
        if samples.len() >= self.fft_size {
            let tail = &samples[samples.len() - self.fft_size..];
            for (dst, &s) in self.samples.iter_mut().zip(tail) {
                *dst = normalize_sample(s);
            }
        } else {
            self.samples.copy_within(samples.len().., 0);
            let start = self.fft_size - samples.len();
            for (dst, &s) in self.samples[start..].iter_mut().zip(samples) {
                *dst = normalize_sample(s);
            }
        }
    }

    /// Fill `out` with the current frequency-magnitude bytes. Bins beyond
    /// `out.len()` are dropped; a slice longer than the bin count is an error.
    pub fn frequency_byte_data(&mut self, out: &mut [u8]) -> Result<(), &'static str> {
        if out.len() > self.frequency_bin_count() {
            return Err("output slice longer than the frequency bin count");
        }
        self.scratch.copy_from_slice(&self.samples);
        apply_window_function(Hann, &mut self.scratch);
        let spectrum = real_fft(&mut self.scratch);
        // The real coefficient at Nyquist is packed into bin 0's imaginary slot.
        spectrum[0].im = 0.0;
        compute_magnitude(spectrum, self.fft_size, &mut self.magnitudes)?;
        for (smoothed, &mag) in self.smoothed.iter_mut().zip(&self.magnitudes) {
            *smoothed =
                SMOOTHING_TIME_CONSTANT * *smoothed + (1.0 - SMOOTHING_TIME_CONSTANT) * mag;
        }
        for (byte, &smoothed) in out.iter_mut().zip(&self.smoothed) {
            *byte = db_to_byte(smoothed);
        }
        Ok(())
    }

    /// Fill `out` with the most recent waveform samples as bytes, 128 meaning
    /// silence. A slice longer than `fft_size` is an error.
    pub fn time_domain_byte_data(&self, out: &mut [u8]) -> Result<(), &'static str> {
        if out.len() > self.fft_size {
            return Err("output slice longer than the transform size");
        }
        let start = self.fft_size - out.len();
        for (byte, &sample) in out.iter_mut().zip(&self.samples[start..]) {
            *byte = sample_to_byte(sample);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_magnitude() {
        let mut spectrum = [Complex32 { re: 0.0, im: 0.0 }; 32];
        spectrum[0] = Complex32 { re: 64.0, im: 0.0 };
        spectrum[1] = Complex32 { re: 0.0, im: 64.0 };
        spectrum[31] = Complex32 { re: -64.0, im: 0.0 };

        let mut magnitudes = [0.0; 32];
        compute_magnitude(&spectrum, 64, &mut magnitudes).unwrap();

        assert_eq!(magnitudes[0], 1.0);
        assert_eq!(magnitudes[1], 1.0);
        assert_eq!(magnitudes[31], 1.0);
        assert_eq!(magnitudes[2], 0.0);
    }

    #[test]
    fn test_compute_magnitude_length_mismatch() {
        let spectrum = [Complex32 { re: 0.0, im: 0.0 }; 32];
        let mut magnitudes = [0.0; 16];
        assert!(compute_magnitude(&spectrum, 64, &mut magnitudes).is_err());
    }

    #[test]
    fn test_transform_size_validation() {
        for size in VALID_FFT_SIZES {
            assert!(SpectrumAnalyzer::new(size).is_ok());
        }
        assert!(SpectrumAnalyzer::new(0).is_err());
        assert!(SpectrumAnalyzer::new(100).is_err());
        assert!(SpectrumAnalyzer::new(2048).is_err());
    }

    #[test]
    fn test_push_samples_keeps_most_recent() {
        let mut analyzer = SpectrumAnalyzer::new(64).unwrap();
        let first = [i16::MAX; 64];
        analyzer.push_samples(&first);
        // Half a buffer of silence shifts the loud half to the front.
        analyzer.push_samples(&[0i16; 32]);

        let mut bytes = [0u8; 64];
        analyzer.time_domain_byte_data(&mut bytes).unwrap();
        assert!(bytes[..32].iter().all(|&b| b == 255));
        assert!(bytes[32..].iter().all(|&b| b == 128));
    }

    #[test]
    fn test_db_to_byte_bounds() {
        assert_eq!(db_to_byte(0.0), 0);
        assert_eq!(db_to_byte(-1.0), 0);
        // Unity magnitude is 0 dB, well above the mapped ceiling.
        assert_eq!(db_to_byte(1.0), 255);
        // -100 dB sits exactly on the floor.
        assert_eq!(db_to_byte(1e-5), 0);
    }

    #[test]
    fn test_sample_to_byte_clamps() {
        assert_eq!(sample_to_byte(0.0), 128);
        assert_eq!(sample_to_byte(1.0), 255);
        assert_eq!(sample_to_byte(-1.5), 0);
    }

    #[test]
    fn test_normalize_sample() {
        use approx::assert_abs_diff_eq;

        assert_abs_diff_eq!(normalize_sample(i16::MAX), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(normalize_sample(i16::MAX / 2), 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(normalize_sample(0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(normalize_sample(-i16::MAX), -1.0, epsilon = 1e-6);
    }
}
