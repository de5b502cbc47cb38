#![no_std]
extern crate alloc;

mod analyzer;
mod player;

pub use analyzer::{
    compute_magnitude, is_valid_fft_size, normalize_sample, SpectrumAnalyzer, FFT_SIZE_1024,
    FFT_SIZE_128, FFT_SIZE_256, FFT_SIZE_512, FFT_SIZE_64, VALID_FFT_SIZES,
};
pub use player::{Track, TrackPlayer};
