use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

#[allow(unused_imports)]
use micromath::F32Ext;

/// The studio's crimson accent.
pub const ACCENT: Rgb888 = Rgb888::new(166, 5, 26);

/// Degrees the shared hue advances per rendered frame.
pub(crate) const HUE_STEP: f32 = 0.5;
/// Degrees between neighbouring elements in rotating mode.
const ELEMENT_HUE_OFFSET: f32 = 5.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorMode {
    /// Fixed accent color.
    Accent,
    /// Hue rotates continuously, offset per element.
    Rainbow,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Accent => ColorMode::Rainbow,
            ColorMode::Rainbow => ColorMode::Accent,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Palette {
    mode: ColorMode,
    accent: Rgb888,
}

impl Palette {
    pub fn new(mode: ColorMode, accent: Rgb888) -> Self {
        Self { mode, accent }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// Color for whole-frame strokes (the base ring, the waveform).
    pub fn base_color(&self, hue: f32) -> Rgb888 {
        match self.mode {
            ColorMode::Accent => self.accent,
            ColorMode::Rainbow => hue_to_rgb(hue),
        }
    }

    /// Per-element color; rotating mode offsets the frame hue per element.
    pub fn color_at(&self, hue: f32, index: usize) -> Rgb888 {
        match self.mode {
            ColorMode::Accent => self.accent,
            ColorMode::Rainbow => hue_to_rgb(hue + index as f32 * ELEMENT_HUE_OFFSET),
        }
    }
}

/// Fully saturated, half-lightness hue wheel position to RGB.
pub fn hue_to_rgb(hue: f32) -> Rgb888 {
    let hue = hue % 360.0;
    let ramp = (255.0 * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs())) as u8;
    match (hue / 60.0) as u32 {
        0 => Rgb888::new(255, ramp, 0),
        1 => Rgb888::new(ramp, 255, 0),
        2 => Rgb888::new(0, 255, ramp),
        3 => Rgb888::new(0, ramp, 255),
        4 => Rgb888::new(ramp, 0, 255),
        _ => Rgb888::new(255, 0, ramp),
    }
}

/// Alpha compositing over the cleared black surface reduces to channel
/// scaling.
pub fn fade(color: Rgb888, opacity: f32) -> Rgb888 {
    let k = opacity.clamp(0.0, 1.0);
    Rgb888::new(
        (color.r() as f32 * k) as u8,
        (color.g() as f32 * k) as u8,
        (color.b() as f32 * k) as u8,
    )
}
