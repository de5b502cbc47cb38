use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, prelude::*};

#[cfg(feature = "logging")]
use defmt::info;
#[cfg(feature = "logging")]
use defmt_rtt as _;

use crate::color::{ColorMode, Palette, HUE_STEP};
use crate::frame::AnalysisFrame;
use crate::renderer::{BarsRenderer, CircleRenderer, RenderMode, Renderer, WaveRenderer};

/// The consolidated frequency visualizer: clears and repaints the whole
/// surface from one analysis frame per call.
///
/// Stateless per frame apart from the rotating hue. Mode and color switches
/// take effect on the next rendered frame; a zero-sized surface or an empty
/// input buffer is skipped silently, and drawing resumes once both are
/// available again.
pub struct Visualizer {
    mode: RenderMode,
    palette: Palette,
    hue: f32,
    bars: BarsRenderer,
    circle: CircleRenderer,
    wave: WaveRenderer,
}

impl Visualizer {
    pub fn new(accent: Rgb888) -> Self {
        #[cfg(feature = "std")]
        std::println!("Visualizer::new with accent {:?}", accent);
        #[cfg(feature = "logging")]
        info!(
            "Visualizer::new with accent ({}, {}, {})",
            accent.r(),
            accent.g(),
            accent.b()
        );
        Self {
            mode: RenderMode::Bars,
            palette: Palette::new(ColorMode::Accent, accent),
            hue: 0.0,
            bars: BarsRenderer,
            circle: CircleRenderer,
            wave: WaveRenderer,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
    }

    pub fn color_mode(&self) -> ColorMode {
        self.palette.mode()
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.palette.set_mode(mode);
    }

    pub fn toggle_color_mode(&mut self) {
        self.palette.set_mode(self.palette.mode().toggled());
    }

    pub fn render<D>(&mut self, target: &mut D, frame: &AnalysisFrame<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let size = target.bounding_box().size;
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        let buffer = match self.mode {
            RenderMode::Wave => frame.time_domain,
            _ => frame.frequency,
        };
        if buffer.is_empty() {
            return Ok(());
        }

        target.clear(Rgb888::BLACK)?;
        self.hue = (self.hue + HUE_STEP) % 360.0;
        match self.mode {
            RenderMode::Bars => self.bars.draw(target, frame, &self.palette, self.hue),
            RenderMode::Circle => self.circle.draw(target, frame, &self.palette, self.hue),
            RenderMode::Wave => self.wave.draw(target, frame, &self.palette, self.hue),
        }
    }
}
