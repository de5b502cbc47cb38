use core::f32::consts::PI;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Point,
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
};

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::color::{fade, Palette};
use crate::frame::AnalysisFrame;

const BAR_SPACING: u32 = 1; // Space between bars

/// Selects which drawing routine consumes the frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RenderMode {
    Bars,
    Circle,
    Wave,
}

impl RenderMode {
    pub fn next(self) -> Self {
        match self {
            RenderMode::Bars => RenderMode::Circle,
            RenderMode::Circle => RenderMode::Wave,
            RenderMode::Wave => RenderMode::Bars,
        }
    }
}

pub trait Renderer {
    fn draw<D: DrawTarget<Color = Rgb888>>(
        &self,
        target: &mut D,
        frame: &AnalysisFrame<'_>,
        palette: &Palette,
        hue: f32,
    ) -> Result<(), D::Error>;
}

/// Spectrum columns over the lower half of the buffer, one slot per bin.
pub struct BarsRenderer;

impl BarsRenderer {
    const FILL_TOP_OPACITY: f32 = 0.8;
    const FILL_BOTTOM_OPACITY: f32 = 0.2;
    const OVERLAY_OPACITY: f32 = 0.9;
    const OVERLAY_SCALE: f32 = 1.2;
    /// Every 4th bar gets a secondary overlay for visual texture.
    const TEXTURE_INTERVAL: usize = 4;
}

impl Renderer for BarsRenderer {
    fn draw<D>(
        &self,
        target: &mut D,
        frame: &AnalysisFrame<'_>,
        palette: &Palette,
        hue: f32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let bins = &frame.frequency[..frame.frequency.len() / 2];
        if bins.is_empty() {
            return Ok(());
        }
        let size = target.bounding_box().size;
        let (width, height) = (size.width, size.height);
        let slot_width = (width / bins.len() as u32).max(1);

        for (i, &value) in bins.iter().enumerate() {
            let x_left = i as u32 * slot_width;
            if x_left >= width {
                break;
            }
            let amplitude = value as f32 / 255.0;
            let bar_height = (amplitude * height as f32) as u32;
            if bar_height == 0 {
                continue;
            }
            let bar_width = slot_width.saturating_sub(BAR_SPACING).max(1);
            let base = palette.color_at(hue, i);

            // Vertical fade from the top of the bar down to the bottom edge.
            let top = height - bar_height;
            for y in top..height {
                let progress = if bar_height > 1 {
                    (y - top) as f32 / (bar_height - 1) as f32
                } else {
                    0.0
                };
                let opacity = Self::FILL_TOP_OPACITY
                    + (Self::FILL_BOTTOM_OPACITY - Self::FILL_TOP_OPACITY) * progress;
                Line::new(
                    Point::new(x_left as i32, y as i32),
                    Point::new((x_left + bar_width - 1) as i32, y as i32),
                )
                .into_styled(PrimitiveStyle::with_stroke(fade(base, opacity), 1))
                .draw(target)?;
            }

            if i % Self::TEXTURE_INTERVAL == 0 {
                let overlay_height =
                    ((bar_height as f32 * Self::OVERLAY_SCALE) as u32).min(height);
                let overlay_width = (bar_width / 2).max(1);
                Rectangle::new(
                    Point::new(x_left as i32, (height - overlay_height) as i32),
                    Size::new(overlay_width, overlay_height),
                )
                .into_styled(PrimitiveStyle::with_fill(fade(base, Self::OVERLAY_OPACITY)))
                .draw(target)?;
            }
        }
        Ok(())
    }
}

/// A base ring with the lower quarter of the spectrum plotted radially around
/// it, joined by segments and marked with amplitude-scaled dots.
pub struct CircleRenderer;

impl CircleRenderer {
    const BASE_RADIUS_RATIO: f32 = 0.5;
    const SWING_RATIO: f32 = 0.8;
    const RING_OPACITY: f32 = 0.2;
    const RING_STROKE: u32 = 2;
    const DOT_MIN_RADIUS: f32 = 2.0;
    const DOT_AMPLITUDE_RADIUS: f32 = 3.0;
}

impl Renderer for CircleRenderer {
    fn draw<D>(
        &self,
        target: &mut D,
        frame: &AnalysisFrame<'_>,
        palette: &Palette,
        hue: f32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let bins = &frame.frequency[..frame.frequency.len() / 4];
        if bins.is_empty() {
            return Ok(());
        }
        let size = target.bounding_box().size;
        let center_x = size.width as f32 / 2.0;
        let center_y = size.height as f32 / 2.0;
        let radius = center_x.min(center_y) * Self::BASE_RADIUS_RATIO;
        let center = Point::new(center_x as i32, center_y as i32);

        Circle::with_center(center, (radius * 2.0) as u32)
            .into_styled(PrimitiveStyle::with_stroke(
                fade(palette.base_color(hue), Self::RING_OPACITY),
                Self::RING_STROKE,
            ))
            .draw(target)?;

        let angle_step = 2.0 * PI / bins.len() as f32;
        let mut previous: Option<Point> = None;
        for (i, &value) in bins.iter().enumerate() {
            let amplitude = value as f32 / 255.0;
            let swing = radius + amplitude * radius * Self::SWING_RATIO;
            let angle = angle_step * i as f32;
            let point = Point::new(
                (center_x + angle.cos() * swing) as i32,
                (center_y + angle.sin() * swing) as i32,
            );
            let color = fade(palette.color_at(hue, i), 0.3 + amplitude * 0.7);

            if let Some(previous) = previous {
                Line::new(previous, point)
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(target)?;
            }
            let dot_radius = Self::DOT_MIN_RADIUS + amplitude * Self::DOT_AMPLITUDE_RADIUS;
            Circle::with_center(point, (dot_radius * 2.0) as u32)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)?;
            previous = Some(point);
        }
        Ok(())
    }
}

/// Oscilloscope trace of the time-domain buffer across the full width.
pub struct WaveRenderer;

impl WaveRenderer {
    const STROKE_OPACITY: f32 = 0.8;
    const STROKE_WIDTH: u32 = 2;
}

/// Vertical position of a waveform byte: 128 sits on the midline, the
/// extremes land half a surface height above or below it.
pub(crate) fn wave_sample_y(value: u8, height: u32) -> i32 {
    (value as f32 / 128.0 * height as f32 / 2.0) as i32
}

impl Renderer for WaveRenderer {
    fn draw<D>(
        &self,
        target: &mut D,
        frame: &AnalysisFrame<'_>,
        palette: &Palette,
        hue: f32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let samples = frame.time_domain;
        if samples.is_empty() {
            return Ok(());
        }
        let size = target.bounding_box().size;
        let slice_width = size.width as f32 / samples.len() as f32;
        let style = PrimitiveStyle::with_stroke(
            fade(palette.base_color(hue), Self::STROKE_OPACITY),
            Self::STROKE_WIDTH,
        );

        let mut x = 0.0f32;
        let mut previous: Option<Point> = None;
        for &value in samples {
            let point = Point::new(x as i32, wave_sample_y(value, size.height));
            if let Some(previous) = previous {
                Line::new(previous, point).into_styled(style).draw(target)?;
            }
            previous = Some(point);
            x += slice_width;
        }
        Ok(())
    }
}
