#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
extern crate alloc;

mod color;
mod frame;
mod renderer;
mod visualizer;

#[cfg(test)]
pub(crate) mod test_canvas;

pub use color::{fade, hue_to_rgb, ColorMode, Palette, ACCENT};
pub use frame::AnalysisFrame;
pub use renderer::{BarsRenderer, CircleRenderer, RenderMode, Renderer, WaveRenderer};
pub use visualizer::Visualizer;
