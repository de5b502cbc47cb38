use beat_dsp::{SpectrumAnalyzer, Track, TrackPlayer, FFT_SIZE_256};
use beat_viz::{AnalysisFrame, Visualizer, ACCENT};
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use lazy_static::lazy_static;
use std::{thread, time::Duration};

// Constants for visualization parameters
pub const WIDTH: u32 = 256;
pub const HEIGHT: u32 = 128;
pub const FRAME_DELAY_MS: u64 = 16;

const SAMPLE_RATE: u32 = 44_100;
const FFT_SIZE: usize = FFT_SIZE_256;

lazy_static! {
    // The studio's beat catalog, as stacked low partials pulsed at each
    // track's tempo.
    static ref TRACKS: Vec<Track> = vec![
        Track::new("Tokyo Nights", 85, &[55.0, 110.0, 220.0, 440.0]),
        Track::new("Cherry Blossom", 72, &[65.4, 130.8, 261.6]),
        Track::new("Kyoto Dreams", 90, &[49.0, 98.0, 196.0, 392.0]),
        Track::new("Zen Garden", 68, &[41.2, 82.4, 164.8]),
        Track::new("Samurai", 140, &[61.7, 123.5, 246.9, 493.9]),
    ];
}

fn main() -> Result<(), core::convert::Infallible> {
    // Create a display with the specified width and height
    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(WIDTH, HEIGHT));

    // Create a window with the specified title and size
    let mut window = Window::new(
        "Beat Visualizer",
        &OutputSettingsBuilder::new().scale(3).build(),
    );

    let mut analyzer = SpectrumAnalyzer::new(FFT_SIZE).expect("FFT_SIZE is in the supported set");
    let mut visualizer = Visualizer::new(ACCENT);
    let mut player = TrackPlayer::new(SAMPLE_RATE);
    let mut track_index = 0;
    player.load(TRACKS[track_index]);

    // One display frame's worth of audio per draw.
    let samples_per_frame = (SAMPLE_RATE as u64 * FRAME_DELAY_MS / 1000) as usize;
    let mut frequency = vec![0u8; analyzer.frequency_bin_count()];
    let mut time_domain = vec![0u8; analyzer.fft_size()];

    // Main loop
    'run: loop {
        window.update(&display);

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'run,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Space => player.toggle(),
                    Keycode::M => visualizer.cycle_mode(),
                    Keycode::C => visualizer.toggle_color_mode(),
                    Keycode::N => {
                        track_index = (track_index + 1) % TRACKS.len();
                        player.load(TRACKS[track_index]);
                        if let Some(title) = player.current_title() {
                            println!("Now playing: {}", title);
                        }
                    }
                    Keycode::Escape => break 'run,
                    _ => {}
                },
                _ => {}
            }
        }

        // While paused, nothing is analyzed and nothing is drawn; the display
        // keeps its last frame until playback resumes.
        if player.render_frame(&mut analyzer, samples_per_frame)
            && analyzer.frequency_byte_data(&mut frequency).is_ok()
            && analyzer.time_domain_byte_data(&mut time_domain).is_ok()
        {
            let frame = AnalysisFrame::new(&frequency, &time_domain);
            visualizer.render(&mut display, &frame)?;
        }

        // Wait for a frame delay
        thread::sleep(Duration::from_millis(FRAME_DELAY_MS));
    }

    Ok(())
}
