use crate::color::Rgb;
use crate::settings::GridSettings;
use crate::simulation::RainSimulation;
use gif::{Encoder, Frame, Repeat};
use image::{ImageBuffer, Rgba};
use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Square pixels per grid cell in exported images.
pub const CELL_PIXELS: u32 = 10;

/// Frame cap per recording (~1 minute at the stock tick rate).
const GIF_MAX_FRAMES: usize = 600;

const BACKGROUND: Rgb = Rgb(0, 0, 0);

/// Seconds-since-epoch tag for export filenames.
pub fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Rasterize the grid to an RGBA buffer; returns (pixels, width, height).
pub fn render_rgba(sim: &RainSimulation, settings: &GridSettings) -> (Vec<u8>, u32, u32) {
    let width = settings.width as u32 * CELL_PIXELS;
    let height = settings.height as u32 * CELL_PIXELS;
    let mut pixels = vec![0u8; (width * height * 4) as usize];

    for cell_y in 0..settings.height {
        for cell_x in 0..settings.width {
            let Rgb(r, g, b) = sim.cell_color(cell_x, cell_y).unwrap_or(BACKGROUND);
            for py in 0..CELL_PIXELS {
                let row = cell_y as u32 * CELL_PIXELS + py;
                for px in 0..CELL_PIXELS {
                    let col = cell_x as u32 * CELL_PIXELS + px;
                    let offset = ((row * width + col) * 4) as usize;
                    pixels[offset] = r;
                    pixels[offset + 1] = g;
                    pixels[offset + 2] = b;
                    pixels[offset + 3] = 255;
                }
            }
        }
    }

    (pixels, width, height)
}

/// Write a PNG snapshot of the current grid.
pub fn save_png(sim: &RainSimulation, settings: &GridSettings, path: &Path) -> Result<(), String> {
    let (pixels, width, height) = render_rgba(sim, settings);
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, pixels)
        .ok_or_else(|| "Failed to build image buffer".to_string())?;
    img.save(path)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

/// Captures one frame per simulation tick and writes an animated GIF.
///
/// The pixel dimensions are pinned when the recorder is armed; frames rendered
/// at a different size (the grid was resized mid-recording) are skipped.
pub struct GifRecorder {
    width: u32,
    height: u32,
    delay_cs: u16,
    frames: Vec<Vec<u8>>,
}

impl GifRecorder {
    pub fn new(settings: &GridSettings, period: Duration) -> Self {
        let delay_cs = (period.as_millis() / 10).clamp(2, 100) as u16;
        Self {
            width: settings.width as u32 * CELL_PIXELS,
            height: settings.height as u32 * CELL_PIXELS,
            delay_cs,
            frames: Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= GIF_MAX_FRAMES
    }

    /// Capture the current grid as one frame.
    pub fn capture(&mut self, sim: &RainSimulation, settings: &GridSettings) {
        if self.is_full() {
            return;
        }
        let (pixels, width, height) = render_rgba(sim, settings);
        if width != self.width || height != self.height {
            return;
        }
        self.frames.push(pixels);
    }

    /// Encode all captured frames; returns the frame count on success.
    pub fn finish(self, path: &Path) -> Result<usize, String> {
        if self.frames.is_empty() {
            return Err("No frames recorded".to_string());
        }

        let file = File::create(path)
            .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
        let mut encoder = Encoder::new(file, self.width as u16, self.height as u16, &[])
            .map_err(|e| format!("Failed to start GIF encoder: {}", e))?;
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| format!("Failed to set GIF repeat: {}", e))?;

        let count = self.frames.len();
        for mut pixels in self.frames {
            let mut frame =
                Frame::from_rgba_speed(self.width as u16, self.height as u16, &mut pixels, 10);
            frame.delay = self.delay_cs;
            encoder
                .write_frame(&frame)
                .map_err(|e| format!("Failed to write GIF frame: {}", e))?;
        }

        Ok(count)
    }
}
