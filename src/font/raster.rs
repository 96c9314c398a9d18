//! Rasterization of sample text.
//!
//! The pipeline only depends on the [`Rasterizer`] trait. [`RasterEngine`] is
//! the production implementation on top of `font-kit`.

use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;
use font_kit::canvas::{Canvas, Format, RasterizationOptions};
use font_kit::font::Font;
use font_kit::hinting::HintingOptions;
use pathfinder_geometry::transform2d::Transform2F;
use pathfinder_geometry::vector::{vec2f, vec2i};
use tracing::{debug, warn};
use crate::error::{Error, Result};
use crate::models::{Config, FontSample};
use super::sample::SampleText;

/// An 8-bit alpha coverage bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageSurface {
    pub width: usize,
    pub height: usize,
    /// Number of bytes between successive rows
    pub stride: usize,
    pub pixels: Vec<u8>,
}

impl CoverageSurface {
    /// Blank (fully transparent) surface with a tightly packed stride
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            stride: width,
            pixels: vec![0; width * height],
        }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Composite `src` onto the pixel at (x, y) with the alpha OVER operator.
    /// Coordinates outside the surface are ignored.
    pub fn blend(&mut self, x: i32, y: i32, src: u8) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let index = y as usize * self.stride + x as usize;
        let dst = self.pixels[index] as u32;
        let src = src as u32;
        self.pixels[index] = (src + (dst * (255 - src) + 127) / 255) as u8;
    }
}

/// Extents of the rendered sample, in pixels, y pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Offset from the text origin to the left edge of the ink
    pub x_bearing: f32,
    /// Offset from the baseline to the top edge of the ink (negative above)
    pub y_bearing: f32,
    /// Ink width of the whole sample
    pub width: f32,
    /// Ink height of the whole sample
    pub height: f32,
    /// Ink height of the reference glyph
    pub x_height: f32,
}

/// Output of rendering one font
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSample {
    pub surface: CoverageSurface,
    pub metrics: LayoutMetrics,
}

/// Capability to render a sample string with a font
pub trait Rasterizer: Sync {
    /// Render `sample` with `font` at `point_size`.
    ///
    /// Fails with [`Error::FontLoad`] when the font cannot be opened and with
    /// [`Error::Render`] when the text cannot be laid out or painted.
    fn render(&self, font: &FontSample, sample: &SampleText, point_size: f32)
        -> Result<RenderedSample>;
}

/// Process-wide handle on the font-kit rasterizer.
///
/// Created once at startup. Calls into the engine are serialized; the font
/// face of each call lives only for that call.
pub struct RasterEngine {
    lock: Mutex<()>,
    timeout: Option<Duration>,
}

impl RasterEngine {
    pub fn new(config: &Config) -> Self {
        debug!(timeout = ?config.render_timeout, "rasterization engine ready");
        Self {
            lock: Mutex::new(()),
            timeout: config.render_timeout,
        }
    }
}

impl Drop for RasterEngine {
    fn drop(&mut self) {
        debug!("rasterization engine shut down");
    }
}

impl Rasterizer for RasterEngine {
    fn render(
        &self,
        font: &FontSample,
        sample: &SampleText,
        point_size: f32,
    ) -> Result<RenderedSample> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let limit = match self.timeout {
            Some(limit) => limit,
            None => return render_font(&font.path, sample, point_size),
        };

        // A hung render keeps its thread; the batch moves on without it. The
        // lock is released while that thread may still be inside font-kit,
        // which stays sound because each FreeType library handle is
        // thread-local and the font face never leaves its thread.
        let path = font.path.clone();
        let sample = *sample;
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(format!("render-{}", font.id))
            .spawn(move || {
                let _ = tx.send(render_font(&path, &sample, point_size));
            })?;

        match rx.recv_timeout(limit) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(font = %font.id, "render did not finish within {:?}", limit);
                Err(Error::Render(format!("timed out after {:?}", limit)))
            }
            Err(RecvTimeoutError::Disconnected) => Err(Error::Render(
                "render worker exited without a result".to_string(),
            )),
        }
    }
}

/// A glyph and the pen position it is drawn at
struct PlacedGlyph {
    id: u32,
    pen_x: f32,
}

/// Union of ink boxes, y pointing down
#[derive(Default)]
struct InkBox {
    bounds: Option<(f32, f32, f32, f32)>,
}

impl InkBox {
    fn add(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) {
        self.bounds = Some(match self.bounds {
            None => (min_x, min_y, max_x, max_y),
            Some((x0, y0, x1, y1)) => (x0.min(min_x), y0.min(min_y), x1.max(max_x), y1.max(max_y)),
        });
    }
}

/// Glyph for `c`; glyph 0 is `.notdef` and counts as missing
fn glyph_for(font: &Font, c: char) -> Result<u32> {
    font.glyph_for_char(c)
        .filter(|&id| id != 0)
        .ok_or_else(|| Error::Render(format!("no glyph for {:?} (U+{:04X})", c, c as u32)))
}

/// Ink box of one glyph at `pen_x`, scaled from font units to pixels
fn glyph_ink(font: &Font, glyph: u32, pen_x: f32, scale: f32) -> Result<Option<(f32, f32, f32, f32)>> {
    let bounds = font
        .typographic_bounds(glyph)
        .map_err(|e| Error::Render(format!("glyph {}: {}", glyph, e)))?;
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return Ok(None);
    }
    Ok(Some((
        pen_x + bounds.min_x() * scale,
        -bounds.max_y() * scale,
        pen_x + bounds.max_x() * scale,
        -bounds.min_y() * scale,
    )))
}

/// Metrics-only pass: place every glyph and measure the ink extents
fn measure_layout(
    font: &Font,
    sample: &SampleText,
    point_size: f32,
) -> Result<(Vec<PlacedGlyph>, LayoutMetrics)> {
    let units_per_em = font.metrics().units_per_em;
    if units_per_em == 0 {
        return Err(Error::Render("font reports zero units per em".to_string()));
    }
    let scale = point_size / units_per_em as f32;

    let mut glyphs = Vec::with_capacity(sample.text.len());
    let mut ink = InkBox::default();
    let mut pen_x = 0.0f32;

    for c in sample.text.chars() {
        let id = glyph_for(font, c)?;
        if let Some((x0, y0, x1, y1)) = glyph_ink(font, id, pen_x, scale)? {
            ink.add(x0, y0, x1, y1);
        }
        glyphs.push(PlacedGlyph { id, pen_x });

        let advance = font
            .advance(id)
            .map_err(|e| Error::Render(format!("advance of glyph {}: {}", id, e)))?;
        pen_x += advance.x() * scale;
    }

    let reference = glyph_for(font, sample.x_height_glyph)?;
    let x_height = match glyph_ink(font, reference, 0.0, scale)? {
        Some((_, top, _, bottom)) => bottom - top,
        None => 0.0,
    };

    let (x_bearing, y_bearing, max_x, max_y) = ink.bounds.unwrap_or_default();
    let metrics = LayoutMetrics {
        x_bearing,
        y_bearing,
        width: max_x - x_bearing,
        height: max_y - y_bearing,
        x_height,
    };
    Ok((glyphs, metrics))
}

/// Paint pass: draw the placed glyphs into a surface sized to the ink box
fn paint(
    font: &Font,
    glyphs: &[PlacedGlyph],
    metrics: &LayoutMetrics,
    point_size: f32,
) -> Result<CoverageSurface> {
    let width = metrics.width.max(0.0) as usize;
    let height = metrics.height.max(0.0) as usize;
    let mut surface = CoverageSurface::new(width, height);
    if surface.area() == 0 {
        return Ok(surface);
    }

    for glyph in glyphs {
        let origin = vec2f(glyph.pen_x - metrics.x_bearing, -metrics.y_bearing);
        let bounds = font
            .raster_bounds(
                glyph.id,
                point_size,
                Transform2F::from_translation(origin),
                HintingOptions::None,
                RasterizationOptions::GrayscaleAa,
            )
            .map_err(|e| Error::Render(format!("raster bounds of glyph {}: {}", glyph.id, e)))?;
        if bounds.width() <= 0 || bounds.height() <= 0 {
            continue;
        }

        // Each glyph gets its own canvas so neighbouring boxes never overwrite ink
        let mut scratch = Canvas::new(bounds.size(), Format::A8);
        font.rasterize_glyph(
            &mut scratch,
            glyph.id,
            point_size,
            Transform2F::from_translation(origin - bounds.origin().to_f32()),
            HintingOptions::None,
            RasterizationOptions::GrayscaleAa,
        )
        .map_err(|e| Error::Render(format!("rasterizing glyph {}: {}", glyph.id, e)))?;

        let size = scratch.size;
        for row in 0..size.y() {
            let line = &scratch.pixels[row as usize * scratch.stride..];
            for col in 0..size.x() {
                let alpha = line[col as usize];
                if alpha != 0 {
                    let at = bounds.origin() + vec2i(col, row);
                    surface.blend(at.x(), at.y(), alpha);
                }
            }
        }
    }

    Ok(surface)
}

/// Load the font at `path` and render `sample` with it. The font face is
/// dropped before returning, on success and on failure alike.
pub fn render_font(path: &Path, sample: &SampleText, point_size: f32) -> Result<RenderedSample> {
    let font = Font::from_path(path, 0)
        .map_err(|e| Error::FontLoad(format!("{}: {}", path.display(), e)))?;

    let (glyphs, metrics) = measure_layout(&font, sample, point_size)?;
    let surface = paint(&font, &glyphs, &metrics, point_size)?;

    debug!(
        font = %path.display(),
        width = surface.width,
        height = surface.height,
        x_height = metrics.x_height,
        "rendered sample"
    );
    Ok(RenderedSample { surface, metrics })
}
