//! Classified raster to PNG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{Rgb, RgbImage};
use rainmap_grid::Bounds;
use rainmap_pipeline::InterpolationResult;
use tracing::{debug, info};

use crate::error::IoError;

/// Class colours, class 1 first: white, lightcyan, paleturquoise, skyblue,
/// lightsteelblue, mediumslateblue, mediumorchid.
pub const PALETTE: [[u8; 3]; 7] = [
    [255, 255, 255],
    [224, 255, 255],
    [175, 238, 238],
    [135, 206, 235],
    [176, 196, 222],
    [123, 104, 238],
    [186, 85, 211],
];

const MARKER: Rgb<u8> = Rgb([0, 0, 0]);

/// Pixel geometry of the rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Side length of one grid cell in pixels.
    cell_size: u32,
    /// Arm length of the sample markers in pixels; 0 disables them.
    marker_radius: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 2,
            marker_radius: 4,
        }
    }
}

impl RenderConfig {
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_marker_radius(mut self, marker_radius: u32) -> Self {
        self.marker_radius = marker_radius;
        self
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn marker_radius(&self) -> u32 {
        self.marker_radius
    }

    /// # Errors
    ///
    /// [`IoError::Validation`] if `cell_size == 0`.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.cell_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "cell_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Paints the north-up class raster and marks `sample_coords` with black
/// plus signs.
///
/// Samples outside `bounds` are not drawn.
///
/// # Errors
///
/// [`IoError::Validation`] for an invalid config or a class with no palette
/// entry; [`IoError::Render`] if the image would be too large.
pub fn render_image(
    result: &InterpolationResult,
    bounds: &Bounds,
    sample_coords: &[[f64; 2]],
    config: &RenderConfig,
) -> Result<RgbImage, IoError> {
    config.validate()?;

    let raster = result.class_raster_north_up();
    let n = result.resolution();
    let cell = config.cell_size;
    let side = u32::try_from(n)
        .ok()
        .and_then(|n| n.checked_mul(cell))
        .ok_or_else(|| IoError::Render {
            reason: format!("{n} cells of {cell} px exceed the maximum image size"),
        })?;

    let mut img = RgbImage::new(side, side);
    for ((row, col), &class) in raster.indexed_iter() {
        let colour = usize::from(class)
            .checked_sub(1)
            .and_then(|i| PALETTE.get(i))
            .ok_or_else(|| IoError::Validation {
                count: 1,
                details: format!(
                    "class {class} at row {row}, column {col} has no colour (palette holds {})",
                    PALETTE.len()
                ),
            })?;
        // row, col < n and n * cell fits in u32.
        let (x0, y0) = (col as u32 * cell, row as u32 * cell);
        for dy in 0..cell {
            for dx in 0..cell {
                img.put_pixel(x0 + dx, y0 + dy, Rgb(*colour));
            }
        }
    }

    if config.marker_radius > 0 {
        for &coord in sample_coords {
            match pixel_of(coord, bounds, n, cell) {
                Some((px, py)) => draw_plus(&mut img, px, py, config.marker_radius),
                None => debug!(x = coord[0], y = coord[1], "sample outside map bounds"),
            }
        }
    }

    Ok(img)
}

/// Renders the map and writes it to `path` as PNG.
///
/// The file carries text chunks recording what the colours mean: `Title`
/// names the accumulation window (when `result` has one), `Legend` lists
/// `labels` one class per line, class 1 first.
///
/// # Errors
///
/// Errors from [`render_image`], [`IoError::Write`] if the file cannot be
/// created or written, and [`IoError::Render`] if encoding fails.
pub fn render_png(
    path: &Path,
    result: &InterpolationResult,
    labels: &[String],
    bounds: &Bounds,
    sample_coords: &[[f64; 2]],
    config: &RenderConfig,
) -> Result<(), IoError> {
    let img = render_image(result, bounds, sample_coords, config)?;

    let file = File::create(path).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(&mut w, img.width(), img.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    for (keyword, text) in text_chunks(result, labels) {
        add_text(&mut encoder, keyword, text).map_err(|e| png_error(path, e))?;
    }
    let mut writer = encoder.write_header().map_err(|e| png_error(path, e))?;
    writer
        .write_image_data(img.as_raw())
        .map_err(|e| png_error(path, e))?;
    writer.finish().map_err(|e| png_error(path, e))?;
    w.flush().map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "wrote map"
    );
    Ok(())
}

fn text_chunks(result: &InterpolationResult, labels: &[String]) -> Vec<(&'static str, String)> {
    let mut chunks = vec![("Software", "rainmap".to_string())];
    if let Some(window) = result.window() {
        chunks.push(("Title", format!("Precipitation received from {window}")));
    }
    if !labels.is_empty() {
        let legend: Vec<String> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{} {label}", i + 1))
            .collect();
        chunks.push(("Legend", legend.join("\n")));
    }
    chunks
}

/// tEXt holds Latin-1 only; anything else goes into an iTXt chunk.
fn add_text<W: Write>(
    encoder: &mut png::Encoder<'_, W>,
    keyword: &str,
    text: String,
) -> Result<(), png::EncodingError> {
    if text.chars().all(|c| u32::from(c) < 256) {
        encoder.add_text_chunk(keyword.to_string(), text)
    } else {
        encoder.add_itxt_chunk(keyword.to_string(), text)
    }
}

fn png_error(path: &Path, e: png::EncodingError) -> IoError {
    match e {
        png::EncodingError::IoError(source) => IoError::Write {
            path: path.to_path_buf(),
            source,
        },
        other => IoError::Render {
            reason: other.to_string(),
        },
    }
}

/// Centre pixel of the grid cell nearest to `coord`, north-up.
fn pixel_of(coord: [f64; 2], bounds: &Bounds, n: usize, cell: u32) -> Option<(u32, u32)> {
    if !bounds.contains(coord) {
        return None;
    }
    let last = (n - 1) as f64;
    let fraction = |v: f64, min: f64, extent: f64| {
        if extent > 0.0 { (v - min) / extent } else { 0.0 }
    };
    let col = (fraction(coord[0], bounds.x_min(), bounds.width()) * last).round() as u32;
    let row_south = (fraction(coord[1], bounds.y_min(), bounds.height()) * last).round() as u32;
    let row = (n as u32 - 1) - row_south;
    Some((col * cell + cell / 2, row * cell + cell / 2))
}

fn draw_plus(img: &mut RgbImage, cx: u32, cy: u32, radius: u32) {
    let (w, h) = img.dimensions();
    for x in cx.saturating_sub(radius)..=cx.saturating_add(radius).min(w - 1) {
        img.put_pixel(x, cy, MARKER);
    }
    for y in cy.saturating_sub(radius)..=cy.saturating_add(radius).min(h - 1) {
        img.put_pixel(cx, y, MARKER);
    }
}
