//! Correlation heatmap rendering.
//!
//! Draws the matrix as a grid of colored cells on a diverging blue-white-red
//! scale centered at zero and annotates every cell with its coefficient.
//! Column names run down the left edge and along the bottom, and a color bar
//! with tick labels sits to the right. Text is rasterized with `imageproc`
//! from an embedded DejaVu Sans face.
//!
//! The PNG is returned raw or base64-encoded for embedding in a JSON payload.

use std::io::Cursor;

use ab_glyph::{Font, FontRef, PxScale};
use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use palette::{IntoColor, LinSrgb, Mix, Srgb};
use serde::{Deserialize, Serialize};

use super::correlation::CorrelationMatrix;
use crate::error::Result;

static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const NAN_COLOR: Rgb<u8> = Rgb([170, 170, 170]);
const DARK_TEXT: Rgb<u8> = Rgb([20, 20, 20]);
const LIGHT_TEXT: Rgb<u8> = Rgb([250, 250, 250]);

// Endpoints of the diverging scale (sRGB).
const COLD: [u8; 3] = [59, 76, 192];
const NEUTRAL: [u8; 3] = [221, 221, 221];
const WARM: [u8; 3] = [180, 4, 38];

/// Gap between text and whatever it labels.
const PAD: u32 = 6;

/// Heatmap layout settings, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Side length of one matrix cell.
    pub cell_size: u32,
    /// Blank border around the drawing.
    pub margin: u32,
    /// Width of the color bar.
    pub colorbar_width: u32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            cell_size: 64,
            margin: 16,
            colorbar_width: 16,
        }
    }
}

/// Renders correlation matrices to PNG.
#[derive(Debug, Clone, Default)]
pub struct HeatmapRenderer {
    config: HeatmapConfig,
}

impl HeatmapRenderer {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    /// Render the matrix and encode it as PNG bytes.
    pub fn render_png(&self, matrix: &CorrelationMatrix) -> Result<Vec<u8>> {
        let img = self.draw(matrix)?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render the matrix as a base64-encoded PNG.
    pub fn render_base64(&self, matrix: &CorrelationMatrix) -> Result<String> {
        Ok(general_purpose::STANDARD.encode(self.render_png(matrix)?))
    }

    /// Draw the heatmap. An empty matrix still yields a valid image
    /// holding only the color bar.
    pub fn draw(&self, matrix: &CorrelationMatrix) -> Result<RgbImage> {
        let font = FontRef::try_from_slice(FONT_DATA)?;
        let cell = self.config.cell_size.max(8);
        let margin = self.config.margin;
        let bar_w = self.config.colorbar_width.max(1);
        let scale = PxScale::from((cell as f32 / 4.0).max(10.0));
        let n = matrix.len() as u32;
        let grid = n * cell;

        // Row labels may use up to three cells of width; column labels one.
        let row_labels: Vec<String> = matrix
            .columns()
            .iter()
            .map(|name| fit_label(name, 3 * cell, scale, &font))
            .collect();
        let col_labels: Vec<String> = matrix
            .columns()
            .iter()
            .map(|name| fit_label(name, cell - 2, scale, &font))
            .collect();

        let label_w = row_labels
            .iter()
            .map(|label| text_width(label, scale, &font))
            .max()
            .unwrap_or(0);
        let line_h = text_size(scale, &font, "Ag").1 as u32;

        let left = margin + if label_w > 0 { label_w + PAD } else { 0 };
        let top = margin;
        let bar_h = grid.max(cell);
        let bar_x = if n > 0 { left + grid + margin } else { left };
        let tick_x = bar_x + bar_w + PAD;
        let tick_w = text_width("-1", scale, &font);

        let width = tick_x + tick_w + margin;
        let height = top + bar_h + PAD + line_h + margin;

        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

        for row in 0..n {
            for col in 0..n {
                let value = matrix.at(row as usize, col as usize);
                let x0 = left + col * cell;
                let y0 = top + row * cell;

                // One-pixel white gutter between cells
                draw_filled_rect_mut(
                    &mut img,
                    Rect::at(x0 as i32 + 1, y0 as i32 + 1).of_size(cell - 2, cell - 2),
                    diverging_color(value),
                );

                let label = format_coefficient(value);
                let text_color = if value.is_finite() && value.abs() > 0.6 {
                    LIGHT_TEXT
                } else {
                    DARK_TEXT
                };
                let tx = x0 + cell.saturating_sub(text_width(&label, scale, &font)) / 2;
                let ty = y0 + cell.saturating_sub(line_h) / 2;
                draw_text_mut(&mut img, text_color, tx as i32, ty as i32, scale, &font, &label);
            }
        }

        for (i, label) in row_labels.iter().enumerate() {
            let x = left - PAD - text_width(label, scale, &font);
            let y = top + i as u32 * cell + cell.saturating_sub(line_h) / 2;
            draw_text_mut(&mut img, DARK_TEXT, x as i32, y as i32, scale, &font, label);
        }

        for (i, label) in col_labels.iter().enumerate() {
            let x = left + i as u32 * cell + cell.saturating_sub(text_width(label, scale, &font)) / 2;
            let y = top + grid + PAD;
            draw_text_mut(&mut img, DARK_TEXT, x as i32, y as i32, scale, &font, label);
        }

        // Color bar runs from +1 at the top to -1 at the bottom
        for dy in 0..bar_h {
            let t = if bar_h > 1 { dy as f64 / (bar_h - 1) as f64 } else { 0.5 };
            draw_filled_rect_mut(
                &mut img,
                Rect::at(bar_x as i32, (top + dy) as i32).of_size(bar_w, 1),
                diverging_color(1.0 - 2.0 * t),
            );
        }

        let ticks = [
            ("1", top),
            ("0", top + bar_h.saturating_sub(line_h) / 2),
            ("-1", top + bar_h.saturating_sub(line_h)),
        ];
        for (tick, y) in ticks {
            draw_text_mut(&mut img, DARK_TEXT, tick_x as i32, y as i32, scale, &font, tick);
        }

        Ok(img)
    }
}

/// Map a coefficient in [-1, 1] to the diverging scale; `NaN` is grey.
pub fn diverging_color(value: f64) -> Rgb<u8> {
    if !value.is_finite() {
        return NAN_COLOR;
    }
    let t = value.clamp(-1.0, 1.0) as f32;
    let end = if t < 0.0 { COLD } else { WARM };

    // Interpolate in linear light so the midpoint does not look muddy
    let mixed = linear(NEUTRAL).mix(linear(end), t.abs());
    let srgb: Srgb = mixed.into_color();
    let out: Srgb<u8> = srgb.into_format();
    Rgb([out.red, out.green, out.blue])
}

fn linear([r, g, b]: [u8; 3]) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_color()
}

fn format_coefficient(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn text_width(text: &str, scale: PxScale, font: &impl Font) -> u32 {
    text_size(scale, font, text).0 as u32
}

/// Shorten `name` with an ellipsis until it fits in `max_width` pixels.
fn fit_label(name: &str, max_width: u32, scale: PxScale, font: &impl Font) -> String {
    if text_width(name, scale, font) <= max_width {
        return name.to_string();
    }
    let mut chars: Vec<char> = name.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().chain(['…'].iter()).collect();
        if text_width(&candidate, scale, font) <= max_width {
            return candidate;
        }
    }
    String::new()
}
