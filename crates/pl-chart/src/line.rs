//! Line chart rendered straight into an RGB raster.
//!
//! Straight segments join consecutive points (no smoothing). The plot area
//! carries a light grid: vertical lines at a fixed x spacing and horizontal
//! lines at a rounded 1/2/5 spacing. A colour swatch per series sits in the
//! top-right corner in place of a text legend.

use crate::error::{ChartError, ChartResult};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const GRID: Rgb<u8> = Rgb([230, 230, 230]);
    pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    pub const GREEN: Rgb<u8> = Rgb([0, 128, 0]);
}

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 40;
const MARGIN_BOTTOM: u32 = 40;
const SWATCH: u32 = 14;

/// One named curve.
#[derive(Debug, Clone, Copy)]
pub struct ChartSeries<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
    pub color: Rgb<u8>,
}

/// Chart layout.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub width: u32,
    pub height: u32,
    /// Spacing of the vertical grid lines, in x units
    pub x_grid_step: f64,
}

impl Default for LineChart {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            x_grid_step: 10_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x_min) / (self.x_max - self.x_min) * (self.right - self.left)
    }

    fn py(&self, y: f64) -> f64 {
        self.bottom - (y - self.y_min) / (self.y_max - self.y_min) * (self.bottom - self.top)
    }
}

/// Min and max of the finite values, if any.
fn finite_bounds<'a>(values: impl Iterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Round a raw spacing up to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Multiples of `step` within `[min, max]`, generated by index.
///
/// Empty when the step is not positive or would give more than `max_lines`
/// lines, which also covers steps below the float resolution of the bounds.
pub fn grid_lines(min: f64, max: f64, step: f64, max_lines: usize) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0 && min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    let first = (min / step).ceil();
    let last = (max / step).floor();
    let count = last - first + 1.0;
    if !(count >= 1.0 && count <= max_lines as f64) {
        return Vec::new();
    }
    (0..count as usize)
        .map(|i| (first + i as f64) * step)
        .collect()
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham segment between two pixel positions.
fn draw_segment(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x0, mut y0) = from;
    let (x1, y1) = to;
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put(img, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    for py in y..y.saturating_add(h) {
        for px in x..x.saturating_add(w) {
            put(img, px as i64, py as i64, color);
        }
    }
}

impl LineChart {
    fn check(&self, x: &[f64], series: &[ChartSeries<'_>]) -> ChartResult<()> {
        if self.width <= MARGIN_LEFT + MARGIN_RIGHT || self.height <= MARGIN_TOP + MARGIN_BOTTOM {
            return Err(ChartError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if x.is_empty() {
            return Err(ChartError::EmptyData { what: "x values" });
        }
        if series.is_empty() {
            return Err(ChartError::EmptyData { what: "series" });
        }
        for s in series {
            if s.values.len() != x.len() {
                return Err(ChartError::LengthMismatch {
                    label: s.label.to_string(),
                    x_len: x.len(),
                    y_len: s.values.len(),
                });
            }
        }
        Ok(())
    }

    fn frame(&self, x: &[f64], series: &[ChartSeries<'_>]) -> ChartResult<Frame> {
        let (mut x_min, mut x_max) =
            finite_bounds(x.iter()).ok_or(ChartError::EmptyData { what: "finite x values" })?;
        let (mut y_min, mut y_max) = finite_bounds(series.iter().flat_map(|s| s.values.iter()))
            .ok_or(ChartError::EmptyData {
                what: "finite y values",
            })?;

        if x_max == x_min {
            x_min -= 1.0;
            x_max += 1.0;
        }
        let pad = if y_max > y_min {
            0.05 * (y_max - y_min)
        } else {
            1.0
        };
        y_min -= pad;
        y_max += pad;

        Ok(Frame {
            x_min,
            x_max,
            y_min,
            y_max,
            left: MARGIN_LEFT as f64,
            right: (self.width - MARGIN_RIGHT) as f64,
            top: MARGIN_TOP as f64,
            bottom: (self.height - MARGIN_BOTTOM) as f64,
        })
    }

    fn draw_grid(&self, img: &mut RgbImage, frame: &Frame) {
        let top = frame.top as i64;
        let bottom = frame.bottom as i64;
        let left = frame.left as i64;
        let right = frame.right as i64;

        let max_x_lines = (frame.right - frame.left) as usize;
        for gx in grid_lines(frame.x_min, frame.x_max, self.x_grid_step, max_x_lines) {
            let px = frame.px(gx).round() as i64;
            draw_segment(img, (px, top), (px, bottom), colors::GRID);
        }

        let y_step = nice_step((frame.y_max - frame.y_min) / 8.0);
        let max_y_lines = (frame.bottom - frame.top) as usize;
        for gy in grid_lines(frame.y_min, frame.y_max, y_step, max_y_lines) {
            let py = frame.py(gy).round() as i64;
            draw_segment(img, (left, py), (right, py), colors::GRID);
        }

        draw_segment(img, (left, top), (left, bottom), colors::BLACK);
        draw_segment(img, (left, bottom), (right, bottom), colors::BLACK);
    }

    fn draw_series(img: &mut RgbImage, frame: &Frame, x: &[f64], s: &ChartSeries<'_>) {
        let mut last: Option<(i64, i64)> = None;
        for (&xv, &yv) in x.iter().zip(s.values) {
            if !(xv.is_finite() && yv.is_finite()) {
                last = None;
                continue;
            }
            let p = (frame.px(xv).round() as i64, frame.py(yv).round() as i64);
            match last {
                Some(prev) if prev == p => {}
                Some(prev) => draw_segment(img, prev, p, s.color),
                None => put(img, p.0, p.1, s.color),
            }
            last = Some(p);
        }
    }

    fn draw_legend(&self, img: &mut RgbImage, series: &[ChartSeries<'_>]) {
        let mut x = self.width - MARGIN_RIGHT - SWATCH;
        let y = (MARGIN_TOP - SWATCH) / 2;
        for s in series.iter().rev() {
            fill_rect(img, x, y, SWATCH, SWATCH, s.color);
            x = x.saturating_sub(SWATCH * 2);
        }
    }

    /// Render the series against the shared x values.
    pub fn render(&self, x: &[f64], series: &[ChartSeries<'_>]) -> ChartResult<RgbImage> {
        self.check(x, series)?;
        let frame = self.frame(x, series)?;

        let mut img = RgbImage::from_pixel(self.width, self.height, colors::WHITE);
        self.draw_grid(&mut img, &frame);
        for s in series {
            Self::draw_series(&mut img, &frame, x, s);
        }
        self.draw_legend(&mut img, series);
        Ok(img)
    }

    /// Render and write a PNG, creating the parent directory if needed.
    pub fn save(&self, path: &Path, x: &[f64], series: &[ChartSeries<'_>]) -> ChartResult<()> {
        let img = self.render(x, series)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        img.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
