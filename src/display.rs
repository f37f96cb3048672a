// src/display.rs
use std::path::Path;

use clap::ValueEnum;
use ndarray::Array3;
use plotters::prelude::*;

use crate::error::CalcError;
use crate::utils::stats;
use crate::Raster;

const TITLE_HEIGHT: u32 = 36;
const MARGIN: u32 = 10;
const COLORBAR_WIDTH: u32 = 20;
const COLORBAR_GAP: u32 = 8;
const HISTOGRAM_BINS: usize = 64;

/// Colormap identifier passed through from the CLI to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Colormap {
    Gray,
    Viridis,
    Bone,
    Copper,
}

const VIRIDIS_ANCHORS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const BONE_ANCHORS: [(u8, u8, u8); 4] = [
    (0, 0, 0),
    (81, 81, 113),
    (166, 198, 198),
    (255, 255, 255),
];

/// Piecewise-linear interpolation over equally spaced RGB anchor points.
fn ramp(anchors: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let scaled = t * (anchors.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(anchors.len() - 2);
    let frac = scaled - i as f64;
    let (r0, g0, b0) = anchors[i];
    let (r1, g1, b1) = anchors[i + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

fn map_color(cmap: Colormap, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    match cmap {
        Colormap::Gray => {
            let g = (t * 255.0).round() as u8;
            RGBColor(g, g, g)
        }
        Colormap::Viridis => ramp(&VIRIDIS_ANCHORS, t),
        Colormap::Bone => ramp(&BONE_ANCHORS, t),
        Colormap::Copper => RGBColor(
            ((t * 318.75).min(255.0)).round() as u8,
            (t * 199.0).round() as u8,
            (t * 127.0).round() as u8,
        ),
    }
}

fn rerr<E: std::fmt::Display>(e: E) -> CalcError {
    CalcError::Render(e.to_string())
}

/// Render a band as a titled, colorbar-annotated, axis-free PNG quick-look.
///
/// The colormap is applied over the band's finite value range; non-finite
/// pixels are left white.
pub fn display_band(
    title: &str,
    band: &Raster,
    colormap: Colormap,
    out: &Path,
) -> Result<(), CalcError> {
    let (h, w) = band.dim();
    let (lo, hi) = stats::value_range(band).unwrap_or((0.0, 1.0));
    let span = if hi > lo { hi - lo } else { 1.0 };

    let total_w = w as u32 + COLORBAR_GAP + COLORBAR_WIDTH + 2 * MARGIN;
    let total_h = h as u32 + TITLE_HEIGHT + 2 * MARGIN;

    let root = BitMapBackend::new(out, (total_w, total_h)).into_drawing_area();
    root.fill(&WHITE).map_err(rerr)?;
    let root = root
        .titled(title, ("sans-serif", 24))
        .map_err(rerr)?
        .margin(MARGIN as i32, MARGIN as i32, MARGIN as i32, MARGIN as i32);
    let (img_area, bar_area) = root.split_horizontally(w as u32);

    for ((y, x), &v) in band.indexed_iter() {
        if !v.is_finite() {
            continue;
        }
        let color = map_color(colormap, (v - lo) / span);
        img_area
            .draw_pixel((x as i32, y as i32), &color)
            .map_err(rerr)?;
    }

    // Vertical colorbar, max at top.
    for y in 0..h {
        let t = 1.0 - y as f64 / (h.max(2) - 1) as f64;
        let color = map_color(colormap, t);
        for x in 0..COLORBAR_WIDTH {
            bar_area
                .draw_pixel(((COLORBAR_GAP + x) as i32, y as i32), &color)
                .map_err(rerr)?;
        }
    }
    bar_area
        .draw(&Text::new(
            format!("{hi:.2}"),
            (COLORBAR_GAP as i32, 0),
            ("sans-serif", 12).into_font(),
        ))
        .map_err(rerr)?;
    bar_area
        .draw(&Text::new(
            format!("{lo:.2}"),
            (COLORBAR_GAP as i32, h as i32 - 12),
            ("sans-serif", 12).into_font(),
        ))
        .map_err(rerr)?;

    root.present().map_err(rerr)
}

/// Render a 3-channel composite (values in [0, 1]) as a titled RGB PNG.
pub fn display_rgb(title: &str, stack: &Array3<f64>, out: &Path) -> Result<(), CalcError> {
    let (h, w, channels) = stack.dim();
    if channels != 3 {
        return Err(CalcError::InvalidInput(format!(
            "composite must have 3 channels, got {channels}"
        )));
    }

    let total_w = w as u32 + 2 * MARGIN;
    let total_h = h as u32 + TITLE_HEIGHT + 2 * MARGIN;

    let root = BitMapBackend::new(out, (total_w, total_h)).into_drawing_area();
    root.fill(&WHITE).map_err(rerr)?;
    let root = root
        .titled(title, ("sans-serif", 24))
        .map_err(rerr)?
        .margin(MARGIN as i32, MARGIN as i32, MARGIN as i32, MARGIN as i32);

    for y in 0..h {
        for x in 0..w {
            let channel = |c: usize| (stack[[y, x, c]].clamp(0.0, 1.0) * 255.0).round() as u8;
            let color = RGBColor(channel(0), channel(1), channel(2));
            root.draw_pixel((x as i32, y as i32), &color).map_err(rerr)?;
        }
    }

    root.present().map_err(rerr)
}

/// Render a fixed-bin histogram of a band's finite values.
pub fn display_histogram(title: &str, band: &Raster, out: &Path) -> Result<(), CalcError> {
    let counts = stats::histogram(band, HISTOGRAM_BINS);
    let (lo, hi) = stats::value_range(band).unwrap_or((0.0, 1.0));
    let hi = if hi > lo { hi } else { lo + 1.0 };
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(out, (640, 480)).into_drawing_area();
    root.fill(&WHITE).map_err(rerr)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(MARGIN as i32)
        .x_label_area_size(32)
        .y_label_area_size(48)
        .build_cartesian_2d(lo..hi, 0u32..max_count)
        .map_err(rerr)?;

    chart
        .configure_mesh()
        .x_desc("Pixel Intensity")
        .y_desc("Frequency")
        .draw()
        .map_err(rerr)?;

    let bin_width = (hi - lo) / HISTOGRAM_BINS as f64;
    chart
        .draw_series(counts.iter().enumerate().map(|(i, &count)| {
            let x0 = lo + i as f64 * bin_width;
            Rectangle::new([(x0, 0), (x0 + bin_width, count)], BLACK.filled())
        }))
        .map_err(rerr)?;

    root.present().map_err(rerr)
}
