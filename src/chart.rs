// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path as FsPath;

use anyhow::{Context, Result};
use svg::Document;
use svg::node::element::{Line, Path, Rectangle, Text};

use crate::models::{ChartBucket, ChartPoint};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const MARGIN: f64 = 30.0;
const STROKE: &str = "#007AFF";

fn frame() -> Document {
    Document::new().set(
        "viewBox",
        (
            -MARGIN,
            -MARGIN,
            WIDTH + 2.0 * MARGIN,
            HEIGHT + 2.0 * MARGIN + 20.0,
        ),
    )
}

fn baseline() -> Line {
    Line::new()
        .set("x1", 0.0)
        .set("x2", WIDTH)
        .set("y1", HEIGHT)
        .set("y2", HEIGHT)
        .set("stroke", "gray")
        .set("stroke-width", 1.0)
}

/// One rounded bar per bucket, Sun..Sat, scaled against the largest bucket
/// (or 1 when the week is empty, so an all-zero week still renders).
pub fn render_bar_svg(buckets: &[ChartBucket], out: &FsPath) -> Result<()> {
    let max = buckets
        .iter()
        .map(|b| b.value)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let slot = WIDTH / buckets.len().max(1) as f64;
    let bar_width = slot * 0.6;

    let mut doc = frame().add(baseline());
    for (i, bucket) in buckets.iter().enumerate() {
        let bar_height = bucket.value / max * HEIGHT;
        let x = i as f64 * slot + (slot - bar_width) / 2.0;
        doc = doc.add(
            Rectangle::new()
                .set("x", x)
                .set("y", HEIGHT - bar_height)
                .set("width", bar_width)
                .set("height", bar_height)
                .set("rx", 3)
                .set("fill", STROKE),
        );
        doc = doc.add(
            Text::new()
                .set("x", x + bar_width / 2.0)
                .set("y", HEIGHT + 16.0)
                .set("text-anchor", "middle")
                .set("font-size", 12)
                .set("fill", "gray")
                .add(svg::node::Text::new(bucket.label)),
        );
    }
    svg::save(out, &doc).with_context(|| format!("Write SVG to {}", out.display()))?;
    Ok(())
}

/// A smoothed path through the point series. With fewer than two points no
/// curve can be drawn and only the axis is emitted.
pub fn render_line_svg(points: &[ChartPoint], out: &FsPath) -> Result<()> {
    let mut doc = frame().add(baseline());
    let d = line_path(points, WIDTH, HEIGHT);
    if !d.is_empty() {
        doc = doc.add(
            Path::new()
                .set("fill", "none")
                .set("stroke", STROKE)
                .set("stroke-width", 3)
                .set("d", d),
        );
    }
    svg::save(out, &doc).with_context(|| format!("Write SVG to {}", out.display()))?;
    Ok(())
}

/// SVG path data for a monotone cubic curve through the series.
///
/// X positions are index-scaled across the width (evenly spaced points, as
/// the source chart lays them out); Y is scaled against `max(max_amount, 1)`
/// so an empty or uniformly-zero series never divides by zero. Returns an
/// empty string for fewer than two points.
pub fn line_path(points: &[ChartPoint], width: f64, height: f64) -> String {
    if points.len() < 2 {
        return String::new();
    }
    let max_y = points
        .iter()
        .map(|p| p.y)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let n = points.len();
    let xs: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64 * width).collect();
    let ys: Vec<f64> = points.iter().map(|p| height - p.y / max_y * height).collect();
    monotone_path(&xs, &ys)
}

/// Cubic Bezier segments with Fritsch-Carlson tangents: the curve passes
/// through every point and never overshoots between adjacent ones. Callers
/// guarantee at least two strictly increasing x values.
fn monotone_path(xs: &[f64], ys: &[f64]) -> String {
    let tangents = monotone_tangents(xs, ys);
    let mut d = format!("M{:.2},{:.2}", xs[0], ys[0]);
    for i in 0..xs.len() - 1 {
        let dx = (xs[i + 1] - xs[i]) / 3.0;
        d.push_str(&format!(
            "C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            xs[i] + dx,
            ys[i] + dx * tangents[i],
            xs[i + 1] - dx,
            ys[i + 1] - dx * tangents[i + 1],
            xs[i + 1],
            ys[i + 1],
        ));
    }
    d
}

fn monotone_tangents(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let slopes: Vec<f64> = (0..n - 1)
        .map(|i| (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]))
        .collect();
    if n == 2 {
        return vec![slopes[0], slopes[0]];
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        let s0 = slopes[i - 1];
        let s1 = slopes[i];
        if s0 * s1 <= 0.0 {
            // local extremum: flat tangent keeps the curve monotone
            tangents[i] = 0.0;
        } else {
            let h0 = xs[i] - xs[i - 1];
            let h1 = xs[i + 1] - xs[i];
            let weighted = (s0 * h1 + s1 * h0) / (h0 + h1);
            tangents[i] = (s0.signum() + s1.signum())
                * s0.abs().min(s1.abs()).min(0.5 * weighted.abs());
        }
    }
    tangents[0] = {
        let h = xs[1] - xs[0];
        (3.0 * (ys[1] - ys[0]) / h - tangents[1]) / 2.0
    };
    tangents[n - 1] = {
        let h = xs[n - 1] - xs[n - 2];
        (3.0 * (ys[n - 1] - ys[n - 2]) / h - tangents[n - 2]) / 2.0
    };
    tangents
}
