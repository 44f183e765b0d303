/*
    trajplot, 3D plots of spacecraft trajectories
    Copyright (C) 2018-onwards Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Rasterized preview of a scene, as seen from its camera with an orthographic projection.
//!
//! Only the geometry is drawn (polylines, markers, sphere wireframes and the outline of the axes cube): text is
//! left to the HTML document.

use crate::errors::PreviewSnafu;
use crate::linalg::Vector3;
use crate::plot::{AxisRange, Color, Scene, Trace};
use crate::PlotError;
use image::{ImageFormat, Rgb, RgbImage};
use snafu::ResultExt;
use std::io::Cursor;
use std::path::Path;

pub const PREVIEW_WIDTH: u32 = 1280;
pub const PREVIEW_HEIGHT: u32 = 600;

/// Camera of the viewer when the scene does not specify one.
const DEFAULT_EYE: [f64; 3] = [1.25, 1.25, 1.25];

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const CUBE_EDGES: Rgb<u8> = Rgb([210, 210, 210]);

/// Orthographic projection of the normalized scene cube onto the image plane.
struct Projection {
    ranges: [AxisRange; 3],
    right: Vector3<f64>,
    up: Vector3<f64>,
    scale: f64,
    width: u32,
    height: u32,
}

impl Projection {
    fn new(ranges: [AxisRange; 3], eye: Vector3<f64>, width: u32, height: u32) -> Self {
        let forward = (-eye)
            .try_normalize(1e-12)
            .unwrap_or_else(|| -Vector3::y());
        let right = forward
            .cross(&Vector3::z())
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::x);
        let up = right.cross(&forward);
        // The unit cube spans at most sqrt(3) in any direction, with a small margin.
        let scale = 0.95 * f64::from(width.min(height)) / (2.0 * 3.0_f64.sqrt());
        Self {
            ranges,
            right,
            up,
            scale,
            width,
            height,
        }
    }

    /// Projects a point in km onto pixel coordinates, which may be outside of the image.
    fn project(&self, point: &Vector3<f64>) -> (f64, f64) {
        let cube = Vector3::new(
            2.0 * self.ranges[0].normalize(point.x) - 1.0,
            2.0 * self.ranges[1].normalize(point.y) - 1.0,
            2.0 * self.ranges[2].normalize(point.z) - 1.0,
        );
        (
            0.5 * f64::from(self.width) + self.scale * cube.dot(&self.right),
            0.5 * f64::from(self.height) - self.scale * cube.dot(&self.up),
        )
    }
}

struct Canvas {
    image: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, BACKGROUND),
        }
    }

    fn dot(&mut self, x: i64, y: i64, radius: i64, color: Rgb<u8>) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let (px, py) = (x + dx, y + dy);
                if px < 0
                    || py < 0
                    || px >= i64::from(self.image.width())
                    || py >= i64::from(self.image.height())
                {
                    continue;
                }
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Bresenham line between two pixel coordinates.
    fn line(&mut self, from: (f64, f64), to: (f64, f64), radius: i64, color: Rgb<u8>) {
        if !(from.0.is_finite() && from.1.is_finite() && to.0.is_finite() && to.1.is_finite()) {
            return;
        }
        let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
        let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.dot(x0, y0, radius, color);
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

    fn polyline(&mut self, proj: &Projection, points: &[Vector3<f64>], radius: i64, color: Rgb<u8>) {
        let pixels: Vec<(f64, f64)> = points.iter().map(|p| proj.project(p)).collect();
        if let [single] = pixels.as_slice() {
            self.line(*single, *single, radius, color);
        }
        for pair in pixels.windows(2) {
            self.line(pair[0], pair[1], radius, color);
        }
    }
}

fn rgb(color: Option<Color>) -> Rgb<u8> {
    Rgb(color.unwrap_or(Color::DEFAULT).rgb)
}

/// Line half width in pixels from a viewer line width.
fn radius(width: f64) -> i64 {
    (width / 4.0).round().max(0.0) as i64
}

/// Rasterizes this scene, or returns None if it has nothing to draw.
pub fn rasterize(scene: &Scene, width: u32, height: u32) -> Option<RgbImage> {
    let ranges = scene.axis_ranges()?;
    let eye = scene
        .camera_eye
        .unwrap_or_else(|| Vector3::from(DEFAULT_EYE));
    let proj = Projection::new(ranges, eye, width, height);
    let mut canvas = Canvas::new(width, height);

    // Outline of the axes cube
    let corner = |i: u8| -> Vector3<f64> {
        let pick = |r: &AxisRange, bit: u8| if i & bit == 0 { r.lower } else { r.upper };
        Vector3::new(pick(&ranges[0], 1), pick(&ranges[1], 2), pick(&ranges[2], 4))
    };
    for i in 0..8_u8 {
        for bit in [1_u8, 2, 4] {
            if i & bit == 0 {
                canvas.polyline(&proj, &[corner(i), corner(i | bit)], 0, CUBE_EDGES);
            }
        }
    }

    // Spheres first so that the trajectories are drawn over them
    for trace in &scene.traces {
        if let Trace::Sphere(sphere) = trace {
            let color = Rgb(sphere.color.rgb);
            let mesh = sphere.mesh();
            for row in &mesh {
                canvas.polyline(&proj, row, 0, color);
            }
            for j in 0..mesh.first().map_or(0, |row| row.len()) {
                let parallel: Vec<Vector3<f64>> = mesh.iter().map(|row| row[j]).collect();
                canvas.polyline(&proj, &parallel, 0, color);
            }
        }
    }
    for trace in &scene.traces {
        match trace {
            Trace::Polyline(line) => {
                canvas.polyline(&proj, &line.points, radius(line.width), rgb(line.color))
            }
            Trace::Markers(markers) => {
                let r = (markers.size / 2.0).round().max(1.0) as i64;
                for point in &markers.points {
                    let (x, y) = proj.project(point);
                    if x.is_finite() && y.is_finite() {
                        canvas.dot(x.round() as i64, y.round() as i64, r, rgb(markers.color));
                    }
                }
            }
            Trace::Sphere(_) => {}
        }
    }

    Some(canvas.image)
}

/// Encodes the PNG preview of this scene in memory. The path is only used to report errors.
pub fn encode_preview(scene: &Scene, path: &Path) -> Result<Vec<u8>, PlotError> {
    let image = rasterize(scene, PREVIEW_WIDTH, PREVIEW_HEIGHT).ok_or_else(|| {
        PlotError::EmptyScene {
            title: scene.title.clone(),
        }
    })?;
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context(PreviewSnafu {
            path: path.to_path_buf(),
        })?;
    Ok(png)
}
