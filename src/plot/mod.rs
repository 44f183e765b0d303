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

use crate::linalg::Vector3;
use crate::md::trajectory::Trajectory;
use crate::time::Epoch;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use typed_builder::TypedBuilder;

pub mod aspect;
pub use aspect::{equal_aspect, AxisRange, BoundingBox};

pub mod sphere;
pub use sphere::Sphere;

/// A named color, known both to the HTML viewer (CSS name) and to the preview rasterizer (RGB).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub css: &'static str,
    pub rgb: [u8; 3],
}

impl Color {
    pub const BLACK: Self = Self::new("black", [0, 0, 0]);
    pub const BLUE: Self = Self::new("blue", [0, 0, 255]);
    pub const BROWN: Self = Self::new("brown", [165, 42, 42]);
    pub const CRIMSON: Self = Self::new("crimson", [220, 20, 60]);
    pub const CYAN: Self = Self::new("cyan", [0, 255, 255]);
    pub const GOLD: Self = Self::new("gold", [255, 215, 0]);
    pub const GRAY: Self = Self::new("gray", [128, 128, 128]);
    pub const GREEN: Self = Self::new("green", [0, 128, 0]);
    pub const LIME: Self = Self::new("lime", [0, 255, 0]);
    pub const MAGENTA: Self = Self::new("magenta", [255, 0, 255]);
    pub const ORANGE: Self = Self::new("orange", [255, 165, 0]);
    pub const PURPLE: Self = Self::new("purple", [128, 0, 128]);
    pub const RED: Self = Self::new("red", [255, 0, 0]);
    pub const ROYAL_BLUE: Self = Self::new("royalblue", [65, 105, 225]);
    pub const TEAL: Self = Self::new("teal", [0, 128, 128]);
    pub const YELLOW: Self = Self::new("yellow", [255, 255, 0]);

    /// First color of the viewer's default trace palette, used when a trace has no color.
    pub const DEFAULT: Self = Self::new("#636efa", [99, 110, 250]);

    const KNOWN: [Self; 16] = [
        Self::BLACK,
        Self::BLUE,
        Self::BROWN,
        Self::CRIMSON,
        Self::CYAN,
        Self::GOLD,
        Self::GRAY,
        Self::GREEN,
        Self::LIME,
        Self::MAGENTA,
        Self::ORANGE,
        Self::PURPLE,
        Self::RED,
        Self::ROYAL_BLUE,
        Self::TEAL,
        Self::YELLOW,
    ];

    pub const fn new(css: &'static str, rgb: [u8; 3]) -> Self {
        Self { css, rgb }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let name = if name == "grey" { "gray".to_string() } else { name };
        Self::KNOWN
            .iter()
            .find(|color| color.css == name)
            .copied()
            .ok_or_else(|| format!("unknown color `{s}`"))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.css)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.css)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Dash {
    #[default]
    Solid,
    Dash,
    Dot,
}

impl Dash {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dash => "dash",
            Self::Dot => "dot",
        }
    }
}

/// Per point hover information of a polyline: the UTC epoch and the speed in the plot frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Hover {
    pub epochs: Vec<Epoch>,
    pub speeds_km_s: Vec<f64>,
    /// Title of the speed row, e.g. `Speed (km/s)`.
    pub speed_title: String,
    /// Format of the coordinates, in d3-format notation.
    pub coordinate_format: &'static str,
}

impl Hover {
    pub fn new<S: Into<String>>(traj: &Trajectory, speed_title: S) -> Self {
        Self {
            epochs: traj.epochs(),
            speeds_km_s: traj.speeds_km_s(),
            speed_title: speed_title.into(),
            coordinate_format: ".1f",
        }
    }

    /// Uses SI prefixes for the coordinates, for plots spanning billions of kilometers.
    pub fn with_si_coordinates(mut self) -> Self {
        self.coordinate_format = ".7s";
        self
    }
}

/// A polyline, e.g. a sampled trajectory, optionally labeled at each vertex.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct Polyline {
    #[builder(setter(into))]
    pub name: String,
    pub points: Vec<Vector3<f64>>,
    #[builder(default, setter(strip_option))]
    pub color: Option<Color>,
    #[builder(default = 2.0)]
    pub width: f64,
    #[builder(default)]
    pub dash: Dash,
    /// Text shown next to each vertex, empty strings are not shown.
    #[builder(default)]
    pub labels: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub hover: Option<Hover>,
}

/// One or more labeled markers.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct Markers {
    #[builder(setter(into))]
    pub name: String,
    pub points: Vec<Vector3<f64>>,
    #[builder(default)]
    pub labels: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub color: Option<Color>,
    #[builder(default = 6.0)]
    pub size: f64,
}

impl Markers {
    /// A single marker labeled with its name.
    pub fn single<S: Into<String>>(name: S, point: Vector3<f64>, color: Color) -> Self {
        let name = name.into();
        Self {
            labels: vec![name.clone()],
            name,
            points: vec![point],
            color: Some(color),
            size: 6.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Trace {
    Polyline(Polyline),
    Markers(Markers),
    Sphere(Sphere),
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Self::Polyline(path) => &path.name,
            Self::Markers(markers) => &markers.name,
            Self::Sphere(sphere) => &sphere.name,
        }
    }

    /// Every point that the viewer will draw for this trace.
    pub fn points(&self) -> Vec<Vector3<f64>> {
        match self {
            Self::Polyline(path) => path.points.clone(),
            Self::Markers(markers) => markers.points.clone(),
            Self::Sphere(sphere) => sphere.mesh().into_iter().flatten().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Polyline(path) => path.points.is_empty(),
            Self::Markers(markers) => markers.points.is_empty(),
            Self::Sphere(_) => false,
        }
    }
}

impl From<Polyline> for Trace {
    fn from(path: Polyline) -> Self {
        Self::Polyline(path)
    }
}

impl From<Markers> for Trace {
    fn from(markers: Markers) -> Self {
        Self::Markers(markers)
    }
}

impl From<Sphere> for Trace {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Axis {
    pub title: String,
    /// Displays this axis from high to low values.
    pub reversed: bool,
}

impl Axis {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

/// A 3D scene, handed over to the HTML and PNG encoders once complete.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub title: String,
    pub traces: Vec<Trace>,
    pub axes: [Axis; 3],
    /// Position of the camera, relative to the center of the scene and in units of the half span.
    pub camera_eye: Option<Vector3<f64>>,
}

impl Scene {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            traces: Vec::new(),
            axes: [
                Axis::new("x (km)"),
                Axis::new("y (km)"),
                Axis::new("z (km)"),
            ],
            camera_eye: None,
        }
    }

    /// Adds a trace, skipping it with a warning if it has no point.
    pub fn push<T: Into<Trace>>(&mut self, trace: T) {
        let trace = trace.into();
        if trace.is_empty() {
            warn!("{}: trace `{}` has no point, skipping it", self.title, trace.name());
        } else {
            self.traces.push(trace);
        }
    }

    pub fn with_axes(mut self, x: Axis, y: Axis, z: Axis) -> Self {
        self.axes = [x, y, z];
        self
    }

    pub fn with_camera_eye(mut self, eye: Vector3<f64>) -> Self {
        self.camera_eye = Some(eye);
        self
    }

    /// Bounding box of every point of every trace, or None if the scene is empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.traces.iter().flat_map(|trace| trace.points()))
    }

    /// Ranges of the three axes, all of the same length, or None if the scene is empty.
    pub fn axis_ranges(&self) -> Option<[AxisRange; 3]> {
        self.bounding_box().map(|bbox| {
            let mut ranges = equal_aspect(&bbox);
            for (range, axis) in ranges.iter_mut().zip(self.axes.iter()) {
                if axis.reversed {
                    *range = range.reversed();
                }
            }
            ranges
        })
    }
}

#[cfg(test)]
mod ut_scene {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn builders_and_defaults() {
        let path = Polyline::builder()
            .name("Gateway")
            .points(vec![Vector3::zeros(), Vector3::x()])
            .color(Color::GREEN)
            .width(4.0)
            .build();
        assert_eq!(path.dash, Dash::Solid);
        assert!(path.labels.is_empty());
        assert!(path.hover.is_none());

        let north = Polyline::builder()
            .name("North")
            .points(vec![Vector3::zeros(), Vector3::new(0.0, 0.0, 5000.0)])
            .labels(vec![String::new(), "North (+Z)".to_string()])
            .width(6.0)
            .build();
        assert_eq!(north.color, None);

        let l2 = Markers::single("L2 (approx)", Vector3::new(61_000.0, 0.0, 0.0), Color::RED);
        assert_eq!(l2.labels, vec!["L2 (approx)".to_string()]);
        assert_relative_eq!(l2.size, 6.0);
    }

    #[test]
    fn colors_from_names() {
        assert_eq!("royalblue".parse::<Color>().unwrap(), Color::ROYAL_BLUE);
        assert_eq!(" Grey".parse::<Color>().unwrap(), Color::GRAY);
        assert!("chartreuse".parse::<Color>().is_err());
        let colors: Vec<Color> = serde_yaml::from_str("[purple, teal]").unwrap();
        assert_eq!(colors, vec![Color::PURPLE, Color::TEAL]);
        assert_eq!(serde_yaml::to_string(&Color::LIME).unwrap().trim(), "lime");
    }

    #[test]
    fn colors_from_a_reader() {
        fn owned<T: serde::de::DeserializeOwned>(yaml: String) -> T {
            serde_yaml::from_reader(yaml.as_bytes()).unwrap()
        }
        let colors: Vec<Color> = owned("- crimson\n- gold\n".to_string());
        assert_eq!(colors, vec![Color::CRIMSON, Color::GOLD]);
    }

    #[test]
    fn empty_traces_are_skipped() {
        let mut scene = Scene::new("empty");
        assert!(scene.axis_ranges().is_none());
        scene.push(Polyline::builder().name("nothing").points(vec![]).build());
        assert!(scene.traces.is_empty());
        scene.push(Sphere::new("Moon", Vector3::zeros(), 1737.0, Color::GRAY));
        assert_eq!(scene.traces.len(), 1);
    }

    #[test]
    fn reversed_axes_keep_their_span() {
        let mut scene = Scene::new("reversed").with_axes(
            Axis::new("x").reversed(),
            Axis::new("y"),
            Axis::new("z"),
        );
        scene.push(
            Polyline::builder()
                .name("line")
                .points(vec![Vector3::new(-10.0, 0.0, 0.0), Vector3::new(30.0, 5.0, 1.0)])
                .build(),
        );
        let [x, y, z] = scene.axis_ranges().unwrap();
        assert!(x.lower > x.upper);
        assert!(y.lower < y.upper);
        assert_relative_eq!(x.span(), y.span(), max_relative = 1e-12);
        assert_relative_eq!(y.span(), z.span(), max_relative = 1e-12);
        assert!(x.contains(-10.0) && x.contains(30.0));
    }

    #[test]
    fn sphere_meshes_enter_the_bounds() {
        let mut scene = Scene::new("spheres");
        scene.push(Markers::single("origin", Vector3::zeros(), Color::BLACK));
        scene.push(Sphere::new("Earth", Vector3::new(100_000.0, 0.0, 0.0), 6371.0, Color::BLUE));
        let bbox = scene.bounding_box().unwrap();
        // The mesh has no vertex exactly on the equator
        assert!(bbox.max.x > 106_300.0 && bbox.max.x <= 106_371.0);
        assert_relative_eq!(bbox.max.z, 6_371.0, max_relative = 1e-12);
        assert_relative_eq!(bbox.min.x, 0.0);
    }
}
