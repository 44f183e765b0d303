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
use std::fmt;

/// Relative padding added to the common span so that every point is strictly inside the axes.
pub const PADDING: f64 = 0.02;

/// Span used when all of the points are identical, in km.
pub const DEGENERATE_SPAN_KM: f64 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl BoundingBox {
    /// Returns the smallest box containing all of the finite points, or None if there are none.
    pub fn from_points<I: IntoIterator<Item = Vector3<f64>>>(points: I) -> Option<Self> {
        points
            .into_iter()
            .filter(|p| p.iter().all(|c| c.is_finite()))
            .fold(None, |bbox: Option<Self>, p| match bbox {
                None => Some(Self { min: p, max: p }),
                Some(bbox) => Some(Self {
                    min: bbox.min.inf(&p),
                    max: bbox.max.sup(&p),
                }),
            })
    }

    pub fn spans(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }
}

/// Displayed range of an axis. The lower bound is above the upper bound on reversed axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisRange {
    pub lower: f64,
    pub upper: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        (self.upper - self.lower).abs()
    }

    pub fn reversed(&self) -> Self {
        Self {
            lower: self.upper,
            upper: self.lower,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower.min(self.upper) && value <= self.lower.max(self.upper)
    }

    /// Maps a value of this range onto [0, 1], accounting for the reversal.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.lower) / (self.upper - self.lower)
    }
}

impl fmt::Display for AxisRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}] km", self.lower, self.upper)
    }
}

/// Computes axis ranges of identical length, centered on each axis' midpoint, and containing the whole box.
pub fn equal_aspect(bbox: &BoundingBox) -> [AxisRange; 3] {
    let spans = bbox.spans();
    let mut span = spans.max();
    if span <= 0.0 {
        span = DEGENERATE_SPAN_KM;
    }
    let half = 0.5 * span * (1.0 + PADDING);
    let center = bbox.center();
    [0, 1, 2].map(|i| AxisRange {
        lower: center[i] - half,
        upper: center[i] + half,
    })
}
