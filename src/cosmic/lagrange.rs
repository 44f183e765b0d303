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

//! Libration point estimates used as plot markers.
//!
//! These are geometric approximations only: the collinear points use the Hill sphere radius, and the
//! triangular points are the primary to secondary vector rotated by sixty degrees about +Z.

use crate::linalg::Vector3;
use crate::utils::r3;

/// Mass ratio `m2 / (m1 + m2)` from the gravitational parameters of the primary and the secondary.
pub fn mass_ratio(gm_primary: f64, gm_secondary: f64) -> f64 {
    gm_secondary / (gm_primary + gm_secondary)
}

/// Distance from the secondary to the L1 and L2 points, using the Hill sphere approximation `R (μ/3)^(1/3)`.
pub fn collinear_distance_km(separation_km: f64, mass_ratio: f64) -> f64 {
    separation_km * (mass_ratio / 3.0).cbrt()
}

/// L4 (leading) and L5 (trailing) positions from the position of the secondary relative to the primary.
pub fn triangular_points(secondary: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let angle = 60.0_f64.to_radians();
    // r3 rotates the frame, so rotating the vector forward requires the opposite angle.
    (r3(-angle) * secondary, r3(angle) * secondary)
}
