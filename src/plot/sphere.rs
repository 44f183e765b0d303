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

use super::Color;
use crate::linalg::Vector3;
use std::f64::consts::{PI, TAU};

/// Number of meridians of the sphere mesh
pub const MESH_LONGITUDES: usize = 40;
/// Number of parallels of the sphere mesh, including both poles
pub const MESH_LATITUDES: usize = 20;

/// A body drawn as a uniformly colored sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub name: String,
    pub center: Vector3<f64>,
    pub radius_km: f64,
    pub color: Color,
    pub opacity: f64,
}

impl Sphere {
    pub fn new<S: Into<String>>(name: S, center: Vector3<f64>, radius_km: f64, color: Color) -> Self {
        Self {
            name: name.into(),
            center,
            radius_km,
            color,
            opacity: 0.8,
        }
    }

    /// Surface grid: one row per longitude in [0, 2π], one column per colatitude in [0, π].
    pub fn mesh(&self) -> Vec<Vec<Vector3<f64>>> {
        let lon_step = TAU / (MESH_LONGITUDES - 1) as f64;
        let colat_step = PI / (MESH_LATITUDES - 1) as f64;
        (0..MESH_LONGITUDES)
            .map(|i| {
                let (su, cu) = (i as f64 * lon_step).sin_cos();
                (0..MESH_LATITUDES)
                    .map(|j| {
                        let (sv, cv) = (j as f64 * colat_step).sin_cos();
                        self.center + self.radius_km * Vector3::new(cu * sv, su * sv, cv)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod ut_sphere {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mesh_is_on_the_surface() {
        let center = Vector3::new(-384_400.0, 10.0, -20.0);
        let earth = Sphere::new("Earth", center, 6371.0, Color::BLUE);
        let mesh = earth.mesh();
        assert_eq!(mesh.len(), MESH_LONGITUDES);
        assert!(mesh.iter().all(|row| row.len() == MESH_LATITUDES));
        for p in mesh.iter().flatten() {
            assert_relative_eq!((p - center).norm(), 6371.0, max_relative = 1e-12);
        }
        // North and south poles
        assert_relative_eq!(mesh[3][0].z, center.z + 6371.0, max_relative = 1e-12);
        assert_relative_eq!(
            mesh[3][MESH_LATITUDES - 1].z,
            center.z - 6371.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(earth.opacity, 0.8);
    }
}
