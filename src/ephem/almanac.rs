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

use super::{Ephemeris, EphemerisError, StateVector};
use crate::cosmic::Body;
use crate::io::KernelSet;
use crate::linalg::Vector3;
use crate::time::Epoch;
use anise::prelude::Almanac;
use std::time::Instant;

/// Extensions of the kernels that ANISE reads directly.
const BINARY_KERNELS: [&str; 3] = ["bsp", "bpc", "pca"];

/// An [`Ephemeris`] backed by the SPICE kernels loaded in an ANISE [`Almanac`].
#[derive(Clone, Default)]
pub struct AlmanacEphemeris {
    pub almanac: Almanac,
}

impl AlmanacEphemeris {
    pub fn from_almanac(almanac: Almanac) -> Self {
        Self { almanac }
    }

    /// Loads every binary kernel of the provided set, in order.
    ///
    /// Text kernels are skipped: leap seconds are handled by hifitime and the plotting frames are built in code.
    pub fn load(kernels: &KernelSet) -> Result<Self, EphemerisError> {
        let start_instant = Instant::now();
        let mut almanac = Almanac::default();
        for path in kernels.paths() {
            let is_binary = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| BINARY_KERNELS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false);

            if !is_binary {
                warn!("Skipping text kernel {}", path.display());
                continue;
            }

            debug!("Loading {}", path.display());
            almanac = almanac
                .load(&path.to_string_lossy())
                .map_err(|e| EphemerisError::KernelLoad {
                    path: path.clone(),
                    details: e.to_string(),
                })?;
        }

        info!(
            "Loaded {} kernel(s) in {} ms",
            kernels.files.len(),
            (Instant::now() - start_instant).as_millis()
        );

        Ok(Self { almanac })
    }
}

impl Ephemeris for AlmanacEphemeris {
    fn state(
        &self,
        target: Body,
        observer: Body,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        let state = self
            .almanac
            .translate(target.j2000(), observer.j2000(), epoch, None)
            .map_err(|e| EphemerisError::Unavailable {
                target,
                observer,
                epoch,
                details: e.to_string(),
            })?;

        Ok(StateVector::new(
            epoch,
            Vector3::new(state.radius_km.x, state.radius_km.y, state.radius_km.z),
            Vector3::new(
                state.velocity_km_s.x,
                state.velocity_km_s.y,
                state.velocity_km_s.z,
            ),
        ))
    }

    fn coverage(&self, body: Body) -> Result<(Epoch, Epoch), EphemerisError> {
        self.almanac
            .spk_domain(body.id())
            .map_err(|e| EphemerisError::NoCoverage {
                body,
                details: e.to_string(),
            })
    }
}
