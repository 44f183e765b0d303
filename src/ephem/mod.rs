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

use crate::cosmic::Body;
use crate::linalg::Vector3;
use crate::time::Epoch;
use snafu::prelude::*;
use std::fmt;
use std::path::PathBuf;

mod almanac;
pub use almanac::AlmanacEphemeris;

/// Position and velocity of a body at an epoch, in kilometers and kilometers per second.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StateVector {
    pub epoch: Epoch,
    pub position_km: Vector3<f64>,
    pub velocity_km_s: Vector3<f64>,
}

impl StateVector {
    pub fn new(epoch: Epoch, position_km: Vector3<f64>, velocity_km_s: Vector3<f64>) -> Self {
        Self {
            epoch,
            position_km,
            velocity_km_s,
        }
    }

    /// Norm of the position vector, in km
    pub fn rmag_km(&self) -> f64 {
        self.position_km.norm()
    }

    /// Norm of the velocity vector, in km/s
    pub fn speed_km_s(&self) -> f64 {
        self.velocity_km_s.norm()
    }

    /// Specific angular momentum vector, in km^2/s
    pub fn hvec(&self) -> Vector3<f64> {
        self.position_km.cross(&self.velocity_km_s)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}] position = [{:.3}, {:.3}, {:.3}] km\tvelocity = [{:.6}, {:.6}, {:.6}] km/s",
            self.epoch,
            self.position_km.x,
            self.position_km.y,
            self.position_km.z,
            self.velocity_km_s.x,
            self.velocity_km_s.y,
            self.velocity_km_s.z
        )
    }
}

/// A source of body states.
///
/// All states are geometric (no light time nor stellar aberration correction) and expressed with J2000 axes.
/// Implementations must fail with [`EphemerisError::Unavailable`] when the requested epoch is outside of the
/// loaded data: callers never extrapolate.
pub trait Ephemeris {
    /// Returns the state of `target` relative to `observer` at the requested epoch.
    fn state(
        &self,
        target: Body,
        observer: Body,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError>;

    /// Returns the first and last epochs where data for this body is available.
    fn coverage(&self, body: Body) -> Result<(Epoch, Epoch), EphemerisError>;
}

#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EphemerisError {
    #[snafu(display("ephemeris data unavailable for {target} relative to {observer} at {epoch}: {details}"))]
    Unavailable {
        target: Body,
        observer: Body,
        epoch: Epoch,
        details: String,
    },
    #[snafu(display("no ephemeris coverage for {body}: {details}"))]
    NoCoverage { body: Body, details: String },
    #[snafu(display("could not load kernel {}: {details}", path.display()))]
    KernelLoad { path: PathBuf, details: String },
    #[snafu(display("{primary} and {secondary} do not define a frame at {epoch} (collinear or null state)"))]
    DegenerateFrame {
        primary: Body,
        secondary: Body,
        epoch: Epoch,
    },
}

#[cfg(test)]
pub(crate) mod test_ephem {
    //! A two level analytic ephemeris: every body is on a circular orbit about its parent.
    use super::{Ephemeris, EphemerisError, StateVector};
    use crate::cosmic::Body;
    use crate::linalg::Vector3;
    use crate::time::Epoch;
    use std::collections::HashMap;
    use std::f64::consts::TAU;

    #[derive(Clone, Debug)]
    pub(crate) struct CircularOrbit {
        pub parent: Body,
        pub radius_km: f64,
        pub period_s: f64,
        pub inclination_rad: f64,
    }

    #[derive(Clone, Debug)]
    pub(crate) struct CircularEphemeris {
        pub orbits: HashMap<Body, CircularOrbit>,
        pub start: Epoch,
        pub end: Epoch,
    }

    impl CircularEphemeris {
        /// Earth, Moon and a spacecraft circling the Moon, valid for 30 days after 2025-01-01.
        pub fn earth_moon() -> Self {
            let start = Epoch::from_gregorian_utc_at_midnight(2025, 1, 1);
            let mut orbits = HashMap::new();
            orbits.insert(
                Body::EARTH_MOON_BARYCENTER,
                CircularOrbit {
                    parent: Body::SUN,
                    radius_km: 1.496e8,
                    period_s: 365.25 * 86_400.0,
                    inclination_rad: 0.0,
                },
            );
            orbits.insert(
                Body::MOON,
                CircularOrbit {
                    parent: Body::EARTH_MOON_BARYCENTER,
                    radius_km: 379_730.0,
                    period_s: 27.32 * 86_400.0,
                    inclination_rad: 0.09,
                },
            );
            orbits.insert(
                Body::EARTH,
                CircularOrbit {
                    parent: Body::EARTH_MOON_BARYCENTER,
                    radius_km: -4_670.0,
                    period_s: 27.32 * 86_400.0,
                    inclination_rad: 0.09,
                },
            );
            orbits.insert(
                Body::GATEWAY,
                CircularOrbit {
                    parent: Body::MOON,
                    radius_km: 10_000.0,
                    period_s: 6.5 * 86_400.0,
                    inclination_rad: 1.5,
                },
            );
            Self {
                orbits,
                start,
                end: start + 30.0 * hifitime::Unit::Day,
            }
        }

        fn state_wrt_sun(&self, body: Body, epoch: Epoch) -> (Vector3<f64>, Vector3<f64>) {
            match self.orbits.get(&body) {
                None => (Vector3::zeros(), Vector3::zeros()),
                Some(orbit) => {
                    let (pr, pv) = self.state_wrt_sun(orbit.parent, epoch);
                    let n = TAU / orbit.period_s;
                    let theta = n * (epoch - self.start).to_seconds();
                    let (si, ci) = orbit.inclination_rad.sin_cos();
                    let (st, ct) = theta.sin_cos();
                    let r = orbit.radius_km * Vector3::new(ct, st * ci, st * si);
                    let v = orbit.radius_km * n * Vector3::new(-st, ct * ci, ct * si);
                    (pr + r, pv + v)
                }
            }
        }
    }

    impl Ephemeris for CircularEphemeris {
        fn state(
            &self,
            target: Body,
            observer: Body,
            epoch: Epoch,
        ) -> Result<StateVector, EphemerisError> {
            if epoch < self.start || epoch > self.end {
                return Err(EphemerisError::Unavailable {
                    target,
                    observer,
                    epoch,
                    details: "outside of the test ephemeris".to_string(),
                });
            }
            let (tr, tv) = self.state_wrt_sun(target, epoch);
            let (or, ov) = self.state_wrt_sun(observer, epoch);
            Ok(StateVector::new(epoch, tr - or, tv - ov))
        }

        fn coverage(&self, _body: Body) -> Result<(Epoch, Epoch), EphemerisError> {
            Ok((self.start, self.end))
        }
    }
}
