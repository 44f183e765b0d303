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

use super::Body;
use crate::ephem::{Ephemeris, EphemerisError, StateVector};
use crate::io::{epoch_from_str, epoch_to_str};
use crate::linalg::{Matrix3, Vector3};
use crate::time::Epoch;
use crate::utils::tilde_matrix;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Below this norm, a basis vector is considered null.
const DEGENERATE_NORM: f64 = 1e-12;

/// The frame in which the plotted positions are expressed.
///
/// The rotating frames are defined from the relative motion of two bodies:
/// + +X is the unit vector from the primary to the secondary;
/// + +Z is the unit vector along the angular momentum of the secondary about the primary;
/// + +Y completes the right handed set.
///
/// The Earth-Moon barycentric rotating frame (EMBR) is `Rotating { primary: EMB, secondary: Moon, .. }`,
/// the geocentric solar frame is `Rotating { primary: Sun, secondary: Earth, .. }` centered on the Earth, and the heliocentric
/// Jupiter barycenter frame is `Rotating { primary: Sun, secondary: Jupiter Barycenter, .. }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotFrame {
    /// J2000 axes, centered on `center`.
    Inertial { center: Body },
    /// Axes rotating with the primary to secondary line, centered on `center`.
    Rotating {
        primary: Body,
        secondary: Body,
        center: Body,
    },
    /// Axes of the rotating frame at `epoch`, then fixed in inertial space.
    Frozen {
        primary: Body,
        secondary: Body,
        center: Body,
        #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
        epoch: Epoch,
    },
}

impl PlotFrame {
    /// Earth-Moon barycentric rotating axes, centered on the Moon.
    pub const fn moon_centered_embr() -> Self {
        Self::Rotating {
            primary: Body::EARTH_MOON_BARYCENTER,
            secondary: Body::MOON,
            center: Body::MOON,
        }
    }

    /// Geocentric solar rotating axes, centered on the Earth. The Sun is on -X, so L1 is on -X and L2 on +X.
    pub const fn gse() -> Self {
        Self::Rotating {
            primary: Body::SUN,
            secondary: Body::EARTH,
            center: Body::EARTH,
        }
    }

    /// Heliocentric rotating axes with the Jupiter system barycenter on +X, centered on the Sun.
    pub const fn hjb() -> Self {
        Self::Rotating {
            primary: Body::SUN,
            secondary: Body::JUPITER_BARYCENTER,
            center: Body::SUN,
        }
    }

    /// Returns the origin of this frame.
    pub const fn center(&self) -> Body {
        match *self {
            Self::Inertial { center }
            | Self::Rotating { center, .. }
            | Self::Frozen { center, .. } => center,
        }
    }

    /// Returns the rotation from J2000 to this frame at the provided epoch (rows are the frame axes in J2000)
    /// and the angular velocity of the frame with respect to J2000, in rad/s and J2000 axes.
    pub fn dcm_from_j2000<E: Ephemeris + ?Sized>(
        &self,
        ephem: &E,
        epoch: Epoch,
    ) -> Result<(Matrix3<f64>, Vector3<f64>), EphemerisError> {
        match *self {
            Self::Inertial { .. } => Ok((Matrix3::identity(), Vector3::zeros())),
            Self::Rotating {
                primary, secondary, ..
            } => {
                let line = ephem.state(secondary, primary, epoch)?;
                let dcm = two_body_dcm(&line, primary, secondary)?;
                // Rotation rate of the primary to secondary line, the out of plane drift is neglected.
                let omega = line.hvec() / line.rmag_km().powi(2);
                Ok((dcm, omega))
            }
            Self::Frozen {
                primary,
                secondary,
                epoch: frozen_epoch,
                ..
            } => {
                let line = ephem.state(secondary, primary, frozen_epoch)?;
                Ok((two_body_dcm(&line, primary, secondary)?, Vector3::zeros()))
            }
        }
    }

    /// Returns the state of the target expressed in this frame.
    ///
    /// The velocity is the velocity as seen by an observer fixed in this frame, i.e. it includes the
    /// transport term of the rotating frames.
    pub fn express<E: Ephemeris + ?Sized>(
        &self,
        ephem: &E,
        target: Body,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        let inertial = ephem.state(target, self.center(), epoch)?;
        let (dcm, omega) = self.dcm_from_j2000(ephem, epoch)?;
        Ok(StateVector::new(
            epoch,
            dcm * inertial.position_km,
            dcm * (inertial.velocity_km_s - tilde_matrix(&omega) * inertial.position_km),
        ))
    }
}

impl fmt::Display for PlotFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Inertial { center } => write!(f, "J2000 centered on {center}"),
            Self::Rotating {
                primary,
                secondary,
                center,
            } => write!(
                f,
                "{primary} -> {secondary} rotating frame centered on {center}"
            ),
            Self::Frozen {
                primary,
                secondary,
                center,
                epoch,
            } => write!(
                f,
                "{primary} -> {secondary} frame frozen at {epoch} centered on {center}"
            ),
        }
    }
}

/// Builds the J2000 to two-body frame rotation from the state of the secondary relative to the primary.
fn two_body_dcm(
    line: &StateVector,
    primary: Body,
    secondary: Body,
) -> Result<Matrix3<f64>, EphemerisError> {
    let degenerate = || EphemerisError::DegenerateFrame {
        primary,
        secondary,
        epoch: line.epoch,
    };

    let x_hat = line
        .position_km
        .try_normalize(DEGENERATE_NORM)
        .ok_or_else(degenerate)?;
    let z_hat = line
        .hvec()
        .try_normalize(DEGENERATE_NORM)
        .ok_or_else(degenerate)?;
    let y_hat = z_hat.cross(&x_hat);

    Ok(Matrix3::from_rows(&[
        x_hat.transpose(),
        y_hat.transpose(),
        z_hat.transpose(),
    ]))
}
