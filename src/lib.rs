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

/*! # trajplot

Interactive 3D plots of spacecraft trajectories (halo orbits, flybys, interplanetary cruises).

Trajectories are sampled from SPICE kernels through [ANISE](https://github.com/nyx-space/anise), expressed in
a plotting frame (inertial, two-body rotating or frozen), gathered in a [`plot::Scene`] whose axes share a
single scale, and finally written as a Plotly HTML document (and optionally a PNG preview).
*/

/// Celestial bodies, plotting frames, and libration point estimates.
pub mod cosmic;

/// The ephemeris interface and its ANISE implementation.
pub mod ephem;

mod errors;
/// Every fallible function returns this error, and every error is fatal for a plotting run.
pub use self::errors::PlotError;

/// Configuration files and the HTML and PNG encoders.
pub mod io;

/// Trajectory sampling.
pub mod md;

/// Scene description and equal-aspect normalization.
pub mod plot;

/// The plots themselves: one scenario per binary.
pub mod scenarios;

/// Command line entry point shared by all binaries.
pub mod cli;

/// Utility functions shared by different modules.
pub mod utils;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

pub use self::cosmic::{Body, PlotFrame};
pub use self::ephem::{AlmanacEphemeris, Ephemeris, StateVector};
pub use self::md::trajectory::{Cadence, Sample, SamplingPlan, Trajectory};
pub use self::plot::Scene;
