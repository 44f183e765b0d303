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

use snafu::prelude::*;

mod plan;
mod traj;

pub use plan::{Cadence, SamplingPlan};
pub use traj::{Sample, Trajectory};

use crate::time::{Duration, Epoch};

#[derive(Clone, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TrajError {
    #[snafu(display("cannot sample from {start} to {end} every {step}: the step must be positive and the start before the end"))]
    InvalidSampling {
        start: Epoch,
        end: Epoch,
        step: Duration,
    },
    #[snafu(display("cannot sample from {start} to {end}: the start must be before the end"))]
    InvalidWindow { start: Epoch, end: Epoch },
    #[snafu(display("at least {need} points are required to sample a window, got {got}"))]
    TooFewPoints { need: usize, got: usize },
    #[snafu(display("cannot sample {num} distinct epochs from {start} to {end}"))]
    TooManyPoints { start: Epoch, end: Epoch, num: usize },
    #[snafu(display("trajectory of {name} is empty"))]
    Empty { name: String },
}
