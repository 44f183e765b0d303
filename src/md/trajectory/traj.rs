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

use super::{EmptySnafu, SamplingPlan, TrajError};
use crate::cosmic::{Body, PlotFrame};
use crate::ephem::{Ephemeris, StateVector};
use crate::linalg::Vector3;
use crate::time::Epoch;
use crate::PlotError;
use snafu::ensure;
use std::fmt;
use std::time::Instant;

/// A sample is a state expressed in the plot frame of its trajectory.
pub type Sample = StateVector;

/// Ordered samples of a body, all expressed in the same plot frame.
///
/// Epochs are strictly increasing, and with a step cadence consecutive samples are exactly one step apart.
#[derive(Clone, PartialEq)]
pub struct Trajectory {
    /// Name of the sampled body, used as the legend of its trace.
    pub name: String,
    pub target: Body,
    pub frame: PlotFrame,
    samples: Vec<Sample>,
}

impl Trajectory {
    /// Samples the target in the provided frame on every epoch of the plan.
    ///
    /// One ephemeris query is made per epoch. The first failed query aborts the whole sampling: no partial
    /// trajectory is ever returned.
    pub fn sample<E: Ephemeris + ?Sized>(
        ephem: &E,
        target: Body,
        frame: &PlotFrame,
        plan: &SamplingPlan,
    ) -> Result<Self, PlotError> {
        let epochs = plan.epochs()?;
        let start_instant = Instant::now();

        let mut samples = Vec::with_capacity(epochs.len());
        for epoch in epochs {
            let sample = frame.express(ephem, target, epoch)?;
            debug!("{target}: {sample}");
            samples.push(sample);
        }

        let traj = Self {
            name: target.to_string(),
            target,
            frame: frame.clone(),
            samples,
        };

        info!(
            "Sampled {traj} in {} ms",
            (Instant::now() - start_instant).as_millis()
        );

        Ok(traj)
    }

    /// Renames this trajectory, i.e. the legend of its trace.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Keeps only the samples matching the predicate, in order.
    pub fn filtered<F: Fn(&Sample) -> bool>(mut self, predicate: F) -> Self {
        let before = self.samples.len();
        self.samples.retain(|sample| predicate(sample));
        if self.samples.len() != before {
            debug!(
                "{}: dropped {} of {before} samples",
                self.name,
                before - self.samples.len()
            );
        }
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the first sample, if any
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Returns the last sample, if any
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn epochs(&self) -> Vec<Epoch> {
        self.samples.iter().map(|s| s.epoch).collect()
    }

    pub fn positions(&self) -> Vec<Vector3<f64>> {
        self.samples.iter().map(|s| s.position_km).collect()
    }

    /// Speed of each sample in the plot frame, in km/s
    pub fn speeds_km_s(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.speed_km_s()).collect()
    }

    /// Mean position over all samples
    pub fn mean_position(&self) -> Result<Vector3<f64>, TrajError> {
        ensure!(
            !self.samples.is_empty(),
            EmptySnafu {
                name: self.name.clone()
            }
        );
        let sum = self
            .samples
            .iter()
            .fold(Vector3::zeros(), |acc, s| acc + s.position_km);
        Ok(sum / self.samples.len() as f64)
    }

    /// Largest distance from the frame center, in km
    pub fn max_radius_km(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.rmag_km())
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => {
                let dur = last.epoch - first.epoch;
                write!(
                    f,
                    "Trajectory of {} in {} from {} to {} ({}, or {:.3} s) [{} samples]",
                    self.name,
                    self.frame,
                    first.epoch,
                    last.epoch,
                    dur,
                    dur.to_seconds(),
                    self.samples.len()
                )
            }
            _ => write!(f, "Empty trajectory of {} in {}", self.name, self.frame),
        }
    }
}

impl fmt::Debug for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
