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

use super::TrajError;
use crate::io::{
    epoch_from_str, epoch_to_str, maybe_duration_from_str, maybe_duration_to_str, ConfigError,
};
use crate::time::{Duration, Epoch};
use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// How often a body is sampled in a window.
///
/// In configuration files, a cadence is a map with a single key, e.g. `step: 1 h` or `points: 400`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CadenceRepr", into = "CadenceRepr")]
pub enum Cadence {
    /// Fixed step from the start of the window. The end of the window is only sampled if it falls on the grid.
    Step(Duration),
    /// This many evenly spaced samples, including both the start and the end of the window.
    Points(usize),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CadenceRepr {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "maybe_duration_to_str",
        deserialize_with = "maybe_duration_from_str"
    )]
    step: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    points: Option<usize>,
}

impl TryFrom<CadenceRepr> for Cadence {
    type Error = ConfigError;

    fn try_from(repr: CadenceRepr) -> Result<Self, Self::Error> {
        match (repr.step, repr.points) {
            (Some(step), None) => Ok(Self::Step(step)),
            (None, Some(num)) => Ok(Self::Points(num)),
            _ => Err(ConfigError::InvalidConfig {
                msg: "a cadence is either a `step` or a number of `points`".to_string(),
            }),
        }
    }
}

impl From<Cadence> for CadenceRepr {
    fn from(cadence: Cadence) -> Self {
        match cadence {
            Cadence::Step(step) => Self {
                step: Some(step),
                points: None,
            },
            Cadence::Points(num) => Self {
                step: None,
                points: Some(num),
            },
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Step(step) => write!(f, "every {step}"),
            Self::Points(n) => write!(f, "{n} points"),
        }
    }
}

/// A sampling window and its cadence.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingPlan {
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub start: Epoch,
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub end: Epoch,
    pub cadence: Cadence,
}

impl SamplingPlan {
    /// Sample from `start` to `end` (included if on the grid) every `step`.
    pub fn every(start: Epoch, end: Epoch, step: Duration) -> Self {
        Self {
            start,
            end,
            cadence: Cadence::Step(step),
        }
    }

    /// Sample `num` evenly spaced epochs from `start` to `end`, both included.
    pub fn points(start: Epoch, end: Epoch, num: usize) -> Self {
        Self {
            start,
            end,
            cadence: Cadence::Points(num),
        }
    }

    /// A window of the provided span centered on `mid`.
    pub fn centered(mid: Epoch, span: Duration, cadence: Cadence) -> Self {
        Self {
            start: mid - span * 0.5,
            end: mid + span * 0.5,
            cadence,
        }
    }

    /// Returns the midpoint of this window.
    pub fn mid(&self) -> Epoch {
        self.start + (self.end - self.start) * 0.5
    }

    /// Checks this plan and returns the number of epochs it yields.
    pub fn len(&self) -> Result<usize, TrajError> {
        match self.cadence {
            Cadence::Step(step) => {
                if step <= Duration::ZERO || self.start >= self.end {
                    return Err(TrajError::InvalidSampling {
                        start: self.start,
                        end: self.end,
                        step,
                    });
                }
                let span_ns = (self.end - self.start).total_nanoseconds();
                Ok((span_ns / step.total_nanoseconds()) as usize + 1)
            }
            Cadence::Points(num) => {
                if self.start >= self.end {
                    return Err(TrajError::InvalidWindow {
                        start: self.start,
                        end: self.end,
                    });
                }
                if num < 2 {
                    return Err(TrajError::TooFewPoints { need: 2, got: num });
                }
                // Consecutive epochs must be at least one nanosecond apart
                let span_ns = (self.end - self.start).total_nanoseconds();
                if span_ns < (num - 1) as i128 {
                    return Err(TrajError::TooManyPoints {
                        start: self.start,
                        end: self.end,
                        num,
                    });
                }
                Ok(num)
            }
        }
    }

    /// Returns the sampled epochs, strictly increasing.
    pub fn epochs(&self) -> Result<Vec<Epoch>, TrajError> {
        let num = self.len()?;
        let mut epochs = Vec::with_capacity(num);
        match self.cadence {
            Cadence::Step(step) => {
                let mut epoch = self.start;
                for _ in 0..num {
                    epochs.push(epoch);
                    epoch += step;
                }
            }
            Cadence::Points(_) => {
                let span_ns = (self.end - self.start).total_nanoseconds();
                let intervals = (num - 1) as i128;
                for i in 0..intervals {
                    epochs.push(self.start + Duration::from_total_nanoseconds(span_ns * i / intervals));
                }
                epochs.push(self.end);
            }
        }
        Ok(epochs)
    }
}

impl fmt::Display for SamplingPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} to {} ({})", self.start, self.end, self.cadence)
    }
}
