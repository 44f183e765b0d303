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

use crate::ephem::EphemerisError;
use crate::io::ConfigError;
use crate::md::trajectory::TrajError;
use snafu::prelude::*;
use std::io::Error as IoError;
use std::path::PathBuf;

/// Every way a plotting run can fail. All of them are fatal for the run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PlotError {
    #[snafu(display("ephemeris failure: {source}"))]
    Ephemeris { source: EphemerisError },
    #[snafu(display("sampling failure: {source}"))]
    Sampling { source: TrajError },
    #[snafu(display("configuration failure: {source}"))]
    Config { source: ConfigError },
    #[snafu(display("could not write {}: {source}", path.display()))]
    Output { path: PathBuf, source: IoError },
    #[snafu(display("could not rasterize preview {}: {source}", path.display()))]
    Preview {
        path: PathBuf,
        source: image::ImageError,
    },
    #[snafu(display("could not encode scene for {action}: {source}"))]
    Encoding {
        action: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("could not open the viewer on {}: {source}", path.display()))]
    Viewer { path: PathBuf, source: IoError },
    #[snafu(display("scene `{title}` has nothing to plot"))]
    EmptyScene { title: String },
}

impl From<EphemerisError> for PlotError {
    fn from(source: EphemerisError) -> Self {
        Self::Ephemeris { source }
    }
}

impl From<TrajError> for PlotError {
    fn from(source: TrajError) -> Self {
        Self::Sampling { source }
    }
}

impl From<ConfigError> for PlotError {
    fn from(source: ConfigError) -> Self {
        Self::Config { source }
    }
}
