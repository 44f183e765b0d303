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

use crate::time::{Duration, Epoch};
use serde::de::DeserializeOwned;
use serde::{Deserializer, Serializer};
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::io::Error as IoError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Writes the Plotly HTML document of a scene
pub mod html;
/// Interactive or static emission of a scene
pub mod output;
/// Rasterized preview of a scene
pub mod preview;

pub use output::OutputMode;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration file {}: {source}", path.display()))]
    ReadError { path: PathBuf, source: IoError },

    #[snafu(display("failed to parse YAML configuration: {source}"))]
    ParseError { source: serde_yaml::Error },

    #[snafu(display("failed to serialize configuration to YAML: {source}"))]
    SerializeError { source: serde_yaml::Error },

    #[snafu(display("invalid configuration: {msg}"))]
    InvalidConfig { msg: String },
}

impl PartialEq for ConfigError {
    /// No two configuration errors match
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

pub trait ConfigRepr: Debug + Sized + serde::Serialize + DeserializeOwned {
    /// Builds the configuration representation from the path to a yaml
    fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path.as_ref()).context(ReadSnafu {
            path: path.as_ref().to_path_buf(),
        })?;
        let reader = BufReader::new(file);

        serde_yaml::from_reader(reader).context(ParseSnafu)
    }

    /// Builds the configuration representation from the provided string of a yaml
    fn loads(data: &str) -> Result<Self, ConfigError> {
        debug!("Loading YAML:\n{data}");
        serde_yaml::from_str(data).context(ParseSnafu)
    }

    /// Serializes this configuration into yaml, e.g. as a starting point for a custom configuration.
    fn dumps(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).context(SerializeSnafu)
    }
}

/// The kernels to load into the ephemeris, relative to a common directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KernelSet {
    /// Directory of the kernel files, defaults to the working directory.
    #[serde(default = "KernelSet::default_directory")]
    pub directory: PathBuf,
    /// Kernel file names, loaded in order so that later kernels take precedence.
    pub files: Vec<String>,
}

impl KernelSet {
    pub fn new<S: AsRef<str>>(files: &[S]) -> Self {
        Self {
            directory: Self::default_directory(),
            files: files.iter().map(|f| f.as_ref().to_string()).collect(),
        }
    }

    fn default_directory() -> PathBuf {
        PathBuf::from(".")
    }

    /// Full path of each kernel, in loading order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|file| self.directory.join(file))
            .collect()
    }
}

/// Formats an epoch the way calendar UTC strings are shown in hover boxes, e.g. `2004 SEP 08 16:00:00`.
pub fn calendar_utc(epoch: &Epoch) -> String {
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    let (y, m, d, hh, mm, ss, _) = epoch.to_gregorian_utc();
    let month = MONTHS[(m.clamp(1, 12) - 1) as usize];
    format!("{y} {month} {d:02} {hh:02}:{mm:02}:{ss:02}")
}

pub(crate) fn epoch_to_str<S>(epoch: &Epoch, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{epoch}"))
}

/// A deserializer from Epoch string
pub(crate) fn epoch_from_str<'de, D>(deserializer: D) -> Result<Epoch, D::Error>
where
    D: Deserializer<'de>,
{
    let s = <String as serde::Deserialize>::deserialize(deserializer)?;
    Epoch::from_str(&s).map_err(serde::de::Error::custom)
}

pub(crate) fn maybe_epoch_to_str<S>(epoch: &Option<Epoch>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match epoch {
        Some(epoch) => serializer.serialize_some(&format!("{epoch}")),
        None => serializer.serialize_none(),
    }
}

/// A deserializer from an optional Epoch string
pub(crate) fn maybe_epoch_from_str<'de, D>(deserializer: D) -> Result<Option<Epoch>, D::Error>
where
    D: Deserializer<'de>,
{
    match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
        Some(s) => Epoch::from_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub(crate) fn duration_to_str<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{duration}"))
}

/// A deserializer from Duration string
pub(crate) fn duration_from_str<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = <String as serde::Deserialize>::deserialize(deserializer)?;
    Duration::from_str(&s).map_err(serde::de::Error::custom)
}

pub(crate) fn maybe_duration_to_str<S>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match duration {
        Some(duration) => serializer.serialize_some(&format!("{duration}")),
        None => serializer.serialize_none(),
    }
}

/// A deserializer from an optional Duration string
pub(crate) fn maybe_duration_from_str<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
        Some(s) => Duration::from_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod ut_io {
    use super::*;
    use crate::time::Unit;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Window {
        #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
        start: Epoch,
        #[serde(
            default,
            serialize_with = "maybe_epoch_to_str",
            deserialize_with = "maybe_epoch_from_str"
        )]
        end: Option<Epoch>,
        #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
        step: Duration,
    }

    impl ConfigRepr for Window {}

    #[test]
    fn load_window() {
        let window = Window::loads("start: 2031-07-01T00:00:00 UTC\nstep: 3 h\n").unwrap();
        assert_eq!(window.start, Epoch::from_gregorian_utc_at_midnight(2031, 7, 1));
        assert_eq!(window.end, None);
        assert_eq!(window.step, 3.0 * Unit::Hour);

        let window = Window::loads(
            "start: 2031-07-01T00:00:00 UTC\nend: 2034-10-28T00:00:00 UTC\nstep: 1 d\n",
        )
        .unwrap();
        assert_eq!(
            window.end,
            Some(Epoch::from_gregorian_utc_at_midnight(2034, 10, 28))
        );
        assert_eq!(window.step, 1.0 * Unit::Day);
    }

    #[test]
    fn bad_yaml() {
        assert!(matches!(
            Window::loads("start: yesterday\nstep: 1 d\n"),
            Err(ConfigError::ParseError { .. })
        ));
        assert!(matches!(
            Window::load("does/not/exist.yaml"),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn kernel_paths() {
        let mut kernels = KernelSet::new(&["de440s.bsp", "jwst_rec.bsp"]);
        kernels.directory = PathBuf::from("data");
        assert_eq!(
            kernels.paths(),
            vec![
                PathBuf::from("data/de440s.bsp"),
                PathBuf::from("data/jwst_rec.bsp")
            ]
        );
        let kernels: KernelSet = serde_yaml::from_str("files: [de440s.bsp]").unwrap();
        assert_eq!(kernels.directory, PathBuf::from("."));
    }

    #[test]
    fn calendar_strings() {
        let epoch = Epoch::from_gregorian_utc_hms(2004, 9, 8, 16, 0, 0);
        assert_eq!(calendar_utc(&epoch), "2004 SEP 08 16:00:00");
    }
}
