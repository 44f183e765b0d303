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

use anise::prelude::Frame;
use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// NAIF identifier of a body, as used in SPICE kernels.
pub type NaifId = i32;

/// A body known to the ephemeris, identified by its NAIF ID.
///
/// In configuration files, a body may be given either by its NAIF ID (e.g. `-60000`) or by one of the
/// names of [`Body::KNOWN`] (case insensitive, spaces and underscores are equivalent).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BodyRepr", into = "BodyRepr")]
pub struct Body(pub NaifId);

impl Body {
    pub const SSB: Self = Self(0);
    pub const MERCURY_BARYCENTER: Self = Self(1);
    pub const VENUS_BARYCENTER: Self = Self(2);
    pub const EARTH_MOON_BARYCENTER: Self = Self(3);
    pub const MARS_BARYCENTER: Self = Self(4);
    pub const JUPITER_BARYCENTER: Self = Self(5);
    pub const SATURN_BARYCENTER: Self = Self(6);
    pub const URANUS_BARYCENTER: Self = Self(7);
    pub const NEPTUNE_BARYCENTER: Self = Self(8);
    pub const PLUTO_BARYCENTER: Self = Self(9);
    pub const SUN: Self = Self(10);
    pub const MERCURY: Self = Self(199);
    pub const VENUS: Self = Self(299);
    pub const MOON: Self = Self(301);
    pub const EARTH: Self = Self(399);
    pub const MARS: Self = Self(499);
    pub const IO: Self = Self(501);
    pub const EUROPA: Self = Self(502);
    pub const GANYMEDE: Self = Self(503);
    pub const CALLISTO: Self = Self(504);
    pub const JUPITER: Self = Self(599);
    pub const SATURN: Self = Self(699);

    pub const GATEWAY: Self = Self(-60000);
    pub const GENESIS: Self = Self(-47);
    pub const JWST: Self = Self(-170);
    pub const LUCY: Self = Self(-49);
    pub const VOYAGER_1: Self = Self(-31);
    pub const VOYAGER_2: Self = Self(-32);
    pub const JUICE: Self = Self(-28);

    /// Names accepted when parsing a body, the first name of each ID is its display name.
    pub const KNOWN: &'static [(&'static str, Body)] = &[
        ("Solar System Barycenter", Self::SSB),
        ("SSB", Self::SSB),
        ("Mercury Barycenter", Self::MERCURY_BARYCENTER),
        ("Venus Barycenter", Self::VENUS_BARYCENTER),
        ("Earth Moon Barycenter", Self::EARTH_MOON_BARYCENTER),
        ("EMB", Self::EARTH_MOON_BARYCENTER),
        ("Mars Barycenter", Self::MARS_BARYCENTER),
        ("Jupiter Barycenter", Self::JUPITER_BARYCENTER),
        ("Saturn Barycenter", Self::SATURN_BARYCENTER),
        ("Uranus Barycenter", Self::URANUS_BARYCENTER),
        ("Neptune Barycenter", Self::NEPTUNE_BARYCENTER),
        ("Pluto Barycenter", Self::PLUTO_BARYCENTER),
        ("Sun", Self::SUN),
        ("Mercury", Self::MERCURY),
        ("Venus", Self::VENUS),
        ("Moon", Self::MOON),
        ("Luna", Self::MOON),
        ("Earth", Self::EARTH),
        ("Mars", Self::MARS),
        ("Io", Self::IO),
        ("Europa", Self::EUROPA),
        ("Ganymede", Self::GANYMEDE),
        ("Callisto", Self::CALLISTO),
        ("Jupiter", Self::JUPITER),
        ("Saturn", Self::SATURN),
        ("Gateway", Self::GATEWAY),
        ("Genesis", Self::GENESIS),
        ("JWST", Self::JWST),
        ("James Webb Space Telescope", Self::JWST),
        ("Lucy", Self::LUCY),
        ("Voyager 1", Self::VOYAGER_1),
        ("Voyager 2", Self::VOYAGER_2),
        ("JUICE", Self::JUICE),
    ];

    /// Returns the NAIF ID of this body
    pub const fn id(&self) -> NaifId {
        self.0
    }

    /// Returns the display name of this body, if it is a known body.
    pub fn name(&self) -> Option<&'static str> {
        Self::KNOWN
            .iter()
            .find(|(_, body)| body == self)
            .map(|(name, _)| *name)
    }

    /// Returns the ANISE frame centered on this body with J2000 orientation.
    pub fn j2000(&self) -> Frame {
        Frame::from_ephem_j2000(self.0)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "body {}", self.0),
        }
    }
}

impl From<NaifId> for Body {
    fn from(id: NaifId) -> Self {
        Self(id)
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.trim().parse::<NaifId>() {
            return Ok(Self(id));
        }
        let needle = normalize(s);
        Self::KNOWN
            .iter()
            .find(|(name, _)| normalize(name) == needle)
            .map(|(_, body)| *body)
            .ok_or_else(|| format!("unknown body `{s}`, use its NAIF ID instead"))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace('_', " ")
}

/// Serialized representation of a body: either its NAIF ID or its name.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum BodyRepr {
    Id(NaifId),
    Name(String),
}

impl TryFrom<BodyRepr> for Body {
    type Error = String;

    fn try_from(repr: BodyRepr) -> Result<Self, Self::Error> {
        match repr {
            BodyRepr::Id(id) => Ok(Self(id)),
            BodyRepr::Name(name) => Self::from_str(&name),
        }
    }
}

impl From<Body> for BodyRepr {
    fn from(body: Body) -> Self {
        match body.name() {
            Some(name) => Self::Name(name.to_string()),
            None => Self::Id(body.0),
        }
    }
}
