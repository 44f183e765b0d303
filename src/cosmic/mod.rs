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

mod bodies;
pub use self::bodies::Body;

mod frames;
pub use self::frames::PlotFrame;

/// Collinear and triangular libration point estimates.
pub mod lagrange;

/// Mean equatorial radius of the Earth, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6_371.0;
/// Mean radius of the Moon, in kilometers
pub const MOON_RADIUS_KM: f64 = 1_737.0;
/// Mean radius of Jupiter, in kilometers
pub const JUPITER_RADIUS_KM: f64 = 69_911.0;
/// Mean radius of Ganymede, in kilometers
pub const GANYMEDE_RADIUS_KM: f64 = 2_634.0;

/// Gravitational parameter of the Sun, in km^3/s^2
pub const SUN_GM: f64 = 1.327_124_400_18e11;
/// Gravitational parameter of the Earth, in km^3/s^2
pub const EARTH_GM: f64 = 3.986_004_418e5;
/// Mass ratio of the Earth-Moon circular restricted three body problem
pub const EARTH_MOON_MASS_RATIO: f64 = 0.012_150_585_609_624;

