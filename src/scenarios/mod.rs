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

use crate::cosmic::lagrange::{collinear_distance_km, mass_ratio};
use crate::cosmic::{Body, PlotFrame, EARTH_GM, SUN_GM};
use crate::ephem::Ephemeris;
use crate::io::{ConfigRepr, KernelSet, OutputMode};
use crate::md::trajectory::{Cadence, SamplingPlan, Trajectory};
use crate::plot::{Color, Polyline, Scene};
use crate::time::{Duration, Epoch, Unit};
use crate::PlotError;
use std::path::PathBuf;

mod genesis;
mod juice;
mod jwst;
mod lucy;
mod nrho;
mod vger;

pub use genesis::{GenesisConfig, GenesisHalo};
pub use juice::{JuiceConfig, JuiceCruise, JuiceGanymede, JuiceJupiter, Phase};
pub use jwst::{Jwst, JwstConfig};
pub use lucy::{Encounter, Lucy, LucyConfig, TrojanTarget};
pub use nrho::{NrhoConfig, NrhoPlot};
pub use vger::{Vger, VgerConfig};

/// A plot: which kernels it needs, how its scene is built, and where it is written.
pub trait Scenario {
    /// Name of the HTML document
    const HTML_FILE: &'static str;
    /// Name of the PNG preview, if this scenario has one
    const PREVIEW_FILE: Option<&'static str> = None;

    type Config: ConfigRepr;

    /// Configuration reproducing the published plot.
    fn default_config() -> Self::Config;

    fn kernels(cfg: &Self::Config) -> &KernelSet;

    /// Samples every trajectory and assembles the scene. Nothing is written here.
    fn build(cfg: &Self::Config, ephem: &dyn Ephemeris) -> Result<Scene, PlotError>;
}

/// Builds the scene of the scenario and emits it, returning the paths of the written files.
///
/// The scene is entirely built before any file is written: a failed sampling leaves no file behind.
pub fn execute<S: Scenario>(
    cfg: &S::Config,
    ephem: &dyn Ephemeris,
    mode: &OutputMode,
) -> Result<Vec<PathBuf>, PlotError> {
    let scene = S::build(cfg, ephem)?;
    if let Some([x, y, z]) = scene.axis_ranges() {
        debug!("{}: x in {x}, y in {y}, z in {z}", scene.title);
    }
    info!(
        "Built `{}` with {} traces, output is {mode}",
        scene.title,
        scene.traces.len()
    );
    crate::io::output::emit(&scene, mode, S::HTML_FILE, S::PREVIEW_FILE)
}

/// Resolves a sampling window, using the ephemeris coverage of `body` for any unspecified bound.
pub(crate) fn window(
    ephem: &dyn Ephemeris,
    body: Body,
    start: Option<Epoch>,
    end: Option<Epoch>,
) -> Result<(Epoch, Epoch), PlotError> {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            let (cov_start, cov_end) = ephem.coverage(body)?;
            info!("Coverage of {body}: {cov_start} to {cov_end}");
            (start.unwrap_or(cov_start), end.unwrap_or(cov_end))
        }
    };
    info!("Sampling {body} from {start} to {end}");
    Ok((start, end))
}

/// About one sample per day, including both ends of the window.
pub(crate) fn daily_points(start: Epoch, end: Epoch) -> Cadence {
    let days = (end - start).to_unit(Unit::Day).ceil().max(2.0);
    Cadence::Points(days as usize)
}

/// A solid line through every sample of the trajectory, named after it.
pub(crate) fn trajectory_line(traj: &Trajectory, color: Color, width: f64) -> Polyline {
    Polyline::builder()
        .name(traj.name.clone())
        .points(traj.positions())
        .color(color)
        .width(width)
        .build()
}

/// One lunar cycle of the Moon centered on `mid`, with a small overlap so that the trace closes on itself.
pub(crate) fn lunar_cycle(
    ephem: &dyn Ephemeris,
    frame: &PlotFrame,
    mid: Epoch,
    span: Duration,
    points: usize,
) -> Result<Trajectory, PlotError> {
    let plan = SamplingPlan::centered(mid, span, Cadence::Points(points));
    Ok(Trajectory::sample(ephem, Body::MOON, frame, &plan)?.with_name("Moon orbit (1 cycle)"))
}

/// Distance from the Earth to the Sun-Earth L1 and L2 points at this epoch, in km.
pub(crate) fn sun_earth_libration_km(
    ephem: &dyn Ephemeris,
    epoch: Epoch,
) -> Result<f64, PlotError> {
    let sun = ephem.state(Body::SUN, Body::EARTH, epoch)?;
    Ok(collinear_distance_km(
        sun.rmag_km(),
        mass_ratio(SUN_GM, EARTH_GM),
    ))
}

#[cfg(test)]
pub(crate) mod test_scenario {
    //! An analytic solar system for scenario tests. Bodies are on circular orbits about their parents,
    //! and every spacecraft is on a small circular orbit about the body of its mission.
    use crate::cosmic::Body;
    use crate::ephem::test_ephem::{CircularEphemeris, CircularOrbit};
    use crate::time::Epoch;

    pub(crate) const DAY_S: f64 = 86_400.0;

    fn orbit(parent: Body, radius_km: f64, period_days: f64, inclination_deg: f64) -> CircularOrbit {
        CircularOrbit {
            parent,
            radius_km,
            period_s: period_days * DAY_S,
            inclination_rad: inclination_deg.to_radians(),
        }
    }

    pub(crate) fn solar_system(start: Epoch, end: Epoch) -> CircularEphemeris {
        let mut ephem = CircularEphemeris::earth_moon();
        ephem.start = start;
        ephem.end = end;
        let orbits = &mut ephem.orbits;
        orbits.insert(Body::MERCURY, orbit(Body::SUN, 5.79e7, 88.0, 7.0));
        orbits.insert(Body::VENUS, orbit(Body::SUN, 1.082e8, 224.7, 3.4));
        orbits.insert(Body::MARS, orbit(Body::SUN, 2.279e8, 687.0, 1.85));
        orbits.insert(Body::JUPITER_BARYCENTER, orbit(Body::SUN, 7.785e8, 4332.6, 1.3));
        orbits.insert(Body::JUPITER, orbit(Body::JUPITER_BARYCENTER, 0.0, 1.0, 0.0));
        orbits.insert(Body::SATURN_BARYCENTER, orbit(Body::SUN, 1.434e9, 10759.0, 2.5));
        orbits.insert(Body::URANUS_BARYCENTER, orbit(Body::SUN, 2.871e9, 30687.0, 0.8));
        orbits.insert(Body::NEPTUNE_BARYCENTER, orbit(Body::SUN, 4.495e9, 60190.0, 1.8));
        orbits.insert(Body::PLUTO_BARYCENTER, orbit(Body::SUN, 5.906e9, 90560.0, 17.2));
        orbits.insert(Body::EUROPA, orbit(Body::JUPITER, 671_100.0, 3.55, 0.5));
        orbits.insert(Body::GANYMEDE, orbit(Body::JUPITER, 1_070_400.0, 7.15, 0.2));
        orbits.insert(Body::CALLISTO, orbit(Body::JUPITER, 1_882_700.0, 16.69, 0.3));
        orbits.insert(Body::GENESIS, orbit(Body::EARTH, 1.5e6, 180.0, 20.0));
        orbits.insert(Body::JWST, orbit(Body::EARTH, 1.5e6, 180.0, 25.0));
        orbits.insert(Body::LUCY, orbit(Body::SUN, 3.0e8, 700.0, 5.0));
        orbits.insert(Body::VOYAGER_1, orbit(Body::SUN, 2.0e9, 9000.0, 35.0));
        orbits.insert(Body::VOYAGER_2, orbit(Body::SUN, 1.8e9, 8000.0, -30.0));
        orbits.insert(Body::JUICE, orbit(Body::GANYMEDE, 5_000.0, 0.5, 80.0));
        ephem
    }
}
