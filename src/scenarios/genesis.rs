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

use super::{lunar_cycle, sun_earth_libration_km, trajectory_line, window, Scenario};
use crate::cosmic::{Body, PlotFrame, EARTH_RADIUS_KM, MOON_RADIUS_KM};
use crate::ephem::Ephemeris;
use crate::io::{
    duration_from_str, duration_to_str, epoch_from_str, epoch_to_str, maybe_epoch_from_str,
    maybe_epoch_to_str, ConfigRepr, KernelSet,
};
use crate::linalg::Vector3;
use crate::md::trajectory::{Cadence, SamplingPlan, Trajectory};
use crate::plot::{Axis, Color, Markers, Scene, Sphere};
use crate::time::{Duration, Epoch, Unit};
use crate::PlotError;
use serde_derive::{Deserialize, Serialize};

/// The Genesis halo orbit about the Sun-Earth L1 point, and the post-mission trajectory of the bus, in the
/// geocentric solar rotating frame.
pub struct GenesisHalo;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub kernels: KernelSet,
    pub spacecraft: Body,
    /// Defaults to the start of the spacecraft's coverage.
    #[serde(
        default,
        serialize_with = "maybe_epoch_to_str",
        deserialize_with = "maybe_epoch_from_str"
    )]
    pub start: Option<Epoch>,
    /// The coverage extends past the mission, but the trajectory is no longer relevant after spring 2005.
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub end: Epoch,
    /// Derived from the number of halo cycles if not specified.
    #[serde(default)]
    pub cadence: Option<Cadence>,
    #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
    pub moon_cycle: Duration,
    pub moon_points: usize,
}

impl ConfigRepr for GenesisConfig {}

/// About five halo cycles were flown in 29.3 months.
const HALO_CYCLES: f64 = 5.0;
const HALO_MONTHS: f64 = 29.3;
const DAYS_PER_MONTH: f64 = 30.436875;
/// Samples per halo cycle, oversampled for the Earth flyby.
const POINTS_PER_CYCLE: f64 = 400.0 * 64.0;

/// Number of samples for a smooth halo orbit over this window.
pub(crate) fn halo_cadence(start: Epoch, end: Epoch) -> Cadence {
    let cycles = (end - start).to_unit(Unit::Day) * HALO_CYCLES / (HALO_MONTHS * DAYS_PER_MONTH);
    let points = (cycles * POINTS_PER_CYCLE).ceil().max(2.0) as usize;
    info!("Estimated {cycles:.2} halo cycles, {points} samples");
    Cadence::Points(points)
}

impl Scenario for GenesisHalo {
    const HTML_FILE: &'static str = "genesis_halo_plot.html";
    const PREVIEW_FILE: Option<&'static str> = Some("genesis_halo_preview.png");

    type Config = GenesisConfig;

    fn default_config() -> GenesisConfig {
        GenesisConfig {
            kernels: KernelSet::new(&["de405s.bsp", "gns_010811_041125_101231.bsp"]),
            spacecraft: Body::GENESIS,
            start: None,
            end: Epoch::from_gregorian_utc_at_midnight(2005, 5, 1),
            cadence: None,
            moon_cycle: 31.0 * Unit::Day,
            moon_points: 400,
        }
    }

    fn kernels(cfg: &GenesisConfig) -> &KernelSet {
        &cfg.kernels
    }

    fn build(cfg: &GenesisConfig, ephem: &dyn Ephemeris) -> Result<Scene, PlotError> {
        let (start, end) = window(ephem, cfg.spacecraft, cfg.start, Some(cfg.end))?;
        let plan = SamplingPlan {
            start,
            end,
            cadence: cfg.cadence.unwrap_or_else(|| halo_cadence(start, end)),
        };
        let frame = PlotFrame::gse();

        let genesis = Trajectory::sample(ephem, cfg.spacecraft, &frame, &plan)?
            .with_name("Genesis probe (GSE)");

        let mid = plan.mid();
        let moon = frame.express(ephem, Body::MOON, mid)?;
        let moon_orbit = lunar_cycle(ephem, &frame, mid, cfg.moon_cycle, cfg.moon_points)?;
        let d_l = sun_earth_libration_km(ephem, mid)?;

        let mut scene = Scene::new("Genesis probe (including post-mission trajectory)").with_axes(
            Axis::new("x (km) [GSE rotating-frame, -X points toward Sun]").reversed(),
            Axis::new("y (km)").reversed(),
            Axis::new("z (km)"),
        );

        scene.push(trajectory_line(&genesis, Color::ORANGE, 4.0));
        scene.push(Sphere::new(
            "Moon",
            moon.position_km,
            MOON_RADIUS_KM,
            Color::GRAY,
        ));
        scene.push(Sphere::new(
            "Earth",
            Vector3::zeros(),
            EARTH_RADIUS_KM,
            Color::BLUE,
        ));
        scene.push(Markers::single(
            "L1 (approx)",
            Vector3::new(-d_l, 0.0, 0.0),
            Color::GREEN,
        ));
        scene.push(Markers::single(
            "L2 (approx)",
            Vector3::new(d_l, 0.0, 0.0),
            Color::RED,
        ));
        scene.push(trajectory_line(&moon_orbit, Color::GRAY, 2.0));

        Ok(scene)
    }
}

#[cfg(test)]
mod ut_genesis {
    use super::*;
    use crate::cosmic::lagrange::{collinear_distance_km, mass_ratio};
    use crate::cosmic::{EARTH_GM, SUN_GM};
    use crate::plot::Trace;
    use crate::scenarios::test_scenario::solar_system;
    use approx::assert_relative_eq;

    #[test]
    fn derived_cadence() {
        let start = Epoch::from_gregorian_utc_at_midnight(2001, 8, 11);
        let end = start + HALO_MONTHS * DAYS_PER_MONTH * Unit::Day;
        match halo_cadence(start, end) {
            Cadence::Points(n) => assert!((127_999..=128_001).contains(&n), "got {n}"),
            other => panic!("expected points, got {other}"),
        }
        match halo_cadence(start, start + 1.0 * Unit::Second) {
            Cadence::Points(n) => assert_eq!(n, 2),
            other => panic!("expected points, got {other}"),
        }
    }

    #[test]
    fn scene() {
        let start = Epoch::from_gregorian_utc_at_midnight(2005, 1, 1);
        let ephem = solar_system(start, start + 200.0 * Unit::Day);
        let mut cfg = GenesisHalo::default_config();
        cfg.end = start + 120.0 * Unit::Day;
        cfg.cadence = Some(Cadence::Step(1.0 * Unit::Day));

        let scene = GenesisHalo::build(&cfg, &ephem).unwrap();
        let names: Vec<&str> = scene.traces.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "Genesis probe (GSE)",
                "Moon",
                "Earth",
                "L1 (approx)",
                "L2 (approx)",
                "Moon orbit (1 cycle)"
            ]
        );
        assert_eq!(scene.traces[0].points().len(), 121);
        assert_eq!(scene.traces[5].points().len(), 400);

        let (l1, l2) = match (&scene.traces[3], &scene.traces[4]) {
            (Trace::Markers(l1), Trace::Markers(l2)) => (l1.points[0], l2.points[0]),
            other => panic!("expected the L1 and L2 markers, got {other:?}"),
        };
        assert!(l1.x < 0.0 && l2.x > 0.0);
        assert_relative_eq!(l1.x, -l2.x);
        let sun_earth = ephem
            .state(Body::SUN, Body::EARTH, start + 60.0 * Unit::Day)
            .unwrap()
            .rmag_km();
        assert_relative_eq!(
            l2.x,
            collinear_distance_km(sun_earth, mass_ratio(SUN_GM, EARTH_GM)),
            max_relative = 1e-9
        );

        let [x, y, _] = scene.axis_ranges().unwrap();
        assert!(x.lower > x.upper && y.lower > y.upper);
        // The L1 and L2 markers are around 1.5 million km from the Earth
        assert!(x.span() > 3.0e6);
    }

    #[test]
    fn end_past_coverage() {
        let start = Epoch::from_gregorian_utc_at_midnight(2005, 1, 1);
        let ephem = solar_system(start, start + 10.0 * Unit::Day);
        let mut cfg = GenesisHalo::default_config();
        cfg.end = start + 20.0 * Unit::Day;
        cfg.cadence = Some(Cadence::Step(1.0 * Unit::Day));
        assert!(matches!(
            GenesisHalo::build(&cfg, &ephem),
            Err(PlotError::Ephemeris { .. })
        ));
    }
}
