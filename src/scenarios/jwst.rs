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

use super::{
    daily_points, lunar_cycle, sun_earth_libration_km, trajectory_line, window, Scenario,
};
use crate::cosmic::{Body, PlotFrame, EARTH_RADIUS_KM, MOON_RADIUS_KM};
use crate::ephem::Ephemeris;
use crate::io::{
    calendar_utc, duration_from_str, duration_to_str, maybe_epoch_from_str, maybe_epoch_to_str,
    ConfigRepr, KernelSet,
};
use crate::linalg::Vector3;
use crate::md::trajectory::{Cadence, SamplingPlan, Trajectory};
use crate::plot::{Axis, Color, Hover, Markers, Polyline, Scene, Sphere};
use crate::time::{Duration, Epoch, Unit};
use crate::PlotError;
use serde_derive::{Deserialize, Serialize};

/// The James Webb Space Telescope about the Sun-Earth L2 point, as flown.
pub struct Jwst;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JwstConfig {
    pub kernels: KernelSet,
    pub spacecraft: Body,
    #[serde(
        default,
        serialize_with = "maybe_epoch_to_str",
        deserialize_with = "maybe_epoch_from_str"
    )]
    pub start: Option<Epoch>,
    #[serde(
        default,
        serialize_with = "maybe_epoch_to_str",
        deserialize_with = "maybe_epoch_from_str"
    )]
    pub end: Option<Epoch>,
    /// Defaults to about one sample per day, including the end of the window.
    #[serde(default)]
    pub cadence: Option<Cadence>,
    #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
    pub moon_cycle: Duration,
    pub moon_points: usize,
}

impl ConfigRepr for JwstConfig {}

impl Scenario for Jwst {
    const HTML_FILE: &'static str = "jwst_plot.html";

    type Config = JwstConfig;

    fn default_config() -> JwstConfig {
        JwstConfig {
            kernels: KernelSet::new(&["de440s.bsp", "jwst_rec.bsp"]),
            spacecraft: Body::JWST,
            start: None,
            end: None,
            cadence: None,
            moon_cycle: 31.0 * Unit::Day,
            moon_points: 400,
        }
    }

    fn kernels(cfg: &JwstConfig) -> &KernelSet {
        &cfg.kernels
    }

    fn build(cfg: &JwstConfig, ephem: &dyn Ephemeris) -> Result<Scene, PlotError> {
        let (start, end) = window(ephem, cfg.spacecraft, cfg.start, cfg.end)?;
        let plan = SamplingPlan {
            start,
            end,
            cadence: cfg.cadence.unwrap_or_else(|| daily_points(start, end)),
        };
        let frame = PlotFrame::gse();

        let jwst = Trajectory::sample(ephem, cfg.spacecraft, &frame, &plan)?
            .with_name("James Webb Space Telescope (GSE)");

        let mid = plan.mid();
        let moon = frame.express(ephem, Body::MOON, mid)?;
        let moon_orbit = lunar_cycle(ephem, &frame, mid, cfg.moon_cycle, cfg.moon_points)?;

        // The Earth-Sun distance changes over the mission, so L2 is estimated at every sample.
        let l2_range = jwst
            .epochs()
            .into_iter()
            .map(|epoch| Ok(Vector3::new(sun_earth_libration_km(ephem, epoch)?, 0.0, 0.0)))
            .collect::<Result<Vec<_>, PlotError>>()?;
        let l2_mean = l2_range.iter().sum::<Vector3<f64>>() / l2_range.len().max(1) as f64;

        let mut scene = Scene::new(format!(
            "James Webb Space Telescope (as flown through {})",
            calendar_utc(&end)
        ))
        .with_axes(
            Axis::new("x (km) [GSE rotating-frame, -X points toward Sun]"),
            Axis::new("y (km)"),
            Axis::new("z (km)"),
        );

        let mut line = trajectory_line(&jwst, Color::ORANGE, 4.0);
        line.hover = Some(Hover::new(&jwst, "Speed (in rotating frame, km/s)"));
        scene.push(line);
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
        scene.push(
            Polyline::builder()
                .name("L2 (estimated range)")
                .points(l2_range)
                .color(Color::RED)
                .width(1.0)
                .build(),
        );
        scene.push(Markers::single("L2 (mean)", l2_mean, Color::RED));
        scene.push(trajectory_line(&moon_orbit, Color::GRAY, 2.0));

        Ok(scene)
    }
}

#[cfg(test)]
mod ut_jwst {
    use super::*;
    use crate::plot::Trace;
    use crate::scenarios::test_scenario::solar_system;
    use approx::assert_relative_eq;

    #[test]
    fn scene() {
        let start = Epoch::from_gregorian_utc_at_midnight(2022, 1, 24);
        let end = start + 90.0 * Unit::Day;
        let ephem = solar_system(start, end);
        let scene = Jwst::build(&Jwst::default_config(), &ephem).unwrap();

        assert_eq!(
            scene.title,
            format!(
                "James Webb Space Telescope (as flown through {})",
                calendar_utc(&end)
            )
        );
        assert_eq!(scene.traces.len(), 6);
        let line = match &scene.traces[0] {
            Trace::Polyline(line) => line,
            other => panic!("expected the JWST line, got {other:?}"),
        };
        assert_eq!(line.points.len(), 90);
        let hover = line.hover.as_ref().unwrap();
        assert_eq!(hover.epochs.len(), 90);
        // Flown through the end of the coverage
        assert_eq!(hover.epochs.last(), Some(&end));
        assert_eq!(hover.speeds_km_s.len(), 90);
        assert!(hover.speeds_km_s.iter().all(|s| s.is_finite()));

        let range = scene.traces[3].points();
        assert_eq!(range.len(), 90);
        assert!(range.iter().all(|p| p.x > 1.4e6 && p.x < 1.6e6 && p.y == 0.0));
        let mean = scene.traces[4].points()[0];
        assert_relative_eq!(
            mean.x,
            range.iter().map(|p| p.x).sum::<f64>() / 90.0,
            max_relative = 1e-12
        );
    }
}
