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

use super::{daily_points, trajectory_line, window, Scenario};
use crate::cosmic::lagrange::triangular_points;
use crate::cosmic::{Body, PlotFrame};
use crate::ephem::Ephemeris;
use crate::io::{epoch_from_str, epoch_to_str, maybe_epoch_from_str, maybe_epoch_to_str};
use crate::io::{ConfigRepr, KernelSet};
use crate::linalg::Vector3;
use crate::md::trajectory::{Cadence, SamplingPlan, Trajectory};
use crate::plot::{Axis, Color, Dash, Hover, Markers, Polyline, Scene};
use crate::time::Epoch;
use crate::PlotError;
use serde_derive::{Deserialize, Serialize};

/// The Lucy tour of the Jupiter Trojans, in the heliocentric Jupiter barycenter rotating frame.
pub struct Lucy;

/// A Trojan asteroid whose orbit is drawn over the mission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrojanTarget {
    pub name: String,
    pub body: Body,
    pub color: Color,
}

/// A flyby, marked at the position of the encountered body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub body: Body,
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub epoch: Epoch,
    pub label: String,
}

impl Encounter {
    fn on(body: i32, year: i32, month: u8, day: u8, label: &str) -> Self {
        Self {
            body: Body(body),
            epoch: Epoch::from_gregorian_utc_at_midnight(year, month, day),
            label: label.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LucyConfig {
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
    #[serde(default)]
    pub targets: Vec<TrojanTarget>,
    #[serde(default)]
    pub encounters: Vec<Encounter>,
}

impl ConfigRepr for LucyConfig {}

fn target(name: &str, id: i32, color: Color) -> TrojanTarget {
    TrojanTarget {
        name: name.to_string(),
        body: Body(id),
        color,
    }
}

fn mean(points: &[Vector3<f64>]) -> Vector3<f64> {
    points.iter().fold(Vector3::zeros(), |acc, p| acc + p) / points.len().max(1) as f64
}

impl Scenario for Lucy {
    const HTML_FILE: &'static str = "lucy_plot.html";

    type Config = LucyConfig;

    fn default_config() -> LucyConfig {
        LucyConfig {
            kernels: KernelSet::new(&["de440s.bsp", "lcy_211016_330402_240718_v1.bsp"]),
            spacecraft: Body::LUCY,
            start: None,
            end: None,
            cadence: None,
            targets: vec![
                target("PATROCLUS BARYCENTER", 20_000_617, Color::PURPLE),
                target("DONALDJOHANSON", 20_052_246, Color::TEAL),
                target("LEUCUS", 20_011_351, Color::BROWN),
                target("20152830", 20_152_830, Color::CRIMSON),
                target("POLYMELE", 20_015_094, Color::GOLD),
                target("EURYBATES", 920_003_548, Color::CYAN),
                target("ORUS", 20_021_900, Color::LIME),
            ],
            encounters: vec![
                Encounter::on(399, 2022, 10, 16, "Earth 2022-10-16"),
                Encounter::on(20_152_830, 2023, 11, 1, "152830 Dinkinesh 2023-11-01"),
                Encounter::on(399, 2024, 12, 13, "Earth 2024-12-13"),
                Encounter::on(20_052_246, 2025, 4, 20, "52246 Donaldjohanson 2025-04-20"),
                Encounter::on(920_003_548, 2027, 8, 12, "Eurybates 2027-08-12"),
                Encounter::on(20_015_094, 2027, 9, 15, "Polymele 2027-09-15"),
                Encounter::on(20_011_351, 2028, 4, 18, "Leucus 2028-04-18"),
                Encounter::on(20_021_900, 2028, 11, 11, "Orus 2028-11-11"),
                Encounter::on(399, 2030, 12, 26, "Earth 2030-12-26"),
                Encounter::on(20_000_617, 2033, 3, 2, "Patroclus–Menoetius 2033-03-02"),
            ],
        }
    }

    fn kernels(cfg: &LucyConfig) -> &KernelSet {
        &cfg.kernels
    }

    fn build(cfg: &LucyConfig, ephem: &dyn Ephemeris) -> Result<Scene, PlotError> {
        let (start, end) = window(ephem, cfg.spacecraft, cfg.start, cfg.end)?;
        let plan = SamplingPlan {
            start,
            end,
            cadence: cfg.cadence.unwrap_or_else(|| daily_points(start, end)),
        };
        let frame = PlotFrame::hjb();

        let lucy = Trajectory::sample(ephem, cfg.spacecraft, &frame, &plan)?
            .with_name("Lucy probe (HJB)");
        let earth =
            Trajectory::sample(ephem, Body::EARTH, &frame, &plan)?.with_name("Earth orbit");
        let jupiter = Trajectory::sample(ephem, Body::JUPITER_BARYCENTER, &frame, &plan)?
            .with_name("Jupiter system barycenter");

        let (l4, l5): (Vec<_>, Vec<_>) = jupiter
            .positions()
            .iter()
            .map(triangular_points)
            .unzip();

        let mut scene = Scene::new("Lucy spacecraft trajectory (Jupiter rotating frame)").with_axes(
            Axis::new("x (km) [Distance from Sun]"),
            Axis::new("y (km)"),
            Axis::new("z (km)"),
        );

        scene.push(
            Markers::builder()
                .name("Sun")
                .points(vec![Vector3::zeros()])
                .labels(vec!["Sun".to_string()])
                .color(Color::YELLOW)
                .build(),
        );
        let mut line = trajectory_line(&lucy, Color::MAGENTA, 4.0);
        line.hover = Some(Hover::new(&lucy, "Speed (in rotating frame, km/s)").with_si_coordinates());
        scene.push(line);
        scene.push(trajectory_line(&earth, Color::GRAY, 2.0));
        let mut jupiter_line = trajectory_line(&jupiter, Color::ORANGE, 2.0);
        jupiter_line.dash = Dash::Dash;
        scene.push(jupiter_line);

        scene.push(
            Markers::builder()
                .name("Jupiter system barycenter, mean")
                .points(vec![jupiter.mean_position()?])
                .labels(vec!["Jupiter system barycenter".to_string()])
                .color(Color::ORANGE)
                .build(),
        );
        scene.push(Markers::single("L4", mean(&l4), Color::GREEN));
        scene.push(Markers::single("L5", mean(&l5), Color::BLUE));
        for (name, track, color) in [
            ("L4 (estimated)", l4, Color::GREEN),
            ("L5 (estimated)", l5, Color::BLUE),
        ] {
            scene.push(
                Polyline::builder()
                    .name(name)
                    .points(track)
                    .color(color)
                    .dash(Dash::Dash)
                    .build(),
            );
        }

        for target in &cfg.targets {
            let orbit = Trajectory::sample(ephem, target.body, &frame, &plan)?
                .with_name(format!("{} orbit", target.name));
            scene.push(trajectory_line(&orbit, target.color, 2.0));
        }

        for encounter in &cfg.encounters {
            let state = frame.express(ephem, encounter.body, encounter.epoch)?;
            let color = cfg
                .targets
                .iter()
                .find(|target| target.body == encounter.body)
                .map_or(Color::BLACK, |target| target.color);
            debug!("{} at {}", encounter.label, state.position_km.transpose());
            scene.push(
                Markers::builder()
                    .name(encounter.label.clone())
                    .points(vec![state.position_km])
                    .labels(vec![encounter.label.clone()])
                    .color(color)
                    .build(),
            );
        }

        Ok(scene)
    }
}

#[cfg(test)]
mod ut_lucy {
    use super::*;
    use crate::ephem::test_ephem::CircularOrbit;
    use crate::plot::Trace;
    use crate::scenarios::test_scenario::{solar_system, DAY_S};
    use crate::time::Unit;
    use approx::assert_relative_eq;

    #[test]
    fn scene() {
        let mission_start = Epoch::from_gregorian_utc_at_midnight(2021, 10, 16);
        let mut ephem = solar_system(mission_start, mission_start + 4500.0 * Unit::Day);
        let mut cfg = Lucy::default_config();
        for target in &cfg.targets {
            ephem.orbits.insert(
                target.body,
                CircularOrbit {
                    parent: Body::SUN,
                    radius_km: 7.8e8,
                    period_s: 4300.0 * DAY_S,
                    inclination_rad: 0.3,
                },
            );
        }
        cfg.end = Some(mission_start + 60.0 * Unit::Day);

        let scene = Lucy::build(&cfg, &ephem).unwrap();
        // Sun, Lucy, Earth, Jupiter, its mean, L4, L5, their tracks, targets and encounters
        assert_eq!(scene.traces.len(), 9 + 7 + 10);
        let names: Vec<&str> = scene.traces.iter().map(|t| t.name()).collect();
        assert_eq!(&names[..4], &["Sun", "Lucy probe (HJB)", "Earth orbit", "Jupiter system barycenter"]);
        assert_eq!(names[9], "PATROCLUS BARYCENTER orbit");
        assert_eq!(names[25], "Patroclus–Menoetius 2033-03-02");

        match &scene.traces[1] {
            Trace::Polyline(line) => {
                assert_eq!(line.points.len(), 60);
                assert_eq!(line.hover.as_ref().unwrap().coordinate_format, ".7s");
            }
            other => panic!("expected the Lucy line, got {other:?}"),
        }

        // Jupiter's barycenter stays on +X of its own rotating frame
        let jupiter = scene.traces[3].points();
        assert!(jupiter.iter().all(|p| p.x > 7.7e8 && p.y.abs() < 1.0));
        let l4 = scene.traces[5].points()[0];
        let l5 = scene.traces[6].points()[0];
        assert_relative_eq!(l4.x, l5.x, max_relative = 1e-9);
        assert!(l4.y > 0.0 && l5.y < 0.0);

        // Earth flybys are not targets, so they are black
        match (&scene.traces[16], &scene.traces[17]) {
            (Trace::Markers(earth), Trace::Markers(dinkinesh)) => {
                assert_eq!(earth.color, Some(Color::BLACK));
                assert_eq!(dinkinesh.color, Some(Color::CRIMSON));
                assert_eq!(dinkinesh.labels, vec!["152830 Dinkinesh 2023-11-01".to_string()]);
            }
            other => panic!("expected encounter markers, got {other:?}"),
        }
    }

    #[test]
    fn yaml_targets() {
        let cfg = LucyConfig::loads(
            "kernels:\n  files: [de440s.bsp]\nspacecraft: -49\ncadence:\n  step: 1 d\ntargets:\n  - name: EURYBATES\n    body: 920003548\n    color: cyan\nencounters:\n  - body: Earth\n    epoch: 2022-10-16T00:00:00 UTC\n    label: Earth flyby\n",
        )
        .unwrap();
        assert_eq!(cfg.spacecraft, Body::LUCY);
        assert_eq!(cfg.cadence, Some(Cadence::Step(1.0 * Unit::Day)));
        assert_eq!(cfg.targets[0].color, Color::CYAN);
        assert_eq!(cfg.encounters[0].body, Body::EARTH);
        assert_eq!(
            cfg.encounters[0].epoch,
            Epoch::from_gregorian_utc_at_midnight(2022, 10, 16)
        );

        // The default configuration survives a dump and reload
        let default = Lucy::default_config();
        assert_eq!(LucyConfig::loads(&default.dumps().unwrap()).unwrap(), default);
    }
}
