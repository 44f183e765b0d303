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

use super::{trajectory_line, window, Scenario};
use crate::cosmic::{Body, PlotFrame};
use crate::ephem::Ephemeris;
use crate::io::{maybe_epoch_from_str, maybe_epoch_to_str, ConfigRepr, KernelSet};
use crate::linalg::Vector3;
use crate::md::trajectory::{Cadence, SamplingPlan, Trajectory};
use crate::plot::{Axis, Color, Hover, Markers, Scene};
use crate::time::{Epoch, Unit};
use crate::PlotError;
use serde_derive::{Deserialize, Serialize};

/// Both Voyagers and the planets, with the axes of the Sun to Saturn line at Voyager 1's closest approach.
pub struct Vger;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VgerConfig {
    pub kernels: KernelSet,
    pub frame: PlotFrame,
    /// Defaults to the coverage of Voyager 1.
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
    pub cadence: Cadence,
    /// Samples further than this along +Y are not plotted, in km.
    pub max_y_km: f64,
}

impl ConfigRepr for VgerConfig {}

/// Planet traces, drawn after the Voyagers.
const PLANETS: [(&str, Body, Color); 9] = [
    ("Venus", Body::VENUS, Color::GOLD),
    ("Earth", Body::EARTH, Color::BLUE),
    ("Jupiter", Body::JUPITER_BARYCENTER, Color::ORANGE),
    ("Saturn", Body::SATURN_BARYCENTER, Color::BROWN),
    ("Mercury", Body::MERCURY, Color::GRAY),
    ("Mars", Body::MARS, Color::RED),
    ("Uranus", Body::URANUS_BARYCENTER, Color::TEAL),
    ("Neptune", Body::NEPTUNE_BARYCENTER, Color::ROYAL_BLUE),
    ("Pluto", Body::PLUTO_BARYCENTER, Color::PURPLE),
];

impl Scenario for Vger {
    const HTML_FILE: &'static str = "vger.html";

    type Config = VgerConfig;

    fn default_config() -> VgerConfig {
        VgerConfig {
            kernels: KernelSet::new(&[
                "voyager_2.ST+1992_m05208u.merged.bsp",
                "voyager_1.ST+1991_a54418u.merged.bsp",
            ]),
            frame: PlotFrame::Frozen {
                primary: Body::SUN,
                secondary: Body::SATURN_BARYCENTER,
                center: Body::SUN,
                epoch: Epoch::from_gregorian_utc_hms(1980, 11, 12, 23, 46, 0),
            },
            start: None,
            end: None,
            cadence: Cadence::Step(1.0 * Unit::Day),
            max_y_km: 6.0e9,
        }
    }

    fn kernels(cfg: &VgerConfig) -> &KernelSet {
        &cfg.kernels
    }

    fn build(cfg: &VgerConfig, ephem: &dyn Ephemeris) -> Result<Scene, PlotError> {
        let (start, end) = window(ephem, Body::VOYAGER_1, cfg.start, cfg.end)?;
        let plan = SamplingPlan {
            start,
            end,
            cadence: cfg.cadence,
        };
        let sample = |body: Body, name: &str| -> Result<Trajectory, PlotError> {
            Ok(Trajectory::sample(ephem, body, &cfg.frame, &plan)?
                .with_name(name)
                .filtered(|s| s.position_km.y <= cfg.max_y_km))
        };

        let mut scene = Scene::new("Voyagers (Saturn on X axis at Voyager 1's closest approach)")
            .with_axes(
                Axis::new("x (km) [Distance from Sun]").reversed(),
                Axis::new("y (km)").reversed(),
                Axis::new("z (km)"),
            );

        for (body, name, color) in [
            (Body::VOYAGER_1, "Voyager 1", Color::MAGENTA),
            (Body::VOYAGER_2, "Voyager 2", Color::CYAN),
        ] {
            let voyager = sample(body, name)?;
            let mut line = trajectory_line(&voyager, color, 1.0);
            line.hover = Some(Hover::new(&voyager, "Speed (km/s)").with_si_coordinates());
            scene.push(line);
        }
        for (name, body, color) in PLANETS {
            scene.push(trajectory_line(&sample(body, name)?, color, 1.0));
        }
        scene.push(
            Markers::builder()
                .name("Sun")
                .points(vec![Vector3::zeros()])
                .labels(vec!["Sun".to_string()])
                .color(Color::YELLOW)
                .build(),
        );

        Ok(scene)
    }
}

#[cfg(test)]
mod ut_vger {
    use super::*;
    use crate::plot::Trace;
    use crate::scenarios::test_scenario::solar_system;

    #[test]
    fn scene() {
        let start = Epoch::from_gregorian_utc_at_midnight(1980, 1, 1);
        let ephem = solar_system(start, start + 800.0 * Unit::Day);
        let mut cfg = Vger::default_config();
        cfg.end = Some(start + 400.0 * Unit::Day);

        let scene = Vger::build(&cfg, &ephem).unwrap();
        let names: Vec<&str> = scene.traces.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "Voyager 1", "Voyager 2", "Venus", "Earth", "Jupiter", "Saturn", "Mercury", "Mars",
                "Uranus", "Neptune", "Pluto", "Sun"
            ]
        );
        match &scene.traces[0] {
            Trace::Polyline(line) => {
                assert_eq!(line.points.len(), 401);
                assert_eq!(line.width, 1.0);
                let hover = line.hover.as_ref().unwrap();
                assert_eq!(hover.speed_title, "Speed (km/s)");
                assert_eq!(hover.epochs.len(), 401);
            }
            other => panic!("expected the Voyager 1 line, got {other:?}"),
        }
        let [x, y, _] = scene.axis_ranges().unwrap();
        assert!(x.lower > x.upper && y.lower > y.upper);
    }

    #[test]
    fn far_samples_are_dropped() {
        let start = Epoch::from_gregorian_utc_at_midnight(1980, 1, 1);
        let ephem = solar_system(start, start + 800.0 * Unit::Day);
        let mut cfg = Vger::default_config();
        cfg.end = Some(start + 400.0 * Unit::Day);
        cfg.max_y_km = 0.0;

        let scene = Vger::build(&cfg, &ephem).unwrap();
        // Every kept point satisfies the limit, and the hover data matches the kept points
        for trace in &scene.traces {
            if let Trace::Polyline(line) = trace {
                assert!(line.points.iter().all(|p| p.y <= 0.0), "{}", line.name);
                if let Some(hover) = &line.hover {
                    assert_eq!(hover.epochs.len(), line.points.len());
                }
            }
        }
        // Mercury goes around several times, so about half of its samples are kept
        let mercury = scene
            .traces
            .iter()
            .find(|t| t.name() == "Mercury")
            .unwrap()
            .points();
        assert!(!mercury.is_empty() && mercury.len() < 401);
    }
}
