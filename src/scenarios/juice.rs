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
use crate::cosmic::{Body, PlotFrame, GANYMEDE_RADIUS_KM, JUPITER_RADIUS_KM};
use crate::ephem::Ephemeris;
use crate::io::{maybe_epoch_from_str, maybe_epoch_to_str, ConfigRepr, KernelSet};
use crate::linalg::Vector3;
use crate::md::trajectory::{Cadence, SamplingPlan, Trajectory};
use crate::plot::{Axis, Color, Markers, Scene, Sphere};
use crate::time::{Epoch, Unit};
use crate::PlotError;
use serde_derive::{Deserialize, Serialize};

/// The JUICE interplanetary cruise, relative to the Sun.
pub struct JuiceCruise;
/// The JUICE Jupiter tour, relative to Jupiter.
pub struct JuiceJupiter;
/// The JUICE Ganymede orbit phase, relative to Ganymede.
pub struct JuiceGanymede;

/// A time window of the mission. Unspecified bounds use the coverage of the spacecraft.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phase {
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
}

impl Phase {
    fn plan(&self, ephem: &dyn Ephemeris, spacecraft: Body) -> Result<SamplingPlan, PlotError> {
        let (start, end) = window(ephem, spacecraft, self.start, self.end)?;
        Ok(SamplingPlan {
            start,
            end,
            cadence: self.cadence,
        })
    }
}

/// The three JUICE plots share their configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JuiceConfig {
    pub kernels: KernelSet,
    pub spacecraft: Body,
    pub cruise: Phase,
    pub jupiter: Phase,
    pub ganymede: Phase,
}

impl ConfigRepr for JuiceConfig {}

impl Default for JuiceConfig {
    fn default() -> Self {
        let jupiter_orbit_insertion = Epoch::from_gregorian_utc_at_midnight(2031, 7, 1);
        let ganymede_orbit_insertion = Epoch::from_gregorian_utc_at_midnight(2034, 10, 28);
        Self {
            kernels: KernelSet::new(&[
                "de432s.bsp",
                "jup365_19900101_20500101.bsp",
                "juice_crema_5_1_150lb_23_1_a3_2_v01.bsp",
            ]),
            spacecraft: Body::JUICE,
            cruise: Phase {
                start: None,
                end: Some(Epoch::from_gregorian_utc_at_midnight(2031, 8, 1)),
                cadence: Cadence::Step(1.0 * Unit::Day),
            },
            // Eight samples per day
            jupiter: Phase {
                start: Some(jupiter_orbit_insertion),
                end: Some(ganymede_orbit_insertion),
                cadence: Cadence::Step(3.0 * Unit::Hour),
            },
            // 256 samples per day
            ganymede: Phase {
                start: Some(ganymede_orbit_insertion),
                end: None,
                cadence: Cadence::Step(337.5 * Unit::Second),
            },
        }
    }
}

fn probe(
    ephem: &dyn Ephemeris,
    cfg: &JuiceConfig,
    frame: &PlotFrame,
    plan: &SamplingPlan,
) -> Result<Trajectory, PlotError> {
    Ok(Trajectory::sample(ephem, cfg.spacecraft, frame, plan)?.with_name("JUICE probe"))
}

fn axes(x_title: &str) -> (Axis, Axis, Axis) {
    (Axis::new(x_title), Axis::new("y (km)"), Axis::new("z (km)"))
}

impl Scenario for JuiceCruise {
    const HTML_FILE: &'static str = "juice_cruise.html";

    type Config = JuiceConfig;

    fn default_config() -> JuiceConfig {
        JuiceConfig::default()
    }

    fn kernels(cfg: &JuiceConfig) -> &KernelSet {
        &cfg.kernels
    }

    fn build(cfg: &JuiceConfig, ephem: &dyn Ephemeris) -> Result<Scene, PlotError> {
        let plan = cfg.cruise.plan(ephem, cfg.spacecraft)?;
        let frame = PlotFrame::Inertial { center: Body::SUN };

        let (x, y, z) = axes("x (km) [Distance from Sun]");
        let mut scene = Scene::new("JUICE probe")
            .with_axes(x, y, z)
            .with_camera_eye(Vector3::new(3.0, 3.0, 3.0));

        scene.push(trajectory_line(
            &probe(ephem, cfg, &frame, &plan)?,
            Color::MAGENTA,
            1.0,
        ));
        for (name, body, color) in [
            ("Venus", Body::VENUS, Color::GOLD),
            ("Earth", Body::EARTH, Color::BLUE),
            ("Jupiter", Body::JUPITER, Color::ORANGE),
        ] {
            let planet = Trajectory::sample(ephem, body, &frame, &plan)?.with_name(name);
            scene.push(trajectory_line(&planet, color, 1.0));
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

impl Scenario for JuiceJupiter {
    const HTML_FILE: &'static str = "juice_jupiter.html";

    type Config = JuiceConfig;

    fn default_config() -> JuiceConfig {
        JuiceConfig::default()
    }

    fn kernels(cfg: &JuiceConfig) -> &KernelSet {
        &cfg.kernels
    }

    fn build(cfg: &JuiceConfig, ephem: &dyn Ephemeris) -> Result<Scene, PlotError> {
        let plan = cfg.jupiter.plan(ephem, cfg.spacecraft)?;
        let frame = PlotFrame::Inertial {
            center: Body::JUPITER,
        };

        let (x, y, z) = axes("x (km) [Distance to Jupiter]");
        let mut scene = Scene::new("JUICE probe (Position relative to Jupiter)").with_axes(x, y, z);

        scene.push(trajectory_line(
            &probe(ephem, cfg, &frame, &plan)?,
            Color::MAGENTA,
            1.0,
        ));
        for (name, body, color, width) in [
            ("Ganymede", Body::GANYMEDE, Color::BROWN, 1.0),
            ("Callisto", Body::CALLISTO, Color::GOLD, 2.0),
            ("Europa", Body::EUROPA, Color::BLUE, 1.0),
        ] {
            let moon = Trajectory::sample(ephem, body, &frame, &plan)?.with_name(name);
            scene.push(trajectory_line(&moon, color, width));
        }
        scene.push(Sphere::new(
            "Jupiter",
            Vector3::zeros(),
            JUPITER_RADIUS_KM,
            Color::ORANGE,
        ));

        Ok(scene)
    }
}

impl Scenario for JuiceGanymede {
    const HTML_FILE: &'static str = "juice_ganymede.html";

    type Config = JuiceConfig;

    fn default_config() -> JuiceConfig {
        JuiceConfig::default()
    }

    fn kernels(cfg: &JuiceConfig) -> &KernelSet {
        &cfg.kernels
    }

    fn build(cfg: &JuiceConfig, ephem: &dyn Ephemeris) -> Result<Scene, PlotError> {
        let plan = cfg.ganymede.plan(ephem, cfg.spacecraft)?;
        let frame = PlotFrame::Inertial {
            center: Body::GANYMEDE,
        };

        let (x, y, z) = axes("x (km) [Distance from Ganymede]");
        let mut scene = Scene::new("JUICE probe (Position relative to Ganymede)").with_axes(x, y, z);

        scene.push(trajectory_line(
            &probe(ephem, cfg, &frame, &plan)?,
            Color::MAGENTA,
            1.0,
        ));
        scene.push(Sphere::new(
            "Ganymede",
            Vector3::zeros(),
            GANYMEDE_RADIUS_KM,
            Color::GRAY,
        ));

        Ok(scene)
    }
}
