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

use super::{trajectory_line, Scenario};
use crate::cosmic::lagrange::collinear_distance_km;
use crate::cosmic::{Body, PlotFrame, EARTH_MOON_MASS_RATIO, EARTH_RADIUS_KM, MOON_RADIUS_KM};
use crate::ephem::Ephemeris;
use crate::io::{
    duration_from_str, duration_to_str, maybe_epoch_from_str, maybe_epoch_to_str, ConfigRepr,
    KernelSet,
};
use crate::linalg::Vector3;
use crate::md::trajectory::{Cadence, SamplingPlan, Trajectory};
use crate::plot::{Axis, Color, Markers, Polyline, Scene, Sphere};
use crate::time::{Duration, Epoch, Unit};
use crate::PlotError;
use serde_derive::{Deserialize, Serialize};

/// One period of the Gateway's near rectilinear halo orbit, in the Moon-centered Earth-Moon rotating frame.
pub struct NrhoPlot;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NrhoConfig {
    pub kernels: KernelSet,
    pub spacecraft: Body,
    /// Defaults to the start of the spacecraft's coverage.
    #[serde(
        default,
        serialize_with = "maybe_epoch_to_str",
        deserialize_with = "maybe_epoch_from_str"
    )]
    pub start: Option<Epoch>,
    /// Period of the orbit.
    #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
    pub span: Duration,
    pub cadence: Cadence,
}

impl ConfigRepr for NrhoConfig {}

/// Length of the north arrow, in km.
const NORTH_ARROW_KM: f64 = 5_000.0;

impl Scenario for NrhoPlot {
    const HTML_FILE: &'static str = "nrho_plot.html";
    const PREVIEW_FILE: Option<&'static str> = Some("nrho_preview.png");

    type Config = NrhoConfig;

    fn default_config() -> NrhoConfig {
        NrhoConfig {
            kernels: KernelSet::new(&[
                "de432s.bsp",
                "receding_horiz_3189_1burnApo_DiffCorr_15yr.bsp",
            ]),
            spacecraft: Body::GATEWAY,
            start: None,
            span: 6.7 * Unit::Day,
            cadence: Cadence::Points(400),
        }
    }

    fn kernels(cfg: &NrhoConfig) -> &KernelSet {
        &cfg.kernels
    }

    fn build(cfg: &NrhoConfig, ephem: &dyn Ephemeris) -> Result<Scene, PlotError> {
        let start = match cfg.start {
            Some(start) => start,
            None => {
                let (start, end) = ephem.coverage(cfg.spacecraft)?;
                info!("Coverage of {}: {start} to {end}", cfg.spacecraft);
                start
            }
        };
        let plan = SamplingPlan {
            start,
            end: start + cfg.span,
            cadence: cfg.cadence,
        };
        let frame = PlotFrame::moon_centered_embr();

        let nrho = Trajectory::sample(ephem, cfg.spacecraft, &frame, &plan)?
            .with_name("NRHO (Moon-centric EMBR)");

        // Static references at mid epoch
        let mid = plan.mid();
        let earth = frame.express(ephem, Body::EARTH, mid)?;
        let moon_emb = ephem.state(Body::MOON, Body::EARTH_MOON_BARYCENTER, mid)?;
        debug!(
            "Z component of the Moon's angular momentum about the EMB at {mid}: {:.3} km^2/s",
            moon_emb.hvec().z
        );
        let l2 = Vector3::new(
            collinear_distance_km(moon_emb.rmag_km(), EARTH_MOON_MASS_RATIO),
            0.0,
            0.0,
        );

        let mut scene = Scene::new(
            "Lunar Gateway NRHO - Moon-centric, EMBR (Earth-Moon Barycentric Rotating frame of reference) axes (L2 marker approx)",
        )
        .with_axes(
            Axis::new("x (km) [Moon-centric EMBR]").reversed(),
            Axis::new("y (km)"),
            Axis::new("z (km)"),
        )
        .with_camera_eye(Vector3::new(0.0, 3.0, 0.5));

        scene.push(trajectory_line(&nrho, Color::GREEN, 4.0));
        scene.push(Sphere::new(
            "Moon",
            Vector3::zeros(),
            MOON_RADIUS_KM,
            Color::GRAY,
        ));
        scene.push(Sphere::new(
            "Earth",
            earth.position_km,
            EARTH_RADIUS_KM,
            Color::BLUE,
        ));
        scene.push(Markers::single("L2 (approx)", l2, Color::RED));
        scene.push(
            Polyline::builder()
                .name("North")
                .points(vec![Vector3::zeros(), Vector3::new(0.0, 0.0, NORTH_ARROW_KM)])
                .labels(vec![String::new(), "North (+Z)".to_string()])
                .width(6.0)
                .build(),
        );

        Ok(scene)
    }
}
