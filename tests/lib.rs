mod sampling;
mod scenarios;

use std::collections::HashMap;
use std::f64::consts::TAU;

use trajplot::ephem::EphemerisError;
use trajplot::linalg::Vector3;
use trajplot::time::{Epoch, Unit};
use trajplot::{Body, Ephemeris, StateVector};

/// Circular orbit of a body about its parent: radius (km), period (days), inclination (rad).
struct Circle(Body, f64, f64, f64);

/// An analytic ephemeris of the Earth-Moon system with a few spacecraft, valid for sixty days from 2025-01-01.
pub struct TestEphemeris {
    orbits: HashMap<Body, Circle>,
    pub start: Epoch,
    pub end: Epoch,
}

impl TestEphemeris {
    fn position_velocity(&self, body: Body, epoch: Epoch) -> (Vector3<f64>, Vector3<f64>) {
        match self.orbits.get(&body) {
            None => (Vector3::zeros(), Vector3::zeros()),
            Some(Circle(parent, radius_km, period_days, inc)) => {
                let (pr, pv) = self.position_velocity(*parent, epoch);
                let n = TAU / (period_days * 86_400.0);
                let (st, ct) = (n * (epoch - self.start).to_seconds()).sin_cos();
                let (si, ci) = inc.sin_cos();
                (
                    pr + *radius_km * Vector3::new(ct, st * ci, st * si),
                    pv + *radius_km * n * Vector3::new(-st, ct * ci, ct * si),
                )
            }
        }
    }
}

impl Ephemeris for TestEphemeris {
    fn state(
        &self,
        target: Body,
        observer: Body,
        epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        if epoch < self.start || epoch > self.end {
            return Err(EphemerisError::Unavailable {
                target,
                observer,
                epoch,
                details: "outside of the test ephemeris".to_string(),
            });
        }
        let (tr, tv) = self.position_velocity(target, epoch);
        let (or, ov) = self.position_velocity(observer, epoch);
        Ok(StateVector::new(epoch, tr - or, tv - ov))
    }

    fn coverage(&self, _body: Body) -> Result<(Epoch, Epoch), EphemerisError> {
        Ok((self.start, self.end))
    }
}

pub fn test_ephemeris() -> TestEphemeris {
    let start = Epoch::from_gregorian_utc_at_midnight(2025, 1, 1);
    let mut orbits = HashMap::new();
    orbits.insert(
        Body::EARTH_MOON_BARYCENTER,
        Circle(Body::SUN, 1.496e8, 365.25, 0.0),
    );
    orbits.insert(
        Body::MOON,
        Circle(Body::EARTH_MOON_BARYCENTER, 379_730.0, 27.32, 0.09),
    );
    orbits.insert(
        Body::EARTH,
        Circle(Body::EARTH_MOON_BARYCENTER, -4_670.0, 27.32, 0.09),
    );
    orbits.insert(Body::GATEWAY, Circle(Body::MOON, 10_000.0, 6.5, 1.5));
    orbits.insert(Body::JWST, Circle(Body::EARTH, 1.5e6, 180.0, 0.4));
    orbits.insert(Body::GENESIS, Circle(Body::EARTH, 1.4e6, 180.0, 0.3));
    TestEphemeris {
        orbits,
        start,
        end: start + 60.0 * Unit::Day,
    }
}
