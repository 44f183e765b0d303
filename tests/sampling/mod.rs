use crate::test_ephemeris;
use approx::assert_relative_eq;
use trajplot::plot::Polyline;
use trajplot::time::Unit;
use trajplot::{Body, PlotError, PlotFrame, SamplingPlan, Scene, Trajectory};

#[test]
fn gateway_every_hour_for_a_week() {
    let ephem = test_ephemeris();
    let end = ephem.start + 7.0 * Unit::Day;
    let plan = SamplingPlan::every(ephem.start, end, 1.0 * Unit::Hour);

    let traj = Trajectory::sample(
        &ephem,
        Body::GATEWAY,
        &PlotFrame::moon_centered_embr(),
        &plan,
    )
    .unwrap();

    assert_eq!(traj.len(), 169);
    assert_eq!(traj.first().unwrap().epoch, ephem.start);
    assert_eq!(traj.last().unwrap().epoch, end);
    // The Gateway stays on its 10,000 km circle about the Moon whatever the frame orientation
    for sample in traj.samples() {
        assert_relative_eq!(sample.rmag_km(), 10_000.0, max_relative = 1e-9);
    }

    let mut scene = Scene::new("Gateway");
    scene.push(
        Polyline::builder()
            .name(traj.name.clone())
            .points(traj.positions())
            .build(),
    );
    let [x, y, z] = scene.axis_ranges().unwrap();
    assert_relative_eq!(x.span(), y.span(), max_relative = 1e-12);
    assert_relative_eq!(x.span(), z.span(), max_relative = 1e-12);
    assert!(x.span() >= traj.max_radius_km());
}

#[test]
fn epochs_are_increasing_and_within_the_window() {
    let ephem = test_ephemeris();
    let end = ephem.start + 6.7 * Unit::Day;
    let plan = SamplingPlan::points(ephem.start, end, 400);
    let traj = Trajectory::sample(&ephem, Body::GATEWAY, &PlotFrame::gse(), &plan).unwrap();

    let epochs = traj.epochs();
    assert_eq!(epochs.len(), 400);
    assert!(epochs.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(epochs[0], ephem.start);
    assert_eq!(epochs[399], end);
}

#[test]
fn outside_of_coverage() {
    let ephem = test_ephemeris();
    let plan = SamplingPlan::every(
        ephem.end - 1.0 * Unit::Day,
        ephem.end + 1.0 * Unit::Day,
        1.0 * Unit::Hour,
    );

    match Trajectory::sample(
        &ephem,
        Body::GATEWAY,
        &PlotFrame::moon_centered_embr(),
        &plan,
    ) {
        Err(PlotError::Ephemeris { .. }) => {}
        other => panic!("expected an ephemeris error, got {other:?}"),
    }
}

#[test]
fn reversed_window() {
    let ephem = test_ephemeris();
    let plan = SamplingPlan::every(ephem.end, ephem.start, 1.0 * Unit::Hour);
    assert!(matches!(
        Trajectory::sample(&ephem, Body::GATEWAY, &PlotFrame::gse(), &plan),
        Err(PlotError::Sampling { .. })
    ));
}
