use crate::test_ephemeris;
use approx::assert_relative_eq;
use std::fs;
use trajplot::io::OutputMode;
use trajplot::scenarios::{execute, Jwst, NrhoPlot, Scenario};
use trajplot::time::Unit;
use trajplot::PlotError;

#[test]
fn static_nrho_writes_html_and_preview() {
    let ephem = test_ephemeris();
    let dir = tempfile::tempdir().unwrap();
    let mode = OutputMode::Static {
        dir: dir.path().join("docs"),
    };

    let written = execute::<NrhoPlot>(&NrhoPlot::default_config(), &ephem, &mode).unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(fs::read_dir(dir.path().join("docs")).unwrap().count(), 2);
    assert!(written[0].ends_with("nrho_plot.html"));
    let html = fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains("Plotly.newPlot"));
    assert!(html.contains("NRHO (Moon-centric EMBR)"));

    assert!(written[1].ends_with("nrho_preview.png"));
    let png = image::open(&written[1]).unwrap();
    assert_eq!((png.width(), png.height()), (1280, 600));
}

#[test]
fn static_jwst_writes_only_html() {
    let ephem = test_ephemeris();
    let dir = tempfile::tempdir().unwrap();
    let mode = OutputMode::Static {
        dir: dir.path().to_path_buf(),
    };

    let written = execute::<Jwst>(&Jwst::default_config(), &ephem, &mode).unwrap();

    assert_eq!(written, vec![dir.path().join("jwst_plot.html")]);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn failed_sampling_writes_nothing() {
    let ephem = test_ephemeris();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("docs");
    let mut cfg = Jwst::default_config();
    cfg.end = Some(ephem.end + 1.0 * Unit::Day);

    let result = execute::<Jwst>(&cfg, &ephem, &OutputMode::Static { dir: out.clone() });

    assert!(matches!(result, Err(PlotError::Ephemeris { .. })));
    assert!(!out.exists());
}

#[test]
fn equal_aspect_axes() {
    let ephem = test_ephemeris();
    let scene = NrhoPlot::build(&NrhoPlot::default_config(), &ephem).unwrap();
    let [x, y, z] = scene.axis_ranges().unwrap();
    assert_relative_eq!(x.span(), y.span(), max_relative = 1e-12);
    assert_relative_eq!(x.span(), z.span(), max_relative = 1e-12);

    // Every plotted point is within the axis ranges
    let bbox = scene.bounding_box().unwrap();
    for (i, range) in [x, y, z].iter().enumerate() {
        assert!(range.contains(bbox.min[i]) && range.contains(bbox.max[i]));
    }
}
