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

use crate::errors::{EncodingSnafu, OutputSnafu};
use crate::io::calendar_utc;
use crate::linalg::Vector3;
use crate::plot::{AxisRange, Color, Markers, Polyline, Scene, Sphere, Trace};
use crate::PlotError;
use serde_json::{json, Value};
use snafu::ResultExt;
use std::fs;
use std::path::Path;

/// Plotly.js bundle loaded by every document.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const DIV_ID: &str = "trajplot";

fn columns(points: &[Vector3<f64>]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    (
        points.iter().map(|p| p.x).collect(),
        points.iter().map(|p| p.y).collect(),
        points.iter().map(|p| p.z).collect(),
    )
}

fn polyline_trace(line: &Polyline) -> Value {
    let (x, y, z) = columns(&line.points);
    let color = line.color.unwrap_or(Color::DEFAULT);
    let mut trace = json!({
        "type": "scatter3d",
        "mode": if line.labels.is_empty() { "lines" } else { "lines+text" },
        "name": line.name,
        "x": x,
        "y": y,
        "z": z,
        "line": {
            "color": color.css,
            "width": line.width,
            "dash": line.dash.as_str(),
        },
    });
    if !line.labels.is_empty() {
        trace["text"] = json!(line.labels);
        trace["textposition"] = json!("top center");
    }
    if let Some(hover) = &line.hover {
        let customdata: Vec<Value> = hover
            .epochs
            .iter()
            .zip(hover.speeds_km_s.iter())
            .map(|(epoch, speed)| json!([calendar_utc(epoch), speed]))
            .collect();
        trace["customdata"] = json!(customdata);
        let fmt = hover.coordinate_format;
        trace["hovertemplate"] = json!(format!(
            "UTC: %{{customdata[0]}}<br>{}: %{{customdata[1]:.3f}}<br>x: %{{x:{fmt}}} km<br>y: %{{y:{fmt}}} km<br>z: %{{z:{fmt}}} km<br><extra></extra>",
            hover.speed_title
        ));
    }
    trace
}

fn markers_trace(markers: &Markers) -> Value {
    let (x, y, z) = columns(&markers.points);
    let mut trace = json!({
        "type": "scatter3d",
        "mode": if markers.labels.is_empty() { "markers" } else { "markers+text" },
        "name": markers.name,
        "x": x,
        "y": y,
        "z": z,
        "marker": {
            "size": markers.size,
            "color": markers.color.unwrap_or(Color::DEFAULT).css,
        },
    });
    if !markers.labels.is_empty() {
        trace["text"] = json!(markers.labels);
        trace["textposition"] = json!("top center");
    }
    trace
}

fn sphere_trace(sphere: &Sphere) -> Value {
    let mesh = sphere.mesh();
    let grid = |f: fn(&Vector3<f64>) -> f64| -> Vec<Vec<f64>> {
        mesh.iter().map(|row| row.iter().map(f).collect()).collect()
    };
    json!({
        "type": "surface",
        "name": sphere.name,
        "x": grid(|p| p.x),
        "y": grid(|p| p.y),
        "z": grid(|p| p.z),
        "colorscale": [[0, sphere.color.css], [1, sphere.color.css]],
        "showscale": false,
        "opacity": sphere.opacity,
    })
}

fn axis_layout(title: &str, range: Option<&AxisRange>) -> Value {
    let mut axis = json!({ "title": { "text": title } });
    if let Some(range) = range {
        axis["range"] = json!([range.lower, range.upper]);
    }
    axis
}

/// Builds the Plotly figure of this scene, with equal axis ranges and a cubic aspect.
pub fn figure(scene: &Scene) -> Value {
    let data: Vec<Value> = scene
        .traces
        .iter()
        .map(|trace| match trace {
            Trace::Polyline(line) => polyline_trace(line),
            Trace::Markers(markers) => markers_trace(markers),
            Trace::Sphere(sphere) => sphere_trace(sphere),
        })
        .collect();

    let ranges = scene.axis_ranges();
    let mut layout_scene = json!({
        "aspectmode": "cube",
        "xaxis": axis_layout(&scene.axes[0].title, ranges.as_ref().map(|r| &r[0])),
        "yaxis": axis_layout(&scene.axes[1].title, ranges.as_ref().map(|r| &r[1])),
        "zaxis": axis_layout(&scene.axes[2].title, ranges.as_ref().map(|r| &r[2])),
    });
    if let Some(eye) = scene.camera_eye {
        layout_scene["camera"] = json!({ "eye": { "x": eye.x, "y": eye.y, "z": eye.z } });
    }

    json!({
        "data": data,
        "layout": {
            "title": { "text": scene.title },
            "showlegend": true,
            "scene": layout_scene,
        },
    })
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the full HTML document of this scene. Plotly.js is loaded from its CDN.
pub fn render(scene: &Scene) -> Result<String, PlotError> {
    let figure = serde_json::to_string(&figure(scene)).context(EncodingSnafu {
        action: "HTML document",
    })?;
    // A closing tag in a trace name must not end the script element.
    let figure = figure.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<script src="{PLOTLY_CDN}" charset="utf-8"></script>
</head>
<body>
<div id="{DIV_ID}" style="height:100vh; width:100%;"></div>
<script type="text/javascript">
const figure = {figure};
Plotly.newPlot("{DIV_ID}", figure.data, figure.layout, {{"responsive": true}});
</script>
</body>
</html>
"#,
        title = escape_text(&scene.title),
    ))
}

/// Writes the HTML document of this scene, replacing any existing file.
pub fn write_html(scene: &Scene, path: &Path) -> Result<(), PlotError> {
    let document = render(scene)?;
    fs::write(path, document).context(OutputSnafu {
        path: path.to_path_buf(),
    })?;
    info!("Wrote interactive HTML: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod ut_html {
    use super::*;
    use crate::plot::{Axis, Hover};
    use crate::time::{Epoch, Unit};
    use approx::assert_relative_eq;

    fn scene() -> Scene {
        let start = Epoch::from_gregorian_utc_hms(2004, 9, 8, 16, 0, 0);
        let mut scene = Scene::new("Genesis <probe> & co")
            .with_axes(
                Axis::new("x (km)").reversed(),
                Axis::new("y (km)"),
                Axis::new("z (km)"),
            )
            .with_camera_eye(Vector3::new(0.0, 3.0, 0.5));
        scene.push(
            Polyline::builder()
                .name("probe </script>")
                .points(vec![Vector3::new(-1e6, 0.0, 0.0), Vector3::new(1.5e6, 2e5, -1e4)])
                .color(Color::ORANGE)
                .width(4.0)
                .hover(Hover {
                    epochs: vec![start, start + 1.0 * Unit::Day],
                    speeds_km_s: vec![0.25, 0.5],
                    speed_title: "Speed (in rotating frame, km/s)".to_string(),
                    coordinate_format: ".1f",
                })
                .build(),
        );
        scene.push(Markers::single("L2 (approx)", Vector3::new(1.5e6, 0.0, 0.0), Color::RED));
        scene.push(Sphere::new("Earth", Vector3::zeros(), 6371.0, Color::BLUE));
        scene
    }

    #[test]
    fn figure_layout() {
        let fig = figure(&scene());
        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["type"], "scatter3d");
        assert_eq!(data[0]["mode"], "lines");
        assert_eq!(data[0]["line"]["color"], "orange");
        assert_eq!(data[0]["customdata"][0][0], "2004 SEP 08 16:00:00");
        let template = data[0]["hovertemplate"].as_str().unwrap();
        assert!(template.contains("Speed (in rotating frame, km/s): %{customdata[1]:.3f}"));
        assert!(template.contains("x: %{x:.1f} km"));
        assert_eq!(data[1]["mode"], "markers+text");
        assert_eq!(data[1]["text"][0], "L2 (approx)");
        assert_eq!(data[2]["type"], "surface");
        assert_eq!(data[2]["showscale"], false);
        assert_eq!(data[2]["x"].as_array().unwrap().len(), 40);

        let layout = &fig["layout"]["scene"];
        assert_eq!(layout["aspectmode"], "cube");
        assert_eq!(layout["camera"]["eye"]["y"], 3.0);
        let x = layout["xaxis"]["range"].as_array().unwrap();
        let y = layout["yaxis"]["range"].as_array().unwrap();
        let (x0, x1) = (x[0].as_f64().unwrap(), x[1].as_f64().unwrap());
        let (y0, y1) = (y[0].as_f64().unwrap(), y[1].as_f64().unwrap());
        // Reversed x axis, same span as y
        assert!(x0 > x1);
        assert_relative_eq!(x0 - x1, y1 - y0, max_relative = 1e-12);
    }

    #[test]
    fn document() {
        let html = render(&scene()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("<title>Genesis &lt;probe&gt; &amp; co</title>"));
        assert!(html.contains("Plotly.newPlot"));
        assert!(!html.contains("probe </script>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
