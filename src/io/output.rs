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

use super::html::{render, write_html};
use super::preview::encode_preview;
use crate::errors::{OutputSnafu, ViewerSnafu};
use crate::plot::Scene;
use crate::PlotError;
use snafu::ResultExt;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where a finished scene goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Writes the HTML document to the temporary directory and opens it in the browser.
    Interactive,
    /// Writes the HTML document, and the PNG preview if any, to this directory.
    Static { dir: PathBuf },
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Interactive => write!(f, "interactive"),
            Self::Static { dir } => write!(f, "static in {}", dir.display()),
        }
    }
}

/// Emits the scene and returns the paths of the written files.
///
/// The preview is only rendered in static mode.
pub fn emit(
    scene: &Scene,
    mode: &OutputMode,
    html_file: &str,
    preview_file: Option<&str>,
) -> Result<Vec<PathBuf>, PlotError> {
    if scene.traces.is_empty() {
        return Err(PlotError::EmptyScene {
            title: scene.title.clone(),
        });
    }

    match mode {
        OutputMode::Interactive => {
            let path = env::temp_dir().join(html_file);
            write_html(scene, &path)?;
            open_in_browser(&path)?;
            Ok(vec![path])
        }
        OutputMode::Static { dir } => {
            // Everything is rendered before the first file is written
            let html_path = dir.join(html_file);
            let document = render(scene)?;
            let preview = match preview_file {
                Some(preview_file) => {
                    let png_path = dir.join(preview_file);
                    let png = encode_preview(scene, &png_path)?;
                    Some((png_path, png))
                }
                None => None,
            };

            fs::create_dir_all(dir).context(OutputSnafu { path: dir.clone() })?;
            fs::write(&html_path, document).context(OutputSnafu {
                path: html_path.clone(),
            })?;
            info!("Wrote interactive HTML: {}", html_path.display());
            let mut written = vec![html_path];

            if let Some((png_path, png)) = preview {
                if let Err(source) = fs::write(&png_path, png) {
                    // No half-written output
                    for path in &written {
                        if let Err(e) = fs::remove_file(path) {
                            warn!("could not remove {}: {e}", path.display());
                        }
                    }
                    return Err(PlotError::Output {
                        path: png_path,
                        source,
                    });
                }
                info!("Wrote static preview PNG: {}", png_path.display());
                written.push(png_path);
            }
            Ok(written)
        }
    }
}

/// Opens the document with the platform's default browser, without waiting for it.
fn open_in_browser(path: &Path) -> Result<(), PlotError> {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    cmd.arg(path).spawn().context(ViewerSnafu {
        path: path.to_path_buf(),
    })?;
    info!("Opened {} in the browser", path.display());
    Ok(())
}
