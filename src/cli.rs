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

use crate::ephem::AlmanacEphemeris;
use crate::io::{ConfigRepr, OutputMode};
use crate::scenarios::{execute, Scenario};
use crate::PlotError;
use clap::{ArgAction, Parser};
use std::env::{set_var, var};
use std::path::PathBuf;
use std::process::ExitCode;

/// Environment variable holding the log filter, defaults to INFO.
pub const LOG_VAR: &str = "TRAJPLOT_LOG";

/// Command line arguments shared by every plotting binary.
#[derive(Parser, Debug)]
#[command(version, about = "Plots a spacecraft trajectory in 3D from its SPICE ephemeris.")]
pub struct Args {
    /// Write a static HTML document (and its PNG preview, if any) instead of opening the viewer
    #[arg(long = "static", action = ArgAction::SetTrue)]
    pub static_output: bool,
    /// YAML configuration overriding the kernels, time window and cadence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory of the static output
    #[arg(short, long, default_value = "docs")]
    pub output_dir: PathBuf,
    /// Print the configuration as YAML and exit, e.g. as a starting point for a custom configuration
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

impl Args {
    pub fn mode(&self) -> OutputMode {
        if self.static_output {
            OutputMode::Static {
                dir: self.output_dir.clone(),
            }
        } else {
            OutputMode::Interactive
        }
    }
}

pub fn init_logger() {
    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }
}

/// Loads the configuration and the kernels, then builds and emits the scenario.
pub fn try_run<S: Scenario>(args: &Args) -> Result<Vec<PathBuf>, PlotError> {
    let cfg = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            S::Config::load(path)?
        }
        None => S::default_config(),
    };

    if args.dump_config {
        println!("{}", cfg.dumps()?);
        return Ok(Vec::new());
    }

    let ephem = AlmanacEphemeris::load(S::kernels(&cfg))?;
    execute::<S>(&cfg, &ephem, &args.mode())
}

/// Entry point of every binary: any failure is logged and ends the run with a non-zero exit code.
pub fn run<S: Scenario>() -> ExitCode {
    init_logger();
    let args = Args::parse();
    match try_run::<S>(&args) {
        Ok(paths) => {
            for path in paths {
                debug!("Emitted {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
