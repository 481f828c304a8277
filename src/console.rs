//! Handling the `rayplay` CLI
//!
//! This module handles the command line parsing as well as basic information (e.g. help dialog, version information, etc.).
use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{builder::Str, Parser};
use log::info;

use crate::{
    error::{RayPlayError, RpResult},
    get_version,
    ray::DEFAULT_TRACE_LEVEL,
};

/// Command line arguments for the `rayplay` application.
#[derive(Parser, Debug)]
#[command(author, version = Str::from(get_version()), about, long_about = None)]
pub struct Args {
    /// file path of the scene (YAML), which should be traced
    #[arg(short, long)]
    pub file_path: PathBuf,

    /// trace level of all rays which do not define their own
    #[arg(short, long, default_value_t = DEFAULT_TRACE_LEVEL)]
    pub trace_level: i32,

    /// file the traced rays are written to. if not defined, the result is printed to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
impl Args {
    /// Check the given arguments.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the scene file does not exist or is not a file.
    ///   - the trace level is negative.
    ///   - the directory of the output file does not exist.
    pub fn validate(&self) -> RpResult<()> {
        if !file_path_is_valid(&self.file_path) {
            return Err(RayPlayError::Console(format!(
                "invalid scene file path: {}",
                self.file_path.display()
            )));
        }
        if self.trace_level < 0 {
            return Err(RayPlayError::Console("trace level must be >= 0".into()));
        }
        if let Some(output) = &self.output {
            let directory = output.parent().unwrap_or_else(|| Path::new(""));
            if !directory.as_os_str().is_empty() && !directory.is_dir() {
                return Err(RayPlayError::Console(format!(
                    "output directory does not exist: {}",
                    directory.display()
                )));
            }
        }
        Ok(())
    }
}

/// Write a trace report to the given file or, if no file is given, to stdout.
///
/// # Errors
///
/// This function will return an error if
///   - the file cannot be created.
///   - writing fails (e.g. no space).
pub fn write_report(report: &str, output: Option<&Path>) -> RpResult<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path).map_err(|e| {
                RayPlayError::Console(format!(
                    "could not create file path: {}: {}",
                    path.display(),
                    e
                ))
            })?;
            write!(file, "{report}").map_err(|e| {
                RayPlayError::Console(format!(
                    "writing to file path {} failed: {}",
                    path.display(),
                    e
                ))
            })?;
            info!("traced rays written to {}", path.display());
        }
        None => {
            io::stdout()
                .write_all(report.as_bytes())
                .map_err(|e| RayPlayError::Console(format!("writing to stdout failed: {e}")))?;
        }
    }
    Ok(())
}

/// Checks if the passed file path is valid.
fn file_path_is_valid(path: &Path) -> bool {
    path.exists() && path.is_file()
}
