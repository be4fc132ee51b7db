//! Command-line resolution of the box lengths.
//!
//! The flag surface is the legacy one: `-L X`, `-L X Y Z`, `-Lx X`, `-Ly Y`,
//! `-Lz Z` and `-h`. Single-dash multi-character flags rule out a derive-style
//! parser, so scanning is a pure function over the raw argument list and the
//! binary alone turns errors into usage text and an exit code.

use glam::DVec3;
use thiserror::Error;

pub const USAGE: &str = "\
Usage:
  cat file | pbcwrap [opt] > file.pbc

  [opt]:
    -L X                 Equal box length X in the three directions
    -L X Y Z             Independent lengths along each direction
    -Lx X -Ly Y -Lz Z    Same as above
    If only Lx and Ly are present, 2D mode is assumed.

  INPUT FORMAT
  # Lines starting with # are printed without modification
  x y z WHATEVER
  .
  .
  .
  Characters after the coordinate columns are printed without modification.
";

/// The resolved box extents, ready to construct a [`SimBox`](crate::SimBox).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConfig {
    pub size: DVec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `-h` was given; print usage and exit cleanly.
    Help,
    Run(BoxConfig),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no valid box length was given")]
    NoBoxLength,
    #[error("flag `{flag}` expects a value")]
    MissingValue { flag: &'static str },
}

/// Parse a length argument the way `strtod` would: a malformed value counts
/// as zero, which the resolution rules below treat as unset.
fn lenient_length(arg: &str) -> f64 {
    arg.parse().unwrap_or(0.0)
}

/// Scan the argument list (without the program name) and resolve the box
/// extents.
///
/// The scan is left-to-right with later assignments winning, and zero means
/// "unset" throughout, mirroring the legacy scanner. `-L` consumes a y and z
/// value purely on argument count: whenever at least three arguments follow
/// it, the second and third are read as lengths no matter what they look
/// like.
pub fn parse_args(args: &[String]) -> Result<Command, ConfigError> {
    let mut lx = 0.0;
    let mut ly = 0.0;
    let mut lz = 0.0;
    let mut lread = 0.0;

    for (i, arg) in args.iter().enumerate() {
        match arg.as_str() {
            "-L" => {
                let x = args
                    .get(i + 1)
                    .ok_or(ConfigError::MissingValue { flag: "-L" })?;
                lx = lenient_length(x);
                if let (Some(y), Some(z)) = (args.get(i + 2), args.get(i + 3)) {
                    ly = lenient_length(y);
                    lz = lenient_length(z);
                }
                if ly == 0.0 || lz == 0.0 {
                    lread = lx;
                }
            }
            "-Lx" => {
                let x = args
                    .get(i + 1)
                    .ok_or(ConfigError::MissingValue { flag: "-Lx" })?;
                lx = lenient_length(x);
            }
            "-Ly" => {
                let y = args
                    .get(i + 1)
                    .ok_or(ConfigError::MissingValue { flag: "-Ly" })?;
                ly = lenient_length(y);
            }
            "-Lz" => {
                let z = args
                    .get(i + 1)
                    .ok_or(ConfigError::MissingValue { flag: "-Lz" })?;
                lz = lenient_length(z);
            }
            "-h" => return Ok(Command::Help),
            _ => {}
        }
    }

    if lread == 0.0 && !(lx != 0.0 && ly != 0.0) {
        return Err(ConfigError::NoBoxLength);
    }

    // No z and no single -L value: 2D mode.
    if lz == 0.0 && lread == 0.0 {
        lz = -1.0;
    }
    if lread != 0.0 && lz == 0.0 {
        lz = lread;
    }
    if lx == 0.0 || ly == 0.0 {
        lx = lread;
        ly = lread;
    }

    Ok(Command::Run(BoxConfig {
        size: DVec3::new(lx, ly, lz),
    }))
}
