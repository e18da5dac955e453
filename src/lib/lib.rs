use std::io::{Result, Write};

use nalgebra::geometry::Point2;

use crate::patterns::PatternSet;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod patterns;
pub mod preview;

/// Height the tool travels at between paths
pub const DEFAULT_SAFE_Z: f64 = 5.0;
/// Height the tool draws at
pub const DEFAULT_WORK_Z: f64 = 0.0;

/// Tool heights and job metadata for the exported program.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolpathConfig {
    pub safe_z: f64,
    pub work_z: f64,
    /// Emitted as a comment on the first line, if set
    pub name: Option<String>,
}

impl ToolpathConfig {
    pub fn validate(&self) -> error::Result<()> {
        for (name, v) in [("safe Z", self.safe_z), ("working Z", self.work_z)] {
            if !v.is_finite() {
                return Err(error::PatternError::InvalidConfiguration {
                    reason: format!("{name} must be finite, got {v}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for ToolpathConfig {
    fn default() -> Self {
        ToolpathConfig {
            safe_z: DEFAULT_SAFE_Z,
            work_z: DEFAULT_WORK_Z,
            name: None,
        }
    }
}

pub fn gcode_comment(program: &mut Vec<String>, s: &str) {
    program.push(format!("({s})"));
}

pub fn preamble(program: &mut Vec<String>, config: &ToolpathConfig) {
    if let Some(name) = &config.name {
        gcode_comment(program, name);
    }
    // Metric, absolute positioning, tool up
    program.push("G21".to_string());
    program.push("G90".to_string());
    g0(program, z(config.safe_z));
}

pub fn trailer(program: &mut Vec<String>) {
    // Go home
    g0(program, xy(0.0, 0.0));
}

#[derive(Clone, Debug)]
pub struct Pos {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

pub fn xy(x: f64, y: f64) -> Pos {
    Pos {
        x: Some(x),
        y: Some(y),
        z: None,
    }
}

pub fn z(z: f64) -> Pos {
    Pos {
        x: None,
        y: None,
        z: Some(z),
    }
}

impl From<&Point2<f64>> for Pos {
    fn from(p: &Point2<f64>) -> Self {
        xy(p.x, p.y)
    }
}

impl Pos {
    fn as_gvals(&self) -> String {
        let mut words = String::new();
        if let Some(x) = self.x {
            words.push_str(&format!(" X{}", coord(x)));
        }
        if let Some(y) = self.y {
            words.push_str(&format!(" Y{}", coord(y)));
        }
        if let Some(z) = self.z {
            words.push_str(&format!(" Z{}", height(z)));
        }
        words
    }
}

/// X and Y always carry exactly two decimals; plotter firmware downstream relies on it.
/// Exact halfway values round away from zero (`3.125` gives `3.13`), and negative zero prints
/// as `0.00`.
fn coord(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let a = v.abs();
    // A double sits exactly halfway between two hundredths only when it is an odd multiple of 1/8
    let eighths = a * 8.0;
    if a < 1e15 && eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let hundredths = (a * 100.0).ceil() as u64;
        format!("{sign}{}.{:02}", hundredths / 100, hundredths % 100)
    } else {
        format!("{sign}{a:.2}")
    }
}

/// Heights are printed in their minimal form when they round nicely, so `Z5` rather than `Z5.00`.
fn height(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if (v - v.round()).abs() < f64::EPSILON {
        format!("{:.0}", v.round())
    } else {
        coord(v)
    }
}

fn g_move_linear(program: &mut Vec<String>, g: &str, p: &Pos) {
    debug_assert!(
        p.x.is_some() || p.y.is_some() || p.z.is_some(),
        "refusing to emit an empty move"
    );
    program.push(format!("{g}{}", p.as_gvals()));
}

/// Rapid move
pub fn g0(program: &mut Vec<String>, p: Pos) {
    g_move_linear(program, "G0", &p)
}

/// Controlled (drawing) move
pub fn g1(program: &mut Vec<String>, p: Pos) {
    g_move_linear(program, "G1", &p)
}

/// Draw one path: travel to its start, lower the tool, trace every point, close the loop if
/// the path is closed, and lift again. Empty paths emit nothing.
pub fn g1_path(program: &mut Vec<String>, path: &geometry::Path, config: &ToolpathConfig) {
    let Some(start) = path.first() else {
        return;
    };
    g0(program, start.into());
    g0(program, z(config.work_z));
    for p in &path.points {
        g1(program, p.into());
    }
    if path.closed {
        g1(program, start.into());
    }
    g0(program, z(config.safe_z));
}

/// Serialize a whole pattern into G-code, one command per entry.
pub fn export_gcode(patterns: &PatternSet, config: &ToolpathConfig) -> Vec<String> {
    let mut program = Vec::new();
    preamble(&mut program, config);
    for path in patterns.iter() {
        g1_path(&mut program, path, config);
    }
    trailer(&mut program);
    program
}

pub fn write_program(file: &mut dyn Write, program: &[String]) -> Result<()> {
    for line in program {
        writeln!(file, "{line}")?;
    }
    Ok(())
}
