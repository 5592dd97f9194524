use std::path::PathBuf;

use clap::{Parser, Subcommand};
use graphconfig::TransitionMode;
use surfaces::FunctionId;

#[derive(Parser, Debug)]
#[command(
    name = "gpugraph",
    author,
    version,
    about = "Animated parametric surface graph",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Settings file (TOML); flags below override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Surface shown at startup (e.g. `torus`, `dna-helix`).
    #[arg(long, value_name = "NAME", value_parser = parse_function)]
    pub function: Option<FunctionId>,

    /// Selection mode when a steady phase ends: `cycle` or `random`.
    #[arg(long, value_name = "MODE", value_parser = parse_mode)]
    pub mode: Option<TransitionMode>,

    /// Grid edge length; the graph evaluates RESOLUTION^2 points.
    #[arg(long, value_name = "POINTS")]
    pub resolution: Option<u32>,

    /// Seconds each surface stays on display.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    pub function_duration: Option<f32>,

    /// Seconds a morph between two surfaces takes.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    pub transition_duration: Option<f32>,

    /// Window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Optional FPS cap (0 = uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Seed for the random selector; omit for a fresh sequence each run.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the surface function catalog in ordinal order.
    Functions,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_function(value: &str) -> Result<FunctionId, String> {
    value.parse().map_err(|err| format!("{err}"))
}

pub fn parse_mode(value: &str) -> Result<TransitionMode, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "cycle" => Ok(TransitionMode::Cycle),
        "random" => Ok(TransitionMode::Random),
        other => Err(format!("unknown mode '{other}'; expected cycle or random")),
    }
}

pub fn parse_seconds(value: &str) -> Result<f32, String> {
    let seconds: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{value}'; expected seconds"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("duration must be non-negative, got {seconds}"));
    }
    Ok(seconds)
}

pub fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid width in window size".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid height in window size".to_string())?;
    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".into());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_function_names() {
        assert_eq!(parse_function("torus").unwrap(), FunctionId::Torus);
        assert_eq!(
            parse_function("spherical-harmonics").unwrap(),
            FunctionId::SphericalHarmonics
        );
        assert!(parse_function("wave").is_err());
    }

    #[test]
    fn parses_mode_variants() {
        assert_eq!(parse_mode("cycle").unwrap(), TransitionMode::Cycle);
        assert_eq!(parse_mode("Random").unwrap(), TransitionMode::Random);
        assert!(parse_mode("shuffle").is_err());
    }

    #[test]
    fn parses_surface_size() {
        assert_eq!(parse_surface_size("1920x1080").unwrap(), (1920, 1080));
        assert_eq!(parse_surface_size("800X600").unwrap(), (800, 600));
        assert!(parse_surface_size("1920").is_err());
        assert!(parse_surface_size("0x600").is_err());
    }

    #[test]
    fn rejects_negative_durations() {
        assert!(parse_seconds("-1").is_err());
        assert_eq!(parse_seconds("2.5").unwrap(), 2.5);
        assert_eq!(parse_seconds("0").unwrap(), 0.0);
    }
}
