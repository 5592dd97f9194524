use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use graphconfig::GraphSettings;
use renderer::{Renderer, RendererConfig};
use surfaces::FunctionId;
use tracing_subscriber::EnvFilter;
use transition::{MorphTimeline, TransitionConfig};

use crate::cli::{parse_surface_size, RunArgs};

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut settings = match args.config.as_ref() {
        Some(path) => GraphSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => GraphSettings::default(),
    };
    apply_overrides(&mut settings, &args);
    settings
        .validate()
        .context("settings rejected after applying CLI overrides")?;

    let surface_size = args
        .size
        .as_deref()
        .map(|value| parse_surface_size(value).map_err(|err| anyhow!(err)))
        .transpose()?
        .unwrap_or((1280, 720));

    let start = settings.start_function.unwrap_or_default();
    let seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!(
        function = %start,
        mode = ?settings.mode,
        resolution = settings.resolution,
        seed,
        "bootstrapping gpugraph"
    );

    let transition_config = TransitionConfig {
        function_duration: settings.function_duration.as_secs_f32(),
        transition_duration: settings.transition_duration.as_secs_f32(),
        mode: settings.mode,
    };
    let resolution = settings.resolution;
    let mut timeline = MorphTimeline::new(start, seed);

    let renderer = Renderer::new(RendererConfig {
        surface_size,
        target_fps: settings.fps_cap(),
        camera_move_speed: settings.camera.move_speed,
        camera_distance: settings.camera.distance,
    });
    renderer.run(move |dt, time| {
        timeline.advance(dt, &transition_config);
        timeline.evaluation(resolution, time, &transition_config)
    })
}

pub fn list_functions() -> Result<()> {
    println!("Surface functions (catalog order):");
    for id in FunctionId::ALL {
        println!("  {:<2} {}", id.ordinal(), id);
    }
    Ok(())
}

fn apply_overrides(settings: &mut GraphSettings, args: &RunArgs) {
    if let Some(resolution) = args.resolution {
        settings.resolution = resolution;
    }
    if let Some(seconds) = args.function_duration {
        settings.function_duration = Duration::from_secs_f32(seconds);
    }
    if let Some(seconds) = args.transition_duration {
        settings.transition_duration = Duration::from_secs_f32(seconds);
    }
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    if let Some(function) = args.function {
        settings.start_function = Some(function);
    }
    if let Some(fps) = args.fps {
        settings.fps = Some(fps);
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphconfig::TransitionMode;

    fn base_args() -> RunArgs {
        RunArgs {
            config: None,
            function: None,
            mode: None,
            resolution: None,
            function_duration: None,
            transition_duration: None,
            size: None,
            fps: None,
            seed: None,
        }
    }

    #[test]
    fn overrides_replace_settings_values() {
        let mut settings = GraphSettings::default();
        let mut args = base_args();
        args.resolution = Some(300);
        args.mode = Some(TransitionMode::Random);
        args.function = Some(FunctionId::DnaHelix);
        args.function_duration = Some(2.0);
        apply_overrides(&mut settings, &args);
        assert_eq!(settings.resolution, 300);
        assert_eq!(settings.mode, TransitionMode::Random);
        assert_eq!(settings.start_function, Some(FunctionId::DnaHelix));
        assert_eq!(settings.function_duration, Duration::from_secs(2));
    }

    #[test]
    fn unset_flags_leave_settings_alone() {
        let mut settings = GraphSettings::default();
        let expected = settings.resolution;
        apply_overrides(&mut settings, &base_args());
        assert_eq!(settings.resolution, expected);
        assert_eq!(settings.start_function, None);
    }
}
