//! Timed cycling between surface functions and the morph state machine.
//!
//! One [`MorphTimeline`] is advanced exactly once per frame by the host loop.
//! It alternates between a steady phase (one surface on display) and a
//! transitioning phase (blending from the previous surface into the current
//! one), and emits the per-frame [`EvaluationParams`] the GPU grid consumes.

use graphconfig::TransitionMode;
use rand::prelude::*;

use surfaces::{smoothstep, FunctionId, FUNCTION_COUNT};

/// Phase durations and selection mode, fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    /// Seconds each surface stays on display between transitions.
    pub function_duration: f32,
    /// Seconds a morph between two surfaces takes.
    pub transition_duration: f32,
    pub mode: TransitionMode,
}

/// Which interval the timeline is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Steady,
    Transitioning { from: FunctionId },
}

/// Per-frame parameters handed to the GPU evaluation stage. Recomputed every
/// tick; nothing here outlives the frame that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationParams {
    /// Grid edge length; the compute dispatch covers `resolution^2` points.
    pub resolution: u32,
    /// Cell size of the evaluation grid over the `[-1, 1]` domain.
    pub step: f32,
    /// Wall time in seconds fed to the surface functions.
    pub time: f32,
    /// Eased morph progress; `None` while steady.
    pub transition_progress: Option<f32>,
    /// Flattened (from, to) pair: `to + from * FUNCTION_COUNT`. Steady frames
    /// encode the degenerate (current, current) pair.
    pub kernel_index: u32,
}

/// Picks the surface to show after `current`.
///
/// Random mode draws from ordinals `[1, count)` and falls back to ordinal 0
/// when the draw collides with `current`. Ordinal 0 is therefore never a
/// direct draw, only a collision result. The bias is kept on purpose: it
/// matches the behaviour the visual tests were recorded against.
pub fn next_function(
    current: FunctionId,
    mode: TransitionMode,
    rng: &mut impl Rng,
) -> FunctionId {
    match mode {
        TransitionMode::Cycle => FunctionId::from_ordinal(current.ordinal() + 1)
            .unwrap_or(FunctionId::ALL[0]),
        TransitionMode::Random => {
            let choice = FunctionId::from_ordinal(rng.gen_range(1..FUNCTION_COUNT))
                .unwrap_or(FunctionId::ALL[0]);
            if choice == current {
                FunctionId::ALL[0]
            } else {
                choice
            }
        }
    }
}

/// Tracks the active surface, the current phase, and elapsed time within it.
pub struct MorphTimeline {
    current: FunctionId,
    phase: Phase,
    elapsed: f32,
    rng: StdRng,
}

impl MorphTimeline {
    pub fn new(initial: FunctionId, seed: u64) -> Self {
        Self {
            current: initial,
            phase: Phase::Steady,
            elapsed: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Surface currently on display (the morph target while transitioning).
    pub fn current(&self) -> FunctionId {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// Seconds accumulated in the current phase.
    pub fn elapsed_in_phase(&self) -> f32 {
        self.elapsed
    }

    /// Advances the timeline by `dt` seconds.
    ///
    /// At most one phase flip happens per tick: a `dt` spanning several phase
    /// boundaries leaves the overflow in `elapsed` for later ticks instead of
    /// cascading. Zero-length phases are always due, so they still flip
    /// exactly once per tick rather than looping.
    pub fn advance(&mut self, dt: f32, config: &TransitionConfig) {
        self.elapsed += dt;
        match self.phase {
            Phase::Transitioning { .. } => {
                if self.elapsed >= config.transition_duration {
                    self.elapsed -= config.transition_duration;
                    self.phase = Phase::Steady;
                }
            }
            Phase::Steady => {
                if self.elapsed >= config.function_duration {
                    self.elapsed -= config.function_duration;
                    let from = self.current;
                    self.current = next_function(from, config.mode, &mut self.rng);
                    self.phase = Phase::Transitioning { from };
                }
            }
        }
    }

    /// Emits the evaluation parameters for the current state.
    pub fn evaluation(
        &self,
        resolution: u32,
        time: f32,
        config: &TransitionConfig,
    ) -> EvaluationParams {
        let (transition_progress, source) = match self.phase {
            Phase::Transitioning { from } => {
                let progress = if config.transition_duration == 0.0 {
                    1.0
                } else {
                    smoothstep(self.elapsed / config.transition_duration)
                };
                (Some(progress), from)
            }
            Phase::Steady => (None, self.current),
        };
        EvaluationParams {
            resolution,
            step: 2.0 / resolution as f32,
            time,
            transition_progress,
            kernel_index: (self.current.ordinal() + source.ordinal() * FUNCTION_COUNT) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(function: f32, transition: f32, mode: TransitionMode) -> TransitionConfig {
        TransitionConfig {
            function_duration: function,
            transition_duration: transition,
            mode,
        }
    }

    #[test]
    fn cycle_visits_every_function_once_before_repeating() {
        let mut rng = StdRng::seed_from_u64(0);
        let start = FunctionId::MobiusStrip;
        let mut seen = vec![start];
        let mut current = start;
        for _ in 0..FUNCTION_COUNT - 1 {
            current = next_function(current, TransitionMode::Cycle, &mut rng);
            assert!(!seen.contains(&current), "{current} repeated early");
            seen.push(current);
        }
        assert_eq!(
            next_function(current, TransitionMode::Cycle, &mut rng),
            start
        );
    }

    #[test]
    fn random_never_returns_the_current_function() {
        let mut rng = StdRng::seed_from_u64(42);
        for current in FunctionId::ALL {
            for _ in 0..200 {
                let next = next_function(current, TransitionMode::Random, &mut rng);
                assert_ne!(next, current);
            }
        }
    }

    #[test]
    fn random_reaches_ordinal_zero_only_via_collision() {
        // From ordinal 0 the draw pool [1, count) can never collide, so the
        // fallback never fires and ordinal 0 never comes up.
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let next = next_function(FunctionId::ALL[0], TransitionMode::Random, &mut rng);
            assert_ne!(next.ordinal(), 0);
        }
    }

    #[test]
    fn exact_boundary_flips_into_transition() {
        let config = config(1.0, 1.0, TransitionMode::Cycle);
        let mut timeline = MorphTimeline::new(FunctionId::MobiusStrip, 1);
        timeline.advance(1.0, &config);
        assert_eq!(
            timeline.phase(),
            Phase::Transitioning {
                from: FunctionId::MobiusStrip
            }
        );
        assert_eq!(timeline.current(), FunctionId::MultiWave);
        assert!(timeline.elapsed_in_phase().abs() < 1e-6);
    }

    #[test]
    fn overflow_carries_into_the_next_phase() {
        let config = config(1.0, 1.0, TransitionMode::Cycle);
        let mut timeline = MorphTimeline::new(FunctionId::MobiusStrip, 1);
        timeline.advance(0.9, &config);
        assert_eq!(timeline.phase(), Phase::Steady);
        timeline.advance(0.2, &config);
        assert!(timeline.is_transitioning());
        assert!((timeline.elapsed_in_phase() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn large_dt_flips_only_once_per_tick() {
        let config = config(1.0, 1.0, TransitionMode::Cycle);
        let mut timeline = MorphTimeline::new(FunctionId::MobiusStrip, 1);
        // Spans the steady phase and the whole transition, but only the
        // steady -> transitioning flip may happen this tick.
        timeline.advance(3.5, &config);
        assert!(timeline.is_transitioning());
        assert!((timeline.elapsed_in_phase() - 2.5).abs() < 1e-6);
        // The remainder resolves the transition on the following tick.
        timeline.advance(0.0, &config);
        assert_eq!(timeline.phase(), Phase::Steady);
        assert!((timeline.elapsed_in_phase() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn zero_durations_flip_once_per_tick_without_looping() {
        let config = config(0.0, 0.0, TransitionMode::Cycle);
        let mut timeline = MorphTimeline::new(FunctionId::MobiusStrip, 1);
        timeline.advance(0.0, &config);
        assert!(timeline.is_transitioning());
        timeline.advance(0.0, &config);
        assert_eq!(timeline.phase(), Phase::Steady);
        assert_eq!(timeline.current(), FunctionId::MultiWave);
    }

    #[test]
    fn steady_kernel_index_encodes_the_degenerate_pair() {
        let config = config(10.0, 1.0, TransitionMode::Cycle);
        for id in FunctionId::ALL {
            let timeline = MorphTimeline::new(id, 1);
            let params = timeline.evaluation(100, 0.0, &config);
            let k = id.ordinal() as u32;
            assert_eq!(params.kernel_index, k + k * FUNCTION_COUNT as u32);
            assert_eq!(params.transition_progress, None);
        }
    }

    #[test]
    fn transitioning_kernel_index_pairs_source_with_target() {
        let config = config(1.0, 2.0, TransitionMode::Cycle);
        let mut timeline = MorphTimeline::new(FunctionId::Torus, 1);
        timeline.advance(1.0, &config);
        // Torus (4) -> TorusKnot (5): 5 + 4 * 6.
        let params = timeline.evaluation(100, 1.0, &config);
        assert_eq!(params.kernel_index, 5 + 4 * FUNCTION_COUNT as u32);
    }

    #[test]
    fn transition_progress_is_eased() {
        let config = config(1.0, 2.0, TransitionMode::Cycle);
        let mut timeline = MorphTimeline::new(FunctionId::MobiusStrip, 1);
        timeline.advance(1.0, &config);
        timeline.advance(1.0, &config);
        // Halfway through a 2 s transition: smoothstep(0.5) = 0.5.
        let params = timeline.evaluation(100, 2.0, &config);
        let progress = params.transition_progress.expect("transitioning");
        assert!((progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_transition_duration_reports_full_progress() {
        let config = config(1.0, 0.0, TransitionMode::Cycle);
        let mut timeline = MorphTimeline::new(FunctionId::MobiusStrip, 1);
        timeline.advance(1.5, &config);
        assert!(timeline.is_transitioning());
        let params = timeline.evaluation(100, 1.5, &config);
        assert_eq!(params.transition_progress, Some(1.0));
    }

    #[test]
    fn step_divides_the_domain_by_resolution() {
        let config = config(1.0, 1.0, TransitionMode::Cycle);
        let timeline = MorphTimeline::new(FunctionId::MobiusStrip, 1);
        let params = timeline.evaluation(50, 0.25, &config);
        assert!((params.step - 0.04).abs() < 1e-6);
        assert_eq!(params.resolution, 50);
        assert!((params.time - 0.25).abs() < 1e-6);
    }

    #[test]
    fn seeded_timelines_pick_the_same_random_sequence() {
        let config = config(1.0, 1.0, TransitionMode::Random);
        let run = |seed| {
            let mut timeline = MorphTimeline::new(FunctionId::MobiusStrip, seed);
            let mut picks = Vec::new();
            for _ in 0..10 {
                timeline.advance(1.0, &config);
                picks.push(timeline.current());
                timeline.advance(1.0, &config);
            }
            picks
        };
        assert_eq!(run(9), run(9));
    }
}
