use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::library;

/// A pure surface evaluator: `(u, v, t)` to a point in 3D space.
pub type SurfaceFn = fn(f32, f32, f32) -> Vec3;

/// Number of registered surface functions.
pub const FUNCTION_COUNT: usize = 6;

/// Identifies one surface in the catalog.
///
/// The declaration order is load-bearing: each variant's ordinal doubles as
/// the index into the evaluator table and as a factor in the kernel index
/// handed to the GPU dispatch, so reordering variants changes which compute
/// kernel runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FunctionId {
    #[default]
    MobiusStrip,
    MultiWave,
    SphericalHarmonics,
    DnaHelix,
    Torus,
    TorusKnot,
}

const EVALUATORS: [SurfaceFn; FUNCTION_COUNT] = [
    library::mobius_strip,
    library::multi_wave,
    library::spherical_harmonics,
    library::dna_helix,
    library::torus,
    library::torus_knot,
];

#[derive(Debug, thiserror::Error)]
#[error("unknown surface function '{0}'")]
pub struct ParseFunctionError(String);

impl FunctionId {
    /// All catalog entries in ordinal order.
    pub const ALL: [FunctionId; FUNCTION_COUNT] = [
        FunctionId::MobiusStrip,
        FunctionId::MultiWave,
        FunctionId::SphericalHarmonics,
        FunctionId::DnaHelix,
        FunctionId::Torus,
        FunctionId::TorusKnot,
    ];

    /// Stable position of this function within the catalog.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Looks up a function by ordinal. `None` for anything outside the
    /// catalog range, which callers should treat as a programming error.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// Returns the pure evaluator registered for this id.
    pub fn evaluator(self) -> SurfaceFn {
        EVALUATORS[self.ordinal()]
    }

    /// Samples the surface directly.
    pub fn sample(self, u: f32, v: f32, t: f32) -> Vec3 {
        (self.evaluator())(u, v, t)
    }

    pub fn name(self) -> &'static str {
        match self {
            FunctionId::MobiusStrip => "mobius-strip",
            FunctionId::MultiWave => "multi-wave",
            FunctionId::SphericalHarmonics => "spherical-harmonics",
            FunctionId::DnaHelix => "dna-helix",
            FunctionId::Torus => "torus",
            FunctionId::TorusKnot => "torus-knot",
        }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionId {
    type Err = ParseFunctionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|id| id.name() == normalized)
            .ok_or_else(|| ParseFunctionError(input.to_string()))
    }
}
