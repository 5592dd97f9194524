//! Catalog of animated parametric surface functions and the morph primitive
//! used to blend between them.
//!
//! Every surface is a pure mapping `(u, v, t) -> Vec3` with `u` and `v` swept
//! over `[-1, 1]` and `t` the elapsed time in seconds. The catalog order is a
//! contract: ordinals feed the renderer's kernel-index arithmetic.

mod catalog;
mod library;
mod morph;

pub use catalog::{FunctionId, ParseFunctionError, SurfaceFn, FUNCTION_COUNT};
pub use library::{
    dna_helix, mobius_strip, multi_wave, spherical_harmonics, torus, torus_knot,
};
pub use morph::{morph, smoothstep};
