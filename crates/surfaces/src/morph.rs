use glam::Vec3;

use crate::catalog::SurfaceFn;

/// Cubic Hermite ease: `3p^2 - 2p^3` with the input clamped to `[0, 1]`.
/// Zero first derivative at both ends, so blends start and finish gently.
pub fn smoothstep(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

/// Blends two surface samples at the same `(u, v, t)` by the eased progress.
///
/// `Vec3::lerp` extrapolates for factors outside `[0, 1]`; that unclamped
/// primitive is intentional even though `smoothstep` keeps the factor
/// in range here.
pub fn morph(u: f32, v: f32, t: f32, from: SurfaceFn, to: SurfaceFn, progress: f32) -> Vec3 {
    from(u, v, t).lerp(to(u, v, t), smoothstep(progress))
}
