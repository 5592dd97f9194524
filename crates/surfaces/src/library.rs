use std::f32::consts::PI;

use glam::Vec3;

/// Ribbon height field built from three travelling sine waves.
pub fn multi_wave(u: f32, v: f32, t: f32) -> Vec3 {
    let mut y = (PI * (u + 0.5 * t)).sin();
    y += 0.5 * (2.0 * PI * (v + t)).sin();
    y += (PI * (u + v + 0.25 * t)).sin();
    y *= 1.0 / 2.5;
    Vec3::new(u, y, v)
}

/// Torus with both radii modulated over time, giving a twisting star shape.
pub fn torus(u: f32, v: f32, t: f32) -> Vec3 {
    let r1 = 0.7 + 0.1 * (PI * (8.0 * u + 0.5 * t)).sin();
    let r2 = 0.15 + 0.05 * (PI * (16.0 * u + 8.0 * v + 3.0 * t)).sin();
    let s = r1 + r2 * (PI * v).cos();
    Vec3::new(s * (PI * u).sin(), r2 * (PI * v).sin(), s * (PI * u).cos())
}

/// Rotating Mobius band; `v` spans the width of the strip.
pub fn mobius_strip(u: f32, v: f32, t: f32) -> Vec3 {
    let radius = 1.0 + 0.5 * v * (0.5 * PI * u).cos();
    Vec3::new(
        radius * (PI * u + 0.5 * t).cos(),
        radius * (PI * u + 0.5 * t).sin(),
        v * (0.5 * PI * u + t).sin(),
    )
}

/// Trefoil-style knot with pulsing tube radius.
pub fn torus_knot(u: f32, v: f32, t: f32) -> Vec3 {
    let r1 = 1.0 + 0.3 * (PI * (6.0 * u + 0.5 * t)).sin();
    let r2 = 0.2 + 0.1 * (PI * (12.0 * v + t)).sin();
    let angle = 2.0 * PI * u;
    let ring = r1 + r2 * (2.0 * PI * v).cos();
    Vec3::new(
        ring * angle.cos(),
        ring * angle.sin(),
        r2 * (2.0 * PI * v).sin(),
    )
}

/// Lobed sphere whose radius oscillates with latitude and longitude.
pub fn spherical_harmonics(u: f32, v: f32, t: f32) -> Vec3 {
    let theta = PI * u;
    let phi = 2.0 * PI * v;
    let r = 0.5 + 0.5 * (4.0 * phi + t).sin() * (2.0 * theta + t).cos();
    Vec3::new(
        r * theta.sin() * phi.cos(),
        r * theta.sin() * phi.sin(),
        r * theta.cos(),
    )
}

/// Double helix: two strands half a turn apart, bridged by `v`, spinning
/// about the vertical axis at 50 degrees per second.
pub fn dna_helix(u: f32, v: f32, t: f32) -> Vec3 {
    let radius = 0.5;
    let angle1 = 2.0 * PI * u;
    let angle2 = angle1 + PI;
    let height = 2.0 * u;

    let p1 = Vec3::new(radius * angle1.cos(), height, radius * angle1.sin());
    let p2 = Vec3::new(radius * angle2.cos(), height, radius * angle2.sin());
    // The strand blend clamps, matching Vector3.Lerp in the reference scene.
    let p = p1.lerp(p2, v.clamp(0.0, 1.0));

    let spin = (50.0_f32).to_radians() * t;
    let (sin, cos) = spin.sin_cos();
    Vec3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos)
}
