use glam::{Mat4, Vec3};

/// Free-fly camera pinned to a look-at target.
///
/// Two normalized axis inputs in `[-1, 1]` translate the eye in its local
/// frame; the orientation always re-aims at the target afterwards, so the
/// graph stays centered while the viewpoint orbits and dollies.
pub(crate) struct FlyCamera {
    eye: Vec3,
    target: Vec3,
    move_speed: f32,
}

impl FlyCamera {
    pub fn new(distance: f32, move_speed: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 1.5, -distance),
            target: Vec3::ZERO,
            move_speed,
        }
    }

    pub fn update(&mut self, axes: (f32, f32), dt: f32) {
        let (strafe, advance) = axes;
        if strafe == 0.0 && advance == 0.0 {
            return;
        }
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        self.eye += (right * strafe + forward * advance) * (self.move_speed * dt);
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(60.0_f32.to_radians(), aspect.max(0.01), 0.05, 200.0);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }
}

/// Tracks held movement keys and folds them into normalized axis inputs.
#[derive(Debug, Default)]
pub(crate) struct AxisInput {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
}

impl AxisInput {
    pub fn set_forward(&mut self, held: bool) {
        self.forward = held;
    }

    pub fn set_back(&mut self, held: bool) {
        self.back = held;
    }

    pub fn set_left(&mut self, held: bool) {
        self.left = held;
    }

    pub fn set_right(&mut self, held: bool) {
        self.right = held;
    }

    /// (strafe, advance), each in `[-1, 1]`.
    pub fn axes(&self) -> (f32, f32) {
        let strafe = (self.right as i8 - self.left as i8) as f32;
        let advance = (self.forward as i8 - self.back as i8) as f32;
        (strafe, advance)
    }
}
