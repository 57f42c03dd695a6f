use glam::{Mat4, Vec3};

/// Perspective camera looking at the origin from `position`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the projection after changing `fov_deg`, `aspect`, `near` or `far`.
    pub fn update_projection_matrix(&mut self) {
        let aspect = if self.aspect > 0.0 { self.aspect } else { 1.0 };
        self.projection =
            Mat4::perspective_rh_gl(self.fov_deg.to_radians(), aspect, self.near, self.far);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }
}
