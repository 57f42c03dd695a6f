//! The decorative hero scene: a slowly turning torus knot lit by an orbiting
//! point light, with a field of particles behind it.
//!
//! This is the platform-independent model. `wasm::scene` owns the GPU side
//! and feeds it elapsed time every frame.

pub mod camera;
pub mod geometry;

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use rand::Rng;

use crate::tween::{Ease, ScalarTween};
use camera::PerspectiveCamera;
use geometry::{MeshData, ParticleField};

/// Rotation about Y added every frame, in radians.
pub const SPIN_PER_FRAME: f32 = 0.004;
const MESH_SCALE: f32 = 0.9;
const ENTRANCE_SECS: f64 = 1.2;

pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

/// One-shot entrance of the mesh: it swings in from a tilted, shrunken pose.
#[derive(Debug, Clone, Copy)]
struct Entrance {
    rot_x: ScalarTween,
    rot_y: ScalarTween,
    scale: ScalarTween,
}

impl Entrance {
    fn new() -> Self {
        Self {
            rot_x: ScalarTween::new(-0.2, 0.0, ENTRANCE_SECS, Ease::Power3Out),
            rot_y: ScalarTween::new(-1.2, 0.0, ENTRANCE_SECS, Ease::Power3Out),
            scale: ScalarTween::new(0.2, MESH_SCALE as f64, ENTRANCE_SECS, Ease::BackOut(1.4)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: PerspectiveCamera,
    pub mesh: Transform,
    pub material: Material,
    pub geometry: MeshData,
    pub light: PointLight,
    pub ambient: AmbientLight,
    pub particles: ParticleField,
    spin: f32,
    entrance: Entrance,
}

impl SceneState {
    pub fn new(aspect: f32, particle_count: usize, particle_extent: f32, rng: &mut impl Rng) -> Self {
        let mut camera = PerspectiveCamera::new(50.0, aspect, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 6.0);
        let entrance = Entrance::new();
        Self {
            camera,
            mesh: Transform {
                position: Vec3::ZERO,
                rotation: Vec3::new(entrance.rot_x.from as f32, entrance.rot_y.from as f32, 0.0),
                scale: Vec3::splat(entrance.scale.from as f32),
            },
            material: Material {
                color: hex_color(0x1565d8),
                emissive: hex_color(0x072144),
                metalness: 0.6,
                roughness: 0.2,
                opacity: 0.95,
            },
            geometry: geometry::torus_knot(0.9, 0.28, 150, 20, 2, 3),
            light: PointLight {
                position: Vec3::new(4.0, 4.0, 6.0),
                color: hex_color(0xa8c8ff),
                intensity: 1.2,
            },
            ambient: AmbientLight { color: Vec3::ONE, intensity: 0.25 },
            particles: ParticleField::scatter(particle_count, particle_extent, rng),
            spin: 0.0,
            entrance,
        }
    }

    /// Advance one frame at `elapsed` seconds since the clock started.
    pub fn update(&mut self, elapsed: f64) {
        let t = elapsed as f32;
        self.spin += SPIN_PER_FRAME;

        let e = &self.entrance;
        self.mesh.rotation.y = self.spin + e.rot_y.value_at(elapsed) as f32;
        self.mesh.rotation.x = (t * 0.4).sin() * 0.12 + e.rot_x.value_at(elapsed) as f32;
        self.mesh.position.y = (t * 0.6).sin() * 0.06;
        self.mesh.scale = Vec3::splat(e.scale.value_at(elapsed) as f32);

        self.light.position.x = (t * 0.6).cos() * 4.0;
        self.light.position.y = (t * 0.4).sin() * 3.0;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
        self.camera.update_projection_matrix();
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.mesh.matrix()
    }

    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.model_matrix()).inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn scene() -> SceneState {
        SceneState::new(16.0 / 9.0, 200, 12.0, &mut SmallRng::seed_from_u64(3))
    }

    #[test]
    fn starts_in_entrance_pose() {
        let s = scene();
        assert_eq!(s.mesh.scale, Vec3::splat(0.2));
        assert_eq!(s.mesh.rotation.y, -1.2);
        assert_eq!(s.camera.position, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(s.particles.len(), 200);
    }

    #[test]
    fn settles_after_entrance() {
        let mut s = scene();
        s.update(2.0);
        assert!((s.mesh.scale.x - 0.9).abs() < 1e-6);
        assert!((s.mesh.rotation.y - SPIN_PER_FRAME).abs() < 1e-6);
        assert!((s.mesh.rotation.x - (0.8f32).sin() * 0.12).abs() < 1e-6);
    }

    #[test]
    fn spin_accumulates_per_frame() {
        let mut s = scene();
        for _ in 0..10 {
            s.update(5.0);
        }
        assert!((s.mesh.rotation.y - 10.0 * SPIN_PER_FRAME).abs() < 1e-5);
    }

    #[test]
    fn bob_and_light_orbit() {
        let mut s = scene();
        let t = 3.0f32;
        s.update(t as f64);
        assert!((s.mesh.position.y - (t * 0.6).sin() * 0.06).abs() < 1e-6);
        assert!((s.light.position.x - (t * 0.6).cos() * 4.0).abs() < 1e-6);
        assert!((s.light.position.y - (t * 0.4).sin() * 3.0).abs() < 1e-6);
        assert_eq!(s.light.position.z, 6.0);
    }

    #[test]
    fn oscillations_stay_bounded() {
        let mut s = scene();
        for i in 0..500 {
            s.update(2.0 + i as f64 * 0.05);
            assert!(s.mesh.rotation.x.abs() <= 0.12 + 1e-6);
            assert!(s.mesh.position.y.abs() <= 0.06 + 1e-6);
        }
    }

    #[test]
    fn hex_colors() {
        assert_eq!(hex_color(0xffffff), Vec3::ONE);
        assert_eq!(hex_color(0xff0000), Vec3::X);
    }

    #[test]
    fn normal_matrix_undoes_uniform_scale() {
        let mut s = scene();
        s.update(2.0);
        let n = s.normal_matrix() * Vec3::Z;
        let m = Mat3::from_mat4(s.model_matrix()) * Vec3::Z;
        assert!(n.normalize().dot(m.normalize()) > 0.999);
    }
}
