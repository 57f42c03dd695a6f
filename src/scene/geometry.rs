//! CPU-side geometry for the decorative scene.

use glam::Vec3;
use rand::Rng;

/// Indexed triangle mesh with per-vertex normals, flattened for upload.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// A (p, q) torus knot: a tube of radius `tube` swept along a curve that
/// winds `p` times around the axis of symmetry and `q` times through the hole.
pub fn torus_knot(radius: f32, tube: f32, tubular: u32, radial: u32, p: u32, q: u32) -> MeshData {
    let (pf, qf) = (p as f32, q as f32);
    let curve = |u: f32| {
        let qu_over_p = qf / pf * u;
        let cs = qu_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * qu_over_p.sin() * 0.5,
        )
    };

    let ring = radial as usize + 1;
    let mut mesh = MeshData {
        positions: Vec::with_capacity((tubular as usize + 1) * ring * 3),
        normals: Vec::with_capacity((tubular as usize + 1) * ring * 3),
        indices: Vec::with_capacity(tubular as usize * radial as usize * 6),
    };

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * pf * std::f32::consts::TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);

        // Frenet-like frame along the curve
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n).normalize();
        let n = b.cross(t).normalize();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * std::f32::consts::TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let vertex = p1 + n * cx + b * cy;
            let normal = (vertex - p1).normalize();
            mesh.positions.extend_from_slice(&vertex.to_array());
            mesh.normals.extend_from_slice(&normal.to_array());
        }
    }

    let ring = ring as u32;
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = ring * (j - 1) + (i - 1);
            let b = ring * j + (i - 1);
            let c = ring * j + i;
            let d = ring * (j - 1) + i;
            for idx in [a, b, d, b, c, d] {
                mesh.indices.push(idx);
            }
        }
    }
    mesh
}

/// A cloud of points scattered uniformly inside a cube of edge `extent`
/// centered on the origin.
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub positions: Vec<f32>,
    pub size: f32,
    pub opacity: f32,
}

impl ParticleField {
    pub fn scatter(count: usize, extent: f32, rng: &mut impl Rng) -> Self {
        let positions = (0..count * 3)
            .map(|_| (rng.random::<f32>() - 0.5) * extent)
            .collect();
        Self { positions, size: 0.03, opacity: 0.45 }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
