//! Fixed stand-in shapes
//!
//! All shapes are Y-up, rest on the `y = 0` plane and fit in a
//! `size`-wide footprint. Triangles wind counter-clockwise seen from outside.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

const SEGMENTS: u32 = 24;
const SPHERE_RINGS: u32 = 12;

/// Shape used for a placeholder asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Flattened sphere
    Dome,
    /// Low block with a cone roof
    Temple,
    /// Block, drum and spire stacked
    Tower,
    /// Upright disc
    Wheel,
    #[default]
    Box,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Dome,
        ShapeKind::Temple,
        ShapeKind::Tower,
        ShapeKind::Wheel,
        ShapeKind::Box,
    ];

    /// Build the mesh for this shape
    pub fn build(self, size: f32) -> Mesh {
        match self {
            ShapeKind::Dome => dome(size),
            ShapeKind::Temple => temple(size),
            ShapeKind::Tower => tower(size),
            ShapeKind::Wheel => wheel(size),
            ShapeKind::Box => cube(size),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Dome => "dome",
            ShapeKind::Temple => "temple",
            ShapeKind::Tower => "tower",
            ShapeKind::Wheel => "wheel",
            ShapeKind::Box => "box",
        }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        if self.positions.is_empty() {
            ([0.0; 3], [0.0; 3])
        } else {
            (min, max)
        }
    }

    pub fn translated(mut self, offset: [f32; 3]) -> Self {
        for p in &mut self.positions {
            p[0] += offset[0];
            p[1] += offset[1];
            p[2] += offset[2];
        }
        self
    }

    pub fn scaled(mut self, factor: [f32; 3]) -> Self {
        for p in &mut self.positions {
            p[0] *= factor[0];
            p[1] *= factor[1];
            p[2] *= factor[2];
        }
        self
    }

    /// Rotate a quarter turn about +X, taking +Y to +Z
    pub fn rotated_x_quarter(mut self) -> Self {
        for p in &mut self.positions {
            *p = [p[0], -p[2], p[1]];
        }
        self
    }

    /// Append another mesh, offsetting its indices
    pub fn merge(mut self, other: Mesh) -> Self {
        let offset = self.positions.len() as u32;
        self.positions.extend(other.positions);
        self.indices.extend(other.indices.into_iter().map(|i| i + offset));
        self
    }
}

fn dome(size: f32) -> Mesh {
    uv_sphere(size / 2.0, SPHERE_RINGS, SEGMENTS)
        .scaled([1.0, 0.5, 1.0])
        .translated([0.0, size / 4.0, 0.0])
}

fn temple(size: f32) -> Mesh {
    let base_height = size / 3.0;
    let roof_height = size / 2.0;

    cuboid([size, base_height, size])
        .translated([0.0, base_height / 2.0, 0.0])
        .merge(cone(size / 2.0, roof_height, SEGMENTS).translated([0.0, base_height + roof_height / 2.0, 0.0]))
}

fn tower(size: f32) -> Mesh {
    let tier = size / 2.0;

    cuboid([size, tier, size])
        .translated([0.0, tier / 2.0, 0.0])
        .merge(cylinder(size / 3.0, tier, SEGMENTS).translated([0.0, tier * 1.5, 0.0]))
        .merge(cone(size / 4.0, tier, SEGMENTS).translated([0.0, tier * 2.5, 0.0]))
}

fn wheel(size: f32) -> Mesh {
    cylinder(size / 2.0, size / 4.0, SEGMENTS)
        .rotated_x_quarter()
        .translated([0.0, size / 2.0, 0.0])
}

fn cube(size: f32) -> Mesh {
    cuboid([size, size, size]).translated([0.0, size / 2.0, 0.0])
}

/// Box centered on the origin
fn cuboid(extents: [f32; 3]) -> Mesh {
    let half = [extents[0] / 2.0, extents[1] / 2.0, extents[2] / 2.0];
    // Vertex i has x, y, z bits in positions 0, 1, 2.
    let positions = (0..8u32)
        .map(|i| {
            [
                if i & 1 == 0 { -half[0] } else { half[0] },
                if i & 2 == 0 { -half[1] } else { half[1] },
                if i & 4 == 0 { -half[2] } else { half[2] },
            ]
        })
        .collect();

    #[rustfmt::skip]
    let indices = vec![
        0, 4, 6,  0, 6, 2, // -X
        1, 3, 7,  1, 7, 5, // +X
        0, 1, 5,  0, 5, 4, // -Y
        2, 6, 7,  2, 7, 3, // +Y
        0, 2, 3,  0, 3, 1, // -Z
        4, 5, 7,  4, 7, 6, // +Z
    ];

    Mesh { positions, indices }
}

fn ring(radius: f32, y: f32, segments: u32) -> impl Iterator<Item = [f32; 3]> {
    (0..segments).map(move |i| {
        let theta = TAU * i as f32 / segments as f32;
        [radius * theta.cos(), y, radius * theta.sin()]
    })
}

/// Capped cylinder along Y, centered on the origin
fn cylinder(radius: f32, height: f32, segments: u32) -> Mesh {
    let n = segments;
    let half = height / 2.0;

    let mut positions: Vec<[f32; 3]> = ring(radius, -half, n).collect();
    positions.extend(ring(radius, half, n));
    let bottom_center = 2 * n;
    let top_center = 2 * n + 1;
    positions.push([0.0, -half, 0.0]);
    positions.push([0.0, half, 0.0]);

    let mut indices = Vec::with_capacity(n as usize * 12);
    for i in 0..n {
        let next = (i + 1) % n;
        let (b0, b1, t0, t1) = (i, next, n + i, n + next);
        indices.extend([b0, t1, b1, b0, t0, t1]);
        indices.extend([top_center, t1, t0]);
        indices.extend([bottom_center, b0, b1]);
    }

    Mesh { positions, indices }
}

/// Closed cone along Y, centered on the origin, apex up
fn cone(radius: f32, height: f32, segments: u32) -> Mesh {
    let n = segments;
    let half = height / 2.0;

    let mut positions: Vec<[f32; 3]> = ring(radius, -half, n).collect();
    let apex = n;
    let base_center = n + 1;
    positions.push([0.0, half, 0.0]);
    positions.push([0.0, -half, 0.0]);

    let mut indices = Vec::with_capacity(n as usize * 6);
    for i in 0..n {
        let next = (i + 1) % n;
        indices.extend([i, apex, next]);
        indices.extend([base_center, i, next]);
    }

    Mesh { positions, indices }
}

/// Sphere with single-vertex poles, centered on the origin
fn uv_sphere(radius: f32, rings: u32, segments: u32) -> Mesh {
    let n = segments;
    let mut positions = vec![[0.0, radius, 0.0]];
    for j in 1..rings {
        let phi = PI * j as f32 / rings as f32;
        positions.extend(ring(radius * phi.sin(), radius * phi.cos(), n));
    }
    let bottom = positions.len() as u32;
    positions.push([0.0, -radius, 0.0]);

    let ring_start = |j: u32| 1 + (j - 1) * n;
    let mut indices = Vec::new();

    for i in 0..n {
        let next = (i + 1) % n;
        indices.extend([0, ring_start(1) + next, ring_start(1) + i]);
    }
    for j in 1..rings - 1 {
        let (upper, lower) = (ring_start(j), ring_start(j + 1));
        for i in 0..n {
            let next = (i + 1) % n;
            indices.extend([lower + i, upper + next, lower + next]);
            indices.extend([lower + i, upper + i, upper + next]);
        }
    }
    let last = ring_start(rings - 1);
    for i in 0..n {
        let next = (i + 1) % n;
        indices.extend([bottom, last + i, last + next]);
    }

    Mesh { positions, indices }
}
