//! CPU mesh primitives: vertex formats and a builder for spheres,
//! cylinders and swept tubes.

use glam::Vec3;
use rustc_hash::FxHashMap;

// ==================== VERTEX FORMATS ====================

/// 36-byte lit mesh vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

impl MeshVertex {
    /// Vertex buffer layout matching `mesh.wgsl`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x3,
        ];
        wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// 24-byte unlit line vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

impl LineVertex {
    /// Vertex buffer layout matching `line.wgsl`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
        ];
        wgpu::VertexBufferLayout {
            array_stride: size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

// ==================== UNIT SPHERE ====================

/// Unit icosphere, generated once and instanced by translation + scale.
#[derive(Debug, Clone)]
pub struct UnitSphere {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl UnitSphere {
    /// Subdivide an icosahedron `subdivisions` times.
    #[must_use]
    pub fn new(subdivisions: u32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let mut positions: Vec<Vec3> = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ]
        .into_iter()
        .map(|p| Vec3::from(p).normalize())
        .collect();

        let mut indices: Vec<u32> = vec![
            0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4,
            11, 10, 2, 10, 7, 6, 7, 1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8,
            3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
        ];

        for _ in 0..subdivisions {
            let mut midpoints: FxHashMap<(u32, u32), u32> = FxHashMap::default();
            let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let mid = (positions[a as usize] + positions[b as usize])
                        .normalize();
                    positions.push(mid);
                    (positions.len() - 1) as u32
                })
            };

            let mut next = Vec::with_capacity(indices.len() * 4);
            for tri in indices.chunks_exact(3) {
                let (a, b, c) = (tri[0], tri[1], tri[2]);
                let ab = midpoint(a, b, &mut positions);
                let bc = midpoint(b, c, &mut positions);
                let ca = midpoint(c, a, &mut positions);
                next.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
            }
            indices = next;
        }

        Self { positions, indices }
    }

    /// Number of vertices per sphere.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

// ==================== BUILDER ====================

/// Accumulates indexed triangles.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    /// Vertices so far.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshBuilder {
    fn base(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Append a sphere instance.
    pub fn add_sphere(
        &mut self,
        unit: &UnitSphere,
        center: Vec3,
        radius: f32,
        color: [f32; 3],
    ) {
        let base = self.base();
        self.vertices.extend(unit.positions.iter().map(|&n| MeshVertex {
            position: (center + n * radius).to_array(),
            normal: n.to_array(),
            color,
        }));
        self.indices.extend(unit.indices.iter().map(|&i| base + i));
    }

    /// Append an open cylinder from `a` to `b`.
    pub fn add_cylinder(
        &mut self,
        a: Vec3,
        b: Vec3,
        radius: f32,
        color: [f32; 3],
        segments: u32,
    ) {
        let axis = b - a;
        if axis.length_squared() < 1e-10 {
            return;
        }
        let (u, v) = axis.normalize().any_orthonormal_pair();
        let segments = segments.max(3);
        let base = self.base();

        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let normal = u * angle.cos() + v * angle.sin();
            for end in [a, b] {
                self.vertices.push(MeshVertex {
                    position: (end + normal * radius).to_array(),
                    normal: normal.to_array(),
                    color,
                });
            }
        }
        for i in 0..segments {
            let j = (i + 1) % segments;
            let (a0, b0) = (base + 2 * i, base + 2 * i + 1);
            let (a1, b1) = (base + 2 * j, base + 2 * j + 1);
            self.indices.extend_from_slice(&[a0, a1, b0, b0, a1, b1]);
        }
    }

    /// Sweep a circular cross-section along a framed path.
    ///
    /// `rings[i]` is `(center, normal, binormal, color)`. Consecutive rings
    /// are stitched into quads; the ends are left open.
    pub fn add_tube(
        &mut self,
        rings: &[(Vec3, Vec3, Vec3, [f32; 3])],
        radius: f32,
        segments: u32,
    ) {
        if rings.len() < 2 {
            return;
        }
        let segments = segments.max(3);
        let base = self.base();

        for &(center, normal, binormal, color) in rings {
            for k in 0..segments {
                let angle = k as f32 / segments as f32 * std::f32::consts::TAU;
                let dir = normal * angle.cos() + binormal * angle.sin();
                self.vertices.push(MeshVertex {
                    position: (center + dir * radius).to_array(),
                    normal: dir.to_array(),
                    color,
                });
            }
        }
        for ring in 0..rings.len() as u32 - 1 {
            let row = base + ring * segments;
            let next = row + segments;
            for k in 0..segments {
                let k1 = (k + 1) % segments;
                self.indices.extend_from_slice(&[
                    row + k,
                    next + k,
                    row + k1,
                    row + k1,
                    next + k,
                    next + k1,
                ]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_sizes_match_layouts() {
        assert_eq!(size_of::<MeshVertex>(), 36);
        assert_eq!(size_of::<LineVertex>(), 24);
        assert_eq!(MeshVertex::layout().array_stride, 36);
        assert_eq!(LineVertex::layout().array_stride, 24);
    }

    #[test]
    fn icosphere_vertex_counts() {
        assert_eq!(UnitSphere::new(0).vertex_count(), 12);
        assert_eq!(UnitSphere::new(1).vertex_count(), 42);
        assert_eq!(UnitSphere::new(2).vertex_count(), 162);
        let sphere = UnitSphere::new(2);
        assert_eq!(sphere.indices.len(), 20 * 16 * 3);
        assert!(sphere
            .positions
            .iter()
            .all(|p| (p.length() - 1.0).abs() < 1e-5));
    }

    #[test]
    fn sphere_is_placed_and_scaled() {
        let unit = UnitSphere::new(1);
        let mut mesh = MeshBuilder::default();
        mesh.add_sphere(&unit, Vec3::new(5.0, 0.0, 0.0), 2.0, [1.0, 0.0, 0.0]);
        mesh.add_sphere(&unit, Vec3::ZERO, 1.0, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.vertices.len(), 84);
        assert!(mesh.vertices[..42].iter().all(|v| {
            let r = (Vec3::from(v.position) - Vec3::new(5.0, 0.0, 0.0)).length();
            (r - 2.0).abs() < 1e-4
        }));
        assert!(mesh.indices[unit.indices.len()..].iter().all(|&i| i >= 42));
    }

    #[test]
    fn cylinder_spans_its_endpoints() {
        let mut mesh = MeshBuilder::default();
        mesh.add_cylinder(Vec3::ZERO, Vec3::Z * 2.0, 0.5, [1.0; 3], 8);
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.indices.len(), 8 * 6);
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            assert!((p.truncate().length() - 0.5).abs() < 1e-5);
            assert!(p.z == 0.0 || (p.z - 2.0).abs() < 1e-5);
        }

        mesh.add_cylinder(Vec3::ONE, Vec3::ONE, 0.5, [1.0; 3], 8);
        assert_eq!(mesh.vertices.len(), 16);
    }

    #[test]
    fn tube_stitches_rings() {
        let rings: Vec<_> = (0..4)
            .map(|i| (Vec3::X * i as f32, Vec3::Y, Vec3::Z, [1.0; 3]))
            .collect();
        let mut mesh = MeshBuilder::default();
        mesh.add_tube(&rings, 0.3, 6);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 3 * 6 * 6);
        assert!(mesh.indices.iter().all(|&i| i < 24));
    }
}
