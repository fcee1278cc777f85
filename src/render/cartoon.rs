//! Smooth backbone tube through a trace of CA/P atoms.
//!
//! The trace is interpolated with a Catmull-Rom spline (which passes through
//! every control point) and framed with rotation-minimizing frames so the
//! swept cross-section does not twist.

use glam::Vec3;

use super::mesh::MeshBuilder;

/// A point along the spline with position, tangent, and frame vectors.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SplinePoint {
    pub pos: Vec3,
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

/// Catmull-Rom spline interpolation (passes through all control points).
pub(crate) fn catmull_rom(points: &[Vec3], segments_per_span: usize) -> Vec<Vec3> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }
    let segments_per_span = segments_per_span.max(1);
    let mut result = Vec::with_capacity((n - 1) * segments_per_span + 1);

    for i in 0..n - 1 {
        let p0 = if i == 0 {
            points[0] * 2.0 - points[1]
        } else {
            points[i - 1]
        };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = if i + 2 >= n {
            points[n - 1] * 2.0 - points[n - 2]
        } else {
            points[i + 2]
        };

        for j in 0..segments_per_span {
            let t = j as f32 / segments_per_span as f32;
            let t2 = t * t;
            let t3 = t2 * t;

            let pos = 0.5
                * ((2.0 * p1)
                    + (-p0 + p2) * t
                    + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                    + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3);
            result.push(pos);
        }
    }

    result.push(points[n - 1]);
    result
}

/// Finite-difference tangents, falling back to the previous tangent where
/// neighbors coincide.
fn spline_points(positions: &[Vec3]) -> Vec<SplinePoint> {
    let n = positions.len();
    let mut last = Vec3::X;
    (0..n)
        .map(|i| {
            let prev = positions[i.saturating_sub(1)];
            let next = positions[(i + 1).min(n - 1)];
            let tangent = (next - prev).try_normalize().unwrap_or(last);
            last = tangent;
            SplinePoint {
                pos: positions[i],
                tangent,
                normal: Vec3::ZERO,
                binormal: Vec3::ZERO,
            }
        })
        .collect()
}

/// Compute Rotation Minimizing Frames using the double reflection method
/// (Wang et al. 2008).
pub(crate) fn compute_rmf(points: &mut [SplinePoint]) {
    if points.is_empty() {
        return;
    }

    let t0 = points[0].tangent;
    let arbitrary = if t0.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let n0 = t0.cross(arbitrary).normalize();
    let b0 = t0.cross(n0).normalize();

    points[0].normal = n0;
    points[0].binormal = b0;

    for i in 0..points.len() - 1 {
        let x_i = points[i].pos;
        let x_i1 = points[i + 1].pos;
        let t_i = points[i].tangent;
        let t_i1 = points[i + 1].tangent;
        let r_i = points[i].normal;

        let v1 = x_i1 - x_i;
        let c1 = v1.dot(v1);

        if c1 < 1e-10 {
            points[i + 1].normal = r_i;
            points[i + 1].binormal = points[i].binormal;
            continue;
        }

        // First reflection
        let r_i_l = r_i - (2.0 / c1) * v1.dot(r_i) * v1;
        let t_i_l = t_i - (2.0 / c1) * v1.dot(t_i) * v1;

        // Second reflection
        let v2 = t_i1 - t_i_l;
        let c2 = v2.dot(v2);

        let r_i1 = if c2 < 1e-10 {
            r_i_l
        } else {
            r_i_l - (2.0 / c2) * v2.dot(r_i_l) * v2
        };

        // Ensure orthonormality
        let r_i1 = (r_i1 - t_i1 * t_i1.dot(r_i1)).normalize_or(r_i);
        let s_i1 = t_i1.cross(r_i1).normalize_or(points[i].binormal);

        points[i + 1].normal = r_i1;
        points[i + 1].binormal = s_i1;
    }
}

/// Append a tube through `trace` to `mesh`.
///
/// `colors[i]` belongs to control point `i`; samples between two control
/// points blend their colors.
pub(crate) fn add_trace_tube(
    mesh: &mut MeshBuilder,
    trace: &[Vec3],
    colors: &[[f32; 3]],
    radius: f32,
    segments_per_span: usize,
    radial_segments: u32,
) {
    if trace.len() < 2 || colors.len() != trace.len() {
        return;
    }
    let segments_per_span = segments_per_span.max(1);
    let mut points = spline_points(&catmull_rom(trace, segments_per_span));
    compute_rmf(&mut points);

    let last_span = trace.len() - 2;
    let rings: Vec<_> = points
        .iter()
        .enumerate()
        .map(|(k, p)| {
            let span = (k / segments_per_span).min(last_span);
            let t = (k - span * segments_per_span) as f32
                / segments_per_span as f32;
            let color = Vec3::from(colors[span])
                .lerp(Vec3::from(colors[span + 1]), t)
                .to_array();
            (p.pos, p.normal, p.binormal, color)
        })
        .collect();

    mesh.add_tube(&rings, radius, radial_segments);
}
