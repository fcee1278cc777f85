//! Style-specific scene geometry, built on the CPU.
//!
//! [`SceneGeometry::build`] turns a parsed [`Structure`] and a
//! [`StyleConfig`] into one triangle mesh and one line list. Only the chosen
//! style contributes geometry.

use glam::Vec3;

use super::cartoon::add_trace_tube;
use super::mesh::{LineVertex, MeshBuilder, MeshVertex, UnitSphere};
use super::spectrum::atom_colors;
use super::RenderError;
use crate::options::GeometryOptions;
use crate::source::StructureText;
use crate::structure::bonds::{infer_bonds, Bond};
use crate::structure::{Structure, StructureError};
use crate::style::{Style, StyleConfig};

/// Bounding sphere of the drawn model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Center of the atom bounding box.
    pub center: Vec3,
    /// Distance from `center` to the farthest atom, plus the style's extent.
    pub radius: f32,
}

impl Bounds {
    /// Bounding sphere of `positions` grown by `margin`.
    #[must_use]
    pub fn from_positions(positions: &[Vec3], margin: f32) -> Option<Self> {
        let first = *positions.first()?;
        let (min, max) = positions
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        let center = (min + max) * 0.5;
        let radius = positions
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);
        Some(Self {
            center,
            radius: radius + margin,
        })
    }
}

/// Everything the GPU needs to draw one structure in one style.
#[derive(Debug, Clone)]
pub struct SceneGeometry {
    /// Lit triangles (cartoon, stick, sphere).
    pub mesh_vertices: Vec<MeshVertex>,
    /// Triangle list indices into `mesh_vertices`.
    pub mesh_indices: Vec<u32>,
    /// Line-list vertex pairs (line, cross).
    pub line_vertices: Vec<LineVertex>,
    /// Region the camera frames.
    pub bounds: Bounds,
}

impl SceneGeometry {
    /// Parse `text` and build its geometry.
    ///
    /// # Errors
    ///
    /// [`RenderError::Structure`] when the text does not parse or holds no
    /// atoms.
    pub fn from_text(
        text: &StructureText,
        config: &StyleConfig,
        geometry: &GeometryOptions,
    ) -> Result<Self, RenderError> {
        Self::from_text_within(text, config, geometry, u64::MAX)
    }

    /// Like [`from_text`](Self::from_text), but every buffer must fit in
    /// `max_buffer_bytes`.
    ///
    /// Sphere style drops icosphere subdivision levels until the mesh fits.
    ///
    /// # Errors
    ///
    /// [`RenderError::Structure`] as for `from_text`;
    /// [`RenderError::TooLarge`] when the scene cannot be made to fit.
    pub fn from_text_within(
        text: &StructureText,
        config: &StyleConfig,
        geometry: &GeometryOptions,
        max_buffer_bytes: u64,
    ) -> Result<Self, RenderError> {
        let structure = Structure::parse(text.as_str())?;
        let mut geometry = geometry.clone();
        loop {
            let scene = Self::build(&structure, config, &geometry)
                .ok_or(RenderError::Structure(StructureError::NoAtoms))?;
            let bytes = scene.largest_buffer_bytes();
            if bytes <= max_buffer_bytes {
                return Ok(scene);
            }
            if config.style != Style::Sphere || geometry.sphere_subdivisions == 0
            {
                return Err(RenderError::TooLarge {
                    bytes,
                    limit: max_buffer_bytes,
                });
            }
            geometry.sphere_subdivisions -= 1;
            log::warn!(
                "Sphere mesh needs {bytes} bytes (limit {max_buffer_bytes}), \
                 retrying at subdivision level {}",
                geometry.sphere_subdivisions
            );
        }
    }

    /// Build geometry for `config.style` only, colored by `config.color`.
    ///
    /// Returns `None` for a structure with no atoms.
    #[must_use]
    pub fn build(
        structure: &Structure,
        config: &StyleConfig,
        geometry: &GeometryOptions,
    ) -> Option<Self> {
        let positions = structure.positions();
        let colors = atom_colors(structure, config.color);
        let mut mesh = MeshBuilder::default();
        let mut lines = Vec::new();

        let margin = match config.style {
            Style::Cartoon => {
                add_cartoon(structure, &colors, geometry, &mut mesh);
                geometry.cartoon_radius
            }
            Style::Line => {
                let bonds = infer_bonds(structure, geometry.bond_tolerance);
                add_bond_lines(&positions, &colors, &bonds, &mut lines);
                let lone = unbonded_atoms(positions.len(), &bonds);
                add_crosses(&positions, &colors, &lone, geometry, &mut lines);
                geometry.cross_half_length
            }
            Style::Cross => {
                let all: Vec<usize> = (0..positions.len()).collect();
                add_crosses(&positions, &colors, &all, geometry, &mut lines);
                geometry.cross_half_length
            }
            Style::Stick => {
                let bonds = infer_bonds(structure, geometry.bond_tolerance);
                add_sticks(&positions, &colors, &bonds, geometry, &mut mesh);
                geometry.stick_radius
            }
            Style::Sphere => {
                add_spheres(structure, &colors, geometry, &mut mesh);
                structure
                    .atoms
                    .iter()
                    .map(|a| a.element.vdw_radius() * geometry.sphere_scale)
                    .fold(0.0_f32, f32::max)
            }
        };

        let bounds = Bounds::from_positions(&positions, margin)?;
        log::debug!(
            "Built {} scene: {} triangles, {} line segments",
            config.style,
            mesh.indices.len() / 3,
            lines.len() / 2
        );
        Some(Self {
            mesh_vertices: mesh.vertices,
            mesh_indices: mesh.indices,
            line_vertices: lines,
            bounds,
        })
    }

    /// Whether nothing would be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mesh_indices.is_empty() && self.line_vertices.is_empty()
    }

    /// Size of the largest GPU buffer this scene fills.
    #[must_use]
    pub fn largest_buffer_bytes(&self) -> u64 {
        [
            size_of_val(self.mesh_vertices.as_slice()),
            size_of_val(self.mesh_indices.as_slice()),
            size_of_val(self.line_vertices.as_slice()),
        ]
        .into_iter()
        .max()
        .map_or(0, |bytes| bytes as u64)
    }
}

fn add_cartoon(
    structure: &Structure,
    colors: &[[f32; 3]],
    geometry: &GeometryOptions,
    mesh: &mut MeshBuilder,
) {
    for trace in structure.backbone_traces() {
        let points: Vec<Vec3> =
            trace.iter().map(|&i| structure.atoms[i].position).collect();
        let trace_colors: Vec<[f32; 3]> = trace.iter().map(|&i| colors[i]).collect();
        add_trace_tube(
            mesh,
            &points,
            &trace_colors,
            geometry.cartoon_radius,
            geometry.cartoon_segments as usize,
            geometry.radial_segments,
        );
    }
}

/// Each bond becomes two segments meeting at its midpoint, one per atom
/// color.
fn add_bond_lines(
    positions: &[Vec3],
    colors: &[[f32; 3]],
    bonds: &[Bond],
    lines: &mut Vec<LineVertex>,
) {
    for bond in bonds {
        let (a, b) = (positions[bond.a], positions[bond.b]);
        let mid = (a + b) * 0.5;
        for (end, color) in [(a, colors[bond.a]), (b, colors[bond.b])] {
            lines.push(LineVertex {
                position: end.to_array(),
                color,
            });
            lines.push(LineVertex {
                position: mid.to_array(),
                color,
            });
        }
    }
}

fn unbonded_atoms(count: usize, bonds: &[Bond]) -> Vec<usize> {
    let mut bonded = vec![false; count];
    for bond in bonds {
        bonded[bond.a] = true;
        bonded[bond.b] = true;
    }
    (0..count).filter(|&i| !bonded[i]).collect()
}

fn add_crosses(
    positions: &[Vec3],
    colors: &[[f32; 3]],
    atoms: &[usize],
    geometry: &GeometryOptions,
    lines: &mut Vec<LineVertex>,
) {
    let h = geometry.cross_half_length;
    for &i in atoms {
        let (p, color) = (positions[i], colors[i]);
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            lines.push(LineVertex {
                position: (p - axis * h).to_array(),
                color,
            });
            lines.push(LineVertex {
                position: (p + axis * h).to_array(),
                color,
            });
        }
    }
}

fn add_sticks(
    positions: &[Vec3],
    colors: &[[f32; 3]],
    bonds: &[Bond],
    geometry: &GeometryOptions,
    mesh: &mut MeshBuilder,
) {
    let r = geometry.stick_radius;
    for bond in bonds {
        let (a, b) = (positions[bond.a], positions[bond.b]);
        let mid = (a + b) * 0.5;
        mesh.add_cylinder(a, mid, r, colors[bond.a], geometry.radial_segments);
        mesh.add_cylinder(mid, b, r, colors[bond.b], geometry.radial_segments);
    }
    let cap = UnitSphere::new(geometry.sphere_subdivisions.min(1));
    for (&p, &color) in positions.iter().zip(colors) {
        mesh.add_sphere(&cap, p, r, color);
    }
}

fn add_spheres(
    structure: &Structure,
    colors: &[[f32; 3]],
    geometry: &GeometryOptions,
    mesh: &mut MeshBuilder,
) {
    let unit = UnitSphere::new(geometry.sphere_subdivisions);
    for (atom, &color) in structure.atoms.iter().zip(colors) {
        let radius = atom.element.vdw_radius() * geometry.sphere_scale;
        mesh.add_sphere(&unit, atom.position, radius, color);
    }
}
