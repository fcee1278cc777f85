//! Distance-based bond inference.
//!
//! Two atoms are bonded when their distance is at most the sum of their
//! covalent radii plus a tolerance. Atoms are bucketed into a uniform grid
//! so each atom is only compared against its 27 neighboring cells.

use glam::Vec3;
use rustc_hash::FxHashMap;

use super::{Element, Structure};

/// Default tolerance for bond inference (angstroms).
pub const DEFAULT_TOLERANCE: f32 = 0.45;

/// Pairs closer than this are overlapping duplicates, not bonds.
const MIN_BOND_LENGTH: f32 = 0.4;

/// An inferred bond between two atoms (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    /// Index of the first atom.
    pub a: usize,
    /// Index of the second atom.
    pub b: usize,
}

type Cell = (i32, i32, i32);

fn cell_of(position: Vec3, cell_size: f32) -> Cell {
    let c = (position / cell_size).floor();
    (c.x as i32, c.y as i32, c.z as i32)
}

/// Infer covalent bonds for every atom in the structure.
///
/// Hydrogens never bond to each other, and ions are left unbonded.
#[must_use]
pub fn infer_bonds(structure: &Structure, tolerance: f32) -> Vec<Bond> {
    let atoms = &structure.atoms;
    if atoms.len() < 2 {
        return Vec::new();
    }

    let max_radius = atoms
        .iter()
        .map(|a| a.element.covalent_radius())
        .fold(0.0_f32, f32::max);
    let cell_size = (2.0 * max_radius + tolerance).max(1.0);

    let mut grid: FxHashMap<Cell, Vec<usize>> = FxHashMap::default();
    for (i, atom) in atoms.iter().enumerate() {
        if atom.element.is_ion() {
            continue;
        }
        grid.entry(cell_of(atom.position, cell_size))
            .or_default()
            .push(i);
    }

    let mut bonds = Vec::new();
    for (i, atom) in atoms.iter().enumerate() {
        if atom.element.is_ion() {
            continue;
        }
        let (cx, cy, cz) = cell_of(atom.position, cell_size);
        let radius_i = atom.element.covalent_radius();

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = grid.get(&(cx + dx, cy + dy, cz + dz))
                    else {
                        continue;
                    };
                    for &j in bucket.iter().filter(|&&j| j > i) {
                        let other = &atoms[j];
                        if atom.element == Element::H
                            && other.element == Element::H
                        {
                            continue;
                        }
                        let dist = atom.position.distance(other.position);
                        let limit = radius_i
                            + other.element.covalent_radius()
                            + tolerance;
                        if dist > MIN_BOND_LENGTH && dist <= limit {
                            bonds.push(Bond { a: i, b: j });
                        }
                    }
                }
            }
        }
    }

    bonds.sort_unstable_by_key(|bond| (bond.a, bond.b));
    bonds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Atom, Residue};

    fn structure(atoms: &[(Element, [f32; 3])]) -> Structure {
        Structure {
            atoms: atoms
                .iter()
                .map(|&(element, p)| Atom {
                    name: "X".into(),
                    element,
                    position: Vec3::from(p),
                    residue: 0,
                    hetero: true,
                })
                .collect(),
            residues: vec![Residue {
                name: "LIG".into(),
                serial: 1,
                chain: "A".into(),
            }],
        }
    }

    #[test]
    fn simple_bond() {
        let s = structure(&[
            (Element::C, [0.0, 0.0, 0.0]),
            (Element::C, [1.5, 0.0, 0.0]),
        ]);
        assert_eq!(infer_bonds(&s, DEFAULT_TOLERANCE), vec![Bond { a: 0, b: 1 }]);
    }

    #[test]
    fn no_bond_far_apart() {
        let s = structure(&[
            (Element::C, [0.0, 0.0, 0.0]),
            (Element::C, [5.0, 0.0, 0.0]),
        ]);
        assert!(infer_bonds(&s, DEFAULT_TOLERANCE).is_empty());
    }

    #[test]
    fn hydrogens_do_not_bond_each_other() {
        let s = structure(&[
            (Element::H, [0.0, 0.0, 0.0]),
            (Element::H, [0.74, 0.0, 0.0]),
            (Element::O, [0.0, 0.96, 0.0]),
        ]);
        let bonds = infer_bonds(&s, DEFAULT_TOLERANCE);
        assert_eq!(bonds, vec![Bond { a: 0, b: 2 }, Bond { a: 1, b: 2 }]);
    }

    #[test]
    fn ions_and_overlaps_are_skipped() {
        let s = structure(&[
            (Element::Zn, [0.0, 0.0, 0.0]),
            (Element::N, [2.0, 0.0, 0.0]),
            (Element::C, [10.0, 0.0, 0.0]),
            (Element::C, [10.1, 0.0, 0.0]),
        ]);
        assert!(infer_bonds(&s, DEFAULT_TOLERANCE).is_empty());
    }

    #[test]
    fn bonds_across_cell_boundaries_are_found() {
        // Straddle a grid boundary at every axis.
        let s = structure(&[
            (Element::C, [-0.7, -0.7, -0.7]),
            (Element::C, [0.1, 0.1, 0.1]),
        ]);
        assert_eq!(infer_bonds(&s, DEFAULT_TOLERANCE).len(), 1);
    }
}
