//! The atom model the renderer builds geometry from.
//!
//! Structure text is read with `pdbtbx` in loose mode. Only the first model
//! is kept, and within each residue only the first alternate conformer.

pub mod bonds;
mod element;

use std::fmt;
use std::io::BufReader;

use glam::Vec3;
use pdbtbx::{Format, ReadOptions, StrictnessLevel};

pub use element::Element;

/// Largest CA–CA (or P–P) distance treated as a continuous trace.
const MAX_TRACE_GAP: f32 = 4.3;
/// Largest P–P distance along a nucleic acid backbone.
const MAX_NUCLEIC_GAP: f32 = 8.0;

/// One atom of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name, e.g. `CA`.
    pub name: String,
    /// Chemical element.
    pub element: Element,
    /// Position in angstroms.
    pub position: Vec3,
    /// Index into [`Structure::residues`].
    pub residue: usize,
    /// Whether the record was `HETATM`.
    pub hetero: bool,
}

/// One residue of the model, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    /// Residue name, e.g. `ALA`.
    pub name: String,
    /// Residue sequence number.
    pub serial: isize,
    /// Chain identifier.
    pub chain: String,
}

/// Atoms and residues of a single model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    /// All atoms, in file order.
    pub atoms: Vec<Atom>,
    /// All residues, in file order.
    pub residues: Vec<Residue>,
}

/// Errors turning structure text into a [`Structure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The PDB reader rejected the text.
    Parse(String),
    /// The text parsed but holds no atoms.
    NoAtoms,
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "failed to parse PDB text: {msg}"),
            Self::NoAtoms => f.write_str("structure contains no atoms"),
        }
    }
}

impl std::error::Error for StructureError {}

impl Structure {
    /// Parse PDB text into the first model's atoms.
    ///
    /// # Errors
    ///
    /// [`StructureError::Parse`] when the reader fails,
    /// [`StructureError::NoAtoms`] when nothing is left to draw.
    pub fn parse(text: &str) -> Result<Self, StructureError> {
        let reader = BufReader::new(text.as_bytes());
        let (pdb, _warnings) = ReadOptions::new()
            .set_format(Format::Pdb)
            .set_level(StrictnessLevel::Loose)
            .read_raw(reader)
            .map_err(|errs| {
                StructureError::Parse(
                    errs.iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            })?;

        let model = pdb.model(0).ok_or(StructureError::NoAtoms)?;
        let mut structure = Self::default();

        for chain in model.chains() {
            for residue in chain.residues() {
                let Some(conformer) = residue.conformers().next() else {
                    continue;
                };
                let residue_index = structure.residues.len();
                structure.residues.push(Residue {
                    name: conformer.name().to_owned(),
                    serial: residue.serial_number(),
                    chain: chain.id().to_owned(),
                });
                for atom in conformer.atoms() {
                    let element = atom.element().map_or_else(
                        || Element::from_atom_name(atom.name()),
                        |e| Element::from_symbol(e.symbol()),
                    );
                    structure.atoms.push(Atom {
                        name: atom.name().trim().to_owned(),
                        element,
                        position: Vec3::new(
                            atom.x() as f32,
                            atom.y() as f32,
                            atom.z() as f32,
                        ),
                        residue: residue_index,
                        hetero: atom.hetero(),
                    });
                }
            }
        }

        if structure.atoms.is_empty() {
            return Err(StructureError::NoAtoms);
        }
        log::debug!(
            "Parsed {} atoms in {} residues",
            structure.atoms.len(),
            structure.residues.len()
        );
        Ok(structure)
    }

    /// All atom positions.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// Continuous backbone traces for cartoon rendering.
    ///
    /// Each trace is a run of atom indices (CA for amino acids, P for
    /// nucleotides) in one chain, split wherever consecutive trace atoms are
    /// too far apart to be bonded residues. Single-atom runs are dropped.
    #[must_use]
    pub fn backbone_traces(&self) -> Vec<Vec<usize>> {
        let mut traces = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut current_chain: Option<&str> = None;

        for (i, atom) in self.atoms.iter().enumerate() {
            let max_gap = match atom.name.as_str() {
                "CA" if atom.element == Element::C => MAX_TRACE_GAP,
                "P" => MAX_NUCLEIC_GAP,
                _ => continue,
            };
            if atom.hetero {
                continue;
            }
            let chain = self.residues[atom.residue].chain.as_str();
            let continues = current_chain == Some(chain)
                && current.last().is_some_and(|&prev| {
                    self.atoms[prev].name == atom.name
                        && self.atoms[prev].position.distance(atom.position)
                            <= max_gap
                });
            if !continues {
                flush_trace(&mut traces, &mut current);
            }
            current_chain = Some(chain);
            current.push(i);
        }
        flush_trace(&mut traces, &mut current);
        traces
    }
}

fn flush_trace(traces: &mut Vec<Vec<usize>>, current: &mut Vec<usize>) {
    if current.len() >= 2 {
        traces.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
