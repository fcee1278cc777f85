//! Per-atom colors for a [`ColorScheme`].

use crate::structure::Structure;
use crate::style::{srgb_to_linear, ColorScheme};

/// Rainbow color for parameter `t` in [0, 1]: blue at 0, red at 1.
///
/// Returned in sRGB space.
#[must_use]
pub fn spectrum_color(t: f32) -> [f32; 3] {
    let hue = (1.0 - t.clamp(0.0, 1.0)) * 240.0;
    let sector = hue / 60.0;
    let frac = sector - sector.floor();
    match sector as u32 {
        0 => [1.0, frac, 0.0],       // red → yellow
        1 => [1.0 - frac, 1.0, 0.0], // yellow → green
        2 => [0.0, 1.0, frac],       // green → cyan
        3 => [0.0, 1.0 - frac, 1.0], // cyan → blue
        _ => [0.0, 0.0, 1.0],        // blue
    }
}

/// Linear-space color of every residue, in residue order.
#[must_use]
pub fn residue_colors(structure: &Structure, scheme: ColorScheme) -> Vec<[f32; 3]> {
    let count = structure.residues.len();
    match scheme {
        ColorScheme::Uniform(color) => vec![color.to_linear(); count],
        ColorScheme::Spectrum => {
            let span = count.saturating_sub(1).max(1) as f32;
            (0..count)
                .map(|i| spectrum_color(i as f32 / span).map(srgb_to_linear))
                .collect()
        }
    }
}

/// Linear-space color of every atom, taken from its residue.
#[must_use]
pub fn atom_colors(structure: &Structure, scheme: ColorScheme) -> Vec<[f32; 3]> {
    let residues = residue_colors(structure, scheme);
    structure
        .atoms
        .iter()
        .map(|atom| residues.get(atom.residue).copied().unwrap_or([0.5; 3]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::tests::tripeptide;
    use crate::style::HexColor;

    #[test]
    fn spectrum_runs_blue_to_red() {
        assert_eq!(spectrum_color(0.0), [0.0, 0.0, 1.0]);
        assert_eq!(spectrum_color(1.0), [1.0, 0.0, 0.0]);
        assert_eq!(spectrum_color(0.5), [0.0, 1.0, 0.0]);
        assert_eq!(spectrum_color(-3.0), spectrum_color(0.0));
    }

    #[test]
    fn spectrum_follows_residue_order() {
        let structure = Structure::parse(&tripeptide()).unwrap();
        let colors = residue_colors(&structure, ColorScheme::Spectrum);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], [0.0, 0.0, 1.0]);
        assert_eq!(colors[3], [1.0, 0.0, 0.0]);

        let atoms = atom_colors(&structure, ColorScheme::Spectrum);
        assert_eq!(atoms[0], colors[0]);
        assert_eq!(atoms[15], colors[3]);
    }

    #[test]
    fn uniform_paints_every_atom() {
        let structure = Structure::parse(&tripeptide()).unwrap();
        let colors = atom_colors(&structure, ColorScheme::Uniform(HexColor::RED));
        assert_eq!(colors.len(), structure.atoms.len());
        assert!(colors.iter().all(|&c| c == [1.0, 0.0, 0.0]));
    }
}
