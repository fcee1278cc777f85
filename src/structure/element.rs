//! Chemical elements and the radii the scene builder needs.

/// Elements common in deposited structures; everything else is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(missing_docs)]
pub enum Element {
    H,
    C,
    N,
    O,
    S,
    P,
    Se,
    Fe,
    Zn,
    Mg,
    Ca,
    Na,
    Cl,
    K,
    Mn,
    Co,
    Ni,
    Cu,
    Br,
    I,
    F,
    #[default]
    Unknown,
}

impl Element {
    /// Element from its symbol, case-insensitive.
    #[must_use]
    pub fn from_symbol(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" | "D" => Self::H,
            "C" => Self::C,
            "N" => Self::N,
            "O" => Self::O,
            "S" => Self::S,
            "P" => Self::P,
            "SE" => Self::Se,
            "FE" => Self::Fe,
            "ZN" => Self::Zn,
            "MG" => Self::Mg,
            "CA" => Self::Ca,
            "NA" => Self::Na,
            "CL" => Self::Cl,
            "K" => Self::K,
            "MN" => Self::Mn,
            "CO" => Self::Co,
            "NI" => Self::Ni,
            "CU" => Self::Cu,
            "BR" => Self::Br,
            "I" => Self::I,
            "F" => Self::F,
            _ => Self::Unknown,
        }
    }

    /// Guess the element from an atom name when the element column is
    /// blank. Uses the first letter, which holds for polymer atoms
    /// (`CA` is alpha carbon, `OG1` oxygen).
    #[must_use]
    pub fn from_atom_name(name: &str) -> Self {
        name.trim_start_matches(|c: char| c.is_ascii_digit() || c == ' ')
            .chars()
            .next()
            .map_or(Self::Unknown, |c| Self::from_symbol(&c.to_string()))
    }

    /// Covalent radius in angstroms.
    #[must_use]
    pub fn covalent_radius(self) -> f32 {
        match self {
            Self::H => 0.31,
            Self::C => 0.76,
            Self::N => 0.71,
            Self::O => 0.66,
            Self::S => 1.05,
            Self::P => 1.07,
            Self::Se => 1.20,
            Self::Fe | Self::Cu => 1.32,
            Self::Zn => 1.22,
            Self::Mg => 1.41,
            Self::Ca => 1.76,
            Self::Na => 1.66,
            Self::Cl => 1.02,
            Self::K => 2.03,
            Self::Mn => 1.39,
            Self::Co => 1.26,
            Self::Ni => 1.24,
            Self::Br => 1.20,
            Self::I => 1.39,
            Self::F => 0.57,
            Self::Unknown => 0.77,
        }
    }

    /// Van der Waals radius in angstroms.
    #[must_use]
    pub fn vdw_radius(self) -> f32 {
        match self {
            Self::H => 1.20,
            Self::C | Self::Unknown => 1.70,
            Self::N => 1.55,
            Self::O => 1.52,
            Self::S | Self::P => 1.80,
            Self::Se => 1.90,
            Self::Fe | Self::Mn | Self::Co => 2.00,
            Self::Zn => 1.39,
            Self::Mg => 1.73,
            Self::Ca => 2.31,
            Self::Na => 2.27,
            Self::Cl => 1.75,
            Self::K => 2.75,
            Self::Ni => 1.63,
            Self::Cu => 1.40,
            Self::Br => 1.85,
            Self::I => 1.98,
            Self::F => 1.47,
        }
    }

    /// Metals and monatomic ions, which are not bonded by distance.
    #[must_use]
    pub fn is_ion(self) -> bool {
        matches!(
            self,
            Self::Fe
                | Self::Zn
                | Self::Mg
                | Self::Ca
                | Self::Na
                | Self::K
                | Self::Mn
                | Self::Co
                | Self::Ni
                | Self::Cu
        )
    }
}
