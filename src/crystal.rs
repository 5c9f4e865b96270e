// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Composition of the doped host crystal.

The number of ions the beam can talk to comes from the crystal side of the
experiment: the host's formula-unit density, the dopant mole fraction, and
the fraction of dopant nuclei that actually carry the I = 7/2 nuclear spin
the transition needs. Only two samarium isotopes qualify (147 and 149), so
the isotope table matters at the tens-of-percent level.

Abundance tables are taken at face value: if one does not sum to unity we
say so, rather than silently renormalizing and hiding a transcription
error.

*/

use slog::Logger;

use super::{AVOGADRO, Error, Result};


/// One isotope of the dopant element.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct Isotope {
    /// The atomic mass, in g/mol.
    pub mass: f64,

    /// The natural abundance, as a mole fraction of the dopant element.
    pub abundance: f64,

    /// Whether this isotope has nuclear spin I = 7/2 and so participates
    /// in the probed transition.
    pub resonant: bool,
}

impl Isotope {
    /// A convenience constructor so tables read as one line per isotope.
    pub fn new(mass: f64, abundance: f64, resonant: bool) -> Self {
        Isotope {
            mass: mass,
            abundance: abundance,
            resonant: resonant,
        }
    }
}


/// A doped crystal: host lattice parameters plus the dopant isotope table.
#[derive(Clone,Debug,PartialEq)]
pub struct CrystalComposition {
    host_density: f64,
    host_molar_mass: f64,
    dopant_fraction: f64,
    isotopes: Vec<Isotope>,
}

impl CrystalComposition {
    /// Create a composition from the host mass density (g/cm^3), the host
    /// formula-unit molar mass (g/mol), the dopant mole fraction (dopant
    /// ions per host formula unit), and the dopant isotope table.
    pub fn new(
        host_density: f64,
        host_molar_mass: f64,
        dopant_fraction: f64,
        isotopes: Vec<Isotope>,
    ) -> Result<Self> {
        if !(host_density > 0.) {
            return Err(Error::InvalidParameter("host density must be positive"));
        }
        if !(host_molar_mass > 0.) {
            return Err(Error::InvalidParameter("host molar mass must be positive"));
        }
        if !(dopant_fraction > 0.) || !(dopant_fraction < 1.) {
            return Err(Error::InvalidParameter("dopant fraction must lie in (0, 1)"));
        }
        if isotopes.is_empty() {
            return Err(Error::InvalidParameter("isotope table must not be empty"));
        }

        Ok(CrystalComposition {
            host_density: host_density,
            host_molar_mass: host_molar_mass,
            dopant_fraction: dopant_fraction,
            isotopes: isotopes,
        })
    }

    /// Samarium-doped strontium fluoride with the natural samarium isotope
    /// table. SrF2: molar mass 125.62 g/mol, density 4.24 g/cm^3. The
    /// I = 7/2 isotopes are 147Sm and 149Sm.
    pub fn sm_srf2(dopant_fraction: f64) -> Result<Self> {
        CrystalComposition::new(
            4.24,
            125.62,
            dopant_fraction,
            vec![
                Isotope::new(143.9120, 0.0307, false),
                Isotope::new(146.9149, 0.1499, true),
                Isotope::new(147.9148, 0.1124, false),
                Isotope::new(148.9172, 0.1382, true),
                Isotope::new(149.9173, 0.0738, false),
                Isotope::new(151.9197, 0.2675, false),
                Isotope::new(153.9222, 0.2275, false),
            ],
        )
    }

    /// The sum of the tabulated abundances; should be very close to 1.
    pub fn abundance_sum(&self) -> f64 {
        self.isotopes.iter().map(|i| i.abundance).sum()
    }

    /// Verify that the abundance table sums to 1 within one part in a
    /// thousand, returning [`Error::InconsistentComposition`] otherwise.
    pub fn validate_abundances(&self) -> Result<()> {
        let sum = self.abundance_sum();

        if (sum - 1.).abs() > 1e-3 {
            Err(Error::InconsistentComposition(sum))
        } else {
            Ok(())
        }
    }

    /// The warn-only form of [`CrystalComposition::validate_abundances`]:
    /// an off-unity table is reported through the logger and the
    /// computation proceeds with the table exactly as given.
    pub fn check(&self, log: &Logger) {
        if let Err(Error::InconsistentComposition(sum)) = self.validate_abundances() {
            warn!(log, "isotope abundances do not sum to unity; \
                        proceeding without renormalizing";
                  "sum" => sum);
        }
    }

    /// The abundance-weighted dopant molar mass, g/mol.
    pub fn average_molar_mass(&self) -> f64 {
        self.isotopes.iter().map(|i| i.mass * i.abundance).sum()
    }

    /// The host formula-unit number density, 1/cm^3.
    pub fn host_number_density(&self) -> f64 {
        self.host_density * AVOGADRO / self.host_molar_mass
    }

    /// The fraction of dopant nuclei that are resonant (I = 7/2).
    pub fn resonant_fraction(&self) -> f64 {
        self.isotopes
            .iter()
            .filter(|i| i.resonant)
            .map(|i| i.abundance)
            .sum()
    }

    /// The number of resonant dopant ions inside an illuminated volume of
    /// cross-sectional area `area` (cm^2) and length `length` (cm).
    pub fn resonant_atom_count(&self, area: f64, length: f64) -> f64 {
        self.host_number_density() * self.dopant_fraction * self.resonant_fraction() * area * length
    }
}
