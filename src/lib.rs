// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Predict the fluorescence of a laser-driven, inhomogeneously broadened ion ensemble.

This crate models a narrow-linewidth laser shining on samarium ions doped
into an SrF2 crystal. The ion resonance frequencies are spread over an
inhomogeneous distribution that is vastly wider than either the laser
spectrum or the homogeneous atomic line, so only a thin slice of the
ensemble ever talks to the light. We want to know how bright that slice is:
the total fluorescence scattering rate, the peak Rabi frequency, and the
photocurrent a detector of known efficiency would register.

The heart of the computation is a lineshape convolution. The laser's
Lorentzian spectral profile is convolved against the ions' Lorentzian
absorption profile on a shared uniform grid of angular frequencies, giving
the stimulated absorption rate as a function of atomic detuning. That rate
is pushed through the two-level saturation formula to get an excitation
probability per detuning bin, which is then weighted by the (Lorentzian)
inhomogeneous density of resonance frequencies and summed.

Units follow the lab's mixed conventions: lengths in centimeters, powers in
watts, photon energies in joules, and every linewidth a full-width
half-maximum *angular* frequency in rad/s.

*/

#![deny(missing_docs)]

#[macro_use] extern crate slog;

#[cfg(test)]
#[macro_use] extern crate assert_approx_eq;

use std::error;
use std::fmt;

pub use std::f64::consts::PI;

/// Two times pi, as an `f64`.
pub const TWO_PI: f64 = 2. * PI;

/// The speed of light, in centimeters per second.
pub const SPEED_LIGHT: f64 = 2.99792458e10;

/// The Planck constant, in joule-seconds.
pub const PLANCK: f64 = 6.62607015e-34;

/// The Avogadro constant, per mole.
pub const AVOGADRO: f64 = 6.02214076e23;

/// The charge of the electron, in coulombs.
pub const ELECTRON_CHARGE: f64 = 1.602176634e-19;


/// Multiplicative factors for presenting quantities in the units the lab
/// actually quotes them in. These affect formatting only; the model itself
/// works in the base units documented on each type.
pub mod units {
    /// Hertz per terahertz.
    pub const TERAHERTZ: f64 = 1e12;

    /// Hertz per gigahertz.
    pub const GIGAHERTZ: f64 = 1e9;

    /// Watts per milliwatt.
    pub const MILLIWATT: f64 = 1e-3;

    /// Centimeters per nanometer.
    pub const NANOMETER: f64 = 1e-7;

    /// Amperes per picoampere.
    pub const PICOAMP: f64 = 1e-12;
}


/// Things that can go wrong while setting up a model evaluation.
///
/// Every failure here is an input-validation problem; once a model is
/// successfully constructed, the evaluation itself cannot fail. Numerical
/// accuracy concerns are surfaced through the logger as warnings instead,
/// since they degrade the answer without invalidating it.
#[derive(Clone,Debug,PartialEq)]
pub enum Error {
    /// A scalar input was outside its physical domain; the payload names
    /// the offending quantity.
    InvalidParameter(&'static str),

    /// An isotope abundance table summed to the payload value rather than
    /// to (approximately) one.
    InconsistentComposition(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidParameter(what) =>
                write!(f, "invalid parameter: {}", what),
            Error::InconsistentComposition(sum) =>
                write!(f, "isotope abundances sum to {:.4}, not 1", sum),
        }
    }
}

impl error::Error for Error {}

/// A `Result` whose error type is this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;


pub mod convolve;
pub mod crystal;
pub mod grid;
pub mod lorentzian;
pub mod model;

pub use crystal::{CrystalComposition, Isotope};
pub use grid::{FrequencyGrid, GridSet};
pub use model::{FluorescenceModel, ScalarResults, SpectrumArrays};


/// The geometry and strength of the driving laser beam.
///
/// The beam is elliptical-Gaussian in profile; we reduce it to an effective
/// circular waist `w = sqrt(2 a b)` where `a` and `b` are the measured
/// half-widths, so that the peak intensity is `P / (pi w^2)`. Intensity and
/// photon flux are derived quantities and cannot be set independently.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct BeamParameters {
    frequency: f64,
    power: f64,
    waist: f64,
}

impl BeamParameters {
    /// Create a new set of beam parameters from the carrier frequency in
    /// Hz, the peak power in watts, and the two measured beam half-widths
    /// in centimeters. All four quantities must be positive.
    pub fn new(frequency: f64, power: f64, half_width_x: f64, half_width_y: f64) -> Result<Self> {
        if !(frequency > 0.) {
            return Err(Error::InvalidParameter("carrier frequency must be positive"));
        }
        if !(power > 0.) {
            return Err(Error::InvalidParameter("beam power must be positive"));
        }
        if !(half_width_x > 0.) || !(half_width_y > 0.) {
            return Err(Error::InvalidParameter("beam half-widths must be positive"));
        }

        Ok(BeamParameters {
            frequency: frequency,
            power: power,
            waist: (2. * half_width_x * half_width_y).sqrt(),
        })
    }

    /// The carrier frequency, in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// The peak power, in watts.
    pub fn power(&self) -> f64 {
        self.power
    }

    /// The effective waist radius, in centimeters.
    pub fn waist(&self) -> f64 {
        self.waist
    }

    /// The carrier wavelength, in centimeters.
    pub fn wavelength(&self) -> f64 {
        SPEED_LIGHT / self.frequency
    }

    /// The peak intensity `P / (pi w^2)`, in watts per square centimeter.
    pub fn intensity(&self) -> f64 {
        self.power / (PI * self.waist * self.waist)
    }

    /// The total photon flux at the beam center, in photons per square
    /// centimeter per second.
    pub fn photon_flux(&self) -> f64 {
        self.intensity() / (PLANCK * self.frequency)
    }
}


/// The four linewidths that shape the problem, each a FWHM angular
/// frequency in rad/s.
///
/// The homogeneous width is assumed to be at least the excited-state
/// (radiative) width; that is a domain assumption about the physical
/// system, not something we enforce numerically.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct LinewidthSet {
    /// The laser's spectral FWHM.
    pub laser: f64,

    /// The excited-state radiative FWHM, i.e. the spontaneous decay rate.
    pub excited: f64,

    /// The homogeneous atomic absorption FWHM.
    pub homogeneous: f64,

    /// The FWHM of the inhomogeneous distribution of ion resonance
    /// frequencies across the crystal.
    pub inhomogeneous: f64,
}

impl LinewidthSet {
    /// Create a new linewidth set, rejecting non-positive values.
    pub fn new(laser: f64, excited: f64, homogeneous: f64, inhomogeneous: f64) -> Result<Self> {
        if !(laser > 0.) {
            return Err(Error::InvalidParameter("laser linewidth must be positive"));
        }
        if !(excited > 0.) {
            return Err(Error::InvalidParameter("excited-state linewidth must be positive"));
        }
        if !(homogeneous > 0.) {
            return Err(Error::InvalidParameter("homogeneous linewidth must be positive"));
        }
        if !(inhomogeneous > 0.) {
            return Err(Error::InvalidParameter("inhomogeneous linewidth must be positive"));
        }

        Ok(LinewidthSet {
            laser: laser,
            excited: excited,
            homogeneous: homogeneous,
            inhomogeneous: inhomogeneous,
        })
    }
}
