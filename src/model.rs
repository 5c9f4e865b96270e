// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The end-to-end fluorescence model.

[`FluorescenceModel`] gathers the physical inputs with a builder interface
and drives the whole pipeline: grid construction, profile evaluation,
convolution, saturation, and the inhomogeneous-weighted sum. One call to
[`FluorescenceModel::compute`] reduces everything to the scalar report;
[`FluorescenceModel::compute_spectrum`] keeps the intermediate arrays for
plotting.

Two approximations inherited from the lab notebook are worth flagging. The
peak Rabi frequency is estimated as `sqrt(R_peak * G_H)`, which treats the
beam as monochromatic and is only good when the laser linewidth is far
below the homogeneous width; it is a best-effort number, not an exact
identity. And the grids truncate every profile at plus-or-minus 1.5
linewidths, so a few percent of each line's probability mass is deliberately
left on the floor; the quoted laboratory comparison values bake that
truncation in.

*/

use slog::Logger;

use convolve;
use grid::GridSet;
use lorentzian;
use super::{BeamParameters, ELECTRON_CHARGE, Error, LinewidthSet, Result, TWO_PI};


/// A full parameter set for one model evaluation.
///
/// Construct with [`FluorescenceModel::new`], fill in the remaining
/// physical inputs with the builder methods, then call
/// [`FluorescenceModel::compute`]. The cross section and atom count have
/// no sensible defaults and must be supplied; `compute` rejects a model in
/// which they were never set.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct FluorescenceModel {
    beam: BeamParameters,
    linewidths: LinewidthSet,
    cross_section: f64,
    atom_count: f64,
    inhomogeneous_offset: f64,
    efficiency: f64,
    resolution: usize,
}

impl FluorescenceModel {
    /// Create a new model for the given beam and linewidths.
    pub fn new(beam: BeamParameters, linewidths: LinewidthSet) -> Self {
        FluorescenceModel {
            beam: beam,
            linewidths: linewidths,
            cross_section: ::std::f64::NAN,
            atom_count: ::std::f64::NAN,
            inhomogeneous_offset: 0.,
            efficiency: 1.,
            resolution: 100_001,
        }
    }

    /// Set the peak absorption cross section, in cm^2.
    pub fn cross_section(mut self, sigma: f64) -> Self {
        self.cross_section = sigma;
        self
    }

    /// Set the number of resonant ions illuminated by the beam.
    pub fn atom_count(mut self, n: f64) -> Self {
        self.atom_count = n;
        self
    }

    /// Set the offset of the inhomogeneous line center from the laser
    /// carrier, in rad/s. Zero (the default) means the laser is parked on
    /// the peak of the inhomogeneous distribution.
    pub fn inhomogeneous_offset(mut self, offset: f64) -> Self {
        self.inhomogeneous_offset = offset;
        self
    }

    /// Set the photon detection efficiency, a fraction in (0, 1]. The
    /// default is 1, i.e. a perfect detector.
    pub fn detection_efficiency(mut self, eta: f64) -> Self {
        self.efficiency = eta;
        self
    }

    /// Set the number of grid samples across the broader of the laser and
    /// homogeneous linewidths. The default of 100001 matches the lab
    /// notebook's resolution.
    pub fn resolution(mut self, n: usize) -> Self {
        self.resolution = n;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.cross_section > 0.) {
            return Err(Error::InvalidParameter("peak cross section must be set and positive"));
        }
        if !(self.atom_count > 0.) {
            return Err(Error::InvalidParameter("atom count must be set and positive"));
        }
        if !(self.efficiency > 0.) || !(self.efficiency <= 1.) {
            return Err(Error::InvalidParameter("detection efficiency must lie in (0, 1]"));
        }
        if !self.inhomogeneous_offset.is_finite() {
            return Err(Error::InvalidParameter("inhomogeneous offset must be finite"));
        }

        Ok(())
    }

    /// Run the pipeline and reduce it to the scalar report.
    pub fn compute(&self, log: &Logger) -> Result<ScalarResults> {
        Ok(self.compute_full(log)?.0)
    }

    /// Run the pipeline once and hand back both the scalar report and the
    /// intermediate arrays, so a caller that wants the spectrum too does
    /// not pay for a second convolution.
    pub fn compute_full(&self, log: &Logger) -> Result<(ScalarResults, SpectrumArrays)> {
        self.validate()?;
        let state = CalculationState::new(self, log)?;
        let spectrum = state.spectrum();
        let scalars = state.reduce(&spectrum);
        Ok((scalars, spectrum))
    }

    /// Run the pipeline but hand back the intermediate spectral arrays
    /// along with the grids, for external plotting.
    pub fn compute_spectrum(&self, log: &Logger) -> Result<SpectrumArrays> {
        self.validate()?;
        let state = CalculationState::new(self, log)?;
        Ok(state.spectrum())
    }
}


/// The intermediate, frequency-resolved arrays of one evaluation, each
/// indexed against its grid in [`SpectrumArrays::grids`].
#[derive(Clone,Debug,PartialEq)]
pub struct SpectrumArrays {
    /// The three axes the arrays below are sampled on.
    pub grids: GridSet,

    /// Photon flux density on the laser axis, photons/cm^2/s/(rad/s).
    pub flux: Vec<f64>,

    /// Cross-section density on the atomic axis, cm^2/(rad/s).
    pub cross_section: Vec<f64>,

    /// Stimulated absorption rate on the combined axis, 1/s.
    pub absorption_rate: Vec<f64>,

    /// Excited-state population fraction on the combined axis.
    pub excitation: Vec<f64>,

    /// Resonant-ion density on the combined axis, ions/(rad/s).
    pub atom_density: Vec<f64>,
}


/// The scalar outputs of one evaluation. Quantities are in the crate's
/// base units; the `units` module has the presentation factors.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct ScalarResults {
    /// The effective beam waist radius, cm.
    pub waist: f64,

    /// The carrier wavelength, cm.
    pub wavelength: f64,

    /// The peak beam intensity, W/cm^2.
    pub intensity: f64,

    /// The total photon flux, photons/cm^2/s.
    pub photon_flux: f64,

    /// The stimulated absorption rate a flat laser spectrum would give,
    /// `sigma * Phi`, 1/s. This is the back-of-the-envelope number the
    /// convolved peak rate is compared against.
    pub flat_rate: f64,

    /// The peak of the convolved stimulated absorption rate, 1/s.
    pub peak_rate: f64,

    /// The excited-state population fraction at the peak rate; bounded
    /// below one half by saturation.
    pub peak_excitation: f64,

    /// The estimated peak Rabi frequency, in Hz (not rad/s). An
    /// approximation valid for a laser much narrower than the homogeneous
    /// line.
    pub rabi_frequency: f64,

    /// The total fluorescence scattering rate of the ensemble, photons/s.
    pub scattering_rate: f64,

    /// The fraction of the ion population whose resonances fall inside the
    /// truncated grid span. Small values are expected whenever the
    /// inhomogeneous width dwarfs the homogeneous one; the model then
    /// covers only the near-resonant slice, which is the regime it is for.
    pub sampled_fraction: f64,

    /// The expected detector photocurrent, amperes.
    pub photocurrent: f64,
}


/// The steady-state excited fraction of a two-level system pumped at
/// stimulated rate `rate` and decaying at `excited_fwhm`:
/// `(R/G) / (1 + 2 R/G)`. Monotonic in the rate and saturating below 1/2.
pub fn excitation_fraction(rate: f64, excited_fwhm: f64) -> f64 {
    let r = rate / excited_fwhm;
    r / (1. + 2. * r)
}


struct CalculationState<'a> {
    m: &'a FluorescenceModel,
    log: &'a Logger,
    grids: GridSet,
}

impl<'a> CalculationState<'a> {
    fn new(m: &'a FluorescenceModel, log: &'a Logger) -> Result<Self> {
        let grids = GridSet::build(m.linewidths.laser, m.linewidths.homogeneous, m.resolution)?;

        trace!(log, "built frequency grids";
               "d_omega" => grids.combined.step(),
               "laser_len" => grids.laser.len(),
               "atomic_len" => grids.atomic.len(),
               "combined_len" => grids.combined.len());

        // The shared step is sized against the broader linewidth, so it is
        // the narrower profile that can end up under-sampled.
        let narrow = m.linewidths.laser.min(m.linewidths.homogeneous);
        let across = narrow / grids.combined.step();

        if across < 100. {
            warn!(log, "grid step is coarse for the narrowest linewidth; \
                        the convolution may be under-resolved";
                  "samples_across_narrowest" => across);
        }

        Ok(CalculationState {
            m: m,
            log: log,
            grids: grids,
        })
    }

    fn spectrum(&self) -> SpectrumArrays {
        let m = self.m;

        let flux = convolve::flux_profile(&self.grids, m.beam.photon_flux(), m.linewidths.laser);
        let cross_section =
            convolve::cross_section_profile(&self.grids, m.cross_section, m.linewidths.homogeneous);

        let absorption_rate = convolve::convolve_full(&flux, &cross_section, self.grids.combined.step());

        // The combined axis was laid out from the two domain minima; that
        // the full convolution has exactly its length is a post-condition.
        assert_eq!(absorption_rate.len(), self.grids.combined.len());

        let excitation: Vec<f64> = absorption_rate
            .iter()
            .map(|&r| excitation_fraction(r, m.linewidths.excited))
            .collect();

        let mut atom_density = lorentzian::profile(
            &self.grids.combined,
            m.inhomogeneous_offset,
            m.linewidths.inhomogeneous,
        );

        for v in &mut atom_density {
            *v *= m.atom_count;
        }

        trace!(self.log, "evaluated spectral arrays";
               "total_flux" => m.beam.photon_flux(),
               "peak_rate" => peak(&absorption_rate));

        SpectrumArrays {
            grids: self.grids,
            flux: flux,
            cross_section: cross_section,
            absorption_rate: absorption_rate,
            excitation: excitation,
            atom_density: atom_density,
        }
    }

    fn reduce(&self, spectrum: &SpectrumArrays) -> ScalarResults {
        let m = self.m;
        let dw = self.grids.combined.step();

        let peak_rate = peak(&spectrum.absorption_rate);

        // Riemann sums over the combined axis: the scattering rate is the
        // decay rate times the excited population integrated against the
        // inhomogeneous density, and the density's own integral tells us
        // how much of the ensemble the truncated span actually covers.
        let mut weighted = 0.;
        let mut sampled = 0.;

        for (d, p) in spectrum.atom_density.iter().zip(&spectrum.excitation) {
            weighted += d * p;
            sampled += *d;
        }

        let scattering_rate = m.linewidths.excited * weighted * dw;
        let sampled_fraction = sampled * dw / m.atom_count;

        // Monochromatic-beam estimate; see the module docs for the caveat.
        let rabi = (peak_rate * m.linewidths.homogeneous).sqrt();

        trace!(self.log, "reduced to scalars";
               "scattering_rate" => scattering_rate,
               "sampled_fraction" => sampled_fraction,
               "rabi_hz" => rabi / TWO_PI);

        ScalarResults {
            waist: m.beam.waist(),
            wavelength: m.beam.wavelength(),
            intensity: m.beam.intensity(),
            photon_flux: m.beam.photon_flux(),
            flat_rate: m.cross_section * m.beam.photon_flux(),
            peak_rate: peak_rate,
            peak_excitation: excitation_fraction(peak_rate, m.linewidths.excited),
            rabi_frequency: rabi / TWO_PI,
            scattering_rate: scattering_rate,
            sampled_fraction: sampled_fraction,
            photocurrent: scattering_rate * m.efficiency * ELECTRON_CHARGE,
        }
    }
}


fn peak(values: &[f64]) -> f64 {
    values.iter().cloned().fold(::std::f64::NEG_INFINITY, f64::max)
}
