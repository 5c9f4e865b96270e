// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Check the full pipeline against the lab's worked example and the
//! model's general scaling behavior.

#[macro_use] extern crate assert_approx_eq;
extern crate rand;
extern crate smfluor;
extern crate smfluor_test_support;

use smfluor::{BeamParameters, FluorescenceModel, GridSet, LinewidthSet, TWO_PI};
use smfluor_test_support::Sampler;

/// The measured and assumed parameters of the Sm:SrF2 run: 190 mW at
/// 438.035 THz through a 0.054 x 0.026 cm spot; a 300 Hz laser line, 13 Hz
/// radiative width, 130 kHz assumed homogeneous width and 30 GHz
/// inhomogeneous spread; peak cross section 4.7e-19 cm^2, 4.31e15 resonant
/// ions, 0.5% detection efficiency.
fn example_model() -> FluorescenceModel {
    let beam = BeamParameters::new(438.035e12, 0.190, 0.054, 0.026).unwrap();
    let lw = LinewidthSet::new(
        TWO_PI * 300.,
        TWO_PI * 13.,
        TWO_PI * 130_000.,
        TWO_PI * 30e9,
    ).unwrap();

    FluorescenceModel::new(beam, lw)
        .cross_section(4.7e-19)
        .atom_count(4.31e15)
        .detection_efficiency(0.005)
}

#[test]
fn worked_example_beam_quantities() {
    let r = example_model()
        .resolution(5_001)
        .compute(&smfluor_test_support::default_log())
        .unwrap();

    assert_approx_eq!(r.waist, 0.05299, 1e-4);
    assert_approx_eq!(r.wavelength / 6.844e-5, 1., 1e-3);
    assert_approx_eq!(r.intensity / 21.538, 1., 1e-3);
    assert_approx_eq!(r.photon_flux / 7.421e19, 1., 1e-3);
}

/// The headline numbers, at the notebook's own resolution. The 5%
/// tolerances allow for the grid-truncation and resolution sensitivity of
/// the reference values.
#[test]
fn worked_example_scalars() {
    let log = smfluor_test_support::default_log();
    let r = example_model().compute(&log).unwrap();

    assert_approx_eq!(r.rabi_frequency / 757.6, 1., 0.05);
    assert_approx_eq!(r.scattering_rate / 2.96e11, 1., 0.05);
    assert_approx_eq!(r.photocurrent / 2.37e-10, 1., 0.05);
    assert_approx_eq!(r.peak_excitation / 0.202, 1., 0.05);

    // The flat-spectrum estimate runs a bit hot compared to the convolved
    // peak; both are a substantial fraction of the decay rate.
    let gamma_ex = TWO_PI * 13.;
    assert_approx_eq!(r.flat_rate / gamma_ex / 0.427, 1., 0.05);
    assert_approx_eq!(r.peak_rate / gamma_ex / 0.340, 1., 0.05);
    assert!(r.peak_rate < r.flat_rate);

    // A 30 GHz inhomogeneous line dwarfs the ~200 kHz grid span, so only
    // a sliver of the ensemble is sampled. That is the intended regime.
    assert!(r.sampled_fraction > 0.);
    assert!(r.sampled_fraction < 1e-4);
}

/// The scattering rate must be monotonically non-decreasing in the photon
/// flux (via beam power) and in the atom count, everything else fixed.
#[test]
fn scattering_rate_monotonicity() {
    let log = smfluor_test_support::default_log();

    let power_sampler = Sampler::log_uniform(0.01, 10.);
    let mut powers: Vec<f64> = (0..6).map(|_| 0.190 * power_sampler.get()).collect();
    powers.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let lw = LinewidthSet::new(
        TWO_PI * 300.,
        TWO_PI * 13.,
        TWO_PI * 130_000.,
        TWO_PI * 30e9,
    ).unwrap();

    let mut last = 0.;

    for &p in &powers {
        let beam = BeamParameters::new(438.035e12, p, 0.054, 0.026).unwrap();
        let r = FluorescenceModel::new(beam, lw)
            .cross_section(4.7e-19)
            .atom_count(4.31e15)
            .resolution(5_001)
            .compute(&log)
            .unwrap();

        assert!(r.scattering_rate >= last);
        last = r.scattering_rate;
    }

    let mut counts: Vec<f64> = (0..6).map(|_| 4.31e15 * (0.1 + rand::random::<f64>() * 10.)).collect();
    counts.sort_by(|a, b| a.partial_cmp(b).unwrap());

    last = 0.;

    for &n in &counts {
        let r = example_model()
            .atom_count(n)
            .resolution(5_001)
            .compute(&log)
            .unwrap();

        assert!(r.scattering_rate >= last);
        last = r.scattering_rate;
    }
}

/// The combined axis must align bin-for-bin with the sum of the two input
/// domains, so that convolution index arithmetic is exact.
#[test]
fn combined_axis_alignment() {
    let gs = GridSet::build(TWO_PI * 300., TWO_PI * 130_000., 10_001).unwrap();
    let base = gs.laser.start() + gs.atomic.start();

    for i in 0..gs.combined.len() {
        assert_eq!(gs.combined.value(i), base + i as f64 * gs.combined.step());
    }
}

/// Scattering rate and photocurrent scale linearly with detection-relevant
/// factors: efficiency only touches the current.
#[test]
fn efficiency_only_scales_current() {
    let log = smfluor_test_support::default_log();

    let lo = example_model().resolution(5_001).detection_efficiency(0.001).compute(&log).unwrap();
    let hi = example_model().resolution(5_001).detection_efficiency(0.01).compute(&log).unwrap();

    assert_eq!(lo.scattering_rate, hi.scattering_rate);
    assert_approx_eq!(hi.photocurrent / lo.photocurrent, 10., 1e-9);
}
