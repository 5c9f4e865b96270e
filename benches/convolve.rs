// Copyright 2017 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Time the convolution engine, which dominates the model's runtime.
//!
//! The cost is the product of the two profile lengths, so it scales with
//! the resolution parameter times the ratio of the two linewidths. These
//! cases bracket the resolutions used in tests and in the notebook.

#[macro_use] extern crate bencher;
extern crate smfluor;

use bencher::Bencher;
use smfluor::{convolve, GridSet, TWO_PI};

const LASER_FWHM: f64 = TWO_PI * 300.;
const HOMOG_FWHM: f64 = TWO_PI * 130_000.;
const TOTAL_FLUX: f64 = 7.421e19;
const PEAK_XSEC: f64 = 4.7e-19;

fn convolve_at_resolution(resolution: usize) {
    let gs = GridSet::build(LASER_FWHM, HOMOG_FWHM, resolution).unwrap();
    let flux = convolve::flux_profile(&gs, TOTAL_FLUX, LASER_FWHM);
    let xsec = convolve::cross_section_profile(&gs, PEAK_XSEC, HOMOG_FWHM);

    convolve::convolve_full(&flux, &xsec, gs.combined.step());
}

fn convolve_res_5k(b: &mut Bencher) {
    b.iter(|| convolve_at_resolution(5_001));
}

fn convolve_res_20k(b: &mut Bencher) {
    b.iter(|| convolve_at_resolution(20_001));
}

benchmark_group!(benches, convolve_res_5k, convolve_res_20k);
benchmark_main!(benches);
