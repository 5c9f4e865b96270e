// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Spectral profiles and the discrete convolution that combines them.

The stimulated absorption rate of an ion detuned by `Delta` from the laser
carrier is the overlap integral of the laser's photon-flux spectrum with
the ion's absorption cross-section profile:

```text
R(Delta) = integral Phi(omega) sigma(Delta - omega) d omega
```

We evaluate it as a full discrete convolution on the shared uniform grid,
scaled by the step size. Because both profiles are Lorentzians, the exact
result is itself Lorentzian-shaped with the two widths added, which gives
the tests a closed form to check the machinery against.

*/

use std::f64::consts::PI;

use grid::GridSet;
use lorentzian;


/// The photon flux per unit angular frequency across the laser axis, in
/// photons/cm^2/s/(rad/s): the total flux spread over a Lorentzian of the
/// laser's linewidth.
pub fn flux_profile(grids: &GridSet, total_flux: f64, laser_fwhm: f64) -> Vec<f64> {
    let mut p = lorentzian::profile(&grids.laser, 0., laser_fwhm);

    for v in &mut p {
        *v *= total_flux;
    }

    p
}


/// The absorption cross section per unit angular frequency across the
/// atomic axis, in cm^2/(rad/s).
///
/// The Lorentzian is scaled by `pi G_H / 2` so that the on-resonance value
/// recovers the measured peak cross section `sigma_peak`.
pub fn cross_section_profile(grids: &GridSet, peak_cross_section: f64, homogeneous_fwhm: f64) -> Vec<f64> {
    let scale = peak_cross_section * 0.5 * PI * homogeneous_fwhm;
    let mut p = lorentzian::profile(&grids.atomic, 0., homogeneous_fwhm);

    for v in &mut p {
        *v *= scale;
    }

    p
}


/// The full discrete convolution of two sampled profiles, scaled by the
/// grid step so that it approximates the continuous overlap integral.
///
/// The output has length `a.len() + b.len() - 1`, with the profiles
/// implicitly zero outside their sampled ranges. The direct double loop is
/// quadratic, but the short profile in this model is a few hundred samples
/// long, so it beats setting up an FFT at the sizes we care about.
pub fn convolve_full(a: &[f64], b: &[f64], step: f64) -> Vec<f64> {
    let mut out = vec![0.; a.len() + b.len() - 1];

    for (i, &av) in a.iter().enumerate() {
        for (j, &bv) in b.iter().enumerate() {
            out[i + j] += av * bv;
        }
    }

    for v in &mut out {
        *v *= step;
    }

    out
}
