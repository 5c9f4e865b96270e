// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Uniform grids of angular frequency.

The convolution pipeline runs on three axes: one spanning the laser
spectrum, one spanning the homogeneous atomic line, and a combined axis on
which the convolution of the two profiles lives. All three must share a
single step size `d_omega` so that index arithmetic in the discrete
convolution corresponds to exact frequency offsets. We guarantee that by
never materializing the axes as arrays of accumulated sums: a grid is just
`(start, step, len)` and every sample is generated as `start + i * step`.

*/

use super::{Error, Result};


/// A uniformly spaced, strictly increasing axis of angular frequencies
/// (rad/s).
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct FrequencyGrid {
    start: f64,
    step: f64,
    len: usize,
}

impl FrequencyGrid {
    /// Create a grid of `len` samples beginning at `start` with uniform
    /// spacing `step`.
    pub fn new(start: f64, step: f64, len: usize) -> Self {
        FrequencyGrid {
            start: start,
            step: step,
            len: len,
        }
    }

    /// The first sample value.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// The spacing between adjacent samples.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The value of the `i`-th sample, `start + i * step`.
    pub fn value(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    /// Iterate over the sample values in increasing order.
    pub fn values<'a>(&'a self) -> impl Iterator<Item = f64> + 'a {
        let start = self.start;
        let step = self.step;
        (0..self.len).map(move |i| start + i as f64 * step)
    }
}


/// The three aligned axes used by one model evaluation.
///
/// The laser and atomic axes each span plus-or-minus 1.5 linewidths of
/// their profile; the combined axis is where the full discrete convolution
/// of the two profiles is sampled. Its origin is *defined* as the sum of
/// the two domain minima, which is the physically meaningful statement;
/// the fact that its length equals what a full convolution produces is a
/// checked consequence, not the definition.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct GridSet {
    /// Offsets from the laser carrier, spanning +/- 1.5 laser linewidths.
    pub laser: FrequencyGrid,

    /// Offsets from the atomic resonance, spanning +/- 1.5 homogeneous
    /// linewidths.
    pub atomic: FrequencyGrid,

    /// Atomic detunings on which the convolved absorption rate is sampled;
    /// length `laser.len() + atomic.len() - 1`.
    pub combined: FrequencyGrid,
}

impl GridSet {
    /// Build the three axes for the given laser and homogeneous FWHM
    /// linewidths (rad/s).
    ///
    /// `resolution` is the number of samples across the *broader* of the
    /// two linewidths, so the shared step is `max(G_L, G_H) /
    /// (resolution - 1)`. The narrower profile is resolved onto the same
    /// step; if the two widths are orders of magnitude apart the narrow
    /// axis ends up much shorter than the broad one, which is exactly what
    /// makes the direct convolution affordable.
    pub fn build(laser_fwhm: f64, homogeneous_fwhm: f64, resolution: usize) -> Result<GridSet> {
        if !(laser_fwhm > 0.) || !(homogeneous_fwhm > 0.) {
            return Err(Error::InvalidParameter("grid linewidths must be positive"));
        }
        if resolution < 2 {
            return Err(Error::InvalidParameter("grid resolution must be at least 2"));
        }

        let step = laser_fwhm.max(homogeneous_fwhm) / (resolution - 1) as f64;
        let laser = axis(laser_fwhm, step);
        let atomic = axis(homogeneous_fwhm, step);
        let combined = FrequencyGrid::new(
            laser.start() + atomic.start(),
            step,
            laser.len() + atomic.len() - 1,
        );

        Ok(GridSet {
            laser: laser,
            atomic: atomic,
            combined: combined,
        })
    }
}


/// An axis spanning +/- 1.5 linewidths from its exact lower endpoint. The
/// upper endpoint lands wherever an integral number of steps puts it.
fn axis(fwhm: f64, step: f64) -> FrequencyGrid {
    let halfspan = 1.5 * fwhm;
    let len = (2. * halfspan / step).floor() as usize + 1;
    FrequencyGrid::new(-halfspan, step, len)
}
