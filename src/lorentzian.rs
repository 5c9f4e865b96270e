// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The normalized Lorentzian lineshape.

Every spectral profile in this model (the laser spectrum, the homogeneous
atomic line, and the inhomogeneous distribution of resonance frequencies)
is a Lorentzian, so this one density function underlies everything:

```text
L(x; x0, G) = (1/pi) (G/2) / ((x - x0)^2 + (G/2)^2)
```

with FWHM `G`, unit-normalized over the whole real line.

*/

use std::f64::consts::PI;

use grid::FrequencyGrid;


/// Evaluate the unit-normalized Lorentzian density at `x`, centered on `x0`
/// with full-width-at-half-maximum `fwhm`.
///
/// The result is undefined for a non-positive `fwhm`; the parameter structs
/// upstream validate their linewidths, so a violation here is a caller bug.
pub fn lorentzian(x: f64, x0: f64, fwhm: f64) -> f64 {
    debug_assert!(fwhm > 0.);
    let hwhm = 0.5 * fwhm;
    hwhm / (PI * ((x - x0) * (x - x0) + hwhm * hwhm))
}


/// Evaluate the Lorentzian element-wise over every sample of a frequency
/// grid, returning the densities in grid order.
pub fn profile(grid: &FrequencyGrid, x0: f64, fwhm: f64) -> Vec<f64> {
    grid.values().map(|x| lorentzian(x, x0, fwhm)).collect()
}


#[cfg(test)]
mod tests {
    use grid::FrequencyGrid;
    use super::lorentzian;

    #[test]
    fn peak_value() {
        use std::f64::consts::PI;

        // On resonance the density is 2 / (pi G).
        let g = 7.5;
        assert_approx_eq!(lorentzian(0., 0., g), 2. / (PI * g), 1e-12);
        assert_approx_eq!(lorentzian(3., 3., g), 2. / (PI * g), 1e-12);
    }

    #[test]
    fn half_maximum_at_half_width() {
        let g = 2.25e4;
        let peak = lorentzian(0., 0., g);
        assert_approx_eq!(lorentzian(0.5 * g, 0., g), 0.5 * peak, 1e-9 * peak);
        assert_approx_eq!(lorentzian(-0.5 * g, 0., g), 0.5 * peak, 1e-9 * peak);
    }

    #[test]
    fn symmetric_about_center() {
        let g = 11.;
        let x0 = -4.;

        for i in 1..20 {
            let dx = 0.37 * i as f64;
            assert_approx_eq!(lorentzian(x0 + dx, x0, g), lorentzian(x0 - dx, x0, g), 1e-14);
        }
    }

    #[test]
    fn integrates_to_unity() {
        // A Riemann sum over +/- 500 linewidths captures all but ~6e-4 of
        // the probability mass; the discretization error is far smaller.
        let g = 3.2;
        let n = 2_000_001usize;
        let grid = FrequencyGrid::new(-500. * g, 1000. * g / (n - 1) as f64, n);

        let sum: f64 = super::profile(&grid, 0., g).iter().sum();
        assert_approx_eq!(sum * grid.step(), 1., 1e-3);
    }

    #[test]
    fn scale_invariance() {
        // Rescaling x, x0 and G together divides the density by the scale.
        let (x, x0, g) = (4.2, 1.1, 9.);
        let k = 1e6;
        assert_approx_eq!(lorentzian(k * x, k * x0, k * g), lorentzian(x, x0, g) / k, 1e-18);
    }
}
