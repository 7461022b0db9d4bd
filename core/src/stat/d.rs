//! Neutrality tests contrasting estimators of θ.

use std::marker::PhantomData;

use crate::utils::{harmonic, p_harmonic};

use super::{theta, theta::ThetaEstimator, FrequencySpectrum, Theta};

mod private {
    use super::*;

    pub trait Statistic {
        type T1: ThetaEstimator;
        type T2: ThetaEstimator;

        fn deviation(spectrum: &FrequencySpectrum) -> f64;

        fn estimate(spectrum: &FrequencySpectrum) -> f64 {
            let t1 = Theta::<Self::T1>::from_spectrum(spectrum).0;
            let t2 = Theta::<Self::T2>::from_spectrum(spectrum).0;
            let deviation = Self::deviation(spectrum);

            if deviation > 0.0 && deviation.is_finite() {
                (t1 - t2) / deviation
            } else {
                f64::NAN
            }
        }
    }
}

/// Tajima's D, contrasting Tajima's and Watterson's estimators.
#[non_exhaustive]
pub struct Tajima;

impl private::Statistic for Tajima {
    type T1 = theta::Tajima;
    type T2 = theta::Watterson;

    fn deviation(spectrum: &FrequencySpectrum) -> f64 {
        // Notation from Tajima (1989), see also Durrett (2008), pp. 65-66
        let n = spectrum.n();
        let s = spectrum.segregating_sites();

        if n < 2 {
            return f64::NAN;
        }

        let a1 = harmonic(n as u64);
        let a2 = p_harmonic(n as u64, 2);

        let b1 = (n + 1) as f64 / (3 * (n - 1)) as f64;
        let b2 = (2 * (n.pow(2) + n + 3)) as f64 / (9 * n * (n - 1)) as f64;

        let c1 = b1 - 1.0 / a1;
        let c2 = b2 - (n + 2) as f64 / (a1 * n as f64) + a2 / a1.powi(2);

        let e1 = c1 / a1;
        let e2 = c2 / (a1.powi(2) + a2);

        (e1 * s + e2 * s * (s - 1.0)).sqrt()
    }
}

/// A neutrality test statistic that can be computed from a spectrum.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait DStatistic: private::Statistic {}
impl<T> DStatistic for T where T: private::Statistic {}

/// A neutrality test statistic contrasting two estimators of θ.
///
/// The value is NaN when the statistic is undefined, which is the case without segregating sites.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct D<S>(pub f64, PhantomData<S>)
where
    S: DStatistic;

impl<S> D<S>
where
    S: DStatistic,
{
    /// Computes the statistic from a spectrum.
    pub fn from_spectrum(spectrum: &FrequencySpectrum) -> Self {
        Self(S::estimate(spectrum), PhantomData)
    }
}
