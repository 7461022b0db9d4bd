//! Estimators of the population mutation rate θ.

use std::marker::PhantomData;

use crate::utils::{harmonic, pairs};

use super::FrequencySpectrum;

mod private {
    use super::*;

    pub trait Estimator {
        fn weight(k: usize, n: usize) -> f64;

        fn estimate(spectrum: &FrequencySpectrum) -> f64 {
            let n = spectrum.n();

            spectrum
                .as_slice()
                .iter()
                .enumerate()
                .filter(|(_, &v)| v > 0.0)
                .map(|(k, &v)| Self::weight(k, n) * v)
                .fold(0.0, |acc, x| acc + x)
        }
    }
}

/// An estimator of θ as a weighted sum over a spectrum.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait ThetaEstimator: private::Estimator {}
impl<T> ThetaEstimator for T where T: private::Estimator {}

/// Tajima's estimator, the mean number of pairwise differences.
#[non_exhaustive]
pub struct Tajima;

impl private::Estimator for Tajima {
    #[inline]
    fn weight(k: usize, n: usize) -> f64 {
        (k * (n - k)) as f64 / pairs(n as u64)
    }
}

/// Watterson's estimator, the number of segregating sites scaled by sample size.
#[non_exhaustive]
pub struct Watterson;

impl private::Estimator for Watterson {
    #[inline]
    fn weight(_: usize, n: usize) -> f64 {
        1.0 / harmonic(n as u64)
    }
}

/// Fay and Wu's estimator, weighting sites by squared derived allele count.
#[non_exhaustive]
pub struct FayWu;

impl private::Estimator for FayWu {
    fn weight(k: usize, n: usize) -> f64 {
        k.pow(2) as f64 / pairs(n as u64)
    }
}

/// An estimate of θ based on a particular estimator.
///
/// Estimates are per region, not per base.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Theta<E>(pub f64, PhantomData<E>)
where
    E: ThetaEstimator;

impl<E> Theta<E>
where
    E: ThetaEstimator,
{
    /// Computes the estimate from a spectrum.
    pub fn from_spectrum(spectrum: &FrequencySpectrum) -> Self {
        Self(E::estimate(spectrum), PhantomData)
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;

    // Recreating the spectrum based on the data from Ward et al. (1991) in Durrett (2008) p. 30 -
    // or, rather, the one that Durrett counts, on p. 40, though his counts are off
    pub fn spectrum_ward() -> FrequencySpectrum {
        const COUNTS: [(usize, usize); 13] = [
            (1, 6),
            (2, 2),
            (3, 3),
            (4, 1),
            (6, 4),
            (7, 1),
            (10, 1),
            (12, 2),
            (13, 1),
            (23, 1),
            (24, 1),
            (25, 1),
            (28, 2),
        ];

        let mut counts = vec![0.0; 64];
        for (i, v) in COUNTS {
            counts[i] = v as f64;
        }

        FrequencySpectrum::from_counts(counts)
    }

    // Recreating the spectrum based on the data from Aquadro and Greenberg (1983)
    // in Durrett (2008) p. 44
    pub fn spectrum_aquadro() -> FrequencySpectrum {
        FrequencySpectrum::from_counts([0.0, 34.0, 6.0, 4.0, 0.0, 0.0, 0.0, 0.0])
    }

    // Recreating the spectrum based on the data from Hamblin and Aquadro (1996)
    // in Durrett (2008) p. 68 (without multiallelics as listed on p. 69)
    pub fn spectrum_hamblin() -> FrequencySpectrum {
        FrequencySpectrum::from_counts([
            0.0, 1.0, 11.0, 4.0, 7.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ])
    }

    #[test]
    fn test_theta_watterson_ward() {
        assert_approx_eq!(
            Theta::<Watterson>::from_spectrum(&spectrum_ward()).0,
            5.517367
        );
    }

    #[test]
    fn test_theta_tajima_ward() {
        assert_approx_eq!(Theta::<Tajima>::from_spectrum(&spectrum_ward()).0, 5.285202);
    }

    #[test]
    fn test_theta_watterson_aquadro() {
        assert_approx_eq!(
            Theta::<Watterson>::from_spectrum(&spectrum_aquadro()).0,
            17.959184
        );
    }

    #[test]
    fn test_theta_tajima_aquadro() {
        assert_approx_eq!(
            Theta::<Tajima>::from_spectrum(&spectrum_aquadro()).0,
            14.857143
        );
    }

    #[test]
    fn test_theta_fay_wu_aquadro() {
        // (34 + 6 * 4 + 4 * 9) / 21
        assert_approx_eq!(
            Theta::<FayWu>::from_spectrum(&spectrum_aquadro()).0,
            94.0 / 21.0
        );
    }

    #[test]
    fn test_theta_without_segregating_sites() {
        let spectrum = FrequencySpectrum::from_counts([0.0, 0.0]);

        assert_eq!(Theta::<Watterson>::from_spectrum(&spectrum).0, 0.0);
        assert_eq!(Theta::<Tajima>::from_spectrum(&spectrum).0, 0.0);
        assert_eq!(Theta::<FayWu>::from_spectrum(&spectrum).0, 0.0);
    }

    #[test]
    fn test_theta_without_segregating_sites_is_positive_zero() {
        let spectrum = FrequencySpectrum::from_counts([0.0, 0.0, 0.0, 0.0, 0.0]);

        let watterson = Theta::<Watterson>::from_spectrum(&spectrum).0;
        let tajima = Theta::<Tajima>::from_spectrum(&spectrum).0;
        let fay_wu = Theta::<FayWu>::from_spectrum(&spectrum).0;

        assert!(watterson.is_sign_positive());
        assert!(tajima.is_sign_positive());
        assert!(fay_wu.is_sign_positive());
    }
}
