//! Unfolded frequency spectrum of segregating sites.

use std::ops::Index;

use crate::VariantMatrix;

use super::{InvalidInputError, Polarity, StateCounts};

/// The number of segregating sites by derived allele count.
///
/// The spectrum has `n + 1` entries for sample size `n`, where entry `k` counts the segregating
/// sites at which `k` samples carry a derived call.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencySpectrum {
    counts: Vec<f64>,
}

impl FrequencySpectrum {
    /// Returns the spectrum as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.counts
    }

    /// Returns the number of sites with exactly one derived call.
    pub fn derived_singletons(&self) -> f64 {
        self.counts.get(1).copied().unwrap_or(0.0)
    }

    /// Creates a spectrum from counts indexed by derived allele count.
    pub fn from_counts<C>(counts: C) -> Self
    where
        Vec<f64>: From<C>,
    {
        let mut counts = Vec::from(counts);
        if counts.is_empty() {
            counts.push(0.0);
        }

        Self { counts }
    }

    /// Creates a spectrum from the segregating sites of a matrix.
    ///
    /// Monomorphic sites are skipped. The matrix must not contain missing calls.
    pub fn from_matrix(
        matrix: &VariantMatrix,
        polarity: &Polarity,
    ) -> Result<Self, InvalidInputError> {
        polarity.check(matrix)?;

        let mut counts = vec![0.0; matrix.nsam() + 1];

        for site in matrix.iter_sites() {
            if let Some(sample) = site.iter().position(|call| call < 0) {
                return Err(InvalidInputError::MissingData {
                    site: site.index(),
                    sample,
                });
            }

            let state_counts = StateCounts::from_site(site, polarity.ancestral(site.index()));
            if state_counts.is_polymorphic() {
                counts[state_counts.derived() as usize] += 1.0;
            }
        }

        Ok(Self { counts })
    }

    /// Returns the sample size.
    pub fn n(&self) -> usize {
        self.counts.len() - 1
    }

    /// Returns the number of segregating sites.
    pub fn segregating_sites(&self) -> f64 {
        self.counts.iter().fold(0.0, |acc, x| acc + x)
    }

    /// Returns the number of sites where exactly one sample differs from the rest.
    pub fn singletons(&self) -> f64 {
        let n = self.n();

        match n {
            0 | 1 => 0.0,
            2 => self[1],
            n => self[1] + self[n - 1],
        }
    }
}

impl Index<usize> for FrequencySpectrum {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.counts[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_matrix() {
        let matrix = VariantMatrix::from_sites([
            (0.1, "0110"),
            (0.2, "0001"),
            (0.3, "1110"),
            (0.4, "0000"),
            (0.5, "1000"),
        ])
        .unwrap();

        let spectrum = FrequencySpectrum::from_matrix(&matrix, &Polarity::default()).unwrap();

        assert_eq!(spectrum.n(), 4);
        assert_eq!(spectrum.as_slice(), &[0.0, 2.0, 1.0, 1.0, 0.0]);
        assert_eq!(spectrum.segregating_sites(), 4.0);
        assert_eq!(spectrum.singletons(), 3.0);
        assert_eq!(spectrum.derived_singletons(), 2.0);
    }

    #[test]
    fn test_from_matrix_unknown_polarity_folds() {
        let matrix = VariantMatrix::from_sites([(0.1, "1110"), (0.2, "0001")]).unwrap();

        let spectrum = FrequencySpectrum::from_matrix(&matrix, &Polarity::Unknown).unwrap();

        assert_eq!(spectrum.as_slice(), &[0.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(spectrum.singletons(), spectrum.derived_singletons());
    }

    #[test]
    fn test_from_matrix_per_site_polarity() {
        let matrix = VariantMatrix::from_sites([(0.1, "1110"), (0.2, "0001")]).unwrap();

        let spectrum =
            FrequencySpectrum::from_matrix(&matrix, &Polarity::PerSite(vec![1, 0])).unwrap();

        assert_eq!(spectrum.as_slice(), &[0.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_matrix_missing_data() {
        let matrix = VariantMatrix::from_sites([(0.1, "0110"), (0.2, "00N1")]).unwrap();

        assert_eq!(
            FrequencySpectrum::from_matrix(&matrix, &Polarity::default()),
            Err(InvalidInputError::MissingData { site: 1, sample: 2 })
        );
    }

    #[test]
    fn test_singletons_two_samples() {
        let spectrum = FrequencySpectrum::from_counts([0.0, 3.0, 0.0]);

        assert_eq!(spectrum.singletons(), 3.0);
    }
}
