//! Haplotype homozygosity statistics of Garud et al. (2015).

use indexmap::IndexMap;
use serde::Serialize;

use crate::VariantMatrix;

use super::Record;

/// Haplotype homozygosity statistics.
///
/// Each sample's calls across all sites form one haplotype. With haplotype class frequencies
/// sorted in descending order as p₁, p₂, ..., H1 is the sum of squared frequencies, H12 pools the
/// two most common classes, H123 the three most common, and H2 leaves out the most common.
/// Missing classes have frequency zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Garud {
    /// Haplotype homozygosity.
    pub h1: f64,
    /// Homozygosity with the two most common classes pooled.
    pub h12: f64,
    /// Homozygosity with the three most common classes pooled.
    pub h123: f64,
    /// Homozygosity without the most common class.
    pub h2: f64,
    /// The ratio H2/H1.
    pub h2h1: f64,
}

impl Garud {
    /// Computes the statistics from the samples of a matrix.
    ///
    /// Any calls are accepted, including missing calls, which must match exactly for two
    /// haplotypes to be identical. All values are NaN for a matrix without samples.
    pub fn from_matrix(matrix: &VariantMatrix) -> Self {
        let frequencies = haplotype_frequencies(matrix);
        let p = |i: usize| frequencies.get(i).copied().unwrap_or(0.0);

        let h1 = frequencies.iter().map(|f| f * f).sum::<f64>();
        let h12 = h1 + 2.0 * p(0) * p(1);
        let h123 = h12 + 2.0 * p(0) * p(2) + 2.0 * p(1) * p(2);
        let h2 = h1 - p(0).powi(2);

        if frequencies.is_empty() {
            Self {
                h1: f64::NAN,
                h12: f64::NAN,
                h123: f64::NAN,
                h2: f64::NAN,
                h2h1: f64::NAN,
            }
        } else {
            Self {
                h1,
                h12,
                h123,
                h2,
                h2h1: h2 / h1,
            }
        }
    }
}

impl From<&Garud> for Record {
    fn from(garud: &Garud) -> Self {
        Record::from_iter([
            ("h1", garud.h1),
            ("h12", garud.h12),
            ("h123", garud.h123),
            ("h2", garud.h2),
            ("h2h1", garud.h2h1),
        ])
    }
}

/// Returns haplotype class frequencies in descending order.
///
/// Ties keep the order in which classes were first encountered.
fn haplotype_frequencies(matrix: &VariantMatrix) -> Vec<f64> {
    let mut classes = IndexMap::new();
    for sample in matrix.iter_samples() {
        *classes.entry(sample).or_insert(0usize) += 1;
    }

    let mut counts = classes.into_values().collect::<Vec<_>>();
    counts.sort_by(|a, b| b.cmp(a));

    let nsam = matrix.nsam() as f64;
    counts.into_iter().map(|count| count as f64 / nsam).collect()
}
