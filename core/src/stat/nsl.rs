//! Haplotype length statistics nSL and iHS.
//!
//! For a focal site and a pair of samples carrying the same call there, the shared haplotype
//! extends outwards in both directions until the first site at which the pair differs, or until
//! the end of the matrix. nSL measures this length in number of sites (Ferrer-Admetlla et al.
//! 2014), while iHS measures it as the distance between the bounding positions. Lengths are
//! averaged over pairs carrying the derived call and pairs carrying the ancestral call, and the
//! statistic is the log ratio of the two averages.

use serde::Serialize;

use crate::{matrix::SampleView, VariantMatrix};

use super::InvalidInputError;

/// The nSL and iHS statistics at a single focal site.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Nsl {
    /// The log ratio of mean shared haplotype length in sites, derived over ancestral.
    pub nsl: f64,
    /// The log ratio of mean shared haplotype length in distance, derived over ancestral.
    pub ihs: f64,
    /// The number of samples carrying the derived call.
    pub derived: usize,
}

/// Computes nSL and iHS at every site of a matrix.
///
/// Calls must be 0 (ancestral) or 1 (derived), and positions must be finite and sorted in
/// non-decreasing order; they are not sorted here. The result has one entry per site, and
/// values are NaN at sites where fewer than two samples carry either call, or where a mean
/// length is zero.
///
/// # Examples
///
/// ```
/// use msstats_core::{stat::nsl, VariantMatrix};
///
/// let matrix = VariantMatrix::from_sites([
///     (0.1, "01010101"),
///     (0.2, "01111111"),
///     (0.3, "00011101"),
/// ])
/// .unwrap();
///
/// let values = nsl(&matrix).unwrap();
///
/// assert_eq!(values.len(), 3);
/// assert!(values[1].nsl.is_nan());
/// ```
pub fn nsl(matrix: &VariantMatrix) -> Result<Vec<Nsl>, InvalidInputError> {
    check_positions(matrix.positions())?;
    check_biallelic(matrix)?;

    let samples = matrix.iter_samples().collect::<Vec<_>>();
    let scanner = Scanner {
        samples: &samples,
        positions: matrix.positions(),
    };

    Ok(matrix
        .iter_sites()
        .map(|site| {
            let (derived, ancestral): (Vec<usize>, Vec<usize>) =
                (0..site.len()).partition(|&i| site.as_slice()[i] == 1);

            let (derived_sites, derived_distance) = scanner.mean_lengths(site.index(), &derived);
            let (ancestral_sites, ancestral_distance) =
                scanner.mean_lengths(site.index(), &ancestral);

            Nsl {
                nsl: log_ratio(derived_sites, ancestral_sites),
                ihs: log_ratio(derived_distance, ancestral_distance),
                derived: derived.len(),
            }
        })
        .collect())
}

struct Scanner<'a> {
    samples: &'a [SampleView<'a>],
    positions: &'a [f64],
}

impl<'a> Scanner<'a> {
    /// Returns the mean shared haplotype length in sites and in distance over all pairs from a
    /// set of samples, or `None` if there are no pairs.
    fn mean_lengths(&self, focal: usize, samples: &[usize]) -> (Option<f64>, Option<f64>) {
        let mut pairs = 0;
        let mut sites = 0;
        let mut distance = 0.0;

        for (i, &a) in samples.iter().enumerate() {
            for &b in &samples[i + 1..] {
                let (pair_sites, pair_distance) = self.shared_length(focal, a, b);
                pairs += 1;
                sites += pair_sites;
                distance += pair_distance;
            }
        }

        if pairs > 0 {
            let pairs = pairs as f64;
            (Some(sites as f64 / pairs), Some(distance / pairs))
        } else {
            (None, None)
        }
    }

    /// Returns the number of consecutive sites around the focal site at which two samples are
    /// identical, and the distance between the first differing sites on either side.
    ///
    /// Where the pair is identical up to the end of the matrix, the outermost site bounds the
    /// distance instead.
    fn shared_length(&self, focal: usize, a: usize, b: usize) -> (usize, f64) {
        let (a, b) = (&self.samples[a], &self.samples[b]);
        let identical = |site: usize| a.get(site) == b.get(site);
        let last = self.positions.len() - 1;

        let mut left = focal;
        while left > 0 && identical(left - 1) {
            left -= 1;
        }
        let mut right = focal;
        while right < last && identical(right + 1) {
            right += 1;
        }

        let sites = right - left + 1;
        let lower = left.saturating_sub(1);
        let upper = (right + 1).min(last);

        (sites, self.positions[upper] - self.positions[lower])
    }
}

fn log_ratio(derived: Option<f64>, ancestral: Option<f64>) -> f64 {
    match (derived, ancestral) {
        (Some(derived), Some(ancestral)) if derived > 0.0 && ancestral > 0.0 => {
            (derived / ancestral).ln()
        }
        _ => f64::NAN,
    }
}

fn check_positions(positions: &[f64]) -> Result<(), InvalidInputError> {
    if let Some(site) = positions.iter().position(|p| !p.is_finite()) {
        return Err(InvalidInputError::NonFinitePosition { site });
    }

    match positions.windows(2).position(|w| w[1] < w[0]) {
        Some(i) => Err(InvalidInputError::UnsortedPositions { site: i + 1 }),
        None => Ok(()),
    }
}

fn check_biallelic(matrix: &VariantMatrix) -> Result<(), InvalidInputError> {
    let nsam = matrix.nsam();

    match matrix
        .as_slice()
        .iter()
        .position(|&call| call != 0 && call != 1)
    {
        Some(i) => Err(InvalidInputError::NonBinary {
            site: i / nsam,
            sample: i % nsam,
            call: matrix.as_slice()[i],
        }),
        None => Ok(()),
    }
}
