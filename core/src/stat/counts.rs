//! Allele state counts per site.

use crate::{matrix::SiteView, Genotype, VariantMatrix};

use super::InvalidInputError;

/// The convention used to tell derived from ancestral calls.
#[derive(Clone, Debug, PartialEq)]
pub enum Polarity {
    /// The same ancestral state at every site.
    ///
    /// Data simulated with "ms" uses 0.
    Ancestral(Genotype),
    /// One ancestral state per site.
    PerSite(Vec<Genotype>),
    /// Ancestral states are unknown, and the minor allele is treated as derived.
    Unknown,
}

impl Polarity {
    /// Returns the ancestral state of a site, if known.
    pub fn ancestral(&self, site: usize) -> Option<Genotype> {
        match self {
            Polarity::Ancestral(state) => Some(*state),
            Polarity::PerSite(states) => states.get(site).copied(),
            Polarity::Unknown => None,
        }
    }

    pub(crate) fn check(&self, matrix: &VariantMatrix) -> Result<(), InvalidInputError> {
        match self {
            Polarity::PerSite(states) if states.len() != matrix.nsites() => {
                Err(InvalidInputError::PolarityLength {
                    expected: matrix.nsites(),
                    found: states.len(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for Polarity {
    fn default() -> Self {
        Self::Ancestral(0)
    }
}

/// The number of samples carrying each state at a site.
///
/// Missing calls (any negative value) are not counted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StateCounts {
    counts: Vec<u32>,
    n: u32,
    ancestral: Option<Genotype>,
}

impl StateCounts {
    /// Returns the ancestral state, if known.
    pub fn ancestral(&self) -> Option<Genotype> {
        self.ancestral
    }

    /// Returns the number of samples carrying a state.
    pub fn count(&self, state: Genotype) -> u32 {
        usize::try_from(state)
            .ok()
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the counts indexed by state.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Returns the number of derived calls.
    ///
    /// If the ancestral state is unknown, this is the number of calls not carrying the most common
    /// state.
    pub fn derived(&self) -> u32 {
        match self.ancestral {
            Some(ancestral) => self.n - self.count(ancestral),
            None => self.n - self.counts.iter().max().copied().unwrap_or(0),
        }
    }

    /// Counts the states at a site.
    pub fn from_site(site: SiteView<'_>, ancestral: Option<Genotype>) -> Self {
        let mut counts = Vec::new();
        let mut n = 0;

        for call in site.iter().filter_map(|call| usize::try_from(call).ok()) {
            if call >= counts.len() {
                counts.resize(call + 1, 0);
            }
            counts[call] += 1;
            n += 1;
        }

        Self {
            counts,
            n,
            ancestral,
        }
    }

    /// Returns `true` if more than one state is observed.
    pub fn is_polymorphic(&self) -> bool {
        self.states() > 1
    }

    /// Returns the number of non-missing calls.
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Returns the number of distinct states observed.
    pub fn states(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }
}

/// Counts the states at every site of a matrix.
pub fn process_variable_sites(
    matrix: &VariantMatrix,
    polarity: &Polarity,
) -> Result<Vec<StateCounts>, InvalidInputError> {
    polarity.check(matrix)?;

    Ok(matrix
        .iter_sites()
        .map(|site| {
            let ancestral = polarity.ancestral(site.index());
            StateCounts::from_site(site, ancestral)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_counts() {
        let matrix = VariantMatrix::from_sites([(0.1, "0120N1")]).unwrap();
        let counts = StateCounts::from_site(matrix.site(0).unwrap(), Some(0));

        assert_eq!(counts.counts(), &[2, 2, 1]);
        assert_eq!(counts.n(), 5);
        assert_eq!(counts.count(1), 2);
        assert_eq!(counts.count(7), 0);
        assert_eq!(counts.count(VariantMatrix::MASK), 0);
        assert_eq!(counts.states(), 3);
        assert!(counts.is_polymorphic());
        assert_eq!(counts.derived(), 3);
    }

    #[test]
    fn test_state_counts_unknown_polarity() {
        let matrix = VariantMatrix::from_sites([(0.1, "1110")]).unwrap();

        let polarized = StateCounts::from_site(matrix.site(0).unwrap(), Some(0));
        assert_eq!(polarized.derived(), 3);

        let unpolarized = StateCounts::from_site(matrix.site(0).unwrap(), None);
        assert_eq!(unpolarized.derived(), 1);
    }

    #[test]
    fn test_process_variable_sites() {
        let matrix = VariantMatrix::from_sites([(0.1, "0110"), (0.2, "1111")]).unwrap();

        let counts = process_variable_sites(&matrix, &Polarity::PerSite(vec![0, 1])).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].derived(), 2);
        assert_eq!(counts[1].derived(), 0);
        assert!(!counts[1].is_polymorphic());
        assert_eq!(counts[1].ancestral(), Some(1));
    }

    #[test]
    fn test_process_variable_sites_polarity_length() {
        let matrix = VariantMatrix::from_sites([(0.1, "0110"), (0.2, "1111")]).unwrap();

        assert_eq!(
            process_variable_sites(&matrix, &Polarity::PerSite(vec![0])),
            Err(InvalidInputError::PolarityLength {
                expected: 2,
                found: 1
            })
        );
    }
}
