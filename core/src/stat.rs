//! Summary statistics.
//!
//! Statistics are computed from a [`VariantMatrix`](crate::VariantMatrix) and never modify it.
//! Each family declares the calls it accepts and returns an [`InvalidInputError`] otherwise.
//! Values that are mathematically undefined for valid input, such as Tajima's D without
//! segregating sites, are reported as NaN.

use std::fmt;

use crate::Genotype;

pub mod classic;
pub use classic::Classic;

pub mod counts;
pub use counts::{process_variable_sites, Polarity, StateCounts};

pub mod d;
pub use d::D;

pub mod garud;
pub use garud::Garud;

pub mod nsl;
pub use nsl::{nsl, Nsl};

mod record;
pub use record::Record;

pub mod spectrum;
pub use spectrum::FrequencySpectrum;

pub mod theta;
pub use theta::Theta;

/// An error when the input to a statistic is outside its domain.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidInputError {
    /// A missing or negative call where complete data is required.
    MissingData {
        /// Site index.
        site: usize,
        /// Sample index.
        sample: usize,
    },
    /// A call other than 0 or 1 where biallelic data is required.
    NonBinary {
        /// Site index.
        site: usize,
        /// Sample index.
        sample: usize,
        /// The offending call.
        call: Genotype,
    },
    /// A position that is not a finite number.
    NonFinitePosition {
        /// Site index.
        site: usize,
    },
    /// A position smaller than that of the preceding site.
    UnsortedPositions {
        /// Site index.
        site: usize,
    },
    /// Per-site ancestral states that do not match the number of sites.
    PolarityLength {
        /// Number of sites.
        expected: usize,
        /// Number of ancestral states.
        found: usize,
    },
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInputError::MissingData { site, sample } => write!(
                f,
                "missing data for sample {sample} at site {site}, complete data required"
            ),
            InvalidInputError::NonBinary { site, sample, call } => write!(
                f,
                "call {call} for sample {sample} at site {site}, only 0 and 1 allowed"
            ),
            InvalidInputError::NonFinitePosition { site } => {
                write!(f, "position of site {site} is not finite")
            }
            InvalidInputError::UnsortedPositions { site } => write!(
                f,
                "position of site {site} is smaller than the preceding position, \
                sorted positions required"
            ),
            InvalidInputError::PolarityLength { expected, found } => write!(
                f,
                "expected {expected} ancestral states (one per site), found {found}"
            ),
        }
    }
}

impl std::error::Error for InvalidInputError {}
