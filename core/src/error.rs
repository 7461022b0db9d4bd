//! Errors.

use std::fmt;

use crate::{matrix::IndexError, stat::InvalidInputError, ShapeError};

/// Any error raised by the library.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Inconsistent dimensions at construction.
    Shape(ShapeError),
    /// Out-of-range site or sample index.
    Index(IndexError),
    /// Input outside the domain of a statistic.
    InvalidInput(InvalidInputError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Shape(e) => write!(f, "{e}"),
            Error::Index(e) => write!(f, "{e}"),
            Error::InvalidInput(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Shape(e) => Some(e),
            Error::Index(e) => Some(e),
            Error::InvalidInput(e) => Some(e),
        }
    }
}

impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<IndexError> for Error {
    fn from(e: IndexError) -> Self {
        Self::Index(e)
    }
}

impl From<InvalidInputError> for Error {
    fn from(e: InvalidInputError) -> Self {
        Self::InvalidInput(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        stat::{Classic, Polarity},
        VariantMatrix,
    };

    fn numpoly(sites: &[(f64, &str)]) -> Result<usize, Error> {
        let matrix = VariantMatrix::from_sites(sites.iter().copied())?;
        let classic = Classic::from_matrix(&matrix, &Polarity::default())?;
        Ok(classic.numpoly)
    }

    #[test]
    fn test_question_mark_conversion() {
        assert_eq!(numpoly(&[(0.1, "0110"), (0.2, "0001")]), Ok(2));
        assert_eq!(
            numpoly(&[(0.1, "0110"), (0.2, "001")]),
            Err(Error::Shape(ShapeError::Ragged {
                expected: 4,
                found: 3
            }))
        );
        assert_eq!(
            numpoly(&[(0.1, "0N10")]),
            Err(Error::InvalidInput(InvalidInputError::MissingData {
                site: 0,
                sample: 1
            }))
        );
    }

    #[test]
    fn test_source() {
        let error = Error::from(VariantMatrix::empty(0).unwrap_err());

        assert_eq!(error.to_string(), ShapeError::NoSamples.to_string());
        assert!(std::error::Error::source(&error).is_some());
    }
}
