//! Variant matrices.
//!
//! A [`VariantMatrix`] stores genotype calls for a number of sites and samples in a single flat
//! buffer in site-major order, together with one genomic position per site.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use serde::{Deserialize, Serialize};

mod filter;
pub use filter::{filter_samples, filter_sites};

pub mod iter;
use iter::{SamplesIter, SitesIter};

pub mod view;
pub use view::{SampleView, SiteView};

/// A single genotype call.
///
/// Biallelic data uses 0 (ancestral/reference) and 1 (derived); multi-allelic data uses small
/// non-negative integers. Negative values are reserved, see [`VariantMatrix::MASK`].
pub type Genotype = i8;

/// Genotype calls and positions for a set of variable sites.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Parts")]
pub struct VariantMatrix {
    data: Vec<Genotype>,
    positions: Vec<f64>,
    nsam: usize,
}

impl VariantMatrix {
    /// The reserved missing-data call.
    pub const MASK: Genotype = -1;

    /// Returns the raw genotype data in site-major order.
    pub fn as_slice(&self) -> &[Genotype] {
        self.data.as_slice()
    }

    /// Returns the raw genotype data in site-major order for mutation.
    ///
    /// The length of the data cannot be changed through this method.
    pub fn as_mut_slice(&mut self) -> &mut [Genotype] {
        self.data.as_mut_slice()
    }

    /// Creates a matrix with `nsam` samples and no sites.
    pub fn empty(nsam: usize) -> Result<Self, ShapeError> {
        if nsam == 0 {
            Err(ShapeError::NoSamples)
        } else {
            Ok(Self::new_unchecked(Vec::new(), Vec::new(), nsam))
        }
    }

    /// Creates a matrix from one string per sample, with one character per site.
    ///
    /// This is the layout of haplotype lines in "ms" output. See [`VariantMatrix::from_sites`]
    /// for the decoding of characters.
    pub fn from_haplotypes<I, S>(positions: Vec<f64>, haplotypes: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nsites = positions.len();
        let mut columns = Vec::new();
        for haplotype in haplotypes {
            let column = decode_calls(haplotype.as_ref())?;
            if column.len() != nsites {
                return Err(ShapeError::Ragged {
                    expected: nsites,
                    found: column.len(),
                });
            }
            columns.push(column);
        }

        let nsam = columns.len();
        if nsites == 0 || nsam == 0 {
            return Err(ShapeError::Empty);
        }

        let mut data = Vec::with_capacity(nsites * nsam);
        for site in 0..nsites {
            data.extend(columns.iter().map(|column| column[site]));
        }

        Ok(Self::new_unchecked(data, positions, nsam))
    }

    /// Creates a matrix from `(position, calls)` pairs, one pair per site.
    ///
    /// Each character of the call string gives the call for one sample: digits decode to their
    /// value, while `N`, `n`, `-`, and `.` decode to [`VariantMatrix::MASK`].
    ///
    /// # Examples
    ///
    /// ```
    /// use msstats_core::VariantMatrix;
    ///
    /// let matrix = VariantMatrix::from_sites([(0.1, "0110"), (0.2, "0001")]).unwrap();
    ///
    /// assert_eq!(matrix.nsam(), 4);
    /// assert_eq!(matrix.nsites(), 2);
    /// ```
    pub fn from_sites<I, S>(sites: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = (f64, S)>,
        S: AsRef<str>,
    {
        let mut data = Vec::new();
        let mut positions = Vec::new();
        let mut nsam = None;

        for (position, calls) in sites {
            let calls = decode_calls(calls.as_ref())?;
            match nsam {
                None => nsam = Some(calls.len()),
                Some(expected) if expected != calls.len() => {
                    return Err(ShapeError::Ragged {
                        expected,
                        found: calls.len(),
                    })
                }
                Some(_) => (),
            }
            data.extend(calls);
            positions.push(position);
        }

        Self::new(data, positions)
    }

    /// Returns the call for a site and sample, if in bounds.
    pub fn get(&self, site: usize, sample: usize) -> Result<Genotype, IndexError> {
        self.flat_index(site, sample).map(|i| self.data[i])
    }

    /// Returns a mutable reference to the call for a site and sample, if in bounds.
    pub fn get_mut(&mut self, site: usize, sample: usize) -> Result<&mut Genotype, IndexError> {
        let i = self.flat_index(site, sample)?;
        Ok(&mut self.data[i])
    }

    /// Returns an iterator over views of the samples in the matrix.
    pub fn iter_samples(&self) -> SamplesIter<'_> {
        SamplesIter::new(self)
    }

    /// Returns an iterator over views of the sites in the matrix.
    pub fn iter_sites(&self) -> SitesIter<'_> {
        SitesIter::new(self)
    }

    /// Creates a matrix from flat site-major data and one position per site.
    ///
    /// The number of sites is the number of positions, and the number of samples is inferred from
    /// the length of the data.
    ///
    /// # Examples
    ///
    /// ```
    /// use msstats_core::VariantMatrix;
    ///
    /// let matrix = VariantMatrix::new(vec![0, 1, 1, 0, 0, 0, 0, 1], vec![0.1, 0.2]).unwrap();
    ///
    /// assert_eq!(matrix.nsam(), 4);
    /// assert_eq!(matrix.site(1).unwrap().to_vec(), vec![0, 0, 0, 1]);
    /// ```
    pub fn new<D, P>(data: D, positions: P) -> Result<Self, ShapeError>
    where
        Vec<Genotype>: From<D>,
        Vec<f64>: From<P>,
    {
        let data = Vec::from(data);
        let positions = Vec::from(positions);

        if data.is_empty() || positions.is_empty() {
            Err(ShapeError::Empty)
        } else if data.len() % positions.len() != 0 {
            Err(ShapeError::Indivisible {
                data: data.len(),
                positions: positions.len(),
            })
        } else {
            let nsam = data.len() / positions.len();
            Ok(Self::new_unchecked(data, positions, nsam))
        }
    }

    pub(crate) fn new_unchecked(data: Vec<Genotype>, positions: Vec<f64>, nsam: usize) -> Self {
        debug_assert_eq!(data.len(), positions.len() * nsam);

        Self {
            data,
            positions,
            nsam,
        }
    }

    /// Returns the number of samples.
    pub fn nsam(&self) -> usize {
        self.nsam
    }

    /// Returns the number of sites.
    pub fn nsites(&self) -> usize {
        self.positions.len()
    }

    /// Returns the site positions.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Returns a view of the calls of one sample across all sites.
    pub fn sample(&self, index: usize) -> Result<SampleView<'_>, IndexError> {
        if index < self.nsam {
            Ok(SampleView::new_unchecked(self, index))
        } else {
            Err(IndexError::new(Axis::Sample, index, self.nsam))
        }
    }

    /// Sets the call for a site and sample.
    pub fn set(&mut self, site: usize, sample: usize, value: Genotype) -> Result<(), IndexError> {
        *self.get_mut(site, sample)? = value;
        Ok(())
    }

    /// Returns a view of the calls of all samples at one site.
    pub fn site(&self, index: usize) -> Result<SiteView<'_>, IndexError> {
        if index < self.nsites() {
            Ok(SiteView::new_unchecked(self, index))
        } else {
            Err(IndexError::new(Axis::Site, index, self.nsites()))
        }
    }

    fn flat_index(&self, site: usize, sample: usize) -> Result<usize, IndexError> {
        if site >= self.nsites() {
            Err(IndexError::new(Axis::Site, site, self.nsites()))
        } else if sample >= self.nsam {
            Err(IndexError::new(Axis::Sample, sample, self.nsam))
        } else {
            Ok(site * self.nsam + sample)
        }
    }
}

impl Index<(usize, usize)> for VariantMatrix {
    type Output = Genotype;

    fn index(&self, (site, sample): (usize, usize)) -> &Self::Output {
        match self.flat_index(site, sample) {
            Ok(i) => &self.data[i],
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<(usize, usize)> for VariantMatrix {
    fn index_mut(&mut self, (site, sample): (usize, usize)) -> &mut Self::Output {
        match self.get_mut(site, sample) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

fn decode_calls(s: &str) -> Result<Vec<Genotype>, ShapeError> {
    s.chars()
        .map(|c| match c {
            '0'..='9' => Ok((c as u8 - b'0') as Genotype),
            'N' | 'n' | '-' | '.' => Ok(VariantMatrix::MASK),
            c => Err(ShapeError::InvalidCall(c)),
        })
        .collect()
}

/// The serialized form of a matrix, validated on deserialization.
#[derive(Deserialize)]
struct Parts {
    data: Vec<Genotype>,
    positions: Vec<f64>,
    nsam: usize,
}

impl TryFrom<Parts> for VariantMatrix {
    type Error = ShapeError;

    fn try_from(parts: Parts) -> Result<Self, Self::Error> {
        let Parts {
            data,
            positions,
            nsam,
        } = parts;

        if data.len() != positions.len() * nsam {
            Err(ShapeError::Mismatch {
                data: data.len(),
                positions: positions.len(),
                nsam,
            })
        } else {
            Ok(Self::new_unchecked(data, positions, nsam))
        }
    }
}

/// An error associated with the dimensions of a matrix.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeError {
    /// No data or no positions were provided.
    Empty,
    /// The length of the data is not a multiple of the number of positions.
    Indivisible {
        /// Length of the data.
        data: usize,
        /// Number of positions.
        positions: usize,
    },
    /// The length of the data does not match the number of positions and samples.
    Mismatch {
        /// Length of the data.
        data: usize,
        /// Number of positions.
        positions: usize,
        /// Number of samples.
        nsam: usize,
    },
    /// A matrix with sites must have at least one sample.
    NoSamples,
    /// Call strings differ in length.
    Ragged {
        /// Length of the first string.
        expected: usize,
        /// Length of the offending string.
        found: usize,
    },
    /// A call string contains a character that does not encode a call.
    InvalidCall(char),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Empty => f.write_str("cannot construct matrix from empty data"),
            ShapeError::Indivisible { data, positions } => write!(
                f,
                "cannot construct matrix from {data} calls and {positions} positions: \
                number of calls must be a multiple of number of positions"
            ),
            ShapeError::Mismatch {
                data,
                positions,
                nsam,
            } => write!(
                f,
                "cannot construct matrix with {positions} sites and {nsam} samples \
                from {data} calls"
            ),
            ShapeError::NoSamples => f.write_str("matrix must have at least one sample"),
            ShapeError::Ragged { expected, found } => write!(
                f,
                "expected call string of length {expected}, found length {found}"
            ),
            ShapeError::InvalidCall(c) => write!(f, "invalid genotype call character '{c}'"),
        }
    }
}

impl std::error::Error for ShapeError {}

/// The axis of a matrix.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis {
    /// Rows, one per site.
    Site,
    /// Columns, one per sample.
    Sample,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Site => f.write_str("site"),
            Axis::Sample => f.write_str("sample"),
        }
    }
}

/// An error when indexing out of bounds of a matrix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexError {
    axis: Axis,
    index: usize,
    len: usize,
}

impl IndexError {
    fn new(axis: Axis, index: usize, len: usize) -> Self {
        Self { axis, index, len }
    }

    /// Returns the axis that was indexed.
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let IndexError { axis, index, len } = self;
        write!(
            f,
            "{axis} index {index} out of bounds for matrix with {len} {axis}s"
        )
    }
}

impl std::error::Error for IndexError {}
