//! Matrix views.
//!
//! Views borrow the storage of a [`VariantMatrix`] and never copy it. A [`SiteView`] covers one
//! contiguous row of calls, while a [`SampleView`] covers one strided column.

use std::hash::{Hash, Hasher};

use super::{Genotype, VariantMatrix};

mod iter;
pub use iter::Iter;

/// A view of the calls of all samples at a single site.
///
/// See [`VariantMatrix::site`] and [`VariantMatrix::iter_sites`] for methods to obtain site views.
#[derive(Clone, Copy, Debug)]
pub struct SiteView<'a> {
    data: &'a [Genotype],
    index: usize,
    position: f64,
}

impl<'a> SiteView<'a> {
    /// Returns the calls at the site as a slice.
    pub fn as_slice(&self) -> &'a [Genotype] {
        self.data
    }

    /// Returns the call of a sample at the site.
    pub fn get(&self, sample: usize) -> Option<Genotype> {
        self.data.get(sample).copied()
    }

    /// Returns the index of the site in the matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if the site has no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns an iterator over the calls at the site in sample order.
    pub fn iter(&self) -> Iter<'a> {
        Iter::new(self.data, 1, self.data.len())
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub(super) fn new_unchecked(matrix: &'a VariantMatrix, index: usize) -> Self {
        let start = index * matrix.nsam;

        Self {
            data: &matrix.data[start..start + matrix.nsam],
            index,
            position: matrix.positions[index],
        }
    }

    /// Returns the position of the site.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Returns an owned copy of the calls at the site.
    pub fn to_vec(&self) -> Vec<Genotype> {
        self.data.to_vec()
    }
}

impl<'a> IntoIterator for SiteView<'a> {
    type Item = Genotype;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view of the calls of a single sample across all sites.
///
/// Two sample views compare equal when their calls are equal, regardless of which sample or
/// matrix they were taken from. This is haplotype identity.
///
/// See [`VariantMatrix::sample`] and [`VariantMatrix::iter_samples`] for methods to obtain sample
/// views.
#[derive(Clone, Copy, Debug)]
pub struct SampleView<'a> {
    data: &'a [Genotype], // first element is the call at the first site
    stride: usize,
    len: usize,
    index: usize,
}

impl<'a> SampleView<'a> {
    /// Returns the call of the sample at a site.
    pub fn get(&self, site: usize) -> Option<Genotype> {
        (site < self.len).then(|| self.data[site * self.stride])
    }

    /// Returns the index of the sample in the matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if the matrix has no sites.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the calls of the sample in site order.
    pub fn iter(&self) -> Iter<'a> {
        Iter::new(self.data, self.stride, self.len)
    }

    /// Returns the number of sites.
    pub fn len(&self) -> usize {
        self.len
    }

    pub(super) fn new_unchecked(matrix: &'a VariantMatrix, index: usize) -> Self {
        Self {
            data: matrix.data.get(index..).unwrap_or(&[]),
            stride: matrix.nsam,
            len: matrix.nsites(),
            index,
        }
    }

    /// Returns an owned copy of the calls of the sample.
    pub fn to_vec(&self) -> Vec<Genotype> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for SampleView<'a> {
    type Item = Genotype;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> PartialEq for SampleView<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<'a> Eq for SampleView<'a> {}

impl<'a> Hash for SampleView<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|call| call.hash(state));
    }
}
