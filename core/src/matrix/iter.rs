//! Iterators over matrix views.

use std::iter::FusedIterator;

use super::{SampleView, SiteView, VariantMatrix};

/// An iterator over the sites of a matrix.
///
/// See [`VariantMatrix::iter_sites`].
#[derive(Clone, Debug)]
pub struct SitesIter<'a> {
    matrix: &'a VariantMatrix,
    index: usize,
}

impl<'a> SitesIter<'a> {
    pub(super) fn new(matrix: &'a VariantMatrix) -> Self {
        Self { matrix, index: 0 }
    }
}

impl<'a> Iterator for SitesIter<'a> {
    type Item = SiteView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.matrix.site(self.index).ok()?;
        self.index += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.matrix.nsites().saturating_sub(self.index);
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for SitesIter<'a> {}

impl<'a> FusedIterator for SitesIter<'a> {}

/// An iterator over the samples of a matrix.
///
/// See [`VariantMatrix::iter_samples`].
#[derive(Clone, Debug)]
pub struct SamplesIter<'a> {
    matrix: &'a VariantMatrix,
    index: usize,
}

impl<'a> SamplesIter<'a> {
    pub(super) fn new(matrix: &'a VariantMatrix) -> Self {
        Self { matrix, index: 0 }
    }
}

impl<'a> Iterator for SamplesIter<'a> {
    type Item = SampleView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.matrix.sample(self.index).ok()?;
        self.index += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.matrix.nsam().saturating_sub(self.index);
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for SamplesIter<'a> {}

impl<'a> FusedIterator for SamplesIter<'a> {}
