use std::iter::FusedIterator;

use crate::Genotype;

/// An iterator over the calls in a view.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    data: &'a [Genotype],
    stride: usize,
    front: usize,
    back: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(data: &'a [Genotype], stride: usize, len: usize) -> Self {
        Self {
            data,
            stride,
            front: 0,
            back: len,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Genotype;

    fn next(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.front += 1;
            self.data[(self.front - 1) * self.stride]
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.back -= 1;
            self.data[self.back * self.stride]
        })
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> FusedIterator for Iter<'a> {}
