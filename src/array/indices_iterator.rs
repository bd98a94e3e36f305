use std::iter::FusedIterator;

use super::ArrayIndices;

/// An iterator over every index of an array shape.
///
/// Iterates over the last dimension fastest (i.e. C-contiguous order) by incrementing an index vector.
/// For example, a 2x3 shape produces `[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]`.
///
/// A zero dimensional shape produces a single empty index.
pub struct IndicesIterator<'a> {
    shape: &'a [u64],
    next: Option<ArrayIndices>,
    length: usize,
}

impl<'a> IndicesIterator<'a> {
    /// Create a new indices iterator over `shape`.
    #[must_use]
    pub fn new(shape: &'a [u64]) -> Self {
        let length = usize::try_from(shape.iter().product::<u64>()).unwrap_or(usize::MAX);
        let next = (length > 0).then(|| vec![0; shape.len()]);
        Self {
            shape,
            next,
            length,
        }
    }
}

impl Iterator for IndicesIterator<'_> {
    type Item = ArrayIndices;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.next.take()?;
        let mut next = indices.clone();
        for (index, extent) in next.iter_mut().zip(self.shape).rev() {
            *index += 1;
            if *index < *extent {
                self.next = Some(next);
                break;
            }
            *index = 0;
        }
        self.length -= 1;
        Some(indices)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl ExactSizeIterator for IndicesIterator<'_> {}

impl FusedIterator for IndicesIterator<'_> {}
