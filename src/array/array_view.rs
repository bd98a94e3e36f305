use thiserror::Error;

use super::{ArrayShape, IndicesIterator};

/// An array view create error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArrayViewCreateError {
    /// The shape and strides have a different number of dimensions.
    #[error("shape {0:?} and strides {1:?} have a different dimensionality")]
    IncompatibleDimensionality(ArrayShape, Vec<isize>),
    /// A dimension has a zero extent.
    #[error("shape {0:?} has a zero extent")]
    ZeroExtent(ArrayShape),
    /// The number of elements in the shape does not fit in a `u64`.
    #[error("shape {0:?} has too many elements")]
    TooManyElements(ArrayShape),
    /// The data length does not match a contiguous shape.
    #[error("data length {actual} does not match shape {shape:?} with {expected} elements")]
    InvalidDataLength {
        /// The shape of the view.
        shape: ArrayShape,
        /// The number of elements in the shape.
        expected: u64,
        /// The length of the data.
        actual: usize,
    },
    /// The shape, strides and offset address elements outside of the data.
    #[error("shape {shape:?} with strides {strides:?} and offset {offset} is out of bounds for data length {len}")]
    OutOfBounds {
        /// The shape of the view.
        shape: ArrayShape,
        /// The strides of the view.
        strides: Vec<isize>,
        /// The offset of the first element.
        offset: usize,
        /// The length of the data.
        len: usize,
    },
    /// Two distinct indices address the same element.
    #[error("shape {0:?} with strides {1:?} addresses the same element more than once")]
    Aliasing(ArrayShape, Vec<isize>),
    /// A dimension is out of bounds of the view.
    #[error("dimension {0} is out of bounds for a view with {1} dimensions")]
    DimensionOutOfBounds(usize, usize),
    /// An index is out of bounds of a dimension.
    #[error("index {index} is out of bounds for dimension {dimension} with extent {extent}")]
    IndexOutOfBounds {
        /// The dimension.
        dimension: usize,
        /// The index.
        index: u64,
        /// The extent of the dimension.
        extent: u64,
    },
}

/// Returns the strides of a C-contiguous (row-major) array with `shape`.
///
/// Returns [`None`] if a stride does not fit in an `isize`.
#[must_use]
pub fn contiguous_strides(shape: &[u64]) -> Option<Vec<isize>> {
    let mut strides = vec![1isize; shape.len()];
    for i in (1..shape.len()).rev() {
        let extent = isize::try_from(shape[i]).ok()?;
        strides[i - 1] = strides[i].checked_mul(extent)?;
    }
    Some(strides)
}

/// Returns the number of elements in `shape`, or [`None`] if it does not fit in a `u64`.
fn checked_num_elements(shape: &[u64]) -> Option<u64> {
    shape
        .iter()
        .try_fold(1u64, |num_elements, &extent| num_elements.checked_mul(extent))
}

/// The shape, strides and offset of a view into a slice.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Layout {
    shape: ArrayShape,
    strides: Vec<isize>,
    offset: usize,
}

impl Layout {
    fn contiguous(shape: ArrayShape, len: usize) -> Result<Self, ArrayViewCreateError> {
        let Some(expected) = checked_num_elements(&shape) else {
            return Err(ArrayViewCreateError::TooManyElements(shape));
        };
        if u64::try_from(len).ok() != Some(expected) {
            return Err(ArrayViewCreateError::InvalidDataLength {
                shape,
                expected,
                actual: len,
            });
        }
        // Every extent fits in the slice, so the strides fit in an isize
        let Some(strides) = contiguous_strides(&shape) else {
            return Err(ArrayViewCreateError::TooManyElements(shape));
        };
        Self::new(shape, strides, 0, len)
    }

    /// Create a layout where distinct indices address distinct positions.
    fn new_exclusive(
        shape: ArrayShape,
        strides: Vec<isize>,
        offset: usize,
        len: usize,
    ) -> Result<Self, ArrayViewCreateError> {
        let layout = Self::new(shape, strides, offset, len)?;
        if layout.is_aliasing(len) {
            return Err(ArrayViewCreateError::Aliasing(layout.shape, layout.strides));
        }
        Ok(layout)
    }

    /// Create a layout addressing positions within a slice of `len` elements.
    ///
    /// Distinct indices may address the same position.
    fn new(
        shape: ArrayShape,
        strides: Vec<isize>,
        offset: usize,
        len: usize,
    ) -> Result<Self, ArrayViewCreateError> {
        if shape.len() != strides.len() {
            return Err(ArrayViewCreateError::IncompatibleDimensionality(
                shape, strides,
            ));
        }
        if shape.contains(&0) {
            return Err(ArrayViewCreateError::ZeroExtent(shape));
        }
        if checked_num_elements(&shape).is_none() {
            return Err(ArrayViewCreateError::TooManyElements(shape));
        }

        let mut min = offset as i128;
        let mut max = offset as i128;
        for (&extent, &stride) in std::iter::zip(&shape, &strides) {
            let span = i128::from(extent - 1) * stride as i128;
            if span < 0 {
                min += span;
            } else {
                max += span;
            }
        }
        if min < 0 || max >= len as i128 {
            return Err(ArrayViewCreateError::OutOfBounds {
                shape,
                strides,
                offset,
                len,
            });
        }

        Ok(Self {
            shape,
            strides,
            offset,
        })
    }

    /// Returns true if two distinct indices address the same position.
    ///
    /// Layouts where each stride, sorted by magnitude, steps past every position reachable through the smaller strides are accepted without visiting positions.
    /// Other layouts, such as interleaved strides, are checked position by position.
    fn is_aliasing(&self, len: usize) -> bool {
        let mut dimensions: Vec<(u64, u128)> = std::iter::zip(&self.shape, &self.strides)
            .filter(|(extent, _)| **extent > 1)
            .map(|(&extent, &stride)| (extent, stride.unsigned_abs() as u128))
            .collect();
        dimensions.sort_by_key(|&(_, stride)| stride);
        let mut reach: u128 = 0;
        let mut nested = true;
        for (extent, stride) in dimensions {
            if stride == 0 {
                return true;
            }
            if stride <= reach {
                nested = false;
                break;
            }
            reach = reach.saturating_add(u128::from(extent - 1) * stride);
        }
        !nested && !self.has_distinct_positions(len)
    }

    fn has_distinct_positions(&self, len: usize) -> bool {
        // More elements than positions cannot be distinct
        if u64::try_from(len).map_or(false, |len| self.num_elements() > len) {
            return false;
        }
        let mut positions: Vec<usize> = IndicesIterator::new(&self.shape)
            .map(|indices| self.position_unchecked(&indices))
            .collect();
        positions.sort_unstable();
        positions.windows(2).all(|pair| pair[0] != pair[1])
    }

    /// The product is checked on construction and binding only removes dimensions.
    fn num_elements(&self) -> u64 {
        self.shape.iter().product()
    }

    fn is_contiguous(&self) -> bool {
        contiguous_strides(&self.shape).is_some_and(|contiguous| {
            std::iter::zip(std::iter::zip(&self.shape, &self.strides), contiguous)
                .all(|((&extent, &stride), contiguous)| extent == 1 || stride == contiguous)
        })
    }

    fn position(&self, indices: &[u64]) -> Option<usize> {
        if indices.len() != self.shape.len()
            || std::iter::zip(indices, &self.shape).any(|(index, extent)| index >= extent)
        {
            return None;
        }
        Some(self.position_unchecked(indices))
    }

    /// The indices must be in bounds.
    fn position_unchecked(&self, indices: &[u64]) -> usize {
        let position = std::iter::zip(indices, &self.strides)
            .fold(self.offset as isize, |position, (&index, &stride)| {
                position + index as isize * stride
            });
        position as usize
    }

    fn bind_at(&self, dimension: usize, index: u64) -> Result<Self, ArrayViewCreateError> {
        let Some(&extent) = self.shape.get(dimension) else {
            return Err(ArrayViewCreateError::DimensionOutOfBounds(
                dimension,
                self.shape.len(),
            ));
        };
        if index >= extent {
            return Err(ArrayViewCreateError::IndexOutOfBounds {
                dimension,
                index,
                extent,
            });
        }
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.remove(dimension);
        let stride = strides.remove(dimension);
        let offset = (self.offset as isize + index as isize * stride) as usize;
        Ok(Self {
            shape,
            strides,
            offset,
        })
    }

    fn inner_dimension(&self) -> Result<usize, ArrayViewCreateError> {
        self.shape
            .len()
            .checked_sub(1)
            .ok_or(ArrayViewCreateError::DimensionOutOfBounds(0, 0))
    }
}

/// A read-only N-dimensional view of elements in a caller owned slice.
///
/// Element `indices` of the view are at position `offset + sum(indices[i] * strides[i])` of the slice.
/// Strides are counted in elements and can be negative or zero.
/// Every extent is positive.
/// Distinct indices of a read-only view may address the same element, e.g. a broadcast with a zero stride.
#[derive(Clone, Debug)]
pub struct ArrayView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

impl<'a, T> ArrayView<'a, T> {
    /// Create a C-contiguous (row-major) view of `data` with `shape`.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if the number of elements in `shape` is not the length of `data` or an extent is zero.
    pub fn from_shape(shape: ArrayShape, data: &'a [T]) -> Result<Self, ArrayViewCreateError> {
        let layout = Layout::contiguous(shape, data.len())?;
        Ok(Self { data, layout })
    }

    /// Create a view of `data` with explicit `strides` and the `offset` of the element at the origin.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if the view addresses an element outside of `data` or an extent is zero.
    pub fn from_shape_strides(
        shape: ArrayShape,
        strides: Vec<isize>,
        offset: usize,
        data: &'a [T],
    ) -> Result<Self, ArrayViewCreateError> {
        let layout = Layout::new(shape, strides, offset, data.len())?;
        Ok(Self { data, layout })
    }

    /// Returns the shape of the view.
    #[must_use]
    pub fn shape(&self) -> &[u64] {
        &self.layout.shape
    }

    /// Returns the strides of the view in elements.
    #[must_use]
    pub fn strides(&self) -> &[isize] {
        &self.layout.strides
    }

    /// Returns the number of dimensions of the view.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.layout.shape.len()
    }

    /// Returns the number of elements in the view.
    #[must_use]
    pub fn num_elements(&self) -> u64 {
        self.layout.num_elements()
    }

    /// Returns true if the elements are C-contiguous in the underlying slice.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Returns the element at `indices`, or [`None`] if `indices` are out of bounds.
    #[must_use]
    pub fn get(&self, indices: &[u64]) -> Option<&'a T> {
        let data: &'a [T] = self.data;
        self.layout
            .position(indices)
            .map(|position| &data[position])
    }

    /// Returns a view with `dimension` removed by fixing its index to `index`.
    ///
    /// The resulting view is generally strided.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if `dimension` or `index` is out of bounds.
    pub fn bind_at(&self, dimension: usize, index: u64) -> Result<Self, ArrayViewCreateError> {
        Ok(Self {
            data: self.data,
            layout: self.layout.bind_at(dimension, index)?,
        })
    }

    /// Returns a view with the innermost (last) dimension fixed to `index`.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if the view is zero dimensional or `index` is out of bounds.
    pub fn bind_inner(&self, index: u64) -> Result<Self, ArrayViewCreateError> {
        self.bind_at(self.layout.inner_dimension()?, index)
    }

    /// Returns a view with the outermost (first) dimension fixed to `index`.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if the view is zero dimensional or `index` is out of bounds.
    pub fn bind_outer(&self, index: u64) -> Result<Self, ArrayViewCreateError> {
        self.bind_at(0, index)
    }

    /// Returns an iterator over the elements of the view in C-contiguous order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        let data: &'a [T] = self.data;
        IndicesIterator::new(&self.layout.shape)
            .map(move |indices| &data[self.layout.position_unchecked(&indices)])
    }

    pub(crate) fn element_unchecked(&self, indices: &[u64]) -> &'a T {
        let data: &'a [T] = self.data;
        &data[self.layout.position_unchecked(indices)]
    }
}

impl<T: Clone> ArrayView<'_, T> {
    /// Copies the elements of the view in C-contiguous order into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// A mutable N-dimensional view of elements in a caller owned slice.
///
/// See [`ArrayView`] for the addressing scheme.
/// No two indices of a mutable view address the same element.
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

impl<'a, T> ArrayViewMut<'a, T> {
    /// Create a C-contiguous (row-major) mutable view of `data` with `shape`.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if the number of elements in `shape` is not the length of `data` or an extent is zero.
    pub fn from_shape(shape: ArrayShape, data: &'a mut [T]) -> Result<Self, ArrayViewCreateError> {
        let layout = Layout::contiguous(shape, data.len())?;
        Ok(Self { data, layout })
    }

    /// Create a mutable view of `data` with explicit `strides` and the `offset` of the element at the origin.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if the view addresses an element outside of `data`, an extent is zero, or two indices address the same element.
    pub fn from_shape_strides(
        shape: ArrayShape,
        strides: Vec<isize>,
        offset: usize,
        data: &'a mut [T],
    ) -> Result<Self, ArrayViewCreateError> {
        let layout = Layout::new_exclusive(shape, strides, offset, data.len())?;
        Ok(Self { data, layout })
    }

    /// Returns the shape of the view.
    #[must_use]
    pub fn shape(&self) -> &[u64] {
        &self.layout.shape
    }

    /// Returns the strides of the view in elements.
    #[must_use]
    pub fn strides(&self) -> &[isize] {
        &self.layout.strides
    }

    /// Returns the number of dimensions of the view.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.layout.shape.len()
    }

    /// Returns the number of elements in the view.
    #[must_use]
    pub fn num_elements(&self) -> u64 {
        self.layout.num_elements()
    }

    /// Returns true if the elements are C-contiguous in the underlying slice.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Returns the element at `indices`, or [`None`] if `indices` are out of bounds.
    #[must_use]
    pub fn get(&self, indices: &[u64]) -> Option<&T> {
        self.layout
            .position(indices)
            .map(|position| &self.data[position])
    }

    /// Returns a mutable reference to the element at `indices`, or [`None`] if `indices` are out of bounds.
    #[must_use]
    pub fn get_mut(&mut self, indices: &[u64]) -> Option<&mut T> {
        self.layout
            .position(indices)
            .map(|position| &mut self.data[position])
    }

    /// Returns a read-only view of the same elements.
    #[must_use]
    pub fn as_view(&self) -> ArrayView<'_, T> {
        ArrayView {
            data: &*self.data,
            layout: self.layout.clone(),
        }
    }

    /// Returns a mutable view of the same elements borrowing from this view.
    #[must_use]
    pub fn reborrow(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut {
            data: &mut *self.data,
            layout: self.layout.clone(),
        }
    }

    /// Returns a view with `dimension` removed by fixing its index to `index`.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if `dimension` or `index` is out of bounds.
    pub fn bind_at(self, dimension: usize, index: u64) -> Result<Self, ArrayViewCreateError> {
        let layout = self.layout.bind_at(dimension, index)?;
        Ok(Self {
            data: self.data,
            layout,
        })
    }

    /// Returns a view with the innermost (last) dimension fixed to `index`.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if the view is zero dimensional or `index` is out of bounds.
    pub fn bind_inner(self, index: u64) -> Result<Self, ArrayViewCreateError> {
        let dimension = self.layout.inner_dimension()?;
        self.bind_at(dimension, index)
    }

    /// Returns a view with the outermost (first) dimension fixed to `index`.
    ///
    /// # Errors
    /// Returns [`ArrayViewCreateError`] if the view is zero dimensional or `index` is out of bounds.
    pub fn bind_outer(self, index: u64) -> Result<Self, ArrayViewCreateError> {
        self.bind_at(0, index)
    }

    pub(crate) fn element_mut_unchecked(&mut self, indices: &[u64]) -> &mut T {
        let position = self.layout.position_unchecked(indices);
        &mut self.data[position]
    }
}

impl<'a, T> From<&'a ArrayViewMut<'_, T>> for ArrayView<'a, T> {
    fn from(view: &'a ArrayViewMut<'_, T>) -> Self {
        view.as_view()
    }
}
