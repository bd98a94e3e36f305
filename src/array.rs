//! Strided array views.
//!
//! An [`ArrayView`] or [`ArrayViewMut`] addresses the elements of a caller owned slice through a shape, strides and an offset.
//! Views can be contiguous or strided, for example after binding a dimension to a fixed index with [`ArrayView::bind_at`].
//!
//! The [`shape_adapter`] translates between views and the flat component order of a dataset, and [`describe`] derives the [`DatasetDescriptor`] of a view.

mod array_view;
mod descriptor;
mod indices_iterator;
pub mod shape_adapter;

pub use array_view::{contiguous_strides, ArrayView, ArrayViewCreateError, ArrayViewMut};
pub use descriptor::{DatasetDescriptor, InvalidDescriptorError};
pub use indices_iterator::IndicesIterator;
pub use shape_adapter::{describe, fill_in_order, flatten, visit_in_order, ShapeMismatchError};

/// An array shape. Dimensions may be zero for stored shapes, but every extent of a view is positive.
pub type ArrayShape = Vec<u64>;

/// An ND index to an element in an array.
pub type ArrayIndices = Vec<u64>;
