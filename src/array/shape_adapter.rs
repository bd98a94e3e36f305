//! Translation between array views and the flat component order of a dataset.
//!
//! The flat order visits the logical indices of a view in C-contiguous order (last dimension fastest), independent of the strides of the view.
//! Each element contributes its components consecutively.

use thiserror::Error;

use crate::element::{Element, ElementKind, UnsupportedElementKindError};

use super::{ArrayShape, ArrayView, ArrayViewMut, DatasetDescriptor, IndicesIterator};

/// A shape mismatch between a view and a flat buffer or a stored dataset.
#[derive(Debug, Error)]
pub enum ShapeMismatchError {
    /// The flat buffer does not hold the components of every element of the view.
    #[error("flat buffer of {actual} components does not match the {expected} components of the view")]
    FlatLength {
        /// The number of components in the view.
        expected: u64,
        /// The number of components in the flat buffer.
        actual: u64,
    },
    /// The view does not match the stored shape of a dataset.
    #[error("view shape {view:?} of {element_kind} elements does not match the stored shape {stored:?}")]
    Shape {
        /// The shape of the view.
        view: ArrayShape,
        /// The element kind of the view.
        element_kind: ElementKind,
        /// The stored shape of the dataset.
        stored: ArrayShape,
    },
}

/// Describe the dataset implied by `view`.
///
/// # Errors
/// Returns [`UnsupportedElementKindError`] if the element kind of `T` cannot be stored.
pub fn describe<T: Element>(
    view: &ArrayView<'_, T>,
) -> Result<DatasetDescriptor, UnsupportedElementKindError> {
    DatasetDescriptor::new(view.shape(), T::element_kind())
}

/// Visit every element of `view` in C-contiguous order.
///
/// `visit` is called with the flat position of the first component of each element and its components.
pub fn visit_in_order<T: Element>(
    view: &ArrayView<'_, T>,
    mut visit: impl FnMut(usize, &[T::Component]),
) {
    for (index, indices) in IndicesIterator::new(view.shape()).enumerate() {
        let element = view.element_unchecked(&indices);
        visit(index * T::COMPONENTS, element.components());
    }
}

/// Flatten the elements of `view` into components in C-contiguous order.
#[must_use]
pub fn flatten<T: Element>(view: &ArrayView<'_, T>) -> Vec<T::Component> {
    let capacity = usize::try_from(view.num_elements())
        .ok()
        .and_then(|num_elements| num_elements.checked_mul(T::COMPONENTS))
        .unwrap_or_default();
    let mut flat = Vec::with_capacity(capacity);
    visit_in_order(view, |_, components| flat.extend_from_slice(components));
    flat
}

/// Fill every element of `view` from the components in `flat` in C-contiguous order.
///
/// # Errors
/// Returns [`ShapeMismatchError::FlatLength`] if `flat` does not hold exactly the components of the view.
pub fn fill_in_order<T: Element>(
    view: &mut ArrayViewMut<'_, T>,
    flat: &[T::Component],
) -> Result<(), ShapeMismatchError> {
    let expected = view.num_elements().saturating_mul(T::COMPONENTS as u64);
    let actual = u64::try_from(flat.len()).unwrap_or(u64::MAX);
    if expected != actual {
        return Err(ShapeMismatchError::FlatLength { expected, actual });
    }
    let shape = view.shape().to_vec();
    let elements = IndicesIterator::new(&shape).zip(flat.chunks_exact(T::COMPONENTS.max(1)));
    for (indices, components) in elements {
        *view.element_mut_unchecked(&indices) = T::from_components(components);
    }
    Ok(())
}

/// Check that a view with `shape` of `T` elements can be read from the dataset described by `descriptor`.
///
/// The view shape with the trailing component dimension of `T` must equal the stored shape.
/// A scalar dataset can therefore be read as composite elements when its trailing dimension equals the component count.
///
/// # Errors
/// Returns [`ShapeMismatchError::Shape`] if the shapes differ.
pub fn check_read_shape<T: Element>(
    shape: &[u64],
    descriptor: &DatasetDescriptor,
) -> Result<(), ShapeMismatchError> {
    let element_kind = T::element_kind();
    if element_kind.stored_shape(shape) == descriptor.shape() {
        Ok(())
    } else {
        Err(ShapeMismatchError::Shape {
            view: shape.to_vec(),
            element_kind,
            stored: descriptor.shape().to_vec(),
        })
    }
}
