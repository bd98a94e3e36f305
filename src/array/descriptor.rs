use derive_more::Display;
use thiserror::Error;

use crate::element::{DataType, ElementKind, UnsupportedElementKindError};

use super::ArrayShape;

/// The stored shape and element kind of a dataset.
///
/// The stored shape of a composite dataset has a trailing dimension holding the components of each element.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
#[display("{shape:?} {element_kind}")]
pub struct DatasetDescriptor {
    shape: ArrayShape,
    element_kind: ElementKind,
}

/// A stored shape that is inconsistent with its element kind.
#[derive(Debug, Error)]
#[error("stored shape {shape:?} is incompatible with element kind {element_kind}")]
pub struct InvalidDescriptorError {
    shape: ArrayShape,
    element_kind: ElementKind,
}

impl DatasetDescriptor {
    /// Create the descriptor of a dataset holding elements of `element_kind` with the logical `shape`.
    ///
    /// # Errors
    /// Returns [`UnsupportedElementKindError`] if the element kind cannot be stored.
    pub fn new(shape: &[u64], element_kind: ElementKind) -> Result<Self, UnsupportedElementKindError> {
        element_kind.validate()?;
        Ok(Self {
            shape: element_kind.stored_shape(shape),
            element_kind,
        })
    }

    /// Create a descriptor from a stored `shape`.
    ///
    /// # Errors
    /// Returns [`InvalidDescriptorError`] if `element_kind` is composite and the trailing dimension of `shape` is not its component count.
    pub fn from_stored_shape(
        shape: ArrayShape,
        element_kind: ElementKind,
    ) -> Result<Self, InvalidDescriptorError> {
        let valid = match element_kind {
            ElementKind::Scalar(_) => true,
            ElementKind::Composite { components, .. } => {
                components > 0 && shape.last() == Some(&(components as u64))
            }
        };
        if valid {
            Ok(Self {
                shape,
                element_kind,
            })
        } else {
            Err(InvalidDescriptorError {
                shape,
                element_kind,
            })
        }
    }

    /// Returns the stored shape, including the trailing component dimension of a composite.
    #[must_use]
    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Returns the logical shape, excluding the trailing component dimension of a composite.
    #[must_use]
    pub fn logical_shape(&self) -> &[u64] {
        if self.element_kind.is_composite() {
            &self.shape[..self.shape.len() - 1]
        } else {
            &self.shape
        }
    }

    /// Returns the number of stored dimensions.
    #[must_use]
    pub fn num_dimensions(&self) -> usize {
        self.shape.len()
    }

    /// Returns the stored extent of `dimension`, or [`None`] if it is out of bounds.
    #[must_use]
    pub fn shape_of_dimension(&self, dimension: usize) -> Option<u64> {
        self.shape.get(dimension).copied()
    }

    /// Returns the element kind.
    #[must_use]
    pub const fn element_kind(&self) -> ElementKind {
        self.element_kind
    }

    /// Returns the data type of each component.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.element_kind.data_type()
    }

    /// Returns the total number of stored components, saturating at [`u64::MAX`].
    #[must_use]
    pub fn num_components(&self) -> u64 {
        self.shape
            .iter()
            .fold(1u64, |num_components, &extent| num_components.saturating_mul(extent))
    }

    /// Returns the size in bytes of the stored data, saturating at [`u64::MAX`].
    #[must_use]
    pub fn size(&self) -> u64 {
        self.num_components()
            .saturating_mul(self.data_type().size() as u64)
    }
}
