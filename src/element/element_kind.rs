use derive_more::Display;
use thiserror::Error;

use super::DataType;

/// The kind of element held by an array view or a dataset.
///
/// Composite datasets carry one trailing stored dimension holding the components of each element, even when there is only one component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum ElementKind {
    /// A single numeric value per element.
    #[display("{_0}")]
    Scalar(DataType),
    /// A fixed number of numeric values of the same data type per element.
    #[display("{data_type}[{components}]")]
    Composite {
        /// The number of components per element.
        components: usize,
        /// The data type of each component.
        data_type: DataType,
    },
}

/// An element kind that cannot be stored.
#[derive(Debug, Error)]
#[error("unsupported element kind {0}")]
pub struct UnsupportedElementKindError(ElementKind);

impl ElementKind {
    /// Returns the data type of each component.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Scalar(data_type) | Self::Composite { data_type, .. } => *data_type,
        }
    }

    /// Returns the number of components per element (`1` for a scalar).
    #[must_use]
    pub const fn components(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Composite { components, .. } => *components,
        }
    }

    /// Returns true if the element kind is composite.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite { .. })
    }

    /// Returns the size in bytes of one element.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.components() * self.data_type().size()
    }

    /// Validates that the element kind can be stored.
    ///
    /// # Errors
    /// Returns [`UnsupportedElementKindError`] for a composite with zero components.
    pub fn validate(&self) -> Result<(), UnsupportedElementKindError> {
        if self.components() == 0 {
            Err(UnsupportedElementKindError(*self))
        } else {
            Ok(())
        }
    }

    /// Returns the stored shape of a dataset of this element kind with the logical `shape`.
    ///
    /// A composite appends its component count as a trailing dimension.
    #[must_use]
    pub fn stored_shape(&self, shape: &[u64]) -> Vec<u64> {
        let mut stored_shape = shape.to_vec();
        if let Self::Composite { components, .. } = self {
            stored_shape.push(*components as u64);
        }
        stored_shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_kind_stored_shape() {
        let scalar = ElementKind::Scalar(DataType::Int32);
        assert_eq!(scalar.stored_shape(&[2, 3, 4]), vec![2, 3, 4]);
        assert_eq!(scalar.components(), 1);
        assert!(!scalar.is_composite());

        let rgb = ElementKind::Composite {
            components: 3,
            data_type: DataType::UInt8,
        };
        assert_eq!(rgb.stored_shape(&[5, 8]), vec![5, 8, 3]);
        assert_eq!(rgb.size(), 3);
        assert_eq!(rgb.to_string(), "uint8[3]");

        let single = ElementKind::Composite {
            components: 1,
            data_type: DataType::Float64,
        };
        assert_eq!(single.stored_shape(&[7]), vec![7, 1]);
    }

    #[test]
    fn element_kind_validate() {
        assert!(ElementKind::Scalar(DataType::Int8).validate().is_ok());
        let empty = ElementKind::Composite {
            components: 0,
            data_type: DataType::Float32,
        };
        assert_eq!(
            empty.validate().unwrap_err().to_string(),
            "unsupported element kind float32[0]"
        );
    }
}
