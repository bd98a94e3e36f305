use derive_more::{Deref, DerefMut, From};

use super::{Element, ElementKind, ScalarElement};

/// A fixed length vector of `N` values.
///
/// Stored as a composite element with `N` components in index order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deref, DerefMut, From)]
pub struct TinyVector<T, const N: usize>([T; N]);

impl<T, const N: usize> TinyVector<T, N> {
    /// Create a new vector from its components.
    #[must_use]
    pub const fn new(components: [T; N]) -> Self {
        Self(components)
    }

    /// Returns the components.
    #[must_use]
    pub fn into_inner(self) -> [T; N] {
        self.0
    }
}

impl<T: Copy + Default, const N: usize> Default for TinyVector<T, N> {
    fn default() -> Self {
        Self([T::default(); N])
    }
}

impl<T: ScalarElement, const N: usize> Element for TinyVector<T, N> {
    type Component = T;
    const COMPONENTS: usize = N;

    fn element_kind() -> ElementKind {
        ElementKind::Composite {
            components: N,
            data_type: T::DATA_TYPE,
        }
    }

    fn components(&self) -> &[T] {
        &self.0
    }

    fn from_components(components: &[T]) -> Self {
        Self(std::array::from_fn(|i| components[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::DataType;

    #[test]
    fn tiny_vector() {
        let mut vector = TinyVector::new([1.0f64, 2.0, 3.0, 4.0]);
        vector[2] = 5.0;
        assert_eq!(vector.components(), &[1.0, 2.0, 5.0, 4.0]);
        assert_eq!(vector.len(), 4);
        assert_eq!(
            TinyVector::<f64, 4>::from_components(&[1.0, 2.0, 5.0, 4.0]),
            vector
        );
        assert_eq!(TinyVector::<i16, 2>::default().into_inner(), [0, 0]);
        assert_eq!(
            TinyVector::<i16, 1>::element_kind(),
            ElementKind::Composite {
                components: 1,
                data_type: DataType::Int16
            }
        );
        assert!(TinyVector::<u8, 0>::element_kind().validate().is_err());
    }
}
