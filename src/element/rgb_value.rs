use super::{Element, ElementKind, ScalarElement};

/// A red, green, blue triple.
///
/// Stored as a composite element with three components in red, green, blue order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RgbValue<T>([T; 3]);

impl<T: Copy> RgbValue<T> {
    /// Create a new RGB value.
    #[must_use]
    pub const fn new(red: T, green: T, blue: T) -> Self {
        Self([red, green, blue])
    }

    /// The red component.
    #[must_use]
    pub const fn red(&self) -> T {
        self.0[0]
    }

    /// The green component.
    #[must_use]
    pub const fn green(&self) -> T {
        self.0[1]
    }

    /// The blue component.
    #[must_use]
    pub const fn blue(&self) -> T {
        self.0[2]
    }
}

impl<T> From<[T; 3]> for RgbValue<T> {
    fn from(components: [T; 3]) -> Self {
        Self(components)
    }
}

impl<T: ScalarElement> Element for RgbValue<T> {
    type Component = T;
    const COMPONENTS: usize = 3;

    fn element_kind() -> ElementKind {
        ElementKind::Composite {
            components: 3,
            data_type: T::DATA_TYPE,
        }
    }

    fn components(&self) -> &[T] {
        &self.0
    }

    fn from_components(components: &[T]) -> Self {
        Self([components[0], components[1], components[2]])
    }
}
