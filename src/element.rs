//! Element types.
//!
//! Every value in an array view is an [`Element`], which flattens to a fixed number of [`ScalarElement`] components:
//!  - a scalar (`i8`..`i64`, `u8`..`u64`, [`f16`](half::f16), `f32`, `f64`) is a single component,
//!  - an [`RgbValue`] is three components, and
//!  - a [`TinyVector`] is `N` components.
//!
//! The [`ElementKind`] of an element determines how it is stored, see [`ElementKind::stored_shape`].

mod data_type;
mod element_kind;
mod rgb_value;
mod tiny_vector;

pub use data_type::{DataType, UnsupportedDataTypeError};
pub use element_kind::{ElementKind, UnsupportedElementKindError};
pub use rgb_value::RgbValue;
pub use tiny_vector::TinyVector;

/// A numeric type that maps directly to a [`DataType`].
///
/// Scalars are stored and retrieved through [`zarrs`], so every scalar is also a [`zarrs::array::ElementOwned`].
pub trait ScalarElement:
    zarrs::array::ElementOwned + bytemuck::Pod + Default + PartialEq + std::fmt::Debug + Send + Sync
{
    /// The data type of the scalar.
    const DATA_TYPE: DataType;
}

/// A value that flattens to a fixed number of scalar components.
pub trait Element: Copy {
    /// The type of each component.
    type Component: ScalarElement;

    /// The number of components.
    const COMPONENTS: usize;

    /// Returns the element kind.
    fn element_kind() -> ElementKind;

    /// Returns the components in storage order.
    fn components(&self) -> &[Self::Component];

    /// Create an element from its components.
    ///
    /// # Panics
    /// Panics if `components` holds fewer than [`Element::COMPONENTS`] values.
    fn from_components(components: &[Self::Component]) -> Self;
}

macro_rules! impl_scalar_element {
    ($t:ty, $data_type:ident) => {
        impl ScalarElement for $t {
            const DATA_TYPE: DataType = DataType::$data_type;
        }

        impl Element for $t {
            type Component = $t;
            const COMPONENTS: usize = 1;

            fn element_kind() -> ElementKind {
                ElementKind::Scalar(DataType::$data_type)
            }

            fn components(&self) -> &[$t] {
                std::slice::from_ref(self)
            }

            fn from_components(components: &[$t]) -> Self {
                components[0]
            }
        }
    };
}

impl_scalar_element!(i8, Int8);
impl_scalar_element!(i16, Int16);
impl_scalar_element!(i32, Int32);
impl_scalar_element!(i64, Int64);
impl_scalar_element!(u8, UInt8);
impl_scalar_element!(u16, UInt16);
impl_scalar_element!(u32, UInt32);
impl_scalar_element!(u64, UInt64);
impl_scalar_element!(half::f16, Float16);
impl_scalar_element!(f32, Float32);
impl_scalar_element!(f64, Float64);
