//! Numeric data types.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#data-types>.

use derive_more::{Display, From};
use thiserror::Error;


/// A numeric data type of a dataset component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
#[rustfmt::skip]
pub enum DataType {
    /// `int8` Integer in `[-2^7, 2^7-1]`.
    #[display("int8")]
    Int8,
    /// `int16` Integer in `[-2^15, 2^15-1]`.
    #[display("int16")]
    Int16,
    /// `int32` Integer in `[-2^31, 2^31-1]`.
    #[display("int32")]
    Int32,
    /// `int64` Integer in `[-2^63, 2^63-1]`.
    #[display("int64")]
    Int64,
    /// `uint8` Integer in `[0, 2^8-1]`.
    #[display("uint8")]
    UInt8,
    /// `uint16` Integer in `[0, 2^16-1]`.
    #[display("uint16")]
    UInt16,
    /// `uint32` Integer in `[0, 2^32-1]`.
    #[display("uint32")]
    UInt32,
    /// `uint64` Integer in `[0, 2^64-1]`.
    #[display("uint64")]
    UInt64,
    /// `float16` IEEE 754 half-precision floating point: sign bit, 5 bits exponent, 10 bits mantissa.
    #[display("float16")]
    Float16,
    /// `float32` IEEE 754 single-precision floating point: sign bit, 8 bits exponent, 23 bits mantissa.
    #[display("float32")]
    Float32,
    /// `float64` IEEE 754 double-precision floating point: sign bit, 11 bits exponent, 52 bits mantissa.
    #[display("float64")]
    Float64,
}

/// An unsupported data type error.
#[derive(Debug, Error, From)]
#[error("unsupported data type {0}")]
pub struct UnsupportedDataTypeError(String);

impl DataType {
    /// All supported data types.
    pub const ALL: [DataType; 11] = [
        DataType::Int8,
        DataType::Int16,
        DataType::Int32,
        DataType::Int64,
        DataType::UInt8,
        DataType::UInt16,
        DataType::UInt32,
        DataType::UInt64,
        DataType::Float16,
        DataType::Float32,
        DataType::Float64,
    ];

    /// Returns the identifier of the data type in `zarr.json` documents.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float16 => "float16",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// Returns the size in bytes of one value of the data type.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 | Self::Float16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Create a data type from its identifier.
    ///
    /// # Errors
    /// Returns [`UnsupportedDataTypeError`] if `name` is not a supported data type.
    pub fn from_name(name: &str) -> Result<Self, UnsupportedDataTypeError> {
        Self::ALL
            .into_iter()
            .find(|data_type| data_type.name() == name)
            .ok_or_else(|| UnsupportedDataTypeError(name.to_string()))
    }

    /// Returns the corresponding [`zarrs`] data type.
    #[must_use]
    pub fn to_zarrs(&self) -> zarrs::array::DataType {
        use zarrs::array::DataType as Z;
        match self {
            Self::Int8 => Z::Int8,
            Self::Int16 => Z::Int16,
            Self::Int32 => Z::Int32,
            Self::Int64 => Z::Int64,
            Self::UInt8 => Z::UInt8,
            Self::UInt16 => Z::UInt16,
            Self::UInt32 => Z::UInt32,
            Self::UInt64 => Z::UInt64,
            Self::Float16 => Z::Float16,
            Self::Float32 => Z::Float32,
            Self::Float64 => Z::Float64,
        }
    }

    /// Create a data type from a [`zarrs`] data type.
    ///
    /// # Errors
    /// Returns [`UnsupportedDataTypeError`] if `data_type` has no numeric counterpart, e.g. `bool` or `string`.
    pub fn from_zarrs(data_type: &zarrs::array::DataType) -> Result<Self, UnsupportedDataTypeError> {
        Self::ALL
            .into_iter()
            .find(|supported| &supported.to_zarrs() == data_type)
            .ok_or_else(|| UnsupportedDataTypeError(format!("{data_type:?}")))
    }
}
