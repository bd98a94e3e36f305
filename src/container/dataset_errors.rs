use thiserror::Error;
use zarrs::{
    array::{ArrayCreateError, ArrayError},
    group::GroupCreateError,
    storage::{StorageError, StorePrefixError},
};

use crate::{
    array::{DatasetDescriptor, ShapeMismatchError},
    element::{DataType, UnsupportedElementKindError},
};

use super::{DatasetPath, DatasetPathError};

/// A dataset error.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A storage error.
    #[error(transparent)]
    StorageError(#[from] StorageError),
    /// An error creating group metadata.
    #[error(transparent)]
    GroupCreateError(#[from] GroupCreateError),
    /// An error creating or opening an array.
    #[error(transparent)]
    ArrayCreateError(#[from] ArrayCreateError),
    /// An error storing or retrieving array elements.
    #[error(transparent)]
    ArrayError(#[from] ArrayError),
    /// No dataset exists at the path.
    #[error("no dataset at {0}")]
    NotFound(DatasetPath),
    /// An invalid dataset path.
    #[error(transparent)]
    InvalidPath(#[from] DatasetPathError),
    /// The dataset path runs through or ends at a node that cannot hold it.
    #[error("cannot create dataset {path}: {node} is a {node_type}")]
    PathBlocked {
        /// The requested dataset path.
        path: DatasetPath,
        /// The node in the way.
        node: String,
        /// The type of the node in the way.
        node_type: &'static str,
    },
    /// A dataset with a different descriptor exists and the overwrite policy is to fail.
    #[error("dataset {path} exists as {existing}, requested {requested}")]
    IncompatibleDataset {
        /// The dataset path.
        path: DatasetPath,
        /// The existing dataset.
        existing: String,
        /// The requested descriptor.
        requested: DatasetDescriptor,
    },
    /// Replacing an existing dataset failed after the old dataset was erased.
    #[error("replacing dataset {path} failed, the dataset is left absent: {source}")]
    ReplaceFailed {
        /// The dataset path.
        path: DatasetPath,
        /// The underlying error.
        source: Box<DatasetError>,
    },
    /// An unsupported element kind.
    #[error(transparent)]
    UnsupportedElementKind(#[from] UnsupportedElementKindError),
    /// A shape mismatch.
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),
    /// The stored data type differs from the requested component data type.
    #[error("dataset {path} has data type {stored}, requested {requested}")]
    IncompatibleDataType {
        /// The dataset path.
        path: DatasetPath,
        /// The stored data type.
        stored: DataType,
        /// The requested data type.
        requested: DataType,
    },
    /// The dataset metadata cannot be interpreted.
    #[error("invalid metadata for dataset {0}: {1}")]
    InvalidMetadata(DatasetPath, String),
}

impl From<StorePrefixError> for DatasetError {
    fn from(err: StorePrefixError) -> Self {
        Self::StorageError(err.into())
    }
}
