//! Import and export of array views to datasets in a container directory.
//!
//! Every function opens the container at `file_path` (creating the directory if it does not exist) and releases it before returning.
//!
//! ```
//! # use zarrs_impex::{array::{ArrayView, ArrayViewMut}, impex::{read_array, write_array, ImportInfo}};
//! # let dir = tempfile::TempDir::new()?;
//! # let file_path = dir.path().join("example.zarr");
//! let data: Vec<i32> = (-12..12).collect();
//! let view = ArrayView::from_shape(vec![2, 3, 4], &data)?;
//! write_array(&file_path, "group/subgroup/data", &view)?;
//!
//! let info = ImportInfo::new(&file_path, "group/subgroup/data")?;
//! assert_eq!(info.shape(), &[2, 3, 4]);
//! let mut read = vec![0i32; info.num_elements()];
//! read_array(&info, &mut ArrayViewMut::from_shape(info.shape().to_vec(), &mut read)?)?;
//! assert_eq!(read, data);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    array::{ArrayView, ArrayViewMut, DatasetDescriptor, ShapeMismatchError},
    container::{Container, DatasetError},
    element::{DataType, Element, ElementKind, UnsupportedElementKindError},
};
use zarrs::filesystem::FilesystemStoreCreateError;

/// An import or export error.
#[derive(Debug, Error)]
pub enum ImpexError {
    /// No dataset exists at the path.
    #[error("{0}")]
    NotFound(String),
    /// A view does not match a dataset or a flat buffer.
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),
    /// The element kind cannot be stored.
    #[error(transparent)]
    UnsupportedElementKind(#[from] UnsupportedElementKindError),
    /// The container could not be opened, read, or written.
    #[error("{0}")]
    IOFailure(String),
    /// The dataset path is invalid or blocked by another node.
    #[error("{0}")]
    InvalidPath(String),
    /// The stored data type differs from the component data type of the destination.
    #[error("{0}")]
    IncompatibleDataType(String),
    /// A dataset with a different descriptor exists and the overwrite policy is to fail.
    #[error("{0}")]
    IncompatibleDataset(String),
    /// The dataset metadata cannot be interpreted.
    #[error("{0}")]
    InvalidMetadata(String),
}

impl From<DatasetError> for ImpexError {
    fn from(err: DatasetError) -> Self {
        let message = err.to_string();
        match err {
            DatasetError::NotFound(_) => Self::NotFound(message),
            DatasetError::InvalidPath(_) | DatasetError::PathBlocked { .. } => {
                Self::InvalidPath(message)
            }
            DatasetError::IncompatibleDataset { .. } => Self::IncompatibleDataset(message),
            DatasetError::StorageError(_)
            | DatasetError::GroupCreateError(_)
            | DatasetError::ArrayCreateError(_)
            | DatasetError::ArrayError(_)
            | DatasetError::ReplaceFailed { .. } => Self::IOFailure(message),
            DatasetError::UnsupportedElementKind(err) => Self::UnsupportedElementKind(err),
            DatasetError::ShapeMismatch(err) => Self::ShapeMismatch(err),
            DatasetError::IncompatibleDataType { .. } => Self::IncompatibleDataType(message),
            DatasetError::InvalidMetadata(..) => Self::InvalidMetadata(message),
        }
    }
}

impl From<FilesystemStoreCreateError> for ImpexError {
    fn from(err: FilesystemStoreCreateError) -> Self {
        Self::IOFailure(err.to_string())
    }
}

/// Write `view` to the dataset at `dataset_path` in the container at `file_path`.
///
/// The dataset and any missing groups are created.
/// An existing dataset with a different shape or element kind is replaced, subject to the [overwrite policy](crate::config::Config#overwrite-policy).
/// Datasets at other paths are left untouched.
///
/// # Errors
/// Returns an [`ImpexError`] if the container cannot be opened or written, the path is invalid, or the element kind is unsupported.
pub fn write_array<T: Element>(
    file_path: impl AsRef<Path>,
    dataset_path: &str,
    view: &ArrayView<'_, T>,
) -> Result<(), ImpexError> {
    let container = Container::open(file_path)?;
    container.write_array(dataset_path, view)?;
    Ok(())
}

/// The location and descriptor of a dataset to import.
///
/// Query the stored shape with [`ImportInfo::shape`] to size a destination view before calling [`read_array`].
#[derive(Clone, Debug)]
pub struct ImportInfo {
    file_path: PathBuf,
    dataset_path: String,
    descriptor: DatasetDescriptor,
}

impl ImportInfo {
    /// Query the descriptor of the dataset at `dataset_path` in the container at `file_path`.
    ///
    /// # Errors
    /// Returns [`ImpexError::NotFound`] if there is no dataset at `dataset_path`, or another [`ImpexError`] if the container cannot be opened or the metadata is invalid.
    pub fn new(file_path: impl AsRef<Path>, dataset_path: &str) -> Result<Self, ImpexError> {
        let file_path = file_path.as_ref().to_path_buf();
        let descriptor = Container::open(&file_path)?.import_info(dataset_path)?;
        Ok(Self {
            file_path,
            dataset_path: dataset_path.to_string(),
            descriptor,
        })
    }

    /// Returns the path of the container.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the path of the dataset in the container.
    #[must_use]
    pub fn dataset_path(&self) -> &str {
        &self.dataset_path
    }

    /// Returns the descriptor of the dataset.
    #[must_use]
    pub fn descriptor(&self) -> &DatasetDescriptor {
        &self.descriptor
    }

    /// Returns the number of stored dimensions, including the trailing component dimension of a composite.
    #[must_use]
    pub fn num_dimensions(&self) -> usize {
        self.descriptor.num_dimensions()
    }

    /// Returns the stored shape, including the trailing component dimension of a composite.
    #[must_use]
    pub fn shape(&self) -> &[u64] {
        self.descriptor.shape()
    }

    /// Returns the stored extent of `dimension`, or [`None`] if it is out of bounds.
    #[must_use]
    pub fn shape_of_dimension(&self, dimension: usize) -> Option<u64> {
        self.descriptor.shape_of_dimension(dimension)
    }

    /// Returns the number of stored scalar values.
    ///
    /// # Panics
    /// Panics if the number of values exceeds [`usize::MAX`].
    #[must_use]
    pub fn num_elements(&self) -> usize {
        usize::try_from(self.descriptor.num_components()).unwrap()
    }

    /// Returns the component data type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.descriptor.data_type()
    }

    /// Returns the element kind the dataset was written with.
    #[must_use]
    pub fn element_kind(&self) -> ElementKind {
        self.descriptor.element_kind()
    }
}

/// Read the dataset described by `info` into `view`.
///
/// The shape of `view` with the trailing component dimension of `T` must equal the stored shape.
/// A scalar dataset can be read as composite elements, e.g. a `[5, 8, 3]` dataset of `f64` into a `[5, 8]` view of [`RgbValue<f64>`](crate::element::RgbValue).
///
/// # Errors
/// Returns [`ImpexError::ShapeMismatch`] if the view does not match the stored shape, or another [`ImpexError`] if the dataset cannot be read.
pub fn read_array<T: Element>(
    info: &ImportInfo,
    view: &mut ArrayViewMut<'_, T>,
) -> Result<(), ImpexError> {
    let container = Container::open(&info.file_path)?;
    container.read_array(&info.dataset_path, view)?;
    Ok(())
}

/// Read the dataset at `dataset_path` in the container at `file_path` into `view`.
///
/// # Errors
/// See [`ImportInfo::new`] and [`read_array`].
pub fn read_array_from<T: Element>(
    file_path: impl AsRef<Path>,
    dataset_path: &str,
    view: &mut ArrayViewMut<'_, T>,
) -> Result<(), ImpexError> {
    let container = Container::open(file_path)?;
    container.read_array(dataset_path, view)?;
    Ok(())
}

#[cfg(feature = "ndarray")]
/// Read the dataset at `dataset_path` in the container at `file_path` into an [`ndarray::ArrayD`] with the stored shape.
///
/// # Errors
/// Returns an [`ImpexError`] if the dataset does not exist, its data type is not the data type of `T`, or it cannot be read.
pub fn read_ndarray<T: crate::element::ScalarElement>(
    file_path: impl AsRef<Path>,
    dataset_path: &str,
) -> Result<ndarray::ArrayD<T>, ImpexError> {
    let container = Container::open(file_path)?;
    let dataset = container.open_dataset(dataset_path)?;
    let components = dataset.retrieve_components::<T>()?;
    let shape = dataset
        .descriptor()
        .shape()
        .iter()
        .map(|&extent| usize::try_from(extent))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ImpexError::InvalidMetadata(err.to_string()))?;
    ndarray::ArrayD::from_shape_vec(shape, components)
        .map_err(|err| ImpexError::InvalidMetadata(err.to_string()))
}
