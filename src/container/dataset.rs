use zarrs::{
    array::{Array, ArrayBuilder, ArrayCreateError, ChunkGrid, FillValue},
    storage::{ReadableWritableListableStorage, ReadableWritableListableStorageTraits},
};

use crate::{
    array::{
        describe, fill_in_order, flatten, shape_adapter::check_read_shape, ArrayView,
        ArrayViewMut, DatasetDescriptor, ShapeMismatchError,
    },
    element::{DataType, Element, ElementKind, ScalarElement},
};

use super::{DatasetError, DatasetPath};

/// The array attribute holding the component count of a composite dataset.
///
/// A dataset without it holds scalars.
pub const ELEMENT_COMPONENTS_ATTRIBUTE: &str = "element_components";

/// A dataset in a [`Container`](super::Container).
///
/// A dataset is a Zarr V3 array holding the components of every element in C-contiguous order, stored as a single chunk.
pub struct Dataset {
    path: DatasetPath,
    descriptor: DatasetDescriptor,
    array: Array<dyn ReadableWritableListableStorageTraits>,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("path", &self.path)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl Dataset {
    /// Create the array of a dataset with `descriptor` at `path` and store its metadata.
    pub(super) fn create(
        storage: ReadableWritableListableStorage,
        path: DatasetPath,
        descriptor: DatasetDescriptor,
    ) -> Result<Self, DatasetError> {
        let array = descriptor_to_builder(&path, &descriptor)?.build(storage, path.as_str())?;
        array.store_metadata()?;
        Ok(Self {
            path,
            descriptor,
            array,
        })
    }

    /// Open the array of an existing dataset at `path`.
    pub(super) fn open(
        storage: ReadableWritableListableStorage,
        path: DatasetPath,
    ) -> Result<Self, DatasetError> {
        let array = Array::open(storage, path.as_str()).map_err(|err| match err {
            ArrayCreateError::StorageError(err) => DatasetError::StorageError(err),
            err => DatasetError::InvalidMetadata(path.clone(), err.to_string()),
        })?;
        let descriptor = array_to_descriptor(&path, &array)?;
        Ok(Self {
            path,
            descriptor,
            array,
        })
    }

    /// Returns the path of the dataset.
    #[must_use]
    pub fn path(&self) -> &DatasetPath {
        &self.path
    }

    /// Returns the descriptor of the dataset.
    #[must_use]
    pub fn descriptor(&self) -> &DatasetDescriptor {
        &self.descriptor
    }

    fn check_data_type(&self, requested: DataType) -> Result<(), DatasetError> {
        let stored = self.descriptor.data_type();
        if stored == requested {
            Ok(())
        } else {
            Err(DatasetError::IncompatibleDataType {
                path: self.path.clone(),
                stored,
                requested,
            })
        }
    }

    /// Store the flat `components` of every element.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if the component data type or count differs from the descriptor, or there is an underlying store error.
    pub fn store_components<T: ScalarElement>(&self, components: &[T]) -> Result<(), DatasetError> {
        self.check_data_type(T::DATA_TYPE)?;
        let expected = self.descriptor.num_components();
        let actual = u64::try_from(components.len()).unwrap_or(u64::MAX);
        if expected != actual {
            return Err(ShapeMismatchError::FlatLength { expected, actual }.into());
        }
        log::trace!("storing {actual} components to dataset {}", self.path);
        self.array
            .store_array_subset_elements(&self.array.subset_all(), components)?;
        Ok(())
    }

    /// Retrieve the flat components of every element.
    ///
    /// A dataset that has not been written yet holds zeros.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if the component data type differs from the descriptor, or there is an underlying store error.
    pub fn retrieve_components<T: ScalarElement>(&self) -> Result<Vec<T>, DatasetError> {
        self.check_data_type(T::DATA_TYPE)?;
        let components = self
            .array
            .retrieve_array_subset_elements::<T>(&self.array.subset_all())?;
        log::trace!(
            "retrieved {} components from dataset {}",
            components.len(),
            self.path
        );
        Ok(components)
    }

    /// Write the elements of `view`.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if the view does not match the descriptor of the dataset, or there is an underlying store error.
    pub fn write<T: Element>(&self, view: &ArrayView<'_, T>) -> Result<(), DatasetError> {
        let descriptor = describe(view)?;
        if descriptor != self.descriptor {
            return Err(ShapeMismatchError::Shape {
                view: view.shape().to_vec(),
                element_kind: T::element_kind(),
                stored: self.descriptor.shape().to_vec(),
            }
            .into());
        }
        self.store_components(&flatten(view))
    }

    /// Read the dataset into `view`.
    ///
    /// The shape of `view` with the trailing component dimension of `T` must equal the stored shape, and the component data type of `T` must equal the stored data type.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if the view does not match the dataset, or there is an underlying store error.
    pub fn read<T: Element>(&self, view: &mut ArrayViewMut<'_, T>) -> Result<(), DatasetError> {
        check_read_shape::<T>(view.shape(), &self.descriptor)?;
        let components = self.retrieve_components::<T::Component>()?;
        fill_in_order(view, &components)?;
        Ok(())
    }
}

/// Create an array builder for a dataset with `descriptor`.
///
/// The chunk shape is the stored shape with empty dimensions widened to 1, so the dataset is a single chunk.
fn descriptor_to_builder(
    path: &DatasetPath,
    descriptor: &DatasetDescriptor,
) -> Result<ArrayBuilder, DatasetError> {
    let chunk_shape: Vec<u64> = descriptor.shape().iter().map(|&extent| extent.max(1)).collect();
    let chunk_grid: ChunkGrid = chunk_shape
        .try_into()
        .map_err(|_| DatasetError::InvalidMetadata(path.clone(), "invalid chunk shape".into()))?;
    let data_type = descriptor.data_type();
    let mut builder = ArrayBuilder::new(
        descriptor.shape().to_vec(),
        data_type.to_zarrs(),
        chunk_grid,
        FillValue::new(vec![0; data_type.size()]),
    );
    if let ElementKind::Composite { components, .. } = descriptor.element_kind() {
        let mut attributes = serde_json::Map::new();
        attributes.insert(ELEMENT_COMPONENTS_ATTRIBUTE.to_string(), components.into());
        builder.attributes(attributes);
    }
    Ok(builder)
}

/// Recover the descriptor of a dataset from its array.
fn array_to_descriptor<TStorage: ?Sized>(
    path: &DatasetPath,
    array: &Array<TStorage>,
) -> Result<DatasetDescriptor, DatasetError> {
    let invalid = |err: String| DatasetError::InvalidMetadata(path.clone(), err);
    let data_type =
        DataType::from_zarrs(array.data_type()).map_err(|err| invalid(err.to_string()))?;
    let element_kind = match array.attributes().get(ELEMENT_COMPONENTS_ATTRIBUTE) {
        None => ElementKind::Scalar(data_type),
        Some(components) => {
            let components = components
                .as_u64()
                .and_then(|components| usize::try_from(components).ok())
                .ok_or_else(|| {
                    invalid(format!(
                        "{ELEMENT_COMPONENTS_ATTRIBUTE} is not a component count: {components}"
                    ))
                })?;
            ElementKind::Composite {
                components,
                data_type,
            }
        }
    };
    DatasetDescriptor::from_stored_shape(array.shape().to_vec(), element_kind)
        .map_err(|err| invalid(err.to_string()))
}
