//! Containers of datasets.
//!
//! A [`Container`] binds a store holding a hierarchy of groups and datasets.
//! Datasets are addressed by slash delimited paths such as `group/subgroup/data`, where every segment but the last is a group.
//!
//! Creating a dataset:
//!  - creates group metadata for every missing ancestor,
//!  - reuses an existing dataset with the same [`DatasetDescriptor`],
//!  - replaces an existing dataset with a different descriptor, or fails if the [`OverwritePolicy`] is [`OverwritePolicy::Fail`], and
//!  - never touches datasets at other paths.

mod dataset;
mod dataset_errors;
mod dataset_path;

use std::{path::Path, sync::Arc};

pub use dataset::{Dataset, ELEMENT_COMPONENTS_ATTRIBUTE};
pub use dataset_errors::DatasetError;
pub use dataset_path::{DatasetPath, DatasetPathError};

use zarrs::{
    filesystem::{FilesystemStore, FilesystemStoreCreateError},
    group::GroupBuilder,
    storage::{
        ListableStorageTraits, ReadableStorageTraits, ReadableWritableListableStorage,
        StorageError, StoreKey, StorePrefix, WritableStorageTraits,
    },
};

use crate::{
    array::{describe, ArrayView, ArrayViewMut, DatasetDescriptor},
    config::{global_config, OverwritePolicy},
    element::Element,
};

/// The type of a node in a hierarchy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NodeType {
    Group,
    Array,
}

impl NodeType {
    const fn name(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Array => "dataset",
        }
    }
}

/// A container of groups and datasets.
///
/// Operations block until the store completes them.
/// A container is not meant to be mutated concurrently, callers serialise access to the same store.
#[derive(Clone)]
pub struct Container {
    storage: ReadableWritableListableStorage,
    overwrite_policy: Option<OverwritePolicy>,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("overwrite_policy", &self.overwrite_policy())
            .finish_non_exhaustive()
    }
}

impl Container {
    /// Open the container in the directory at `path`.
    ///
    /// The directory is created when the first dataset is written.
    ///
    /// # Errors
    /// Returns a [`FilesystemStoreCreateError`] if `path` is not a valid store location.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FilesystemStoreCreateError> {
        let store = FilesystemStore::new(path)?.sorted();
        Ok(Self::new(Arc::new(store)))
    }

    /// Create a container in `storage`.
    #[must_use]
    pub fn new(storage: ReadableWritableListableStorage) -> Self {
        Self {
            storage,
            overwrite_policy: None,
        }
    }

    /// Returns the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &ReadableWritableListableStorage {
        &self.storage
    }

    /// Returns the overwrite policy of the container.
    ///
    /// Defaults to the [global overwrite policy](crate::config::Config#overwrite-policy).
    #[must_use]
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite_policy
            .unwrap_or_else(|| global_config().overwrite_policy())
    }

    /// Set the overwrite policy of the container.
    pub fn set_overwrite_policy(&mut self, overwrite_policy: OverwritePolicy) -> &mut Self {
        self.overwrite_policy = Some(overwrite_policy);
        self
    }

    /// Returns the type of the node at `node_path`, or [`None`] if there is no Zarr V3 node.
    fn node_type(&self, node_path: &str) -> Result<Option<NodeType>, DatasetError> {
        let key = match node_path.trim_start_matches('/') {
            "" => StoreKey::new("zarr.json"),
            relative => StoreKey::new(format!("{relative}/zarr.json")),
        }
        .map_err(StorageError::from)?;
        let Some(metadata) = self.storage.get(&key)? else {
            return Ok(None);
        };
        let metadata: serde_json::Value = serde_json::from_slice(&metadata)
            .map_err(|err| StorageError::InvalidMetadata(key, err.to_string()))?;
        Ok(match metadata.get("node_type").and_then(serde_json::Value::as_str) {
            Some("array") => Some(NodeType::Array),
            Some("group") => Some(NodeType::Group),
            _ => None,
        })
    }

    /// Create group metadata for every missing ancestor of `path`.
    fn create_ancestors(&self, path: &DatasetPath) -> Result<(), DatasetError> {
        for ancestor in path.ancestors() {
            match self.node_type(&ancestor)? {
                Some(NodeType::Group) => {}
                Some(node_type) => {
                    return Err(DatasetError::PathBlocked {
                        path: path.clone(),
                        node: ancestor,
                        node_type: node_type.name(),
                    });
                }
                None => {
                    GroupBuilder::new()
                        .build(self.storage.clone(), &ancestor)?
                        .store_metadata()?;
                    log::debug!("created group {ancestor}");
                }
            }
        }
        Ok(())
    }

    /// Create the dataset at `dataset_path` with `descriptor`.
    ///
    /// An existing dataset with the same descriptor is reused.
    /// An existing dataset with a different descriptor is erased and recreated, unless the [overwrite policy](Container::overwrite_policy) is [`OverwritePolicy::Fail`].
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if:
    ///  - `dataset_path` is invalid, or it or an ancestor is a node that cannot hold the dataset,
    ///  - a dataset with a different descriptor exists and the overwrite policy is to fail,
    ///  - recreating the dataset fails after the old dataset was erased, or
    ///  - there is an underlying store error.
    pub fn create_dataset(
        &self,
        dataset_path: &str,
        descriptor: &DatasetDescriptor,
    ) -> Result<Dataset, DatasetError> {
        let path = DatasetPath::new(dataset_path)?;
        descriptor.element_kind().validate()?;
        self.create_ancestors(&path)?;

        match self.node_type(path.as_str())? {
            None => {
                let dataset = Dataset::create(self.storage.clone(), path, descriptor.clone())?;
                log::debug!("created dataset {} {descriptor}", dataset.path());
                Ok(dataset)
            }
            Some(NodeType::Group) => Err(DatasetError::PathBlocked {
                node: path.to_string(),
                path,
                node_type: NodeType::Group.name(),
            }),
            Some(NodeType::Array) => {
                let existing = Dataset::open(self.storage.clone(), path.clone());
                let existing = match existing {
                    Ok(existing) if existing.descriptor() == descriptor => {
                        log::debug!("reusing dataset {path} {descriptor}");
                        return Ok(existing);
                    }
                    Ok(existing) => existing.descriptor().to_string(),
                    Err(err) => err.to_string(),
                };
                match self.overwrite_policy() {
                    OverwritePolicy::Fail => Err(DatasetError::IncompatibleDataset {
                        path,
                        existing,
                        requested: descriptor.clone(),
                    }),
                    OverwritePolicy::Replace => {
                        let dataset = self
                            .erase_path(&path)
                            .and_then(|()| {
                                Dataset::create(self.storage.clone(), path.clone(), descriptor.clone())
                            })
                            .map_err(|source| DatasetError::ReplaceFailed {
                                path: path.clone(),
                                source: Box::new(source),
                            })?;
                        log::debug!("replaced dataset {path} {existing} with {descriptor}");
                        Ok(dataset)
                    }
                }
            }
        }
    }

    fn erase_path(&self, path: &DatasetPath) -> Result<(), DatasetError> {
        let prefix: StorePrefix = path.store_prefix()?;
        self.storage.erase_prefix(&prefix)?;
        Ok(())
    }

    /// Open the dataset at `dataset_path`.
    ///
    /// # Errors
    /// Returns [`DatasetError::NotFound`] if there is no dataset at `dataset_path`, or another [`DatasetError`] if the path or metadata is invalid or there is an underlying store error.
    pub fn open_dataset(&self, dataset_path: &str) -> Result<Dataset, DatasetError> {
        let path = DatasetPath::new(dataset_path)?;
        match self.node_type(path.as_str())? {
            Some(NodeType::Array) => Dataset::open(self.storage.clone(), path),
            Some(NodeType::Group) | None => Err(DatasetError::NotFound(path)),
        }
    }

    /// Returns true if a dataset exists at `dataset_path`.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if the path is invalid or there is an underlying store error.
    pub fn contains_dataset(&self, dataset_path: &str) -> Result<bool, DatasetError> {
        let path = DatasetPath::new(dataset_path)?;
        Ok(self.node_type(path.as_str())? == Some(NodeType::Array))
    }

    /// Erase the node (dataset or group) at `node_path` and everything below it.
    ///
    /// Succeeds if the node does not exist.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if the path is invalid or there is an underlying store error.
    pub fn erase_node(&self, node_path: &str) -> Result<(), DatasetError> {
        let path = DatasetPath::new(node_path)?;
        self.erase_path(&path)?;
        log::debug!("erased node {path}");
        Ok(())
    }

    /// Return a tree representation of the hierarchy.
    ///
    /// Children are listed in name order below their group and datasets are annotated with their stored shape and data type.
    /// For example:
    /// ```text
    /// /
    ///   group
    ///     data [10, 11] int32
    /// ```
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if metadata is invalid or there is an underlying store error.
    pub fn hierarchy_tree(&self) -> Result<String, DatasetError> {
        let mut tree = String::from("/\n");
        self.update_tree(&mut tree, "", 1)?;
        Ok(tree)
    }

    fn update_tree(&self, tree: &mut String, group: &str, depth: usize) -> Result<(), DatasetError> {
        let prefix = if group.is_empty() {
            StorePrefix::root()
        } else {
            StorePrefix::new(format!("{group}/"))?
        };
        let mut children: Vec<String> = self
            .storage
            .list_dir(&prefix)?
            .prefixes()
            .iter()
            .map(|child| child.as_str().trim_end_matches('/').to_string())
            .collect();
        children.sort();
        for child in children {
            let name = child.rsplit('/').next().unwrap_or_default();
            let node_path = format!("/{child}");
            match self.node_type(&node_path)? {
                Some(NodeType::Group) => {
                    tree.push_str(&format!("{}{name}\n", " ".repeat(depth * 2)));
                    self.update_tree(tree, &child, depth + 1)?;
                }
                Some(NodeType::Array) => {
                    let dataset = Dataset::open(self.storage.clone(), DatasetPath::new(&node_path)?)?;
                    let descriptor = dataset.descriptor();
                    tree.push_str(&format!(
                        "{}{name} {:?} {}\n",
                        " ".repeat(depth * 2),
                        descriptor.shape(),
                        descriptor.data_type()
                    ));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Write `view` to the dataset at `dataset_path`, creating or replacing it as required.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if the element kind of `T` is unsupported or the dataset cannot be created or written.
    pub fn write_array<T: Element>(
        &self,
        dataset_path: &str,
        view: &ArrayView<'_, T>,
    ) -> Result<(), DatasetError> {
        let descriptor = describe(view)?;
        let dataset = self.create_dataset(dataset_path, &descriptor)?;
        dataset.write(view)
    }

    /// Returns the descriptor of the dataset at `dataset_path`.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if there is no dataset at `dataset_path`, see [`Container::open_dataset`].
    pub fn import_info(&self, dataset_path: &str) -> Result<DatasetDescriptor, DatasetError> {
        Ok(self.open_dataset(dataset_path)?.descriptor().clone())
    }

    /// Read the dataset at `dataset_path` into `view`.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if there is no dataset at `dataset_path` or `view` does not match it, see [`Dataset::read`].
    pub fn read_array<T: Element>(
        &self,
        dataset_path: &str,
        view: &mut ArrayViewMut<'_, T>,
    ) -> Result<(), DatasetError> {
        self.open_dataset(dataset_path)?.read(view)
    }
}
