use derive_more::Display;
use thiserror::Error;
use zarrs::storage::{StorePrefix, StorePrefixError};

/// A dataset path, such as `group/subgroup/data`.
///
/// Paths are normalised to start with `/`.
/// Every segment is a valid node name: non-empty, not made only of periods, and not starting with the reserved prefix `__`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct DatasetPath(String);

/// An invalid dataset path.
#[derive(Clone, Debug, Error)]
#[error("invalid dataset path {0:?}")]
pub struct DatasetPathError(String);

impl DatasetPath {
    /// Create a dataset path from a slash delimited path with an optional leading `/`.
    ///
    /// # Errors
    /// Returns [`DatasetPathError`] if the path is empty or any segment is not a valid node name.
    pub fn new(path: &str) -> Result<Self, DatasetPathError> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        if relative.is_empty() || !relative.split('/').all(Self::valid_segment) {
            return Err(DatasetPathError(path.to_string()));
        }
        Ok(Self(format!("/{relative}")))
    }

    fn valid_segment(segment: &str) -> bool {
        !segment.is_empty() && !segment.chars().all(|c| c == '.') && !segment.starts_with("__")
    }

    /// Returns the path as a string, e.g. `/group/subgroup/data`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the paths of the groups above the dataset, starting from the root `/`.
    #[must_use]
    pub fn ancestors(&self) -> Vec<String> {
        let mut ancestors = vec!["/".to_string()];
        let mut end = 0;
        while let Some(offset) = self.0[end + 1..].find('/') {
            end += offset + 1;
            ancestors.push(self.0[..end].to_string());
        }
        ancestors
    }

    /// Returns the store prefix holding the node at this path and everything below it.
    pub(crate) fn store_prefix(&self) -> Result<StorePrefix, StorePrefixError> {
        StorePrefix::new(format!("{}/", &self.0[1..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_path_normalise() {
        let path = DatasetPath::new("group/subgroup/data").unwrap();
        assert_eq!(path.as_str(), "/group/subgroup/data");
        assert_eq!(path, DatasetPath::new("/group/subgroup/data").unwrap());
        assert_eq!(path.to_string(), "/group/subgroup/data");
        assert_eq!(path.ancestors(), vec!["/", "/group", "/group/subgroup"]);
        assert_eq!(DatasetPath::new("data").unwrap().ancestors(), vec!["/"]);
        assert_eq!(path.store_prefix().unwrap().as_str(), "group/subgroup/data/");
    }

    #[test]
    fn dataset_path_invalid() {
        for path in ["", "/", "a//b", "a/", "/a/../b", "a/.", "__a/b", "a/__b"] {
            assert!(DatasetPath::new(path).is_err(), "{path}");
        }
        assert!(DatasetPath::new("a.b/.c/d..").is_ok());
    }
}
