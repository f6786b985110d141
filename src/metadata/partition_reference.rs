// src/metadata/partition_reference.rs
use std::path::{Path, PathBuf};

/// Ordered partition data files of one time step
///
/// Order is the order of appearance in the partition descriptor and
/// decides concatenation order when merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionReference {
    files: Vec<PathBuf>,
}

impl PartitionReference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.files
    }
}

impl From<Vec<PathBuf>> for PartitionReference {
    fn from(files: Vec<PathBuf>) -> Self {
        PartitionReference { files }
    }
}

impl<'a> IntoIterator for &'a PartitionReference {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
