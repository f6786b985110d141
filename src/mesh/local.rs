// src/mesh/local.rs
use crate::error::Result;
use crate::reader::PartitionFile;
use crate::types::{FieldSet, Point3, Tetra};
use std::path::{Path, PathBuf};

/// Mesh of a single partition, indexed locally from 0
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalMesh {
    /// File the mesh was read from; empty for meshes built in memory
    pub source: PathBuf,
    pub points: Vec<Point3>,
    pub cells: Vec<Tetra>,
}

impl LocalMesh {
    pub fn new(points: Vec<Point3>, cells: Vec<Tetra>) -> Self {
        LocalMesh {
            source: PathBuf::new(),
            points,
            cells,
        }
    }

    /// Read the point and connectivity blocks of a partition data file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = PartitionFile::open(path)?.read(FieldSet::mesh(), 1)?;
        Ok(LocalMesh {
            source: path.to_path_buf(),
            points: data.points.unwrap_or_default(),
            cells: data.connectivity.unwrap_or_default(),
        })
    }
}
