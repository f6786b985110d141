// src/mesh/merger.rs
use crate::error::{ConvertError, Result};
use crate::mesh::LocalMesh;
use crate::metadata::PartitionReference;
use crate::types::{CoordKey, Point3, Tetra};
use log::debug;
use std::collections::HashMap;

/// Coordinate to global point index
#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    map: HashMap<CoordKey, u32>,
}

impl VertexIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        VertexIndex {
            map: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, point: &Point3) -> Option<u32> {
        self.map.get(&CoordKey::new(point)).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// The merged, deduplicated mesh of all partitions.
///
/// Built once per physical mesh and read-only afterwards. Every field
/// sample of the time series is remapped through its [`VertexIndex`].
#[derive(Debug, Clone, Default)]
pub struct GlobalMesh {
    points: Vec<Point3>,
    cells: Vec<Tetra>,
    vertex_index: VertexIndex,
}

impl GlobalMesh {
    /// Unique points in first-seen order
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Tetrahedra over global point indices
    pub fn cells(&self) -> &[Tetra] {
        &self.cells
    }

    pub fn vertex_index(&self) -> &VertexIndex {
        &self.vertex_index
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Global index of a coordinate, if it belongs to the mesh
    pub fn index_of(&self, point: &Point3) -> Option<u32> {
        self.vertex_index.get(point)
    }
}

/// Merges partition meshes into one [`GlobalMesh`]
pub struct MeshMerger;

impl MeshMerger {
    /// Read and merge every partition file, in order.
    pub fn merge(partitions: &PartitionReference) -> Result<GlobalMesh> {
        let meshes = partitions
            .iter()
            .map(LocalMesh::from_file)
            .collect::<Result<Vec<_>>>()?;
        Self::merge_local(meshes)
    }

    /// Merge meshes already held in memory.
    ///
    /// Partitions are concatenated with their local indices shifted by the
    /// number of points before them. Coincident points are then collapsed:
    /// each distinct coordinate gets the next global index the first time
    /// it is seen, and every cell is rewritten through that mapping.
    pub fn merge_local(meshes: impl IntoIterator<Item = LocalMesh>) -> Result<GlobalMesh> {
        let mut all_points: Vec<Point3> = Vec::new();
        let mut all_cells: Vec<Tetra> = Vec::new();
        let mut partition_count = 0;

        for mesh in meshes {
            let offset = point_index(all_points.len())?;
            // Shifted local indices stay below the running total.
            point_index(all_points.len() + mesh.points.len())?;
            for (cell_id, cell) in mesh.cells.iter().enumerate() {
                if let Some(&index) = cell.iter().find(|&&i| i as usize >= mesh.points.len()) {
                    return Err(ConvertError::ConnectivityOutOfRange {
                        path: mesh.source.clone(),
                        cell: cell_id,
                        index,
                        points: mesh.points.len(),
                    });
                }
                all_cells.push(cell.map(|i| i + offset));
            }
            all_points.extend_from_slice(&mesh.points);
            partition_count += 1;
        }

        let mut vertex_index = VertexIndex::with_capacity(all_points.len());
        let mut points: Vec<Point3> = Vec::new();
        let mut remap: Vec<u32> = Vec::with_capacity(all_points.len());

        for point in &all_points {
            let next = point_index(points.len())?;
            let global = *vertex_index.map.entry(CoordKey::new(point)).or_insert_with(|| {
                points.push(*point);
                next
            });
            remap.push(global);
        }

        let cells: Vec<Tetra> = all_cells
            .iter()
            .map(|cell| cell.map(|i| remap[i as usize]))
            .collect();

        debug!(
            "merged {} partitions: {} points ({} before dedup), {} cells",
            partition_count,
            points.len(),
            all_points.len(),
            cells.len()
        );

        Ok(GlobalMesh {
            points,
            cells,
            vertex_index,
        })
    }
}

/// Point count or offset as a 32-bit point index
fn point_index(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| ConvertError::TooManyPoints { count })
}

/// Read and merge every partition file, in order.
pub fn merge(partitions: &PartitionReference) -> Result<GlobalMesh> {
    MeshMerger::merge(partitions)
}
