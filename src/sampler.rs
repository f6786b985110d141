// src/sampler.rs
use crate::error::{ConvertError, Result};
use crate::mesh::GlobalMesh;
use crate::metadata::{read_index, FieldDescriptor, PartitionReference};
use crate::reader::PartitionFile;
use crate::types::{FieldSet, Point3};
use log::debug;
use std::path::Path;

/// One time step of one field, in global point order
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSample {
    descriptor: FieldDescriptor,
    values: Vec<f64>,
}

impl FieldSample {
    /// Wrap row-major values (`component_count` per point).
    pub fn new(descriptor: FieldDescriptor, values: Vec<f64>) -> Self {
        FieldSample { descriptor, values }
    }

    pub fn zeros(descriptor: FieldDescriptor, num_points: usize) -> Self {
        let values = vec![0.0; num_points * descriptor.component_count];
        FieldSample { descriptor, values }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn component_count(&self) -> usize {
        self.descriptor.component_count
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn num_points(&self) -> usize {
        match self.component_count() {
            0 => 0,
            n => self.values.len() / n,
        }
    }

    /// Components of point `index`
    pub fn row(&self, index: usize) -> &[f64] {
        let n = self.component_count();
        &self.values[index * n..(index + 1) * n]
    }

    /// Euclidean norm of point `index`
    pub fn norm(&self, index: usize) -> f64 {
        self.row(index).iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Check that this sample fits a mesh of `num_points` points.
    pub fn validate(&self, num_points: usize) -> Result<()> {
        let n = self.component_count();
        if self.descriptor.kind().is_none() {
            return Err(ConvertError::FieldTypeMismatch {
                expected: "1 or 3 components".to_string(),
                found: format!("{} components in field {:?}", n, self.descriptor.name),
            });
        }
        if self.values.len() != num_points * n {
            return Err(ConvertError::FieldTypeMismatch {
                expected: format!("{} values ({} points x {})", num_points * n, num_points, n),
                found: format!("{} values in field {:?}", self.values.len(), self.descriptor.name),
            });
        }
        Ok(())
    }
}

/// Remaps per-partition field values onto a [`GlobalMesh`].
///
/// The mesh topology is assumed fixed over the time series, so only the
/// points and values of each partition are read; every local point is
/// located through the mesh's vertex index.
pub struct FieldSampler<'a> {
    mesh: &'a GlobalMesh,
}

impl<'a> FieldSampler<'a> {
    pub fn new(mesh: &'a GlobalMesh) -> Self {
        FieldSampler { mesh }
    }

    /// Sample the field described by an index file.
    pub fn sample_index(&self, index_path: impl AsRef<Path>) -> Result<FieldSample> {
        let (descriptor, partitions) = read_index(index_path)?;
        self.sample(&partitions, &descriptor)
    }

    /// Sample one field from its partition files.
    ///
    /// Shared interface points reported by several partitions are written
    /// by each of them in turn; the last partition wins. Every global point
    /// must be written at least once.
    pub fn sample(&self, partitions: &PartitionReference, descriptor: &FieldDescriptor) -> Result<FieldSample> {
        let width = descriptor.component_count;
        let mut sample = FieldSample::zeros(descriptor.clone(), self.mesh.num_points());
        sample.validate(self.mesh.num_points())?;

        let mut covered = vec![false; self.mesh.num_points()];

        for path in partitions.iter() {
            let data = PartitionFile::open(path)?.read(FieldSet::sample(), width)?;
            let points = data.points.unwrap_or_default();
            let values = data.values.unwrap_or_default();

            if values.len() != points.len() * width {
                return Err(ConvertError::CountMismatch {
                    path: path.to_path_buf(),
                    what: "value rows",
                    expected: points.len(),
                    found: values.len() / width,
                });
            }

            self.scatter(path, &points, &values, width, &mut sample.values, &mut covered)?;
        }

        if let Some(index) = covered.iter().position(|&c| !c) {
            return Err(ConvertError::UncoveredPoint { index });
        }

        debug!(
            "sampled {:?} over {} partitions, {} points",
            descriptor.name,
            partitions.len(),
            self.mesh.num_points()
        );

        Ok(sample)
    }

    fn scatter(
        &self,
        path: &Path,
        points: &[Point3],
        values: &[f64],
        width: usize,
        target: &mut [f64],
        covered: &mut [bool],
    ) -> Result<()> {
        for (point, row) in points.iter().zip(values.chunks_exact(width)) {
            let global = self.mesh.index_of(point).ok_or_else(|| ConvertError::UnmappedPoint {
                path: path.to_path_buf(),
                x: point[0],
                y: point[1],
                z: point[2],
            })? as usize;

            target[global * width..(global + 1) * width].copy_from_slice(row);
            covered[global] = true;
        }
        Ok(())
    }
}

/// Sample a field over `mesh` from its partition files.
pub fn sample(mesh: &GlobalMesh, partitions: &PartitionReference, descriptor: &FieldDescriptor) -> Result<FieldSample> {
    FieldSampler::new(mesh).sample(partitions, descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_of_vector_row() {
        let sample = FieldSample::new(FieldDescriptor::vector("vel"), vec![3.0, 4.0, 0.0, 1.0, 2.0, 2.0]);
        assert_eq!(sample.num_points(), 2);
        assert_eq!(sample.row(1), &[1.0, 2.0, 2.0]);
        assert!((sample.norm(0) - 5.0).abs() < 1e-12);
        assert!((sample.norm(1) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        let tem = FieldSample::new(FieldDescriptor::scalar("tem"), vec![1.0, 2.0]);
        assert!(tem.validate(2).is_ok());
        assert!(matches!(tem.validate(3), Err(ConvertError::FieldTypeMismatch { .. })));

        let odd = FieldSample::new(
            FieldDescriptor {
                name: "odd".into(),
                component_count: 2,
            },
            vec![1.0, 2.0],
        );
        assert!(matches!(odd.validate(1), Err(ConvertError::FieldTypeMismatch { .. })));
    }

    #[test]
    fn test_zeros() {
        let sample = FieldSample::zeros(FieldDescriptor::vector("vel"), 4);
        assert_eq!(sample.values().len(), 12);
        assert!(sample.values().iter().all(|&v| v == 0.0));
    }
}
