// src/lib.rs
//! # pvd2tec
//!
//! Converts time series of partitioned unstructured-grid output (a `.pvd`
//! index referencing a `.pvtu` partition descriptor and one `.vtu` file per
//! partition) into merged Tecplot ASCII files.
//!
//! ## Features
//!
//! - 🧩 **Partition Merging**: Points duplicated across partition interfaces are collapsed by exact coordinate identity
//! - 🔁 **Mesh Reuse**: The merged mesh and its vertex index are built once and reused for every time step
//! - 📐 **Vector Magnitudes**: Vector fields get an extra Euclidean norm column
//! - 💾 **Atomic Output**: Files are assembled in memory and replaced in one step
//! - ⚡ **Parallel Batches**: Time steps can be converted on several worker threads
//!
//! ## Quick Start
//!
//! ### Converting One Time Step
//!
//! ```rust,no_run
//! use pvd2tec::*;
//!
//! fn main() -> Result<()> {
//!     // The mesh comes from any field of the series
//!     let (_, partitions) = read_index("results/tem0.pvd")?;
//!     let mesh = MeshMerger::merge(&partitions)?;
//!
//!     let sampler = FieldSampler::new(&mesh);
//!     let tem = sampler.sample_index("results/tem0.pvd")?;
//!     let vel = sampler.sample_index("results/vel0.pvd")?;
//!
//!     TecWriter::create("solution.0.tec").write(&mesh, &[tem, vel])?;
//!     Ok(())
//! }
//! ```
//!
//! ### Converting a Time Series
//!
//! ```rust,no_run
//! use pvd2tec::*;
//!
//! fn main() -> Result<()> {
//!     let config = BatchConfig {
//!         inputs: vec!["results/tem.pvd".into(), "results/vel.pvd".into()],
//!         output: "solution".into(),
//!         steps: StepRange::new(0, 100, 10),
//!         workers: 4,
//!         on_error: ErrorPolicy::Skip,
//!     };
//!
//!     let report = run_batch(&config)?;
//!     println!("wrote {} files", report.written.len());
//!     Ok(())
//! }
//! ```
//!
//! ### Async Writing
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! use pvd2tec::*;
//! # #[cfg(feature = "async")]
//! use std::sync::Arc;
//!
//! # #[cfg(feature = "async")]
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let (_, partitions) = read_index("results/tem0.pvd")?;
//!     let mesh = Arc::new(MeshMerger::merge(&partitions)?);
//!
//!     let writer = AsyncTecWriter::start().await?;
//!     let tem = FieldSampler::new(&mesh).sample_index("results/tem0.pvd")?;
//!     writer.write("solution.0.tec", Arc::clone(&mesh), vec![tem]).await?;
//!
//!     writer.close().await?;
//!     Ok(())
//! }
//! # #[cfg(not(feature = "async"))]
//! # fn main() {}
//! ```

// Modules
pub mod error;
pub mod types;
pub mod metadata;
pub mod reader;
pub mod mesh;
pub mod sampler;
pub mod writer;
pub mod batch;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{ConvertError, Result};

// Type exports
pub use types::{CoordKey, FieldKind, FieldSet, Point3, Tetra};

// Attribute decoding
pub use utils::{decode_attributes, Attributes};

// Metadata exports
pub use metadata::{read_index, FieldDescriptor, IndexFile, PartitionReference};

// Reader exports
pub use reader::{read_partition, PartitionData, PartitionFile};

// Mesh exports
pub use mesh::{merge, GlobalMesh, LocalMesh, MeshMerger, VertexIndex};

// Sampler exports
pub use sampler::{sample, FieldSample, FieldSampler};

// Writer exports
pub use writer::{write_tec, TecBuffer, TecWriter};

#[cfg(feature = "async")]
pub use writer::AsyncTecWriter;

// Batch exports
pub use batch::{run_batch, BatchConfig, BatchReport, ErrorPolicy, StepRange};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use pvd2tec::prelude::*;
    //! ```

    pub use crate::error::{ConvertError, Result};
    pub use crate::mesh::{GlobalMesh, MeshMerger};
    pub use crate::metadata::{read_index, FieldDescriptor};
    pub use crate::sampler::{FieldSample, FieldSampler};
    pub use crate::writer::TecWriter;

    #[cfg(feature = "async")]
    pub use crate::writer::AsyncTecWriter;
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
