// src/metadata/mod.rs
mod field_descriptor;
mod index_file;
mod partition_reference;

pub use field_descriptor::FieldDescriptor;
pub use index_file::{read_index, IndexFile};
pub use partition_reference::PartitionReference;
