// src/mesh/mod.rs
mod local;
mod merger;

pub use local::LocalMesh;
pub use merger::{merge, GlobalMesh, MeshMerger, VertexIndex};
