// src/reader/mod.rs
mod partition;

pub use partition::{
    read_partition, PartitionData, PartitionFile, CONNECTIVITY_LINE, PIECE_HEADER_LINE, POINTS_LINE,
    VALUES_LINE,
};
