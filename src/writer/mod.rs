// src/writer/mod.rs
mod buffer;
mod tec_writer;

#[cfg(feature = "async")]
mod async_writer;

pub use buffer::TecBuffer;
pub use tec_writer::{render, variables_line, write_tec, TecWriter};

#[cfg(feature = "async")]
pub use async_writer::AsyncTecWriter;
