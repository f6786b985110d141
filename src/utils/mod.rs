// src/utils/mod.rs
mod attributes;
mod number_format;
mod payload;

pub use attributes::{decode_attributes, Attributes};
pub(crate) use number_format::*;
pub(crate) use payload::*;
