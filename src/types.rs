// src/types.rs
use bytemuck::{Pod, Zeroable};
use std::ops::BitOr;

/// A point coordinate as stored in the partition files.
pub type Point3 = [f64; 3];

/// A linear tetrahedron as four point indices.
pub type Tetra = [u32; 4];

/// Exact-identity key for a coordinate.
///
/// Two points are the same entity only when their coordinates are
/// bit-for-bit equal, so the key is the raw bit pattern of the three
/// components. `0.0` and `-0.0` are therefore distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct CoordKey([u64; 3]);

impl CoordKey {
    pub fn new(point: &Point3) -> Self {
        CoordKey(bytemuck::cast::<Point3, [u64; 3]>(*point))
    }

    pub fn to_point(self) -> Point3 {
        bytemuck::cast::<[u64; 3], Point3>(self.0)
    }
}

impl From<Point3> for CoordKey {
    fn from(point: Point3) -> Self {
        CoordKey::new(&point)
    }
}

/// Kind of point field declared by a partition descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalars,
    Vectors,
}

impl FieldKind {
    /// Attribute key / marker used in the descriptor file
    pub fn keyword(&self) -> &'static str {
        match self {
            FieldKind::Scalars => "Scalars",
            FieldKind::Vectors => "Vectors",
        }
    }

    pub fn component_count(&self) -> usize {
        match self {
            FieldKind::Scalars => 1,
            FieldKind::Vectors => 3,
        }
    }

    pub fn from_component_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(FieldKind::Scalars),
            3 => Some(FieldKind::Vectors),
            _ => None,
        }
    }
}

/// Selects which blocks of a partition data file to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSet(u32);

impl FieldSet {
    pub const POINTS: u32 = 1 << 0;
    pub const CONNECTIVITY: u32 = 1 << 1;
    pub const VALUES: u32 = 1 << 2;

    pub fn new(flags: u32) -> Self {
        FieldSet(flags)
    }

    pub fn empty() -> Self {
        FieldSet(0)
    }

    /// Points and connectivity, the blocks needed to build a mesh
    pub fn mesh() -> Self {
        FieldSet(Self::POINTS | Self::CONNECTIVITY)
    }

    /// Points and values, the blocks needed to sample a field
    pub fn sample() -> Self {
        FieldSet(Self::POINTS | Self::VALUES)
    }

    pub fn all() -> Self {
        FieldSet(Self::POINTS | Self::CONNECTIVITY | Self::VALUES)
    }

    pub fn has_points(&self) -> bool {
        self.0 & Self::POINTS != 0
    }

    pub fn has_connectivity(&self) -> bool {
        self.0 & Self::CONNECTIVITY != 0
    }

    pub fn has_values(&self) -> bool {
        self.0 & Self::VALUES != 0
    }

    pub fn set_points(&mut self, value: bool) {
        self.set(Self::POINTS, value);
    }

    pub fn set_connectivity(&mut self, value: bool) {
        self.set(Self::CONNECTIVITY, value);
    }

    pub fn set_values(&mut self, value: bool) {
        self.set(Self::VALUES, value);
    }

    fn set(&mut self, flag: u32, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn raw_value(&self) -> u32 {
        self.0
    }
}

impl BitOr for FieldSet {
    type Output = FieldSet;

    fn bitor(self, rhs: FieldSet) -> FieldSet {
        FieldSet(self.0 | rhs.0)
    }
}
