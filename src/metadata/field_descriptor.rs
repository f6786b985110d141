// src/metadata/field_descriptor.rs
use crate::types::FieldKind;
use smallvec::SmallVec;

/// Name and dimensionality of a point field
///
/// This structure describes one field of the time series:
/// - The field name as declared by the partition descriptor
/// - The number of components per point (1 for scalars, 3 for vectors)
///
/// The component count is fixed for a field over the whole time series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Field name, e.g. `tem` or `vel`
    pub name: String,

    /// Components per point, 1 or 3
    pub component_count: usize,
}

impl FieldDescriptor {
    /// Create a descriptor for a field of the given kind
    ///
    /// # Example
    ///
    /// ```
    /// use pvd2tec::metadata::FieldDescriptor;
    /// use pvd2tec::types::FieldKind;
    ///
    /// let vel = FieldDescriptor::new("vel", FieldKind::Vectors);
    /// assert_eq!(vel.component_count, 3);
    /// ```
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.into(),
            component_count: kind.component_count(),
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Scalars)
    }

    pub fn vector(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Vectors)
    }

    /// The field kind, or `None` if the component count is not 1 or 3
    pub fn kind(&self) -> Option<FieldKind> {
        FieldKind::from_component_count(self.component_count)
    }

    /// Vector fields get an extra magnitude column on output
    pub fn is_vector(&self) -> bool {
        self.component_count > 1
    }

    /// Number of output columns this field contributes
    pub fn column_count(&self) -> usize {
        if self.is_vector() {
            self.component_count + 1
        } else {
            self.component_count
        }
    }

    /// Output column names
    ///
    /// Scalars produce `<name>0`. Vectors produce one column per
    /// component followed by the magnitude column `|<name>|`.
    ///
    /// # Example
    ///
    /// ```
    /// use pvd2tec::metadata::FieldDescriptor;
    ///
    /// let names = FieldDescriptor::vector("vel").column_names();
    /// assert_eq!(names.as_slice(), ["vel0", "vel1", "vel2", "|vel|"]);
    /// ```
    pub fn column_names(&self) -> SmallVec<[String; 4]> {
        let mut names: SmallVec<[String; 4]> = (0..self.component_count)
            .map(|i| format!("{}{}", self.name, i))
            .collect();
        if self.is_vector() {
            names.push(format!("|{}|", self.name));
        }
        names
    }
}
