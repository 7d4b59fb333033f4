use std::fmt;

#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StudentId(pub u32);

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A member of the class. Identity is the id; the name is display-only and
/// not assumed unique.
#[derive(Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

impl Student {
    pub fn new(id: StudentId, name: &str) -> Student {
        Student {
            id,
            name: name.to_string(),
        }
    }
}

impl fmt::Debug for Student {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({:?})", self.name, self.id)
    }
}
