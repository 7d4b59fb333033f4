use core::fmt;

use super::StudentId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    Separate,
    Together,
}

/// A pairwise rule requiring or forbidding co-location. Undirected: (a, b)
/// and (b, a) are the same constraint.
#[derive(Clone, Copy, Eq, Ord)]
pub struct Constraint {
    a: StudentId,
    b: StudentId,
    kind: ConstraintKind,
}

impl Constraint {
    pub fn new(a: StudentId, b: StudentId, kind: ConstraintKind) -> Constraint {
        // Normalize so the duplicate check is a plain equality check
        if a <= b {
            Constraint { a, b, kind }
        } else {
            Constraint { a: b, b: a, kind }
        }
    }

    pub fn separate(a: StudentId, b: StudentId) -> Constraint {
        Self::new(a, b, ConstraintKind::Separate)
    }

    pub fn together(a: StudentId, b: StudentId) -> Constraint {
        Self::new(a, b, ConstraintKind::Together)
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn pair(&self) -> (StudentId, StudentId) {
        (self.a, self.b)
    }

    pub fn mentions(&self, id: StudentId) -> bool {
        self.a == id || self.b == id
    }

    /// The other end of the pair, if `id` is one of the two ends.
    pub fn partner_of(&self, id: StudentId) -> Option<StudentId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

impl std::hash::Hash for Constraint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.a, self.b, self.kind).hash(state);
    }
}

impl std::cmp::PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.kind == other.kind
    }
}

impl std::cmp::PartialOrd for Constraint {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        (self.a, self.b, self.kind).partial_cmp(&(other.a, other.b, other.kind))
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ConstraintKind::Separate => write!(f, "{:?} x {:?}", self.a, self.b),
            ConstraintKind::Together => write!(f, "{:?} + {:?}", self.a, self.b),
        }
    }
}
