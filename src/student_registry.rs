use std::collections::HashMap;

use crate::roster::{Student, StudentId};

#[derive(Clone, Debug)]
pub(crate) struct StudentRegistry {
    students: Vec<Student>,
    by_name: HashMap<String, StudentId>,
}

impl StudentRegistry {
    pub(crate) fn new() -> StudentRegistry {
        StudentRegistry {
            students: vec![],
            by_name: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.get(id.0 as usize)
    }

    pub(crate) fn get_by_name(&self, name: &str) -> Option<StudentId> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn create(&mut self, name: &str) -> StudentId {
        let id = StudentId(self.students.len() as u32);
        self.students.push(Student::new(id, name));
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub(crate) fn ensure(&mut self, name: &str) -> StudentId {
        match self.get_by_name(name) {
            Some(id) => id,
            None => self.create(name),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.students.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Student> + '_ {
        self.students.iter()
    }

    pub(crate) fn into_students(self) -> Vec<Student> {
        self.students
    }
}
