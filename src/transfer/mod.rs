use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num,
};

use crate::engine::{PlacementError, Planner};
use crate::roster::*;
use crate::student_registry::StudentRegistry;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassFileError {
    #[error("unknown directive at line {0}: {1}")]
    UnknownDirective(usize, String),
    #[error("malformed line {0}: {1}")]
    MalformedLine(usize, String),
    #[error("unknown student at line {0}: {1}")]
    UnknownStudent(usize, String),
    #[error("bad placement directive at line {0}: {1}")]
    BadPlacement(usize, PlacementError),
    #[error("io error")]
    IO(#[from] io::Error),
    #[error("not a valid number")]
    ParseError(#[from] num::ParseIntError),
}

type Result<T> = std::result::Result<T, ClassFileError>;

/// Parses a class file into a ready-to-run `Planner`.
///
/// One directive per line, `#` starts a comment:
/// ```text
/// table <capacity>
/// student <name>
/// lock <name> <table-index>
/// together <name> <name>
/// separate <name> <name>
/// ```
/// Students must be declared before they are named in a `lock`, `together`,
/// or `separate` line; names may not contain whitespace.
pub fn parse(filename: &str) -> Result<Planner> {
    let file = File::open(filename)?;
    let buffer = BufReader::new(&file);

    let mut students = StudentRegistry::new();
    let mut tables: Vec<Table> = vec![];
    let mut constraints: Vec<Constraint> = vec![];
    // Applied last so lock lines may appear before their table is declared
    let mut locks: Vec<(usize, StudentId, usize)> = vec![];

    for (ix, line) in buffer.lines().enumerate() {
        let line = line?;
        let lineno = ix + 1;
        let words: Vec<&str> = line
            .split('#')
            .next()
            .unwrap_or("")
            .split_ascii_whitespace()
            .collect();

        match words[..] {
            [] => {}
            ["table", capacity] => tables.push(Table::new(capacity.parse::<usize>()?)),
            ["student", name] => {
                students.create(name);
            }
            ["lock", name, table_ix] => {
                let id = lookup(&students, name, lineno)?;
                locks.push((lineno, id, table_ix.parse::<usize>()?));
            }
            ["together", a, b] => {
                let a = lookup(&students, a, lineno)?;
                let b = lookup(&students, b, lineno)?;
                constraints.push(Constraint::together(a, b));
            }
            ["separate", a, b] => {
                let a = lookup(&students, a, lineno)?;
                let b = lookup(&students, b, lineno)?;
                constraints.push(Constraint::separate(a, b));
            }
            [directive, ..] if ["table", "student", "lock", "together", "separate"]
                .contains(&directive) =>
            {
                return Err(ClassFileError::MalformedLine(lineno, line.clone()))
            }
            _ => return Err(ClassFileError::UnknownDirective(lineno, line.clone())),
        }
    }

    for (lineno, id, table_ix) in locks {
        let student = students
            .get(id)
            .cloned()
            .expect("lock refers to a registered student");
        match tables.get_mut(table_ix) {
            None => {
                return Err(ClassFileError::BadPlacement(
                    lineno,
                    PlacementError::UnknownTable(table_ix),
                ))
            }
            Some(table) if table.remaining_space() == 0 => {
                return Err(ClassFileError::BadPlacement(
                    lineno,
                    PlacementError::TableFull(table_ix),
                ))
            }
            Some(table) => table.seat(student, true),
        }
    }

    Ok(Planner::new(students.into_students(), tables, constraints))
}

fn lookup(students: &StudentRegistry, name: &str, lineno: usize) -> Result<StudentId> {
    students
        .get_by_name(name)
        .ok_or_else(|| ClassFileError::UnknownStudent(lineno, name.to_string()))
}
