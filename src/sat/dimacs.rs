//! DIMACS CNF export

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A CNF formula in signed 1-based integer form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    pub variable_count: usize,
    pub clauses: Vec<Vec<i32>>,
}

impl Cnf {
    pub fn new(variable_count: usize, clauses: Vec<Vec<i32>>) -> Self {
        Self {
            variable_count,
            clauses,
        }
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Write the `p cnf` header followed by one `0`-terminated line per clause
    pub fn write_dimacs<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "p cnf {} {}", self.variable_count, self.clauses.len())?;

        for clause in &self.clauses {
            for literal in clause {
                write!(writer, "{} ", literal)?;
            }
            writeln!(writer, "0")?;
        }

        writer.flush()
    }

    pub fn to_dimacs_string(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_dimacs(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Write `<directory>/<name>.cnf`, creating the directory if needed
    pub fn save_to_directory<P: AsRef<Path>>(&self, directory: P, name: &str) -> Result<PathBuf> {
        let directory = directory.as_ref();
        std::fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create directory: {}", directory.display()))?;

        let path = directory.join(format!("{}.cnf", name));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create CNF file: {}", path.display()))?;

        self.write_dimacs(io::BufWriter::new(file))
            .with_context(|| format!("Failed to write CNF file: {}", path.display()))?;

        Ok(path)
    }
}
