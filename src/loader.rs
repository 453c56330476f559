//! This module provides the `MachineLoader` struct, responsible for loading
//! tabular machine definitions from files and strings.

use crate::parser::parse;
use crate::types::{Machine, NtmError};
use std::fs;
use std::path::{Path, PathBuf};

/// `MachineLoader` is a utility struct for loading machine definitions.
/// It provides methods to load definitions from individual files, from string
/// content, and to discover and load all `.csv` files within a directory.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine definition from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.csv` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Machine)` if the file is successfully read and parsed.
    /// * `Err(NtmError::FileError)` if the file cannot be read.
    /// * `Err(NtmError::ParseError)` if the content is not a valid definition.
    pub fn load_machine(path: &Path) -> Result<Machine, NtmError> {
        let content = fs::read_to_string(path).map_err(|e| {
            NtmError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single machine definition from the provided string content.
    ///
    /// This is useful for definitions that are not stored in files, e.g.,
    /// from user input.
    pub fn load_machine_from_string(content: &str) -> Result<Machine, NtmError> {
        parse(content)
    }

    /// Loads all machine definition files (`.csv` extension) from a directory.
    ///
    /// It iterates through the directory, attempts to load each `.csv` file,
    /// and collects the results. Directories and non-`.csv` files are
    /// skipped.
    ///
    /// # Arguments
    ///
    /// * `directory` - A reference to the `Path` of the directory to scan.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Machine), NtmError>>` - One entry per `.csv`
    ///   file found, holding either the path and parsed `Machine` or the
    ///   error encountered while loading it.
    pub fn load_machines(directory: &Path) -> Vec<Result<(PathBuf, Machine), NtmError>> {
        if !directory.exists() {
            return vec![Err(NtmError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(NtmError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(NtmError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.csv files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "csv") {
                    return None;
                }

                match Self::load_machine(&path) {
                    Ok(machine) => Some(Ok((path, machine))),
                    Err(e) => Some(Err(NtmError::FileError(format!(
                        "Failed to load machine from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
