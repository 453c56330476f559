//! This module manages the collection of machine definitions embedded in the
//! crate, exposing lookup by index and name for callers that want a ready-made
//! machine without touching the file system.

use crate::types::{Machine, NtmError};

use std::sync::RwLock;

// Default embedded machine definitions
const MACHINE_TEXTS: [&str; 3] = [
    include_str!("../machines/match-zeros-ones.csv"),
    include_str!("../machines/contains-101.csv"),
    include_str!("../machines/even-zeros.csv"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<Machine>> = RwLock::new(Vec::new());
}

pub struct MachineManager;

impl MachineManager {
    /// Parse the embedded definitions and store them in the shared registry
    pub fn load() -> Result<(), NtmError> {
        let mut machines = Vec::new();

        for machine_text in MACHINE_TEXTS {
            if let Ok(machine) = crate::parser::parse(machine_text) {
                machines.push(machine);
            } else {
                eprintln!("Failed to parse embedded machine definition");
            }
        }

        if let Ok(mut write_guard) = MACHINES.write() {
            *write_guard = machines;
        } else {
            return Err(NtmError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available machines
    pub fn machine_count() -> usize {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine by its index
    pub fn machine_by_index(index: usize) -> Result<Machine, NtmError> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| NtmError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                NtmError::ValidationError(format!("Machine index {} out of range", index))
            })
    }

    /// Get a machine by its name
    pub fn machine_by_name(name: &str) -> Result<Machine, NtmError> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| NtmError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|machine| machine.name == name)
            .cloned()
            .ok_or_else(|| NtmError::ValidationError(format!("Machine '{}' not found", name)))
    }

    /// List all machine names
    pub fn list_machine_names() -> Vec<String> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .map(|machine| machine.name.clone())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get summary information about a machine by its index
    pub fn machine_info(index: usize) -> Result<MachineInfo, NtmError> {
        let machine = Self::machine_by_index(index)?;

        Ok(MachineInfo {
            index,
            name: machine.name.clone(),
            start_state: machine.start_state.clone(),
            state_count: machine.state_count(),
            transition_count: machine.transition_count(),
        })
    }

    /// Search for machines by name
    pub fn search_machines(query: &str) -> Vec<usize> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .enumerate()
                    .filter(|(_, machine)| {
                        machine.name.to_lowercase().contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the original definition text of a machine by its index
    pub fn machine_text_by_index(index: usize) -> Result<&'static str, NtmError> {
        MACHINE_TEXTS.get(index).cloned().ok_or_else(|| {
            NtmError::ValidationError(format!("Machine text index {} out of range", index))
        })
    }
}

#[derive(Debug, Clone)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    pub start_state: String,
    pub state_count: usize,
    pub transition_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::machine::Simulator;
    use crate::types::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_TRANSITIONS};

    #[test]
    fn test_machine_manager_initialization() {
        let result = MachineManager::load();
        assert!(result.is_ok());

        assert_eq!(MachineManager::machine_count(), 3);
    }

    #[test]
    fn test_all_embedded_machines_are_valid() {
        let _ = MachineManager::load();

        let count = MachineManager::machine_count();
        for i in 0..count {
            let machine = MachineManager::machine_by_index(i).unwrap();
            assert!(
                analyze(&machine).is_ok(),
                "Machine '{}' is invalid",
                machine.name
            );
        }
    }

    #[test]
    fn test_machine_names() {
        let names = MachineManager::list_machine_names();

        assert!(names.contains(&"Zero-One Matcher".to_string()));
        assert!(names.contains(&"Contains 101".to_string()));
        assert!(names.contains(&"Even Number of Zeros".to_string()));
    }

    #[test]
    fn test_machine_by_index_bounds() {
        let machine = MachineManager::machine_by_index(0);
        assert!(machine.is_ok());

        let result = MachineManager::machine_by_index(999);
        assert!(result.is_err());
    }

    #[test]
    fn test_machine_by_name() {
        let machine = MachineManager::machine_by_name("Zero-One Matcher").unwrap();
        assert_eq!(machine.start_state, "q0");

        let result = MachineManager::machine_by_name("Nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_machine_info() {
        let info = MachineManager::machine_info(0).unwrap();

        assert_eq!(info.index, 0);
        assert_eq!(info.name, "Zero-One Matcher");
        assert_eq!(info.state_count, 6);
        assert_eq!(info.transition_count, 11);

        let result = MachineManager::machine_info(999);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_machines() {
        let results = MachineManager::search_machines("zero");
        assert_eq!(results.len(), 2); // "Zero-One Matcher" and "Even Number of Zeros"

        let results = MachineManager::search_machines("101");
        assert_eq!(results.len(), 1);

        let results = MachineManager::search_machines("nonexistent");
        assert_eq!(results.len(), 0);
    }

    #[test]
    fn test_machine_text_round_trips_through_the_parser() {
        let text = MachineManager::machine_text_by_index(1).unwrap();
        let machine = crate::parser::parse(text).unwrap();
        assert_eq!(machine.name, "Contains 101");
    }

    #[test]
    fn test_embedded_machines_can_be_simulated() {
        let matcher = MachineManager::machine_by_name("Zero-One Matcher").unwrap();
        let outcome =
            Simulator::new(&matcher).run("000111", DEFAULT_MAX_DEPTH, DEFAULT_MAX_TRANSITIONS);
        assert!(outcome.is_accepted());

        let parity = MachineManager::machine_by_name("Even Number of Zeros").unwrap();
        let outcome =
            Simulator::new(&parity).run("0100", DEFAULT_MAX_DEPTH, DEFAULT_MAX_TRANSITIONS);
        assert!(!outcome.is_accepted());
    }
}
