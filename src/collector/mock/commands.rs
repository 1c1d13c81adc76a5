//! Scripted command runner and fixed disk-usage probe for tests.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::collector::traits::{CommandRunner, DiskUsageProbe};

#[derive(Debug, Default)]
struct Script {
    programs: HashSet<String>,
    outputs: HashMap<String, String>,
}

fn command_key(program: &str, args: &[&str]) -> String {
    let mut key = program.to_string();
    for arg in args {
        key.push(' ');
        key.push_str(arg);
    }
    key
}

/// Command runner that answers from a table of canned outputs.
///
/// A program is "on `PATH`" once any output was registered for it or it was
/// added with [`MockCommands::add_program`]. Unregistered invocations behave
/// like a failing command. Clones share the same script.
#[derive(Debug, Clone, Default)]
pub struct MockCommands {
    script: Arc<RwLock<Script>>,
}

impl MockCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `program` as present on `PATH` without registering any output.
    pub fn add_program(&self, program: &str) {
        let mut script = self.script.write().unwrap_or_else(|e| e.into_inner());
        script.programs.insert(program.to_string());
    }

    /// Registers the stdout of `program args...`.
    pub fn set_output(&self, program: &str, args: &[&str], stdout: impl Into<String>) {
        let mut script = self.script.write().unwrap_or_else(|e| e.into_inner());
        script.programs.insert(program.to_string());
        script
            .outputs
            .insert(command_key(program, args), stdout.into());
    }

    /// Makes `program args...` fail from now on.
    pub fn clear_output(&self, program: &str, args: &[&str]) {
        let mut script = self.script.write().unwrap_or_else(|e| e.into_inner());
        script.outputs.remove(&command_key(program, args));
    }
}

impl CommandRunner for MockCommands {
    fn available(&self, program: &str) -> bool {
        let script = self.script.read().unwrap_or_else(|e| e.into_inner());
        script.programs.contains(program)
    }

    fn output(&self, program: &str, args: &[&str]) -> Option<String> {
        let script = self.script.read().unwrap_or_else(|e| e.into_inner());
        let text = script.outputs.get(&command_key(program, args))?.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Disk usage probe that always reports the same value.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedUsage(pub Option<f64>);

impl DiskUsageProbe for FixedUsage {
    fn used_percent(&self, _mount: &Path) -> Option<f64> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_output_is_trimmed() {
        let cmds = MockCommands::new();
        cmds.set_output("vcgencmd", &["measure_temp"], "temp=48.3'C\n");
        assert!(cmds.available("vcgencmd"));
        assert_eq!(
            cmds.output("vcgencmd", &["measure_temp"]).as_deref(),
            Some("temp=48.3'C")
        );
    }

    #[test]
    fn test_unregistered_invocation_fails() {
        let cmds = MockCommands::new();
        cmds.add_program("vcgencmd");
        assert!(cmds.available("vcgencmd"));
        assert_eq!(cmds.output("vcgencmd", &["get_throttled"]), None);
        assert!(!cmds.available("hostname"));
    }

    #[test]
    fn test_clear_output() {
        let cmds = MockCommands::new();
        cmds.set_output("hostname", &["-I"], "10.0.0.2");
        cmds.clone().clear_output("hostname", &["-I"]);
        assert_eq!(cmds.output("hostname", &["-I"]), None);
    }
}
