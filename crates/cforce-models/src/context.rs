//! Session contexts and target exposure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Command-interpretation mode of a terminal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    /// Plain root shell.
    #[default]
    Root,
    /// Exploitation framework console.
    Framework,
    /// Framework console with a module selected.
    Module,
    /// Interactive session on a compromised host.
    Interactive,
}

impl Context {
    /// Returns the context one level up, or `None` at the root shell.
    pub fn parent(self) -> Option<Context> {
        match self {
            Context::Root => None,
            Context::Framework => Some(Context::Root),
            Context::Module | Context::Interactive => Some(Context::Framework),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Context::Root => "root",
            Context::Framework => "framework",
            Context::Module => "module",
            Context::Interactive => "interactive",
        };
        f.write_str(name)
    }
}

/// Outcome of classifying an operation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exposure {
    /// Lab or test target; simulated attacks succeed.
    Vulnerable,
    /// Anything else; simulated attacks time out.
    Hardened,
}

impl Exposure {
    /// Returns true for lab/test targets.
    pub fn is_vulnerable(self) -> bool {
        matches!(self, Exposure::Vulnerable)
    }
}

impl fmt::Display for Exposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exposure::Vulnerable => f.write_str("vulnerable"),
            Exposure::Hardened => f.write_str("hardened"),
        }
    }
}
