//! Help text for each context.

use cforce_models::{Context, Line};

/// A row in a help table.
pub struct HelpEntry {
    /// Usage syntax.
    pub usage: &'static str,
    /// One-line description.
    pub brief: &'static str,
}

static ROOT_HELP: &[HelpEntry] = &[
    HelpEntry {
        usage: "scan <target>",
        brief: "Start passive vulnerability scan",
    },
    HelpEntry {
        usage: "msfconsole",
        brief: "Launch Metasploit Framework",
    },
    HelpEntry {
        usage: "wpscan <target>",
        brief: "Start WPScan enumeration",
    },
    HelpEntry {
        usage: "hydra <target>",
        brief: "Start SSH Brute Force",
    },
    HelpEntry {
        usage: "exados",
        brief: "Start EXADOS flood simulation",
    },
];

static FRAMEWORK_HELP: &[HelpEntry] = &[
    HelpEntry {
        usage: "use <module>",
        brief: "Select an exploit module",
    },
    HelpEntry {
        usage: "search <term>",
        brief: "Search for modules",
    },
    HelpEntry {
        usage: "sessions -i <id>",
        brief: "Interact with a session",
    },
    HelpEntry {
        usage: "show <type>",
        brief: "Show info (payloads, options)",
    },
    HelpEntry {
        usage: "set <opt> <val>",
        brief: "Set a context variable",
    },
    HelpEntry {
        usage: "check",
        brief: "Check if target is vulnerable",
    },
    HelpEntry {
        usage: "exploit / run",
        brief: "Launch the attack",
    },
];

static INTERACTIVE_HELP: &[HelpEntry] = &[
    HelpEntry {
        usage: "sysinfo",
        brief: "Get system information",
    },
    HelpEntry {
        usage: "getuid",
        brief: "Get user ID",
    },
    HelpEntry {
        usage: "hashdump",
        brief: "Dump SAM database",
    },
    HelpEntry {
        usage: "shell",
        brief: "Drop into system shell",
    },
    HelpEntry {
        usage: "background",
        brief: "Background current session",
    },
];

/// Returns the help entries for a context.
pub fn entries(context: Context) -> &'static [HelpEntry] {
    match context {
        Context::Root => ROOT_HELP,
        Context::Framework | Context::Module => FRAMEWORK_HELP,
        Context::Interactive => INTERACTIVE_HELP,
    }
}

/// Renders the help block for a context.
pub fn lines(context: Context) -> Vec<Line> {
    let heading = match context {
        Context::Root => "Available Commands (ROOT):",
        Context::Framework | Context::Module => "Core Commands:",
        Context::Interactive => "Meterpreter Commands:",
    };

    let mut out = vec![Line::system(heading)];
    out.extend(
        entries(context)
            .iter()
            .map(|e| Line::plain(format!("  {:<17}: {}", e.usage, e.brief))),
    );
    out
}
