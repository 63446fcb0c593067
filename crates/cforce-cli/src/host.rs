//! Slash-prefixed host actions.
//!
//! Anything not starting with `/` is terminal input and goes to the session
//! untouched. Slash commands are the dashboard's buttons: they map onto
//! [`Action`]s or host-only views such as the findings report.

use cforce_engine::Action;

/// Help information for a host command.
pub struct HostHelp {
    /// Command name without the slash.
    pub name: &'static str,
    /// Command aliases.
    pub aliases: &'static [&'static str],
    /// Usage syntax.
    pub usage: &'static str,
    /// Brief one-line description.
    pub brief: &'static str,
}

/// Static help entries for all host commands.
pub static HOST_HELP: &[HostHelp] = &[
    HostHelp {
        name: "scan",
        aliases: &[],
        usage: "/scan [target]",
        brief: "Run the passive scan",
    },
    HostHelp {
        name: "exploit",
        aliases: &["x"],
        usage: "/exploit [target]",
        brief: "Replay the full exploit chain",
    },
    HostHelp {
        name: "wpscan",
        aliases: &[],
        usage: "/wpscan [target]",
        brief: "Web login enumeration and brute force",
    },
    HostHelp {
        name: "hydra",
        aliases: &[],
        usage: "/hydra [target]",
        brief: "SSH brute force",
    },
    HostHelp {
        name: "flood",
        aliases: &["ddos"],
        usage: "/flood [target]",
        brief: "Flood simulation (text only)",
    },
    HostHelp {
        name: "stop",
        aliases: &[],
        usage: "/stop",
        brief: "Stop the running sequence",
    },
    HostHelp {
        name: "target",
        aliases: &["t"],
        usage: "/target [host]",
        brief: "Show or set the operation target",
    },
    HostHelp {
        name: "report",
        aliases: &["r"],
        usage: "/report",
        brief: "Show the findings of the last scan",
    },
    HostHelp {
        name: "status",
        aliases: &["s"],
        usage: "/status",
        brief: "Show context, target and module",
    },
    HostHelp {
        name: "help",
        aliases: &["h", "?"],
        usage: "/help",
        brief: "Show this help",
    },
    HostHelp {
        name: "quit",
        aliases: &["q"],
        usage: "/quit",
        brief: "Leave the terminal",
    },
];

/// Parsed REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Run a host action, optionally switching target first.
    Launch {
        action: Action,
        target: Option<String>,
    },
    /// Stop the running sequence.
    Stop,
    /// Show (`None`) or set the target.
    Target(Option<String>),
    /// Findings report.
    Report,
    /// Session summary.
    Status,
    /// Host command help.
    Help,
    /// Leave the REPL.
    Quit,
    /// Unrecognized slash command.
    Unknown(String),
    /// Terminal input.
    Input(String),
}

impl HostCommand {
    /// Parses a line of REPL input.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let Some(stripped) = trimmed.strip_prefix('/') else {
            return HostCommand::Input(input.to_string());
        };

        let mut parts = stripped.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let launch = |action: Action| HostCommand::Launch {
            action,
            target: arg.clone(),
        };

        match name.as_str() {
            "scan" => launch(Action::Scan),
            "exploit" | "x" => launch(Action::ExploitChain),
            "wpscan" => launch(Action::Wpscan),
            "hydra" => launch(Action::Hydra),
            "flood" | "ddos" => launch(Action::Flood),
            "stop" => HostCommand::Stop,
            "target" | "t" => HostCommand::Target(arg.clone()),
            "report" | "r" => HostCommand::Report,
            "status" | "s" => HostCommand::Status,
            "help" | "h" | "?" => HostCommand::Help,
            "quit" | "q" => HostCommand::Quit,
            _ => HostCommand::Unknown(name),
        }
    }

    /// Actions to apply for this command, in order.
    pub fn actions(&self) -> Vec<Action> {
        match self {
            HostCommand::Launch { action, target } => {
                let mut actions = Vec::new();
                if let Some(target) = target {
                    actions.push(Action::SetTarget(target.clone()));
                }
                actions.push(action.clone());
                actions
            }
            HostCommand::Target(Some(target)) => vec![Action::SetTarget(target.clone())],
            _ => Vec::new(),
        }
    }
}

/// Slash completions for the line editor.
pub fn completions() -> Vec<String> {
    HOST_HELP.iter().map(|h| format!("/{}", h.name)).collect()
}

/// Renders the host command help block.
pub fn help_text() -> String {
    let mut out = String::from("Host commands:\n");
    for help in HOST_HELP {
        out.push_str(&format!("  {:<18} {}", help.usage, help.brief));
        if !help.aliases.is_empty() {
            let aliases: Vec<String> = help.aliases.iter().map(|a| format!("/{}", a)).collect();
            out.push_str(&format!(" ({})", aliases.join(", ")));
        }
        out.push('\n');
    }
    out.push_str("\nAnything else is typed into the terminal. Try \"help\".");
    out
}
