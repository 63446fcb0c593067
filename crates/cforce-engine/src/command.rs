//! Command parsing and per-context command tables.
//!
//! A submitted line is split on whitespace into a lowercased command name and
//! its arguments. The name is then resolved against the table for the current
//! context; anything not in the table is an unknown command.

use cforce_models::Context;

/// Every command the engine understands, in any context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    // Available everywhere
    Clear,
    Exit,
    Back,
    Help,

    // Root shell
    Scan,
    Msfconsole,
    Wpscan,
    Hydra,
    Flood,

    // Framework console
    Search,
    Use,
    Show,
    Set,
    Check,
    Exploit,
    Sessions,

    // Interactive session
    Sysinfo,
    Getuid,
    Hashdump,
    Shell,
    Background,
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Lowercased command name.
    pub name: String,
    /// Remaining whitespace-separated tokens, case preserved.
    pub args: Vec<String>,
}

impl Command {
    /// Parses an input line. Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?.to_lowercase();
        let args = tokens.map(String::from).collect();
        Some(Self { name, args })
    }

    /// Returns the argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Commands recognized in every context.
static GLOBAL_COMMANDS: &[(&str, CommandKind)] = &[
    ("clear", CommandKind::Clear),
    ("exit", CommandKind::Exit),
    ("quit", CommandKind::Exit),
    ("back", CommandKind::Back),
];

static ROOT_COMMANDS: &[(&str, CommandKind)] = &[
    ("help", CommandKind::Help),
    ("scan", CommandKind::Scan),
    ("msfconsole", CommandKind::Msfconsole),
    ("wpscan", CommandKind::Wpscan),
    ("hydra", CommandKind::Hydra),
    ("exados", CommandKind::Flood),
    ("ddos", CommandKind::Flood),
    ("hping3", CommandKind::Flood),
];

static FRAMEWORK_COMMANDS: &[(&str, CommandKind)] = &[
    ("help", CommandKind::Help),
    ("search", CommandKind::Search),
    ("use", CommandKind::Use),
    ("show", CommandKind::Show),
    ("set", CommandKind::Set),
    ("check", CommandKind::Check),
    ("exploit", CommandKind::Exploit),
    ("run", CommandKind::Exploit),
    ("sessions", CommandKind::Sessions),
];

static INTERACTIVE_COMMANDS: &[(&str, CommandKind)] = &[
    ("help", CommandKind::Help),
    ("sysinfo", CommandKind::Sysinfo),
    ("getuid", CommandKind::Getuid),
    ("hashdump", CommandKind::Hashdump),
    ("shell", CommandKind::Shell),
    ("background", CommandKind::Background),
];

/// Root-shell commands that lazily launch the framework console.
pub const ESCALATING_COMMANDS: &[&str] = &["use", "search", "show", "set"];

/// Returns the context-specific command table.
pub fn table(context: Context) -> &'static [(&'static str, CommandKind)] {
    match context {
        Context::Root => ROOT_COMMANDS,
        Context::Framework | Context::Module => FRAMEWORK_COMMANDS,
        Context::Interactive => INTERACTIVE_COMMANDS,
    }
}

/// Resolves a command name in a context. Global commands win.
pub fn resolve(context: Context, name: &str) -> Option<CommandKind> {
    GLOBAL_COMMANDS
        .iter()
        .chain(table(context))
        .find(|(n, _)| *n == name)
        .map(|(_, kind)| *kind)
}

/// Returns true if `name` typed at the root shell must first start the framework.
pub fn escalates(context: Context, name: &str) -> bool {
    context == Context::Root && ESCALATING_COMMANDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_and_lowercases() {
        let cmd = Command::parse("  SET  RHOSTS   Demo.Local ").unwrap();
        assert_eq!(cmd.name, "set");
        assert_eq!(cmd.args, vec!["RHOSTS", "Demo.Local"]);
        assert_eq!(cmd.arg(1), Some("Demo.Local"));
        assert_eq!(cmd.arg(2), None);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \t "), None);
    }

    #[test]
    fn test_resolve_global_everywhere() {
        for context in [
            Context::Root,
            Context::Framework,
            Context::Module,
            Context::Interactive,
        ] {
            assert_eq!(resolve(context, "clear"), Some(CommandKind::Clear));
            assert_eq!(resolve(context, "quit"), Some(CommandKind::Exit));
            assert_eq!(resolve(context, "back"), Some(CommandKind::Back));
            assert_eq!(resolve(context, "help"), Some(CommandKind::Help));
        }
    }

    #[test]
    fn test_resolve_per_context() {
        assert_eq!(resolve(Context::Root, "scan"), Some(CommandKind::Scan));
        assert_eq!(resolve(Context::Root, "hping3"), Some(CommandKind::Flood));
        assert_eq!(resolve(Context::Root, "check"), None);

        assert_eq!(resolve(Context::Module, "run"), Some(CommandKind::Exploit));
        assert_eq!(resolve(Context::Framework, "scan"), None);

        assert_eq!(
            resolve(Context::Interactive, "hashdump"),
            Some(CommandKind::Hashdump)
        );
        assert_eq!(resolve(Context::Interactive, "use"), None);
    }

    #[test]
    fn test_escalates_only_from_root() {
        assert!(escalates(Context::Root, "use"));
        assert!(escalates(Context::Root, "set"));
        assert!(!escalates(Context::Root, "scan"));
        assert!(!escalates(Context::Framework, "use"));
    }
}
