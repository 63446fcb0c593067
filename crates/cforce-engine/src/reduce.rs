//! The transition function.
//!
//! [`reduce`] is the single state-update path: typed commands, host actions,
//! sequence cues and flood ticks all arrive as [`Event`]s. It never fails;
//! every error is a scrollback line.

use cforce_models::{default_findings, Context, Line};
use rand::Rng;
use tracing::{debug, info, trace};

use crate::command::{escalates, resolve, Command, CommandKind};
use crate::config::EngineConfig;
use crate::flood::FloodProgress;
use crate::help;
use crate::script::{Finish, Script};
use crate::sequences::{self, ChainStart};
use crate::state::{Action, Event, SessionState, Transition};
use crate::target::{classify, clean_target};

const FRAMEWORK_ART: &str = r#"
     ,           ,
    /             \
   ((__-^^-,-^^-__))
    `-_---' `---_-'
     `--|o` 'o|--'
        \  `  /
         ): :(
         :o_o:
          "-"
"#;

/// Applies one event to a session.
pub fn reduce<R: Rng + ?Sized>(
    state: SessionState,
    event: Event,
    config: &EngineConfig,
    rng: &mut R,
) -> Transition {
    let mut reducer = Reducer {
        state,
        config,
        rng,
        script: None,
    };
    reducer.handle(event);
    Transition {
        state: reducer.state,
        script: reducer.script,
    }
}

struct Reducer<'a, R: ?Sized> {
    state: SessionState,
    config: &'a EngineConfig,
    rng: &'a mut R,
    script: Option<Script>,
}

impl<R: Rng + ?Sized> Reducer<'_, R> {
    fn handle(&mut self, event: Event) {
        match event {
            Event::Submit(line) => {
                if self.state.busy {
                    trace!(line = %line, "input ignored while busy");
                    return;
                }
                self.submit(&line);
                self.mark_busy();
            }
            Event::Scripted(line) => self.submit(&line),
            Event::Launch(action) => {
                if self.state.busy && !matches!(action, Action::SetTarget(_)) {
                    trace!(?action, "action ignored while busy");
                    return;
                }
                self.launch(action);
                self.mark_busy();
            }
            Event::Clear => self.state.clear_scrollback(),
            Event::Emit(line) => self.state.push(line),
            Event::SessionOpened(id) => {
                info!(session = %id, "session opened");
                self.state.open_session = Some(id);
            }
            Event::Finish(finish) => {
                if finish == Finish::Findings {
                    self.state.findings = default_findings();
                }
                self.state.busy = false;
                debug!(?finish, "sequence finished");
            }
            Event::FloodTick => {
                let rng = &mut *self.rng;
                if let Some(flood) = self.state.flood.as_mut() {
                    let lines = flood.advance(rng);
                    self.state.extend(lines);
                }
            }
            Event::FloodEnd(end) => {
                if let Some(flood) = self.state.flood.take() {
                    info!(?end, requests = flood.requests, "flood ended");
                    self.state.extend(flood.finish(end));
                    self.state.busy = false;
                }
            }
        }
    }

    fn mark_busy(&mut self) {
        if let Some(script) = &self.script {
            debug!(script = script.name(), "sequence started");
            self.state.busy = true;
        }
    }

    fn start(&mut self, script: Script) {
        self.script = Some(script);
    }

    fn set_context(&mut self, context: Context) {
        if self.state.context != context {
            info!(from = %self.state.context, to = %context, "context changed");
        }
        self.state.set_context(context);
    }

    fn say(&mut self, line: Line) {
        self.state.push(line);
    }

    fn submit(&mut self, line: &str) {
        let trimmed = line.trim();
        let Some(cmd) = Command::parse(trimmed) else {
            return;
        };

        let prompt = self.state.prompt_label();
        self.say(Line::input(format!("{} {}", prompt, trimmed)));

        if escalates(self.state.context, &cmd.name) {
            self.say(Line::system("[*] Starting Metasploit Framework..."));
            self.set_context(Context::Framework);
        }

        match resolve(self.state.context, &cmd.name) {
            Some(kind) => {
                debug!(command = %cmd.name, context = %self.state.context, "dispatching command");
                self.dispatch(kind, &cmd);
            }
            None => self.unknown(&cmd.name),
        }
    }

    fn unknown(&mut self, name: &str) {
        let text = match self.state.context {
            Context::Root => format!("bash: {}: command not found", name),
            _ => format!("[-] Unknown command: {}", name),
        };
        self.say(Line::error(text));
    }

    fn dispatch(&mut self, kind: CommandKind, cmd: &Command) {
        match kind {
            CommandKind::Clear => self.state.clear_scrollback(),
            CommandKind::Exit => self.exit(),
            CommandKind::Back => self.back(),
            CommandKind::Help => {
                let lines = help::lines(self.state.context);
                self.state.extend(lines);
            }

            CommandKind::Scan => {
                self.adopt_target(cmd.arg(0));
                self.scan();
            }
            CommandKind::Msfconsole => {
                self.say(Line::plain(FRAMEWORK_ART));
                self.say(Line::system("C-Force Metasploit Framework v6.3.4-dev"));
                self.say(Line::plain(
                    "[*] Starting the Metasploit Framework console...",
                ));
                self.set_context(Context::Framework);
            }
            CommandKind::Wpscan => {
                self.adopt_target(cmd.arg(0));
                self.launch(Action::Wpscan);
            }
            CommandKind::Hydra => {
                self.adopt_target(cmd.arg(0));
                self.launch(Action::Hydra);
            }
            CommandKind::Flood => {
                self.adopt_target(cmd.arg(0));
                self.launch(Action::Flood);
            }

            CommandKind::Search => self.search(cmd.arg(0)),
            CommandKind::Use => match cmd.arg(0) {
                Some(module) => {
                    info!(module, "module selected");
                    self.state.select_module(module);
                    self.say(Line::plain(
                        "[*] Using configured payload generic/shell_reverse_tcp",
                    ));
                }
                None => self.say(Line::error("Usage: use <module_name>")),
            },
            CommandKind::Show => self.show(cmd.arg(0)),
            CommandKind::Set => self.set(cmd.arg(0), cmd.arg(1)),
            CommandKind::Check => {
                if let Some(target) = self.module_target() {
                    let host = clean_target(&target);
                    self.say(Line::plain(format!("[*] Validating target {}...", host)));
                    self.start(Script::Sequence(sequences::check(&host, classify(&target))));
                }
            }
            CommandKind::Exploit => {
                if let Some(target) = self.module_target() {
                    self.exploit(&target);
                }
            }
            CommandKind::Sessions => self.sessions(cmd.arg(0), cmd.arg(1)),

            CommandKind::Sysinfo => self.state.extend([
                Line::plain("Computer     : CFORCE_TARGET_01"),
                Line::plain("OS           : Linux 5.4.0-89-generic (x64)"),
                Line::plain("Architecture : x64"),
                Line::plain("Meterpreter  : x64/linux"),
            ]),
            CommandKind::Getuid => self.say(Line::success("Server username: root")),
            CommandKind::Hashdump => {
                self.say(Line::warning("[*] Dumping password hashes..."));
                self.start(Script::Sequence(sequences::hashdump()));
            }
            CommandKind::Shell => self.state.extend([
                Line::plain("Process 2301 created."),
                Line::plain("Channel 1 created."),
                Line::input("# whoami"),
                Line::plain("root"),
            ]),
            CommandKind::Background => {
                self.set_context(Context::Framework);
                self.say(Line::warning("Backgrounding session 1..."));
            }
        }
    }

    fn exit(&mut self) {
        match self.state.context {
            Context::Root => self.say(Line::system("Logout")),
            Context::Interactive => {
                self.say(Line::system("[*] Shutting down Meterpreter session..."));
                self.set_context(Context::Framework);
            }
            context => {
                let parent = context.parent().unwrap_or_default();
                self.set_context(parent);
            }
        }
    }

    fn back(&mut self) {
        match self.state.context {
            Context::Root => self.say(Line::warning("Already at root level.")),
            Context::Interactive => {
                self.set_context(Context::Framework);
                self.say(Line::warning("[*] Backgrounding session..."));
            }
            context => {
                let parent = context.parent().unwrap_or_default();
                self.set_context(parent);
            }
        }
    }

    fn adopt_target(&mut self, arg: Option<&str>) {
        if let Some(target) = arg {
            self.state.target = Some(target.to_string());
        }
    }

    /// Target for `check`/`exploit`, reporting the missing precondition.
    fn module_target(&mut self) -> Option<String> {
        if self.state.context != Context::Module {
            self.say(Line::error("[-] No module selected."));
            return None;
        }
        match self.state.target.clone() {
            Some(target) => Some(target),
            None => {
                self.say(Line::error("[-] RHOSTS not set."));
                None
            }
        }
    }

    /// Current target for a host action, reporting when there is none.
    fn required_target(&mut self, missing: &str) -> Option<String> {
        match self.state.target.clone() {
            Some(target) => Some(target),
            None => {
                self.say(Line::error(missing));
                None
            }
        }
    }

    fn scan(&mut self) {
        let Some(target) = self.required_target("Error: No target specified.") else {
            return;
        };
        self.state.findings.clear();
        self.start(Script::Sequence(sequences::scan(&clean_target(&target))));
    }

    fn launch(&mut self, action: Action) {
        match action {
            Action::SetTarget(target) => {
                let target = target.trim();
                if target.is_empty() {
                    return;
                }
                info!(host = target, "target set");
                self.state.target = Some(target.to_string());
                self.say(Line::system(format!(
                    "[*] Target set to {}",
                    clean_target(target)
                )));
            }
            Action::Scan => self.scan(),
            Action::ExploitChain => {
                let Some(target) = self.required_target("Error: Set target first.") else {
                    return;
                };
                let start = match self.state.context {
                    Context::Root => ChainStart::Shell,
                    Context::Interactive => ChainStart::Session,
                    Context::Framework | Context::Module => ChainStart::Console,
                };
                self.start(Script::Sequence(sequences::exploit_chain(&target, start)));
            }
            Action::Wpscan => {
                let Some(target) = self.required_target("Error: Set target first.") else {
                    return;
                };
                let seq = sequences::wpscan(&target, classify(&target), &mut *self.rng);
                self.set_context(Context::Root);
                self.start(Script::Sequence(seq));
            }
            Action::Hydra => {
                let Some(target) = self.required_target("Error: Set target first.") else {
                    return;
                };
                let seq = sequences::hydra(&target, classify(&target), &mut *self.rng);
                self.set_context(Context::Root);
                self.start(Script::Sequence(seq));
            }
            Action::Flood => {
                let Some(target) = self.required_target("Error: Set target first.") else {
                    return;
                };
                let plan = sequences::flood(&target, self.config);
                self.state.flood = Some(FloodProgress::new(
                    clean_target(&target),
                    plan.tick,
                    plan.duration,
                ));
                self.set_context(Context::Root);
                self.start(Script::Flood(plan));
            }
        }
    }

    fn exploit(&mut self, target: &str) {
        let host = clean_target(target);
        let exposure = classify(target);
        let lhost = self.config.lhost.clone();

        self.say(Line::plain(format!(
            "[*] Started reverse TCP handler on {}:4444",
            lhost
        )));
        self.say(Line::plain(format!(
            "[*] Sending stage (12901 bytes) to {}",
            host
        )));

        self.start(Script::Sequence(sequences::exploit(&host, &lhost, exposure)));
    }

    fn search(&mut self, term: Option<&str>) {
        self.state.extend([
            Line::system(format!("Matching Modules ({}):", term.unwrap_or("all"))),
            Line::plain("   #  Name                                      Disclosure Date  Rank       Check  Description"),
            Line::plain("   -  ----                                      ---------------  ----       -----  -----------"),
            Line::plain("   0  exploit/multi/http/apache_normalize_path  2021-10-05       excellent  Yes    Apache Path Traversal"),
            Line::plain("   1  exploit/windows/smb/ms17_010_eternalblue  2017-03-14       average    Yes    MS17-010 EternalBlue"),
        ]);
    }

    fn show(&mut self, what: Option<&str>) {
        match what.map(str::to_lowercase).as_deref() {
            Some("payloads") => self.state.extend([
                Line::system("Compatible Payloads:"),
                Line::plain("   Name                                 Description"),
                Line::plain("   ----                                 -----------"),
                Line::plain("   linux/x64/meterpreter/reverse_tcp    Inject meterpreter server (Linux x64)"),
                Line::plain("   linux/x64/shell/reverse_tcp          Spawn a command shell (Linux x64)"),
                Line::plain("   generic/shell_reverse_tcp            Connect back to attacker and spawn a shell"),
                Line::plain("   php/meterpreter/reverse_tcp          Run a meterpreter server in PHP"),
                Line::plain("   windows/x64/meterpreter/reverse_tcp  Inject meterpreter server (Windows x64)"),
                Line::plain("   java/jsp_shell_reverse_tcp           Connect back via JSP shell"),
            ]),
            Some("options") => {
                let rhosts = self.state.target.clone().unwrap_or_default();
                let lhost = self.config.lhost.clone();
                self.state.extend([
                    Line::system("Module Options:"),
                    Line::plain("   Name     Current Setting  Required  Description"),
                    Line::plain("   ----     ---------------  --------  -----------"),
                    Line::plain(format!("   RHOSTS   {:<16} yes       The target address", rhosts)),
                    Line::plain("   RPORT    80               yes       The target port"),
                    Line::plain(format!("   LHOST    {:<16} yes       The listen address", lhost)),
                ]);
            }
            _ => self.say(Line::warning("Usage: show [payloads|options]")),
        }
    }

    fn set(&mut self, option: Option<&str>, value: Option<&str>) {
        let (Some(option), Some(value)) = (option, value) else {
            self.say(Line::error("Usage: set <option> <value>"));
            return;
        };

        let option = option.to_uppercase();
        if option == "RHOSTS" {
            info!(host = value, "target set");
            self.state.target = Some(value.to_string());
        }
        self.say(Line::plain(format!("{} => {}", option, value)));
    }

    fn sessions(&mut self, flag: Option<&str>, id: Option<&str>) {
        match flag {
            Some("-i") => {
                if id == Some("1") {
                    self.say(Line::plain("[*] Starting interaction with 1..."));
                    self.set_context(Context::Interactive);
                } else {
                    self.say(Line::error(format!(
                        "[-] Error: No session with ID {}",
                        id.unwrap_or_default()
                    )));
                }
            }
            Some("-l") | None => {
                self.state.extend([
                    Line::system("Active sessions:"),
                    Line::plain("  Id  Type                     Information  Connection"),
                    Line::plain("  --  ----                     -----------  ----------"),
                ]);
                let listing = match (&self.state.open_session, &self.state.target) {
                    (Some(id), Some(target)) => format!(
                        "  {}   meterpreter x64/linux    root @ {}  {}:4444 -> {}:56732",
                        id,
                        clean_target(target),
                        self.config.lhost,
                        clean_target(target)
                    ),
                    (Some(id), None) => format!("  {}   meterpreter x64/linux    root", id),
                    (None, _) => "  No active sessions.".to_string(),
                };
                self.say(Line::plain(listing));
            }
            Some(_) => self.say(Line::error("Usage: sessions -i <id> OR sessions -l")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flood::FloodEnd;
    use crate::script::Effect;
    use cforce_models::LineKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn step(state: SessionState, event: Event) -> Transition {
        let mut rng = StdRng::seed_from_u64(7);
        reduce(state, event, &EngineConfig::default(), &mut rng)
    }

    fn submit(state: SessionState, line: &str) -> Transition {
        step(state, Event::Submit(line.to_string()))
    }

    fn last(state: &SessionState) -> &Line {
        state.scrollback.last().unwrap()
    }

    #[test]
    fn test_blank_submit_is_noop() {
        for context in [
            Context::Root,
            Context::Framework,
            Context::Module,
            Context::Interactive,
        ] {
            let mut state = SessionState::new();
            state.set_context(context);
            for line in ["", "   ", "\t"] {
                let t = submit(state.clone(), line);
                assert_eq!(t.state, state);
                assert!(t.script.is_none());
            }
        }
    }

    #[test]
    fn test_echo_uses_prompt() {
        let t = submit(SessionState::new(), "  help  ");
        assert_eq!(t.state.scrollback[3], Line::input("root@cforce:~# help"));
    }

    #[test]
    fn test_unknown_at_root() {
        let before = SessionState::new();
        let t = submit(before.clone(), "bogus");
        assert_eq!(t.state.scrollback.len(), before.scrollback.len() + 2);
        assert_eq!(*last(&t.state), Line::error("bash: bogus: command not found"));
        assert_eq!(t.state.context, Context::Root);
    }

    #[test]
    fn test_unknown_in_framework() {
        let mut state = SessionState::new();
        state.set_context(Context::Framework);
        let t = submit(state, "scan");
        assert_eq!(*last(&t.state), Line::error("[-] Unknown command: scan"));
    }

    #[test]
    fn test_command_name_is_case_insensitive() {
        let t = submit(SessionState::new(), "MSFCONSOLE");
        assert_eq!(t.state.context, Context::Framework);
    }

    #[test]
    fn test_escalation_then_use() {
        let t = submit(SessionState::new(), "use foo");
        let lines = &t.state.scrollback[3..];
        assert_eq!(lines[0], Line::input("root@cforce:~# use foo"));
        assert_eq!(lines[1], Line::system("[*] Starting Metasploit Framework..."));
        assert_eq!(t.state.context, Context::Module);
        assert_eq!(t.state.active_module.as_deref(), Some("foo"));
    }

    #[test]
    fn test_use_without_module() {
        let mut state = SessionState::new();
        state.set_context(Context::Framework);
        let t = submit(state, "use");
        assert_eq!(*last(&t.state), Line::error("Usage: use <module_name>"));
        assert_eq!(t.state.context, Context::Framework);
    }

    #[test]
    fn test_exit_and_back_pop_levels() {
        let mut state = SessionState::new();
        state.select_module("exploit/x");

        let t = submit(state, "back");
        assert_eq!(t.state.context, Context::Framework);
        assert_eq!(t.state.active_module, None);

        let t = submit(t.state, "exit");
        assert_eq!(t.state.context, Context::Root);

        let t = submit(t.state, "exit");
        assert_eq!(t.state.context, Context::Root);
        assert_eq!(*last(&t.state), Line::system("Logout"));

        let t = submit(t.state, "back");
        assert_eq!(t.state.context, Context::Root);
        assert_eq!(*last(&t.state), Line::warning("Already at root level."));
    }

    #[test]
    fn test_interactive_exit_and_background() {
        let mut state = SessionState::new();
        state.set_context(Context::Interactive);
        let t = submit(state.clone(), "quit");
        assert_eq!(t.state.context, Context::Framework);

        let t = submit(state, "background");
        assert_eq!(t.state.context, Context::Framework);
        assert_eq!(*last(&t.state), Line::warning("Backgrounding session 1..."));
    }

    #[test]
    fn test_clear_keeps_context_and_target() {
        let mut state = SessionState::new();
        state.select_module("exploit/x");
        state.target = Some("demo".to_string());

        let t = step(state, Event::Clear);
        assert!(t.state.scrollback.is_empty());
        assert_eq!(t.state.context, Context::Module);
        assert_eq!(t.state.active_module.as_deref(), Some("exploit/x"));
        assert_eq!(t.state.target.as_deref(), Some("demo"));
    }

    #[test]
    fn test_clear_command_empties_scrollback() {
        let t = submit(SessionState::new(), "clear");
        assert!(t.state.scrollback.is_empty());
    }

    #[test]
    fn test_busy_rejects_input() {
        let mut state = SessionState::new();
        state.busy = true;
        for line in ["help", "clear", "scan demo", "use x"] {
            let t = submit(state.clone(), line);
            assert_eq!(t.state, state);
        }
        let t = step(state.clone(), Event::Launch(Action::Scan));
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_scripted_bypasses_busy() {
        let mut state = SessionState::new();
        state.busy = true;
        let t = step(state, Event::Scripted("msfconsole".to_string()));
        assert_eq!(t.state.context, Context::Framework);
        assert!(t.state.busy);
    }

    #[test]
    fn test_set_rhosts_and_payload() {
        let t = submit(SessionState::new(), "set RHOSTS 10.0.0.5");
        assert_eq!(t.state.context, Context::Framework);
        assert_eq!(*last(&t.state), Line::plain("RHOSTS => 10.0.0.5"));
        assert_eq!(t.state.target.as_deref(), Some("10.0.0.5"));

        let t = submit(t.state, "set payload linux/x64/shell/reverse_tcp");
        assert_eq!(
            *last(&t.state),
            Line::plain("PAYLOAD => linux/x64/shell/reverse_tcp")
        );

        let t = submit(t.state, "set lport");
        assert_eq!(*last(&t.state), Line::error("Usage: set <option> <value>"));
    }

    #[test]
    fn test_check_preconditions() {
        let mut state = SessionState::new();
        state.set_context(Context::Framework);
        let t = submit(state, "check");
        assert_eq!(*last(&t.state), Line::error("[-] No module selected."));

        let t = submit(t.state, "use exploit/x");
        let t = submit(t.state, "check");
        assert_eq!(*last(&t.state), Line::error("[-] RHOSTS not set."));
        assert!(t.script.is_none());
        assert!(!t.state.busy);
    }

    #[test]
    fn test_check_starts_sequence() {
        let mut state = SessionState::new();
        state.select_module("exploit/x");
        state.target = Some("demo".to_string());

        let t = submit(state, "check");
        assert!(t.state.busy);
        assert_eq!(*last(&t.state), Line::plain("[*] Validating target demo..."));
        match t.script {
            Some(Script::Sequence(seq)) => assert_eq!(seq.name, "check"),
            other => panic!("unexpected script: {:?}", other),
        }
    }

    #[test]
    fn test_exploit_opens_session_when_cue_plays() {
        let opens = |script: &Option<Script>| match script {
            Some(Script::Sequence(seq)) => seq
                .cues
                .iter()
                .any(|c| c.effect == Effect::OpenSession("1".to_string())),
            other => panic!("unexpected script: {:?}", other),
        };

        let mut state = SessionState::new();
        state.select_module("exploit/x");
        state.target = Some("10.0.0.7".to_string());
        let t = submit(state.clone(), "run");
        assert_eq!(t.state.open_session, None);
        assert!(opens(&t.script));

        let t = step(t.state, Event::SessionOpened("1".to_string()));
        assert_eq!(t.state.open_session.as_deref(), Some("1"));

        state.target = Some("example.com".to_string());
        let t = submit(state, "exploit");
        assert!(!opens(&t.script));
    }

    #[test]
    fn test_tool_actions_return_to_root_shell() {
        for action in [Action::Wpscan, Action::Hydra, Action::Flood] {
            let mut state = SessionState::new();
            state.select_module("exploit/x");
            state.target = Some("demo.local".to_string());

            let t = step(state, Event::Launch(action.clone()));
            assert_eq!(t.state.context, Context::Root, "{:?}", action);
            assert_eq!(t.state.active_module, None);
            assert_eq!(t.state.prompt_label(), "root@cforce:~#");
            assert!(t.state.busy);
        }
    }

    #[test]
    fn test_sessions() {
        let mut state = SessionState::new();
        state.set_context(Context::Framework);

        let t = submit(state.clone(), "sessions -i 2");
        assert_eq!(
            *last(&t.state),
            Line::error("[-] Error: No session with ID 2")
        );
        assert_eq!(t.state.context, Context::Framework);

        let t = submit(state.clone(), "sessions");
        assert_eq!(*last(&t.state), Line::plain("  No active sessions."));

        let t = submit(state.clone(), "sessions -x");
        assert_eq!(last(&t.state).kind, LineKind::Error);

        let t = submit(state, "sessions -i 1");
        assert_eq!(t.state.context, Context::Interactive);
        assert_eq!(t.state.prompt_label(), "meterpreter >");
    }

    #[test]
    fn test_scan_requires_target() {
        let t = submit(SessionState::new(), "scan");
        assert_eq!(*last(&t.state), Line::error("Error: No target specified."));
        assert!(!t.state.busy);

        let t = submit(t.state, "scan https://demo.local/");
        assert!(t.state.busy);
        assert_eq!(t.state.target.as_deref(), Some("https://demo.local/"));
    }

    #[test]
    fn test_finish_findings_populates_and_idles() {
        let mut state = SessionState::new();
        state.busy = true;
        let t = step(state, Event::Finish(Finish::Findings));
        assert!(!t.state.busy);
        assert_eq!(t.state.findings.len(), 4);
    }

    #[test]
    fn test_host_actions_need_target() {
        for action in [Action::ExploitChain, Action::Wpscan, Action::Hydra, Action::Flood] {
            let t = step(SessionState::new(), Event::Launch(action));
            assert_eq!(*last(&t.state), Line::error("Error: Set target first."));
            assert!(t.script.is_none());
        }
    }

    #[test]
    fn test_flood_lifecycle() {
        let t = submit(SessionState::new(), "exados 10.0.0.9");
        assert!(t.state.busy);
        assert!(t.state.is_flooding());
        assert!(matches!(t.script, Some(Script::Flood(_))));

        let t = step(t.state, Event::FloodTick);
        assert_eq!(t.state.flood.as_ref().map(|f| f.requests), Some(15));

        let t = step(t.state, Event::FloodEnd(FloodEnd::Cancelled));
        assert!(!t.state.busy);
        assert!(!t.state.is_flooding());
        let count = t.state.scrollback.len();

        let t = step(t.state, Event::FloodEnd(FloodEnd::Elapsed));
        assert_eq!(t.state.scrollback.len(), count);
        let t = step(t.state, Event::FloodTick);
        assert_eq!(t.state.scrollback.len(), count);
    }

    #[test]
    fn test_set_target_action_allowed_while_busy() {
        let mut state = SessionState::new();
        state.busy = true;
        let t = step(state, Event::Launch(Action::SetTarget("demo".to_string())));
        assert_eq!(t.state.target.as_deref(), Some("demo"));
    }
}
