//! Interactive terminal host.
//!
//! Typed lines go to the session; slash commands are host actions. While a
//! sequence plays the REPL follows its output and Ctrl+C stops it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cforce_engine::EngineConfig;
use cforce_models::{Context as SessionContext, LineKind};
use cforce_runtime::{Terminal, TerminalEvent};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::debug;

use crate::error::Result;
use crate::host::{self, HostCommand};
use crate::render;
use crate::report::Report;

/// Tab completion for slash commands.
struct HostCompleter {
    commands: Vec<String>,
}

impl HostCompleter {
    fn new() -> Self {
        Self {
            commands: host::completions(),
        }
    }
}

impl Completer for HostCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let prefix = &line[..pos];
        let matches = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for HostCompleter {
    type Hint = String;
}

impl Highlighter for HostCompleter {}
impl Validator for HostCompleter {}
impl Helper for HostCompleter {}

/// Prints terminal events, hiding the echo of what the user just typed.
struct Printer {
    events: broadcast::Receiver<TerminalEvent>,
    echo: Option<String>,
}

impl Printer {
    fn show(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Line(line) => {
                if line.kind == LineKind::Input && self.echo.as_deref() == Some(line.text.as_str())
                {
                    self.echo = None;
                    return Ok(());
                }
                println!("{}", render::styled(&line));
            }
            TerminalEvent::Cleared => {
                execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
            }
            TerminalEvent::Busy(_) => {}
        }
        Ok(())
    }

    /// Prints whatever is already queued.
    fn flush(&mut self) -> io::Result<()> {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.show(event)?,
                Err(TryRecvError::Lagged(skipped)) => debug!(skipped, "output lagged"),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        self.echo = None;
        io::stdout().flush()
    }

    /// Prints events until the running sequence ends. Ctrl+C stops it.
    async fn follow(&mut self, terminal: &Terminal) -> Result<()> {
        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Ok(TerminalEvent::Busy(false)) => break,
                    Ok(event) => self.show(event)?,
                    Err(RecvError::Lagged(skipped)) => debug!(skipped, "output lagged"),
                    Err(RecvError::Closed) => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    println!("^C");
                    terminal.stop().await?;
                }
            }
        }
        terminal.wait().await?;
        self.flush()?;
        Ok(())
    }
}

/// REPL state
pub struct Repl {
    editor: Editor<HostCompleter, DefaultHistory>,
    history_path: PathBuf,
    runtime: tokio::runtime::Runtime,
    terminal: Terminal,
    printer: Printer,
}

impl Repl {
    /// Creates a new REPL instance.
    pub fn new(state_dir: &Path, config: EngineConfig) -> Result<Self> {
        let editor_config = rustyline::Config::builder()
            .completion_type(rustyline::CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(HostCompleter::new()));

        std::fs::create_dir_all(state_dir)?;
        let history_path = state_dir.join("history.txt");
        if history_path.exists() {
            let _ = editor.load_history(&history_path);
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let terminal = Terminal::new(config);
        let printer = Printer {
            events: terminal.subscribe(),
            echo: None,
        };

        Ok(Self {
            editor,
            history_path,
            runtime,
            terminal,
            printer,
        })
    }

    /// Runs the REPL loop.
    pub fn run(&mut self) -> Result<()> {
        let greeting = self.runtime.block_on(self.terminal.snapshot());
        for line in &greeting.scrollback {
            println!("{}", render::styled(line));
        }
        println!("Host commands start with '/'. Type /help to list them.");

        loop {
            let prompt = format!("{} ", self.runtime.block_on(self.terminal.prompt()));

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.as_str())?;
                    }

                    let cmd = HostCommand::parse(&line);
                    debug!(?cmd, "parsed input");

                    match self.handle(cmd, &prompt) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.runtime.block_on(self.terminal.shutdown())?;
        let _ = self.editor.save_history(&self.history_path);
        Ok(())
    }

    /// Handles one input. Returns Ok(true) if the REPL should exit.
    fn handle(&mut self, cmd: HostCommand, prompt: &str) -> Result<bool> {
        match cmd {
            HostCommand::Input(text) => {
                let trimmed = text.trim();
                let leaving = is_logout(trimmed)
                    && self.runtime.block_on(self.terminal.snapshot()).context
                        == SessionContext::Root;

                self.printer.echo = Some(format!("{}{}", prompt, trimmed));
                let started = self.runtime.block_on(self.terminal.submit(trimmed));
                self.settle(started)?;
                return Ok(leaving);
            }
            HostCommand::Launch { .. } | HostCommand::Target(Some(_)) => {
                for action in cmd.actions() {
                    let started = self.runtime.block_on(self.terminal.launch(action))?;
                    self.settle(started)?;
                }
            }
            HostCommand::Target(None) => {
                let state = self.runtime.block_on(self.terminal.snapshot());
                match state.target {
                    Some(target) => println!("Target: {}", target),
                    None => println!("No target set. Use /target <host>."),
                }
            }
            HostCommand::Stop => {
                if !self.runtime.block_on(self.terminal.stop())? {
                    println!("Nothing is running.");
                }
                self.printer.flush()?;
            }
            HostCommand::Report => {
                let state = self.runtime.block_on(self.terminal.snapshot());
                println!("{}", Report::new(&state.findings).to_text());
            }
            HostCommand::Status => {
                let state = self.runtime.block_on(self.terminal.snapshot());
                println!("Context: {}", state.context);
                println!("Module:  {}", state.active_module.as_deref().unwrap_or("-"));
                println!("Target:  {}", state.target.as_deref().unwrap_or("-"));
                println!("Session: {}", state.open_session.as_deref().unwrap_or("-"));
                println!("Findings: {}", state.findings.len());
            }
            HostCommand::Help => println!("{}", host::help_text()),
            HostCommand::Quit => return Ok(true),
            HostCommand::Unknown(name) => {
                println!("Unknown command: /{}. Type /help for host commands.", name);
            }
        }
        Ok(false)
    }

    /// Prints the output of the last input, following a sequence if one started.
    fn settle(&mut self, started: bool) -> Result<()> {
        if !started {
            self.printer.flush()?;
            return Ok(());
        }
        let Self {
            runtime,
            terminal,
            printer,
            ..
        } = self;
        runtime.block_on(printer.follow(terminal))
    }
}

/// True for inputs that log out of the root shell.
fn is_logout(input: &str) -> bool {
    let command = input.split_whitespace().next().unwrap_or_default();
    command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit")
}
