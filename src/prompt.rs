//! Interactive upgrade prompt
//!
//! The prompt is an explicit state machine over a single stream of
//! input events. States: AwaitingChoice, ShowingHelp, ShowingVersion,
//! and the terminal Resolved. Quit, Ctrl-C, and end-of-input all land
//! in Resolved(None); picking a non-empty bucket lands in
//! Resolved(Some(choice)). The machine itself is pure; the driver
//! below feeds it stdin lines and renders its actions.

use crate::update::{UpdateBuckets, UpdateChoice};
use colored::Colorize;
use std::io::{BufRead, Write};

/// One input event for the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    /// A key the user pressed
    Key(char),
    /// Interrupt (Ctrl-C)
    Interrupt,
    /// Input stream ended
    Eof,
}

/// Prompt state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// Waiting for the user to pick an option
    AwaitingChoice,
    /// Help text is on screen; next the driver re-prompts
    ShowingHelp,
    /// Version info is on screen; next the driver re-prompts
    ShowingVersion,
    /// Final state; the prompt is over
    Resolved(Option<UpdateChoice>),
}

/// What the driver should do after feeding an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Nothing to render
    None,
    /// Show a one-line notice and keep waiting
    Notice(&'static str),
    /// Render the help screen, then re-prompt
    ShowHelp,
    /// Render the version screen, then re-prompt
    ShowVersion,
    /// The prompt is resolved
    Done(Option<UpdateChoice>),
}

/// State machine driving the upgrade prompt
#[derive(Debug)]
pub struct PromptMachine<'a> {
    buckets: &'a UpdateBuckets,
    state: PromptState,
}

impl<'a> PromptMachine<'a> {
    /// Creates a machine over the categorized buckets
    pub fn new(buckets: &'a UpdateBuckets) -> Self {
        Self {
            buckets,
            state: PromptState::AwaitingChoice,
        }
    }

    /// Current state
    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Driver acknowledgement after rendering help/version, returning
    /// the machine to AwaitingChoice
    pub fn acknowledge(&mut self) {
        if matches!(
            self.state,
            PromptState::ShowingHelp | PromptState::ShowingVersion
        ) {
            self.state = PromptState::AwaitingChoice;
        }
    }

    /// Feeds one event and returns the action for the driver
    pub fn handle(&mut self, event: PromptEvent) -> PromptAction {
        if let PromptState::Resolved(choice) = self.state {
            return PromptAction::Done(choice);
        }
        // an event arriving while help/version is on screen implicitly
        // acknowledges it
        self.acknowledge();

        match event {
            PromptEvent::Interrupt | PromptEvent::Eof => self.resolve(None),
            PromptEvent::Key(key) => match key.to_ascii_lowercase() {
                'p' => {
                    if self.buckets.patch.is_empty() {
                        PromptAction::Notice("No patch updates available")
                    } else {
                        self.resolve(Some(UpdateChoice::Patch))
                    }
                }
                'm' => {
                    if self.buckets.minor.is_empty() {
                        PromptAction::Notice("No minor updates available")
                    } else {
                        self.resolve(Some(UpdateChoice::Minor))
                    }
                }
                'a' => {
                    if self.buckets.all.is_empty() {
                        PromptAction::Notice("No updates available")
                    } else {
                        self.resolve(Some(UpdateChoice::All))
                    }
                }
                'q' => self.resolve(None),
                'h' => {
                    self.state = PromptState::ShowingHelp;
                    PromptAction::ShowHelp
                }
                'v' => {
                    self.state = PromptState::ShowingVersion;
                    PromptAction::ShowVersion
                }
                _ => PromptAction::None,
            },
        }
    }

    fn resolve(&mut self, choice: Option<UpdateChoice>) -> PromptAction {
        self.state = PromptState::Resolved(choice);
        PromptAction::Done(choice)
    }
}

/// Pluralizes a noun by count
fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Writes the option menu for the current buckets
pub fn write_options(buckets: &UpdateBuckets, out: &mut dyn Write) -> std::io::Result<()> {
    if !buckets.patch.is_empty() {
        writeln!(
            out,
            "  {} - Update {}",
            "p".cyan(),
            pluralize(
                buckets.patch.len(),
                "outdated patch dependency",
                "outdated patch dependencies"
            )
        )?;
    }
    if !buckets.minor.is_empty() {
        writeln!(
            out,
            "  {} - Update {}",
            "m".cyan(),
            pluralize(
                buckets.minor.len(),
                "outdated minor dependency",
                "outdated minor dependencies"
            )
        )?;
    }
    if !buckets.all.is_empty() {
        writeln!(
            out,
            "  {} - Update all {}",
            "a".cyan(),
            pluralize(
                buckets.all.len(),
                "outdated dependency",
                "outdated dependencies"
            )
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {} - Show help | {} - Show version | {} - Quit",
        "h".dimmed(),
        "v".dimmed(),
        "q".dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "Press a key and Enter to select an option...")?;
    Ok(())
}

fn write_help(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "pkgpulse upgrade prompt".bold())?;
    writeln!(out, "  p - install every patch-severity update")?;
    writeln!(out, "  m - install every minor-severity update")?;
    writeln!(out, "  a - install every available update, major included")?;
    writeln!(out, "  q - leave without installing anything")?;
    writeln!(out)
}

fn write_version(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "pkgpulse {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)
}

/// Reads the next prompt event from a line-based input
///
/// An empty line maps to an ignorable keypress.
fn next_event<R: BufRead>(input: &mut R) -> PromptEvent {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => PromptEvent::Eof,
        Ok(_) => match line.trim().chars().next() {
            Some('\u{3}') => PromptEvent::Interrupt,
            Some(key) => PromptEvent::Key(key),
            None => PromptEvent::Key('\n'),
        },
    }
}

/// Runs the prompt against arbitrary input/output streams
pub fn drive_prompt<R: BufRead, W: Write>(
    buckets: &UpdateBuckets,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<Option<UpdateChoice>> {
    if buckets.is_empty() {
        return Ok(None);
    }

    let mut machine = PromptMachine::new(buckets);
    write_options(buckets, output)?;

    loop {
        let event = next_event(input);
        match machine.handle(event) {
            PromptAction::Done(choice) => return Ok(choice),
            PromptAction::Notice(message) => {
                writeln!(output, "{}", message.red())?;
            }
            PromptAction::ShowHelp => {
                write_help(output)?;
                machine.acknowledge();
                write_options(buckets, output)?;
            }
            PromptAction::ShowVersion => {
                write_version(output)?;
                machine.acknowledge();
                write_options(buckets, output)?;
            }
            PromptAction::None => {}
        }
    }
}

/// Runs the prompt on stdin/stdout
pub fn run_prompt(buckets: &UpdateBuckets) -> std::io::Result<Option<UpdateChoice>> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    drive_prompt(buckets, &mut input, &mut output)
}
