//! CLI front end: stdin/stdout REPL over a single form.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{CommandError, FlowError};
use crate::flow::{AdvanceOutcome, StepController};
use crate::form::{FieldName, SubmitOutcome};
use crate::notify::{Notifier, Toast, ToastVariant};
use crate::view::{FormView, render_text};

const HELP: &str = "\
commands:
  set <field> <value>   edit a field (username, email, phone, role, password, confirmPassword)
  next                  go to the password step
  back                  return to the first step
  submit                create the account
  show                  redraw the form
  /quit                 exit";

/// Prints toasts to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Destructive => eprintln!("❌ {}", toast.title),
            ToastVariant::Default => eprintln!("ℹ️  {}", toast.title),
        }
        if let Some(description) = toast.description {
            eprintln!("   {description}");
        }
    }
}

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: FieldName, value: String },
    Next,
    Back,
    Submit,
    Show,
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
        match head {
            "set" => {
                let rest = rest.trim_start();
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::MissingField);
                }
                Ok(Self::Set {
                    field: field.parse::<FieldName>()?,
                    value: value.to_string(),
                })
            }
            "next" => Ok(Self::Next),
            "back" => Ok(Self::Back),
            "submit" => Ok(Self::Submit),
            "show" => Ok(Self::Show),
            "help" => Ok(Self::Help),
            "/quit" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Apply a command and return what to print. `None` means quit.
pub fn execute(
    flow: &mut StepController,
    command: Command,
    notifier: &dyn Notifier,
) -> Result<Option<String>, FlowError> {
    let mut out = Vec::new();
    match command {
        Command::Set { field, value } => {
            flow.set_field(field, value);
        }
        Command::Next => {
            if let AdvanceOutcome::Blocked { invalid } = flow.advance()? {
                let names: Vec<&str> = invalid.iter().map(|f| f.as_str()).collect();
                out.push(format!("Cannot continue yet: {}", names.join(", ")));
            }
        }
        Command::Back => {
            flow.retreat()?;
        }
        Command::Submit => match flow.submit(notifier)? {
            SubmitOutcome::Completed(submission) => {
                let json = serde_json::to_string_pretty(&submission.record)
                    .unwrap_or_else(|e| format!("<unprintable record: {e}>"));
                out.push(json);
            }
            SubmitOutcome::Rejected { errors } => {
                for e in errors {
                    out.push(format!("{}: {}", e.field, e.error));
                }
            }
        },
        Command::Show => {}
        Command::Help => return Ok(Some(HELP.to_string())),
        Command::Quit => return Ok(None),
    }
    out.push(render_text(&FormView::build(flow)));
    Ok(Some(out.join("\n\n")))
}

/// Run the REPL until EOF or `/quit`.
pub async fn run() -> std::io::Result<()> {
    let mut flow = StepController::new();
    let notifier = ConsoleNotifier;

    println!("{}\n", render_text(&FormView::build(&flow)));
    eprintln!("Type `help` for commands.");
    eprint!("> ");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            eprint!("> ");
            continue;
        }
        let reply = line
            .parse::<Command>()
            .and_then(|command| execute(&mut flow, command, &notifier).map_err(CommandError::from));
        match reply {
            Ok(Some(text)) => println!("\n{text}\n"),
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Command rejected");
                eprintln!("⚠️  {e}");
            }
        }
        eprint!("> ");
    }
    Ok(())
}
