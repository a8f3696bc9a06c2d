use std::io::Write;
use std::path::Path;

use folio_client::{Backend, SessionController};
use folio_config::FolioConfig;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bootstrap;
use crate::cli::{ChatArgs, GlobalFlags, OutputFormat};
use crate::commands::shared::{self, SessionReport, UploadSummary};
use crate::output::{self, format_turn};
use crate::progress::Progress;
use crate::ui;

const GREETING: &str =
    "Hello! I'm ready to answer questions about your PDF. What would you like to know?";

const HELP: &str = "\
Type a question and press enter.
  /new <PDF>    start over with another document
  /transcript   show the conversation so far
  /quit         leave (EOF works too)";

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Question(&'a str),
    New(Option<&'a str>),
    Transcript,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> Input<'_> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Input::Question(line);
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, rest)| (name, rest.trim()));
    match name {
        "new" => Input::New((!rest.is_empty()).then_some(rest)),
        "transcript" => Input::Transcript,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(name),
    }
}

/// Handle `folio chat`.
pub async fn handle(
    args: &ChatArgs,
    config: &FolioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut ctl = SessionController::new(bootstrap::backend(config)?, bootstrap::timeouts(config));
    tracing::info!(session_id = ctl.session().id(), "chat session started");

    let first = UploadSummary::from(&shared::upload(&mut ctl, &args.pdf).await?);
    greet(&first);
    let mut upload = Some(first);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::Unknown(name) => println!("Unknown command /{name}. Try /help."),
            Input::Transcript => print_transcript(&ctl),
            Input::New(None) => println!("Usage: /new <PDF>"),
            Input::New(Some(path)) => {
                ctl.reset();
                upload = start_over(&mut ctl, Path::new(path)).await;
            }
            Input::Question(question) => ask(&ctl, question).await,
        }
    }

    if flags.format == OutputFormat::Json {
        let report = SessionReport {
            session: ctl.session().id().to_string(),
            upload,
            transcript: ctl.chat().map(|chat| chat.transcript()).unwrap_or_default(),
        };
        output::output(&report, OutputFormat::Json)?;
    }
    Ok(())
}

async fn start_over<B: Backend>(
    ctl: &mut SessionController<B>,
    path: &Path,
) -> Option<UploadSummary> {
    match shared::upload(ctl, path).await {
        Ok(ack) => {
            let summary = UploadSummary::from(&ack);
            greet(&summary);
            Some(summary)
        }
        Err(error) => {
            println!("folio! {error:#}");
            None
        }
    }
}

async fn ask<B: Backend>(ctl: &SessionController<B>, question: &str) {
    let Some(chat) = ctl.chat() else {
        println!("No document loaded. Upload one with /new <PDF>.");
        return;
    };

    let progress = Progress::spinner("Thinking...");
    let outcome = chat.ask(question, ctl.session().id()).await;
    progress.finish_clear();

    match outcome {
        Ok(Some(turn)) => println!("{}", format_turn(&turn)),
        Ok(None) => {}
        Err(error) => println!("folio! {error}"),
    }
}

fn greet(summary: &UploadSummary) {
    if ui::prefs().chatter {
        println!("{}", summary.message);
    }
    println!("folio> {GREETING}");
}

fn print_transcript<B: Backend>(ctl: &SessionController<B>) {
    match ctl.chat() {
        Some(chat) if chat.turn_count() > 0 => {
            for turn in chat.transcript() {
                println!("{}", format_turn(&turn));
            }
        }
        _ => println!("(no messages yet)"),
    }
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_lines_are_questions() {
        assert_eq!(parse_line("  What is this?  \n"), Input::Question("What is this?"));
        assert_eq!(parse_line(""), Input::Question(""));
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_line("/quit"), Input::Quit);
        assert_eq!(parse_line("/exit"), Input::Quit);
        assert_eq!(parse_line("/transcript"), Input::Transcript);
        assert_eq!(parse_line("/help"), Input::Help);
        assert_eq!(parse_line("/bogus arg"), Input::Unknown("bogus"));
    }

    #[test]
    fn new_takes_a_path() {
        assert_eq!(
            parse_line("/new  docs/other paper.pdf "),
            Input::New(Some("docs/other paper.pdf"))
        );
        assert_eq!(parse_line("/new"), Input::New(None));
        assert_eq!(parse_line("/new   "), Input::New(None));
    }
}
