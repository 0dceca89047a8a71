//! Terminal client for the calendar assistant.
//!
//! Talks to a running server at `ASSISTANT_URL` (or the configured host and
//! port). With `--offline` the assistant runs inside this process instead.

use calendar_assistant::config::Config;
use calendar_assistant::error::{invalid_event, AppResult, Error};
use calendar_assistant::models::event::parse_instant;
use calendar_assistant::session::{
    day_view, week_view, AssistantApi, HttpAssistantApi, LocalAssistantApi, Session,
};
use calendar_assistant::startup;
use calendar_assistant::utils::{i18n, Clock, IdGenerator, SystemClock, UuidGenerator};
use calendar_assistant::web::AppState;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const USAGE: &str = "\
Type a message to chat with the assistant, or use a command:
  /slot <start> <end> <title>   add an event, times as YYYY-MM-DDTHH:MM
  /delete <id>                  delete an event
  /day [YYYY-MM-DD]             show one day
  /week [YYYY-MM-DD]            show the week containing a day
  /events                       list all events
  /help                         show this text
  /quit                         leave";

#[derive(Debug, PartialEq)]
enum Command {
    Chat(String),
    Slot {
        start: String,
        end: String,
        title: String,
    },
    Delete(String),
    Day(Option<String>),
    Week(Option<String>),
    Events,
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Chat(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match (name, args.as_slice()) {
            ("slot", [start, end, title @ ..]) if !title.is_empty() => Command::Slot {
                start: start.to_string(),
                end: end.to_string(),
                title: title.join(" "),
            },
            ("slot", _) => Command::Invalid("usage: /slot <start> <end> <title>".to_string()),
            ("delete", [id]) => Command::Delete(id.to_string()),
            ("delete", _) => Command::Invalid("usage: /delete <id>".to_string()),
            ("day", []) => Command::Day(None),
            ("day", [date]) => Command::Day(Some(date.to_string())),
            ("week", []) => Command::Week(None),
            ("week", [date]) => Command::Week(Some(date.to_string())),
            ("events", []) => Command::Events,
            ("help", _) => Command::Help,
            ("quit", _) | ("exit", _) => Command::Quit,
            _ => Command::Invalid(format!("unknown command /{}", name)),
        }
    }
}

/// Read a slot boundary. Times without an offset are taken in `offset`.
fn parse_slot_time(text: &str, offset: FixedOffset) -> AppResult<DateTime<FixedOffset>> {
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return offset
                .from_local_datetime(&naive)
                .single()
                .ok_or_else(|| invalid_event(&format!("'{}' is ambiguous", text)));
        }
    }
    parse_instant(text)
}

fn parse_date(text: Option<&str>, today: NaiveDate) -> AppResult<NaiveDate> {
    match text {
        None => Ok(today),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| Error::InvalidRequest(format!("'{}' is not a YYYY-MM-DD date", text))),
    }
}

async fn run<A: AssistantApi>(mut session: Session<A>, clock: Arc<dyn Clock>) -> AppResult<()> {
    println!("{}", USAGE);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let now = clock.now();

        let output = match Command::parse(&line) {
            Command::Chat(text) => session.send_message(&text).await,
            Command::Slot { start, end, title } => {
                match (
                    parse_slot_time(&start, now.timezone()),
                    parse_slot_time(&end, now.timezone()),
                ) {
                    (Ok(start), Ok(end)) => session.select_slot(&title, start, end).await,
                    (Err(e), _) | (_, Err(e)) => Some(e.to_string()),
                }
            }
            Command::Delete(id) => Some(
                session
                    .delete_event(&id)
                    .await
                    .unwrap_or_else(|| format!("No event with id {}", id)),
            ),
            Command::Day(date) => Some(match parse_date(date.as_deref(), now.date_naive()) {
                Ok(date) => day_view(session.state(), date).to_string(),
                Err(e) => e.to_string(),
            }),
            Command::Week(date) => Some(match parse_date(date.as_deref(), now.date_naive()) {
                Ok(date) => week_view(session.state(), date).to_string(),
                Err(e) => e.to_string(),
            }),
            Command::Events => Some(
                session
                    .state()
                    .events()
                    .iter()
                    .map(|event| {
                        format!(
                            "{}  {} - {}  {}",
                            event.id,
                            event.start.format("%Y-%m-%d %H:%M"),
                            event.end.format("%H:%M"),
                            event.title
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Command::Help => Some(USAGE.to_string()),
            Command::Quit => break,
            Command::Invalid(message) => Some(message),
        };

        if let Some(output) = output.filter(|output| !output.is_empty()) {
            println!("{}", output);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    startup::init_logging("warn")?;

    let config = startup::load_config()?;
    i18n::set_locale(&config.locale);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidGenerator);

    if std::env::args().any(|arg| arg == "--offline") {
        info!("Running the assistant in-process");
        let api = LocalAssistantApi::new(AppState::local(Arc::clone(&clock), Arc::clone(&ids)));
        run(Session::new(api, Arc::clone(&clock), ids), clock).await?;
    } else {
        let url = config.public_url();
        info!("Connecting to {}", url);
        let api = HttpAssistantApi::new(&url)?;
        run(Session::new(api, Arc::clone(&clock), ids), clock).await?;
    }

    Ok(())
}
