//! A terminal front end for the conversation session and the diagnosis
//! workflow.

#[macro_use]
extern crate tracing;

mod command;

use std::env;
use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use prayaas::DeskBuilder;
use prayaas::core::conversation::{Message, Sender};
use prayaas::core::{PendingDiagnosis, PendingReply};
use prayaas::http::{HttpServiceConfig, HttpServiceConfigBuilder};
use prayaas::service::Artifact;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::interval;

use crate::command::Command;

const BAR_CHAR: &str = "▎";

const HELP: &str = "\
Type a message to chat with the assistant, or use a command:
  /upload <path>  upload a .txt medical report for diagnosis
  /diagnosis      show the latest diagnosis
  /download       save the generated report as final_diagnosis.docx
  /help           show this help
  /quit           leave";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (transcript_tx, mut transcript_rx) = mpsc::unbounded_channel();
    let mut desk = DeskBuilder::with_http_config(load_config())
        .with_report_dir(env::var("PRAYAAS_REPORT_DIR").unwrap_or(".".into()))
        .on_transcript(move |msg| {
            transcript_tx.send(msg.clone()).ok();
        })
        .build();

    let mut lines = spawn_line_reader();
    let mut pending_reply: Option<PendingReply> = None;
    let mut pending_upload: Option<PendingDiagnosis> = None;
    let mut downloads: JoinSet<Option<PathBuf>> = JoinSet::new();

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let mut progress_bar: Option<ProgressBar> = None;
    let mut ticker = interval(Duration::from_millis(100));

    println!("{}", "🧠 Prayaas AI Health Diagnosis".bright_cyan().bold());
    println!("{HELP}\n");
    prompt();

    loop {
        select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                match Command::parse(&line) {
                    Command::Chat(text) => {
                        let session = desk.session_mut();
                        if session.is_awaiting_reply() {
                            println!(
                                "{}",
                                "Still waiting for the last reply.".yellow()
                            );
                        } else {
                            session.set_pending_input(text);
                            pending_reply = session.submit_pending_input();
                        }
                    }
                    Command::Upload(path) => {
                        match Artifact::read_from(&path).await {
                            Ok(artifact) => {
                                let workflow = desk.workflow_mut();
                                match workflow.upload(artifact) {
                                    Some(pending) => {
                                        pending_upload = Some(pending);
                                    }
                                    None => println!(
                                        "{}",
                                        "An upload is already in progress."
                                            .yellow()
                                    ),
                                }
                            }
                            Err(err) => println!("{}", err.red()),
                        }
                    }
                    Command::Download => {
                        downloads.spawn(desk.workflow().download());
                    }
                    Command::Diagnosis => print_diagnosis(&desk),
                    Command::Help => println!("{HELP}"),
                    Command::Quit => break,
                    Command::Invalid(reason) => println!("{}", reason.red()),
                }
            }
            outcome = settle_next(&mut pending_reply) => {
                pending_reply = None;
                desk.session_mut().settle(outcome);
            }
            outcome = settle_next(&mut pending_upload) => {
                pending_upload = None;
                desk.workflow_mut().settle_upload(outcome);
                clear_progress(&mut progress_bar);
                print_diagnosis(&desk);
            }
            Some(saved) = downloads.join_next() => {
                clear_progress(&mut progress_bar);
                match saved {
                    Ok(Some(path)) => println!(
                        "{}",
                        format!("📄 Report saved to {}", path.display()).green()
                    ),
                    // Download failures are only logged.
                    Ok(None) => {}
                    Err(err) => error!("download task failed: {err}"),
                }
            }
            _ = ticker.tick() => {
                if !desk.is_busy() {
                    continue;
                }
                let message = if desk.session().is_awaiting_reply() {
                    "🤔 Thinking..."
                } else {
                    "🩺 Analyzing report..."
                };
                let progress_bar = progress_bar.get_or_insert_with(|| {
                    let progress_bar = ProgressBar::new_spinner();
                    progress_bar.set_style(progress_style.clone());
                    progress_bar
                });
                progress_bar.set_message(message);
                progress_bar.tick();
                continue;
            }
        }

        // Show whatever the last event appended before prompting again.
        while let Ok(msg) = transcript_rx.try_recv() {
            clear_progress(&mut progress_bar);
            print_message(&msg);
        }
        if !desk.is_busy() {
            clear_progress(&mut progress_bar);
            prompt();
        }
    }

    clear_progress(&mut progress_bar);
}

fn load_config() -> HttpServiceConfig {
    let mut builder = HttpServiceConfigBuilder::new();
    if let Ok(url) = env::var("PRAYAAS_ASSISTANT_URL") {
        builder = builder.with_assistant_base_url(url);
    }
    if let Ok(url) = env::var("PRAYAAS_DIAGNOSIS_URL") {
        builder = builder.with_diagnosis_base_url(url);
    }
    builder.build()
}

/// Resolves with the output of `pending`, or never if there is nothing in
/// flight.
async fn settle_next<F>(pending: &mut Option<F>) -> F::Output
where
    F: Future + Unpin,
{
    match pending {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

/// Reads stdin on its own task, so a half-typed line is never lost when
/// another event wins the `select!`.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = io::BufReader::new(io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    error!("error reading input: {}", err);
                    break;
                }
            }
        }
    });
    line_rx
}

fn clear_progress(progress_bar: &mut Option<ProgressBar>) {
    if let Some(progress_bar) = progress_bar.take() {
        progress_bar.finish_and_clear();
    }
}

fn prompt() {
    print!("> ");
    std::io::stdout().flush().ok();
}

fn print_message(msg: &Message) {
    match msg.sender() {
        // The user already sees what they typed.
        Sender::User => {}
        Sender::Assistant if msg.is_error() => {
            println!("{}{}", BAR_CHAR.bright_red(), msg.text().bright_red());
        }
        Sender::Assistant => {
            println!(
                "{}🤖 {}",
                BAR_CHAR.bright_cyan(),
                msg.text().bright_white()
            );
        }
    }
}

fn print_diagnosis(desk: &prayaas::Desk) {
    let result = desk.workflow().diagnosis_result();
    let bar = if result.is_failure() {
        BAR_CHAR.bright_red().to_string()
    } else {
        BAR_CHAR.bright_green().to_string()
    };
    println!("{bar}{}", "Final Diagnosis".bold());
    for line in result.display_text().lines() {
        println!("{bar}{line}");
    }
}
