//! Binary entry point: tracing init, CLI dispatch, and the interactive
//! chat loop. Every operation runs to completion before the next user action
//! is accepted; there is no background work.

use clap::Parser;
use std::io::{self, BufRead, Read, Write};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use reddit_digest::api::AnalysisClient;
use reddit_digest::cli::{Cli, Command, ManualArgs};
use reddit_digest::error::DigestError;
use reddit_digest::fetch::{ThreadFetcher, extract_post_id};
use reddit_digest::models::{FetchOptions, ThreadRecord};
use reddit_digest::outputs::export::write_export;
use reddit_digest::session::ChatSession;

#[tokio::main]
async fn main() {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!(error = %e, "Exiting with error");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<(), DigestError> {
    let (record, focus) = match &args.command {
        Command::Fetch(fetch_args) => {
            let post_id = extract_post_id(&fetch_args.url).ok_or(DigestError::InvalidUrl)?;
            info!(%post_id, "Extracted post id");

            let options = FetchOptions {
                include_replies: !fetch_args.no_replies,
                max_replies: fetch_args.max_replies,
            };
            let record = ThreadFetcher::new().fetch(&post_id, &options).await?;
            (record, fetch_args.focus.clone())
        }
        Command::Manual(manual_args) => (manual_record(manual_args)?, manual_args.focus.clone()),
    };

    println!("Title:     {}", record.title);
    println!("Subreddit: r/{}", record.community);
    println!("Score:     {} points", record.score);
    println!("URL:       {}", record.source_url);
    println!();

    let mut session = ChatSession::new(record);

    let client = match args.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Some(AnalysisClient::new(
            args.api_base.clone(),
            key.to_string(),
            args.model.clone(),
        )),
        _ => {
            warn!("No API key supplied; analysis and chat are disabled");
            println!(
                "(no API key: showing the fetched thread only; \
                 set OPENAI_API_KEY to enable analysis and chat)"
            );
            None
        }
    };

    if let Some(client) = &client {
        match client
            .analyze(&session.record().normalized_text, &focus)
            .await
        {
            Ok(analysis) => {
                println!("ANALYSIS:\n{analysis}\n");
                session.set_analysis(analysis);
            }
            Err(e) => {
                // Shown, never stored: a failed analysis is not authoritative.
                error!(error = %e, "Analysis failed");
                println!("[analysis error] {e}");
            }
        }
    }

    match (&client, args.no_chat) {
        (Some(client), false) => chat_loop(&mut session, client, &args.export_dir).await?,
        _ => {
            info!("Chat loop skipped");
        }
    }

    // `--export` writes the document unconditionally, so the no-key and
    // `--no-chat` paths are not locked out of it.
    if args.export {
        let path = write_export(
            &args.export_dir,
            session.record(),
            session.analysis(),
            session.history(),
        )
        .await?;
        println!("(wrote {path})");
    }

    Ok(())
}

/// Interactive follow-up loop. Plain lines become questions; `:reset` clears
/// the transcript, `:export` writes the text document, `:quit` or EOF exits.
async fn chat_loop(
    session: &mut ChatSession,
    client: &AnalysisClient,
    export_dir: &str,
) -> Result<(), DigestError> {
    println!("Ask follow-up questions about the thread (:reset, :export, :quit):");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        match line.trim() {
            "" => continue,
            ":quit" | ":q" | "exit" => break,
            ":reset" => {
                session.reset();
                println!("(chat history cleared)");
            }
            ":export" => {
                match write_export(export_dir, session.record(), session.analysis(), session.history())
                    .await
                {
                    Ok(path) => println!("(wrote {path})"),
                    Err(e) => {
                        error!(error = %e, "Export failed");
                        println!("[export error] {e}");
                    }
                }
            }
            question => match session.ask(client, question).await {
                Ok(answer) => println!("{answer}\n"),
                Err(e) => {
                    error!(error = %e, "Chat turn failed");
                    println!(
                        "[answer error] {e}\n\
                         (your question was kept in the transcript; try again)"
                    );
                }
            },
        }
    }

    Ok(())
}

/// Build a [`ThreadRecord`] from manually pasted content, for when every
/// automatic fetch mechanism is blocked.
fn manual_record(args: &ManualArgs) -> Result<ThreadRecord, DigestError> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(DigestError::Validation(
            "manual entry requires a non-empty title".to_string(),
        ));
    }

    let content = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            println!("Paste the post content (include replies if you want), then press Ctrl-D:");
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };
    if content.trim().is_empty() {
        return Err(DigestError::Validation(
            "manual entry requires non-empty content".to_string(),
        ));
    }

    let post_id = format!("manual_{}", chrono::Local::now().format("%Y%m%d%H%M%S"));
    info!(%post_id, "Using manual entry");

    Ok(ThreadRecord {
        post_id,
        title: title.to_string(),
        normalized_text: content,
        score: 0,
        source_url: "manual entry".to_string(),
        community: args.community.clone(),
    })
}
