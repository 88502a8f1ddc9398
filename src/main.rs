// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graphsync CLI entrypoint.
//!
//! Reads a document, runs it through the sync engine and prints either the projected graph
//! (JSON) or the normalized document.

use std::error::Error;

use graphsync::{DocumentChange, Domain, MemoryPositionBackend, SyncConfig, SyncEngine};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GRAPHSYNC_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--domain entities|steps] [--config <file>] [--format graph|document] <document-file>\n\n--domain overrides the domain from --config (default entities).\n--format graph prints nodes and edges as JSON (default); document prints the normalized YAML.\n\nLog level is read from {LOG_ENV} (default warn)."
    );
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Graph,
    Document,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    domain: Option<Domain>,
    config: Option<String>,
    format: Option<OutputFormat>,
    document: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--domain" => {
                if options.domain.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.domain = Some(raw.parse().map_err(|_| ())?);
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--format" => {
                if options.format.is_some() {
                    return Err(());
                }
                let format = match args.next().ok_or(())?.as_str() {
                    "graph" => OutputFormat::Graph,
                    "document" => OutputFormat::Document,
                    _ => return Err(()),
                };
                options.format = Some(format);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.document.is_some() {
                    return Err(());
                }
                options.document = Some(arg);
            }
        }
    }

    if options.document.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "graphsync".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        let mut config = match &options.config {
            Some(path) => SyncConfig::load(path)?,
            None => SyncConfig::default(),
        };
        if let Some(domain) = options.domain {
            config.domain = domain;
        }

        let path = options.document.ok_or("missing document path")?;
        let text = std::fs::read_to_string(&path)?;

        let mut engine =
            SyncEngine::from_config(&config, MemoryPositionBackend::new(), Vec::<String>::new());
        match engine.handle_document_change(&text) {
            DocumentChange::Applied | DocumentChange::Unchanged => {}
            DocumentChange::NotApplicable => {
                return Err(format!("{path}: not a '{}' document", config.domain.root_key()).into());
            }
            DocumentChange::Malformed => {
                let reason = match graphsync::parse_document(&text, config.domain) {
                    graphsync::ParseOutcome::Malformed(err) => err.to_string(),
                    _ => "unreadable document".to_owned(),
                };
                return Err(format!("{path}: {reason}").into());
            }
            DocumentChange::Deferred => return Err("position backend not ready".into()),
        }

        match options.format.unwrap_or_default() {
            OutputFormat::Graph => println!("{}", serde_json::to_string_pretty(engine.graph())?),
            OutputFormat::Document => print!("{}", engine.document()),
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
