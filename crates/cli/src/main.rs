//! Near Me CLI - search species and publish a "Near Me" site from the terminal.
//!
//! One-shot commands call the HTTP collaborators directly; `publish` and
//! `interactive` go through the same controller the desktop app uses.

mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use nearme_core::types::{preview_url, Taxon};
use nearme_core::{
    is_valid_hostname, load_config_file, load_nearme_config, suggest_hostname, Controller,
    NearMeApi, NearMeConfig, NoticeLevel,
};
use nearme_http::HttpApi;

/// Near Me CLI - make a "Near Me" site for the species of your choice.
#[derive(Parser)]
#[command(name = "near-me", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ./.nearme.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Taxa API root, e.g. https://api.inaturalist.org/v1
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Publisher root; /publish is appended
    #[arg(long, global = true)]
    publish_base: Option<String>,

    /// Publisher session cookie value
    #[arg(long, global = true)]
    session: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Autocomplete species names
    Search {
        /// Free-text query
        query: String,
    },
    /// Show a taxon with its ancestor chain and the defaults a publish would use
    Show {
        /// Taxon id
        id: u64,
    },
    /// Print the hostname suggested for a label
    Slug {
        label: String,
    },
    /// Publish a site for a taxon
    Publish {
        /// Taxon id
        taxon_id: u64,

        /// Plural label (default: the taxon's common name)
        #[arg(long)]
        plural: Option<String>,

        /// Hostname (default: derived from the plural)
        #[arg(long)]
        hostname: Option<String>,
    },
    /// Interactive search-and-publish form on stdin
    Interactive,
}

fn resolve_config(cli: &Cli) -> NearMeConfig {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => match std::env::current_dir() {
            Ok(cwd) => load_nearme_config(&cwd),
            Err(_) => NearMeConfig::default(),
        },
    };
    if let Some(base) = &cli.api_base {
        config.api_base = base.clone();
    }
    if let Some(base) = &cli.publish_base {
        config.publish_base = base.clone();
    }
    if let Some(session) = &cli.session {
        config.session_cookie = Some(session.clone());
    }
    config
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => fail(e),
    }
}

fn print_taxon(taxon: &Taxon, config: &NearMeConfig) {
    let name = taxon.display_name();
    println!("{name}  ({}, id {})", taxon.name, taxon.id);
    if !taxon.ancestors.is_empty() {
        let chain: Vec<&str> = taxon.ancestors.iter().map(|a| a.display_name()).collect();
        println!("  {}", chain.join(" \u{00B7} "));
    }
    println!("Plural:    {name}");
    println!("Hostname:  {}", suggest_hostname(name));
    println!("Preview:   {}", preview_url(&config.preview_base, taxon.id));
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nearme=warn".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);
    let api = HttpApi::new(&config).unwrap_or_else(|e| fail(e));

    match cli.command {
        Commands::Search { ref query } => {
            let results = api.autocomplete(query).await.unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&serde_json::json!(results));
            } else {
                if results.is_empty() {
                    fail(format!("No species match '{query}'"));
                }
                for t in &results {
                    println!("{:>9}  {} - {}", t.id, t.display_name(), t.name);
                }
                eprintln!("\n{} results", results.len());
            }
        }
        Commands::Show { id } => {
            let taxon = api.taxon(id).await.unwrap_or_else(|e| fail(e));
            if cli.json {
                let name = taxon.display_name().to_string();
                print_json(&serde_json::json!({
                    "taxon": taxon,
                    "plural": name,
                    "hostname": suggest_hostname(&name),
                    "preview_url": preview_url(&config.preview_base, id),
                }));
            } else {
                print_taxon(&taxon, &config);
            }
        }
        Commands::Slug { ref label } => {
            let hostname = suggest_hostname(label);
            let valid = is_valid_hostname(&hostname);
            if cli.json {
                print_json(&serde_json::json!({ "hostname": hostname, "valid": valid }));
            } else {
                println!("{hostname}");
                if !valid {
                    eprintln!("warning: the publisher will not accept this hostname");
                }
            }
        }
        Commands::Publish { taxon_id, ref plural, ref hostname } => {
            let mut controller = Controller::new(Arc::new(api), &config);
            controller.select(taxon_id);
            controller.run_until_idle().await;
            if controller.state().taxon_id() != Some(taxon_id) {
                report_and_exit(&mut controller);
            }
            if let Some(p) = plural {
                controller.edit_plural(p.clone());
            }
            if let Some(h) = hostname {
                controller.edit_hostname(h.clone());
            }
            controller.submit();
            controller.run_until_idle().await;

            let Some(deployment) = controller.state().deployment.clone() else {
                report_and_exit(&mut controller);
            };
            if cli.json {
                print_json(&serde_json::json!(deployment));
            } else {
                println!("{}", deployment.url);
                if let Some(message) = &deployment.message {
                    eprintln!("{message}");
                }
            }
        }
        Commands::Interactive => {
            let controller = Controller::new(Arc::new(api), &config);
            if let Err(e) = interactive::run(controller, &config).await {
                fail(e);
            }
        }
    }
}

/// Print the controller's error notices and exit non-zero.
fn report_and_exit<A: NearMeApi>(controller: &mut Controller<A>) -> ! {
    for notice in controller.take_notices() {
        if notice.level == NoticeLevel::Error {
            eprintln!("{}", notice.text);
        }
    }
    std::process::exit(1);
}
