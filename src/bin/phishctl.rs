use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phishguard_client::client::DetectorClient;
use phishguard_client::config::Config;
use phishguard_client::demo;
use phishguard_client::email::EmailMessage;
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

/// phishctl — exercise a running PhishGuard detection service.
///
/// Email text is read from FILE when given, stdin otherwise. The base URL
/// comes from --url, then PHISHGUARD_API_URL, then the local dev default.
#[derive(Debug, Parser)]
#[command(name = "phishctl")]
#[command(version)]
struct Cli {
    /// Base URL for the detection service
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Analyze email text with the hardened detector, degrading to the local
    /// keyword heuristic when the service is unavailable. Never fails on
    /// service errors.
    Analyze { path: Option<PathBuf> },

    /// Classify with the baseline (unhardened) detector.
    Baseline { path: Option<PathBuf> },

    /// Generate an adversarial rewrite of the email body.
    Adversarial {
        path: Option<PathBuf>,

        /// Attack types to request (comma-separated)
        #[arg(long, value_delimiter = ',', default_value = "homoglyph,synonym")]
        attack_types: Vec<String>,

        #[arg(long, default_value = "medium")]
        intensity: String,
    },

    /// GET /health
    Health,

    /// Run the scripted attack/defense flow: baseline on the original,
    /// generate an adversarial variant, baseline on it, hardened on it.
    Demo { path: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    let client = DetectorClient::new(&config).context("build http client")?;

    match cli.cmd {
        Cmd::Analyze { path } => {
            let text = read_input(path.as_deref())?;
            match client.analyze_text(&text).await {
                Some(result) => print_json(&result)?,
                None => eprintln!("input is empty; nothing to analyze"),
            }
        }

        Cmd::Baseline { path } => {
            let text = read_input(path.as_deref())?;
            let email = EmailMessage::from_text(text);
            let report = client
                .detect_baseline(&email)
                .await
                .context("baseline detection")?;
            print_json(&report)?;
        }

        Cmd::Adversarial {
            path,
            attack_types,
            intensity,
        } => {
            let text = read_input(path.as_deref())?;
            let email = EmailMessage::from_text(text);
            let adv = client
                .generate_adversarial(&email, &attack_types, &intensity)
                .await
                .context("adversarial generation")?;
            println!("{}", adv.adversarial_text);
        }

        Cmd::Health => {
            if client.health().await {
                println!("ok");
            } else {
                anyhow::bail!("service unreachable");
            }
        }

        Cmd::Demo { path } => {
            let text = read_input(path.as_deref())?;
            let email = EmailMessage::from_text(text);
            let report = demo::run_full_demo(&client, &email)
                .await
                .context("demo flow")?;
            print_json(&report)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("read {p:?}")),
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s).context("read stdin")?;
            Ok(s)
        }
    }
}

fn print_json<T: serde::Serialize>(v: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(v).context("serialize result")?
    );
    Ok(())
}
