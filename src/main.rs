//! Command-line front end for the generation service.
//!
//! Usage:
//!   linguist languages [--by-family]
//!   linguist key set [KEY]
//!   linguist key status
//!   linguist generate --prompt <TEXT> [--languages es,fr] [--type email] [--tone professional] [--length medium]
//!   linguist health
//!
//! Optional environment variables:
//! - LINGUIST_API_URL (defaults to http://localhost:8000)
//! - LINGUIST_REQUEST_TIMEOUT_SECS (unset means no timeout)
//! - LINGUIST_CREDENTIAL_FILE (defaults to <config dir>/linguist/credentials.json)

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

use linguist::client::GenerationClient;
use linguist::config::Config;
use linguist::credential::{FileStore, KeyValueStore};
use linguist::generation::{ContentType, Length, Tone};
use linguist::i18n::LanguageCatalog;
use linguist::render;
use linguist::session::{
    CredentialState, CredentialSubmit, GenerationStart, RequestStatus, Session,
};

/// Options of the `generate` command.
#[derive(Debug, Default, PartialEq, Eq)]
struct GenerateArgs {
    prompt: String,
    languages: Option<Vec<String>>,
    content_type: Option<ContentType>,
    tone: Option<Tone>,
    length: Option<Length>,
}

impl GenerateArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = GenerateArgs::default();
        let mut prompt = None;
        let mut iter = args.iter();

        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .cloned()
                    .with_context(|| format!("Missing value for {}", flag))
            };
            match flag.as_str() {
                "--prompt" | "-p" => prompt = Some(value()?),
                "--languages" | "-l" => {
                    let codes: Vec<String> = value()?
                        .split(',')
                        .map(|code| code.trim().to_string())
                        .filter(|code| !code.is_empty())
                        .collect();
                    parsed.languages = Some(codes);
                }
                "--type" | "-t" => parsed.content_type = Some(value()?.parse()?),
                "--tone" => parsed.tone = Some(value()?.parse()?),
                "--length" => parsed.length = Some(value()?.parse()?),
                other => bail!("Unknown option for generate: {}", other),
            }
        }

        parsed.prompt = prompt.context("generate requires --prompt <TEXT>")?;
        Ok(parsed)
    }
}

/// Show only the edges of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Read keys from stdin until one is accepted.
fn prompt_for_credential<S: KeyValueStore>(session: &mut Session<S>) -> Result<()> {
    let stdin = io::stdin();
    loop {
        eprint!("Enter your API key: ");
        io::stderr().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("No API key provided");
        }
        session.set_credential_input(line.trim_end_matches(&['\r', '\n'][..]));

        match session.submit_credential()? {
            CredentialSubmit::Saved | CredentialSubmit::Ignored => return Ok(()),
            CredentialSubmit::Rejected => {
                if let Some(message) = &session.snapshot().credential_prompt.message {
                    eprintln!("{}", message);
                }
            }
        }
    }
}

fn languages_command(args: &[String]) -> Result<()> {
    let by_family = args.iter().any(|a| a == "--by-family" || a == "-f");
    println!(
        "{}",
        render::render_catalog(LanguageCatalog::get(), None, by_family)
    );
    Ok(())
}

fn key_command(config: &Config, args: &[String]) -> Result<()> {
    let mut session = Session::start(FileStore::new(&config.credential_file))?;

    match args.first().map(String::as_str) {
        Some("set") => {
            if session.snapshot().credential_state() != CredentialState::PromptOpen {
                session.request_credential_change();
            }
            match args.get(1) {
                Some(key) => {
                    session.set_credential_input(key.as_str());
                    if session.submit_credential()? == CredentialSubmit::Rejected {
                        bail!("{}", linguist::session::EMPTY_CREDENTIAL_MESSAGE);
                    }
                }
                None => prompt_for_credential(&mut session)?,
            }
            println!("API key saved to {}", config.credential_file.display());
        }
        Some("status") | None => {
            let stored = session.store().get(linguist::credential::CREDENTIAL_KEY)?;
            match stored.filter(|key| !key.trim().is_empty()) {
                Some(key) => println!("API key: {} ({})", mask_key(&key), config.credential_file.display()),
                None => println!("API key: not set (run `linguist key set`)"),
            }
        }
        Some(other) => bail!("Unknown key command: {}", other),
    }
    Ok(())
}

async fn generate_command(config: &Config, args: &[String]) -> Result<()> {
    let options = GenerateArgs::parse(args)?;
    let catalog = LanguageCatalog::get();

    let mut session = Session::start(FileStore::new(&config.credential_file))?;
    if session.snapshot().credential_state() == CredentialState::PromptOpen {
        prompt_for_credential(&mut session)?;
    }

    session.set_prompt(options.prompt);
    if let Some(content_type) = options.content_type {
        session.set_content_type(content_type);
    }
    if let Some(tone) = options.tone {
        session.set_tone(tone);
    }
    if let Some(length) = options.length {
        session.set_length(length);
    }

    if let Some(codes) = options.languages {
        let partition = catalog.partition_codes(&codes);
        if !partition.unknown.is_empty() {
            bail!(
                "Unknown language code(s): {} (run `linguist languages` for the list)",
                partition.unknown.join(", ")
            );
        }
        let current: Vec<String> = session.snapshot().form.languages.codes().to_vec();
        for code in &current {
            session.remove_language(code);
        }
        for code in &partition.known {
            session.add_language(code);
        }
    }

    eprintln!(
        "{}",
        render::render_selection(&session.snapshot().form.languages, catalog)
    );

    let client = GenerationClient::new(config)?;
    if let GenerationStart::Ready(pending) = session.begin_generation() {
        eprintln!("{}", render::render_status(session.snapshot()));
        let outcome = client.generate(pending.api_key(), &pending.request).await;
        session.finish_generation(outcome);
    }

    let snapshot = session.snapshot();
    match &snapshot.status {
        RequestStatus::Succeeded(response) => {
            println!("{}", render::render_response(response, catalog));
            Ok(())
        }
        _ => {
            if snapshot.credential_state() == CredentialState::PromptOpen {
                eprintln!("Run `linguist key set` to enter a different API key.");
            }
            bail!("{}", render::render_status(snapshot))
        }
    }
}

async fn health_command(config: &Config) -> Result<()> {
    let client = GenerationClient::new(config)?;
    let health = client.health().await?;
    match health.message {
        Some(message) => println!("{}: {}", health.status, message),
        None => println!("{}", health.status),
    }
    Ok(())
}

fn print_usage() {
    println!(
        r#"
Generate content in many languages from one prompt

USAGE:
    linguist <COMMAND>

COMMANDS:
    languages [--by-family]     List supported languages
    key set [KEY]               Store the API key (prompts when KEY is omitted)
    key status                  Show whether an API key is stored
    generate --prompt <TEXT>    Generate content and translations
        --languages <CODES>     Comma-separated target codes (default: en)
        --type <TYPE>           {types} (default: email)
        --tone <TONE>           {tones} (default: professional)
        --length <LENGTH>       {lengths} (default: medium)
    health                      Check that the generation service is up

ENVIRONMENT:
    LINGUIST_API_URL               Generation service base URL
    LINGUIST_REQUEST_TIMEOUT_SECS  Request timeout (unset = no timeout)
    LINGUIST_CREDENTIAL_FILE       Where the API key is stored
"#,
        types = ContentType::all().map(|t| t.as_str()).join(" | "),
        tones = Tone::all().map(|t| t.as_str()).join(" | "),
        lengths = Length::all().map(|l| l.as_str()).join(" | "),
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr, so stdout carries only results)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("linguist=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "languages" => languages_command(rest),
        "key" => key_command(&Config::from_env()?, rest),
        "generate" => {
            let config = Config::from_env()?;
            info!("Using generation service at {}", config.api_base_url);
            generate_command(&config, rest).await
        }
        "health" => health_command(&Config::from_env()?).await,
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}
