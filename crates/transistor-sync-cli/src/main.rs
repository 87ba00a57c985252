//! Transistor Sync CLI — the sync settings screen
//!
//! Five actions: show status, sign in, back up, restore, sign out. Each
//! prints one outcome line; failures exit nonzero with the error text.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

use transistor_sync::auth::Session;
use transistor_sync::{Result, SessionStore, StationCollection, SyncError, SyncService};

#[derive(Parser)]
#[command(
    name = "transistor-sync",
    about = "Back up the station list to the cloud drive",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show sign-in state and the local station count
    Status,
    /// Sign in with the cloud account
    SignIn {
        /// OAuth client id (defaults to TRANSISTOR_SYNC_CLIENT_ID)
        #[arg(long)]
        client_id: Option<String>,
    },
    /// Upload the local station list
    Backup,
    /// Download the backed-up station list
    Restore,
    /// Remove the cached sign-in
    SignOut,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Status => status(),
        Command::SignIn { client_id } => sign_in(client_id),
        Command::Backup => backup(),
        Command::Restore => restore(),
        Command::SignOut => sign_out(),
    }
}

fn status() -> Result<()> {
    let store = SessionStore::new()?;
    match store.account_email() {
        Some(email) => println!("Signed in as {}", email),
        None => println!("Not signed in"),
    }

    let collection = StationCollection::load()?;
    println!("Local stations: {}", collection.len());
    Ok(())
}

fn sign_in(client_id: Option<String>) -> Result<()> {
    let client_id = client_id
        .or_else(|| std::env::var("TRANSISTOR_SYNC_CLIENT_ID").ok())
        .ok_or_else(|| {
            SyncError::Storage(
                "No OAuth client id: pass --client-id or set TRANSISTOR_SYNC_CLIENT_ID"
                    .to_string(),
            )
        })?;

    let session_store = SessionStore::new()?;
    let request = session_store.sign_in_request(&client_id)?;

    println!("Open this URL in a browser and approve access:");
    println!();
    println!("  {}", request.url());
    println!();

    let email = prompt("Account email: ")?;
    let token = prompt("Access token from the consent page: ")?;
    if token.is_empty() {
        return Err(SyncError::Storage(
            "Sign-in aborted: no token entered".to_string(),
        ));
    }

    session_store.complete_sign_in(&Session::new(email, token))?;

    // Build the connection right away, like the settings screen does after
    // a successful sign-in return
    let service = SyncService::new(session_store);
    service.initialize()?;

    println!(
        "Signed in as {}",
        service.session().account_email().unwrap_or_default()
    );
    Ok(())
}

fn backup() -> Result<()> {
    let collection = StationCollection::load()?;

    let service = SyncService::new(SessionStore::new()?);
    service.initialize()?;
    service.upload_stations(collection.stations())?;

    println!("Backup completed: {} stations uploaded", collection.len());
    Ok(())
}

fn restore() -> Result<()> {
    let service = SyncService::new(SessionStore::new()?);
    service.initialize()?;

    let stations = service.download_stations()?;
    if stations.is_empty() {
        println!("No backup found");
        return Ok(());
    }

    // Last writer wins: the restored list replaces the local one wholesale
    let mut collection = StationCollection::new();
    collection.replace_all(stations);
    collection.save()?;

    println!("Restored {} stations", collection.len());
    Ok(())
}

fn sign_out() -> Result<()> {
    SessionStore::new()?.sign_out()?;
    println!("Signed out");
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout()
        .flush()
        .map_err(|e| SyncError::Storage(format!("Failed to write prompt: {e}")))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| SyncError::Storage(format!("Failed to read input: {e}")))?;
    Ok(line.trim().to_string())
}
