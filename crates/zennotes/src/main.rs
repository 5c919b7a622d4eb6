//! `zennotes` - CLI for zennotes
//!
//! This binary is the presentation layer: every subcommand maps to one
//! record store or import/export operation.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::Parser;

use zennotes::cli::{
    Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ExportCommand, ImportCommand,
    ListCommand, NewCommand, OutputFormat, ShowCommand,
};
use zennotes::note::is_blank_draft;
use zennotes::transfer::export_file_name;
use zennotes::{init_logging, Config, Error, Note, NoteId, NoteStore, Persistence, Storage};

type Store = NoteStore<Storage>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Config subcommands must work even when the configured file is broken.
    let load = || load_config(cli.config.as_deref());

    match cli.command {
        Command::New(cmd) => with_store(&load()?, |store| handle_new(store, cmd)),
        Command::Edit(cmd) => with_store(&load()?, |store| handle_edit(store, cmd)),
        Command::Delete(cmd) => with_store(&load()?, |store| handle_delete(store, &cmd)),
        Command::List(cmd) => with_store(&load()?, |store| handle_list(store, &cmd)),
        Command::Show(cmd) => with_store(&load()?, |store| handle_show(store, &cmd)),
        Command::Export(cmd) => {
            let config = load()?;
            let store = open_store(&config)?;
            handle_export(&store, &config, cmd).await
        }
        Command::Import(cmd) => {
            let mut store = open_store(&load()?)?;
            handle_import(&mut store, &cmd).await?;
            warn_if_not_durable(&store);
            Ok(())
        }
        Command::Status(cmd) => {
            let config = load()?;
            let store = open_store(&config)?;
            handle_status(&store, &config, cmd.json)
        }
        Command::Config(config_cmd) => handle_config(cli.config.as_deref(), config_cmd),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load_from(path.map(Path::to_path_buf)).context("failed to load configuration")
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open note storage at {}", path.display()))?;
    Ok(NoteStore::open(Persistence::with_key(
        storage,
        config.storage.storage_key.as_str(),
    )))
}

fn with_store(
    config: &Config,
    handler: impl FnOnce(&mut Store) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    handler(&mut store)?;
    warn_if_not_durable(&store);
    Ok(())
}

fn warn_if_not_durable(store: &Store) {
    if !store.is_durable() {
        eprintln!("Warning: changes could not be saved to disk and will be lost on exit.");
    }
}

fn handle_new(store: &mut Store, cmd: NewCommand) -> anyhow::Result<()> {
    if is_blank_draft(&cmd.title, &cmd.content) {
        bail!("a note needs a title or some content");
    }
    let note = store.create(cmd.title, cmd.content);
    println!("Created note {}", note.id);
    Ok(())
}

fn handle_edit(store: &mut Store, cmd: EditCommand) -> anyhow::Result<()> {
    let id = NoteId::from(cmd.id);
    let current = store.get(&id).ok_or_else(|| Error::note_not_found(id.as_str()))?;

    let title = cmd.title.unwrap_or_else(|| current.title.clone());
    let content = cmd.content.unwrap_or_else(|| current.content.clone());
    if is_blank_draft(&title, &content) {
        bail!("a note needs a title or some content");
    }

    let note = store.update(&id, title, content)?;
    println!("Updated note {}", note.id);
    Ok(())
}

fn handle_delete(store: &mut Store, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let id = NoteId::from(cmd.id.as_str());
    let Some(note) = store.get(&id) else {
        println!("No note with id {id}.");
        return Ok(());
    };

    if !cmd.yes {
        println!(
            "This will permanently delete note {} \"{}\".",
            note.id,
            display_title(note)
        );
        println!("Use --yes to confirm.");
        return Ok(());
    }

    if store.delete(&id) {
        println!("Deleted note {id}");
    }
    Ok(())
}

fn handle_list(store: &Store, cmd: &ListCommand) -> anyhow::Result<()> {
    let notes = store.search(&cmd.query);

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&notes)?);
        }
        _ if store.is_empty() => {
            println!("No notes yet. Create one with `zennotes new`, or import a backup.");
        }
        _ if notes.is_empty() => {
            println!("No notes contain \"{}\".", cmd.query);
        }
        OutputFormat::Table => print_table(&notes),
        OutputFormat::Plain => {
            for note in notes {
                println!("{}  {}", note.id, display_title(note));
                if let Some(line) = note.content.lines().next() {
                    println!("    {line}");
                }
            }
        }
    }
    Ok(())
}

fn print_table(notes: &[&Note]) {
    let id_width = notes
        .iter()
        .map(|note| note.id.as_str().len())
        .max()
        .unwrap_or(2)
        .max(2);

    println!("{:<id_width$}  {:<16}  TITLE", "ID", "UPDATED");
    for note in notes {
        println!(
            "{:<id_width$}  {:<16}  {}",
            note.id.as_str(),
            format_timestamp(note.updated_at),
            display_title(note)
        );
    }
}

fn handle_show(store: &Store, cmd: &ShowCommand) -> anyhow::Result<()> {
    let id = NoteId::from(cmd.id.as_str());
    let note = store.get(&id).ok_or_else(|| Error::note_not_found(id.as_str()))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("{}", display_title(note));
        println!("{}", "=".repeat(display_title(note).chars().count().max(3)));
        println!("Id:       {}", note.id);
        println!("Created:  {}", format_timestamp(note.created_at));
        println!("Updated:  {}", format_timestamp(note.updated_at));
        if let Some(color) = &note.color {
            println!("Color:    {color}");
        }
        println!();
        println!("{}", note.content);
    }
    Ok(())
}

async fn handle_export(store: &Store, config: &Config, cmd: ExportCommand) -> anyhow::Result<()> {
    let json = store.export()?;

    if cmd.stdout {
        println!("{json}");
        return Ok(());
    }

    let file_name = export_file_name(&config.export.file_prefix, Utc::now().date_naive());
    let destination = resolve_export_path(cmd.output, config, &file_name);

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    tokio::fs::write(&destination, json)
        .await
        .with_context(|| format!("failed to write backup to {}", destination.display()))?;

    println!(
        "Exported {} notes to {}",
        store.len(),
        destination.display()
    );
    Ok(())
}

fn resolve_export_path(output: Option<PathBuf>, config: &Config, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => config.export_directory().join(file_name),
    }
}

async fn handle_import(store: &mut Store, cmd: &ImportCommand) -> anyhow::Result<()> {
    let text = read_import_file(&cmd.file).await?;

    let report = store.import(&text).map_err(|e| {
        let reason = if e.is_import_error() {
            "is not a usable notes backup"
        } else {
            "could not be imported"
        };
        anyhow::Error::new(e).context(format!("{} {reason}", cmd.file.display()))
    })?;

    println!(
        "Imported {} notes ({} total).",
        report.imported, report.total
    );
    Ok(())
}

async fn read_import_file(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

fn handle_status(store: &Store, config: &Config, json: bool) -> anyhow::Result<()> {
    let storage = store.persistence().backend();
    let stats = storage.stats()?;
    let keys = storage.keys()?;

    if json {
        let status = serde_json::json!({
            "notes": store.len(),
            "database_path": config.database_path(),
            "storage_key": store.persistence().key(),
            "stored_keys": keys,
            "stored_bytes": stats.value_bytes,
            "database_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("zennotes status");
        println!("---------------");
        println!("Notes:         {}", store.len());
        println!("Database:      {}", config.database_path().display());
        println!("Storage key:   {}", store.persistence().key());
        println!("Stored keys:   {}", keys.join(", "));
        println!("Stored bytes:  {}", stats.value_bytes);
        println!("Database size: {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config_path: Option<&Path>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Storage key:    {}", config.storage.storage_key);
                println!();
                println!("[Export]");
                println!("  Directory:      {}", config.export_directory().display());
                println!("  File prefix:    {}", config.export.file_prefix);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.map_or_else(Config::default_config_path, Path::to_path_buf);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or_else(|| config_path.map(Path::to_path_buf))
                .unwrap_or_else(Config::default_config_path);
            Config::validate_file(&path)
                .with_context(|| format!("{} is not a valid configuration", path.display()))?;
            println!("{} is valid.", path.display());
        }
    }
    Ok(())
}

fn display_title(note: &Note) -> &str {
    if note.title.is_empty() {
        "(untitled)"
    } else {
        &note.title
    }
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map_or_else(|| millis.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}
