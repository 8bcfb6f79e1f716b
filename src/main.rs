use std::process;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use pastestore::color::{TagColor, color_for};
use pastestore::config::AppPaths;
use pastestore::errors::{PasteError, Result};
use pastestore::logging;
use pastestore::storage::PasteStorage;
use pastestore::storage::models::{NewPaste, Paste, SearchQuery};
use pastestore::storage::sqlite::SqliteStorage;

#[derive(Parser)]
#[command(name = "pastestore", version, about = "A personal paste store with tags")]
struct Cli {
    /// Output results as JSON
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new paste
    Add {
        /// Paste content
        value: String,

        /// Tag to attach, in order (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Replace a paste's content and tags
    Edit {
        /// Paste ID
        id: i64,

        /// New content
        value: String,

        /// New tag list, in order (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Show a paste
    Get {
        /// Paste ID
        id: i64,
    },

    /// Mark a paste as just used
    Use {
        /// Paste ID
        id: i64,
    },

    /// Delete a paste
    Delete {
        /// Paste ID
        id: i64,
    },

    /// Search paste content and tag names
    Search {
        /// Substring to look for; empty lists everything
        #[arg(default_value = "")]
        query: String,

        /// Maximum results
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// List all tag names, or one paste's tags in order
    Tags {
        /// Paste ID
        id: Option<i64>,
    },

    /// Show the display color of a tag
    Color {
        /// Tag name as displayed
        name: String,
    },
}

#[derive(Serialize)]
struct StatusResponse {
    success: bool,
    message: String,
}

#[derive(Serialize)]
struct TagEntry<'a> {
    name: &'a str,
    color: TagColor,
}

fn main() {
    logging::init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli) {
        if json {
            eprintln!("{}", serde_json::json!({"error": e.to_string()}));
        } else {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let storage = open_storage()?;
    let json = cli.json;

    match cli.command {
        None => cmd_search(
            &storage,
            SearchQuery {
                limit: Some(10),
                ..SearchQuery::default()
            },
            json,
        ),
        Some(Commands::Add { value, tags }) => cmd_add(&storage, value, tags, json),
        Some(Commands::Edit { id, value, tags }) => cmd_edit(&storage, id, value, tags, json),
        Some(Commands::Get { id }) => cmd_get(&storage, id, json),
        Some(Commands::Use { id }) => cmd_use(&storage, id, json),
        Some(Commands::Delete { id }) => cmd_delete(&storage, id, json),
        Some(Commands::Search { query, limit }) => cmd_search(
            &storage,
            SearchQuery {
                text: query,
                limit,
            },
            json,
        ),
        Some(Commands::Tags { id }) => cmd_tags(&storage, id, json),
        Some(Commands::Color { name }) => cmd_color(&name, json),
    }
}

fn open_storage() -> Result<SqliteStorage> {
    let paths = AppPaths::new().ok_or_else(|| {
        PasteError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine home directory",
        ))
    })?;
    SqliteStorage::open(&paths.db_path)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string(value)
        .map_err(|e| PasteError::Io(std::io::Error::other(e)))?;
    println!("{}", out);
    Ok(())
}

fn print_status(success: bool, message: String, json: bool) -> Result<()> {
    if json {
        return print_json(&StatusResponse { success, message });
    }
    println!("{}", message);
    Ok(())
}

fn cmd_add(storage: &SqliteStorage, value: String, tags: Vec<String>, json: bool) -> Result<()> {
    let paste = storage.create_paste(NewPaste { value, tags })?;
    if json {
        return print_json(&paste);
    }
    println!("Saved paste #{}.", paste.id);
    Ok(())
}

fn cmd_edit(
    storage: &SqliteStorage,
    id: i64,
    value: String,
    tags: Vec<String>,
    json: bool,
) -> Result<()> {
    let paste = storage.update_paste(id, NewPaste { value, tags })?;
    if json {
        return print_json(&paste);
    }
    println!("Updated paste #{}.", paste.id);
    Ok(())
}

fn cmd_get(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    let paste = storage.get_paste(id)?;
    if json {
        return print_json(&paste);
    }
    print_paste_detail(&paste);
    Ok(())
}

fn cmd_use(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    storage.touch_paste(id)?;
    print_status(true, format!("Marked paste #{} as used.", id), json)
}

fn cmd_delete(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    let found = storage.delete_paste(id)?;
    let message = if found {
        format!("Deleted paste #{}.", id)
    } else {
        format!("Paste #{} not found.", id)
    };
    print_status(found, message, json)
}

fn cmd_search(storage: &SqliteStorage, query: SearchQuery, json: bool) -> Result<()> {
    let text = query.text.clone();
    let pastes = storage.search(query)?;

    if json {
        return print_json(&pastes);
    }

    if pastes.is_empty() {
        if text.trim().is_empty() {
            println!("No pastes yet.");
        } else {
            println!("No results for \"{}\".", text);
        }
        return Ok(());
    }

    for paste in &pastes {
        print_paste_row(paste);
    }
    Ok(())
}

fn cmd_tags(storage: &SqliteStorage, id: Option<i64>, json: bool) -> Result<()> {
    let names = match id {
        Some(id) => storage.tags_for(id)?,
        None => storage.list_tag_names()?,
    };

    if json {
        let entries: Vec<TagEntry> = names
            .iter()
            .map(|name| TagEntry {
                name,
                color: color_for(name),
            })
            .collect();
        return print_json(&entries);
    }

    if names.is_empty() {
        println!("No tags.");
        return Ok(());
    }
    for name in &names {
        println!("{:<8} {}", color_for(name), name);
    }
    Ok(())
}

fn cmd_color(name: &str, json: bool) -> Result<()> {
    let color = color_for(name);
    if json {
        return print_json(&TagEntry { name, color });
    }
    println!("{}", color);
    Ok(())
}

fn preview(paste: &Paste) -> String {
    if paste.is_image() {
        return format!("[image, {}]", format_bytes(paste.value.len()));
    }
    let oneline = paste.value.replace('\n', "\\n");
    if oneline.chars().count() > 60 {
        let head: String = oneline.chars().take(57).collect();
        format!("{}...", head)
    } else {
        oneline
    }
}

fn print_paste_row(paste: &Paste) {
    let age = format_age(paste.last_used_at);
    let tags = if paste.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", paste.tags.join(", "))
    };
    println!("{:>4} {:>6}  {}{}", paste.id, age, preview(paste), tags);
}

fn print_paste_detail(paste: &Paste) {
    println!("ID:        {}", paste.id);
    println!("Created:   {}", paste.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Last used: {}", paste.last_used_at.format("%Y-%m-%d %H:%M:%S"));

    if !paste.tags.is_empty() {
        let tags: Vec<String> = paste
            .tags
            .iter()
            .map(|t| format!("{} ({})", t, color_for(t)))
            .collect();
        println!("Tags:      {}", tags.join(", "));
    }

    println!("─────────────────────────");
    if paste.is_image() {
        println!("{}", preview(paste));
    } else {
        println!("{}", paste.value);
    }
}

fn format_age(dt: chrono::DateTime<Utc>) -> String {
    let dur = Utc::now() - dt;
    if dur.num_seconds() < 60 {
        "now".to_string()
    } else if dur.num_minutes() < 60 {
        format!("{}m", dur.num_minutes())
    } else if dur.num_hours() < 24 {
        format!("{}h", dur.num_hours())
    } else {
        format!("{}d", dur.num_days())
    }
}

fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
