use anyhow::Result;
use chrono::Local;

use homeview_core::{storage::NoteStore, AppConfig};

pub fn add(config: &AppConfig, text: &str) -> Result<()> {
    let mut store = NoteStore::load(config.notes_path())?;
    let note = store.add(text)?;
    println!("Added note {}", note.short_id());
    Ok(())
}

pub fn list(config: &AppConfig) -> Result<()> {
    let store = NoteStore::load(config.notes_path())?;

    if store.is_empty() {
        println!("No notes yet.");
        println!("\nTo add one, run:");
        println!("  homeview note add <text>");
        return Ok(());
    }

    println!("Notes ({}):\n", store.len());
    for note in store.list() {
        println!(
            "  {}  {}  {}",
            note.short_id(),
            note.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            note.text
        );
    }

    Ok(())
}

pub fn remove(config: &AppConfig, id: &str) -> Result<()> {
    let mut store = NoteStore::load(config.notes_path())?;
    let note = store.remove(id)?;
    println!("Removed note {}: {}", note.short_id(), note.text);
    Ok(())
}
