//! Command handlers over a `NoteStore`.
//!
//! # Responsibility
//! - Translate parsed CLI commands into store operations.
//! - Render results and lookup misses as plain text.
//!
//! # Invariants
//! - Handlers hold no note state; every view re-queries the store.
//! - Delete only reaches the store after confirmation.

use notekeeper_core::{NoteRepository, NoteStore};
use std::io::{BufRead, Write};

/// Fields for `edit`; `None` keeps the current value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
}

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn list<R: NoteRepository>(store: &NoteStore<R>, out: &mut impl Write) -> CommandResult {
    if store.is_empty() {
        writeln!(out, "No notes.")?;
        return Ok(());
    }
    for title in store.titles() {
        writeln!(out, "{title}")?;
    }
    Ok(())
}

pub fn create<R: NoteRepository>(
    store: &mut NoteStore<R>,
    title: String,
    description: String,
    deadline: &str,
    out: &mut impl Write,
) -> CommandResult {
    let note = store.create(title, description, deadline)?;
    writeln!(
        out,
        "Created note '{}' (due in {})",
        note.title(),
        note.format_deadline()
    )?;
    Ok(())
}

pub fn show<R: NoteRepository>(
    store: &NoteStore<R>,
    title: &str,
    out: &mut impl Write,
) -> CommandResult {
    match store.details(title) {
        Some(details) => writeln!(out, "{details}")?,
        None => writeln!(out, "Note '{title}' not found.")?,
    }
    Ok(())
}

/// Applies `fields` on top of the note's current values.
pub fn edit<R: NoteRepository>(
    store: &mut NoteStore<R>,
    title: &str,
    fields: EditFields,
    out: &mut impl Write,
) -> CommandResult {
    let Some(current) = store.get(title) else {
        writeln!(out, "Note '{title}' not found.")?;
        return Ok(());
    };

    let new_title = fields.title.unwrap_or_else(|| current.title().to_string());
    let new_description = fields
        .description
        .unwrap_or_else(|| current.description().to_string());
    let current_deadline = current.deadline();

    // An omitted deadline keeps the stored value, fractional seconds included.
    let edited = match fields.deadline {
        Some(deadline) => store.edit(title, new_title, new_description, &deadline)?,
        None => store.edit_with_deadline(title, new_title, new_description, current_deadline)?,
    };
    if let Some(note) = edited {
        writeln!(out, "Updated note '{}'.", note.title())?;
    }
    Ok(())
}

/// Deletes after confirmation; `assume_yes` skips the prompt.
pub fn delete<R: NoteRepository>(
    store: &mut NoteStore<R>,
    title: &str,
    assume_yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> CommandResult {
    if store.get(title).is_none() {
        writeln!(out, "Note '{title}' not found.")?;
        return Ok(());
    }

    if !assume_yes && !confirm(&format!("Delete note '{title}'?"), input, out)? {
        writeln!(out, "Kept note '{title}'.")?;
        return Ok(());
    }

    if store.delete(title)?.is_some() {
        writeln!(out, "Deleted note '{title}'.")?;
    }
    Ok(())
}

fn confirm(
    prompt: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::{create, delete, edit, list, show, EditFields};
    use notekeeper_core::{MemoryNoteRepository, NoteRecord, NoteStore, NoteStoreError};

    fn store_with(titles: &[&str]) -> NoteStore<MemoryNoteRepository> {
        let mut store = NoteStore::load(MemoryNoteRepository::new()).unwrap();
        for title in titles {
            store.create(*title, "desc", "2099-01-01 00:00:00").unwrap();
        }
        store
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn list_prints_titles_in_order() {
        let store = store_with(&["X", "Y", "Z"]);
        let mut out = Vec::new();
        list(&store, &mut out).unwrap();
        assert_eq!(text(out), "X\nY\nZ\n");
    }

    #[test]
    fn list_reports_empty_store() {
        let store = store_with(&[]);
        let mut out = Vec::new();
        list(&store, &mut out).unwrap();
        assert_eq!(text(out), "No notes.\n");
    }

    #[test]
    fn create_surfaces_format_error() {
        let mut store = store_with(&[]);
        let mut out = Vec::new();
        let err = create(
            &mut store,
            "t".to_string(),
            "d".to_string(),
            "15/03/2024",
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NoteStoreError>(),
            Some(NoteStoreError::InvalidDeadlineFormat { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn show_prints_details_or_miss() {
        let store = store_with(&["A"]);
        let mut out = Vec::new();
        show(&store, "A", &mut out).unwrap();
        show(&store, "B", &mut out).unwrap();

        let rendered = text(out);
        assert!(rendered.contains("Title: A\nDescription: desc\n"));
        assert!(rendered.ends_with("Note 'B' not found.\n"));
    }

    #[test]
    fn edit_keeps_omitted_fields() {
        let mut store = store_with(&["A"]);
        let mut out = Vec::new();
        let fields = EditFields {
            title: Some("B".to_string()),
            ..EditFields::default()
        };
        edit(&mut store, "A", fields, &mut out).unwrap();

        let note = store.get("B").unwrap();
        assert_eq!(note.description(), "desc");
        assert_eq!(note.deadline_input(), "2099-01-01 00:00:00");
        assert_eq!(text(out), "Updated note 'B'.\n");
    }

    #[test]
    fn edit_without_deadline_keeps_fractional_seconds() {
        let repo = MemoryNoteRepository::with_records(vec![NoteRecord {
            title: "A".to_string(),
            description: "desc".to_string(),
            deadline: "2024-03-15T17:30:00.500".to_string(),
        }]);
        let mut store = NoteStore::load(repo).unwrap();
        let before = store.get("A").unwrap().deadline();

        let fields = EditFields {
            description: Some("changed".to_string()),
            ..EditFields::default()
        };
        edit(&mut store, "A", fields, &mut Vec::new()).unwrap();

        assert_eq!(store.get("A").unwrap().deadline(), before);
        assert_eq!(
            store.repository().records()[0].deadline,
            "2024-03-15T17:30:00.500"
        );
    }

    #[test]
    fn edit_with_deadline_replaces_it() {
        let mut store = store_with(&["A"]);
        let fields = EditFields {
            deadline: Some("2100-05-06 07:08:09".to_string()),
            ..EditFields::default()
        };
        edit(&mut store, "A", fields, &mut Vec::new()).unwrap();
        assert_eq!(store.get("A").unwrap().deadline_input(), "2100-05-06 07:08:09");
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut store = store_with(&["A"]);
        let mut out = Vec::new();

        delete(&mut store, "A", false, &mut "n\n".as_bytes(), &mut out).unwrap();
        assert_eq!(store.len(), 1);

        delete(&mut store, "A", false, &mut "yes\n".as_bytes(), &mut out).unwrap();
        assert!(store.is_empty());

        let rendered = text(out);
        assert!(rendered.contains("Kept note 'A'."));
        assert!(rendered.contains("Deleted note 'A'."));
    }

    #[test]
    fn delete_with_yes_skips_prompt() {
        let mut store = store_with(&["A"]);
        let mut out = Vec::new();
        delete(&mut store, "A", true, &mut "".as_bytes(), &mut out).unwrap();
        assert!(store.is_empty());
        assert_eq!(text(out), "Deleted note 'A'.\n");
    }
}
