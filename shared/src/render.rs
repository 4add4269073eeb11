use crate::models::{ActionItem, Note};

pub fn note_row(note: &Note) -> String {
    format!("{}: {}", note.title, note.content)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRow {
    pub id: i64,
    pub label: String,
    /// Open items get a completion control.
    pub completable: bool,
}

pub fn action_rows(items: &[ActionItem]) -> Vec<ActionRow> {
    items
        .iter()
        .map(|item| ActionRow {
            id: item.id,
            label: format!(
                "{} [{}]",
                item.description,
                if item.completed { "done" } else { "open" }
            ),
            completable: !item.completed,
        })
        .collect()
}
