use crate::models::{Command, StoreRequest, VocabularyItem};

/// Holds an item awaiting delete confirmation. No request leaves until the
/// user confirms.
#[derive(Debug, Default, Clone)]
pub struct PendingDelete {
    item: Option<VocabularyItem>,
}

impl PendingDelete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, item: VocabularyItem) {
        self.item = Some(item);
    }

    pub fn is_open(&self) -> bool {
        self.item.is_some()
    }

    pub fn item(&self) -> Option<&VocabularyItem> {
        self.item.as_ref()
    }

    pub fn prompt(&self) -> Option<String> {
        self.item.as_ref().map(|item| {
            format!(
                "Do you really want to delete this vocab?\n\nterm: {}\ntranslation: {}",
                item.term, item.translation
            )
        })
    }

    /// Closes the dialog, yielding the delete request only when confirmed.
    pub fn resolve(&mut self, confirmed: bool) -> Option<Command> {
        let item = self.item.take()?;
        if !confirmed {
            crate::logger::debug(&format!("Delete of vocab {} declined", item.id));
            return None;
        }
        Some(Command::Store(StoreRequest::Delete { id: item.id }))
    }
}
