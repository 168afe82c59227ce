use std::time::{Duration, Instant};

use crate::confirm::PendingDelete;
use crate::debounce::Debouncer;
use crate::error::StoreError;
use crate::input::LineInput;
use crate::logger;
use crate::models::{
    Command, CreatedVocab, NewVocab, OrderKey, StoreRequest, Ticket, VocabId,
    VocabPage, VocabQuery, VocabularyItem,
};
use crate::notifications::Notifications;
use crate::sequence::RequestSequence;

pub const SIMILAR_DEBOUNCE: Duration = Duration::from_millis(500);
pub const SIMILAR_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Term,
    Translation,
}

/// Notification text for a successfully created vocab.
pub fn created_message(vocab: &NewVocab) -> String {
    format!("added: {} -> {}", vocab.term, vocab.translation)
}

/// Form for new vocabulary with a live list of similar existing entries.
#[derive(Debug)]
pub struct AddVocab {
    term: LineInput,
    translation: LineInput,
    focus: AddField,
    similar: Vec<VocabularyItem>,
    selected: usize,
    // Shared by both fields: an edit in either one replaces the pending lookup.
    similar_debounce: Debouncer,
    sequence: RequestSequence,
    pending_delete: PendingDelete,
    creating: bool,
}

impl Default for AddVocab {
    fn default() -> Self {
        Self::new()
    }
}

impl AddVocab {
    pub fn new() -> Self {
        Self {
            term: LineInput::new(),
            translation: LineInput::new(),
            focus: AddField::Term,
            similar: Vec::new(),
            selected: 0,
            similar_debounce: Debouncer::new(SIMILAR_DEBOUNCE),
            sequence: RequestSequence::new(),
            pending_delete: PendingDelete::new(),
            creating: false,
        }
    }

    pub fn mount(&mut self) -> Vec<Command> {
        vec![self.fetch_similar()]
    }

    pub fn unmount(&mut self) {
        self.similar_debounce.cancel();
    }

    fn fetch_similar(&mut self) -> Command {
        let ticket = self.sequence.issue();
        let query = VocabQuery {
            skip: 0,
            take: SIMILAR_LIMIT,
            term: self.term.text().to_string(),
            translation: self.translation.text().to_string(),
            order_by: OrderKey::Term,
        };
        Command::Store(StoreRequest::Query { ticket, query })
    }

    pub fn term(&self) -> &LineInput {
        &self.term
    }

    pub fn translation(&self) -> &LineInput {
        &self.translation
    }

    pub fn focus(&self) -> AddField {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AddField::Term => AddField::Translation,
            AddField::Translation => AddField::Term,
        };
    }

    pub fn focused_mut(&mut self) -> &mut LineInput {
        match self.focus {
            AddField::Term => &mut self.term,
            AddField::Translation => &mut self.translation,
        }
    }

    pub fn on_field_changed(&mut self, now: Instant) {
        self.similar_debounce.arm(now);
    }

    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        if self.similar_debounce.fire_if_due(now) {
            return vec![self.fetch_similar()];
        }
        Vec::new()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.similar_debounce.deadline()
    }

    pub fn can_submit(&self) -> bool {
        !self.creating
            && !self.term.text().trim().is_empty()
            && !self.translation.text().trim().is_empty()
    }

    pub fn submit(&mut self) -> Vec<Command> {
        if !self.can_submit() {
            return Vec::new();
        }
        self.creating = true;
        vec![Command::Store(StoreRequest::Create(NewVocab {
            term: self.term.text().trim().to_string(),
            translation: self.translation.text().trim().to_string(),
        }))]
    }

    pub fn on_created(
        &mut self,
        vocab: NewVocab,
        result: Result<CreatedVocab, StoreError>,
        notifications: &mut Notifications,
        now: Instant,
    ) {
        self.creating = false;
        match result {
            Ok(created) => {
                logger::log(&format!("Created vocab {}", created.id));
                notifications.dispatch(created_message(&vocab), now);
                self.term.clear();
                self.translation.clear();
                self.similar.clear();
                self.selected = 0;
                self.focus = AddField::Term;
                // Cleared fields count as an edit: reload the unfiltered similar list.
                self.similar_debounce.arm(now);
            }
            Err(e) => logger::error("create vocab", &e),
        }
    }

    pub fn on_page(&mut self, ticket: Ticket, result: Result<VocabPage, StoreError>) {
        if !self.sequence.is_current(ticket) {
            logger::debug(&format!("Discarding stale similar lookup {:?}", ticket));
            return;
        }
        match result {
            Ok(page) => {
                self.similar = page.items;
                self.selected = self.selected.min(self.similar.len().saturating_sub(1));
            }
            Err(e) => logger::error("fetch similar vocab", &e),
        }
    }

    pub fn similar(&self) -> &[VocabularyItem] {
        &self.similar
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.similar.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn pending_delete(&self) -> &PendingDelete {
        &self.pending_delete
    }

    pub fn request_delete(&mut self, index: usize) {
        if let Some(item) = self.similar.get(index) {
            self.pending_delete.request(item.clone());
        }
    }

    pub fn resolve_delete(&mut self, confirmed: bool) -> Vec<Command> {
        self.pending_delete.resolve(confirmed).into_iter().collect()
    }

    pub fn on_deleted(&mut self, id: VocabId, result: Result<(), StoreError>) -> Vec<Command> {
        if let Err(e) = result {
            logger::error(&format!("delete vocab {}", id), &e);
        }
        vec![self.fetch_similar()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: u64, term: &str) -> VocabularyItem {
        VocabularyItem {
            id,
            term: term.to_string(),
            translation: format!("{}-t", term),
            knowledge_level: 0,
            practice_at: Utc::now(),
        }
    }

    fn query_of(command: &Command) -> (Ticket, VocabQuery) {
        match command {
            Command::Store(StoreRequest::Query { ticket, query }) => (*ticket, query.clone()),
            other => panic!("expected query, got {:?}", other),
        }
    }

    fn type_into(add: &mut AddVocab, text: &str) {
        for c in text.chars() {
            add.focused_mut().insert(c);
        }
    }

    #[test]
    fn test_mount_looks_up_similar() {
        let mut add = AddVocab::new();
        let commands = add.mount();
        let (_, query) = query_of(&commands[0]);
        assert_eq!(query.skip, 0);
        assert_eq!(query.take, SIMILAR_LIMIT);
    }

    #[test]
    fn test_edits_in_both_fields_share_one_lookup() {
        let start = Instant::now();
        let mut add = AddVocab::new();
        add.mount();

        type_into(&mut add, "cat");
        add.on_field_changed(start);
        add.toggle_focus();
        type_into(&mut add, "ga");
        add.on_field_changed(start + Duration::from_millis(400));

        assert!(add.tick(start + Duration::from_millis(500)).is_empty());
        let commands = add.tick(start + Duration::from_millis(900));
        assert_eq!(commands.len(), 1);
        let (_, query) = query_of(&commands[0]);
        assert_eq!(query.term, "cat");
        assert_eq!(query.translation, "ga");
        assert!(add.tick(start + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_can_submit_requires_both_trimmed_fields() {
        let mut add = AddVocab::new();
        assert!(!add.can_submit());

        type_into(&mut add, "cat");
        add.toggle_focus();
        type_into(&mut add, "   ");
        assert!(!add.can_submit());
        assert!(add.submit().is_empty());

        type_into(&mut add, "gato");
        assert!(add.can_submit());
    }

    #[test]
    fn test_submit_trims_and_notifies() {
        let now = Instant::now();
        let mut add = AddVocab::new();
        let mut notifications = Notifications::new();
        type_into(&mut add, " cat ");
        add.toggle_focus();
        type_into(&mut add, "gato ");

        let commands = add.submit();
        let vocab = NewVocab {
            term: "cat".to_string(),
            translation: "gato".to_string(),
        };
        assert_eq!(
            commands,
            vec![Command::Store(StoreRequest::Create(vocab.clone()))]
        );
        assert!(!add.can_submit());

        add.on_created(vocab, Ok(CreatedVocab { id: 3 }), &mut notifications, now);
        assert_eq!(notifications.visible()[0].text, "added: cat -> gato");
        assert!(add.term().is_empty());
        assert!(add.translation().is_empty());
        assert_eq!(add.focus(), AddField::Term);
    }

    #[test]
    fn test_successful_create_reloads_similar() {
        let start = Instant::now();
        let mut add = AddVocab::new();
        let mut notifications = Notifications::new();
        add.mount();
        type_into(&mut add, "cat");
        add.toggle_focus();
        type_into(&mut add, "gato");
        add.submit();

        add.on_created(
            NewVocab {
                term: "cat".to_string(),
                translation: "gato".to_string(),
            },
            Ok(CreatedVocab { id: 1 }),
            &mut notifications,
            start,
        );
        assert_eq!(add.next_deadline(), Some(start + SIMILAR_DEBOUNCE));
        assert!(add.tick(start + Duration::from_millis(499)).is_empty());

        let commands = add.tick(start + SIMILAR_DEBOUNCE);
        assert_eq!(commands.len(), 1);
        let (_, query) = query_of(&commands[0]);
        assert_eq!(query.term, "");
        assert_eq!(query.translation, "");
        assert_eq!(query.take, SIMILAR_LIMIT);
        assert!(add.tick(start + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_failed_create_keeps_fields() {
        let now = Instant::now();
        let mut add = AddVocab::new();
        let mut notifications = Notifications::new();
        type_into(&mut add, "cat");
        add.toggle_focus();
        type_into(&mut add, "gato");
        add.submit();

        add.on_created(
            NewVocab {
                term: "cat".to_string(),
                translation: "gato".to_string(),
            },
            Err(StoreError::Status(400)),
            &mut notifications,
            now,
        );
        assert!(notifications.is_empty());
        assert_eq!(add.term().text(), "cat");
        assert!(add.can_submit());
    }

    #[test]
    fn test_stale_similar_lookup_is_discarded() {
        let start = Instant::now();
        let mut add = AddVocab::new();
        let (first, _) = query_of(&add.mount()[0]);
        type_into(&mut add, "c");
        add.on_field_changed(start);
        let (second, _) = query_of(&add.tick(start + SIMILAR_DEBOUNCE)[0]);

        add.on_page(
            second,
            Ok(VocabPage {
                items: vec![item(1, "cat")],
                count: 1,
            }),
        );
        add.on_page(
            first,
            Ok(VocabPage {
                items: vec![item(2, "apple"), item(3, "banana")],
                count: 2,
            }),
        );
        assert_eq!(add.similar().len(), 1);
        assert_eq!(add.similar()[0].term, "cat");
    }

    #[test]
    fn test_delete_similar_refetches() {
        let mut add = AddVocab::new();
        let (ticket, _) = query_of(&add.mount()[0]);
        add.on_page(
            ticket,
            Ok(VocabPage {
                items: vec![item(1, "cat"), item(2, "car")],
                count: 2,
            }),
        );
        add.select_next();
        add.request_delete(add.selected());
        assert_eq!(add.pending_delete().item().unwrap().id, 2);

        let delete = add.resolve_delete(true);
        assert_eq!(delete, vec![Command::Store(StoreRequest::Delete { id: 2 })]);
        let commands = add.on_deleted(2, Ok(()));
        assert!(matches!(
            commands[0],
            Command::Store(StoreRequest::Query { .. })
        ));
    }

    #[test]
    fn test_unmount_cancels_lookup() {
        let start = Instant::now();
        let mut add = AddVocab::new();
        type_into(&mut add, "c");
        add.on_field_changed(start);
        add.unmount();
        assert!(add.tick(start + SIMILAR_DEBOUNCE).is_empty());
    }
}
