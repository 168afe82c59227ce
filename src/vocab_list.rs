use std::time::{Duration, Instant};

use crate::confirm::PendingDelete;
use crate::debounce::Debouncer;
use crate::error::StoreError;
use crate::input::LineInput;
use crate::logger;
use crate::models::{
    Command, OrderKey, StoreRequest, Ticket, VocabId, VocabPage, VocabQuery,
    VocabularyItem,
};
use crate::sequence::RequestSequence;

pub const PAGE_SIZE: u32 = 10;
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub fn total_pages(count: u64) -> u32 {
    let pages = count.div_ceil(u64::from(PAGE_SIZE)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub page: u32,
    pub total_pages: u32,
    pub search_text: String,
    pub order: OrderKey,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            search_text: String::new(),
            order: OrderKey::default(),
        }
    }
}

impl QueryState {
    pub fn to_query(&self) -> VocabQuery {
        VocabQuery {
            skip: (self.page - 1) * PAGE_SIZE,
            take: PAGE_SIZE,
            term: self.search_text.clone(),
            translation: self.search_text.clone(),
            order_by: self.order,
        }
    }
}

/// Filtered, sorted and paginated view over the store's vocabulary.
#[derive(Debug)]
pub struct VocabList {
    query: QueryState,
    search: LineInput,
    search_debounce: Debouncer,
    sequence: RequestSequence,
    items: Vec<VocabularyItem>,
    selected: usize,
    practice_count: u64,
    pending_delete: PendingDelete,
}

impl Default for VocabList {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabList {
    pub fn new() -> Self {
        Self {
            query: QueryState::default(),
            search: LineInput::new(),
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE),
            sequence: RequestSequence::new(),
            items: Vec::new(),
            selected: 0,
            practice_count: 0,
            pending_delete: PendingDelete::new(),
        }
    }

    pub fn mount(&mut self) -> Vec<Command> {
        vec![self.fetch(), Self::fetch_practice_count()]
    }

    /// Cancels the pending search so nothing fires after the view is gone.
    pub fn unmount(&mut self) {
        self.search_debounce.cancel();
    }

    fn fetch(&mut self) -> Command {
        let ticket = self.sequence.issue();
        let query = self.query.to_query();
        logger::debug(&format!(
            "Vocab query {:?}: page {} search {:?} order {:?}",
            ticket, self.query.page, query.term, query.order_by
        ));
        Command::Store(StoreRequest::Query { ticket, query })
    }

    fn fetch_practice_count() -> Command {
        Command::Store(StoreRequest::PracticeCount)
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn practice_count(&self) -> u64 {
        self.practice_count
    }

    pub fn search(&self) -> &LineInput {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut LineInput {
        &mut self.search
    }

    /// Call after every edit of the search field; the query waits for a quiet period.
    pub fn on_search_changed(&mut self, now: Instant) {
        self.query.search_text = self.search.text().to_string();
        self.search_debounce.arm(now);
    }

    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        if self.search_debounce.fire_if_due(now) {
            self.query.page = 1;
            return vec![self.fetch()];
        }
        Vec::new()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.search_debounce.deadline()
    }

    /// Sorting takes effect immediately and starts over from the first page.
    pub fn set_order(&mut self, order: OrderKey) -> Vec<Command> {
        if self.query.order == order {
            return Vec::new();
        }
        self.query.order = order;
        self.query.page = 1;
        vec![self.fetch()]
    }

    pub fn next_page(&mut self) -> Vec<Command> {
        if self.query.page >= self.query.total_pages {
            return Vec::new();
        }
        self.query.page += 1;
        vec![self.fetch()]
    }

    pub fn previous_page(&mut self) -> Vec<Command> {
        if self.query.page <= 1 {
            return Vec::new();
        }
        self.query.page -= 1;
        vec![self.fetch()]
    }

    pub fn on_page(&mut self, ticket: Ticket, result: Result<VocabPage, StoreError>) -> Vec<Command> {
        if !self.sequence.is_current(ticket) {
            logger::debug(&format!("Discarding stale vocab page {:?}", ticket));
            return Vec::new();
        }
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                logger::error("fetch vocab", &e);
                return Vec::new();
            }
        };

        self.items = page.items;
        self.query.total_pages = total_pages(page.count);
        self.selected = self.selected.min(self.items.len().saturating_sub(1));

        if self.query.page > self.query.total_pages {
            self.query.page = self.query.total_pages;
            return vec![self.fetch()];
        }
        Vec::new()
    }

    pub fn on_practice_count(&mut self, result: Result<u64, StoreError>) {
        match result {
            Ok(count) => self.practice_count = count,
            Err(e) => logger::error("fetch practice count", &e),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
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
        if let Some(item) = self.items.get(index) {
            self.pending_delete.request(item.clone());
        }
    }

    pub fn resolve_delete(&mut self, confirmed: bool) -> Vec<Command> {
        self.pending_delete.resolve(confirmed).into_iter().collect()
    }

    /// Refreshes after a delete whether or not it succeeded. When the removed
    /// item was the last one on a later page, the view steps back a page first.
    pub fn on_deleted(&mut self, id: VocabId, result: Result<(), StoreError>) -> Vec<Command> {
        if let Err(e) = result {
            logger::error(&format!("delete vocab {}", id), &e);
        }
        let emptied_page = self.items.len() == 1 && self.items[0].id == id;
        if emptied_page && self.query.page > 1 {
            self.query.page -= 1;
        }
        vec![self.fetch(), Self::fetch_practice_count()]
    }
}
