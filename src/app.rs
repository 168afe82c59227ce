use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::add_vocab::{created_message, AddVocab};
use crate::input::EditOutcome;
use crate::logger;
use crate::models::{Command, Envelope, Screen, StoreRequest, StoreResponse};
use crate::notifications::Notifications;
use crate::practice::{PracticeSession, PracticeState, SubmitFailurePolicy};
use crate::vocab_list::VocabList;

#[derive(Debug)]
pub enum View {
    VocabList(VocabList),
    AddVocab(AddVocab),
    Practice(PracticeSession),
}

impl View {
    pub fn screen(&self) -> Screen {
        match self {
            View::VocabList(_) => Screen::VocabList,
            View::AddVocab(_) => Screen::AddVocab,
            View::Practice(_) => Screen::Practice,
        }
    }
}

/// Owns the active view and the process-wide notifications. Requests leave
/// through the outbox tagged with the mount generation of the view that made
/// them; responses for an earlier generation are dropped.
#[derive(Debug)]
pub struct App {
    view: View,
    generation: u64,
    notifications: Notifications,
    outbox: Vec<Envelope<StoreRequest>>,
    policy: SubmitFailurePolicy,
    should_quit: bool,
}

impl App {
    pub fn new(policy: SubmitFailurePolicy, now: Instant) -> Self {
        let mut app = Self {
            view: View::VocabList(VocabList::new()),
            generation: 0,
            notifications: Notifications::new(),
            outbox: Vec::new(),
            policy,
            should_quit: false,
        };
        app.navigate(Screen::VocabList, now);
        app
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn take_outbox(&mut self) -> Vec<Envelope<StoreRequest>> {
        std::mem::take(&mut self.outbox)
    }

    pub fn navigate(&mut self, screen: Screen, now: Instant) {
        match &mut self.view {
            View::VocabList(list) => list.unmount(),
            View::AddVocab(add) => add.unmount(),
            View::Practice(_) => {}
        }
        self.generation += 1;
        logger::log(&format!(
            "Navigating to {:?} (generation {})",
            screen, self.generation
        ));
        let commands = match screen {
            Screen::VocabList => {
                let mut list = VocabList::new();
                let commands = list.mount();
                self.view = View::VocabList(list);
                commands
            }
            Screen::AddVocab => {
                let mut add = AddVocab::new();
                let commands = add.mount();
                self.view = View::AddVocab(add);
                commands
            }
            Screen::Practice => {
                let mut session = PracticeSession::new(self.policy);
                let commands = session.mount();
                self.view = View::Practice(session);
                commands
            }
        };
        self.apply(commands, now);
    }

    fn apply(&mut self, commands: Vec<Command>, now: Instant) {
        for command in commands {
            match command {
                Command::Store(payload) => self.outbox.push(Envelope {
                    generation: self.generation,
                    payload,
                }),
                Command::Navigate(screen) => self.navigate(screen, now),
            }
        }
    }

    pub fn on_response(&mut self, response: Envelope<StoreResponse>, now: Instant) {
        if response.generation != self.generation {
            // The notification queue outlives views, so a create that finished
            // after its form was left is still announced.
            if let StoreResponse::Created {
                vocab,
                result: Ok(created),
            } = &response.payload
            {
                logger::log(&format!("Created vocab {}", created.id));
                self.notifications.dispatch(created_message(vocab), now);
            }
            logger::debug(&format!(
                "Dropping response for generation {} (current {})",
                response.generation, self.generation
            ));
            return;
        }
        let commands = match (&mut self.view, response.payload) {
            (View::VocabList(list), StoreResponse::Page { ticket, result }) => {
                list.on_page(ticket, result)
            }
            (View::VocabList(list), StoreResponse::Deleted { id, result }) => {
                list.on_deleted(id, result)
            }
            (View::VocabList(list), StoreResponse::PracticeCount(result)) => {
                list.on_practice_count(result);
                Vec::new()
            }
            (View::AddVocab(add), StoreResponse::Page { ticket, result }) => {
                add.on_page(ticket, result);
                Vec::new()
            }
            (View::AddVocab(add), StoreResponse::Created { vocab, result }) => {
                add.on_created(vocab, result, &mut self.notifications, now);
                Vec::new()
            }
            (View::AddVocab(add), StoreResponse::Deleted { id, result }) => {
                add.on_deleted(id, result)
            }
            (View::Practice(session), StoreResponse::Batch(result)) => {
                session.on_batch(result, &mut self.notifications, now)
            }
            (View::Practice(session), StoreResponse::Submitted(result)) => {
                session.on_submitted(result);
                Vec::new()
            }
            (view, payload) => {
                logger::debug(&format!(
                    "Unexpected response for {:?}: {:?}",
                    view.screen(),
                    payload
                ));
                Vec::new()
            }
        };
        self.apply(commands, now);
    }

    /// Fires due timers: notification expiry and the active view's debounce.
    pub fn tick(&mut self, now: Instant) {
        self.notifications.expire(now);
        let commands = match &mut self.view {
            View::VocabList(list) => list.tick(now),
            View::AddVocab(add) => add.tick(now),
            View::Practice(_) => Vec::new(),
        };
        self.apply(commands, now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let view_deadline = match &self.view {
            View::VocabList(list) => list.next_deadline(),
            View::AddVocab(add) => add.next_deadline(),
            View::Practice(_) => None,
        };
        match (view_deadline, self.notifications.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        let commands = match &mut self.view {
            View::VocabList(list) => match handle_list_key(list, key, now) {
                ListAction::Quit => {
                    self.should_quit = true;
                    Vec::new()
                }
                ListAction::Commands(commands) => commands,
            },
            View::AddVocab(add) => handle_add_key(add, key, now),
            View::Practice(session) => handle_practice_key(session, key),
        };
        self.apply(commands, now);
    }
}

enum ListAction {
    Quit,
    Commands(Vec<Command>),
}

fn handle_list_key(list: &mut VocabList, key: KeyEvent, now: Instant) -> ListAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if list.pending_delete().is_open() {
        let commands = match key.code {
            KeyCode::Char('y') => list.resolve_delete(true),
            KeyCode::Char('n') | KeyCode::Esc => list.resolve_delete(false),
            _ => Vec::new(),
        };
        return ListAction::Commands(commands);
    }
    let commands = match key.code {
        KeyCode::Esc => return ListAction::Quit,
        KeyCode::Char('a') if ctrl => vec![Command::Navigate(Screen::AddVocab)],
        KeyCode::Char('p') if ctrl => {
            if list.practice_count() > 0 {
                vec![Command::Navigate(Screen::Practice)]
            } else {
                Vec::new()
            }
        }
        KeyCode::Char('d') if ctrl => {
            list.request_delete(list.selected());
            Vec::new()
        }
        KeyCode::Tab => {
            let order = list.query().order.next();
            list.set_order(order)
        }
        KeyCode::PageDown => list.next_page(),
        KeyCode::PageUp => list.previous_page(),
        KeyCode::Down => {
            list.select_next();
            Vec::new()
        }
        KeyCode::Up => {
            list.select_previous();
            Vec::new()
        }
        _ => {
            if list.search_mut().handle_key(key) == EditOutcome::Changed {
                list.on_search_changed(now);
            }
            Vec::new()
        }
    };
    ListAction::Commands(commands)
}

fn handle_add_key(add: &mut AddVocab, key: KeyEvent, now: Instant) -> Vec<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if add.pending_delete().is_open() {
        return match key.code {
            KeyCode::Char('y') => add.resolve_delete(true),
            KeyCode::Char('n') | KeyCode::Esc => add.resolve_delete(false),
            _ => Vec::new(),
        };
    }
    match key.code {
        KeyCode::Esc => vec![Command::Navigate(Screen::VocabList)],
        KeyCode::Tab => {
            add.toggle_focus();
            Vec::new()
        }
        KeyCode::Enter => add.submit(),
        KeyCode::Down => {
            add.select_next();
            Vec::new()
        }
        KeyCode::Up => {
            add.select_previous();
            Vec::new()
        }
        KeyCode::Char('d') if ctrl => {
            add.request_delete(add.selected());
            Vec::new()
        }
        _ => {
            if add.focused_mut().handle_key(key) == EditOutcome::Changed {
                add.on_field_changed(now);
            }
            Vec::new()
        }
    }
}

fn handle_practice_key(session: &mut PracticeSession, key: KeyEvent) -> Vec<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc {
        return vec![Command::Navigate(Screen::VocabList)];
    }
    if let Some(guess) = session.guess_mut() {
        if key.code != KeyCode::Enter {
            guess.handle_key(key);
            return Vec::new();
        }
        session.submit_guess();
        return Vec::new();
    }
    let done = matches!(session.state(), PracticeState::Done { .. });
    match key.code {
        KeyCode::Enter if done => vec![Command::Navigate(Screen::VocabList)],
        KeyCode::Enter => session.advance(),
        KeyCode::Char('r') if ctrl => session.retry_submission(),
        _ => Vec::new(),
    }
}
