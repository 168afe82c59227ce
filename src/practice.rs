use std::collections::VecDeque;
use std::time::Instant;

use crate::error::StoreError;
use crate::input::LineInput;
use crate::logger;
use crate::models::{Command, PracticeResult, Screen, StoreRequest, VocabularyItem};
use crate::notifications::Notifications;

pub const NOTHING_TO_PRACTICE: &str = "nothing to practice";

/// What to do when the final result submission fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitFailurePolicy {
    /// Log the failure and stay in `Submitting`.
    #[default]
    LogOnly,
    /// Log the failure, keep its text for display and allow `retry_submission`.
    OfferRetry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PracticeState {
    Init,
    Loading,
    /// The store had nothing due; the session never starts.
    Empty,
    Input {
        guess: LineInput,
    },
    Result {
        guess: String,
        passed: bool,
    },
    Submitting {
        failure: Option<String>,
    },
    Done {
        passed: usize,
        total: usize,
    },
}

/// Exact match after trimming the guess at both edges.
pub fn grade(guess: &str, translation: &str) -> bool {
    guess.trim() == translation
}

/// One practice session over a fixed batch. Items are quizzed in the order
/// they arrived and each produces exactly one result before the next starts.
#[derive(Debug)]
pub struct PracticeSession {
    state: PracticeState,
    queue: VecDeque<VocabularyItem>,
    results: Vec<PracticeResult>,
    batch_size: usize,
    policy: SubmitFailurePolicy,
}

impl PracticeSession {
    pub fn new(policy: SubmitFailurePolicy) -> Self {
        Self {
            state: PracticeState::Init,
            queue: VecDeque::new(),
            results: Vec::new(),
            batch_size: 0,
            policy,
        }
    }

    pub fn state(&self) -> &PracticeState {
        &self.state
    }

    pub fn mount(&mut self) -> Vec<Command> {
        if self.state != PracticeState::Init {
            return Vec::new();
        }
        self.state = PracticeState::Loading;
        vec![Command::Store(StoreRequest::FetchBatch)]
    }

    pub fn on_batch(
        &mut self,
        result: Result<Vec<VocabularyItem>, StoreError>,
        notifications: &mut Notifications,
        now: Instant,
    ) -> Vec<Command> {
        if self.state != PracticeState::Loading {
            return Vec::new();
        }
        match result {
            Ok(items) if items.is_empty() => {
                logger::log("Practice batch is empty");
                self.state = PracticeState::Empty;
                notifications.dispatch(NOTHING_TO_PRACTICE, now);
                vec![Command::Navigate(Screen::VocabList)]
            }
            Ok(items) => {
                logger::log(&format!("Practice batch of {} items loaded", items.len()));
                self.batch_size = items.len();
                self.queue = items.into();
                self.state = PracticeState::Input {
                    guess: LineInput::new(),
                };
                Vec::new()
            }
            Err(e) => {
                logger::error("fetch practice batch", &e);
                Vec::new()
            }
        }
    }

    pub fn current(&self) -> Option<&VocabularyItem> {
        self.queue.front()
    }

    pub fn guess_mut(&mut self) -> Option<&mut LineInput> {
        match &mut self.state {
            PracticeState::Input { guess } => Some(guess),
            _ => None,
        }
    }

    /// Guessing is enabled as soon as the buffer holds anything, whitespace included.
    pub fn can_guess(&self) -> bool {
        matches!(&self.state, PracticeState::Input { guess } if !guess.is_empty())
    }

    /// Grades the current guess and shows the result. Returns false when there
    /// is nothing to grade.
    pub fn submit_guess(&mut self) -> bool {
        if !self.can_guess() {
            return false;
        }
        let Some(item) = self.queue.front() else {
            return false;
        };
        let PracticeState::Input { guess } = &self.state else {
            return false;
        };
        let guess = guess.text().to_string();
        let passed = grade(&guess, &item.translation);
        logger::debug(&format!("Vocab {} graded: passed={}", item.id, passed));
        self.state = PracticeState::Result { guess, passed };
        true
    }

    /// Leaves the result view: records the round and moves to the next item,
    /// or starts the submission once the queue is empty.
    pub fn advance(&mut self) -> Vec<Command> {
        let PracticeState::Result { passed, .. } = self.state else {
            return Vec::new();
        };
        let Some(item) = self.queue.pop_front() else {
            return Vec::new();
        };
        self.results.push(PracticeResult {
            id: item.id,
            passed,
        });

        if self.queue.is_empty() {
            self.state = PracticeState::Submitting { failure: None };
            logger::log(&format!(
                "Submitting {} practice results",
                self.results.len()
            ));
            vec![self.submit_command()]
        } else {
            self.state = PracticeState::Input {
                guess: LineInput::new(),
            };
            Vec::new()
        }
    }

    fn submit_command(&self) -> Command {
        Command::Store(StoreRequest::SubmitResults(self.results.clone()))
    }

    pub fn on_submitted(&mut self, result: Result<(), StoreError>) {
        if !matches!(self.state, PracticeState::Submitting { .. }) {
            return;
        }
        match result {
            Ok(()) => {
                let (passed, total) = self.tally();
                logger::log(&format!("Practice finished: {} of {} passed", passed, total));
                self.state = PracticeState::Done { passed, total };
            }
            Err(e) => {
                logger::error("submit practice results", &e);
                let failure = match self.policy {
                    SubmitFailurePolicy::LogOnly => None,
                    SubmitFailurePolicy::OfferRetry => Some(e.to_string()),
                };
                self.state = PracticeState::Submitting { failure };
            }
        }
    }

    pub fn can_retry(&self) -> bool {
        matches!(self.state, PracticeState::Submitting { failure: Some(_) })
    }

    /// Re-sends the same result list after a failure, when the policy allows it.
    pub fn retry_submission(&mut self) -> Vec<Command> {
        if !self.can_retry() {
            return Vec::new();
        }
        self.state = PracticeState::Submitting { failure: None };
        logger::log("Retrying practice result submission");
        vec![self.submit_command()]
    }

    fn tally(&self) -> (usize, usize) {
        let passed = self.results.iter().filter(|r| r.passed).count();
        (passed, self.results.len())
    }

    pub fn results(&self) -> &[PracticeResult] {
        &self.results
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// `(current round, session size)` while rounds remain.
    pub fn progress(&self) -> Option<(usize, usize)> {
        if self.queue.is_empty() {
            return None;
        }
        let done = self.results.len();
        Some((done + 1, self.queue.len() + done))
    }

    pub fn summary(&self) -> Option<(usize, usize)> {
        match self.state {
            PracticeState::Done { passed, total } => Some((passed, total)),
            _ => None,
        }
    }
}
