//! Background requests
//!
//! Network calls run on short-lived threads so the UI keeps drawing. Each
//! request is tagged with a per-slot generation number; only the result of
//! the latest request in a slot is delivered, so a response for a month the
//! user has already left is dropped.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::error::TrackerResult;
use crate::models::{Budget, Expense};
use crate::services::MonthOverview;

/// Independent request lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Summary and report for the selected month
    Overview,
    /// Budgets listed on the settings page
    SettingsBudgets,
    /// Form submissions and deletes
    Submit,
}

/// Where a budget save was started from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetOrigin {
    AddPage,
    SettingsForm,
    InlineEdit,
}

/// The payload a worker hands back
#[derive(Debug)]
pub enum Outcome {
    Overview(TrackerResult<MonthOverview>),
    SettingsBudgets(TrackerResult<Vec<Budget>>),
    ExpenseAdded(TrackerResult<Expense>),
    BudgetSaved(BudgetOrigin, TrackerResult<Budget>),
    BudgetDeleted(TrackerResult<String>),
}

/// A finished request
#[derive(Debug)]
pub struct Completed {
    pub slot: Slot,
    pub generation: u64,
    pub outcome: Outcome,
}

/// Spawns requests and filters their results down to the current ones
pub struct Workers {
    sender: mpsc::Sender<Completed>,
    receiver: mpsc::Receiver<Completed>,
    generations: HashMap<Slot, u64>,
    in_flight: HashMap<Slot, u64>,
}

impl Workers {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            generations: HashMap::new(),
            in_flight: HashMap::new(),
        }
    }

    /// Start a request in `slot`, superseding any older one
    pub fn spawn<F>(&mut self, slot: Slot, job: F) -> u64
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        let generation = self.next_generation(slot);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let outcome = job();
            // The app may have shut down; nothing to deliver to then
            let _ = sender.send(Completed {
                slot,
                generation,
                outcome,
            });
        });
        generation
    }

    fn next_generation(&mut self, slot: Slot) -> u64 {
        let generation = self.generations.entry(slot).or_insert(0);
        *generation += 1;
        self.in_flight.insert(slot, *generation);
        *generation
    }

    /// Whether the latest request in `slot` is still running
    pub fn is_busy(&self, slot: Slot) -> bool {
        self.in_flight.contains_key(&slot)
    }

    /// Whether `generation` is the latest request started in `slot`
    pub fn is_current(&self, slot: Slot, generation: u64) -> bool {
        self.generations.get(&slot) == Some(&generation)
    }

    /// Forget every outstanding request; their results will be dropped
    pub fn invalidate_all(&mut self) {
        for generation in self.generations.values_mut() {
            *generation += 1;
        }
        self.in_flight.clear();
    }

    /// Collect finished requests, keeping only current ones
    pub fn drain(&mut self) -> Vec<Completed> {
        let mut current = Vec::new();
        while let Ok(done) = self.receiver.try_recv() {
            if self.accept(&done) {
                current.push(done);
            }
        }
        current
    }

    fn accept(&mut self, done: &Completed) -> bool {
        if !self.is_current(done.slot, done.generation) {
            debug!(slot = ?done.slot, generation = done.generation, "dropping stale response");
            return false;
        }
        self.in_flight.remove(&done.slot);
        true
    }

    /// Wait for every running request to finish and collect the current ones
    #[cfg(test)]
    pub fn drain_blocking(&mut self) -> Vec<Completed> {
        let mut current = Vec::new();
        while !self.in_flight.is_empty() {
            match self.receiver.recv_timeout(std::time::Duration::from_secs(5)) {
                Ok(done) => {
                    if self.accept(&done) {
                        current.push(done);
                    }
                }
                Err(_) => break,
            }
        }
        current
    }
}

impl Default for Workers {
    fn default() -> Self {
        Self::new()
    }
}
