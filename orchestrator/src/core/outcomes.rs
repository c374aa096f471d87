//! Join bookkeeping: one write-once slot per dispatched lane

use shared::{BusinessCandidate, ErrorKind, UnitOutcome};

/// Pre-sized, index-addressed outcome slots filled as lanes finish.
///
/// Only the join loop writes here, one outcome per lane index, so no locking
/// is involved. The slots stay private until `finish` seals them.
#[derive(Debug)]
pub struct OutcomeSlots {
    slots: Vec<Option<UnitOutcome>>,
}

impl OutcomeSlots {
    pub fn new(dispatched: usize) -> Self {
        Self {
            slots: vec![None; dispatched],
        }
    }

    /// Store the outcome for lane `index`. A slot is written at most once;
    /// returns `false` when the index is unknown or already filled.
    pub fn fill(&mut self, index: usize, outcome: UnitOutcome) -> bool {
        match self.slots.get_mut(index) {
            Some(slot @ None) => {
                *slot = Some(outcome);
                true
            }
            _ => false,
        }
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Seal the slots. Any lane that never reported is recorded as aborted so
    /// the result always holds one outcome per dispatched business.
    pub fn finish(self, dispatched: &[BusinessCandidate]) -> OrchestrationResult {
        let outcomes = self
            .slots
            .into_iter()
            .zip(dispatched)
            .map(|(slot, input)| {
                slot.unwrap_or_else(|| {
                    UnitOutcome::failed(
                        input.clone(),
                        ErrorKind::LaneAborted("lane ended without reporting".to_string()),
                        0,
                    )
                })
            })
            .collect();
        OrchestrationResult { outcomes }
    }
}

/// Every dispatched lane's outcome, in dispatch order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrchestrationResult {
    outcomes: Vec<UnitOutcome>,
}

impl OrchestrationResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome for a business key; with repeated keys the first wins
    pub fn get(&self, business_key: &str) -> Option<&UnitOutcome> {
        self.outcomes.iter().find(|outcome| outcome.business_key == business_key)
    }

    pub fn outcomes(&self) -> &[UnitOutcome] {
        &self.outcomes
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

impl From<Vec<UnitOutcome>> for OrchestrationResult {
    fn from(outcomes: Vec<UnitOutcome>) -> Self {
        Self { outcomes }
    }
}
