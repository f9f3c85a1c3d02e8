//! Best-so-far tracking for local search.

use crate::model::{Assignment, Vertex};

/// Tracks the best assignment found so far.
///
/// The local search only commits strictly improving moves, so the incumbent is
/// also the working assignment that the next candidates are derived from.
#[derive(Debug, Clone)]
pub struct Incumbent<V> {
    assignment: Assignment<V>,
    mistakes: usize,

    /// Mistake count of every committed assignment, starting point first.
    history: Vec<usize>,
}

impl<V: Vertex> Incumbent<V> {
    /// Start tracking from an evaluated assignment.
    pub fn new(assignment: Assignment<V>, mistakes: usize) -> Self {
        Self {
            assignment,
            mistakes,
            history: vec![mistakes],
        }
    }

    /// Current assignment.
    pub fn assignment(&self) -> &Assignment<V> {
        &self.assignment
    }

    /// Mistake count of the current assignment.
    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    /// Number of committed improvements.
    pub fn update_count(&self) -> usize {
        self.history.len() - 1
    }

    /// Committed mistake counts, starting point first.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Commit `candidate` if it has strictly fewer mistakes.
    ///
    /// Returns true if the incumbent was replaced.
    pub fn offer(&mut self, candidate: Assignment<V>, mistakes: usize) -> bool {
        if mistakes < self.mistakes {
            self.assignment = candidate;
            self.mistakes = mistakes;
            self.history.push(mistakes);
            true
        } else {
            false
        }
    }

    /// Split into assignment, mistake count and history.
    pub fn into_parts(self) -> (Assignment<V>, usize, Vec<usize>) {
        (self.assignment, self.mistakes, self.history)
    }
}
