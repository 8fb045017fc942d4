//! Best-Match Selection
//!
//! Turns a score matrix column into at most one winning switch per child and
//! emits the per-child assignment tasks.
//!
//! The default rule scans switch rows in index order and keeps the first row
//! whose score strictly exceeds the running best, seeded at the strategy's
//! acceptance floor; ties therefore keep the earliest-scanned switch. The
//! inclusion strategy replaces this with its own rule: only fully included
//! switch names are eligible, and the one with the most words wins.

use crate::core::context::ContainerContext;
use crate::core::strategy::{
    ScoreMatrix, FULL_INCLUSION_TOLERANCE, LEVENSHTEIN_MIN_SCORE, TFIDF_MIN_SCORE,
};
use crate::core::task::{AssignStatus, AssignTask};
use tracing::error;

impl ScoreMatrix {
    /// The winning switch row for a child column, if any score is accepted.
    pub fn best_switch(&self, child_idx: usize) -> Option<usize> {
        match self {
            ScoreMatrix::Tfidf(m) => best_row(m, child_idx, TFIDF_MIN_SCORE),
            ScoreMatrix::Levenshtein(m) => best_row(m, child_idx, LEVENSHTEIN_MIN_SCORE),
            ScoreMatrix::Inclusion(m) => best_included_row(m, child_idx),
        }
    }
}

/// First row strictly above the running best, seeded at `floor`.
fn best_row<T: PartialOrd + Copy>(matrix: &[Vec<T>], child_idx: usize, floor: T) -> Option<usize> {
    let mut best_value = floor;
    let mut best_idx = None;
    for (row_idx, row) in matrix.iter().enumerate() {
        let value = row[child_idx];
        if value > best_value {
            best_value = value;
            best_idx = Some(row_idx);
        }
    }
    best_idx
}

/// Inclusion rule: only rows at full inclusion are eligible; the most
/// specific (largest word count) wins, earliest row on ties.
fn best_included_row(matrix: &[Vec<(f64, usize)>], child_idx: usize) -> Option<usize> {
    let mut best_word_count = None;
    let mut best_idx = None;
    for (row_idx, row) in matrix.iter().enumerate() {
        let (rate, word_count) = row[child_idx];
        if rate >= 1.0 - FULL_INCLUSION_TOLERANCE && Some(word_count) > best_word_count {
            best_word_count = Some(word_count);
            best_idx = Some(row_idx);
        }
    }
    best_idx
}

/// Create one task per child, resolving its expected switch through the
/// matrix. Children without an accepted score fail with `NoMatchSwitch`.
pub fn select_tasks(context: &ContainerContext, matrix: &ScoreMatrix) -> Vec<AssignTask> {
    context
        .children
        .iter()
        .enumerate()
        .map(|(child_idx, child)| {
            let mut task = AssignTask::new(child.clone());
            match matrix.best_switch(child_idx) {
                Some(switch_idx) => {
                    task.expected_switch = Some(context.switches[switch_idx].clone());
                }
                None => {
                    error!(child = %child.name, "Cannot find match switch for child");
                    task.status = AssignStatus::NoMatchSwitch;
                }
            }
            task
        })
        .collect()
}
