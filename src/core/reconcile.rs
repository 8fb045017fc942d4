//! Assignment Reconciliation
//!
//! Executes assignment tasks against the assignments already recorded on the
//! authoring side. The reconciler owns the per-run child↔switch maps as
//! explicit state, so the state machine is testable without a live client.
//!
//! # Protocol
//!
//! - A pending task whose child is unassigned gets a single write attempt.
//! - A matching existing assignment is an idempotent no-op.
//! - A conflicting existing assignment is recorded and left untouched until
//!   an overwrite pass is explicitly requested; the overwrite deletes the
//!   occupying assignment first and aborts the task if that delete fails,
//!   so a half-applied overwrite never reads as success.
//! - Re-invocation skips tasks already in a terminal state (other than the
//!   conflict state during an overwrite pass).
//! - The full pass never stops early; its result is the AND of the
//!   individual outcomes.

use crate::core::normalize::NameBook;
use crate::core::task::{AssignStatus, AssignTask};
use crate::waapi::{ObjectId, SwitchContainerOps, WwiseObject};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Per-run reconciliation state: both directions of the existing mapping.
///
/// The mapping is a bijection over assigned children; entries that would
/// break it are dropped at construction and the maps are kept in lockstep on
/// every write and delete.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    child_to_switch: HashMap<ObjectId, WwiseObject>,
    switch_to_child: HashMap<ObjectId, WwiseObject>,
}

impl Reconciler {
    /// Build the maps from resolved `(child, switch)` pairs.
    pub fn new(assigned: impl IntoIterator<Item = (WwiseObject, WwiseObject)>) -> Self {
        let mut reconciler = Self::default();
        for (child, switch) in assigned {
            if reconciler.child_to_switch.contains_key(&child.id) {
                warn!(child = %child.name, "Child assigned twice in existing data; keeping first");
                continue;
            }
            if reconciler.switch_to_child.contains_key(&switch.id) {
                warn!(switch = %switch.name, "Switch assigned twice in existing data; keeping first");
                continue;
            }
            reconciler
                .child_to_switch
                .insert(child.id.clone(), switch.clone());
            reconciler.switch_to_child.insert(switch.id, child);
        }
        reconciler
    }

    /// The switch currently assigned to a child, if any.
    pub fn assigned_switch(&self, child: &WwiseObject) -> Option<&WwiseObject> {
        self.child_to_switch.get(&child.id)
    }

    /// Run every task once; never stops early.
    ///
    /// Returns the AND of the individual outcomes. Skipped tasks (already in
    /// a terminal state) count as successful outcomes, so a re-run over a
    /// fully processed set is `true` without performing any round trip.
    pub fn run_all<C: SwitchContainerOps>(
        &mut self,
        client: &mut C,
        names: &NameBook,
        tasks: &mut [AssignTask],
        overwrite_unexpected: bool,
    ) -> bool {
        let mut success = true;
        for task in tasks.iter_mut() {
            if !self.run_task(client, names, task, overwrite_unexpected) {
                success = false;
            }
        }
        success
    }

    /// Drive one task through the state machine; `true` on a successful (or
    /// skipped) outcome.
    pub fn run_task<C: SwitchContainerOps>(
        &mut self,
        client: &mut C,
        names: &NameBook,
        task: &mut AssignTask,
        overwrite_unexpected: bool,
    ) -> bool {
        if task.status != AssignStatus::Pending
            && !(overwrite_unexpected && task.status == AssignStatus::AlreadyAssignedUnexpect)
        {
            // Terminal already; re-runs leave it untouched.
            return true;
        }

        let child = task.subject.clone();
        let Some(expected) = task.expected_switch.clone() else {
            error!(child = %child.name, "Task has no expected switch");
            task.status = AssignStatus::NoMatchSwitch;
            return false;
        };

        if task.status == AssignStatus::Pending {
            if let Some(assigned) = self.assigned_switch(&child).cloned() {
                if assigned == expected {
                    task.status = AssignStatus::AlreadyAssignedExpected;
                    debug!(
                        child = %child.name,
                        switch = %names.display(&expected),
                        "Child already assigned to expected switch"
                    );
                    return true;
                }
                task.status = AssignStatus::AlreadyAssignedUnexpect;
                task.unexpected_switch = Some(assigned.clone());
                if !overwrite_unexpected {
                    error!(
                        child = %child.name,
                        assigned = %names.display(&assigned),
                        expected = %names.display(&expected),
                        "Child already assigned to unexpected switch"
                    );
                    return false;
                }
            }
        }

        if overwrite_unexpected && task.status == AssignStatus::AlreadyAssignedUnexpect {
            let Some(unexpected) = task.unexpected_switch.clone() else {
                error!(child = %child.name, "Conflicted task lost its unexpected switch");
                return false;
            };
            if client.delete_assignment(&child.id, &unexpected.id) {
                self.child_to_switch.remove(&child.id);
                self.switch_to_child.remove(&unexpected.id);
                debug!(
                    child = %names.display(&child),
                    switch = %names.display(&unexpected),
                    "Removed unexpected assignment"
                );
            } else {
                // Leave the conflict in place; never write after a failed
                // delete, a half-applied overwrite must not look done.
                error!(
                    child = %names.display(&child),
                    switch = %names.display(&unexpected),
                    "Failed to remove unexpected assignment"
                );
                return false;
            }
        }

        if client.write_assignment(&child.id, &expected.id) {
            self.child_to_switch
                .insert(child.id.clone(), expected.clone());
            self.switch_to_child.insert(expected.id.clone(), child.clone());
            debug!(
                child = %names.display(&child),
                switch = %names.display(&expected),
                "Assigned child to switch"
            );
            task.status = AssignStatus::Assigned;
            return true;
        }

        task.status = AssignStatus::AssignFailed;
        error!(
            child = %names.display(&child),
            switch = %names.display(&expected),
            "Failed to assign child to switch"
        );
        false
    }
}
