//! In-Memory Project Mock
//!
//! A `SwitchContainerOps` implementation over plain vectors, modeling one
//! switch container. Used by the unit and integration tests to drive the
//! pipeline without a running authoring tool; write/delete failures can be
//! forced to exercise the failure branches of the reconciler.

use crate::waapi::objects::{AssignmentEntry, ObjectId, WwiseObject};
use crate::waapi::SwitchContainerOps;

/// In-memory stand-in for the authoring tool, scoped to one container.
#[derive(Debug, Clone, Default)]
pub struct MockProject {
    /// The container's switch group, if set
    pub switch_group: Option<WwiseObject>,
    /// Switches of the group, in order
    pub switches: Vec<WwiseObject>,
    /// Children of the container, in order
    pub children: Vec<WwiseObject>,
    /// Recorded assignments
    pub assignments: Vec<AssignmentEntry>,
    /// Force every write to fail
    pub fail_writes: bool,
    /// Force every delete to fail
    pub fail_deletes: bool,
    /// Number of write round trips performed
    pub write_calls: usize,
    /// Number of delete round trips performed
    pub delete_calls: usize,
}

impl MockProject {
    /// Create an empty mock project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the switch group.
    pub fn with_switch_group(mut self, group: WwiseObject) -> Self {
        self.switch_group = Some(group);
        self
    }

    /// Set the switches.
    pub fn with_switches(mut self, switches: Vec<WwiseObject>) -> Self {
        self.switches = switches;
        self
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<WwiseObject>) -> Self {
        self.children = children;
        self
    }

    /// Record an existing assignment.
    pub fn with_assignment(
        mut self,
        child: impl Into<ObjectId>,
        switch: impl Into<ObjectId>,
    ) -> Self {
        self.assignments.push(AssignmentEntry::new(child, switch));
        self
    }

    /// Whether an assignment between the given pair is currently recorded.
    pub fn has_assignment(&self, child: &ObjectId, switch: &ObjectId) -> bool {
        self.assignments
            .iter()
            .any(|e| &e.child == child && &e.state_or_switch == switch)
    }
}

impl SwitchContainerOps for MockProject {
    fn resolve_switch_group(&mut self, _container: &WwiseObject) -> Option<WwiseObject> {
        self.switch_group.clone()
    }

    fn list_children(&mut self, _container: &WwiseObject) -> Vec<WwiseObject> {
        self.children.clone()
    }

    fn list_switches(&mut self, _switch_group: &WwiseObject) -> Vec<WwiseObject> {
        self.switches.clone()
    }

    fn existing_assignments(&mut self, _container: &WwiseObject) -> Vec<AssignmentEntry> {
        self.assignments.clone()
    }

    fn write_assignment(&mut self, child: &ObjectId, switch: &ObjectId) -> bool {
        self.write_calls += 1;
        if self.fail_writes {
            return false;
        }
        self.assignments
            .push(AssignmentEntry::new(child.clone(), switch.clone()));
        true
    }

    fn delete_assignment(&mut self, child: &ObjectId, switch: &ObjectId) -> bool {
        self.delete_calls += 1;
        if self.fail_deletes {
            return false;
        }
        let before = self.assignments.len();
        self.assignments
            .retain(|e| !(&e.child == child && &e.state_or_switch == switch));
        self.assignments.len() < before
    }
}
