//! Assignment Tasks
//!
//! One task per child object carries the outcome of a run through a small
//! state machine. Statuses are totally ordered so outcome lists sort with
//! successes first and the summary covers every status.

use crate::waapi::WwiseObject;
use std::fmt;

/// Outcome status of an assignment task.
///
/// Declaration order is the reporting order, ascending: failures before
/// successes, with "already assigned as expected" ranking above a freshly
/// performed assignment. `Ord` derives from this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssignStatus {
    /// Not yet processed by the reconciler
    Pending,
    /// The write against the authoring tool failed
    AssignFailed,
    /// The container's switch group could not be resolved
    SwitchGroupNotSet,
    /// No switch scored above the strategy's acceptance floor
    NoMatchSwitch,
    /// An existing assignment disagrees with the computed expectation
    AlreadyAssignedUnexpect,
    /// A new assignment was written
    Assigned,
    /// The expected assignment already existed; nothing was written
    AlreadyAssignedExpected,
}

impl AssignStatus {
    /// Every status, in reporting (ascending) order.
    pub const ALL: [AssignStatus; 7] = [
        AssignStatus::Pending,
        AssignStatus::AssignFailed,
        AssignStatus::SwitchGroupNotSet,
        AssignStatus::NoMatchSwitch,
        AssignStatus::AlreadyAssignedUnexpect,
        AssignStatus::Assigned,
        AssignStatus::AlreadyAssignedExpected,
    ];

    /// Whether this status counts as a successful outcome.
    pub fn is_success(self) -> bool {
        self >= AssignStatus::Assigned
    }
}

impl fmt::Display for AssignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssignStatus::Pending => "Pending",
            AssignStatus::AssignFailed => "AssignFailed",
            AssignStatus::SwitchGroupNotSet => "SwitchGroupNotSet",
            AssignStatus::NoMatchSwitch => "NoMatchSwitch",
            AssignStatus::AlreadyAssignedUnexpect => "AlreadyAssignedUnexpect",
            AssignStatus::Assigned => "Assigned",
            AssignStatus::AlreadyAssignedExpected => "AlreadyAssignedExpected",
        };
        f.write_str(name)
    }
}

/// Per-child unit of work, created once per child per run.
///
/// The subject is the child object, except for `SwitchGroupNotSet` where the
/// container itself carries the failure.
#[derive(Debug, Clone)]
pub struct AssignTask {
    /// The object this task is about
    pub subject: WwiseObject,
    /// Current status
    pub status: AssignStatus,
    /// The switch this run expects to assign
    pub expected_switch: Option<WwiseObject>,
    /// The switch occupying an unexpected prior assignment
    pub unexpected_switch: Option<WwiseObject>,
}

impl AssignTask {
    /// Create a pending task for a subject.
    pub fn new(subject: WwiseObject) -> Self {
        Self {
            subject,
            status: AssignStatus::Pending,
            expected_switch: None,
            unexpected_switch: None,
        }
    }

    /// Name of the expected switch, empty when none was computed.
    pub fn expected_switch_name(&self) -> &str {
        self.expected_switch
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("")
    }

    /// Name of the unexpected occupying switch, empty when none was found.
    pub fn unexpected_switch_name(&self) -> &str {
        self.unexpected_switch
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("")
    }
}

/// Count tasks per status, covering every status in reporting order.
pub fn count_by_status(tasks: &[AssignTask]) -> Vec<(AssignStatus, usize)> {
    AssignStatus::ALL
        .iter()
        .map(|&status| {
            let count = tasks.iter().filter(|t| t.status == status).count();
            (status, count)
        })
        .collect()
}

/// Tasks in reporting order: best statuses first.
pub fn order_for_report(tasks: &[AssignTask]) -> Vec<&AssignTask> {
    let mut ordered: Vec<&AssignTask> = tasks.iter().collect();
    ordered.sort_by(|a, b| b.status.cmp(&a.status));
    ordered
}
