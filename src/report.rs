//! Run Reporting
//!
//! Two output channels are kept apart: the detailed diagnostic stream goes
//! through `tracing`, while the concise user-facing result stream goes
//! through the `Reporter` trait below. The console implementation colors by
//! severity; the buffered one backs the tests.

use crate::core::engine::ContainerRun;
use crate::core::normalize::NameBook;
use crate::core::strategy::ScoreMatrix;
use crate::core::task::{count_by_status, AssignStatus, AssignTask};
use crate::waapi::WwiseObject;
use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Severity of a user-facing result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    /// Normal outcome
    Result,
    /// Needs operator attention
    Warning,
    /// Failed outcome
    Failure,
}

/// User-facing result stream.
pub trait Reporter {
    /// Emit one line at a severity.
    fn line(&mut self, level: ReportLevel, message: &str);

    /// Emit a normal result line.
    fn result(&mut self, message: &str) {
        self.line(ReportLevel::Result, message);
    }

    /// Emit a warning line.
    fn warn(&mut self, message: &str) {
        self.line(ReportLevel::Warning, message);
    }

    /// Emit a failure line.
    fn failure(&mut self, message: &str) {
        self.line(ReportLevel::Failure, message);
    }
}

/// Colored stdout reporter used by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn line(&mut self, level: ReportLevel, message: &str) {
        match level {
            ReportLevel::Result => println!("{}", message.cyan()),
            ReportLevel::Warning => println!("{}", message.yellow()),
            ReportLevel::Failure => println!("{}", message.red()),
        }
    }
}

/// Capturing reporter for tests.
#[derive(Debug, Clone, Default)]
pub struct BufferedReporter {
    /// Captured lines in emission order
    pub lines: Vec<(ReportLevel, String)>,
}

impl Reporter for BufferedReporter {
    fn line(&mut self, level: ReportLevel, message: &str) {
        self.lines.push((level, message.to_string()));
    }
}

/// Render the score matrix as a table: switch rows, child columns, object
/// names as headers.
pub fn matrix_text(
    switches: &[WwiseObject],
    children: &[WwiseObject],
    matrix: &ScoreMatrix,
) -> String {
    let mut builder = Builder::default();

    let mut header = vec![String::new()];
    header.extend(children.iter().map(|c| c.name.clone()));
    builder.push_record(header);

    for (switch_idx, switch) in switches.iter().enumerate() {
        let mut row = vec![switch.name.clone()];
        for child_idx in 0..children.len() {
            row.push(matrix.cell_text(switch_idx, child_idx));
        }
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

/// The matrix table of a run, when one was computed.
pub fn run_matrix_text(run: &ContainerRun) -> Option<String> {
    run.matrix
        .as_ref()
        .map(|matrix| matrix_text(&run.context.switches, &run.context.children, matrix))
}

/// Emit one task outcome line.
pub fn report_task<R: Reporter + ?Sized>(reporter: &mut R, names: &NameBook, task: &AssignTask) {
    let subject = names.display(&task.subject);
    if task.status.is_success() {
        reporter.result(&format!(
            "{}: {} -> {}",
            task.status,
            subject,
            task.expected_switch_name()
        ));
    } else if task.status == AssignStatus::AlreadyAssignedUnexpect {
        reporter.failure(&format!(
            "{}: {} -> {} Unexpected assigned: {}",
            task.status,
            subject,
            task.expected_switch_name(),
            task.unexpected_switch_name()
        ));
    } else {
        reporter.failure(&format!("{}: {}", task.status, subject));
    }
}

/// Emit the count-by-status summary over a whole run set.
pub fn report_summary<'a, R, I>(reporter: &mut R, tasks: I)
where
    R: Reporter + ?Sized,
    I: IntoIterator<Item = &'a AssignTask>,
{
    let owned: Vec<AssignTask> = tasks.into_iter().cloned().collect();
    reporter.result("Result summary:");
    for (status, count) in count_by_status(&owned) {
        reporter.result(&format!("{}: {}", status, count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waapi::ObjectKind;

    fn obj(id: &str, name: &str, kind: ObjectKind) -> WwiseObject {
        WwiseObject::new(id, name, kind)
    }

    fn task_with(status: AssignStatus) -> AssignTask {
        let mut task = AssignTask::new(obj("c", "Child", ObjectKind::Unknown));
        task.status = status;
        task.expected_switch = Some(obj("s1", "Grass", ObjectKind::Switch));
        task
    }

    #[test]
    fn test_matrix_text_contains_headers_and_cells() {
        let switches = vec![obj("s1", "Grass", ObjectKind::Switch)];
        let children = vec![
            obj("c1", "Footsteps_Grass", ObjectKind::Unknown),
            obj("c2", "Footsteps_Dirt", ObjectKind::Unknown),
        ];
        let matrix = ScoreMatrix::Levenshtein(vec![vec![-10, -11]]);

        let text = matrix_text(&switches, &children, &matrix);
        assert!(text.contains("Grass"));
        assert!(text.contains("Footsteps_Grass"));
        assert!(text.contains("Footsteps_Dirt"));
        assert!(text.contains("-10"));
        assert!(text.contains("-11"));
    }

    #[test]
    fn test_success_line_goes_to_result_channel() {
        let mut reporter = BufferedReporter::default();
        report_task(
            &mut reporter,
            &NameBook::default(),
            &task_with(AssignStatus::Assigned),
        );
        assert_eq!(
            reporter.lines,
            vec![(ReportLevel::Result, "Assigned: Child -> Grass".to_string())]
        );
    }

    #[test]
    fn test_conflict_line_names_both_switches() {
        let mut reporter = BufferedReporter::default();
        let mut task = task_with(AssignStatus::AlreadyAssignedUnexpect);
        task.unexpected_switch = Some(obj("s2", "Concrete", ObjectKind::Switch));
        report_task(&mut reporter, &NameBook::default(), &task);

        let (level, line) = &reporter.lines[0];
        assert_eq!(*level, ReportLevel::Failure);
        assert_eq!(
            line,
            "AlreadyAssignedUnexpect: Child -> Grass Unexpected assigned: Concrete"
        );
    }

    #[test]
    fn test_plain_failure_line_omits_switch() {
        let mut reporter = BufferedReporter::default();
        report_task(
            &mut reporter,
            &NameBook::default(),
            &task_with(AssignStatus::NoMatchSwitch),
        );
        assert_eq!(
            reporter.lines,
            vec![(ReportLevel::Failure, "NoMatchSwitch: Child".to_string())]
        );
    }

    #[test]
    fn test_summary_lists_every_status() {
        let mut reporter = BufferedReporter::default();
        let tasks = vec![task_with(AssignStatus::Assigned)];
        report_summary(&mut reporter, &tasks);

        // Header plus one line per status.
        assert_eq!(reporter.lines.len(), 1 + AssignStatus::ALL.len());
        assert!(reporter
            .lines
            .iter()
            .any(|(_, l)| l == "Assigned: 1"));
        assert!(reporter
            .lines
            .iter()
            .any(|(_, l)| l == "NoMatchSwitch: 0"));
    }
}
