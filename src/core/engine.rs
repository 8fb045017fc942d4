//! Per-Container Pipeline
//!
//! Wires the components into the run order used for every switch container:
//! query context → normalize names → score → select → reconcile, with an
//! optional operator-confirmed overwrite pass afterwards. The run owns
//! everything it produced, so callers can keep finished runs around for a
//! global report.

use crate::config::UserConfig;
use crate::core::context::ContainerContext;
use crate::core::normalize::{NameBook, NameNormalizer};
use crate::core::reconcile::Reconciler;
use crate::core::selector::select_tasks;
use crate::core::strategy::{ScoreMatrix, Strategy};
use crate::core::task::{AssignStatus, AssignTask};
use crate::waapi::{SwitchContainerOps, WwiseObject};
use tracing::info;

/// One switch container's pass through the pipeline.
#[derive(Debug, Clone)]
pub struct ContainerRun {
    /// The queried context the run is based on
    pub context: ContainerContext,
    /// Alias book for every switch and child
    pub names: NameBook,
    /// Score matrix; `None` when the switch group was missing
    pub matrix: Option<ScoreMatrix>,
    /// Per-child tasks (a single container-level task when the switch group
    /// was missing)
    pub tasks: Vec<AssignTask>,
    /// The strategy the matrix was computed with
    pub strategy: Strategy,
    reconciler: Reconciler,
}

impl ContainerRun {
    /// Query the container and run the matching stages, producing tasks
    /// ready for reconciliation.
    ///
    /// A container whose switch group cannot be resolved short-circuits into
    /// a single `SwitchGroupNotSet` task.
    pub fn prepare<C: SwitchContainerOps>(
        client: &mut C,
        container: WwiseObject,
        config: &UserConfig,
        strategy: Strategy,
    ) -> Self {
        info!(container = %container.name, %strategy, "Preparing switch container");
        let context = ContainerContext::query(client, container);
        let reconciler = Reconciler::new(context.assigned.iter().cloned());

        if context.switch_group.is_none() {
            let mut task = AssignTask::new(context.container.clone());
            task.status = AssignStatus::SwitchGroupNotSet;
            return Self {
                context,
                names: NameBook::default(),
                matrix: None,
                tasks: vec![task],
                strategy,
                reconciler,
            };
        }

        let normalizer = NameNormalizer::from_config(config);
        let names = normalizer.alias_objects(&context);
        let words = strategy.word_mappings(&context, &names);
        let matrix = strategy.score_matrix(&context, &words);
        let tasks = select_tasks(&context, &matrix);

        Self {
            context,
            names,
            matrix: Some(matrix),
            tasks,
            strategy,
            reconciler,
        }
    }

    /// First reconciliation pass; conflicts are recorded but not overwritten.
    pub fn reconcile<C: SwitchContainerOps>(&mut self, client: &mut C) -> bool {
        self.reconciler
            .run_all(client, &self.names, &mut self.tasks, false)
    }

    /// Overwrite pass over recorded conflicts; call only after the operator
    /// confirmed.
    pub fn reconcile_overwrite<C: SwitchContainerOps>(&mut self, client: &mut C) -> bool {
        self.reconciler
            .run_all(client, &self.names, &mut self.tasks, true)
    }

    /// Number of tasks currently parked on an unexpected assignment.
    pub fn conflict_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == AssignStatus::AlreadyAssignedUnexpect)
            .count()
    }
}
