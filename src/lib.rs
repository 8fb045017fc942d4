//! swassign - Switch Container Auto-Assignment
//!
//! Automates assignment of switch container children to the matching switch
//! value in a Wwise project, by comparing object names:
//!
//! - **Three scoring strategies**: frequency-weighted word overlap (tf-idf),
//!   edit distance, and strict word inclusion
//! - **Deterministic selection**: one best switch per child with
//!   strategy-specific floors and tie-breaks
//! - **Safe reconciliation**: existing assignments are respected; conflicts
//!   are surfaced and only overwritten after explicit confirmation
//!
//! # Quick Start
//!
//! ```rust
//! use swassign::config::UserConfig;
//! use swassign::core::{ContainerRun, Strategy};
//! use swassign::waapi::{MockProject, ObjectKind, WwiseObject};
//!
//! let mut project = MockProject::new()
//!     .with_switch_group(WwiseObject::new("g", "Surface", ObjectKind::SwitchGroup))
//!     .with_switches(vec![WwiseObject::new("s1", "Grass", ObjectKind::Switch)])
//!     .with_children(vec![WwiseObject::new("c1", "Footsteps_Grass", ObjectKind::Unknown)]);
//!
//! let container = WwiseObject::new("sc", "Footsteps", ObjectKind::SwitchContainer);
//! let mut run = ContainerRun::prepare(
//!     &mut project,
//!     container,
//!     &UserConfig::default(),
//!     Strategy::Inclusion,
//! );
//! assert!(run.reconcile(&mut project));
//! ```

pub mod config;
pub mod core;
pub mod report;
pub mod waapi;

// Re-export commonly used items at crate root
pub use config::UserConfig;
pub use core::{AssignStatus, AssignTask, ContainerRun, Strategy};
pub use report::{ConsoleReporter, Reporter};
pub use waapi::{MockProject, SwitchContainerOps, WaapiClient, WwiseObject};
