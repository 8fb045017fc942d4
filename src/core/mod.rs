//! Matching and Reconciliation Core
//!
//! The pipeline that turns one switch container into assignment outcomes:
//!
//! ```text
//! ContainerContext → NameNormalizer → Strategy → select_tasks → Reconciler
//! ```
//!
//! Everything here is synchronous and deterministic; the only talking to the
//! outside world happens through the `waapi::SwitchContainerOps` trait.

pub mod context;
pub mod engine;
pub mod normalize;
pub mod reconcile;
pub mod selector;
pub mod strategy;
pub mod task;
pub mod tfidf;
pub mod words;

pub use context::ContainerContext;
pub use engine::ContainerRun;
pub use normalize::{tokenize, NameBook, NameNormalizer};
pub use reconcile::Reconciler;
pub use selector::select_tasks;
pub use strategy::{
    inclusion_rate, levenshtein_distance, ScoreMatrix, Strategy, WordMappings,
    FULL_INCLUSION_TOLERANCE, LEVENSHTEIN_MIN_SCORE, TFIDF_MIN_SCORE,
};
pub use task::{count_by_status, order_for_report, AssignStatus, AssignTask};
pub use tfidf::TermWeightIndex;
pub use words::WordFrequencyIndex;
