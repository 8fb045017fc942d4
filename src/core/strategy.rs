//! Scoring Strategies
//!
//! Three interchangeable ways to score a switch against a child by name.
//! The set is closed: new strategies are rare enough that an enum beats an
//! open trait here, and the score matrix mirrors the three variants so each
//! strategy keeps its native score type.
//!
//! - `Tfidf`: frequency-weighted word overlap, symmetric in both directions
//! - `Levenshtein`: negated edit distance over raw lowercase names
//! - `Inclusion`: fraction of the switch's words present in the child's

use crate::core::context::ContainerContext;
use crate::core::normalize::{tokenize, NameBook};
use crate::core::tfidf::TermWeightIndex;
use crate::waapi::ObjectId;
use std::collections::{HashMap, HashSet};

/// Minimum pairwise score a tf-idf match must strictly exceed.
pub const TFIDF_MIN_SCORE: f64 = 1e-6;

/// Acceptance floor of the edit-distance strategy. Scores are negated
/// distances, so any real name pair beats this and the strategy never
/// declares "no match" for a nonempty switch list.
pub const LEVENSHTEIN_MIN_SCORE: i64 = -1_000_000_000;

/// Tolerance under which an inclusion rate counts as full inclusion.
pub const FULL_INCLUSION_TOLERANCE: f64 = 1e-6;

/// Per-object word sequences, keyed by object id.
pub type WordMappings = HashMap<ObjectId, Vec<String>>;

/// The name-matching strategy in use for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Frequency-weighted word overlap (tf-idf)
    Tfidf,
    /// Negated edit distance over raw names
    Levenshtein,
    /// Strict word inclusion of the switch name in the child name
    Inclusion,
}

impl Strategy {
    /// Tokenize every switch and child alias for this strategy.
    ///
    /// The edit-distance strategy works on raw names and gets an empty
    /// mapping.
    pub fn word_mappings(&self, context: &ContainerContext, names: &NameBook) -> WordMappings {
        match self {
            Strategy::Levenshtein => WordMappings::new(),
            Strategy::Tfidf | Strategy::Inclusion => context
                .all_objects()
                .map(|object| (object.id.clone(), tokenize(names.alias(object))))
                .collect(),
        }
    }

    /// Compute the switch × child score matrix for this strategy.
    pub fn score_matrix(
        &self,
        context: &ContainerContext,
        words: &WordMappings,
    ) -> ScoreMatrix {
        match self {
            Strategy::Tfidf => ScoreMatrix::Tfidf(tfidf_matrix(context, words)),
            Strategy::Levenshtein => ScoreMatrix::Levenshtein(levenshtein_matrix(context)),
            Strategy::Inclusion => ScoreMatrix::Inclusion(inclusion_matrix(context, words)),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Tfidf => f.write_str("tfidf"),
            Strategy::Levenshtein => f.write_str("levenshtein"),
            Strategy::Inclusion => f.write_str("inclusion"),
        }
    }
}

/// Switch-indexed, child-indexed score grid, one variant per strategy.
///
/// Indices are positional within one run; the matrix is rebuilt whenever the
/// children or the strategy change, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreMatrix {
    /// Pairwise tf-idf scores
    Tfidf(Vec<Vec<f64>>),
    /// Negated Levenshtein distances
    Levenshtein(Vec<Vec<i64>>),
    /// `(inclusion_rate, switch_word_count)` pairs
    Inclusion(Vec<Vec<(f64, usize)>>),
}

impl ScoreMatrix {
    /// Number of switch rows.
    pub fn switch_count(&self) -> usize {
        match self {
            ScoreMatrix::Tfidf(m) => m.len(),
            ScoreMatrix::Levenshtein(m) => m.len(),
            ScoreMatrix::Inclusion(m) => m.len(),
        }
    }

    /// Number of child columns.
    pub fn child_count(&self) -> usize {
        match self {
            ScoreMatrix::Tfidf(m) => m.first().map_or(0, Vec::len),
            ScoreMatrix::Levenshtein(m) => m.first().map_or(0, Vec::len),
            ScoreMatrix::Inclusion(m) => m.first().map_or(0, Vec::len),
        }
    }

    /// Render one cell for the matrix report.
    pub fn cell_text(&self, switch_idx: usize, child_idx: usize) -> String {
        match self {
            ScoreMatrix::Tfidf(m) => format!("{:.4}", m[switch_idx][child_idx]),
            ScoreMatrix::Levenshtein(m) => m[switch_idx][child_idx].to_string(),
            ScoreMatrix::Inclusion(m) => {
                let (rate, word_count) = m[switch_idx][child_idx];
                format!("({:.2}, {})", rate, word_count)
            }
        }
    }
}

/// Words of an object, empty when the mapping has none.
fn object_words<'a>(words: &'a WordMappings, id: &ObjectId) -> &'a [String] {
    words.get(id).map(Vec::as_slice).unwrap_or(&[])
}

/// Pairwise tf-idf scores: two indices per container (switch corpus and
/// child corpus), each scored in its own direction and summed.
fn tfidf_matrix(context: &ContainerContext, words: &WordMappings) -> Vec<Vec<f64>> {
    let mut switch_index = TermWeightIndex::new();
    for switch in &context.switches {
        switch_index.insert(switch.id.clone(), object_words(words, &switch.id).to_vec());
    }
    switch_index.build();

    let mut child_index = TermWeightIndex::new();
    for child in &context.children {
        child_index.insert(child.id.clone(), object_words(words, &child.id).to_vec());
    }
    child_index.build();

    context
        .switches
        .iter()
        .map(|switch| {
            context
                .children
                .iter()
                .map(|child| {
                    switch_index.similarity(object_words(words, &child.id), &switch.id)
                        + child_index.similarity(object_words(words, &switch.id), &child.id)
                })
                .collect()
        })
        .collect()
}

/// Negated edit distance over lowercase raw names.
fn levenshtein_matrix(context: &ContainerContext) -> Vec<Vec<i64>> {
    context
        .switches
        .iter()
        .map(|switch| {
            context
                .children
                .iter()
                .map(|child| -levenshtein_distance(&switch.name, &child.name))
                .collect()
        })
        .collect()
}

/// Case-insensitive Levenshtein distance between two names.
pub fn levenshtein_distance(a: &str, b: &str) -> i64 {
    strsim::levenshtein(&a.to_lowercase(), &b.to_lowercase()) as i64
}

/// Inclusion-rate matrix over word sets.
fn inclusion_matrix(context: &ContainerContext, words: &WordMappings) -> Vec<Vec<(f64, usize)>> {
    context
        .switches
        .iter()
        .map(|switch| {
            context
                .children
                .iter()
                .map(|child| {
                    inclusion_rate(
                        object_words(words, &switch.id),
                        object_words(words, &child.id),
                    )
                })
                .collect()
        })
        .collect()
}

/// `(|subset ∩ superset| / |subset|, |subset|)` over word *sets*.
///
/// Asymmetric by construction; an empty subset reports `(0.0, 0)`.
pub fn inclusion_rate(subset: &[String], superset: &[String]) -> (f64, usize) {
    let subset_set: HashSet<&str> = subset.iter().map(String::as_str).collect();
    let superset_set: HashSet<&str> = superset.iter().map(String::as_str).collect();
    if subset_set.is_empty() {
        return (0.0, 0);
    }
    let intersection = subset_set.intersection(&superset_set).count();
    (
        intersection as f64 / subset_set.len() as f64,
        subset_set.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::NameNormalizer;
    use crate::waapi::{MockProject, ObjectKind, WwiseObject};

    fn obj(id: &str, name: &str, kind: ObjectKind) -> WwiseObject {
        WwiseObject::new(id, name, kind)
    }

    fn context(switch_names: &[&str], child_names: &[&str]) -> ContainerContext {
        let switches = switch_names
            .iter()
            .enumerate()
            .map(|(i, name)| obj(&format!("s{}", i), name, ObjectKind::Switch))
            .collect();
        let children = child_names
            .iter()
            .enumerate()
            .map(|(i, name)| obj(&format!("c{}", i), name, ObjectKind::Unknown))
            .collect();
        let mut mock = MockProject::new()
            .with_switch_group(obj("g", "Surface", ObjectKind::SwitchGroup))
            .with_switches(switches)
            .with_children(children);
        ContainerContext::query(
            &mut mock,
            obj("sc", "Container", ObjectKind::SwitchContainer),
        )
    }

    fn prepared(strategy: Strategy, ctx: &ContainerContext) -> (WordMappings, ScoreMatrix) {
        let names = NameNormalizer::new(Vec::new()).alias_objects(ctx);
        let words = strategy.word_mappings(ctx, &names);
        let matrix = strategy.score_matrix(ctx, &words);
        (words, matrix)
    }

    // ==========================================
    // Word Mapping Tests
    // ==========================================

    #[test]
    fn test_levenshtein_skips_word_mapping() {
        let ctx = context(&["Grass"], &["Footsteps_Grass"]);
        let (words, _) = prepared(Strategy::Levenshtein, &ctx);
        assert!(words.is_empty());
    }

    #[test]
    fn test_tfidf_maps_all_objects() {
        let ctx = context(&["Grass"], &["Footsteps_Grass"]);
        let (words, _) = prepared(Strategy::Tfidf, &ctx);
        assert_eq!(words.len(), 2);
        assert_eq!(
            words[&ctx.children[0].id],
            vec!["footsteps".to_string(), "grass".to_string()]
        );
    }

    // ==========================================
    // Tf-idf Matrix Tests
    // ==========================================

    #[test]
    fn test_tfidf_prefers_distinctive_words() {
        let ctx = context(
            &["Footsteps_Grass", "Footsteps_Concrete"],
            &["Footsteps_Grass_01", "Footsteps_Concrete_Loud"],
        );
        let (_, matrix) = prepared(Strategy::Tfidf, &ctx);
        let ScoreMatrix::Tfidf(m) = &matrix else {
            panic!("Expected tf-idf matrix");
        };
        // "footsteps" is ubiquitous in both corpora and contributes nothing;
        // the distinctive surface words separate the pairs.
        assert!(m[0][0] > m[0][1], "Grass switch should prefer grass child");
        assert!(m[1][1] > m[1][0]);
        assert!(m[0][0] > TFIDF_MIN_SCORE);
    }

    #[test]
    fn test_tfidf_shared_prefix_only_scores_zero() {
        let ctx = context(&["Footsteps_A", "Footsteps_B"], &["Footsteps"]);
        let (_, matrix) = prepared(Strategy::Tfidf, &ctx);
        let ScoreMatrix::Tfidf(m) = &matrix else {
            panic!("Expected tf-idf matrix");
        };
        // The only overlapping word appears in every switch sequence, so
        // both directions contribute zero.
        assert_eq!(m[0][0], 0.0);
        assert_eq!(m[1][0], 0.0);
    }

    // ==========================================
    // Levenshtein Matrix Tests
    // ==========================================

    #[test]
    fn test_levenshtein_scores_are_negated_distances() {
        let ctx = context(&["Wood"], &["Wood", "Wod"]);
        let (_, matrix) = prepared(Strategy::Levenshtein, &ctx);
        assert_eq!(
            matrix,
            ScoreMatrix::Levenshtein(vec![vec![0, -1]])
        );
    }

    #[test]
    fn test_levenshtein_is_case_insensitive() {
        assert_eq!(levenshtein_distance("WOOD", "wood"), 0);
        assert_eq!(levenshtein_distance("Wood", "Woods"), 1);
    }

    #[test]
    fn test_levenshtein_uses_raw_names_not_aliases() {
        let ctx = context(&["Grass"], &["Grass"]);
        let normalizer = NameNormalizer::new(vec![("Grass".to_string(), "Dirt".to_string())]);
        let names = normalizer.alias_objects(&ctx);
        let words = Strategy::Levenshtein.word_mappings(&ctx, &names);
        let matrix = Strategy::Levenshtein.score_matrix(&ctx, &words);
        // Aliases would make the names differ; raw names are identical.
        assert_eq!(matrix, ScoreMatrix::Levenshtein(vec![vec![0]]));
    }

    // ==========================================
    // Inclusion Tests
    // ==========================================

    #[test]
    fn test_inclusion_rate_full_and_partial() {
        let sub = vec!["footsteps".to_string(), "grass".to_string()];
        let sup = vec![
            "footsteps".to_string(),
            "grass".to_string(),
            "01".to_string(),
        ];
        assert_eq!(inclusion_rate(&sub, &sup), (1.0, 2));
        assert_eq!(inclusion_rate(&sup, &sub), (2.0 / 3.0, 3));
    }

    #[test]
    fn test_inclusion_rate_empty_subset() {
        assert_eq!(inclusion_rate(&[], &["a".to_string()]), (0.0, 0));
    }

    #[test]
    fn test_inclusion_rate_uses_sets() {
        let sub = vec!["grass".to_string(), "grass".to_string()];
        let sup = vec!["grass".to_string()];
        assert_eq!(inclusion_rate(&sub, &sup), (1.0, 1));
    }

    #[test]
    fn test_inclusion_matrix_cells() {
        let ctx = context(&["Footsteps_Grass"], &["Footsteps_Grass_01", "Other"]);
        let (_, matrix) = prepared(Strategy::Inclusion, &ctx);
        let ScoreMatrix::Inclusion(m) = &matrix else {
            panic!("Expected inclusion matrix");
        };
        assert_eq!(m[0][0], (1.0, 2));
        assert_eq!(m[0][1], (0.0, 2));
    }

    // ==========================================
    // Matrix Shape and Rendering Tests
    // ==========================================

    #[test]
    fn test_matrix_dimensions() {
        let ctx = context(&["A", "B", "C"], &["X", "Y"]);
        for strategy in [Strategy::Tfidf, Strategy::Levenshtein, Strategy::Inclusion] {
            let (_, matrix) = prepared(strategy, &ctx);
            assert_eq!(matrix.switch_count(), 3);
            assert_eq!(matrix.child_count(), 2);
        }
    }

    #[test]
    fn test_cell_text_formats() {
        assert_eq!(
            ScoreMatrix::Levenshtein(vec![vec![-3]]).cell_text(0, 0),
            "-3"
        );
        assert_eq!(
            ScoreMatrix::Inclusion(vec![vec![(0.5, 2)]]).cell_text(0, 0),
            "(0.50, 2)"
        );
        assert_eq!(ScoreMatrix::Tfidf(vec![vec![0.25]]).cell_text(0, 0), "0.2500");
    }
}
