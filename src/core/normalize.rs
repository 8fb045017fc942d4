//! Name Normalization
//!
//! Applies user-configured substring replacements to object display names and
//! tokenizes names into lowercase word sequences. The replacement table is
//! order-dependent: substitutions compose left to right, so an earlier
//! replacement's output is visible to later ones.

use crate::config::UserConfig;
use crate::core::context::ContainerContext;
use crate::waapi::{ObjectId, WwiseObject};
use std::collections::HashMap;
use tracing::debug;

/// Split a name into its lowercase word sequence.
///
/// Splits on `'_'` only. Consecutive separators yield empty tokens, which are
/// kept; the scoring strategies see them like any other word.
pub fn tokenize(name: &str) -> Vec<String> {
    name.to_lowercase().split('_').map(str::to_string).collect()
}

/// Applies the configured name replacements and the special-group name cut.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    /// `(needle, replacement)` pairs, applied in order
    replacements: Vec<(String, String)>,
    /// Switch group names whose containers get the parent-name cut
    cut_word_groups: Vec<String>,
}

impl NameNormalizer {
    /// Create a normalizer from explicit replacement pairs.
    pub fn new(replacements: Vec<(String, String)>) -> Self {
        Self {
            replacements,
            cut_word_groups: Vec::new(),
        }
    }

    /// Create a normalizer from the user configuration.
    pub fn from_config(config: &UserConfig) -> Self {
        Self {
            replacements: config
                .object_name_replacement
                .iter()
                .map(|(from, to)| (from.clone(), to.clone()))
                .collect(),
            cut_word_groups: config.special_switch_group_cut_words.clone(),
        }
    }

    /// Alias of a single name after all replacements.
    pub fn alias(&self, name: &str) -> String {
        let mut alias = name.to_string();
        for (from, to) in &self.replacements {
            if alias.contains(from.as_str()) {
                debug!(from = %from, to = %to, name = %alias, "Applying name replacement");
                alias = alias.replace(from.as_str(), to);
            }
        }
        alias
    }

    /// Build the alias book for every switch and child of a container.
    ///
    /// When the container's switch group name is listed in the cut-word
    /// table, each child alias additionally has the container's own name cut
    /// out, so children named `<Container>_<Switch>` match on the switch part
    /// alone.
    pub fn alias_objects(&self, context: &ContainerContext) -> NameBook {
        let mut aliases = HashMap::new();
        for object in context.all_objects() {
            aliases.insert(object.id.clone(), self.alias(&object.name));
        }

        let cut_parent_name = context
            .switch_group
            .as_ref()
            .is_some_and(|group| self.cut_word_groups.iter().any(|name| name == &group.name));
        if cut_parent_name {
            for child in &context.children {
                if let Some(alias) = aliases.get_mut(&child.id) {
                    *alias = alias.replace(context.container.name.as_str(), "");
                }
            }
        }

        NameBook { aliases }
    }
}

/// Alias lookup and display rendering for the objects of one container.
#[derive(Debug, Clone, Default)]
pub struct NameBook {
    aliases: HashMap<ObjectId, String>,
}

impl NameBook {
    /// The alias of an object; its original name when no alias was computed.
    pub fn alias<'a>(&'a self, object: &'a WwiseObject) -> &'a str {
        self.aliases
            .get(&object.id)
            .map(String::as_str)
            .unwrap_or(&object.name)
    }

    /// Display form: `original(alias)` when they differ, else `original`.
    pub fn display(&self, object: &WwiseObject) -> String {
        let alias = self.alias(object);
        if alias == object.name {
            object.name.clone()
        } else {
            format!("{}({})", object.name, alias)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waapi::{MockProject, ObjectKind};

    fn obj(id: &str, name: &str, kind: ObjectKind) -> WwiseObject {
        WwiseObject::new(id, name, kind)
    }

    fn context_for(group_name: &str, children: Vec<WwiseObject>) -> ContainerContext {
        let mut mock = MockProject::new()
            .with_switch_group(obj("g", group_name, ObjectKind::SwitchGroup))
            .with_switches(vec![obj("s1", "Grass", ObjectKind::Switch)])
            .with_children(children);
        ContainerContext::query(
            &mut mock,
            obj("sc", "Footsteps", ObjectKind::SwitchContainer),
        )
    }

    // ==========================================
    // Tokenization Tests
    // ==========================================

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("Footsteps_Grass_01"), vec!["footsteps", "grass", "01"]);
    }

    #[test]
    fn test_tokenize_keeps_empty_tokens() {
        assert_eq!(tokenize("a__b"), vec!["a", "", "b"]);
        assert_eq!(tokenize("_a"), vec!["", "a"]);
    }

    #[test]
    fn test_tokenize_name_without_separator() {
        assert_eq!(tokenize("Wood"), vec!["wood"]);
    }

    // ==========================================
    // Replacement Tests
    // ==========================================

    #[test]
    fn test_replacements_apply_in_order() {
        let normalizer = NameNormalizer::new(vec![
            ("Foot".to_string(), "Hand".to_string()),
            ("Handsteps".to_string(), "Claps".to_string()),
        ]);
        // First replacement's output feeds the second.
        assert_eq!(normalizer.alias("Footsteps"), "Claps");
    }

    #[test]
    fn test_replacement_replaces_every_occurrence() {
        let normalizer = NameNormalizer::new(vec![("a".to_string(), "o".to_string())]);
        assert_eq!(normalizer.alias("banana"), "bonono");
    }

    #[test]
    fn test_alias_unchanged_without_match() {
        let normalizer = NameNormalizer::new(vec![("xyz".to_string(), "q".to_string())]);
        assert_eq!(normalizer.alias("Footsteps"), "Footsteps");
    }

    // ==========================================
    // NameBook Tests
    // ==========================================

    #[test]
    fn test_display_renders_alias_when_different() {
        let normalizer = NameNormalizer::new(vec![("Ftstps".to_string(), "Footsteps".to_string())]);
        let ctx = context_for("Surface", vec![obj("c1", "Ftstps_Grass", ObjectKind::Unknown)]);
        let book = normalizer.alias_objects(&ctx);

        let child = &ctx.children[0];
        assert_eq!(book.alias(child), "Footsteps_Grass");
        assert_eq!(book.display(child), "Ftstps_Grass(Footsteps_Grass)");
    }

    #[test]
    fn test_display_plain_when_alias_matches() {
        let normalizer = NameNormalizer::new(Vec::new());
        let ctx = context_for("Surface", vec![obj("c1", "Footsteps_Grass", ObjectKind::Unknown)]);
        let book = normalizer.alias_objects(&ctx);
        assert_eq!(book.display(&ctx.children[0]), "Footsteps_Grass");
    }

    #[test]
    fn test_unmapped_object_falls_back_to_name() {
        let book = NameBook::default();
        let stranger = obj("x", "Stranger", ObjectKind::Unknown);
        assert_eq!(book.alias(&stranger), "Stranger");
        assert_eq!(book.display(&stranger), "Stranger");
    }

    // ==========================================
    // Cut-Word Tests
    // ==========================================

    #[test]
    fn test_cut_words_strip_parent_name_from_children() {
        let mut normalizer = NameNormalizer::new(Vec::new());
        normalizer.cut_word_groups = vec!["Surface".to_string()];
        let ctx = context_for("Surface", vec![obj("c1", "Footsteps_Grass", ObjectKind::Unknown)]);
        let book = normalizer.alias_objects(&ctx);
        // Container is named "Footsteps"; the child keeps only "_Grass".
        assert_eq!(book.alias(&ctx.children[0]), "_Grass");
    }

    #[test]
    fn test_cut_words_ignore_other_groups() {
        let mut normalizer = NameNormalizer::new(Vec::new());
        normalizer.cut_word_groups = vec!["Weapon".to_string()];
        let ctx = context_for("Surface", vec![obj("c1", "Footsteps_Grass", ObjectKind::Unknown)]);
        let book = normalizer.alias_objects(&ctx);
        assert_eq!(book.alias(&ctx.children[0]), "Footsteps_Grass");
    }

    #[test]
    fn test_cut_words_leave_switches_alone() {
        let mut normalizer = NameNormalizer::new(Vec::new());
        normalizer.cut_word_groups = vec!["Surface".to_string()];
        let mut mock = MockProject::new()
            .with_switch_group(obj("g", "Surface", ObjectKind::SwitchGroup))
            .with_switches(vec![obj("s1", "Footsteps_Grass", ObjectKind::Switch)])
            .with_children(vec![obj("c1", "Footsteps_Grass_01", ObjectKind::Unknown)]);
        let container = obj("sc", "Footsteps", ObjectKind::SwitchContainer);
        let ctx = ContainerContext::query(&mut mock, container);
        let book = normalizer.alias_objects(&ctx);
        assert_eq!(book.alias(&ctx.switches[0]), "Footsteps_Grass");
        assert_eq!(book.alias(&ctx.children[0]), "_Grass_01");
    }
}
