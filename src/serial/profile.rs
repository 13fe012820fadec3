use std::collections::HashMap;

use serde_json::Value;

use crate::models::EntityKind;
use crate::serial::RefStrategy;

/// Binds one reference field of an entity kind to an encoding strategy.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    /// The entity kind the field points at.
    pub target: EntityKind,
    pub strategy: RefStrategy,
}

/// A serialization profile: per entity kind, the strategy used for each of
/// its reference fields.
///
/// Profiles are configuration, not code baked into the entities — the same
/// reference field uses different strategies depending on whether the
/// serialization is bound for storage or for external output, and output
/// rules have evolved through several generations that stay selectable side
/// by side (see [`OutputGeneration`]).
#[derive(Debug, Clone)]
pub struct Profile {
    rules: HashMap<EntityKind, Vec<FieldRule>>,
    /// Top-level fields removed from every projected document. Output
    /// profiles strip store-internal bookkeeping here.
    strip: &'static [&'static str],
}

/// Successive generations of the external-output rules.
///
/// Old generations remain selectable so consumers can migrate on their own
/// schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputGeneration {
    /// Referenced entities nested whole.
    Nested,
    /// Bare `{ id }` stubs everywhere.
    IdStubs,
    /// `{ id, uuid }` for author references only, `{ id }` elsewhere.
    AuthorUuid,
    /// `{ id, uuid }` wherever the target kind carries a secondary key.
    SecondaryKeys,
}

impl OutputGeneration {
    pub fn latest() -> Self {
        OutputGeneration::SecondaryKeys
    }
}

impl Profile {
    /// The storage-bound profile: normalized and compact. Entity-to-entity
    /// references become cross-collection pointers; sub-entity lists shrink
    /// to id stubs so nothing is denormalized at rest.
    pub fn storage() -> Self {
        let rules = [
            (
                EntityKind::Resource,
                vec![
                    rule("author", EntityKind::Author, RefStrategy::ForeignKeyRef),
                    rule("category", EntityKind::Category, RefStrategy::ForeignKeyRef),
                    rule("version", EntityKind::ResourceVersion, RefStrategy::IdOnly),
                    rule("updates", EntityKind::ResourceUpdate, RefStrategy::IdOnly),
                    rule("reviews", EntityKind::ResourceReview, RefStrategy::IdOnly),
                ],
            ),
            (
                EntityKind::ResourceReview,
                vec![rule("author", EntityKind::Author, RefStrategy::ForeignKeyRef)],
            ),
        ]
        .into_iter()
        .collect();

        Self { rules, strip: &[] }
    }

    /// The current external-output profile.
    pub fn output() -> Self {
        Self::output_generation(OutputGeneration::latest())
    }

    /// An external-output profile of a specific generation.
    pub fn output_generation(generation: OutputGeneration) -> Self {
        let author_strategy = match generation {
            OutputGeneration::Nested => RefStrategy::Full,
            OutputGeneration::IdStubs => RefStrategy::IdOnly,
            OutputGeneration::AuthorUuid | OutputGeneration::SecondaryKeys => {
                RefStrategy::IdAndSecondaryKey
            }
        };
        let other_strategy = match generation {
            OutputGeneration::Nested => RefStrategy::Full,
            // SecondaryKeys broadens uuid emission to every capable target;
            // the strategy itself degrades to id-only for the rest.
            OutputGeneration::SecondaryKeys => RefStrategy::IdAndSecondaryKey,
            _ => RefStrategy::IdOnly,
        };

        let rules = [
            (
                EntityKind::Resource,
                vec![
                    rule("author", EntityKind::Author, author_strategy),
                    rule("category", EntityKind::Category, other_strategy),
                    rule("version", EntityKind::ResourceVersion, other_strategy),
                    rule("updates", EntityKind::ResourceUpdate, other_strategy),
                    rule("reviews", EntityKind::ResourceReview, other_strategy),
                ],
            ),
            (
                EntityKind::ResourceReview,
                vec![rule("author", EntityKind::Author, author_strategy)],
            ),
        ]
        .into_iter()
        .collect();

        Self {
            rules,
            strip: &["fetch"],
        }
    }

    /// Project a serialized entity of `kind` into this profile's shape.
    ///
    /// Reference fields are replaced per rule — element-wise over sequences,
    /// preserving order — and scalar fields pass through untouched. Kinds
    /// without rules project to themselves (minus stripped fields).
    pub fn project(&self, kind: EntityKind, mut value: Value) -> Value {
        let Some(object) = value.as_object_mut() else {
            return value;
        };

        for field in self.strip {
            object.remove(*field);
        }

        let Some(rules) = self.rules.get(&kind) else {
            return value;
        };

        for rule in rules {
            let Some(current) = object.get(rule.field) else {
                continue;
            };
            let replaced = match current {
                Value::Array(elements) => Value::Array(
                    elements
                        .iter()
                        .map(|element| rule.strategy.encode(rule.target, element, self))
                        .collect(),
                ),
                Value::Null => Value::Null,
                other => rule.strategy.encode(rule.target, other, self),
            };
            object.insert(rule.field.to_string(), replaced);
        }

        value
    }
}

fn rule(field: &'static str, target: EntityKind, strategy: RefStrategy) -> FieldRule {
    FieldRule {
        field,
        target,
        strategy,
    }
}
