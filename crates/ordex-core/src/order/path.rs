//! Field path resolution.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::key::KeyKind;
use crate::catalog::{EntityDef, FieldType};
use crate::config::{OrderingConfig, DEFAULT_MAX_PATH_DEPTH};
use crate::error::{Error, Result};

/// A dotted field path validated against an entity definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPath {
    entity: String,
    segments: Vec<String>,
    terminal: FieldType,
}

impl FieldPath {
    /// Name of the root entity the path was resolved against.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Declared type of the last segment.
    pub fn terminal_type(&self) -> &FieldType {
        &self.terminal
    }

    /// Comparison strategy for values this path yields.
    pub fn key_kind(&self) -> KeyKind {
        KeyKind::for_field_type(&self.terminal)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Resolves dotted path strings against entity metadata.
///
/// Nothing is cached; each call walks the metadata again.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    max_depth: usize,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }
}

impl PathResolver {
    /// Create a resolver with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver honouring a configuration.
    pub fn with_config(config: &OrderingConfig) -> Self {
        Self {
            max_depth: config.max_path_depth,
        }
    }

    /// Resolve `path` against `entity`.
    ///
    /// Each segment must exactly name a field of the entity reached by the
    /// previous segment. Only embedded (or optional embedded) fields can be
    /// walked through.
    pub fn resolve(&self, entity: &EntityDef, path: &str) -> Result<FieldPath> {
        if path.trim().is_empty() {
            return Err(Error::invalid("field path must not be empty"));
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::invalid(format!(
                "field path '{}' contains an empty segment",
                path
            )));
        }
        if segments.len() > self.max_depth {
            return Err(Error::invalid(format!(
                "field path '{}' has {} segments, limit is {}",
                path,
                segments.len(),
                self.max_depth
            )));
        }

        let mut nested: Option<Arc<EntityDef>> = None;
        let mut terminal = None;
        for (i, segment) in segments.iter().enumerate() {
            let owner: &EntityDef = nested.as_deref().unwrap_or(entity);
            let field = owner
                .get_field(segment)
                .ok_or_else(|| Error::FieldNotFound {
                    segment: segment.clone(),
                    entity: owner.name.clone(),
                })?;

            match segments.get(i + 1) {
                Some(next) => {
                    let embedded = field.field_type.embedded_entity().ok_or_else(|| {
                        Error::FieldNotFound {
                            segment: next.clone(),
                            entity: field.field_type.type_name(),
                        }
                    })?;
                    nested = Some(embedded.load());
                }
                None => terminal = Some(field.field_type.clone()),
            }
        }

        let terminal = terminal.ok_or_else(|| Error::invalid("field path has no segments"))?;
        debug!(
            entity = %entity.name,
            path,
            terminal = %terminal.type_name(),
            "Resolved field path"
        );

        Ok(FieldPath {
            entity: entity.name.clone(),
            segments,
            terminal,
        })
    }
}
