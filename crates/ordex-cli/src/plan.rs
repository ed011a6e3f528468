//! Sort plan assembly from command-line arguments and files.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ordex_core::{EntityDef, OrderSpec, OrderingConfig, Query, SortDirection};
use serde_json::Value as Json;
use tracing::{debug, info};

/// Parse a `--by` argument of the form `PATH` or `PATH:DIRECTION`.
///
/// The direction is split off at the last `:` and must be one of `asc`,
/// `ascending`, `desc` or `descending`. A path containing `:` therefore needs
/// an explicit direction, as in `ns:key:asc`.
pub fn parse_key(arg: &str) -> Result<OrderSpec> {
    let (path, direction) = match arg.rsplit_once(':') {
        Some((path, keyword)) => {
            let direction = parse_direction(keyword)
                .with_context(|| format!("invalid sort key '{}'", arg))?;
            (path, direction)
        }
        None => (arg, SortDirection::Asc),
    };
    if path.trim().is_empty() {
        bail!("sort key '{}' has an empty path", arg);
    }
    Ok(OrderSpec {
        path: path.to_string(),
        direction,
    })
}

fn parse_direction(keyword: &str) -> Result<SortDirection> {
    match keyword.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(SortDirection::Asc),
        "desc" | "descending" => Ok(SortDirection::Desc),
        _ => bail!(
            "unknown direction '{}', expected asc, ascending, desc or descending",
            keyword
        ),
    }
}

/// Load a JSON array of order specs.
pub fn load_specs(path: &Path) -> Result<Vec<OrderSpec>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid spec file {}", path.display()))
}

/// Load an ordering configuration file.
pub fn load_config(path: &Path) -> Result<OrderingConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Parse the input document array.
pub fn parse_documents(content: &str) -> Result<Vec<Json>> {
    match serde_json::from_str(content).context("input is not valid JSON")? {
        Json::Array(docs) => Ok(docs),
        _ => bail!("input must be a JSON array of objects"),
    }
}

/// Order documents by the given specs.
///
/// Returns the inferred entity definition alongside the ordered documents.
pub fn sort_documents(
    docs: Vec<Json>,
    entity: &str,
    specs: &[OrderSpec],
    config: OrderingConfig,
) -> Result<(EntityDef, Vec<Json>)> {
    let definition = EntityDef::infer_from_json(entity, &docs)?;
    debug!(
        entity,
        fields = definition.fields.len(),
        "Inferred entity definition"
    );

    if specs.is_empty() {
        return Ok((definition, docs));
    }

    let count = docs.len();
    let sorted = Query::with_entity(docs, definition.clone())
        .with_config(config)
        .order_by_specs(specs)?
        .collect()?;

    info!(rows = count, keys = specs.len(), "Sorted documents");
    Ok((definition, sorted))
}
