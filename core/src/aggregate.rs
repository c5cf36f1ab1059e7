#![deny(missing_docs)]

//! # Aggregation
//!
//! Merges independently authored path groups into one `ApiDocument` and checks
//! global consistency in a single pass:
//! - Definition names must be unique (identical re-declarations are tolerated).
//! - A path template may bind each verb only once across all groups.
//! - Operations must not repeat a status code.
//! - Every reference from parameters, responses, and definitions must resolve.
//! - Definitions must not reference each other in a loop.
//!
//! Every problem found is returned; nothing short-circuits.

use crate::document::ApiDocument;
use crate::dsl::{HttpMethod, Info, Path};
use crate::error::{ReferenceSite, ValidationError};
use crate::group::PathGroup;
use crate::schema::SchemaDefinition;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Merges `groups` into a validated document, or returns every problem found.
///
/// Paths keep group order, then in-group order. Definitions are keyed by name in
/// first-declaration order. The error list is ordered as: duplicate definitions,
/// then per path (duplicate verbs, repeated status codes, dangling parameter and
/// response references), then dangling references inside definitions, then cycles.
pub fn aggregate(info: Info, groups: &[PathGroup]) -> Result<ApiDocument, Vec<ValidationError>> {
    debug!(groups = groups.len(), "Aggregating path groups.");
    let mut errors = Vec::new();

    let (definitions, rejected) = merge_definitions(groups, &mut errors);
    let paths: Vec<Path> = groups
        .iter()
        .flat_map(|group| group.paths().iter().cloned())
        .collect();

    let mut missing = MissingReferences::new(&definitions);
    check_paths(&paths, &mut missing, &mut errors);
    check_definition_references(definitions.values().chain(&rejected), &mut missing, &mut errors);
    check_cycles(&definitions, &mut errors);

    if !errors.is_empty() {
        warn!(errors = errors.len(), "Aggregation rejected path groups.");
        return Err(errors);
    }

    info!(
        paths = paths.len(),
        definitions = definitions.len(),
        "Aggregated API document."
    );
    Ok(ApiDocument {
        info,
        definitions,
        paths,
    })
}

/// Keeps the first declaration of every name. Conflicting re-declarations are
/// returned separately so their references are still checked.
fn merge_definitions(
    groups: &[PathGroup],
    errors: &mut Vec<ValidationError>,
) -> (IndexMap<String, SchemaDefinition>, Vec<SchemaDefinition>) {
    let mut merged: IndexMap<String, SchemaDefinition> = IndexMap::new();
    let mut rejected: Vec<SchemaDefinition> = Vec::new();
    let mut sites: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut conflicts: IndexSet<String> = IndexSet::new();

    for group in groups {
        for def in group.definitions() {
            sites
                .entry(def.name.clone())
                .or_default()
                .push(group.name().to_string());

            match merged.get(&def.name) {
                None => {
                    merged.insert(def.name.clone(), def.clone());
                }
                Some(existing) if existing == def => {
                    debug!(
                        name = %def.name,
                        group = group.name(),
                        "Identical definition re-declared, keeping first."
                    );
                }
                Some(_) => {
                    conflicts.insert(def.name.clone());
                    if !rejected.contains(def) {
                        rejected.push(def.clone());
                    }
                }
            }
        }
    }

    for name in conflicts {
        let declared_by = sites.get(&name).cloned().unwrap_or_default();
        errors.push(ValidationError::DuplicateDefinition {
            name,
            sites: declared_by,
        });
    }

    (merged, rejected)
}

/// Records dangling references, once per `(name, site)` pair.
struct MissingReferences<'a> {
    definitions: &'a IndexMap<String, SchemaDefinition>,
    reported: HashSet<(String, ReferenceSite)>,
}

impl<'a> MissingReferences<'a> {
    fn new(definitions: &'a IndexMap<String, SchemaDefinition>) -> Self {
        Self {
            definitions,
            reported: HashSet::new(),
        }
    }

    fn check(&mut self, name: &str, site: ReferenceSite, errors: &mut Vec<ValidationError>) {
        if self.definitions.contains_key(name) {
            return;
        }
        if self.reported.insert((name.to_string(), site.clone())) {
            errors.push(ValidationError::MissingDefinition {
                name: name.to_string(),
                site,
            });
        }
    }
}

fn check_paths(
    paths: &[Path],
    missing: &mut MissingReferences<'_>,
    errors: &mut Vec<ValidationError>,
) {
    let mut bound: HashSet<(&str, HttpMethod)> = HashSet::new();
    let mut reported: HashSet<(&str, HttpMethod)> = HashSet::new();

    for path in paths {
        for (method, op) in &path.operations {
            let key = (path.template.as_str(), *method);
            if !bound.insert(key) && reported.insert(key) {
                errors.push(ValidationError::DuplicateOperation {
                    path: path.template.clone(),
                    method: *method,
                });
            }

            for code in op.duplicate_status_codes() {
                errors.push(ValidationError::DuplicateStatusCode {
                    path: path.template.clone(),
                    method: *method,
                    code,
                });
            }

            for param in &op.parameters {
                let Some(schema) = &param.schema else {
                    continue;
                };
                for (location, reference) in schema.references("") {
                    let site = ReferenceSite::Parameter {
                        path: path.template.clone(),
                        method: *method,
                        name: param.name.clone(),
                        location,
                    };
                    missing.check(&reference.name, site, errors);
                }
            }

            for (key, response) in &op.responses {
                let Some(schema) = &response.schema else {
                    continue;
                };
                for (location, reference) in schema.references("") {
                    let site = ReferenceSite::Response {
                        path: path.template.clone(),
                        method: *method,
                        status: key.to_string(),
                        location,
                    };
                    missing.check(&reference.name, site, errors);
                }
            }

            for placeholder in path.undeclared_parameters(*method) {
                warn!(
                    path = %path.template,
                    method = %method,
                    parameter = %placeholder,
                    "Path template parameter has no matching path parameter."
                );
            }
        }
    }
}

fn check_definition_references<'a>(
    definitions: impl Iterator<Item = &'a SchemaDefinition>,
    missing: &mut MissingReferences<'_>,
    errors: &mut Vec<ValidationError>,
) {
    for def in definitions {
        for (location, reference) in def.references() {
            let site = ReferenceSite::Definition {
                definition: def.name.clone(),
                location,
            };
            missing.check(&reference.name, site, errors);
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Depth-first walk over the whole definition graph. Every back edge yields one
/// cycle; the walk never stops early, so one loop cannot hide another.
fn check_cycles(
    definitions: &IndexMap<String, SchemaDefinition>,
    errors: &mut Vec<ValidationError>,
) {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut found: Vec<Vec<String>> = Vec::new();

    for name in definitions.keys() {
        if !marks.contains_key(name.as_str()) {
            visit(name, definitions, &mut marks, &mut stack, &mut found);
        }
    }

    let mut reported: HashSet<Vec<String>> = HashSet::new();
    for cycle in found {
        if reported.insert(canonical_cycle(&cycle)) {
            errors.push(ValidationError::CyclicSchema { cycle });
        }
    }
}

fn visit<'a>(
    name: &'a str,
    definitions: &'a IndexMap<String, SchemaDefinition>,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    found: &mut Vec<Vec<String>>,
) {
    let Some(def) = definitions.get(name) else {
        return;
    };
    marks.insert(name, Mark::InProgress);
    stack.push(name);

    for (_, reference) in def.references() {
        let target = reference.name.as_str();
        match marks.get(target) {
            Some(Mark::InProgress) => {
                if let Some(pos) = stack.iter().position(|n| *n == target) {
                    let mut cycle: Vec<String> =
                        stack[pos..].iter().map(|n| n.to_string()).collect();
                    cycle.push(target.to_string());
                    found.push(cycle);
                }
            }
            Some(Mark::Done) => {}
            None => visit(target, definitions, marks, stack, found),
        }
    }

    stack.pop();
    marks.insert(name, Mark::Done);
}

/// Rotates a closed cycle (`[A, B, A]`) so the smallest name leads, dropping the repeat.
fn canonical_cycle(cycle: &[String]) -> Vec<String> {
    let open = &cycle[..cycle.len().saturating_sub(1)];
    let start = open
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    open[start..].iter().chain(&open[..start]).cloned().collect()
}
