use std::collections::HashMap;

use tracing::trace;

use crate::error::ChartResult;
use crate::render::document::{Document, ElementId};

/// Result of reconciling one parent's children against a data sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinOutcome {
    /// Elements aligned with the input data, in data order.
    pub elements: Vec<ElementId>,
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Reconciles `tag` children of `parent` against `keys`.
///
/// Children whose bound key is still present are reused, missing keys get new
/// elements, and children with stale, duplicate or absent keys are removed.
/// Joined elements end up in key order.
pub fn join_keyed(
    document: &mut Document,
    parent: ElementId,
    tag: &str,
    keys: &[String],
) -> ChartResult<JoinOutcome> {
    let mut existing: HashMap<String, ElementId> = HashMap::new();
    let mut stale = Vec::new();
    for child in document.children_by_tag(parent, tag) {
        match document.element(child).and_then(|e| e.key()) {
            Some(key) if !existing.contains_key(key) => {
                existing.insert(key.to_owned(), child);
            }
            _ => stale.push(child),
        }
    }

    let mut outcome = JoinOutcome::default();
    for key in keys {
        let element = match existing.remove(key) {
            Some(element) => {
                outcome.updated += 1;
                element
            }
            None => {
                let element = document.create_element(parent, tag)?;
                document.set_key(element, key.as_str())?;
                outcome.entered += 1;
                element
            }
        };
        outcome.elements.push(element);
    }

    stale.extend(existing.into_values());
    for element in stale {
        if document.remove_element(element) {
            outcome.exited += 1;
        }
    }
    document.order_children(parent, &outcome.elements)?;

    trace!(
        tag,
        entered = outcome.entered,
        updated = outcome.updated,
        exited = outcome.exited,
        "keyed join"
    );
    Ok(outcome)
}

/// Index-based join: keeps the first `count` `tag` children, appending or
/// removing elements as needed.
pub fn join_indexed(
    document: &mut Document,
    parent: ElementId,
    tag: &str,
    count: usize,
) -> ChartResult<JoinOutcome> {
    let current = document.children_by_tag(parent, tag);
    let mut outcome = JoinOutcome::default();
    for (index, child) in current.iter().enumerate() {
        if index < count {
            outcome.elements.push(*child);
            outcome.updated += 1;
        } else if document.remove_element(*child) {
            outcome.exited += 1;
        }
    }
    while outcome.elements.len() < count {
        outcome.elements.push(document.create_element(parent, tag)?);
        outcome.entered += 1;
    }
    Ok(outcome)
}
