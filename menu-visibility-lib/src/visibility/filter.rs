//! Applying the evaluator across an ordered list of menu items.

use super::{ContextSnapshot, Decision, FeatureFlags, MenuItem, evaluate};

const LOG_TARGET: &str = "visibility";

/// One item together with the decision made for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDecision<'a> {
    pub item: &'a MenuItem,
    pub decision: Decision,
}

/// Receives the decision for every hidden item.
///
/// Implementations are diagnostic only and must not fail; a sink that cannot
/// deliver a record simply drops it.
pub trait DecisionSink {
    fn record(&mut self, item: &MenuItem, decision: &Decision);
}

/// A sink that forwards hidden-item decisions to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DecisionSink for LogSink {
    fn record(&mut self, item: &MenuItem, decision: &Decision) {
        if decision.reasons.is_empty() {
            log::info!(target: LOG_TARGET, "Menu item {} hidden", item.title);
        }

        for reason in &decision.reasons {
            log::info!(target: LOG_TARGET, "Menu item {} hidden ({reason})", item.title);
        }
    }
}

/// Evaluate every item, returning one decision per item in input order.
#[must_use]
pub fn explain<'a>(items: &'a [MenuItem], ctx: &ContextSnapshot, flags: &FeatureFlags) -> Vec<ItemDecision<'a>> {
    items
        .iter()
        .map(|item| ItemDecision {
            item,
            decision: evaluate(&item.rule, ctx, flags),
        })
        .collect()
}

/// Keep the items that are visible for the given context.
///
/// The filter is stable: retained items keep their relative order. Every item is
/// evaluated, and the input is never modified.
#[must_use]
pub fn filter<'a>(items: &'a [MenuItem], ctx: &ContextSnapshot, flags: &FeatureFlags) -> Vec<&'a MenuItem> {
    items.iter().filter(|item| evaluate(&item.rule, ctx, flags).visible).collect()
}

/// Like [`filter`], additionally reporting every hidden item to `sink`.
///
/// The sink is only consulted when debug logging is enabled.
pub fn filter_logged<'a, S: DecisionSink>(
    items: &'a [MenuItem],
    ctx: &ContextSnapshot,
    flags: &FeatureFlags,
    sink: &mut S,
) -> Vec<&'a MenuItem> {
    let mut retained = Vec::with_capacity(items.len());
    for item in items {
        let decision = evaluate(&item.rule, ctx, flags);
        if decision.visible {
            retained.push(item);
        } else if flags.debug_logging {
            sink.record(item, &decision);
        }
    }

    retained
}
