//! Menu item visibility rules and their evaluation
//!
//! This module decides which navigation items are rendered for a request. It is
//! pure computation over values resolved beforehand by collaborators: no I/O, no
//! shared state, and no failure modes.
//!
//! # Implementation Model
//!
//! - A [`ContextSnapshot`] bundles the facts about the current request (login state,
//!   roles, page kind, device kind, language, country). It is built once per pass.
//! - [`FeatureFlags`] say which optional rule categories are active for the pass.
//! - Each [`MenuItem`] owns one [`Rule`]: a [`PrimaryRule`] plus optional language,
//!   country, and commerce modifiers.
//! - [`evaluate`] turns a rule and a context into a [`Decision`]. It is the single
//!   source of truth; [`filter`], [`explain`], and [`summarize`] all go through it.
//!
//! An item is visible only if its primary rule and every enabled modifier pass.
//! Anything unknown or empty degrades to "no restriction" on that axis, and an
//! unknown visitor country never hides an item.

mod context;
mod decision;
mod evaluator;
mod filter;
mod flags;
mod item;
mod rule;
mod summary;

pub use context::{AuthState, ContextSnapshot, DeviceKind, PageKind, Role};
pub use decision::Decision;
pub use evaluator::evaluate;
pub use filter::{DecisionSink, ItemDecision, LogSink, explain, filter, filter_logged};
pub use flags::FeatureFlags;
pub use item::{Menu, MenuItem};
pub use rule::{CommerceRestriction, DeviceRestriction, PrimaryRule, Rule};
pub use summary::{VisibilityStats, summarize, summarize_by_menu};
