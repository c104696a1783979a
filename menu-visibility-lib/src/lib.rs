#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for menu-visibility
//!
//! This library decides which navigation menu items are rendered for a request,
//! based on per-item visibility rules and facts about the visitor.
//!
//! # Module Organization
//!
//! - [`visibility`]: Rules, request context, and the evaluator
//! - [`menus`]: Loading menus and converting stored settings into rules
//! - [`resolvers`]: Gathering request facts, including IP geolocation
//! - [`commands`]: Command-line interface and orchestration
//! - [`reports`]: Console and JSON rendering of results

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod menus;
pub mod resolvers;
pub mod visibility;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
