//! Conversion of stored rule strings into typed rules.
//!
//! Menu data stores visibility settings as free-form strings. This is the only
//! place they are interpreted; anything unrecognized becomes "no restriction".

use crate::visibility::{CommerceRestriction, DeviceRestriction, PageKind, PrimaryRule, Role};
use std::collections::BTreeSet;

const LOG_TARGET: &str = "   menus";

/// Every visibility slug understood by [`parse_visibility`].
pub const VISIBILITY_SLUGS: [&str; 8] = [
    "logged-in-only",
    "logged-out-only",
    "admin-editor-only",
    "author-only",
    "front-page-only",
    "single-post-only",
    "hide-on-mobile",
    "desktop-only",
];

/// Map a stored visibility slug to a primary rule.
///
/// Blank and unknown slugs map to [`PrimaryRule::Default`].
#[must_use]
pub fn parse_visibility(slug: &str) -> PrimaryRule {
    match slug.trim() {
        "" => PrimaryRule::Default,
        "logged-in-only" => PrimaryRule::LoggedInOnly,
        "logged-out-only" => PrimaryRule::LoggedOutOnly,
        "admin-editor-only" => PrimaryRule::RoleAtLeast([Role::Administrator, Role::Editor].into_iter().collect()),
        "author-only" => PrimaryRule::RoleAtLeast([Role::Author].into_iter().collect()),
        "front-page-only" => PrimaryRule::PageKindOnly(PageKind::FrontPage),
        "single-post-only" => PrimaryRule::PageKindOnly(PageKind::SinglePost),
        "hide-on-mobile" => PrimaryRule::DeviceRestriction(DeviceRestriction::HideOnMobile),
        "desktop-only" => PrimaryRule::DeviceRestriction(DeviceRestriction::DesktopOnly),
        other => {
            log::debug!(target: LOG_TARGET, "Unknown visibility rule '{other}', treating item as unrestricted");
            PrimaryRule::Default
        }
    }
}

/// Whether `slug` is blank or one of [`VISIBILITY_SLUGS`].
#[must_use]
pub fn is_known_visibility(slug: &str) -> bool {
    let slug = slug.trim();
    slug.is_empty() || VISIBILITY_SLUGS.contains(&slug)
}

/// Parse a comma-separated list of country codes.
///
/// Entries are trimmed and uppercased, and blank entries are dropped. An empty list
/// is no restriction at all.
#[must_use]
pub fn parse_allowed_countries<I, S>(entries: I) -> Option<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let countries: BTreeSet<String> = entries
        .into_iter()
        .flat_map(|entry| {
            entry
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_ascii_uppercase)
                .collect::<Vec<_>>()
        })
        .collect();

    if countries.is_empty() { None } else { Some(countries) }
}

/// Parse a language restriction; blank means none.
#[must_use]
pub fn parse_language(raw: &str) -> Option<String> {
    let language = raw.trim();
    if language.is_empty() { None } else { Some(language.to_string()) }
}

/// Parse a commerce restriction; blank or unknown means none.
#[must_use]
pub fn parse_commerce(raw: &str) -> Option<CommerceRestriction> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    raw.parse()
        .inspect_err(|_| log::debug!(target: LOG_TARGET, "Unknown commerce restriction '{raw}', ignoring it"))
        .ok()
}
