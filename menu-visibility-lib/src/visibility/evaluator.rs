//! Evaluator deciding whether a single menu item is visible for a request
//!
//! Every check is an independent hide condition. An item is visible only if no
//! condition triggers, so the checks form a conjunction and their order only
//! affects the order of the diagnostic reasons.

use super::rule::join_roles;
use super::{CommerceRestriction, ContextSnapshot, Decision, DeviceKind, DeviceRestriction, FeatureFlags, PageKind, PrimaryRule, Role, Rule};
use core::fmt;
use std::collections::BTreeSet;

/// A triggered hide condition.
#[derive(Debug)]
enum HideReason<'a> {
    NotLoggedIn,
    LoggedIn,
    MissingRole(&'a BTreeSet<Role>),
    WrongPage { required: PageKind, current: PageKind },
    Device { restriction: DeviceRestriction, current: DeviceKind },
    Language { required: &'a str, current: Option<&'a str> },
    Country { current: &'a str },
    Commerce { restriction: CommerceRestriction, current: PageKind },
}

impl fmt::Display for HideReason<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoggedIn => f.write_str("logged-in-only: visitor is not logged in"),
            Self::LoggedIn => f.write_str("logged-out-only: visitor is logged in"),
            Self::MissingRole(roles) => write!(f, "role mismatch: requires one of [{}]", join_roles(roles)),
            Self::WrongPage { required, current } => write!(f, "{required}-only: current page is {current}"),
            Self::Device { restriction, current } => write!(f, "{restriction}: current device is {current}"),
            Self::Language { required, current } => write!(
                f,
                "language mismatch: requires '{required}', current is '{}'",
                current.unwrap_or("unknown")
            ),
            Self::Country { current } => write!(f, "country mismatch: '{current}' is not in the allowed countries"),
            Self::Commerce { restriction, current } => write!(f, "{restriction}: current page is {current}"),
        }
    }
}

/// Evaluate an item's rule against the request context.
///
/// Pure and total: the same inputs always produce the same [`Decision`]. When
/// `flags.debug_logging` is set, the decision carries one reason per triggered hide
/// condition, in the order primary rule, language, country, commerce.
#[must_use]
pub fn evaluate(rule: &Rule, ctx: &ContextSnapshot, flags: &FeatureFlags) -> Decision {
    let mut triggered = [
        check_primary(&rule.primary, ctx),
        check_language(rule, ctx, flags),
        check_country(rule, ctx, flags),
        check_commerce(rule, ctx, flags),
    ]
    .into_iter()
    .flatten()
    .peekable();

    let visible = triggered.peek().is_none();
    let reasons = if flags.debug_logging {
        triggered.map(|reason| reason.to_string()).collect()
    } else {
        Vec::new()
    };

    Decision::new(visible, reasons)
}

fn check_primary<'a>(primary: &'a PrimaryRule, ctx: &ContextSnapshot) -> Option<HideReason<'a>> {
    match primary {
        PrimaryRule::Default => None,
        PrimaryRule::LoggedInOnly => (!ctx.is_authenticated()).then_some(HideReason::NotLoggedIn),
        PrimaryRule::LoggedOutOnly => ctx.is_authenticated().then_some(HideReason::LoggedIn),

        // an empty role set is a malformed rule and restricts nothing
        PrimaryRule::RoleAtLeast(roles) => {
            (!roles.is_empty() && roles.is_disjoint(ctx.roles())).then_some(HideReason::MissingRole(roles))
        }

        PrimaryRule::PageKindOnly(required) => (ctx.page_kind() != *required).then_some(HideReason::WrongPage {
            required: *required,
            current: ctx.page_kind(),
        }),

        PrimaryRule::DeviceRestriction(restriction) => {
            (ctx.device_kind() == restriction.hide_on()).then_some(HideReason::Device {
                restriction: *restriction,
                current: ctx.device_kind(),
            })
        }
    }
}

fn check_language<'a>(rule: &'a Rule, ctx: &'a ContextSnapshot, flags: &FeatureFlags) -> Option<HideReason<'a>> {
    if !flags.language_enabled {
        return None;
    }

    // a blank language restricts nothing
    let required = rule.language.as_deref().map(str::trim).filter(|l| !l.is_empty())?;
    (ctx.language() != Some(required)).then(|| HideReason::Language {
        required,
        current: ctx.language(),
    })
}

fn check_country<'a>(rule: &Rule, ctx: &'a ContextSnapshot, flags: &FeatureFlags) -> Option<HideReason<'a>> {
    if !flags.country_checks_active() {
        return None;
    }

    let allowed = rule.allowed_countries.as_ref().filter(|c| c.iter().any(|code| !code.trim().is_empty()))?;

    // an unknown country never hides an item
    let current = ctx.country()?;
    let listed = allowed.iter().any(|code| code.trim().eq_ignore_ascii_case(current));
    (!listed).then_some(HideReason::Country { current })
}

fn check_commerce(rule: &Rule, ctx: &ContextSnapshot, flags: &FeatureFlags) -> Option<HideReason<'static>> {
    if !flags.commerce_enabled {
        return None;
    }

    let restriction = rule.commerce?;
    (ctx.page_kind() != restriction.required_page()).then_some(HideReason::Commerce {
        restriction,
        current: ctx.page_kind(),
    })
}
