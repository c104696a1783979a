//! Typed visibility policies attached to menu items.

use super::{DeviceKind, PageKind, Role};
use core::fmt;
use std::collections::BTreeSet;
use strum::{Display, EnumString};

/// The two historical device rules.
///
/// Both hide an item exactly when the visitor is on a mobile device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum DeviceRestriction {
    HideOnMobile,
    DesktopOnly,
}

impl DeviceRestriction {
    /// The device class on which the item is hidden.
    #[must_use]
    pub const fn hide_on(self) -> DeviceKind {
        match self {
            Self::HideOnMobile | Self::DesktopOnly => DeviceKind::Mobile,
        }
    }
}

/// Storefront restriction layered on top of a primary rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CommerceRestriction {
    ShopOnly,
    ProductOnly,
}

impl CommerceRestriction {
    /// The only page kind on which the item may be shown.
    #[must_use]
    pub const fn required_page(self) -> PageKind {
        match self {
            Self::ShopOnly => PageKind::Shop,
            Self::ProductOnly => PageKind::Product,
        }
    }
}

/// The main visibility policy of an item. Exactly one per item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PrimaryRule {
    /// No restriction.
    #[default]
    Default,
    LoggedInOnly,
    LoggedOutOnly,

    /// Visible when the visitor holds at least one of the roles.
    RoleAtLeast(BTreeSet<Role>),

    /// Visible only on the given kind of page.
    PageKindOnly(PageKind),

    DeviceRestriction(DeviceRestriction),
}

impl fmt::Display for PrimaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::LoggedInOnly => f.write_str("logged-in-only"),
            Self::LoggedOutOnly => f.write_str("logged-out-only"),
            Self::RoleAtLeast(roles) => write!(f, "roles({})", join_roles(roles)),
            Self::PageKindOnly(kind) => write!(f, "{kind}-only"),
            Self::DeviceRestriction(restriction) => write!(f, "{restriction}"),
        }
    }
}

/// An item's complete visibility policy: a primary rule plus optional modifiers.
///
/// The primary rule and every modifier are combined as a conjunction; the order in
/// which they are checked never changes the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    pub primary: PrimaryRule,

    /// Language code the visitor must be browsing in.
    pub language: Option<String>,

    /// ISO country codes (uppercase) the visitor must be located in.
    pub allowed_countries: Option<BTreeSet<String>>,

    pub commerce: Option<CommerceRestriction>,
}

impl Rule {
    #[must_use]
    pub fn new(primary: PrimaryRule) -> Self {
        Self {
            primary,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.language = Some(language.trim().to_string()).filter(|l| !l.is_empty());
        self
    }

    #[must_use]
    pub fn with_allowed_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_countries = Some(
            countries
                .into_iter()
                .filter_map(|c| super::context::normalize_country(c.as_ref()))
                .collect(),
        );
        self
    }

    #[must_use]
    pub const fn with_commerce(mut self, commerce: CommerceRestriction) -> Self {
        self.commerce = Some(commerce);
        self
    }

    /// Whether the rule carries a non-empty country allow-list.
    #[must_use]
    pub fn restricts_country(&self) -> bool {
        self.allowed_countries.as_ref().is_some_and(|c| c.iter().any(|code| !code.trim().is_empty()))
    }
}

pub(crate) fn join_roles(roles: &BTreeSet<Role>) -> String {
    roles.iter().map(Role::as_str).collect::<Vec<_>>().join(", ")
}
