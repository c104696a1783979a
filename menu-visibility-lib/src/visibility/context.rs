//! Per-request facts that visibility rules are evaluated against.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumIter, EnumString};

/// A user role, as assigned by the host platform.
///
/// The well-known roles get their own variants; any other slug is kept verbatim
/// (lowercased) in [`Role::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Administrator,
    Editor,
    Author,
    Contributor,
    Subscriber,
    Custom(String),
}

impl Role {
    /// Parse a role slug. Surrounding whitespace and case are ignored.
    #[must_use]
    pub fn parse(slug: &str) -> Self {
        let slug = slug.trim().to_ascii_lowercase();
        match slug.as_str() {
            "administrator" => Self::Administrator,
            "editor" => Self::Editor,
            "author" => Self::Author,
            "contributor" => Self::Contributor,
            "subscriber" => Self::Subscriber,
            _ => Self::Custom(slug),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Administrator => "administrator",
            Self::Editor => "editor",
            Self::Author => "author",
            Self::Contributor => "contributor",
            Self::Subscriber => "subscriber",
            Self::Custom(slug) => slug,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// Classification of the page being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PageKind {
    FrontPage,
    SinglePost,
    Shop,
    Product,
    #[default]
    Other,
}

/// Class of device the request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DeviceKind {
    Mobile,
    #[default]
    Desktop,
}

/// User agent fragments that mark a request as coming from a mobile device.
const MOBILE_USER_AGENT_MARKERS: [&str; 7] = ["Mobile", "Android", "Silk/", "Kindle", "BlackBerry", "Opera Mini", "Opera Mobi"];

impl DeviceKind {
    /// Classify a request by its `User-Agent` header.
    ///
    /// An empty or absent user agent is treated as a desktop browser.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if MOBILE_USER_AGENT_MARKERS.iter().any(|marker| user_agent.contains(marker)) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

/// Authentication state of the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub authenticated: bool,
    pub roles: BTreeSet<Role>,
}

impl AuthState {
    /// A visitor that is not logged in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            authenticated: false,
            roles: BTreeSet::new(),
        }
    }

    /// A logged-in visitor holding the given roles.
    #[must_use]
    pub fn logged_in(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            authenticated: true,
            roles: roles.into_iter().collect(),
        }
    }
}

/// Immutable bundle of facts about the current request.
///
/// A snapshot is built once per evaluation pass and only ever handed out by shared
/// reference, so every item in the pass sees the same facts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextSnapshot {
    auth: AuthState,
    page_kind: PageKind,
    device_kind: DeviceKind,
    language: Option<String>,
    country: Option<String>,
}

impl ContextSnapshot {
    #[must_use]
    pub const fn new(auth: AuthState, page_kind: PageKind, device_kind: DeviceKind) -> Self {
        Self {
            auth,
            page_kind,
            device_kind,
            language: None,
            country: None,
        }
    }

    /// Set the resolved language. Blank values mean the language is unknown.
    #[must_use]
    pub fn with_language(mut self, language: Option<&str>) -> Self {
        self.language = language.map(str::trim).filter(|l| !l.is_empty()).map(str::to_string);
        self
    }

    /// Set the resolved country. Codes are stored uppercased; blank values mean the country is unknown.
    #[must_use]
    pub fn with_country(mut self, country: Option<&str>) -> Self {
        self.country = country.and_then(normalize_country);
        self
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth.authenticated
    }

    #[must_use]
    pub const fn roles(&self) -> &BTreeSet<Role> {
        &self.auth.roles
    }

    #[must_use]
    pub const fn page_kind(&self) -> PageKind {
        self.page_kind
    }

    #[must_use]
    pub const fn device_kind(&self) -> DeviceKind {
        self.device_kind
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

/// Trim and uppercase an ISO country code, discarding blank input.
pub(crate) fn normalize_country(code: &str) -> Option<String> {
    let code = code.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_ascii_uppercase())
    }
}
