use super::{ContextResolver, CountryResolver};
use crate::visibility::{AuthState, DeviceKind, PageKind};

/// Request facts supplied directly by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub auth: AuthState,
    pub page_kind: PageKind,
    pub device_kind: DeviceKind,
    pub language: Option<String>,
}

impl RequestContext {
    /// Derive the device kind from a `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.device_kind = DeviceKind::from_user_agent(user_agent);
        self
    }
}

impl ContextResolver for RequestContext {
    fn resolve_auth(&self) -> AuthState {
        self.auth.clone()
    }

    fn resolve_page_kind(&self) -> PageKind {
        self.page_kind
    }

    fn resolve_device_kind(&self) -> DeviceKind {
        self.device_kind
    }

    fn resolve_language(&self) -> Option<String> {
        self.language.clone()
    }
}

/// A country known up front, no lookup needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedCountry(pub Option<String>);

impl CountryResolver for FixedCountry {
    async fn resolve_country(&self, _api_key: Option<&str>) -> Option<String> {
        self.0.clone()
    }
}
