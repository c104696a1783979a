//! Collaborators that gather the facts of a request
//!
//! The visibility core never asks the outside world anything. Instead, a
//! [`ContextSnapshot`] is resolved once per pass from a [`ContextResolver`] and, when
//! country rules can matter, a single call to a [`CountryResolver`].

mod geolocation;
mod request;

pub use geolocation::{DEFAULT_GEOLOCATION_URL, IpGeolocationClient};
pub use request::{FixedCountry, RequestContext};

use crate::visibility::{AuthState, ContextSnapshot, DeviceKind, FeatureFlags, PageKind};

const LOG_TARGET: &str = " context";

/// Source of the per-request facts other than country.
pub trait ContextResolver {
    fn resolve_auth(&self) -> AuthState;
    fn resolve_page_kind(&self) -> PageKind;
    fn resolve_device_kind(&self) -> DeviceKind;
    fn resolve_language(&self) -> Option<String>;
}

/// Source of the visitor's country.
///
/// Lookups may be slow or fail; a failure is reported as `None` and never reaches the
/// caller as an error.
pub trait CountryResolver {
    fn resolve_country(&self, api_key: Option<&str>) -> impl Future<Output = Option<String>> + Send;
}

impl ContextSnapshot {
    /// Build the snapshot for one evaluation pass.
    ///
    /// The country resolver is consulted at most once, and only when country rules
    /// are active and `wants_country` says at least one item restricts by country.
    pub async fn resolve<R, C>(resolver: &R, country_resolver: &C, flags: &FeatureFlags, api_key: Option<&str>, wants_country: bool) -> Self
    where
        R: ContextResolver + ?Sized,
        C: CountryResolver + ?Sized,
    {
        let country = if wants_country && flags.country_checks_active() {
            let country = country_resolver.resolve_country(api_key).await;
            log::debug!(target: LOG_TARGET, "Resolved visitor country: {}", country.as_deref().unwrap_or("unknown"));
            country
        } else {
            None
        };

        let language = resolver.resolve_language();

        Self::new(resolver.resolve_auth(), resolver.resolve_page_kind(), resolver.resolve_device_kind())
            .with_language(language.as_deref())
            .with_country(country.as_deref())
    }
}
