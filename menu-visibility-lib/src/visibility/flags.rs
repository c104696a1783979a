/// Toggles controlling which optional rule categories are active.
///
/// Built once per evaluation pass from configuration and passed by reference into
/// every evaluation; a change in configuration only takes effect on the next pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[expect(clippy::struct_excessive_bools, reason = "each flag is an independent toggle")]
pub struct FeatureFlags {
    /// Record a human-readable reason for every triggered hide condition.
    pub debug_logging: bool,

    /// Honor per-item country allow-lists.
    pub location_enabled: bool,

    /// Honor per-item language restrictions.
    pub language_enabled: bool,

    /// Honor per-item shop/product restrictions.
    pub commerce_enabled: bool,

    /// A geolocation service is available (an API key is configured).
    pub geolocation_configured: bool,
}

impl FeatureFlags {
    /// Whether country allow-lists can take effect at all.
    #[must_use]
    pub const fn country_checks_active(&self) -> bool {
        self.location_enabled && self.geolocation_configured
    }
}
