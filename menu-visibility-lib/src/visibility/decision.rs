/// The outcome of evaluating one item's rule against a request context.
///
/// `reasons` is only populated when debug logging is enabled, with one entry per
/// triggered hide condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub visible: bool,
    pub reasons: Vec<String>,
}

impl Decision {
    #[must_use]
    pub const fn new(visible: bool, reasons: Vec<String>) -> Self {
        Self { visible, reasons }
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        !self.visible
    }
}
