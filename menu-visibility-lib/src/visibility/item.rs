use super::Rule;

/// A navigation entry with its visibility policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: u64,
    pub title: String,
    pub rule: Rule,
}

impl MenuItem {
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, rule: Rule) -> Self {
        Self {
            id,
            title: title.into(),
            rule,
        }
    }
}

/// A named, ordered list of menu items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
    pub name: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    #[must_use]
    pub fn new(name: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self { name: name.into(), items }
    }

    /// Whether any item carries a country allow-list.
    #[must_use]
    pub fn restricts_country(&self) -> bool {
        self.items.iter().any(|item| item.rule.restricts_country())
    }
}
