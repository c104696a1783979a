use crate::visibility::{ItemDecision, MenuItem, VisibilityStats};

/// The items of one menu that survived filtering.
#[derive(Debug, Clone)]
pub struct FilteredMenu<'a> {
    pub name: &'a str,
    pub items: Vec<&'a MenuItem>,
}

/// Every item of one menu with its decision.
#[derive(Debug, Clone)]
pub struct ExplainedMenu<'a> {
    pub name: &'a str,
    pub decisions: Vec<ItemDecision<'a>>,
}

/// Result of one command, ready to be rendered in any output format.
#[derive(Debug, Clone)]
pub enum Report<'a> {
    Filter(Vec<FilteredMenu<'a>>),
    Explain(Vec<ExplainedMenu<'a>>),
    Stats {
        overall: VisibilityStats,
        by_menu: Vec<(&'a str, VisibilityStats)>,
    },
}
