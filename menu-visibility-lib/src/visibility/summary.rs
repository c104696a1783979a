use super::{ContextSnapshot, FeatureFlags, Menu, evaluate};
use core::ops::AddAssign;
use serde::Serialize;

/// Visibility counts over a set of menu items.
///
/// `visible + hidden == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VisibilityStats {
    pub total: usize,
    pub hidden: usize,
    pub visible: usize,
}

impl VisibilityStats {
    fn tally(&mut self, visible: bool) {
        self.total += 1;
        if visible {
            self.visible += 1;
        } else {
            self.hidden += 1;
        }
    }
}

impl AddAssign for VisibilityStats {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.hidden += rhs.hidden;
        self.visible += rhs.visible;
    }
}

/// Count visible and hidden items across every menu.
#[must_use]
pub fn summarize(menus: &[Menu], ctx: &ContextSnapshot, flags: &FeatureFlags) -> VisibilityStats {
    let mut stats = VisibilityStats::default();
    for (_, menu_stats) in summarize_by_menu(menus, ctx, flags) {
        stats += menu_stats;
    }

    stats
}

/// Count visible and hidden items for each menu, in input order.
#[must_use]
pub fn summarize_by_menu<'a>(menus: &'a [Menu], ctx: &ContextSnapshot, flags: &FeatureFlags) -> Vec<(&'a str, VisibilityStats)> {
    menus
        .iter()
        .map(|menu| {
            let mut stats = VisibilityStats::default();
            for item in &menu.items {
                stats.tally(evaluate(&item.rule, ctx, flags).visible);
            }
            (menu.name.as_str(), stats)
        })
        .collect()
}
