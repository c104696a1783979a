use super::Report;
use crate::Result;
use crate::visibility::{ItemDecision, MenuItem, VisibilityStats};
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(report: &Report<'_>, writer: &mut W) -> Result<()> {
    let output = match report {
        Report::Filter(menus) => json!({
            "menus": menus
                .iter()
                .map(|menu| json!({
                    "name": menu.name,
                    "items": menu.items.iter().map(|item| item_to_json(item)).collect::<Vec<_>>(),
                }))
                .collect::<Vec<_>>()
        }),

        Report::Explain(menus) => json!({
            "menus": menus
                .iter()
                .map(|menu| json!({
                    "name": menu.name,
                    "items": menu.decisions.iter().map(decision_to_json).collect::<Vec<_>>(),
                }))
                .collect::<Vec<_>>()
        }),

        Report::Stats { overall, by_menu } => json!({
            "overall": overall,
            "menus": by_menu.iter().map(|(name, stats)| stats_to_json(name, *stats)).collect::<Vec<_>>(),
        }),
    };

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn item_to_json(item: &MenuItem) -> serde_json::Value {
    json!({
        "id": item.id,
        "title": item.title,
    })
}

fn decision_to_json(entry: &ItemDecision<'_>) -> serde_json::Value {
    json!({
        "id": entry.item.id,
        "title": entry.item.title,
        "visible": entry.decision.visible,
        "reasons": entry.decision.reasons,
    })
}

fn stats_to_json(name: &str, stats: VisibilityStats) -> serde_json::Value {
    json!({
        "name": name,
        "total": stats.total,
        "hidden": stats.hidden,
        "visible": stats.visible,
    })
}
