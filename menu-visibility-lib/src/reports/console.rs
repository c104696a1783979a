use super::{ExplainedMenu, FilteredMenu, Report};
use crate::Result;
use crate::visibility::VisibilityStats;
use core::fmt::Write;
use owo_colors::OwoColorize;

const OVERALL_LABEL: &str = "overall";

pub fn generate<W: Write>(report: &Report<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    match report {
        Report::Filter(menus) => write_filtered(menus, use_colors, writer),
        Report::Explain(menus) => write_explained(menus, use_colors, writer),
        Report::Stats { overall, by_menu } => write_stats(*overall, by_menu, use_colors, writer),
    }
}

fn write_heading<W: Write>(index: usize, name: &str, use_colors: bool, writer: &mut W) -> Result<()> {
    if index > 0 {
        writeln!(writer)?;
    }

    if use_colors {
        writeln!(writer, "{}", name.bold())?;
    } else {
        writeln!(writer, "{name}")?;
    }

    Ok(())
}

fn write_filtered<W: Write>(menus: &[FilteredMenu<'_>], use_colors: bool, writer: &mut W) -> Result<()> {
    for (index, menu) in menus.iter().enumerate() {
        write_heading(index, menu.name, use_colors, writer)?;

        if menu.items.is_empty() {
            writeln!(writer, "  (no visible items)")?;
        }

        for item in &menu.items {
            writeln!(writer, "  [{}] {}", item.id, item.title)?;
        }
    }

    Ok(())
}

fn write_explained<W: Write>(menus: &[ExplainedMenu<'_>], use_colors: bool, writer: &mut W) -> Result<()> {
    for (index, menu) in menus.iter().enumerate() {
        write_heading(index, menu.name, use_colors, writer)?;

        if menu.decisions.is_empty() {
            writeln!(writer, "  (no items)")?;
        }

        for entry in &menu.decisions {
            let mark = match (entry.decision.visible, use_colors) {
                (true, true) => "✔".green().to_string(),
                (false, true) => "✘".red().to_string(),
                (true, false) => "✔".to_string(),
                (false, false) => "✘".to_string(),
            };
            writeln!(writer, "  {mark} [{}] {}", entry.item.id, entry.item.title)?;

            for reason in &entry.decision.reasons {
                if use_colors {
                    writeln!(writer, "      {}", reason.dimmed())?;
                } else {
                    writeln!(writer, "      {reason}")?;
                }
            }
        }
    }

    Ok(())
}

fn write_stats<W: Write>(overall: VisibilityStats, by_menu: &[(&str, VisibilityStats)], use_colors: bool, writer: &mut W) -> Result<()> {
    let width = by_menu
        .iter()
        .map(|(name, _)| name.len())
        .chain([OVERALL_LABEL.len()])
        .max()
        .unwrap_or(OVERALL_LABEL.len());

    for (name, stats) in by_menu {
        write_stats_line(name, *stats, width, use_colors, writer)?;
    }

    if !by_menu.is_empty() {
        writeln!(writer)?;
    }

    write_stats_line(OVERALL_LABEL, overall, width, use_colors, writer)
}

fn write_stats_line<W: Write>(name: &str, stats: VisibilityStats, width: usize, use_colors: bool, writer: &mut W) -> Result<()> {
    let hidden = if use_colors && stats.hidden > 0 {
        stats.hidden.yellow().to_string()
    } else {
        stats.hidden.to_string()
    };

    writeln!(
        writer,
        "{name:<width$} : {} total, {hidden} hidden, {} visible",
        stats.total, stats.visible
    )?;

    Ok(())
}
