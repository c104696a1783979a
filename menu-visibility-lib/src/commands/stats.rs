use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::reports::Report;
use crate::visibility::{summarize, summarize_by_menu};
use clap::Parser;
use ohno::bail;

#[derive(Parser, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Exit with status code 1 if any menu item is hidden
    #[arg(long)]
    pub error_if_hidden: bool,
}

/// Print how many items are visible and hidden, overall and per menu
pub async fn menu_stats<H: Host>(host: &mut H, args: &StatsArgs) -> Result<()> {
    let session = Session::new(&args.common).await?;

    let overall = summarize(&session.menus, &session.context, &session.flags);
    let by_menu = summarize_by_menu(&session.menus, &session.context, &session.flags);

    session.emit(host, &Report::Stats { overall, by_menu })?;

    if args.error_if_hidden && overall.hidden > 0 {
        host.exit(1);
        bail!("{} of {} menu item(s) are hidden", overall.hidden, overall.total);
    }

    Ok(())
}
