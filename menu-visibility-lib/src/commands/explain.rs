use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::reports::{ExplainedMenu, Report};
use crate::visibility::{FeatureFlags, explain};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print every item's decision along with the reasons it was hidden
pub async fn explain_menus<H: Host>(host: &mut H, args: &ExplainArgs) -> Result<()> {
    let session = Session::new(&args.common).await?;

    // reasons are only collected with debug logging on
    let flags = FeatureFlags {
        debug_logging: true,
        ..session.flags
    };

    let menus = session
        .menus
        .iter()
        .map(|menu| ExplainedMenu {
            name: &menu.name,
            decisions: explain(&menu.items, &session.context, &flags),
        })
        .collect();

    session.emit(host, &Report::Explain(menus))
}
