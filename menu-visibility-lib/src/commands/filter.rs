use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::reports::{FilteredMenu, Report};
use crate::visibility::{LogSink, filter_logged};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct FilterArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print the items of every menu that are visible for the request
pub async fn filter_menus<H: Host>(host: &mut H, args: &FilterArgs) -> Result<()> {
    let session = Session::new(&args.common).await?;

    let mut sink = LogSink;
    let menus = session
        .menus
        .iter()
        .map(|menu| FilteredMenu {
            name: &menu.name,
            items: filter_logged(&menu.items, &session.context, &session.flags, &mut sink),
        })
        .collect();

    session.emit(host, &Report::Filter(menus))
}
