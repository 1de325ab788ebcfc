//! Subcommand dispatch

mod attachments;
mod items;
mod library;

use anyhow::bail;
use tokio_util::sync::CancellationToken;
use zotero_infra::ZoteroClient;

use crate::args::{CliArgs, Command};
use crate::settings;

/// Run the parsed command and return what should be printed.
pub async fn run(args: CliArgs, cancel: CancellationToken) -> anyhow::Result<String> {
    let CliArgs { command, global } = args;
    let json = global.json;

    let config = match &command {
        Command::Groups { user } => settings::user_config(&global, user)?,
        _ => settings::client_config(&global)?,
    };
    if command.writes() && !config.has_api_key() {
        bail!(
            "this command modifies the library and needs an API key \
             (--api-key or ZOTERO_API_KEY)"
        );
    }
    let client = ZoteroClient::new(config)?.with_cancellation(cancel);

    match command {
        Command::Items(items) => items::list(&client, &items, json).await,
        Command::Item { key } => items::show(&client, &key, json).await,
        Command::Create(create) => items::create(&client, &create, json).await,
        Command::Collections => library::collections(&client, json).await,
        Command::Groups { .. } => library::groups(&client, json).await,
        Command::Tags => library::tags(&client, json).await,
        Command::Deleted { since } => library::deleted(&client, since, json).await,
        Command::ItemTypes => library::item_types(&client, json).await,
        Command::Upload(upload) => attachments::upload(&client, &upload, json).await,
        Command::Download { key, output } => {
            attachments::download(&client, &key, output.as_deref()).await
        }
    }
}
