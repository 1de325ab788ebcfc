//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use zotero_domain::item_types::{creator_types, BOOK};
use zotero_domain::LibraryType;

#[derive(Parser, Debug)]
#[command(
    name = "zotero",
    version,
    about,
    long_about = "Browse and edit a Zotero library from the terminal"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// API key; required for write commands
    #[arg(long, global = true, env = "ZOTERO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Library id (user or group id)
    #[arg(long, global = true, env = "ZOTERO_LIBRARY_ID")]
    pub library: Option<String>,

    /// Library type
    #[arg(long, global = true, value_enum, env = "ZOTERO_LIBRARY_TYPE")]
    pub library_type: Option<LibraryKind>,

    /// API root, e.g. a local server
    #[arg(long, global = true, env = "ZOTERO_BASE_URL")]
    pub base_url: Option<String>,

    /// Config file (TOML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Log more (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LibraryKind {
    User,
    Group,
}

impl From<LibraryKind> for LibraryType {
    fn from(kind: LibraryKind) -> Self {
        match kind {
            LibraryKind::User => LibraryType::User,
            LibraryKind::Group => LibraryType::Group,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List items
    Items(ItemsArgs),
    /// Show one item
    Item {
        /// Item key
        key: String,
    },
    /// List collections
    Collections,
    /// List the groups of a user
    Groups {
        /// User id whose groups are listed
        #[arg(long)]
        user: String,
    },
    /// Create an item, optionally with an attached file
    Create(CreateArgs),
    /// Upload a file as an attachment
    Upload(UploadArgs),
    /// Download the file of an attachment
    Download {
        /// Attachment item key
        key: String,
        /// Target file or directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List tags
    Tags,
    /// Keys deleted since a library version
    Deleted {
        /// Library version to compare against
        #[arg(long, default_value_t = 0)]
        since: u64,
    },
    /// List item types known to the server
    ItemTypes,
}

impl Command {
    /// True for commands that modify the library.
    pub fn writes(&self) -> bool {
        matches!(self, Self::Create(_) | Self::Upload(_))
    }
}

#[derive(Debug, Args)]
pub struct ItemsArgs {
    /// Maximum number of items
    #[arg(long, short = 'l', default_value_t = 25)]
    pub limit: u32,

    /// Offset into the result list
    #[arg(long, default_value_t = 0)]
    pub start: u32,

    /// Filter by item type; prefix with `-` to exclude (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub item_type: Vec<String>,

    /// Filter by tag (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,

    /// Only top-level items
    #[arg(long)]
    pub top: bool,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Item type
    #[arg(long, default_value = BOOK)]
    pub item_type: String,

    /// Title
    #[arg(long)]
    pub title: String,

    /// Authors, comma-separated ("First Last, Organisation")
    #[arg(long)]
    pub authors: Option<String>,

    /// Creator role used for the authors
    #[arg(long, default_value = creator_types::AUTHOR)]
    pub creator_type: String,

    /// Tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tag: Vec<String>,

    /// File to attach to the new item
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Content type of the attached file
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// File to upload
    #[arg(long)]
    pub file: PathBuf,

    /// Parent item key; omitted for a standalone attachment
    #[arg(long)]
    pub parent: Option<String>,

    /// Content type of the file
    #[arg(long)]
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn item_type_list_keeps_exclusions() {
        let args = CliArgs::try_parse_from([
            "zotero",
            "items",
            "--item-type",
            "book,-attachment",
            "--library",
            "1",
        ])
        .unwrap();

        match args.command {
            Command::Items(items) => assert_eq!(items.item_type, vec!["book", "-attachment"]),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(args.global.library.as_deref(), Some("1"));
    }

    #[test]
    fn only_create_and_upload_write() {
        let create = CliArgs::try_parse_from(["zotero", "create", "--title", "T"]).unwrap();
        let tags = CliArgs::try_parse_from(["zotero", "tags"]).unwrap();

        assert!(create.command.writes());
        assert!(!tags.command.writes());
    }
}
