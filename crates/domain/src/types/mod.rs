//! Wire model of the remote API

pub mod collection;
pub mod envelope;
pub mod group;
pub mod item;
pub mod library;
pub mod query;
pub mod schema;
pub mod write;

pub use collection::{
    Collection, CollectionData, ParentCollection, Search, SearchCondition, SearchData,
};
pub use envelope::{LibraryInfo, Link, Links, Meta};
pub use group::{Group, GroupMeta};
pub use item::{Creator, Item, ItemData, Tag, TagType};
pub use library::{LibraryRef, LibraryType};
pub use query::QueryParams;
pub use schema::{NewItemTemplate, SchemaCreatorType, SchemaField, SchemaItemType};
pub use write::{DeletedContent, FailedWrite, LibraryTag, LibraryTagMeta, WriteResponse};
