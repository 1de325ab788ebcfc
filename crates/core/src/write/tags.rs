//! Tag merging for the add-tags convenience
//!
//! Adding tags is a read-modify-write. Two writers racing on the same item
//! are only caught by the version check of the final update.

use zotero_domain::{ItemData, Tag};

/// Append every name in `names` that `data` does not carry yet.
///
/// Returns the number of tags added. Existing tags keep their order and type.
pub fn merge_tags<S: AsRef<str>>(data: &mut ItemData, names: &[S]) -> usize {
    let mut added = 0;
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() || data.has_tag(name) {
            continue;
        }
        data.tags.push(Tag::new(name));
        added += 1;
    }
    added
}
