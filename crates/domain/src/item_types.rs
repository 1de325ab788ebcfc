//! Common item types and creator types
//!
//! The remote schema defines the authoritative list and may grow at any time,
//! so item types stay plain strings. These constants cover the frequent ones;
//! fetch the full catalog with the schema calls.

// Regular item types
pub const BOOK: &str = "book";
pub const BOOK_SECTION: &str = "bookSection";
pub const JOURNAL_ARTICLE: &str = "journalArticle";
pub const MAGAZINE_ARTICLE: &str = "magazineArticle";
pub const NEWSPAPER_ARTICLE: &str = "newspaperArticle";
pub const CONFERENCE_PAPER: &str = "conferencePaper";
pub const THESIS: &str = "thesis";
pub const REPORT: &str = "report";
pub const WEBPAGE: &str = "webpage";
pub const BLOG_POST: &str = "blogPost";
pub const FORUM_POST: &str = "forumPost";
pub const PREPRINT: &str = "preprint";
pub const MANUSCRIPT: &str = "manuscript";
pub const PRESENTATION: &str = "presentation";

// Media
pub const PODCAST: &str = "podcast";
pub const VIDEO_RECORDING: &str = "videoRecording";
pub const AUDIO_RECORDING: &str = "audioRecording";
pub const FILM: &str = "film";

// Legal and government
pub const CASE: &str = "case";
pub const STATUTE: &str = "statute";
pub const BILL: &str = "bill";
pub const PATENT: &str = "patent";
pub const HEARING: &str = "hearing";

// Reference works
pub const DICTIONARY_ENTRY: &str = "dictionaryEntry";
pub const ENCYCLOPEDIA_ARTICLE: &str = "encyclopediaArticle";

// Other
pub const ARTWORK: &str = "artwork";
pub const MAP: &str = "map";
pub const EMAIL: &str = "email";
pub const LETTER: &str = "letter";
pub const INTERVIEW: &str = "interview";
pub const INSTANT_MESSAGE: &str = "instantMessage";
pub const DOCUMENT: &str = "document";
pub const COMPUTER_PROGRAM: &str = "computerProgram";
pub const DATASET: &str = "dataset";
pub const STANDARD: &str = "standard";
pub const TV_BROADCAST: &str = "tvBroadcast";
pub const RADIO_BROADCAST: &str = "radioBroadcast";

// Special
pub const ATTACHMENT: &str = "attachment";
pub const NOTE: &str = "note";
pub const ANNOTATION: &str = "annotation";

/// Creator roles shared by most item types.
pub mod creator_types {
    pub const AUTHOR: &str = "author";
    pub const EDITOR: &str = "editor";
    pub const CONTRIBUTOR: &str = "contributor";
    pub const TRANSLATOR: &str = "translator";
    pub const SERIES_EDITOR: &str = "seriesEditor";
    pub const REVIEWER: &str = "reviewer";
}

/// True when `item_type` is an exclusion filter such as `-annotation`.
pub fn is_exclude_filter(item_type: &str) -> bool {
    item_type.starts_with('-')
}

/// Strip one leading `-` from an exclusion filter.
pub fn without_exclude_prefix(item_type: &str) -> &str {
    item_type.strip_prefix('-').unwrap_or(item_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_filters_are_detected() {
        assert!(is_exclude_filter("-annotation"));
        assert!(!is_exclude_filter(ANNOTATION));
        assert!(!is_exclude_filter(""));
    }

    #[test]
    fn prefix_is_removed_once() {
        assert_eq!(without_exclude_prefix("-attachment"), ATTACHMENT);
        assert_eq!(without_exclude_prefix(BOOK), BOOK);
        assert_eq!(without_exclude_prefix("--note"), "-note");
    }
}
