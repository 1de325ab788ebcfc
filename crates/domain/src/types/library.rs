//! Library identity

use serde::{Deserialize, Serialize};

/// Kind of library being addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryType {
    /// Personal library of one user.
    #[default]
    User,
    /// Shared group library.
    Group,
}

crate::impl_domain_status_conversions!(LibraryType {
    User => "user",
    Group => "group",
});

impl LibraryType {
    /// URL path segment for this kind (`users` or `groups`).
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Group => "groups",
        }
    }
}

/// Identifies the remote library a client talks to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryRef {
    pub library_id: String,
    pub library_type: LibraryType,
}

impl LibraryRef {
    /// Reference to a user library.
    pub fn user(library_id: impl Into<String>) -> Self {
        Self { library_id: library_id.into(), library_type: LibraryType::User }
    }

    /// Reference to a group library.
    pub fn group(library_id: impl Into<String>) -> Self {
        Self { library_id: library_id.into(), library_type: LibraryType::Group }
    }

    /// `users/{id}` or `groups/{id}`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.library_type.path_segment(), self.library_id)
    }

    /// True for user libraries.
    pub fn is_user(&self) -> bool {
        self.library_type == LibraryType::User
    }
}
