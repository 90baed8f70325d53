use serde::{Deserialize, Serialize};

use crate::domain::LayoutKind;

/// Canonical path of the index document; also the layout name the server
/// reports for it.
pub const INDEX_PATH: &str = "Main_page";

/// Reserved sentinel path the overlay parks on after a failed fetch.
/// Never a valid navigable document path.
pub const ERROR_PATH: &str = "error";

/// A document fetched from the remote content hierarchy.
///
/// `path` is canonical: the server may answer a request for one path with a
/// document living at another (redirect), and callers are expected to adopt
/// the returned path as authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiDocument {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub layout: String,
    pub locale: String,
    pub markdown: String,
    #[serde(default)]
    pub available_locales: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WikiDocument {
    /// Index documents are recognised by their layout name matching the
    /// canonical index path, compared case-insensitively.
    pub fn layout_kind(&self) -> LayoutKind {
        if self.layout.eq_ignore_ascii_case(INDEX_PATH) {
            LayoutKind::Index
        } else {
            LayoutKind::Article
        }
    }
}
