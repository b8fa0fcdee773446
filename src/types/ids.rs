use super::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// Strong typing for IDs with phantom types.
///
/// The stored value is always the canonical hyphenated, lowercase UUID form
/// (`8-4-4-4-12`), which is what the Notion API expects in endpoint paths.
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseMarker;

/// An ID whose object kind is not known yet (e.g. straight out of a URL).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyMarker;

pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;
pub type DatabaseId = Id<DatabaseMarker>;
pub type NotionId = Id<AnyMarker>;

impl<T> Id<T> {
    /// Parses a 32-hex or hyphenated UUID into canonical form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let uuid = Uuid::parse_str(trimmed).map_err(|e| {
            ValidationError::InvalidId(format!("{} ({})", trimmed, e))
        })?;
        Ok(Self::from_uuid(uuid))
    }

    fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid.hyphenated().to_string(),
            _phantom: PhantomData,
        }
    }

    /// Get the ID as a string reference (hyphenated form)
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The 32-hex form with hyphens stripped, as used in page URLs.
    pub fn to_compact(&self) -> String {
        self.value.replace('-', "")
    }

    /// Reinterprets this ID as a different object kind.
    ///
    /// A `child_database` block shares its ID with the database it hosts,
    /// and a URL ID only becomes a page ID once the caller decides so.
    pub fn cast<U>(&self) -> Id<U> {
        Id {
            value: self.value.clone(),
            _phantom: PhantomData,
        }
    }
}

impl NotionId {
    /// Extracts and canonicalizes the ID embedded in a Notion URL.
    pub fn from_url(url: &str) -> Result<Self, ValidationError> {
        extract_id_from_url(url).ok_or_else(|| {
            ValidationError::InvalidId(format!("Could not extract page ID from URL: {}", url))
        })
    }
}

// Manual impls: derives would demand the same traits on the marker type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// The URL shapes an ID can be embedded in, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlLayout {
    /// `notion.so/<32hex>`
    BareHex,
    /// `notion.so/<8-4-4-4-12>`
    BareUuid,
    /// `notion.so/Some-Title-<32hex>`
    Slug,
    /// `notion.so/workspace/Some-Title-<32hex>`
    NestedSlug,
}

impl fmt::Display for UrlLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BareHex => write!(f, "bare 32-hex id"),
            Self::BareUuid => write!(f, "bare hyphenated uuid"),
            Self::Slug => write!(f, "title slug"),
            Self::NestedSlug => write!(f, "workspace + title slug"),
        }
    }
}

lazy_static! {
    static ref URL_ID_PATTERNS: [(UrlLayout, Regex); 4] = [
        (
            UrlLayout::BareHex,
            Regex::new(r"(?i)notion\.(?:so|site)/([0-9a-f]{32})")
                .expect("bare hex URL pattern is valid"),
        ),
        (
            UrlLayout::BareUuid,
            Regex::new(
                r"(?i)notion\.(?:so|site)/([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})"
            )
            .expect("bare uuid URL pattern is valid"),
        ),
        (
            UrlLayout::Slug,
            Regex::new(r"(?i)notion\.(?:so|site)/[^/]+-([0-9a-f]{32})")
                .expect("slug URL pattern is valid"),
        ),
        (
            UrlLayout::NestedSlug,
            Regex::new(r"(?i)notion\.(?:so|site)/[^/]+/[^/]+-([0-9a-f]{32})")
                .expect("nested slug URL pattern is valid"),
        ),
    ];
}

/// Finds the first URL layout that matches, returning the raw captured ID.
pub fn match_url_layout(url: &str) -> Option<(UrlLayout, &str)> {
    URL_ID_PATTERNS.iter().find_map(|(layout, pattern)| {
        pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| (*layout, m.as_str()))
    })
}

/// Extracts the canonical ID from a Notion URL, or `None` when no layout matches.
pub fn extract_id_from_url(url: &str) -> Option<NotionId> {
    let Some((layout, raw)) = match_url_layout(url) else {
        log::debug!("No Notion ID layout matched URL: {}", url);
        return None;
    };

    let uuid = Uuid::parse_str(raw).ok()?;
    let id = NotionId::from_uuid(uuid);
    log::debug!("Extracted {} from {} ({})", id, url, layout);
    Some(id)
}
