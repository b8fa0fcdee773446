// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL every endpoint path is resolved against.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// The API version pinned in the `Notion-Version` header.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Per-request transport timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Public host used when synthesizing a row's page URL.
pub const NOTION_PAGE_HOST: &str = "https://www.notion.so";

// ---------------------------------------------------------------------------
// Concurrency boundaries
// ---------------------------------------------------------------------------

/// Lower bound of the default row fetch concurrency.
pub const MIN_DEFAULT_CONCURRENCY: usize = 4;

/// Upper bound of the default row fetch concurrency.
pub const MAX_DEFAULT_CONCURRENCY: usize = 24;

/// Hard cap on concurrent row fetches, whatever the configuration says.
pub const MAX_CONCURRENCY: usize = 32;

// ---------------------------------------------------------------------------
// Fallback titles
// ---------------------------------------------------------------------------

/// Title of a page with no title property, or an empty one.
pub const UNTITLED_PAGE: &str = "Untitled";

/// Title of a database whose title array is empty.
pub const UNTITLED_DATABASE: &str = "Untitled Database";

/// Inline title of a `child_database` block that carries none.
pub const UNTITLED_CHILD_DATABASE: &str = "Untitled";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Callout prefix when the block has no emoji icon.
pub const DEFAULT_CALLOUT_EMOJI: &str = "💡";

/// Estimated characters per block, used to pre-allocate output strings.
///
/// This is a performance hint, not a constraint.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

/// Characters of page content shown in a chapter summary.
pub const CONTENT_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing response bodies in logs.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

/// Trailing characters left visible when masking a sensitive header.
pub const MASKED_HEADER_VISIBLE_CHARS: usize = 4;
