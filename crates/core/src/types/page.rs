//! Cursor pagination primitives.
//!
//! Mirrors the Relay-style connection shape returned by the Shopify Admin
//! API (`edges { node cursor } pageInfo { ... }`) and the paging directive
//! the image browser sends to the local image action.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Pagination information for a single page of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there are more items after this page.
    #[serde(default)]
    pub has_next_page: bool,
    /// Whether there are items before this page.
    #[serde(default)]
    pub has_previous_page: bool,
    /// Cursor for the first item.
    #[serde(default)]
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A node plus its position in the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<T> {
    /// The record.
    pub node: T,
    /// Opaque cursor for this edge, when the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl<T> Edge<T> {
    /// Wrap a node without a per-edge cursor.
    #[must_use]
    pub const fn new(node: T) -> Self {
        Self { node, cursor: None }
    }
}

/// One page of a cursor-paginated collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// Edges on this page, in server order.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    /// Boundary cursors and next/previous availability.
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Consume the connection and return its nodes in order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }

    /// Returns true if the page has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Direction of a paging request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageDirection {
    /// Page forward from the end cursor.
    #[default]
    Next,
    /// Page backward from the start cursor.
    Prev,
}

impl PageDirection {
    /// Wire tag for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }
}

impl fmt::Display for PageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paging directive sent to the image page action.
///
/// Travels as a JSON string inside the [`PageRequest::FORM_FIELD`] form field:
///
/// ```json
/// {"type":"next","num":5,"cursor":null}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Paging direction.
    #[serde(rename = "type")]
    pub direction: PageDirection,
    /// Number of records to return.
    pub num: u32,
    /// Cursor to page from; `None` requests the first page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl PageRequest {
    /// Form field carrying the JSON-encoded directive.
    pub const FORM_FIELD: &'static str = "initDataFetcher";

    /// Page size the image browser requests.
    pub const DEFAULT_PAGE_SIZE: u32 = 5;

    /// Largest page the Shopify Admin API will return.
    pub const MAX_PAGE_SIZE: u32 = 250;

    /// Create a directive with the default page size.
    #[must_use]
    pub const fn new(direction: PageDirection, cursor: Option<String>) -> Self {
        Self {
            direction,
            num: Self::DEFAULT_PAGE_SIZE,
            cursor,
        }
    }

    /// Returns true if `num` is within `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub const fn has_valid_size(&self) -> bool {
        self.num >= 1 && self.num <= Self::MAX_PAGE_SIZE
    }
}

/// The two edge cursors of the last page shown.
///
/// Both are empty until the first page arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// Start cursor of the last page.
    pub start: String,
    /// End cursor of the last page.
    pub end: String,
}

impl PageCursor {
    /// Build from a page's info, treating missing cursors as empty.
    #[must_use]
    pub fn from_page_info(info: &PageInfo) -> Self {
        Self {
            start: info.start_cursor.clone().unwrap_or_default(),
            end: info.end_cursor.clone().unwrap_or_default(),
        }
    }
}
