//! GraphQL documents for the Shopify Admin API.

/// Search filter restricting `files` to images.
pub const IMAGE_FILES_FILTER: &str = "media_type:IMAGE";

/// One page of store image files, forward or backward.
///
/// Exactly one of `first`/`last` is set by the caller; `after`/`before`
/// carry the cursor for the matching direction.
pub const STORE_IMAGES: &str = r"
query StoreImages($first: Int, $after: String, $last: Int, $before: String, $query: String) {
  files(first: $first, after: $after, last: $last, before: $before, query: $query) {
    edges {
      cursor
      node {
        __typename
        ... on MediaImage {
          id
          image {
            url
            altText
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      hasPreviousPage
      startCursor
      endCursor
    }
  }
}
";
