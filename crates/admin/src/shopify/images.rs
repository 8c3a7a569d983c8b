//! Store image paging for the image page action.

use imagelingo_core::{Connection, Edge, ImageRecord, ImageSource, PageDirection, PageRequest};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use super::{AdminClient, AdminShopifyError, queries};

#[derive(Debug, Deserialize)]
struct StoreImagesData {
    files: Connection<FileNode>,
}

/// A `File` node; only `MediaImage` nodes carry `id` and `image`.
#[derive(Debug, Deserialize)]
struct FileNode {
    #[serde(rename = "__typename")]
    typename: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    image: Option<ImageSource>,
}

impl AdminClient {
    /// Get one page of store images.
    ///
    /// `next` pages forward from `cursor` (`first`/`after`), `prev` pages
    /// backward (`last`/`before`). A missing or empty cursor requests the
    /// first page in that direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(store = %self.store(), direction = %request.direction, num = request.num))]
    pub async fn get_store_images(
        &self,
        request: &PageRequest,
    ) -> Result<Connection<ImageRecord>, AdminShopifyError> {
        let data: StoreImagesData = self
            .execute(queries::STORE_IMAGES, store_images_variables(request))
            .await?;

        let connection = into_image_connection(data.files);
        if connection.is_empty() {
            tracing::info!("No store images on this page");
        } else {
            tracing::debug!(count = connection.edges.len(), "Fetched store images");
        }
        Ok(connection)
    }
}

fn store_images_variables(request: &PageRequest) -> Value {
    let cursor = request.cursor.as_deref().filter(|c| !c.is_empty());

    match request.direction {
        PageDirection::Next => json!({
            "first": request.num,
            "after": cursor,
            "query": queries::IMAGE_FILES_FILTER,
        }),
        PageDirection::Prev => json!({
            "last": request.num,
            "before": cursor,
            "query": queries::IMAGE_FILES_FILTER,
        }),
    }
}

/// Keep image nodes and map them to records; `src` is the image URL.
fn into_image_connection(files: Connection<FileNode>) -> Connection<ImageRecord> {
    let edges = files
        .edges
        .into_iter()
        .filter_map(|edge| {
            let node = edge.node;
            let id = node.id?;
            let src = node.image.as_ref().map(|i| i.url.clone());
            Some(Edge {
                node: ImageRecord {
                    id,
                    image: node.image,
                    typename: node.typename,
                    src,
                },
                cursor: edge.cursor,
            })
        })
        .collect();

    Connection {
        edges,
        page_info: files.page_info,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mockito::{Matcher, Server};
    use secrecy::SecretString;
    use url::Url;

    use super::*;

    fn files_response() -> Value {
        json!({
            "data": {
                "files": {
                    "edges": [
                        {
                            "cursor": "c1",
                            "node": {
                                "__typename": "MediaImage",
                                "id": "gid://shopify/MediaImage/1",
                                "image": {"url": "https://cdn.shopify.com/1.png", "altText": "one"}
                            }
                        },
                        {
                            "cursor": "c2",
                            "node": {"__typename": "GenericFile"}
                        }
                    ],
                    "pageInfo": {
                        "hasNextPage": true,
                        "hasPreviousPage": false,
                        "startCursor": "c1",
                        "endCursor": "c2"
                    }
                }
            }
        })
    }

    #[test]
    fn test_next_variables() {
        let request = PageRequest::new(PageDirection::Next, Some("abc".to_string()));
        let vars = store_images_variables(&request);
        assert_eq!(vars["first"], 5);
        assert_eq!(vars["after"], "abc");
        assert!(vars.get("last").is_none());
    }

    #[test]
    fn test_prev_variables() {
        let request = PageRequest::new(PageDirection::Prev, Some("abc".to_string()));
        let vars = store_images_variables(&request);
        assert_eq!(vars["last"], 5);
        assert_eq!(vars["before"], "abc");
        assert!(vars.get("first").is_none());
    }

    #[test]
    fn test_empty_cursor_is_null() {
        let request = PageRequest::new(PageDirection::Next, Some(String::new()));
        let vars = store_images_variables(&request);
        assert!(vars["after"].is_null());
    }

    #[test]
    fn test_non_image_nodes_skipped() {
        let data: StoreImagesData =
            serde_json::from_value(files_response()["data"].clone()).unwrap();
        let conn = into_image_connection(data.files);

        assert_eq!(conn.edges.len(), 1);
        let record = &conn.edges[0].node;
        assert_eq!(record.id, "gid://shopify/MediaImage/1");
        assert_eq!(record.src.as_deref(), Some("https://cdn.shopify.com/1.png"));
        assert_eq!(record.section(), "MediaImage");
        assert_eq!(conn.page_info.end_cursor.as_deref(), Some("c2"));
    }

    #[tokio::test]
    async fn test_get_store_images_sends_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql.json")
            .match_header("x-shopify-access-token", "shpat_test_token")
            .match_body(Matcher::PartialJson(json!({
                "variables": {"first": 5, "query": "media_type:IMAGE"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(files_response().to_string())
            .create_async()
            .await;

        let endpoint = Url::parse(&format!("{}/graphql.json", server.url())).unwrap();
        let client = AdminClient::with_endpoint(
            endpoint,
            "demo.myshopify.com",
            &SecretString::from("shpat_test_token"),
        )
        .unwrap();

        let page = client
            .get_store_images(&PageRequest::new(PageDirection::Next, None))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.edges.len(), 1);
        assert!(page.page_info.has_next_page);
    }

    #[tokio::test]
    async fn test_graphql_errors_surface() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/graphql.json")
            .with_status(200)
            .with_body(r#"{"errors":[{"message":"Invalid cursor"}]}"#)
            .create_async()
            .await;

        let endpoint = Url::parse(&format!("{}/graphql.json", server.url())).unwrap();
        let client =
            AdminClient::with_endpoint(endpoint, "demo", &SecretString::from("shpat_x")).unwrap();

        let result = client
            .get_store_images(&PageRequest::new(PageDirection::Prev, Some("bad".to_string())))
            .await;

        match result {
            Err(AdminShopifyError::GraphQL(errors)) => {
                assert_eq!(errors[0].message, "Invalid cursor");
            }
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/graphql.json")
            .with_status(429)
            .with_header("Retry-After", "2")
            .create_async()
            .await;

        let endpoint = Url::parse(&format!("{}/graphql.json", server.url())).unwrap();
        let client =
            AdminClient::with_endpoint(endpoint, "demo", &SecretString::from("shpat_x")).unwrap();

        let result = client
            .get_store_images(&PageRequest::new(PageDirection::Next, None))
            .await;
        assert!(matches!(result, Err(AdminShopifyError::RateLimited(2))));
    }
}
