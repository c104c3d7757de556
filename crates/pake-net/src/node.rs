//! Accessors for the static JSON resources a node publishes.
//!
//! A node serves three files under its root URL: `meta.json` (an object
//! describing the node), `mirrors.json` (a list of mirror URLs), and
//! `packages.json` (a list of package names). Each accessor binds one file
//! and its fallback shape; [`Node`] composes all three over a shared root.

use serde_json::Value;

use crate::fetch::{FetchError, Fetcher};

/// Join a resource name onto a root URL.
pub(crate) fn resource_url(root: &str, name: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), name)
}

/// Accessor for a node's `meta.json`.
#[derive(Debug, Clone)]
pub struct Meta {
    root: String,
    fetcher: Fetcher,
}

impl Meta {
    /// Bind the accessor to a root URL.
    pub fn new(root: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            root: root.into(),
            fetcher,
        }
    }

    /// Fetch the node metadata, or an empty object on failure.
    pub async fn get(&self) -> Value {
        let url = resource_url(&self.root, "meta.json");
        self.fetcher
            .json_or(&url, Value::Object(serde_json::Map::new()))
            .await
    }

    /// Fetch one string field of the node metadata, if present.
    pub async fn get_field(&self, key: &str) -> Option<String> {
        self.get()
            .await
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Accessor for a node's `mirrors.json`.
#[derive(Debug, Clone)]
pub struct Mirrors {
    root: String,
    fetcher: Fetcher,
}

impl Mirrors {
    /// Bind the accessor to a root URL.
    pub fn new(root: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            root: root.into(),
            fetcher,
        }
    }

    /// Fetch the node's mirror list, or an empty list on failure.
    pub async fn get(&self) -> Vec<Value> {
        let url = resource_url(&self.root, "mirrors.json");
        self.fetcher.get_or(&url, Vec::new()).await
    }
}

/// Accessor for a node's `packages.json`.
#[derive(Debug, Clone)]
pub struct Packages {
    root: String,
    fetcher: Fetcher,
}

impl Packages {
    /// Bind the accessor to a root URL.
    pub fn new(root: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            root: root.into(),
            fetcher,
        }
    }

    /// Fetch the node's package list, or an empty list on failure.
    pub async fn get(&self) -> Vec<Value> {
        let url = resource_url(&self.root, "packages.json");
        self.fetcher.get_or(&url, Vec::new()).await
    }
}

/// A remote node: the three resource accessors over one shared root.
///
/// The root is fixed at construction (a trailing `/` is trimmed) and all
/// accessors share one underlying HTTP client.
#[derive(Debug, Clone)]
pub struct Node {
    root: String,
    meta: Meta,
    mirrors: Mirrors,
    packages: Packages,
}

impl Node {
    /// Create a node handle with a fresh client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn new(root: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(root, Fetcher::new()?))
    }

    /// Create a node handle over an existing fetcher.
    pub fn with_fetcher(root: impl Into<String>, fetcher: Fetcher) -> Self {
        let root = root.into().trim_end_matches('/').to_string();
        Self {
            meta: Meta::new(&*root, fetcher.clone()),
            mirrors: Mirrors::new(&*root, fetcher.clone()),
            packages: Packages::new(&*root, fetcher),
            root,
        }
    }

    /// The node's root URL.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The `meta.json` accessor.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// The `mirrors.json` accessor.
    pub fn mirrors(&self) -> &Mirrors {
        &self.mirrors
    }

    /// The `packages.json` accessor.
    pub fn packages(&self) -> &Packages {
        &self.packages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    #[tokio::test]
    async fn test_meta_returns_parsed_object() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/meta.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"version":"1"}"#)
            .create_async()
            .await;

        let node = Node::new(server.url()).unwrap();
        assert_eq!(node.meta().get().await, json!({"version": "1"}));
    }

    #[tokio::test]
    async fn test_meta_missing_returns_empty_object() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/meta.json")
            .with_status(404)
            .create_async()
            .await;

        let node = Node::new(server.url()).unwrap();
        assert_eq!(node.meta().get().await, json!({}));
    }

    #[tokio::test]
    async fn test_mirrors_missing_returns_empty_list() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/mirrors.json")
            .with_status(404)
            .create_async()
            .await;

        let node = Node::new(server.url()).unwrap();
        assert!(node.mirrors().get().await.is_empty());
    }

    #[tokio::test]
    async fn test_packages_returns_name_list() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/packages.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["foo", "bar"]"#)
            .create_async()
            .await;

        let node = Node::new(server.url()).unwrap();
        assert_eq!(node.packages().get().await, vec![json!("foo"), json!("bar")]);
    }

    #[tokio::test]
    async fn test_get_field_reads_metadata_string() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/meta.json")
            .with_status(200)
            .with_body(r#"{"url":"https://node.example.test","author":"x"}"#)
            .create_async()
            .await;

        let node = Node::new(server.url()).unwrap();
        let meta = node.meta();
        assert_eq!(
            meta.get_field("url").await.as_deref(),
            Some("https://node.example.test")
        );
        assert_eq!(meta.get_field("missing").await, None);
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/meta.json")
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let node = Node::new(format!("{}/", server.url())).unwrap();
        assert_eq!(node.root(), server.url());
        assert_eq!(node.meta().get().await, json!({"ok": true}));
    }
}
