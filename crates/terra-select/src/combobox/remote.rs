//! Server-backed candidate source.

use std::sync::Arc;

use futures_util::FutureExt;

use super::item::{CandidateItem, ItemKey};
use super::source::{CandidateSource, LookupFuture, Resolution, SourceKind, meets_threshold};

/// Maximum number of candidates requested from, and kept of, a remote search.
pub const REMOTE_RESULT_CAP: usize = 15;

/// Default record field used as the display label.
pub const DEFAULT_LABEL_KEY: &str = "label";

/// Something that can run a search query.
///
/// Implemented for [`HttpSearchBackend`] and for any
/// `Fn(&str, usize) -> LookupFuture<CandidateItem>`, which keeps test doubles
/// short.
pub trait SearchBackend: Send + Sync + 'static {
    /// Look up `query`, asking for at most `limit` records.
    fn search(&self, query: &str, limit: usize) -> LookupFuture<CandidateItem>;
}

impl<F> SearchBackend for F
where
    F: Fn(&str, usize) -> LookupFuture<CandidateItem> + Send + Sync + 'static,
{
    fn search(&self, query: &str, limit: usize) -> LookupFuture<CandidateItem> {
        self(query, limit)
    }
}

/// Candidate source that searches a backend.
pub struct RemoteSource<B> {
    backend: Arc<B>,
    label_key: String,
}

impl<B: SearchBackend> RemoteSource<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            label_key: DEFAULT_LABEL_KEY.to_string(),
        }
    }

    /// Use `label_key` as the display label field.
    pub fn with_label_key(mut self, label_key: impl Into<String>) -> Self {
        self.label_key = label_key.into();
        self
    }

    pub fn label_key(&self) -> &str {
        &self.label_key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B> std::fmt::Debug for RemoteSource<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSource")
            .field("label_key", &self.label_key)
            .finish_non_exhaustive()
    }
}

impl<B: SearchBackend> CandidateSource for RemoteSource<B> {
    type Item = CandidateItem;

    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    fn resolve(&self, query: &str, min_chars: usize) -> Resolution<CandidateItem> {
        if !meets_threshold(query, min_chars) {
            return Resolution::Ready(Vec::new());
        }
        let lookup = self
            .backend
            .search(query, REMOTE_RESULT_CAP)
            .map(|result| {
                result.map(|mut items| {
                    items.truncate(REMOTE_RESULT_CAP);
                    items
                })
            });
        Resolution::Pending(lookup.boxed())
    }

    fn label(&self, item: &CandidateItem) -> String {
        item.label(&self.label_key)
    }

    fn item_key(&self, item: &CandidateItem, position: usize) -> ItemKey {
        item.key(position)
    }
}

#[cfg(feature = "networking")]
pub use http_backend::HttpSearchBackend;

#[cfg(feature = "networking")]
mod http_backend {
    use futures_util::FutureExt;
    use terra_select_net::AgronomyClient;

    use super::SearchBackend;
    use crate::combobox::item::CandidateItem;
    use crate::combobox::source::LookupFuture;
    use crate::error::SelectError;

    /// Searches `GET <search_url>?q=&limit=` through an [`AgronomyClient`].
    #[derive(Debug, Clone)]
    pub struct HttpSearchBackend {
        client: AgronomyClient,
        search_url: String,
    }

    impl HttpSearchBackend {
        pub fn new(client: AgronomyClient, search_url: impl Into<String>) -> Self {
            Self {
                client,
                search_url: search_url.into(),
            }
        }

        pub fn search_url(&self) -> &str {
            &self.search_url
        }
    }

    impl SearchBackend for HttpSearchBackend {
        fn search(&self, query: &str, limit: usize) -> LookupFuture<CandidateItem> {
            let client = self.client.clone();
            let search_url = self.search_url.clone();
            let query = query.to_string();
            async move {
                let records = client
                    .search(&search_url, &query, limit)
                    .await
                    .map_err(SelectError::from)?;
                Ok(records.into_iter().map(CandidateItem::new).collect())
            }
            .boxed()
        }
    }
}
