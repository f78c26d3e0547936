use quire_store::VersionedStore;
use quire_types::Metadata;

use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::request::DocumentInfo;

/// Whether a document matches a typeahead query.
///
/// The name is checked first; tags are only consulted when it does not
/// match. Matching is a case-sensitive prefix test.
pub fn matches(query: &str, name: &str, meta: &Metadata) -> bool {
    name.starts_with(query) || meta.tags().iter().any(|tag| tag.starts_with(query))
}

/// Lazy typeahead search over all documents.
///
/// Document names are listed when the search starts; each document's latest
/// metadata is read only when the iterator reaches it.
pub struct Search<'a> {
    store: &'a dyn VersionedStore,
    config: &'a GatewayConfig,
    query: String,
    names: std::vec::IntoIter<String>,
}

impl<'a> Search<'a> {
    pub fn new(
        store: &'a dyn VersionedStore,
        config: &'a GatewayConfig,
        query: impl Into<String>,
    ) -> GatewayResult<Self> {
        Ok(Self {
            store,
            config,
            query: query.into(),
            names: store.documents()?.into_iter(),
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Iterator for Search<'_> {
    type Item = GatewayResult<DocumentInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        for file in self.names.by_ref() {
            let meta = match self.store.latest_metadata(&file) {
                Ok(meta) => meta,
                Err(err) => return Some(Err(err.into())),
            };
            if self.config.search_public_only && !meta.is_public() {
                continue;
            }
            if matches(&self.query, &file, &meta) {
                return Some(Ok(DocumentInfo {
                    url: self.config.url_for(&file),
                    file,
                    meta,
                }));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.names.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_store::InMemoryStore;

    fn tagged(tags: &[&str], public: bool) -> Metadata {
        Metadata {
            public: Some(public),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..Metadata::default()
        }
    }

    fn fixture() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.create("test.pl", b"", &tagged(&["testing"], true)).unwrap();
        store.create("queens.pl", b"", &tagged(&["puzzle", "teaching"], true)).unwrap();
        store.create("draft.pl", b"", &tagged(&["wip"], false)).unwrap();
        store
    }

    fn files(search: Search<'_>) -> Vec<String> {
        search.map(|info| info.unwrap().file).collect()
    }

    #[test]
    fn matches_by_name_or_tag_prefix() {
        let meta = tagged(&["testing"], true);
        assert!(matches("te", "test.pl", &meta));
        assert!(matches("tes", "other.pl", &meta));
        assert!(!matches("Te", "test.pl", &meta));
        assert!(!matches("st", "test.pl", &meta));
    }

    #[test]
    fn finds_name_and_tag_matches() {
        let store = fixture();
        let config = GatewayConfig::default();
        let found = files(Search::new(&store, &config, "te").unwrap());
        assert_eq!(found, vec!["queens.pl".to_string(), "test.pl".to_string()]);
    }

    #[test]
    fn match_carries_url_and_metadata() {
        let store = fixture();
        let config = GatewayConfig::default();
        let info = Search::new(&store, &config, "test").unwrap().next().unwrap().unwrap();
        assert_eq!(info.url, "/p/test.pl");
        assert_eq!(info.meta.tags(), ["testing".to_string()]);
    }

    #[test]
    fn public_only_scope_skips_private_documents() {
        let store = fixture();
        let mut config = GatewayConfig::default();
        assert_eq!(files(Search::new(&store, &config, "d").unwrap()), vec!["draft.pl".to_string()]);
        config.search_public_only = true;
        assert!(files(Search::new(&store, &config, "d").unwrap()).is_empty());
    }

    #[test]
    fn search_is_restartable_and_lazy() {
        let store = fixture();
        let config = GatewayConfig::default();
        let mut search = Search::new(&store, &config, "").unwrap();
        assert_eq!(search.query(), "");
        assert_eq!(search.size_hint(), (0, Some(3)));
        assert!(search.next().is_some());
        assert_eq!(search.size_hint(), (0, Some(2)));
        assert_eq!(Search::new(&store, &config, "").unwrap().count(), 3);
    }
}
