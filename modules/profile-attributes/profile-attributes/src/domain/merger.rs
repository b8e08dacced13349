//! Attribute merger: builds the attribute write-set from both state layers.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use profile_attributes_sdk::{
    AttributeMap, IdentityRef, IdentityStoreClient, IdentityStoreError, StateContainer,
};
use tracing::debug;

use super::error::DomainError;
use super::expression::ValueExpression;

/// Source of the values already stored for a user.
#[async_trait]
pub trait ExistingAttributesFetcher: Send + Sync {
    /// Stored values for exactly `names`. Names without values may be omitted.
    async fn fetch(&self, names: &BTreeSet<String>) -> Result<AttributeMap, IdentityStoreError>;
}

/// Fetches existing attributes of one identity from the identity store.
pub struct IdentityAttributesFetcher<'a> {
    store: &'a dyn IdentityStoreClient,
    identity: &'a IdentityRef,
}

impl<'a> IdentityAttributesFetcher<'a> {
    #[must_use]
    pub fn new(store: &'a dyn IdentityStoreClient, identity: &'a IdentityRef) -> Self {
        Self { store, identity }
    }
}

#[async_trait]
impl ExistingAttributesFetcher for IdentityAttributesFetcher<'_> {
    async fn fetch(&self, names: &BTreeSet<String>) -> Result<AttributeMap, IdentityStoreError> {
        self.store.get_attributes(self.identity, names).await
    }
}

fn merge_mapping<S>(attributes: &mut AttributeMap, state: &S, mapping: &BTreeMap<String, String>)
where
    S: StateContainer + ?Sized,
{
    for (name, expression) in mapping {
        let values = ValueExpression::parse(expression).resolve(state);
        if values.is_empty() {
            debug!(attribute = %name, "No value resolved, skipping");
            continue;
        }
        attributes.insert(name.clone(), values);
    }
}

/// Build the attribute write-set.
///
/// `properties` resolve against `shared_state`, then `transient_properties`
/// against `transient_state`; a transient entry replaces a shared entry of
/// the same name. Entries that resolve to nothing are left out. With
/// `add_attributes`, the stored values of every configured attribute are
/// unioned into the result.
///
/// # Errors
///
/// `StateLookup` when `add_attributes` is set and the stored values cannot be
/// fetched. No partial map is returned.
#[tracing::instrument(skip_all, fields(
    properties = properties.len(),
    transient_properties = transient_properties.len(),
    add_attributes = add_attributes
))]
pub async fn build_attribute_map<P, T>(
    shared_state: &P,
    transient_state: &T,
    properties: &BTreeMap<String, String>,
    transient_properties: &BTreeMap<String, String>,
    add_attributes: bool,
    existing: &dyn ExistingAttributesFetcher,
) -> Result<AttributeMap, DomainError>
where
    P: StateContainer + Sync + ?Sized,
    T: StateContainer + Sync + ?Sized,
{
    let mut attributes = AttributeMap::new();
    merge_mapping(&mut attributes, shared_state, properties);
    merge_mapping(&mut attributes, transient_state, transient_properties);

    let configured: BTreeSet<String> = properties
        .keys()
        .chain(transient_properties.keys())
        .cloned()
        .collect();

    if add_attributes && !configured.is_empty() {
        let stored = existing.fetch(&configured).await.map_err(|e| {
            tracing::error!(keys = ?configured, error = %e, "Unable to retrieve attributes for keys");
            DomainError::StateLookup {
                keys: configured.iter().cloned().collect(),
                source: e,
            }
        })?;

        for (name, values) in stored {
            attributes.entry(name).or_default().extend(values);
        }
    }

    Ok(attributes)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Mutex;

    use profile_attributes_sdk::AttributeValues;
    use serde_json::{Value, json};

    use super::*;

    /// Fetcher backed by a fixed map; records every requested key set.
    #[derive(Default)]
    struct MockFetcher {
        stored: AttributeMap,
        fail: bool,
        requests: Mutex<Vec<BTreeSet<String>>>,
    }

    impl MockFetcher {
        fn with(stored: &[(&str, &str)]) -> Self {
            Self {
                stored: stored
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), values(&[*v])))
                    .collect(),
                ..Self::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn requests(&self) -> Vec<BTreeSet<String>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExistingAttributesFetcher for MockFetcher {
        async fn fetch(
            &self,
            names: &BTreeSet<String>,
        ) -> Result<AttributeMap, IdentityStoreError> {
            self.requests.lock().unwrap().push(names.clone());
            if self.fail {
                return Err(IdentityStoreError::Unavailable("store offline".to_owned()));
            }
            Ok(self
                .stored
                .iter()
                .filter(|(k, _)| names.contains(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect())
        }
    }

    fn values(items: &[&str]) -> AttributeValues {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn mapping(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    async fn build(
        shared: &Value,
        transient: &Value,
        properties: &[(&str, &str)],
        transient_properties: &[(&str, &str)],
        add_attributes: bool,
        fetcher: &MockFetcher,
    ) -> Result<AttributeMap, DomainError> {
        build_attribute_map(
            shared,
            transient,
            &mapping(properties),
            &mapping(transient_properties),
            add_attributes,
            fetcher,
        )
        .await
    }

    #[tokio::test]
    async fn literal_mapping_without_store() {
        let fetcher = MockFetcher::with(&[("mail", "old@example.com")]);
        let result = build(
            &json!({}),
            &json!({}),
            &[("mail", "\"fixed@example.com\"")],
            &[],
            false,
            &fetcher,
        )
        .await
        .unwrap();

        assert_eq!(
            result,
            AttributeMap::from([("mail".to_owned(), values(&["fixed@example.com"]))])
        );
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn undefined_reference_adds_no_key() {
        let result = build(
            &json!({ "other": "x" }),
            &json!({}),
            &[("nickname", "uiLabel")],
            &[],
            false,
            &MockFetcher::default(),
        )
        .await
        .unwrap();

        assert!(result.is_empty());
        assert!(!result.contains_key("nickname"));
    }

    #[tokio::test]
    async fn additive_mode_unions_stored_values() {
        let fetcher = MockFetcher::with(&[("roles", "c")]);
        let result = build(
            &json!({ "roleList": ["a", "b"] }),
            &json!({}),
            &[("roles", "roleList")],
            &[],
            true,
            &fetcher,
        )
        .await
        .unwrap();

        assert_eq!(result["roles"], values(&["a", "b", "c"]));
        assert_eq!(fetcher.requests(), vec![values(&["roles"])]);
    }

    #[tokio::test]
    async fn replace_mode_ignores_stored_values() {
        let fetcher = MockFetcher::with(&[("roles", "c")]);
        let result = build(
            &json!({ "roleList": ["a", "b"] }),
            &json!({}),
            &[("roles", "roleList")],
            &[],
            false,
            &fetcher,
        )
        .await
        .unwrap();

        assert_eq!(result["roles"], values(&["a", "b"]));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn transient_entry_overrides_shared_entry() {
        let result = build(
            &json!({ "label": "from-shared" }),
            &json!({ "label": "from-transient" }),
            &[("nickname", "label")],
            &[("nickname", "label")],
            false,
            &MockFetcher::default(),
        )
        .await
        .unwrap();

        assert_eq!(result["nickname"], values(&["from-transient"]));
    }

    #[tokio::test]
    async fn unresolved_transient_entry_keeps_shared_entry() {
        let result = build(
            &json!({ "label": "from-shared" }),
            &json!({}),
            &[("nickname", "label")],
            &[("nickname", "label")],
            false,
            &MockFetcher::default(),
        )
        .await
        .unwrap();

        assert_eq!(result["nickname"], values(&["from-shared"]));
    }

    #[tokio::test]
    async fn transient_mapping_reads_transient_state_only() {
        let result = build(
            &json!({ "otp": "shared" }),
            &json!({}),
            &[],
            &[("otpSecret", "otp")],
            false,
            &MockFetcher::default(),
        )
        .await
        .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn additive_mode_fills_unresolved_keys_from_store() {
        let fetcher = MockFetcher::with(&[("nickname", "old"), ("unrelated", "x")]);
        let result = build(
            &json!({}),
            &json!({ "roleList": ["a"] }),
            &[("nickname", "uiLabel")],
            &[("roles", "roleList")],
            true,
            &fetcher,
        )
        .await
        .unwrap();

        assert_eq!(
            result,
            AttributeMap::from([
                ("nickname".to_owned(), values(&["old"])),
                ("roles".to_owned(), values(&["a"])),
            ])
        );
        assert_eq!(fetcher.requests(), vec![values(&["nickname", "roles"])]);
    }

    #[tokio::test]
    async fn additive_mode_with_no_configured_keys_skips_fetch() {
        let fetcher = MockFetcher::failing();
        let result = build(&json!({}), &json!({}), &[], &[], true, &fetcher)
            .await
            .unwrap();

        assert!(result.is_empty());
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_aborts_with_state_lookup() {
        let fetcher = MockFetcher::failing();
        let result = build(
            &json!({ "roleList": ["a"] }),
            &json!({}),
            &[("roles", "roleList")],
            &[("mail", "\"fixed@example.com\"")],
            true,
            &fetcher,
        )
        .await;

        match result {
            Err(DomainError::StateLookup { keys, source }) => {
                assert_eq!(keys, vec!["mail".to_owned(), "roles".to_owned()]);
                assert!(matches!(source, IdentityStoreError::Unavailable(_)));
            }
            other => panic!("Expected StateLookup, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn shared_and_transient_entries_combine() {
        let result = build(
            &json!({ "uiLabel": "Demo" }),
            &json!({ "roleList": ["a", "a"] }),
            &[("nickname", "uiLabel"), ("mail", "\"fixed@example.com\"")],
            &[("roles", "roleList")],
            false,
            &MockFetcher::default(),
        )
        .await
        .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result["nickname"], values(&["Demo"]));
        assert_eq!(result["mail"], values(&["fixed@example.com"]));
        assert_eq!(result["roles"], values(&["a"]));
    }
}
