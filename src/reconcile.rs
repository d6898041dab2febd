//! Orchestrates translation and zone merging for the webhook operations.

use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::endpoint::{Changes, Endpoint};
use crate::error::AppError;
use crate::translate::Translator;
use crate::zone::types::ChangeSet;
use crate::zone::{ZoneStore, merge::merge};

/// Stateless core composing the translator and the zone merge. Every call is
/// independent; the zone is read fresh through the store immediately before
/// each merge.
pub struct Reconciler {
    translator: Translator,
    store: Arc<dyn ZoneStore>,
}

impl Reconciler {
    pub fn new(config: &AppConfig, store: Arc<dyn ZoneStore>) -> Self {
        Self {
            translator: Translator::new(config),
            store,
        }
    }

    /// List the zone's current records as controller endpoints. Returns a
    /// concrete, possibly empty list.
    pub async fn list_endpoints(&self) -> Result<Vec<Endpoint>, AppError> {
        let snapshot = self.store.read_zone().await?;
        let endpoints = self.translator.to_endpoints(&snapshot.records);
        info!(count = endpoints.len(), "listed zone records");
        Ok(endpoints)
    }

    /// Apply a requested change set. Update pairs are materialized into
    /// delete(old) + create(new) before merging; the merged list replaces the
    /// zone wholesale, carrying the snapshot's concurrency token through.
    pub async fn apply_changes(&self, changes: &Changes) -> Result<(), AppError> {
        let mut change_set = ChangeSet {
            create: self.translator.to_records(&changes.create),
            delete: self.translator.to_records(&changes.delete),
        };

        change_set
            .delete
            .extend(self.translator.to_records(&changes.update_old));
        change_set
            .create
            .extend(self.translator.to_records(&changes.update_new));

        info!(
            create = change_set.create.len(),
            delete = change_set.delete.len(),
            "applying changes"
        );

        let snapshot = self.store.read_zone().await?;
        let merged = merge(snapshot.records, &change_set);
        self.store
            .write_zone(&merged, snapshot.settings_fingerprint.as_deref())
            .await?;

        info!("zone changes applied");
        Ok(())
    }

    /// The controller's adjust hook; endpoints pass through unchanged.
    pub fn adjust_endpoints(&self, endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
        endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::ProviderSpecific;
    use crate::zone::types::{Record, RecordType, ZoneSnapshot};
    use std::sync::Mutex;

    struct FakeZoneStore {
        snapshot: ZoneSnapshot,
        fail_read: bool,
        written: Mutex<Option<(Vec<Record>, Option<String>)>>,
    }

    impl FakeZoneStore {
        fn new(snapshot: ZoneSnapshot) -> Self {
            Self {
                snapshot,
                fail_read: false,
                written: Mutex::new(None),
            }
        }

        fn failing_read() -> Self {
            Self {
                snapshot: ZoneSnapshot::default(),
                fail_read: true,
                written: Mutex::new(None),
            }
        }

        fn written(&self) -> Option<(Vec<Record>, Option<String>)> {
            self.written.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ZoneStore for FakeZoneStore {
        async fn read_zone(&self) -> Result<ZoneSnapshot, AppError> {
            if self.fail_read {
                return Err(AppError::remote("read failed"));
            }
            Ok(self.snapshot.clone())
        }

        async fn write_zone(
            &self,
            records: &[Record],
            fingerprint: Option<&str>,
        ) -> Result<(), AppError> {
            *self.written.lock().unwrap() =
                Some((records.to_vec(), fingerprint.map(str::to_string)));
            Ok(())
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            zone_name: "example.com".into(),
            registry_txt: false,
            txt_owner_id: "default".into(),
            txt_prefix: "_external-dns.".into(),
        }
    }

    fn record(rtype: RecordType, name: &str, target: &str, ttl: u32) -> Record {
        Record {
            rtype,
            name: name.into(),
            targets: vec![target.into()],
            ttl,
        }
    }

    fn endpoint(name: &str, rtype: &str, target: &str, ttl: i64) -> Endpoint {
        Endpoint {
            dns_name: name.into(),
            record_type: rtype.into(),
            targets: vec![target.into()],
            record_ttl: ttl,
            provider_specific: vec![],
            labels: Default::default(),
        }
    }

    #[tokio::test]
    async fn listing_an_empty_zone_returns_an_empty_list() {
        let store = Arc::new(FakeZoneStore::new(ZoneSnapshot::default()));
        let reconciler = Reconciler::new(&config(), store);

        let endpoints = reconciler.list_endpoints().await.unwrap();
        assert!(endpoints.is_empty());
    }

    #[tokio::test]
    async fn listing_surfaces_alias_records_as_cname_plus_flag() {
        let store = Arc::new(FakeZoneStore::new(ZoneSnapshot {
            records: vec![
                record(RecordType::A, "www", "1.2.3.4", 300),
                record(RecordType::ALIAS, "app", "target.example.com.", 600),
            ],
            settings_fingerprint: None,
        }));
        let reconciler = Reconciler::new(&config(), store);

        let endpoints = reconciler.list_endpoints().await.unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].dns_name, "www.example.com");
        assert_eq!(endpoints[0].record_type, "A");
        assert_eq!(endpoints[1].record_type, "CNAME");
        assert_eq!(
            endpoints[1].provider_specific,
            vec![ProviderSpecific {
                name: "alias".into(),
                value: "true".into(),
            }]
        );
    }

    #[tokio::test]
    async fn update_pairs_become_delete_plus_create() {
        let store = Arc::new(FakeZoneStore::new(ZoneSnapshot {
            records: vec![record(RecordType::A, "www", "1.2.3.4", 300)],
            settings_fingerprint: Some("v1-abc".into()),
        }));
        let reconciler = Reconciler::new(&config(), Arc::clone(&store) as Arc<dyn ZoneStore>);

        let changes = Changes {
            update_old: vec![endpoint("www.example.com", "A", "1.2.3.4", 300)],
            update_new: vec![endpoint("www.example.com", "A", "5.6.7.8", 120)],
            ..Default::default()
        };

        reconciler.apply_changes(&changes).await.unwrap();

        let (records, fingerprint) = store.written().expect("zone was not written");
        // The old record is gone, the new one is appended, the token is
        // carried through untouched.
        assert_eq!(records, vec![record(RecordType::A, "www", "5.6.7.8", 120)]);
        assert_eq!(fingerprint.as_deref(), Some("v1-abc"));
    }

    #[tokio::test]
    async fn unrelated_records_survive_an_apply() {
        let store = Arc::new(FakeZoneStore::new(ZoneSnapshot {
            records: vec![
                record(RecordType::A, "keep", "1.1.1.1", 300),
                record(RecordType::A, "delA", "2.2.2.2", 300),
            ],
            settings_fingerprint: None,
        }));
        let reconciler = Reconciler::new(&config(), Arc::clone(&store) as Arc<dyn ZoneStore>);

        let changes = Changes {
            create: vec![endpoint("newA.example.com", "A", "3.3.3.3", 0)],
            delete: vec![endpoint("delA.example.com", "A", "2.2.2.2", 300)],
            ..Default::default()
        };

        reconciler.apply_changes(&changes).await.unwrap();

        let (records, _) = store.written().unwrap();
        assert_eq!(
            records,
            vec![
                record(RecordType::A, "keep", "1.1.1.1", 300),
                record(RecordType::A, "newA", "3.3.3.3", 3600),
            ]
        );
    }

    #[tokio::test]
    async fn read_failure_aborts_before_any_write() {
        let store = Arc::new(FakeZoneStore::failing_read());
        let reconciler = Reconciler::new(&config(), Arc::clone(&store) as Arc<dyn ZoneStore>);

        let changes = Changes {
            create: vec![endpoint("www.example.com", "A", "1.2.3.4", 0)],
            ..Default::default()
        };

        let err = reconciler.apply_changes(&changes).await.unwrap_err();
        assert!(matches!(err, AppError::Remote(_)));
        assert!(store.written().is_none());
    }

    #[tokio::test]
    async fn adjust_endpoints_passes_through() {
        let store = Arc::new(FakeZoneStore::new(ZoneSnapshot::default()));
        let reconciler = Reconciler::new(&config(), store);

        let desired = vec![endpoint("www.example.com", "A", "1.2.3.4", 0)];
        assert_eq!(reconciler.adjust_endpoints(desired.clone()), desired);
    }
}
