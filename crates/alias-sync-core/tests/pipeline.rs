//! End-to-end pipeline tests over mock directory and store boundaries.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alias_sync_core::async_trait;
use alias_sync_core::prelude::*;

/// In-memory directory returning canned entries (or a canned error).
struct MockDirectory {
    entries: Vec<DirectoryEntry>,
    fail_unavailable: bool,
    /// The last (base_dn, filter, attributes) request, for assertions.
    last_request: Mutex<Option<(String, String, Vec<String>)>>,
}

impl MockDirectory {
    fn with_entries(entries: Vec<DirectoryEntry>) -> Self {
        Self {
            entries,
            fail_unavailable: false,
            last_request: Mutex::new(None),
        }
    }

    fn unavailable() -> Self {
        Self {
            entries: Vec::new(),
            fail_unavailable: true,
            last_request: Mutex::new(None),
        }
    }
}

#[async_trait]
impl DirectorySearch for MockDirectory {
    async fn search(
        &self,
        base_dn: &str,
        filter: &str,
        attributes: &[String],
    ) -> SyncResult<Vec<DirectoryEntry>> {
        *self.last_request.lock().unwrap() = Some((
            base_dn.to_string(),
            filter.to_string(),
            attributes.to_vec(),
        ));
        if self.fail_unavailable {
            return Err(SyncError::directory_unavailable("mock server down"));
        }
        Ok(self.entries.clone())
    }
}

/// In-memory identity store with optional per-email insert failures.
struct MockStore {
    identities: Mutex<Vec<ExistingIdentity>>,
    next_id: AtomicUsize,
    fail_insert_for: HashSet<String>,
    fail_delete_for: HashSet<String>,
    list_calls: AtomicUsize,
}

impl MockStore {
    fn with_emails(emails: &[&str]) -> Self {
        let identities = emails
            .iter()
            .enumerate()
            .map(|(i, email)| ExistingIdentity::new(i.to_string(), *email))
            .collect::<Vec<_>>();
        Self {
            next_id: AtomicUsize::new(identities.len()),
            identities: Mutex::new(identities),
            fail_insert_for: HashSet::new(),
            fail_delete_for: HashSet::new(),
            list_calls: AtomicUsize::new(0),
        }
    }

    fn failing_insert_for(mut self, email: &str) -> Self {
        self.fail_insert_for.insert(email.to_string());
        self
    }

    fn failing_delete_for(mut self, id: &str) -> Self {
        self.fail_delete_for.insert(id.to_string());
        self
    }

    fn emails(&self) -> Vec<String> {
        self.identities
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.email.clone())
            .collect()
    }
}

#[async_trait]
impl IdentityStore for MockStore {
    async fn list(&self) -> SyncResult<Vec<ExistingIdentity>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.identities.lock().unwrap().clone())
    }

    async fn insert(&self, identity: &IdentityRecord) -> SyncResult<IdentityId> {
        if self.fail_insert_for.contains(&identity.email) {
            return Err(SyncError::store("mock insert failure"));
        }
        let id = IdentityId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        self.identities
            .lock()
            .unwrap()
            .push(ExistingIdentity::new(id.clone(), identity.email.clone()));
        Ok(id)
    }

    async fn delete(&self, id: &IdentityId) -> SyncResult<()> {
        if self.fail_delete_for.contains(id.as_str()) {
            return Err(SyncError::store("mock delete failure"));
        }
        self.identities.lock().unwrap().retain(|i| &i.id != id);
        Ok(())
    }
}

fn config() -> SyncConfig {
    SyncConfig::new(
        MailOptions {
            search_domain: "example.com".to_string(),
            impersonation_separator: "*".to_string(),
            ..MailOptions::default()
        },
        DirectoryOptions::new("ou=users,dc=example,dc=com", "(uid=%local)", "mail")
            .with_name_attr("cn"),
    )
}

fn pipeline(directory: Arc<MockDirectory>, store: Arc<MockStore>) -> LoginSync {
    LoginSync::new(config(), directory, store).expect("valid config")
}

#[tokio::test]
async fn run_inserts_new_and_deletes_stale_identities() {
    let entry = DirectoryEntry::new()
        .with("mail", &["b@x.com", "c@x.com"])
        .with("cn", &["Bob"]);
    let directory = Arc::new(MockDirectory::with_entries(vec![entry]));
    let store = Arc::new(MockStore::with_emails(&["a@x.com", "b@x.com"]));

    let summary = pipeline(directory.clone(), store.clone())
        .run("bob@example.com")
        .await
        .unwrap();

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.deleted, 1);
    assert!(summary.is_complete());

    let mut emails = store.emails();
    emails.sort();
    assert_eq!(emails, vec!["b@x.com", "c@x.com"]);
}

#[tokio::test]
async fn filter_and_attributes_reach_the_directory() {
    let directory = Arc::new(MockDirectory::with_entries(vec![]));
    let store = Arc::new(MockStore::with_emails(&[]));

    pipeline(directory.clone(), store)
        .plan("bob*admin")
        .await
        .unwrap();

    let (base_dn, filter, attributes) = directory.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(base_dn, "ou=users,dc=example,dc=com");
    // Impersonation separator stripped, search domain not in the %local field.
    assert_eq!(filter, "(uid=bob)");
    assert_eq!(attributes, vec!["mail", "cn"]);
}

#[tokio::test]
async fn empty_directory_result_leaves_store_untouched() {
    let directory = Arc::new(MockDirectory::with_entries(vec![]));
    let store = Arc::new(MockStore::with_emails(&["keep@x.com"]));

    let summary = pipeline(directory, store.clone())
        .run("bob@example.com")
        .await
        .unwrap();

    assert_eq!(summary, SyncSummary::default());
    assert_eq!(store.emails(), vec!["keep@x.com"]);
    // The no-op path must not even list the store.
    assert_eq!(store.list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn directory_failure_propagates_and_preserves_store() {
    let directory = Arc::new(MockDirectory::unavailable());
    let store = Arc::new(MockStore::with_emails(&["keep@x.com"]));

    let err = pipeline(directory, store.clone())
        .run("bob@example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::DirectoryUnavailable { .. }));
    assert!(err.is_transient());
    assert_eq!(store.emails(), vec!["keep@x.com"]);
}

#[tokio::test]
async fn store_failures_are_per_item_and_do_not_abort() {
    let entry = DirectoryEntry::new().with("mail", &["new1@x.com", "new2@x.com"]);
    let directory = Arc::new(MockDirectory::with_entries(vec![entry]));
    // Existing ids: "0" -> stale1, "1" -> stale2. Fail one insert and one delete.
    let store = Arc::new(
        MockStore::with_emails(&["stale1@x.com", "stale2@x.com"])
            .failing_insert_for("new1@x.com")
            .failing_delete_for("0"),
    );

    let summary = pipeline(directory, store.clone())
        .run("bob@example.com")
        .await
        .unwrap();

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.insert_failures, 1);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.delete_failures, 1);
    assert!(!summary.is_complete());

    // The non-failing items were applied despite the failures.
    let emails = store.emails();
    assert!(emails.contains(&"new2@x.com".to_string()));
    assert!(emails.contains(&"stale1@x.com".to_string()));
    assert!(!emails.contains(&"stale2@x.com".to_string()));
}

#[tokio::test]
async fn second_run_converges_to_noop() {
    let entry = DirectoryEntry::new().with("mail", &["b@x.com", "c@x.com"]);
    let directory = Arc::new(MockDirectory::with_entries(vec![entry]));
    let store = Arc::new(MockStore::with_emails(&["a@x.com"]));

    let sync = pipeline(directory, store.clone());

    let first = sync.run("bob@example.com").await.unwrap();
    assert_eq!(first.inserted, 2);
    assert_eq!(first.deleted, 1);

    let second = sync.run("bob@example.com").await.unwrap();
    assert_eq!(second, SyncSummary::default());

    let plan = sync.plan("bob@example.com").await.unwrap();
    assert!(plan.is_noop());
}

#[tokio::test]
async fn find_domain_and_ignored_domains_shape_the_candidates() {
    let entry = DirectoryEntry::new().with("mail", &["sales", "sales@other.org"]);
    let directory = Arc::new(MockDirectory::with_entries(vec![entry]));
    let store = Arc::new(MockStore::with_emails(&[]));

    let mut cfg = config();
    cfg.mail.find_domain = "example.com".to_string();
    cfg.directory = cfg.directory.ignore_domain("other.org");

    let sync = LoginSync::new(cfg, directory, store).unwrap();
    let plan = sync.plan("bob@example.com").await.unwrap();

    assert_eq!(plan.to_insert.len(), 1);
    assert_eq!(plan.to_insert[0].email, "sales@example.com");
}

#[tokio::test]
async fn invalid_config_is_rejected_at_construction() {
    let directory = Arc::new(MockDirectory::with_entries(vec![]));
    let store = Arc::new(MockStore::with_emails(&[]));

    let mut cfg = config();
    cfg.directory.mail_attr = String::new();

    let err = LoginSync::new(cfg, directory, store).unwrap_err();
    assert!(matches!(err, SyncError::InvalidConfiguration { .. }));
}
