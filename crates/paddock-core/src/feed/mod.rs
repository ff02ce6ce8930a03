//! Feed view-state coordination.
//!
//! Owns the in-memory entry collection and the transient flags
//! front-ends render: fetch status, inline load errors, one-shot
//! toast/success notices, and the upload progress flag. State is only
//! mutated in the completion of an operation, inside
//! `watch::Sender::send_modify`, so observers always see a consistent
//! snapshot.

mod notice;

pub use notice::Notice;

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::api::CarGateway;
use crate::media::UploadImage;
use crate::models::{CarDraft, CarEntry, CarId};
use crate::Error;

/// Toast message armed when a mutation fails.
pub const MUTATION_FAILED_MESSAGE: &str = "Something went wrong, please try again.";

/// Status of the most recent fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No fetch has been issued yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The collection reflects the most recent successful fetch
    Success,
    /// The most recent fetch failed; see the inline load error
    Failed,
}

/// Inline (non-toast) load failure, retained for display until the next
/// fetch resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// The service has no entries for this owner, or nobody is signed in
    NoEntries,
    /// Any other load failure; the front-end should offer a retry
    LoadFailed,
}

impl LoadError {
    /// User-facing message for this failure.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoEntries => "You have not added any cars yet.",
            Self::LoadFailed => "Failed to load your cars.",
        }
    }
}

/// Mutation kinds reported through the one-shot success notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Delete,
}

/// Everything a front-end needs to render the feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedSnapshot {
    /// Last successfully fetched entries, in server order
    pub entries: Vec<CarEntry>,
    /// Status of the most recent fetch
    pub status: FetchStatus,
    /// Inline load failure, set while `status` is [`FetchStatus::Failed`]
    pub load_error: Option<LoadError>,
    /// One-shot mutation failure message
    pub toast: Notice<String>,
    /// One-shot mutation success marker
    pub succeeded: Notice<Operation>,
    /// Whether an upload is currently in flight
    pub uploading: bool,
}

/// Mediates between front-end intents and the remote gateway.
///
/// Fetch transitions: `Idle/Success/Failed -> Loading` on every
/// [`refresh`], then `Loading -> Success` or `Loading -> Failed`.
/// Mutations refresh on success and arm the toast on failure; no
/// gateway error ever escapes to observers as a fault.
///
/// [`refresh`]: Self::refresh
pub struct FeedCoordinator<G> {
    gateway: G,
    state: watch::Sender<FeedSnapshot>,
    fetch_seq: AtomicU64,
}

impl<G: CarGateway> FeedCoordinator<G> {
    /// Create a coordinator over the given gateway.
    ///
    /// The snapshot starts [`FetchStatus::Idle`]; callers issue the
    /// initial [`refresh`] themselves and again whenever the active
    /// owner email changes.
    ///
    /// [`refresh`]: Self::refresh
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: watch::channel(FeedSnapshot::default()).0,
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.borrow().clone()
    }

    /// Observe snapshots: yields the current one immediately and again
    /// on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.state.subscribe()
    }

    /// Borrow the underlying gateway, e.g. for image URL derivation.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fetch the entries owned by `owner_email` and publish the result.
    ///
    /// If another refresh starts while this one is in flight, the older
    /// completion is discarded; the newest request always wins. On
    /// failure the previous collection is kept but `status` turns
    /// [`FetchStatus::Failed`], so stale rows are never shown as fresh.
    pub async fn refresh(&self, owner_email: &str) {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|snapshot| {
            snapshot.status = FetchStatus::Loading;
            snapshot.load_error = None;
        });

        let result = self.gateway.list_cars(owner_email).await;
        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!("Discarding superseded fetch #{seq}");
            return;
        }

        self.state.send_modify(|snapshot| match result {
            Ok(entries) => {
                snapshot.entries = entries;
                snapshot.status = FetchStatus::Success;
                snapshot.load_error = None;
            }
            Err(Error::NotFound(_)) => {
                snapshot.status = FetchStatus::Failed;
                snapshot.load_error = Some(LoadError::NoEntries);
            }
            Err(error) => {
                tracing::warn!("Failed to load entries: {error}");
                snapshot.status = FetchStatus::Failed;
                snapshot.load_error = Some(LoadError::LoadFailed);
            }
        });
    }

    /// Upload a new entry, then refresh the owner's feed on success.
    ///
    /// The upload flag is armed before the call and cleared afterwards
    /// regardless of outcome. Failures arm the toast and do not refresh.
    pub async fn create(&self, draft: CarDraft, image: UploadImage) {
        self.state.send_modify(|snapshot| snapshot.uploading = true);
        let result = self.gateway.create_car(&draft, &image).await;
        self.state.send_modify(|snapshot| snapshot.uploading = false);

        match result {
            Ok(entry) => {
                tracing::debug!("Created entry {}", entry.id);
                self.state
                    .send_modify(|snapshot| snapshot.succeeded.arm(Operation::Create));
                self.refresh(&draft.owner_email).await;
            }
            Err(error) => {
                tracing::warn!("Failed to create entry: {error}");
                self.state.send_modify(|snapshot| {
                    snapshot.toast.arm(MUTATION_FAILED_MESSAGE.to_string());
                });
            }
        }
    }

    /// Delete an entry, then refresh the owner's feed on success.
    ///
    /// Failures (including ownership violations) arm the toast and do
    /// not refresh, leaving the collection untouched.
    pub async fn delete(&self, id: CarId, owner_email: &str) {
        match self.gateway.delete_car(id, owner_email).await {
            Ok(receipt) => {
                tracing::debug!("Deleted entry {id}: {}", receipt.message);
                self.state
                    .send_modify(|snapshot| snapshot.succeeded.arm(Operation::Delete));
                self.refresh(owner_email).await;
            }
            Err(error) => {
                tracing::warn!("Failed to delete entry {id}: {error}");
                self.state.send_modify(|snapshot| {
                    snapshot.toast.arm(MUTATION_FAILED_MESSAGE.to_string());
                });
            }
        }
    }

    /// Clear the one-shot toast and success notices. Idempotent; only
    /// notifies observers when something was actually pending.
    pub fn acknowledge(&self) {
        self.state.send_if_modified(|snapshot| {
            let changed = snapshot.toast.is_armed() || snapshot.succeeded.is_armed();
            snapshot.toast.acknowledge();
            snapshot.succeeded.acknowledge();
            changed
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::DeleteReceipt;
    use crate::Result;

    fn entry(id: i64, owner: &str, name: &str) -> CarEntry {
        CarEntry {
            id: CarId::new(id),
            owner_email: owner.to_string(),
            name: name.to_string(),
            category: "Sedan".to_string(),
            location: "Jakarta".to_string(),
            image_id: format!("img-{id}"),
            created_at: "2024-05-01T10:30:00".to_string(),
        }
    }

    fn draft(owner: &str, name: &str) -> CarDraft {
        CarDraft::new(owner, name, "Sedan", "Jakarta").unwrap()
    }

    fn upload_image() -> UploadImage {
        UploadImage {
            bytes: vec![0xFF, 0xD8, 0xFF],
            width: 1,
            height: 1,
        }
    }

    fn not_found() -> Error {
        Error::NotFound(String::new())
    }

    fn server_error() -> Error {
        Error::Server {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[derive(Default)]
    struct StubGateway {
        lists: Mutex<VecDeque<Result<Vec<CarEntry>>>>,
        list_delays: Mutex<VecDeque<Duration>>,
        creates: Mutex<VecDeque<Result<CarEntry>>>,
        create_delays: Mutex<VecDeque<Duration>>,
        deletes: Mutex<VecDeque<Result<DeleteReceipt>>>,
        list_calls: AtomicUsize,
    }

    impl StubGateway {
        fn queue_list(&self, result: Result<Vec<CarEntry>>) {
            self.lists.lock().unwrap().push_back(result);
        }

        fn queue_list_delayed(&self, result: Result<Vec<CarEntry>>, delay: Duration) {
            self.lists.lock().unwrap().push_back(result);
            self.list_delays.lock().unwrap().push_back(delay);
        }

        fn queue_create(&self, result: Result<CarEntry>) {
            self.creates.lock().unwrap().push_back(result);
        }

        fn queue_create_delayed(&self, result: Result<CarEntry>, delay: Duration) {
            self.creates.lock().unwrap().push_back(result);
            self.create_delays.lock().unwrap().push_back(delay);
        }

        fn queue_delete(&self, result: Result<DeleteReceipt>) {
            self.deletes.lock().unwrap().push_back(result);
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    impl CarGateway for StubGateway {
        async fn list_cars(&self, _owner_email: &str) -> Result<Vec<CarEntry>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            // Claim this call's result before sleeping so concurrent calls
            // keep their queued order.
            let result = self
                .lists
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected list call");
            let delay = self.list_delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }

        async fn create_car(&self, _draft: &CarDraft, _image: &UploadImage) -> Result<CarEntry> {
            let result = self
                .creates
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected create call");
            let delay = self.create_delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }

        async fn delete_car(&self, _id: CarId, _owner_email: &str) -> Result<DeleteReceipt> {
            self.deletes
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected delete call")
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn not_found_maps_to_no_entries_not_empty_success() {
        let gateway = StubGateway::default();
        gateway.queue_list(Err(not_found()));
        let coordinator = FeedCoordinator::new(gateway);

        coordinator.refresh("a@x.com").await;

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.status, FetchStatus::Failed);
        assert_eq!(snapshot.load_error, Some(LoadError::NoEntries));
        assert_eq!(
            snapshot.load_error.unwrap().message(),
            "You have not added any cars yet."
        );
        assert!(snapshot.entries.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn other_load_failures_map_to_load_failed() {
        let gateway = StubGateway::default();
        gateway.queue_list(Err(server_error()));
        let coordinator = FeedCoordinator::new(gateway);

        coordinator.refresh("a@x.com").await;

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.status, FetchStatus::Failed);
        assert_eq!(snapshot.load_error, Some(LoadError::LoadFailed));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn successful_fetch_replaces_the_collection_wholesale() {
        let gateway = StubGateway::default();
        gateway.queue_list(Ok(vec![
            entry(1, "a@x.com", "Civic"),
            entry(2, "a@x.com", "Jazz"),
        ]));
        gateway.queue_list(Ok(vec![entry(2, "a@x.com", "Jazz")]));
        let coordinator = FeedCoordinator::new(gateway);

        coordinator.refresh("a@x.com").await;
        assert_eq!(coordinator.snapshot().entries.len(), 2);

        coordinator.refresh("a@x.com").await;
        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.status, FetchStatus::Success);
        assert_eq!(snapshot.entries, vec![entry(2, "a@x.com", "Jazz")]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn create_success_refreshes_and_arms_success() {
        let gateway = StubGateway::default();
        gateway.queue_list(Err(not_found()));
        gateway.queue_create(Ok(entry(1, "a@x.com", "Civic")));
        gateway.queue_list(Ok(vec![entry(1, "a@x.com", "Civic")]));
        let coordinator = FeedCoordinator::new(gateway);

        coordinator.refresh("a@x.com").await;
        assert_eq!(coordinator.snapshot().status, FetchStatus::Failed);

        coordinator
            .create(draft("a@x.com", "Civic"), upload_image())
            .await;

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.status, FetchStatus::Success);
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].name, "Civic");
        assert_eq!(snapshot.succeeded.armed(), Some(&Operation::Create));
        assert!(!snapshot.uploading);
        assert!(!snapshot.toast.is_armed());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn create_failure_arms_toast_and_skips_refresh() {
        let gateway = StubGateway::default();
        gateway.queue_create(Err(server_error()));
        let coordinator = FeedCoordinator::new(gateway);

        coordinator
            .create(draft("a@x.com", "Civic"), upload_image())
            .await;

        let snapshot = coordinator.snapshot();
        assert_eq!(
            snapshot.toast.armed().map(String::as_str),
            Some(MUTATION_FAILED_MESSAGE)
        );
        assert!(!snapshot.succeeded.is_armed());
        assert!(!snapshot.uploading, "upload flag must clear on failure");
        assert_eq!(coordinator.gateway().list_calls(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_failure_leaves_the_collection_unchanged() {
        let gateway = StubGateway::default();
        gateway.queue_list(Ok(vec![entry(5, "b@y.com", "Jazz")]));
        gateway.queue_delete(Err(Error::Forbidden("not yours".to_string())));
        let coordinator = FeedCoordinator::new(gateway);

        coordinator.refresh("a@x.com").await;
        coordinator.delete(CarId::new(5), "a@x.com").await;

        let snapshot = coordinator.snapshot();
        assert!(snapshot.toast.is_armed());
        assert_eq!(snapshot.entries, vec![entry(5, "b@y.com", "Jazz")]);
        assert_eq!(coordinator.gateway().list_calls(), 1, "no refresh on failure");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_success_refreshes_and_arms_success() {
        let gateway = StubGateway::default();
        gateway.queue_delete(Ok(DeleteReceipt {
            message: "deleted".to_string(),
        }));
        gateway.queue_list(Ok(Vec::new()));
        let coordinator = FeedCoordinator::new(gateway);

        coordinator.delete(CarId::new(5), "a@x.com").await;

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.status, FetchStatus::Success);
        assert!(snapshot.entries.is_empty());
        assert_eq!(snapshot.succeeded.armed(), Some(&Operation::Delete));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn acknowledge_clears_notices_idempotently() {
        let gateway = StubGateway::default();
        gateway.queue_create(Err(server_error()));
        let coordinator = FeedCoordinator::new(gateway);

        coordinator
            .create(draft("a@x.com", "Civic"), upload_image())
            .await;
        assert!(coordinator.snapshot().toast.is_armed());

        coordinator.acknowledge();
        let once = coordinator.snapshot();
        assert!(!once.toast.is_armed());
        assert!(!once.succeeded.is_armed());

        coordinator.acknowledge();
        assert_eq!(coordinator.snapshot(), once);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stale_fetch_completion_is_discarded() {
        let gateway = StubGateway::default();
        gateway.queue_list_delayed(
            Ok(vec![entry(1, "a@x.com", "Old")]),
            Duration::from_millis(80),
        );
        gateway.queue_list_delayed(
            Ok(vec![entry(2, "a@x.com", "New")]),
            Duration::from_millis(1),
        );
        let coordinator = FeedCoordinator::new(gateway);

        tokio::join!(coordinator.refresh("a@x.com"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            coordinator.refresh("a@x.com").await;
        });

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.status, FetchStatus::Success);
        assert_eq!(snapshot.entries, vec![entry(2, "a@x.com", "New")]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upload_flag_is_visible_while_the_create_is_in_flight() {
        let gateway = StubGateway::default();
        gateway.queue_create_delayed(
            Ok(entry(1, "a@x.com", "Civic")),
            Duration::from_millis(50),
        );
        gateway.queue_list(Ok(vec![entry(1, "a@x.com", "Civic")]));
        let coordinator = FeedCoordinator::new(gateway);
        let mut rx = coordinator.subscribe();

        tokio::join!(
            coordinator.create(draft("a@x.com", "Civic"), upload_image()),
            async {
                let seen = rx.wait_for(|snapshot| snapshot.uploading).await;
                assert!(seen.is_ok());
            }
        );

        assert!(!coordinator.snapshot().uploading);
    }
}
