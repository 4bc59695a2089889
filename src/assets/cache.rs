//! Deduplicating asset cache
//!
//! At most one load is in flight per (kind, path). Every caller asking for a
//! path while its load is pending waits on that same load and receives the
//! same outcome. Successful loads are kept for the life of the cache; failed
//! loads are forgotten so the next request tries again.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot};

use super::AssetKind;
use super::source::AssetSource;
use crate::core::AssetError;

type Settlement<A> = Result<Arc<A>, AssetError>;

/// Observable state of one cache key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryState {
    /// A load is in flight
    Pending,
    /// The asset is loaded and shared
    Resolved,
}

enum Entry<A> {
    Pending(Vec<oneshot::Sender<Settlement<A>>>),
    Resolved(Arc<A>),
}

/// How a request was satisfied at claim time
enum Claim<A> {
    /// Already loaded
    Ready(Arc<A>),
    /// Queued behind a load already in flight
    Joined(oneshot::Receiver<Settlement<A>>),
    /// No entry existed; the caller must start the load
    Started(oneshot::Receiver<Settlement<A>>),
    /// No entry existed and there is no runtime to start a load on
    NoRuntime,
}

/// Entries of one asset kind
struct Slots<A> {
    kind: AssetKind,
    entries: Mutex<HashMap<String, Entry<A>>>,
}

impl<A> Slots<A> {
    fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<A>>> {
        // Entries are only replaced whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim(&self, path: &str, can_start: bool) -> Claim<A> {
        let mut entries = self.lock();
        match entries.get_mut(path) {
            Some(Entry::Resolved(asset)) => Claim::Ready(Arc::clone(asset)),
            Some(Entry::Pending(waiters)) => {
                let (tx, rx) = oneshot::channel();
                waiters.push(tx);
                Claim::Joined(rx)
            }
            None if !can_start => Claim::NoRuntime,
            None => {
                let (tx, rx) = oneshot::channel();
                entries.insert(path.to_string(), Entry::Pending(vec![tx]));
                Claim::Started(rx)
            }
        }
    }

    /// Settle a pending entry and notify all of its waiters under the lock,
    /// so nobody can join between the outcome and the broadcast.
    fn settle(&self, path: &str, outcome: Result<A, AssetError>) {
        let mut entries = self.lock();
        let waiters = match entries.remove(path) {
            Some(Entry::Pending(waiters)) => waiters,
            Some(resolved) => {
                entries.insert(path.to_string(), resolved);
                return;
            }
            None => return,
        };

        match outcome {
            Ok(asset) => {
                let asset = Arc::new(asset);
                entries.insert(path.to_string(), Entry::Resolved(Arc::clone(&asset)));
                for waiter in waiters {
                    let _ = waiter.send(Ok(Arc::clone(&asset)));
                }
            }
            Err(err) => {
                for waiter in waiters {
                    let _ = waiter.send(Err(err.clone()));
                }
            }
        }
    }

    fn state(&self, path: &str) -> Option<EntryState> {
        self.lock().get(path).map(|entry| match entry {
            Entry::Pending(_) => EntryState::Pending,
            Entry::Resolved(_) => EntryState::Resolved,
        })
    }

    fn resolved_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|e| matches!(e, Entry::Resolved(_)))
            .count()
    }
}

/// Settles its entry as abandoned if the load task goes away without an
/// outcome (panic or runtime shutdown), so the key is never stuck pending.
struct SettleGuard<A> {
    slots: Arc<Slots<A>>,
    path: String,
    settled: bool,
}

impl<A> SettleGuard<A> {
    fn new(slots: Arc<Slots<A>>, path: String) -> Self {
        Self {
            slots,
            path,
            settled: false,
        }
    }

    fn settle(mut self, outcome: Result<A, AssetError>) {
        self.settled = true;
        self.slots.settle(&self.path, outcome);
    }
}

impl<A> Drop for SettleGuard<A> {
    fn drop(&mut self) {
        if !self.settled {
            let err = AssetError::Abandoned {
                kind: self.slots.kind,
                path: self.path.clone(),
            };
            self.slots.settle(&self.path, Err(err));
        }
    }
}

/// Shared cache of decoded models and textures in front of an [`AssetSource`].
///
/// Cloning the cache clones a handle; all clones share entries. Loads run as
/// tokio tasks; a request that would start a load outside a tokio runtime
/// fails with [`AssetError::Load`] and leaves no entry behind.
pub struct AssetCache<S: AssetSource> {
    source: Arc<S>,
    models: Arc<Slots<S::Model>>,
    textures: Arc<Slots<S::Texture>>,
}

impl<S: AssetSource> Clone for AssetCache<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            models: Arc::clone(&self.models),
            textures: Arc::clone(&self.textures),
        }
    }
}

impl<S: AssetSource> AssetCache<S> {
    pub fn new(source: S) -> Self {
        Self::with_source(Arc::new(source))
    }

    /// Create a cache over an already shared source
    pub fn with_source(source: Arc<S>) -> Self {
        Self {
            source,
            models: Arc::new(Slots::new(AssetKind::Model)),
            textures: Arc::new(Slots::new(AssetKind::Texture)),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Load a model, sharing any load already in flight for `path`.
    ///
    /// The load starts when this is called, not when the returned future is
    /// first polled, and runs to completion even if the future is dropped.
    pub fn load_model(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Arc<S::Model>, AssetError>> + Send + 'static + use<S> {
        let source = Arc::clone(&self.source);
        request(&self.models, path, move |path| async move {
            source.load_model(&path).await
        })
    }

    /// Load a texture. Same contract as [`AssetCache::load_model`], separate keys.
    pub fn load_texture(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Arc<S::Texture>, AssetError>> + Send + 'static + use<S> {
        let source = Arc::clone(&self.source);
        request(&self.textures, path, move |path| async move {
            source.load_texture(&path).await
        })
    }

    /// Load every model in `paths`, keyed like the input.
    ///
    /// Fails with [`AssetError::Batch`] as soon as any member fails. The other
    /// loads keep running and still populate the cache.
    pub async fn preload_models<K, P>(
        &self,
        paths: impl IntoIterator<Item = (K, P)>,
    ) -> Result<HashMap<K, Arc<S::Model>>, AssetError>
    where
        K: Eq + Hash + Send + 'static,
        P: AsRef<str>,
    {
        let pending = paths
            .into_iter()
            .map(|(key, path)| {
                let path = path.as_ref().to_string();
                let load = self.load_model(&path);
                (key, path, load)
            })
            .collect();
        collect_batch(AssetKind::Model, pending).await
    }

    /// Load every texture in `paths`. Same contract as [`AssetCache::preload_models`].
    pub async fn preload_textures<K, P>(
        &self,
        paths: impl IntoIterator<Item = (K, P)>,
    ) -> Result<HashMap<K, Arc<S::Texture>>, AssetError>
    where
        K: Eq + Hash + Send + 'static,
        P: AsRef<str>,
    {
        let pending = paths
            .into_iter()
            .map(|(key, path)| {
                let path = path.as_ref().to_string();
                let load = self.load_texture(&path);
                (key, path, load)
            })
            .collect();
        collect_batch(AssetKind::Texture, pending).await
    }

    pub fn model_state(&self, path: &str) -> Option<EntryState> {
        self.models.state(path)
    }

    pub fn texture_state(&self, path: &str) -> Option<EntryState> {
        self.textures.state(path)
    }

    /// Number of loaded assets of `kind`
    pub fn resolved_count(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::Model => self.models.resolved_count(),
            AssetKind::Texture => self.textures.resolved_count(),
        }
    }
}

/// Claim `path`, spawning `fetch` if this request is the first, and return
/// a future for the shared outcome.
fn request<A, F, Fut>(
    slots: &Arc<Slots<A>>,
    path: &str,
    fetch: F,
) -> impl Future<Output = Settlement<A>> + Send + 'static + use<A, F, Fut>
where
    A: Send + Sync + 'static,
    F: FnOnce(String) -> Fut + 'static,
    Fut: Future<Output = Result<A, AssetError>> + Send + 'static,
{
    let kind = slots.kind;
    let owned_path = path.to_string();

    let runtime = tokio::runtime::Handle::try_current().ok();
    let claim = slots.claim(path, runtime.is_some());
    if let (Claim::Started(_), Some(runtime)) = (&claim, runtime) {
        let guard = SettleGuard::new(Arc::clone(slots), owned_path.clone());
        let load = fetch(owned_path.clone());
        runtime.spawn(async move {
            let outcome = load.await;
            guard.settle(outcome);
        });
    }

    async move {
        match claim {
            Claim::Ready(asset) => Ok(asset),
            Claim::NoRuntime => Err(AssetError::load(kind, owned_path, "no tokio runtime to load on")),
            Claim::Joined(rx) | Claim::Started(rx) => match rx.await {
                Ok(settlement) => settlement,
                Err(_) => Err(AssetError::Abandoned {
                    kind,
                    path: owned_path,
                }),
            },
        }
    }
}

/// Await a batch of started loads, failing on the first error
async fn collect_batch<K, A, Fut>(
    kind: AssetKind,
    pending: Vec<(K, String, Fut)>,
) -> Result<HashMap<K, Arc<A>>, AssetError>
where
    K: Eq + Hash + Send + 'static,
    A: Send + Sync + 'static,
    Fut: Future<Output = Settlement<A>> + Send + 'static,
{
    let mut outstanding: HashSet<String> = pending.iter().map(|(_, path, _)| path.clone()).collect();
    let expected = pending.len();
    let (tx, mut rx) = mpsc::unbounded_channel();

    for (key, path, load) in pending {
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = load.await;
            let _ = tx.send((key, path, outcome));
        });
    }
    drop(tx);

    let mut loaded = HashMap::with_capacity(expected);
    for _ in 0..expected {
        match rx.recv().await {
            Some((key, path, Ok(asset))) => {
                outstanding.remove(&path);
                loaded.insert(key, asset);
            }
            Some((_, _, Err(err))) => return Err(AssetError::Batch(Box::new(err))),
            None => {
                let path = outstanding.into_iter().next().unwrap_or_default();
                return Err(AssetError::Batch(Box::new(AssetError::Abandoned { kind, path })));
            }
        }
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;

    #[derive(Debug)]
    struct MockAsset {
        path: String,
        attempt: usize,
    }

    /// Source that counts loads per path and can hold them until released
    #[derive(Default)]
    struct MockSource {
        loads: Mutex<HashMap<(AssetKind, String), usize>>,
        failing: Mutex<HashSet<String>>,
        gate: Option<Semaphore>,
        total: AtomicUsize,
    }

    impl MockSource {
        fn gated() -> Self {
            Self {
                gate: Some(Semaphore::new(0)),
                ..Default::default()
            }
        }

        fn fail(&self, path: &str) {
            self.failing.lock().unwrap().insert(path.to_string());
        }

        fn heal(&self, path: &str) {
            self.failing.lock().unwrap().remove(path);
        }

        fn release(&self, n: usize) {
            if let Some(gate) = &self.gate {
                gate.add_permits(n);
            }
        }

        fn loads(&self, kind: AssetKind, path: &str) -> usize {
            let loads = self.loads.lock().unwrap();
            loads.get(&(kind, path.to_string())).copied().unwrap_or(0)
        }

        async fn load(&self, kind: AssetKind, path: &str) -> Result<MockAsset, AssetError> {
            let attempt = {
                let mut loads = self.loads.lock().unwrap();
                let count = loads.entry((kind, path.to_string())).or_insert(0);
                *count += 1;
                *count
            };
            self.total.fetch_add(1, Ordering::SeqCst);

            // Failing paths fail without waiting on the gate
            if self.failing.lock().unwrap().contains(path) {
                return Err(AssetError::load(kind, path, "not found"));
            }
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            if path == "panic" {
                panic!("decoder blew up");
            }
            Ok(MockAsset {
                path: path.to_string(),
                attempt,
            })
        }
    }

    impl AssetSource for MockSource {
        type Model = MockAsset;
        type Texture = MockAsset;

        async fn load_model(&self, path: &str) -> Result<MockAsset, AssetError> {
            self.load(AssetKind::Model, path).await
        }

        async fn load_texture(&self, path: &str) -> Result<MockAsset, AssetError> {
            self.load(AssetKind::Texture, path).await
        }
    }

    #[tokio::test]
    async fn test_resolved_entry_served_without_io() {
        let cache = AssetCache::new(MockSource::default());
        let first = cache.load_model("/models/sofa.glb").await.unwrap();
        let second = cache.load_model("/models/sofa.glb").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source().loads(AssetKind::Model, "/models/sofa.glb"), 1);
        assert_eq!(cache.model_state("/models/sofa.glb"), Some(EntryState::Resolved));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_load() {
        let cache = AssetCache::new(MockSource::gated());
        let a = cache.load_model("/models/sofa.glb");
        let b = cache.load_model("/models/sofa.glb");
        assert_eq!(cache.model_state("/models/sofa.glb"), Some(EntryState::Pending));

        // Joins after the load started but before it settles
        let c = cache.load_model("/models/sofa.glb");
        cache.source().release(1);

        let (a, b, c) = tokio::join!(a, b, c);
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
        assert_eq!(a.path, "/models/sofa.glb");
        assert_eq!(cache.source().loads(AssetKind::Model, "/models/sofa.glb"), 1);
    }

    #[tokio::test]
    async fn test_failure_reaches_every_waiter() {
        let source = MockSource::gated();
        source.fail("/models/missing.glb");
        let cache = AssetCache::new(source);

        let a = cache.load_model("/models/missing.glb");
        let b = cache.load_model("/models/missing.glb");
        cache.source().release(1);
        let (a, b) = tokio::join!(a, b);

        let expected = AssetError::load(AssetKind::Model, "/models/missing.glb", "not found");
        assert_eq!(a.unwrap_err(), expected);
        assert_eq!(b.unwrap_err(), expected);
        assert_eq!(cache.model_state("/models/missing.glb"), None);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let source = MockSource::default();
        source.fail("/models/flaky.glb");
        let cache = AssetCache::new(source);

        assert!(cache.load_model("/models/flaky.glb").await.is_err());
        cache.source().heal("/models/flaky.glb");

        let asset = cache.load_model("/models/flaky.glb").await.unwrap();
        assert_eq!(asset.attempt, 2);
        assert_eq!(cache.source().loads(AssetKind::Model, "/models/flaky.glb"), 2);
    }

    #[tokio::test]
    async fn test_repeated_failures_each_retry() {
        let source = MockSource::default();
        source.fail("/textures/gone.jpg");
        let cache = AssetCache::new(source);

        for _ in 0..3 {
            assert!(cache.load_texture("/textures/gone.jpg").await.is_err());
        }
        assert_eq!(cache.source().loads(AssetKind::Texture, "/textures/gone.jpg"), 3);
    }

    #[tokio::test]
    async fn test_kinds_have_separate_keys() {
        let cache = AssetCache::new(MockSource::default());
        cache.load_model("/assets/oak").await.unwrap();
        cache.load_texture("/assets/oak").await.unwrap();

        assert_eq!(cache.source().loads(AssetKind::Model, "/assets/oak"), 1);
        assert_eq!(cache.source().loads(AssetKind::Texture, "/assets/oak"), 1);
        assert_eq!(cache.resolved_count(AssetKind::Model), 1);
        assert_eq!(cache.resolved_count(AssetKind::Texture), 1);
    }

    #[tokio::test]
    async fn test_load_runs_to_completion_when_caller_drops() {
        let cache = AssetCache::new(MockSource::gated());
        drop(cache.load_model("/models/chair.glb"));
        cache.source().release(1);

        let asset = cache.load_model("/models/chair.glb").await.unwrap();
        assert_eq!(asset.attempt, 1);
        assert_eq!(cache.source().total.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_panicking_load_is_abandoned_not_stuck() {
        let cache = AssetCache::new(MockSource::default());
        let err = cache.load_model("panic").await.unwrap_err();
        assert_eq!(
            err,
            AssetError::Abandoned {
                kind: AssetKind::Model,
                path: "panic".to_string()
            }
        );
        assert_eq!(cache.model_state("panic"), None);
    }

    #[tokio::test]
    async fn test_preload_all_succeed() {
        let cache = AssetCache::new(MockSource::default());
        let loaded = cache
            .preload_models([("sofa", "/models/sofa.glb"), ("shelf", "/models/shelf.glb")])
            .await
            .unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["shelf"].path, "/models/shelf.glb");
        assert_eq!(cache.resolved_count(AssetKind::Model), 2);
    }

    #[tokio::test]
    async fn test_preload_fails_fast_but_keeps_successes() {
        let source = MockSource::default();
        source.fail("/models/b.glb");
        let cache = AssetCache::new(source);

        let err = cache
            .preload_models([("a", "/models/a.glb"), ("b", "/models/b.glb")])
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::Batch(_)));
        assert_eq!(err.path(), "/models/b.glb");

        let a = cache.load_model("/models/a.glb").await.unwrap();
        assert_eq!(a.attempt, 1);
        assert_eq!(cache.source().loads(AssetKind::Model, "/models/a.glb"), 1);
    }

    #[tokio::test]
    async fn test_preload_rejects_while_sibling_in_flight() {
        let source = MockSource::gated();
        source.fail("/models/b.glb");
        let cache = AssetCache::new(source);

        let err = cache
            .preload_models([("a", "/models/a.glb"), ("b", "/models/b.glb")])
            .await
            .unwrap_err();
        assert_eq!(err.path(), "/models/b.glb");
        assert_eq!(cache.model_state("/models/a.glb"), Some(EntryState::Pending));

        // The sibling was not cancelled; it settles into the cache
        cache.source().release(1);
        let a = cache.load_model("/models/a.glb").await.unwrap();
        assert_eq!(a.attempt, 1);
        assert_eq!(cache.source().loads(AssetKind::Model, "/models/a.glb"), 1);
        assert_eq!(cache.model_state("/models/a.glb"), Some(EntryState::Resolved));
    }

    #[test]
    fn test_load_outside_runtime_fails_without_entry() {
        let cache = AssetCache::new(MockSource::default());
        let outside = cache.load_model("/models/sofa.glb");
        assert_eq!(cache.model_state("/models/sofa.glb"), None);

        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let err = rt.block_on(outside).unwrap_err();
        assert!(matches!(err, AssetError::Load { kind: AssetKind::Model, .. }));
        assert_eq!(cache.source().total.load(Ordering::SeqCst), 0);

        // Inside the runtime the same path loads normally, and a resolved
        // entry is then served even from outside it
        rt.block_on(async { cache.load_model("/models/sofa.glb").await })
            .unwrap();
        let cached = rt.block_on(cache.load_model("/models/sofa.glb")).unwrap();
        assert_eq!(cached.attempt, 1);
    }

    #[tokio::test]
    async fn test_preload_shares_inflight_loads() {
        let cache = AssetCache::new(MockSource::gated());
        let direct = cache.load_texture("/textures/oak.jpg");
        let batch = cache.preload_textures([("oak", "/textures/oak.jpg")]);
        cache.source().release(1);

        let (direct, batch) = tokio::join!(direct, batch);
        assert!(Arc::ptr_eq(&direct.unwrap(), &batch.unwrap()["oak"]));
        assert_eq!(cache.source().loads(AssetKind::Texture, "/textures/oak.jpg"), 1);
    }

    #[tokio::test]
    async fn test_empty_preload() {
        let cache = AssetCache::new(MockSource::default());
        let loaded = cache
            .preload_models(Vec::<(String, String)>::new())
            .await
            .unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_callers_one_load() {
        let cache = AssetCache::new(MockSource::default());
        let mut handles = Vec::new();
        for _ in 0..32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.load_model("/models/table.glb").await.unwrap()
            }));
        }

        let mut assets = Vec::new();
        for handle in handles {
            assets.push(handle.await.unwrap());
        }
        assert!(assets.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.source().total.load(Ordering::SeqCst), 1);
    }
}
