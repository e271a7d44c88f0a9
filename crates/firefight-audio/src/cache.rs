//! Process-wide lazy sound cache.
//!
//! Each distinct [`SoundKey`] owns a slot. The first requester renders into
//! the slot while holding its lock, so concurrent requesters of the same key
//! wait for that single render instead of repeating it. Different keys never
//! share a lock and render in parallel. A failed render leaves the slot empty
//! and the next request tries again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, TryLockError};
use std::thread::{self, JoinHandle};

use crate::assets::{AssetLookup, NoAssets};
use crate::buffer::SampleBuffer;
use crate::error::AudioResult;
use crate::generate::generate_or_load;
use crate::request::{SoundKey, SoundRequest};
use crate::synthesis::SynthConfig;

type Slot = Arc<Mutex<Option<Arc<SampleBuffer>>>>;

static GLOBAL: OnceLock<Arc<SoundCache>> = OnceLock::new();

// A panic while rendering leaves at worst an empty slot, which is safe to reuse.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// A slot whose render is still in progress counts as not rendered.
fn rendered(slot: &Slot) -> Option<Arc<SampleBuffer>> {
    match slot.try_lock() {
        Ok(entry) => entry.clone(),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().clone(),
        Err(TryLockError::WouldBlock) => None,
    }
}

/// Lazily populated map from sound identity to rendered buffer.
pub struct SoundCache {
    config: SynthConfig,
    assets: Arc<dyn AssetLookup>,
    slots: Mutex<HashMap<SoundKey, Slot>>,
}

impl std::fmt::Debug for SoundCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundCache")
            .field("config", &self.config)
            .field("slots", &lock(&self.slots).len())
            .finish()
    }
}

impl SoundCache {
    /// Creates an empty cache.
    pub fn new(config: SynthConfig, assets: Arc<dyn AssetLookup>) -> Self {
        Self {
            config,
            assets,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// The shared cache, synthesizing everything at canonical rates.
    pub fn global() -> Arc<SoundCache> {
        GLOBAL
            .get_or_init(|| Arc::new(SoundCache::new(SynthConfig::default(), Arc::new(NoAssets))))
            .clone()
    }

    /// Returns the buffer for `request`, rendering it on first use.
    ///
    /// # Errors
    /// The request's validation or render error. Errors are not cached.
    pub fn get(&self, request: &SoundRequest) -> AudioResult<Arc<SampleBuffer>> {
        request.validate()?;
        let key = request.key();
        let slot = {
            let mut slots = lock(&self.slots);
            slots.entry(key).or_default().clone()
        };

        let mut entry = lock(&slot);
        if let Some(buffer) = entry.as_ref() {
            tracing::debug!(%key, "cache hit");
            return Ok(buffer.clone());
        }

        tracing::debug!(%key, "cache miss");
        let buffer = Arc::new(generate_or_load(request, &self.config, self.assets.as_ref())?);
        *entry = Some(buffer.clone());
        Ok(buffer)
    }

    /// Returns the buffer if it has already been rendered.
    ///
    /// Never waits on a render in progress; such a sound is reported missing.
    pub fn peek(&self, request: &SoundRequest) -> Option<Arc<SampleBuffer>> {
        let slot = lock(&self.slots).get(&request.key())?.clone();
        rendered(&slot)
    }

    /// Whether `request` has a rendered buffer.
    pub fn contains(&self, request: &SoundRequest) -> bool {
        self.peek(request).is_some()
    }

    /// Number of rendered buffers.
    ///
    /// Sounds still being rendered are not counted, and `len` never waits
    /// for them to finish.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|slot| rendered(slot).is_some()).count()
    }

    /// Returns true if nothing has been rendered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders `requests` on a background thread.
    ///
    /// Failures are logged and skipped. The handle yields how many requests
    /// ended up cached.
    pub fn prewarm(self: &Arc<Self>, requests: Vec<SoundRequest>) -> JoinHandle<usize> {
        let cache = Arc::clone(self);
        thread::spawn(move || {
            let mut ready = 0;
            for request in &requests {
                match cache.get(request) {
                    Ok(_) => ready += 1,
                    Err(err) => tracing::warn!(%request, error = %err, "prewarm failed"),
                }
            }
            tracing::info!(ready, total = requests.len(), "cache prewarm finished");
            ready
        })
    }
}
