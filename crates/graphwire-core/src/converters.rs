//! Process-wide cache of property codecs, one per scalar type.
//!
//! Lookups take a shared read lock. On a miss the caller takes the
//! upgradable read lock (only one holder at a time, readers still admitted),
//! checks again, and upgrades to exclusive only to insert. Two callers can
//! therefore never both construct a codec for the same type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::codec::{PropertyCodec, PropertyScalar};

type Entry = Arc<dyn Any + Send + Sync>;

/// Grow-only map from scalar type to its [`PropertyCodec`].
#[derive(Default)]
pub struct ConverterCache {
    converters: RwLock<HashMap<TypeId, Entry>>,
    constructed: AtomicUsize,
}

impl ConverterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the codec for `T`, constructing it on first use.
    pub fn get_or_create<T: PropertyScalar>(&self) -> Arc<PropertyCodec<T>> {
        if let Some(codec) = lookup::<T>(&self.converters.read()) {
            return codec;
        }

        let upgradable = self.converters.upgradable_read();
        if let Some(codec) = lookup::<T>(&upgradable) {
            return codec;
        }

        let mut converters = RwLockUpgradableReadGuard::upgrade(upgradable);
        let codec = Arc::new(PropertyCodec::<T>::new());
        converters.insert(TypeId::of::<PropertyCodec<T>>(), codec.clone() as Entry);
        self.constructed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(scalar = std::any::type_name::<T>(), "Constructed property codec");
        codec
    }

    /// Whether a codec for `T` has been constructed already.
    pub fn contains<T: PropertyScalar>(&self) -> bool {
        self.converters
            .read()
            .contains_key(&TypeId::of::<PropertyCodec<T>>())
    }

    pub fn len(&self) -> usize {
        self.converters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of codecs ever constructed by this cache.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::Relaxed)
    }
}

fn lookup<T: PropertyScalar>(converters: &HashMap<TypeId, Entry>) -> Option<Arc<PropertyCodec<T>>> {
    converters
        .get(&TypeId::of::<PropertyCodec<T>>())
        .cloned()
        .and_then(|entry| entry.downcast::<PropertyCodec<T>>().ok())
}

/// The cache shared by every vertex schema in the process.
pub fn converters() -> &'static ConverterCache {
    static CONVERTERS: OnceLock<ConverterCache> = OnceLock::new();
    CONVERTERS.get_or_init(ConverterCache::new)
}
