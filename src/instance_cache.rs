// Copyright 2025 Cowboy AI, LLC.

//! Memoizing facade for expensive methods of an arbitrary object
//!
//! [`InstanceCache`] wraps a value and memoizes selected methods in bounded
//! least-recently-used caches. Each method is registered once, by name and
//! with the computation it stands for, while the facade is built; its
//! capacity comes from a [`CacheSizePolicy`]. Everything else is reached on
//! the wrapped value through `Deref`.
//!
//! ```
//! use cim_category::{CacheSizePolicy, InstanceCache};
//!
//! struct Lattice { spacing: f64 }
//!
//! impl Lattice {
//!     fn distance(&self, a: i64, b: i64) -> f64 {
//!         (b - a).abs() as f64 * self.spacing
//!     }
//! }
//!
//! let cached = InstanceCache::new(Lattice { spacing: 2.5 }, CacheSizePolicy::uniform(16))
//!     .memoize("distance", |l: &Lattice, &(a, b): &(i64, i64)| l.distance(a, b))
//!     .unwrap();
//! let d: f64 = cached.call("distance", (0i64, 4i64)).unwrap();
//! assert_eq!(d, 10.0);
//! assert_eq!(cached.spacing, 2.5);
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::ops::Deref;
use std::rc::Rc;

use indexmap::IndexMap;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{CategoryError, CategoryResult};

/// Capacity configuration for memoized methods
///
/// Deserializes from either a bare integer (one capacity for every method)
/// or a map of method name to capacity, where the optional `"default"` entry
/// covers unlisted methods. A capacity of `0` turns memoization off for that
/// method; negative capacities are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheSizePolicy {
    /// Same capacity for every memoized method
    Uniform(i64),
    /// Capacity per method name, with an optional `"default"` entry
    PerMethod(HashMap<String, i64>),
}

impl Default for CacheSizePolicy {
    fn default() -> Self {
        Self::Uniform(Self::DEFAULT_CAPACITY)
    }
}

impl CacheSizePolicy {
    /// Key of the fallback entry in a per-method policy
    pub const DEFAULT_KEY: &'static str = "default";

    /// Capacity used when nothing else is configured
    pub const DEFAULT_CAPACITY: i64 = 1;

    /// One capacity for every method
    pub fn uniform(capacity: i64) -> Self {
        Self::Uniform(capacity)
    }

    /// Capacities per method name
    pub fn per_method<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        Self::PerMethod(
            entries
                .into_iter()
                .map(|(method, capacity)| (method.into(), capacity))
                .collect(),
        )
    }

    /// Parse a policy from JSON, e.g. `4` or `{"distance": 8, "default": 0}`
    pub fn from_json(json: &str) -> CategoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configured capacity for `method`, before validation
    pub fn raw_capacity(&self, method: &str) -> i64 {
        match self {
            Self::Uniform(capacity) => *capacity,
            Self::PerMethod(capacities) => capacities
                .get(method)
                .or_else(|| capacities.get(Self::DEFAULT_KEY))
                .copied()
                .unwrap_or(Self::DEFAULT_CAPACITY),
        }
    }

    /// Validated capacity for `method`; `None` means pass-through
    pub fn capacity_for(&self, method: &str) -> CategoryResult<Option<NonZeroUsize>> {
        let capacity = self.raw_capacity(method);
        let invalid = || CategoryError::InvalidCapacity {
            method: method.to_string(),
            capacity,
        };
        let capacity = usize::try_from(capacity).map_err(|_| invalid())?;
        Ok(NonZeroUsize::new(capacity))
    }
}

/// Statistics for one memoized method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheInfo {
    /// Calls answered from the cache
    pub hits: u64,
    /// Calls that ran the underlying computation
    pub misses: u64,
    /// Capacity of the cache
    pub max_size: usize,
    /// Entries currently held
    pub current_size: usize,
}

type Compute<T, A, R> = Rc<dyn Fn(&T, &A) -> CategoryResult<R>>;

/// Registered computation of one method and its results, types erased
trait MethodTable {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn len(&self) -> usize;
    fn clear(&mut self);
}

struct TypedTable<T, A, R> {
    compute: Compute<T, A, R>,
    // `None` when the method passes through
    entries: Option<LruCache<A, R>>,
}

impl<T, A, R> MethodTable for TypedTable<T, A, R>
where
    T: 'static,
    A: Hash + Eq + 'static,
    R: 'static,
{
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    fn clear(&mut self) {
        if let Some(entries) = &mut self.entries {
            entries.clear();
        }
    }
}

struct MethodCache {
    capacity: Option<NonZeroUsize>,
    table: Box<dyn MethodTable>,
    hits: u64,
    misses: u64,
}

enum Lookup<T, A, R> {
    PassThrough(Compute<T, A, R>),
    Hit(R),
    Miss(Compute<T, A, R>),
}

impl MethodCache {
    fn typed<T, A, R>(&mut self, method: &str) -> CategoryResult<&mut TypedTable<T, A, R>>
    where
        T: 'static,
        A: Hash + Eq + 'static,
        R: 'static,
    {
        self.table
            .as_any_mut()
            .downcast_mut::<TypedTable<T, A, R>>()
            .ok_or_else(|| CategoryError::CacheSignatureMismatch {
                method: method.to_string(),
            })
    }

    fn lookup<T, A, R>(&mut self, method: &str, args: &A) -> CategoryResult<Lookup<T, A, R>>
    where
        T: 'static,
        A: Hash + Eq + 'static,
        R: Clone + 'static,
    {
        let table = self.typed::<T, A, R>(method)?;
        let compute = Rc::clone(&table.compute);
        let lookup = match &mut table.entries {
            None => Lookup::PassThrough(compute),
            Some(entries) => match entries.get(args) {
                Some(hit) => Lookup::Hit(hit.clone()),
                None => Lookup::Miss(compute),
            },
        };
        match lookup {
            Lookup::Hit(_) => self.hits += 1,
            Lookup::Miss(_) => self.misses += 1,
            Lookup::PassThrough(_) => {}
        }
        Ok(lookup)
    }

    fn store<T, A, R>(&mut self, method: &str, args: A, value: R) -> CategoryResult<()>
    where
        T: 'static,
        A: Hash + Eq + 'static,
        R: 'static,
    {
        if let Some(entries) = &mut self.typed::<T, A, R>(method)?.entries {
            if entries.push(args, value).is_some() {
                trace!(method, "evicted least recently used entry");
            }
        }
        Ok(())
    }

    fn info(&self) -> Option<CacheInfo> {
        self.capacity.map(|capacity| CacheInfo {
            hits: self.hits,
            misses: self.misses,
            max_size: capacity.get(),
            current_size: self.table.len(),
        })
    }

    fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// A value whose selected methods are memoized
///
/// The per-method caches live behind a `RefCell`, so an `InstanceCache` is
/// meant for single-threaded use, like the categories that consume it.
pub struct InstanceCache<T> {
    inner: T,
    policy: CacheSizePolicy,
    methods: RefCell<IndexMap<String, MethodCache>>,
}

impl<T> InstanceCache<T> {
    /// Wrap `inner`; methods are added with [`memoize`](Self::memoize)
    pub fn new(inner: T, policy: CacheSizePolicy) -> Self {
        Self {
            inner,
            policy,
            methods: RefCell::new(IndexMap::new()),
        }
    }

    /// The wrapped value
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Unwrap, dropping every cache
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// The policy capacities are drawn from
    pub fn policy(&self) -> &CacheSizePolicy {
        &self.policy
    }

    /// Is `method` registered with a non-zero capacity?
    pub fn is_memoized(&self, method: &str) -> bool {
        self.methods
            .borrow()
            .get(method)
            .is_some_and(|cache| cache.capacity.is_some())
    }

    /// Names of the memoized methods, in registration order
    pub fn memoized_methods(&self) -> Vec<String> {
        self.methods
            .borrow()
            .iter()
            .filter(|(_, cache)| cache.capacity.is_some())
            .map(|(method, _)| method.clone())
            .collect()
    }

    /// Statistics for a memoized method
    pub fn cache_info(&self, method: &str) -> Option<CacheInfo> {
        self.methods.borrow().get(method).and_then(MethodCache::info)
    }

    /// Forget every cached result and statistic of `method`
    pub fn cache_clear(&self, method: &str) {
        if let Some(cache) = self.methods.borrow_mut().get_mut(method) {
            cache.clear();
        }
    }
}

impl<T: 'static> InstanceCache<T> {
    /// Register `compute` as `method`, sized by the policy
    ///
    /// A negative capacity is an [`CategoryError::InvalidCapacity`]; a zero
    /// capacity registers the method as pass-through. Each name is bound to
    /// one computation: registering it again is a
    /// [`CategoryError::MethodAlreadyMemoized`].
    pub fn memoize<A, R, F>(self, method: impl Into<String>, compute: F) -> CategoryResult<Self>
    where
        A: Hash + Eq + 'static,
        R: 'static,
        F: Fn(&T, &A) -> R + 'static,
    {
        self.try_memoize(method, move |inner: &T, args: &A| Ok(compute(inner, args)))
    }

    /// Like [`memoize`](Self::memoize) for computations that can fail
    ///
    /// Failures propagate unchanged from [`call`](Self::call) and are never
    /// cached.
    pub fn try_memoize<A, R, F>(
        mut self,
        method: impl Into<String>,
        compute: F,
    ) -> CategoryResult<Self>
    where
        A: Hash + Eq + 'static,
        R: 'static,
        F: Fn(&T, &A) -> CategoryResult<R> + 'static,
    {
        let method = method.into();
        let methods = self.methods.get_mut();
        if methods.contains_key(&method) {
            return Err(CategoryError::MethodAlreadyMemoized { method });
        }

        let capacity = self.policy.capacity_for(&method)?;
        match capacity {
            Some(capacity) => {
                debug!(method = %method, capacity = capacity.get(), "memoizing method")
            }
            None => debug!(method = %method, "zero capacity, method passes through"),
        }
        let compute: Compute<T, A, R> = Rc::new(compute);
        let table = TypedTable {
            compute,
            entries: capacity.map(LruCache::new),
        };
        methods.insert(
            method,
            MethodCache {
                capacity,
                table: Box::new(table),
                hits: 0,
                misses: 0,
            },
        );
        Ok(self)
    }

    /// Call the computation registered as `method`
    ///
    /// It runs only on a miss, or every time when `method` passes through.
    /// Arguments are the cache key, so they must be hashable; argument and
    /// result types must be the ones `method` was registered with.
    pub fn call<A, R>(&self, method: &str, args: A) -> CategoryResult<R>
    where
        A: Hash + Eq + 'static,
        R: Clone + 'static,
    {
        // released before computing, which may call back into the cache
        let lookup = {
            let mut methods = self.methods.borrow_mut();
            let cache = methods
                .get_mut(method)
                .ok_or_else(|| CategoryError::UnknownMethod {
                    method: method.to_string(),
                })?;
            cache.lookup::<T, A, R>(method, &args)?
        };

        match lookup {
            Lookup::PassThrough(compute) => {
                trace!(method, "pass-through call");
                compute(&self.inner, &args)
            }
            Lookup::Hit(value) => {
                trace!(method, "cache hit");
                Ok(value)
            }
            Lookup::Miss(compute) => {
                trace!(method, "cache miss");
                let value = compute(&self.inner, &args)?;
                if let Some(cache) = self.methods.borrow_mut().get_mut(method) {
                    cache.store::<T, A, R>(method, args, value.clone())?;
                }
                Ok(value)
            }
        }
    }
}

impl<T> Deref for InstanceCache<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}
