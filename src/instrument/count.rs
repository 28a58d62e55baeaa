//! Call counting layer.

use tracing::debug;

use crate::cache::{parse_int, CacheOps, Coercion, Retrieved, Value};
use crate::error::Result;
use crate::instrument::Method;
use crate::store::Store;

// == Count Calls ==
/// Increments a per-method counter in the store before every delegated call.
///
/// The counter is bumped even if the wrapped call then fails.
#[derive(Debug)]
pub struct CountCalls<C> {
    inner: C,
    methods: Vec<Method>,
}

impl<C: CacheOps> CountCalls<C> {
    /// Counts calls to every method of `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            methods: Method::ALL.to_vec(),
        }
    }

    /// Restricts counting to `methods`; other calls pass straight through.
    pub fn only(mut self, methods: &[Method]) -> Self {
        self.methods = methods.to_vec();
        self
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn count(&self, method: Method) -> Result<()> {
        if self.methods.contains(&method) {
            let calls = self.inner.backend().incr(method.qualified_name())?;
            debug!("{} called {} times", method, calls);
        }
        Ok(())
    }
}

impl<C: CacheOps> CacheOps for CountCalls<C> {
    fn store(&self, value: Value) -> Result<String> {
        self.count(Method::Store)?;
        self.inner.store(value)
    }

    fn get(&self, key: &str, coercion: &Coercion) -> Result<Option<Retrieved>> {
        self.count(Method::Get)?;
        self.inner.get(key, coercion)
    }

    fn backend(&self) -> &dyn Store {
        self.inner.backend()
    }
}

/// Reads the call counter for `method`, or `None` if it was never counted.
pub fn call_count(store: &dyn Store, method: Method) -> Result<Option<u64>> {
    match store.get(method.qualified_name())? {
        Some(raw) => Ok(Some(parse_int(&raw)?.max(0) as u64)),
        None => Ok(None),
    }
}
