//! Call history layer.

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{CacheOps, Coercion, Retrieved, Value};
use crate::error::{CacheError, Result};
use crate::instrument::Method;
use crate::store::Store;

/// Output entry written for a `get` that found nothing.
const NIL_OUTPUT: &[u8] = b"(nil)";

/// Prefix of the output entry written for a call that failed.
pub const ERROR_OUTPUT_PREFIX: &str = "(error) ";

// == Call History ==
/// Appends every call's arguments and result to two lists in the store.
///
/// Arguments are rendered as a JSON array and pushed to `<method>:inputs`
/// before delegating; the result is pushed to `<method>:outputs` after the
/// wrapped call returns. A failed call pushes `(error) <message>` as its
/// output, so both lists stay the same length and pair up by position.
#[derive(Debug)]
pub struct CallHistory<C> {
    inner: C,
    methods: Vec<Method>,
}

impl<C: CacheOps> CallHistory<C> {
    /// Records calls to every method of `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            methods: Method::ALL.to_vec(),
        }
    }

    /// Restricts recording to `methods`.
    pub fn only(mut self, methods: &[Method]) -> Self {
        self.methods = methods.to_vec();
        self
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn record_input<A: Serialize>(&self, method: Method, args: &A) -> Result<()> {
        if self.methods.contains(&method) {
            let rendered = serde_json::to_string(args)?;
            debug!("{} input {}", method, rendered);
            self.inner
                .backend()
                .rpush(&method.inputs_key(), rendered.as_bytes())?;
        }
        Ok(())
    }

    fn record_output(&self, method: Method, output: &[u8]) -> Result<()> {
        if self.methods.contains(&method) {
            self.inner.backend().rpush(&method.outputs_key(), output)?;
        }
        Ok(())
    }

    // The call's own error wins over a failure to record it.
    fn record_error(&self, method: Method, err: &CacheError) {
        let output = format!("{}{}", ERROR_OUTPUT_PREFIX, err);
        if let Err(record_err) = self.record_output(method, output.as_bytes()) {
            warn!("{} failed and its error was not recorded: {}", method, record_err);
        }
    }
}

impl<C: CacheOps> CacheOps for CallHistory<C> {
    fn store(&self, value: Value) -> Result<String> {
        self.record_input(Method::Store, &(&value,))?;
        let key = self.inner.store(value).map_err(|err| {
            self.record_error(Method::Store, &err);
            err
        })?;
        self.record_output(Method::Store, key.as_bytes())?;
        Ok(key)
    }

    fn get(&self, key: &str, coercion: &Coercion) -> Result<Option<Retrieved>> {
        self.record_input(Method::Get, &(key, coercion.name()))?;
        let result = self.inner.get(key, coercion).map_err(|err| {
            self.record_error(Method::Get, &err);
            err
        })?;
        let output = match &result {
            Some(Retrieved::Bytes(raw)) => raw.clone(),
            Some(other) => other.to_string().into_bytes(),
            None => NIL_OUTPUT.to_vec(),
        };
        self.record_output(Method::Get, &output)?;
        Ok(result)
    }

    fn backend(&self) -> &dyn Store {
        self.inner.backend()
    }
}
