//! Instrumentation Module
//!
//! Decorators that wrap any [`CacheOps`] implementation and record, in the
//! same store, how often each method was called and with what.
//!
//! Layers compose: `CallHistory::new(CountCalls::new(cache))` both counts
//! and logs every call.
//!
//! [`CacheOps`]: crate::cache::CacheOps

mod count;
mod history;
mod replay;

pub use count::{call_count, CountCalls};
pub use history::CallHistory;
pub use replay::{replay, Replay};

use std::fmt;

// == Method ==
/// Identity of an instrumented cache method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Store,
    Get,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Store, Method::Get];

    /// Fully qualified name; also the key of the call counter.
    pub fn qualified_name(self) -> &'static str {
        match self {
            Method::Store => "Cache.store",
            Method::Get => "Cache.get",
        }
    }

    /// Key of the list holding rendered call arguments.
    pub fn inputs_key(self) -> String {
        format!("{}:inputs", self.qualified_name())
    }

    /// Key of the list holding rendered return values.
    pub fn outputs_key(self) -> String {
        format!("{}:outputs", self.qualified_name())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_keys() {
        assert_eq!(Method::Store.qualified_name(), "Cache.store");
        assert_eq!(Method::Get.to_string(), "Cache.get");
        assert_eq!(Method::Store.inputs_key(), "Cache.store:inputs");
        assert_eq!(Method::Get.outputs_key(), "Cache.get:outputs");
    }
}
