//! Replay of recorded call history.

use std::fmt;

use tracing::warn;

use crate::cache::CacheOps;
use crate::error::Result;
use crate::instrument::{call_count, Method};

// == Replay ==
/// Snapshot of one method's counter and call history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub method: Method,
    /// Counter value, or the number of recorded inputs if never counted
    pub calls: u64,
    /// `(inputs, output)` pairs in call order
    pub entries: Vec<(String, String)>,
    /// False when the two logs differ in length, e.g. after concurrent
    /// callers interleaved; `entries` is then empty
    pub aligned: bool,
}

/// Reads back everything recorded for `method` in the cache's store.
///
/// Inputs and outputs are paired positionally. Failed calls carry an
/// `(error) ...` output. If the logs differ in length they cannot be paired
/// reliably, so no entries are returned and `aligned` is false.
pub fn replay(cache: &dyn CacheOps, method: Method) -> Result<Replay> {
    let store = cache.backend();
    let inputs = store.lrange(&method.inputs_key(), 0, -1)?;
    let outputs = store.lrange(&method.outputs_key(), 0, -1)?;
    let calls = call_count(store, method)?.unwrap_or(inputs.len() as u64);

    let aligned = inputs.len() == outputs.len();
    if !aligned {
        warn!(
            "{} history misaligned: {} inputs, {} outputs",
            method,
            inputs.len(),
            outputs.len()
        );
    }

    let entries = if aligned {
        inputs
            .iter()
            .zip(outputs.iter())
            .map(|(input, output)| {
                (
                    String::from_utf8_lossy(input).into_owned(),
                    String::from_utf8_lossy(output).into_owned(),
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Replay {
        method,
        calls,
        entries,
        aligned,
    })
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.method, self.calls)?;
        if !self.aligned {
            writeln!(f, "(history inputs and outputs are misaligned)")?;
        }
        for (inputs, output) in &self.entries {
            writeln!(f, "{}({}) -> {}", self.method, inputs, output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cache, Coercion};
    use crate::instrument::{CallHistory, CountCalls};
    use crate::store::{MemoryStore, Store};

    #[test]
    fn test_replay_store() {
        let cache = CallHistory::new(CountCalls::new(Cache::new(MemoryStore::new())));

        let foo = cache.store("foo".into()).unwrap();
        let bar = cache.store("bar".into()).unwrap();
        let num = cache.store(42.into()).unwrap();

        let replay = replay(&cache, Method::Store).unwrap();
        assert_eq!(replay.calls, 3);
        assert_eq!(
            replay.to_string(),
            format!(
                "Cache.store was called 3 times:\n\
                 Cache.store([\"foo\"]) -> {}\n\
                 Cache.store([\"bar\"]) -> {}\n\
                 Cache.store([42]) -> {}\n",
                foo, bar, num
            )
        );
    }

    #[test]
    fn test_replay_without_counter() {
        let cache = CallHistory::new(Cache::new(MemoryStore::new()));

        cache.get("missing", &Coercion::Raw).unwrap();

        let replay = replay(&cache, Method::Get).unwrap();
        assert_eq!(replay.calls, 1);
        assert_eq!(
            replay.entries,
            vec![(r#"["missing","raw"]"#.to_string(), "(nil)".to_string())]
        );
    }

    #[test]
    fn test_replay_failed_call_keeps_pairs() {
        let cache = CallHistory::new(CountCalls::new(Cache::new(MemoryStore::new())));

        let bad = cache.store("foo".into()).unwrap();
        let good = cache.store(7.into()).unwrap();
        assert!(cache.get(&bad, &Coercion::Integer).is_err());
        cache.get(&good, &Coercion::Integer).unwrap();

        let replay = replay(&cache, Method::Get).unwrap();
        assert!(replay.aligned);
        assert_eq!(replay.calls, 2);
        assert_eq!(replay.entries.len(), 2);

        let (failed_input, failed_output) = &replay.entries[0];
        assert_eq!(failed_input, &format!(r#"["{}","int"]"#, bad));
        assert!(failed_output.starts_with("(error) "));

        assert_eq!(
            replay.entries[1],
            (format!(r#"["{}","int"]"#, good), "7".to_string())
        );
    }

    #[test]
    fn test_replay_refuses_to_pair_misaligned_logs() {
        let cache = CallHistory::new(Cache::new(MemoryStore::new()));

        cache.store("foo".into()).unwrap();
        cache
            .backend()
            .rpush(&Method::Store.inputs_key(), br#"["orphan"]"#)
            .unwrap();

        let replay = replay(&cache, Method::Store).unwrap();
        assert!(!replay.aligned);
        assert!(replay.entries.is_empty());
        assert_eq!(
            replay.to_string(),
            "Cache.store was called 2 times:\n(history inputs and outputs are misaligned)\n"
        );
    }

    #[test]
    fn test_replay_nothing_recorded() {
        let cache = Cache::new(MemoryStore::new());

        let replay = replay(&cache, Method::Store).unwrap();
        assert_eq!(replay.calls, 0);
        assert!(replay.entries.is_empty());
        assert_eq!(replay.to_string(), "Cache.store was called 0 times:\n");
    }
}
