//! Counter mutators
//!
//! Run once on the client immediately (optimistically) and again on the server
//! (authoritatively) during sync.

use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::sync::{MutatorRegistry, ReadTransaction, WriteTransaction};

/// Store key holding the counter
pub const COUNT_KEY: &str = "count";

pub const INCREMENT: &str = "increment";
pub const DECREMENT: &str = "decrement";

/// Current counter value; a missing key counts as 0
pub fn read_count<T: ReadTransaction + ?Sized>(tx: &T) -> i64 {
    tx.get(COUNT_KEY).and_then(|v| v.as_i64()).unwrap_or(0)
}

fn delta(args: &Value) -> Result<i64> {
    args.as_i64()
        .ok_or_else(|| anyhow!("Counter delta must be an integer, got {}", args))
}

pub fn increment(tx: &mut dyn WriteTransaction, args: Value) -> Result<Value> {
    let prev = read_count(&*tx);
    let next = prev
        .checked_add(delta(&args)?)
        .ok_or_else(|| anyhow!("Counter overflow: {} + {}", prev, args))?;
    tx.put(COUNT_KEY, Value::from(next));
    Ok(Value::from(next))
}

pub fn decrement(tx: &mut dyn WriteTransaction, args: Value) -> Result<Value> {
    let prev = read_count(&*tx);
    let next = prev
        .checked_sub(delta(&args)?)
        .ok_or_else(|| anyhow!("Counter overflow: {} - {}", prev, args))?;
    tx.put(COUNT_KEY, Value::from(next));
    Ok(Value::from(next))
}

/// Registry with `increment` and `decrement`
pub fn counter_mutators() -> MutatorRegistry {
    MutatorRegistry::new()
        .register(INCREMENT, increment)
        .register(DECREMENT, decrement)
}
