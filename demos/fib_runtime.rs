//! Computes F(38) at run time by naive double recursion.
//!
//! Nothing is memoised: `fibo(38)` makes about 126 million calls.

use anyhow::Context;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const INDEX: u32 = 38;

/// Returns `None` once `F(val)` no longer fits in a `u64` (`val > 93`).
pub fn fibo(val: u32) -> Option<u64> {
    match val {
        0 => Some(0),
        1 => Some(1),
        _ => fibo(val - 1)?.checked_add(fibo(val - 2)?),
    }
}

fn setup_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    setup_logger();

    let start = Instant::now();
    let val = fibo(INDEX).with_context(|| format!("F({}) overflows u64", INDEX))?;
    debug!(index = INDEX, elapsed = ?start.elapsed(), "computed by naive recursion");

    println!("{}", val);
    Ok(())
}
