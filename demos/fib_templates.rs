//! Computes F(38) at compile time.
//!
//! `Fib<0>` and `Fib<1>` terminate the recursion; `instantiate` stamps out
//! `Fib<2>` through `Fib<38>`. The compiler evaluates each `VAL` once, so
//! running the program only reads a constant.

use fibonacci_memoization::instantiate;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub struct Fib<const I: usize>;

impl Fib<0> {
    pub const VAL: u64 = 0;
}

impl Fib<1> {
    pub const VAL: u64 = 1;
}

#[instantiate(keys(I = "2..=38"))]
impl<const I: usize> Fib<I> {
    pub const VAL: u64 = Fib::<{ I - 1 }>::VAL + Fib::<{ I - 2 }>::VAL;
}

fn setup_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    setup_logger();

    let val = Fib::<38>::VAL;
    debug!(index = 38, value = val, "read compile-time constant");

    println!("{}", val);
}
