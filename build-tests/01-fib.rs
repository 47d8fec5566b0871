use fibonacci_memoization::instantiate;

struct Fib<const I: usize>;

impl Fib<0> {
    const VAL: u64 = 0;
}

impl Fib<1> {
    const VAL: u64 = 1;
}

#[instantiate(keys(I = "2..=38"))]
impl<const I: usize> Fib<I> {
    const VAL: u64 = Fib::<{ I - 1 }>::VAL + Fib::<{ I - 2 }>::VAL;
}

fn main() {
    assert_eq!(Fib::<38>::VAL, 39088169);
}
