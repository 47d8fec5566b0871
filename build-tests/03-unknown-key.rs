use fibonacci_memoization::instantiate;

struct Fib<const I: usize>;

#[instantiate(keys(I = 3, J = 3))]
impl<const I: usize> Fib<I> {
    const VAL: usize = I;
}

fn main() {
    let _ = Fib::<3>;
}
