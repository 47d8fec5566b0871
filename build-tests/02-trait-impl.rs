use fibonacci_memoization::instantiate;

trait Value {
    const VAL: u64;
}

struct Fib<const I: usize>;

impl Value for Fib<0> {
    const VAL: u64 = 0;
}

impl Value for Fib<1> {
    const VAL: u64 = 1;
}

#[instantiate(keys(I = "2..=93"))]
impl<const I: usize> Value for Fib<I>
where
    Self: Sized,
{
    const VAL: u64 = <Fib<{ I - 1 }> as Value>::VAL + <Fib<{ I - 2 }> as Value>::VAL;
}

fn main() {
    assert_eq!(<Fib<93> as Value>::VAL, 12200160415121876738);
}
