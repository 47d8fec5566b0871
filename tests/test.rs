extern crate fibonacci_memoization;

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

// F(93) is the largest Fibonacci number that fits in a u64.
#[instantiate(keys(I = "2..=93"))]
impl<const I: usize> Value for Fib<I> {
    const VAL: u64 = <Fib<{ I - 1 }> as Value>::VAL + <Fib<{ I - 2 }> as Value>::VAL;
}

macro_rules! fib {
    ($i:literal) => {
        <Fib<$i> as Value>::VAL
    };
}

#[test]
fn test_fib() {
    assert_eq!(0, fib!(0));
    assert_eq!(1, fib!(1));
    assert_eq!(1, fib!(2));
    assert_eq!(55, fib!(10));
    assert_eq!(39088169, fib!(38));
    assert_eq!(267914296, fib!(42));
    assert_eq!(12200160415121876738, fib!(93));
}

#[test]
fn test_recurrence() {
    macro_rules! check {
        ($($i:literal => $a:literal $b:literal),*) => {
            $(assert_eq!(fib!($i), fib!($a) + fib!($b));)*
        };
    }
    check!(2 => 1 0, 3 => 2 1, 20 => 19 18, 38 => 37 36, 64 => 63 62, 93 => 92 91);
}

#[test]
fn test_const_context() {
    const TABLE: [u64; 4] = [fib!(35), fib!(36), fib!(37), fib!(38)];
    assert_eq!(TABLE, [9227465, 14930352, 24157817, 39088169]);
}

trait Binomial {
    const VAL: u64;
}

struct Comb<const N: usize, const M: usize>;

#[instantiate(keys(N = 10))]
impl<const N: usize> Binomial for Comb<N, 0> {
    const VAL: u64 = 1;
}

#[instantiate(keys(M = "1..=10"))]
impl<const M: usize> Binomial for Comb<0, M> {
    const VAL: u64 = 0;
}

#[instantiate(keys(N = "1..=10", M = "1..=10"))]
impl<const N: usize, const M: usize> Binomial for Comb<N, M> {
    const VAL: u64 =
        <Comb<{ N - 1 }, { M - 1 }> as Binomial>::VAL + <Comb<{ N - 1 }, M> as Binomial>::VAL;
}

#[test]
fn comb_test() {
    assert_eq!(1, <Comb<5, 0> as Binomial>::VAL);
    assert_eq!(1, <Comb<5, 5> as Binomial>::VAL);
    assert_eq!(0, <Comb<5, 6> as Binomial>::VAL);
    assert_eq!(10, <Comb<5, 2> as Binomial>::VAL);
    assert_eq!(252, <Comb<10, 5> as Binomial>::VAL);
}

struct Window<T, const N: usize>(T);

#[instantiate(keys(N = "1..4"))]
impl<T: Copy + Default, const N: usize> Window<T, N> {
    fn spread(&self) -> [T; N] {
        [self.0; N]
    }

    fn empty() -> [T; N] {
        [T::default(); N]
    }
}

#[test]
fn keeps_type_parameters() {
    assert_eq!(Window::<u8, 3>(7).spread(), [7, 7, 7]);
    assert_eq!(Window::<i32, 1>::empty(), [0]);
    assert_eq!(Window::<i32, 2>::empty(), [0, 0]);
}

struct Label<const N: usize>;

#[instantiate(keys(N = "1..=3"))]
impl<const N: usize> Label<N> {
    const CHECKED: usize = {
        assert!(N > 0);
        N
    };

    fn name() -> &'static str {
        concat!("label-", stringify!(N))
    }
}

#[test]
fn rewrites_macro_arguments() {
    assert_eq!(Label::<1>::CHECKED, 1);
    assert_eq!(Label::<3>::CHECKED, 3);
    assert_eq!(Label::<2>::name(), "label-2");
}
