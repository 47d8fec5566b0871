use fibonacci_memoization::instantiate;

struct Grid<const N: usize, const M: usize>;

#[instantiate(keys(N = 3))]
impl<const N: usize, const M: usize> Grid<N, M> {
    const CELLS: usize = N * M;
}

fn main() {
    let _ = Grid::<1, 1>;
}
