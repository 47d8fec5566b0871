#[test]
fn test() {
    let t = trybuild::TestCases::new();

    t.pass("build-tests/01-fib.rs");
    t.pass("build-tests/02-trait-impl.rs");
    t.compile_fail("build-tests/03-unknown-key.rs");
    t.compile_fail("build-tests/04-missing-key.rs");
    t.compile_fail("build-tests/05-malformed-bound.rs");
    t.compile_fail("build-tests/06-unknown-argument.rs");
}
