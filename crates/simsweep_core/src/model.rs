//! Caller-supplied strategies the sweep engine drives.
//!
//! Generators, simulators and metrics are opaque to the engine: it only calls
//! them. All three are treated as side-effect-free and are shared behind
//! `Arc`, so implementations must be `Send + Sync` and should not rely on
//! interior mutability for correctness.
//!
//! Plain closures implement [`InputGenerator`] and [`Simulator`] directly;
//! metrics need a name, so closures are wrapped in [`FnMetric`].

use std::fmt;

/// Produces an input value for a given size parameter
pub trait InputGenerator<I>: Send + Sync {
    fn generate(&self, size: i64) -> I;
}

impl<I, F> InputGenerator<I> for F
where
    F: Fn(i64) -> I + Send + Sync,
{
    fn generate(&self, size: i64) -> I {
        self(size)
    }
}

/// The procedure under study: maps one input to one output
pub trait Simulator<I, O>: Send + Sync {
    fn invoke(&self, input: &I) -> O;
}

impl<I, O, F> Simulator<I, O> for F
where
    F: Fn(&I) -> O + Send + Sync,
{
    fn invoke(&self, input: &I) -> O {
        self(input)
    }
}

/// A named scalar measurement taken from a trial output.
///
/// The name is the outer key of every summary table.
pub trait Metric<O>: Send + Sync {
    fn name(&self) -> &str;
    fn extract(&self, output: &O) -> f64;
}

/// A metric backed by a closure
#[derive(Clone)]
pub struct FnMetric<F> {
    name: String,
    extract: F,
}

impl<F> FnMetric<F> {
    pub fn new(name: impl Into<String>, extract: F) -> Self {
        Self {
            name: name.into(),
            extract,
        }
    }
}

impl<O, F> Metric<O> for FnMetric<F>
where
    F: Fn(&O) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, output: &O) -> f64 {
        (self.extract)(output)
    }
}

impl<F> fmt::Debug for FnMetric<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMetric").field("name", &self.name).finish()
    }
}

/// Shorthand for [`FnMetric::new`]
pub fn metric<O, F>(name: impl Into<String>, extract: F) -> FnMetric<F>
where
    F: Fn(&O) -> f64 + Send + Sync,
{
    FnMetric::new(name, extract)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler;

    impl Simulator<i64, i64> for Doubler {
        fn invoke(&self, input: &i64) -> i64 {
            input * 2
        }
    }

    #[test]
    fn test_closures_are_generators_and_simulators() {
        let generator = |n: i64| vec![0u8; n as usize];
        let simulator = |input: &Vec<u8>| input.len();

        let input: Vec<u8> = InputGenerator::generate(&generator, 7);
        let output: usize = Simulator::invoke(&simulator, &input);
        assert_eq!(output, 7);
    }

    #[test]
    fn test_struct_simulator() {
        assert_eq!(Doubler.invoke(&21), 42);
    }

    #[test]
    fn test_fn_metric() {
        let m = metric("len", |out: &Vec<u8>| out.len() as f64);
        assert_eq!(Metric::<Vec<u8>>::name(&m), "len");
        let out: Vec<u8> = vec![1, 2, 3];
        assert_eq!(Metric::<Vec<u8>>::extract(&m, &out), 3.0);
        assert_eq!(format!("{m:?}"), "FnMetric { name: \"len\" }");
    }
}
