use super::Evaluation;

/// Control actions supported by the damped step search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and return the best evaluation found so far.
    StopEarly,
}

/// Iteration event emitted after each residual evaluation.
#[derive(Debug)]
pub struct Event<'a, O> {
    /// Iteration counter, starting at 1.
    pub iter: usize,
    /// Step size that will be used to move away from this point
    /// before any halving triggered by this evaluation.
    pub step: f64,
    /// The evaluation at the current point.
    pub eval: &'a Evaluation<O>,
}
