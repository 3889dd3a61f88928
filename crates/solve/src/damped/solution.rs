/// A residual evaluated at a point, with the caller's output.
#[derive(Debug, Clone)]
pub struct Evaluation<O> {
    pub x: f64,
    pub residual: f64,
    pub output: O,
}

/// Terminal state of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual met the configured tolerance.
    Converged,
    /// The iteration budget ran out first.
    MaxIters,
    /// An observer requested an early stop.
    StoppedByObserver,
}

/// The result of a damped step search.
#[derive(Debug, Clone)]
pub struct Solution<O> {
    /// Final status.
    pub status: Status,
    /// Point of the reported evaluation.
    pub x: f64,
    /// Residual at `x`.
    pub residual: f64,
    /// Caller output at `x`.
    pub output: O,
    /// Number of evaluations performed.
    pub iters: usize,
}

impl<O> Solution<O> {
    pub(super) fn from_eval(eval: Evaluation<O>, status: Status, iters: usize) -> Self {
        Self {
            status,
            x: eval.x,
            residual: eval.residual,
            output: eval.output,
            iters,
        }
    }

    /// Returns true if the search converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
