use super::{Error, Evaluation, Solution, Status};

/// Tracks the evaluation with the smallest residual magnitude.
pub(super) struct Best<O> {
    eval: Option<Evaluation<O>>,
}

impl<O> Best<O> {
    pub(super) fn empty() -> Self {
        Self { eval: None }
    }

    /// Keeps `eval` if it improves on the current best.
    pub(super) fn update(&mut self, eval: Evaluation<O>) {
        if let Some(best) = &self.eval {
            if eval.residual.abs() >= best.residual.abs() {
                return;
            }
        }
        self.eval = Some(eval);
    }

    /// Builds a solution from the best evaluation, leaving the tracker empty.
    pub(super) fn finish<E>(
        &mut self,
        status: Status,
        iters: usize,
    ) -> Result<Solution<O>, Error<E>> {
        let eval = self.eval.take().ok_or(Error::NoSuccessfulEvaluation)?;
        Ok(Solution::from_eval(eval, status, iters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fmt;

    use approx::assert_relative_eq;

    fn eval(x: f64, residual: f64) -> Evaluation<()> {
        Evaluation {
            x,
            residual,
            output: (),
        }
    }

    #[test]
    fn keeps_smallest_magnitude() {
        let mut best = Best::empty();
        best.update(eval(1.0, 4.0));
        best.update(eval(2.0, -0.5));
        best.update(eval(3.0, 0.75));

        let solution = best
            .finish::<fmt::Error>(Status::MaxIters, 3)
            .expect("has an evaluation");

        assert_relative_eq!(solution.x, 2.0);
        assert_relative_eq!(solution.residual, -0.5);
        assert_eq!(solution.iters, 3);
    }

    #[test]
    fn empty_tracker_cannot_finish() {
        let mut best: Best<()> = Best::empty();
        let result = best.finish::<fmt::Error>(Status::MaxIters, 0);
        assert!(matches!(result, Err(Error::NoSuccessfulEvaluation)));
    }

    #[test]
    fn finishing_drains_the_tracker() {
        let mut best = Best::empty();
        best.update(eval(1.0, 2.0));

        let first = best.finish::<fmt::Error>(Status::StoppedByObserver, 1);
        assert!(first.is_ok());

        let second = best.finish::<fmt::Error>(Status::StoppedByObserver, 1);
        assert!(matches!(second, Err(Error::NoSuccessfulEvaluation)));
    }
}
