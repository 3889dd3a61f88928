//! Damped step search for a scalar residual.
//!
//! The search starts at a caller-supplied point and walks in fixed steps in
//! the direction indicated by the residual sign: a positive residual moves
//! `x` up, a negative residual moves it down. Every time the residual changes
//! sign between successive evaluations the step is halved, never below
//! [`Config::min_step`] and never increased. The search converges when
//! `|residual| < residual_tol` and gives up after `max_iters` evaluations.
//!
//! Residual functions must therefore decrease as `x` increases across the
//! root. Points are clamped to the supplied bounds.

mod best;
mod config;
mod error;
mod event;
mod solution;
mod step;

pub use config::Config;
pub use error::Error;
pub use event::{Action, Event};
pub use solution::{Evaluation, Solution, Status};
pub use step::{Bounds, BoundsError, Sign};

use crate::Observer;

use best::Best;
use step::Step;

/// Search progress, from the first evaluation to a terminal state.
enum State<O> {
    Initialized,
    Iterating { x: f64, step: Step, iter: usize },
    Converged(Solution<O>),
    NotConverged(Solution<O>),
    Stopped(Solution<O>),
}

/// Runs the damped step search.
///
/// `residual` maps a point to its residual and an arbitrary output that is
/// carried into the [`Solution`]. The observer sees each evaluation and may
/// stop the search early, in which case the best evaluation so far is
/// returned with [`Status::StoppedByObserver`].
///
/// When the budget is exhausted the best evaluation (smallest residual
/// magnitude) is returned with [`Status::MaxIters`].
///
/// # Errors
///
/// Returns an error if the config or bounds are invalid, the start point is
/// not finite, the residual function fails, or a residual is not finite.
pub fn search<O, E, F, Obs>(
    mut residual: F,
    start: f64,
    bounds: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<O>, Error<E>>
where
    F: FnMut(f64) -> Result<(f64, O), E>,
    E: std::error::Error + Send + Sync + 'static,
    Obs: for<'a> Observer<Event<'a, O>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;
    let bounds = Bounds::new(bounds)?;
    if !start.is_finite() {
        return Err(Error::NonFiniteStart { value: start });
    }

    let mut best = Best::empty();
    let mut state = State::Initialized;

    loop {
        state = match state {
            State::Initialized => State::Iterating {
                x: bounds.clamp(start),
                step: Step::new(config.initial_step, config.min_step),
                iter: 1,
            },

            State::Iterating { x, mut step, iter } => {
                let (value, output) =
                    residual(x).map_err(|source| Error::Evaluation { x, source })?;
                if !value.is_finite() {
                    return Err(Error::NonFiniteResidual { x, residual: value });
                }

                let eval = Evaluation {
                    x,
                    residual: value,
                    output,
                };
                let action = observer.observe(&Event {
                    iter,
                    step: step.size(),
                    eval: &eval,
                });

                if value.abs() < config.residual_tol {
                    State::Converged(Solution::from_eval(eval, Status::Converged, iter))
                } else {
                    best.update(eval);
                    match action {
                        Some(Action::StopEarly) => {
                            State::Stopped(best.finish(Status::StoppedByObserver, iter)?)
                        }
                        None if iter >= config.max_iters => {
                            State::NotConverged(best.finish(Status::MaxIters, iter)?)
                        }
                        None => {
                            let next = bounds.clamp(x + step.advance(Sign::of(value)));
                            State::Iterating {
                                x: next,
                                step,
                                iter: iter + 1,
                            }
                        }
                    }
                }
            }

            State::Converged(solution)
            | State::NotConverged(solution)
            | State::Stopped(solution) => return Ok(solution),
        };
    }
}

/// Runs the damped step search without observation.
///
/// # Errors
///
/// See [`search`].
pub fn search_unobserved<O, E, F>(
    residual: F,
    start: f64,
    bounds: [f64; 2],
    config: &Config,
) -> Result<Solution<O>, Error<E>>
where
    F: FnMut(f64) -> Result<(f64, O), E>,
    E: std::error::Error + Send + Sync + 'static,
{
    search(residual, start, bounds, config, ())
}
