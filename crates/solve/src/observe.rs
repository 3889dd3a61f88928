/// Hook called once per evaluation of an iterative calculation.
///
/// `E` is the event describing the evaluation just made and `A` the set of
/// requests the caller may send back. The damped search passes an
/// [`Event`](crate::damped::Event) and accepts
/// [`Action::StopEarly`](crate::damped::Action::StopEarly); thickness scans
/// built on top of it pass one event per candidate thickness and can be cut
/// short the same way.
///
/// Returning `None` leaves the calculation untouched. Any `FnMut(&E) -> Option<A>`
/// closure works as a hook, and `()` ignores every event.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _: &E) -> Option<A> {
        None
    }
}
