//! Numerical search routines for the Isola workspace.
//!
//! The thermal solver reduces every steady-state balance to one unknown
//! temperature and a signed residual. This crate provides the search that
//! drives that residual toward zero:
//!
//! - [`damped`]: a damped step search that halves its step whenever the
//!   residual changes sign, with an explicit tolerance and iteration budget
//! - [`Observer`]: receives per-iteration events and may stop a search early

mod observe;

pub mod damped;

pub use observe::Observer;
