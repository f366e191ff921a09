//! Checking many values against one type in parallel.
//!
//! Type trees are immutable and `Send + Sync`, so one tree is shared by
//! reference across rayon workers. Results come back in input order.
use rayon::prelude::*;

use crate::failure::{Failure, Outcome};
use crate::kind::Type;
use crate::value::Value;

pub fn check_all<'v>(ty: &Type, values: &'v [Value]) -> Vec<Outcome<&'v Value>> {
    values.par_iter().map(|v| ty.check(v)).collect()
}

pub fn slice_all(ty: &Type, values: &[Value]) -> Vec<Outcome<Value>> {
    values.par_iter().map(|v| ty.slice_result(v)).collect()
}

/// Accepted values, and the index and failure of every rejected one.
pub fn partition<'v>(ty: &Type, values: &'v [Value]) -> (Vec<&'v Value>, Vec<(usize, Failure)>) {
    let (accepted, rejected): (Vec<_>, Vec<_>) = values
        .par_iter()
        .enumerate()
        .map(|(i, v)| ty.check(v).map_err(|f| (i, f)))
        .partition(Result::is_ok);

    let accepted = accepted.into_iter().filter_map(Result::ok).collect();
    let rejected: Vec<(usize, Failure)> = rejected.into_iter().filter_map(Result::err).collect();
    tracing::debug!(accepted = values.len() - rejected.len(), rejected = rejected.len(), "batch: partitioned");
    (accepted, rejected)
}

// ------------------------------- Tests ------------------------------------ //
