//! Checked arithmetic helpers for computing encoded lengths.

use crate::{Error, Result};

/// Sum a collection of lengths, returning [`Error::Length`] on overflow.
pub trait CheckedSum<A>: Sized {
    /// Iterate over the values and sum them, checking for overflow.
    fn checked_sum(self) -> Result<A>;
}

impl<T> CheckedSum<usize> for T
where
    T: IntoIterator<Item = usize>,
{
    fn checked_sum(self) -> Result<usize> {
        self.into_iter()
            .try_fold(0usize, |acc, len| acc.checked_add(len).ok_or(Error::Length))
    }
}
