/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ops::Index;

use super::Square;

/// A generic container of 64 elements, one per [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Table<T>([T; Square::COUNT]);

impl<T> Table<T> {
    /// Create a new [`Table`] by applying `f` to each [`Square`].
    ///
    /// # Example
    /// ```
    /// # use harmony::{Square, Table};
    /// let rows = Table::from_fn(|sq| sq.row());
    /// assert_eq!(rows[Square::A8], 0);
    /// assert_eq!(rows[Square::H1], 7);
    /// ```
    #[inline(always)]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Square) -> T,
    {
        Self(std::array::from_fn(|i| f(Square::from_index_unchecked(i))))
    }

    /// Create a new [`Table`] with the provided values, in square index order.
    #[inline(always)]
    pub const fn new(values: [T; Square::COUNT]) -> Self {
        Self(values)
    }

    /// Get the value of this [`Table`] at `square`.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> &T {
        &self.0[square.index()]
    }
}

impl<T, Idx> Index<Idx> for Table<T>
where
    [T; Square::COUNT]: Index<Idx, Output = T>,
{
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Idx) -> &Self::Output {
        &self.0[index]
    }
}
