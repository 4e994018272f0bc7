/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rayon::prelude::*;

use crate::curve::{Point, Scalar};
use crate::tobytes::*;

///A rectangular `rows × cols` table of ring values with explicit
///`(row, column)` indexing.
///
///Storage is column-major: a ring column is one contiguous slice, which is
///what lets the signing loops hand disjoint columns to worker threads
///without locks. Serialization is row-major, matching the transcript order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    rows: usize,
    cells: Vec<T>,
}

///A ring of public keys: one row per signing layer, one column per member.
pub type PointTable = Table<Point>;
///The response ("salt") values of a signature, one per ring cell.
pub type ScalarTable = Table<Scalar>;

impl<T: Copy> Table<T> {
    ///Create a `rows × cols` table with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        return Table {
            rows,
            cells: vec![value; rows * cols],
        };
    }

    ///Build a table from row slices. All rows must have the same length.
    pub fn from_rows(source: &[Vec<T>]) -> Self {
        let rows = source.len();
        let cols = source.first().map_or(0, |row| row.len());
        assert!(
            source.iter().all(|row| row.len() == cols),
            "ragged table rows"
        );

        let mut cells = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for row in source {
                cells.push(row[j]);
            }
        }
        return Table { rows, cells };
    }
}

impl<T> Table<T> {
    pub fn rows(&self) -> usize {
        return self.rows;
    }

    pub fn cols(&self) -> usize {
        return match self.rows {
            0 => 0,
            rows => self.cells.len() / rows,
        };
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        return &self.cells[col * self.rows + row];
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[col * self.rows + row] = value;
    }

    ///One column as a contiguous slice.
    pub fn column(&self, col: usize) -> &[T] {
        return &self.cells[col * self.rows..(col + 1) * self.rows];
    }

    //every cell, column-major; the canonical fill order
    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut T> {
        return self.cells.iter_mut();
    }

    //disjoint column slices for the worker pool
    pub(crate) fn par_columns_mut(&mut self) -> impl IndexedParallelIterator<Item = &mut [T]>
    where
        T: Send,
    {
        return self.cells.par_chunks_mut(self.rows);
    }
}

//the on-wire form: row-major cells, as consumers expect them
#[derive(Serialize, Deserialize)]
struct TableRepr<T> {
    rows: usize,
    cells: Vec<T>,
}

impl<T: Copy + Serialize> Serialize for Table<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut cells = Vec::with_capacity(self.cells.len());
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                cells.push(*self.get(i, j));
            }
        }
        return TableRepr {
            rows: self.rows,
            cells,
        }
        .serialize(serializer);
    }
}

impl<'de, T: Copy + Deserialize<'de>> Deserialize<'de> for Table<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = TableRepr::<T>::deserialize(deserializer)?;
        if repr.rows == 0 || repr.cells.len() % repr.rows != 0 {
            return Err(serde::de::Error::custom("malformed table dimensions"));
        }

        let cols = repr.cells.len() / repr.rows;
        let mut cells = Vec::with_capacity(repr.cells.len());
        for j in 0..cols {
            for i in 0..repr.rows {
                cells.push(repr.cells[i * cols + j]);
            }
        }
        return Ok(Table {
            rows: repr.rows,
            cells,
        });
    }
}
