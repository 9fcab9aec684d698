/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */

use std::fmt::Formatter;
use std::slice;

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::Value;

/// One result row: column names and values in statement order.
#[derive(Debug, PartialEq, Clone)]
pub struct Row {
    pub columns: Vec<String>,
    pub data: Vec<Value>,
}

impl Row {
    pub fn new(columns: Vec<String>, data: Vec<Value>) -> Self {
        Self { columns, data }
    }

    /// Returns length of a row.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns columns of this row.
    pub fn columns_ref(&self) -> &[String] {
        &self.columns
    }

    /// Returns reference to the value of a column with index `index`.
    pub fn as_ref(&self, index: usize) -> Option<&Value> {
        self.data.get(index)
    }

    /// The first field of the row, the one a scalar query reads.
    pub fn first_value(&self) -> Option<&Value> {
        self.data.first()
    }

    pub fn get_value_by_column(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.data.get(idx))
    }

    /// The row as an ordered column-name-to-value object.
    pub fn as_object(&self) -> Value {
        let mut map = IndexMap::new();
        for (column, value) in self.columns.iter().zip(self.data.iter()) {
            map.insert(column.clone(), value.clone());
        }
        Value::Object(map)
    }
}

/// use this to store data retrieved from the database
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Rows {
    pub data: Vec<Row>,
    /// can be optionally set, indicates how many total rows are there in the table
    pub count: Option<usize>,
}

impl std::fmt::Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "<==    Columns: {}",
            self.data
                .first()
                .map(|v| v.columns.join(", "))
                .unwrap_or_else(|| "[]".to_string())
        )?;
        for row in self.data.iter() {
            writeln!(
                f,
                "<==        Row: {}",
                row.data
                    .iter()
                    .map(|v| format!("{}", v))
                    .collect::<Vec<String>>()
                    .join(", ")
            )?;
        }
        write!(f, "<==      Total: {}", self.count.unwrap_or(self.data.len()))
    }
}

impl Rows {
    pub fn empty() -> Self {
        Rows::new()
    }

    pub fn new() -> Self {
        Rows {
            data: vec![],
            count: None,
        }
    }

    /// Returns true if the row has a length of 0.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push(&mut self, row: Row) {
        self.data.push(row)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn first(&self) -> Option<&Row> {
        self.data.first()
    }

    pub fn first_as_object(&self) -> Option<Value> {
        self.first().map(|row| row.as_object())
    }

    pub fn last(&self) -> Option<&Row> {
        self.data.last()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.data.get(index)
    }

    /// Returns an iterator over the `Row`s.
    pub fn iter(&self) -> RowsIter<'_> {
        RowsIter {
            inner: self.data.iter(),
        }
    }
}

/// An iterator over `Row`s.
pub struct RowsIter<'a> {
    inner: slice::Iter<'a, Row>,
}

impl<'a> Iterator for RowsIter<'a> {
    type Item = &'a Row;

    fn next(&mut self) -> Option<&'a Row> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for RowsIter<'a> {}

impl<'a> IntoIterator for &'a Rows {
    type Item = &'a Row;
    type IntoIter = RowsIter<'a>;

    fn into_iter(self) -> RowsIter<'a> {
        self.iter()
    }
}

/// Outcome of a non-query statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExecuteResult {
    /// Rows changed by the statement.
    pub rows_affected: u64,
    /// Backend-assigned identifier, e.g. an auto-increment key.
    pub last_insert_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Rows {
        let mut rows = Rows::new();
        rows.push(Row::new(
            vec!["id".into(), "name".into()],
            vec![Value::Bigint(1), Value::Text("Jack".into())],
        ));
        rows.push(Row::new(
            vec!["id".into(), "name".into()],
            vec![Value::Bigint(2), Value::Text("Rose".into())],
        ));
        rows
    }

    #[test]
    fn rows_keep_statement_order() {
        let rows = sample();
        assert_eq!(rows.len(), 2);
        let first = rows.first().unwrap();
        assert_eq!(first.columns_ref(), &["id".to_string(), "name".to_string()]);
        assert_eq!(first.first_value(), Some(&Value::Bigint(1)));
        assert_eq!(
            first.get_value_by_column("name"),
            Some(&Value::Text("Jack".into()))
        );
        assert_eq!(first.get_value_by_column("missing"), None);
    }

    #[test]
    fn row_as_object_preserves_column_order() {
        let rows = sample();
        let object = rows.first_as_object().unwrap();
        let map = object.as_object().unwrap();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec!["id", "name"]);
    }
}
