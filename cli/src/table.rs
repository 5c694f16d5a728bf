// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// A plain text table: one line per row, cells padded to the widest one.
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }

    fn column_widths(&self, header: &[Cow<'_, str>], table: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths = vec![0; self.columns.len()];
        for row in std::iter::once(header).chain(table.iter().map(Vec::as_slice)) {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }
}

impl<'a, T, C: TableColumn<T>> fmt::Display for Table<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<_> = self.columns.iter().map(|c| c.name()).collect();
        let table: Vec<Vec<_>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();
        let widths = self.column_widths(&header, &table);
        let last = self.columns.len().saturating_sub(1);

        for (j, (name, width)) in header.iter().zip(&widths).enumerate() {
            let padded = pad(name, *width, PaddingDirection::Left, j == last);
            write!(f, "{}", padded.bold())?;
            write!(f, "{}", if j < last { self.separator } else { "\n" })?;
        }

        for (cells, data) in table.iter().zip(self.data) {
            for (j, ((col, cell), width)) in self.columns.iter().zip(cells).zip(&widths).enumerate()
            {
                let padded = pad(cell, *width, col.padding_direction(), j == last);
                match col.get_color(data) {
                    Some(color) => write!(f, "{}", padded.color(color))?,
                    None => write!(f, "{padded}")?,
                }
                write!(f, "{}", if j < last { self.separator } else { "\n" })?;
            }
        }
        Ok(())
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, is_last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        // Last column does not need padding if it's left-aligned
        PaddingDirection::Left if is_last => cell.to_owned(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}
