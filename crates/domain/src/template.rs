//! Grid templates — row patterns describing how tiles span cells.
//!
//! A template is an ordered list of rows. Each row holds whitespace-separated
//! single-character cells: `.` is an anonymous 1×1 tile, any other label
//! spans the maximal rectangle of equal labels starting at its top-left cell.
//!
//! ```text
//!  A A A      <- rect 0: 3 wide, 2 tall
//!  A A A
//!  B B B      <- rect 1
//!  B B B
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, MxError, TemplateError};

/// Row pattern of the even-indexed tiles of an info grid.
pub const ROW_A: &str = " A A A ";
/// Row pattern of the odd-indexed tiles of an info grid.
pub const ROW_B: &str = " B B B ";
/// Single-cell template used by every header grid.
pub const HEADER_ROWS: [&str; 1] = [" . "];

const ANONYMOUS: char = '.';

/// Produce the rows of an info grid holding `tile_count` tiles.
///
/// Every tile is 3 cells wide and 2 cells tall; tiles alternate between the
/// `A` and `B` labels so consecutive tiles stay distinct rectangles.
#[must_use]
pub fn generate_template(tile_count: usize) -> Vec<String> {
    let mut rows = Vec::with_capacity(tile_count * 2);
    for i in 0..tile_count {
        let row = if i % 2 == 0 { ROW_A } else { ROW_B };
        rows.push(row.to_string());
        rows.push(row.to_string());
    }
    rows
}

/// Convert a signed, externally supplied tile count.
///
/// # Errors
///
/// Returns [`MxError::InvalidArgument`] when `count` is negative.
pub fn tile_count(count: i64) -> Result<usize, MxError> {
    usize::try_from(count).map_err(|_| ArgumentError::NegativeTileCount(count).into())
}

/// A tile footprint in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub label: char,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    rows: Vec<String>,
    num_cols: usize,
    rects: Vec<CellRect>,
}

impl Template {
    /// Parse template rows.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::InvalidTemplate`] when rows differ in length or
    /// cell count, or a cell is wider than one character.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MxError> {
        let rows: Vec<String> = rows.iter().map(|row| row.as_ref().to_string()).collect();
        let cells = parse_cells(&rows)?;
        let num_cols = cells.first().map_or(0, Vec::len);
        let rects = find_rects(&cells, num_cols);
        Ok(Self {
            rows,
            num_cols,
            rects,
        })
    }

    /// The fixed single-cell header template.
    #[must_use]
    pub fn header() -> Self {
        Self {
            rows: HEADER_ROWS.iter().map(|row| (*row).to_string()).collect(),
            num_cols: 1,
            rects: vec![CellRect {
                label: ANONYMOUS,
                x: 0,
                y: 0,
                width: 1,
                height: 1,
            }],
        }
    }

    /// Info template holding `tile_count` tiles.
    #[must_use]
    pub fn info(tile_count: usize) -> Self {
        let rows = generate_template(tile_count);
        let rects = (0..tile_count)
            .map(|i| CellRect {
                label: if i % 2 == 0 { 'A' } else { 'B' },
                x: 0,
                y: i * 2,
                width: 3,
                height: 2,
            })
            .collect();
        Self {
            rows,
            num_cols: if tile_count == 0 { 0 } else { 3 },
            rects,
        }
    }

    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Tile footprints in top-to-bottom, left-to-right order.
    #[must_use]
    pub fn rects(&self) -> &[CellRect] {
        &self.rects
    }

    /// Number of tiles (and therefore tile ids) this template needs.
    #[must_use]
    pub fn required_tiles(&self) -> usize {
        self.rects.len()
    }
}

fn parse_cells(rows: &[String]) -> Result<Vec<Vec<char>>, TemplateError> {
    let expected_len = rows.first().map_or(0, String::len);
    let mut grid: Vec<Vec<char>> = Vec::with_capacity(rows.len());

    for (row_index, row) in rows.iter().enumerate() {
        if row.len() != expected_len {
            return Err(TemplateError::RaggedRow {
                row: row_index,
                expected: expected_len,
                actual: row.len(),
            });
        }

        let mut cells = Vec::new();
        for cell in row.split_whitespace() {
            let mut chars = cell.chars();
            match (chars.next(), chars.next()) {
                (Some(label), None) => cells.push(label),
                _ => {
                    return Err(TemplateError::WideCell {
                        row: row_index,
                        cell: cell.to_string(),
                    });
                }
            }
        }

        if let Some(first) = grid.first()
            && first.len() != cells.len()
        {
            return Err(TemplateError::CellCount {
                row: row_index,
                expected: first.len(),
                actual: cells.len(),
            });
        }
        grid.push(cells);
    }

    Ok(grid)
}

fn find_rects(cells: &[Vec<char>], num_cols: usize) -> Vec<CellRect> {
    let num_rows = cells.len();
    let mut taken = vec![vec![false; num_cols]; num_rows];
    let mut rects = Vec::new();

    for y in 0..num_rows {
        for x in 0..num_cols {
            if taken[y][x] {
                continue;
            }
            let label = cells[y][x];

            let (width, height) = if label == ANONYMOUS {
                (1, 1)
            } else {
                let width = (x..num_cols)
                    .take_while(|&cx| cells[y][cx] == label && !taken[y][cx])
                    .count();
                let height = (y..num_rows)
                    .take_while(|&cy| {
                        (x..x + width).all(|cx| cells[cy][cx] == label && !taken[cy][cx])
                    })
                    .count();
                (width, height)
            };

            for row in taken.iter_mut().skip(y).take(height) {
                for cell in row.iter_mut().skip(x).take(width) {
                    *cell = true;
                }
            }
            rects.push(CellRect {
                label,
                x,
                y,
                width,
                height,
            });
        }
    }

    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_two_rows_per_tile_alternating_labels() {
        let rows = generate_template(3);
        assert_eq!(
            rows,
            vec![ROW_A, ROW_A, ROW_B, ROW_B, ROW_A, ROW_A]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn should_generate_rectangular_rows_for_any_count() {
        for n in 0..=15 {
            let rows = generate_template(n);
            assert_eq!(rows.len(), 2 * n);
            assert!(rows.iter().all(|row| row.len() == ROW_A.len()));
            for (i, pair) in rows.chunks(2).enumerate() {
                let expected = if i % 2 == 0 { ROW_A } else { ROW_B };
                assert_eq!(pair, [expected, expected]);
            }
        }
    }

    #[test]
    fn should_generate_empty_template_for_zero_tiles() {
        assert!(generate_template(0).is_empty());
        let template = Template::from_rows(&generate_template(0)).unwrap();
        assert_eq!(template.required_tiles(), 0);
        assert_eq!(template.num_cols(), 0);
    }

    #[test]
    fn should_reject_negative_tile_count() {
        assert!(matches!(
            tile_count(-1),
            Err(MxError::InvalidArgument(ArgumentError::NegativeTileCount(-1)))
        ));
        assert_eq!(tile_count(10).unwrap(), 10);
    }

    #[test]
    fn should_parse_header_row_into_single_cell() {
        let template = Template::from_rows(&HEADER_ROWS).unwrap();
        assert_eq!(template, Template::header());
        assert_eq!(template.num_cols(), 1);
        assert_eq!(template.num_rows(), 1);
    }

    #[test]
    fn should_parse_generated_rows_into_three_by_two_rects() {
        let template = Template::from_rows(&generate_template(3)).unwrap();
        assert_eq!(template.num_cols(), 3);
        assert_eq!(template.num_rows(), 6);
        assert_eq!(template.required_tiles(), 3);

        let labels: Vec<char> = template.rects().iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!['A', 'B', 'A']);
        assert!(template.rects().iter().all(|r| r.width == 3 && r.height == 2));
        assert_eq!(template.rects()[2].y, 4);
    }

    #[test]
    fn should_match_precomputed_info_template() {
        for n in [0, 1, 4, 10] {
            let parsed = Template::from_rows(&generate_template(n)).unwrap();
            assert_eq!(parsed, Template::info(n));
        }
    }

    #[test]
    fn should_split_anonymous_cells_into_single_tiles() {
        let template = Template::from_rows(&[" . . ", " A A "]).unwrap();
        assert_eq!(template.required_tiles(), 3);
        assert_eq!(template.rects()[0].width, 1);
        assert_eq!(template.rects()[2].width, 2);
    }

    #[test]
    fn should_reject_ragged_rows() {
        let result = Template::from_rows(&[" A A ", " A A A "]);
        assert!(matches!(
            result,
            Err(MxError::InvalidTemplate(TemplateError::RaggedRow { row: 1, .. }))
        ));
    }

    #[test]
    fn should_reject_multi_character_cells() {
        let result = Template::from_rows(&[" AB A "]);
        assert!(matches!(
            result,
            Err(MxError::InvalidTemplate(TemplateError::WideCell { .. }))
        ));
    }

    #[test]
    fn should_reject_rows_with_different_cell_counts() {
        let result = Template::from_rows(&[" A A  ", "  A   "]);
        assert!(matches!(
            result,
            Err(MxError::InvalidTemplate(TemplateError::CellCount { .. }))
        ));
    }
}
