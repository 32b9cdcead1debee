use crate::ui::width_util::WidthUtil;

/// Narrowest a column is shrunk to when a table overflows the terminal.
const MIN_COLUMN_WIDTH: usize = 8;
const COLUMN_SEPARATOR_WIDTH: usize = 3;

/// A report cell before it is flattened to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Count(usize),
    List(Vec<String>),
    Empty,
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Count(n) => n.to_string(),
            Cell::List(items) => items.join(", "),
            Cell::Empty => String::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Cell::Count(n)
    }
}

impl From<Vec<String>> for Cell {
    fn from(items: Vec<String>) -> Self {
        Cell::List(items)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Cell::Empty, Into::into)
    }
}

/// Flatten cells to strings and shrink the widest columns (cutting values in
/// the middle) until the table fits in `max_width`. A column never shrinks
/// below its heading or `MIN_COLUMN_WIDTH`; when even that does not fit,
/// values are left whole.
pub fn transform_output(
    headings: &[&str],
    rows: &[Vec<Cell>],
    max_width: usize,
) -> Vec<Vec<String>> {
    let util = WidthUtil;
    let flat: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(Cell::render).collect())
        .collect();

    let col_count = flat
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(headings.len());
    if col_count == 0 {
        return flat;
    }
    let mut floors = vec![MIN_COLUMN_WIDTH; col_count];
    let mut widths = vec![0usize; col_count];
    for (i, heading) in headings.iter().enumerate() {
        let w = util.visible_width(heading);
        floors[i] = floors[i].max(w);
        widths[i] = w;
    }
    for row in &flat {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(util.visible_width(cell));
        }
    }

    let separators = (col_count - 1) * COLUMN_SEPARATOR_WIDTH;
    let narrowest: usize = widths
        .iter()
        .zip(&floors)
        .map(|(w, floor)| *w.min(floor))
        .sum::<usize>()
        + separators;
    if narrowest > max_width {
        // cannot fit even fully shrunk; cutting values would only lose data
        return flat;
    }

    let mut total: usize = widths.iter().sum::<usize>() + separators;
    while total > max_width {
        let shrinkable = widths
            .iter()
            .zip(&floors)
            .enumerate()
            .filter(|&(_, (w, floor))| w > floor)
            .max_by_key(|&(_, (w, _))| *w);
        let Some((idx, _)) = shrinkable else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }

    flat.into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(i, cell)| util.truncate_middle(&cell, widths[i]))
                .collect()
        })
        .collect()
}
