use crate::ui::ansi::{FG_GREEN, paint};
use crate::ui::width_util::WidthUtil;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
    colored_titles: bool,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone that paints table titles green.
    pub fn with_colored_titles(&self, enabled: bool) -> Self {
        let mut c = self.clone();
        c.colored_titles = enabled;
        c
    }

    fn write_line<W: Write + ?Sized>(&self, out: &mut W, s: &str) -> std::io::Result<()> {
        writeln!(out, "{}", s.trim_end())
    }

    fn write_separator<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> std::io::Result<()> {
        let line = if width == 0 {
            "-".into()
        } else {
            "-".repeat(width)
        };
        self.write_line(out, &line)
    }

    /// Render into any writer. Tables without headers print rows straight
    /// under the title.
    pub fn render_table<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: Option<&str>,
        out: &mut W,
    ) -> std::io::Result<()> {
        let col_widths = self.compute_col_widths(headers, rows);
        let total_width = self.table_natural_width(&col_widths);

        // Empty path
        if rows.is_empty() {
            if let Some(msg) = empty_message {
                return self.render_empty_state(out, title, headers, msg, &col_widths, total_width);
            }
        }

        let width = total_width.max(self.util.visible_width(title));
        self.write_banner(out, title, width)?;
        self.render_header(out, headers, &col_widths, width)?;
        self.render_rows(out, rows, &col_widths, width)
    }

    fn compute_col_widths<T: AsRef<str>>(
        &self,
        headers: &[&str],
        rows: &[Vec<T>],
    ) -> Vec<usize> {
        let col_count = rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(headers.len());
        let mut col_widths = vec![0usize; col_count];
        for (i, h) in headers.iter().enumerate() {
            col_widths[i] = col_widths[i].max(self.util.visible_width(h));
        }
        for r in rows {
            for (i, cell) in r.iter().enumerate() {
                col_widths[i] = col_widths[i].max(self.util.visible_width(cell.as_ref()));
            }
        }
        col_widths
    }

    fn table_natural_width(&self, col_widths: &[usize]) -> usize {
        if col_widths.is_empty() {
            0
        } else {
            col_widths.iter().copied().sum::<usize>() + (col_widths.len() - 1) * 3
        }
    }

    fn render_empty_state<W: Write + ?Sized>(
        &self,
        out: &mut W,
        title: &str,
        headers: &[&str],
        msg: &str,
        col_widths: &[usize],
        total_width: usize,
    ) -> std::io::Result<()> {
        let width = total_width
            .max(self.util.visible_width(title))
            .max(self.util.visible_width(msg));
        self.write_banner(out, title, width)?;
        self.render_header(out, headers, col_widths, width)?;
        self.write_line(out, msg)?;
        self.write_separator(out, width)
    }

    fn write_banner<W: Write + ?Sized>(
        &self,
        out: &mut W,
        title: &str,
        width: usize,
    ) -> std::io::Result<()> {
        self.write_separator(out, width)?;
        self.write_line(out, &paint(title, FG_GREEN, self.colored_titles))?;
        self.write_separator(out, width)
    }

    fn render_header<W: Write + ?Sized>(
        &self,
        out: &mut W,
        headers: &[&str],
        col_widths: &[usize],
        width: usize,
    ) -> std::io::Result<()> {
        if headers.is_empty() {
            return Ok(());
        }
        let line = self.build_row_line(headers, col_widths);
        self.write_line(out, &line)?;
        self.write_separator(out, width)
    }

    fn render_rows<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        out: &mut W,
        rows: &[Vec<T>],
        col_widths: &[usize],
        width: usize,
    ) -> std::io::Result<()> {
        for row in rows {
            let line = self.build_row_line(row, col_widths);
            self.write_line(out, &line)?;
        }
        self.write_separator(out, width)
    }

    fn build_row_line<T: AsRef<str>>(&self, row: &[T], col_widths: &[usize]) -> String {
        row.iter()
            .enumerate()
            .take(col_widths.len())
            .map(|(i, cell)| self.util.pad_visible(cell.as_ref(), col_widths[i]))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
