use crate::core::models::{Device, Tester};
use crate::ui::cell::{Cell, transform_output};
use crate::ui::table_printer::TablePrinter;
use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

pub const BY_APP_HEADINGS: [&str; 4] = ["First", "Last", "Email", "Groups"];
pub const GLOBAL_HEADINGS: [&str; 7] = [
    "First",
    "Last",
    "Email",
    "Groups",
    "Device Count",
    "Latest Version",
    "Latest Install Date",
];

/// Renders tester tables.
#[derive(Debug, Clone)]
pub struct TesterReport {
    printer: TablePrinter,
    max_width: usize,
}

impl Default for TesterReport {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TesterReport {
    pub fn new(colored_titles: bool) -> Self {
        Self {
            printer: TablePrinter::new().with_colored_titles(colored_titles),
            max_width: WidthUtil.terminal_width(),
        }
    }

    /// Override the terminal width cells are fitted into.
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Titled table with one row per tester, built by `row`.
    pub fn list<W, F>(
        &self,
        testers: &[Tester],
        title: &str,
        headings: &[&str],
        out: &mut W,
        row: F,
    ) -> io::Result<()>
    where
        W: Write + ?Sized,
        F: Fn(&Tester) -> Vec<Cell>,
    {
        let rows: Vec<Vec<Cell>> = testers.iter().map(row).collect();
        let rows = transform_output(headings, &rows, self.max_width);
        self.printer
            .render_table(title, headings, &rows, Some("No testers."), out)
    }

    /// Per-app listings carry no device, version or install data.
    pub fn list_by_app<W: Write + ?Sized>(
        &self,
        testers: &[Tester],
        title: &str,
        out: &mut W,
    ) -> io::Result<()> {
        self.list(testers, title, &BY_APP_HEADINGS, out, |t| {
            vec![
                Cell::text(&t.first_name),
                Cell::text(&t.last_name),
                Cell::text(&t.email),
                Cell::from(t.groups.clone()),
            ]
        })
    }

    pub fn list_global<W: Write + ?Sized>(
        &self,
        testers: &[Tester],
        title: &str,
        out: &mut W,
    ) -> io::Result<()> {
        self.list(testers, title, &GLOBAL_HEADINGS, out, |t| {
            vec![
                Cell::text(&t.first_name),
                Cell::text(&t.last_name),
                Cell::text(&t.email),
                Cell::from(t.groups.clone()),
                Cell::from(t.devices.len()),
                Cell::from(t.full_version()),
                Cell::from(t.pretty_install_date()),
            ]
        })
    }

    pub fn describe_tester<W: Write + ?Sized>(&self, tester: &Tester, out: &mut W) -> io::Result<()> {
        let rows = transform_output(&[], &describe_rows(tester), self.max_width);
        self.printer.render_table(&tester.email, &[], &rows, None, out)
    }
}

/// Key/value rows for a single tester.
pub fn describe_rows(tester: &Tester) -> Vec<Vec<Cell>> {
    let mut rows = vec![
        vec![Cell::text("First name"), Cell::text(&tester.first_name)],
        vec![Cell::text("Last name"), Cell::text(&tester.last_name)],
        vec![Cell::text("Email"), Cell::text(&tester.email)],
    ];

    if !tester.groups.is_empty() {
        rows.push(vec![Cell::text("Groups"), Cell::from(tester.groups.clone())]);
    }

    if tester.latest_install_date().is_some() {
        rows.push(vec![Cell::text("Latest Version"), Cell::from(tester.full_version())]);
        rows.push(vec![
            Cell::text("Latest Install Date"),
            Cell::from(tester.pretty_install_date()),
        ]);
    }

    match tester.devices.split_first() {
        None => rows.push(vec![Cell::text("Devices"), Cell::text("No devices")]),
        Some((first, rest)) => {
            let label = format!("{} Devices", tester.devices.len());
            rows.push(vec![Cell::text(label), Cell::text(device_line(first))]);
            for device in rest {
                rows.push(vec![Cell::text(""), Cell::text(device_line(device))]);
            }
        }
    }
    rows
}

fn device_line(device: &Device) -> String {
    format!("\u{2022} {device}")
}
