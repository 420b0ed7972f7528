use crate::cli::io;

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
    pub align_right: bool,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
            align_right: false,
        }
    }

    pub fn numeric(header: impl Into<String>, width: usize) -> Self {
        Self {
            align_right: true,
            ..Self::new(header, width)
        }
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    /// Renders the table as plain padded lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(title.clone());
        }
        let total_width = self
            .columns
            .iter()
            .map(|col| col.width + 1)
            .sum::<usize>()
            .saturating_sub(1);
        lines.push(self.format_line(self.columns.iter().map(|col| col.header.as_str())));
        lines.push("-".repeat(total_width.max(1)));
        for row in &self.rows {
            lines.push(self.format_line(row.iter().map(String::as_str)));
        }
        lines
    }

    fn format_line<'a>(&self, cells: impl Iterator<Item = &'a str>) -> String {
        let mut cells = cells;
        let mut line = String::new();
        for (idx, column) in self.columns.iter().enumerate() {
            if idx > 0 {
                line.push(' ');
            }
            let cell = cells.next().unwrap_or("");
            if column.align_right {
                line.push_str(&format!("{:>width$}", cell, width = column.width));
            } else {
                line.push_str(&format!("{:width$}", cell, width = column.width));
            }
        }
        line.trim_end().to_string()
    }
}

/// Prints a [`Table`] through the CLI output helpers.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table) {
        for line in table.lines() {
            io::print_info(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_and_aligns_columns() {
        let mut table = Table::new(
            Some("Totals"),
            vec![TableColumn::new("Category", 10), TableColumn::numeric("Net", 8)],
        );
        table.add_row(vec!["Personal", "2,700.00"]);
        table.add_row(vec!["Business"]);
        insta::assert_snapshot!(table.lines().join("\n"), @r###"
Totals
Category        Net
-------------------
Personal   2,700.00
Business
"###);
    }
}
