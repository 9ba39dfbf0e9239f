//! Column-renderer table projection.

/// One table column: header plus a cell renderer.
pub struct Column<'a, T> {
    pub header: &'static str,
    render: Box<dyn Fn(&T) -> String + 'a>,
}

impl<'a, T> Column<'a, T> {
    pub fn new(header: &'static str, render: impl Fn(&T) -> String + 'a) -> Self {
        Self {
            header,
            render: Box::new(render),
        }
    }

    pub fn render(&self, item: &T) -> String {
        (self.render)(item)
    }
}

/// One rendered row keyed by the table's key extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub key: String,
    pub cells: Vec<String>,
}

/// Maps records into rows through column renderers.
pub struct Table<'a, T> {
    columns: Vec<Column<'a, T>>,
    key: Box<dyn Fn(&T) -> String + 'a>,
}

impl<'a, T> Table<'a, T> {
    pub fn new(key: impl Fn(&T) -> String + 'a) -> Self {
        Self {
            columns: Vec::new(),
            key: Box::new(key),
        }
    }

    pub fn column(mut self, header: &'static str, render: impl Fn(&T) -> String + 'a) -> Self {
        self.columns.push(Column::new(header, render));
        self
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.header).collect()
    }

    pub fn render_row(&self, item: &T) -> RenderedRow {
        RenderedRow {
            key: (self.key)(item),
            cells: self.columns.iter().map(|column| column.render(item)).collect(),
        }
    }

    pub fn render(&self, items: &[T]) -> Vec<RenderedRow> {
        items.iter().map(|item| self.render_row(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn renders_cells_in_column_order_with_keys() {
        let table = Table::new(|value: &(u32, &'static str)| value.0.to_string())
            .column("Nome", |value| value.1.to_string())
            .column("Dobro", |value| (value.0 * 2).to_string());

        let rows = table.render(&[(1, "a"), (2, "b")]);
        assert_eq!(table.headers(), vec!["Nome", "Dobro"]);
        assert_eq!(rows[1].key, "2");
        assert_eq!(rows[1].cells, vec!["b".to_string(), "4".to_string()]);
    }
}
