use oxrdf::{Term, Variable};
use std::slice;

/// A table of variable bindings: an ordered list of columns and ordered rows.
///
/// Cells are `None` when the variable is unbound in the row.
///
/// ```
/// use oxrdf::{Literal, Variable};
/// use oxreason::BindingTable;
///
/// let mut table = BindingTable::new([Variable::new("x")?]);
/// table.push([Some(Literal::from(1).into())]);
/// table.push([None]);
/// assert_eq!(table.len(), 2);
/// assert!(table.rows().nth(1).unwrap().get(&Variable::new("x")?).is_none());
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindingTable {
    variables: Vec<Variable>,
    rows: Vec<Vec<Option<Term>>>,
}

impl BindingTable {
    /// Creates a table without rows.
    pub fn new(variables: impl IntoIterator<Item = Variable>) -> Self {
        Self {
            variables: variables.into_iter().collect(),
            rows: Vec::new(),
        }
    }

    /// The table with no column and a single empty row, the neutral element of joins.
    pub fn unit() -> Self {
        Self {
            variables: Vec::new(),
            rows: vec![Vec::new()],
        }
    }

    /// Builds a table from its rows.
    ///
    /// Rows shorter than the column list are padded with unbound cells and longer rows are truncated.
    pub fn from_rows(
        variables: impl IntoIterator<Item = Variable>,
        rows: impl IntoIterator<Item = Vec<Option<Term>>>,
    ) -> Self {
        let mut table = Self::new(variables);
        for row in rows {
            table.push(row);
        }
        table
    }

    #[inline]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Position of the variable in the column list.
    pub fn column(&self, variable: &Variable) -> Option<usize> {
        self.variables.iter().position(|v| v == variable)
    }

    /// Adds a column, unbound in every existing row. Returns its position.
    pub fn add_column(&mut self, variable: Variable) -> usize {
        if let Some(column) = self.column(&variable) {
            return column;
        }
        self.variables.push(variable);
        for row in &mut self.rows {
            row.push(None);
        }
        self.variables.len() - 1
    }

    /// Appends a row.
    pub fn push(&mut self, row: impl IntoIterator<Item = Option<Term>>) {
        let mut row = row.into_iter().collect::<Vec<_>>();
        row.resize(self.variables.len(), None);
        self.rows.push(row);
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> BindingRows<'_> {
        BindingRows {
            variables: &self.variables,
            inner: self.rows.iter(),
        }
    }

    /// Keeps the rows matching the predicate, in order.
    #[must_use]
    pub fn filter(&self, mut predicate: impl FnMut(BindingRow<'_>) -> bool) -> Self {
        Self {
            variables: self.variables.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| {
                    predicate(BindingRow {
                        variables: &self.variables,
                        values: row,
                    })
                })
                .cloned()
                .collect(),
        }
    }

    pub(crate) fn into_rows(self) -> Vec<Vec<Option<Term>>> {
        self.rows
    }
}

/// A row of a [`BindingTable`].
#[derive(Debug, Clone, Copy)]
pub struct BindingRow<'a> {
    variables: &'a [Variable],
    values: &'a [Option<Term>],
}

impl<'a> BindingRow<'a> {
    /// The value bound to the variable, if any.
    pub fn get(&self, variable: &Variable) -> Option<&'a Term> {
        let column = self.variables.iter().position(|v| v == variable)?;
        self.values.get(column)?.as_ref()
    }

    /// The bound pairs of the row, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Variable, &'a Term)> + 'a {
        self.variables
            .iter()
            .zip(self.values)
            .filter_map(|(variable, value)| Some((variable, value.as_ref()?)))
    }

    #[inline]
    pub fn values(&self) -> &'a [Option<Term>] {
        self.values
    }
}

/// An iterator over the rows of a [`BindingTable`].
pub struct BindingRows<'a> {
    variables: &'a [Variable],
    inner: slice::Iter<'a, Vec<Option<Term>>>,
}

impl<'a> Iterator for BindingRows<'a> {
    type Item = BindingRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(BindingRow {
            variables: self.variables,
            values: self.inner.next()?,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for BindingRows<'_> {}
