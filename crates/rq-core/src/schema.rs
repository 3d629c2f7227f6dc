//! Tables and columns supplied by a schema provider

use crate::lookup::LookupList;
use crate::types::DataType;

/// Column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared type
    pub data_type: DataType,
}

impl Column {
    /// Create a column
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Column list indexed by column name
pub type ColumnList = LookupList<String, Column>;

/// A physical table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Optional schema the table lives in
    pub schema: Option<String>,
    columns: ColumnList,
}

impl Table {
    /// Create a table from its columns.
    ///
    /// Duplicate column names are allowed; they are reported by
    /// [`ambiguous_columns`](Self::ambiguous_columns) and only the first
    /// column of each name is reachable by name.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let name = name.into();
        let columns = ColumnList::new(columns, |c| Some(c.name.clone()));
        if !columns.ambiguous().is_empty() {
            let mut dupes: Vec<&str> = columns.ambiguous().iter().map(String::as_str).collect();
            dupes.sort_unstable();
            log::debug!("Table '{}' has duplicate columns: {}", name, dupes.join(", "));
        }
        Self {
            name,
            schema: None,
            columns,
        }
    }

    /// Return the table placed in `schema`
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Columns in declared order
    pub fn columns(&self) -> &ColumnList {
        &self.columns
    }

    /// First column named `name`
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Names that more than one column shares, sorted
    pub fn ambiguous_columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.ambiguous().iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// `schema.name`, or just `name` without a schema
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
