//! Schema metadata providers
//!
//! Table definitions come from outside the algebra. [`MetadataProvider`] is
//! the seam; [`Catalog`] is an in-memory provider that can be filled by hand
//! or from a YAML document.

use crate::error::{CoreError, CoreResult};
use crate::schema::{Column, Table};
use crate::types::parse_data_type;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source of table definitions
pub trait MetadataProvider {
    /// Table `name` in `schema`, or in no schema when `schema` is `None`
    fn table(&self, name: &str, schema: Option<&str>) -> Option<Table>;

    /// Whether table `name` exists in `schema`
    fn table_exists(&self, name: &str, schema: Option<&str>) -> bool {
        self.table(name, schema).is_some()
    }

    /// Names of the tables in `schema`
    fn table_names(&self, schema: Option<&str>) -> Vec<String>;

    /// Tables in `schema`
    fn tables(&self, schema: Option<&str>) -> Vec<Table> {
        self.table_names(schema)
            .iter()
            .filter_map(|name| self.table(name, schema))
            .collect()
    }
}

/// Catalog document as written in YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Table definitions
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

/// Table definition in a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDef {
    /// Table name
    pub name: String,
    /// Optional schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Columns in declared order
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

/// Column definition in a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Type name, e.g. `INTEGER` or `VARCHAR(32)`
    pub data_type: String,
}

impl From<&TableDef> for Table {
    fn from(def: &TableDef) -> Self {
        let columns = def
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), parse_data_type(&c.data_type)))
            .collect();
        let table = Table::new(def.name.clone(), columns);
        match &def.schema {
            Some(schema) => table.with_schema(schema.clone()),
            None => table,
        }
    }
}

/// In-memory table catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: Vec<Table>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table; a table with the same name and schema is rejected
    pub fn add_table(&mut self, table: Table) -> CoreResult<()> {
        if self.find(&table.name, table.schema.as_deref()).is_some() {
            return Err(CoreError::DuplicateTable {
                name: table.qualified_name(),
            });
        }
        self.tables.push(table);
        Ok(())
    }

    /// Parse a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| CoreError::CatalogParseError {
                message: e.to_string(),
            })?;
        let mut catalog = Self::new();
        for def in &file.tables {
            catalog.add_table(Table::from(def))?;
        }
        log::debug!("Loaded catalog with {} table(s)", catalog.tables.len());
        Ok(catalog)
    }

    /// Load a catalog from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    fn find(&self, name: &str, schema: Option<&str>) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.name == name && t.schema.as_deref() == schema)
    }
}

impl MetadataProvider for Catalog {
    fn table(&self, name: &str, schema: Option<&str>) -> Option<Table> {
        self.find(name, schema).cloned()
    }

    fn table_names(&self, schema: Option<&str>) -> Vec<String> {
        self.tables
            .iter()
            .filter(|t| t.schema.as_deref() == schema)
            .map(|t| t.name.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
