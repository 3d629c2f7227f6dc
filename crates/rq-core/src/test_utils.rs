//! Shared test fixtures for rq-core and its dependents

use crate::relation::Relation;
use crate::schema::{Column, Table};
use crate::types::{BOOLEAN, INTEGER, TEXT};

/// `events(id INTEGER, name TEXT, value INTEGER)`
pub fn events_table() -> Table {
    Table::new(
        "events",
        vec![
            Column::new("id", INTEGER),
            Column::new("name", TEXT),
            Column::new("value", INTEGER),
        ],
    )
}

/// `contacts(id INTEGER, address TEXT, city TEXT, country TEXT)`
pub fn contacts_table() -> Table {
    Table::new(
        "contacts",
        vec![
            Column::new("id", INTEGER),
            Column::new("address", TEXT),
            Column::new("city", TEXT),
            Column::new("country", TEXT),
        ],
    )
}

/// `data(i INTEGER, t TEXT, b BOOLEAN)`
pub fn data_table() -> Table {
    Table::new(
        "data",
        vec![
            Column::new("i", INTEGER),
            Column::new("t", TEXT),
            Column::new("b", BOOLEAN),
        ],
    )
}

/// Relation over [`events_table`]
pub fn events() -> Relation {
    Relation::table(events_table())
}

/// Relation over [`contacts_table`]
pub fn contacts() -> Relation {
    Relation::table(contacts_table())
}

/// Relation over [`data_table`]
pub fn data() -> Relation {
    Relation::table(data_table())
}
