//! The fixed set of wiki categories and their table layouts.
//!
//! `Category` is the only path from a caller-supplied name to a table
//! identifier: anything that does not parse into a variant never reaches SQL.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    pub fn as_sql(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
}

impl ColumnDef {
    const fn id() -> Self {
        Self {
            name: "id",
            ty: ColumnType::Integer,
            primary_key: true,
        }
    }

    const fn text(name: &'static str) -> Self {
        Self {
            name,
            ty: ColumnType::Text,
            primary_key: false,
        }
    }

    const fn integer(name: &'static str) -> Self {
        Self {
            name,
            ty: ColumnType::Integer,
            primary_key: false,
        }
    }

    /// Column clause as it appears inside `CREATE TABLE (...)`.
    pub fn definition(&self) -> String {
        if self.primary_key {
            format!("{} {} PRIMARY KEY AUTOINCREMENT", self.name, self.ty.as_sql())
        } else {
            format!("{} {} NOT NULL", self.name, self.ty.as_sql())
        }
    }
}

const ARMOUR: &[ColumnDef] = &[
    ColumnDef::id(),
    ColumnDef::text("name"),
    ColumnDef::integer("armour_points"),
    ColumnDef::integer("durability"),
    ColumnDef::text("description"),
    ColumnDef::text("category"),
];

const BLOCKS: &[ColumnDef] = &[
    ColumnDef::id(),
    ColumnDef::text("name"),
    ColumnDef::text("description"),
    ColumnDef::text("category"),
];

const FOOD: &[ColumnDef] = &[
    ColumnDef::id(),
    ColumnDef::text("name"),
    ColumnDef::integer("hunger_points"),
    ColumnDef::text("description"),
    ColumnDef::text("category"),
];

const ITEMS: &[ColumnDef] = &[
    ColumnDef::id(),
    ColumnDef::text("name"),
    ColumnDef::text("description"),
    ColumnDef::text("category"),
];

const MOBS: &[ColumnDef] = &[
    ColumnDef::id(),
    ColumnDef::text("name"),
    ColumnDef::text("behaviour"),
    ColumnDef::integer("hitpoints"),
    ColumnDef::text("description"),
    ColumnDef::text("category"),
];

const POTIONS: &[ColumnDef] = &[
    ColumnDef::id(),
    ColumnDef::text("name"),
    ColumnDef::text("effect"),
    ColumnDef::text("duration"),
    ColumnDef::text("description"),
    ColumnDef::text("category"),
];

const TOOLS: &[ColumnDef] = &[
    ColumnDef::id(),
    ColumnDef::text("name"),
    ColumnDef::integer("durability"),
    ColumnDef::text("description"),
    ColumnDef::text("category"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Armour,
    Blocks,
    Food,
    Items,
    Mobs,
    Potions,
    Tools,
}

impl Category {
    /// Every category, in table creation order.
    pub const ALL: [Category; 7] = [
        Category::Armour,
        Category::Blocks,
        Category::Food,
        Category::Items,
        Category::Mobs,
        Category::Potions,
        Category::Tools,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            Category::Armour => "armour",
            Category::Blocks => "blocks",
            Category::Food => "food",
            Category::Items => "items",
            Category::Mobs => "mobs",
            Category::Potions => "potions",
            Category::Tools => "tools",
        }
    }

    /// Human-readable heading used on the wiki pages.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Armour => "Armour",
            Category::Blocks => "Blocks",
            Category::Food => "Food",
            Category::Items => "Items",
            Category::Mobs => "Mobs",
            Category::Potions => "Potions",
            Category::Tools => "Tools",
        }
    }

    /// Columns in declaration order (the order `SELECT *` returns them).
    pub fn columns(self) -> &'static [ColumnDef] {
        match self {
            Category::Armour => ARMOUR,
            Category::Blocks => BLOCKS,
            Category::Food => FOOD,
            Category::Items => ITEMS,
            Category::Mobs => MOBS,
            Category::Potions => POTIONS,
            Category::Tools => TOOLS,
        }
    }

    /// Looks up a column that callers may write to. The primary key is never writable.
    pub fn writable_column(self, name: &str) -> Option<&'static ColumnDef> {
        self.columns()
            .iter()
            .find(|c| !c.primary_key && c.name == name)
    }

    pub fn create_table_sql(self) -> String {
        let columns: Vec<String> = self.columns().iter().map(ColumnDef::definition).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.table_name(),
            columns.join(", ")
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match against the table names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.table_name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_table_name() {
        for category in Category::ALL {
            assert_eq!(category.table_name().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn rejects_names_outside_the_allow_list() {
        for raw in ["", "Items", "users", "items; DROP TABLE items", "sqlite_master"] {
            assert_eq!(
                raw.parse::<Category>(),
                Err(UnknownCategory(raw.to_string())),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn every_table_has_the_shared_columns() {
        for category in Category::ALL {
            let names: Vec<&str> = category.columns().iter().map(|c| c.name).collect();
            assert_eq!(names.first(), Some(&"id"));
            assert_eq!(names.get(1), Some(&"name"));
            assert!(names.ends_with(&["description", "category"]));
        }
    }

    #[test]
    fn id_is_not_writable() {
        assert!(Category::Items.writable_column("id").is_none());
        assert!(Category::Items.writable_column("name").is_some());
        assert!(Category::Items.writable_column("durability").is_none());
        assert!(Category::Tools.writable_column("durability").is_some());
    }

    #[test]
    fn create_table_sql_for_potions() {
        assert_eq!(
            Category::Potions.create_table_sql(),
            "CREATE TABLE IF NOT EXISTS potions (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL, effect TEXT NOT NULL, duration TEXT NOT NULL, \
             description TEXT NOT NULL, category TEXT NOT NULL)"
        );
    }
}
