use std::fmt::Display;
use crate::database::structs::binder::Binder;
use crate::database::structs::binder_collection::BinderCollection;
use crate::database::structs::query_builder::QueryBuilder;

impl QueryBuilder {
    pub fn new() -> QueryBuilder {
        QueryBuilder::default()
    }

    pub fn with(sql: &str) -> QueryBuilder {
        QueryBuilder {
            sql: sql.to_string(),
            binders: BinderCollection::new(),
        }
    }

    /// Appends literal SQL.
    pub fn push_str(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Appends a value that is trusted to be SQL-safe, such as an integer.
    pub fn push_value(&mut self, value: impl Display) -> &mut Self {
        self.sql.push_str(&value.to_string());
        self
    }

    /// Appends `items` separated by `separator`.
    pub fn push_list<T: Display>(&mut self, items: &[T], separator: &str) -> &mut Self {
        for (index, item) in items.iter().enumerate() {
            if index != 0 {
                self.sql.push_str(separator);
            }
            self.sql.push_str(&item.to_string());
        }
        self
    }

    /// Appends a `?` placeholder and records its value.
    pub fn push_bind(&mut self, value: impl Into<String>, name: &str, null_if_empty: bool) -> &mut Self {
        let placeholder = self.placeholder(value, name, null_if_empty);
        self.sql.push_str(placeholder);
        self
    }

    /// Records a value and returns the `?` the caller must splice into the
    /// text at the matching position.
    pub fn placeholder(&mut self, value: impl Into<String>, name: &str, null_if_empty: bool) -> &'static str {
        self.binders.push(Binder::new(value, name, null_if_empty));
        "?"
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binders(&self) -> &BinderCollection {
        &self.binders
    }

    pub fn into_parts(self) -> (String, BinderCollection) {
        (self.sql, self.binders)
    }
}
