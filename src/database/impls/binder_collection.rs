use log::error;
use rusqlite::Statement;
use rusqlite::types::Null;
use crate::database::structs::binder::Binder;
use crate::database::structs::binder_collection::BinderCollection;

/// Binds parameters onto a prepared statement.
pub type BindFunction = Box<dyn Fn(&mut Statement<'_>)>;

impl BinderCollection {
    pub fn new() -> BinderCollection {
        BinderCollection::default()
    }

    pub fn push(&mut self, binder: Binder) {
        self.binders.push(binder);
    }

    pub fn len(&self) -> usize {
        self.binders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binder> {
        self.binders.iter()
    }

    /// Snapshot of the binders as a closure; later pushes are not seen.
    pub fn bind_function(&self) -> BindFunction {
        let binders = self.binders.clone();
        Box::new(move |statement: &mut Statement<'_>| Self::bind_each(&binders, statement))
    }

    /// Binds every parameter after checking that the statement has exactly
    /// one placeholder per binder.
    pub fn bind_all(&self, statement: &mut Statement<'_>) -> rusqlite::Result<()> {
        let expected = statement.parameter_count();
        if expected != self.binders.len() {
            return Err(rusqlite::Error::InvalidParameterCount(self.binders.len(), expected));
        }
        Self::bind_each(&self.binders, statement);
        Ok(())
    }

    fn bind_each(binders: &[Binder], statement: &mut Statement<'_>) {
        for (index, binder) in binders.iter().enumerate() {
            let result = match binder.binds_null() {
                true => statement.raw_bind_parameter(index + 1, Null),
                false => statement.raw_bind_parameter(index + 1, binder.value.as_str()),
            };
            if let Err(e) = result {
                error!("[SQLite] Failed to bind {} ({}): {}", binder.name, binder.value, e);
            }
        }
    }
}
