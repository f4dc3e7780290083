use crate::database::structs::binder::Binder;

impl Binder {
    pub fn new(value: impl Into<String>, name: &str, null_if_empty: bool) -> Binder {
        Binder {
            value: value.into(),
            name: name.to_string(),
            null_if_empty,
        }
    }

    pub fn binds_null(&self) -> bool {
        self.null_if_empty && self.value.is_empty()
    }
}
