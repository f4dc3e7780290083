use crate::database::structs::binder_collection::BinderCollection;

/// SQL text and its positional parameters, built together so every `?`
/// has exactly one binder in the same position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    pub(crate) sql: String,
    pub(crate) binders: BinderCollection,
}
