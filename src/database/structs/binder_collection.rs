use crate::database::structs::binder::Binder;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinderCollection {
    pub(crate) binders: Vec<Binder>,
}
