pub(crate) mod guard;
pub(crate) mod kv;
