pub(crate) mod builder;
pub(crate) mod decoder;
pub(crate) mod record;
