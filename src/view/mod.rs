pub(crate) mod dope_sheet;
pub(crate) mod graph;
pub(crate) mod layout;
