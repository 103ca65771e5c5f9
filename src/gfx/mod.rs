pub(crate) mod backend;
pub(crate) mod context;
pub(crate) mod effect;
pub(crate) mod texrender;
pub(crate) mod texture;
