pub(crate) mod lifecycle;
pub(crate) mod settings;
pub(crate) mod wipe;
