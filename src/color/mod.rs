pub(crate) mod css;
pub(crate) mod sequencer;
