//! Library side of the deckmark CLI, so the transforms can be tested in isolation.

pub mod transforms;
