//! The summarisation pipeline: acquire text, call the model, parse the reply.

pub mod extract;
pub mod fetch;
pub mod model;
pub mod parse;
