//! Event fan-out over the session registry

mod fanout;

pub use fanout::Fanout;
