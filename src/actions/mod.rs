mod dispatcher;
mod prompt;

pub use dispatcher::{Dispatcher, Outcome};
pub use prompt::{ask, Choice};
