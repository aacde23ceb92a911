pub mod session;

pub use session::{Action, Mode, SessionState, Speed};
