mod display;
mod script;
mod session;

pub use display::{DisplayError, TerminalDisplay};
pub use script::{ParseError, ScriptedClicks};
pub use session::run_interactive_terminal;
