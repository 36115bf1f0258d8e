mod scripts;

pub use scripts::{validate_selection, Invocation, ScriptChoice};

#[cfg(test)]
pub use scripts::MULTI_SELECTION_MESSAGE;
