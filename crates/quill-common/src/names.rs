//! Well-known names synthesized by the compiler.

/// Name of the implicit receiver parameter.
pub const SELF_ARGUMENT: &str = "self";

/// Name of the synthesized member that invokes a first-class closure.
pub const CALL_METHOD: &str = "call";

/// Diagnostic name given to closure literals.
pub const CLOSURE: &str = "<closure>";

/// Diagnostic name given to lambda literals.
pub const LAMBDA: &str = "<lambda>";
