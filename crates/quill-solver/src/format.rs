//! Human-readable rendering of types for diagnostics.
//!
//! Callables render as
//!
//! ```text
//! <name>[ !(<T1>, <T2>, ...)][ (<arg1-type>, ...)][ !! <throw-type>][ -> <return-type>]
//! ```
//!
//! with every clause except the return type left out when empty (a callable
//! always has a return type). Throw and return types are resolved through the
//! callable's own type parameter table first. The output is meant for people;
//! nothing parses it back.

use crate::callable::CallableType;
use crate::types::Type;
use std::fmt::{self, Write};

/// Renders types for diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeFormatter;

impl TypeFormatter {
    pub fn new() -> Self {
        TypeFormatter
    }

    pub fn format(&self, ty: &Type) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_type(&mut out, ty);
        out
    }

    pub fn format_callable(&self, callable: &CallableType) -> String {
        let mut out = String::new();
        let _ = self.write_callable(&mut out, callable);
        out
    }

    pub fn write_type(&self, out: &mut impl Write, ty: &Type) -> fmt::Result {
        match ty {
            Type::Dynamic => out.write_str("Dynamic"),
            Type::Never => out.write_str("Never"),
            Type::Object(object) => {
                out.write_str(&object.name)?;
                if !object.arguments.is_empty() {
                    out.write_str("!(")?;
                    self.write_list(out, object.arguments.iter())?;
                    out.write_char(')')?;
                }
                Ok(())
            }
            Type::Optional(inner) => {
                out.write_char('?')?;
                self.write_type(out, inner)
            }
            Type::TypeParameter(reference) => {
                if reference.optional {
                    out.write_char('?')?;
                }
                out.write_str(&reference.name)
            }
            Type::Callable(callable) => self.write_callable(out, callable),
            Type::Unresolved(_) => out.write_char('_'),
        }
    }

    pub fn write_callable(&self, out: &mut impl Write, callable: &CallableType) -> fmt::Result {
        out.write_str(&callable.name)?;

        if !callable.type_parameters.is_empty() {
            out.write_str(" !(")?;
            for (index, (name, instance)) in callable.type_parameters.iter().enumerate() {
                if index > 0 {
                    out.write_str(", ")?;
                }
                match instance {
                    Some(instance) => self.write_type(out, instance)?,
                    None => out.write_str(name)?,
                }
            }
            out.write_char(')')?;
        }

        if callable.parameter_count_without_self() > 0 {
            out.write_str(" (")?;
            self.write_list(out, callable.parameter_types_without_self().into_iter())?;
            out.write_char(')')?;
        }

        if let Some(throws) = callable.resolved_throws() {
            out.write_str(" !! ")?;
            self.write_type(out, &throws)?;
        }

        out.write_str(" -> ")?;
        self.write_type(out, &callable.resolved_returns())
    }

    fn write_list<'t>(
        &self,
        out: &mut impl Write,
        types: impl Iterator<Item = &'t Type>,
    ) -> fmt::Result {
        for (index, ty) in types.enumerate() {
            if index > 0 {
                out.write_str(", ")?;
            }
            self.write_type(out, ty)?;
        }
        Ok(())
    }
}

/// Diagnostic name of a callable type.
pub fn type_name(callable: &CallableType) -> String {
    TypeFormatter.format_callable(callable)
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TypeFormatter.write_type(f, self)
    }
}

impl fmt::Display for CallableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TypeFormatter.write_callable(f, self)
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
