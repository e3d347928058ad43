//! Callable Type Solver
//!
//! This crate decides structural compatibility between callable types
//! (closures, lambdas and methods), specializes generic callables, and infers
//! the unannotated parameter and return types of closure literals.
//!
//! - **Compatibility** (`compat`): assignment and implementation checks, with
//!   failure explanations driven by the same rules (`diagnostics`)
//! - **Resolution** (`resolve`): type parameter references through a
//!   [`TypeParameterTable`]
//! - **Instantiation** (`instantiate`): binding type parameters against a
//!   concrete signature
//! - **Inference** (`infer`): narrowing closure placeholders towards an
//!   expected callable
//!
//! Every operation is a pure function of its inputs. Specialized and inferred
//! callables are new values; nothing is mutated behind the caller's back.
mod callable;
mod compat;
mod diagnostics;
mod format;
mod infer;
mod instantiate;
pub mod recursion;
pub mod relation_queries;
mod resolve;
mod signature;
mod type_params;
pub mod types;

pub use callable::{CallableType, Specialization, TypeParameterOverride};
pub use compat::CompatChecker;
pub use diagnostics::{CompatFailureReason, CompatTracer, DiagnosticTracer, FastTracer};
pub use format::{TypeFormatter, type_name};
pub use infer::{ClosureInferrer, InferenceError};
pub use instantiate::TypeInstantiator;
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use relation_queries::{CompatPolicy, RelationKind, RelationResult, query_relation};
pub use resolve::resolve_real;
pub use signature::{Signature, SignatureTable};
pub use type_params::TypeParameterTable;
pub use types::{CallableFlags, CallableKind, Constraint, ObjectType, Type, TypeParamRef};

#[cfg(test)]
mod test_utils;
