//! Fixture builders shared by the unit tests.

use crate::{CallableType, Type};

/// Install a test subscriber filtered by `QUILL_LOG` (e.g. `QUILL_LOG=trace`).
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("QUILL_LOG"))
        .with_test_writer()
        .try_init();
}

pub(crate) fn int() -> Type {
    Type::object("Int")
}

pub(crate) fn string() -> Type {
    Type::object("String")
}

pub(crate) fn receiver() -> Type {
    Type::object("A")
}

fn with_parameters(
    mut callable: CallableType,
    params: &[(&str, Type)],
    returns: Type,
) -> CallableType {
    callable.define_self_argument(receiver());
    for (name, ty) in params {
        callable.define_required_argument(*name, ty.clone(), false);
    }
    callable.with_returns(returns)
}

/// `Closure(params=[self: A, ...params], returns)`.
pub(crate) fn closure(params: &[(&str, Type)], returns: Type) -> CallableType {
    with_parameters(CallableType::closure(), params, returns)
}

pub(crate) fn lambda(params: &[(&str, Type)], returns: Type) -> CallableType {
    with_parameters(CallableType::lambda(), params, returns)
}

/// `Method(name, params=[self: A, ...params], returns)`.
pub(crate) fn method(name: &str, params: &[(&str, Type)], returns: Type) -> CallableType {
    with_parameters(CallableType::method(name), params, returns)
}
