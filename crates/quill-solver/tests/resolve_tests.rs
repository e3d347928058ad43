use super::*;
use crate::test_utils::{closure, int, string};

#[test]
fn test_resolve_real_is_identity_on_non_references() {
    let table: TypeParameterTable = [("T", int())].into_iter().collect();
    for ty in [int(), Type::optional(string()), Type::Dynamic, Type::unresolved()] {
        assert!(matches!(resolve_real(&ty, &table), Cow::Borrowed(resolved) if *resolved == ty));
    }
}

#[test]
fn test_resolve_real_bound_reference() {
    let table: TypeParameterTable = [("T", int())].into_iter().collect();
    assert_eq!(*resolve_real(&Type::param("T"), &table), int());
}

#[test]
fn test_resolve_real_unbound_reference_passes_through() {
    let mut table = TypeParameterTable::new();
    table.define("T");
    assert_eq!(*resolve_real(&Type::param("T"), &table), Type::param("T"));
    assert_eq!(*resolve_real(&Type::param("U"), &table), Type::param("U"));
    assert_eq!(
        *resolve_real(&Type::optional_param("T"), &table),
        Type::optional_param("T")
    );
}

#[test]
fn test_resolve_real_optional_reference_wraps_instance() {
    let table: TypeParameterTable = [("T", int()), ("U", Type::optional(string()))]
        .into_iter()
        .collect();

    assert_eq!(
        *resolve_real(&Type::optional_param("T"), &table),
        Type::optional(int())
    );
    // Already optional: not wrapped twice.
    assert_eq!(
        *resolve_real(&Type::optional_param("U"), &table),
        Type::optional(string())
    );
}

#[test]
fn test_resolve_real_follows_chains() {
    let table: TypeParameterTable = [("T", Type::param("U")), ("U", string())]
        .into_iter()
        .collect();
    assert_eq!(*resolve_real(&Type::param("T"), &table), string());
}

#[test]
fn test_resolve_real_keeps_optional_from_intermediate_reference() {
    let table: TypeParameterTable = [("T", Type::optional_param("U")), ("U", int())]
        .into_iter()
        .collect();
    assert_eq!(*resolve_real(&Type::param("T"), &table), Type::optional(int()));

    // An unbound optional link is returned as written.
    let open: TypeParameterTable = [("T", Type::optional_param("U"))].into_iter().collect();
    assert_eq!(*resolve_real(&Type::param("T"), &open), Type::optional_param("U"));
}

#[test]
fn test_resolve_real_terminates_on_cycles() {
    let self_bound: TypeParameterTable = [("T", Type::param("T"))].into_iter().collect();
    assert_eq!(*resolve_real(&Type::param("T"), &self_bound), Type::param("T"));

    let cyclic: TypeParameterTable = [("T", Type::param("U")), ("U", Type::param("T"))]
        .into_iter()
        .collect();
    assert!(resolve_real(&Type::param("T"), &cyclic).is_type_parameter());
}

#[test]
fn test_callable_resolves_against_own_table() {
    let mut callable = closure(&[("x", Type::param("T"))], Type::param("R"))
        .with_throws(Type::param("E"));
    callable.type_parameters.bind("R", int());
    callable.type_parameters.bind("E", string());

    assert_eq!(*callable.resolved_returns(), int());
    assert_eq!(callable.resolved_throws().as_deref(), Some(&string()));
    assert_eq!(*callable.resolve_real(&Type::param("T")), Type::param("T"));
    assert!(closure(&[], int()).resolved_throws().is_none());
}
