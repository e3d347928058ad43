use super::*;
use crate::test_utils::{closure, int, method, receiver, string};

fn varargs() -> CallableType {
    // do (a: Int, b: Int = 0, *rest: String) -> Int
    let mut callable = CallableType::method("varargs").with_returns(int());
    callable.define_self_argument(receiver());
    callable.define_required_argument("a", int(), false);
    callable.define_argument("b", int(), false);
    callable.define_rest_argument("rest", string(), false);
    callable
}

#[test]
fn test_new_callable_defaults() {
    let callable = CallableType::closure();
    assert_eq!(callable.name, names::CLOSURE);
    assert!(callable.is_closure());
    assert_eq!(callable.returns, Type::Dynamic);
    assert!(callable.throws.is_none());
    assert!(callable.flags().is_empty());
    assert_eq!(callable.parameter_count(), 0);
    assert!(!callable.has_receiver());
}

#[test]
fn test_define_arguments_counts() {
    let callable = varargs();

    assert!(callable.has_receiver());
    assert!(callable.has_rest_parameter());
    assert_eq!(callable.parameter_count(), 4);
    assert_eq!(callable.parameter_count_without_self(), 3);
    assert_eq!(callable.required_count(), 2);
    assert_eq!(callable.required_count_without_self(), 1);
    assert_eq!(callable.argument_names().collect::<Vec<_>>(), vec!["a", "b", "rest"]);
    assert_eq!(callable.parameter_at(0).map(|(name, _)| name), Some(names::SELF_ARGUMENT));
    assert_eq!(callable.parameter("b").map(|signature| &signature.ty), Some(&int()));
    assert_eq!(callable.last_parameter_type(), Some(&string()));
}

#[test]
fn test_define_returns_signature_index() {
    let mut callable = CallableType::lambda();
    callable.define_self_argument(receiver());
    assert_eq!(callable.define_required_argument("x", int(), false), 1);
    assert_eq!(callable.define_argument("y", int(), true), 2);
}

#[test]
fn test_redefining_required_argument_keeps_counts() {
    let mut callable = CallableType::closure();
    callable.define_required_argument("x", int(), false);
    assert_eq!(callable.define_required_argument("x", string(), false), 0);

    assert_eq!(callable.parameter_count(), 1);
    assert_eq!(callable.required_count(), 1);
    assert_eq!(callable.argument_count_range(), 1..=1);
    assert!(callable.valid_number_of_arguments(1));
    assert_eq!(callable.parameter("x").map(|signature| &signature.ty), Some(&string()));
}

#[test]
fn test_late_receiver_is_stored_first() {
    let mut callable = CallableType::method("m");
    callable.define_required_argument("x", int(), false);
    callable.define_self_argument(receiver());

    assert_eq!(callable.parameter_at(0).map(|(name, _)| name), Some(names::SELF_ARGUMENT));
    assert_eq!(callable.argument_names().collect::<Vec<_>>(), vec!["x"]);
    assert_eq!(callable.required_count_without_self(), 1);

    // A second receiver only replaces the type.
    callable.define_self_argument(string());
    assert_eq!(callable.parameter_count(), 2);
    assert_eq!(callable.required_count(), 2);
    assert_eq!(callable.parameter_at(0).map(|(_, signature)| &signature.ty), Some(&string()));
}

#[test]
fn test_argument_count_range() {
    let callable = method("m", &[("a", int()), ("b", int())], int());
    assert_eq!(callable.argument_count_range(), 2..=2);
    assert_eq!(varargs().argument_count_range(), 1..=3);
}

#[test]
fn test_valid_number_of_arguments_without_rest() {
    let mut callable = method("m", &[("a", int())], int());
    callable.define_argument("b", int(), false);

    assert!(!callable.valid_number_of_arguments(0));
    assert!(callable.valid_number_of_arguments(1));
    assert!(callable.valid_number_of_arguments(2));
    assert!(!callable.valid_number_of_arguments(3));
}

#[test]
fn test_valid_number_of_arguments_with_rest_has_no_upper_bound() {
    let callable = varargs();

    assert!(!callable.valid_number_of_arguments(0));
    for given in 1..=3 {
        assert!(callable.valid_number_of_arguments(given), "given = {given}");
    }
    assert!(callable.valid_number_of_arguments(4));
    assert!(callable.valid_number_of_arguments(100));
}

#[test]
fn test_type_for_argument_uses_rest_type() {
    let callable = varargs();
    assert_eq!(callable.type_for_argument(0), Some(&int()));
    assert_eq!(callable.type_for_argument(2), Some(&string()));
    assert_eq!(callable.type_for_argument(7), Some(&string()));

    let fixed = method("m", &[("a", int())], int());
    assert_eq!(fixed.type_for_argument(1), None);
}

#[test]
fn test_define_call_method() {
    let mut callable = closure(&[("x", int())], string()).with_throws(string());
    callable.type_parameters.bind("T", int());
    callable.set_captures(true);

    let call = callable.define_call_method();

    assert_eq!(call.name, names::CALL_METHOD);
    assert!(call.is_method());
    assert!(call.type_parameters.is_empty());
    assert!(call.attributes.is_empty());
    assert_eq!(call.parameters(), callable.parameters());
    assert_eq!(call.returns, string());
    assert_eq!(call.throws, Some(string()));
    assert!(call.captures());

    // The original keeps its kind and table, and now exposes `call`.
    assert!(callable.is_closure());
    assert!(callable.type_parameters.is_bound("T"));
    let stored = callable
        .attributes
        .get(names::CALL_METHOD)
        .and_then(|signature| signature.ty.as_callable());
    assert_eq!(stored, Some(&call));
}

#[test]
fn test_new_shallow_instance_merges_type_parameters() {
    let mut original = closure(&[("x", Type::param("T"))], Type::param("U")).with_throws(string());
    original.type_parameters.bind("T", int());
    original.type_parameters.define("U");
    original.attributes.define("extra", int(), false);

    let extra: TypeParameterTable = [("U", string()), ("T", string())].into_iter().collect();
    let instance = original.new_shallow_instance(&extra);

    assert_eq!(instance.parameters(), original.parameters());
    assert_eq!(instance.returns, original.returns);
    assert_eq!(instance.throws, original.throws);
    assert_eq!(instance.kind(), original.kind());
    assert_eq!(instance.attributes, original.attributes);
    assert_eq!(instance.type_parameters, original.type_parameters.merge(&extra));
    assert_eq!(instance.type_parameters.instance_of("T"), Some(&string()));

    // The declaration is untouched.
    assert_eq!(original.type_parameters.instance_of("T"), Some(&int()));
    assert!(!original.type_parameters.is_bound("U"));
}

#[test]
fn test_specialize_overrides() {
    let original = closure(&[], int()).with_type_parameter("T");

    let renamed = original.specialize(Specialization {
        name: Some("renamed".into()),
        kind: Some(CallableKind::Lambda),
        ..Specialization::default()
    });
    assert_eq!(renamed.name, "renamed");
    assert_eq!(renamed.kind(), CallableKind::Lambda);
    assert!(renamed.type_parameters.is_declared("T"));

    let replaced = original.specialize(Specialization {
        type_parameters: TypeParameterOverride::Replace(TypeParameterTable::new()),
        ..Specialization::default()
    });
    assert!(replaced.type_parameters.is_empty());
    assert_eq!(original.name, names::CLOSURE);
    assert!(original.is_closure());
}

#[test]
fn test_contains_unresolved() {
    assert!(closure(&[("x", Type::unresolved())], int()).contains_unresolved());
    assert!(closure(&[], Type::unresolved()).contains_unresolved());
    assert!(closure(&[], int()).with_throws(Type::unresolved()).contains_unresolved());
    assert!(!closure(&[("x", int())], int()).contains_unresolved());
}
