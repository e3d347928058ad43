use super::*;
use crate::test_utils::{closure, int, lambda, method, string};

#[test]
fn test_default_policy() {
    let policy = CompatPolicy::default();
    assert!(policy.closure_throw_exemption);
    assert!(!policy.check_inference_arity);
    assert_eq!(policy.recursion, RecursionProfile::Compatibility);

    let tightened = policy
        .with_closure_throw_exemption(false)
        .with_inference_arity_check(true);
    assert!(!tightened.closure_throw_exemption);
    assert!(tightened.check_inference_arity);
}

#[test]
fn test_query_compatible() {
    let source = Type::callable(closure(&[("x", int())], int()));
    let target = Type::callable(lambda(&[("x", int())], int()));

    let policy = CompatPolicy::default();
    let result = query_relation(&source, &target, RelationKind::Compatible, policy);
    assert!(result.is_related());
    assert_eq!(result.kind, RelationKind::Compatible);
    assert!(!result.depth_exceeded);

    let reverse = query_relation(&target, &source, RelationKind::Compatible, policy);
    assert!(!reverse.is_related());
}

#[test]
fn test_query_implementation() {
    let add_int = Type::callable(method("add", &[("x", int())], int()));
    let add_string = Type::callable(method("add", &[("x", string())], int()));

    let policy = CompatPolicy::default();
    assert!(query_relation(&add_int, &add_int, RelationKind::Implementation, policy).is_related());
    assert!(
        !query_relation(&add_int, &add_string, RelationKind::Implementation, policy).is_related()
    );
}

#[test]
fn test_query_implementation_requires_callables() {
    let policy = CompatPolicy::default();
    let result = query_relation(&int(), &int(), RelationKind::Implementation, policy);
    assert!(!result.is_related());
    assert!(query_relation(&int(), &int(), RelationKind::Compatible, policy).is_related());
}

#[test]
fn test_query_reports_depth_exceeded() {
    let nested = Type::callable(closure(&[], Type::callable(closure(&[], int()))));
    let policy = CompatPolicy::default().with_recursion_profile(RecursionProfile::Custom {
        max_depth: 1,
        max_iterations: 100,
    });

    let result = query_relation(&nested, &nested, RelationKind::Compatible, policy);
    assert!(!result.is_related());
    assert!(result.depth_exceeded);
}

#[test]
fn test_query_honours_throw_policy() {
    let throwing = Type::callable(closure(&[], int()).with_throws(string()));
    let target = Type::callable(closure(&[], int()));

    assert!(
        query_relation(&throwing, &target, RelationKind::Compatible, CompatPolicy::default())
            .is_related()
    );
    let strict = CompatPolicy::default().with_closure_throw_exemption(false);
    assert!(!query_relation(&throwing, &target, RelationKind::Compatible, strict).is_related());
}
