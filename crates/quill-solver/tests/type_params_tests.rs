use super::*;
use crate::test_utils::{int, string};

#[test]
fn test_define_and_bind() {
    let mut table = TypeParameterTable::new();
    table.define("T");
    assert!(table.is_declared("T"));
    assert!(!table.is_bound("T"));
    assert_eq!(table.instance_of("T"), None);

    table.bind("T", int());
    assert_eq!(table.instance_of("T"), Some(&int()));

    // Redeclaring does not drop the binding.
    table.define("T");
    assert_eq!(table.instance_of("T"), Some(&int()));
}

#[test]
fn test_merge_extra_wins() {
    let base: TypeParameterTable = [("T", int()), ("U", int())].into_iter().collect();
    let extra: TypeParameterTable = [("U", string()), ("V", string())].into_iter().collect();

    let merged = base.merge(&extra);
    assert_eq!(merged.instance_of("T"), Some(&int()));
    assert_eq!(merged.instance_of("U"), Some(&string()));
    assert_eq!(merged.instance_of("V"), Some(&string()));
    assert_eq!(merged.names().collect::<Vec<_>>(), vec!["T", "U", "V"]);

    // Inputs are unchanged.
    assert_eq!(base.instance_of("U"), Some(&int()));
    assert!(!base.is_declared("V"));
    assert_eq!(extra.len(), 2);
}

#[test]
fn test_merge_with_empty_shares_storage() {
    let base: TypeParameterTable = [("T", int())].into_iter().collect();
    let empty = TypeParameterTable::new();

    assert!(base.merge(&empty).shares_storage_with(&base));
    assert!(empty.merge(&base).shares_storage_with(&base));
}

#[test]
fn test_copy_on_write() {
    let original: TypeParameterTable = [("T", int())].into_iter().collect();
    let mut copy = original.clone();
    assert!(copy.shares_storage_with(&original));

    copy.bind("T", string());
    assert!(!copy.shares_storage_with(&original));
    assert_eq!(original.instance_of("T"), Some(&int()));
    assert_eq!(copy.instance_of("T"), Some(&string()));
}

#[test]
fn test_iter_reports_unbound_entries() {
    let mut table = TypeParameterTable::new();
    table.define("T");
    table.bind("U", int());

    let entries: Vec<_> = table.iter().collect();
    assert_eq!(entries, vec![("T", None), ("U", Some(&int()))]);
}
