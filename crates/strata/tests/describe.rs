// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

//! Generic dispatch, size verification and named commits.

use strata::{
    describe_and_verify, describe_type, CompoundMember, CompoundType, DataTypeClass, EnumMember,
    EnumType, Error, FixedStringArray, NativeType, Reference, Result, ScalarKind, StorageObject,
    TypeHandle,
};

#[test]
fn scalars_verify_against_their_native_size() {
    describe_and_verify::<i8>().expect("i8");
    describe_and_verify::<i16>().expect("i16");
    describe_and_verify::<i32>().expect("i32");
    describe_and_verify::<i64>().expect("i64");
    describe_and_verify::<u8>().expect("u8");
    describe_and_verify::<u16>().expect("u16");
    describe_and_verify::<u32>().expect("u32");
    describe_and_verify::<u64>().expect("u64");
    describe_and_verify::<f32>().expect("f32");
    describe_and_verify::<f64>().expect("f64");
    describe_and_verify::<bool>().expect("bool");
}

#[test]
fn size_mismatch_is_reported() {
    // A deliberately wrong mapping: four native bytes described as two.
    struct Lying {
        _raw: u32,
    }

    impl NativeType for Lying {
        fn descriptor() -> Result<TypeHandle> {
            describe_type::<u16>()
        }
    }

    match describe_and_verify::<Lying>() {
        Err(Error::SizeMismatch { native, declared }) => {
            assert_eq!(native, 4);
            assert_eq!(declared, 2);
        }
        other => panic!("expected a size mismatch, got {:?}", other.map(|t| t.to_string())),
    }
}

#[test]
fn unsized_descriptor_classes_are_exempt() {
    // No single native size exists for these; the check is skipped entirely.
    let s = describe_and_verify::<String>().expect("variable string");
    assert!(s.is_variable_string().expect("query"));

    let r = describe_and_verify::<Reference>().expect("reference");
    assert!(r.is_reference());

    let f = describe_and_verify::<FixedStringArray<4>>().expect("fixed string");
    assert!(f.is_fixed_string().expect("query"));
    assert_eq!(f.size().expect("size"), 4);
}

#[test]
fn bool_maps_to_the_boolean_enum() {
    let t = describe_type::<bool>().expect("bool");
    assert_eq!(t.class().expect("class"), DataTypeClass::Enum);
    assert_eq!(t.size().expect("size"), 1);

    let e = EnumType::boolean().expect("boolean enum");
    assert_eq!(&t, e.handle());
}

#[test]
fn compound_commit_registers_the_name() {
    let object = StorageObject::new();
    let c = CompoundType::new(vec![
        CompoundMember::new("x", describe_type::<f64>().expect("f64")),
        CompoundMember::new("y", describe_type::<f64>().expect("f64")),
    ])
    .expect("layout");

    c.commit(&object, "Point").expect("commit");
    assert!(object.contains("Point"));
    assert_eq!(object.len(), 1);

    // Names are unique within an object.
    assert!(matches!(
        c.commit(&object, "Point"),
        Err(Error::TypeDescriptor(_))
    ));

    // The committed record persists independently of the wrapper.
    drop(c);
    assert!(object.contains("Point"));
}

#[test]
fn enum_commit_registers_the_name() {
    let object = StorageObject::new();
    let e = EnumType::from_scalar(
        ScalarKind::U8,
        vec![
            EnumMember::new("RED", 0),
            EnumMember::new("GREEN", 1),
            EnumMember::new("BLUE", 2),
        ],
    )
    .expect("enum");
    e.commit(&object, "Color").expect("commit");
    assert!(object.contains("Color"));
    assert!(!object.contains("Point"));
}

#[test]
fn descriptors_survive_as_compound_members_after_drop() {
    // The compound copies each member record; dropping the originals must
    // not invalidate the composite.
    let c = CompoundType::new(vec![
        CompoundMember::new("a", describe_type::<i32>().expect("i32")),
        CompoundMember::new("b", describe_type::<i64>().expect("i64")),
    ])
    .expect("layout");
    let handle: TypeHandle = c.into();
    assert_eq!(handle.class().expect("class"), DataTypeClass::Compound);
    assert_eq!(handle.size().expect("size"), 16);
}
