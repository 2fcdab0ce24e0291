// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 strata contributors

use super::atomic::{atomic_descriptor, ScalarKind};
use super::compound::{CompoundMember, CompoundType};
use super::enumeration::{EnumMember, EnumType};
use super::string::{CharacterSet, StringPadding, StringType};
use super::{DataTypeClass, TypeHandle};
use crate::error::Error;

fn scalar(kind: ScalarKind) -> TypeHandle {
    atomic_descriptor(kind).expect("scalar descriptor")
}

fn offsets(c: &CompoundType) -> Vec<usize> {
    c.members().iter().map(|m| m.offset()).collect()
}

#[test]
fn two_int32_members_pack_without_padding() {
    let c = CompoundType::new(vec![
        CompoundMember::new("a", scalar(ScalarKind::I32)),
        CompoundMember::new("b", scalar(ScalarKind::I32)),
    ])
    .expect("layout");
    assert_eq!(offsets(&c), vec![0, 4]);
    assert_eq!(c.size(), 8);
}

#[test]
fn byte_before_int32_gets_three_padding_bytes() {
    let c = CompoundType::new(vec![
        CompoundMember::new("flag", scalar(ScalarKind::U8)),
        CompoundMember::new("count", scalar(ScalarKind::I32)),
    ])
    .expect("layout");
    assert_eq!(offsets(&c), vec![0, 4]);
    assert_eq!(c.size(), 8);
}

#[test]
fn trailing_padding_aligns_arrays_of_the_compound() {
    // f64 then u8: content ends at 9, the compound pads to 16 so that
    // back-to-back elements keep the f64 aligned.
    let c = CompoundType::new(vec![
        CompoundMember::new("value", scalar(ScalarKind::F64)),
        CompoundMember::new("tag", scalar(ScalarKind::U8)),
    ])
    .expect("layout");
    assert_eq!(offsets(&c), vec![0, 8]);
    assert_eq!(c.size(), 16);
}

#[test]
fn nested_compound_aligns_like_its_first_leaf() {
    let inner = CompoundType::new(vec![
        CompoundMember::new("r", scalar(ScalarKind::F64)),
        CompoundMember::new("n", scalar(ScalarKind::I32)),
    ])
    .expect("inner layout");
    assert_eq!(inner.size(), 16);

    let outer = CompoundType::new(vec![
        CompoundMember::new("tag", scalar(ScalarKind::U8)),
        CompoundMember::new("payload", inner),
    ])
    .expect("outer layout");
    // The nested member aligns at 8 (its first leaf is an f64), not at its
    // own size of 16.
    assert_eq!(offsets(&outer), vec![0, 8]);
    assert_eq!(outer.size(), 24);
}

#[test]
fn string_members_align_at_one() {
    let text =
        StringType::fixed(3, StringPadding::NullTerminated, CharacterSet::Ascii).expect("string");
    let c = CompoundType::new(vec![
        CompoundMember::new("a", scalar(ScalarKind::I16)),
        CompoundMember::new("name", text),
        CompoundMember::new("b", scalar(ScalarKind::I16)),
    ])
    .expect("layout");
    // The string starts right after the first i16; only the trailing i16
    // needs a padding byte.
    assert_eq!(offsets(&c), vec![0, 2, 6]);
    assert_eq!(c.size(), 8);
}

#[test]
fn explicit_size_is_used_verbatim() {
    let c = CompoundType::with_size(
        vec![CompoundMember::new("a", scalar(ScalarKind::I32))],
        16,
    )
    .expect("layout");
    assert_eq!(c.size(), 16);
    assert_eq!(c.handle().size().expect("size"), 16);
}

#[test]
fn explicit_size_too_small_fails_at_insertion() {
    let err = CompoundType::with_size(
        vec![
            CompoundMember::new("a", scalar(ScalarKind::I32)),
            CompoundMember::new("b", scalar(ScalarKind::I32)),
        ],
        4,
    );
    match err {
        Err(Error::Layout(msg)) => assert!(msg.contains('b'), "message names the member: {}", msg),
        other => panic!("expected a layout error, got {:?}", other.map(|c| c.size())),
    }
}

#[test]
fn empty_member_list_is_refused() {
    assert!(matches!(
        CompoundType::new(Vec::new()),
        Err(Error::Layout(_))
    ));
}

#[test]
fn duplicate_member_names_are_refused() {
    let err = CompoundType::new(vec![
        CompoundMember::new("x", scalar(ScalarKind::I32)),
        CompoundMember::new("x", scalar(ScalarKind::I32)),
    ]);
    assert!(matches!(err, Err(Error::Layout(_))));
}

#[test]
fn handles_share_one_record_until_the_last_drop() {
    let a = scalar(ScalarKind::F64);
    let b = a.clone();
    drop(a);
    // The clone still resolves the shared record.
    assert_eq!(b.size().expect("size"), 8);
    assert_eq!(b.class().expect("class"), DataTypeClass::Float);
}

#[test]
fn equality_is_structural_not_identity() {
    assert_eq!(scalar(ScalarKind::I32), scalar(ScalarKind::I32));
    assert_ne!(scalar(ScalarKind::I32), scalar(ScalarKind::U32));
    assert_ne!(scalar(ScalarKind::I32), scalar(ScalarKind::I64));
    assert_ne!(scalar(ScalarKind::F32), scalar(ScalarKind::F16));
}

#[test]
fn compound_equality_recurses_into_members() {
    let build = || {
        CompoundType::new(vec![
            CompoundMember::new("a", scalar(ScalarKind::I32)),
            CompoundMember::new("b", scalar(ScalarKind::F64)),
        ])
        .expect("layout")
    };
    let (x, y) = (build(), build());
    assert_eq!(x.handle(), y.handle());

    let z = CompoundType::new(vec![
        CompoundMember::new("a", scalar(ScalarKind::I32)),
        CompoundMember::new("b", scalar(ScalarKind::F32)),
    ])
    .expect("layout");
    assert_ne!(x.handle(), z.handle());
}

#[test]
fn text_rendering_is_class_then_bits() {
    assert_eq!(scalar(ScalarKind::F64).to_string(), "Float64");
    assert_eq!(scalar(ScalarKind::I32).to_string(), "Integer32");
    assert_eq!(scalar(ScalarKind::U8).to_string(), "Integer8");
    assert_eq!(TypeHandle::empty().to_string(), "(Invalid)");
}

#[test]
fn string_conversion_is_class_checked() {
    let text = StringType::variable(CharacterSet::Utf8).expect("string");
    let handle: TypeHandle = text.into();
    let back = handle.as_string_type().expect("conversion");
    assert_eq!(back.character_set().expect("cset"), CharacterSet::Utf8);

    assert!(scalar(ScalarKind::I32).as_string_type().is_err());
}

#[test]
fn enum_members_keep_insertion_order_and_round_trip() {
    let e = EnumType::boolean().expect("boolean enum");
    let names: Vec<&str> = e.members().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["FALSE", "TRUE"]);
    assert_eq!(e.value_of("FALSE"), Some(0));
    assert_eq!(e.value_of("TRUE"), Some(1));
    assert_eq!(e.name_of(0), Some("FALSE"));
    assert_eq!(e.name_of(1), Some("TRUE"));
    assert_eq!(e.value_of("MAYBE"), None);
    assert_eq!(e.name_of(2), None);
}

#[test]
fn enum_duplicate_names_are_refused() {
    let err = EnumType::from_scalar(
        ScalarKind::I32,
        vec![EnumMember::new("A", 0), EnumMember::new("A", 1)],
    );
    assert!(matches!(err, Err(Error::Layout(_))));
}

#[test]
fn enum_over_non_integer_base_is_refused() {
    let f = scalar(ScalarKind::F32);
    assert!(matches!(
        EnumType::new(&f, vec![EnumMember::new("A", 0)]),
        Err(Error::Layout(_))
    ));
}

#[test]
fn enum_size_follows_the_underlying_integer() {
    let e = EnumType::from_scalar(
        ScalarKind::U16,
        vec![EnumMember::new("LOW", 0), EnumMember::new("HIGH", 1)],
    )
    .expect("enum");
    assert_eq!(e.handle().size().expect("size"), 2);
    assert_eq!(e.handle().class().expect("class"), DataTypeClass::Enum);
}
