//! Property-based checks over the generator backends: rendering is total
//! and deterministic for any well-formed IR tree.

use proptest::prelude::*;

use tzod::generator::{SchemaBackend, ValibotBackend, ZodBackend};
use tzod::{LiteralValue, ParsedClass, Primitive, Property, PropertyType};

fn arb_primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        Just(Primitive::String),
        Just(Primitive::Number),
        Just(Primitive::Boolean),
        Just(Primitive::Date),
    ]
}

fn arb_literal() -> impl Strategy<Value = LiteralValue> {
    prop_oneof![
        "[a-z]{0,8}".prop_map(LiteralValue::String),
        (-1000i32..1000).prop_map(|n| LiteralValue::Number(n as f64)),
        any::<bool>().prop_map(LiteralValue::Boolean),
    ]
}

fn arb_property_type() -> impl Strategy<Value = PropertyType> {
    let leaf = prop_oneof![
        arb_primitive().prop_map(PropertyType::Primitive),
        arb_literal().prop_map(PropertyType::Literal),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(PropertyType::array),
            prop::collection::vec(inner.clone(), 1..4).prop_map(PropertyType::Union),
            prop::collection::vec(("[a-z]{1,8}", inner, any::<bool>()), 0..4).prop_map(
                |members| {
                    PropertyType::Object(
                        members
                            .into_iter()
                            .map(|(name, ty, optional)| {
                                let prop = Property::new(name, ty);
                                if optional {
                                    prop.optional()
                                } else {
                                    prop
                                }
                            })
                            .collect(),
                    )
                }
            ),
        ]
    })
}

fn arb_class() -> impl Strategy<Value = ParsedClass> {
    (
        "[A-Z][a-zA-Z]{0,10}",
        prop::collection::vec(("[a-z]{1,10}", arb_property_type(), any::<bool>()), 0..6),
    )
        .prop_map(|(name, properties)| ParsedClass {
            name,
            file_path: "props.ts".to_string(),
            is_exported: true,
            properties: properties
                .into_iter()
                .map(|(prop_name, ty, optional)| {
                    let prop = Property::new(prop_name, ty);
                    if optional {
                        prop.optional()
                    } else {
                        prop
                    }
                })
                .collect(),
        })
}

proptest! {
    #[test]
    fn rendering_is_deterministic(class in arb_class()) {
        let classes = [class];
        prop_assert_eq!(ZodBackend.generate(&classes), ZodBackend.generate(&classes));
        prop_assert_eq!(
            ValibotBackend.generate(&classes),
            ValibotBackend.generate(&classes)
        );
    }

    #[test]
    fn rendering_is_total_and_nonempty(class in arb_class()) {
        let classes = [class];
        for code in [ZodBackend.generate(&classes), ValibotBackend.generate(&classes)] {
            prop_assert!(code.contains("export const "));
            prop_assert!(code.ends_with(";\n"));
        }
    }

    #[test]
    fn every_declaration_appears_once(classes in prop::collection::vec(arb_class(), 1..4)) {
        let code = ZodBackend.generate(&classes);
        prop_assert_eq!(code.matches("export const ").count(), classes.len());
    }
}
