mod common;

use common::*;
use fob_reflect::{CallableKind, ReflectOptions, Reflector};
use serde_json::json;

#[test]
fn class_bodies_partition_their_members() {
    let reflector = reflect(&kitchen_sink());
    let class = reflector.mirror(decl(&reflector, 10)).as_class().unwrap();

    assert_eq!(class.body.methods, vec![decl(&reflector, 20)]);
    assert_eq!(
        class.body.property_names(),
        &["label", "parent", "size", "tags", "mode", "style", "onClick", "key", "value", "mixed", "broken"]
            .map(str::to_owned)
    );
    // Constructor plus eleven properties plus one method.
    assert_eq!(class.body.members.len(), 13);
    assert_eq!(class.body.members[0], decl(&reflector, 11));

    let render = reflector.mirror(decl(&reflector, 20)).as_callable().unwrap();
    assert_eq!(render.kind, CallableKind::Method);
    assert!(render.is_method());
}

#[test]
fn first_constructor_wins() {
    let tree = project(vec![module(
        1,
        "m",
        vec![class(
            2,
            "Point",
            vec![
                constructor(3, 4, vec![], reference(2, "Point")),
                constructor(5, 6, vec![parameter(7, "x", intrinsic("number"))], reference(2, "Point")),
            ],
        )],
    )]);
    let reflector = reflect(&tree);
    let class = reflector.mirror(decl(&reflector, 2)).as_class().unwrap();

    assert_eq!(class.constructor, Some(decl(&reflector, 3)));
    assert_eq!(class.body.members, vec![decl(&reflector, 3), decl(&reflector, 5)]);
    assert!(class.body.methods.is_empty());
}

#[test]
fn accessors_report_readability_and_type() {
    let tree = project(vec![module(
        1,
        "m",
        vec![class(
            2,
            "Box",
            vec![
                accessor(
                    3,
                    "readOnly",
                    Some(json!({
                        "id": 4, "name": "__get", "kind": 524288, "kindString": "Get signature",
                        "flags": {}, "comment": { "shortText": "Current size." },
                        "type": intrinsic("number")
                    })),
                    None,
                ),
                accessor(
                    5,
                    "writeOnly",
                    None,
                    Some(set_signature(6, "writeOnly", parameter(7, "value", intrinsic("string")))),
                ),
            ],
        )],
    )]);
    let reflector = reflect(&tree);

    let read_only = reflector.mirror(decl(&reflector, 3));
    assert!(read_only.is_accessor());
    let read_only = read_only.as_property().unwrap();
    assert!(read_only.readable && !read_only.writeable);
    assert_eq!(read_only.ty, reflector.builtin_number());
    assert_eq!(read_only.comment.short_text(), "Current size.");

    let write_only = reflector.mirror(decl(&reflector, 5)).as_property().unwrap();
    assert!(!write_only.readable && write_only.writeable);
    assert_eq!(write_only.ty, reflector.builtin_string());

    let class = reflector.mirror(decl(&reflector, 2)).as_class().unwrap();
    assert_eq!(class.body.describe_property("writeOnly"), Some(decl(&reflector, 5)));
    assert_eq!(class.body.describe_property("missing"), None);
}

#[test]
fn index_signatures_attach_to_their_body() {
    let tree = project(vec![module(
        1,
        "m",
        vec![json!({
            "id": 2, "name": "Dictionary", "kind": 256, "kindString": "Interface", "flags": {},
            "indexSignature": {
                "id": 3, "name": "__index", "kind": 8192, "kindString": "Index signature", "flags": {},
                "comment": { "shortText": "Lookup by key." },
                "parameters": [{
                    "id": 4, "name": "key", "kind": 32768, "kindString": "Parameter",
                    "flags": {}, "type": intrinsic("string")
                }],
                "type": intrinsic("number")
            }
        })],
    )]);
    let reflector = reflect(&tree);
    let dictionary = reflector.mirror(decl(&reflector, 2)).as_interface_like().unwrap();

    let signature = dictionary.index_signature.as_ref().expect("index signature");
    assert_eq!(signature.parameter_name, "key");
    assert_eq!(signature.index_type, reflector.builtin_string());
    assert_eq!(signature.value_type, reflector.builtin_number());
    assert_eq!(signature.comment.short_text(), "Lookup by key.");
    assert!(dictionary.members.is_empty());
    assert!(reflector.diagnostics().is_empty());
}

#[test]
fn enum_members_keep_values_and_order() {
    let reflector = reflect(&kitchen_sink());
    let color = reflector.mirror(decl(&reflector, 42)).as_enum().expect("enum");

    let members: Vec<(&str, Option<&str>)> = color
        .members
        .iter()
        .map(|member| (member.name.as_str(), member.default_value.as_deref()))
        .collect();
    assert_eq!(members, vec![("Red", Some("0")), ("Green", Some("1"))]);
    assert!(reflector.mirror(decl(&reflector, 42)).is_complex());
}

#[test]
fn doc_comments_expose_text_and_tags() {
    let tree = project(vec![module(
        1,
        "m",
        vec![
            json!({
                "id": 2, "name": "Legacy", "kind": 128, "kindString": "Class",
                "flags": { "isAbstract": true },
                "comment": {
                    "shortText": "Old entry point.",
                    "text": "Kept for compatibility.\n",
                    "tags": [
                        { "tag": "deprecated", "text": "use Modern\n" },
                        { "tag": "since", "text": "0.1" }
                    ]
                },
                "children": []
            }),
            variable(3, "plain", intrinsic("string")),
        ],
    )]);
    let reflector = reflect(&tree);

    let legacy = reflector.mirror(decl(&reflector, 2));
    let comment = legacy.comment().expect("declarations carry comments");
    assert!(comment.has_comment());
    assert_eq!(comment.short_text(), "Old entry point.");
    assert_eq!(comment.long_text(), "Kept for compatibility.\n");
    assert_eq!(comment.tags().len(), 2);
    assert_eq!(comment.tag("deprecated").map(|tag| tag.text.as_str()), Some("use Modern"));
    assert!(comment.tag("internal").is_none());
    assert!(legacy.as_class().unwrap().is_abstract);

    let plain = reflector.mirror(decl(&reflector, 3)).comment().unwrap();
    assert!(!plain.has_comment());
    assert_eq!(plain.short_text(), "");
    assert_eq!(plain.long_text(), "");

    assert!(reflector.mirror(reflector.builtin_string()).comment().is_none());
}

#[test]
fn callables_keep_overloads_and_parameter_details() {
    let tree = project(vec![module(
        1,
        "m",
        vec![json!({
            "id": 2, "name": "format", "kind": 64, "kindString": "Function", "flags": {},
            "signatures": [
                {
                    "id": 3, "name": "format", "kind": 4096, "kindString": "Call signature",
                    "flags": {}, "comment": { "shortText": "Formats a value." },
                    "typeParameter": [{ "id": 4, "name": "T", "kind": 131072, "kindString": "Type parameter" }],
                    "parameters": [
                        {
                            "id": 5, "name": "value", "kind": 32768, "kindString": "Parameter",
                            "flags": {}, "type": { "type": "typeParameter", "name": "T" }
                        },
                        {
                            "id": 6, "name": "width", "kind": 32768, "kindString": "Parameter",
                            "flags": { "isOptional": true }, "type": intrinsic("number"),
                            "defaultValue": "80"
                        }
                    ],
                    "type": intrinsic("string")
                },
                call_signature(7, "format", vec![], intrinsic("string"))
            ]
        })],
    )]);
    let reflector = reflect(&tree);

    let format = reflector.mirror(decl(&reflector, 2));
    assert!(format.is_function());
    let format = format.as_callable().unwrap();
    assert_eq!(format.signatures.len(), 2);
    assert_eq!(format.comment.short_text(), "Formats a value.");

    let first = &format.signatures[0];
    assert_eq!(first.type_parameters, vec!["T".to_owned()]);
    assert!(reflector.mirror(first.parameters[0].ty).is_type_parameter());
    let width = &first.parameters[1];
    assert!(width.is_optional);
    assert_eq!(width.default_value.as_deref(), Some("80"));
    assert_eq!(first.return_type, reflector.builtin_string());
    assert!(format.signatures[1].parameters.is_empty());
}

#[test]
fn property_flags_carry_through() {
    let tree = project(vec![module(
        1,
        "m",
        vec![
            json!({
                "id": 2, "name": "LIMIT", "kind": 32, "kindString": "Variable",
                "flags": { "isConst": true, "isExported": true },
                "type": intrinsic("number"), "defaultValue": "10"
            }),
            class(
                3,
                "Counter",
                vec![
                    json!({
                        "id": 4, "name": "instances", "kind": 1024, "kindString": "Property",
                        "flags": { "isStatic": true, "isOptional": true }, "type": intrinsic("number")
                    }),
                    json!({
                        "id": 5, "name": "reset", "kind": 2048, "kindString": "Method",
                        "flags": { "isStatic": true },
                        "signatures": [call_signature(6, "reset", vec![], intrinsic("void"))]
                    }),
                ],
            ),
        ],
    )]);
    let reflector = reflect(&tree);

    let limit = reflector.mirror(decl(&reflector, 2)).as_property().unwrap();
    assert!(limit.readable && !limit.writeable);
    assert_eq!(limit.default_value.as_deref(), Some("10"));

    let instances = reflector.mirror(decl(&reflector, 4)).as_property().unwrap();
    assert!(instances.is_static && instances.is_optional && instances.writeable);

    let reset = reflector.mirror(decl(&reflector, 5)).as_callable().unwrap();
    assert!(reset.is_static());
}

#[test]
fn heritage_clauses_resolve_in_order() {
    let tree = project(vec![module(
        1,
        "m",
        vec![
            interface(2, "Base", vec![]),
            json!({
                "id": 3, "name": "Derived", "kind": 128, "kindString": "Class", "flags": {},
                "typeParameter": [{ "id": 4, "name": "T", "kind": 131072, "kindString": "Type parameter" }],
                "extendedTypes": [reference(2, "Base")],
                "implementedTypes": [external("Iterable"), reference(2, "Base")],
                "children": []
            }),
        ],
    )]);
    let reflector = reflect(&tree);
    let derived = reflector.mirror(decl(&reflector, 3)).as_class().unwrap();

    assert_eq!(derived.body.type_parameters, vec!["T".to_owned()]);
    assert_eq!(derived.body.extended_types, vec![decl(&reflector, 2)]);
    assert_eq!(derived.body.implemented_types.len(), 2);
    assert!(reflector.mirror(derived.body.implemented_types[0]).is_external_type_reference());
    assert_eq!(derived.body.implemented_types[1], decl(&reflector, 2));
}

#[test]
fn private_members_can_be_skipped() {
    let tree = project(vec![module(
        1,
        "m",
        vec![class(
            2,
            "Vault",
            vec![
                property(3, "open", intrinsic("boolean")),
                json!({
                    "id": 4, "name": "secret", "kind": 1024, "kindString": "Property",
                    "flags": { "isPrivate": true }, "type": intrinsic("string")
                }),
            ],
        )],
    )]);

    let everything = reflect(&tree);
    let vault = everything.mirror(decl(&everything, 2)).as_class().unwrap();
    assert_eq!(vault.body.property_names(), &["open".to_owned(), "secret".to_owned()]);

    let options = ReflectOptions {
        skip_private_members: true,
        ..ReflectOptions::default()
    };
    let public = Reflector::from_value_with_options(&tree, options).expect("resolves");
    let vault = public.mirror(decl(&public, 2)).as_class().unwrap();
    assert_eq!(vault.body.property_names(), &["open".to_owned()]);
    assert_eq!(vault.body.members, vec![decl(&public, 3)]);
    assert!(public.options().skip_private_members);
}
