//! Declaration-tree fixtures shared by the integration tests.
//!
//! Node shapes follow TypeDoc's JSON output. Ids must be unique across a whole fixture,
//! including signatures and parameters.

#![allow(dead_code)]

use fob_reflect::{DeclId, MirrorId, Reflector};
use serde_json::{json, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn reflect(tree: &Value) -> Reflector {
    init_tracing();
    Reflector::from_value(tree).expect("fixture should resolve")
}

/// Mirror id of a declaration that must have been reached.
pub fn decl(reflector: &Reflector, id: u64) -> MirrorId {
    reflector
        .mirror_for_declaration(DeclId(id))
        .unwrap_or_else(|| panic!("declaration {id} was not resolved"))
}

pub fn project(modules: Vec<Value>) -> Value {
    json!({ "id": 0, "name": "fixture", "kind": 0, "flags": {}, "children": modules })
}

pub fn module(id: u64, name: &str, children: Vec<Value>) -> Value {
    json!({
        "id": id, "name": name, "kind": 1, "kindString": "External module",
        "flags": { "isExported": true }, "originalName": format!("src/{name}.ts"),
        "children": children
    })
}

pub fn namespace(id: u64, name: &str, children: Vec<Value>) -> Value {
    json!({ "id": id, "name": name, "kind": 2, "kindString": "Module", "flags": {}, "children": children })
}

pub fn class(id: u64, name: &str, children: Vec<Value>) -> Value {
    json!({ "id": id, "name": name, "kind": 128, "kindString": "Class", "flags": {}, "children": children })
}

pub fn interface(id: u64, name: &str, children: Vec<Value>) -> Value {
    json!({ "id": id, "name": name, "kind": 256, "kindString": "Interface", "flags": {}, "children": children })
}

pub fn object_literal(id: u64, name: &str, children: Vec<Value>) -> Value {
    json!({ "id": id, "name": name, "kind": 2097152, "kindString": "Object literal", "flags": {}, "children": children })
}

pub fn type_literal(id: u64, children: Vec<Value>) -> Value {
    json!({ "id": id, "name": "__type", "kind": 65536, "kindString": "Type literal", "flags": {}, "children": children })
}

pub fn signature_literal(id: u64, signature: Value) -> Value {
    json!({ "id": id, "name": "__type", "kind": 65536, "kindString": "Type literal", "flags": {}, "signatures": [signature] })
}

pub fn property(id: u64, name: &str, ty: Value) -> Value {
    json!({ "id": id, "name": name, "kind": 1024, "kindString": "Property", "flags": {}, "type": ty })
}

pub fn variable(id: u64, name: &str, ty: Value) -> Value {
    json!({ "id": id, "name": name, "kind": 32, "kindString": "Variable", "flags": {}, "type": ty })
}

pub fn type_alias(id: u64, name: &str, ty: Value) -> Value {
    json!({ "id": id, "name": name, "kind": 4194304, "kindString": "Type alias", "flags": {}, "type": ty })
}

pub fn enumeration(id: u64, name: &str, members: &[(u64, &str, &str)]) -> Value {
    let children: Vec<Value> = members
        .iter()
        .map(|(id, name, value)| {
            json!({
                "id": id, "name": name, "kind": 16, "kindString": "Enumeration member",
                "flags": {}, "defaultValue": value
            })
        })
        .collect();
    json!({ "id": id, "name": name, "kind": 4, "kindString": "Enumeration", "flags": {}, "children": children })
}

pub fn parameter(id: u64, name: &str, ty: Value) -> Value {
    json!({ "id": id, "name": name, "kind": 32768, "kindString": "Parameter", "flags": {}, "type": ty })
}

pub fn call_signature(id: u64, name: &str, parameters: Vec<Value>, returns: Value) -> Value {
    json!({
        "id": id, "name": name, "kind": 4096, "kindString": "Call signature",
        "flags": {}, "parameters": parameters, "type": returns
    })
}

pub fn function(id: u64, name: &str, signature: Value) -> Value {
    json!({ "id": id, "name": name, "kind": 64, "kindString": "Function", "flags": {}, "signatures": [signature] })
}

pub fn method(id: u64, name: &str, signature: Value) -> Value {
    json!({ "id": id, "name": name, "kind": 2048, "kindString": "Method", "flags": {}, "signatures": [signature] })
}

pub fn constructor(id: u64, signature_id: u64, parameters: Vec<Value>, returns: Value) -> Value {
    json!({
        "id": id, "name": "constructor", "kind": 512, "kindString": "Constructor", "flags": {},
        "signatures": [{
            "id": signature_id, "name": "new Widget", "kind": 16384,
            "kindString": "Constructor signature", "flags": {},
            "parameters": parameters, "type": returns
        }]
    })
}

pub fn accessor(id: u64, name: &str, getter: Option<Value>, setter: Option<Value>) -> Value {
    let mut node = json!({ "id": id, "name": name, "kind": 262144, "kindString": "Accessor", "flags": {} });
    if let Some(getter) = getter {
        node["getSignature"] = json!([getter]);
    }
    if let Some(setter) = setter {
        node["setSignature"] = json!([setter]);
    }
    node
}

pub fn get_signature(id: u64, name: &str, returns: Value) -> Value {
    json!({ "id": id, "name": format!("__get {name}"), "kind": 524288, "kindString": "Get signature", "flags": {}, "type": returns })
}

pub fn set_signature(id: u64, name: &str, parameter: Value) -> Value {
    json!({
        "id": id, "name": format!("__set {name}"), "kind": 1048576, "kindString": "Set signature",
        "flags": {}, "parameters": [parameter], "type": intrinsic("void")
    })
}

pub fn intrinsic(name: &str) -> Value {
    json!({ "type": "intrinsic", "name": name })
}

pub fn reference(id: u64, name: &str) -> Value {
    json!({ "type": "reference", "id": id, "name": name })
}

pub fn external(name: &str) -> Value {
    json!({ "type": "reference", "name": name })
}

pub fn array(element: Value) -> Value {
    json!({ "type": "array", "elementType": element })
}

pub fn union(types: Vec<Value>) -> Value {
    json!({ "type": "union", "types": types })
}

pub fn intersection(types: Vec<Value>) -> Value {
    json!({ "type": "intersection", "types": types })
}

pub fn reflection(declaration: Value) -> Value {
    json!({ "type": "reflection", "declaration": declaration })
}

pub fn string_literal(value: &str) -> Value {
    json!({ "type": "stringLiteral", "value": value })
}

pub fn type_parameter(name: &str) -> Value {
    json!({ "type": "typeParameter", "name": name })
}

pub fn type_operator(operator: &str, target: Value) -> Value {
    json!({ "type": "typeOperator", "operator": operator, "target": target })
}

/// One module exercising every mirror kind the engine produces.
///
/// `Widget` (10) has a self-referencing `parent` property (15); `Props` (40) is referenced
/// from `Widget.mixed` and from `create`'s parameter.
pub fn kitchen_sink() -> Value {
    project(vec![module(
        1,
        "kitchen",
        vec![
            class(
                10,
                "Widget",
                vec![
                    constructor(
                        11,
                        12,
                        vec![parameter(13, "label", intrinsic("string"))],
                        reference(10, "Widget"),
                    ),
                    property(14, "label", intrinsic("string")),
                    property(15, "parent", reference(10, "Widget")),
                    accessor(
                        16,
                        "size",
                        Some(get_signature(17, "size", intrinsic("number"))),
                        Some(set_signature(18, "size", parameter(19, "value", intrinsic("number")))),
                    ),
                    method(
                        20,
                        "render",
                        call_signature(
                            21,
                            "render",
                            vec![parameter(22, "target", external("HTMLElement"))],
                            intrinsic("void"),
                        ),
                    ),
                    property(23, "tags", array(intrinsic("string"))),
                    property(24, "mode", union(vec![string_literal("a"), string_literal("b")])),
                    property(
                        25,
                        "style",
                        reflection(type_literal(26, vec![property(27, "color", intrinsic("string"))])),
                    ),
                    property(
                        28,
                        "onClick",
                        reflection(signature_literal(
                            29,
                            call_signature(30, "__call", vec![], intrinsic("void")),
                        )),
                    ),
                    property(31, "key", type_operator("keyof", external("Widget"))),
                    property(32, "value", type_parameter("T")),
                    property(
                        33,
                        "mixed",
                        intersection(vec![reference(40, "Props"), external("Base")]),
                    ),
                    property(34, "broken", json!({ "type": "unknown", "name": "???" })),
                ],
            ),
            interface(40, "Props", vec![property(41, "id", intrinsic("number"))]),
            enumeration(42, "Color", &[(43, "Red", "0"), (44, "Green", "1")]),
            type_alias(45, "Id", union(vec![intrinsic("string"), intrinsic("number")])),
            function(
                46,
                "create",
                call_signature(
                    47,
                    "create",
                    vec![parameter(48, "props", reference(40, "Props"))],
                    reference(10, "Widget"),
                ),
            ),
            object_literal(49, "defaults", vec![variable(50, "size", intrinsic("number"))]),
            namespace(51, "internal", vec![variable(52, "version", intrinsic("string"))]),
        ],
    )])
}
