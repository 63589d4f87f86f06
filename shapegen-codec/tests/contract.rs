//! End-to-end contract tests over a small people schema: round trips,
//! equality, hashing, minting, default handling, enumerated-value
//! filtering, union decoding, and feature gating.

use pretty_assertions::assert_eq;
use shapegen_codec::{
    construct, equals, from_graph, from_json, hash_instance, identifier_of, json_schema,
    to_graph, to_json, ui_schema, union_from_graph, where_clause, CodecError, Value,
};
use shapegen_graph_ir::{DecodeError, Graph, Term};
use shapegen_model::ObjectModel;
use shapegen_vocab::{gen, rdf, rdfs, sh, xsd};
use sha2::{Digest, Sha256};

const EX: &str = "http://example.org/";

fn iri(local: &str) -> Term {
    Term::iri(format!("{EX}{local}"))
}

fn class_shape(g: &mut Graph, local: &str) -> Term {
    let s = iri(local);
    g.add_triple(s.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
    g.add_triple(s.clone(), Term::iri(rdf::TYPE), Term::iri(rdfs::CLASS));
    s
}

fn property(g: &mut Graph, shape: &Term, label: &str, predicate: &str) -> Term {
    let ps = Term::blank(label);
    g.add_triple(shape.clone(), Term::iri(sh::PROPERTY), ps.clone());
    g.add_triple(ps.clone(), Term::iri(sh::PATH), iri(predicate));
    ps
}

fn counts(g: &mut Graph, ps: &Term, min: Option<i64>, max: Option<i64>) {
    if let Some(min) = min {
        g.add_triple(ps.clone(), Term::iri(sh::MIN_COUNT), Term::integer(min));
    }
    if let Some(max) = max {
        g.add_triple(ps.clone(), Term::iri(sh::MAX_COUNT), Term::integer(max));
    }
}

/// Person (name, age, nicknames, status with default, nested address)
/// plus a blank-only Address
fn people_model() -> ObjectModel {
    let mut g = Graph::new();

    let address = class_shape(&mut g, "Address");
    g.add_triple(
        address.clone(),
        Term::iri(sh::NODE_KIND),
        Term::iri(sh::BLANK_NODE),
    );
    let street = property(&mut g, &address, "a0", "street");
    g.add_triple(street.clone(), Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    counts(&mut g, &street, Some(1), Some(1));
    let city = property(&mut g, &address, "a1", "city");
    g.add_triple(city.clone(), Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    counts(&mut g, &city, None, Some(1));

    let person = class_shape(&mut g, "Person");
    let name = property(&mut g, &person, "p0", "name");
    g.add_triple(name.clone(), Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    counts(&mut g, &name, Some(1), Some(1));
    let age = property(&mut g, &person, "p1", "age");
    g.add_triple(age.clone(), Term::iri(sh::DATATYPE), Term::iri(xsd::INTEGER));
    counts(&mut g, &age, None, Some(1));
    property(&mut g, &person, "p2", "nicknames");
    g.add_triple(
        Term::blank("p2"),
        Term::iri(sh::DATATYPE),
        Term::iri(xsd::STRING),
    );
    let status = property(&mut g, &person, "p3", "status");
    counts(&mut g, &status, None, Some(1));
    g.add_triple(status.clone(), Term::iri(sh::IN), Term::blank("sl0"));
    g.add_triple(Term::blank("sl0"), Term::iri(rdf::FIRST), Term::string("open"));
    g.add_triple(Term::blank("sl0"), Term::iri(rdf::REST), Term::blank("sl1"));
    g.add_triple(Term::blank("sl1"), Term::iri(rdf::FIRST), Term::string("closed"));
    g.add_triple(Term::blank("sl1"), Term::iri(rdf::REST), Term::iri(rdf::NIL));
    g.add_triple(status, Term::iri(sh::DEFAULT_VALUE), Term::string("open"));
    let addr_ref = property(&mut g, &person, "p4", "address");
    g.add_triple(addr_ref.clone(), Term::iri(sh::NODE), address);
    counts(&mut g, &addr_ref, None, Some(1));

    ObjectModel::from_graph(&g).unwrap()
}

fn alice_graph() -> Graph {
    let mut g = Graph::new();
    let alice = iri("alice");
    g.add_triple(alice.clone(), Term::iri(rdf::TYPE), iri("Person"));
    g.add_triple(alice.clone(), iri("name"), Term::string("Alice"));
    g.add_triple(alice.clone(), iri("age"), Term::integer(33));
    g.add_triple(alice.clone(), iri("nicknames"), Term::string("Ally"));
    g.add_triple(alice.clone(), iri("nicknames"), Term::string("Al"));
    g.add_triple(alice.clone(), iri("status"), Term::string("closed"));
    g.add_triple(alice.clone(), iri("address"), Term::blank("a0"));
    g.add_triple(Term::blank("a0"), iri("street"), Term::string("1 Main St"));
    g
}

#[test]
fn test_graph_round_trip_modulo_blank_identity() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();
    let data = alice_graph();

    let mut decoded = from_graph(&model, ty, &data, &iri("alice"), true).unwrap();

    let mut encoded = Graph::new();
    to_graph(&model, ty, &mut decoded, &mut encoded, true).unwrap();
    let again = from_graph(&model, ty, &encoded, &iri("alice"), true).unwrap();

    assert_eq!(equals(&model, ty, &decoded, &again).unwrap(), None);
}

#[test]
fn test_json_round_trip() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();
    let data = alice_graph();

    let mut decoded = from_graph(&model, ty, &data, &iri("alice"), true).unwrap();
    let json = to_json(&model, ty, &mut decoded).unwrap();
    assert_eq!(json["@id"], serde_json::json!("http://example.org/alice"));
    assert_eq!(json["type"], serde_json::json!("Person"));

    let again = from_json(&model, ty, &json).unwrap();
    assert_eq!(equals(&model, ty, &decoded, &again).unwrap(), None);
}

#[test]
fn test_equals_reflexive_and_swap_symmetric() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();
    let data = alice_graph();
    let a = from_graph(&model, ty, &data, &iri("alice"), true).unwrap();
    assert_eq!(equals(&model, ty, &a, &a).unwrap(), None);

    let mut b = a.clone();
    b.set("name", Value::String("Bob".into()));
    let forward = equals(&model, ty, &a, &b).unwrap().unwrap();
    let backward = equals(&model, ty, &b, &a).unwrap().unwrap();
    assert_eq!(forward.path, "name");
    assert_eq!(forward.left, backward.right);
    assert_eq!(forward.right, backward.left);
}

#[test]
fn test_hash_determinism_and_sensitivity() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();
    let data = alice_graph();
    let a = from_graph(&model, ty, &data, &iri("alice"), true).unwrap();
    let b = from_graph(&model, ty, &data, &iri("alice"), true).unwrap();

    let digest = |i| {
        let mut h = Sha256::new();
        hash_instance(&model, ty, i, &mut h).unwrap();
        h.finalize()
    };
    assert_eq!(digest(&a), digest(&b));

    let mut c = a.clone();
    c.set("age", Value::Integer(34));
    assert_ne!(digest(&a), digest(&c));
}

#[test]
fn test_sha256_mint_is_deterministic_and_invalidated_by_writes() {
    let mut g = Graph::new();
    let doc = class_shape(&mut g, "Doc");
    g.add_triple(
        doc.clone(),
        Term::iri(gen::MINTING_STRATEGY),
        Term::iri(gen::MINT_SHA256),
    );
    let value = property(&mut g, &doc, "d0", "value");
    g.add_triple(value.clone(), Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    counts(&mut g, &value, Some(1), Some(1));
    let model = ObjectModel::from_graph(&g).unwrap();
    let ty = model.object_type("Doc").unwrap();

    let inputs = || vec![("value".to_string(), Value::String("test".into()))];
    let mut a = construct(&model, "Doc", inputs()).unwrap();
    let mut b = construct(&model, "Doc", inputs()).unwrap();
    let id_a = identifier_of(&model, ty, &mut a).unwrap();
    let id_b = identifier_of(&model, ty, &mut b).unwrap();
    assert_eq!(id_a, id_b);
    assert!(id_a
        .as_iri()
        .unwrap()
        .starts_with("urn:shapegen:Doc:sha256:"));

    // A field write invalidates the cached mint
    a.set("value", Value::String("changed".into()));
    let id_c = identifier_of(&model, ty, &mut a).unwrap();
    assert_ne!(id_a, id_c);
}

#[test]
fn test_default_suppressed_on_encode_and_recovered_on_decode() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();

    let mut instance = construct(
        &model,
        "Person",
        vec![
            ("@id".to_string(), Value::Iri(format!("{EX}p1"))),
            ("name".to_string(), Value::String("Solo".into())),
        ],
    )
    .unwrap();
    // Construction recovered the declared default
    assert_eq!(
        instance.get("status").as_one(),
        Some(&Value::String("open".into()))
    );

    let mut encoded = Graph::new();
    to_graph(&model, ty, &mut instance, &mut encoded, true).unwrap();
    let status_predicate = format!("{EX}status");
    let status_statements = encoded
        .iter()
        .filter(|t| t.p.as_iri() == Some(status_predicate.as_str()))
        .count();
    assert_eq!(status_statements, 0);

    let decoded = from_graph(&model, ty, &encoded, &iri("p1"), true).unwrap();
    assert_eq!(
        decoded.get("status").as_one(),
        Some(&Value::String("open".into()))
    );
}

#[test]
fn test_enumerated_value_filtering() {
    let mut g = Graph::new();
    let thing = class_shape(&mut g, "Thing");
    let code = property(&mut g, &thing, "t0", "code");
    counts(&mut g, &code, None, Some(1));
    g.add_triple(code.clone(), Term::iri(sh::IN), Term::blank("cl0"));
    g.add_triple(Term::blank("cl0"), Term::iri(rdf::FIRST), Term::string("A"));
    g.add_triple(Term::blank("cl0"), Term::iri(rdf::REST), Term::blank("cl1"));
    g.add_triple(Term::blank("cl1"), Term::iri(rdf::FIRST), Term::string("B"));
    g.add_triple(Term::blank("cl1"), Term::iri(rdf::REST), Term::iri(rdf::NIL));
    let model = ObjectModel::from_graph(&g).unwrap();
    let ty = model.object_type("Thing").unwrap();

    // A value outside the set decodes to absent, never an error
    let mut data = Graph::new();
    data.add_triple(iri("x"), Term::iri(rdf::TYPE), iri("Thing"));
    data.add_triple(iri("x"), iri("code"), Term::string("bogus"));
    let decoded = from_graph(&model, ty, &data, &iri("x"), true).unwrap();
    assert!(decoded.get("code").is_absent());

    // An invalid statement is skipped once a valid one is found
    data.add_triple(iri("x"), iri("code"), Term::string("B"));
    let decoded = from_graph(&model, ty, &data, &iri("x"), true).unwrap();
    assert_eq!(decoded.get("code").as_one(), Some(&Value::String("B".into())));
}

#[test]
fn test_union_decode_order_and_last_error() {
    let mut g = Graph::new();
    let cat = class_shape(&mut g, "Cat");
    let meow = property(&mut g, &cat, "c0", "meow");
    g.add_triple(meow.clone(), Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    counts(&mut g, &meow, Some(1), Some(1));
    class_shape(&mut g, "Dog");
    let pet = iri("Pet");
    g.add_triple(pet.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
    g.add_triple(pet.clone(), Term::iri(sh::OR), Term::blank("u0"));
    g.add_triple(Term::blank("u0"), Term::iri(rdf::FIRST), iri("Cat"));
    g.add_triple(Term::blank("u0"), Term::iri(rdf::REST), Term::blank("u1"));
    g.add_triple(Term::blank("u1"), Term::iri(rdf::FIRST), iri("Dog"));
    g.add_triple(Term::blank("u1"), Term::iri(rdf::REST), Term::iri(rdf::NIL));
    let model = ObjectModel::from_graph(&g).unwrap();
    let union = model.union("Pet").unwrap();

    let mut data = Graph::new();
    data.add_triple(iri("felix"), Term::iri(rdf::TYPE), iri("Cat"));
    data.add_triple(iri("felix"), iri("meow"), Term::string("loud"));
    let decoded = union_from_graph(&model, union, &data, &iri("felix")).unwrap();
    assert_eq!(decoded.type_name(), "Cat");

    // Nothing matches: the last member's error is carried
    let mut untyped = Graph::new();
    untyped.add_triple(iri("rock"), iri("meow"), Term::string("?"));
    let err = union_from_graph(&model, union, &untyped, &iri("rock")).unwrap_err();
    match err {
        CodecError::NoUnionMatch { union, last } => {
            assert_eq!(union, "Pet");
            assert!(matches!(
                *last,
                CodecError::Decode(DecodeError::UnexpectedType { .. })
            ));
        }
        other => panic!("expected NoUnionMatch, got {other}"),
    }
}

#[test]
fn test_required_field_scenario() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();

    let mut data = Graph::new();
    data.add_triple(iri("ghost"), Term::iri(rdf::TYPE), iri("Person"));
    let err = from_graph(&model, ty, &data, &iri("ghost"), true).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Decode(DecodeError::MissingRequiredValue { .. })
    ));

    data.add_triple(iri("ghost"), iri("name"), Term::string("Casper"));
    let mut decoded = from_graph(&model, ty, &data, &iri("ghost"), true).unwrap();

    let mut encoded = Graph::new();
    to_graph(&model, ty, &mut decoded, &mut encoded, true).unwrap();
    let name_predicate = format!("{EX}name");
    let name_statements = encoded
        .iter()
        .filter(|t| t.p.as_iri() == Some(name_predicate.as_str()))
        .count();
    assert_eq!(name_statements, 1);
}

#[test]
fn test_json_decode_validates_first() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();
    let json = serde_json::json!({
        "type": "Person",
        "name": "Alice",
        "age": "not a number",
    });
    let err = from_json(&model, ty, &json).unwrap_err();
    match err {
        CodecError::JsonValidation { issues, .. } => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].path, "/age");
        }
        other => panic!("expected JsonValidation, got {other}"),
    }
}

#[test]
fn test_feature_exclusion_gates_the_capability() {
    let mut g = Graph::new();
    let quiet = class_shape(&mut g, "Quiet");
    g.add_triple(
        quiet.clone(),
        Term::iri(gen::EXCLUDE_FEATURE),
        Term::iri(gen::FEATURE_JSON),
    );
    let model = ObjectModel::from_graph(&g).unwrap();
    let ty = model.object_type("Quiet").unwrap();

    let mut instance = construct(
        &model,
        "Quiet",
        vec![("@id".to_string(), Value::Iri(format!("{EX}q")))],
    )
    .unwrap();
    let err = to_json(&model, ty, &mut instance).unwrap_err();
    assert!(matches!(err, CodecError::FeatureDisabled { .. }));

    // Everything else stays enabled
    let mut encoded = Graph::new();
    assert!(to_graph(&model, ty, &mut instance, &mut encoded, true).is_ok());
}

#[test]
fn test_schema_documents_are_stable() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();

    let a = serde_json::to_string(&json_schema(&model, ty).unwrap()).unwrap();
    let b = serde_json::to_string(&json_schema(&model, ty).unwrap()).unwrap();
    assert_eq!(a, b);

    let schema = json_schema(&model, ty).unwrap();
    let person = &schema["$defs"]["Person"];
    assert_eq!(person["properties"]["age"]["type"], "integer");
    assert!(person["required"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("name")));

    let ui = ui_schema(&model, ty).unwrap();
    let first = &ui["elements"][0];
    assert_eq!(first["scope"], "#/properties/type");
    assert_eq!(first["options"]["hidden"], true);
}

#[test]
fn test_hash_insensitive_to_set_order_and_blank_labels() {
    let mut g = Graph::new();
    let contact = class_shape(&mut g, "Contact");
    g.add_triple(
        contact.clone(),
        Term::iri(sh::NODE_KIND),
        Term::iri(sh::BLANK_NODE),
    );
    let email = property(&mut g, &contact, "c0", "email");
    g.add_triple(email.clone(), Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    counts(&mut g, &email, Some(1), Some(1));
    let team = class_shape(&mut g, "Team");
    let members = property(&mut g, &team, "t0", "members");
    g.add_triple(members, Term::iri(sh::NODE), contact);
    let model = ObjectModel::from_graph(&g).unwrap();
    let ty = model.object_type("Team").unwrap();

    let data = |first: &str, second: &str, label_a: &str, label_b: &str| {
        let mut d = Graph::new();
        d.add_triple(iri("t"), Term::iri(rdf::TYPE), iri("Team"));
        d.add_triple(iri("t"), iri("members"), Term::blank(label_a));
        d.add_triple(Term::blank(label_a), iri("email"), Term::string(first));
        d.add_triple(iri("t"), iri("members"), Term::blank(label_b));
        d.add_triple(Term::blank(label_b), iri("email"), Term::string(second));
        d
    };
    // Same multiset of members, opposite statement order, unrelated
    // blank labels
    let one = data("a@example.org", "b@example.org", "m0", "m1");
    let two = data("b@example.org", "a@example.org", "x7", "x8");
    let a = from_graph(&model, ty, &one, &iri("t"), true).unwrap();
    let b = from_graph(&model, ty, &two, &iri("t"), true).unwrap();

    let digest = |i: &_| {
        let mut h = Sha256::new();
        hash_instance(&model, ty, i, &mut h).unwrap();
        h.finalize()
    };
    assert_eq!(digest(&a), digest(&b));
}

#[test]
fn test_literal_datetime_survives_json_round_trip() {
    let mut g = Graph::new();
    let event = class_shape(&mut g, "Event");
    let when = property(&mut g, &event, "e0", "when");
    g.add_triple(when.clone(), Term::iri(sh::NODE_KIND), Term::iri(sh::LITERAL));
    counts(&mut g, &when, None, Some(1));
    let model = ObjectModel::from_graph(&g).unwrap();
    let ty = model.object_type("Event").unwrap();

    let mut data = Graph::new();
    data.add_triple(iri("e"), Term::iri(rdf::TYPE), iri("Event"));
    data.add_triple(
        iri("e"),
        iri("when"),
        Term::typed(
            "2024-05-17T10:30:00Z",
            shapegen_graph_ir::Datatype::xsd_date_time(),
        ),
    );
    let mut decoded = from_graph(&model, ty, &data, &iri("e"), true).unwrap();
    assert!(matches!(
        decoded.get("when").as_one(),
        Some(Value::DateTime(_))
    ));

    let json = to_json(&model, ty, &mut decoded).unwrap();
    let again = from_json(&model, ty, &json).unwrap();
    assert!(matches!(
        again.get("when").as_one(),
        Some(Value::DateTime(_))
    ));
    assert_eq!(equals(&model, ty, &decoded, &again).unwrap(), None);
}

#[test]
fn test_query_union_field_branches() {
    let mut g = Graph::new();
    let entry = class_shape(&mut g, "Entry");
    let payload = property(&mut g, &entry, "e0", "payload");
    counts(&mut g, &payload, None, Some(1));
    g.add_triple(payload.clone(), Term::iri(sh::OR), Term::blank("u0"));
    g.add_triple(Term::blank("u0"), Term::iri(rdf::FIRST), Term::blank("m0"));
    g.add_triple(Term::blank("u0"), Term::iri(rdf::REST), Term::blank("u1"));
    g.add_triple(Term::blank("u1"), Term::iri(rdf::FIRST), Term::blank("m1"));
    g.add_triple(Term::blank("u1"), Term::iri(rdf::REST), Term::iri(rdf::NIL));
    g.add_triple(Term::blank("m0"), Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    // Second member is an ordered list of strings
    let list = iri("StringList");
    g.add_triple(list.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
    g.add_triple(list.clone(), Term::iri(sh::PROPERTY), Term::blank("lf"));
    g.add_triple(Term::blank("lf"), Term::iri(sh::PATH), Term::iri(rdf::FIRST));
    g.add_triple(Term::blank("lf"), Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    g.add_triple(list.clone(), Term::iri(sh::PROPERTY), Term::blank("lr"));
    g.add_triple(Term::blank("lr"), Term::iri(sh::PATH), Term::iri(rdf::REST));
    g.add_triple(Term::blank("m1"), Term::iri(sh::NODE), list);

    let model = ObjectModel::from_graph(&g).unwrap();
    let ty = model.object_type("Entry").unwrap();
    let clause = where_clause(ty, "?s", "q_").unwrap();

    assert!(clause.contains(" UNION "));
    assert!(clause.contains(&format!("{{ ?s <{EX}payload> ?q_payload . }}")));
    assert!(clause.contains(&format!(
        "{{ ?s <{EX}payload>/<{}>*/<{}> ?q_payload . }}",
        rdf::REST,
        rdf::FIRST
    )));
}

#[test]
fn test_query_patterns() {
    let model = people_model();
    let ty = model.object_type("Person").unwrap();

    let clause = where_clause(ty, "?s", "p_").unwrap();
    assert!(clause.contains(&format!("?s <{}> <{EX}Person> .", rdf::TYPE)));
    assert!(clause.contains(&format!("?s <{EX}name> ?p_name .")));
    assert!(clause.contains(&format!("OPTIONAL {{ ?s <{EX}age> ?p_age . }}")));
}
