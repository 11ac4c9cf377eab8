use std::any::TypeId;

use serde::{Deserialize, Serialize};

use crate::{Extensions, Registry, UnregisteredType, UnresolvedExtensionType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Organization {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Person {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Note {
    text: String,
}

#[test]
fn resolve_registered_identifier() {
    let mut registry = Registry::new();

    assert!(registry.register::<Organization>("foaf:Organization"));

    let registered = registry.resolve("foaf:Organization").unwrap();

    assert_eq!(registered.identifier(), "foaf:Organization");
    assert_eq!(registered.type_id(), TypeId::of::<Organization>());
    assert!(registered.type_name().ends_with("Organization"));
}

#[test]
fn resolve_unknown_identifier() {
    let registry = Registry::new();

    assert_eq!(
        registry.resolve("foaf:UnknownThing").unwrap_err(),
        UnresolvedExtensionType::new("foaf:UnknownThing".to_owned())
    );
}

#[test]
fn register_is_idempotent() {
    let mut registry = Registry::new();

    assert!(registry.register::<Organization>("foaf:Organization"));
    assert!(!registry.register::<Organization>("foaf:Organization"));

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.identifier_of::<Organization>(),
        Some("foaf:Organization")
    );
}

#[test]
fn last_registration_of_an_identifier_wins() {
    let mut registry = Registry::new();

    assert!(registry.register::<Organization>("foaf:Agent"));
    assert!(!registry.register::<Person>("foaf:Agent"));

    assert_eq!(
        registry.resolve("foaf:Agent").unwrap().type_id(),
        TypeId::of::<Person>()
    );
    assert_eq!(registry.identifier_of::<Person>(), Some("foaf:Agent"));

    // the identifier was taken over, so the previous type is not writable
    assert_eq!(registry.identifier_of::<Organization>(), None);
}

#[test]
fn type_registered_under_several_identifiers() {
    let mut registry = Registry::new();

    assert!(registry.register::<Note>("gx:Comment"));
    assert!(registry.register::<Note>("gx:Note"));

    // written under the latest, read under both
    assert_eq!(registry.identifier_of::<Note>(), Some("gx:Note"));
    assert_eq!(
        registry.resolve("gx:Comment").unwrap().type_id(),
        TypeId::of::<Note>()
    );
    assert_eq!(
        registry.resolve("gx:Note").unwrap().type_id(),
        TypeId::of::<Note>()
    );
    assert!(registry.contains("gx:Comment"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn check_serializable() {
    let mut registry = Registry::new();
    assert!(registry.is_empty());

    assert!(registry.register::<Organization>("foaf:Organization"));

    let mut extensions = Extensions::new();
    extensions.add(Organization { id: "R1".to_owned() });

    assert_eq!(registry.check_serializable(&extensions), Ok(()));

    extensions.add(Person { id: "P1".to_owned() });

    let identifiers = extensions
        .all()
        .map(|x| registry.identifier_of_element(x))
        .collect::<Vec<_>>();
    assert_eq!(identifiers, [Some("foaf:Organization"), None]);

    assert_eq!(
        registry.check_serializable(&extensions),
        Err(UnregisteredType::new(std::any::type_name::<Person>()))
    );
}

#[test]
fn resolve_local_name() {
    let mut registry = Registry::new();

    assert!(registry.register::<Organization>("foaf:Organization"));
    assert!(registry.register::<Note>("gx:Note"));
    assert!(registry.register::<Person>("Person"));

    assert_eq!(
        registry.resolve_local_name("Organization").unwrap().identifier(),
        "foaf:Organization"
    );
    assert_eq!(
        registry.resolve_local_name("gx:Note").unwrap().identifier(),
        "gx:Note"
    );
    assert_eq!(
        registry.resolve_local_name("Person").unwrap().type_id(),
        TypeId::of::<Person>()
    );
    assert_eq!(
        registry.resolve_local_name("Citation").unwrap_err(),
        UnresolvedExtensionType::new("Citation".to_owned())
    );
}

#[test]
fn ambiguous_local_name() {
    let mut registry = Registry::new();

    assert!(registry.register::<Note>("gx:Note"));
    assert!(registry.register::<Person>("ex:Note"));

    assert_eq!(
        registry.resolve_local_name("Note").unwrap_err(),
        UnresolvedExtensionType::new("Note".to_owned())
    );
    assert_eq!(
        registry.resolve_local_name("ex:Note").unwrap().type_id(),
        TypeId::of::<Person>()
    );
}
