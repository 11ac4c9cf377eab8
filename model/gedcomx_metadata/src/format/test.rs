use std::path::Path;

use gedcomx_extension::{
    serde::{MalformedElementData, ReadFailure, ReadOptions},
    UnregisteredType,
};
use proptest::{
    prelude::{any, Just, Strategy},
    prop_assert_eq, prop_oneof, proptest,
};
use serde::{Deserialize, Serialize};

use super::{read, write, Error, Format};
use crate::{
    catalog,
    common::{Attribution, Note},
    foaf::{Organization, Person},
    rdf::LiteralValue,
    resource_set::ResourceSet,
    source::{SourceCitation, SourceDescription},
};

const FORMATS: [Format; 2] = [Format::Json, Format::Ron];
const ALL_FORMATS: [Format; 3] = [Format::Json, Format::Ron, Format::Xml];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Census {
    year: u16,
    district: String,
}

#[test]
fn from_path() {
    assert_eq!(Format::from_path(Path::new("set.json")), Some(Format::Json));
    assert_eq!(Format::from_path(Path::new("a/b/set.RON")), Some(Format::Ron));
    assert_eq!(Format::from_path(Path::new("set.Xml")), Some(Format::Xml));
    assert_eq!(Format::from_path(Path::new("set.txt")), None);
    assert_eq!(Format::from_path(Path::new("set")), None);

    for format in ALL_FORMATS {
        let name = format!("set.{}", format.extension());
        assert_eq!(Format::from_path(Path::new(&name)), Some(format));
    }
}

#[test]
fn strict_read_rejects_unknown_identifier() {
    let registry = catalog::registry();

    let sources = [
        (
            r#"{ "extensions": [{ "foaf:UnknownThing": { "id": "X1" } }] }"#,
            Format::Json,
        ),
        (
            r#"(extensions: [{ "foaf:UnknownThing": (id: "X1") }])"#,
            Format::Ron,
        ),
    ];

    for (source, format) in sources {
        let error =
            read(source, &registry, format, ReadOptions::strict()).unwrap_err();

        let Error::Read(ReadFailure::Unresolved(unresolved)) = error else {
            panic!("unexpected error: {error:?}");
        };

        assert_eq!(unresolved.identifier, "foaf:UnknownThing");
    }
}

#[test]
fn lenient_read_skips_unknown_identifier() {
    let registry = catalog::registry();

    let source = r#"(
        id: "RS1",
        extensions: [
            { "foaf:UnknownThing": (id: "X1", nested: [1, 2, 3]) },
            { "foaf:Person": (id: "P1", name: Some((value: "Jane Doe"))) },
        ],
    )"#;

    let decoded =
        read(source, &registry, Format::Ron, ReadOptions::default()).unwrap();

    assert_eq!(decoded.value.id(), Some("RS1"));
    assert_eq!(decoded.skipped.len(), 1);
    assert_eq!(decoded.skipped[0].identifier, "foaf:UnknownThing");
    assert_eq!(
        decoded.value.find_extensions_of_type::<Person>().collect::<Vec<_>>(),
        [&Person::new("P1", "Jane Doe")]
    );
}

#[test]
fn malformed_element() {
    let registry = catalog::registry();

    let sources = [
        (r#"{ "extensions": [{ "gx:Note": { "text": 42 } }] }"#, Format::Json),
        (r#"(extensions: [{ "gx:Note": (text: 42) }])"#, Format::Ron),
        (
            "<ResourceSet><extensions><gx:Note><lang>en</lang></gx:Note>\
             </extensions></ResourceSet>",
            Format::Xml,
        ),
    ];

    for (source, format) in sources {
        let error = read(source, &registry, format, ReadOptions::default())
            .unwrap_err();

        let Error::Read(ReadFailure::Malformed(MalformedElementData {
            identifier,
            ..
        })) = error
        else {
            panic!("unexpected error: {error:?}");
        };

        assert_eq!(identifier, "gx:Note", "{format:?}");
    }
}

#[test]
fn syntax_error_is_the_format_error() {
    let registry = catalog::registry();

    let options = ReadOptions::default();

    let error = read(r#"{ "extensions": ["#, &registry, Format::Json, options)
        .unwrap_err();
    assert!(error.is_json(), "{error:?}");

    let error =
        read("(extensions: [", &registry, Format::Ron, options).unwrap_err();
    assert!(error.is_ron_read(), "{error:?}");

    let error =
        read("<ResourceSet><extensions>", &registry, Format::Xml, options)
            .unwrap_err();
    assert!(error.is_xml(), "{error:?}");
}

#[test]
fn document_breaking_off_inside_an_element() {
    let registry = catalog::registry();

    let options = ReadOptions::default();

    let error = read(
        r#"{ "extensions": [{ "gx:Note": { "text": "abc"#,
        &registry,
        Format::Json,
        options,
    )
    .unwrap_err();
    assert!(
        error.as_json().is_some_and(serde_json::Error::is_eof),
        "{error:?}"
    );

    let error = read(
        r#"(extensions: [{ "gx:Note": (text: "abc"#,
        &registry,
        Format::Ron,
        options,
    )
    .unwrap_err();
    assert!(error.is_ron_read(), "{error:?}");

    let error = read(
        "<ResourceSet><extensions><gx:Note><text>abc",
        &registry,
        Format::Xml,
        options,
    )
    .unwrap_err();
    assert!(error.is_xml(), "{error:?}");

    // well formed, but the element itself is broken
    let error = read(
        r#"{ "extensions": [{ "gx:Note": { "text": "abc", "text": "d" } }] }"#,
        &registry,
        Format::Json,
        options,
    )
    .unwrap_err();
    assert!(
        error.as_read().is_some_and(ReadFailure::is_malformed),
        "{error:?}"
    );
}

#[test]
fn write_unregistered_type() {
    let registry = catalog::registry();

    let mut resource_set = ResourceSet::new();
    resource_set.add_extension_element(Census {
        year: 1900,
        district: "Travis".to_owned(),
    });

    for format in ALL_FORMATS {
        let error = write(&resource_set, &registry, format).unwrap_err();

        assert_eq!(
            error.into_unregistered().unwrap(),
            UnregisteredType::new(std::any::type_name::<Census>())
        );
    }
}

#[test]
fn application_type_next_to_the_catalog() {
    let mut registry = catalog::registry();
    assert!(registry.register::<Census>("ex:Census"));

    let mut resource_set = ResourceSet::with_id("RS1");
    resource_set.add_extension_element(Census {
        year: 1900,
        district: "Travis".to_owned(),
    });
    resource_set.add_extension_element(Note::with_text("enumerated twice"));

    for format in FORMATS {
        let written = write(&resource_set, &registry, format).unwrap();
        let decoded =
            read(&written, &registry, format, ReadOptions::strict()).unwrap();

        assert_eq!(decoded.value, resource_set);

        // a reader with only the default catalog skips the census
        let decoded = read(
            &written,
            &catalog::registry(),
            format,
            ReadOptions::default(),
        )
        .unwrap();

        assert_eq!(decoded.value.extensions().len(), 1);
        assert_eq!(decoded.skipped[0].identifier, "ex:Census");
    }
}

fn text() -> impl Strategy<Value = String> { "[a-zA-Z0-9 ,.#:/-]{0,16}" }

fn literal() -> impl Strategy<Value = LiteralValue> {
    (text(), proptest::option::of(Just("en-US"))).prop_map(|(value, lang)| {
        let literal = LiteralValue::new(value);

        match lang {
            Some(lang) => literal.with_lang(lang),
            None => literal,
        }
    })
}

#[derive(Debug, Clone)]
enum Element {
    Organization(Organization),
    Person(Person),
    SourceDescription(SourceDescription),
    Note(Note),
}

fn element() -> impl Strategy<Value = Element> {
    prop_oneof![
        (text(), literal()).prop_map(|(id, name)| Element::Organization(
            Organization::new(id, name)
        )),
        (text(), literal(), proptest::option::of(literal())).prop_map(
            |(id, name, given_name)| {
                Element::Person(Person {
                    given_name,
                    ..Person::new(id, name)
                })
            }
        ),
        (text(), text(), proptest::option::of(text())).prop_map(
            |(id, citation, mediator)| {
                Element::SourceDescription(SourceDescription {
                    citation: Some(SourceCitation::new(citation)),
                    mediator: mediator.map(Into::into),
                    ..SourceDescription::new(id)
                })
            }
        ),
        (text(), proptest::option::of(any::<u64>())).prop_map(
            |(text, modified)| {
                Element::Note(Note {
                    attribution: modified.map(|modified| Attribution {
                        contributor: None,
                        modified: Some(modified),
                    }),
                    ..Note::with_text(text)
                })
            }
        ),
    ]
}

fn resource_sets() -> impl Strategy<Value = ResourceSet> {
    (
        proptest::option::of(text()),
        proptest::collection::vec(element(), 0..12),
    )
        .prop_map(|(id, elements)| {
            let mut resource_set = ResourceSet::new();
            resource_set.set_id(id);

            for element in elements {
                match element {
                    Element::Organization(x) => {
                        resource_set.add_extension_element(x);
                    }
                    Element::Person(x) => {
                        resource_set.add_extension_element(x);
                    }
                    Element::SourceDescription(x) => {
                        resource_set.add_extension_element(x);
                    }
                    Element::Note(x) => {
                        resource_set.add_extension_element(x);
                    }
                }
            }

            resource_set
        })
}

proptest! {
    #[test]
    fn round_trip(resource_set in resource_sets()) {
        let registry = catalog::registry();

        for format in FORMATS {
            let written = write(&resource_set, &registry, format).unwrap();
            let decoded =
                read(&written, &registry, format, ReadOptions::strict())
                    .unwrap();

            prop_assert_eq!(&decoded.value, &resource_set);
            prop_assert_eq!(decoded.skipped.len(), 0);
        }
    }
}
