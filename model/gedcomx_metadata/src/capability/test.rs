use gedcomx_extension::Extensions;

use super::{
    register_agent, register_attributed, register_resource, Agent, AnyAgent,
    AnyAttributed, AnyResource, Attributed, Resource,
};
use crate::{
    common::{Attribution, Note, ResourceReference},
    foaf::{Address, OnlineAccount, Organization, Person},
    rdf::LiteralValue,
    source::SourceDescription,
};

fn attributed_note(text: &str, contributor: &str) -> Note {
    Note {
        attribution: Some(Attribution {
            contributor: Some(contributor.into()),
            modified: None,
        }),
        ..Note::with_text(text)
    }
}

fn sample() -> Extensions {
    let mut extensions = Extensions::new();

    extensions.add(SourceDescription::new("S1"));
    extensions.add(Organization::new("R1", "FamilySearch International"));
    extensions.add(attributed_note("See the index.", "#P1"));
    extensions.add(Person::new("P1", "Jane Doe"));
    extensions.add(42u32);
    extensions.add(Organization::new("R2", "Family History Library"));

    extensions
}

#[test]
fn any_resource() {
    let extensions = sample();

    let ids = extensions
        .find_by_type::<AnyResource>()
        .map(Resource::id)
        .collect::<Vec<_>>();

    assert_eq!(ids, ["S1", "R1", "P1", "R2"]);
}

#[test]
fn any_agent() {
    let extensions = sample();

    let agents = extensions.find_by_type::<AnyAgent>().collect::<Vec<_>>();

    assert_eq!(agents.len(), 3);
    assert_eq!(agents[0].id(), "R1");
    assert_eq!(agents[1].id(), "P1");
    assert_eq!(agents[2].id(), "R2");
    assert_eq!(
        agents[2].name().map(|x| x.value.as_str()),
        Some("Family History Library")
    );
}

#[test]
fn any_attributed() {
    let extensions = sample();

    let contributors = extensions
        .find_by_type::<AnyAttributed>()
        .map(|x| x.attribution().and_then(|x| x.contributor.clone()))
        .collect::<Vec<_>>();

    assert_eq!(contributors, [None, Some(ResourceReference::from("#P1"))]);
}

#[test]
fn exact_type_lookup_ignores_capabilities() {
    let extensions = sample();

    assert_eq!(extensions.find_by_type::<Person>().count(), 1);
    assert_eq!(extensions.find_by_type::<Organization>().count(), 2);
    assert_eq!(extensions.find_by_type::<Note>().count(), 1);
}

#[test]
fn no_match_is_empty() {
    let mut extensions = Extensions::new();
    extensions.add(42u32);

    assert_eq!(extensions.find_by_type::<AnyAgent>().count(), 0);
    assert_eq!(extensions.find_by_type::<AnyResource>().count(), 0);
}

#[test]
fn fragment_reference() {
    let organization = Organization::new("R2", "Family History Library");

    assert_eq!(organization.reference(), ResourceReference::from("#R2"));
}

#[derive(Debug, Clone, PartialEq)]
struct Repository {
    id: String,
    name: LiteralValue,
    attribution: Option<Attribution>,
}

impl Resource for Repository {
    fn id(&self) -> &str { &self.id }
}

impl Agent for Repository {
    fn name(&self) -> Option<&LiteralValue> { Some(&self.name) }

    fn homepage(&self) -> Option<&LiteralValue> { None }

    fn openid(&self) -> Option<&LiteralValue> { None }

    fn accounts(&self) -> &[OnlineAccount] { &[] }

    fn emails(&self) -> &[ResourceReference] { &[] }

    fn phones(&self) -> &[ResourceReference] { &[] }

    fn addresses(&self) -> &[Address] { &[] }
}

impl Attributed for Repository {
    fn attribution(&self) -> Option<&Attribution> { self.attribution.as_ref() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Microfilm {
    id: String,
}

impl Resource for Microfilm {
    fn id(&self) -> &str { &self.id }
}

#[test]
fn application_types_join_the_markers() {
    let mut extensions = Extensions::new();

    extensions.add(Organization::new("R1", "FamilySearch International"));
    extensions.add(Repository {
        id: "R9".to_owned(),
        name: LiteralValue::new("Texas State Archives").with_lang("en-US"),
        attribution: Some(Attribution {
            contributor: Some("#P1".into()),
            modified: None,
        }),
    });
    extensions.add(Microfilm { id: "F1".to_owned() });

    register_agent::<Repository>();
    register_attributed::<Repository>();
    register_resource::<Microfilm>();

    let agents = extensions
        .find_by_type::<AnyAgent>()
        .map(Resource::id)
        .collect::<Vec<_>>();
    let resources = extensions
        .find_by_type::<AnyResource>()
        .map(Resource::id)
        .collect::<Vec<_>>();

    assert_eq!(agents, ["R1", "R9"]);
    assert_eq!(resources, ["R1", "R9", "F1"]);

    let repository = extensions.find_by_type::<AnyAgent>().nth(1).unwrap();
    assert_eq!(
        repository.name().and_then(|x| x.lang.as_deref()),
        Some("en-US")
    );

    let contributors = extensions
        .find_by_type::<AnyAttributed>()
        .filter_map(|x| x.attribution().and_then(|x| x.contributor.clone()))
        .collect::<Vec<_>>();

    assert_eq!(contributors, [ResourceReference::from("#P1")]);
}

#[test]
fn registering_a_built_in_record_again() {
    assert!(!register_agent::<Organization>());
    assert!(!register_attributed::<Note>());

    assert_eq!(sample().find_by_type::<AnyAgent>().count(), 3);
}
