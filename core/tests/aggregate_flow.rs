use apidoc_core::{
    aggregate, parse_group_json, DescriptorDeriver, FieldDescriptor, Info, Operation, Parameter,
    Path, PathGroup, PrimitiveType, Property, ReferenceSite, Response, SchemaDefinition,
    SchemaNode, SchemaRegistry, TypeDescriptor, ValidationError,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn pets_group() -> PathGroup {
    let pet = SchemaDefinition::object(
        "Pet",
        vec![
            Property::required("id", SchemaNode::formatted(PrimitiveType::Integer, "int64")),
            Property::required("name", SchemaNode::string()),
        ],
    );
    let error = SchemaDefinition::object(
        "Error",
        vec![Property::required("message", SchemaNode::string())],
    );

    let pet_resp = Operation::new()
        .with_operation_id("getPet")
        .with_tags(["pets"])
        .with_params(vec![Parameter::path("id").with_type(PrimitiveType::Integer)])
        .responding(
            Response::with_schema("Unexpected error", SchemaNode::reference("Error")),
            [(200, Response::with_schema("A pet", SchemaNode::reference("Pet")))],
        );

    PathGroup::new("Pets")
        .with_definitions(vec![pet, error])
        .with_paths(vec![Path::new("/pets/{id}").get(pet_resp)])
}

fn dinos_group() -> PathGroup {
    let dino_resp = Operation::new()
        .with_params(vec![Parameter::path("id")])
        .responding(
            Response::with_schema("Unexpected error", SchemaNode::reference("Error")),
            [(200, Response::with_schema("A dino", SchemaNode::reference("Dino")))],
        );

    PathGroup::new("Dinos").with_paths(vec![Path::new("/dinos/{id}").get(dino_resp)])
}

#[test]
fn test_missing_dino_is_the_only_error() {
    let errors = aggregate(Info::new("Zoo", "1.0"), &[pets_group(), dinos_group()]).unwrap_err();

    assert_eq!(
        errors,
        vec![ValidationError::MissingDefinition {
            name: "Dino".to_string(),
            site: ReferenceSite::Response {
                path: "/dinos/{id}".to_string(),
                method: apidoc_core::HttpMethod::Get,
                status: "200".to_string(),
                location: String::new(),
            },
        }]
    );
}

#[test]
fn test_disjoint_groups_concatenate() {
    let deriver = DescriptorDeriver::new();
    let mut registry = SchemaRegistry::new();
    let order = registry.register(
        &deriver,
        &TypeDescriptor::record(
            "Order",
            vec![
                FieldDescriptor::new("id", "u64"),
                FieldDescriptor::new("items", "Vec<LineItem>"),
                FieldDescriptor::new("note", "Option<String>"),
            ],
        ),
    );
    registry.register(
        &deriver,
        &TypeDescriptor::record("LineItem", vec![FieldDescriptor::new("sku", "String")]),
    );

    let orders = PathGroup::new("Orders")
        .with_registry(registry)
        .with_paths(vec![Path::new("/orders").post(
            Operation::new()
                .with_params(vec![Parameter::body("order", order.clone())])
                .responding(
                    Response::new("Rejected"),
                    [(201, Response::with_schema("Created", order))],
                ),
        )]);

    let doc = aggregate(Info::new("Shop", "2.0"), &[pets_group(), orders.clone()]).unwrap();

    let templates: Vec<&str> = doc.paths.iter().map(|p| p.template.as_str()).collect();
    assert_eq!(templates, vec!["/pets/{id}", "/orders"]);

    let names: Vec<&str> = doc.definitions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Pet", "Error", "Order", "LineItem"]);

    let related: Vec<&str> = doc
        .definition("Order")
        .unwrap()
        .related_definitions(&doc)
        .unwrap()
        .into_iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(related, vec!["LineItem"]);
}

#[test]
fn test_swagger_round_trip() {
    let doc = aggregate(Info::new("Pets", "1.0"), &[pets_group()]).unwrap();
    let swagger = doc.to_swagger();

    let definition_names: Vec<&String> = swagger["definitions"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(definition_names, vec!["Pet", "Error"]);

    let verbs: Vec<&String> = swagger["paths"]["/pets/{id}"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(verbs, vec!["get"]);

    let codes: Vec<&String> = swagger["paths"]["/pets/{id}"]["get"]["responses"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(codes, vec!["200", "default"]);

    let reparsed = parse_group_json("Pets", &swagger).unwrap();
    assert_eq!(reparsed, pets_group());
}

#[test]
fn test_yaml_output_parses_back() {
    let doc = aggregate(Info::new("Pets", "1.0"), &[pets_group()]).unwrap();
    let yaml = doc.to_yaml_string().unwrap();
    let value: Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value, doc.to_swagger());
}
