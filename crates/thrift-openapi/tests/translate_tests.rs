//! End-to-end translation tests: Thrift AST in, OpenAPI document out.

use std::sync::Arc;

use test_log::test;
use thrift_openapi::{
    Config, DefaultValue, Generator, HttpMethod, PluginRequest, build_document,
    response::JSON_CONTENT_TYPE,
};
use thrift_openapi_ast::{ConstValue, Field, Function, Service, StructLike, Thrift};

// ============================================================================
// Fixtures
// ============================================================================

fn greeter() -> Thrift {
    Thrift::default()
        .with_namespace("go", "hello")
        .with_struct(StructLike::new("HelloReq").with_field(Field::new(1, "name", "string").required()))
        .with_struct(StructLike::new("HelloReply").with_field(Field::new(1, "message", "string")))
        .with_service(
            Service::new("Greeter").with_function(
                Function::new("SayHello", "HelloReply")
                    .with_argument(Field::new(1, "req", "HelloReq"))
                    .with_annotation("api.get", ["/hello"]),
            ),
        )
}

fn with_service(ast: Thrift, service: Service) -> Thrift {
    ast.with_service(service)
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_greeter_round_trip() {
    let (doc, warnings) = build_document(&Config::default(), &greeter());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    assert_eq!(doc.paths.items.len(), 1);
    let item = doc.path("/hello").expect("path /hello");
    assert_eq!(item.methods(), vec![HttpMethod::Get]);

    let op = item.get.as_ref().unwrap();
    assert_eq!(op.operation_id, "Greeter_SayHello");
    assert_eq!(op.tags, vec!["Greeter"]);

    assert_eq!(op.parameters.len(), 1);
    assert_eq!(op.parameters[0].name, "name");
    assert_eq!(op.parameters[0].location, "query");
    assert!(op.parameters[0].required);

    assert_eq!(op.responses.len(), 1);
    let ok = &op.responses["200"];
    assert_eq!(ok.description, "OK");
    let schema = &ok.content[JSON_CONTENT_TYPE].schema;
    assert_eq!(schema.ty.as_deref(), Some("object"));
    assert_eq!(schema.properties.len(), 1);
    assert_eq!(schema.properties["message"].ty.as_deref(), Some("string"));
}

#[test]
fn test_greeter_yaml() {
    let response = Generator::default().run(&PluginRequest::new(greeter()));
    assert_eq!(response.error, None);

    let yaml: serde_yaml::Value = serde_yaml::from_str(&response.contents[0].content).unwrap();
    let get = &yaml["paths"]["/hello"]["get"];

    assert_eq!(get["operationId"].as_str(), Some("Greeter_SayHello"));
    assert_eq!(get["parameters"][0]["in"].as_str(), Some("query"));
    assert_eq!(get["parameters"][0]["required"].as_bool(), Some(true));
    assert!(yaml["paths"]["/hello"]["post"].is_null());
}

// ============================================================================
// Laws
// ============================================================================

#[test]
fn test_runs_are_byte_identical() {
    let ast = with_service(
        greeter(),
        Service::new("Admin")
            .with_function(Function::new("Zap", "HelloReply").with_annotation("api.delete", ["/zap"]))
            .with_function(Function::new("All", "HelloReply").with_annotation("api.any", ["/all"])),
    );
    let request = PluginRequest::new(ast);
    let generator = Generator::default();

    let first = generator.run(&request);
    let second = generator.run(&request);
    assert_eq!(first.contents[0].content, second.contents[0].content);
}

#[test]
fn test_unannotated_function_is_skipped() {
    let ast = with_service(
        greeter(),
        Service::new("Quiet").with_function(Function::new("Nothing", "HelloReply")),
    );
    let (doc, _) = build_document(&Config::default(), &ast);

    assert_eq!(doc.paths.items.len(), 1);
    let ids: Vec<_> = doc
        .paths
        .items
        .values()
        .flat_map(|item| item.methods().into_iter().map(move |m| item.operation(m).unwrap().operation_id.clone()))
        .collect();
    assert!(!ids.contains(&"Quiet_Nothing".to_string()));
    assert!(doc.tags.iter().all(|t| t.name != "Quiet"));
}

#[test]
fn test_any_fans_out_to_all_verbs() {
    let ast = with_service(
        greeter(),
        Service::new("Wild")
            .with_function(Function::new("Everything", "HelloReply").with_annotation("api.any", ["/any"])),
    );
    let (doc, _) = build_document(&Config::default(), &ast);
    let item = doc.path("/any").unwrap();
    let get = item.get.as_ref().unwrap();

    assert_eq!(item.methods().len(), 7);
    for method in HttpMethod::ALL {
        let op = item.operation(method).unwrap();
        assert_eq!(op.operation_id, "Wild_Everything");
        assert!(Arc::ptr_eq(op, get));
    }
}

#[test]
fn test_get_wins_over_post() {
    let ast = with_service(
        greeter(),
        Service::new("Both").with_function(
            Function::new("Either", "HelloReply")
                .with_annotation("api.post", ["/post"])
                .with_annotation("api.get", ["/get"]),
        ),
    );
    let (doc, _) = build_document(&Config::default(), &ast);

    assert!(doc.path("/post").is_none());
    assert_eq!(doc.path("/get").unwrap().methods(), vec![HttpMethod::Get]);
}

#[test]
fn test_multiple_arguments_give_no_parameters_and_one_warning() {
    let ast = with_service(
        greeter(),
        Service::new("Multi").with_function(
            Function::new("Two", "HelloReply")
                .with_argument(Field::new(1, "a", "HelloReq"))
                .with_argument(Field::new(2, "b", "HelloReq"))
                .with_annotation("api.post", ["/two"]),
        ),
    );
    let (doc, warnings) = build_document(&Config::default(), &ast);
    let op = doc.path("/two").unwrap().post.as_ref().unwrap();

    assert!(op.parameters.is_empty());
    assert_eq!(warnings.len(), 1);
    assert!(warnings.iter().next().unwrap().contains("Multi_Two"));
}

#[test]
fn test_no_arguments_give_no_parameters_and_no_warning() {
    let ast = with_service(
        greeter(),
        Service::new("Bare")
            .with_function(Function::new("Ping", "HelloReply").with_annotation("api.head", ["/ping"])),
    );
    let (doc, warnings) = build_document(&Config::default(), &ast);

    assert!(doc.path("/ping").unwrap().head.as_ref().unwrap().parameters.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn test_primitive_argument_gives_no_parameters() {
    let ast = with_service(
        greeter(),
        Service::new("Prim").with_function(
            Function::new("Echo", "string")
                .with_argument(Field::new(1, "text", "string"))
                .with_annotation("api.put", ["/echo"]),
        ),
    );
    let (doc, warnings) = build_document(&Config::default(), &ast);
    let op = doc.path("/echo").unwrap().put.as_ref().unwrap();

    assert!(op.parameters.is_empty());
    assert!(op.responses["200"].content[JSON_CONTENT_TYPE].schema.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn test_bool_default_reaches_parameter_schema() {
    let ast = Thrift::default()
        .with_namespace("go", "flags")
        .with_struct(
            StructLike::new("Query")
                .with_field(Field::new(1, "verbose", "bool").with_default(ConstValue::identifier("true")))
                .with_field(Field::new(2, "limit", "i32")),
        )
        .with_service(
            Service::new("Search").with_function(
                Function::new("Find", "void")
                    .with_argument(Field::new(1, "q", "Query"))
                    .with_annotation("api.get", ["/find"]),
            ),
        );
    let (doc, warnings) = build_document(&Config::default(), &ast);
    let params = &doc.path("/find").unwrap().get.as_ref().unwrap().parameters;

    assert_eq!(params[0].schema.default, Some(DefaultValue::Boolean(true)));
    assert_eq!(params[1].schema.default, None);
    assert!(warnings.is_empty());
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_paths_and_tags_are_sorted() {
    let ast = Thrift::default()
        .with_namespace("go", "order")
        .with_service(
            Service::new("Zoo")
                .with_function(Function::new("C", "void").with_annotation("api.get", ["/c"]))
                .with_function(Function::new("A", "void").with_annotation("api.get", ["/a"])),
        )
        .with_service(
            Service::new("Ant").with_function(Function::new("B", "void").with_annotation("api.get", ["/b"])),
        );
    let (doc, _) = build_document(&Config::default(), &ast);

    let paths: Vec<_> = doc.paths.items.keys().map(String::as_str).collect();
    assert_eq!(paths, ["/a", "/b", "/c"]);

    let tags: Vec<_> = doc.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, ["Ant", "Zoo"]);
}

#[test]
fn test_request_from_thriftgo_dump() {
    let json = r#"{
        "Version": "0.3.6",
        "Language": "go",
        "OutputPath": ".",
        "AST": {
            "Namespaces": [{"Language": "go", "Name": "hello"}],
            "Structs": [
                {"Name": "HelloReq", "Fields": [{"ID": 1, "Name": "name", "Requiredness": 1, "Type": {"Name": "string"}}]},
                {"Name": "HelloReply", "Fields": [{"ID": 1, "Name": "message", "Requiredness": 0, "Type": {"Name": "string"}}]}
            ],
            "Unions": null,
            "Exceptions": null,
            "Services": [{
                "Name": "Greeter",
                "Functions": [{
                    "Name": "SayHello",
                    "FunctionType": {"Name": "HelloReply"},
                    "Arguments": [{"ID": 1, "Name": "req", "Type": {"Name": "HelloReq"}}],
                    "Annotations": [{"Key": "api.get", "Values": ["/hello"]}]
                }]
            }]
        }
    }"#;
    let request = PluginRequest::from_json(json).unwrap();
    assert_eq!(request.version, "0.3.6");
    assert_eq!(request.ast, greeter());
}
