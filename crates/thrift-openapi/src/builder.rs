//! Document assembly from a Thrift AST.

use thrift_openapi_ast::{Field, Function, Service, Thrift};
use tracing::debug;

use crate::annotation;
use crate::config::Config;
use crate::error::Warnings;
use crate::params::build_query_params;
use crate::path;
use crate::response::{SUCCESS_STATUS, build_response};
use crate::types::{Components, Document, Info, Operation, Parameter, Paths, Tag};

/// Builds one OpenAPI document from a Thrift AST.
///
/// # Example
///
/// ```ignore
/// let (document, warnings) = DocumentBuilder::new(&Config::default(), &ast).build();
/// ```
///
/// Functions without a route annotation are left out. Everything that degrades the output
/// without making it unusable (missing namespace, extra arguments, unknown structs) is
/// recorded in the returned [`Warnings`].
#[derive(Debug)]
pub struct DocumentBuilder<'a> {
    config: &'a Config,
    ast: &'a Thrift,
    warnings: Warnings,
}

impl<'a> DocumentBuilder<'a> {
    /// Create a new builder.
    pub fn new(config: &'a Config, ast: &'a Thrift) -> Self {
        Self {
            config,
            ast,
            warnings: Warnings::new(),
        }
    }

    /// Build the document, sorted and ready to render.
    pub fn build(mut self) -> (Document, Warnings) {
        let namespace = self.namespace_name();

        let mut document = Document {
            openapi: self.config.openapi_version.clone(),
            info: Info {
                title: format!("{namespace} API"),
                description: format!("The API for {namespace}"),
                version: self.config.api_version.clone(),
            },
            paths: Paths::default(),
            components: Components::default(),
            tags: Vec::new(),
        };

        let ast = self.ast;
        for service in &ast.services {
            self.add_service(&mut document, service);
        }

        document.sort();
        (document, self.warnings)
    }

    fn namespace_name(&mut self) -> String {
        let language = &self.config.namespace_language;
        match self.ast.namespace_for(language) {
            Some(ns) => ns.name.clone(),
            None => {
                self.warnings.push(format!("No {language} namespace found"));
                String::new()
            }
        }
    }

    fn add_service(&mut self, document: &mut Document, service: &Service) {
        let mut exposed = false;

        for function in &service.functions {
            let Some(binding) = annotation::resolve(function) else {
                debug!(
                    service = %service.name,
                    function = %function.name,
                    "no HTTP binding, skipping"
                );
                continue;
            };

            let operation = self.build_operation(service, function);
            let operation_id = operation.operation_id.clone();
            debug!(
                operation_id = %operation_id,
                method = binding.method.as_str(),
                path = %binding.path,
                "adding operation"
            );

            let item = path::assemble(binding.method, binding.path.as_str(), operation);
            let taken = document.paths.insert(item);
            if taken.len() < binding.method.methods().len() {
                exposed = true;
            }
            if !taken.is_empty() {
                let verbs: Vec<_> = taken.iter().map(|m| m.as_str()).collect();
                self.warnings.push(format!(
                    "{} {} is already bound, `{operation_id}` was dropped for those methods",
                    verbs.join(","),
                    binding.path
                ));
            }
        }

        if exposed {
            document.tags.push(Tag {
                name: service.name.clone(),
                description: service.docs().map(str::to_string),
            });
        }
    }

    fn build_operation(&mut self, service: &Service, function: &Function) -> Operation {
        let operation_id = format!("{}_{}", service.name, function.name);

        let parameters = match function.arguments.as_slice() {
            [argument] => self.argument_params(&operation_id, argument),
            [] => Vec::new(),
            arguments => {
                self.warnings.push(format!(
                    "`{operation_id}` takes {} arguments, only single-argument functions get query parameters",
                    arguments.len()
                ));
                Vec::new()
            }
        };

        let response = build_response(&function.function_type, self.ast, &mut self.warnings);

        Operation::new(operation_id)
            .with_tag(&service.name)
            .with_summary(function.docs())
            .with_description(format!(
                "API for {} service's {} function",
                service.name, function.name
            ))
            .with_parameters(parameters)
            .with_response(SUCCESS_STATUS, response)
    }

    fn argument_params(&mut self, operation_id: &str, argument: &Field) -> Vec<Parameter> {
        let Some(name) = argument.ty.kind().named() else {
            return Vec::new();
        };

        match self.ast.find_struct(name) {
            Some(s) => build_query_params(&s.fields, &mut self.warnings),
            None => {
                self.warnings.push(format!(
                    "Argument type `{name}` of `{operation_id}` is not a known struct, no query parameters generated"
                ));
                Vec::new()
            }
        }
    }
}

/// Build a document with a one-off [`DocumentBuilder`].
pub fn build_document(config: &Config, ast: &Thrift) -> (Document, Warnings) {
    DocumentBuilder::new(config, ast).build()
}
