//! Draft-4 engine on top of the `jsonschema` crate
//!
//! The crate evaluates the keywords. This module compiles each schema with a
//! retriever that answers `$ref`s from the registry, then reshapes the
//! crate's errors into [`ValidationFailure`] trees:
//! - JSON-pointer locations become typed [`PathSegment`]s, relative to the
//!   parent failure for combinator branches
//! - `$ref` hops are dropped from schema paths
//! - messages use the classic Draft-4 wording with Python-style values
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use super::repr::{repr, repr_list, repr_str};
use super::{PathSegment, ValidationEngine, ValidationFailure};
use crate::error::{ValidatorError, ValidatorResult};
use crate::loader::resolver::ReferenceResolver;
use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::paths::{LazyLocation, Location};
use jsonschema::{Keyword, ReferencingError, Retrieve, Uri, ValidationError, ValidationOptions};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// Keyword of the placeholder schema that stands in for an unknown reference
const UNRESOLVED_KEYWORD: &str = "$unresolvedRef";

/// Draft-4 validation engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Draft4Engine;

impl Draft4Engine {
    pub fn new() -> Self {
        Self
    }

    fn options(&self, resolver: Arc<dyn ReferenceResolver>) -> ValidationOptions {
        jsonschema::draft4::options()
            .should_validate_formats(false)
            .with_retriever(RegistryRetriever { resolver })
            .with_keyword(UNRESOLVED_KEYWORD, unresolved_reference)
    }
}

impl ValidationEngine for Draft4Engine {
    fn check_schema(&self, schema: &Value) -> ValidatorResult<Vec<ValidationFailure>> {
        jsonschema::draft4::meta::VALIDATOR
            .iter_errors(schema)
            .map(|error| Failure::root(schema).convert(&error))
            .collect()
    }

    fn validate(
        &self,
        document: &Value,
        schema: &Value,
        resolver: Arc<dyn ReferenceResolver>,
    ) -> ValidatorResult<Vec<ValidationFailure>> {
        let validator = self.options(resolver).build(schema).map_err(compile_error)?;

        let failures = validator
            .iter_errors(document)
            .map(|error| Failure::root(document).convert(&error))
            .collect::<ValidatorResult<Vec<_>>>()?;
        trace!(failures = failures.len(), "Document checked");
        Ok(failures)
    }
}

/// Answers the crate's lookups for `json-schema:///<id>` from the registry.
///
/// Identifiers the registry does not know are answered with a placeholder
/// schema, so the miss only surfaces when validation actually reaches it.
struct RegistryRetriever {
    resolver: Arc<dyn ReferenceResolver>,
}

impl Retrieve for RegistryRetriever {
    fn retrieve(
        &self,
        uri: &Uri<String>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        match self.resolver.resolve_reference(uri.path().as_str()) {
            Ok(schema) => Ok(schema.clone()),
            Err(ValidatorError::UnknownSchemaError { id }) => {
                let mut placeholder = Map::new();
                placeholder.insert(UNRESOLVED_KEYWORD.to_string(), Value::String(id));
                Ok(Value::Object(placeholder))
            }
            Err(error) => Err(error.to_string().into()),
        }
    }
}

/// Fails every instance, carrying the identifier that could not be resolved
struct UnresolvedReference {
    id: String,
    location: Location,
}

impl Keyword for UnresolvedReference {
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        Err(ValidationError::custom(
            self.location.clone(),
            location.into(),
            instance,
            self.id.clone(),
        ))
    }

    fn is_valid(&self, _: &Value) -> bool {
        false
    }
}

fn unresolved_reference<'a>(
    _: &'a Map<String, Value>,
    value: &'a Value,
    location: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    Ok(Box::new(UnresolvedReference {
        id: value.as_str().unwrap_or_default().to_string(),
        location,
    }))
}

fn compile_error(error: ValidationError<'static>) -> ValidatorError {
    if let ValidationErrorKind::Referencing(ReferencingError::PointerToNowhere { pointer }) =
        &error.kind
    {
        debug!(pointer = %pointer, "Reference points outside its document");
        return ValidatorError::unknown_schema(pointer.as_str());
    }
    ValidatorError::registry_error(format!("Schema could not be compiled: {}", error))
}

/// Absolute location of the failure the next conversion is nested in
struct Failure<'d> {
    document: &'d Value,
    path: Vec<PathSegment>,
    schema_path: Vec<PathSegment>,
}

impl<'d> Failure<'d> {
    fn root(document: &'d Value) -> Self {
        Self {
            document,
            path: Vec::new(),
            schema_path: Vec::new(),
        }
    }

    fn convert(&self, error: &ValidationError<'_>) -> ValidatorResult<ValidationFailure> {
        if let ValidationErrorKind::Custom { message } = &error.kind {
            return Err(ValidatorError::unknown_schema(message.as_str()));
        }

        let path = instance_segments(&error.instance_path, self.document);
        let mut schema_path = schema_segments(&error.schema_path);
        if let Some(last) = schema_path.last_mut() {
            // Draft-4 spells exclusive bounds as flags on minimum/maximum
            match &error.kind {
                ValidationErrorKind::ExclusiveMinimum { .. } => *last = "minimum".into(),
                ValidationErrorKind::ExclusiveMaximum { .. } => *last = "maximum".into(),
                _ => {}
            }
        }
        let keyword = schema_path
            .iter()
            .rev()
            .find_map(PathSegment::as_key)
            .unwrap_or_default()
            .to_string();

        let branches = match &error.kind {
            ValidationErrorKind::AnyOf { context }
            | ValidationErrorKind::OneOfNotValid { context } => Some(context),
            _ => None,
        };
        let context = match branches {
            Some(context) => {
                let parent = Failure {
                    document: self.document,
                    path: path.clone(),
                    schema_path: schema_path.clone(),
                };
                context
                    .iter()
                    .flatten()
                    .map(|child| parent.convert(child))
                    .collect::<ValidatorResult<Vec<_>>>()?
            }
            None => Vec::new(),
        };

        Ok(ValidationFailure::new(&keyword, message(error))
            .at(
                relative(&path, &self.path),
                relative(&schema_path, &self.schema_path),
            )
            .with_context(context))
    }
}

fn relative(path: &[PathSegment], parent: &[PathSegment]) -> Vec<PathSegment> {
    path.strip_prefix(parent).unwrap_or(path).to_vec()
}

fn pointer_tokens(location: &Location) -> impl Iterator<Item = String> + '_ {
    location
        .as_str()
        .split('/')
        .skip(1)
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
}

/// Type instance pointer tokens by walking the document they point into
fn instance_segments(location: &Location, document: &Value) -> Vec<PathSegment> {
    let mut current = Some(document);
    let mut segments = Vec::new();

    for token in pointer_tokens(location) {
        let segment = match (current, token.parse::<usize>()) {
            (Some(Value::Array(items)), Ok(index)) => {
                current = items.get(index);
                PathSegment::Index(index)
            }
            (Some(Value::Object(members)), _) => {
                current = members.get(&token);
                PathSegment::Key(token)
            }
            _ => {
                current = None;
                PathSegment::Key(token)
            }
        };
        segments.push(segment);
    }
    segments
}

#[derive(Clone, Copy)]
enum Expect {
    Keyword,
    Name,
    Position,
}

/// Type schema pointer tokens by keyword position, skipping `$ref` hops
fn schema_segments(location: &Location) -> Vec<PathSegment> {
    let mut expect = Expect::Keyword;
    let mut segments = Vec::new();

    for token in pointer_tokens(location) {
        match expect {
            Expect::Name => {
                segments.push(PathSegment::Key(token));
                expect = Expect::Keyword;
                continue;
            }
            Expect::Position => {
                if let Ok(index) = token.parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                    expect = Expect::Keyword;
                    continue;
                }
            }
            Expect::Keyword => {}
        }

        expect = match token.as_str() {
            "$ref" => continue,
            "properties" | "patternProperties" | "dependencies" | "definitions" => Expect::Name,
            "items" | "allOf" | "anyOf" | "oneOf" => Expect::Position,
            _ => Expect::Keyword,
        };
        segments.push(PathSegment::Key(token));
    }
    segments
}

fn message(error: &ValidationError<'_>) -> String {
    let instance = repr(&error.instance);

    match &error.kind {
        ValidationErrorKind::Type { kind } => {
            let types: Vec<String> = match kind {
                TypeKind::Single(single) => vec![single.to_string()],
                TypeKind::Multiple(set) => set.iter().map(|each| each.to_string()).collect(),
            };
            format!(
                "{} is not of type {}",
                instance,
                repr_list(types.iter().map(String::as_str))
            )
        }
        ValidationErrorKind::Enum { options } => {
            format!("{} is not one of {}", instance, repr(options))
        }
        ValidationErrorKind::Required { property } => {
            format!("{} is a required property", repr(property))
        }
        ValidationErrorKind::MinItems { .. } | ValidationErrorKind::MinLength { .. } => {
            format!("{} is too short", instance)
        }
        ValidationErrorKind::MaxItems { .. } | ValidationErrorKind::MaxLength { .. } => {
            format!("{} is too long", instance)
        }
        ValidationErrorKind::MinProperties { .. } => {
            format!("{} does not have enough properties", instance)
        }
        ValidationErrorKind::MaxProperties { .. } => {
            format!("{} has too many properties", instance)
        }
        ValidationErrorKind::Minimum { limit } => {
            format!("{} is less than the minimum of {}", instance, repr(limit))
        }
        ValidationErrorKind::ExclusiveMinimum { limit } => format!(
            "{} is less than or equal to the minimum of {}",
            instance,
            repr(limit)
        ),
        ValidationErrorKind::Maximum { limit } => {
            format!("{} is greater than the maximum of {}", instance, repr(limit))
        }
        ValidationErrorKind::ExclusiveMaximum { limit } => format!(
            "{} is greater than or equal to the maximum of {}",
            instance,
            repr(limit)
        ),
        ValidationErrorKind::MultipleOf { multiple_of } => {
            format!("{} is not a multiple of {}", instance, number(*multiple_of))
        }
        ValidationErrorKind::Pattern { pattern } => {
            format!("{} does not match {}", instance, repr_str(pattern))
        }
        ValidationErrorKind::UniqueItems => format!("{} has non-unique elements", instance),
        ValidationErrorKind::AdditionalProperties { unexpected } => format!(
            "Additional properties are not allowed ({} {} unexpected)",
            repr_list(unexpected.iter().map(String::as_str)),
            if unexpected.len() == 1 { "was" } else { "were" }
        ),
        ValidationErrorKind::AdditionalItems { limit } => {
            let extras: Vec<String> = error
                .instance
                .as_array()
                .map(|items| items.iter().skip(*limit).map(repr).collect())
                .unwrap_or_default();
            format!(
                "Additional items are not allowed ({} {} unexpected)",
                extras.join(", "),
                if extras.len() == 1 { "was" } else { "were" }
            )
        }
        ValidationErrorKind::Not { schema } => {
            format!("{} is not allowed for {}", repr(schema), instance)
        }
        ValidationErrorKind::AnyOf { .. } | ValidationErrorKind::OneOfNotValid { .. } => {
            format!("{} is not valid under any of the given schemas", instance)
        }
        ValidationErrorKind::OneOfMultipleValid { .. } => {
            format!("{} is valid under more than one of the given schemas", instance)
        }
        ValidationErrorKind::FalseSchema => format!("False schema does not allow {}", instance),
        _ => error.to_string(),
    }
}

/// Whole divisors print without a fractional part
fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::store::{SchemaDocument, SchemaStore};
    use crate::loader::StoreResolver;
    use serde_json::json;

    fn run(schema: &Value, document: &Value) -> Vec<ValidationFailure> {
        run_with(SchemaStore::default(), schema, document).unwrap()
    }

    fn run_with(
        store: SchemaStore,
        schema: &Value,
        document: &Value,
    ) -> ValidatorResult<Vec<ValidationFailure>> {
        let resolver = StoreResolver::new(Arc::new(store), schema.clone());
        Draft4Engine::new().validate(document, schema, Arc::new(resolver))
    }

    fn messages(failures: &[ValidationFailure]) -> Vec<&str> {
        failures.iter().map(|f| f.message.as_str()).collect()
    }

    fn common_name_store() -> SchemaStore {
        SchemaStore::from_documents(vec![SchemaDocument::new(
            "/common/name.json",
            json!({"id": "/common/name.json", "type": "string"}),
            "common/name.json",
        )])
    }

    #[test]
    fn test_type() {
        let schema = json!({"id": "/test.json", "type": "string"});
        assert!(run(&schema, &json!("hello")).is_empty());

        let failures = run(&schema, &json!(5));
        assert_eq!(messages(&failures), vec!["5 is not of type 'string'"]);
        assert_eq!(failures[0].keyword, "type");
        assert_eq!(failures[0].schema_path, vec![PathSegment::from("type")]);
        assert!(failures[0].path.is_empty());
    }

    #[test]
    fn test_integer_excludes_floats() {
        let schema = json!({"type": ["integer", "null"]});
        assert!(run(&schema, &json!(3)).is_empty());
        assert!(run(&schema, &json!(null)).is_empty());
        assert_eq!(
            messages(&run(&schema, &json!(1.5))),
            vec!["1.5 is not of type 'integer', 'null'"]
        );
    }

    #[test]
    fn test_any_of_collects_branch_failures() {
        let schema = json!({
            "anyOf": [
                {"type": "object", "required": ["name", "age"]},
                {"type": "object", "required": ["value"]}
            ]
        });
        let failures = run(&schema, &json!({}));

        assert_eq!(failures.len(), 1);
        let any_of = &failures[0];
        assert_eq!(any_of.keyword, "anyOf");
        assert_eq!(any_of.message, "{} is not valid under any of the given schemas");
        assert_eq!(any_of.schema_path, vec![PathSegment::from("anyOf")]);
        assert_eq!(
            messages(&any_of.context),
            vec![
                "'name' is a required property",
                "'age' is a required property",
                "'value' is a required property"
            ]
        );
        assert_eq!(
            any_of.context[2].schema_path,
            vec![PathSegment::Index(1), PathSegment::from("required")]
        );
        assert!(any_of.context[2].path.is_empty());
    }

    #[test]
    fn test_branch_paths_are_relative() {
        let schema = json!({
            "properties": {
                "pet": {"oneOf": [{"properties": {"legs": {"type": "integer"}}, "required": ["legs"]}, {"type": "string"}]}
            }
        });
        let failures = run(&schema, &json!({"pet": {"legs": "four"}}));

        let one_of = &failures[0];
        assert_eq!(one_of.keyword, "oneOf");
        assert_eq!(one_of.path, vec![PathSegment::from("pet")]);
        assert_eq!(
            one_of.schema_path,
            vec![
                PathSegment::from("properties"),
                PathSegment::from("pet"),
                PathSegment::from("oneOf")
            ]
        );

        let legs = &one_of.context[0];
        assert_eq!(legs.message, "'four' is not of type 'integer'");
        assert_eq!(legs.path, vec![PathSegment::from("legs")]);
        assert_eq!(
            legs.schema_path,
            vec![
                PathSegment::Index(0),
                PathSegment::from("properties"),
                PathSegment::from("legs"),
                PathSegment::from("type")
            ]
        );
        assert_eq!(one_of.context[1].schema_path, vec![PathSegment::Index(1), PathSegment::from("type")]);
    }

    #[test]
    fn test_any_of_stops_at_first_match() {
        let schema = json!({"anyOf": [{"type": "string"}, {"type": "integer"}]});
        assert!(run(&schema, &json!(4)).is_empty());
    }

    #[test]
    fn test_nested_paths() {
        let schema = json!({
            "properties": {
                "people": {"items": {"properties": {"age": {"type": "integer"}}}}
            }
        });
        let failures = run(&schema, &json!({"people": [{"age": 1}, {"age": "x"}]}));

        assert_eq!(messages(&failures), vec!["'x' is not of type 'integer'"]);
        assert_eq!(
            failures[0].path,
            vec![
                PathSegment::from("people"),
                PathSegment::Index(1),
                PathSegment::from("age")
            ]
        );
        assert_eq!(
            failures[0].schema_path,
            vec![
                PathSegment::from("properties"),
                PathSegment::from("people"),
                PathSegment::from("items"),
                PathSegment::from("properties"),
                PathSegment::from("age"),
                PathSegment::from("type")
            ]
        );
    }

    #[test]
    fn test_numeric_member_names_stay_keys() {
        let schema = json!({"properties": {"0": {"type": "string"}}});
        let failures = run(&schema, &json!({"0": 1}));

        assert_eq!(failures[0].path, vec![PathSegment::from("0")]);
        assert_eq!(
            failures[0].schema_path,
            vec![PathSegment::from("properties"), PathSegment::from("0"), PathSegment::from("type")]
        );
    }

    #[test]
    fn test_cross_document_reference() {
        let schema = json!({
            "id": "/person.json",
            "properties": {
                "relative": {"$ref": "common/name.json"},
                "absolute": {"$ref": "/common/name.json", "type": "integer"}
            }
        });

        assert!(run_with(common_name_store(), &schema, &json!({"relative": "a", "absolute": "b"}))
            .unwrap()
            .is_empty());

        let failures = run_with(common_name_store(), &schema, &json!({"relative": 5})).unwrap();
        assert_eq!(messages(&failures), vec!["5 is not of type 'string'"]);
        assert_eq!(
            failures[0].schema_path,
            vec![
                PathSegment::from("properties"),
                PathSegment::from("relative"),
                PathSegment::from("type")
            ]
        );
    }

    #[test]
    fn test_reference_relative_to_referenced_document() {
        let store = SchemaStore::from_documents(vec![
            SchemaDocument::new(
                "/sub/a.json",
                json!({"id": "/sub/a.json", "$ref": "b.json"}),
                "sub/a.json",
            ),
            SchemaDocument::new(
                "/sub/b.json",
                json!({"id": "/sub/b.json", "type": "boolean"}),
                "sub/b.json",
            ),
        ]);
        let schema = json!({"id": "/root.json", "$ref": "sub/a.json"});

        let failures = run_with(store, &schema, &json!("no")).unwrap();
        assert_eq!(messages(&failures), vec!["'no' is not of type 'boolean'"]);
    }

    #[test]
    fn test_fragment_reference() {
        let schema = json!({
            "definitions": {"non negative": {"minimum": 0}},
            "items": {"$ref": "#/definitions/non%20negative"}
        });
        let failures = run(&schema, &json!([1, -1]));

        assert_eq!(messages(&failures), vec!["-1 is less than the minimum of 0"]);
        assert_eq!(failures[0].path, vec![PathSegment::Index(1)]);
        assert_eq!(
            failures[0].schema_path,
            vec![PathSegment::from("items"), PathSegment::from("minimum")]
        );
    }

    #[test]
    fn test_unknown_reference() {
        let schema = json!({"id": "/test.json", "$ref": "/missing.json"});
        match run_with(SchemaStore::default(), &schema, &json!(1)) {
            Err(ValidatorError::UnknownSchemaError { id }) => assert_eq!(id, "/missing.json"),
            other => panic!("expected unknown schema error, got {:?}", other),
        }

        let schema = json!({"$ref": "#/definitions/missing"});
        assert!(matches!(
            run_with(SchemaStore::default(), &schema, &json!(1)),
            Err(ValidatorError::UnknownSchemaError { .. })
        ));
    }

    #[test]
    fn test_unknown_reference_inside_branch() {
        let schema = json!({"anyOf": [{"type": "string"}, {"$ref": "/missing.json"}]});
        assert!(run(&schema, &json!("fine")).is_empty());
        assert!(matches!(
            run_with(SchemaStore::default(), &schema, &json!(1)),
            Err(ValidatorError::UnknownSchemaError { ref id }) if id == "/missing.json"
        ));
    }

    #[test]
    fn test_self_reference_accepts_anything() {
        let schema = json!({"$ref": "#"});
        assert!(run(&schema, &json!(1)).is_empty());
    }

    #[test]
    fn test_recursive_schema_consumes_input() {
        let schema = json!({
            "type": "object",
            "properties": {"child": {"$ref": "#"}}
        });
        assert!(run(&schema, &json!({"child": {"child": {}}})).is_empty());

        let failures = run(&schema, &json!({"child": {"child": 3}}));
        assert_eq!(messages(&failures), vec!["3 is not of type 'object'"]);
        assert_eq!(
            failures[0].schema_path,
            vec![
                PathSegment::from("properties"),
                PathSegment::from("child"),
                PathSegment::from("properties"),
                PathSegment::from("child"),
                PathSegment::from("type")
            ]
        );
    }

    #[test]
    fn test_deep_recursive_tree() {
        let schema = json!({
            "id": "/tree.json",
            "type": "object",
            "properties": {"children": {"type": "array", "items": {"$ref": "#"}}}
        });

        let mut tree = json!({"children": []});
        for _ in 0..100 {
            tree = json!({"children": [tree]});
        }
        assert!(run(&schema, &tree).is_empty());

        let mut broken = json!({"children": [5]});
        for _ in 0..100 {
            broken = json!({"children": [broken]});
        }
        let failures = run(&schema, &broken);
        assert_eq!(messages(&failures), vec!["5 is not of type 'object'"]);
        assert_eq!(failures[0].path.len(), 202);
    }

    #[test]
    fn test_object_keywords() {
        let schema = json!({
            "properties": {"a": {}},
            "additionalProperties": false
        });
        assert_eq!(
            messages(&run(&schema, &json!({"a": 1, "b": 2}))),
            vec!["Additional properties are not allowed ('b' was unexpected)"]
        );
        assert_eq!(
            messages(&run(&schema, &json!({"c": 1, "b": 2}))),
            vec!["Additional properties are not allowed ('c', 'b' were unexpected)"]
        );

        let schema = json!({"additionalProperties": {"type": "string"}});
        let failures = run(&schema, &json!({"k": 1}));
        assert_eq!(failures[0].path, vec![PathSegment::from("k")]);
        assert_eq!(
            failures[0].schema_path,
            vec![PathSegment::from("additionalProperties"), PathSegment::from("type")]
        );

        let schema = json!({"minProperties": 2, "maxProperties": 0});
        assert_eq!(
            messages(&run(&schema, &json!({"a": 1}))),
            vec!["{'a': 1} does not have enough properties", "{'a': 1} has too many properties"]
        );

        let schema = json!({"dependencies": {"bar": ["foo"], "baz": {"required": ["qux"]}}});
        let failures = run(&schema, &json!({"bar": 1, "baz": 2}));
        assert_eq!(
            messages(&failures),
            vec!["'foo' is a required property", "'qux' is a required property"]
        );
        assert_eq!(failures[0].keyword, "dependencies");
        assert_eq!(
            failures[1].schema_path,
            vec![
                PathSegment::from("dependencies"),
                PathSegment::from("baz"),
                PathSegment::from("required")
            ]
        );
    }

    #[test]
    fn test_array_keywords() {
        let schema = json!({"items": [{}], "additionalItems": false});
        assert_eq!(
            messages(&run(&schema, &json!([1, 2, 3]))),
            vec!["Additional items are not allowed (2, 3 were unexpected)"]
        );

        let schema = json!({"minItems": 2, "uniqueItems": true});
        assert_eq!(messages(&run(&schema, &json!([1]))), vec!["[1] is too short"]);
        assert_eq!(
            messages(&run(&schema, &json!([1, 1]))),
            vec!["[1, 1] has non-unique elements"]
        );

        let schema = json!({"items": [{"type": "string"}, {"type": "integer"}]});
        let failures = run(&schema, &json!(["a", "b"]));
        assert_eq!(failures[0].path, vec![PathSegment::Index(1)]);
        assert_eq!(
            failures[0].schema_path,
            vec![
                PathSegment::from("items"),
                PathSegment::Index(1),
                PathSegment::from("type")
            ]
        );
    }

    #[test]
    fn test_string_keywords() {
        let schema = json!({"maxLength": 2, "pattern": "^a"});
        assert!(run(&schema, &json!("ab")).is_empty());
        assert_eq!(
            messages(&run(&schema, &json!("bcd"))),
            vec!["'bcd' is too long", "'bcd' does not match '^a'"]
        );
        assert!(run(&json!({"maxLength": 1}), &json!("é")).is_empty());
    }

    #[test]
    fn test_format_is_annotation_only() {
        assert!(run(&json!({"format": "email"}), &json!("not an email")).is_empty());
    }

    #[test]
    fn test_numeric_keywords() {
        let schema = json!({"minimum": 5, "exclusiveMinimum": true});
        let failures = run(&schema, &json!(5));
        assert_eq!(messages(&failures), vec!["5 is less than or equal to the minimum of 5"]);
        assert_eq!(failures[0].keyword, "minimum");
        assert_eq!(failures[0].schema_path, vec![PathSegment::from("minimum")]);

        let schema = json!({"maximum": 1.5});
        assert_eq!(
            messages(&run(&schema, &json!(2))),
            vec!["2 is greater than the maximum of 1.5"]
        );

        assert_eq!(
            messages(&run(&json!({"multipleOf": 0.5}), &json!(1.25))),
            vec!["1.25 is not a multiple of 0.5"]
        );
        assert!(run(&json!({"multipleOf": 0.5}), &json!(1.5)).is_empty());
        assert_eq!(
            messages(&run(&json!({"multipleOf": 2}), &json!(7))),
            vec!["7 is not a multiple of 2"]
        );
    }

    #[test]
    fn test_enum() {
        let schema = json!({"enum": [1, "a"]});
        assert!(run(&schema, &json!(1)).is_empty());
        assert_eq!(
            messages(&run(&schema, &json!(true))),
            vec!["True is not one of [1, 'a']"]
        );
    }

    #[test]
    fn test_combinators() {
        let schema = json!({"oneOf": [{"type": "integer"}, {"minimum": 0}]});
        assert!(run(&schema, &json!(-3)).is_empty());
        assert_eq!(
            messages(&run(&schema, &json!(3))),
            vec!["3 is valid under more than one of the given schemas"]
        );

        let schema = json!({"not": {"type": "string"}});
        assert_eq!(
            messages(&run(&schema, &json!("x"))),
            vec!["{'type': 'string'} is not allowed for 'x'"]
        );

        let schema = json!({"allOf": [{"type": "string"}, {"minLength": 3}]});
        let failures = run(&schema, &json!("ab"));
        assert_eq!(
            failures[0].schema_path,
            vec![
                PathSegment::from("allOf"),
                PathSegment::Index(1),
                PathSegment::from("minLength")
            ]
        );
    }

    #[test]
    fn test_check_schema() {
        let engine = Draft4Engine::new();

        let valid = json!({
            "id": "/person.json",
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "required": ["name"]
        });
        assert!(engine.check_schema(&valid).unwrap().is_empty());

        let invalid = engine.check_schema(&json!({"type": "objects"})).unwrap();
        assert_eq!(
            messages(&invalid),
            vec!["'objects' is not valid under any of the given schemas"]
        );
        assert_eq!(invalid[0].path, vec![PathSegment::from("type")]);

        let empty_required = engine.check_schema(&json!({"required": []})).unwrap();
        assert_eq!(messages(&empty_required), vec!["[] is too short"]);
    }

    #[test]
    fn test_invalid_inline_schema() {
        let schema = json!({"type": 12});
        assert!(matches!(
            run_with(SchemaStore::default(), &schema, &json!(1)),
            Err(ValidatorError::RegistryError { .. })
        ));
    }

    #[test]
    fn test_schema_segments_skip_reference_hops() {
        let location = Location::new()
            .join("properties")
            .join("items")
            .join("$ref")
            .join("anyOf")
            .join(2usize)
            .join("items")
            .join("type");

        assert_eq!(
            schema_segments(&location),
            vec![
                PathSegment::from("properties"),
                PathSegment::from("items"),
                PathSegment::from("anyOf"),
                PathSegment::Index(2),
                PathSegment::from("items"),
                PathSegment::from("type")
            ]
        );
    }

    #[test]
    fn test_instance_segments_follow_document() {
        let document = json!({"a/b": [{"7": true}]});
        let location = Location::new().join("a/b").join(0usize).join("7");

        assert_eq!(
            instance_segments(&location, &document),
            vec![PathSegment::from("a/b"), PathSegment::Index(0), PathSegment::from("7")]
        );
    }
}
