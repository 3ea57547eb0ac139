use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

use indexmap::{IndexMap, IndexSet};
use parser::types::{
    self, ConstDirective, DirectiveDefinition, DirectiveLocation, EnumType, InputObjectType,
    InterfaceType, ObjectType, OperationType, SchemaDefinition, ServiceDocument, Type,
    TypeDefinition, TypeSystemDefinition, UnionType,
};
use parser::{Pos, Positioned};
use value::{ConstValue, Name};

use crate::scalar::{builtin_scalar_parser, ScalarParser};
use crate::type_ext::TypeExt;
use crate::SchemaError;

#[derive(Debug, Eq, PartialEq)]
pub enum Deprecation {
    NoDeprecated,
    Deprecated { reason: Option<String> },
}

#[derive(Debug, Eq, PartialEq)]
pub struct MetaField {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: IndexMap<Name, MetaInputValue>,
    pub ty: Type,
    pub deprecation: Deprecation,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

#[derive(Debug, Eq, PartialEq)]
pub struct MetaEnumValue {
    pub description: Option<String>,
    pub value: Name,
    pub deprecation: Deprecation,
}

#[derive(Debug, Eq, PartialEq)]
pub struct MetaInputValue {
    pub description: Option<String>,
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<ConstValue>,
}

#[derive(Debug, Eq, PartialEq)]
pub struct MetaType {
    pub description: Option<String>,
    pub name: Name,
    pub kind: TypeKind,

    pub is_introspection: bool,
    pub implements: IndexSet<Name>,
    pub fields: IndexMap<Name, MetaField>,
    pub possible_types: IndexSet<Name>,
    pub enum_values: IndexMap<Name, MetaEnumValue>,
    pub input_fields: IndexMap<Name, MetaInputValue>,
}

impl MetaType {
    fn new(name: Name, kind: TypeKind) -> Self {
        MetaType {
            description: None,
            is_introspection: name.starts_with("__"),
            name,
            kind,
            implements: Default::default(),
            fields: Default::default(),
            possible_types: Default::default(),
            enum_values: Default::default(),
            input_fields: Default::default(),
        }
    }

    #[inline]
    pub fn field_by_name(&self, name: &str) -> Option<&MetaField> {
        self.fields.get(name)
    }

    #[inline]
    pub fn input_field(&self, name: &str) -> Option<&MetaInputValue> {
        self.input_fields.get(name)
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Object | TypeKind::Interface | TypeKind::Union
        )
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Union)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TypeKind::Enum | TypeKind::Scalar)
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Enum | TypeKind::Scalar | TypeKind::InputObject
        )
    }

    /// The concrete object types that satisfy this type.
    pub fn possible_types(&self) -> impl Iterator<Item = &str> {
        let own = (self.kind == TypeKind::Object).then(|| self.name.as_str());
        own.into_iter()
            .chain(self.possible_types.iter().map(|name| name.as_str()))
    }

    #[inline]
    pub fn is_possible_type(&self, type_name: &str) -> bool {
        match self.kind {
            TypeKind::Interface | TypeKind::Union => self.possible_types.contains(type_name),
            TypeKind::Object => self.name == type_name,
            _ => false,
        }
    }

    /// Whether an object could ever be of both this type and `ty`.
    pub fn type_overlap(&self, ty: &MetaType) -> bool {
        if std::ptr::eq(self, ty) || self.name == ty.name {
            return true;
        }

        match (self.is_abstract(), ty.is_abstract()) {
            (true, true) => self
                .possible_types
                .iter()
                .any(|type_name| ty.is_possible_type(type_name)),
            (true, false) => self.is_possible_type(&ty.name),
            (false, true) => ty.is_possible_type(&self.name),
            (false, false) => false,
        }
    }
}

#[derive(Debug)]
pub struct MetaDirective {
    pub name: Name,
    pub description: Option<String>,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: IndexMap<Name, MetaInputValue>,
    pub is_repeatable: bool,
}

/// A schema that validation reads from.
///
/// It is never modified while a document is validated and can be shared between threads.
pub struct Schema {
    query_type: Name,
    mutation_type: Option<Name>,
    subscription_type: Option<Name>,
    types: HashMap<Name, MetaType>,
    directives: HashMap<Name, MetaDirective>,
    scalar_parsers: HashMap<Name, Box<dyn ScalarParser>>,
    typename_field: MetaField,
}

impl Debug for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("query_type", &self.query_type)
            .field("mutation_type", &self.mutation_type)
            .field("subscription_type", &self.subscription_type)
            .field("types", &self.types)
            .field("directives", &self.directives)
            .finish_non_exhaustive()
    }
}

impl Schema {
    pub fn parse(sdl: &str) -> Result<Schema, SchemaError> {
        Self::from_document(parser::parse_schema(sdl)?, sdl)
    }

    fn from_document(document: ServiceDocument, sdl: &str) -> Result<Schema, SchemaError> {
        let mut schema_definition = None;
        let mut types: HashMap<Name, MetaType> = HashMap::new();
        let mut directives = HashMap::new();

        for definition in document.definitions {
            match definition {
                TypeSystemDefinition::Schema(schema) => schema_definition = Some(schema.node),
                TypeSystemDefinition::Type(type_definition) => {
                    let extend = type_definition.node.extend;
                    let meta_type = convert_type_definition(type_definition.node);
                    if extend {
                        if let Some(existing) = types.get_mut(&meta_type.name) {
                            merge_type_extension(existing, meta_type);
                            continue;
                        }
                    }
                    types.insert(meta_type.name.clone(), meta_type);
                }
                TypeSystemDefinition::Directive(directive_definition) => {
                    let directive = convert_directive_definition(directive_definition, sdl);
                    directives.insert(directive.name.clone(), directive);
                }
            }
        }

        let (query_type, mutation_type, subscription_type) = match schema_definition {
            Some(schema_definition) => convert_schema_definition(schema_definition),
            None => (
                Some(Name::new("Query")),
                types.contains_key("Mutation").then(|| Name::new("Mutation")),
                types.contains_key("Subscription").then(|| Name::new("Subscription")),
            ),
        };

        let mut schema = Schema {
            query_type: query_type.unwrap_or_else(|| Name::new("Query")),
            mutation_type,
            subscription_type,
            types,
            directives,
            scalar_parsers: HashMap::new(),
            typename_field: MetaField {
                description: None,
                name: Name::new("__typename"),
                arguments: Default::default(),
                ty: non_null_named("String"),
                deprecation: Deprecation::NoDeprecated,
            },
        };

        for type_name in std::iter::once(&schema.query_type)
            .chain(schema.mutation_type.iter())
            .chain(schema.subscription_type.iter())
        {
            match schema.types.get(type_name) {
                Some(ty) if ty.kind == TypeKind::Object => {}
                Some(_) => {
                    return Err(SchemaError::RootTypeNotObject {
                        type_name: type_name.to_string(),
                    })
                }
                None => {
                    return Err(SchemaError::UnknownRootType {
                        type_name: type_name.to_string(),
                    })
                }
            }
        }

        finish_schema(&mut schema)?;
        Ok(schema)
    }

    /// Registers the converter used to check and coerce literals of a custom scalar.
    pub fn with_scalar_parser(mut self, type_name: &str, parser: impl ScalarParser + 'static) -> Self {
        self.scalar_parsers
            .insert(Name::new(type_name), Box::new(parser));
        self
    }

    #[inline]
    pub fn query_type(&self) -> &str {
        self.query_type.as_str()
    }

    #[inline]
    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_ref().map(|name| name.as_str())
    }

    #[inline]
    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_ref().map(|name| name.as_str())
    }

    /// The root type of an operation kind, if the schema supports that kind.
    pub fn root_type(&self, ty: OperationType) -> Option<&MetaType> {
        let name = match ty {
            OperationType::Query => Some(self.query_type()),
            OperationType::Mutation => self.mutation_type(),
            OperationType::Subscription => self.subscription_type(),
        }?;
        self.types.get(name)
    }

    #[inline]
    pub fn named_type(&self, name: &str) -> Option<&MetaType> {
        self.types.get(name)
    }

    #[inline]
    pub fn concrete_type(&self, ty: &Type) -> Option<&MetaType> {
        self.types.get(ty.concrete_typename())
    }

    #[inline]
    pub fn directive(&self, name: &str) -> Option<&MetaDirective> {
        self.directives.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &MetaType> {
        self.types.values()
    }

    pub fn directives(&self) -> impl Iterator<Item = &MetaDirective> {
        self.directives.values()
    }

    /// The `__typename` meta field, available on every composite type.
    #[inline]
    pub fn typename_field(&self) -> &MetaField {
        &self.typename_field
    }

    /// Checks and coerces a literal of a scalar type.
    ///
    /// Scalars without a converter accept any literal unchanged.
    pub fn parse_scalar_literal(
        &self,
        type_name: &str,
        value: &ConstValue,
    ) -> Result<ConstValue, String> {
        if let Some(parser) = self.scalar_parsers.get(type_name) {
            return parser.parse_literal(value);
        }
        match builtin_scalar_parser(type_name) {
            Some(parse) => parse(value),
            None => Ok(value.clone()),
        }
    }
}

fn non_null_named(name: &str) -> Type {
    Type {
        base: types::BaseType::Named(Name::new(name)),
        nullable: false,
    }
}

fn get_argument_str<'a>(
    arguments: &'a [(Positioned<Name>, Positioned<ConstValue>)],
    name: &str,
) -> Option<&'a str> {
    arguments.iter().find_map(|(arg_name, value)| {
        match (arg_name.node.as_str() == name, &value.node) {
            (true, ConstValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    })
}

fn convert_schema_definition(
    schema_definition: SchemaDefinition,
) -> (Option<Name>, Option<Name>, Option<Name>) {
    (
        schema_definition.query.map(|name| name.node),
        schema_definition.mutation.map(|name| name.node),
        schema_definition.subscription.map(|name| name.node),
    )
}

fn convert_type_definition(definition: TypeDefinition) -> MetaType {
    let mut type_definition = MetaType::new(definition.name.node, TypeKind::Scalar);
    type_definition.description = definition.description.map(|description| description.node);

    match definition.kind {
        types::TypeKind::Scalar => type_definition.kind = TypeKind::Scalar,
        types::TypeKind::Object(ObjectType {
            implements, fields, ..
        }) => {
            type_definition.kind = TypeKind::Object;
            type_definition.implements = implements
                .into_iter()
                .map(|implement| implement.node)
                .collect();
            type_definition
                .fields
                .extend(fields.into_iter().map(|field| {
                    (
                        field.node.name.node.clone(),
                        convert_field_definition(field.node),
                    )
                }));
        }
        types::TypeKind::Interface(InterfaceType {
            implements, fields, ..
        }) => {
            type_definition.kind = TypeKind::Interface;
            type_definition.implements = implements.into_iter().map(|name| name.node).collect();
            type_definition.fields = fields
                .into_iter()
                .map(|field| {
                    (
                        field.node.name.node.clone(),
                        convert_field_definition(field.node),
                    )
                })
                .collect();
        }
        types::TypeKind::Union(UnionType { members, .. }) => {
            type_definition.kind = TypeKind::Union;
            type_definition.possible_types = members.into_iter().map(|name| name.node).collect();
        }
        types::TypeKind::Enum(EnumType { values, .. }) => {
            type_definition.kind = TypeKind::Enum;
            type_definition
                .enum_values
                .extend(values.into_iter().map(|value| {
                    (
                        value.node.value.node.clone(),
                        MetaEnumValue {
                            description: value.node.description.map(|description| description.node),
                            value: value.node.value.node,
                            deprecation: get_deprecated(&value.node.directives),
                        },
                    )
                }));
        }
        types::TypeKind::InputObject(InputObjectType { fields, .. }) => {
            type_definition.kind = TypeKind::InputObject;
            type_definition
                .input_fields
                .extend(fields.into_iter().map(|field| {
                    (
                        field.node.name.node.clone(),
                        convert_input_value_definition(field.node),
                    )
                }));
        }
    }

    type_definition
}

fn merge_type_extension(existing: &mut MetaType, extension: MetaType) {
    existing.implements.extend(extension.implements);
    existing.fields.extend(extension.fields);
    existing.possible_types.extend(extension.possible_types);
    existing.enum_values.extend(extension.enum_values);
    existing.input_fields.extend(extension.input_fields);
}

fn convert_field_definition(definition: types::FieldDefinition) -> MetaField {
    MetaField {
        description: definition.description.map(|description| description.node),
        name: definition.name.node,
        arguments: definition
            .arguments
            .into_iter()
            .map(|arg| {
                (
                    arg.node.name.node.clone(),
                    convert_input_value_definition(arg.node),
                )
            })
            .collect(),
        ty: definition.ty.node,
        deprecation: get_deprecated(&definition.directives),
    }
}

fn convert_input_value_definition(arg: types::InputValueDefinition) -> MetaInputValue {
    MetaInputValue {
        description: arg.description.map(|description| description.node),
        name: arg.name.node,
        ty: arg.ty.node,
        default_value: arg.default_value.map(|default_value| default_value.node),
    }
}

fn convert_directive_definition(
    directive_definition: Positioned<DirectiveDefinition>,
    sdl: &str,
) -> MetaDirective {
    let is_repeatable = directive_is_repeatable(sdl, directive_definition.pos);
    let directive_definition = directive_definition.node;
    MetaDirective {
        name: directive_definition.name.node,
        description: directive_definition
            .description
            .map(|directive_definition| directive_definition.node),
        locations: directive_definition
            .locations
            .into_iter()
            .map(|location| location.node)
            .collect(),
        arguments: directive_definition
            .arguments
            .into_iter()
            .map(|arg| {
                (
                    arg.node.name.node.clone(),
                    convert_input_value_definition(arg.node),
                )
            })
            .collect(),
        is_repeatable,
    }
}

/// Reads the `repeatable` keyword of the directive definition starting at `pos`.
///
/// The parser flags every directive definition as repeatable, so the keyword is looked up in
/// the SDL text: it is the first token after the directive name and its argument list.
fn directive_is_repeatable(sdl: &str, pos: Pos) -> bool {
    let mut tokens = SdlTokens {
        source: sdl,
        offset: byte_offset(sdl, pos),
    }
    .peekable();
    if tokens.by_ref().find(|token| *token == "@").is_none() {
        return false;
    }
    tokens.next();
    if tokens.peek() == Some(&"(") {
        let mut depth = 0usize;
        for token in tokens.by_ref() {
            match token {
                "(" => depth += 1,
                ")" => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }
    tokens.next() == Some("repeatable")
}

fn byte_offset(source: &str, pos: Pos) -> usize {
    let mut offset = 0;
    for (index, line) in source.split_inclusive('\n').enumerate() {
        if index + 1 == pos.line {
            return offset
                + line
                    .char_indices()
                    .nth(pos.column.saturating_sub(1))
                    .map(|(index, _)| index)
                    .unwrap_or(line.len());
        }
        offset += line.len();
    }
    source.len()
}

/// Names and punctuators of SDL text. Strings, comments and ignored characters are skipped.
struct SdlTokens<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Iterator for SdlTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let rest = &self.source[self.offset..];
            let ch = rest.chars().next()?;
            if ch.is_whitespace() || ch == ',' || ch == '\u{feff}' {
                self.offset += ch.len_utf8();
            } else if ch == '#' {
                self.offset += rest.find('\n').unwrap_or(rest.len());
            } else if let Some(body) = rest.strip_prefix(r#"""""#) {
                let mut end = body.len();
                let mut start = 0;
                while let Some(found) = body[start..].find(r#"""""#) {
                    let at = start + found;
                    if body[..at].ends_with('\\') {
                        start = at + 3;
                    } else {
                        end = at + 3;
                        break;
                    }
                }
                self.offset += 3 + end;
            } else if ch == '"' {
                let mut escaped = false;
                let mut len = rest.len();
                for (index, ch) in rest.char_indices().skip(1) {
                    match ch {
                        _ if escaped => escaped = false,
                        '\\' => escaped = true,
                        '"' | '\n' => {
                            len = index + 1;
                            break;
                        }
                        _ => {}
                    }
                }
                self.offset += len;
            } else if ch.is_ascii_alphanumeric() || ch == '_' {
                let len = rest
                    .find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
                    .unwrap_or(rest.len());
                self.offset += len;
                return Some(&rest[..len]);
            } else {
                self.offset += ch.len_utf8();
                return Some(&rest[..ch.len_utf8()]);
            }
        }
    }
}

fn get_deprecated(directives: &[Positioned<ConstDirective>]) -> Deprecation {
    directives
        .iter()
        .find(|directive| directive.node.name.node.as_str() == "deprecated")
        .map(|directive| Deprecation::Deprecated {
            reason: get_argument_str(&directive.node.arguments, "reason")
                .map(|reason| reason.to_string()),
        })
        .unwrap_or(Deprecation::NoDeprecated)
}

fn finish_schema(schema: &mut Schema) -> Result<(), SchemaError> {
    let builtins = include_str!("builtin.graphql");
    for definition in parser::parse_schema(builtins)?.definitions {
        match definition {
            TypeSystemDefinition::Type(type_definition) => {
                let type_definition = convert_type_definition(type_definition.node);
                schema
                    .types
                    .entry(type_definition.name.clone())
                    .or_insert(type_definition);
            }
            TypeSystemDefinition::Directive(directive_definition) => {
                let directive = convert_directive_definition(directive_definition, builtins);
                schema
                    .directives
                    .entry(directive.name.clone())
                    .or_insert(directive);
            }
            TypeSystemDefinition::Schema(_) => {}
        }
    }

    if let Some(query_type) = schema.types.get_mut(&schema.query_type) {
        let name = Name::new("__type");
        query_type.fields.insert(
            name.clone(),
            MetaField {
                description: None,
                name,
                arguments: {
                    let mut arguments = IndexMap::new();
                    let name = Name::new("name");
                    arguments.insert(
                        name.clone(),
                        MetaInputValue {
                            description: None,
                            name,
                            ty: non_null_named("String"),
                            default_value: None,
                        },
                    );
                    arguments
                },
                ty: Type {
                    base: types::BaseType::Named(Name::new("__Type")),
                    nullable: true,
                },
                deprecation: Deprecation::NoDeprecated,
            },
        );

        let name = Name::new("__schema");
        query_type.fields.insert(
            name.clone(),
            MetaField {
                description: None,
                name,
                arguments: Default::default(),
                ty: non_null_named("__Schema"),
                deprecation: Deprecation::NoDeprecated,
            },
        );
    }

    let mut possible_types: HashMap<Name, IndexSet<Name>> = Default::default();
    for ty in schema.types.values() {
        if ty.kind == TypeKind::Object {
            for implement in &ty.implements {
                possible_types
                    .entry(implement.clone())
                    .or_default()
                    .insert(ty.name.clone());
            }
        }
    }
    for (name, types) in possible_types {
        if let Some(ty) = schema.types.get_mut(&name) {
            if ty.kind == TypeKind::Interface {
                ty.possible_types = types;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = r#"
        interface Node { id: ID! }
        type User implements Node { id: ID! name: String friends(first: Int = 10): [User!] }
        type Bot implements Node { id: ID! }
        union Actor = User | Bot
        enum Role { ADMIN USER }
        input Filter { role: Role name: String! }
        scalar DateTime
        type Query { node(id: ID!): Node actors(filter: Filter): [Actor] }
        extend type Query { now: DateTime }
    "#;

    #[test]
    fn resolves_root_types() {
        let schema = Schema::parse(SDL).unwrap();
        assert_eq!(schema.query_type(), "Query");
        assert_eq!(schema.mutation_type(), None);
        assert!(schema.root_type(OperationType::Subscription).is_none());
        let query = schema.root_type(OperationType::Query).unwrap();
        assert!(query.field_by_name("now").is_some());
        assert!(query.field_by_name("__schema").is_some());
        assert!(query.field_by_name("__type").is_some());
    }

    #[test]
    fn computes_possible_types() {
        let schema = Schema::parse(SDL).unwrap();
        let node = schema.named_type("Node").unwrap();
        assert!(node.is_possible_type("User"));
        assert!(node.is_possible_type("Bot"));
        let actor = schema.named_type("Actor").unwrap();
        assert!(actor.type_overlap(node));
        let user = schema.named_type("User").unwrap();
        let bot = schema.named_type("Bot").unwrap();
        assert!(!user.type_overlap(bot));
        assert!(user.type_overlap(node));
        assert_eq!(user.possible_types().collect::<Vec<_>>(), vec!["User"]);
    }

    #[test]
    fn includes_builtins() {
        let schema = Schema::parse(SDL).unwrap();
        for name in ["Int", "Float", "String", "Boolean", "ID", "__Type"] {
            assert!(schema.named_type(name).is_some(), "{} is missing", name);
        }
        assert!(schema.named_type("__Schema").unwrap().is_introspection);
        assert!(!schema.named_type("Int").unwrap().is_introspection);
        let skip = schema.directive("skip").unwrap();
        assert!(skip.locations.contains(&DirectiveLocation::Field));
        assert!(skip.arguments.contains_key("if"));
    }

    #[test]
    fn directive_repeatability() {
        let schema = Schema::parse(
            r#"
            type Query { a: Int }
            "Tagged with a (parenthesised) note, not repeatable here"
            directive @tag(
                "The tag (a name)"
                name: String! = ")"
            ) repeatable on FIELD
            # directive @fake repeatable on FIELD
            directive @once(reason: String = "repeatable") on FIELD
            directive @bare repeatable on FIELD
            """
            Never repeated
            """
            directive @last on FIELD"#,
        )
        .unwrap();
        assert!(!schema.directive("skip").unwrap().is_repeatable);
        assert!(!schema.directive("include").unwrap().is_repeatable);
        assert!(schema.directive("tag").unwrap().is_repeatable);
        assert!(!schema.directive("once").unwrap().is_repeatable);
        assert!(schema.directive("bare").unwrap().is_repeatable);
        assert!(!schema.directive("last").unwrap().is_repeatable);
    }

    #[test]
    fn missing_query_type_is_an_error() {
        let err = Schema::parse("type Foo { a: Int }").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownRootType { type_name } if type_name == "Query"));
    }

    #[test]
    fn scalar_parsers() {
        let schema = Schema::parse(SDL)
            .unwrap()
            .with_scalar_parser("DateTime", |value: &ConstValue| match value {
                ConstValue::String(_) => Ok(value.clone()),
                _ => Err("expected a date string".to_string()),
            });
        assert!(schema
            .parse_scalar_literal("DateTime", &ConstValue::Boolean(true))
            .is_err());
        assert!(schema
            .parse_scalar_literal("Int", &ConstValue::String("1".to_string()))
            .is_err());
        assert_eq!(
            schema.parse_scalar_literal("Unknown", &ConstValue::Boolean(true)),
            Ok(ConstValue::Boolean(true))
        );
    }
}
