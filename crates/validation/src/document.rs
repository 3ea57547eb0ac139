use parser::types::{DocumentOperations, ExecutableDocument, FragmentDefinition, OperationDefinition};
use parser::Positioned;
use value::Name;

/// A top-level executable definition.
#[derive(Debug, Clone)]
pub enum Definition {
    Operation(Option<Name>, Positioned<OperationDefinition>),
    Fragment(Name, Positioned<FragmentDefinition>),
}

/// The executable definitions to validate, in document order.
///
/// A document may be assembled from several parsed sources. Definitions keep the order of
/// their sources, then their position inside a source, and names are not required to be
/// unique across sources.
#[derive(Debug, Clone, Default)]
pub struct Document {
    definitions: Vec<Definition>,
}

impl Document {
    pub fn parse(source: &str) -> parser::Result<Document> {
        Ok(parser::parse_query(source)?.into())
    }

    pub fn parse_sources<'s>(sources: impl IntoIterator<Item = &'s str>) -> parser::Result<Document> {
        let mut document = Document::default();
        for source in sources {
            document.add_source(parser::parse_query(source)?);
        }
        Ok(document)
    }

    pub fn add_source(&mut self, document: ExecutableDocument) {
        let mut definitions = Vec::new();
        match document.operations {
            DocumentOperations::Single(operation) => {
                definitions.push(Definition::Operation(None, operation))
            }
            DocumentOperations::Multiple(operations) => definitions.extend(
                operations
                    .into_iter()
                    .map(|(name, operation)| Definition::Operation(Some(name), operation)),
            ),
        }
        definitions.extend(
            document
                .fragments
                .into_iter()
                .map(|(name, fragment)| Definition::Fragment(name, fragment)),
        );
        definitions.sort_by_key(|definition| {
            let pos = match definition {
                Definition::Operation(_, operation) => operation.pos,
                Definition::Fragment(_, fragment) => fragment.pos,
            };
            (pos.line, pos.column)
        });
        self.definitions.extend(definitions);
    }

    #[inline]
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn operations(&self) -> impl Iterator<Item = (Option<&Name>, &Positioned<OperationDefinition>)> {
        self.definitions
            .iter()
            .filter_map(|definition| match definition {
                Definition::Operation(name, operation) => Some((name.as_ref(), operation)),
                Definition::Fragment(..) => None,
            })
    }

    pub fn fragments(&self) -> impl Iterator<Item = (&Name, &Positioned<FragmentDefinition>)> {
        self.definitions
            .iter()
            .filter_map(|definition| match definition {
                Definition::Fragment(name, fragment) => Some((name, fragment)),
                Definition::Operation(..) => None,
            })
    }

    /// The first fragment definition with this name.
    pub fn fragment(&self, name: &str) -> Option<&Positioned<FragmentDefinition>> {
        self.fragments()
            .find(|(fragment_name, _)| fragment_name.as_str() == name)
            .map(|(_, fragment)| fragment)
    }
}

impl From<ExecutableDocument> for Document {
    fn from(document: ExecutableDocument) -> Self {
        let mut doc = Document::default();
        doc.add_source(document);
        doc
    }
}
