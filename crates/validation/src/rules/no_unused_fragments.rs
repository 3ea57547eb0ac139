use std::collections::HashSet;

use crate::context::VisitorContext;
use crate::document::Document;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct NoUnusedFragments;

impl<'a> Visitor<'a> for NoUnusedFragments {
    fn exit_document(&mut self, ctx: &mut VisitorContext<'a>, doc: &'a Document) {
        let mut used = HashSet::new();
        for (_, operation) in doc.operations() {
            for &(name, _) in ctx
                .recursively_referenced_fragments(&operation.node.selection_set)
                .iter()
            {
                used.insert(name.as_str());
            }
        }

        for (name, fragment) in doc.fragments() {
            if !used.contains(name.as_str()) {
                ctx.report_error(
                    ErrorCode::NoUnusedFragments,
                    vec![fragment.pos],
                    format!("Fragment \"{}\" is never used.", name),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::validate;

    pub fn factory() -> NoUnusedFragments {
        NoUnusedFragments
    }

    #[test]
    fn all_fragment_names_are_used() {
        expect_passes_rule!(
            factory,
            r#"
          {
            human(id: 4) {
              ...HumanFields1
              ... on Human {
                ...HumanFields2
              }
            }
          }
          fragment HumanFields1 on Human {
            name
            ...HumanFields3
          }
          fragment HumanFields2 on Human {
            name
          }
          fragment HumanFields3 on Human {
            name
          }
        "#,
        );
    }

    #[test]
    fn all_fragment_names_are_used_by_multiple_operations() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo {
            human(id: 4) {
              ...HumanFields1
            }
          }
          query Bar {
            human(id: 4) {
              ...HumanFields2
            }
          }
          fragment HumanFields1 on Human {
            name
            ...HumanFields3
          }
          fragment HumanFields2 on Human {
            name
          }
          fragment HumanFields3 on Human {
            name
          }
        "#,
        );
    }

    #[test]
    fn contains_unknown_fragments() {
        let doc = Document::parse(
            r#"
          query Foo {
            human(id: 4) {
              ...HumanFields1
            }
          }
          query Bar {
            human(id: 4) {
              ...HumanFields2
            }
          }
          fragment HumanFields1 on Human {
            name
            ...HumanFields3
          }
          fragment HumanFields2 on Human {
            name
          }
          fragment HumanFields3 on Human {
            name
          }
          fragment Unused1 on Human {
            name
          }
          fragment Unused2 on Human {
            name
          }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        let messages = errors.iter().map(|error| error.message.as_str()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec!["Fragment \"Unused1\" is never used.", "Fragment \"Unused2\" is never used."]
        );
        assert!(errors.iter().all(|error| error.code == ErrorCode::NoUnusedFragments));
    }

    #[test]
    fn contains_unknown_fragments_with_ref_cycle() {
        let doc = Document::parse(
            r#"
          query Foo {
            human(id: 4) {
              ...HumanFields1
            }
          }
          fragment HumanFields1 on Human {
            name
            ...HumanFields3
          }
          fragment HumanFields3 on Human {
            name
          }
          fragment Unused1 on Human {
            name
            ...Unused2
          }
          fragment Unused2 on Human {
            name
            ...Unused1
          }
        "#,
        )
        .unwrap();
        assert_eq!(validate(&doc, factory).len(), 2);
    }

    #[test]
    fn contains_unknown_and_undefined_fragments() {
        expect_fails_rule!(
            factory,
            r#"
          query Foo {
            human(id: 4) {
              ...bar
            }
          }
          fragment foo on Human {
            name
          }
        "#,
        );
    }
}
