use parser::types::FragmentSpread;
use parser::Positioned;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::suggestion::make_suggestion;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct KnownFragmentNames;

impl<'a> Visitor<'a> for KnownFragmentNames {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment_spread: &'a Positioned<FragmentSpread>,
    ) {
        let name = fragment_spread.node.fragment_name.node.as_str();
        if ctx.is_known_fragment(name) {
            return;
        }

        let suggestion = make_suggestion(
            " Did you mean",
            ctx.document.fragments().map(|(name, _)| name.as_str()),
            name,
        );
        ctx.report_error(
            ErrorCode::KnownFragmentNames,
            vec![fragment_spread.pos],
            format!("Unknown fragment \"{}\".{}", name, suggestion.unwrap_or_default()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::validate;
    use crate::Document;

    pub fn factory() -> KnownFragmentNames {
        KnownFragmentNames
    }

    #[test]
    fn known() {
        expect_passes_rule!(
            factory,
            r#"
          {
            human(id: 4) {
              ...HumanFields1
              ... on Human {
                ...HumanFields2
              }
              ... {
                name
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
    fn unknown() {
        let doc = Document::parse(
            r#"
          {
            human(id: 4) {
              ...UnknownFragment1
              ... on Human {
                ...UnknownFragment2
              }
            }
          }
          fragment HumanFields on Human {
            name
            ...UnknownFragment3
          }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        let messages = errors.iter().map(|error| error.message.as_str()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec![
                "Unknown fragment \"UnknownFragment1\".",
                "Unknown fragment \"UnknownFragment2\".",
                "Unknown fragment \"UnknownFragment3\".",
            ]
        );
        assert_eq!(errors[0].code, ErrorCode::KnownFragmentNames);
    }

    #[test]
    fn unknown_with_suggestion() {
        let doc = Document::parse(
            r#"
          {
            human(id: 4) {
              ...HumanFeilds
            }
          }
          fragment HumanFields1 on Human {
            name
          }
          fragment HumanFields2 on Human {
            name
          }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Unknown fragment \"HumanFeilds\". Did you mean \"HumanFields1\" or \"HumanFields2\"?"
        );
    }
}
