use parser::types::Directive;
use parser::Positioned;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::suggestion::make_suggestion;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct KnownDirectives;

impl<'a> Visitor<'a> for KnownDirectives {
    fn enter_directive(&mut self, ctx: &mut VisitorContext<'a>, directive: &'a Positioned<Directive>) {
        let name = directive.node.name.node.as_str();
        if ctx.schema.directive(name).is_some() {
            return;
        }

        let suggestion = make_suggestion(
            " Did you mean",
            ctx.schema
                .directives()
                .map(|directive| format!("@{}", directive.name)),
            &format!("@{}", name),
        );
        ctx.report_error(
            ErrorCode::KnownDirectives,
            vec![directive.pos],
            format!("Unknown directive \"@{}\".{}", name, suggestion.unwrap_or_default()),
        );
    }
}
