//! Rewrites `const [v, setV] = useState(init)` declarators.

use super::UseStateContext;
use super::factories::create_state_declarator;
use super::matchers::{MatchOutcome, classify_initial_value, match_state_declaration};
use super::symbols::StateDeclarationInfo;
use tracing::debug;
use usefront_parser::parser::node::NodeKind;
use usefront_parser::syntax::{NodeVisitor, VisitResult};
use usefront_parser::{NodeArena, NodeIndex};

/// Registers every matched declaration in the symbol table and, when
/// `rewrite` is set, replaces the declarator with `v = ref(init)` or
/// `v = reactive(init)`.
pub struct DeclarationRewriter {
    rewrite: bool,
}

impl DeclarationRewriter {
    pub fn new(rewrite: bool) -> Self {
        DeclarationRewriter { rewrite }
    }
}

impl NodeVisitor<UseStateContext> for DeclarationRewriter {
    fn name(&self) -> &'static str {
        "use-state-declarations"
    }

    fn visit_variable_declaration(
        &mut self,
        arena: &mut NodeArena,
        index: NodeIndex,
        ctx: &mut UseStateContext,
    ) -> VisitResult {
        let matched = match match_state_declaration(arena, index) {
            MatchOutcome::Matched(matched) => matched,
            MatchOutcome::NotApplicable => return VisitResult::Unchanged,
            MatchOutcome::Malformed(reason) => {
                ctx.report.skip(arena, index, NodeKind::VariableDeclaration, reason);
                return VisitResult::Unchanged;
            }
        };

        let kind = classify_initial_value(arena, matched.initializer);
        debug!(
            setter = %matched.setter_name,
            value = %matched.value_name,
            ?kind,
            "registered state declaration"
        );
        ctx.symbols.register(
            &matched.setter_name,
            StateDeclarationInfo {
                kind,
                value_name: matched.value_name.clone(),
            },
        );
        if !self.rewrite {
            return VisitResult::Unchanged;
        }

        let replacement =
            create_state_declarator(arena, &matched.value_name, kind, matched.initializer);
        arena.replace(index, replacement);
        ctx.report.declarations_rewritten += 1;
        VisitResult::Replaced
    }
}
