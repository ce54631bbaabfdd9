//! Rewrites calls of registered setters into assignments.

use super::UseStateContext;
use super::factories::{create_assignment, create_state_target, create_updated_value};
use super::matchers::{MatchOutcome, SetterArgument, classify_setter_argument, match_setter_call};
use tracing::debug;
use usefront_parser::parser::node::NodeKind;
use usefront_parser::syntax::transform_utils::contains_identifier;
use usefront_parser::syntax::{NodeVisitor, VisitResult};
use usefront_parser::{NodeArena, NodeIndex};

/// `setV(x)` becomes `v.value = x` (boxed) or `v = x` (proxied).
/// `setV(p => p + 1)` becomes `v.value = v + 1`: the left operand is
/// replaced by the bare state name even for boxed state.
#[derive(Default)]
pub struct CallSiteRewriter;

impl NodeVisitor<UseStateContext> for CallSiteRewriter {
    fn name(&self) -> &'static str {
        "use-state-call-sites"
    }

    fn visit_call_expression(
        &mut self,
        arena: &mut NodeArena,
        index: NodeIndex,
        ctx: &mut UseStateContext,
    ) -> VisitResult {
        let call = match match_setter_call(arena, index, &ctx.symbols) {
            MatchOutcome::Matched(call) => call,
            MatchOutcome::NotApplicable => return VisitResult::Unchanged,
            MatchOutcome::Malformed(reason) => {
                ctx.report.skip(arena, index, NodeKind::CallExpression, reason);
                return VisitResult::Unchanged;
            }
        };

        let value = match classify_setter_argument(arena, call.argument) {
            MatchOutcome::Matched(SetterArgument::Direct(argument)) => argument,
            MatchOutcome::Matched(SetterArgument::Updater {
                parameter_name,
                operator,
                right,
            }) => {
                if let Some(parameter) = parameter_name.as_deref() {
                    if contains_identifier(arena, right, parameter) {
                        debug!(
                            setter = %call.setter_name,
                            parameter,
                            "updater parameter used on the right-hand side is kept as written"
                        );
                    }
                }
                create_updated_value(arena, &call.info.value_name, operator, right)
            }
            MatchOutcome::NotApplicable => return VisitResult::Unchanged,
            MatchOutcome::Malformed(reason) => {
                ctx.report.skip(arena, index, NodeKind::CallExpression, reason);
                return VisitResult::Unchanged;
            }
        };

        let target = create_state_target(arena, &call.info);
        arena.replace(index, create_assignment(target, value));
        ctx.report.calls_rewritten += 1;
        VisitResult::Replaced
    }
}
