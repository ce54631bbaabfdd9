//! React `useState` to Vue `ref`/`reactive`.
//!
//! ```javascript
//! const [count, setCount] = useState(0);
//! const [form, setForm] = useState({name: ""});
//! setCount(count + 1);
//! setCount(c => c + 1);
//! setForm({name: "x"});
//! ```
//!
//! Becomes:
//!
//! ```javascript
//! const count = ref(0);
//! const form = reactive({name: ""});
//! count.value = count + 1;
//! count.value = count + 1;
//! form = {name: "x"};
//! ```
//!
//! Primitive literal initial values get `ref`, anything else `reactive`.
//! Declarations must textually precede the setter calls they govern: both
//! rewriters run in one pre-order traversal and calls are matched against
//! the setters registered so far.

pub mod call_sites;
pub mod declarations;
pub mod factories;
pub mod matchers;
pub mod symbols;

pub use call_sites::CallSiteRewriter;
pub use declarations::DeclarationRewriter;
pub use matchers::{MatchOutcome, MismatchReason};
pub use symbols::{StateDeclarationInfo, StateKind, StateSymbolTable};

use bitflags::bitflags;
use tracing::debug;
use usefront_parser::parser::node::NodeKind;
use usefront_parser::syntax::{NodeVisitor, traverse};
use usefront_parser::{NodeArena, NodeIndex};

bitflags! {
    /// Rewriters enabled for a run.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct VisitorSet: u8 {
        /// Replace matched declarations with `ref`/`reactive`.
        const DECLARATIONS = 1 << 0;
        /// Replace setter calls with assignments.
        const CALL_SITES = 1 << 1;
    }
}

impl Default for VisitorSet {
    fn default() -> Self {
        VisitorSet::all()
    }
}

impl VisitorSet {
    /// Parse a single visitor name: `declarations`, `call-sites` or
    /// `callSites`.
    pub fn from_visitor_name(name: &str) -> Option<VisitorSet> {
        match name {
            "declarations" => Some(VisitorSet::DECLARATIONS),
            "call-sites" | "callSites" => Some(VisitorSet::CALL_SITES),
            _ => None,
        }
    }
}

/// A node that looked like the idiom but was left unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedNode {
    pub node: NodeIndex,
    pub kind: NodeKind,
    /// Source offset of the node
    pub pos: u32,
    pub reason: MismatchReason,
}

#[derive(Clone, Debug, Default)]
pub struct RewriteReport {
    pub skipped: Vec<SkippedNode>,
    pub declarations_rewritten: usize,
    pub calls_rewritten: usize,
}

impl RewriteReport {
    pub(crate) fn skip(
        &mut self,
        arena: &NodeArena,
        node: NodeIndex,
        kind: NodeKind,
        reason: MismatchReason,
    ) {
        let pos = arena.range(node).pos;
        debug!(node = node.0, pos, ?kind, %reason, "useState idiom skipped");
        self.skipped.push(SkippedNode {
            node,
            kind,
            pos,
            reason,
        });
    }

    pub fn is_unchanged(&self) -> bool {
        self.declarations_rewritten == 0 && self.calls_rewritten == 0
    }
}

/// Per-run state shared by the rewriters.
#[derive(Debug, Default)]
pub struct UseStateContext {
    pub symbols: StateSymbolTable,
    pub report: RewriteReport,
}

impl UseStateContext {
    pub fn new() -> Self {
        UseStateContext::default()
    }
}

/// Rewrite every useState declaration under `root` and the setter calls
/// that follow it.
///
/// Declarations are always registered, even when only `CALL_SITES` is
/// enabled, so calls can be rewritten against untouched declarations.
pub fn run_use_state_transform(
    arena: &mut NodeArena,
    root: NodeIndex,
    visitors: VisitorSet,
) -> UseStateContext {
    let mut ctx = UseStateContext::new();
    if visitors.is_empty() {
        return ctx;
    }

    let mut declarations = DeclarationRewriter::new(visitors.contains(VisitorSet::DECLARATIONS));
    let mut call_sites = CallSiteRewriter;
    let mut active: Vec<&mut dyn NodeVisitor<UseStateContext>> = vec![&mut declarations];
    if visitors.contains(VisitorSet::CALL_SITES) {
        active.push(&mut call_sites);
    }
    traverse(arena, root, &mut active, &mut ctx);

    debug!(
        declarations = ctx.report.declarations_rewritten,
        calls = ctx.report.calls_rewritten,
        skipped = ctx.report.skipped.len(),
        setters = ctx.symbols.len(),
        "useState transform finished"
    );
    ctx
}

#[cfg(test)]
#[path = "tests/use_state_rewriters.rs"]
mod tests;
