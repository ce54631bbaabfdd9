//! Setter-name registry filled by the declaration rewriter.

use rustc_hash::FxHashMap;
use tracing::debug;

/// Target representation of a rewritten state variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// `ref(...)`, read and written through `.value`
    Boxed,
    /// `reactive(...)`, assigned directly
    Proxied,
}

impl StateKind {
    /// Name of the factory the declaration is rewritten to call.
    pub fn factory_name(self) -> &'static str {
        match self {
            StateKind::Boxed => "ref",
            StateKind::Proxied => "reactive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDeclarationInfo {
    pub kind: StateKind,
    pub value_name: String,
}

/// Setter name to declaration metadata for one transform invocation.
///
/// Scopes are not tracked: a later declaration with the same setter name
/// replaces the earlier entry.
#[derive(Debug, Default)]
pub struct StateSymbolTable {
    entries: FxHashMap<String, StateDeclarationInfo>,
}

impl StateSymbolTable {
    pub fn new() -> Self {
        StateSymbolTable::default()
    }

    pub fn register(&mut self, setter_name: &str, info: StateDeclarationInfo) {
        if let Some(previous) = self.entries.insert(setter_name.to_string(), info) {
            debug!(
                setter = setter_name,
                previous = %previous.value_name,
                "setter re-declared, later declaration wins"
            );
        }
    }

    pub fn lookup(&self, setter_name: &str) -> Option<&StateDeclarationInfo> {
        self.entries.get(setter_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered setters, sorted by name.
    pub fn setters(&self) -> Vec<(&str, &StateDeclarationInfo)> {
        let mut setters: Vec<_> = self
            .entries
            .iter()
            .map(|(name, info)| (name.as_str(), info))
            .collect();
        setters.sort_by(|a, b| a.0.cmp(b.0));
        setters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(kind: StateKind, value_name: &str) -> StateDeclarationInfo {
        StateDeclarationInfo {
            kind,
            value_name: value_name.to_string(),
        }
    }

    #[test]
    fn later_registration_wins() {
        let mut table = StateSymbolTable::new();
        table.register("setCount", info(StateKind::Boxed, "count"));
        table.register("setCount", info(StateKind::Proxied, "count"));
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup("setCount").map(|info| info.kind),
            Some(StateKind::Proxied)
        );
    }

    #[test]
    fn unknown_setter_is_absent() {
        let table = StateSymbolTable::new();
        assert!(table.is_empty());
        assert!(table.lookup("setCount").is_none());
    }

    #[test]
    fn setters_are_sorted() {
        let mut table = StateSymbolTable::new();
        table.register("setB", info(StateKind::Boxed, "b"));
        table.register("setA", info(StateKind::Proxied, "a"));
        let names: Vec<&str> = table.setters().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["setA", "setB"]);
    }
}
