//! Centralized limits for the parser and printer.

/// Maximum nesting depth for recursive-descent parsing.
///
/// Pathological inputs like `((((((...))))))` or `[[[[[...]]]]]` would
/// otherwise overflow the stack. When exceeded the parser reports a
/// "Maximum nesting depth exceeded." diagnostic and gives up.
///
/// Each parenthesized or bracketed level costs two units and roughly ten
/// parser frames, so the limit keeps parsing (and printing the result)
/// well inside a 2 MiB thread stack, the default for spawned and rayon
/// threads, even in unoptimized builds.
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 128;

/// Indentation emitted per nesting level by the printer.
pub const INDENT_WIDTH: usize = 2;
