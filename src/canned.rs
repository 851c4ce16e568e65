//! A fixed lookup of canned translations for one example program.
//!
//! This is the simplified alternative to the [rule based translator](crate::translator). It does
//! not allocate slots or match any rules: a source line that contains one of the four lines of
//! [EXAMPLE] gets a hand-written MIPS snippet and a note, every other line is left out.

use crate::frame::SlotTable;
use crate::mips::Line;
use crate::statement::Rule;
use crate::translator::{Outcome, Recorder, Translation};

/// The program the canned snippets were written for.
pub const EXAMPLE: &str = "int main() {
    int a = 5, b = 3;
    int c = a + b;
    return c;
}";

/// Lines of [EXAMPLE] that have an explanation, checked in order.
const EXPLANATIONS: &[(&str, &str)] = &[
    ("int main()", "The program entry point → becomes main label in MIPS."),
    ("int a = 5, b = 3;", "Variable declarations → stored in registers or memory."),
    ("int c = a + b;", "Addition → translates to add instruction in MIPS."),
    ("return c;", "Return → move result into $v0 and exit."),
];

/// Snippets emitted for the explained lines, checked in order.
const SNIPPETS: &[(&str, &str)] = &[
    ("int a = 5", "li $t0, 5   # load immediate 5 into $t0"),
    ("b = 3", "li $t1, 3   # load immediate 3 into $t1"),
    ("c = a + b", "add $t2, $t0, $t1   # c = a+b"),
    ("return c", "move $v0, $t2   # return c"),
    ("main", "main:   # program entry"),
];

const UNRECOGNIZED: &str = "# [Unrecognized line]";

fn lookup<'t>(table: &'t [(&str, &'t str)], line: &str) -> Option<&'t str> {
    table.iter()
        .find(|(pattern, _)| line.contains(pattern))
        .map(|(_, value)| *value)
}

/// Translates `source` with the canned lookup.
pub fn translate(source: &str) -> Translation {
    let mut recorder = Recorder::default();
    let mut source_lines = 0;

    for (index, raw) in source.lines().enumerate() {
        source_lines += 1;

        let note = match lookup(EXPLANATIONS, raw) {
            Some(note) => note,
            None => continue,
        };

        let (outcome, snippet) = match lookup(SNIPPETS, raw) {
            Some(snippet) => (Outcome::Translated, snippet),
            None => (Outcome::Unsupported, UNRECOGNIZED),
        };

        recorder.record(
            index + 1,
            raw,
            Rule::Canned,
            outcome,
            note.to_string(),
            vec![Line::Verbatim(snippet.to_string())],
        );
    }

    recorder.finish(source_lines, SlotTable::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example() {
        let translation = translate(EXAMPLE);

        assert_eq!(translation.text(), [
            "main:   # program entry",
            "li $t0, 5   # load immediate 5 into $t0",
            "add $t2, $t0, $t1   # c = a+b",
            "move $v0, $t2   # return c",
        ].join("\n"));

        assert_eq!(translation.steps.len(), 4);
        assert_eq!(translation.steps[3].explanation.note, "Return → move result into $v0 and exit.");
        assert_eq!(translation.steps[3].explanation.line, 4);
        assert!(translation.slots.is_empty());
        assert_eq!(translation.summary.source_lines, 5);
    }

    #[test]
    fn test_other_lines_are_left_out() {
        let translation = translate("int x = 1;\nreturn x;");

        assert!(translation.lines.is_empty());
        assert!(translation.steps.is_empty());
    }

    #[test]
    fn test_lookup_order() {
        assert_eq!(lookup(SNIPPETS, "  int a = 5, b = 3;"), Some("li $t0, 5   # load immediate 5 into $t0"));
        assert_eq!(lookup(SNIPPETS, "b = 3;"), Some("li $t1, 3   # load immediate 3 into $t1"));
        assert_eq!(lookup(SNIPPETS, "x = 1;"), None);
    }
}
