//! Translation from C source text into MIPS lines.
//!
//! The translator works one line at a time. Every line that is not blank, a comment or a
//! preprocessor directive is one processing step: it is [classified](Statement::classify), the
//! handler for its rule emits zero or more [lines](Line), and exactly one [Explanation] is
//! recorded for it. Lines that do not fit a supported pattern produce a marker line instead of
//! failing, so a translation always succeeds.

use std::fmt;
use std::ops::Range;

use itertools::Itertools;
use slog::{debug, o, trace, Discard, Logger};

use crate::frame::SlotTable;
use crate::hint;
use crate::mips::{self, Line, MarkerKind, Register};
use crate::source_map::SourceMap;
use crate::statement::{CallError, Declarator, Operand, PrintCall, Rule, Statement};
use crate::token::SourceLine;

/// Example program showing what the translator does and does not handle.
pub const EXAMPLE: &str = r#"// Example: compute factorial
#include <stdio.h>

int factorial(int n) {
  int i, res = 1;
  for (i = 2; i <= n; i++) {
    res = res * i;
  }
  return res;
}

int main() {
  int x;
  scanf("%d", &x);
  printf("%d\n", factorial(x));
  return 0;
}"#;

/// Identifier of an explanation, unique within one translation. Displayed as `id1`, `id2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExplanationId(usize);

impl ExplanationId {
    /// The 1-based position of the step this identifier was given to.
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ExplanationId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "id{}", self.0)
    }
}

/// Human readable note about one processing step.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub id: ExplanationId,
    pub note: String,
    /// The source line verbatim.
    pub source: String,
    /// 1-based line number of the source line.
    pub line: usize,
}

/// How well a step could be translated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The line was translated into instructions.
    Translated,
    /// The line matched a rule but some part of it is not supported. A marker was emitted.
    Unsupported,
    /// No rule matched the line.
    Untranslated,
}

/// One processing step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub explanation: Explanation,
    pub rule: Rule,
    pub outcome: Outcome,
    /// Indices of the lines in [Translation::lines] this step emitted. May be empty.
    pub output: Range<usize>,
}

/// Counts describing a finished translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of lines in the input, including skipped ones. Lines are counted like
    /// [str::lines] does, so a trailing newline does not start another line.
    pub source_lines: usize,
    pub steps: usize,
    pub emitted: usize,
    /// Emitted lines that are executable instructions, not comments or markers.
    pub instructions: usize,
    pub unsupported: usize,
    pub untranslated: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Translated {} lines", self.source_lines)
    }
}

/// Result of translating a program.
#[derive(Debug, Clone)]
pub struct Translation {
    pub lines: Vec<Line>,
    pub steps: Vec<Step>,
    /// The slots allocated during the translation.
    pub slots: SlotTable,
    pub summary: Summary,
}

impl Translation {
    /// The emitted target text, one line per emitted line.
    pub fn text(&self) -> String {
        self.lines.iter().join("\n")
    }

    pub fn explanations(&self) -> impl Iterator<Item = &Explanation> {
        self.steps.iter().map(|step| &step.explanation)
    }

    /// The lines emitted by `step`.
    pub fn output_of(&self, step: &Step) -> &[Line] {
        &self.lines[step.output.clone()]
    }

    /// Maps every emitted line to the index of the step that emitted it.
    pub fn source_map(&self) -> SourceMap<usize> {
        self.steps.iter()
            .enumerate()
            .flat_map(|(index, step)| step.output.clone().map(move |line| (line, index)))
            .collect()
    }

    /// Returns the explanation of the step that emitted the line with index `line`.
    pub fn explanation_for_line(&self, line: usize) -> Option<&Explanation> {
        self.steps.iter()
            .find(|step| step.output.contains(&line))
            .map(|step| &step.explanation)
    }

    /// The target text with every step preceded by its explanation.
    pub fn annotated(&self) -> Annotated {
        Annotated(self)
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lines.iter().format("\n"))
    }
}

/// Display adapter returned by [Translation::annotated].
pub struct Annotated<'t>(&'t Translation);

impl<'t> fmt::Display for Annotated<'t> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let translation = self.0;

        for step in &translation.steps {
            let explanation = &step.explanation;

            writeln!(f, "# {} (line {}): {}", explanation.id, explanation.line, explanation.note)?;
            writeln!(f, "#   {}", explanation.source.trim())?;

            for line in translation.output_of(step) {
                writeln!(f, "{}", line)?;
            }
        }

        Ok(())
    }
}

/// Collects the steps and lines of a translation run.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    lines: Vec<Line>,
    steps: Vec<Step>,
}

impl Recorder {
    pub(crate) fn record(
        &mut self,
        line: usize,
        source: &str,
        rule: Rule,
        outcome: Outcome,
        note: String,
        lines: Vec<Line>,
    ) -> &Step {
        let start = self.lines.len();
        self.lines.extend(lines);

        let explanation = Explanation {
            id: ExplanationId(self.steps.len() + 1),
            note,
            source: source.to_string(),
            line,
        };

        self.steps.push(Step {
            explanation,
            rule,
            outcome,
            output: start..self.lines.len(),
        });

        &self.steps[self.steps.len() - 1]
    }

    pub(crate) fn finish(self, source_lines: usize, slots: SlotTable) -> Translation {
        let count = |outcome: Outcome| self.steps.iter().filter(|step| step.outcome == outcome).count();

        let summary = Summary {
            source_lines,
            steps: self.steps.len(),
            emitted: self.lines.len(),
            instructions: self.lines.iter().filter(|line| line.is_instruction()).count(),
            unsupported: count(Outcome::Unsupported),
            untranslated: count(Outcome::Untranslated),
        };

        Translation {
            lines: self.lines,
            steps: self.steps,
            slots,
            summary,
        }
    }
}

type Emitted = (Outcome, String, Vec<Line>);

/// State of a single translation run.
struct Translator {
    slots: SlotTable,
    recorder: Recorder,
    logger: Logger,
}

impl Translator {
    fn slot(&mut self, name: &str) -> i32 {
        let fresh = !self.slots.contains(name);
        let offset = self.slots.allocate(name);

        if fresh {
            trace!(self.logger, "allocate slot"; "name" => name, "offset" => offset);
        }

        offset
    }

    fn step(&mut self, number: usize, line: &SourceLine) {
        let statement = Statement::classify(line);
        let rule = statement.rule();

        let log = self.logger.new(o!("line" => number));
        trace!(log, "classify line"; "rule" => ?rule);

        let (outcome, note, lines) = match statement {
            Statement::Declaration(declarators) => self.declaration(declarators),
            Statement::Assignment { target, value } => self.assignment(line, target, value),
            Statement::Return(value) => self.return_statement(value),
            Statement::Scanf(call) => self.scanf(&log, line, call),
            Statement::Printf(call) => self.printf(&log, line, call),
            Statement::Untranslated => self.untranslated(line),
        };

        let step = self.recorder.record(number, line.raw, rule, outcome, note, lines);

        trace!(log, "record step";
            "id" => %step.explanation.id,
            "outcome" => ?step.outcome,
            "emitted" => step.output.len());
    }

    fn declaration(&mut self, declarators: Vec<Declarator>) -> Emitted {
        let mut outcome = Outcome::Translated;
        let mut notes = Vec::new();
        let mut lines = Vec::new();

        for declarator in declarators {
            match declarator {
                Declarator::Bare(name) => {
                    let offset = self.slot(name);
                    lines.push(Line::Allocation { name: name.to_string(), offset });
                    notes.push(format!("Declare {}", name));
                }
                Declarator::Initialized { name, value: Operand::Literal(value) } => {
                    let offset = self.slot(name);
                    lines.extend(mips::store_immediate(value, offset));
                    notes.push(format!("Declare {} init {}", name, value));
                }
                Declarator::Initialized { name, value: Operand::Variable(source) } => {
                    let to = self.slot(name);
                    let from = self.slot(source);
                    lines.extend(mips::copy(from, to));
                    notes.push(format!("Declare {} init from {}", name, source));
                }
                Declarator::Initialized { name, value: Operand::Expression(expression) } => {
                    self.slot(name);
                    lines.push(Line::marker(
                        MarkerKind::UnsupportedDeclaration,
                        format!("{} = {}", name, expression),
                    ));
                    notes.push(format!("Declare {}, initializer {} not supported", name, expression));
                    outcome = Outcome::Unsupported;
                }
                Declarator::Malformed(text) => {
                    lines.push(Line::marker(MarkerKind::UnsupportedDeclaration, text));
                    notes.push(format!("Declaration {} not supported", text));
                    outcome = Outcome::Unsupported;
                }
            }
        }

        (outcome, notes.join("; "), lines)
    }

    fn assignment(&mut self, line: &SourceLine, target: &str, value: Operand) -> Emitted {
        match value {
            Operand::Literal(value) => {
                let offset = self.slot(target);
                let note = format!("Assign {} to {}", value, target);
                (Outcome::Translated, note, mips::store_immediate(value, offset))
            }
            Operand::Variable(source) => {
                let to = self.slot(target);
                let from = self.slot(source);
                let note = format!("Copy {} -> {}", source, target);
                (Outcome::Translated, note, mips::copy(from, to))
            }
            Operand::Expression(_) => {
                let marker = Line::marker(MarkerKind::UnsupportedAssignment, line.raw);
                (Outcome::Unsupported, "Complex assign not supported".into(), vec![marker])
            }
        }
    }

    fn return_statement(&mut self, value: Operand) -> Emitted {
        match value {
            Operand::Literal(value) => {
                let line = Line::LoadImmediate { register: Register::V0, value };
                (Outcome::Translated, format!("Return {}", value), vec![line])
            }
            // Anything else is taken to name the slot holding the value.
            Operand::Variable(name) | Operand::Expression(name) => {
                let offset = self.slot(name);
                let line = Line::LoadWord { register: Register::V0, offset };
                (Outcome::Translated, format!("Return {} via $v0", name), vec![line])
            }
        }
    }

    fn scanf(&mut self, log: &Logger, line: &SourceLine, call: Result<&str, CallError>) -> Emitted {
        match call {
            Ok(variable) => {
                let offset = self.slot(variable);
                let note = format!("scanf -> read int to {}", variable);
                (Outcome::Translated, note, mips::read_int(offset))
            }
            Err(reason) => {
                debug!(log, "unsupported scanf"; "reason" => %reason);
                let marker = Line::marker(MarkerKind::UnsupportedScanf, line.raw);
                (Outcome::Unsupported, "Unsupported scanf pattern".into(), vec![marker])
            }
        }
    }

    fn printf(&mut self, log: &Logger, line: &SourceLine, call: Result<PrintCall, CallError>) -> Emitted {
        match call {
            Ok(PrintCall { variable, newline }) => {
                let offset = self.slot(variable);
                let mut lines = mips::print_int(offset);

                if newline {
                    lines.extend(mips::print_newline());
                }

                let note = format!("printf int -> print syscall for {}", variable);
                (Outcome::Translated, note, lines)
            }
            Err(reason) => {
                debug!(log, "unsupported printf"; "reason" => %reason);
                let marker = Line::marker(MarkerKind::UnsupportedPrintf, line.raw);
                (Outcome::Unsupported, "Unsupported printf".into(), vec![marker])
            }
        }
    }

    fn untranslated(&mut self, line: &SourceLine) -> Emitted {
        let note = match hint::suggest(line) {
            Some(word) => format!("Could not translate (did you mean `{}`?)", word),
            None => "Could not translate".to_string(),
        };

        let marker = Line::marker(MarkerKind::Untranslated, line.raw);
        (Outcome::Untranslated, note, vec![marker])
    }
}

/// Translates the given C source into MIPS lines.
/// Every call starts from an empty slot table, so the result only depends on `source`.
pub fn translate(source: &str) -> Translation {
    translate_with_logger(source, None)
}

pub fn translate_with_logger<L>(source: &str, logger: L) -> Translation
where
    L: Into<Option<Logger>>,
{
    let logger = logger
        .into()
        .unwrap_or(Logger::root(Discard, o!()))
        .new(o!("stage" => "translation"));

    let mut translator = Translator {
        slots: SlotTable::new(),
        recorder: Recorder::default(),
        logger,
    };

    let mut source_lines = 0;

    for (index, raw) in source.lines().enumerate() {
        source_lines += 1;

        match SourceLine::lex(raw) {
            Some(line) => translator.step(index + 1, &line),
            None => {
                trace!(translator.logger, "skip line"; "line" => index + 1);
            }
        }
    }

    let translation = translator.recorder.finish(source_lines, translator.slots);

    debug!(translator.logger, "translation finished";
        "steps" => translation.summary.steps,
        "emitted" => translation.summary.emitted,
        "instructions" => translation.summary.instructions,
        "unsupported" => translation.summary.unsupported,
        "untranslated" => translation.summary.untranslated);

    translation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(source: &str) -> Vec<String> {
        translate(source).lines.iter().map(Line::to_string).collect()
    }

    #[test]
    fn test_declaration_offsets() {
        let translation = translate("int a = 5, b = 3;");

        assert_eq!(translation.slots.get("a"), Some(-4));
        assert_eq!(translation.slots.get("b"), Some(-8));
        assert_eq!(translation.text(), "  li $t0, 5\n  sw $t0, -4($sp)\n  li $t0, 3\n  sw $t0, -8($sp)");

        assert_eq!(translation.steps.len(), 1);
        assert_eq!(translation.steps[0].explanation.note, "Declare a init 5; Declare b init 3");
        assert_eq!(translation.steps[0].output, 0..4);
    }

    #[test]
    fn test_bare_declaration() {
        assert_eq!(text_of("int i, res = 1;"), vec![
            "# alloc i at -4($sp)",
            "  li $t0, 1",
            "  sw $t0, -8($sp)",
        ]);
    }

    #[test]
    fn test_unsupported_initializer() {
        let translation = translate("int c = a + b;");

        assert_eq!(translation.text(), "# [UNSUPPORTED decl] c = a + b");
        assert_eq!(translation.slots.get("c"), Some(-4));
        assert_eq!(translation.steps[0].outcome, Outcome::Unsupported);
    }

    #[test]
    fn test_empty_declarator() {
        let translation = translate("int a, ;");

        assert_eq!(translation.text(), "# alloc a at -4($sp)");
        assert_eq!(translation.steps[0].explanation.note, "Declare a");
        assert_eq!(translation.steps[0].outcome, Outcome::Translated);
    }

    #[test]
    fn test_assignment_reuses_slot() {
        let translation = translate("int a;\na = 5;");

        assert_eq!(translation.slots.len(), 1);
        assert_eq!(translation.text(), "# alloc a at -4($sp)\n  li $t0, 5\n  sw $t0, -4($sp)");
        assert_eq!(translation.steps[1].explanation.note, "Assign 5 to a");
    }

    #[test]
    fn test_copy() {
        let translation = translate("int a = 1, b;\nb = a;");

        assert_eq!(translation.output_of(&translation.steps[1]).iter().join("\n"),
            "  lw $t0, -4($sp)\n  sw $t0, -8($sp)");
        assert_eq!(translation.steps[1].explanation.note, "Copy a -> b");
    }

    #[test]
    fn test_complex_assignment() {
        let translation = translate("    res = res * i;");

        assert_eq!(translation.text(), "# [UNSUPPORTED assign]     res = res * i;");
        assert_eq!(translation.steps[0].explanation.note, "Complex assign not supported");
        assert!(translation.slots.is_empty());
    }

    #[test]
    fn test_return() {
        assert_eq!(text_of("return 7;"), vec!["  li $v0, 7"]);
        assert_eq!(text_of("int x;\nreturn x;"), vec!["# alloc x at -4($sp)", "  lw $v0, -4($sp)"]);
    }

    #[test]
    fn test_scanf() {
        assert_eq!(text_of(r#"scanf("%d", &x);"#), vec![
            "  li $v0, 5",
            "  syscall",
            "  sw $v0, -4($sp)",
        ]);

        assert_eq!(text_of(r#"scanf("%d", x);"#), vec![r#"# [UNSUPPORTED scanf] scanf("%d", x);"#]);
        assert_eq!(text_of(r#"scanf("%s", &x);"#), vec![r#"# [UNSUPPORTED scanf] scanf("%s", &x);"#]);
    }

    #[test]
    fn test_printf() {
        let with_newline = translate("int x = 3;\nprintf(\"%d\\n\", x);");
        let step = &with_newline.steps[1];

        assert_eq!(with_newline.output_of(step).len(), 6);
        assert_eq!(with_newline.output_of(step)[3].to_string(), "  li $a0, 10");

        let without_newline = translate("int x = 3;\nprintf(\"%d\", x);");
        assert_eq!(without_newline.output_of(&without_newline.steps[1]).len(), 3);

        assert_eq!(text_of(r#"printf("hello\n");"#), vec![r#"# [UNSUPPORTED printf] printf("hello\n");"#]);
    }

    #[test]
    fn test_untranslated() {
        let translation = translate("  for (i = 2; i <= n; i++) {");

        assert_eq!(translation.text(), "# [UNTRANSLATED]   for (i = 2; i <= n; i++) {");
        assert_eq!(translation.steps.len(), 1);
        assert_eq!(translation.steps[0].explanation.source, "  for (i = 2; i <= n; i++) {");
        assert_eq!(translation.steps[0].explanation.note, "Could not translate");
        assert_eq!(translation.steps[0].outcome, Outcome::Untranslated);
    }

    #[test]
    fn test_untranslated_hint() {
        let translation = translate(r#"prinft("%d", x);"#);

        assert_eq!(translation.steps[0].explanation.note, "Could not translate (did you mean `printf`?)");
    }

    #[test]
    fn test_skipped_lines_have_no_step() {
        let translation = translate("#include <stdio.h>\n\n// comment\nreturn 0; // done\n");

        assert_eq!(translation.steps.len(), 1);
        assert_eq!(translation.steps[0].explanation.line, 4);
        assert_eq!(translation.steps[0].explanation.id.to_string(), "id1");
        assert_eq!(translation.summary.source_lines, 4);
        assert_eq!(translation.summary.to_string(), "Translated 4 lines");
    }

    #[test]
    fn test_block_comments() {
        assert_eq!(text_of("return 0; /* done */"), vec!["  li $v0, 0"]);
        assert_eq!(text_of("int x; /* note */"), vec!["# alloc x at -4($sp)"]);
        assert_eq!(text_of("x = /* five */ 5;"), vec!["  li $t0, 5", "  sw $t0, -4($sp)"]);

        let translation = translate("/* block */\n  /* indented */");
        assert!(translation.steps.is_empty());
        assert_eq!(translation.summary.source_lines, 2);
    }

    #[test]
    fn test_trailing_newline_is_not_a_line() {
        assert_eq!(translate("return 0;\n").summary.source_lines, 1);
        assert_eq!(translate("return 0;\n\n").summary.source_lines, 2);
    }

    #[test]
    fn test_source_map() {
        let translation = translate("int x;\nscanf(\"%d\", &x);\nreturn x;");
        let map = translation.source_map();

        assert_eq!(map.len(), translation.lines.len());
        assert_eq!(map.get(0), Some(&0));
        assert_eq!(map.get(2), Some(&1));
        assert_eq!(map.get(4), Some(&2));

        let explanation = translation.explanation_for_line(3).unwrap();
        assert_eq!(explanation.note, "scanf -> read int to x");
        assert_eq!(explanation.id.to_string(), "id2");
    }

    #[test]
    fn test_annotated() {
        let translation = translate("  return 0;");

        assert_eq!(
            translation.annotated().to_string(),
            "# id1 (line 1): Return 0\n#   return 0;\n  li $v0, 0\n",
        );
    }

    #[test]
    fn test_display_matches_text() {
        let translation = translate(EXAMPLE);

        assert_eq!(translation.to_string(), translation.text());
    }
}
