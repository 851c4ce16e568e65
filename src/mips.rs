//! Types for representing the emitted MIPS lines and their parts.

use std::fmt;

/// The registers the translator emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    /// Return value and syscall service selector. (`$v0`)
    V0,

    /// First argument register, used as the syscall argument. (`$a0`)
    A0,

    /// Scratch register for moving values between slots. (`$t0`)
    T0,

    /// Stack pointer. Slot offsets are relative to it. (`$sp`)
    Sp,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Register::V0 => write!(f, "$v0"),
            Register::A0 => write!(f, "$a0"),
            Register::T0 => write!(f, "$t0"),
            Register::Sp => write!(f, "$sp"),
        }
    }
}

/// System call services, selected by loading the code into `$v0` before a `syscall`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Service {
    /// Prints the integer in `$a0`.
    PrintInt,

    /// Reads an integer into `$v0`.
    ReadInt,

    /// Prints the character in `$a0`.
    PrintChar,
}

impl Service {
    pub fn code(self) -> i32 {
        match self {
            Service::PrintInt => 1,
            Service::ReadInt => 5,
            Service::PrintChar => 11,
        }
    }
}

/// The kind of a marker line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    UnsupportedDeclaration,
    UnsupportedAssignment,
    UnsupportedScanf,
    UnsupportedPrintf,
    Untranslated,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarkerKind::UnsupportedDeclaration => write!(f, "UNSUPPORTED decl"),
            MarkerKind::UnsupportedAssignment => write!(f, "UNSUPPORTED assign"),
            MarkerKind::UnsupportedScanf => write!(f, "UNSUPPORTED scanf"),
            MarkerKind::UnsupportedPrintf => write!(f, "UNSUPPORTED printf"),
            MarkerKind::Untranslated => write!(f, "UNTRANSLATED"),
        }
    }
}

/// One emitted line of target text.
///
/// Instructions are rendered indented by two spaces, comments and markers start at the first
/// column.
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    /// `li <register>, <value>`
    LoadImmediate { register: Register, value: i32 },

    /// `lw <register>, <offset>($sp)`
    LoadWord { register: Register, offset: i32 },

    /// `sw <register>, <offset>($sp)`
    StoreWord { register: Register, offset: i32 },

    /// `syscall`
    Syscall,

    /// Placeholder for a declared but uninitialized variable: `# alloc <name> at <offset>($sp)`
    Allocation { name: String, offset: i32 },

    /// A non-executable annotation emitted in place of a translation: `# [<kind>] <text>`
    Marker { kind: MarkerKind, text: String },

    /// A line emitted exactly as given.
    Verbatim(String),
}

impl Line {
    /// Loads the code of `service` into `$v0`.
    pub fn select(service: Service) -> Line {
        Line::LoadImmediate {
            register: Register::V0,
            value: service.code(),
        }
    }

    pub fn marker<S: Into<String>>(kind: MarkerKind, text: S) -> Line {
        Line::Marker {
            kind,
            text: text.into(),
        }
    }

    /// Whether the line is an executable instruction rather than a comment.
    pub fn is_instruction(&self) -> bool {
        match self {
            Line::LoadImmediate { .. }
            | Line::LoadWord { .. }
            | Line::StoreWord { .. }
            | Line::Syscall => true,
            Line::Allocation { .. } | Line::Marker { .. } | Line::Verbatim(_) => false,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Line::LoadImmediate { register, value } => write!(f, "  li {}, {}", register, value),
            Line::LoadWord { register, offset } => {
                write!(f, "  lw {}, {}({})", register, offset, Register::Sp)
            }
            Line::StoreWord { register, offset } => {
                write!(f, "  sw {}, {}({})", register, offset, Register::Sp)
            }
            Line::Syscall => write!(f, "  syscall"),
            Line::Allocation { name, offset } => {
                write!(f, "# alloc {} at {}({})", name, offset, Register::Sp)
            }
            Line::Marker { kind, text } => write!(f, "# [{}] {}", kind, text),
            Line::Verbatim(text) => write!(f, "{}", text),
        }
    }
}

/// `scanf("%d", &x)`: read an integer and store it into the slot at `offset`.
pub fn read_int(offset: i32) -> Vec<Line> {
    vec![
        Line::select(Service::ReadInt),
        Line::Syscall,
        Line::StoreWord { register: Register::V0, offset },
    ]
}

/// `printf("%d", x)`: print the integer stored in the slot at `offset`.
pub fn print_int(offset: i32) -> Vec<Line> {
    vec![
        Line::LoadWord { register: Register::A0, offset },
        Line::select(Service::PrintInt),
        Line::Syscall,
    ]
}

/// Prints a newline character. The print-char service reads the character from `$a0` and the
/// service code from `$v0`, so both are loaded before the `syscall` and the idiom takes three
/// lines. `printf("%d\n", x)` therefore emits six lines in total.
pub fn print_newline() -> Vec<Line> {
    vec![
        Line::LoadImmediate { register: Register::A0, value: '\n' as i32 },
        Line::select(Service::PrintChar),
        Line::Syscall,
    ]
}

/// Moves the word in slot `from` into slot `to` through `$t0`.
pub fn copy(from: i32, to: i32) -> Vec<Line> {
    vec![
        Line::LoadWord { register: Register::T0, offset: from },
        Line::StoreWord { register: Register::T0, offset: to },
    ]
}

/// Stores the constant `value` into the slot at `offset` through `$t0`.
pub fn store_immediate(value: i32, offset: i32) -> Vec<Line> {
    vec![
        Line::LoadImmediate { register: Register::T0, value },
        Line::StoreWord { register: Register::T0, offset },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::to_string).collect()
    }

    #[test]
    fn test_display() {
        assert_eq!(Line::LoadImmediate { register: Register::T0, value: -3 }.to_string(), "  li $t0, -3");
        assert_eq!(Line::Allocation { name: "i".into(), offset: -4 }.to_string(), "# alloc i at -4($sp)");
        assert_eq!(
            Line::marker(MarkerKind::UnsupportedAssignment, "    res = res * i;").to_string(),
            "# [UNSUPPORTED assign]     res = res * i;",
        );
    }

    #[test]
    fn test_idioms() {
        assert_eq!(render(&read_int(-12)), vec!["  li $v0, 5", "  syscall", "  sw $v0, -12($sp)"]);
        assert_eq!(render(&print_int(-4)), vec!["  lw $a0, -4($sp)", "  li $v0, 1", "  syscall"]);
        assert_eq!(render(&print_newline()), vec!["  li $a0, 10", "  li $v0, 11", "  syscall"]);
        assert_eq!(render(&copy(-8, -4)), vec!["  lw $t0, -8($sp)", "  sw $t0, -4($sp)"]);
    }

    #[test]
    fn test_is_instruction() {
        assert!(Line::Syscall.is_instruction());
        assert!(!Line::marker(MarkerKind::Untranslated, "}").is_instruction());
    }
}
