//! A crate for translating a small subset of C into illustrative MIPS assembly, for teaching.
//!
//! The translator is a heuristic: it looks at one source line at a time and matches it against a
//! handful of patterns. It is not a compiler. There is no grammar, no type checking and no
//! register allocation; every variable lives in a stack slot and control flow is not
//! understood at all.
//!
//! Supported lines:
//! - Declarations: `int a, b = 5;`
//! - Assignments of a literal or another variable: `a = 3;`, `a = b;`
//! - Returns: `return 0;`, `return a;`
//! - Reading an integer: `scanf("%d", &a);`
//! - Printing an integer: `printf("%d\n", a);`
//!
//! Everything else produces a marker line such as `# [UNTRANSLATED] ...` and an explanation
//! saying why. Translation never fails.
//!
//! # Example
//! ```
//! use cmipsy::translate;
//!
//! let source = r#"
//!     int a = 5, b;
//!     b = a;
//!     printf("%d", b);
//! "#;
//!
//! let translation = translate(source);
//!
//! assert_eq!(translation.text(), [
//!     "  li $t0, 5",
//!     "  sw $t0, -4($sp)",
//!     "# alloc b at -8($sp)",
//!     "  lw $t0, -4($sp)",
//!     "  sw $t0, -8($sp)",
//!     "  lw $a0, -8($sp)",
//!     "  li $v0, 1",
//!     "  syscall",
//! ].join("\n"));
//!
//! for explanation in translation.explanations() {
//!     println!("{}: {} ({})", explanation.id, explanation.note, explanation.source.trim());
//! }
//! ```
//!
//! # Executables
//!
//! ## `cmipsy`
//!
//! Built with the `cli` feature. Translates a file (or the standard input) and prints the
//! result, optionally interleaved with the explanations.
//!
//! ```text
//! $ cmipsy --explain prog.c
//! # id1 (line 1): Declare x
//! #   int x;
//! # alloc x at -4($sp)
//! # id2 (line 2): scanf -> read int to x
//! #   scanf("%d", &x);
//!   li $v0, 5
//!   syscall
//!   sw $v0, -4($sp)
//! ```
pub mod token;
pub mod format;
pub mod statement;
pub mod frame;
pub mod mips;
pub mod translator;
pub mod source_map;
pub mod canned;
pub mod hint;
pub mod error;

pub use translator::{translate, translate_with_logger, Translation};
