//! Effect descriptions, deferred programs and their execution.
//!
//! This module is the seam between "what to do" and "how it is done":
//!
//! - **Instructions** describe one storage or console operation as data
//! - **Programs** combine instructions with `map` and `chain` without running them
//! - **Interpreters** map each instruction to a Stillwater effect
//! - **`fold`** walks a program and runs each instruction through an interpreter
//!
//! Following Stillwater conventions, the executor returns a `BoxedEffect`; it
//! runs only when `.run(&env)` is awaited.

mod fold;
mod instruction;
mod interpreter;
mod program;

pub use fold::fold;
pub use instruction::{ConsoleOp, Instruction, Record, Reply, StorageOp};
pub use interpreter::{BackendInterpreter, Interpreter};
pub use program::{all, print, question, save, Program};
