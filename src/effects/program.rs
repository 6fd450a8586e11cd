//! Deferred programs built from instructions.
//!
//! A [`Program`] is a tree describing what to do: a known value, a single
//! instruction, or a program followed by a continuation. Building and
//! combining programs never performs an effect; the only way to run one is
//! [`fold`](crate::effects::fold).

use crate::effects::instruction::{ConsoleOp, Instruction, Record, StorageOp};
use crate::error::ProgramError;
use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;

pub(crate) type Value = Box<dyn Any + Send>;

pub(crate) type Continuation = Box<dyn FnOnce(Value) -> Result<Node, ProgramError> + Send>;

/// Untyped program tree. `Program<A>` guarantees the tree yields an `A`.
pub(crate) enum Node {
    Pure(Value),
    Lift(Instruction),
    Chain(Box<Node>, Continuation),
}

impl Node {
    /// A placeholder left behind when a tree is moved out of its owner.
    fn hollow() -> Node {
        Node::Pure(Box::new(()))
    }
}

/// A lazy description of a computation yielding `A`.
///
/// # Example
///
/// ```rust
/// use postroom::effects::{print, question, Instruction, ConsoleOp};
///
/// let greet = question("Name? ").chain(|name| print(format!("Hello, {name}")));
///
/// // Nothing ran; the program only knows what it will ask first.
/// assert_eq!(
///     greet.next_instruction(),
///     Some(&Instruction::Console(ConsoleOp::Question { prompt: "Name? ".to_string() }))
/// );
/// ```
pub struct Program<A> {
    node: Node,
    output: PhantomData<fn() -> A>,
}

impl<A: Send + 'static> Program<A> {
    /// A program that performs nothing and yields `value`.
    pub fn pure(value: A) -> Self {
        Self::from_node(Node::Pure(Box::new(value)))
    }

    /// Lift a single instruction. The caller promises the interpreter answers
    /// it with an `A`; the typed constructors below keep that promise.
    pub(crate) fn lift(instruction: Instruction) -> Self {
        Self::from_node(Node::Lift(instruction))
    }

    /// Transform the eventual result with `f`.
    pub fn map<B, F>(self, f: F) -> Program<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        Program::from_node(Node::Chain(
            Box::new(self.into_node()),
            Box::new(move |value| {
                let a = downcast::<A>(value)?;
                Ok(Node::Pure(Box::new(f(a))))
            }),
        ))
    }

    /// Continue with the program `f` builds from the eventual result.
    ///
    /// `f` is not called until the result exists.
    pub fn chain<B, F>(self, f: F) -> Program<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Program<B> + Send + 'static,
    {
        Program::from_node(Node::Chain(
            Box::new(self.into_node()),
            Box::new(move |value| {
                let a = downcast::<A>(value)?;
                Ok(f(a).into_node())
            }),
        ))
    }

    /// The first instruction this program will perform, if it performs any
    /// before a continuation has to run.
    pub fn next_instruction(&self) -> Option<&Instruction> {
        let mut node = &self.node;
        loop {
            match node {
                Node::Pure(_) => return None,
                Node::Lift(instruction) => return Some(instruction),
                Node::Chain(inner, _) => node = inner,
            }
        }
    }

    /// Whether the program is a bare value.
    pub fn is_pure(&self) -> bool {
        matches!(self.node, Node::Pure(_))
    }

    pub(crate) fn into_node(mut self) -> Node {
        std::mem::replace(&mut self.node, Node::hollow())
    }

    fn from_node(node: Node) -> Self {
        Self {
            node,
            output: PhantomData,
        }
    }
}

impl Program<()> {
    /// Run unit programs one after another, left to right.
    pub fn sequence<I>(programs: I) -> Self
    where
        I: IntoIterator<Item = Program<()>>,
    {
        let mut programs = programs.into_iter();
        match programs.next() {
            None => Program::pure(()),
            Some(first) => programs.fold(first, |acc, next| acc.chain(move |()| next)),
        }
    }
}

// Left-nested chains are as deep as the number of `map`/`chain` calls, so
// the tree is torn down with an explicit stack rather than recursive drops.
impl<A> Drop for Program<A> {
    fn drop(&mut self) {
        if !matches!(self.node, Node::Chain(..)) {
            return;
        }
        let mut stack = vec![std::mem::replace(&mut self.node, Node::hollow())];
        while let Some(node) = stack.pop() {
            if let Node::Chain(inner, _next) = node {
                stack.push(*inner);
            }
        }
    }
}

impl<A> fmt::Debug for Program<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match &self.node {
            Node::Pure(_) => "Pure",
            Node::Lift(_) => "Lift",
            Node::Chain(..) => "Chain",
        };
        f.debug_struct("Program")
            .field("output", &type_name::<A>())
            .field("node", &shape)
            .finish()
    }
}

pub(crate) fn downcast<A: 'static>(value: Value) -> Result<A, ProgramError> {
    value
        .downcast::<A>()
        .map(|boxed| *boxed)
        .map_err(|_| ProgramError::UnexpectedValue {
            expected: type_name::<A>(),
        })
}

/// Show `prompt` and yield the trimmed line the user answers.
pub fn question(prompt: impl Into<String>) -> Program<String> {
    Program::lift(
        ConsoleOp::Question {
            prompt: prompt.into(),
        }
        .into(),
    )
}

/// Show `text` on its own line.
pub fn print(text: impl Into<String>) -> Program<()> {
    Program::lift(ConsoleOp::Print { text: text.into() }.into())
}

/// Append `record` to `table`, yielding the stored record.
pub fn save(table: impl Into<String>, record: Record) -> Program<Record> {
    Program::lift(
        StorageOp::Save {
            table: table.into(),
            record,
        }
        .into(),
    )
}

/// Read the records of `table` that match `query`, in insertion order.
pub fn all(table: impl Into<String>, query: Option<Record>) -> Program<Vec<Record>> {
    Program::lift(
        StorageOp::All {
            table: table.into(),
            query,
        }
        .into(),
    )
}
