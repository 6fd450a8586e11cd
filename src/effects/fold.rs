//! Executor that runs a program through an interpreter.

use crate::effects::interpreter::Interpreter;
use crate::effects::program::{downcast, Continuation, Node, Program, Value};
use crate::error::AppError;
use std::sync::Arc;
use stillwater::effect::{from_async, BoxedEffect, Effect};
use stillwater::prelude::*;
use tracing::trace;

/// Fold `program` into a single effect.
///
/// When run, the effect performs every instruction of the program exactly
/// once, in program order. A continuation is only called once the value it
/// depends on exists, and the first failure ends the walk.
pub fn fold<A, Env>(
    program: Program<A>,
    interpreter: Arc<dyn Interpreter<Env>>,
) -> BoxedEffect<A, AppError, Env>
where
    A: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    from_async(move |env: &Env| {
        let env = env.clone();
        async move {
            let value = execute(program.into_node(), interpreter.as_ref(), &env).await?;
            Ok(downcast::<A>(value)?)
        }
    })
    .boxed()
}

/// Walk the tree iteratively. Left-nested chains push their continuation on
/// `pending`, so neither deep programs nor long chains grow the call stack.
async fn execute<Env>(
    root: Node,
    interpreter: &dyn Interpreter<Env>,
    env: &Env,
) -> Result<Value, AppError>
where
    Env: Clone + Send + Sync + 'static,
{
    let mut pending: Vec<Continuation> = Vec::new();
    let mut current = root;

    loop {
        let value = match current {
            Node::Chain(inner, next) => {
                pending.push(next);
                current = *inner;
                continue;
            }
            Node::Pure(value) => value,
            Node::Lift(instruction) => {
                trace!(kind = instruction.kind(), "interpreting instruction");
                interpreter.interpret(instruction).run(env).await?.into_value()
            }
        };

        match pending.pop() {
            Some(next) => current = next(value)?,
            None => return Ok(value),
        }
    }
}
