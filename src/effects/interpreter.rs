//! Interpreters turn instructions into Stillwater effects.

use crate::backend::AppEnv;
use crate::effects::instruction::{ConsoleOp, Instruction, Reply, StorageOp};
use crate::error::AppError;
use std::sync::Arc;
use stillwater::effect::{from_async, BoxedEffect};
use stillwater::prelude::*;

/// Total mapping from [`Instruction`] to an effect over `Env`.
///
/// Interpreting must not perform anything by itself; the returned effect
/// runs only when the executor runs it.
pub trait Interpreter<Env>: Send + Sync {
    fn interpret(&self, instruction: Instruction) -> BoxedEffect<Reply, AppError, Env>;
}

/// Interpreter that performs instructions against the backends in [`AppEnv`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BackendInterpreter;

impl BackendInterpreter {
    fn storage(op: StorageOp) -> BoxedEffect<Reply, AppError, AppEnv> {
        from_async(move |env: &AppEnv| {
            let store = Arc::clone(&env.store);
            let op = op.clone();
            async move {
                let reply = match op {
                    StorageOp::Save { table, record } => {
                        store.save(&table, record).await.map(Reply::Saved)
                    }
                    StorageOp::All { table, query } => {
                        store.all(&table, query).await.map(Reply::Records)
                    }
                };
                reply.map_err(AppError::from)
            }
        })
        .boxed()
    }

    fn console(op: ConsoleOp) -> BoxedEffect<Reply, AppError, AppEnv> {
        from_async(move |env: &AppEnv| {
            let console = Arc::clone(&env.console);
            let op = op.clone();
            async move {
                let reply = match op {
                    ConsoleOp::Question { prompt } => console
                        .question(&prompt)
                        .await
                        .map(|line| Reply::Line(line.trim().to_string())),
                    ConsoleOp::Print { text } => console.print(&text).await.map(|()| Reply::Unit),
                };
                reply.map_err(AppError::from)
            }
        })
        .boxed()
    }
}

impl Interpreter<AppEnv> for BackendInterpreter {
    fn interpret(&self, instruction: Instruction) -> BoxedEffect<Reply, AppError, AppEnv> {
        match instruction {
            Instruction::Storage(op) => Self::storage(op),
            Instruction::Console(op) => Self::console(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryStore, Storage};
    use crate::effects::Record;
    use crate::testing::ScriptedConsole;
    use serde_json::json;
    use stillwater::effect::Effect;

    fn env(store: Arc<MemoryStore>, console: Arc<ScriptedConsole>) -> AppEnv {
        AppEnv::new(store, console)
    }

    fn post(title: &str) -> Record {
        let mut record = Record::new();
        record.insert("title".to_string(), json!(title));
        record
    }

    #[tokio::test]
    async fn save_dispatches_to_store() {
        let store = Arc::new(MemoryStore::new());
        let console = Arc::new(ScriptedConsole::new(Vec::<String>::new()));
        let env = env(store.clone(), console.clone());

        let reply = BackendInterpreter
            .interpret(
                StorageOp::Save {
                    table: "posts".to_string(),
                    record: post("Hello"),
                }
                .into(),
            )
            .run(&env)
            .await
            .unwrap();

        assert_eq!(reply, Reply::Saved(post("Hello")));
        assert_eq!(store.count("posts"), 1);
        assert!(console.printed().is_empty());
        assert!(console.prompts().is_empty());
    }

    #[tokio::test]
    async fn all_dispatches_to_store() {
        let store = Arc::new(MemoryStore::new());
        store.save("posts", post("Hello")).await.unwrap();
        let env = env(store, Arc::new(ScriptedConsole::new(Vec::<String>::new())));

        let reply = BackendInterpreter
            .interpret(
                StorageOp::All {
                    table: "posts".to_string(),
                    query: None,
                }
                .into(),
            )
            .run(&env)
            .await
            .unwrap();

        assert_eq!(reply, Reply::Records(vec![post("Hello")]));
    }

    #[tokio::test]
    async fn question_dispatches_to_console_and_trims() {
        let store = Arc::new(MemoryStore::new());
        let console = Arc::new(ScriptedConsole::new(["  Ada \t"]));
        let env = env(store.clone(), console.clone());

        let reply = BackendInterpreter
            .interpret(
                ConsoleOp::Question {
                    prompt: "Name? ".to_string(),
                }
                .into(),
            )
            .run(&env)
            .await
            .unwrap();

        assert_eq!(reply, Reply::Line("Ada".to_string()));
        assert_eq!(console.prompts(), vec!["Name? ".to_string()]);
        assert_eq!(store.count("authors"), 0);
    }

    #[tokio::test]
    async fn print_dispatches_to_console() {
        let console = Arc::new(ScriptedConsole::new(Vec::<String>::new()));
        let env = env(Arc::new(MemoryStore::new()), console.clone());

        let reply = BackendInterpreter
            .interpret(
                ConsoleOp::Print {
                    text: "hi".to_string(),
                }
                .into(),
            )
            .run(&env)
            .await
            .unwrap();

        assert_eq!(reply, Reply::Unit);
        assert_eq!(console.printed(), vec!["hi".to_string()]);
    }

    #[tokio::test]
    async fn console_failure_propagates() {
        let console = Arc::new(ScriptedConsole::new(Vec::<String>::new()));
        let env = env(Arc::new(MemoryStore::new()), console);

        let result = BackendInterpreter
            .interpret(
                ConsoleOp::Question {
                    prompt: "Name? ".to_string(),
                }
                .into(),
            )
            .run(&env)
            .await;

        assert!(matches!(result, Err(error) if error.is_input_closed()));
    }
}
