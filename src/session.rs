//! Run loop that drives the router through an interpreter.

use crate::core::{State, StateHistory, StateTransition};
use crate::effects::{fold, Interpreter};
use crate::error::AppError;
use crate::router::{Route, Router};
use chrono::Utc;
use std::sync::Arc;
use stillwater::effect::{BoxedEffect, Effect};
use stillwater::prelude::*;
use tracing::{debug, error, info};

/// How a session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The console ran out of input.
    InputClosed { steps: u64 },
}

/// The single piece of mutable control state: which route runs next.
pub struct Session<Env: Clone + Send + Sync + 'static> {
    router: Arc<Router>,
    interpreter: Arc<dyn Interpreter<Env>>,
    current: Route,
    history: StateHistory<Route>,
    steps: u64,
}

impl<Env: Clone + Send + Sync + 'static> Session<Env> {
    /// Create a session positioned at the router's initial route.
    pub fn new(
        router: Arc<Router>,
        interpreter: Arc<dyn Interpreter<Env>>,
        history_limit: usize,
    ) -> Self {
        let current = router.initial();
        Self {
            router,
            interpreter,
            current,
            history: StateHistory::with_capacity(history_limit),
            steps: 0,
        }
    }

    /// Get current route (pure)
    pub fn current_state(&self) -> Route {
        self.current
    }

    /// Get navigation history (pure)
    pub fn history(&self) -> &StateHistory<Route> {
        &self.history
    }

    /// Number of completed steps (pure)
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run the current route's program once.
    /// After running the effect, call `apply_result()` with the route it yields.
    pub fn step(&self) -> BoxedEffect<Route, AppError, Env> {
        match self.router.program(self.current) {
            Ok(program) => fold(program, Arc::clone(&self.interpreter)),
            Err(err) => fail(AppError::from(err)).boxed(),
        }
    }

    /// Move to `next`, recording the transition.
    pub fn apply_result(&mut self, next: Route) {
        self.steps += 1;
        debug!(from = %self.current, to = %next, step = self.steps, "navigated");
        self.history = self.history.record(StateTransition {
            from: self.current,
            to: next,
            timestamp: Utc::now(),
            step: self.steps,
        });
        self.current = next;
    }

    /// Run until the console closes or an effect fails.
    ///
    /// Each iteration returns to this loop and yields to the scheduler before
    /// the next route runs, so a session of any length keeps a flat stack.
    /// A failure is logged and returned; the loop never retries.
    pub async fn run(&mut self, env: &Env) -> Result<SessionEnd, AppError> {
        info!(route = %self.current, "session started");
        loop {
            match self.step().run(env).await {
                Ok(next) => self.apply_result(next),
                Err(err) if err.is_input_closed() => {
                    info!(
                        steps = self.steps,
                        elapsed = ?self.history.duration(),
                        "input closed, ending session"
                    );
                    return Ok(SessionEnd::InputClosed { steps: self.steps });
                }
                Err(err) => {
                    error!(route = self.current.name(), error = %err, "session halted");
                    return Err(err);
                }
            }
            tokio::task::yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ConsoleOp, Instruction, Program, Reply};
    use crate::error::{ConsoleError, StorageError};
    use crate::router::Catalog;
    use parking_lot::Mutex;

    /// Answers storage reads with empty tables and questions from a script.
    struct Scripted {
        answers: Mutex<Vec<String>>,
        fail_storage: bool,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers.iter().rev().map(|a| a.to_string()).collect()),
                fail_storage: false,
            })
        }

        fn failing_storage() -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(Vec::new()),
                fail_storage: true,
            })
        }
    }

    impl Interpreter<()> for Scripted {
        fn interpret(&self, instruction: Instruction) -> BoxedEffect<Reply, AppError, ()> {
            let reply: Result<Reply, AppError> = match instruction {
                Instruction::Storage(_) if self.fail_storage => {
                    Err(StorageError::Io {
                        path: "store.json".into(),
                        source: std::io::Error::other("disk full"),
                    }
                    .into())
                }
                Instruction::Storage(crate::effects::StorageOp::Save { record, .. }) => {
                    Ok(Reply::Saved(record))
                }
                Instruction::Storage(_) => Ok(Reply::Records(Vec::new())),
                Instruction::Console(ConsoleOp::Question { .. }) => self
                    .answers
                    .lock()
                    .pop()
                    .map(Reply::Line)
                    .ok_or_else(|| ConsoleError::InputClosed.into()),
                Instruction::Console(ConsoleOp::Print { .. }) => Ok(Reply::Unit),
            };
            match reply {
                Ok(reply) => pure(reply).boxed(),
                Err(err) => fail(err).boxed(),
            }
        }
    }

    fn session(interpreter: Arc<Scripted>) -> Session<()> {
        let router = Router::standard(Catalog::default()).unwrap();
        Session::new(Arc::new(router), interpreter, 8)
    }

    #[tokio::test]
    async fn step_then_apply_moves_to_next_route() {
        let mut session = session(Scripted::new(&[]));
        assert_eq!(session.current_state(), Route::Start);

        let next = session.step().run(&()).await.unwrap();
        assert_eq!(next, Route::CreateAuthor);

        session.apply_result(next);
        assert_eq!(session.current_state(), Route::CreateAuthor);
        assert_eq!(session.steps(), 1);
        assert_eq!(
            session.history().get_path(),
            vec![&Route::Start, &Route::CreateAuthor]
        );
    }

    #[tokio::test]
    async fn run_ends_cleanly_when_input_closes() {
        let mut session = session(Scripted::new(&["Ada", "write", "Hello", "World"]));

        let end = session.run(&()).await.unwrap();

        // start -> createAuthor -> menu -> write -> latest -> menu, then no input
        assert_eq!(end, SessionEnd::InputClosed { steps: 5 });
        assert_eq!(session.current_state(), Route::Menu);
    }

    #[tokio::test]
    async fn run_halts_on_backend_failure() {
        let mut session = session(Scripted::failing_storage());

        let result = session.run(&()).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(session.current_state(), Route::Start);
        assert_eq!(session.steps(), 0);
    }

    #[tokio::test]
    async fn long_sessions_keep_history_bounded() {
        let answers: Vec<&str> = std::iter::repeat("menu").take(5_000).collect();
        let mut session = session(Scripted::new(&answers));

        let end = session.run(&()).await.unwrap();

        assert_eq!(end, SessionEnd::InputClosed { steps: 5_001 });
        assert_eq!(session.history().len(), 8);
    }

    #[tokio::test]
    async fn unregistered_route_fails_the_step() {
        let router = Router {
            initial: Route::Menu,
            catalog: Catalog::default(),
            states: std::collections::HashMap::from([(
                Route::Menu,
                Arc::new(|_: &Router| Program::pure(Route::Write)) as crate::router::StateFn,
            )]),
        };
        let mut session: Session<()> = Session::new(Arc::new(router), Scripted::new(&[]), 4);

        let next = session.step().run(&()).await.unwrap();
        session.apply_result(next);
        let result = session.run(&()).await;

        assert!(matches!(result, Err(AppError::Router(_))));
    }
}
