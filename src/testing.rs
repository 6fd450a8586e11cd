//! Test doubles for driving sessions without a terminal.

use crate::backend::Console;
use crate::error::ConsoleError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Console that answers questions from a fixed script and records what the
/// program showed. Once the script is used up, questions fail with
/// [`ConsoleError::InputClosed`].
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    printed: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
            printed: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Lines printed so far, in order.
    pub fn printed(&self) -> Vec<String> {
        self.printed.lock().clone()
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.lock().len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn question(&self, prompt: &str) -> Result<String, ConsoleError> {
        self.prompts.lock().push(prompt.to_string());
        self.answers
            .lock()
            .pop_front()
            .ok_or(ConsoleError::InputClosed)
    }

    async fn print(&self, text: &str) -> Result<(), ConsoleError> {
        self.printed.lock().push(text.to_string());
        Ok(())
    }
}
