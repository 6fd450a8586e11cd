//! Scripted Session
//!
//! This example drives the author/post menu without a terminal.
//!
//! Key concepts:
//! - Screens are programs; nothing runs until the session folds them
//! - The environment decides which store and console back the interpreter
//! - A scripted console replays answers and records what was shown
//!
//! Run with: cargo run --example scripted_session --features test-utils

use postroom::backend::{AppEnv, MemoryStore, Storage};
use postroom::effects::BackendInterpreter;
use postroom::router::Catalog;
use postroom::testing::ScriptedConsole;
use postroom::{Router, Session, SessionEnd};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Scripted Session Example ===\n");

    let store = Arc::new(MemoryStore::new());
    let console = Arc::new(ScriptedConsole::new([
        "Ada", "write", "Hello", "World", "write", "Again", "Still here", "all", "quit",
    ]));
    let env = AppEnv::new(store.clone(), console.clone());

    let router = Router::standard(Catalog::default())?;
    let mut session: Session<AppEnv> =
        Session::new(Arc::new(router), Arc::new(BackendInterpreter), 16);

    let SessionEnd::InputClosed { steps } = session.run(&env).await?;
    println!("Session ended after {steps} steps in {}", session.current_state());

    println!("\nPrompts shown:");
    for prompt in console.prompts() {
        println!("  {prompt:?}");
    }

    println!("\nPrinted:");
    for line in console.printed() {
        println!("  {}", line.replace('\n', "\n  "));
    }

    let posts = store.all("posts", None).await?;
    println!("\nStored posts: {}", posts.len());

    println!("\nPath:");
    for transition in session.history().transitions() {
        println!("  {} -> {}", transition.from, transition.to);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
