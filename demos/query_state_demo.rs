//! Query State Demo
//!
//! Drives a navigation engine over an in-memory history the way a mail
//! client would: folder selection is a plain key, opened messages are a
//! bounded recent list, and two independent panels react to transitions.
//!
//! Run with `RUST_LOG=debug cargo run --example query_state_demo`.

use query_navigator::{
    subscriber_fn, ChangeView, MemoryHistory, Mutations, NavigationEngine, NavigationError,
    Subscriber, SubscriberResult,
};

struct FolderPanel;

impl Subscriber for FolderPanel {
    fn on_change(&self, view: &ChangeView) -> SubscriberResult {
        if view.todo(["folder"]) {
            println!(
                "[folder panel] loading '{}'",
                view.current().get("folder").unwrap_or_default()
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "FolderPanel"
    }
}

fn main() -> Result<(), NavigationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut engine = NavigationEngine::new(MemoryHistory::new("https://mail.test/?folder=inbox"))?;

    engine.subscribe(FolderPanel);
    engine.subscribe(subscriber_fn(|view| {
        if view.one_modified(["_open"]) {
            println!(
                "[tab strip] open: {}",
                view.current().get("_open").unwrap_or_default()
            );
        }
        Ok(())
    }));

    engine.push(Mutations::new().set("folder", "sent").set("sort", "Date"))?;
    for message in ["m1", "m2", "m3", "m1"] {
        engine.push(Mutations::new().push_fifo("_open", message))?;
        println!("  {:?}", engine.last_fifo_outcomes());
    }

    // Normalize without adding a history step.
    engine.push_silent(Mutations::new().set("sort", "date"))?;
    println!("normalized: {}", engine.url());

    println!("\nback:");
    engine.back()?;
    println!("{}", ChangeView::new(engine.previous().clone(), engine.current().clone()));

    println!("\nhistory:");
    for (i, entry) in engine.provider().entries().iter().enumerate() {
        let marker = if i == engine.provider().position() { ">" } else { " " };
        println!("{} {}", marker, entry);
    }

    Ok(())
}
