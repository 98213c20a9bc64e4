use std::sync::Arc;

use bookshelf_ai::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Run with `HUGGINGFACE_API_KEY=hf_... cargo run --example summarize [chapter.html]`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let chapter = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => "<h1>Chapter 1</h1><p>It is a truth universally acknowledged, that a single man \
                 in possession of a good fortune, must be in want of a wife.</p><p>However little \
                 known the feelings or views of such a man may be on his first entering a \
                 neighbourhood, this truth is so well fixed in the minds of the surrounding \
                 families, that he is considered as the rightful property of some one or other \
                 of their daughters.</p>"
            .to_string(),
    };

    let book = Book {
        id: "demo".into(),
        title: "Pride and Prejudice".into(),
        author: "Jane Austen".into(),
        description: None,
        chapters: vec![Chapter { id: "1".into(), title: None, content: chapter }],
    };

    let router = RouterClient::from_env()?;
    tracing::info!(candidates = router.candidates().len(), endpoint = router.endpoint(), "router ready");

    let assistant = BookAssistant::new(Arc::new(router));

    match assistant.summarize(&book).await {
        Ok(summary) => println!("Summary:\n{summary}\n"),
        Err(e) => eprintln!("summary failed: {e}"),
    }
    match assistant.discussion_questions(&book).await {
        Ok(questions) => println!("Discussion questions:\n{questions}"),
        Err(e) => eprintln!("questions failed: {e}"),
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,reqwest=warn,hyper=warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}
