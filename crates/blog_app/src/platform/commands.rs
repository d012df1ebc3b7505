use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use blog_core::{
    post_path, FeedState, FeedViewModel, PostCardView, PostViewModel, WhitespaceWordCounter,
    WordCounter,
};
use blog_engine::{
    load_first_page, load_post, prepare_documents, ContentSource, EngineHandle,
    HtmlRichTextRenderer, PlainTextWordCounter, PrismicClient,
};
use blog_logging::{blog_info, blog_warn};

use super::cli::Command;
use super::config::AppConfig;
use super::effects::{drain_feed, EffectRunner};

pub fn execute(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let client = Arc::new(PrismicClient::new(config.client_settings()?)?);
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    match command {
        Command::Posts { all, page_size } => {
            let page_size = page_size.unwrap_or(config.page_size).max(1);
            let first = runtime.block_on(load_first_page(client.as_ref(), page_size))?;
            let mut state = FeedState::new(first);
            let mut printed = print_new_cards(&state.view(), 0);

            if all {
                let engine = EngineHandle::new(client.clone())?;
                let timeout = Duration::from_secs(config.request_timeout_secs.saturating_mul(2));
                let runner = EffectRunner::new(engine, timeout);
                state = drain_feed(state, &runner, |view| {
                    printed = print_new_cards(view, printed);
                });
            }

            let view = state.view();
            if let Some(err) = view.last_error.as_deref() {
                anyhow::bail!("loading more posts failed: {err}");
            }
            if view.show_load_more {
                println!("\nMore posts available; pass --all to load them.");
            }
        }
        Command::Post { uid, strip_markup } => {
            let document = runtime.block_on(load_post(client.as_ref(), &uid, &HtmlRichTextRenderer))?;
            let view = PostViewModel::from_document(&document, word_counter(strip_markup));
            print_post(&view);
        }
        Command::Paths { page_size } => {
            let page_size = page_size.unwrap_or(config.page_size).max(1);
            let identifiers = runtime.block_on(client.list_all_identifiers(page_size))?;
            for identifier in identifiers {
                println!("{}", post_path(&identifier));
            }
        }
        Command::Prepare {
            out_dir,
            force,
            strip_markup,
        } => {
            let options = config.prepare_options(force);
            let summary = runtime.block_on(prepare_documents(
                client.as_ref(),
                &HtmlRichTextRenderer,
                word_counter(strip_markup),
                &out_dir,
                &options,
            ))?;
            blog_info!(
                "Prepared {} posts, {} fresh, {} failed",
                summary.written.len(),
                summary.skipped_fresh,
                summary.failed.len()
            );
            for path in &summary.written {
                println!("{}", path.display());
            }
            for (identifier, err) in &summary.failed {
                blog_warn!("{identifier}: {err}");
            }
            if !summary.failed.is_empty() {
                anyhow::bail!("{} posts could not be prepared", summary.failed.len());
            }
        }
    }
    Ok(())
}

fn word_counter(strip_markup: bool) -> &'static dyn WordCounter {
    if strip_markup {
        &PlainTextWordCounter
    } else {
        &WhitespaceWordCounter
    }
}

/// Prints cards past `already_printed` and returns the new count.
fn print_new_cards(view: &FeedViewModel, already_printed: usize) -> usize {
    for card in view.posts.iter().skip(already_printed) {
        print_card(card);
    }
    view.posts.len()
}

fn print_card(card: &PostCardView) {
    println!("{}", card.title);
    if !card.subtitle.is_empty() {
        println!("  {}", card.subtitle);
    }
    println!("  {} | {} | {}", card.publication_date, card.author, card.href);
}

fn print_post(view: &PostViewModel) {
    if let Some(banner) = view.banner_url.as_deref() {
        println!("[banner] {banner}");
    }
    println!("{}", view.title);
    println!(
        "{} | {} | {}",
        view.publication_date,
        view.author,
        view.read_time_label()
    );
    for section in &view.sections {
        println!("\n## {}", section.heading);
        for fragment in &section.fragments {
            println!("{fragment}");
        }
    }
}
