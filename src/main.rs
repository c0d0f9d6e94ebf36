use anyhow::Result;
use tracing::info;

use atlas::config::Config;
use atlas::content::{Catalog, ContentProvider};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("atlas=debug")
        .init();

    info!("Starting atlas");

    let config = Config::load()?;
    let catalog = match &config.content.catalog_path {
        Some(path) => Catalog::load_from(path)?,
        None => Catalog::bundled()?,
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("list") => {
            list(&catalog);
            Ok(())
        }
        Some("play") if args.len() == 3 => play(&config, &catalog, &args[1], &args[2]).await,
        _ => {
            eprintln!("Usage: atlas [list | play <category-id> <subtopic-id>]");
            std::process::exit(2);
        }
    }
}

fn list(catalog: &Catalog) {
    for category in catalog.categories() {
        match &category.subtitle {
            Some(subtitle) => println!("{} [{}] - {}", category.title, category.id, subtitle),
            None => println!("{} [{}]", category.title, category.id),
        }
        for subtopic in &category.subtopics {
            println!("  {} [{}] ({} slides)", subtopic.title, subtopic.id, subtopic.slides.len());
            for child in &subtopic.children {
                println!("    {} [{}] ({} slides)", child.title, child.id, child.slides.len());
            }
        }
    }
}

/// Headless playback demo: step through a subtopic's slides on a timer,
/// with a fullscreen round-trip on the first slide.
#[cfg(feature = "gstreamer")]
async fn play(
    config: &Config,
    catalog: &Catalog,
    category_id: &str,
    subtopic_id: &str,
) -> Result<()> {
    use anyhow::Context;
    use atlas::models::{CategoryId, SubtopicId};
    use atlas::player::{GStreamerEngine, PlaybackDefaults, SubtopicSession};
    use std::sync::Arc;
    use std::time::Duration;

    let subtopic = catalog
        .subtopic(&CategoryId::new(category_id), &SubtopicId::new(subtopic_id))
        .context("Subtopic not found")?;
    anyhow::ensure!(
        !subtopic.slides.is_empty(),
        "Subtopic '{}' has no slides",
        subtopic.title
    );

    info!(
        "Playing '{}' ({} slides)",
        subtopic.title,
        subtopic.slides.len()
    );

    let engine = Arc::new(GStreamerEngine::new()?);
    let defaults = PlaybackDefaults {
        start_muted: config.playback.start_muted,
    };
    let mut session = SubtopicSession::new(subtopic.slides.clone(), engine, defaults);

    let mut events = session.events().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!("Session event: {event:?}");
        }
    });

    let page_width = 390.0;
    for index in 0..subtopic.slides.len() {
        session.on_scroll_settled(index as f64 * page_width, page_width)?;
        wait_until_ready(&session).await;
        if index == 0 {
            session.enter_fullscreen()?;
            tokio::time::sleep(Duration::from_secs(2)).await;
            session.exit_fullscreen()?;
        }
        tokio::time::sleep(Duration::from_secs(3)).await;
    }

    session.teardown();
    Ok(())
}

#[cfg(feature = "gstreamer")]
async fn wait_until_ready(session: &atlas::player::SubtopicSession) {
    use atlas::player::PlaybackStatus;
    use std::time::Duration;
    use tracing::warn;

    let Some(handle) = session.active_handle() else {
        return;
    };
    let mut status = handle.watch_status();
    let waited = tokio::time::timeout(Duration::from_secs(15), async {
        loop {
            let current = status.borrow().clone();
            match current {
                PlaybackStatus::Ready => break,
                PlaybackStatus::Error(message) => {
                    warn!("Slide failed to load: {message}");
                    break;
                }
                PlaybackStatus::Loading => {
                    if status.changed().await.is_err() {
                        break;
                    }
                }
            }
        }
    })
    .await;
    if waited.is_err() {
        warn!("Timed out waiting for the active slide to become ready");
    }
}

#[cfg(not(feature = "gstreamer"))]
async fn play(
    _config: &Config,
    _catalog: &Catalog,
    _category_id: &str,
    _subtopic_id: &str,
) -> Result<()> {
    anyhow::bail!("Built without the 'gstreamer' feature; playback is unavailable")
}
