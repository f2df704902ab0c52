//! Broadsheet reader entry point.
//!
//! Replays a recorded session (JSON lines, one event each) through the
//! home and article screens and logs the navigation, requests and overlay
//! state they produce. Reads the session from the first argument or from
//! stdin. The config comes from the second argument, `BROADSHEET_CONFIG`,
//! or the built-in defaults.

mod article;
mod home;
mod models;
mod nav;
mod reader;
mod session;
mod store;
mod surface;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use broadsheet_types::config::BroadsheetConfig;

use home::Tab;
use reader::Reader;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let session_path = args.next().map(PathBuf::from);
    let config_path = args.next().map(PathBuf::from);

    let config = BroadsheetConfig::resolve(config_path.as_deref())
        .context("failed to load reader configuration")?;
    log::info!(
        "Starting Broadsheet (articles under {})",
        config.bridge.article_url_prefix
    );

    let text = match &session_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read session from stdin")?;
            buf
        }
    };

    let events = session::parse_session(&text);
    log::info!("Replaying {} session event(s)", events.len());

    let mut reader = Reader::new(config);
    reader.start();
    for event in events {
        reader.apply(event)?;
    }

    report(&reader);
    Ok(())
}

fn report(reader: &Reader) {
    let nav = reader.navigator();
    let trail: Vec<&str> = nav.history().iter().map(|r| r.name()).collect();
    log::info!(
        "Route: {} (depth {}: {})",
        reader.route().name(),
        nav.depth(),
        trail.join(" > ")
    );

    let home = reader.home();
    log::info!("Active tab: {}", home.active().key());
    for tab in [Tab::News, Tab::Labs] {
        let feed = home.tab(tab);
        log::info!(
            "{}: {} item(s), page size {}, footer {:?}, refreshing {}, more {}, last key {:?}",
            tab.key(),
            feed.list().len(),
            feed.list().page_size(),
            feed.list().footer(),
            feed.refresh_pending(),
            feed.has_more(),
            feed.last_key()
        );
    }
    log::info!(
        "Overlay: {} (opacity {:.2})",
        if home.overlay_visible() { "shown" } else { "hidden" },
        home.overlay_opacity()
    );

    if let Some(screen) = reader.article_screen() {
        let badges = screen.badges(reader.store());
        log::info!(
            "Article {}: loaded {}, bar offset {:.1}, comments {:?}, praise {:?}",
            screen.id(),
            screen.is_loaded(),
            screen.bar().offset(),
            badges.comments,
            badges.praise
        );
        if let Some(links) = reader.intercepted_links() {
            log::info!("Article links intercepted: {links}");
        }
    }
    log::info!("{} fetch request(s) issued", reader.requests().len());
}
