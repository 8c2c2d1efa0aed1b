mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use deal_scout::presenter::{render_card, render_view, Card, ImageSlot};
use deal_scout::{CheapSharkClient, DealSession, DealsSource};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = CheapSharkClient::with_config(cli.client_config())?;
    info!(
        source = client.source_name(),
        base_url = %client.config().base_url,
        "Deal Scout ready"
    );
    let session = DealSession::new(client);

    match cli.title.as_deref() {
        Some(title) => {
            run_search(&session, title, &cli).await?;
            let state = session.state();
            if !state.error_message().is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        None => {
            eprintln!("Enter game title... (empty line is ignored, Ctrl-D to quit)");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                run_search(&session, &line, &cli).await?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_search(session: &DealSession<CheapSharkClient>, title: &str, cli: &Cli) -> Result<()> {
    if title.trim().is_empty() {
        return Ok(());
    }

    let Some(enrichment) = session.search(title).await else {
        print_state(session, cli.json);
        return Ok(());
    };

    let state = session.state();
    if !cli.json {
        for (i, listing) in state.listings().iter().enumerate() {
            println!("{}\n", render_card(i, &Card::new(listing, ImageSlot::new(&listing.thumb))));
        }
    }

    match enrichment.await {
        Ok(written) => debug!(written = written, "Image enrichment finished"),
        Err(e) => warn!(error = %e, "Image enrichment task failed"),
    }

    let mut cards = Vec::with_capacity(state.listings().len());
    for listing in state.listings() {
        let mut image = ImageSlot::new(session.resolve_image(listing));
        if cli.verify_images && !session.source().image_loads(image.url()).await {
            image.on_load_error();
        }
        cards.push(Card::new(listing, image));
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    let updated: Vec<_> = cards
        .iter()
        .zip(state.listings())
        .enumerate()
        .filter(|(_, (card, listing))| card.image.url() != listing.thumb)
        .collect();
    if !updated.is_empty() {
        println!("Updated images:");
        for (i, (card, _)) in updated {
            println!("{}. {}: {}", i + 1, card.title, card.image.url());
        }
    }

    Ok(())
}

/// Banner for searches that ended without listings to show
fn print_state(session: &DealSession<CheapSharkClient>, json: bool) {
    let state = session.state();
    let Some(banner) = render_view(&state) else {
        return;
    };
    if !state.error_message().is_empty() {
        eprintln!("{}", banner);
    } else if json {
        eprintln!("{}", banner);
        println!("[]");
    } else {
        println!("{}", banner);
    }
}
