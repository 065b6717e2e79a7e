use listing_scout::config::AppConfig;
use listing_scout::{browse, logging, ListingFeed, PageKind, PreferencesStore, QueryParams};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    logging::init();

    let mut args = std::env::args().skip(1);
    let page = match args.next() {
        Some(name) => PageKind::parse(&name)
            .ok_or_else(|| anyhow::anyhow!("unknown page '{name}', expected sale, rent or commercial"))?,
        None => PageKind::Sale,
    };
    let params = QueryParams::parse(&args.next().unwrap_or_default());

    info!("🏠 Listing Scout - {:?} listings", page);

    let config = AppConfig::load_default()?;
    let preferences = PreferencesStore::new(config.preferences.clone());
    let feed = ListingFeed::new(config.build_connectors().await?);

    let Some(result) = browse(
        &feed,
        page,
        &preferences.current(),
        &params,
        config.query.page_size,
    )
    .await
    else {
        warn!("Aggregation was superseded before it finished");
        return Ok(());
    };

    info!(
        "✅ {} matching listings, page {} of {}",
        result.total, result.page, result.total_pages
    );

    for (i, listing) in result.items.iter().enumerate() {
        println!(
            "{}. {} ({} {} {:?})",
            i + 1,
            listing.title,
            listing.price,
            listing.currency,
            listing.price_label
        );
        println!(
            "   {} bed, {} bath, {} sqft",
            listing.bedrooms, listing.bathrooms, listing.area_sqft
        );
        println!("   Location: {} ({})", listing.location, listing.area);
        println!("   ID: {} [{}]", listing.id, listing.source_collection.as_str());
        if !listing.features.is_empty() {
            println!("   Features: {}", listing.features.join(", "));
        }
        println!();
    }

    let json = serde_json::to_string_pretty(&result)?;
    tokio::fs::write("listing_results.json", json).await?;
    info!("💾 Saved results to listing_results.json");

    Ok(())
}
