use placemark::{
    runtime::spawners::tokio_impl::TokioSpawner, ExplorerConfig, MapScreen, MapServices,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Drives the explorer screen without any UI: search, pick the first result,
/// then ask for directions to it from home.
#[tokio::main]
async fn main() -> placemark::Result<()> {
    let query = std::env::args().nth(1).unwrap_or_else(|| "Miami Beach".to_string());

    println!("🗺️ Placemark Headless Example");
    println!("=============================");

    let config = ExplorerConfig::default();
    let services = MapServices::from_config(&config.services)?;
    let mut screen = MapScreen::builder(services)
        .config(config)
        .spawner(Arc::new(TokioSpawner::current()?))
        .build()?;

    println!(
        "   Home: {:.4}, {:.4}",
        screen.home().lat,
        screen.home().lng
    );

    println!("\n🔍 Searching for '{}'", query);
    screen.submit_search(query);
    settle(&mut screen).await;

    for (i, place) in screen.results().iter().enumerate() {
        println!(
            "   {}. {} ({:.4}, {:.4})",
            i + 1,
            place.name,
            place.coordinate.lat,
            place.coordinate.lng
        );
    }

    let Some(first) = screen.results().first().cloned() else {
        println!("   No results.");
        return Ok(());
    };

    println!("\n📍 Selecting {}", first.name);
    screen.select_place(first);
    screen.request_directions();
    settle(&mut screen).await;

    match screen.route() {
        Some(route) => {
            println!("   Route: {}", route.summary());
            println!("   Points: {}", route.polyline.len());
        }
        None => println!("   No route found."),
    }

    let viewport = screen.viewport();
    println!(
        "\n📊 Camera: {:.5}, {:.5} @ z{:.1}",
        viewport.center.lat, viewport.center.lng, viewport.zoom
    );
    println!("   Markers drawn: {}", screen.markers().len());

    Ok(())
}

/// Polls until every outstanding call has answered and the camera stopped
async fn settle(screen: &mut MapScreen) {
    let deadline = Instant::now() + Duration::from_secs(30);
    while Instant::now() < deadline {
        screen.poll(Instant::now());
        if !screen.is_busy() && !screen.camera().is_animating() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
