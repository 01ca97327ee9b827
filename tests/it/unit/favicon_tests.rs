//! Favicon service with a scripted fetcher.

use crate::helpers::*;
use pinboard::background::BackgroundExecutor;
use pinboard::icons::{Favicon, FaviconFetcher, FaviconService};
use pinboard::types::Point;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Serves a 1x1 icon for every host except `broken.test`.
#[derive(Default)]
struct FakeFetcher {
    calls: AtomicUsize,
}

impl FaviconFetcher for FakeFetcher {
    fn fetch(&self, host: &str) -> anyhow::Result<Favicon> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if host == "broken.test" {
            anyhow::bail!("connection refused");
        }
        Ok(Favicon {
            width: 1,
            height: 1,
            rgba: vec![255, 0, 0, 255],
        })
    }
}

fn service() -> (FaviconService, Arc<FakeFetcher>) {
    let fetcher = Arc::new(FakeFetcher::default());
    let service = FaviconService::new(fetcher.clone(), BackgroundExecutor::new(1));
    (service, fetcher)
}

fn settle(service: &mut FaviconService) {
    let start = Instant::now();
    while service.in_flight_count() > 0 && start.elapsed() < Duration::from_secs(5) {
        service.poll();
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_fetch_is_cached_per_host() {
    let (mut service, fetcher) = service();
    assert!(service.request("https://example.com/a"));
    // Same host while in flight
    assert!(!service.request("https://EXAMPLE.com/b"));
    assert!(service.is_in_flight("https://example.com/c"));

    settle(&mut service);
    let icon = service.get("https://example.com/other").unwrap();
    assert_eq!((icon.width, icon.height), (1, 1));

    // Cached hosts are not fetched again
    assert!(!service.request("https://example.com/again"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failures_are_cached_as_misses() {
    let (mut service, fetcher) = service();
    assert!(service.request("https://broken.test"));
    settle(&mut service);

    assert!(service.get("https://broken.test").is_none());
    assert!(!service.request("https://broken.test"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unparseable_urls_are_skipped() {
    let (mut service, fetcher) = service();
    assert!(!service.request("not a url"));
    assert_eq!(service.in_flight_count(), 0);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_decode_png() {
    let image = image::RgbaImage::from_pixel(2, 3, image::Rgba([0, 128, 255, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let icon = Favicon::decode(&bytes).unwrap();
    assert_eq!((icon.width, icon.height), (2, 3));
    assert_eq!(&icon.rgba[..4], &[0, 128, 255, 255]);
    assert!(Favicon::decode(b"not an image").is_err());
}

#[test]
fn test_session_fetches_icons_for_url_pins() {
    let (service, fetcher) = service();
    let (pb, _) = pinboard_with(
        TestBoardBuilder::new()
            .with_url("u", "https://docs.rs/serde", (0.0, 0.0))
            .build(),
    );
    let mut pb = pb.with_favicons(service);
    // File pins never hit the network
    pb.add_pin("/docs/a.txt", Point::new(300.0, 0.0));
    pb.add_pin("www.example.com", Point::new(600.0, 0.0));

    let start = Instant::now();
    loop {
        pb.tick(Instant::now());
        let favicons = pb.system.favicons.as_ref().unwrap();
        if favicons.in_flight_count() == 0 || start.elapsed() > Duration::from_secs(5) {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    let favicons = pb.system.favicons.as_ref().unwrap();
    assert!(favicons.get("https://docs.rs").is_some());
    assert!(favicons.get("http://www.example.com").is_some());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_attaching_service_queues_existing_url_pins() {
    let (service, _) = service();
    let (pb, _) = pinboard_with(
        TestBoardBuilder::new()
            .with_url("u", "https://crates.io/crates/serde", (0.0, 0.0))
            .with_pin("a", "/docs/a.txt", (200.0, 0.0))
            .build(),
    );
    let pb = pb.with_favicons(service);
    let favicons = pb.system.favicons.as_ref().unwrap();
    assert!(favicons.is_in_flight("https://crates.io"));
    assert_eq!(favicons.in_flight_count(), 1);
}
