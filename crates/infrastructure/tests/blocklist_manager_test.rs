mod helpers;

use dnsbox_application::ports::BlocklistPort;
use dnsbox_infrastructure::dns::BlocklistManager;
use helpers::MockHttpServer;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn hosts_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn path_of(file: &tempfile::NamedTempFile) -> String {
    file.path().display().to_string()
}

#[tokio::test]
async fn test_starts_empty_until_first_refresh() {
    let manager = BlocklistManager::new(vec![], Duration::from_secs(60));

    let status = manager.status();

    assert!(status.last_refreshed_at.is_none());
    assert_eq!(status.domain_count, 0);
    assert!(!manager.is_blocked("ads.example.com"));
}

#[tokio::test]
async fn test_refresh_loads_local_file() {
    // Arrange
    let file = hosts_file(
        "# comment\n\n0.0.0.0 ads.example.com\n127.0.0.1 Tracker.Test # inline\nlocalhost\n",
    );
    let manager = BlocklistManager::new(vec![path_of(&file)], Duration::from_secs(60));

    // Act
    let count = manager.refresh().await;

    // Assert
    assert_eq!(count, 2);
    assert!(manager.is_blocked("ads.example.com"));
    assert!(manager.is_blocked("pixel.tracker.test."));
    assert!(!manager.is_blocked("example.com"));
    let status = manager.status();
    assert_eq!(status.domain_count, 2);
    assert!(status.last_refreshed_at.is_some());
    assert_eq!(status.sources, vec![path_of(&file)]);
}

#[tokio::test]
async fn test_refresh_tolerates_non_utf8_bytes_in_file() {
    // Arrange
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"# liste \xe9t\xe9\n0.0.0.0 ads.example.com\n0.0.0.0 tracker.test\n")
        .unwrap();
    let manager = BlocklistManager::new(vec![path_of(&file)], Duration::from_secs(60));

    // Act
    let count = manager.refresh().await;

    // Assert
    assert_eq!(count, 2);
    assert!(manager.is_blocked("ads.example.com"));
    assert!(manager.is_blocked("tracker.test"));
}

#[tokio::test]
async fn test_refresh_merges_http_and_skips_failing_sources() {
    // Arrange
    let http = MockHttpServer::start(vec![(
        "/hosts.txt",
        "0.0.0.0 remote.test\n0.0.0.0 cdn.remote.test\n",
    )])
    .await
    .unwrap();
    let file = hosts_file("0.0.0.0 local.test\n");
    let sources = vec![
        http.url("/hosts.txt"),
        http.url("/missing.txt"),
        "/nonexistent/dnsbox/hosts".to_string(),
        path_of(&file),
    ];
    let manager = BlocklistManager::new(sources, Duration::from_secs(60));

    // Act
    let count = manager.refresh().await;

    // Assert
    assert_eq!(count, 3);
    assert!(manager.is_blocked("remote.test"));
    assert!(manager.is_blocked("local.test"));
    assert_eq!(http.request_count(), 2);
}

#[tokio::test]
async fn test_refresh_replaces_previous_generation() {
    let old = hosts_file("0.0.0.0 old.test\n");
    let new = hosts_file("0.0.0.0 new.test\n");
    let manager = BlocklistManager::new(vec![path_of(&old)], Duration::from_secs(60));
    manager.refresh().await;
    assert!(manager.is_blocked("old.test"));

    manager.update_sources(vec![path_of(&new)]);
    manager.refresh().await;

    assert!(!manager.is_blocked("old.test"));
    assert!(manager.is_blocked("new.test"));
    assert_eq!(manager.status().sources, vec![path_of(&new)]);
}

#[tokio::test]
async fn test_forced_refresh_requests_are_coalesced() {
    // Arrange
    let manager = BlocklistManager::new(vec![], Duration::from_secs(60));

    // Act
    manager.force_refresh();
    manager.force_refresh();
    manager.force_refresh();

    // Assert
    tokio::time::timeout(Duration::from_millis(200), manager.refresh_requested())
        .await
        .expect("one refresh should be pending");
    let second =
        tokio::time::timeout(Duration::from_millis(100), manager.refresh_requested()).await;
    assert!(second.is_err(), "extra requests must collapse into one");
}

#[tokio::test]
async fn test_force_refresh_after_consumed_request_queues_again() {
    let manager = BlocklistManager::new(vec![], Duration::from_secs(60));

    manager.force_refresh();
    manager.refresh_requested().await;
    manager.force_refresh();

    tokio::time::timeout(Duration::from_millis(200), manager.refresh_requested())
        .await
        .expect("a new request should be pending");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_observe_partial_generation() {
    // Arrange
    let one = hosts_file("0.0.0.0 a.test\n");
    let two = hosts_file("0.0.0.0 b.test\n0.0.0.0 c.test\n");
    let manager = Arc::new(BlocklistManager::new(
        vec![path_of(&one)],
        Duration::from_secs(60),
    ));
    manager.refresh().await;

    let stop = Arc::new(AtomicBool::new(false));
    let mut readers = Vec::new();
    for _ in 0..4 {
        let manager = manager.clone();
        let stop = stop.clone();
        readers.push(tokio::spawn(async move {
            let mut reads = 0u64;
            while !stop.load(Ordering::Relaxed) {
                let state = manager.current();
                let first_generation = state.set.contains_exact("a.test");
                let second_generation =
                    state.set.contains_exact("b.test") && state.set.contains_exact("c.test");
                assert!(first_generation ^ second_generation);
                assert_eq!(state.domain_count, if first_generation { 1 } else { 2 });
                reads += 1;
                tokio::task::yield_now().await;
            }
            reads
        }));
    }

    // Act
    for round in 0..20 {
        let source = if round % 2 == 0 { &two } else { &one };
        manager.update_sources(vec![path_of(source)]);
        manager.refresh().await;
    }
    stop.store(true, Ordering::Relaxed);

    // Assert
    for reader in readers {
        assert!(reader.await.unwrap() > 0);
    }
}
