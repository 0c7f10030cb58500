use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use practices_cli::{load_file_config, resolve_scrape, FileConfig, ScrapeArgs};
use practices_engine::{DEFAULT_BASE_DOMAIN, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn args(flags: &[&str]) -> ScrapeArgs {
    let argv = std::iter::once("scrape_practices").chain(flags.iter().copied());
    ScrapeArgs::try_parse_from(argv).unwrap()
}

#[test]
fn no_flags_and_no_file_gives_platform_defaults() {
    let plan = resolve_scrape(&args(&[]), FileConfig::default()).unwrap();
    let settings = &plan.settings;

    assert_eq!(plan.output, PathBuf::from("good_practices.csv"));
    assert_eq!(settings.base_url.as_str(), DEFAULT_BASE_URL);
    assert_eq!(settings.base_domain, DEFAULT_BASE_DOMAIN);
    assert_eq!(settings.crawl.max_pages, 80);
    assert!(settings.crawl.skip_pages.is_empty());
    assert_eq!(settings.retry.max_attempts, 3);
    assert_eq!(settings.retry.delay, Duration::from_secs(5));
    assert_eq!(settings.fetch.request_timeout, Duration::from_secs(10));
    assert_eq!(settings.fetch.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn file_values_override_defaults() {
    let file = FileConfig {
        base_url: Some("http://localhost:9000/listing".into()),
        max_pages: Some(12),
        retries: Some(5),
        retry_delay_secs: Some(1),
        request_timeout_secs: Some(30),
        user_agent: Some("harvest-test".into()),
        output: Some("from_file.csv".into()),
        ..FileConfig::default()
    };
    let plan = resolve_scrape(&args(&[]), file).unwrap();
    let settings = &plan.settings;

    assert_eq!(settings.base_url.as_str(), "http://localhost:9000/listing");
    assert_eq!(settings.base_domain, "http://localhost:9000");
    assert_eq!(settings.crawl.max_pages, 12);
    assert_eq!(settings.retry.max_attempts, 5);
    assert_eq!(settings.retry.delay, Duration::from_secs(1));
    assert_eq!(settings.fetch.request_timeout, Duration::from_secs(30));
    assert_eq!(settings.fetch.user_agent, "harvest-test");
    assert_eq!(plan.output, PathBuf::from("from_file.csv"));
}

#[test]
fn flags_override_file_values() {
    let file = FileConfig {
        base_url: Some("http://localhost:9000/listing".into()),
        max_pages: Some(12),
        retries: Some(5),
        retry_delay_secs: Some(1),
        output: Some("from_file.csv".into()),
        ..FileConfig::default()
    };
    let plan = resolve_scrape(
        &args(&[
            "--base-url",
            "http://127.0.0.1:8080/gp",
            "--max-pages",
            "3",
            "--retries",
            "2",
            "--delay",
            "0",
            "--output",
            "cli.csv",
        ]),
        file,
    )
    .unwrap();

    assert_eq!(plan.settings.base_url.as_str(), "http://127.0.0.1:8080/gp");
    assert_eq!(plan.settings.base_domain, "http://127.0.0.1:8080");
    assert_eq!(plan.settings.crawl.max_pages, 3);
    assert_eq!(plan.settings.retry.max_attempts, 2);
    assert_eq!(plan.settings.retry.delay, Duration::ZERO);
    assert_eq!(plan.output, PathBuf::from("cli.csv"));
}

#[test]
fn skip_pages_from_both_sources_are_merged() {
    let file = FileConfig {
        skip_pages: vec![1, 4],
        ..FileConfig::default()
    };
    let plan = resolve_scrape(&args(&["--skip-page", "4", "--skip-page", "9"]), file).unwrap();
    assert_eq!(
        plan.settings.crawl.skip_pages,
        BTreeSet::from([1, 4, 9])
    );
}

#[test]
fn explicit_base_domain_wins_over_url_origin() {
    let file = FileConfig {
        base_domain: Some("https://mirror.example".into()),
        ..FileConfig::default()
    };
    let plan = resolve_scrape(&args(&["--base-url", "http://127.0.0.1:1/x"]), file).unwrap();
    assert_eq!(plan.settings.base_domain, "https://mirror.example");
}

#[test]
fn zero_retries_in_file_is_rejected() {
    let file = FileConfig {
        retries: Some(0),
        ..FileConfig::default()
    };
    let err = resolve_scrape(&args(&[]), file).unwrap_err();
    assert!(err.to_string().contains("retries"));
}

#[test]
fn invalid_base_url_in_file_is_rejected() {
    let file = FileConfig {
        base_url: Some("::nope::".into()),
        ..FileConfig::default()
    };
    assert!(resolve_scrape(&args(&[]), file).is_err());
}

#[test]
fn ron_file_accepts_bare_optional_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scrape.ron");
    fs::write(
        &path,
        r#"(
    max_pages: 10,
    skip_pages: [2, 5],
    retry_delay_secs: 0,
    extra_headers: {"Accept-Language": "en"},
    output: "data/out.csv",
)"#,
    )
    .unwrap();

    let file = load_file_config(&path).unwrap();
    assert_eq!(file.max_pages, Some(10));
    assert_eq!(file.skip_pages, vec![2, 5]);
    assert_eq!(file.retry_delay_secs, Some(0));
    assert_eq!(file.output, Some(PathBuf::from("data/out.csv")));
    assert_eq!(file.base_url, None);

    let plan = resolve_scrape(&args(&[]), file).unwrap();
    assert_eq!(
        plan.settings.fetch.extra_headers,
        vec![("Accept-Language".to_string(), "en".to_string())]
    );
}

#[test]
fn unknown_field_in_ron_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scrape.ron");
    fs::write(&path, "(max_pagez: 10)").unwrap();
    assert!(load_file_config(&path).is_err());
}

#[test]
fn missing_config_file_names_the_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.ron");
    let err = load_file_config(&path).unwrap_err();
    assert!(err.to_string().contains("absent.ron"));
}
