use catalog_dom::DomService;
use catalog_tools::{
    count_tokens, count_tokens_in_file, render_json, run, unique_output_path, write_catalog,
    CliArgs,
};
use clap::Parser;
use std::fs;
use tempfile::TempDir;

const PAGE: &str = r#"<html><body>
<div id="main" class="wrap">
  <a href="/next" data-track="1">Next page</a>
  <ul><li>One</li><li>Two</li></ul>
</div>
</body></html>"#;

#[test]
fn test_unique_output_path_skips_existing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dom1.txt");

    let first = unique_output_path(&input, "json");
    assert_eq!(first, dir.path().join("dom1_1.json"));

    fs::write(&first, "taken").unwrap();
    fs::write(dir.path().join("dom1_2.json"), "taken").unwrap();

    let next = unique_output_path(&input, "json");
    assert_eq!(next, dir.path().join("dom1_3.json"));
    assert!(!next.exists());
}

#[test]
fn test_write_catalog_never_overwrites() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("page.html");
    let records = DomService::new().catalog_html(PAGE).unwrap();

    let existing = dir.path().join("page_1.json");
    fs::write(&existing, "keep me").unwrap();

    let written = write_catalog(&records, &input, "json").unwrap();
    assert_eq!(written, dir.path().join("page_2.json"));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "keep me");

    let again = write_catalog(&records, &input, "json").unwrap();
    assert_eq!(again, dir.path().join("page_3.json"));
    assert_eq!(
        fs::read_to_string(&written).unwrap(),
        fs::read_to_string(&again).unwrap()
    );
}

#[test]
fn test_write_catalog_fills_gaps_like_unique_output_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dom1.txt");
    let records = DomService::new().catalog_html(PAGE).unwrap();
    fs::write(dir.path().join("dom1_2.json"), "taken").unwrap();

    for expected in ["dom1_1.json", "dom1_3.json", "dom1_4.json"] {
        let predicted = unique_output_path(&input, "json");
        let written = write_catalog(&records, &input, "json").unwrap();
        assert_eq!(written, predicted);
        assert_eq!(written, dir.path().join(expected));
    }
}

#[test]
fn test_written_catalog_parses_back() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("page.html");
    let records = DomService::new().catalog_html(PAGE).unwrap();

    let path = write_catalog(&records, &input, "json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let items = value.as_array().unwrap();

    let xpaths: Vec<_> = items.iter().map(|v| v["xpath"].as_str().unwrap()).collect();
    assert_eq!(
        xpaths,
        vec![
            "/html[1]/body[1]/div[1]",
            "/html[1]/body[1]/div[1]/a[1]",
            "/html[1]/body[1]/div[1]/ul[1]",
            "/html[1]/body[1]/div[1]/ul[1]/li[1]",
            "/html[1]/body[1]/div[1]/ul[1]/li[2]",
        ]
    );
    assert_eq!(items[0]["id"], "main");
    assert_eq!(items[1]["attributes"], serde_json::json!({ "href": "/next" }));
    assert_eq!(items[1]["class"], serde_json::Value::Null);
}

#[test]
fn test_token_count_matches_rendered_words() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("page.html");
    let records = DomService::new().catalog_html(PAGE).unwrap();

    let path = write_catalog(&records, &input, "json").unwrap();
    let expected = count_tokens(&render_json(&records).unwrap());
    assert_eq!(count_tokens_in_file(&path).unwrap(), expected);
    assert!(expected > 0);
}

#[test]
fn test_run_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dom1.txt");
    fs::write(&input, PAGE).unwrap();

    let args = CliArgs::parse_from(["dom-catalog", input.to_str().unwrap()]);
    let report = run(&args).unwrap();

    assert_eq!(report.output_path, dir.path().join("dom1_1.json"));
    assert_eq!(report.element_count, 5);
    let written = fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(report.token_count, count_tokens(&written));

    let second = run(&args).unwrap();
    assert_eq!(second.output_path, dir.path().join("dom1_2.json"));
}

#[test]
fn test_run_accepts_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dump.txt");
    fs::write(&input, b"<p>caf\xe9</p>").unwrap();

    let args = CliArgs::parse_from(["dom-catalog", input.to_str().unwrap()]);
    let report = run(&args).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report.output_path).unwrap()).unwrap();
    assert_eq!(value[0]["content"], "caf\u{FFFD}");
}
