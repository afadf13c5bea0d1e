//! End-to-end behaviour of the guide over a real store file
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;
use troubleshoot_guide::core::Guide;
use troubleshoot_guide::render::{Block, Element, Span, elements_to_html};

fn guide_with(contents: &str) -> (TempDir, Guide) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("steps.txt");
    fs::write(&path, contents).expect("seed store");
    (dir, Guide::open(path))
}

fn force_mtime(path: &Path, time: SystemTime) {
    fs::OpenOptions::new()
        .write(true)
        .open(path)
        .and_then(|f| f.set_modified(time))
        .expect("set mtime");
}

#[test]
fn test_section_count_matches_markers() {
    let (_dir, mut guide) = guide_with("# One\na\n# Two\nb\n# Three\nc\n");
    let sections = guide.list_sections();

    assert_eq!(sections.len(), 3);
    for (i, section) in sections.iter().enumerate() {
        assert_eq!(section.ordinal, i);
    }

    let (_dir, mut guide) = guide_with("Preface\n# One\na\n# Two\nb\n");
    let sections = guide.list_sections();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].name, "General");
}

#[test]
fn test_blank_marker_contributes_no_section() {
    let (_dir, mut guide) = guide_with("# Router\nfirst\n#   \nsecond\n# Modem\nthird\n");
    let sections = guide.list_sections();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].body, "first\nsecond\n");
    assert_eq!(sections[1].name, "Modem");
}

#[test]
fn test_render_is_idempotent() {
    let (_dir, mut guide) = guide_with("# A\n## Codes\n- **E1**: x\n- E2\nText\n");

    let first = guide.render_section(0).expect("section");
    let second = guide.render_section(0).expect("section");

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_layout_groups_adjacent_bullets() {
    let (_dir, mut guide) = guide_with("# A\n## Codes\n- **E1**: x\n- E2\nText\n- E3\n");

    let elements = guide.layout_section(0).expect("section");

    assert_eq!(elements.len(), 4);
    assert!(matches!(&elements[1], Element::List(items) if items.len() == 2));
    assert!(matches!(&elements[3], Element::List(items) if items.len() == 1));
    assert_eq!(
        elements_to_html(&elements).matches("<ul>").count(),
        2
    );
    assert!(guide.layout_section(1).is_none());
}

#[test]
fn test_append_round_trip() {
    let (_dir, mut guide) = guide_with("# Existing\nbody\n");
    let before = guide.list_sections().len();

    guide.append_section("X", "- **E1**: fix").expect("append");

    let sections = guide.list_sections();
    assert_eq!(sections.len(), before + 1);
    let last = sections.last().expect("last section");
    assert_eq!(last.name, "X");

    let blocks = guide.render_section(last.ordinal).expect("render");
    assert_eq!(blocks.len(), 1);
    match &blocks[0] {
        Block::BulletItem(inline) => {
            assert_eq!(inline.spans()[0], Span::Strong("E1".to_string()));
        }
        other => panic!("Expected bullet, got {:?}", other),
    }
}

#[test]
fn test_append_with_blank_name_leaves_store_alone() {
    let (_dir, mut guide) = guide_with("# A\n");

    let err = guide.append_section("  ", "body").unwrap_err();

    assert!(err.is_validation());
    assert_eq!(guide.raw_text(), "# A\n");
}

#[test]
fn test_search_is_case_insensitive() {
    let (_dir, mut guide) = guide_with("# Modem\nError 0x80: reboot device\n# Printer\nOut of paper\n");
    let results = guide.search("error");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].label, "Modem");
    assert_eq!(results[0].section_index, 0);
    assert!(results[0].snippet.contains("<mark>Error</mark>"));
}

#[test]
fn test_empty_query_returns_all_sections() {
    let (_dir, mut guide) = guide_with("# A\none\n# B\ntwo\n# C\nthree\n");
    let results = guide.search("");

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| !r.matched));
    assert!(results.iter().all(|r| r.snippet.is_empty()));
}

#[test]
fn test_error_badge_count() {
    let (_dir, mut guide) = guide_with("# A\n- **Error**: A\n- **Error**: B\n- plain bullet");
    let results = guide.search("");

    assert_eq!(results[0].error_count, 2);
}

#[test]
fn test_summary_is_cut_at_one_hundred_chars() {
    let line = "x".repeat(30);
    let body = vec![line.as_str(); 5].join("\n");
    let (_dir, mut guide) = guide_with(&format!("# Long\n{body}\n"));

    let summary = &guide.search("")[0].summary;

    assert_eq!(summary.chars().count(), 100);
    assert_eq!(summary, &format!("{line} {line} {line} {}", &line[..7]));
}

#[test]
fn test_cache_follows_replace_all() {
    let (dir, mut guide) = guide_with("# Old\nstale\n");
    let path = dir.path().join("steps.txt");
    let base = SystemTime::now() - Duration::from_secs(120);
    force_mtime(&path, base);

    assert_eq!(guide.list_sections()[0].name, "Old");

    guide.replace_all("# New\nfresh\n# Newer\n").expect("replace");
    force_mtime(&path, base + Duration::from_secs(10));

    let sections = guide.list_sections();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].name, "New");
    assert_eq!(sections[1].name, "Newer");
}

#[test]
fn test_replace_is_visible_without_touching_mtime() {
    let (_dir, mut guide) = guide_with("# Old\n");
    assert_eq!(guide.list_sections()[0].name, "Old");

    guide.replace_all("# New\n").expect("replace");

    assert_eq!(guide.list_sections()[0].name, "New");
}

#[test]
fn test_missing_store_degrades_to_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut guide = Guide::open(dir.path().join("missing.txt"));

    assert!(guide.list_sections().is_empty());
    assert!(guide.search("anything").is_empty());

    guide.append_section("First", "- step").expect("append creates store");
    assert_eq!(guide.list_sections()[0].name, "First");
}
