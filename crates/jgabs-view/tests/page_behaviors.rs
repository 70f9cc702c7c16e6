//! End-to-end behavior of the view controller against a full journal page.

use jgabs_core::{Cmd, Event, ViewConfig};
use jgabs_dom::{Document, NodeId};
use jgabs_view::{LatestOutcome, NO_ISSUES, ViewController};
use pretty_assertions::assert_eq;

const ISSUES_PAGE: &str = include_str!("fixtures/issues.html");

fn load(path: &str) -> (Document, ViewController<NodeId>) {
    let mut doc = Document::parse(ISSUES_PAGE)
        .expect("fixture parses")
        .with_location(path);
    let controller =
        ViewController::initialize(&mut doc, ViewConfig::default()).expect("initializes");
    (doc, controller)
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id).unwrap().expect("element exists")
}

fn first(doc: &Document, selector: &str) -> NodeId {
    doc.query(None, selector).unwrap().expect("element exists")
}

fn visible_cards(doc: &Document) -> Vec<String> {
    doc.query_all(None, ".issue-card")
        .unwrap()
        .into_iter()
        .filter(|c| doc.style(*c, "display").unwrap().is_none())
        .map(|c| {
            format!(
                "{}/{}",
                doc.attr(c, "data-volume").unwrap().unwrap_or_default(),
                doc.attr(c, "data-issue").unwrap().unwrap_or_default()
            )
        })
        .collect()
}

fn choose(doc: &mut Document, controller: &mut ViewController<NodeId>, id: &str, value: &str) {
    let select = by_id(doc, id);
    doc.set_control_value(select, value).unwrap();
    let cmd = controller.update(doc, Event::Change(select)).unwrap();
    assert_eq!(cmd, Cmd::None);
}

#[test]
fn issues_page_highlights_issues_link() {
    let (doc, _) = load("/jgabs/issues.html");
    let active: Vec<_> = doc
        .query_all(None, ".nav-links a.active")
        .unwrap()
        .into_iter()
        .map(|a| doc.text_content(a).unwrap())
        .collect();
    assert_eq!(active, vec!["Issues"]);
}

#[test]
fn site_root_highlights_home_link() {
    let (doc, _) = load("/");
    let home = first(&doc, ".nav-links a");
    assert!(doc.has_class(home, "active").unwrap());
    assert_eq!(doc.query_all(None, ".nav-links a.active").unwrap().len(), 1);
}

#[test]
fn exactly_one_tab_and_panel_active_after_load() {
    let (doc, _) = load("/issues.html");
    let triggers = doc.query_all(None, ".tab-btn.active").unwrap();
    let panels = doc.query_all(None, ".tab-content.active").unwrap();
    assert_eq!(triggers.len(), 1);
    assert_eq!(panels, vec![by_id(&doc, "archive")]);
    assert_eq!(doc.attr(triggers[0], "data-tab").unwrap(), Some("archive"));
}

#[test]
fn latest_view_is_built_on_load_from_flagged_card() {
    let (doc, _) = load("/issues.html");
    let container = by_id(&doc, "latest-articles");
    let titles: Vec<_> = doc
        .query_all(Some(container), ".article-card h3")
        .unwrap()
        .into_iter()
        .map(|h| doc.text_content(h).unwrap())
        .collect();
    assert_eq!(titles, vec!["Paper X", "Soil Microbiomes & Yield", "Editorial note"]);

    let author = doc
        .query(Some(container), ".article-card p")
        .unwrap()
        .expect("author line");
    assert_eq!(doc.text_content(author).unwrap(), "Author: Jane Doe");

    let buttons: Vec<_> = doc
        .query_all(Some(container), ".article-actions a")
        .unwrap()
        .into_iter()
        .map(|a| doc.attr(a, "class").unwrap().unwrap_or_default().to_string())
        .collect();
    assert_eq!(buttons, vec!["btn", "btn secondary", "btn"]);
}

#[test]
fn filters_combine_volume_and_issue() {
    let (mut doc, mut controller) = load("/issues.html");
    assert_eq!(visible_cards(&doc), vec!["1/1", "1/2", "2/1"]);

    choose(&mut doc, &mut controller, "volumeSelect", "1");
    assert_eq!(visible_cards(&doc), vec!["1/1", "1/2"]);

    choose(&mut doc, &mut controller, "issueSelect", "2");
    assert_eq!(visible_cards(&doc), vec!["1/2"]);

    choose(&mut doc, &mut controller, "volumeSelect", "2");
    assert!(visible_cards(&doc).is_empty());

    choose(&mut doc, &mut controller, "volumeSelect", "all");
    choose(&mut doc, &mut controller, "issueSelect", "all");
    assert_eq!(visible_cards(&doc), vec!["1/1", "1/2", "2/1"]);
}

#[test]
fn reopening_latest_tab_rebuilds_identically() {
    let (mut doc, mut controller) = load("/issues.html");
    let latest_tab = first(&doc, ".tab-btn[data-tab=\"latest\"]");
    let archive_tab = first(&doc, ".tab-btn[data-tab=\"archive\"]");
    let container = by_id(&doc, "latest-articles");

    controller.update(&mut doc, Event::Click(latest_tab)).unwrap();
    let first_build = doc.inner_html(container).unwrap();
    controller.update(&mut doc, Event::Click(archive_tab)).unwrap();
    controller.update(&mut doc, Event::Click(latest_tab)).unwrap();
    controller.update(&mut doc, Event::Click(latest_tab)).unwrap();
    assert_eq!(doc.inner_html(container).unwrap(), first_build);
    assert!(doc.has_class(by_id(&doc, "latest"), "active").unwrap());
    assert!(!doc.has_class(by_id(&doc, "archive"), "active").unwrap());
}

#[test]
fn latest_view_survives_filtering_its_source_card() {
    let (mut doc, mut controller) = load("/issues.html");
    choose(&mut doc, &mut controller, "volumeSelect", "1");
    assert_eq!(
        controller.refresh_latest(&mut doc).unwrap(),
        Some(LatestOutcome::Articles(3))
    );
}

#[test]
fn page_without_cards_shows_placeholder() {
    let mut doc = Document::parse(concat!(
        r#"<button class="tab-btn" data-tab="latest">Latest</button>"#,
        r#"<div class="tab-content" id="latest"><div id="latest-articles"><p>old</p></div></div>"#
    ))
    .unwrap();
    ViewController::initialize(&mut doc, ViewConfig::default()).unwrap();
    let container = by_id(&doc, "latest-articles");
    assert_eq!(doc.inner_html(container).unwrap(), "<p>No issues found.</p>");
    assert_eq!(doc.text_content(container).unwrap(), NO_ISSUES);
}

#[test]
fn submission_form_resets_and_acknowledges() {
    let mut doc = Document::parse(concat!(
        r#"<form id="submissionForm">"#,
        r#"<input name="author" value=""><input name="title" value="">"#,
        r#"<select name="kind"><option value="article">Article</option><option value="review">Review</option></select>"#,
        r#"<textarea name="abstract"></textarea><button type="submit">Send</button>"#,
        r#"</form>"#
    ))
    .unwrap();
    let mut controller = ViewController::initialize(&mut doc, ViewConfig::default()).unwrap();
    let form = by_id(&doc, "submissionForm");
    let fields = doc.query_all(Some(form), "input, select, textarea").unwrap();
    for (field, value) in fields.iter().zip(["Ada", "On Rings", "review", "Abstract"]) {
        doc.set_control_value(*field, value).unwrap();
    }

    let cmd = controller.update(&mut doc, Event::Submit(form)).unwrap();
    assert!(cmd.prevents_default());
    assert!(cmd.flatten().contains(&Cmd::alert(
        "✅ Manuscript received. It will be reviewed and scheduled for the next issue."
    )));
    let values: Vec<_> = fields
        .iter()
        .map(|f| doc.control_value(*f).unwrap())
        .collect();
    assert_eq!(values, vec!["", "", "article", ""]);
}
