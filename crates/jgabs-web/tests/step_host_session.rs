//! A scripted browsing session through the step host.

use jgabs_core::{Event, ViewConfig};
use jgabs_dom::NodeId;
use jgabs_web::{StepHost, parse_options};
use pretty_assertions::assert_eq;

const PAGE: &str = r#"
<nav class="nav-links">
  <a href="index.html">Home</a>
  <a href="issues.html">Issues</a>
  <a href="contact.html">Contact</a>
</nav>
<button class="tab-btn" data-tab="archive">Archive</button>
<button class="tab-btn active" data-tab="latest">Latest</button>
<section class="tab-content" id="archive">
  <select id="volumeSelect">
    <option value="all">All</option>
    <option value="3">Volume 3</option>
    <option value="4">Volume 4</option>
  </select>
  <div class="issue-card" data-volume="3" data-issue="1">
    <ul><li><span class="title">Old work</span></li></ul>
  </div>
  <div class="issue-card" data-volume="4" data-issue="1">
    <ul>
      <li>
        <span class="title"> Rhizosphere dynamics </span>
        <a class="view-link" href="v4/rhizo.html" data-author="K. Owusu">View</a>
        <a class="download-link" href="v4/rhizo.pdf">PDF</a>
      </li>
    </ul>
  </div>
</section>
<section class="tab-content" id="latest"><div id="latest-articles"></div></section>
<form id="contactForm">
  <input name="name" value="">
  <textarea name="message">Hello</textarea>
</form>
"#;

fn node(host: &StepHost, id: &str) -> NodeId {
    host.document().element_by_id(id).unwrap().expect("element exists")
}

fn start(config: ViewConfig) -> StepHost {
    let mut host = StepHost::from_html(PAGE, "/Issues.html", config).unwrap();
    host.init().unwrap();
    host
}

#[test]
fn premarked_latest_tab_opens_with_first_card() {
    let host = start(ViewConfig::default());
    assert!(host.document().has_class(node(&host, "latest"), "active").unwrap());

    // No card is flagged, so the first card supplies the latest view.
    let container = node(&host, "latest-articles");
    assert_eq!(
        host.document().inner_html(container).unwrap(),
        r#"<div class="articles"><div class="article-card"><h3>Old work</h3><div class="article-actions"></div></div></div>"#
    );
}

#[test]
fn nav_highlight_ignores_path_case() {
    let host = start(ViewConfig::default());
    let active = host.document().query(None, ".nav-links a.active").unwrap().unwrap();
    assert_eq!(host.document().text_content(active).unwrap(), "Issues");
}

#[test]
fn filter_then_contact_in_one_step() {
    let mut host = start(ViewConfig::default());
    let select = node(&host, "volumeSelect");
    let form = node(&host, "contactForm");
    let name = host.document().query(Some(form), "input").unwrap().unwrap();
    let message = host.document().query(Some(form), "textarea").unwrap().unwrap();

    host.document_mut().set_control_value(select, "4").unwrap();
    host.document_mut().set_control_value(name, "Ama").unwrap();
    host.document_mut().set_control_value(message, "Question").unwrap();
    host.push_event(Event::Change(select));
    host.push_event(Event::Submit(form));
    let result = host.step().unwrap();
    assert_eq!(result.events_processed, 2);

    let hidden: Vec<_> = host
        .document()
        .query_all(None, ".issue-card")
        .unwrap()
        .into_iter()
        .map(|c| host.document().style(c, "display").unwrap())
        .collect();
    assert_eq!(hidden, vec![Some("none".to_string()), None]);

    let outputs = host.take_outputs();
    assert_eq!(
        outputs.alerts,
        vec!["📩 Thank you — your message was sent. We will reply soon.".to_string()]
    );
    assert_eq!(
        outputs
            .dispatches
            .iter()
            .map(|d| d.default_prevented)
            .collect::<Vec<_>>(),
        vec![false, true]
    );
    assert_eq!(host.document().control_value(name).unwrap(), "");
    assert_eq!(host.document().control_value(message).unwrap(), "Hello");
}

#[test]
fn options_object_reshapes_behaviors() {
    let config = parse_options(Some(
        r#"{ "behaviors": "FORMS", "contact_message": "Thanks!" }"#,
    ))
    .unwrap();
    let mut host = start(config);
    assert!(host.document().query(None, ".nav-links a.active").unwrap().is_none());
    assert_eq!(host.controller().unwrap().listeners().len(), 1);

    let form = node(&host, "contactForm");
    host.push_event(Event::Submit(form));
    host.step().unwrap();
    assert_eq!(host.take_outputs().alerts, vec!["Thanks!".to_string()]);
}
