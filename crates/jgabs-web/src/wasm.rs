#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use jgabs_core::{Cmd, Dom, Event, ViewConfig, debug, warn};
use jgabs_view::{Listener, ViewController};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use crate::{handler_failure, mount_is_deferred, parse_options};

const DOM_CONTENT_LOADED: &str = "DOMContentLoaded";

/// A JavaScript exception raised by a DOM call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsError(String);

impl JsError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<JsValue> for JsError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .dyn_ref::<js_sys::Error>()
            .map(|err| String::from(err.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{value:?}"));
        Self(msg)
    }
}

impl From<JsError> for JsValue {
    fn from(err: JsError) -> Self {
        JsValue::from_str(&err.0)
    }
}

impl core::fmt::Display for JsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "js error: {}", self.0)
    }
}

impl std::error::Error for JsError {}

/// [`Dom`] over the live browser document.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: web_sys::Document,
}

impl WebDom {
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the global `window`.
    pub fn from_window() -> Result<Self, JsError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| JsError::new("no window document"))
    }

    #[must_use]
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

fn html_element(node: &Element) -> Result<&HtmlElement, JsError> {
    node.dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsError::new("element has no inline style"))
}

impl Dom for WebDom {
    type Node = Element;
    type Error = JsError;

    fn location_path(&self) -> String {
        self.document
            .location()
            .and_then(|location| location.pathname().ok())
            .unwrap_or_default()
    }

    fn element_by_id(&self, id: &str) -> Result<Option<Element>, JsError> {
        Ok(self.document.get_element_by_id(id))
    }

    fn query_all(&self, scope: Option<&Element>, selector: &str) -> Result<Vec<Element>, JsError> {
        let list = match scope {
            Some(scope) => scope.query_selector_all(selector)?,
            None => self.document.query_selector_all(selector)?,
        };
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn query(&self, scope: Option<&Element>, selector: &str) -> Result<Option<Element>, JsError> {
        Ok(match scope {
            Some(scope) => scope.query_selector(selector)?,
            None => self.document.query_selector(selector)?,
        })
    }

    fn attr(&self, node: &Element, name: &str) -> Result<Option<String>, JsError> {
        Ok(node.get_attribute(name))
    }

    fn set_attr(&mut self, node: &Element, name: &str, value: &str) -> Result<(), JsError> {
        Ok(node.set_attribute(name, value)?)
    }

    fn remove_attr(&mut self, node: &Element, name: &str) -> Result<(), JsError> {
        Ok(node.remove_attribute(name)?)
    }

    fn has_class(&self, node: &Element, class: &str) -> Result<bool, JsError> {
        Ok(node.class_list().contains(class))
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), JsError> {
        Ok(node.class_list().add_1(class)?)
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<(), JsError> {
        Ok(node.class_list().remove_1(class)?)
    }

    fn text_content(&self, node: &Element) -> Result<String, JsError> {
        Ok(node.text_content().unwrap_or_default())
    }

    fn set_text_content(&mut self, node: &Element, text: &str) -> Result<(), JsError> {
        node.set_text_content((!text.is_empty()).then_some(text));
        Ok(())
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, JsError> {
        Ok(self.document.create_element(tag)?)
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), JsError> {
        parent.append_child(child)?;
        Ok(())
    }

    fn clear_children(&mut self, node: &Element) -> Result<(), JsError> {
        node.set_inner_html("");
        Ok(())
    }

    fn clone_deep(&mut self, node: &Element) -> Result<Element, JsError> {
        node.clone_node_with_deep(true)?
            .dyn_into::<Element>()
            .map_err(|_| JsError::new("clone is not an element"))
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) -> Result<(), JsError> {
        let style = html_element(node)?.style();
        if value.is_empty() {
            style.remove_property(property)?;
        } else {
            style.set_property(property, value)?;
        }
        Ok(())
    }

    fn control_value(&self, node: &Element) -> Result<String, JsError> {
        if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            Ok(select.value())
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            Ok(input.value())
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            Ok(area.value())
        } else {
            Ok(node.get_attribute("value").unwrap_or_default())
        }
    }

    fn reset_form(&mut self, form: &Element) -> Result<(), JsError> {
        form.dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| JsError::new("reset target is not a form"))?
            .reset();
        Ok(())
    }
}

struct Mounted {
    dom: WebDom,
    controller: ViewController<Element>,
}

struct Attached {
    target: Element,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

type SharedState = Rc<RefCell<Option<Mounted>>>;
type SharedListeners = Rc<RefCell<Vec<Attached>>>;

/// The journal page behaviors, mounted on the browser document.
///
/// `mount` runs the page-load sequence as soon as the document has been
/// parsed and wires one listener per element the controller asks for.
/// `destroy` detaches every listener and drops the controller.
#[wasm_bindgen]
pub struct JournalPage {
    state: SharedState,
    listeners: SharedListeners,
    pending: Option<(web_sys::Document, Closure<dyn FnMut()>)>,
}

impl Default for JournalPage {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JournalPage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            pending: None,
        }
    }

    /// Mount on `window.document`.
    ///
    /// `options_json` is a partial JSON object overriding selectors, ids,
    /// class names or messages. While the document is still loading, the
    /// mount is deferred to `DOMContentLoaded`.
    pub fn mount(&mut self, options_json: Option<String>) -> Result<(), JsValue> {
        let config = parse_options(options_json.as_deref())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let dom = WebDom::from_window()?;
        self.destroy();

        if !mount_is_deferred(&dom.document().ready_state()) {
            return Ok(start(&self.state, &self.listeners, dom, config)?);
        }

        let document = dom.document().clone();
        let state = Rc::clone(&self.state);
        let listeners = Rc::clone(&self.listeners);
        let mut deferred = Some((dom, config));
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Some((dom, config)) = deferred.take()
                && let Err(err) = start(&state, &listeners, dom, config)
            {
                warn!(error = %err, "journal page mount failed");
                console_line(&format!("journal page mount failed: {err}"));
            }
        });
        document
            .add_event_listener_with_callback(DOM_CONTENT_LOADED, on_ready.as_ref().unchecked_ref())?;
        self.pending = Some((document, on_ready));
        debug!("journal page mount deferred until DOMContentLoaded");
        Ok(())
    }

    /// Whether the controller is live.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Explicit teardown for JS callers.
    pub fn destroy(&mut self) {
        for attached in self.listeners.borrow_mut().drain(..) {
            let _ = attached.target.remove_event_listener_with_callback(
                attached.event,
                attached.callback.as_ref().unchecked_ref(),
            );
        }
        if let Some((document, on_ready)) = self.pending.take() {
            let _ = document.remove_event_listener_with_callback(
                DOM_CONTENT_LOADED,
                on_ready.as_ref().unchecked_ref(),
            );
        }
        self.state.borrow_mut().take();
    }
}

impl Drop for JournalPage {
    fn drop(&mut self) {
        // JS `free()` without `destroy()` still detaches every listener.
        self.destroy();
    }
}

fn start(
    state: &SharedState,
    listeners: &SharedListeners,
    mut dom: WebDom,
    config: ViewConfig,
) -> Result<(), JsError> {
    let controller = ViewController::initialize(&mut dom, config)?;
    let wiring = controller.listeners();
    *state.borrow_mut() = Some(Mounted { dom, controller });

    let mut attached = listeners.borrow_mut();
    for Listener { event, target } in wiring {
        let make: fn(Element) -> Event<Element> = match event {
            "click" => Event::Click,
            "change" => Event::Change,
            _ => Event::Submit,
        };
        let state = Rc::clone(state);
        let node = target.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |native: web_sys::Event| {
            dispatch(&state, make(node.clone()), &native);
        });
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        attached.push(Attached {
            target,
            event,
            callback,
        });
    }
    debug!(listeners = attached.len(), "journal page mounted");
    Ok(())
}

fn dispatch(state: &SharedState, event: Event<Element>, native: &web_sys::Event) {
    let kind = event.kind();
    let result = {
        let Ok(mut guard) = state.try_borrow_mut() else {
            warn!(event = kind, "nested dispatch dropped");
            console_line(&format!("nested {kind} dispatch dropped"));
            return;
        };
        let Some(Mounted { dom, controller }) = guard.as_mut() else {
            return;
        };
        controller.update(dom, event)
    };
    match result {
        Ok(cmd) => execute_cmd(cmd, native),
        Err(err) => {
            warn!(error = %err, event = kind, "event handler failed");
            execute_cmd(handler_failure(kind, &err), native);
        }
    }
}

fn execute_cmd(cmd: Cmd, native: &web_sys::Event) {
    match cmd {
        Cmd::None => {}
        Cmd::PreventDefault => native.prevent_default(),
        Cmd::Alert(msg) => {
            if let Some(window) = web_sys::window()
                && let Err(err) = window.alert_with_message(&msg)
            {
                let err = JsError::from(err);
                warn!(error = %err, "alert failed");
                console_line(&format!("alert failed: {err}"));
            }
        }
        Cmd::Log(msg) => console_line(&msg),
        Cmd::Batch(cmds) => {
            for cmd in cmds {
                execute_cmd(cmd, native);
            }
        }
    }
}

/// Host diagnostics go to the console whether or not `tracing` is compiled in.
fn console_line(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}
