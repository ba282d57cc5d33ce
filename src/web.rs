//! Browser binding: a DOM-backed surface and the `StickyTables` JS export.
//!
//! Window scroll and resize listeners are registered when `StickyTables` is
//! constructed and removed again by `destroy()` (or when the object is freed).
//! Constructing it also routes `log` records to the browser console at `warn`;
//! call `setLogLevel("debug")` to see setup and placement traces.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { StickyTables } from 'stickytable';
//! await init();
//! const sticky = new StickyTables({ kind: "coalesced", delay_ms: 100 });
//! for (const table of document.querySelectorAll("table")) {
//!     sticky.apply(table, { stick_footer: true, offset_height: 20 });
//! }
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, Node, Window};

use crate::config::{ResizeStrategy, StickyConfig};
use crate::dispatcher::ScrollDispatcher;
use crate::error::StickyError;
use crate::surface::{RenderSurface, TablePart};

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("{} {}", record.level(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger at `level`. Only the first call installs it;
/// later calls just change the level. Returns `false` when another logger was
/// installed first.
pub fn init_console_logger(level: log::LevelFilter) -> bool {
    let installed = log::set_logger(&CONSOLE_LOGGER).is_ok();
    log::set_max_level(level);
    installed
}

/// Change the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`).
///
/// # Errors
/// Rejects an unknown level name.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level: log::LevelFilter = level
        .parse()
        .map_err(|_| StickyError::Config(format!("unknown log level {level:?}")))?;
    init_console_logger(level);
    Ok(())
}

/// `RenderSurface` over the live document of a browser window.
#[derive(Debug, Clone)]
pub struct DomSurface {
    window: Window,
}

impl DomSurface {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn query_all(element: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = element.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn padding_x(&self, element: &HtmlElement) -> f64 {
        let Ok(Some(computed)) = self.window.get_computed_style(element) else {
            return 0.0;
        };
        ["padding-left", "padding-right"]
            .iter()
            .filter_map(|p| computed.get_property_value(p).ok())
            .filter_map(|v| v.trim_end_matches("px").parse::<f64>().ok())
            .sum()
    }
}

impl RenderSurface for DomSurface {
    type Element = HtmlElement;

    fn find_part(&self, table: &HtmlElement, part: TablePart) -> Option<HtmlElement> {
        let selector = match part {
            TablePart::Header => ":scope > thead",
            TablePart::Footer => ":scope > tfoot",
            TablePart::Body => ":scope > tbody",
            TablePart::LastBodyRow => {
                return Self::query_all(table, ":scope > tbody > tr").pop();
            }
        };
        table
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    fn cells(&self, section: &HtmlElement, tag: &str) -> Vec<HtmlElement> {
        Self::query_all(section, tag)
    }

    fn outer_height(&self, element: &HtmlElement) -> f64 {
        element.get_bounding_client_rect().height()
    }

    fn outer_width(&self, element: &HtmlElement) -> f64 {
        element.get_bounding_client_rect().width()
    }

    fn width(&self, element: &HtmlElement) -> f64 {
        (f64::from(element.client_width()) - self.padding_x(element)).max(0.0)
    }

    fn offset_top(&self, element: &HtmlElement) -> f64 {
        element.get_bounding_client_rect().top() + self.scroll_top()
    }

    fn set_outer_width(&mut self, element: &HtmlElement, width: f64) {
        let style = element.style();
        let _ = style.set_property("box-sizing", "border-box");
        let _ = style.set_property("width", &format!("{width}px"));
    }

    fn clone_after(&mut self, element: &HtmlElement) -> Option<HtmlElement> {
        let parent = element.parent_node()?;
        let copy = element
            .clone_node_with_deep(true)
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let next: Option<Node> = element.next_sibling();
        parent.insert_before(&copy, next.as_ref()).ok()?;
        Some(copy)
    }

    fn remove(&mut self, element: &HtmlElement) {
        element.remove();
    }

    fn add_class(&mut self, element: &HtmlElement, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&mut self, element: &HtmlElement, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn set_style(&mut self, element: &HtmlElement, property: &str, value: &str) {
        let style = element.style();
        // Skip no-op writes so repeated decisions never touch the DOM
        if style.get_property_value(property).ok().as_deref() == Some(value) {
            return;
        }
        let _ = style.set_property(property, value);
    }

    fn remove_style(&mut self, element: &HtmlElement, property: &str) {
        let _ = element.style().remove_property(property);
    }

    fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }
}

/// State shared between `StickyTables` and its event closures.
struct Shared {
    dispatcher: ScrollDispatcher<DomSurface>,
    resize_timer: Option<i32>,
    resize_settle_closure: Option<Closure<dyn FnMut()>>,
}

/// Sticky headers/footers for any number of tables on the page.
#[wasm_bindgen]
pub struct StickyTables {
    window: Window,
    state: Rc<RefCell<Shared>>,
    scroll_closure: Option<Closure<dyn FnMut(Event)>>,
    resize_closure: Option<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl StickyTables {
    /// Create the binding and start listening to window scroll and resize.
    ///
    /// `resize_strategy` is `{ kind: "raw" }` (default when omitted) or
    /// `{ kind: "coalesced", delay_ms }`.
    #[wasm_bindgen(constructor)]
    pub fn new(resize_strategy: JsValue) -> Result<StickyTables, JsValue> {
        console_error_panic_hook::set_once();
        if log::max_level() == log::LevelFilter::Off {
            init_console_logger(log::LevelFilter::Warn);
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let strategy: ResizeStrategy = if resize_strategy.is_undefined() || resize_strategy.is_null()
        {
            ResizeStrategy::default()
        } else {
            serde_wasm_bindgen::from_value(resize_strategy)
                .map_err(|e| StickyError::Config(e.to_string()))?
        };

        let state = Rc::new(RefCell::new(Shared {
            dispatcher: ScrollDispatcher::new(DomSurface::new(window.clone())),
            resize_timer: None,
            resize_settle_closure: None,
        }));

        let weak = Rc::downgrade(&state);
        let scroll_closure = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().dispatcher.handle_scroll();
            }
        }) as Box<dyn FnMut(Event)>);
        window
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref())?;

        let weak = Rc::downgrade(&state);
        let resize_closure = Closure::wrap(Box::new(move |_event: Event| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            match strategy.delay_ms() {
                None => state.borrow_mut().dispatcher.handle_resize(),
                Some(delay_ms) => Self::schedule_resize(&state, delay_ms),
            }
        }) as Box<dyn FnMut(Event)>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;

        log::debug!("[sticky] listening with {strategy:?} resize");
        Ok(StickyTables {
            window,
            state,
            scroll_closure: Some(scroll_closure),
            resize_closure: Some(resize_closure),
        })
    }

    /// Make `table` sticky. Returns the table's slot index.
    ///
    /// `options` takes the same keys as the Rust `StickyConfig`; omitted keys
    /// use their defaults.
    pub fn apply(&self, table: HtmlElement, options: JsValue) -> Result<u32, JsValue> {
        let config: StickyConfig = if options.is_undefined() || options.is_null() {
            StickyConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| StickyError::Config(e.to_string()))?
        };
        let handle = self.state.borrow_mut().dispatcher.apply(&table, config)?;
        Ok(handle.index())
    }

    /// Remove the sticky copies from `table`. Returns `false` if it was never
    /// applied.
    pub fn detach(&self, table: &HtmlElement) -> Result<bool, JsValue> {
        let mut state = self.state.borrow_mut();
        let Some(handle) = state.dispatcher.handle_for(table) else {
            return Ok(false);
        };
        state.dispatcher.detach(handle)?;
        Ok(true)
    }

    /// Re-measure every table now (after content changes, for example).
    pub fn refresh(&self) {
        self.state.borrow_mut().dispatcher.handle_resize();
    }

    /// Re-evaluate every table at the current scroll offset.
    pub fn scroll(&self) {
        self.state.borrow_mut().dispatcher.handle_scroll();
    }

    /// Number of tables currently sticky.
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.state.borrow().dispatcher.len()
    }

    /// Detach all tables and stop listening. The object is inert afterwards.
    pub fn destroy(&mut self) {
        self.release();
    }
}

impl StickyTables {
    fn schedule_resize(state: &Rc<RefCell<Shared>>, delay_ms: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        // Cancel any pending refresh
        if let Some(timer_id) = s.resize_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.resize_settle_closure.is_none() {
            let weak: Weak<RefCell<Shared>> = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    let mut s = state.borrow_mut();
                    s.resize_timer = None;
                    s.dispatcher.handle_resize();
                }
            }) as Box<dyn FnMut()>);
            s.resize_settle_closure = Some(closure);
        }
        let Some(callback) = s.resize_settle_closure.as_ref() else {
            return;
        };
        let callback: &js_sys::Function = callback.as_ref().unchecked_ref();
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        s.resize_timer = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback, timeout)
            .ok();
    }

    fn release(&mut self) {
        if let Some(closure) = self.scroll_closure.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
        if let Some(closure) = self.resize_closure.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        let Ok(mut s) = self.state.try_borrow_mut() else {
            return;
        };
        if let Some(timer_id) = s.resize_timer.take() {
            self.window.clear_timeout_with_handle(timer_id);
        }
        s.resize_settle_closure = None;
        s.dispatcher.detach_all();
    }
}

impl Drop for StickyTables {
    fn drop(&mut self) {
        self.release();
    }
}
