//! `web-sys` implementation of [`MediaHost`]

use crate::error::{PlaybackError, Result};
use crate::host::MediaHost;
use crate::render::{Bindings, RenderDirective};
use crate::types::{ElementId, MediaEvent, TimerId, Visibility};
use cue_document::MediaKind;
use js_sys::Reflect;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, HtmlMediaElement, Window};

/// What the page reports back to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostSignal {
    Media(MediaEvent),
    Next,
    Previous,
    Visibility(Visibility),
}

/// Receiver for [`HostSignal`]s
pub type Dispatcher = Rc<dyn Fn(HostSignal)>;

type Listener = Closure<dyn FnMut(Event)>;

/// Elements and closures of one render
struct Mounted {
    id: ElementId,
    kind: MediaKind,
    element: HtmlElement,
    /// Lifecycle listeners, registered or not
    lifecycle: Vec<(&'static str, Listener)>,
    registered: bool,
    /// Banner and navigation button handlers, held for the element's lifetime
    _handlers: Vec<Listener>,
}

impl Mounted {
    fn media(&self) -> Option<&HtmlMediaElement> {
        self.element.dyn_ref::<HtmlMediaElement>()
    }
}

/// Renders playlist items into a container element
pub struct WebMediaHost {
    window: Window,
    document: Document,
    container: Element,
    dispatcher: Option<Dispatcher>,
    mounted: Option<Mounted>,
    // Kept one render longer: the handler that caused a re-render is still
    // on the stack when the next mount happens.
    retired: Vec<Mounted>,
    timers: HashMap<TimerId, i32>,
}

impl WebMediaHost {
    /// Host rendering into the element with id `container_id`
    pub fn new(container_id: &str) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| host_error("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| host_error("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| host_error(&format!("no element with id '{container_id}'")))?;

        Ok(Self {
            window,
            document,
            container,
            dispatcher: None,
            mounted: None,
            retired: Vec::new(),
            timers: HashMap::new(),
        })
    }

    pub fn set_dispatcher(&mut self, dispatcher: Dispatcher) {
        self.dispatcher = Some(dispatcher);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn dispatcher(&self) -> Dispatcher {
        match &self.dispatcher {
            Some(dispatch) => Rc::clone(dispatch),
            None => Rc::new(|_: HostSignal| warn!("Host signal before a dispatcher was set")),
        }
    }

    fn signal_listener(&self, signal: HostSignal) -> Listener {
        let dispatch = self.dispatcher();
        Closure::wrap(Box::new(move |_: Event| dispatch(signal)) as Box<dyn FnMut(Event)>)
    }

    fn create(&self, tag: &str) -> std::result::Result<HtmlElement, JsValue> {
        self.document.create_element(tag)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
    }

    fn build(&self, id: ElementId, directive: &RenderDirective) -> std::result::Result<Mounted, JsValue> {
        self.container.set_inner_html("");

        if let Some(heading) = &directive.heading {
            let h2 = self.create("h2")?;
            h2.set_text_content(Some(heading));
            self.container.append_child(&h2)?;
        }

        let h3 = self.create("h3")?;
        h3.set_text_content(Some(&directive.title));
        self.container.append_child(&h3)?;

        let element = self.create(directive.kind.tag_name())?;
        element.set_attribute("src", &directive.url)?;
        let mut handlers = Vec::new();

        match directive.kind {
            MediaKind::Video => element.set_attribute("style", "width: 99%; height: 96%;")?,
            MediaKind::Audio => element.set_attribute("style", "width: 99%;")?,
            MediaKind::Image => element.set_attribute("style", "max-width: 99%; max-height: 96%;")?,
        }

        if let Some(media) = element.dyn_ref::<HtmlMediaElement>() {
            media.set_controls(directive.controls);
            media.set_autoplay(directive.autoplay);
            set_playback_rate(media, directive.playback_rate);
        }
        if let Some(poster) = directive.poster.as_deref().filter(|_| directive.kind == MediaKind::Video) {
            element.set_attribute("poster", poster)?;
        }

        if let Some(banner_url) = &directive.banner {
            let banner = self.create("img")?;
            banner.set_attribute("src", banner_url)?;
            banner.set_attribute("style", "max-width: 99%;")?;
            if directive.banner_toggle {
                let listener = self.signal_listener(HostSignal::Media(MediaEvent::BannerClick(id)));
                banner.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
                handlers.push(listener);
            }
            self.container.append_child(&banner)?;
        }

        self.container.append_child(&element)?;

        let nav = self.create("div")?;
        let prev = self.create("button")?;
        prev.set_text_content(Some("Prev"));
        let label = self.create("span")?;
        label.set_text_content(Some(&directive.navigation.label()));
        let next = self.create("button")?;
        next.set_text_content(Some("Next"));

        for (button, signal) in [(&prev, HostSignal::Previous), (&next, HostSignal::Next)] {
            let listener = self.signal_listener(signal);
            button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
            handlers.push(listener);
        }
        nav.append_child(&prev)?;
        nav.append_child(&label)?;
        nav.append_child(&next)?;
        self.container.append_child(&nav)?;

        Ok(Mounted {
            id,
            kind: directive.kind,
            element,
            lifecycle: Vec::new(),
            registered: false,
            _handlers: handlers,
        })
    }

    fn lifecycle_listeners(&self, mounted: &Mounted, bindings: Bindings) -> Vec<(&'static str, Listener)> {
        let id = mounted.id;
        let mut listeners = Vec::new();

        if bindings.ready {
            listeners.push(("loadedmetadata", self.signal_listener(HostSignal::Media(MediaEvent::Ready(id)))));
        }
        if bindings.progress {
            if let Some(media) = mounted.media().cloned() {
                let dispatch = self.dispatcher();
                let listener = Closure::wrap(Box::new(move |_: Event| {
                    dispatch(HostSignal::Media(MediaEvent::Progress {
                        element: id,
                        position: media.current_time(),
                    }));
                }) as Box<dyn FnMut(Event)>);
                listeners.push(("timeupdate", listener));
            }
        }
        if bindings.ended {
            listeners.push(("ended", self.signal_listener(HostSignal::Media(MediaEvent::Ended(id)))));
        }
        if bindings.click_toggle {
            listeners.push(("click", self.signal_listener(HostSignal::Media(MediaEvent::Click(id)))));
        }

        listeners
    }

    fn with_media(&self, element: ElementId, f: impl FnOnce(&HtmlMediaElement)) {
        if let Some(media) = self
            .mounted
            .as_ref()
            .filter(|m| m.id == element)
            .and_then(Mounted::media)
        {
            f(media);
        }
    }
}

impl MediaHost for WebMediaHost {
    fn mount(&mut self, element: ElementId, directive: &RenderDirective) {
        self.retired.clear();
        if let Some(previous) = self.mounted.take() {
            self.retired.push(previous);
        }

        match self.build(element, directive) {
            Ok(mounted) => self.mounted = Some(mounted),
            Err(e) => warn!("Failed to render {}: {:?}", element, e),
        }
    }

    fn attach(&mut self, element: ElementId, bindings: Bindings) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };

        if mounted.id == element && !mounted.registered {
            if mounted.lifecycle.is_empty() {
                mounted.lifecycle = self.lifecycle_listeners(&mounted, bindings);
            }
            for (name, listener) in &mounted.lifecycle {
                if let Err(e) = mounted
                    .element
                    .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                {
                    warn!("Failed to add {} listener: {:?}", name, e);
                }
            }
            mounted.registered = true;
        }

        self.mounted = Some(mounted);
    }

    fn detach(&mut self, element: ElementId) {
        let Some(mounted) = self.mounted.as_mut().filter(|m| m.id == element) else {
            return;
        };

        if mounted.registered {
            for (name, listener) in &mounted.lifecycle {
                if let Err(e) = mounted
                    .element
                    .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                {
                    warn!("Failed to remove {} listener: {:?}", name, e);
                }
            }
            mounted.registered = false;
        }
    }

    fn seek(&mut self, element: ElementId, position: f64) {
        self.with_media(element, |media| media.set_current_time(position));
    }

    fn play(&mut self, element: ElementId) {
        self.with_media(element, |media| {
            // The returned promise is not observed
            if let Err(e) = media.play() {
                warn!("play() failed: {:?}", e);
            }
        });
    }

    fn pause(&mut self, element: ElementId) {
        self.with_media(element, |media| {
            if let Err(e) = media.pause() {
                warn!("pause() failed: {:?}", e);
            }
        });
    }

    fn is_paused(&self, element: ElementId) -> bool {
        self.mounted
            .as_ref()
            .filter(|m| m.id == element && m.kind.is_playable())
            .and_then(Mounted::media)
            .map_or(true, HtmlMediaElement::paused)
    }

    fn schedule_timer(&mut self, timer: TimerId, delay: Duration) {
        let dispatch = self.dispatcher();
        // Freed by wasm-bindgen once called; a cancelled timer's closure is leaked
        let callback = Closure::once_into_js(move || dispatch(HostSignal::Media(MediaEvent::TimerFired(timer))));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(handle) => {
                // At most one timer is pending at a time; older handles have fired
                self.timers.clear();
                self.timers.insert(timer, handle);
            }
            Err(e) => warn!("setTimeout failed for {}: {:?}", timer, e),
        }
    }

    fn cancel_timer(&mut self, timer: TimerId) {
        if let Some(handle) = self.timers.remove(&timer) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn go_back(&mut self) {
        match self.window.history() {
            Ok(history) => {
                if let Err(e) = history.back() {
                    warn!("history.back() failed: {:?}", e);
                }
            }
            Err(e) => warn!("No history: {:?}", e),
        }
    }

    fn show_ended(&mut self) {
        let notice = self.create("div").and_then(|div| {
            div.set_inner_html("<p><strong>Playlist ended</strong></p>");
            self.container.append_child(&div)
        });
        if let Err(e) = notice {
            warn!("Failed to show end notice: {:?}", e);
        }
    }
}

/// Set both rate properties, logging a rate the browser refuses
///
/// The web-sys setters do not catch the `NotSupportedError` an unsupported
/// rate throws; `Reflect::set` does.
fn set_playback_rate(media: &HtmlMediaElement, rate: f64) {
    for property in ["defaultPlaybackRate", "playbackRate"] {
        let key = JsValue::from_str(property);
        if let Err(e) = Reflect::set(media, &key, &JsValue::from_f64(rate)) {
            warn!("Failed to set {} to {}: {:?}", property, rate, e);
        }
    }
}

fn host_error(message: &str) -> PlaybackError {
    PlaybackError::Host(message.to_string())
}
