//! WASM-compatible playlist player
//!
//! Wraps a [`PlaybackSession`] and a [`WebMediaHost`] with a
//! JavaScript-friendly API. Page callbacks reach the session through a
//! dispatcher holding a weak reference, so closures never keep the player
//! alive on their own.

use super::host::{Dispatcher, HostSignal, WebMediaHost};
use super::storage::LocalStorageStore;
use crate::error::PlaybackError;
use crate::session::PlaybackSession;
use crate::types::Visibility;
use cue_document::{is_editor_mode, storage_key, DocumentRepository, PlaylistDocument};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Event, VisibilityState};

struct PlayerCore {
    session: PlaybackSession,
    host: WebMediaHost,
}

impl PlayerCore {
    fn dispatch(&mut self, signal: HostSignal) {
        let PlayerCore { session, host } = self;
        match signal {
            HostSignal::Media(event) => session.handle_event(host, event),
            HostSignal::Next => session.next(host),
            HostSignal::Previous => session.previous(host),
            HostSignal::Visibility(visibility) => session.visibility_changed(host, visibility),
        }
    }
}

fn dispatcher(core: Weak<RefCell<PlayerCore>>) -> Dispatcher {
    Rc::new(move |signal: HostSignal| {
        let Some(core) = core.upgrade() else {
            return;
        };
        let Ok(mut core) = core.try_borrow_mut() else {
            warn!("Dropping re-entrant {:?}", signal);
            return;
        };
        core.dispatch(signal);
    })
}

/// WASM-compatible playlist player
#[wasm_bindgen]
pub struct WasmPlaylistPlayer {
    core: Rc<RefCell<PlayerCore>>,
    _visibility: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl WasmPlaylistPlayer {
    /// Create a player rendering into the element with id `container_id`
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<WasmPlaylistPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let host = WebMediaHost::new(container_id).map_err(to_js)?;
        let document = host.document().clone();

        let core = Rc::new(RefCell::new(PlayerCore {
            session: PlaybackSession::new(),
            host,
        }));
        let dispatch = dispatcher(Rc::downgrade(&core));
        core.borrow_mut().host.set_dispatcher(Rc::clone(&dispatch));

        let page = document.clone();
        let visibility = Closure::wrap(Box::new(move |_: Event| {
            let visibility = match page.visibility_state() {
                VisibilityState::Hidden => Visibility::Hidden,
                _ => Visibility::Visible,
            };
            dispatch(HostSignal::Visibility(visibility));
        }) as Box<dyn FnMut(Event)>);
        document
            .add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;

        Ok(Self {
            core,
            _visibility: visibility,
        })
    }

    // ===== Documents =====

    /// Load a playlist from JSON text
    pub fn load(&self, json: &str) -> Result<(), JsValue> {
        let document = PlaylistDocument::from_json(json).map_err(|e| to_js(e.into()))?;
        self.with_core(|core| core.session.load(&mut core.host, document))
    }

    /// Load a playlist from a JavaScript object
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&self, value: JsValue) -> Result<(), JsValue> {
        let json: serde_json::Value = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse playlist: {}", e)))?;
        let document = PlaylistDocument::from_value(json).map_err(|e| to_js(e.into()))?;
        self.with_core(|core| core.session.load(&mut core.host, document))
    }

    /// Load the playlist stored for a page query string
    ///
    /// Returns false when nothing is stored under the page's key.
    #[wasm_bindgen(js_name = loadStored)]
    pub fn load_stored(&self, query: &str) -> Result<bool, JsValue> {
        let repo = DocumentRepository::new(LocalStorageStore::new().map_err(|e| to_js(e.into()))?);
        let Some(document) = repo.load(&storage_key(query)).map_err(|e| to_js(e.into()))? else {
            return Ok(false);
        };

        self.with_core(|core| core.session.load(&mut core.host, document))?;
        Ok(true)
    }

    /// Validate, store and play a playlist for a page query string
    pub fn save(&self, json: &str, query: &str) -> Result<(), JsValue> {
        let document = PlaylistDocument::from_json(json).map_err(|e| to_js(e.into()))?;
        let mut repo =
            DocumentRepository::new(LocalStorageStore::new().map_err(|e| to_js(e.into()))?);
        repo.save(&storage_key(query), &document)
            .map_err(|e| to_js(e.into()))?;

        self.with_core(|core| core.session.load(&mut core.host, document))
    }

    /// Starter playlist shown in the editor on first visit
    #[wasm_bindgen(js_name = defaultDocument)]
    pub fn default_document() -> JsValue {
        serde_wasm_bindgen::to_value(&PlaylistDocument::default_document()).unwrap_or(JsValue::NULL)
    }

    /// Whether the page should show the editor
    #[wasm_bindgen(js_name = isEditorMode)]
    pub fn editor_mode(query: &str) -> bool {
        is_editor_mode(query)
    }

    // ===== Navigation =====

    pub fn next(&self) -> Result<(), JsValue> {
        self.with_core(|core| core.session.next(&mut core.host))
    }

    pub fn previous(&self) -> Result<(), JsValue> {
        self.with_core(|core| core.session.previous(&mut core.host))
    }

    // ===== State Queries =====

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> usize {
        self.core.borrow().session.current_index()
    }

    #[wasm_bindgen(js_name = mediaCount)]
    pub fn media_count(&self) -> usize {
        self.core
            .borrow()
            .session
            .document()
            .map_or(0, PlaylistDocument::len)
    }

    #[wasm_bindgen(js_name = isEnded)]
    pub fn is_ended(&self) -> bool {
        self.core.borrow().session.is_ended()
    }

    /// Take events recorded since the last call, as an array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> JsValue {
        let events = self.core.borrow_mut().session.drain_events();
        serde_wasm_bindgen::to_value(&events).unwrap_or(JsValue::NULL)
    }

    fn with_core(&self, f: impl FnOnce(&mut PlayerCore)) -> Result<(), JsValue> {
        let mut core = self
            .core
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Player is busy"))?;
        f(&mut core);
        Ok(())
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
