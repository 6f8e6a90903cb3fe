//! Web-specific game engine implementation
//!
//! Browser implementations of the geoguess-game collaborator traits, plus
//! loaders for the bundled configuration. Core types are re-exported.

use gloo::storage::{SessionStorage, Storage};
use js_sys::{Object, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Navigator, PermissionStatus, Position, PositionError};

// Re-export all types from geoguess-game
pub use geoguess_game::*;

use crate::dom;

pub type WebEngine = GameEngine<WebGeolocator, EmailJsMailer, SessionStorageFlag>;

#[derive(Debug, thiserror::Error)]
pub enum WebConfigError {
    #[error("country pool: {0}")]
    Pool(#[from] PoolError),
    #[error("email config: {0}")]
    Email(#[from] serde_json::Error),
}

/// Country pool from the bundled asset, or the built-in list if it is unusable.
#[must_use]
pub fn load_country_pool() -> CountryPool {
    CountryPool::from_json(include_str!("../static/assets/data/countries.json"))
        .map_err(WebConfigError::from)
        .unwrap_or_else(|err| {
            log::warn!("{err}; using built-in countries");
            CountryPool::builtin()
        })
}

/// Email credentials from the bundled asset. Missing values leave it unconfigured.
#[must_use]
pub fn load_email_config() -> EmailConfig {
    EmailConfig::from_json(include_str!("../static/assets/data/email.json"))
        .map_err(WebConfigError::from)
        .unwrap_or_else(|err| {
            log::warn!("{err}; notifications disabled");
            EmailConfig::default()
        })
}

#[must_use]
pub fn create_web_engine() -> WebEngine {
    GameEngine::new(
        WebGeolocator,
        NotificationDispatcher::new(EmailJsMailer, load_email_config()),
        SessionStorageFlag,
    )
}

/// Fresh gate over the bundled pool.
#[must_use]
pub fn create_session_gate() -> SessionGate {
    SessionGate::new(Puzzle::new(load_country_pool(), session_seed()))
}

/// Per-page-load seed for country and mask selection.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn session_seed() -> u64 {
    let now = js_sys::Date::now().to_bits();
    let noise = js_sys::Math::random().to_bits();
    now.rotate_left(17) ^ noise
}

#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub const fn session_seed() -> u64 {
    0x6E06_0E55
}

fn navigator() -> Option<Navigator> {
    dom::window().map(|win| win.navigator())
}

/// Geolocation backed by `navigator.geolocation` and `navigator.permissions`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebGeolocator;

#[must_use]
pub const fn permission_from_web(state: web_sys::PermissionState) -> PermissionState {
    match state {
        web_sys::PermissionState::Granted => PermissionState::Granted,
        web_sys::PermissionState::Denied => PermissionState::Denied,
        _ => PermissionState::Unknown,
    }
}

async fn permission_status() -> Result<PermissionStatus, JsValue> {
    let navigator = navigator().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    if !dom::has_property(&navigator, "permissions") {
        return Err(JsValue::from_str("permissions API unavailable"));
    }
    let descriptor = Object::new();
    Reflect::set(
        &descriptor,
        &JsValue::from_str("name"),
        &JsValue::from_str("geolocation"),
    )?;
    let promise = navigator.permissions()?.query(&descriptor)?;
    JsFuture::from(promise).await?.dyn_into::<PermissionStatus>()
}

fn location_error_from_js(value: &JsValue) -> LocationError {
    value.dyn_ref::<PositionError>().map_or_else(
        || LocationError::Other(dom::js_error_message(value)),
        |err| LocationError::from_code(err.code(), &err.message()),
    )
}

impl WebGeolocator {
    /// Subscribe to permission changes for the rest of the page lifetime.
    ///
    /// Returns `false` when the runtime cannot report permission changes.
    #[allow(clippy::future_not_send)]
    pub async fn watch_permission(&self, on_change: impl Fn(PermissionState) + 'static) -> bool {
        let status = match permission_status().await {
            Ok(status) => status,
            Err(err) => {
                log::debug!("permission watch unavailable: {}", dom::js_error_message(&err));
                return false;
            }
        };
        let observed = status.clone();
        let handler = Closure::<dyn FnMut()>::new(move || {
            on_change(permission_from_web(observed.state()));
        });
        status.set_onchange(Some(handler.as_ref().unchecked_ref()));
        handler.forget();
        true
    }
}

impl Geolocator for WebGeolocator {
    fn is_supported(&self) -> bool {
        navigator().is_some_and(|nav| dom::has_property(&nav, "geolocation"))
    }

    async fn query_permission(&self) -> Option<PermissionState> {
        match permission_status().await {
            Ok(status) => Some(permission_from_web(status.state())),
            Err(err) => {
                log::debug!("permission query failed: {}", dom::js_error_message(&err));
                None
            }
        }
    }

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        let geolocation = navigator()
            .ok_or(LocationError::Unsupported)?
            .geolocation()
            .map_err(|err| location_error_from_js(&err))?;

        let web_options = web_sys::PositionOptions::new();
        web_options.set_enable_high_accuracy(options.high_accuracy);
        web_options.set_timeout(options.timeout_ms);
        web_options.set_maximum_age(options.maximum_age_ms);

        let promise = Promise::new(&mut |resolve, reject| {
            let on_error = reject.clone();
            let success = Closure::once_into_js(move |position: Position| {
                let _ = resolve.call1(&JsValue::UNDEFINED, &position);
            });
            let failure = Closure::once_into_js(move |error: PositionError| {
                let _ = on_error.call1(&JsValue::UNDEFINED, &error);
            });
            if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
                success.unchecked_ref(),
                Some(failure.unchecked_ref()),
                &web_options,
            ) {
                let _ = reject.call1(&JsValue::UNDEFINED, &err);
            }
        });

        let position = JsFuture::from(promise)
            .await
            .map_err(|err| location_error_from_js(&err))?
            .dyn_into::<Position>()
            .map_err(|value| location_error_from_js(&value))?;
        let coords = position.coords();
        Ok(Coordinates::new(coords.latitude(), coords.longitude()))
    }
}

#[derive(Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a NotificationPayload,
}

/// Sends the play-start notification through the EmailJS REST API.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailJsMailer;

impl Mailer for EmailJsMailer {
    async fn send(
        &self,
        config: &EmailConfig,
        payload: &NotificationPayload,
    ) -> Result<(), NotifyError> {
        let body = EmailJsRequest {
            service_id: &config.service_id,
            template_id: &config.template_id,
            user_id: &config.public_key,
            template_params: payload,
        };
        let response = gloo_net::http::Request::post(&config.endpoint)
            .json(&body)
            .map_err(|err| NotifyError::Transport(err.to_string()))?
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;
        if response.ok() {
            Ok(())
        } else {
            Err(NotifyError::Rejected(response.status()))
        }
    }
}

/// "Already notified" marker in `sessionStorage`; cleared when the tab closes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStorageFlag;

impl SentFlag for SessionStorageFlag {
    fn is_sent(&self) -> bool {
        SessionStorage::get::<bool>(constants::EMAIL_SENT_KEY).unwrap_or(false)
    }

    fn mark_sent(&self) {
        if let Err(err) = SessionStorage::set(constants::EMAIL_SENT_KEY, true) {
            log::warn!("could not persist notification flag: {err}");
        }
    }
}
