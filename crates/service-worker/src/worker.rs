use console_error_panic_hook::set_once as set_panic_hook;
use futures::{future, FutureExt};
use js_sys::{Function, Promise, Reflect};
use shared::{
    api::payloads::NotificationOptions,
    error::{JsError, PresenterError},
    utils::tracing::configure_worker_tracing_once as configure_tracing,
};
use tracing::{debug, error};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{
    NotificationOptions as JsNotificationOptions, PushEvent, ServiceWorkerGlobalScope,
    ServiceWorkerRegistration,
};

use crate::{handle, register, DisplayTask, NotificationHost, PushEventSource, PushListener, PushMessage};

const PUSH_EVENT: &str = "push";

/// Shows notifications through the worker's registration
pub struct RegistrationHost {
    registration: ServiceWorkerRegistration,
}

impl From<ServiceWorkerRegistration> for RegistrationHost {
    fn from(registration: ServiceWorkerRegistration) -> Self {
        Self { registration }
    }
}

impl RegistrationHost {
    // Goes through Reflect rather than `show_notification_with_options` so a
    // missing title reaches the browser as `undefined` instead of a string
    fn request_display(
        &self,
        title: Option<&str>,
        options: &NotificationOptions,
    ) -> Result<Promise, JsValue> {
        let js_options = JsNotificationOptions::new();
        js_options.set_icon(options.icon);
        if let Some(body) = options.body.as_deref() {
            js_options.set_body(body);
        }

        let show_notification: Function =
            Reflect::get(&self.registration, &JsValue::from_str("showNotification"))?
                .dyn_into()?;
        let title = title.map_or(JsValue::UNDEFINED, JsValue::from_str);

        Ok(show_notification
            .call2(&self.registration, &title, &js_options)?
            .dyn_into()?)
    }
}

impl NotificationHost for RegistrationHost {
    fn show_notification(&self, title: Option<&str>, options: &NotificationOptions) -> DisplayTask {
        match self.request_display(title, options) {
            Ok(promise) => JsFuture::from(promise)
                .map(|r| {
                    r.map(|_| ())
                        .map_err(|e| PresenterError::notification_display(JsError::from(e)))
                })
                .boxed_local(),
            Err(e) => {
                future::ready(Err(PresenterError::notification_display(JsError::from(e))))
                    .boxed_local()
            }
        }
    }
}

/// A browser push event
pub struct WorkerPushEvent(PushEvent);

impl PushMessage for WorkerPushEvent {
    fn data(&self) -> Option<Vec<u8>> {
        self.0.data().map(|data| data.text().into_bytes())
    }

    fn wait_until(&self, task: DisplayTask) -> Result<(), PresenterError> {
        self.0
            .wait_until(&into_promise(task))
            .map_err(|e| PresenterError::host(JsError::from(e)))
    }
}

/// The worker's global scope as a source of push events
pub struct WorkerScope(ServiceWorkerGlobalScope);

impl PushEventSource for WorkerScope {
    type Event = WorkerPushEvent;

    fn on_push(&self, listener: PushListener<WorkerPushEvent>) -> Result<(), PresenterError> {
        let closure = Closure::<dyn Fn(PushEvent) -> Result<(), JsValue>>::new(
            move |event: PushEvent| {
                listener(WorkerPushEvent(event)).map_err(|e| {
                    error!("push listener: {e}");
                    JsValue::from(e)
                })
            },
        );

        self.0
            .add_event_listener_with_callback(PUSH_EVENT, closure.as_ref().unchecked_ref())
            .map_err(|e| PresenterError::host(JsError::from(e)))?;

        // The listener lives as long as the worker
        closure.forget();
        Ok(())
    }
}

fn into_promise(task: DisplayTask) -> Promise {
    future_to_promise(async move {
        task.await?;
        Ok(JsValue::UNDEFINED)
    })
}

/// Handles one push event and returns the display promise for the caller to
/// pass to `event.waitUntil`. A payload that can't be decoded is thrown.
#[wasm_bindgen]
pub fn worker_push(sw: ServiceWorkerGlobalScope, event: PushEvent) -> Result<Promise, JsValue> {
    set_panic_hook();
    configure_tracing();

    let host = RegistrationHost::from(sw.registration());
    let task = handle(&host, &WorkerPushEvent(event))?;

    Ok(into_promise(task))
}

/// Installs the presenter as the worker's push listener
#[wasm_bindgen]
pub fn worker_register_push(sw: ServiceWorkerGlobalScope) -> Result<(), JsValue> {
    set_panic_hook();
    configure_tracing();

    let host = RegistrationHost::from(sw.registration());
    register(&WorkerScope(sw), host)?;
    debug!("Push listener registered");

    Ok(())
}
