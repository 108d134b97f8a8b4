//! Turns a push event into a system notification.
//!
//! The presenter only knows about the seams below. The worker module binds
//! them to the browser, tests bind them to fakes.

use futures::future::LocalBoxFuture;
use shared::{
    api::payloads::{NotificationOptions, PushPayload},
    error::PresenterError,
};
use tracing::{debug, warn};

/// The pending display request. Settles once the host has shown the
/// notification or refused to.
pub type DisplayTask = LocalBoxFuture<'static, Result<(), PresenterError>>;

/// A single incoming push event
pub trait PushMessage {
    /// Raw payload bytes. `None` when the push carried no data at all
    fn data(&self) -> Option<Vec<u8>>;

    /// Keeps the background context alive until `task` settles
    fn wait_until(&self, task: DisplayTask) -> Result<(), PresenterError>;
}

/// Whatever can put a notification on screen
pub trait NotificationHost {
    fn show_notification(&self, title: Option<&str>, options: &NotificationOptions)
        -> DisplayTask;
}

/// Something that delivers push events to a listener
pub trait PushEventSource {
    type Event: PushMessage;

    fn on_push(&self, listener: PushListener<Self::Event>) -> Result<(), PresenterError>;
}

pub type PushListener<E> = Box<dyn Fn(E) -> Result<(), PresenterError>>;

/// Decodes the event's payload and asks `host` to display it.
///
/// Fails before anything reaches the host if the payload can't be decoded.
/// The returned task is the display request itself; whoever calls this is
/// responsible for keeping the context alive while it runs.
pub fn handle<H, E>(host: &H, event: &E) -> Result<DisplayTask, PresenterError>
where
    H: NotificationHost + ?Sized,
    E: PushMessage + ?Sized,
{
    let data = event
        .data()
        .ok_or_else(|| PresenterError::payload_decode("push event carried no data"))?;

    let payload = PushPayload::decode(&data).map_err(|e| {
        warn!("Dropping push event: {e}");
        e
    })?;

    let (title, options) = payload.into_notification();
    debug!(?title, ?options, "Showing notification");

    Ok(host.show_notification(title.as_deref(), &options))
}

/// [`handle`], then hand the display task to the event so the host waits for it
pub fn present<H, E>(host: &H, event: &E) -> Result<(), PresenterError>
where
    H: NotificationHost + ?Sized,
    E: PushMessage + ?Sized,
{
    let task = handle(host, event)?;
    event.wait_until(task)
}

/// Wires the presenter up as `source`'s push listener
pub fn register<S, H>(source: &S, host: H) -> Result<(), PresenterError>
where
    S: PushEventSource,
    H: NotificationHost + 'static,
{
    source.on_push(Box::new(move |event| present(&host, &event)))
}
