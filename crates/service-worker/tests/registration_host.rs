#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Function, Object, Reflect};
use service_worker::{NotificationHost, RegistrationHost};
use shared::{
    api::{payloads::NotificationOptions, NOTIFICATION_ICON},
    error::PresenterError,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::ServiceWorkerRegistration;

const RECORD_CALL: &str = "this.calls = [title, options]; return Promise.resolve();";

/// A registration whose `showNotification` runs `body`
fn registration(body: Option<&str>) -> ServiceWorkerRegistration {
    let registration = Object::new();
    if let Some(body) = body {
        let show_notification = Function::new_with_args("title, options", body);
        Reflect::set(
            &registration,
            &JsValue::from_str("showNotification"),
            &show_notification,
        )
        .unwrap();
    }
    registration.unchecked_into()
}

fn recorded_call(registration: &JsValue) -> (JsValue, JsValue) {
    let calls: Array = Reflect::get(registration, &JsValue::from_str("calls"))
        .unwrap()
        .unchecked_into();
    assert_eq!(calls.length(), 2);
    (calls.get(0), calls.get(1))
}

fn field(object: &JsValue, key: &str) -> JsValue {
    Reflect::get(object, &JsValue::from_str(key)).unwrap()
}

fn has_field(object: &JsValue, key: &str) -> bool {
    Reflect::has(object, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
async fn test_title_and_body_are_passed_through() {
    let registration = registration(Some(RECORD_CALL));
    let host = RegistrationHost::from(registration.clone());
    let options = NotificationOptions {
        body: Some("You have 1 new message".to_string()),
        icon: NOTIFICATION_ICON,
    };

    host.show_notification(Some("New Message"), &options)
        .await
        .unwrap();

    let (title, options) = recorded_call(&registration);
    assert_eq!(title.as_string().as_deref(), Some("New Message"));
    assert_eq!(
        field(&options, "body").as_string().as_deref(),
        Some("You have 1 new message")
    );
    assert_eq!(
        field(&options, "icon").as_string().as_deref(),
        Some("/static/icon.png")
    );
}

#[wasm_bindgen_test]
async fn test_missing_title_is_undefined_and_missing_body_is_unset() {
    let registration = registration(Some(RECORD_CALL));
    let host = RegistrationHost::from(registration.clone());
    let options = NotificationOptions {
        body: None,
        icon: NOTIFICATION_ICON,
    };

    host.show_notification(None, &options).await.unwrap();

    let (title, options) = recorded_call(&registration);
    assert!(title.is_undefined());
    assert!(!has_field(&options, "body"));
    assert_eq!(
        field(&options, "icon").as_string().as_deref(),
        Some(NOTIFICATION_ICON)
    );
}

#[wasm_bindgen_test]
async fn test_rejected_display_is_a_display_error() {
    let host = RegistrationHost::from(registration(Some(
        "return Promise.reject(new TypeError('permission denied'));",
    )));
    let options = NotificationOptions {
        body: None,
        icon: NOTIFICATION_ICON,
    };

    let err = host.show_notification(Some("Alert"), &options).await.unwrap_err();

    match err {
        PresenterError::NotificationDisplay { message } => {
            assert!(message.contains("permission denied"), "{message}")
        }
        err => panic!("unexpected error {err:?}"),
    }
}

#[wasm_bindgen_test]
async fn test_registration_without_show_notification_fails_the_task() {
    let host = RegistrationHost::from(registration(None));
    let options = NotificationOptions {
        body: None,
        icon: NOTIFICATION_ICON,
    };

    let err = host.show_notification(Some("Alert"), &options).await.unwrap_err();

    assert!(matches!(err, PresenterError::NotificationDisplay { .. }), "{err:?}");
}
