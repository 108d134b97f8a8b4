use std::fmt::Display;

use thiserror::Error;

#[cfg(feature = "wasm")]
pub use wasm::*;

/// Everything that can go wrong while turning a push event into a
/// notification. Neither case is recovered from; both are handed back to the
/// host as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenterError {
    #[error("push payload could not be decoded: {message}")]
    PayloadDecode { message: String },
    #[error("notification could not be displayed: {message}")]
    NotificationDisplay { message: String },
    /// The host refused to wire up or keep alive the handler itself
    #[error("host rejected the push handler: {message}")]
    Host { message: String },
}

impl PresenterError {
    pub fn payload_decode<E: Display>(err: E) -> Self {
        Self::PayloadDecode {
            message: err.to_string(),
        }
    }

    pub fn notification_display<E: Display>(err: E) -> Self {
        Self::NotificationDisplay {
            message: err.to_string(),
        }
    }

    pub fn host<E: Display>(err: E) -> Self {
        Self::Host {
            message: err.to_string(),
        }
    }
}


#[cfg(feature = "wasm")]
mod wasm {
    use thiserror::Error;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::js_sys::{
        Error as GenericJsError, RangeError as JsRangeError, ReferenceError as JsReferenceError,
        SyntaxError as JsSyntaxError, TypeError as JsTypeError,
    };

    use super::PresenterError;

    #[derive(Debug, Clone, Error)]
    pub enum JsError {
        #[error("GenericJs Error: {}", String::from(.0.message()))]
        GenericJs(GenericJsError),
        #[error("JsRange Error: {}", String::from(.0.message()))]
        JsRange(JsRangeError),
        #[error("JsReference Error: {}", String::from(.0.message()))]
        JsReference(JsReferenceError),
        #[error("JsSyntax Error: {}", String::from(.0.message()))]
        JsSyntax(JsSyntaxError),
        #[error("JsType Error: {}", String::from(.0.message()))]
        JsType(JsTypeError),
        #[error("UnknownJsValue Error: {0}")]
        UnknownJsValue(String),
    }

    impl From<JsValue> for JsError {
        fn from(err: JsValue) -> JsError {
            if err.is_instance_of::<JsRangeError>() {
                return JsError::JsRange(err.into());
            }
            if err.is_instance_of::<JsReferenceError>() {
                return JsError::JsReference(err.into());
            }
            if err.is_instance_of::<JsSyntaxError>() {
                return JsError::JsSyntax(err.into());
            }
            if err.is_instance_of::<JsTypeError>() {
                return JsError::JsType(err.into());
            }
            if err.is_instance_of::<GenericJsError>() {
                return JsError::GenericJs(err.into());
            }
            JsError::UnknownJsValue(format!("{:?}", err))
        }
    }

    // Thrown back into the host so it lands in the worker's error reporting
    impl From<PresenterError> for JsValue {
        fn from(err: PresenterError) -> JsValue {
            GenericJsError::new(&err.to_string()).into()
        }
    }
}
