//! What happens when the user cancels a dialog
//!
//! Every prompt kind that can be cancelled goes through the same policy,
//! chosen once when the controller is built.

use std::fmt::Debug;

/// Decision returned by a cancellation callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelAction {
    /// Show the same prompt again.
    Reprompt,
    /// Surface [`crate::error::Error::Interrupted`] to the caller.
    Interrupt,
    /// Return this sentinel from the prompt.
    Sentinel(String),
}

/// Callback invoked once per cancellation.
pub type CancelCallback = Box<dyn Fn() -> CancelAction>;

/// Uniform cancellation strategy of a controller.
#[derive(Default)]
pub enum CancellationPolicy {
    /// Every cancellation becomes [`crate::error::Error::Interrupted`].
    #[default]
    RaiseInterrupt,
    /// The callback decides; it may also never return.
    InvokeCallback(CancelCallback),
    /// Every cancellation returns [`Response::Sentinel`] with this value.
    ReturnSentinel(String),
}

impl CancellationPolicy {
    pub fn callback(callback: impl Fn() -> CancelAction + 'static) -> Self {
        CancellationPolicy::InvokeCallback(Box::new(callback))
    }

    pub fn sentinel(value: impl Into<String>) -> Self {
        CancellationPolicy::ReturnSentinel(value.into())
    }

    pub fn name(&self) -> &'static str {
        match self {
            CancellationPolicy::RaiseInterrupt => "raise-interrupt",
            CancellationPolicy::InvokeCallback(_) => "invoke-callback",
            CancellationPolicy::ReturnSentinel(_) => "return-sentinel",
        }
    }
}

impl Debug for CancellationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancellationPolicy::RaiseInterrupt => write!(f, "RaiseInterrupt"),
            CancellationPolicy::InvokeCallback(_) => write!(f, "InvokeCallback(..)"),
            CancellationPolicy::ReturnSentinel(value) => {
                f.debug_tuple("ReturnSentinel").field(value).finish()
            }
        }
    }
}

/// Result of a prompt that can be cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response<T> {
    /// The accepted, validated value.
    Value(T),
    /// The user cancelled and the policy produced this sentinel.
    Sentinel(String),
}

impl<T> Response<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Response::Value(value) => Some(value),
            Response::Sentinel(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Response::Value(value) => Some(value),
            Response::Sentinel(_) => None,
        }
    }

    pub fn sentinel(&self) -> Option<&str> {
        match self {
            Response::Value(_) => None,
            Response::Sentinel(value) => Some(value),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Response::Sentinel(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        match self {
            Response::Value(value) => Response::Value(f(value)),
            Response::Sentinel(value) => Response::Sentinel(value),
        }
    }
}
