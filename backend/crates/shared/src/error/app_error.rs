//! Application Error
//!
//! The single error shape every domain crate renders over HTTP.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// ドメインエラーの変換先
///
/// `message` と `action` はそのままレスポンス本文に載るため、
/// 上流の詳細やワンタイムコードを入れてはいけません。
///
/// ```rust
/// use kernel::{AppError, ErrorKind};
///
/// let err = AppError::new(ErrorKind::Gone, "Login session expired")
///     .with_action("Start a new login");
/// assert_eq!(err.status_code(), 410);
/// assert_eq!(err.action(), Some("Start a new login"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    /// 次にユーザーが取るべき操作
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {}
