//! User-facing notices.

use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// A message for the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Requested amount exceeds stock (add and update).
    OutOfStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product's amount failed.
    UpdateFailed,
}

impl Notice {
    /// Text shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::OutOfStock => "requested quantity out of stock",
            Self::AddFailed => "error adding product",
            Self::RemoveFailed => "error removing product",
            Self::UpdateFailed => "error updating product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for user-facing notices (a toast, a status line, a log).
///
/// Called synchronously from within store operations; must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(notice = notice.message(), "cart notice");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Notice::OutOfStock.to_string(), "requested quantity out of stock");
        assert_eq!(Notice::AddFailed.to_string(), "error adding product");
        assert_eq!(Notice::RemoveFailed.to_string(), "error removing product");
        assert_eq!(Notice::UpdateFailed.to_string(), "error updating product quantity");
    }
}
