//! Presentation port: change notifications and confirmation toasts.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::view::CartView;

/// A transient user-facing confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub duration: Duration,
}

impl Toast {
    /// Create a toast shown from now for `duration`.
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            created_at: Utc::now(),
            duration,
        }
    }

    /// When the toast should be taken down.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.duration)
            .ok()
            .and_then(|d| self.created_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Message shown after an item is added.
#[must_use]
pub fn added_message(name: &str) -> String {
    format!("✓ {name} added to cart")
}

/// Message shown after an item is removed. `None` names a generic item.
#[must_use]
pub fn removed_message(name: Option<&str>) -> String {
    format!("✗ {} removed from cart", name.unwrap_or("Item"))
}

pub const CLEARED_MESSAGE: &str = "Cart cleared";

/// A presentation layer that re-renders whenever the cart changes.
///
/// The store calls [`Presenter::render`] after every persisted mutation with
/// a fresh view of the whole cart. Presenters never call back into the store.
pub trait Presenter {
    /// Re-render the badge and, if shown, the line item list.
    fn render(&mut self, view: &CartView);

    /// Show a transient confirmation message. Ignored by default.
    fn show_toast(&mut self, _toast: &Toast) {}
}

/// Shared presenters: the host keeps one handle, the store another.
impl<P: Presenter + ?Sized> Presenter for Rc<RefCell<P>> {
    fn render(&mut self, view: &CartView) {
        self.borrow_mut().render(view);
    }

    fn show_toast(&mut self, toast: &Toast) {
        self.borrow_mut().show_toast(toast);
    }
}
