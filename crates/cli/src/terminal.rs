//! Terminal stand-ins for the browser collaborators.
//!
//! - [`TerminalPresenter`] renders the cart badge, line list and toasts as text
//! - [`BellVibrator`] rings the terminal bell in place of a vibration motor

use std::io::{self, IsTerminal, Write};

use nepali_shop_cart::{CartView, Presenter, Toast, VibrationError, Vibrator};

/// How much of the cart to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Just the item-count badge.
    Badge,
    /// Badge, every line item and the subtotal.
    Full,
}

/// Text presenter.
///
/// Renders are coalesced: the store re-renders after every mutation, but a
/// one-shot command only needs the final state, written by [`Self::finish`].
/// Toasts are written as they arrive.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
    layout: Layout,
    latest: Option<CartView>,
}

impl<W: Write> TerminalPresenter<W> {
    pub const fn new(out: W, layout: Layout) -> Self {
        Self {
            out,
            layout,
            latest: None,
        }
    }

    /// Write the most recent render.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    pub fn finish(&mut self) -> io::Result<()> {
        let Some(view) = self.latest.take() else {
            return Ok(());
        };

        writeln!(self.out, "Cart ({})", view.item_count)?;
        if self.layout == Layout::Badge {
            return self.out.flush();
        }

        if view.is_empty() {
            writeln!(self.out, "Your cart is empty")?;
            writeln!(
                self.out,
                "Add some authentic Nepali products to get started!"
            )?;
        } else {
            for item in &view.items {
                writeln!(
                    self.out,
                    "  [{}] {}  {} x {} = {}",
                    item.id, item.name, item.price, item.quantity, item.line_price
                )?;
            }
        }
        writeln!(self.out, "Subtotal: {}", view.subtotal)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub const fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, view: &CartView) {
        self.latest = Some(view.clone());
    }

    fn show_toast(&mut self, toast: &Toast) {
        // Presentation is best-effort; a closed pipe must not fail the mutation
        let _ = writeln!(self.out, "{}", toast.message);
    }
}

/// Rings the terminal bell for each pulse when stderr is a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellVibrator;

impl Vibrator for BellVibrator {
    fn is_supported(&self) -> bool {
        io::stderr().is_terminal()
    }

    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), VibrationError> {
        if pattern.iter().all(|&ms| ms == 0) {
            return Ok(());
        }
        let mut err = io::stderr();
        err.write_all(b"\x07")
            .and_then(|()| err.flush())
            .map_err(|e| VibrationError::Device(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nepali_shop_cart::{CartConfig, CartStore, MemoryStorage, NoFeedback, StaticCatalog};
    use nepali_shop_core::{CurrencyCode, ProductId};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn output(presenter: &Rc<RefCell<TerminalPresenter<Vec<u8>>>>) -> String {
        String::from_utf8(presenter.borrow().output().clone()).unwrap()
    }

    #[test]
    fn test_full_layout_renders_final_state_once() {
        let presenter = Rc::new(RefCell::new(TerminalPresenter::new(Vec::new(), Layout::Full)));
        let mut store = CartStore::open(
            CartConfig::default(),
            MemoryStorage::new(),
            StaticCatalog::nepali_crafts(),
            NoFeedback,
        );
        store.subscribe(Rc::clone(&presenter));

        store.add_item(ProductId::new(1), 1).unwrap();
        store.add_item(ProductId::new(2), 2).unwrap();
        presenter.borrow_mut().finish().unwrap();

        let text = output(&presenter);
        assert_eq!(
            text,
            "✓ Traditional Dhaka Topi added to cart\n\
             ✓ Tibetan Singing Bowl added to cart\n\
             Cart (3)\n  \
             [1] Traditional Dhaka Topi  £15.99 x 1 = £15.99\n  \
             [2] Tibetan Singing Bowl  £45.00 x 2 = £90.00\n\
             Subtotal: £105.99\n"
        );
    }

    #[test]
    fn test_empty_cart_view() {
        let mut presenter = TerminalPresenter::new(Vec::new(), Layout::Full);
        presenter.render(&CartView::empty(CurrencyCode::GBP));
        presenter.finish().unwrap();

        let text = String::from_utf8(presenter.output().clone()).unwrap();
        assert!(text.starts_with("Cart (0)\nYour cart is empty\n"));
        assert!(text.ends_with("Subtotal: £0.00\n"));
    }

    #[test]
    fn test_badge_layout() {
        let mut presenter = TerminalPresenter::new(Vec::new(), Layout::Badge);
        presenter.render(&CartView::empty(CurrencyCode::GBP));
        presenter.finish().unwrap();
        // Nothing rendered since the last finish
        presenter.finish().unwrap();

        assert_eq!(String::from_utf8(presenter.output().clone()).unwrap(), "Cart (0)\n");
    }

    #[test]
    fn test_bell_ignores_stop() {
        assert!(BellVibrator.vibrate(&[0]).is_ok());
    }
}
