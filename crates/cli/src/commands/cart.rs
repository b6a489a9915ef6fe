//! Cart commands.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use nepali_shop_core::ProductId;
use tracing::debug;

use super::{CommandError, SessionOptions, Store};
use crate::terminal::{Layout, TerminalPresenter};

type SharedPresenter = Rc<RefCell<TerminalPresenter<io::Stdout>>>;

fn open(options: &SessionOptions, layout: Layout) -> Result<(Store, SharedPresenter), CommandError> {
    let mut store = options.open_store()?;
    let presenter = Rc::new(RefCell::new(TerminalPresenter::new(io::stdout(), layout)));
    store.subscribe(Rc::clone(&presenter));
    Ok((store, presenter))
}

fn finish(presenter: &SharedPresenter) -> Result<(), CommandError> {
    presenter.borrow_mut().finish()?;
    Ok(())
}

/// Add a product to the cart.
pub fn add(options: &SessionOptions, id: ProductId, quantity: u32) -> Result<(), CommandError> {
    let (mut store, presenter) = open(options, Layout::Badge)?;
    store.add_item(id, quantity)?;
    finish(&presenter)
}

/// Remove a product from the cart.
pub fn remove(options: &SessionOptions, id: ProductId) -> Result<(), CommandError> {
    let (mut store, presenter) = open(options, Layout::Badge)?;
    store.remove_item(id);
    finish(&presenter)
}

/// Set a product's quantity from raw user input.
pub fn update(options: &SessionOptions, id: ProductId, quantity: &str) -> Result<(), CommandError> {
    let (mut store, presenter) = open(options, Layout::Full)?;
    store.update_quantity_input(id, quantity)?;
    finish(&presenter)
}

/// Show the cart with all line items.
pub fn show(options: &SessionOptions) -> Result<(), CommandError> {
    let (_store, presenter) = open(options, Layout::Full)?;
    finish(&presenter)
}

/// Clear the cart, asking first unless `yes` is set.
pub fn clear(options: &SessionOptions, yes: bool) -> Result<(), CommandError> {
    let (mut store, presenter) = open(options, Layout::Badge)?;
    let cleared = store.clear(|prompt| yes || ask(prompt, io::stdin().lock(), io::stdout()));
    debug!(cleared, "Clear finished");
    finish(&presenter)
}

/// Ask a yes/no question; anything other than "y"/"yes" declines.
fn ask(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> bool {
    if write!(output, "{prompt} [y/N] ")
        .and_then(|()| output.flush())
        .is_err()
    {
        return false;
    }

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_accepts_yes() {
        let mut out = Vec::new();
        assert!(ask("Clear?", &b"y\n"[..], &mut out));
        assert!(ask("Clear?", &b" YES \n"[..], Vec::new()));
        assert_eq!(out, b"Clear? [y/N] ");
    }

    #[test]
    fn test_ask_declines_by_default() {
        assert!(!ask("Clear?", &b"\n"[..], Vec::new()));
        assert!(!ask("Clear?", &b"nope\n"[..], Vec::new()));
        assert!(!ask("Clear?", &b""[..], Vec::new()));
    }
}
