//! # Host Page Collaborators
//!
//! The core never touches a page directly. It emits signals through [`HostPage`] and
//! asks the shopper questions through [`Prompter`].
//!
//! [`HeadlessPage`] and [`ScriptedPrompter`] are in-process implementations: they count
//! signals and replay preset answers. Tests use them, and so does the CLI when it runs
//! non-interactively.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};

/// Signals the core sends to the page hosting it.
pub trait HostPage {
    /// Show the surface that hosts the shared edit form.
    fn open_edit_surface(&self);

    fn close_modal(&self);

    fn reload(&self);
}

#[async_trait(?Send)]
pub trait Prompter {
    /// Ask a yes/no question. Resolves to true when the shopper accepts.
    async fn confirm(&self, message: &str) -> bool;

    async fn alert(&self, message: &str);
}

/// Signal kinds in the order [`HeadlessPage`] received them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    OpenEditSurface,
    CloseModal,
    Reload,
}

#[derive(Debug, Default)]
pub struct HeadlessPage {
    signals: RefCell<Vec<PageSignal>>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> Vec<PageSignal> {
        self.signals.borrow().clone()
    }

    pub fn count(&self, signal: PageSignal) -> usize {
        self.signals.borrow().iter().filter(|s| **s == signal).count()
    }
}

impl HostPage for HeadlessPage {
    fn open_edit_surface(&self) {
        self.signals.borrow_mut().push(PageSignal::OpenEditSurface);
    }

    fn close_modal(&self) {
        self.signals.borrow_mut().push(PageSignal::CloseModal);
    }

    fn reload(&self) {
        self.signals.borrow_mut().push(PageSignal::Reload);
    }
}

/// Answers every confirmation with a preset value and records what was asked.
#[derive(Debug)]
pub struct ScriptedPrompter {
    answer: Cell<bool>,
    confirms: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Cell::new(answer),
            confirms: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        self.answer.set(answer);
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Prompter for ScriptedPrompter {
    async fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer.get()
    }

    async fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn headless_page_records_signal_order() {
        let page = HeadlessPage::new();
        page.reload();
        page.close_modal();
        assert_eq!(
            page.signals(),
            vec![PageSignal::Reload, PageSignal::CloseModal]
        );
        assert_eq!(page.count(PageSignal::OpenEditSurface), 0);
    }

    #[test]
    fn scripted_prompter_replays_answer() {
        let prompter = ScriptedPrompter::answering(false);
        assert!(!block_on(prompter.confirm("Sure?")));
        prompter.set_answer(true);
        assert!(block_on(prompter.confirm("Really?")));
        block_on(prompter.alert("Heads up"));

        assert_eq!(prompter.confirms(), vec!["Sure?", "Really?"]);
        assert_eq!(prompter.alerts(), vec!["Heads up"]);
    }
}
