// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use eventhub_core::{EventHub, SubmitOutcome, Wizard};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::wizard_editor::new_wizard_editor;
use crate::tui::wizard_store::{Toast, WizardStore};

/// Runs the wizard until the event is submitted or the user leaves.
///
/// Returns `None` when the user exits without submitting. A failed submit is
/// shown in the wizard and the session goes on.
pub async fn run_wizard(
    hub: &EventHub,
    wizard: Wizard,
) -> Result<Option<SubmitOutcome>, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(WizardStore::new(wizard)));
    let title = store.borrow().title();

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        WizardStore::register_to(store.clone(), &mut dispatcher);
        let mut view = new_wizard_editor(title);
        view.activate(&mut dispatcher, &store);

        loop {
            let area = match draw(&view, &store, &mut terminal) {
                Ok(area) => area,
                Err(e) => break Err(e),
            };

            match read_event(&mut view, &mut dispatcher, &store, area) {
                Err(e) => break Err(e),
                Ok(Some(Message::Exit)) => break Ok(None),
                Ok(_) => {} // Continue the loop to render the next frame
            }

            let request = store.borrow_mut().submit.take();
            if let Some(is_draft) = request {
                let mut wizard = store.borrow().wizard.clone();
                match hub.submit(&mut wizard, is_draft).await {
                    Ok(outcome) => break Ok(Some(outcome)),
                    Err(e) => {
                        tracing::warn!(error = %e, is_draft, "submit failed");
                        store.borrow_mut().toast = Some(Toast::error(e));
                    }
                }
            }
        }
    }; // release dispatcher and view here to avoid borrow conflicts
    ratatui::restore();
    result
}

fn draw(
    view: &impl Component<WizardStore>,
    store: &RefCell<WizardStore>,
    terminal: &mut DefaultTerminal,
) -> Result<Rect, Box<dyn Error>> {
    let frame = terminal.draw(|frame| {
        let area = frame.area();
        view.render(store, area, frame.buffer_mut());
        if let Some(pos) = view.get_cursor_position(store, area) {
            frame.set_cursor_position(pos);
        }
    })?;
    Ok(frame.area)
}

fn read_event(
    view: &mut impl Component<WizardStore>,
    dispatcher: &mut Dispatcher,
    store: &RefCell<WizardStore>,
    area: Rect,
) -> Result<Option<Message>, Box<dyn Error>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(view.on_key(dispatcher, store, area, key))
        }
        _ => Ok(None),
    }
}
