// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use eventhub_core::RowId;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{FormItem, FormItemState};
use crate::tui::dispatcher::Dispatcher;
use crate::util::truncate_to_width;

pub trait VisiblePredicate<S> {
    fn is_visible(store: &RefCell<S>) -> bool;
}

/// A form item that is only visible if the predicate function returns true.
pub struct VisibleIf<S, T, P>
where
    T: FormItem<S>,
    P: VisiblePredicate<S>,
{
    item: T,
    s: std::marker::PhantomData<S>,
    p: std::marker::PhantomData<P>,
}

impl<S, T, P> VisibleIf<S, T, P>
where
    T: FormItem<S>,
    P: VisiblePredicate<S>,
{
    pub fn new(item: T) -> Self {
        Self {
            item,
            s: std::marker::PhantomData,
            p: std::marker::PhantomData,
        }
    }
}

impl<S, T, P> Component<S> for VisibleIf<S, T, P>
where
    T: FormItem<S>,
    P: VisiblePredicate<S>,
{
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.item.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.item.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.item.on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.item.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.item.deactivate(dispatcher, store);
    }
}

impl<S, T, P> FormItem<S> for VisibleIf<S, T, P>
where
    T: FormItem<S>,
    P: VisiblePredicate<S>,
{
    fn item_title(&self, store: &RefCell<S>) -> &str {
        self.item.item_title(store)
    }

    fn item_state(&self, store: &RefCell<S>) -> FormItemState {
        match P::is_visible(store) {
            true => self.item.item_state(store),
            false => FormItemState::Invisible,
        }
    }

    fn item_height(&self, store: &RefCell<S>) -> u16 {
        self.item.item_height(store)
    }
}

/// Choices that depend on the store, such as the subcategories of a category.
pub trait Choices<S> {
    fn choices(store: &RefCell<S>) -> &'static [&'static str];
    fn get(store: &RefCell<S>) -> Option<&'static str>;
    fn set(dispatcher: &mut Dispatcher, value: &'static str);
}

/// Cycles through a list of choices too long for a [`RadioGroup`].
///
/// [`RadioGroup`]: crate::tui::component_form::RadioGroup
pub struct Picker<S, C: Choices<S>> {
    title: String,
    placeholder: String,
    active: bool,
    _phantom_s: std::marker::PhantomData<S>,
    _phantom_c: std::marker::PhantomData<C>,
}

impl<S, C: Choices<S>> Picker<S, C> {
    pub fn new(title: impl ToString, placeholder: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            placeholder: placeholder.to_string(),
            active: false,
            _phantom_s: std::marker::PhantomData,
            _phantom_c: std::marker::PhantomData,
        }
    }
}

impl<S, C: Choices<S>> Component<S> for Picker<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let choices = C::choices(store);
        let current = C::get(store);
        let line = match current.and_then(|v| choices.iter().position(|a| *a == v)) {
            Some(i) => Line::from(vec![
                "‹ ".blue(),
                choices[i].into(),
                " ›".blue(),
                format!("  {}/{}", i + 1, choices.len()).dark_gray(),
            ]),
            None => Line::from(self.placeholder.as_str().dark_gray().italic()),
        };
        Paragraph::new(line).render(area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active || !matches!(event.code, KeyCode::Left | KeyCode::Right) {
            return None;
        }

        let choices = C::choices(store);
        if choices.is_empty() {
            return Some(Message::Handled);
        }

        let len = choices.len();
        let current = C::get(store).and_then(|v| choices.iter().position(|a| *a == v));
        let index = match (event.code, current) {
            (KeyCode::Left, Some(i)) => (i + len - 1) % len,
            (KeyCode::Left, None) => len - 1,
            (_, Some(i)) => (i + 1) % len,
            (_, None) => 0,
        };
        C::set(dispatcher, choices[index]);
        Some(Message::Handled)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, C: Choices<S>> FormItem<S> for Picker<S, C> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        match self.active {
            true => FormItemState::Active,
            false => FormItemState::Inactive,
        }
    }
}

pub trait Trigger<S> {
    fn trigger(dispatcher: &mut Dispatcher, store: &RefCell<S>);
}

/// Fires an action on enter.
pub struct Button<S, T: Trigger<S>> {
    title: String,
    label: String,
    active: bool,
    _phantom_s: std::marker::PhantomData<S>,
    _phantom_t: std::marker::PhantomData<T>,
}

impl<S, T: Trigger<S>> Button<S, T> {
    pub fn new(title: impl ToString, label: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            label: label.to_string(),
            active: false,
            _phantom_s: std::marker::PhantomData,
            _phantom_t: std::marker::PhantomData,
        }
    }
}

impl<S, T: Trigger<S>> Component<S> for Button<S, T> {
    fn render(&self, _store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let label = format!("[ {} ]", self.label);
        let span = match self.active {
            true => label.black().on_blue().bold(),
            false => label.blue(),
        };
        Paragraph::new(span).render(area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        match event.code {
            KeyCode::Enter if self.active => {
                T::trigger(dispatcher, store);
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, T: Trigger<S>> FormItem<S> for Button<S, T> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        match self.active {
            true => FormItemState::Active,
            false => FormItemState::Inactive,
        }
    }
}

/// Rows of a list in the store, with the selection kept in the store too.
pub trait RowsAccess<S> {
    fn rows(store: &RefCell<S>) -> Vec<(RowId, String)>;
    fn selected(store: &RefCell<S>) -> Option<RowId>;
    fn select(dispatcher: &mut Dispatcher, id: RowId);
    fn remove(dispatcher: &mut Dispatcher, id: RowId);
}

/// A list of rows: left and right move the selection, delete removes it.
pub struct RowList<S, A: RowsAccess<S>> {
    title: String,
    empty: String,
    max_rows: u16,
    active: bool,
    _phantom_s: std::marker::PhantomData<S>,
    _phantom_a: std::marker::PhantomData<A>,
}

impl<S, A: RowsAccess<S>> RowList<S, A> {
    pub fn new(title: impl ToString, empty: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            empty: empty.to_string(),
            max_rows: 5,
            active: false,
            _phantom_s: std::marker::PhantomData,
            _phantom_a: std::marker::PhantomData,
        }
    }

    fn selected_index(rows: &[(RowId, String)], store: &RefCell<S>) -> Option<usize> {
        let id = A::selected(store)?;
        rows.iter().position(|(a, _)| *a == id)
    }
}

impl<S, A: RowsAccess<S>> Component<S> for RowList<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let rows = A::rows(store);
        if rows.is_empty() {
            Paragraph::new(self.empty.as_str().dark_gray().italic()).render(area, buf);
            return;
        }

        let selected = Self::selected_index(&rows, store);
        let visible = usize::from(area.height.max(1));
        let skip = selected.map_or(0, |i| (i + 1).saturating_sub(visible));
        let width = usize::from(area.width.saturating_sub(2));

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(skip)
            .take(visible)
            .map(|(i, (_, label))| {
                let label = truncate_to_width(label, width);
                match (Some(i) == selected, self.active) {
                    (true, true) => Line::from(format!("› {label}").black().on_blue()),
                    (true, false) => Line::from(format!("› {label}").bold()),
                    (false, _) => Line::from(format!("  {label}")),
                }
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        let rows = A::rows(store);
        let selected = Self::selected_index(&rows, store);
        match (event.code, selected) {
            (KeyCode::Left, Some(i)) if i > 0 => A::select(dispatcher, rows[i - 1].0),
            (KeyCode::Right, Some(i)) if i + 1 < rows.len() => A::select(dispatcher, rows[i + 1].0),
            (KeyCode::Left | KeyCode::Right, None) if !rows.is_empty() => {
                A::select(dispatcher, rows[0].0)
            }
            (KeyCode::Delete | KeyCode::Backspace, Some(i)) => A::remove(dispatcher, rows[i].0),
            (KeyCode::Left | KeyCode::Right | KeyCode::Delete | KeyCode::Backspace, _) => {}
            _ => return None,
        }
        Some(Message::Handled)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, A: RowsAccess<S>> FormItem<S> for RowList<S, A> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        match self.active {
            true => FormItemState::Active,
            false => FormItemState::Inactive,
        }
    }

    fn item_height(&self, store: &RefCell<S>) -> u16 {
        let rows = A::rows(store).len().clamp(1, usize::from(self.max_rows));
        2 + rows as u16
    }
}
