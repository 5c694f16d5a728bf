// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The dialog that collects one ticket type.

use std::cell::RefCell;

use eventhub_core::{TicketField, TicketKind};
use ratatui::prelude::*;

use crate::tui::component_form::{Access, Form, FormItem, Input};
use crate::tui::component_page::Popup;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::wizard_store::WizardStore;

pub type TicketDialog = Popup<WizardStore, Form<WizardStore>>;

const DIALOG_WIDTH: u16 = 60;

pub fn new_ticket_dialog(kind: TicketKind) -> TicketDialog {
    let fields = kind.fields();
    let items = fields.iter().map(|field| new_field(*field)).collect();
    // borders (2) + form margin (2) + 3 rows per field
    let height = 4 + 3 * fields.len() as u16;
    Popup::new(
        format!("Add {} Ticket", kind.title()),
        instructions(),
        (DIALOG_WIDTH, height),
        Form::new(items),
    )
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Save ".into(),
        "<Enter>".blue().bold(),
        " Cancel ".into(),
        "<Esc> ".blue().bold(),
    ])
}

macro_rules! ticket_inputs {
    ($($acc:ident: $field:ident => $placeholder:expr),* $(,)?) => {
        $(
            struct $acc;

            impl Access<WizardStore, String> for $acc {
                fn get(store: &RefCell<WizardStore>) -> String {
                    store
                        .borrow()
                        .ticket
                        .as_ref()
                        .map(|builder| builder.get(TicketField::$field).to_owned())
                        .unwrap_or_default()
                }

                fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                    dispatcher.dispatch(Action::UpdateTicket(TicketField::$field, value));
                    true
                }

                fn placeholder(_store: &RefCell<WizardStore>) -> Option<String> {
                    Some($placeholder.to_owned())
                }
            }
        )*

        fn new_field(field: TicketField) -> Box<dyn FormItem<WizardStore>> {
            match field {
                $(TicketField::$field => Box::new(Input::<WizardStore, $acc>::new(field.title())),)*
            }
        }
    };
}

ticket_inputs!(
    NameAccess: Name => "e.g. Early Bird",
    CategoryAccess: Category => "e.g. General",
    EntryTypeAccess: EntryType => "e.g. Single Entry",
    PriceAccess: Price => "Price per ticket in rupees",
    QuantityAccess: Quantity => "Tickets on sale",
    GuestLimitAccess: GuestLimit => "Guests on the list",
    SeatsPerTableAccess: SeatsPerTable => "Seats at each table",
    TablesAccess: Tables => "Tables on sale",
    GroupSizeAccess: GroupSize => "People admitted per pass",
);
