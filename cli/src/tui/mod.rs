// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod component;
mod component_form;
mod component_form_util;
mod component_page;
mod dispatcher;
mod ticket_editor;
mod wizard_editor;
mod wizard_store;

pub use app::run_wizard;
