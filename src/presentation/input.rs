use crate::application::{App, Overlay, Tab};
use crate::infrastructure::OrderExporter;
use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyModifiers};

use super::ui::PROFILE_ITEMS;

/// Routes key events to the membership store.
///
/// Dispatch is overlay-first: an open overlay owns the keyboard until
/// it closes, and only then do the tab-level bindings apply.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.overlay {
            Overlay::None => Self::handle_tab_keys(app, key, modifiers),
            Overlay::MenuSearch => Self::handle_menu_search(app, key),
            Overlay::Scanner => Self::handle_scanner_entry(app, key),
            Overlay::TopUpAmount => Self::handle_amount_entry(app, key),
            Overlay::ExportOrders => Self::handle_export_entry(app, key),
            Overlay::ProductDetail => Self::handle_product_detail(app, key),
            Overlay::Notifications => Self::handle_notifications(app, key),
            Overlay::Favorites => Self::handle_favorites(app, key),
            Overlay::ScanPay => Self::handle_scan_pay(app, key),
            Overlay::Cart => Self::handle_cart(app, key),
            Overlay::PaymentMethods => Self::handle_payment_methods(app, key),
            Overlay::OrderHistory => Self::handle_order_history(app, key),
            Overlay::TopUpMethod => Self::handle_top_up_method(app, key),
            Overlay::Help => Self::handle_help(app, key),
            Overlay::Settings => Self::handle_settings(app, key),
        }
    }

    fn handle_tab_keys(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        // Any tab-level action supersedes the last status message.
        app.status_message = None;

        match key {
            KeyCode::Char('1') => app.select_tab(Tab::Home),
            KeyCode::Char('2') => app.select_tab(Tab::Rewards),
            KeyCode::Char('3') => app.select_tab(Tab::Order),
            KeyCode::Char('4') => app.select_tab(Tab::Stores),
            KeyCode::Char('5') => app.select_tab(Tab::Profile),
            KeyCode::Tab => app.next_tab(),
            KeyCode::BackTab => app.previous_tab(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = Self::tab_list_len(app);
                app.move_selection_down(len);
            }
            KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
            KeyCode::Char('n') => app.open_overlay(Overlay::Notifications),
            KeyCode::Char('f') => app.open_overlay(Overlay::Favorites),
            KeyCode::Char('c') => app.open_overlay(Overlay::Cart),
            KeyCode::Char('p') => app.open_overlay(Overlay::ScanPay),
            KeyCode::Char('s') => app.start_scanner(),
            KeyCode::Char('u') => app.start_top_up(),
            KeyCode::Char('?') | KeyCode::F(1) => app.open_overlay(Overlay::Help),
            KeyCode::Char('/') if app.tab == Tab::Order => app.start_menu_search(),
            KeyCode::Char('v') if app.tab == Tab::Order => Self::toggle_selected_favorite(app),
            KeyCode::Enter => Self::activate_selection(app),
            _ => {}
        }
    }

    fn tab_list_len(app: &App) -> usize {
        match app.tab {
            Tab::Home => 0,
            Tab::Rewards => app.rewards.len(),
            Tab::Order => app.filtered_menu().len(),
            Tab::Stores => app.stores.len(),
            Tab::Profile => PROFILE_ITEMS.len(),
        }
    }

    fn activate_selection(app: &mut App) {
        match app.tab {
            Tab::Home => {}
            Tab::Rewards => {
                if let Some(reward) = app.rewards.get(app.selected_index) {
                    let id = reward.id.clone();
                    app.redeem_reward(&id);
                }
            }
            Tab::Order => {
                let selected = app
                    .filtered_menu()
                    .get(app.selected_index)
                    .map(|product| (*product).clone());
                if let Some(product) = selected {
                    app.open_product_detail(product);
                }
            }
            Tab::Stores => {
                if let Some(store) = app.stores.get(app.selected_index) {
                    let special = store.special_menu.clone();
                    app.open_product_detail(special);
                }
            }
            Tab::Profile => match app.selected_index {
                0 => app.open_overlay(Overlay::ScanPay),
                1 => app.open_overlay(Overlay::PaymentMethods),
                2 => app.open_overlay(Overlay::OrderHistory),
                3 => app.open_overlay(Overlay::Help),
                4 => app.open_overlay(Overlay::Settings),
                _ => {}
            },
        }
    }

    fn toggle_selected_favorite(app: &mut App) {
        let selected = app
            .filtered_menu()
            .get(app.selected_index)
            .map(|product| (*product).clone());
        if let Some(product) = selected {
            app.toggle_favorite(&product);
        }
    }

    fn handle_menu_search(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_menu_search(),
            KeyCode::Esc => app.cancel_menu_search(),
            KeyCode::Char(c) => {
                insert_at_cursor(&mut app.search_query, app.cursor_position, c);
                app.cursor_position += 1;
                app.selected_index = 0;
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                    remove_at_cursor(&mut app.search_query, app.cursor_position);
                    app.selected_index = 0;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.search_query.chars().count() {
                    remove_at_cursor(&mut app.search_query, app.cursor_position);
                    app.selected_index = 0;
                }
            }
            KeyCode::Left => app.cursor_position = app.cursor_position.saturating_sub(1),
            KeyCode::Right => {
                if app.cursor_position < app.search_query.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => app.cursor_position = 0,
            KeyCode::End => app.cursor_position = app.search_query.chars().count(),
            _ => {}
        }
    }

    fn handle_scanner_entry(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let code = app.input.trim().to_string();
                if code.is_empty() {
                    app.close_overlay();
                } else {
                    app.on_code_scanned(&code);
                }
            }
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Char(c) => {
                insert_at_cursor(&mut app.input, app.cursor_position, c);
                app.cursor_position += 1;
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                    remove_at_cursor(&mut app.input, app.cursor_position);
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.input.chars().count() {
                    remove_at_cursor(&mut app.input, app.cursor_position);
                }
            }
            KeyCode::Left => app.cursor_position = app.cursor_position.saturating_sub(1),
            KeyCode::Right => {
                if app.cursor_position < app.input.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => app.cursor_position = 0,
            KeyCode::End => app.cursor_position = app.input.chars().count(),
            _ => {}
        }
    }

    fn handle_amount_entry(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.confirm_top_up(),
            KeyCode::Esc => app.close_overlay(),
            // Amounts are digits only; everything else is dropped.
            KeyCode::Char(c) if c.is_ascii_digit() => {
                insert_at_cursor(&mut app.input, app.cursor_position, c);
                app.cursor_position += 1;
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                    remove_at_cursor(&mut app.input, app.cursor_position);
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.input.chars().count() {
                    remove_at_cursor(&mut app.input, app.cursor_position);
                }
            }
            KeyCode::Left => app.cursor_position = app.cursor_position.saturating_sub(1),
            KeyCode::Right => {
                if app.cursor_position < app.input.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => app.cursor_position = 0,
            KeyCode::End => app.cursor_position = app.input.chars().count(),
            _ => {}
        }
    }

    fn handle_export_entry(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.export_filename();
                let result = OrderExporter::export_orders(&app.order_history, &filename);
                app.set_export_result(result);
            }
            KeyCode::Esc => {
                app.filename_input.clear();
                app.cursor_position = 0;
                app.open_overlay(Overlay::OrderHistory);
            }
            KeyCode::Char(c) => {
                insert_at_cursor(&mut app.filename_input, app.cursor_position, c);
                app.cursor_position += 1;
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                    remove_at_cursor(&mut app.filename_input, app.cursor_position);
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.chars().count() {
                    remove_at_cursor(&mut app.filename_input, app.cursor_position);
                }
            }
            KeyCode::Left => app.cursor_position = app.cursor_position.saturating_sub(1),
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => app.cursor_position = 0,
            KeyCode::End => app.cursor_position = app.filename_input.chars().count(),
            _ => {}
        }
    }

    fn handle_product_detail(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Char('s') => app.cycle_detail_size(),
            KeyCode::Char('m') => app.cycle_detail_milk(),
            KeyCode::Char('v') => {
                if let Some(product) = app.detail_product.clone() {
                    app.toggle_favorite(&product);
                }
            }
            KeyCode::Enter | KeyCode::Char('a') => app.add_detail_to_cart(),
            _ => {}
        }
    }

    fn handle_notifications(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.notifications.len();
                app.move_selection_down(len);
            }
            KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
            KeyCode::Enter => {
                if let Some(notification) = app.notifications.get(app.selected_index) {
                    let id = notification.id.clone();
                    app.mark_notification_read(&id);
                }
            }
            _ => {}
        }
    }

    fn handle_favorites(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.favorites.len();
                app.move_selection_down(len);
            }
            KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
            KeyCode::Enter => {
                if let Some(product) = app.favorites.get(app.selected_index).cloned() {
                    app.open_product_detail(product);
                }
            }
            KeyCode::Char('v') => {
                if let Some(product) = app.favorites.get(app.selected_index).cloned() {
                    app.toggle_favorite(&product);
                    if app.selected_index >= app.favorites.len() {
                        app.move_selection_up();
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_scan_pay(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Char('y') => Self::copy_pay_code(app),
            KeyCode::Char('s') => app.start_scanner(),
            _ => {}
        }
    }

    fn copy_pay_code(app: &mut App) {
        let code = app.pay_code.clone();
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(code)) {
            Ok(()) => app.status_message = Some("Pay code copied to clipboard".to_string()),
            Err(error) => app.status_message = Some(format!("Clipboard unavailable: {}", error)),
        }
    }

    fn handle_cart(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.cart.len();
                app.move_selection_down(len);
            }
            KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
            KeyCode::Char('+') => {
                if let Some(item) = app.cart.get(app.selected_index) {
                    let product = item.product.clone();
                    let customizations = item.customizations.clone();
                    app.add_to_cart(&product, customizations);
                }
            }
            KeyCode::Char('-') => {
                if let Some(item) = app.cart.get(app.selected_index) {
                    let id = item.id.clone();
                    app.decrease_cart_item(&id);
                    if app.selected_index >= app.cart.len() {
                        app.move_selection_up();
                    }
                }
            }
            KeyCode::Enter => app.place_order(),
            _ => {}
        }
    }

    fn handle_payment_methods(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.payment_methods.len();
                app.move_selection_down(len);
            }
            KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
            KeyCode::Char('u') => app.start_top_up(),
            _ => {}
        }
    }

    fn handle_order_history(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.order_history.len();
                app.move_selection_down(len);
            }
            KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
            KeyCode::Char('e') => app.start_order_export(),
            _ => {}
        }
    }

    fn handle_top_up_method(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.payment_methods.len();
                app.move_selection_down(len);
            }
            KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
            KeyCode::Enter => app.choose_top_up_method(),
            _ => {}
        }
    }

    fn handle_help(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_overlay();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = app.help_scroll.saturating_add(1);
            }
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::Home => app.help_scroll = 0,
            _ => {}
        }
    }

    fn handle_settings(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_overlay(),
            KeyCode::Char('t') | KeyCode::Enter => app.toggle_theme(),
            _ => {}
        }
    }
}

/// Maps the character-indexed cursor onto the byte offset `String`
/// edits expect, clamping to the end of the buffer.
fn byte_offset(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

fn insert_at_cursor(text: &mut String, cursor: usize, c: char) {
    let offset = byte_offset(text, cursor);
    text.insert(offset, c);
}

fn remove_at_cursor(text: &mut String, cursor: usize) {
    let offset = byte_offset(text, cursor);
    text.remove(offset);
}
