use crate::application::{App, Overlay, Tab, PRIMARY_CARD};
use crate::domain::{self, Product};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub const PROFILE_ITEMS: [&str; 5] = [
    "Scan & Pay",
    "Payment Methods",
    "Order History",
    "Help",
    "Settings",
];

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_tab_bar(f, app, chunks[1]);
    match app.tab {
        Tab::Home => render_home_tab(f, app, chunks[2]),
        Tab::Rewards => render_rewards_tab(f, app, chunks[2]),
        Tab::Order => render_order_tab(f, app, chunks[2]),
        Tab::Stores => render_stores_tab(f, app, chunks[2]),
        Tab::Profile => render_profile_tab(f, app, chunks[2]),
    }
    render_status_bar(f, app, chunks[3]);

    match app.overlay {
        Overlay::Notifications => render_notifications_overlay(f, app),
        Overlay::Favorites => render_favorites_overlay(f, app),
        Overlay::ScanPay => render_scan_pay_overlay(f, app),
        Overlay::Cart => render_cart_overlay(f, app),
        Overlay::PaymentMethods => render_payment_methods_overlay(f, app),
        Overlay::OrderHistory => render_order_history_overlay(f, app),
        Overlay::TopUpMethod => render_top_up_method_overlay(f, app),
        Overlay::ProductDetail => render_product_detail_overlay(f, app),
        Overlay::Help => render_help_popup(f, app.help_scroll),
        Overlay::Settings => render_settings_overlay(f, app),
        // Text-entry overlays prompt through the status bar over the
        // live tab: the menu filters as the query changes.
        Overlay::None
        | Overlay::MenuSearch
        | Overlay::Scanner
        | Overlay::TopUpAmount
        | Overlay::ExportOrders => {}
    }
}

fn accent(app: &App) -> Color {
    if app.dark_mode {
        Color::LightGreen
    } else {
        Color::Green
    }
}

fn selection_style(app: &App) -> Style {
    Style::default().bg(accent(app)).fg(Color::Black)
}

fn icon_glyph(key: &str) -> &'static str {
    match key {
        "latte" => "◉",
        "coffee" => "●",
        "blended" => "◍",
        "pastry" => "▣",
        "sun" => "☼",
        "city" => "▦",
        "leaf" => "❀",
        "card" => "▤",
        "wallet" => "▥",
        "bank" => "▩",
        _ => "·",
    }
}

fn progress_bar(current: u32, target: u32, width: usize) -> String {
    let filled = if target == 0 {
        width
    } else {
        (current.min(target) as usize * width) / target as usize
    };
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

fn centered_popup(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "tbrew | {} • {} | {} | {} stars | {} unread",
        app.user.name,
        app.user.membership_level,
        domain::format_rupiah(app.user.balance),
        app.user.stars,
        app.unread_notifications()
    ))
    .style(Style::default().fg(accent(app)));
    f.render_widget(header, area);
}

fn render_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for tab in Tab::ALL {
        let mut title = format!(" {} ", tab.title());
        if tab == Tab::Order && app.cart_count() > 0 {
            title = format!(" {} ({}) ", tab.title(), app.cart_count());
        }
        let style = if tab == app.tab {
            selection_style(app).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(title, style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_home_tab(f: &mut Frame, app: &App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    let to_next = domain::stars_to_next_reward(app.user.stars);
    let card_lines = vec![
        Line::from(Span::styled(
            domain::format_rupiah(app.user.balance),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} stars • {}",
            app.user.stars, app.user.membership_level
        )),
        Line::from(format!(
            "{} {} stars to next reward",
            progress_bar(app.user.stars, domain::REWARD_STAR_TARGET, 24),
            to_next
        )),
        Line::from(Span::styled(
            "u: top up • p: pay in store",
            Style::default().fg(Color::Gray),
        )),
    ];
    let card = Paragraph::new(card_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(PRIMARY_CARD)
            .style(Style::default().fg(accent(app))),
    );
    f.render_widget(card, sections[0]);

    let offer_rows: Vec<Row> = app
        .offers
        .iter()
        .map(|offer| {
            Row::new(vec![
                Cell::from(offer.title.clone()).style(Style::default().fg(Color::Yellow)),
                Cell::from(offer.description.clone()),
            ])
        })
        .collect();
    let offers = Table::new(
        offer_rows,
        [Constraint::Length(26), Constraint::Min(10)],
    )
    .block(Block::default().borders(Borders::ALL).title("Offers"))
    .column_spacing(1);
    f.render_widget(offers, sections[1]);

    let mut order_rows = vec![Row::new(vec![
        Cell::from("Drink").style(Style::default().fg(Color::Yellow)),
        Cell::from("Size").style(Style::default().fg(Color::Yellow)),
        Cell::from("Price").style(Style::default().fg(Color::Yellow)),
        Cell::from("When").style(Style::default().fg(Color::Yellow)),
    ])];
    for recent in &app.recent_orders {
        order_rows.push(Row::new(vec![
            Cell::from(recent.drink_name.clone()),
            Cell::from(recent.size.clone()),
            Cell::from(recent.price.clone()),
            Cell::from(recent.date.clone()),
        ]));
    }
    let recent = Table::new(
        order_rows,
        [
            Constraint::Length(24),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Min(10),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Recent Orders"))
    .column_spacing(1);
    f.render_widget(recent, sections[2]);
}

fn render_rewards_tab(f: &mut Frame, app: &App, area: Rect) {
    let mut rows = vec![Row::new(vec![
        Cell::from("Status").style(Style::default().fg(Color::Yellow)),
        Cell::from("Reward").style(Style::default().fg(Color::Yellow)),
        Cell::from("Details").style(Style::default().fg(Color::Yellow)),
    ])];
    for (index, reward) in app.rewards.iter().enumerate() {
        let status = if reward.redeemed {
            Cell::from("Redeemed").style(Style::default().fg(Color::DarkGray))
        } else if reward.available {
            Cell::from("Available").style(Style::default().fg(accent(app)))
        } else {
            Cell::from("Locked").style(Style::default().fg(Color::Gray))
        };
        let style = if index == app.selected_index {
            selection_style(app)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                status,
                Cell::from(reward.title.clone()),
                Cell::from(reward.points.clone()),
            ])
            .style(style),
        );
    }

    let title = format!(
        "Rewards ({} stars, {} to next)",
        app.user.stars,
        domain::stars_to_next_reward(app.user.stars)
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(28),
            Constraint::Min(14),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(1);
    f.render_widget(table, area);
}

fn render_order_tab(f: &mut Frame, app: &App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let search_line = if app.search_query.is_empty() {
        "Search: (press / to search the menu)".to_string()
    } else {
        format!("Search: {}", app.search_query)
    };
    f.render_widget(
        Paragraph::new(search_line).style(Style::default().fg(Color::Gray)),
        sections[0],
    );

    let menu = app.filtered_menu();
    let mut rows = vec![Row::new(vec![
        Cell::from(""),
        Cell::from("Item").style(Style::default().fg(Color::Yellow)),
        Cell::from("Category").style(Style::default().fg(Color::Yellow)),
        Cell::from("Price").style(Style::default().fg(Color::Yellow)),
        Cell::from(""),
    ])];
    for (index, &product) in menu.iter().enumerate() {
        let style = if index == app.selected_index {
            selection_style(app)
        } else {
            Style::default()
        };
        rows.push(menu_row(app, product).style(style));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(26),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(2),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Menu ({} items)", menu.len())),
    )
    .column_spacing(1);
    f.render_widget(table, sections[1]);
}

fn menu_row(app: &App, product: &Product) -> Row<'static> {
    let favorite = if app.is_favorite(product) { "♥" } else { "" };
    Row::new(vec![
        Cell::from(icon_glyph(&product.icon)),
        Cell::from(product.name.clone()),
        Cell::from(product.category.clone()),
        Cell::from(domain::format_rupiah(product.base_price)),
        Cell::from(favorite).style(Style::default().fg(Color::Red)),
    ])
}

fn render_stores_tab(f: &mut Frame, app: &App, area: Rect) {
    let mut rows = vec![Row::new(vec![
        Cell::from("Store").style(Style::default().fg(Color::Yellow)),
        Cell::from("Distance").style(Style::default().fg(Color::Yellow)),
        Cell::from("Status").style(Style::default().fg(Color::Yellow)),
        Cell::from("Store Special").style(Style::default().fg(Color::Yellow)),
    ])];
    for (index, store) in app.stores.iter().enumerate() {
        let status = if store.is_open {
            Cell::from("Open").style(Style::default().fg(accent(app)))
        } else {
            Cell::from("Closed").style(Style::default().fg(Color::Red))
        };
        let style = if index == app.selected_index {
            selection_style(app)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(format!("{}\n{}", store.name, store.address)),
                Cell::from(store.distance.clone()),
                status,
                Cell::from(format!(
                    "{} ({})",
                    store.special_menu.name,
                    domain::format_rupiah(store.special_menu.base_price)
                )),
            ])
            .style(style)
            .height(2),
        );
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Min(20),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Nearby Stores"))
    .column_spacing(1);
    f.render_widget(table, area);
}

fn render_profile_tab(f: &mut Frame, app: &App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let info = Paragraph::new(vec![
        Line::from(Span::styled(
            app.user.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(app.user.membership_level.clone()),
        Line::from(format!(
            "{} • {} stars",
            domain::format_rupiah(app.user.balance),
            app.user.stars
        )),
        Line::from(format!("Pay code: {}", app.pay_code)),
    ])
    .block(Block::default().borders(Borders::ALL).title("Profile"));
    f.render_widget(info, sections[0]);

    let rows: Vec<Row> = PROFILE_ITEMS
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let style = if index == app.selected_index {
                selection_style(app)
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(*item)]).style(style)
        })
        .collect();
    let table = Table::new(rows, [Constraint::Min(20)])
        .block(Block::default().borders(Borders::ALL).title("Account"))
        .column_spacing(1);
    f.render_widget(table, sections[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.overlay {
        Overlay::None => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                tab_hint(app)
            }
        }
        Overlay::MenuSearch => format!(
            "Search: {} (Enter to keep, Esc to clear)",
            app.search_query
        ),
        Overlay::Scanner => format!("Scan code: {} (Enter to submit, Esc to cancel)", app.input),
        Overlay::TopUpAmount => format!(
            "Top up via {}: Rp {} (Enter to confirm, Esc to cancel)",
            app.top_up_method.as_deref().unwrap_or(PRIMARY_CARD),
            app.input
        ),
        Overlay::ExportOrders => format!(
            "Export orders to: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
        Overlay::Notifications => "Enter: mark read | j/k: move | Esc: close".to_string(),
        Overlay::Favorites => "Enter: open item | v: unfavorite | j/k: move | Esc: close".to_string(),
        Overlay::ScanPay => "y: copy pay code | s: scan a code | Esc: close".to_string(),
        Overlay::Cart => "+/-: quantity | Enter: place order | j/k: move | Esc: close".to_string(),
        Overlay::PaymentMethods => "u: top up | j/k: move | Esc: close".to_string(),
        Overlay::OrderHistory => "e: export CSV | j/k: move | Esc: close".to_string(),
        Overlay::TopUpMethod => "Enter: choose source | j/k: move | Esc: cancel".to_string(),
        Overlay::ProductDetail => {
            "s: size | m: milk | v: favorite | Enter: add to cart | Esc: close".to_string()
        }
        Overlay::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close".to_string(),
        Overlay::Settings => "t/Enter: toggle dark mode | Esc: close".to_string(),
    };

    let style = match app.overlay {
        Overlay::None => Style::default(),
        Overlay::MenuSearch | Overlay::Scanner => Style::default().fg(Color::Green),
        Overlay::TopUpAmount | Overlay::ExportOrders => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::Cyan),
    };
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn tab_hint(app: &App) -> String {
    match app.tab {
        Tab::Home => format!(
            "1-5: tabs | n: notifications ({} unread) | u: top up | p: pay | ?: help | q: quit",
            app.unread_notifications()
        ),
        Tab::Rewards => "Enter: redeem | j/k: move | 1-5: tabs | q: quit".to_string(),
        Tab::Order => format!(
            "Enter: open item | /: search | v: favorite | c: cart ({}) | q: quit",
            app.cart_count()
        ),
        Tab::Stores => "Enter: open store special | j/k: move | 1-5: tabs | q: quit".to_string(),
        Tab::Profile => "Enter: open | j/k: move | 1-5: tabs | q: quit".to_string(),
    }
}

fn render_notifications_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(popup);

    let mut rows = Vec::new();
    for (index, notification) in app.notifications.iter().enumerate() {
        let marker = if notification.is_unread { "●" } else { " " };
        let style = if index == app.selected_index {
            selection_style(app)
        } else if notification.is_unread {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        rows.push(
            Row::new(vec![
                Cell::from(marker),
                Cell::from(notification.title.clone()),
                Cell::from(notification.time.clone()),
            ])
            .style(style),
        );
    }
    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Min(24),
            Constraint::Length(16),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Notifications ({} unread)", app.unread_notifications())),
    )
    .column_spacing(1);
    f.render_widget(table, sections[0]);

    let message = app
        .notifications
        .get(app.selected_index)
        .map(|n| n.message.clone())
        .unwrap_or_default();
    let detail = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(detail, sections[1]);
}

fn render_favorites_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    if app.favorites.is_empty() {
        let empty = Paragraph::new("Nothing here yet. Press v on a menu item to favorite it.")
            .block(Block::default().borders(Borders::ALL).title("Favorites"));
        f.render_widget(empty, popup);
        return;
    }

    let mut rows = Vec::new();
    for (index, product) in app.favorites.iter().enumerate() {
        let style = if index == app.selected_index {
            selection_style(app)
        } else {
            Style::default()
        };
        rows.push(menu_row(app, product).style(style));
    }
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(26),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(2),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Favorites"))
    .column_spacing(1);
    f.render_widget(table, popup);
}

fn render_scan_pay_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.user.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(app.user.membership_level.clone()),
        Line::from(""),
        Line::from(Span::styled(
            app.pay_code.clone(),
            Style::default()
                .fg(accent(app))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Balance: {}", domain::format_rupiah(app.user.balance))),
        Line::from(""),
        Line::from(Span::styled(
            "Show this code at the counter to pay and earn stars.",
            Style::default().fg(Color::Gray),
        )),
    ];
    let body = Paragraph::new(lines)
        .centered()
        .block(Block::default().borders(Borders::ALL).title("Scan & Pay"));
    f.render_widget(body, popup);
}

fn render_cart_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    if app.cart.is_empty() {
        let empty = Paragraph::new("Your cart is empty. Add something from the Order tab.")
            .block(Block::default().borders(Borders::ALL).title("Cart"));
        f.render_widget(empty, popup);
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(popup);

    let mut rows = vec![Row::new(vec![
        Cell::from("Item").style(Style::default().fg(Color::Yellow)),
        Cell::from("Options").style(Style::default().fg(Color::Yellow)),
        Cell::from("Qty").style(Style::default().fg(Color::Yellow)),
        Cell::from("Unit").style(Style::default().fg(Color::Yellow)),
        Cell::from("Total").style(Style::default().fg(Color::Yellow)),
    ])];
    for (index, item) in app.cart.iter().enumerate() {
        let options = item
            .customizations
            .values()
            .map(|option| option.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let style = if index == app.selected_index {
            selection_style(app)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(item.product.name.clone()),
                Cell::from(options),
                Cell::from(format!("x{}", item.quantity)),
                Cell::from(domain::format_rupiah(item.final_price)),
                Cell::from(domain::format_rupiah(item.line_total())),
            ])
            .style(style),
        );
    }
    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Min(18),
            Constraint::Length(4),
            Constraint::Length(11),
            Constraint::Length(11),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Cart"))
    .column_spacing(1);
    f.render_widget(table, sections[0]);

    let total = Paragraph::new(format!(
        "Total: {}   Balance: {}",
        domain::format_rupiah(app.cart_total()),
        domain::format_rupiah(app.user.balance)
    ))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(total, sections[1]);
}

fn render_payment_methods_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    let mut rows = Vec::new();
    for (index, method) in app.payment_methods.iter().enumerate() {
        let style = if index == app.selected_index {
            selection_style(app)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(icon_glyph(&method.icon)),
                Cell::from(method.name.clone()),
                Cell::from(method.details.clone()),
            ])
            .style(style),
        );
    }
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(20),
            Constraint::Min(20),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Payment Methods"))
    .column_spacing(1);
    f.render_widget(table, popup);
}

fn render_order_history_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    if app.order_history.is_empty() {
        let empty = Paragraph::new("No orders placed this session.")
            .block(Block::default().borders(Borders::ALL).title("Order History"));
        f.render_widget(empty, popup);
        return;
    }

    let mut rows = vec![Row::new(vec![
        Cell::from("Order").style(Style::default().fg(Color::Yellow)),
        Cell::from("Date").style(Style::default().fg(Color::Yellow)),
        Cell::from("Items").style(Style::default().fg(Color::Yellow)),
        Cell::from("Total").style(Style::default().fg(Color::Yellow)),
    ])];
    for (index, order) in app.order_history.iter().enumerate() {
        let items: u32 = order.items.iter().map(|item| item.quantity).sum();
        let style = if index == app.selected_index {
            selection_style(app)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(order.id.clone()),
                Cell::from(order.date.clone()),
                Cell::from(items.to_string()),
                Cell::from(domain::format_rupiah(order.total_price)),
            ])
            .style(style),
        );
    }
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Min(11),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Order History"))
    .column_spacing(1);
    f.render_widget(table, popup);
}

fn render_top_up_method_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    let mut rows = Vec::new();
    for (index, method) in app.payment_methods.iter().enumerate() {
        let style = if index == app.selected_index {
            selection_style(app)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(icon_glyph(&method.icon)),
                Cell::from(method.name.clone()),
                Cell::from(method.details.clone()),
            ])
            .style(style),
        );
    }
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(20),
            Constraint::Min(20),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Top Up: choose a source"),
    )
    .column_spacing(1);
    f.render_widget(table, popup);
}

fn render_product_detail_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    let Some(product) = &app.detail_product else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", icon_glyph(&product.icon))),
            Span::styled(
                product.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            product.category.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(product.description.clone()),
        Line::from(""),
    ];

    if let Some(size) = product.sizes.get(app.detail_size) {
        lines.push(Line::from(format!(
            "Size: {} (+{})  [s to change]",
            size.name,
            domain::format_rupiah(size.additional_price)
        )));
    }
    if let Some(milk) = product.milks.get(app.detail_milk) {
        lines.push(Line::from(format!(
            "Milk: {} (+{})  [m to change]",
            milk.name,
            domain::format_rupiah(milk.additional_price)
        )));
    }
    let favorite = if app.is_favorite(product) {
        "♥ favorited"
    } else {
        "♡ not favorited"
    };
    lines.push(Line::from(favorite));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Price: {}", domain::format_rupiah(app.detail_price())),
        Style::default()
            .fg(accent(app))
            .add_modifier(Modifier::BOLD),
    )));

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Customize"));
    f.render_widget(body, popup);
}

fn render_settings_overlay(f: &mut Frame, app: &App) {
    let popup = centered_popup(f.area());
    f.render_widget(Clear, popup);

    let theme = if app.dark_mode { "dark" } else { "light" };
    let lines = vec![
        Line::from(format!("Theme: {} (t to toggle)", theme)),
        Line::from(""),
        Line::from(format!("Member: {} ({})", app.user.name, app.user.membership_level)),
        Line::from(format!("Pay code: {}", app.pay_code)),
        Line::from(""),
        Line::from(Span::styled(
            "All data lives in memory and resets on exit.",
            Style::default().fg(Color::Gray),
        )),
    ];
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(body, popup);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = centered_popup(f.area());
    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("tbrew Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"TBREW KEY REFERENCE

=== TABS ===
1-5             Jump to Home / Rewards / Order / Stores / Profile
Tab / Shift+Tab Cycle through tabs
Up/Down or j/k  Move the list cursor
q               Quit (when no overlay is open)

=== ANYWHERE (no overlay open) ===
n               Notifications
f               Favorites
c               Cart
p               Pay code (scan & pay)
s               Scan a code
u               Top up balance
? or F1         This help

=== ORDER TAB ===
/               Search the menu (filters as you type)
Enter           Open the selected product
v               Toggle favorite on the selected product

=== PRODUCT SHEET ===
s / m           Cycle size / milk option
v               Toggle favorite
Enter           Add to cart

=== CART ===
+ / -           More / fewer of the selected line
Enter           Place the order
                Checkout needs enough card balance; top up first
                if the total exceeds it.

=== REWARDS TAB ===
Enter           Redeem the selected reward (one-way)

=== STORES TAB ===
Enter           Open the store's special on the product sheet

=== PROFILE TAB ===
Enter           Open the selected entry

=== NOTIFICATIONS ===
Enter           Mark the selected notification read

=== ORDER HISTORY ===
e               Export this session's orders to a CSV file

=== PAYMENT METHODS ===
u               Top up balance

=== SCAN & PAY ===
y               Copy the pay code to the clipboard
s               Switch to the code scanner

=== SETTINGS ===
t or Enter      Toggle dark mode

Esc closes any overlay and returns to the active tab."#
        .to_string()
}
