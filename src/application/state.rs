//! Application state for the terminal membership app.
//!
//! This module contains the in-memory membership store and the screen
//! state machine. Every mutation the UI can trigger goes through a
//! method on [`App`]; rendering and key handling live in the
//! presentation layer and only read or call into this state.

use crate::domain::{
    self, CartItem, CustomizationOption, MembershipSeed, NotificationItem, Offer, Order,
    PaymentMethod, Product, RecentOrder, Reward, Store, User,
};
use std::collections::{BTreeMap, VecDeque};
use uuid::Uuid;

/// Transient messages kept at most; older ones are dropped first.
const MAX_PENDING_MESSAGES: usize = 16;

/// Payment method whose details mirror the live card balance.
pub const PRIMARY_CARD: &str = "Brew Card";

/// Bottom navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Rewards,
    Order,
    Stores,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Rewards, Tab::Order, Tab::Stores, Tab::Profile];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Rewards => "Rewards",
            Tab::Order => "Order",
            Tab::Stores => "Stores",
            Tab::Profile => "Profile",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Rewards => 1,
            Tab::Order => 2,
            Tab::Stores => 3,
            Tab::Profile => 4,
        }
    }
}

/// Full-screen overlays layered above the active tab.
///
/// At most one overlay is ever visible; opening one replaces whatever
/// was open before, and `None` means the tab itself has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// No overlay, the active tab has focus
    None,
    /// Notification inbox
    Notifications,
    /// Favorited products
    Favorites,
    /// Member pay code for paying in store
    ScanPay,
    /// Code entry from a scanner or the keyboard
    Scanner,
    /// Cart and checkout
    Cart,
    /// Payment methods on file
    PaymentMethods,
    /// Orders placed this session
    OrderHistory,
    /// Pick a source for a balance top-up
    TopUpMethod,
    /// Enter a top-up amount
    TopUpAmount,
    /// Enter a filename for the order-history export
    ExportOrders,
    /// Product sheet with size and milk choices
    ProductDetail,
    /// Live menu search entry
    MenuSearch,
    /// Key binding reference
    Help,
    /// Theme and account settings
    Settings,
}

/// The membership store: every piece of mutable state in the app.
///
/// All balances, stars, cart lines, favorites, notifications and
/// rewards live here, together with the screen state the terminal UI
/// renders from. Operations are synchronous and atomic; user-facing
/// feedback goes through a bounded message queue the event loop drains
/// with [`App::poll_message`].
///
/// # Examples
///
/// ```
/// use tbrew::application::{App, Overlay, Tab};
/// use tbrew::infrastructure::SeedRepository;
///
/// let app = App::new(SeedRepository::load_embedded().unwrap());
/// assert_eq!(app.tab, Tab::Home);
/// assert_eq!(app.overlay, Overlay::None);
/// assert_eq!(app.user.balance, 125_000);
/// ```
#[derive(Debug)]
pub struct App {
    /// The signed-in member
    pub user: User,
    /// General product catalog
    pub products: Vec<Product>,
    /// Nearby stores, each with a store-exclusive special
    pub stores: Vec<Store>,
    /// Promotional offers for the home screen
    pub offers: Vec<Offer>,
    /// Historical orders shown on the home screen
    pub recent_orders: Vec<RecentOrder>,
    /// Payment methods on file
    pub payment_methods: Vec<PaymentMethod>,
    /// Notification inbox, newest first
    pub notifications: Vec<NotificationItem>,
    /// Loyalty rewards
    pub rewards: Vec<Reward>,
    /// Favorited products
    pub favorites: Vec<Product>,
    /// Current cart lines
    pub cart: Vec<CartItem>,
    /// Orders placed this session, newest first
    pub order_history: Vec<Order>,
    /// Active bottom tab
    pub tab: Tab,
    /// Active overlay, if any
    pub overlay: Overlay,
    /// Whether the dark palette is active
    pub dark_mode: bool,
    /// List cursor on the focused screen
    pub selected_index: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Live menu search query
    pub search_query: String,
    /// Product shown on the detail sheet
    pub detail_product: Option<Product>,
    /// Chosen size index on the detail sheet
    pub detail_size: usize,
    /// Chosen milk index on the detail sheet
    pub detail_milk: usize,
    /// Payment method chosen for a pending top-up
    pub top_up_method: Option<String>,
    /// Text buffer for amount and scanner entry
    pub input: String,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Cursor position within the active text buffer, counted in
    /// characters rather than bytes
    pub cursor_position: usize,
    /// Member pay code shown on the scan-and-pay screen
    pub pay_code: String,
    /// Message currently shown in the status line
    pub status_message: Option<String>,
    messages: VecDeque<String>,
}

impl App {
    /// Builds the store from seeded records.
    ///
    /// Derived state (the primary card's balance line) is refreshed
    /// immediately so the fixture cannot drift out of sync with the
    /// seeded balance.
    pub fn new(seed: MembershipSeed) -> Self {
        let mut app = Self {
            user: seed.user,
            products: seed.products,
            stores: seed.stores,
            offers: seed.offers,
            recent_orders: seed.recent_orders,
            payment_methods: seed.payment_methods,
            notifications: seed.notifications,
            rewards: seed.rewards,
            favorites: Vec::new(),
            cart: Vec::new(),
            order_history: Vec::new(),
            tab: Tab::Home,
            overlay: Overlay::None,
            dark_mode: true,
            selected_index: 0,
            help_scroll: 0,
            search_query: String::new(),
            detail_product: None,
            detail_size: 0,
            detail_milk: 0,
            top_up_method: None,
            input: String::new(),
            filename_input: String::new(),
            cursor_position: 0,
            pay_code: mint_pay_code(),
            status_message: None,
            messages: VecDeque::new(),
        };
        app.refresh_payment_details();
        app
    }

    /// Adds one unit of a customized product to the cart.
    ///
    /// The unit price is the base price plus every chosen option's
    /// surcharge. A line with the same product and the exact same
    /// customizations gains quantity instead of duplicating; any
    /// difference in options starts a new line. Always announces the
    /// addition on the message queue.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        customizations: BTreeMap<String, CustomizationOption>,
    ) {
        let final_price = domain::final_price(product, &customizations);

        let existing = self
            .cart
            .iter_mut()
            .find(|item| item.product.id == product.id && item.customizations == customizations);
        match existing {
            Some(item) => item.quantity += 1,
            None => {
                self.cart
                    .push(CartItem::new(product.clone(), customizations, final_price));
            }
        }

        self.push_message(format!("{} added to cart", product.name));
    }

    /// Decrements a cart line by id, removing it at quantity zero.
    ///
    /// Unknown ids are ignored.
    pub fn decrease_cart_item(&mut self, item_id: &str) {
        if let Some(index) = self.cart.iter().position(|item| item.id == item_id) {
            if self.cart[index].quantity > 1 {
                self.cart[index].quantity -= 1;
            } else {
                self.cart.remove(index);
            }
        }
    }

    /// Attempts to check out the current cart.
    ///
    /// On sufficient balance the total is debited, stars accrue, the
    /// order lands at the head of the session history, the cart empties
    /// and the cart overlay closes. On a shortfall nothing changes
    /// except a failure notification and message. An empty cart is a
    /// no-op.
    pub fn place_order(&mut self) {
        if self.cart.is_empty() {
            return;
        }

        let total = domain::cart_total(&self.cart);
        match domain::debit(self.user.balance, total) {
            Ok(remaining) => {
                self.user.balance = remaining;
                self.user.stars += domain::stars_earned(total);
                let order = Order::new(
                    std::mem::take(&mut self.cart),
                    total,
                    domain::order_date_label(),
                );
                self.push_notification(
                    "Order Successful",
                    format!("Your order #{} has been placed.", order.id),
                );
                self.order_history.insert(0, order);
                self.push_message("Order successful!".to_string());
                if self.overlay == Overlay::Cart {
                    self.close_overlay();
                }
                self.refresh_payment_details();
            }
            Err(error) => {
                self.push_notification("Payment Failed", "Your balance is not enough.".to_string());
                self.push_message(format!("Payment failed: {}", error));
            }
        }
    }

    /// Credits the balance by a positive amount.
    ///
    /// Zero and negative amounts are rejected without side effects.
    pub fn top_up_balance(&mut self, amount: i64, method: &str) {
        if amount <= 0 {
            return;
        }
        self.user.balance += amount;
        self.push_notification(
            "Top Up Successful",
            format!(
                "{} via {} has been added.",
                domain::format_rupiah(amount),
                method
            ),
        );
        self.push_message("Top up successful!".to_string());
        self.refresh_payment_details();
    }

    /// Redeems an available reward, marking it permanently redeemed.
    ///
    /// Locked, already-redeemed, and unknown rewards are ignored, so
    /// the operation is idempotent after the first success.
    pub fn redeem_reward(&mut self, reward_id: &str) {
        if let Some(reward) = self.rewards.iter_mut().find(|r| r.id == reward_id) {
            if reward.available && !reward.redeemed {
                reward.available = false;
                reward.redeemed = true;
                let title = reward.title.clone();
                self.push_notification(
                    "Reward Redeemed",
                    format!("You have successfully redeemed '{}'.", title),
                );
                self.push_message("Reward Redeemed!".to_string());
            }
        }
    }

    /// Adds or removes a product from the favorites list.
    ///
    /// Queues no transient message; the heart marker in the menu
    /// reflects the change.
    pub fn toggle_favorite(&mut self, product: &Product) {
        if let Some(index) = self.favorites.iter().position(|p| p.id == product.id) {
            self.favorites.remove(index);
        } else {
            self.favorites.push(product.clone());
        }
    }

    pub fn is_favorite(&self, product: &Product) -> bool {
        self.favorites.iter().any(|p| p.id == product.id)
    }

    /// Full catalog: every store's special first, then general products.
    pub fn full_menu(&self) -> Vec<&Product> {
        self.stores
            .iter()
            .map(|store| &store.special_menu)
            .chain(self.products.iter())
            .collect()
    }

    /// Menu filtered by the live search query.
    ///
    /// A blank query returns the full catalog; anything else matches
    /// case-insensitively on product name or category. Recomputed on
    /// every call, never cached.
    pub fn filtered_menu(&self) -> Vec<&Product> {
        if self.search_query.trim().is_empty() {
            return self.full_menu();
        }
        self.full_menu()
            .into_iter()
            .filter(|product| domain::matches_query(product, &self.search_query))
            .collect()
    }

    /// Sum of unit price times quantity over the cart.
    pub fn cart_total(&self) -> i64 {
        domain::cart_total(&self.cart)
    }

    /// Units in the cart, for the order tab badge.
    pub fn cart_count(&self) -> u32 {
        self.cart.iter().map(|item| item.quantity).sum()
    }

    /// Unread notifications, for the home screen badge.
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_unread).count()
    }

    /// Marks a notification as read.
    pub fn mark_notification_read(&mut self, id: &str) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            notification.is_unread = false;
        }
    }

    /// Callback boundary for scanned codes.
    ///
    /// Closes the scanner view and reports the decoded text verbatim;
    /// the store never interprets the payload.
    pub fn on_code_scanned(&mut self, code: &str) {
        self.close_overlay();
        self.push_message(format!("Scanned: {}", code));
    }

    /// Takes the oldest pending message, if any.
    ///
    /// The event loop calls this once per iteration and shows the
    /// result in the status line.
    pub fn poll_message(&mut self) -> Option<String> {
        self.messages.pop_front()
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() == MAX_PENDING_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    fn push_notification(&mut self, title: &str, message: String) {
        self.notifications
            .insert(0, NotificationItem::just_now(title, message));
    }

    fn refresh_payment_details(&mut self) {
        let details = format!("Balance: {}", domain::format_rupiah(self.user.balance));
        for method in &mut self.payment_methods {
            if method.name == PRIMARY_CARD {
                method.details = details.clone();
            }
        }
    }

    /// Switches the bottom tab and resets the list cursor.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected_index = 0;
    }

    pub fn next_tab(&mut self) {
        let next = (self.tab.index() + 1) % Tab::ALL.len();
        self.select_tab(Tab::ALL[next]);
    }

    pub fn previous_tab(&mut self) {
        let previous = (self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.select_tab(Tab::ALL[previous]);
    }

    /// Opens an overlay, replacing whatever was open before.
    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
        self.selected_index = 0;
        self.help_scroll = 0;
        self.status_message = None;
    }

    /// Closes any overlay and clears transient entry buffers.
    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
        self.selected_index = 0;
        self.input.clear();
        self.cursor_position = 0;
        self.detail_product = None;
        self.top_up_method = None;
    }

    /// Opens the product sheet with the first size and milk selected.
    pub fn open_product_detail(&mut self, product: Product) {
        self.detail_product = Some(product);
        self.detail_size = 0;
        self.detail_milk = 0;
        self.overlay = Overlay::ProductDetail;
    }

    pub fn cycle_detail_size(&mut self) {
        if let Some(product) = &self.detail_product {
            if !product.sizes.is_empty() {
                self.detail_size = (self.detail_size + 1) % product.sizes.len();
            }
        }
    }

    pub fn cycle_detail_milk(&mut self) {
        if let Some(product) = &self.detail_product {
            if !product.milks.is_empty() {
                self.detail_milk = (self.detail_milk + 1) % product.milks.len();
            }
        }
    }

    /// Customization map for the current detail selection.
    pub fn detail_customizations(&self) -> BTreeMap<String, CustomizationOption> {
        let mut customizations = BTreeMap::new();
        if let Some(product) = &self.detail_product {
            if let Some(size) = product.sizes.get(self.detail_size) {
                customizations.insert("Size".to_string(), size.clone());
            }
            if let Some(milk) = product.milks.get(self.detail_milk) {
                customizations.insert("Milk".to_string(), milk.clone());
            }
        }
        customizations
    }

    /// Live unit price on the product sheet.
    pub fn detail_price(&self) -> i64 {
        match &self.detail_product {
            Some(product) => domain::final_price(product, &self.detail_customizations()),
            None => 0,
        }
    }

    /// Adds the detail selection to the cart and closes the sheet.
    pub fn add_detail_to_cart(&mut self) {
        if let Some(product) = self.detail_product.clone() {
            let customizations = self.detail_customizations();
            self.add_to_cart(&product, customizations);
            self.close_overlay();
        }
    }

    /// Opens live search over the menu, resuming any previous query.
    pub fn start_menu_search(&mut self) {
        self.overlay = Overlay::MenuSearch;
        self.selected_index = 0;
        self.cursor_position = self.search_query.chars().count();
        self.status_message = None;
    }

    /// Keeps the query and returns focus to the order tab.
    pub fn finish_menu_search(&mut self) {
        self.overlay = Overlay::None;
        self.selected_index = 0;
        self.cursor_position = 0;
    }

    /// Drops the query and returns focus to the order tab.
    pub fn cancel_menu_search(&mut self) {
        self.search_query.clear();
        self.finish_menu_search();
    }

    /// Opens scanner entry with an empty code buffer.
    pub fn start_scanner(&mut self) {
        self.overlay = Overlay::Scanner;
        self.input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Starts a top-up by picking the source payment method.
    pub fn start_top_up(&mut self) {
        self.overlay = Overlay::TopUpMethod;
        self.selected_index = 0;
        self.status_message = None;
    }

    /// Locks in the top-up source and prompts for an amount.
    pub fn choose_top_up_method(&mut self) {
        if let Some(method) = self.payment_methods.get(self.selected_index) {
            self.top_up_method = Some(method.name.clone());
            self.overlay = Overlay::TopUpAmount;
            self.input.clear();
            self.cursor_position = 0;
        }
    }

    /// Applies the entered top-up amount.
    ///
    /// Rejects anything that does not parse to a positive number and
    /// keeps the dialog open so the member can correct it.
    pub fn confirm_top_up(&mut self) {
        match self.input.trim().parse::<i64>() {
            Ok(amount) if amount > 0 => {
                let method = self
                    .top_up_method
                    .clone()
                    .unwrap_or_else(|| PRIMARY_CARD.to_string());
                self.top_up_balance(amount, &method);
                self.close_overlay();
            }
            _ => {
                self.push_message("Enter an amount greater than zero".to_string());
            }
        }
    }

    /// Opens the export dialog with a default filename.
    pub fn start_order_export(&mut self) {
        self.overlay = Overlay::ExportOrders;
        self.filename_input = "orders.csv".to_string();
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    /// Filename to export to, falling back to the default.
    pub fn export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "orders.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of an order-history export.
    pub fn set_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.push_message(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.push_message(format!("Export failed: {}", error));
            }
        }
        self.overlay = Overlay::OrderHistory;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Moves the list cursor up on the focused screen.
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Moves the list cursor down, clamped to the list length.
    pub fn move_selection_down(&mut self, len: usize) {
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }
}

fn mint_pay_code() -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("PAY-{}-{}-{}", &raw[..4], &raw[4..8], &raw[8..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_option(name: &str, additional_price: i64) -> CustomizationOption {
        CustomizationOption {
            name: name.to_string(),
            additional_price,
        }
    }

    fn test_product(id: &str, name: &str, category: &str, base_price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            description: format!("{} description", name),
            base_price,
            icon: "coffee".to_string(),
            sizes: vec![test_option("Grande", 0), test_option("Venti", 3000)],
            milks: vec![test_option("Whole Milk", 0), test_option("Oat Milk", 5000)],
        }
    }

    fn test_seed() -> MembershipSeed {
        MembershipSeed {
            user: User {
                name: "Made Daryl".to_string(),
                membership_level: "Gold Member".to_string(),
                stars: 287,
                balance: 125_000,
            },
            products: vec![
                test_product("p1", "Caramel Macchiato", "Espresso", 62_000),
                test_product("p2", "Vanilla Latte", "Espresso", 55_000),
                test_product("p3", "Croissant", "Food", 30_000),
            ],
            stores: vec![Store {
                id: "s1".to_string(),
                name: "Brewhouse Kuta Beach".to_string(),
                address: "Jl. Pantai Kuta No. 123".to_string(),
                distance: "2.3 km".to_string(),
                is_open: true,
                special_menu: test_product("sp1", "Sunset Brew", "Store Special", 75_000),
            }],
            offers: vec![Offer {
                id: "o1".to_string(),
                title: "Buy 1 Get 1 Free".to_string(),
                description: "Any handcrafted beverage".to_string(),
            }],
            recent_orders: vec![RecentOrder {
                id: "ro1".to_string(),
                drink_name: "Caramel Macchiato".to_string(),
                size: "Grande".to_string(),
                price: "Rp 65,000".to_string(),
                date: "Today, 10:30 AM".to_string(),
            }],
            payment_methods: vec![
                PaymentMethod {
                    id: "pm1".to_string(),
                    name: "Brew Card".to_string(),
                    details: String::new(),
                    icon: "card".to_string(),
                },
                PaymentMethod {
                    id: "pm2".to_string(),
                    name: "Gopay".to_string(),
                    details: "Connected".to_string(),
                    icon: "wallet".to_string(),
                },
            ],
            notifications: vec![NotificationItem {
                id: "n1".to_string(),
                title: "New Reward Available".to_string(),
                message: "You've earned a free drink!".to_string(),
                time: "2 minutes ago".to_string(),
                is_unread: true,
            }],
            rewards: vec![
                Reward {
                    id: "r1".to_string(),
                    title: "Free Handcrafted Drink".to_string(),
                    points: "150 stars".to_string(),
                    available: true,
                    redeemed: false,
                },
                Reward {
                    id: "r2".to_string(),
                    title: "Bonus Star Challenge".to_string(),
                    points: "Complete 3 purchases".to_string(),
                    available: false,
                    redeemed: false,
                },
            ],
        }
    }

    fn test_app() -> App {
        App::new(test_seed())
    }

    fn grande_whole(product: &Product) -> BTreeMap<String, CustomizationOption> {
        let mut customizations = BTreeMap::new();
        customizations.insert("Size".to_string(), product.sizes[0].clone());
        customizations.insert("Milk".to_string(), product.milks[0].clone());
        customizations
    }

    fn drain_messages(app: &mut App) -> Vec<String> {
        let mut drained = Vec::new();
        while let Some(message) = app.poll_message() {
            drained.push(message);
        }
        drained
    }

    #[test]
    fn test_new_app_defaults() {
        let app = test_app();

        assert_eq!(app.tab, Tab::Home);
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.cart.is_empty());
        assert!(app.favorites.is_empty());
        assert!(app.order_history.is_empty());
        assert!(app.dark_mode);
        assert!(app.status_message.is_none());
        assert!(app.pay_code.starts_with("PAY-"));
        assert_eq!(app.pay_code.len(), "PAY-XXXX-XXXX-XXXX".len());
    }

    #[test]
    fn test_new_app_refreshes_card_details_from_seed_balance() {
        let app = test_app();
        assert_eq!(app.payment_methods[0].details, "Balance: Rp 125,000");
        // Other methods keep their seeded details
        assert_eq!(app.payment_methods[1].details, "Connected");
    }

    #[test]
    fn test_add_to_cart_merges_identical_customizations() {
        let mut app = test_app();
        let product = app.products[0].clone();
        let customizations = grande_whole(&product);

        app.add_to_cart(&product, customizations.clone());
        app.add_to_cart(&product, customizations);

        assert_eq!(app.cart.len(), 1);
        assert_eq!(app.cart[0].quantity, 2);
        assert_eq!(app.cart[0].final_price, 62_000);
    }

    #[test]
    fn test_add_to_cart_separates_different_customizations() {
        let mut app = test_app();
        let product = app.products[0].clone();
        let mut venti = grande_whole(&product);
        venti.insert("Size".to_string(), product.sizes[1].clone());

        app.add_to_cart(&product, grande_whole(&product));
        app.add_to_cart(&product, venti);

        assert_eq!(app.cart.len(), 2);
        assert_eq!(app.cart[0].quantity, 1);
        assert_eq!(app.cart[1].quantity, 1);
        assert_eq!(app.cart[0].final_price, 62_000);
        assert_eq!(app.cart[1].final_price, 65_000); // Venti adds 3,000
    }

    #[test]
    fn test_add_to_cart_prices_option_surcharges() {
        let mut app = test_app();
        let product = app.products[0].clone();
        let mut customizations = BTreeMap::new();
        customizations.insert("Size".to_string(), product.sizes[1].clone());
        customizations.insert("Milk".to_string(), product.milks[1].clone());

        app.add_to_cart(&product, customizations);

        assert_eq!(app.cart[0].final_price, 62_000 + 3_000 + 5_000);
    }

    #[test]
    fn test_add_to_cart_announces_every_addition() {
        let mut app = test_app();
        let product = app.products[0].clone();

        app.add_to_cart(&product, grande_whole(&product));
        app.add_to_cart(&product, grande_whole(&product));

        let messages = drain_messages(&mut app);
        assert_eq!(
            messages,
            vec![
                "Caramel Macchiato added to cart".to_string(),
                "Caramel Macchiato added to cart".to_string(),
            ]
        );
    }

    #[test]
    fn test_decrease_cart_item_decrements_then_removes() {
        let mut app = test_app();
        let product = app.products[0].clone();
        app.add_to_cart(&product, grande_whole(&product));
        app.add_to_cart(&product, grande_whole(&product));
        let item_id = app.cart[0].id.clone();

        app.decrease_cart_item(&item_id);
        assert_eq!(app.cart.len(), 1);
        assert_eq!(app.cart[0].quantity, 1);

        app.decrease_cart_item(&item_id);
        assert!(app.cart.is_empty());
    }

    #[test]
    fn test_decrease_cart_item_unknown_id_is_noop() {
        let mut app = test_app();
        let product = app.products[0].clone();
        app.add_to_cart(&product, grande_whole(&product));

        app.decrease_cart_item("missing");

        assert_eq!(app.cart.len(), 1);
        assert_eq!(app.cart[0].quantity, 1);
    }

    #[test]
    fn test_place_order_success_flow() {
        let mut app = test_app();
        let product = app.products[0].clone();
        app.add_to_cart(&product, grande_whole(&product));
        app.add_to_cart(&product, grande_whole(&product));
        app.open_overlay(Overlay::Cart);
        drain_messages(&mut app);
        let notifications_before = app.notifications.len();

        app.place_order();

        // Balance debited by the full total, stars accrued at 1 per 10k
        assert_eq!(app.user.balance, 125_000 - 124_000);
        assert_eq!(app.user.stars, 287 + 12);

        // Order snapshot prepended with the total and both units
        assert_eq!(app.order_history.len(), 1);
        let order = &app.order_history[0];
        assert_eq!(order.total_price, 124_000);
        assert!(order.id.starts_with("BRW-"));
        assert_eq!(order.id.len(), "BRW-".len() + 6);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);

        // Cart cleared and the cart overlay dismissed
        assert!(app.cart.is_empty());
        assert_eq!(app.overlay, Overlay::None);

        // Success notification lands at the head, unread
        assert_eq!(app.notifications.len(), notifications_before + 1);
        assert_eq!(app.notifications[0].title, "Order Successful");
        assert!(app.notifications[0].is_unread);
        assert_eq!(app.notifications[0].time, "Just now");

        // Derived card details follow the new balance
        assert_eq!(app.payment_methods[0].details, "Balance: Rp 1,000");

        let messages = drain_messages(&mut app);
        assert_eq!(messages, vec!["Order successful!".to_string()]);
    }

    #[test]
    fn test_place_order_insufficient_balance_changes_nothing() {
        let mut app = test_app();
        app.user.balance = 50_000;
        app.refresh_payment_details();
        let product = app.products[0].clone();
        app.add_to_cart(&product, grande_whole(&product));
        app.open_overlay(Overlay::Cart);
        drain_messages(&mut app);

        app.place_order();

        assert_eq!(app.user.balance, 50_000);
        assert_eq!(app.user.stars, 287);
        assert_eq!(app.cart.len(), 1);
        assert!(app.order_history.is_empty());
        assert_eq!(app.overlay, Overlay::Cart);

        assert_eq!(app.notifications[0].title, "Payment Failed");
        assert_eq!(app.notifications[0].message, "Your balance is not enough.");

        let messages = drain_messages(&mut app);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Payment failed:"));
    }

    #[test]
    fn test_place_order_empty_cart_is_noop() {
        let mut app = test_app();
        let notifications_before = app.notifications.len();

        app.place_order();

        assert_eq!(app.user.balance, 125_000);
        assert!(app.order_history.is_empty());
        assert_eq!(app.notifications.len(), notifications_before);
        assert!(drain_messages(&mut app).is_empty());
    }

    #[test]
    fn test_place_order_allows_exact_balance() {
        let mut app = test_app();
        app.user.balance = 62_000;
        let product = app.products[0].clone();
        app.add_to_cart(&product, grande_whole(&product));

        app.place_order();

        assert_eq!(app.user.balance, 0);
        assert_eq!(app.order_history.len(), 1);
    }

    #[test]
    fn test_top_up_balance_credits_and_notifies() {
        let mut app = test_app();
        drain_messages(&mut app);

        app.top_up_balance(50_000, "Gopay");

        assert_eq!(app.user.balance, 175_000);
        assert_eq!(app.notifications[0].title, "Top Up Successful");
        assert_eq!(
            app.notifications[0].message,
            "Rp 50,000 via Gopay has been added."
        );
        assert_eq!(app.payment_methods[0].details, "Balance: Rp 175,000");
        assert_eq!(
            drain_messages(&mut app),
            vec!["Top up successful!".to_string()]
        );
    }

    #[test]
    fn test_top_up_balance_rejects_non_positive_amounts() {
        let mut app = test_app();
        let notifications_before = app.notifications.len();

        app.top_up_balance(0, "Gopay");
        app.top_up_balance(-5_000, "Gopay");

        assert_eq!(app.user.balance, 125_000);
        assert_eq!(app.notifications.len(), notifications_before);
        assert!(drain_messages(&mut app).is_empty());
    }

    #[test]
    fn test_redeem_reward_is_one_way() {
        let mut app = test_app();
        drain_messages(&mut app);

        app.redeem_reward("r1");
        assert!(app.rewards[0].redeemed);
        assert!(!app.rewards[0].available);
        assert_eq!(app.notifications[0].title, "Reward Redeemed");
        assert_eq!(
            drain_messages(&mut app),
            vec!["Reward Redeemed!".to_string()]
        );

        // A second redemption of the same reward does nothing
        let notifications_before = app.notifications.len();
        app.redeem_reward("r1");
        assert!(app.rewards[0].redeemed);
        assert_eq!(app.notifications.len(), notifications_before);
        assert!(drain_messages(&mut app).is_empty());
    }

    #[test]
    fn test_redeem_reward_ignores_locked_and_unknown() {
        let mut app = test_app();
        let notifications_before = app.notifications.len();

        app.redeem_reward("r2"); // not yet available
        app.redeem_reward("nope");

        assert!(!app.rewards[1].redeemed);
        assert_eq!(app.notifications.len(), notifications_before);
    }

    #[test]
    fn test_toggle_favorite_round_trip() {
        let mut app = test_app();
        let product = app.products[0].clone();

        assert!(!app.is_favorite(&product));
        app.toggle_favorite(&product);
        assert!(app.is_favorite(&product));
        assert_eq!(app.favorites.len(), 1);

        app.toggle_favorite(&product);
        assert!(!app.is_favorite(&product));
        assert!(app.favorites.is_empty());

        // Neither direction queues a message.
        assert_eq!(app.poll_message(), None);
    }

    #[test]
    fn test_full_menu_lists_specials_before_general_products() {
        let app = test_app();
        let menu = app.full_menu();

        assert_eq!(menu.len(), 4);
        assert_eq!(menu[0].id, "sp1");
        assert_eq!(menu[1].id, "p1");
        assert_eq!(menu[2].id, "p2");
        assert_eq!(menu[3].id, "p3");
    }

    #[test]
    fn test_filtered_menu_blank_query_returns_everything() {
        let mut app = test_app();

        app.search_query.clear();
        assert_eq!(app.filtered_menu().len(), 4);

        app.search_query = "   ".to_string();
        assert_eq!(app.filtered_menu().len(), 4);
    }

    #[test]
    fn test_filtered_menu_matches_name_or_category() {
        let mut app = test_app();

        app.search_query = "ESPRESSO".to_string();
        let by_category: Vec<&str> = app.filtered_menu().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(by_category, vec!["p1", "p2"]);

        app.search_query = "brew".to_string();
        let by_name: Vec<&str> = app.filtered_menu().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(by_name, vec!["sp1"]);

        app.search_query = "pizza".to_string();
        assert!(app.filtered_menu().is_empty());
    }

    #[test]
    fn test_message_queue_is_fifo_and_drops_oldest() {
        let mut app = test_app();

        for i in 0..MAX_PENDING_MESSAGES + 4 {
            app.push_message(format!("message {}", i));
        }

        // Four oldest were dropped to stay within the cap
        assert_eq!(app.poll_message(), Some("message 4".to_string()));
        let mut last = None;
        while let Some(message) = app.poll_message() {
            last = Some(message);
        }
        assert_eq!(last, Some(format!("message {}", MAX_PENDING_MESSAGES + 3)));
        assert_eq!(app.poll_message(), None);
    }

    #[test]
    fn test_overlays_replace_each_other() {
        let mut app = test_app();

        app.open_overlay(Overlay::Notifications);
        assert_eq!(app.overlay, Overlay::Notifications);

        app.open_overlay(Overlay::Cart);
        assert_eq!(app.overlay, Overlay::Cart);

        app.close_overlay();
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_close_overlay_clears_entry_state() {
        let mut app = test_app();
        app.start_scanner();
        app.input = "1234".to_string();
        app.cursor_position = 4;

        app.close_overlay();

        assert_eq!(app.overlay, Overlay::None);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
    }

    #[test]
    fn test_on_code_scanned_closes_scanner_and_reports() {
        let mut app = test_app();
        app.start_scanner();
        drain_messages(&mut app);

        app.on_code_scanned("BRW-TABLE-07");

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(
            drain_messages(&mut app),
            vec!["Scanned: BRW-TABLE-07".to_string()]
        );
    }

    #[test]
    fn test_mark_notification_read() {
        let mut app = test_app();
        assert_eq!(app.unread_notifications(), 1);

        app.mark_notification_read("n1");
        assert_eq!(app.unread_notifications(), 0);

        // Unknown ids are ignored
        app.mark_notification_read("nope");
        assert_eq!(app.unread_notifications(), 0);
    }

    #[test]
    fn test_detail_price_follows_selection() {
        let mut app = test_app();
        let product = app.products[0].clone();
        app.open_product_detail(product);

        assert_eq!(app.detail_price(), 62_000);

        app.cycle_detail_size(); // Grande -> Venti
        assert_eq!(app.detail_price(), 65_000);

        app.cycle_detail_milk(); // Whole -> Oat
        assert_eq!(app.detail_price(), 70_000);

        app.cycle_detail_size(); // wraps back to Grande
        assert_eq!(app.detail_price(), 67_000);
    }

    #[test]
    fn test_add_detail_to_cart_uses_selected_options() {
        let mut app = test_app();
        let product = app.products[0].clone();
        app.open_product_detail(product);
        app.cycle_detail_size();

        app.add_detail_to_cart();

        assert_eq!(app.overlay, Overlay::None);
        assert!(app.detail_product.is_none());
        assert_eq!(app.cart.len(), 1);
        assert_eq!(app.cart[0].final_price, 65_000);
        assert_eq!(app.cart[0].customizations["Size"].name, "Venti");
        assert_eq!(app.cart[0].customizations["Milk"].name, "Whole Milk");
    }

    #[test]
    fn test_detail_handles_products_without_options() {
        let mut app = test_app();
        let mut product = app.products[2].clone();
        product.sizes.clear();
        product.milks.clear();
        app.open_product_detail(product);

        app.cycle_detail_size();
        app.cycle_detail_milk();
        assert_eq!(app.detail_price(), 30_000);

        app.add_detail_to_cart();
        assert!(app.cart[0].customizations.is_empty());
    }

    #[test]
    fn test_top_up_flow_through_entry_buffers() {
        let mut app = test_app();
        app.start_top_up();
        assert_eq!(app.overlay, Overlay::TopUpMethod);

        app.selected_index = 1; // Gopay
        app.choose_top_up_method();
        assert_eq!(app.overlay, Overlay::TopUpAmount);
        assert_eq!(app.top_up_method.as_deref(), Some("Gopay"));

        app.input = "50000".to_string();
        app.confirm_top_up();

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.user.balance, 175_000);
        assert_eq!(
            app.notifications[0].message,
            "Rp 50,000 via Gopay has been added."
        );
    }

    #[test]
    fn test_confirm_top_up_rejects_invalid_input() {
        let mut app = test_app();
        app.start_top_up();
        app.choose_top_up_method();
        drain_messages(&mut app);

        app.input = "lots".to_string();
        app.confirm_top_up();

        assert_eq!(app.overlay, Overlay::TopUpAmount);
        assert_eq!(app.user.balance, 125_000);
        assert_eq!(
            drain_messages(&mut app),
            vec!["Enter an amount greater than zero".to_string()]
        );

        app.input = "-100".to_string();
        app.confirm_top_up();
        assert_eq!(app.overlay, Overlay::TopUpAmount);
        assert_eq!(app.user.balance, 125_000);
    }

    #[test]
    fn test_menu_search_keeps_or_drops_query() {
        let mut app = test_app();
        app.select_tab(Tab::Order);

        app.start_menu_search();
        assert_eq!(app.overlay, Overlay::MenuSearch);
        app.search_query = "latte".to_string();
        app.finish_menu_search();
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.search_query, "latte");

        app.start_menu_search();
        assert_eq!(app.cursor_position, "latte".len());
        app.cancel_menu_search();
        assert!(app.search_query.is_empty());

        // Resuming a multibyte query counts characters, not bytes.
        app.search_query = "crème".to_string();
        app.start_menu_search();
        assert_eq!(app.cursor_position, 5);
    }

    #[test]
    fn test_export_filename_falls_back_to_default() {
        let mut app = test_app();
        app.start_order_export();
        assert_eq!(app.overlay, Overlay::ExportOrders);
        assert_eq!(app.export_filename(), "orders.csv");

        app.filename_input = "august.csv".to_string();
        assert_eq!(app.export_filename(), "august.csv");

        app.filename_input.clear();
        assert_eq!(app.export_filename(), "orders.csv");
    }

    #[test]
    fn test_set_export_result_reports_and_returns_to_history() {
        let mut app = test_app();
        app.start_order_export();
        app.set_export_result(Ok("orders.csv".to_string()));
        assert_eq!(app.overlay, Overlay::OrderHistory);
        assert!(app.filename_input.is_empty());
        assert_eq!(
            drain_messages(&mut app),
            vec!["Exported to orders.csv".to_string()]
        );

        app.start_order_export();
        app.set_export_result(Err("permission denied".to_string()));
        assert_eq!(app.overlay, Overlay::OrderHistory);
        assert_eq!(
            drain_messages(&mut app),
            vec!["Export failed: permission denied".to_string()]
        );
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = test_app();
        assert_eq!(app.tab, Tab::Home);

        app.next_tab();
        assert_eq!(app.tab, Tab::Rewards);

        app.previous_tab();
        app.previous_tab();
        assert_eq!(app.tab, Tab::Profile);

        app.next_tab();
        assert_eq!(app.tab, Tab::Home);
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut app = test_app();

        app.move_selection_up();
        assert_eq!(app.selected_index, 0);

        app.move_selection_down(3);
        app.move_selection_down(3);
        assert_eq!(app.selected_index, 2);

        app.move_selection_down(3);
        assert_eq!(app.selected_index, 2);

        app.move_selection_down(0);
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn test_cart_count_sums_quantities() {
        let mut app = test_app();
        let first = app.products[0].clone();
        let second = app.products[1].clone();

        app.add_to_cart(&first, grande_whole(&first));
        app.add_to_cart(&first, grande_whole(&first));
        app.add_to_cart(&second, grande_whole(&second));

        assert_eq!(app.cart_count(), 3);
        assert_eq!(app.cart_total(), 62_000 * 2 + 55_000);
    }

    #[test]
    fn test_toggle_theme() {
        let mut app = test_app();
        assert!(app.dark_mode);
        app.toggle_theme();
        assert!(!app.dark_mode);
        app.toggle_theme();
        assert!(app.dark_mode);
    }
}
