use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub membership_level: String,
    pub stars: u32,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationOption {
    pub name: String,
    pub additional_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub base_price: i64,
    pub icon: String,
    #[serde(default)]
    pub sizes: Vec<CustomizationOption>,
    #[serde(default)]
    pub milks: Vec<CustomizationOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: String,
    pub product: Product,
    pub quantity: u32,
    pub customizations: BTreeMap<String, CustomizationOption>,
    pub final_price: i64,
}

impl CartItem {
    pub fn new(
        product: Product,
        customizations: BTreeMap<String, CustomizationOption>,
        final_price: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product,
            quantity: 1,
            customizations,
            final_price,
        }
    }

    pub fn line_total(&self) -> i64 {
        self.final_price * self.quantity as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub total_price: i64,
    pub date: String,
}

impl Order {
    pub fn new(items: Vec<CartItem>, total_price: i64, date: String) -> Self {
        let tag = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("BRW-{}", tag[..6].to_uppercase()),
            items,
            total_price,
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub points: String,
    pub available: bool,
    pub redeemed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time: String,
    pub is_unread: bool,
}

impl NotificationItem {
    pub fn just_now(title: &str, message: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            message,
            time: "Just now".to_string(),
            is_unread: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub details: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: String,
    pub distance: String,
    pub is_open: bool,
    pub special_menu: Product,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: String,
    pub drink_name: String,
    pub size: String,
    pub price: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipSeed {
    pub user: User,
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    pub offers: Vec<Offer>,
    pub recent_orders: Vec<RecentOrder>,
    pub payment_methods: Vec<PaymentMethod>,
    pub notifications: Vec<NotificationItem>,
    pub rewards: Vec<Reward>,
}
