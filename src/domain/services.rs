//! Pure calculation services for the membership domain.
//!
//! Pricing, cart totals, star accrual, balance debits, menu matching,
//! and the rupiah display format all live here as stateless functions.
//! The application layer composes them into the user-facing operations
//! and owns all state; nothing in this module mutates anything.

use std::collections::BTreeMap;

use super::errors::{DomainError, DomainResult};
use super::models::{CartItem, CustomizationOption, Product};

/// Stars a member must collect before the next reward unlocks.
pub const REWARD_STAR_TARGET: u32 = 400;

/// One star is earned for every Rp 10,000 spent on an order.
const STAR_RATE: i64 = 10_000;

/// Computes the unit price of a product with the chosen customizations.
///
/// The price is the product's base price plus the sum of every chosen
/// option's surcharge. Groups the member left untouched simply do not
/// appear in the map, so an empty map prices the bare product.
///
/// # Arguments
///
/// * `product` - Catalog entry being customized
/// * `customizations` - Chosen option per customization group
pub fn final_price(
    product: &Product,
    customizations: &BTreeMap<String, CustomizationOption>,
) -> i64 {
    let additional: i64 = customizations
        .values()
        .map(|option| option.additional_price)
        .sum();
    product.base_price + additional
}

/// Sums a cart: unit price times quantity over every line.
pub fn cart_total(items: &[CartItem]) -> i64 {
    items.iter().map(CartItem::line_total).sum()
}

/// Stars earned by a successful purchase.
///
/// # Examples
///
/// ```
/// use tbrew::domain::stars_earned;
///
/// assert_eq!(stars_earned(62_000), 6);
/// assert_eq!(stars_earned(9_999), 0);
/// assert_eq!(stars_earned(0), 0);
/// ```
pub fn stars_earned(total: i64) -> u32 {
    (total / STAR_RATE) as u32
}

/// Stars still missing until the next reward unlocks.
///
/// # Examples
///
/// ```
/// use tbrew::domain::stars_to_next_reward;
///
/// assert_eq!(stars_to_next_reward(287), 113);
/// assert_eq!(stars_to_next_reward(400), 0);
/// assert_eq!(stars_to_next_reward(512), 0);
/// ```
pub fn stars_to_next_reward(stars: u32) -> u32 {
    REWARD_STAR_TARGET.saturating_sub(stars)
}

/// Attempts to debit an order total from a balance.
///
/// Succeeds with the remaining balance when the member can afford the
/// order, and fails without any side effect otherwise. This is the only
/// fallible operation in the domain; the application layer turns the
/// error into a notification and never lets it escape further.
///
/// # Examples
///
/// ```
/// use tbrew::domain::{debit, DomainError};
///
/// assert_eq!(debit(125_000, 62_000), Ok(63_000));
/// assert_eq!(debit(62_000, 62_000), Ok(0));
/// assert_eq!(
///     debit(10_000, 62_000),
///     Err(DomainError::InsufficientBalance { balance: 10_000, total: 62_000 })
/// );
/// ```
pub fn debit(balance: i64, total: i64) -> DomainResult<i64> {
    if balance >= total {
        Ok(balance - total)
    } else {
        Err(DomainError::InsufficientBalance { balance, total })
    }
}

/// Case-insensitive menu match on product name or category.
pub fn matches_query(product: &Product, query: &str) -> bool {
    let query = query.to_lowercase();
    product.name.to_lowercase().contains(&query)
        || product.category.to_lowercase().contains(&query)
}

/// Formats an amount of rupiah for display, grouping thousands.
///
/// # Examples
///
/// ```
/// use tbrew::domain::format_rupiah;
///
/// assert_eq!(format_rupiah(125_000), "Rp 125,000");
/// assert_eq!(format_rupiah(1_500), "Rp 1,500");
/// assert_eq!(format_rupiah(0), "Rp 0");
/// ```
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Timestamp label stamped onto newly placed orders, e.g. "21 Aug 14:05".
pub fn order_date_label() -> String {
    chrono::Local::now().format("%d %b %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Caramel Macchiato".to_string(),
            category: "Espresso".to_string(),
            description: "Espresso with vanilla syrup.".to_string(),
            base_price: 62000,
            icon: "latte".to_string(),
            sizes: vec![
                CustomizationOption { name: "Grande".to_string(), additional_price: 0 },
                CustomizationOption { name: "Venti".to_string(), additional_price: 3000 },
            ],
            milks: vec![
                CustomizationOption { name: "Whole Milk".to_string(), additional_price: 0 },
                CustomizationOption { name: "Oat Milk".to_string(), additional_price: 5000 },
            ],
        }
    }

    #[test]
    fn test_final_price_without_customizations() {
        let product = create_test_product();
        assert_eq!(final_price(&product, &BTreeMap::new()), 62000);
    }

    #[test]
    fn test_final_price_sums_option_surcharges() {
        let product = create_test_product();
        let mut customizations = BTreeMap::new();
        customizations.insert("Size".to_string(), product.sizes[1].clone());
        customizations.insert("Milk".to_string(), product.milks[1].clone());

        assert_eq!(final_price(&product, &customizations), 62000 + 3000 + 5000);
    }

    #[test]
    fn test_final_price_ignores_zero_surcharge_options() {
        let product = create_test_product();
        let mut customizations = BTreeMap::new();
        customizations.insert("Size".to_string(), product.sizes[0].clone());
        customizations.insert("Milk".to_string(), product.milks[0].clone());

        assert_eq!(final_price(&product, &customizations), 62000);
    }

    #[test]
    fn test_cart_total_multiplies_quantities() {
        let product = create_test_product();
        let mut first = CartItem::new(product.clone(), BTreeMap::new(), 62000);
        first.quantity = 3;
        let second = CartItem::new(product, BTreeMap::new(), 65000);

        assert_eq!(cart_total(&[first, second]), 62000 * 3 + 65000);
    }

    #[test]
    fn test_cart_total_empty_cart_is_zero() {
        assert_eq!(cart_total(&[]), 0);
    }

    #[test]
    fn test_debit_allows_exact_balance() {
        assert_eq!(debit(62000, 62000), Ok(0));
    }

    #[test]
    fn test_debit_reports_shortfall() {
        let result = debit(30000, 62000);
        assert_eq!(
            result,
            Err(DomainError::InsufficientBalance { balance: 30000, total: 62000 })
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("30000"));
        assert!(message.contains("62000"));
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let product = create_test_product();

        assert!(matches_query(&product, "caramel"));
        assert!(matches_query(&product, "MACCHIATO"));
        assert!(matches_query(&product, "espresso"));
        assert!(!matches_query(&product, "tea"));
    }

    #[test]
    fn test_matches_query_on_partial_category() {
        let product = create_test_product();
        assert!(matches_query(&product, "spre"));
    }

    #[test]
    fn test_format_rupiah_groups_thousands() {
        assert_eq!(format_rupiah(125000), "Rp 125,000");
        assert_eq!(format_rupiah(1250000), "Rp 1,250,000");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(-5000), "Rp -5,000");
    }

    #[test]
    fn test_stars_earned_rounds_down() {
        assert_eq!(stars_earned(125000), 12);
        assert_eq!(stars_earned(19999), 1);
    }
}
