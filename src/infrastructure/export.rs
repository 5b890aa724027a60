use crate::domain::Order;
use csv::Writer;

pub struct OrderExporter;

impl OrderExporter {
    pub fn export_orders(orders: &[Order], filename: &str) -> Result<String, String> {
        let mut writer = match Writer::from_path(filename) {
            Ok(writer) => writer,
            Err(e) => return Err(e.to_string()),
        };

        if let Err(e) = writer.write_record([
            "order_id",
            "date",
            "product",
            "quantity",
            "customizations",
            "unit_price",
            "line_total",
        ]) {
            return Err(e.to_string());
        }

        for order in orders {
            for item in &order.items {
                let customizations = item
                    .customizations
                    .iter()
                    .map(|(group, option)| format!("{}: {}", group, option.name))
                    .collect::<Vec<_>>()
                    .join(" / ");
                let record = [
                    order.id.clone(),
                    order.date.clone(),
                    item.product.name.clone(),
                    item.quantity.to_string(),
                    customizations,
                    item.final_price.to_string(),
                    item.line_total().to_string(),
                ];
                if let Err(e) = writer.write_record(&record) {
                    return Err(e.to_string());
                }
            }
        }

        match writer.flush() {
            Ok(_) => Ok(filename.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
