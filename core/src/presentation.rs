//! Presentation adapters.
//!
//! These reshape server records into what the screens display, and they
//! **invent values the server never sent**: positional ids, a zero amount,
//! placeholder images, example prices and validity dates. Treat their
//! output as display-only; never feed it back into the API or use it as a
//! source of truth.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{CatalogItem, HistoryItem};

/// Display format for transaction timestamps, e.g. `14 October 17:51`.
pub const TRANSACTION_DATE_FORMAT: &str = "%-d %B %H:%M";

pub const EXAMPLE_ORIGINAL_PRICE: i64 = 100_000;
pub const EXAMPLE_DISCOUNTED_PRICE: i64 = 80_000;
pub const EXAMPLE_DISCOUNT_PERCENTAGE: i64 = 20;
pub const EXAMPLE_VALID_FROM: &str = "25.10.2025";
pub const EXAMPLE_VALID_TO: &str = "12.11.2025";

const PLACEHOLDER_TEXT_LIMIT: usize = 30;

/// A purchase row on the home screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// 1-based position in the history list, not a server id.
    pub id: String,
    pub store: String,
    pub date: String,
    /// Always 0 for live data; the API has no monetary amount.
    pub amount: i64,
    pub bonuses: i64,
}

/// A catalogue card. Only `id`, `name` and `points` come from the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: String,
    pub original_price: i64,
    pub discounted_price: i64,
    pub discount_percentage: i64,
    pub points: i64,
    pub valid_from: String,
    pub valid_to: String,
}

pub fn transactions_from_history(history: &[HistoryItem]) -> Vec<Transaction> {
    history
        .iter()
        .enumerate()
        .map(|(index, item)| Transaction {
            id: (index + 1).to_string(),
            store: item.location_name.clone(),
            date: format_timestamp(&item.date),
            amount: 0,
            bonuses: item.points_awarded,
        })
        .collect()
}

pub fn products_from_catalog(catalog: &[CatalogItem]) -> Vec<Product> {
    catalog
        .iter()
        .map(|item| Product {
            id: item.item_sku.clone(),
            name: item.name.clone(),
            image: placeholder_image(&item.name),
            original_price: EXAMPLE_ORIGINAL_PRICE,
            discounted_price: EXAMPLE_DISCOUNTED_PRICE,
            discount_percentage: EXAMPLE_DISCOUNT_PERCENTAGE,
            points: item.points_awarded,
            valid_from: EXAMPLE_VALID_FROM.to_string(),
            valid_to: EXAMPLE_VALID_TO.to_string(),
        })
        .collect()
}

/// Format an ISO-8601 timestamp for display. Timestamps with an offset are
/// shown in that offset; anything unparseable is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(TRANSACTION_DATE_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(TRANSACTION_DATE_FORMAT).to_string();
    }
    raw.to_string()
}

/// A grey square with the (truncated) text centred, as an SVG `data:` URL.
pub fn placeholder_image(text: &str) -> String {
    let label: String = text.chars().take(PLACEHOLDER_TEXT_LIMIT).collect();
    let svg = format!(
        concat!(
            r#"<svg width="300" height="300" xmlns="http://www.w3.org/2000/svg">"#,
            r##"<rect width="300" height="300" fill="#f5f5f5"/>"##,
            r##"<text x="50%" y="50%" font-family="Arial, sans-serif" font-size="16" fill="#666" "##,
            r#"text-anchor="middle" dominant-baseline="middle">{}</text></svg>"#
        ),
        escape_xml(&label)
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Group thousands with spaces: `59248` becomes `59 248`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Group transactions by the month word of their display date, keeping the
/// order in which months first appear.
pub fn group_by_month(transactions: &[Transaction]) -> Vec<(String, Vec<&Transaction>)> {
    let mut groups: Vec<(String, Vec<&Transaction>)> = Vec::new();
    for tx in transactions {
        let month = tx.date.split_whitespace().nth(1).unwrap_or_default().to_string();
        match groups.iter_mut().find(|(m, _)| *m == month) {
            Some((_, members)) => members.push(tx),
            None => groups.push((month, vec![tx])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(points: &[i64]) -> Vec<HistoryItem> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| HistoryItem {
                item_name: format!("item {i}"),
                location_name: format!("store {i}"),
                points_awarded: *p,
                date: "2025-10-14T17:51:00Z".to_string(),
            })
            .collect()
    }

    #[test]
    fn transactions_keep_count_order_and_points() {
        let source = history(&[10, 3, 25]);
        let txs = transactions_from_history(&source);
        assert_eq!(txs.len(), source.len());
        for (i, (tx, item)) in txs.iter().zip(&source).enumerate() {
            assert_eq!(tx.id, (i + 1).to_string());
            assert_eq!(tx.store, item.location_name);
            assert_eq!(tx.bonuses, item.points_awarded);
            assert_eq!(tx.amount, 0);
        }
    }

    #[test]
    fn empty_history_gives_no_transactions() {
        assert!(transactions_from_history(&[]).is_empty());
    }

    #[test]
    fn timestamps_are_formatted() {
        assert_eq!(format_timestamp("2025-10-14T17:51:00Z"), "14 October 17:51");
        assert_eq!(format_timestamp("2025-10-05T20:31:12.345678"), "5 October 20:31");
        assert_eq!(format_timestamp("2025-10-09T13:22:00+05:00"), "9 October 13:22");
    }

    #[test]
    fn unparseable_timestamp_is_kept() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn products_carry_example_fields() {
        let catalog = vec![CatalogItem {
            item_sku: "TETRA_PAK_1L".to_string(),
            name: "Tetra Pak 1L".to_string(),
            description: "carton".to_string(),
            points_awarded: 15,
        }];
        let products = products_from_catalog(&catalog);
        let p = &products[0];
        assert_eq!(p.id, "TETRA_PAK_1L");
        assert_eq!(p.points, 15);
        assert_eq!(p.original_price, EXAMPLE_ORIGINAL_PRICE);
        assert_eq!(p.discounted_price, EXAMPLE_DISCOUNTED_PRICE);
        assert_eq!(p.discount_percentage, EXAMPLE_DISCOUNT_PERCENTAGE);
        assert_eq!(p.valid_from, "25.10.2025");
        assert!(p.image.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn placeholder_truncates_and_escapes() {
        let image = placeholder_image(&format!("<b>{}", "x".repeat(40)));
        let encoded = image.trim_start_matches("data:image/svg+xml;base64,");
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains(&format!("&lt;b&gt;{}</text>", "x".repeat(27))));
        assert!(!svg.contains(&"x".repeat(28)));
    }

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(4322), "4 322");
        assert_eq!(format_amount(59248), "59 248");
        assert_eq!(format_amount(1_234_567), "1 234 567");
        assert_eq!(format_amount(-12160), "-12 160");
    }

    #[test]
    fn months_group_in_first_seen_order() {
        let tx = |id: &str, date: &str| Transaction {
            id: id.to_string(),
            store: "s".to_string(),
            date: date.to_string(),
            amount: 0,
            bonuses: 1,
        };
        let txs = vec![
            tx("1", "14 October 17:51"),
            tx("2", "2 September 10:00"),
            tx("3", "9 October 13:22"),
        ];
        let groups = group_by_month(&txs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "October");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "September");
    }
}
