//! Fixed demonstration data shown when the API is unreachable.

use crate::presentation::{placeholder_image, Product, Transaction};
use crate::types::{Balance, Location, ScanOutcome};

pub const DEMO_USER: &str = "demo_user";
pub const DEMO_BALANCE: i64 = 4322;

pub fn balance() -> Balance {
    Balance {
        user_id_string: DEMO_USER.to_string(),
        balance: DEMO_BALANCE,
    }
}

pub fn transactions() -> Vec<Transaction> {
    [
        ("Korzinka - Amore", "14 October 17:51", 59248, 592),
        ("Korzinka - Amore", "13 October 14:33", 25970, 259),
        ("Korzinka - Amore", "9 October 13:22", 18980, 189),
        ("Korzinka - Beruniy", "5 October 20:31", 12160, 91),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (store, date, amount, bonuses))| Transaction {
        id: (i + 1).to_string(),
        store: store.to_string(),
        date: date.to_string(),
        amount,
        bonuses,
    })
    .collect()
}

pub fn products() -> Vec<Product> {
    [
        ("Г.Грудинка, вес**", "Beef Brisket", 99990, 89990, 10, 3),
        ("Г.Корейка, вес**", "Beef Loin", 125990, 97990, 22, 2),
        ("Г.Ребра, вес**", "Beef Ribs", 119990, 92990, 22, 2),
        ("Г.Вырезка, вес**", "Beef Tenderloin", 127990, 99990, 21, 3),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, label, original, discounted, pct, points))| Product {
        id: (i + 1).to_string(),
        name: name.to_string(),
        image: placeholder_image(label),
        original_price: original,
        discounted_price: discounted,
        discount_percentage: pct,
        points,
        valid_from: "25.10.2025".to_string(),
        valid_to: "12.11.2025".to_string(),
    })
    .collect()
}

pub fn locations() -> Vec<Location> {
    [
        ("Korzinka - Amore", "Amir Temur Ave, Tashkent", 41.2995, 69.2401),
        ("Korzinka - Beruniy", "Beruniy St, Tashkent", 41.3111, 69.2797),
        ("Korzinka Mahalla", "Shota Rustaveli St, Tashkent", 41.2856, 69.2034),
        ("Korzinka - Chirchik", "Chirchik City Center", 41.4689, 69.5828),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, address, latitude, longitude), id)| Location {
        id,
        name: name.to_string(),
        address: address.to_string(),
        latitude,
        longitude,
    })
    .collect()
}

pub fn scan(barcode: &str) -> ScanOutcome {
    ScanOutcome {
        success: true,
        barcode: barcode.to_string(),
        status: "demo".to_string(),
        message: "Product scanned successfully! (Demo data)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_sets_are_populated() {
        assert_eq!(balance().balance, 4322);
        assert_eq!(transactions().len(), 4);
        assert_eq!(products().len(), 4);
        let ids: Vec<i64> = locations().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn demo_scan_echoes_barcode() {
        let outcome = scan("4780000000001");
        assert_eq!(outcome.barcode, "4780000000001");
        assert!(outcome.message.contains("Demo"));
    }
}
