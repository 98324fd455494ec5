//! One command per API operation.
//!
//! With `--demo-fallback` the read commands behave like the app screens:
//! failures print a notice and show the fixed demo data instead.

use ecobonus_core::presentation::{format_amount, group_by_month};
use ecobonus_core::views::{load_catalogue, load_locations, submit_barcode};
use ecobonus_core::{demo, scanner, with_fallback, Sourced};

use super::Api;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn print_notice<T>(sourced: &Sourced<T>) {
    if let Some(notice) = sourced.notice() {
        eprintln!("{notice}");
    }
}

pub fn balance(api: &Api, fallback: bool) -> CmdResult {
    let balance = if fallback {
        let sourced = with_fallback("balance", api.get_balance(), demo::balance);
        print_notice(&sourced);
        sourced.into_data()
    } else {
        api.get_balance()?
    };
    println!("User ID: {}", balance.user_id_string);
    println!("Balance: {} points", format_amount(balance.balance));
    Ok(())
}

pub fn history(api: &Api, fallback: bool) -> CmdResult {
    let transactions = if fallback {
        let sourced = with_fallback("transactions", api.get_transactions(), demo::transactions);
        print_notice(&sourced);
        sourced.into_data()
    } else {
        api.get_transactions()?
    };

    if transactions.is_empty() {
        println!("No transactions yet");
        return Ok(());
    }
    for (month, group) in group_by_month(&transactions) {
        println!("{month}");
        for tx in group {
            println!("  {:<40} {:<18} +{} bonuses", tx.store, tx.date, tx.bonuses);
        }
    }
    Ok(())
}

pub fn catalog(api: &Api) -> CmdResult {
    for item in api.get_catalog()? {
        println!("{:<22} {:>4} pts  {}", item.item_sku, item.points_awarded, item.name);
    }
    Ok(())
}

pub fn products(api: &Api, fallback: bool) -> CmdResult {
    let products = if fallback {
        let sourced = load_catalogue(api);
        print_notice(&sourced);
        sourced.into_data()
    } else {
        api.get_products()?
    };
    for p in products {
        println!(
            "{:<22} {:<32} {:>3} pts  {} -> {} ({}% off, {}-{})",
            p.id,
            p.name,
            p.points,
            format_amount(p.original_price),
            format_amount(p.discounted_price),
            p.discount_percentage,
            p.valid_from,
            p.valid_to
        );
    }
    Ok(())
}

pub fn locations(api: &Api, fallback: bool) -> CmdResult {
    let locations = if fallback {
        let sourced = load_locations(api);
        print_notice(&sourced);
        sourced.into_data()
    } else {
        api.get_locations()?
    };
    for loc in locations {
        println!(
            "{:>3}  {:<40} {:.4},{:.4}  {}",
            loc.id, loc.name, loc.latitude, loc.longitude, loc.address
        );
    }
    Ok(())
}

pub fn scan(api: &Api, code: &str, fallback: bool) -> CmdResult {
    let code = scanner::manual_code(code).ok_or("barcode must not be blank")?;
    let outcome = if fallback {
        let view = submit_barcode(api, code);
        if let Some(error) = &view.error {
            eprintln!("{error}");
        }
        view.outcome
    } else {
        api.scan_barcode(code)?
    };
    let mark = if outcome.success { "OK" } else { "FAILED" };
    println!("[{mark}] {} ({}): {}", outcome.barcode, outcome.status, outcome.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{api, dead_address, start_server};
    use super::*;

    #[test]
    fn fallback_turns_unreachable_api_into_demo_output() {
        let addr = dead_address();
        let dir = tempfile::tempdir().unwrap();
        let api = api(&format!("http://{addr}"), &dir.path().join("state.json"));

        balance(&api, true).unwrap();
        history(&api, true).unwrap();
        products(&api, true).unwrap();
        locations(&api, true).unwrap();
        scan(&api, " PET_BOTTLE_1L ", true).unwrap();
    }

    #[test]
    fn without_fallback_unreachable_api_is_an_error() {
        let addr = dead_address();
        let dir = tempfile::tempdir().unwrap();
        let api = api(&format!("http://{addr}"), &dir.path().join("state.json"));

        assert!(balance(&api, false).is_err());
        assert!(locations(&api, false).is_err());
        assert!(catalog(&api).is_err());
    }

    #[test]
    fn live_commands_succeed_against_mock_server() {
        let addr = start_server();
        let dir = tempfile::tempdir().unwrap();
        let api = api(&format!("http://{addr}"), &dir.path().join("state.json"));

        scan(&api, "PAPER_BAG", false).unwrap();
        balance(&api, false).unwrap();
        history(&api, false).unwrap();
        catalog(&api).unwrap();
        products(&api, false).unwrap();
        assert_eq!(api.get_balance().unwrap().balance, 5);
    }

    #[test]
    fn blank_scan_is_rejected_before_any_request() {
        let addr = dead_address();
        let dir = tempfile::tempdir().unwrap();
        let api = api(&format!("http://{addr}"), &dir.path().join("state.json"));

        let err = scan(&api, "   ", true).unwrap_err();
        assert_eq!(err.to_string(), "barcode must not be blank");
    }
}
