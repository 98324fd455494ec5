//! Connectivity check against a live API.
//!
//! Hits each endpoint once and prints a report. The balance and history
//! checks use a fixed test user that usually does not exist, so their
//! failures are reported but not counted. The return is registered for a
//! throwaway user, never for the stored identity.

use std::io::Write;

use ecobonus_core::{ApiError, CatalogItem, UserId};
use tracing::info;

use super::Api;

const TEST_USER: &str = "TEST_USER_123";

pub fn run(api: &Api) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let failures = check(api, &mut stdout.lock())?;

    info!(failures, "smoke test finished");
    if failures > 0 {
        return Err(format!("{failures} endpoint check(s) failed").into());
    }
    println!("All endpoint checks passed.");
    Ok(())
}

/// Run every step, writing the report to `out`. Returns the number of
/// required steps that failed.
fn check<W: Write>(api: &Api, out: &mut W) -> Result<usize, Box<dyn std::error::Error>> {
    writeln!(out, "API URL: {}", api.client().base_url())?;
    let mut failures = 0;
    let test_user = UserId::new(TEST_USER);

    writeln!(out, "1. GET /api/catalog")?;
    let catalog = match api.get_catalog() {
        Ok(items) => {
            writeln!(out, "   ok: {} catalog items", items.len())?;
            if let Some(item) = items.first() {
                writeln!(out, "   sample: {} ({}), {} points", item.name, item.item_sku, item.points_awarded)?;
            }
            items
        }
        Err(e) => {
            report_failure(out, &e)?;
            failures += 1;
            Vec::new()
        }
    };

    writeln!(out, "2. GET /api/locations")?;
    match api.get_locations() {
        Ok(locations) => {
            writeln!(out, "   ok: {} locations", locations.len())?;
            if let Some(loc) = locations.first() {
                writeln!(out, "   sample: {} ({})", loc.name, loc.address)?;
            }
        }
        Err(e) => {
            report_failure(out, &e)?;
            failures += 1;
        }
    }

    writeln!(out, "3. GET /api/users/{{id}}/balance")?;
    match api.balance_for(&test_user) {
        Ok(balance) => writeln!(out, "   ok: {} has {} points", balance.user_id_string, balance.balance)?,
        Err(e) => writeln!(out, "   expected (user may not exist): {}", e.user_message())?,
    }

    writeln!(out, "4. GET /api/users/{{id}}/history")?;
    match api.history_for(&test_user) {
        Ok(history) => writeln!(out, "   ok: {} history entries", history.len())?,
        Err(e) => writeln!(out, "   expected (user may not exist): {}", e.user_message())?,
    }

    writeln!(out, "5. POST /api/returns")?;
    if !check_return(api, catalog.first(), out)? {
        failures += 1;
    }

    Ok(failures)
}

/// Returns whether the step passed. Skipped (and passing) when there is no
/// catalogue item to return.
fn check_return<W: Write>(
    api: &Api,
    item: Option<&CatalogItem>,
    out: &mut W,
) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(item) = item else {
        writeln!(out, "   skipped: no catalogue items to return")?;
        return Ok(true);
    };
    let user = UserId::new(format!("TEST_USER_{}", chrono::Utc::now().timestamp_millis()));
    writeln!(out, "   user: {user}, item: {} ({})", item.name, item.item_sku)?;
    match api.register_return_for(&user, &item.item_sku) {
        Ok(result) => {
            writeln!(out, "   ok: {} - {}", result.status, result.message)?;
            Ok(true)
        }
        Err(e) => {
            report_failure(out, &e)?;
            Ok(false)
        }
    }
}

fn report_failure<W: Write>(out: &mut W, error: &ApiError) -> std::io::Result<()> {
    match error.status() {
        Some(status) => writeln!(out, "   failed: HTTP {status}: {}", error.user_message()),
        None => writeln!(out, "   failed: {error}"),
    }
}
