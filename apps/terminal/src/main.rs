//! # Boutique Terminal
//!
//! Line-oriented operator terminal for the boutique POS.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Operator Terminal                                │
//! │                                                                         │
//! │  stdin ───► command loop ───► CheckoutSession ───► boutique-core       │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                               ApiClient (reqwest)                       │
//! │                          GET /products, PUT /billing                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bare scan code adds the variant to the cart; everything else is a
//! short command (`help` lists them). `done` submits the order and
//! prints the receipt.

use std::io::{BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use boutique_client::{ApiClient, CheckoutSession, ClientConfig, SessionError};
use boutique_core::catalog::Catalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let config = ClientConfig::load_or_default(None);
    let client = ApiClient::new(&config)?;

    // Catalog fetch failure degrades the session instead of aborting:
    // the operator sees the empty catalog and can `refresh` once the
    // backend is reachable again.
    let catalog = match client.fetch_catalog().await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "catalog fetch failed, starting with empty catalog");
            println!("! Could not load the catalog ({e}). Scans will not resolve");
            println!("! until you run `refresh` with the backend reachable.");
            Catalog::new(Vec::new())
        }
    };

    info!(
        store = %config.store.name,
        products = catalog.len(),
        "terminal ready"
    );

    let fetcher = client.clone();
    let mut session = CheckoutSession::new(catalog, config.tax_rate(), &config.store.name, client);

    println!("{} - checkout terminal", config.store.name);
    println!("Scan a code, or type `help` for commands.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut input = String::new();

    loop {
        print!("> ");
        stdout.flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        match run_command(&mut session, &fetcher, line).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => println!("! {e}"),
        }
    }

    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

async fn run_command(
    session: &mut CheckoutSession<ApiClient>,
    fetcher: &ApiClient,
    line: &str,
) -> Result<Flow, SessionError> {
    let mut parts = line.split_whitespace();
    // Non-empty by the caller's trim check
    let Some(command) = parts.next() else {
        return Ok(Flow::Continue);
    };

    match command {
        "help" => print_help(),

        "show" => print_cart(session),

        "find" => {
            let query = line["find".len()..].trim();
            session.set_filter(query)?;
            let products = session.filtered_products();
            if products.is_empty() {
                println!("No products match.");
            }
            for product in products {
                println!("{} {} ({})", product.brand.name, product.name, product.base_price);
                for variant in &product.variants {
                    println!(
                        "    [{}] {} / {} - {} in stock, {}",
                        variant.scan_code,
                        variant.size,
                        variant.color,
                        variant.stock_quantity,
                        product.unit_price(variant),
                    );
                }
            }
        }

        "+" | "-" => {
            let code = parts.next().ok_or_else(usage)?;
            let delta = if command == "+" { 1 } else { -1 };
            session.update_quantity(code, delta)?;
            print_cart(session);
        }

        "disc" => {
            let code = parts.next().ok_or_else(usage)?;
            let percent: u8 = parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(usage)?;
            session.update_discount(code, percent)?;
            print_cart(session);
        }

        "rm" => {
            let code = parts.next().ok_or_else(usage)?;
            session.remove_line(code)?;
            print_cart(session);
        }

        "refresh" => {
            let catalog = fetcher.fetch_catalog().await?;
            println!("Catalog refreshed: {} products.", catalog.len());
            session.replace_catalog(catalog);
        }

        "done" => {
            let receipt = session.finalize().await?;
            println!("{}", receipt.render_text());
            let path = format!("receipt-{}.txt", receipt.order_id);
            match std::fs::write(&path, receipt.render_text()) {
                Ok(()) => println!("Receipt saved to {path}."),
                Err(e) => warn!(error = %e, path = %path, "failed to save receipt"),
            }
        }

        "quit" | "exit" => return Ok(Flow::Quit),

        // Anything else is a scan code
        code => {
            if session.add_by_scan(code, None)? {
                print_cart(session);
            } else {
                println!("Unknown code: {code}");
            }
        }
    }

    Ok(Flow::Continue)
}

fn usage() -> SessionError {
    boutique_core::error::CartError::Validation(
        boutique_core::error::ValidationError::InvalidFormat {
            field: "command".to_string(),
            reason: "see `help` for usage".to_string(),
        },
    )
    .into()
}

fn print_help() {
    println!("Commands:");
    println!("  <CODE>            scan a variant code into the cart");
    println!("  + <CODE>          increase line quantity by one");
    println!("  - <CODE>          decrease line quantity by one");
    println!("  disc <CODE> <N>   set line discount to N percent (0-99)");
    println!("  rm <CODE>         remove a line");
    println!("  find <QUERY>      filter products by name");
    println!("  show              show the cart and totals");
    println!("  refresh           re-fetch the catalog");
    println!("  done              submit the order and print the receipt");
    println!("  quit              exit without submitting");
}

fn print_cart(session: &CheckoutSession<ApiClient>) {
    if session.cart().is_empty() {
        println!("Cart is empty.");
        return;
    }

    for line in session.cart().lines() {
        let discount = session.cart().discount(&line.scan_code);
        let net = session.cart().line_net(line);
        let discount_note = if discount > 0 {
            format!(" (-{discount}%)")
        } else {
            String::new()
        };
        println!(
            "  [{}] {} {} {}  x{} @ {}{}  = {}",
            line.scan_code,
            line.brand,
            line.name,
            line.size,
            line.quantity,
            line.unit_price,
            discount_note,
            net,
        );
    }

    let totals = session.totals();
    println!("  Subtotal: {}", totals.subtotal);
    println!("  Tax:      {}", totals.tax);
    println!("  Total:    {}", totals.total);
}
