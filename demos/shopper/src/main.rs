//! shopper: command-line front end for the supermarket toolkit.
//!
//! Reads the layout document written by the store's layout tools, plans the
//! shortest walk through the racks holding a shopping list, and manages the
//! cart against the inventory.
//!
//! ```text
//! shopper route milk eggs bread --from R4
//! shopper reroute --from R7
//! shopper cart add milk Acme 2
//! shopper cart checkout
//!
//! shopper layout init 3x3
//! shopper layout connect R1 R2 4
//! shopper product add milk Acme 1.50 20 --rack R2
//! ```

mod admin;
mod session;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sm_routing::{shortest_paths, DijkstraRouter, Route, Router};
use sm_store::Bill;

use admin::{LayoutCommand, ProductCommand};
use session::Session;

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Plan shopping routes and manage the cart.
#[derive(Parser)]
#[command(name = "shopper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Layout JSON file (overrides the config)
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    /// Extra distances from a `source,destination,distance` CSV
    #[arg(long, global = true)]
    distances: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shortest walk through the racks holding the listed products
    Route {
        /// Products to pick up; the first one's rack is visited first
        #[arg(required = true)]
        products: Vec<String>,

        /// Rack you are standing at; becomes the fixed first stop
        #[arg(long)]
        from: Option<String>,
    },

    /// Shortest walk from one rack to another (the checkout by default)
    Reroute {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: Option<String>,
    },

    /// Shortest distance and previous rack for every rack, from one rack
    Distances {
        #[arg(long)]
        from: String,
    },

    /// Print rack connections and product assignments
    Show,

    /// Find products by name or brand, cheapest first
    Search { keyword: String },

    /// Manage the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Set up racks, distances and product placement
    #[command(subcommand)]
    Layout(LayoutCommand),

    /// Edit the inventory
    #[command(subcommand)]
    Product(ProductCommand),
}

#[derive(Subcommand)]
enum CartCommand {
    /// Take units out of stock and into the cart
    Add { name: String, brand: String, qty: u32 },

    /// Drop a line and return its units to stock
    Remove { name: String, brand: String },

    /// Change a line's quantity (0 removes it)
    Set { name: String, brand: String, qty: u32 },

    /// Show the current bill
    Bill,

    /// Print the bill and empty the cart
    Checkout,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let session = Session::open(cli.config.as_deref(), cli.layout, cli.distances)?;

    match cli.command {
        Commands::Route { products, from } => run_route(&session, &products, from),
        Commands::Reroute { from, to } => run_reroute(&session, &from, to),
        Commands::Distances { from } => run_distances(&session, &from),
        Commands::Show => {
            print!("{}", session.layout()?);
            Ok(())
        }
        Commands::Search { keyword } => run_search(&session, &keyword),
        Commands::Cart(cmd) => run_cart(&session, cmd),
        Commands::Layout(cmd) => admin::run_layout(&session, cmd),
        Commands::Product(cmd) => admin::run_product(&session, cmd),
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

fn run_route(session: &Session, products: &[String], from: Option<String>) -> Result<()> {
    let layout = session.layout()?;
    let lookup = layout.stops_for(products);
    for product in &lookup.missing {
        println!("No rack holds {product:?}; skipping it.");
    }

    let route = layout.plan_route(&lookup, from.as_deref())?;
    info!(stops = route.stops.len(), total = %route.total, "planned route");
    print_route(&route);
    Ok(())
}

fn run_reroute(session: &Session, from: &str, to: Option<String>) -> Result<()> {
    let layout = session.layout()?;
    let to = to.unwrap_or_else(|| session.config.checkout_rack.clone());
    let graph = layout.graph();
    let route = DijkstraRouter.route(&graph, from, &to)?;
    print_route(&route);
    if !route.is_trivial() {
        let tree: Vec<String> = route
            .weighted_legs(&graph)
            .map(|(a, b, w)| match w {
                Some(w) => format!("({a} -> {b}: {w})"),
                None => format!("({a} -> {b})"),
            })
            .collect();
        println!("Tree  : {{{}}}", tree.join(", "));
    }
    Ok(())
}

fn run_distances(session: &Session, from: &str) -> Result<()> {
    let graph = session.layout()?.graph();
    if graph.node_id(from).is_none() {
        bail!("rack {from:?} is not in the layout");
    }
    let tree = shortest_paths(&graph, from);
    let previous = tree.predecessors_by_name(&graph);
    for (rack, distance) in tree.distances_by_name(&graph) {
        let via = previous.get(rack).copied().unwrap_or("-");
        println!("{rack:<10} {distance:>8}  via {via}");
    }
    Ok(())
}

fn print_route(route: &Route) {
    println!("Stops : {}", route.stops.join(", "));
    println!("Path  : {}", route.describe(" -> "));
    println!("Total : {}", route.total);
}

// ── Store ─────────────────────────────────────────────────────────────────────

fn run_search(session: &Session, keyword: &str) -> Result<()> {
    let inventory = session.inventory()?;
    let hits = inventory.search(keyword);
    if hits.is_empty() {
        println!("No products match {keyword:?}.");
    }
    for item in hits {
        println!("{:<16} {:<16} {:>8.2}  ({} in stock)", item.name, item.brand, item.price, item.stock);
    }
    Ok(())
}

fn run_cart(session: &Session, cmd: CartCommand) -> Result<()> {
    let mut inventory = session.inventory()?;
    let mut cart = session.cart()?;

    match cmd {
        CartCommand::Add { name, brand, qty } => {
            cart.add_item(&mut inventory, &name, &brand, qty)?;
            println!("Added {qty} x {name} ({brand}).");
        }
        CartCommand::Remove { name, brand } => {
            let qty = cart.remove_item(&mut inventory, &name, &brand)?;
            println!("Removed {qty} x {name} ({brand}).");
        }
        CartCommand::Set { name, brand, qty } => {
            cart.modify_item(&mut inventory, &name, &brand, qty)?;
            println!("{name} ({brand}) now {qty}.");
        }
        CartCommand::Bill => {
            print_bill(&cart.bill(&inventory));
            return Ok(());
        }
        CartCommand::Checkout => {
            let bill = cart.checkout(&inventory)?;
            print_bill(&bill);
            println!("Thank you for shopping!");
        }
    }

    session.save_store(&inventory, &cart)
}

fn print_bill(bill: &Bill) {
    if bill.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in &bill.lines {
        println!(
            "{:<16} {:<16} {:>4} x {:>8.2} = {:>9.2}",
            line.name, line.brand, line.qty, line.price, line.subtotal
        );
    }
    println!("{:>58}", format!("Total: {:.2}", bill.total));
}
