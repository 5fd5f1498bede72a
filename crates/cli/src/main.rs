//! E-Waste Tracker CLI.
//!
//! # Usage
//!
//! ```bash
//! # Log in as the built-in administrator
//! ewaste auth login -e admin@example.com -p password
//!
//! # Record a classification for the logged-in user
//! ewaste classify add --name "Old Router" --category Networking --element Lead --confidence 82.5
//!
//! # Post a listing
//! ewaste market add --title "Broken iPad" --price 40 --condition parts --category Tablets --image ipad.jpg
//!
//! # Show environmental impact
//! ewaste impact
//! ```
//!
//! # Commands
//!
//! - `auth` - Log in, register, log out, show the current user
//! - `classify` - Record and browse classification results
//! - `market` - Post, remove and browse marketplace listings
//! - `impact` - Environmental impact summary and trends
//! - `calculator` - Personal carbon footprint calculator
//!
//! State lives under `EWASTE_DATA_DIR` (default `.ewaste`), so the session
//! persists between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ewaste_core::{Condition, Role};
use ewaste_tracker::insights::{Diet, HistorySort, ListingSort};
use ewaste_tracker::{AppState, TrackerConfig};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "ewaste")]
#[command(author, version, about = "E-Waste Tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the current session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Record and browse classification results
    Classify {
        #[command(subcommand)]
        action: ClassifyAction,
    },
    /// Post, remove and browse marketplace listings
    Market {
        #[command(subcommand)]
        action: MarketAction,
    },
    /// Show environmental impact for the current user
    Impact {
        /// Aggregate every user's records (administrators only)
        #[arg(long)]
        all: bool,

        /// Number of months in the trend
        #[arg(long, default_value_t = 6)]
        months: u32,

        /// Number of days in the daily trend
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Personal carbon footprint calculator
    Calculator {
        #[command(subcommand)]
        action: CalculatorAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Register a new account and log in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Account role (`user`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: Role,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
}

#[derive(Subcommand)]
enum ClassifyAction {
    /// Record a classification for the logged-in user
    Add {
        /// Recognized object, e.g. "Laptop Battery"
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        /// Hazardous element (repeatable)
        #[arg(long = "element", required = true)]
        elements: Vec<String>,

        /// Classifier confidence, 0-100
        #[arg(long)]
        confidence: f64,

        /// Reference to the photographed item
        #[arg(long, default_value = "")]
        image: String,
    },
    /// List the logged-in user's classifications
    List {
        /// Case-insensitive search over name and category
        #[arg(short, long)]
        search: Option<String>,

        /// Exact category
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`date`, `confidence`, `name`)
        #[arg(long, default_value = "date")]
        sort: HistorySort,
    },
    /// List every user's classifications (administrators only)
    All,
}

#[derive(Subcommand)]
enum MarketAction {
    /// Post a listing as the logged-in user
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Asking price in dollars
        #[arg(long)]
        price: Decimal,

        /// Item condition (`excellent`, `good`, `fair`, `parts`)
        #[arg(long)]
        condition: Condition,

        #[arg(long)]
        category: String,

        /// Image reference (repeatable, 1 to 5)
        #[arg(long = "image", required = true)]
        images: Vec<String>,
    },
    /// Remove a listing you posted (administrators may remove any)
    Remove {
        /// Listing id
        id: String,
    },
    /// Browse active listings
    List {
        /// Case-insensitive search over title and description
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        condition: Option<Condition>,

        /// Sort order (`newest`, `price-low`, `price-high`)
        #[arg(long, default_value = "newest")]
        sort: ListingSort,
    },
    /// List the logged-in user's listings
    Mine,
}

#[derive(Subcommand)]
enum CalculatorAction {
    /// Show saved inputs and the last result
    Show,
    /// Calculate and save a footprint
    Set {
        /// Car miles per year
        #[arg(long, default_value_t = 0.0)]
        car_miles: f64,

        /// Public transport miles per year
        #[arg(long, default_value_t = 0.0)]
        public_transport: f64,

        /// Flight miles per year
        #[arg(long, default_value_t = 0.0)]
        flights: f64,

        /// Electricity use, kWh per year
        #[arg(long, default_value_t = 0.0)]
        electricity: f64,

        /// Gas use per year
        #[arg(long, default_value_t = 0.0)]
        gas: f64,

        /// Heating use per year
        #[arg(long, default_value_t = 0.0)]
        heating: f64,

        /// Diet (`vegan`, `vegetarian`, `mixed`, `meat`)
        #[arg(long, default_value = "mixed")]
        diet: Diet,

        /// Shopping spend per year
        #[arg(long, default_value_t = 0.0)]
        shopping: f64,

        /// Waste per year
        #[arg(long, default_value_t = 0.0)]
        waste: f64,
    },
    /// Clear saved inputs and result
    Reset,
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ewaste_tracker=info,ewaste_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let config = TrackerConfig::from_env().map_err(ewaste_tracker::TrackerError::from)?;
    let mut state = AppState::new(config)?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&mut state, &email, &password)?;
            }
            AuthAction::Register {
                name,
                email,
                password,
                role,
            } => commands::auth::register(&mut state, &name, &email, &password, role)?,
            AuthAction::Logout => commands::auth::logout(&mut state),
            AuthAction::Whoami => commands::auth::whoami(&state)?,
        },
        Commands::Classify { action } => match action {
            ClassifyAction::Add {
                name,
                category,
                elements,
                confidence,
                image,
            } => commands::classify::add(
                &mut state,
                commands::classify::Submission {
                    object_name: name,
                    category,
                    hazardous_elements: elements,
                    confidence,
                    image_url: image,
                },
            )?,
            ClassifyAction::List {
                search,
                category,
                sort,
            } => commands::classify::list(&state, search, category, sort)?,
            ClassifyAction::All => commands::classify::all(&state)?,
        },
        Commands::Market { action } => match action {
            MarketAction::Add {
                title,
                description,
                price,
                condition,
                category,
                images,
            } => commands::market::add(
                &mut state,
                commands::market::Posting {
                    title,
                    description,
                    price,
                    condition,
                    category,
                    images,
                },
            )?,
            MarketAction::Remove { id } => commands::market::remove(&mut state, &id)?,
            MarketAction::List {
                search,
                category,
                condition,
                sort,
            } => commands::market::list(&state, search, category, condition, sort),
            MarketAction::Mine => commands::market::mine(&state)?,
        },
        Commands::Impact { all, months, days } => {
            commands::impact::show(&state, all, months, days)?;
        }
        Commands::Calculator { action } => match action {
            CalculatorAction::Show => commands::calculator::show(&state)?,
            CalculatorAction::Set {
                car_miles,
                public_transport,
                flights,
                electricity,
                gas,
                heating,
                diet,
                shopping,
                waste,
            } => {
                let mut inputs = ewaste_tracker::insights::CalculatorInputs::default();
                inputs.transport.car_miles = car_miles;
                inputs.transport.public_transport = public_transport;
                inputs.transport.flights = flights;
                inputs.home.electricity = electricity;
                inputs.home.gas = gas;
                inputs.home.heating = heating;
                inputs.lifestyle.diet = diet;
                inputs.lifestyle.shopping = shopping;
                inputs.lifestyle.waste = waste;
                commands::calculator::set(&state, inputs)?;
            }
            CalculatorAction::Reset => commands::calculator::reset(&state)?,
        },
    }
    Ok(())
}
