use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use sunyi_auth::Role;
use sunyi_cli::seeder::{self, SeedConfig};
use sunyi_config::{DatabaseConfig, PasswordConfig};
use sunyi_core::PasswordHasher;
use sunyi_db::{CredentialStore, PgCredentialStore, PgPool, init_db_pool};
use sunyi_models::{NewUser, RegisterRequest};
use validator::Validate;

#[derive(Parser)]
#[command(name = "sunyi-cli")]
#[command(about = "Sunyi CLI - Administrative tools for the Sunyi API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account directly in the database
    CreateAccount {
        /// Username (3 to 50 characters)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Role: organizer or user
        #[arg(short = 'r', long)]
        role: Option<Role>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake organizers, consumers, and gigs
    Seed {
        /// Number of organizer accounts
        #[arg(short = 'o', long, default_value = "5")]
        organizers: usize,

        /// Number of consumer accounts
        #[arg(short = 'c', long, default_value = "10")]
        consumers: usize,

        /// Number of gigs per organizer
        #[arg(short = 'g', long, default_value = "4")]
        gigs: usize,
    },
    /// Delete all seeded accounts and their gigs
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let database = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => exit_with("Invalid database configuration", e),
    };

    let pool = match init_db_pool(&database.url, 5).await {
        Ok(pool) => pool,
        Err(e) => exit_with("Failed to connect to database", e),
    };

    match cli.command {
        Commands::CreateAccount {
            username,
            email,
            role,
            password,
        } => handle_create_account(pool, username, email, role, password).await,
        Commands::Seed {
            organizers,
            consumers,
            gigs,
        } => handle_seed(&pool, organizers, consumers, gigs).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

fn exit_with(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, error);
    std::process::exit(1);
}

fn prompt_text(prompt: &str) -> String {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .unwrap_or_else(|e| exit_with("Failed to read input", e))
}

fn prompt_role() -> Role {
    let roles = [Role::Organizer, Role::Consumer];
    let labels = ["organizer", "user"];
    let selection = Select::new()
        .with_prompt("Role")
        .items(&labels)
        .default(0)
        .interact()
        .unwrap_or_else(|e| exit_with("Failed to read role", e));
    roles[selection]
}

async fn handle_create_account(
    pool: PgPool,
    username: Option<String>,
    email: Option<String>,
    role: Option<Role>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| prompt_text("Username"));
    let email = email.unwrap_or_else(|| prompt_text("Email address"));
    let role = role.unwrap_or_else(prompt_role);
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| exit_with("Failed to read password", e))
    });

    let request = RegisterRequest {
        username,
        email,
        password,
        role,
    };
    if let Err(e) = request.validate() {
        exit_with("Invalid account details", e);
    }
    if !request.password_fits_hasher() {
        exit_with("Invalid account details", "password must be at most 72 bytes");
    }

    let cost = match PasswordConfig::from_env() {
        Ok(config) => config.bcrypt_cost,
        Err(e) => exit_with("Invalid password configuration", e),
    };

    let password_hash = match PasswordHasher::new(cost).hash_blocking(request.password).await {
        Ok(digest) => digest,
        Err(e) => exit_with("Failed to hash password", e),
    };

    let store = PgCredentialStore::new(pool);
    let created = store
        .create(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role: request.role,
        })
        .await;

    match created {
        Ok(user) => {
            println!("\n✅ Account created successfully!");
            println!("   ID: {}", user.id);
            println!("   Username: {}", user.username);
            println!("   Email: {}", user.email);
            println!("   Role: {}", user.role);
        }
        Err(e) => exit_with("Error creating account", e),
    }
}

async fn handle_seed(pool: &PgPool, organizers: usize, consumers: usize, gigs: usize) {
    let config = SeedConfig::new(organizers)
        .with_consumers(consumers)
        .with_gigs_per_organizer(gigs);

    if let Err(e) = seeder::seed_all(pool, config).await {
        exit_with("Error seeding database", e);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        exit_with("Error clearing seeded data", e);
    }
}
