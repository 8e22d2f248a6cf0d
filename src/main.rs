use crate::config::server::ServerConfig;
use crate::router::init_router;
use crate::state::init_app_state;
use dotenvy::dotenv;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod docs;
pub(crate) mod logging;
pub(crate) mod middleware;
pub(crate) mod modules;
pub(crate) mod router;
pub(crate) mod state;
pub(crate) mod utils;
pub mod validator;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Check if this is a CLI command
    if args.len() > 1 && args[1] == "create-admin" {
        handle_create_admin(args).await;
        return;
    }
    if args.len() > 1 && args[1] == "seed" {
        handle_seed().await;
        return;
    }

    // Normal server startup
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = init_app_state().await;
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.bind_addr())
        .await
        .unwrap();
    println!("🚀 Server running on http://localhost:{}", server_config.port);
    println!(
        "📚 Swagger UI available at http://localhost:{}/swagger-ui",
        server_config.port
    );
    println!(
        "📖 Scalar UI available at http://localhost:{}/scalar",
        server_config.port
    );
    axum::serve(listener, app).await.unwrap();
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 4 {
        eprintln!("Usage: {} create-admin <username> <password>", args[0]);
        std::process::exit(1);
    }

    let username = &args[2];
    let password = &args[3];

    // Initialize database connection
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match cli::create_admin(&pool, username, password).await {
        Ok(created) => {
            if created {
                println!("✅ Admin created successfully!");
                println!("   Username: {}", username);
            } else {
                println!("ℹ️ Admin '{}' already exists, nothing to do", username);
            }
        }
        Err(e) => {
            eprintln!("❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed() {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match cli::seeder::seed_database(&pool).await {
        Ok(summary) => {
            println!("✅ Database seeded successfully!");
            println!(
                "   {} students, {} professors, {} courses, {} enrollments",
                summary.students, summary.professors, summary.courses, summary.enrollments
            );
        }
        Err(e) => {
            eprintln!("❌ Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}
