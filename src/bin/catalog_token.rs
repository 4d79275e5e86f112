use clap::Parser;
use service_catalog::auth::{generate_jwt, Claims};
use service_catalog::config;

#[derive(Parser)]
#[command(name = "catalog-token")]
#[command(about = "Mint a bearer token accepted by the service catalog API")]
#[command(version)]
struct Cli {
    #[arg(long, default_value = "catalog-admin", help = "Token subject")]
    subject: String,

    #[arg(long, help = "Lifetime in hours (defaults to JWT_EXPIRY_HOURS)")]
    expiry_hours: Option<u64>,

    #[arg(long, help = "Signing secret (defaults to JWT_SECRET)")]
    secret: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    service_catalog::logging::init_tracing();

    let cli = Cli::parse();
    let config = config::config();

    let secret = cli.secret.unwrap_or_else(|| config.security.jwt_secret.clone());
    let expiry_hours = cli.expiry_hours.unwrap_or(config.security.jwt_expiry_hours);

    let claims = Claims::new(cli.subject, expiry_hours)?;
    let token = generate_jwt(&claims, &secret)?;
    println!("{}", token);
    Ok(())
}
