use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};

use sanrakshak_lib::config::ServiceConfig;
use sanrakshak_lib::errors::{LocationError, LookupError};
use sanrakshak_lib::location::{EnvLocation, FixedLocation, LocationProvider};
use sanrakshak_lib::lookup::{
    find_nearby_help, find_nearby_shelters, list_unranked, NearbyHelp, NearbyHelpKind,
};
use sanrakshak_lib::lookup::organizations::ORGANIZATIONS_COLLECTION;
use sanrakshak_lib::lookup::volunteers::VOLUNTEERS_COLLECTION;
use sanrakshak_lib::models::{Coordinate, OrganizationRecord, UserRole, VolunteerRecord};
use sanrakshak_lib::notify::{AccountEvent, OutboxNotifier};
use sanrakshak_lib::registry::{
    register_organization, register_volunteer, OrganizationSignup, VolunteerSignup,
};
use sanrakshak_lib::seed::seed_store;
use sanrakshak_lib::session::SessionStore;
use sanrakshak_lib::store::JsonStore;

#[derive(Parser)]
#[command(
    name = "sanrakshak",
    about = "Disaster relief coordination toolkit",
    version
)]
struct Cli {
    /// Origin latitude. Falls back to ORIGIN_LATITUDE when omitted.
    #[arg(long, global = true)]
    lat: Option<f64>,

    /// Origin longitude. Falls back to ORIGIN_LONGITUDE when omitted.
    #[arg(long, global = true)]
    lon: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed the store with the demo rosters.
    Seed,
    /// Rank nearby volunteers and organizations by distance.
    Nearby {
        #[arg(long, value_enum, default_value = "all")]
        kind: KindArg,
        /// Search radius in km (default from config).
        #[arg(long)]
        radius: Option<f64>,
        /// Maximum results per source (default from config).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rank nearby shelters by distance.
    Shelters {
        #[arg(long)]
        radius: Option<f64>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Register as a volunteer.
    RegisterVolunteer(RegisterVolunteerArgs),
    /// Register a relief organization.
    RegisterOrganization(RegisterOrganizationArgs),
    /// Create an account and sign in.
    Signup {
        email: String,
        password: String,
        name: String,
    },
    /// Sign in to an existing account.
    Login { email: String, password: String },
    /// Show the active session.
    Whoami,
    /// Sign out.
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    All,
    Volunteers,
    Organizations,
}

impl From<KindArg> for NearbyHelpKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::All => NearbyHelpKind::All,
            KindArg::Volunteers => NearbyHelpKind::Volunteers,
            KindArg::Organizations => NearbyHelpKind::Organizations,
        }
    }
}

#[derive(Args)]
struct RegisterVolunteerArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    location: String,
    #[arg(long, default_value = "Flexible")]
    availability: String,
    /// Comma-separated skills, e.g. "First Aid,Logistics".
    #[arg(long, default_value = "")]
    skills: String,
    #[arg(long, default_value = "")]
    experience: String,
    #[arg(long, default_value = "")]
    emergency_contact: String,
    #[arg(long)]
    medical_training: bool,
    #[arg(long)]
    transportation: bool,
}

#[derive(Args)]
struct RegisterOrganizationArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "NGO")]
    org_type: String,
    #[arg(long, default_value = "")]
    website: String,
    #[arg(long)]
    contact_person: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
    /// Comma-separated services, e.g. "Shelter,Food".
    #[arg(long, default_value = "")]
    services: String,
    #[arg(long, default_value = "")]
    resources: String,
    #[arg(long, default_value = "")]
    coverage: String,
}

/// Origin source picked from the CLI flags, falling back to the
/// environment.
enum OriginSource {
    Fixed(FixedLocation),
    Env(EnvLocation),
}

impl LocationProvider for OriginSource {
    async fn request_location(&self) -> Result<Coordinate, LocationError> {
        match self {
            OriginSource::Fixed(provider) => provider.request_location().await,
            OriginSource::Env(provider) => provider.request_location().await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = ServiceConfig::from_env();
    config.log_config();

    let store =
        JsonStore::open(&config.store_root).context("Failed to open the document store")?;
    let provider = origin_source(cli.lat, cli.lon)?;

    match cli.command {
        Command::Seed => {
            let summary = seed_store(&store)?;
            println!(
                "Seeded {} records ({} volunteers, {} organizations, {} shelters)",
                summary.total(),
                summary.volunteers,
                summary.organizations,
                summary.shelters
            );
        }

        Command::Nearby {
            kind,
            radius,
            limit,
        } => {
            let radius = radius.unwrap_or(config.help_radius_km);
            let limit = Some(limit.unwrap_or(config.result_limit));
            run_nearby(&store, &provider, kind.into(), radius, limit).await?;
        }

        Command::Shelters { radius, limit } => {
            let radius = radius.unwrap_or(config.shelter_radius_km);
            let limit = Some(limit.unwrap_or(config.result_limit));
            let shelters = find_nearby_shelters(&store, &provider, radius, limit)
                .await
                .context("Shelter lookup failed")?;
            if shelters.is_empty() {
                println!("No shelters within {} km.", radius);
            } else {
                println!("Shelters within {} km:", radius);
                for (i, entry) in shelters.iter().enumerate() {
                    let s = &entry.candidate.record;
                    println!(
                        "  {}. {} ({:.2} km) - {} - {}/{} occupied - {}",
                        i + 1,
                        s.name,
                        entry.distance_km,
                        s.address,
                        s.occupancy,
                        s.capacity,
                        s.facilities.join(", ")
                    );
                }
            }
        }

        Command::RegisterVolunteer(args) => {
            let sessions = SessionStore::new(store.clone());
            let session = sessions.current()?;
            let stored = register_volunteer(
                &store,
                session.as_ref(),
                VolunteerSignup {
                    name: args.name,
                    email: args.email,
                    phone: args.phone,
                    location: args.location,
                    availability: args.availability,
                    skills: parse_list(&args.skills),
                    experience: args.experience,
                    emergency_contact: args.emergency_contact,
                    has_medical_training: args.medical_training,
                    has_transportation: args.transportation,
                },
            )?;
            OutboxNotifier::new(store.clone()).registration(
                "volunteer",
                &stored.record.name,
                &stored.record.name,
                &stored.record.email,
            )?;
            if let Some(session) = &session {
                sessions.update_role(session, UserRole::Volunteer)?;
            }
            println!("Registered volunteer {} ({})", stored.record.name, stored.id);
        }

        Command::RegisterOrganization(args) => {
            let sessions = SessionStore::new(store.clone());
            let session = sessions.current()?;
            let stored = register_organization(
                &store,
                session.as_ref(),
                OrganizationSignup {
                    name: args.name,
                    org_type: args.org_type,
                    website: args.website,
                    contact_person: args.contact_person,
                    email: args.email,
                    phone: args.phone,
                    address: args.address,
                    services: parse_list(&args.services),
                    resources: args.resources,
                    coverage: args.coverage,
                },
            )?;
            OutboxNotifier::new(store.clone()).registration(
                "organization",
                &stored.record.name,
                &stored.record.contact_person,
                &stored.record.email,
            )?;
            if let Some(session) = &session {
                sessions.update_role(session, UserRole::Organization)?;
            }
            println!(
                "Registered organization {} ({})",
                stored.record.name, stored.id
            );
        }

        Command::Signup {
            email,
            password,
            name,
        } => {
            let sessions = SessionStore::new(store.clone());
            let session = sessions.signup(&email, &password, &name)?;
            OutboxNotifier::new(store.clone()).account_event(
                &email,
                AccountEvent::Signup,
                Some(&name),
            )?;
            println!(
                "Signed up and logged in as {} ({})",
                session.user.record.name,
                session.user.record.role.as_str()
            );
        }

        Command::Login { email, password } => {
            let sessions = SessionStore::new(store.clone());
            let session = sessions.login(&email, &password)?;
            OutboxNotifier::new(store.clone()).account_event(&email, AccountEvent::Login, None)?;
            println!(
                "Logged in as {} ({})",
                session.user.record.name,
                session.user.record.role.as_str()
            );
        }

        Command::Whoami => {
            let sessions = SessionStore::new(store.clone());
            match sessions.current()? {
                Some(session) => println!(
                    "{} <{}> - {}",
                    session.user.record.name,
                    session.user.record.email,
                    session.user.record.role.as_str()
                ),
                None => println!("Not signed in."),
            }
        }

        Command::Logout => {
            SessionStore::new(store.clone()).logout()?;
            println!("Signed out.");
        }
    }

    Ok(())
}

async fn run_nearby(
    store: &JsonStore,
    provider: &impl LocationProvider,
    kind: NearbyHelpKind,
    radius: f64,
    limit: Option<usize>,
) -> Result<()> {
    match find_nearby_help(store, provider, kind, radius, limit).await {
        Ok(help) => {
            print_ranked_help(&help, radius);
            Ok(())
        }
        // No origin available: degrade to an unranked listing rather
        // than failing the query.
        Err(LookupError::Location(e)) => {
            warn!("Could not determine an origin ({}); listing without distances", e);
            if matches!(kind, NearbyHelpKind::All | NearbyHelpKind::Volunteers) {
                let volunteers: Vec<_> =
                    list_unranked::<VolunteerRecord>(store, VOLUNTEERS_COLLECTION, limit).await?;
                println!("Volunteers (unranked):");
                for (i, v) in volunteers.iter().enumerate() {
                    println!("  {}. {} - {}", i + 1, v.record.name, v.record.location);
                }
            }
            if matches!(kind, NearbyHelpKind::All | NearbyHelpKind::Organizations) {
                let organizations: Vec<_> =
                    list_unranked::<OrganizationRecord>(store, ORGANIZATIONS_COLLECTION, limit)
                        .await?;
                println!("Organizations (unranked):");
                for (i, o) in organizations.iter().enumerate() {
                    println!("  {}. {} - {}", i + 1, o.record.name, o.record.address);
                }
            }
            Ok(())
        }
        Err(e) => Err(e).context("Nearby lookup failed"),
    }
}

fn print_ranked_help(help: &NearbyHelp, radius: f64) {
    info!(
        "Nearby query complete: {} results within {} km",
        help.total(),
        radius
    );
    if !help.volunteers.is_empty() {
        println!("Volunteers within {} km:", radius);
        for (i, entry) in help.volunteers.iter().enumerate() {
            let v = &entry.candidate.record;
            println!(
                "  {}. {} ({:.2} km) - {} - skills: {} (contact {})",
                i + 1,
                v.name,
                entry.distance_km,
                v.location,
                v.skills.join(", "),
                v.phone
            );
        }
    }
    if !help.organizations.is_empty() {
        println!("Organizations within {} km:", radius);
        for (i, entry) in help.organizations.iter().enumerate() {
            let o = &entry.candidate.record;
            println!(
                "  {}. {} ({:.2} km) - {} - services: {} (contact {})",
                i + 1,
                o.name,
                entry.distance_km,
                o.org_type,
                o.services.join(", "),
                o.phone
            );
        }
    }
    if help.total() == 0 {
        println!("No help found within {} km.", radius);
    }
}

fn origin_source(lat: Option<f64>, lon: Option<f64>) -> Result<OriginSource> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(OriginSource::Fixed(FixedLocation(Coordinate::new(
            lat, lon,
        )))),
        (None, None) => Ok(OriginSource::Env(EnvLocation)),
        _ => bail!("--lat and --lon must be given together"),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
