//! Demo rosters used to seed a fresh store.
//!
//! Five volunteers, five organizations, and five shelters around Delhi,
//! pinned to the same coordinates the registration flow cycles through.
//! Seeding never touches a collection that already holds records.

use log::info;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::errors::StoreError;
use crate::lookup::organizations::ORGANIZATIONS_COLLECTION;
use crate::lookup::shelters::SHELTERS_COLLECTION;
use crate::lookup::volunteers::VOLUNTEERS_COLLECTION;
use crate::models::{
    Coordinate, OrganizationRecord, RegistrationStatus, ShelterRecord, VolunteerRecord,
};
use crate::registry::{ORGANIZATION_PINS, VOLUNTEER_PINS};
use crate::store::JsonStore;

const SEED_USER: &str = "seed";

static VOLUNTEER_ROSTER: Lazy<Vec<VolunteerRecord>> = Lazy::new(|| {
    vec![
        volunteer(
            "Rahul Sharma",
            "rahul.sharma@example.com",
            "9876543210",
            "Central Delhi",
            "Weekdays",
            &["Medical", "First Aid", "Search & Rescue"],
            "5 years in disaster response",
            true,
            false,
            VOLUNTEER_PINS[0],
        ),
        volunteer(
            "Priya Patel",
            "priya.patel@example.com",
            "9876543211",
            "East Delhi",
            "Evenings and Weekends",
            &["Medical Assistance", "Counseling"],
            "Healthcare professional with trauma experience",
            true,
            false,
            VOLUNTEER_PINS[1],
        ),
        volunteer(
            "Amit Kumar",
            "amit.kumar@example.com",
            "9876543212",
            "South Delhi",
            "Full-time",
            &["Logistics", "Transportation", "Distribution"],
            "Logistics manager, 8 years experience",
            false,
            true,
            VOLUNTEER_PINS[2],
        ),
        volunteer(
            "Anjali Gupta",
            "anjali.gupta@example.com",
            "9876543213",
            "West Delhi",
            "On call",
            &["Medical Doctor", "Emergency Response"],
            "Emergency physician",
            true,
            true,
            VOLUNTEER_PINS[3],
        ),
        volunteer(
            "Vikram Malhotra",
            "vikram.malhotra@example.com",
            "9876543214",
            "North Delhi",
            "Weekends",
            &["Logistics", "Supply Distribution"],
            "Runs a transport business",
            false,
            true,
            VOLUNTEER_PINS[4],
        ),
    ]
});

static ORGANIZATION_ROSTER: Lazy<Vec<OrganizationRecord>> = Lazy::new(|| {
    vec![
        organization(
            "Delhi Relief Trust",
            "NGO",
            "https://delhirelieftrust.example.org",
            "A. Mehta",
            "info@delhirelieftrust.example.org",
            "011-23456789",
            "Connaught Place, Central Delhi",
            &["Medical Aid", "Food Distribution"],
            "Large scale operations",
            "Delhi NCR",
            ORGANIZATION_PINS[0],
        ),
        organization(
            "Aid India Foundation",
            "NGO",
            "https://aidindia.example.org",
            "S. Reddy",
            "contact@aidindia.example.org",
            "011-34567890",
            "Hauz Khas, South Delhi",
            &["Shelter", "Medical Camps"],
            "Medium scale operations",
            "South Delhi",
            ORGANIZATION_PINS[1],
        ),
        organization(
            "Disaster Response Team",
            "Rapid response unit",
            "https://drt.example.org",
            "K. Singh",
            "response@drt.example.org",
            "011-45678901",
            "ITO, Central Delhi",
            &["Search & Rescue", "Medical Aid"],
            "Rapid deployment teams",
            "Delhi NCR",
            ORGANIZATION_PINS[2],
        ),
        organization(
            "Sahayata Trust",
            "Trust",
            "https://sahayata.example.org",
            "R. Iyer",
            "help@sahayata.example.org",
            "011-56789012",
            "Sector 18, Noida",
            &["Shelter", "Food", "Clothing", "Counseling"],
            "Community volunteers",
            "Noida",
            ORGANIZATION_PINS[3],
        ),
        organization(
            "Care & Hope International",
            "International NGO",
            "https://careandhope.example.org",
            "J. D'Souza",
            "india@careandhope.example.org",
            "011-67890123",
            "Model Town, North Delhi",
            &["Relief Materials", "Financial Aid", "Rehabilitation"],
            "International funding",
            "North India",
            ORGANIZATION_PINS[4],
        ),
    ]
});

static SHELTER_ROSTER: Lazy<Vec<ShelterRecord>> = Lazy::new(|| {
    vec![
        shelter(
            "Central Community Center",
            "123 Main St, Central City",
            200,
            120,
            &["Food", "Water", "Medical", "Beds"],
            "555-123-4567",
            VOLUNTEER_PINS[0],
        ),
        shelter(
            "East Delhi Relief Camp",
            "45 Park Road, East Delhi",
            150,
            85,
            &["Food", "Water", "Beds"],
            "555-234-5678",
            VOLUNTEER_PINS[1],
        ),
        shelter(
            "South Delhi Emergency Shelter",
            "78 Green Avenue, South Delhi",
            300,
            210,
            &["Food", "Water", "Medical", "Beds", "Children Area"],
            "555-345-6789",
            VOLUNTEER_PINS[2],
        ),
        shelter(
            "West Delhi Disaster Relief Center",
            "156 Ring Road, West Delhi",
            180,
            95,
            &["Food", "Water", "Medical"],
            "555-456-7890",
            VOLUNTEER_PINS[3],
        ),
        shelter(
            "North Delhi Safe Haven",
            "23 University Road, North Delhi",
            250,
            175,
            &["Food", "Water", "Medical", "Beds", "Showers"],
            "555-567-8901",
            VOLUNTEER_PINS[4],
        ),
    ]
});

/// How many records a seeding pass actually wrote.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub volunteers: usize,
    pub organizations: usize,
    pub shelters: usize,
}

impl SeedSummary {
    pub fn total(&self) -> usize {
        self.volunteers + self.organizations + self.shelters
    }
}

/// Seeds the demo rosters into `store`, skipping collections that
/// already hold records.
pub fn seed_store(store: &JsonStore) -> Result<SeedSummary, StoreError> {
    let summary = SeedSummary {
        volunteers: seed_collection(store, VOLUNTEERS_COLLECTION, &VOLUNTEER_ROSTER)?,
        organizations: seed_collection(store, ORGANIZATIONS_COLLECTION, &ORGANIZATION_ROSTER)?,
        shelters: seed_collection(store, SHELTERS_COLLECTION, &SHELTER_ROSTER)?,
    };
    info!(
        "Seed: wrote {} volunteers, {} organizations, {} shelters",
        summary.volunteers, summary.organizations, summary.shelters
    );
    Ok(summary)
}

fn seed_collection<T: Serialize + Clone>(
    store: &JsonStore,
    collection: &str,
    roster: &[T],
) -> Result<usize, StoreError> {
    if store.count(collection)? > 0 {
        info!("Seed: '{}' already populated, skipping", collection);
        return Ok(0);
    }
    for record in roster {
        store.append(collection, record.clone())?;
    }
    Ok(roster.len())
}

#[allow(clippy::too_many_arguments)]
fn volunteer(
    name: &str,
    email: &str,
    phone: &str,
    location: &str,
    availability: &str,
    skills: &[&str],
    experience: &str,
    has_medical_training: bool,
    has_transportation: bool,
    coordinate: Coordinate,
) -> VolunteerRecord {
    VolunteerRecord {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        location: location.to_string(),
        availability: availability.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience: experience.to_string(),
        emergency_contact: String::new(),
        has_medical_training,
        has_transportation,
        coordinate,
        user_id: SEED_USER.to_string(),
        status: RegistrationStatus::Approved,
    }
}

#[allow(clippy::too_many_arguments)]
fn organization(
    name: &str,
    org_type: &str,
    website: &str,
    contact_person: &str,
    email: &str,
    phone: &str,
    address: &str,
    services: &[&str],
    resources: &str,
    coverage: &str,
    coordinate: Coordinate,
) -> OrganizationRecord {
    OrganizationRecord {
        name: name.to_string(),
        org_type: org_type.to_string(),
        website: website.to_string(),
        contact_person: contact_person.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        services: services.iter().map(|s| s.to_string()).collect(),
        resources: resources.to_string(),
        coverage: coverage.to_string(),
        coordinate,
        user_id: SEED_USER.to_string(),
        status: RegistrationStatus::Approved,
    }
}

fn shelter(
    name: &str,
    address: &str,
    capacity: u32,
    occupancy: u32,
    facilities: &[&str],
    contact: &str,
    coordinate: Coordinate,
) -> ShelterRecord {
    ShelterRecord {
        name: name.to_string(),
        address: address.to_string(),
        capacity,
        occupancy,
        facilities: facilities.iter().map(|s| s.to_string()).collect(),
        contact: contact.to_string(),
        coordinate,
    }
}
