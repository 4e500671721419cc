//! Registration intake for victims, volunteers, organizations, and
//! government agencies.
//!
//! Submissions land in the matching store collection with `pending`
//! status and the submitting user's id (or `anonymous`). Rankable kinds
//! get a coordinate assigned round-robin from a fixed pin table; there
//! is no real geocoding.

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::lookup::organizations::ORGANIZATIONS_COLLECTION;
use crate::lookup::volunteers::VOLUNTEERS_COLLECTION;
use crate::models::{
    Coordinate, GovernmentRecord, OrganizationRecord, RegistrationStatus, VictimRecord,
    VolunteerRecord,
};
use crate::session::Session;
use crate::store::{JsonStore, StoredRecord};

pub const VICTIMS_COLLECTION: &str = "victims";
pub const GOVERNMENTS_COLLECTION: &str = "governments";

/// Mock coordinates assigned to volunteer registrations, cycled in
/// submission order.
pub(crate) const VOLUNTEER_PINS: [Coordinate; 5] = [
    Coordinate {
        latitude: 28.6139,
        longitude: 77.2090,
    },
    Coordinate {
        latitude: 28.6484,
        longitude: 77.3051,
    },
    Coordinate {
        latitude: 28.5198,
        longitude: 77.2182,
    },
    Coordinate {
        latitude: 28.6363,
        longitude: 77.1173,
    },
    Coordinate {
        latitude: 28.7041,
        longitude: 77.1025,
    },
];

/// Mock coordinates assigned to organization registrations.
pub(crate) const ORGANIZATION_PINS: [Coordinate; 5] = [
    Coordinate {
        latitude: 28.6304,
        longitude: 77.2177,
    },
    Coordinate {
        latitude: 28.5621,
        longitude: 77.2841,
    },
    Coordinate {
        latitude: 28.6129,
        longitude: 77.2295,
    },
    Coordinate {
        latitude: 28.5355,
        longitude: 77.3910,
    },
    Coordinate {
        latitude: 28.7158,
        longitude: 77.1563,
    },
];

/// Volunteer signup form contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerSignup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub availability: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub emergency_contact: String,
    pub has_medical_training: bool,
    pub has_transportation: bool,
}

/// Organization signup form contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSignup {
    pub name: String,
    pub org_type: String,
    pub website: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub services: Vec<String>,
    pub resources: String,
    pub coverage: String,
}

/// Victim assistance request contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictimSignup {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub location: String,
    pub contact: String,
    pub disaster_type: String,
    pub description: String,
    pub needs: String,
}

/// Government agency signup form contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernmentSignup {
    pub name: String,
    pub department: String,
    pub level: String,
    pub jurisdiction: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub services: Vec<String>,
    pub resources: String,
}

pub fn register_volunteer(
    store: &JsonStore,
    session: Option<&Session>,
    signup: VolunteerSignup,
) -> Result<StoredRecord<VolunteerRecord>, StoreError> {
    let coordinate = assign_pin(&VOLUNTEER_PINS, store.count(VOLUNTEERS_COLLECTION)?);
    let record = VolunteerRecord {
        name: signup.name,
        email: signup.email,
        phone: signup.phone,
        location: signup.location,
        availability: signup.availability,
        skills: signup.skills,
        experience: signup.experience,
        emergency_contact: signup.emergency_contact,
        has_medical_training: signup.has_medical_training,
        has_transportation: signup.has_transportation,
        coordinate,
        user_id: submitted_by(session),
        status: RegistrationStatus::Pending,
    };
    let stored = store.append(VOLUNTEERS_COLLECTION, record)?;
    info!(
        "Registry: volunteer '{}' registered as {}",
        stored.record.name, stored.id
    );
    Ok(stored)
}

pub fn register_organization(
    store: &JsonStore,
    session: Option<&Session>,
    signup: OrganizationSignup,
) -> Result<StoredRecord<OrganizationRecord>, StoreError> {
    let coordinate = assign_pin(&ORGANIZATION_PINS, store.count(ORGANIZATIONS_COLLECTION)?);
    let record = OrganizationRecord {
        name: signup.name,
        org_type: signup.org_type,
        website: signup.website,
        contact_person: signup.contact_person,
        email: signup.email,
        phone: signup.phone,
        address: signup.address,
        services: signup.services,
        resources: signup.resources,
        coverage: signup.coverage,
        coordinate,
        user_id: submitted_by(session),
        status: RegistrationStatus::Pending,
    };
    let stored = store.append(ORGANIZATIONS_COLLECTION, record)?;
    info!(
        "Registry: organization '{}' registered as {}",
        stored.record.name, stored.id
    );
    Ok(stored)
}

pub fn register_victim(
    store: &JsonStore,
    session: Option<&Session>,
    signup: VictimSignup,
) -> Result<StoredRecord<VictimRecord>, StoreError> {
    let record = VictimRecord {
        name: signup.name,
        age: signup.age,
        gender: signup.gender,
        location: signup.location,
        contact: signup.contact,
        disaster_type: signup.disaster_type,
        description: signup.description,
        needs: signup.needs,
        user_id: submitted_by(session),
        status: RegistrationStatus::Pending,
    };
    let stored = store.append(VICTIMS_COLLECTION, record)?;
    info!(
        "Registry: assistance request for '{}' recorded as {}",
        stored.record.name, stored.id
    );
    Ok(stored)
}

pub fn register_government(
    store: &JsonStore,
    session: Option<&Session>,
    signup: GovernmentSignup,
) -> Result<StoredRecord<GovernmentRecord>, StoreError> {
    let record = GovernmentRecord {
        name: signup.name,
        department: signup.department,
        level: signup.level,
        jurisdiction: signup.jurisdiction,
        contact_person: signup.contact_person,
        email: signup.email,
        phone: signup.phone,
        address: signup.address,
        services: signup.services,
        resources: signup.resources,
        user_id: submitted_by(session),
        status: RegistrationStatus::Pending,
    };
    let stored = store.append(GOVERNMENTS_COLLECTION, record)?;
    info!(
        "Registry: government agency '{}' registered as {}",
        stored.record.name, stored.id
    );
    Ok(stored)
}

fn submitted_by(session: Option<&Session>) -> String {
    session
        .map(|s| s.user.id.clone())
        .unwrap_or_else(|| "anonymous".to_string())
}

fn assign_pin(pins: &[Coordinate], existing: usize) -> Coordinate {
    pins[existing % pins.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::{UserAccount, UserRole};

    fn temp_store() -> JsonStore {
        let root = std::env::temp_dir().join(format!("sanrakshak-registry-test-{}", Uuid::new_v4()));
        JsonStore::open(root).unwrap()
    }

    fn sample_volunteer(name: &str) -> VolunteerSignup {
        VolunteerSignup {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "9876543210".to_string(),
            location: "Central Delhi".to_string(),
            availability: "Weekends".to_string(),
            skills: vec!["First Aid".to_string()],
            experience: "2 years".to_string(),
            emergency_contact: "9876500000".to_string(),
            has_medical_training: true,
            has_transportation: false,
        }
    }

    fn fake_session(user_id: &str) -> Session {
        Session {
            user: StoredRecord {
                id: user_id.to_string(),
                created_at: Utc::now(),
                record: UserAccount {
                    email: "someone@example.com".to_string(),
                    name: "Someone".to_string(),
                    role: UserRole::Victim,
                },
            },
            started_at: Utc::now(),
        }
    }

    #[test]
    fn test_volunteer_registration_defaults() {
        let store = temp_store();
        let stored = register_volunteer(&store, None, sample_volunteer("Asha")).unwrap();

        assert_eq!(stored.record.status, RegistrationStatus::Pending);
        assert_eq!(stored.record.user_id, "anonymous");
        assert_eq!(stored.record.coordinate, VOLUNTEER_PINS[0]);
    }

    #[test]
    fn test_pins_cycle_in_submission_order() {
        let store = temp_store();
        for i in 0..7 {
            let stored =
                register_volunteer(&store, None, sample_volunteer(&format!("V{}", i))).unwrap();
            assert_eq!(stored.record.coordinate, VOLUNTEER_PINS[i % 5]);
        }
    }

    #[test]
    fn test_session_attribution() {
        let store = temp_store();
        let session = fake_session("user-42");
        let stored =
            register_volunteer(&store, Some(&session), sample_volunteer("Asha")).unwrap();
        assert_eq!(stored.record.user_id, "user-42");
    }

    #[test]
    fn test_victims_carry_no_coordinate_but_persist() {
        let store = temp_store();
        let stored = register_victim(
            &store,
            None,
            VictimSignup {
                name: "Ravi".to_string(),
                age: 34,
                gender: "male".to_string(),
                location: "East Delhi".to_string(),
                contact: "9876511111".to_string(),
                disaster_type: "flood".to_string(),
                description: "Ground floor flooded".to_string(),
                needs: "Food, water".to_string(),
            },
        )
        .unwrap();

        let victims: Vec<StoredRecord<VictimRecord>> = store.list(VICTIMS_COLLECTION).unwrap();
        assert_eq!(victims.len(), 1);
        assert_eq!(victims[0].id, stored.id);
        assert_eq!(victims[0].record.status, RegistrationStatus::Pending);
    }
}
