//! Domain records for the coordination services.

use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees. Latitude is expected in
/// [-90, 90] and longitude in [-180, 180]; callers own validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Anything that can be placed on the map and ranked by distance.
pub trait Locatable {
    fn coordinate(&self) -> Coordinate;
}

impl Locatable for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl<T: Locatable> Locatable for &T {
    fn coordinate(&self) -> Coordinate {
        (*self).coordinate()
    }
}

/// Review state of a submitted registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Roles a signed-in user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Victim,
    Volunteer,
    Organization,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Victim => "victim",
            UserRole::Volunteer => "volunteer",
            UserRole::Organization => "organization",
            UserRole::Admin => "admin",
        }
    }
}

/// A registered user of the platform. The store envelope supplies the
/// identifier; accounts are looked up by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// A volunteer available for relief work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerRecord {
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
    pub coordinate: Coordinate,
    pub user_id: String,
    pub status: RegistrationStatus,
}

impl Locatable for VolunteerRecord {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// A relief organization offering services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationRecord {
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
    pub coordinate: Coordinate,
    pub user_id: String,
    pub status: RegistrationStatus,
}

impl Locatable for OrganizationRecord {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// An emergency shelter with live occupancy numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelterRecord {
    pub name: String,
    pub address: String,
    pub capacity: u32,
    pub occupancy: u32,
    pub facilities: Vec<String>,
    pub contact: String,
    pub coordinate: Coordinate,
}

impl ShelterRecord {
    /// Beds still free, saturating at zero when over capacity.
    pub fn available_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.occupancy)
    }
}

impl Locatable for ShelterRecord {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// A person requesting assistance. Victims are never ranked; they carry
/// a free-text location only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictimRecord {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub location: String,
    pub contact: String,
    pub disaster_type: String,
    pub description: String,
    pub needs: String,
    pub user_id: String,
    pub status: RegistrationStatus,
}

/// A government agency registered to coordinate relief.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernmentRecord {
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
    pub user_id: String,
    pub status: RegistrationStatus,
}
