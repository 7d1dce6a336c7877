//! Read-only demo data for the configured demo account.
//!
//! The demo account never touches a real store: reads come from the data
//! below and writes are accepted, logged and dropped.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tracing::info;
use uuid::Uuid;

use medivault_core::result::AppResult;
use medivault_entity::document::{CreateDocument, MedicalDocument};
use medivault_entity::profile::{EmergencyContact, HealthProfile, UpsertProfile};

use crate::traits::{DocumentSource, ProfileSource};

/// Fixed id of the blood test fixture.
pub const BLOOD_TEST_ID: Uuid = Uuid::from_u128(0x6d65_6469_7661_756c_7400_0000_0000_0001);
/// Fixed id of the prescription fixture.
pub const PRESCRIPTION_ID: Uuid = Uuid::from_u128(0x6d65_6469_7661_756c_7400_0000_0000_0002);
/// Fixed id of the MRI fixture.
pub const MRI_SCAN_ID: Uuid = Uuid::from_u128(0x6d65_6469_7661_756c_7400_0000_0000_0003);
/// Fixed id of the dental invoice fixture.
pub const DENTAL_INVOICE_ID: Uuid = Uuid::from_u128(0x6d65_6469_7661_756c_7400_0000_0000_0004);

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn fixture(
    id: Uuid,
    owner_id: &str,
    file_name: &str,
    tags: &[&str],
    uploaded_at: DateTime<Utc>,
    summary: &str,
    content: &str,
) -> MedicalDocument {
    MedicalDocument {
        id,
        user_id: owner_id.to_string(),
        file_name: file_name.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        uploaded_at,
        summary: Some(summary.to_string()),
        file_content: Some(content.to_string()),
        file_path: None,
        file_size: None,
        file_type: None,
    }
}

/// Demo documents, newest first.
pub fn demo_documents(owner_id: &str) -> Vec<MedicalDocument> {
    vec![
        fixture(
            BLOOD_TEST_ID,
            owner_id,
            "Annual Blood Test Results.pdf",
            &["Lab Report", "Annual Checkup"],
            at(2023, 10, 15, 9, 30),
            "All results are within the normal range. Follow up in one year.",
            "Mock file content for blood test. Patient: Alex Doe. Results: All clear.",
        ),
        fixture(
            PRESCRIPTION_ID,
            owner_id,
            "Dermatologist Prescription.jpg",
            &["Prescription", "Dermatology"],
            at(2023, 9, 22, 14, 0),
            "Prescription for topical cream for minor skin rash.",
            "Mock file content for prescription. Medication: Hydrocortisone Cream.",
        ),
        fixture(
            MRI_SCAN_ID,
            owner_id,
            "MRI Scan - Left Knee.dicom",
            &["Scan", "Orthopedics", "MRI"],
            at(2023, 8, 5, 11, 45),
            "MRI shows minor cartilage wear. Recommendation for physical therapy.",
            "Mock file content for MRI scan. Findings: Minor cartilage wear.",
        ),
        fixture(
            DENTAL_INVOICE_ID,
            owner_id,
            "Dental Checkup Invoice.pdf",
            &["Invoice", "Dentist"],
            at(2023, 7, 18, 16, 20),
            "Invoice for routine dental cleaning and checkup.",
            "Mock file content for dental invoice. Service: Cleaning. Cost: $100.",
        ),
    ]
}

/// Demo emergency profile.
pub fn demo_profile(owner_id: &str) -> HealthProfile {
    HealthProfile {
        user_id: owner_id.to_string(),
        full_name: Some("Alex Doe".to_string()),
        blood_group: Some("O+".to_string()),
        allergies: vec!["Peanuts".into(), "Pollen".into(), "Aspirin".into()],
        emergency_contact: Some(EmergencyContact {
            name: "Jamie Doe".to_string(),
            phone: "123-456-7890".to_string(),
        }),
        updated_at: Utc::now(),
    }
}

/// Document source serving the demo documents of one account.
#[derive(Debug, Clone)]
pub struct FixtureDocuments {
    owner_id: String,
    documents: Vec<MedicalDocument>,
}

impl FixtureDocuments {
    /// Fixtures owned by `owner_id`.
    pub fn new(owner_id: impl Into<String>) -> Self {
        let owner_id = owner_id.into();
        let documents = demo_documents(&owner_id);
        Self {
            owner_id,
            documents,
        }
    }
}

#[async_trait]
impl DocumentSource for FixtureDocuments {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicalDocument>> {
        Ok(self.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<MedicalDocument>> {
        if owner_id == self.owner_id {
            Ok(self.documents.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn create(&self, data: CreateDocument) -> AppResult<MedicalDocument> {
        info!(owner_id = %data.user_id, file_name = %data.file_name, "Demo document save accepted, not persisted");
        Ok(data.into_document(Uuid::new_v4(), Utc::now()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        info!(document_id = %id, "Demo document delete accepted, not persisted");
        Ok(true)
    }
}

/// Profile source serving the demo profile of one account.
#[derive(Debug, Clone)]
pub struct FixtureProfiles {
    owner_id: String,
}

impl FixtureProfiles {
    /// Fixture profile for `owner_id`.
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }
}

#[async_trait]
impl ProfileSource for FixtureProfiles {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<HealthProfile>> {
        Ok((user_id == self.owner_id).then(|| demo_profile(user_id)))
    }

    async fn upsert(&self, data: UpsertProfile) -> AppResult<HealthProfile> {
        info!(user_id = %data.user_id, "Demo profile save accepted, not persisted");
        Ok(data.into_profile(Utc::now()))
    }
}
