//! In-memory domain dataset
//!
//! Holds the patient-management records the memory backend serves. Used for
//! development, demos and tests; the seeded sample keeps the CLI usable
//! without a database.

use crate::domain::records::{
    Appointment, ClinicalRecord, Invoice, Patient, Practitioner, Prescription,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

/// All domain records served by the memory backend
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub patients: Vec<Patient>,
    pub practitioners: Vec<Practitioner>,
    pub appointments: Vec<Appointment>,
    pub prescriptions: Vec<Prescription>,
    pub invoices: Vec<Invoice>,
    pub clinical_records: Vec<ClinicalRecord>,
}

impl Dataset {
    /// Empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a patient's display name
    pub fn patient_name(&self, id: &Uuid) -> Option<String> {
        self.patients
            .iter()
            .find(|p| &p.id == id)
            .map(Patient::full_name)
    }

    /// Resolves a practitioner's display name
    pub fn practitioner_name(&self, id: &Uuid) -> Option<String> {
        self.practitioners
            .iter()
            .find(|p| &p.id == id)
            .map(Practitioner::full_name)
    }

    /// Small seeded dataset for demos and evaluation
    ///
    /// Three active patients, one inactive, two practitioners, and a spread
    /// of appointments, prescriptions, invoices and clinical records wired
    /// to them.
    pub fn sample() -> Self {
        let base = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap();

        let patients = vec![
            Patient {
                id: Uuid::new_v4(),
                given_name: "Maria".to_string(),
                family_name: "Santos".to_string(),
                gender: "female".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1984, 5, 12),
                email: Some("maria.santos@example.org".to_string()),
                phone: Some("+34 600 111 222".to_string()),
                active: true,
                created_at: base,
            },
            Patient {
                id: Uuid::new_v4(),
                given_name: "James".to_string(),
                family_name: "Whitfield".to_string(),
                gender: "male".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1972, 11, 3),
                email: Some("j.whitfield@example.org".to_string()),
                phone: None,
                active: true,
                created_at: base + Duration::days(2),
            },
            Patient {
                id: Uuid::new_v4(),
                given_name: "Amara".to_string(),
                family_name: "Okafor".to_string(),
                gender: "female".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1991, 2, 27),
                email: None,
                phone: Some("+44 20 7946 0001".to_string()),
                active: true,
                created_at: base + Duration::days(5),
            },
            Patient {
                id: Uuid::new_v4(),
                given_name: "Henrik".to_string(),
                family_name: "Lund".to_string(),
                gender: "male".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1958, 8, 19),
                email: Some("h.lund@example.org".to_string()),
                phone: None,
                active: false,
                created_at: base + Duration::days(9),
            },
        ];

        let practitioners = vec![
            Practitioner {
                id: Uuid::new_v4(),
                given_name: "Elena".to_string(),
                family_name: "Rossi".to_string(),
                specialization: Some("Cardiology".to_string()),
                email: Some("e.rossi@clinic.example.org".to_string()),
                phone: Some("+39 06 0000 1111".to_string()),
                active: true,
                created_at: base,
            },
            Practitioner {
                id: Uuid::new_v4(),
                given_name: "Daniel".to_string(),
                family_name: "Cho".to_string(),
                specialization: Some("General Practice".to_string()),
                email: Some("d.cho@clinic.example.org".to_string()),
                phone: None,
                active: true,
                created_at: base + Duration::days(1),
            },
        ];

        let appointments = vec![
            Appointment {
                id: Uuid::new_v4(),
                patient_id: patients[0].id,
                practitioner_id: practitioners[0].id,
                start: Some(base + Duration::days(10)),
                end: Some(base + Duration::days(10) + Duration::minutes(30)),
                minutes_duration: Some(30),
                status: "booked".to_string(),
                reason_code: Some("routine-checkup".to_string()),
                created_at: base + Duration::days(6),
            },
            Appointment {
                id: Uuid::new_v4(),
                patient_id: patients[1].id,
                practitioner_id: practitioners[1].id,
                start: Some(base + Duration::days(11)),
                end: Some(base + Duration::days(11) + Duration::minutes(45)),
                minutes_duration: Some(45),
                status: "fulfilled".to_string(),
                reason_code: None,
                created_at: base + Duration::days(7),
            },
            Appointment {
                id: Uuid::new_v4(),
                patient_id: patients[2].id,
                practitioner_id: practitioners[0].id,
                start: Some(base + Duration::days(14)),
                end: None,
                minutes_duration: None,
                status: "cancelled".to_string(),
                reason_code: Some("follow-up".to_string()),
                created_at: base + Duration::days(8),
            },
        ];

        let prescriptions = vec![
            Prescription {
                id: Uuid::new_v4(),
                patient_id: patients[0].id,
                prescriber_id: practitioners[0].id,
                medication_name: Some("Lisinopril 10mg".to_string()),
                status: "active".to_string(),
                dosage_text: Some("One tablet daily".to_string()),
                authored_on: Some(base + Duration::days(10)),
                created_at: base + Duration::days(10),
            },
            Prescription {
                id: Uuid::new_v4(),
                patient_id: patients[1].id,
                prescriber_id: practitioners[1].id,
                medication_name: Some("Metformin 500mg".to_string()),
                status: "completed".to_string(),
                dosage_text: Some("Twice daily with meals".to_string()),
                authored_on: Some(base + Duration::days(11)),
                created_at: base + Duration::days(11),
            },
        ];

        let invoices = vec![
            Invoice {
                id: Uuid::new_v4(),
                patient_id: patients[0].id,
                total_gross: Some("120.50".to_string()),
                status: "issued".to_string(),
                issue_date: NaiveDate::from_ymd_opt(2025, 1, 20),
                created_at: base + Duration::days(12),
            },
            Invoice {
                id: Uuid::new_v4(),
                patient_id: patients[1].id,
                total_gross: Some("89.00".to_string()),
                status: "balanced".to_string(),
                issue_date: NaiveDate::from_ymd_opt(2025, 1, 22),
                created_at: base + Duration::days(14),
            },
        ];

        let clinical_records = vec![ClinicalRecord {
            id: Uuid::new_v4(),
            patient_id: patients[0].id,
            record_type: Some("allergy".to_string()),
            recorded_date: NaiveDate::from_ymd_opt(2025, 1, 15),
            title: Some("Penicillin allergy".to_string()),
            status: Some("final".to_string()),
            created_at: base + Duration::days(9),
        }];

        Self {
            patients,
            practitioners,
            appointments,
            prescriptions,
            invoices,
            clinical_records,
        }
    }
}
