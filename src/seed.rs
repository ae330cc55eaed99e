//! Built-in default data used to initialize an empty store.

use chrono::NaiveDate;

use crate::model::{Feature, FeatureStatus, Pillar, Team};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

/// The catalog entries written when a store first loads empty.
pub fn seed_features() -> Vec<Feature> {
    vec![
        Feature {
            id: "raz-sleep-journal".to_string(),
            title: "Raz Sleep Journal".to_string(),
            description: "Foundational sleep journal experience with phased rollout and form refinements.".to_string(),
            web_url: "https://raz-web-prototype.vercel.app/".to_string(),
            owner: "Raz Papissian".to_string(),
            team: Team::Kids,
            pillar: Pillar::Pillar2,
            status: FeatureStatus::InProgress,
            date_created: date(2025, 12, 15),
            date_released: None,
            flag_refs: Vec::new(),
        },
        Feature {
            id: "web-library".to_string(),
            title: "Web Library".to_string(),
            description: "Unified web library for browsing and validating prototypes across teams and pillars.".to_string(),
            web_url: "https://thad-vercel-test-d84y.vercel.app/".to_string(),
            owner: "Team Web".to_string(),
            team: Team::Platform,
            pillar: Pillar::Pillar2,
            status: FeatureStatus::InProgress,
            date_created: date(2024, 5, 12),
            date_released: None,
            flag_refs: Vec::new(),
        },
        Feature {
            id: "catherine-sleep-tracker-proto".to_string(),
            title: "Catherine Sleep Tracker Proto".to_string(),
            description: "In-app module for sleep logging with timer or manual data entry. No real data hookups".to_string(),
            web_url: "https://catherine-test-prototype.vercel.app/".to_string(),
            owner: "Catherine Hoffman Hammill".to_string(),
            team: Team::Kids,
            pillar: Pillar::Pillar2,
            status: FeatureStatus::InProgress,
            date_created: date(2025, 12, 15),
            date_released: None,
            flag_refs: Vec::new(),
        },
        Feature {
            id: "chat_as_the_primary_interface".to_string(),
            title: "Chat as the primary interface".to_string(),
            description: "Using chat to change schedule, play favorites and seek information. No real data hookups.".to_string(),
            web_url: "https://hatch-ai-chat-poc.vercel.app/experiment".to_string(),
            owner: "Anoushka Garg".to_string(),
            team: Team::Kids,
            pillar: Pillar::Pillar2,
            status: FeatureStatus::InProgress,
            date_created: date(2025, 12, 15),
            date_released: None,
            flag_refs: Vec::new(),
        },
    ]
}
