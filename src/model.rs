use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A catalog entry: one tracked product experiment or prototype.
///
/// The `id` is caller-assigned at creation and immutable afterwards.
/// Wire and persisted forms use camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub title: String,
    pub description: String,
    pub web_url: String,
    pub owner: String,
    pub team: Team,
    pub pillar: Pillar,
    pub status: FeatureStatus,
    pub date_created: NaiveDate,
    /// Set when the feature ships; not validated against `status`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_released: Option<NaiveDate>,
    /// Append-only; insertion order is display order.
    #[serde(default)]
    pub flag_refs: Vec<FlagRef>,
}

impl Feature {
    pub fn is_released(&self) -> bool {
        self.status == FeatureStatus::Released
    }
}

/// Reference to an external experiment/gate flag attached to a feature.
///
/// Names are unique per feature by convention only; nothing enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagRef {
    pub name: String,
    pub is_experiment: bool,
    pub is_feature_gate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    InProgress,
    Released,
}

impl FeatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Released => "released",
        }
    }
}

impl std::fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "released" => Ok(Self::Released),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

/// Owning team. Serialized values are the display names used across
/// the catalog UI and the persisted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Activation,
    #[serde(rename = "Client Experience")]
    ClientExperience,
    Platform,
    Growth,
    Experiments,
    Adult,
    Kids,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "Activation",
            Self::ClientExperience => "Client Experience",
            Self::Platform => "Platform",
            Self::Growth => "Growth",
            Self::Experiments => "Experiments",
            Self::Adult => "Adult",
            Self::Kids => "Kids",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Activation" => Ok(Self::Activation),
            "Client Experience" => Ok(Self::ClientExperience),
            "Platform" => Ok(Self::Platform),
            "Growth" => Ok(Self::Growth),
            "Experiments" => Ok(Self::Experiments),
            "Adult" => Ok(Self::Adult),
            "Kids" => Ok(Self::Kids),
            _ => Err(format!("Invalid team: {}", s)),
        }
    }
}

/// Product pillar a feature rolls up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pillar {
    #[serde(rename = "Pillar 0")]
    Pillar0,
    #[serde(rename = "Pillar 1")]
    Pillar1,
    #[serde(rename = "Pillar 2")]
    Pillar2,
    #[serde(rename = "Pillar Growth")]
    PillarGrowth,
}

impl Pillar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pillar0 => "Pillar 0",
            Self::Pillar1 => "Pillar 1",
            Self::Pillar2 => "Pillar 2",
            Self::PillarGrowth => "Pillar Growth",
        }
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pillar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pillar 0" => Ok(Self::Pillar0),
            "Pillar 1" => Ok(Self::Pillar1),
            "Pillar 2" => Ok(Self::Pillar2),
            "Pillar Growth" => Ok(Self::PillarGrowth),
            _ => Err(format!("Invalid pillar: {}", s)),
        }
    }
}
