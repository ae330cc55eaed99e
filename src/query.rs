//! Pure filter/sort over a snapshot of the catalog. No I/O.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Feature, FeatureStatus, Pillar};

/// Status predicate for the collection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    InProgress,
    Released,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::InProgress => "in_progress",
            Self::Released => "released",
        }
    }

    fn matches(&self, feature: &Feature) -> bool {
        match self {
            Self::All => true,
            Self::InProgress => feature.status == FeatureStatus::InProgress,
            Self::Released => feature.status == FeatureStatus::Released,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "in_progress" => Ok(Self::InProgress),
            "released" => Ok(Self::Released),
            _ => Err(format!("Invalid status filter: {}", s)),
        }
    }
}

/// Released/unreleased predicate, derived from `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasedFilter {
    #[default]
    All,
    Released,
    Unreleased,
}

impl ReleasedFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Released => "released",
            Self::Unreleased => "unreleased",
        }
    }

    fn matches(&self, feature: &Feature) -> bool {
        match self {
            Self::All => true,
            Self::Released => feature.is_released(),
            Self::Unreleased => !feature.is_released(),
        }
    }
}

impl std::fmt::Display for ReleasedFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleasedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "released" => Ok(Self::Released),
            "unreleased" => Ok(Self::Unreleased),
            _ => Err(format!("Invalid released filter: {}", s)),
        }
    }
}

/// Total order over the view. Ties always break by `id` so the output
/// order is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    TitleDesc,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedDesc => "created_desc",
            Self::CreatedAsc => "created_asc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_desc" => Ok(Self::CreatedDesc),
            "created_asc" => Ok(Self::CreatedAsc),
            "title_asc" => Ok(Self::TitleAsc),
            "title_desc" => Ok(Self::TitleDesc),
            _ => Err(format!("Invalid sort option: {}", s)),
        }
    }
}

/// A parsed view request: active filters are ANDed, then the optional
/// sort is applied. `sort: None` leaves the stored order untouched.
#[derive(Debug, Clone, Default)]
pub struct FeatureQuery {
    pub status: StatusFilter,
    pub released: ReleasedFilter,
    pub pillars: Vec<Pillar>,
    pub sort: Option<SortOption>,
}

impl FeatureQuery {
    pub fn apply(&self, items: &[Feature]) -> Vec<Feature> {
        let mut result = filter_features(items, self.status, &self.pillars, self.released);
        if let Some(sort) = self.sort {
            sort_features(&mut result, sort);
        }
        result
    }
}

/// Conjunction of the three independent predicates. An empty pillar
/// selection means no pillar filtering.
pub fn filter_features(
    items: &[Feature],
    status: StatusFilter,
    pillars: &[Pillar],
    released: ReleasedFilter,
) -> Vec<Feature> {
    items
        .iter()
        .filter(|f| status.matches(f))
        .filter(|f| pillars.is_empty() || pillars.contains(&f.pillar))
        .filter(|f| released.matches(f))
        .cloned()
        .collect()
}

/// Sort in place. Title comparison is case-insensitive.
pub fn sort_features(items: &mut [Feature], sort: SortOption) {
    match sort {
        SortOption::CreatedDesc => items.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortOption::CreatedAsc => items.sort_by(|a, b| {
            a.date_created
                .cmp(&b.date_created)
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortOption::TitleAsc => items.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortOption::TitleDesc => items.sort_by(|a, b| {
            b.title
                .to_lowercase()
                .cmp(&a.title.to_lowercase())
                .then_with(|| b.id.cmp(&a.id))
        }),
    }
}
