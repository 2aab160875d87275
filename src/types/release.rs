//! Release types for the music page

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A playable release linked from the music page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Display rank within its category, ascending
    pub order: u32,
}

/// Release fields supplied by the admin when adding to a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDraft {
    pub title: String,
    pub url: String,
}

impl ReleaseDraft {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

/// The two independent ordering domains on the music page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "fullSets")]
    FullSets,
    #[serde(rename = "otherReleases")]
    OtherReleases,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::FullSets, Category::OtherReleases];

    /// Key used in `music.json` and in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FullSets => "fullSets",
            Category::OtherReleases => "otherReleases",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::FullSets => "full sets",
            Category::OtherReleases => "other releases",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Unrecognized category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown release category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullSets" => Ok(Category::FullSets),
            "otherReleases" => Ok(Category::OtherReleases),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Direction of a single-step reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("Unknown reorder direction: {}", other)),
        }
    }
}

/// Both release categories, as persisted in `music.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCatalog {
    #[serde(rename = "fullSets", default)]
    pub full_sets: Vec<Release>,
    #[serde(rename = "otherReleases", default)]
    pub other_releases: Vec<Release>,
}

impl ReleaseCatalog {
    pub fn category(&self, category: Category) -> &Vec<Release> {
        match category {
            Category::FullSets => &self.full_sets,
            Category::OtherReleases => &self.other_releases,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut Vec<Release> {
        match category {
            Category::FullSets => &mut self.full_sets,
            Category::OtherReleases => &mut self.other_releases,
        }
    }

    /// Copy with every category sorted by ascending `order`
    pub fn sorted(&self) -> Self {
        let mut catalog = self.clone();
        for category in Category::ALL {
            catalog.category_mut(category).sort_by_key(|r| r.order);
        }
        catalog
    }

    /// Total number of releases across categories
    pub fn len(&self) -> usize {
        self.full_sets.len() + self.other_releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("fullSets".parse::<Category>(), Ok(Category::FullSets));
        assert_eq!(
            "otherReleases".parse::<Category>(),
            Ok(Category::OtherReleases)
        );
        assert!("singles".parse::<Category>().is_err());
        assert!("full sets".parse::<Category>().is_err());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_catalog_sorted_is_per_category() {
        let release = |id: &str, order| Release {
            id: id.to_string(),
            title: id.to_uppercase(),
            url: format!("https://example.com/{}", id),
            order,
        };
        let catalog = ReleaseCatalog {
            full_sets: vec![release("b", 1), release("a", 0)],
            other_releases: vec![release("z", 2), release("y", 0), release("x", 1)],
        };

        let sorted = catalog.sorted();
        let ids = |list: &Vec<Release>| list.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&sorted.full_sets), vec!["a", "b"]);
        assert_eq!(ids(&sorted.other_releases), vec!["y", "x", "z"]);
        assert_eq!(sorted.len(), 5);
    }
}
