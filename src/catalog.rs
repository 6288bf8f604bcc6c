//! Location and price range catalogs.
//!
//! Both catalogs are immutable once built and are shared with the
//! [`SelectorWidget`](crate::widget::SelectorWidget) through `Arc`. They are
//! keyed by the same location names, but nothing enforces that every location
//! has a price range: a missing entry simply means no hint is shown.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::Deserialize;

/// Separator between a sector's short code and its description.
pub const SECTOR_SEPARATOR: &str = " - ";

/// A sector label such as `"Sector 6 - Metro Connected"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorLabel(String);

impl SectorLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The short code before the first separator, or the whole label when
    /// there is none.
    #[must_use]
    pub fn code(&self) -> &str {
        self.0
            .split_once(SECTOR_SEPARATOR)
            .map_or(self.0.as_str(), |(code, _)| code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateLocation(String),
    EmptyLocationName,
    EmptySector { location: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLocation(name) => write!(f, "location '{name}' is listed twice"),
            Self::EmptyLocationName => f.write_str("location name must not be empty"),
            Self::EmptySector { location } => {
                write!(f, "location '{location}' has an empty sector label")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered mapping from location name to its sectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationCatalog {
    entries: Vec<(String, Vec<SectorLabel>)>,
}

impl LocationCatalog {
    /// Build a catalog, keeping the given order.
    pub fn new<N, S>(entries: impl IntoIterator<Item = (N, Vec<S>)>) -> Result<Self, CatalogError>
    where
        N: Into<String>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut catalog = Vec::new();
        for (name, sectors) in entries {
            let name = name.into();
            if name.is_empty() {
                return Err(CatalogError::EmptyLocationName);
            }
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateLocation(name));
            }
            let sectors: Vec<SectorLabel> = sectors.into_iter().map(SectorLabel::new).collect();
            if sectors.iter().any(|s| s.as_str().trim().is_empty()) {
                return Err(CatalogError::EmptySector { location: name });
            }
            catalog.push((name, sectors));
        }
        Ok(Self { entries: catalog })
    }

    #[must_use]
    pub fn sectors(&self, location: &str) -> Option<&[SectorLabel]> {
        self.entries
            .iter()
            .find(|(name, _)| name == location)
            .map(|(_, sectors)| sectors.as_slice())
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mapping from location name to a preformatted price range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRangeCatalog {
    ranges: HashMap<String, String>,
}

impl PriceRangeCatalog {
    pub fn new<N, R>(ranges: impl IntoIterator<Item = (N, R)>) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Self {
            ranges: ranges
                .into_iter()
                .map(|(name, range)| (name.into(), range.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn price_range(&self, location: &str) -> Option<&str> {
        self.ranges.get(location).map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "location")]
    locations: Vec<LocationEntry>,
    #[serde(default)]
    price_ranges: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct LocationEntry {
    name: String,
    #[serde(default)]
    sectors: Vec<String>,
}

/// Both catalogs, as loaded from one source.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub locations: LocationCatalog,
    pub price_ranges: PriceRangeCatalog,
}

impl Catalogs {
    /// Parse a catalog document.
    ///
    /// ```toml
    /// [[location]]
    /// name = "Dwarka"
    /// sectors = ["Sector 6 - Metro Connected"]
    ///
    /// [price_ranges]
    /// Dwarka = "₹85-95 Lakhs avg"
    /// ```
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let locations =
            LocationCatalog::new(file.locations.into_iter().map(|e| (e.name, e.sectors)))?;
        Ok(Self {
            locations,
            price_ranges: PriceRangeCatalog::new(file.price_ranges),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read catalog {}", path.display()))?;
        let catalogs = Self::from_toml(&content)
            .wrap_err_with(|| format!("invalid catalog {}", path.display()))?;
        tracing::debug!(
            "Loaded {} locations from {}",
            catalogs.locations.len(),
            path.display()
        );
        Ok(catalogs)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        let locations = LocationCatalog::new([
            (
                "Dwarka",
                vec![
                    "Sector 6 - Metro Connected",
                    "Sector 10 - Family Hub",
                    "Sector 12 - Commercial Center",
                ],
            ),
            (
                "Rohini",
                vec![
                    "Sector 3 - Budget Friendly",
                    "Sector 9 - Well Connected",
                    "Sector 13 - Peaceful Area",
                ],
            ),
            (
                "Saket",
                vec!["Block A - Shopping District", "Block D - Residential Elite"],
            ),
            (
                "Vasant Kunj",
                vec![
                    "Sector A - Diplomatic Enclave",
                    "Sector C - Premium Locality",
                ],
            ),
            (
                "Janakpuri",
                vec!["Block A1 - Metro Hub", "Block B2 - Family Zone"],
            ),
            (
                "Karol Bagh",
                vec![
                    "Main Market - Commercial Heart",
                    "Ajmal Khan Road - Shopping Paradise",
                ],
            ),
        ])
        .unwrap_or_default();

        let price_ranges = PriceRangeCatalog::new([
            ("Dwarka", "₹85-95 Lakhs avg"),
            ("Rohini", "₹65-75 Lakhs avg"),
            ("Saket", "₹1.2-1.8 Crores avg"),
            ("Vasant Kunj", "₹1.8-2.5 Crores avg"),
            ("Janakpuri", "₹90L-1.2 Crores avg"),
            ("Karol Bagh", "₹1.1-1.6 Crores avg"),
        ]);

        Self {
            locations,
            price_ranges,
        }
    }
}
