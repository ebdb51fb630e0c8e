//! Named brand palette
//!
//! The palette is a list of groups, each holding uniquely named colors.
//! Entries are stored flat in canonical order (group order, then color order
//! within the group); groups are contiguous ranges of that list.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;
use thiserror::Error;

use crate::color::Rgb;
use crate::parse::{parse_color, ColorParseError};

/// Built-in brand palette: (group, [(name, color)])
pub const BRAND_PALETTE: &[(&str, &[(&str, Rgb)])] = &[
    (
        "primary",
        &[
            ("ink", Rgb::new(0x1b, 0x1f, 0x3b)),
            ("ocean", Rgb::new(0x1d, 0x4e, 0xd8)),
            ("sky", Rgb::new(0x38, 0xbd, 0xf8)),
            ("mint", Rgb::new(0x34, 0xd3, 0x99)),
        ],
    ),
    (
        "accents",
        &[
            ("cherry", Rgb::new(0xe1, 0x1d, 0x48)),
            ("coral", Rgb::new(0xfb, 0x71, 0x85)),
            ("tangerine", Rgb::new(0xf9, 0x73, 0x16)),
            ("sunflower", Rgb::new(0xfa, 0xcc, 0x15)),
            ("grape", Rgb::new(0x7c, 0x3a, 0xed)),
            ("lilac", Rgb::new(0xc4, 0xb5, 0xfd)),
        ],
    ),
    (
        "neutrals",
        &[
            ("black", Rgb::new(0x00, 0x00, 0x00)),
            ("charcoal", Rgb::new(0x33, 0x41, 0x55)),
            ("slate", Rgb::new(0x64, 0x74, 0x8b)),
            ("fog", Rgb::new(0xcb, 0xd5, 0xe1)),
            ("paper", Rgb::new(0xf8, 0xfa, 0xfc)),
            ("white", Rgb::new(0xff, 0xff, 0xff)),
        ],
    ),
    (
        "status",
        &[
            ("success", Rgb::new(0x16, 0xa3, 0x4a)),
            ("warning", Rgb::new(0xea, 0xb3, 0x08)),
            ("danger", Rgb::new(0xdc, 0x26, 0x26)),
            ("info", Rgb::new(0x02, 0x84, 0xc7)),
        ],
    ),
];

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("duplicate color name '{name}' in groups '{first_group}' and '{second_group}'")]
    DuplicateName {
        name: String,
        first_group: String,
        second_group: String,
    },

    #[error("group '{0}' has no colors")]
    EmptyGroup(String),

    #[error("invalid color for '{name}': {source}")]
    InvalidColor {
        name: String,
        #[source]
        source: ColorParseError,
    },

    #[error("invalid palette definition: {0}")]
    InvalidFormat(String),
}

/// A single named palette color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub group: String,
    pub name: String,
    pub color: Rgb,
}

/// A view over one group's entries
#[derive(Debug, Clone, Copy)]
pub struct PaletteGroup<'a> {
    pub name: &'a str,
    pub entries: &'a [PaletteEntry],
}

#[derive(Debug)]
struct GroupSpan {
    name: String,
    range: Range<usize>,
}

/// Immutable palette, built once at startup
#[derive(Debug)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    groups: Vec<GroupSpan>,
    by_name: HashMap<String, usize>,
}

impl Palette {
    /// Build a palette from grouped (name, color) pairs, keeping input order
    ///
    /// Color names must be unique across all groups. A group that appears
    /// twice is rejected as malformed, since its entries would no longer be
    /// contiguous.
    pub fn from_groups<G, N, E>(groups: G) -> Result<Self, PaletteError>
    where
        G: IntoIterator<Item = (N, E)>,
        N: Into<String>,
        E: IntoIterator<Item = (N, Rgb)>,
    {
        let mut palette = Palette {
            entries: Vec::new(),
            groups: Vec::new(),
            by_name: HashMap::new(),
        };

        for (group, colors) in groups {
            let group: String = group.into();
            if palette.groups.iter().any(|g| g.name == group) {
                return Err(PaletteError::InvalidFormat(format!(
                    "group '{}' is defined more than once",
                    group
                )));
            }

            let start = palette.entries.len();
            for (name, color) in colors {
                let name: String = name.into();
                if let Some(&existing) = palette.by_name.get(&name) {
                    return Err(PaletteError::DuplicateName {
                        name,
                        first_group: palette.entries[existing].group.clone(),
                        second_group: group,
                    });
                }
                palette.by_name.insert(name.clone(), palette.entries.len());
                palette.entries.push(PaletteEntry {
                    group: group.clone(),
                    name,
                    color,
                });
            }

            if palette.entries.len() == start {
                return Err(PaletteError::EmptyGroup(group));
            }
            palette.groups.push(GroupSpan {
                name: group,
                range: start..palette.entries.len(),
            });
        }

        Ok(palette)
    }

    /// The compiled-in brand palette
    pub fn builtin() -> Result<Self, PaletteError> {
        Self::from_groups(
            BRAND_PALETTE
                .iter()
                .map(|(group, colors)| (*group, colors.iter().copied())),
        )
    }

    /// Parse a JSON palette definition: `{ "group": { "name": "<color>" } }`
    ///
    /// Object key order is kept as the canonical order, and repeated keys are
    /// reported rather than collapsed. Color values accept every form the
    /// color parser accepts.
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        let RawGroups(groups) =
            serde_json::from_str(json).map_err(|e| PaletteError::InvalidFormat(e.to_string()))?;

        let mut parsed = Vec::with_capacity(groups.len());
        for (group, RawColors(colors)) in groups {
            let mut entries = Vec::with_capacity(colors.len());
            for (name, value) in colors {
                let color = parse_color(&value).map_err(|source| PaletteError::InvalidColor {
                    name: name.clone(),
                    source,
                })?;
                entries.push((name, color));
            }
            parsed.push((group, entries));
        }

        Self::from_groups(parsed)
    }

    /// All entries in canonical enumeration order
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Groups in canonical order
    pub fn groups(&self) -> impl Iterator<Item = PaletteGroup<'_>> {
        self.groups.iter().map(|g| PaletteGroup {
            name: &g.name,
            entries: &self.entries[g.range.clone()],
        })
    }

    /// Look up an entry by its unique name
    pub fn get(&self, name: &str) -> Option<&PaletteEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Top-level palette object, every key kept in file order
struct RawGroups(Vec<(String, RawColors)>);

/// One group object, every key kept in file order
struct RawColors(Vec<(String, String)>);

/// Collects a JSON object as ordered pairs without merging repeated keys
struct OrderedEntries<V> {
    expecting: &'static str,
    marker: PhantomData<V>,
}

impl<V> OrderedEntries<V> {
    fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            marker: PhantomData,
        }
    }
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedEntries<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(entries)
    }
}

impl<'de> Deserialize<'de> for RawGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(OrderedEntries::new("an object of palette groups"))
            .map(RawGroups)
    }
}

impl<'de> Deserialize<'de> for RawColors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(OrderedEntries::new("an object of color names to color strings"))
            .map(RawColors)
    }
}
