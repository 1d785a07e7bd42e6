//! The fixed catalog of downloadable materials.
//!
//! The catalog is constant data: five records created at compile time and shared by every handler
//! variant. Lookups never allocate and always resolve to the same `'static` record.

use std::fmt;
use std::str::FromStr;

/// The closed set of materials the catalog knows about.
///
/// Every variant has exactly one record in [`list_all`] and exactly one rendering routine, so a
/// match over this enum is the only place where "which material is this" gets decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialKind {
    /// Articulation exercises.
    Articulation,
    /// Speech-therapy games.
    Games,
    /// Pure-speech drills and tongue twisters.
    TongueTwisters,
    /// Phonemic-hearing workbooks.
    Workbooks,
    /// Breathing exercises.
    Breathing,
}

impl MaterialKind {
    /// All kinds in catalog order.
    pub const ALL: [MaterialKind; 5] = [
        MaterialKind::Articulation,
        MaterialKind::Games,
        MaterialKind::TongueTwisters,
        MaterialKind::Workbooks,
        MaterialKind::Breathing,
    ];

    /// Returns the identifier used on the wire (`?id=...`).
    pub const fn as_str(self) -> &'static str {
        match self {
            MaterialKind::Articulation => "articulation",
            MaterialKind::Games => "games",
            MaterialKind::TongueTwisters => "tongue-twisters",
            MaterialKind::Workbooks => "workbooks",
            MaterialKind::Breathing => "breathing",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name any catalog material.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown material id '{0}'")]
pub struct UnknownMaterial(pub String);

impl FromStr for MaterialKind {
    type Err = UnknownMaterial;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MaterialKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownMaterial(value.to_owned()))
    }
}

/// Immutable metadata describing one downloadable material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialRecord {
    /// Which material this record describes.
    pub kind: MaterialKind,
    /// Human readable title shown to visitors.
    pub display_name: &'static str,
    /// File name suggested to the browser when downloading.
    pub file_name: &'static str,
    /// Advertised size of the download.
    pub size_label: &'static str,
    /// One-line summary of the material.
    pub description: &'static str,
}

impl MaterialRecord {
    /// Returns the wire identifier of the record.
    pub const fn id(&self) -> &'static str {
        self.kind.as_str()
    }
}

static CATALOG: [MaterialRecord; 5] = [
    MaterialRecord {
        kind: MaterialKind::Articulation,
        display_name: "Артикуляционная гимнастика",
        file_name: "artikulyacionnaya-gimnastika.pdf",
        size_label: "2.4 MB",
        description: "Комплекс упражнений для развития речевого аппарата",
    },
    MaterialRecord {
        kind: MaterialKind::Games,
        display_name: "Логопедические игры",
        file_name: "logopedicheskie-igry.pdf",
        size_label: "3.8 MB",
        description: "30+ игр для развития речи детей 3-7 лет",
    },
    MaterialRecord {
        kind: MaterialKind::TongueTwisters,
        display_name: "Чистоговорки и скороговорки",
        file_name: "chistogovorki-skorogovorki.pdf",
        size_label: "1.2 MB",
        description: "Подборка для автоматизации всех звуков",
    },
    MaterialRecord {
        kind: MaterialKind::Workbooks,
        display_name: "Рабочие тетради",
        file_name: "rabochie-tetradi.pdf",
        size_label: "4.5 MB",
        description: "Задания для развития фонематического слуха",
    },
    MaterialRecord {
        kind: MaterialKind::Breathing,
        display_name: "Дыхательная гимнастика",
        file_name: "dykhatelnaya-gimnastika.pdf",
        size_label: "1.8 MB",
        description: "Упражнения для развития речевого дыхания",
    },
];

/// Returns every record in catalog order.
pub fn list_all() -> &'static [MaterialRecord] {
    &CATALOG
}

/// Returns the record for a kind.
pub fn record(kind: MaterialKind) -> &'static MaterialRecord {
    // CATALOG is declared in `MaterialKind::ALL` order.
    &CATALOG[kind as usize]
}

/// Resolves a wire identifier to its record, or `None` when the catalog has no such material.
pub fn lookup(id: &str) -> Option<&'static MaterialRecord> {
    id.parse::<MaterialKind>().ok().map(record)
}
