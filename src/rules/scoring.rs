//! Step 2 scoring criteria
//!
//! Nine criteria across five categories, 100 points in total.

/// Passing mark for Step 2; totals at or above it pass
pub const PASSING_SCORE: u32 = 60;

/// Maximum attainable total
pub const MAX_TOTAL: u32 = 100;

/// Scoring category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    A,
    B,
    C,
    D,
    E,
}

impl Category {
    /// Short letter used as a map key
    pub fn letter(self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
            Category::D => "D",
            Category::E => "E",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::A => "Agricultural production",
            Category::B => "Socio-economic impact",
            Category::C => "Market connectivity",
            Category::D => "Cost effectiveness",
            Category::E => "Resilience and readiness",
        }
    }

    /// Category ceiling
    pub fn max_points(self) -> u32 {
        match self {
            Category::A => 25,
            Category::B => 25,
            Category::C => 20,
            Category::D => 15,
            Category::E => 15,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.letter(), self.title())
    }
}

/// All categories in display order
pub const CATEGORIES: &[Category] = &[
    Category::A,
    Category::B,
    Category::C,
    Category::D,
    Category::E,
];

/// A scored criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criterion {
    pub id: &'static str,
    pub category: Category,
    pub label: &'static str,
    pub max_points: u32,
}

pub const CRITERIA: &[Criterion] = &[
    Criterion {
        id: "A1",
        category: Category::A,
        label: "Agricultural area served (hectares)",
        max_points: 15,
    },
    Criterion {
        id: "A2",
        category: Category::A,
        label: "Volume of priority commodities produced",
        max_points: 10,
    },
    Criterion {
        id: "B1",
        category: Category::B,
        label: "Number of farmer beneficiaries",
        max_points: 15,
    },
    Criterion {
        id: "B2",
        category: Category::B,
        label: "Poverty incidence and GIDA classification",
        max_points: 10,
    },
    Criterion {
        id: "C1",
        category: Category::C,
        label: "Connectivity to markets and existing road network",
        max_points: 20,
    },
    Criterion {
        id: "D1",
        category: Category::D,
        label: "Cost per kilometer against program standard",
        max_points: 10,
    },
    Criterion {
        id: "D2",
        category: Category::D,
        label: "Cost per beneficiary",
        max_points: 5,
    },
    Criterion {
        id: "E1",
        category: Category::E,
        label: "Climate and disaster resilience of design",
        max_points: 10,
    },
    Criterion {
        id: "E2",
        category: Category::E,
        label: "LGU counterpart and implementation readiness",
        max_points: 5,
    },
];

/// Look up a criterion by id
pub fn criterion(id: &str) -> Option<&'static Criterion> {
    CRITERIA.iter().find(|c| c.id == id)
}
