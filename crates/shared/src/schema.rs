//! Column schemas for the grid views.
//!
//! One static table per resource kind, consumed generically by the grid
//! renderer. A column's kind decides whether it gets a numeric comparison
//! filter or a substring filter.

use crate::domain::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    const fn text(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            kind: ColumnKind::Text,
        }
    }

    const fn numeric(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            kind: ColumnKind::Numeric,
        }
    }
}

const PEOPLE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("name", "Name"),
    ColumnSpec::numeric("height", "Height (cm)"),
    ColumnSpec::numeric("mass", "Mass (kg)"),
    ColumnSpec::text("eye_color", "Eye Color"),
    ColumnSpec::text("hair_color", "Hair Color"),
    ColumnSpec::text("skin_color", "Skin Color"),
    ColumnSpec::text("birth_year", "Birth Year"),
    ColumnSpec::text("gender", "Gender"),
];

const PLANET_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("name", "Name"),
    ColumnSpec::numeric("population", "Population"),
    ColumnSpec::numeric("rotation_period", "Rotation Period (hrs)"),
    ColumnSpec::numeric("orbital_period", "Orbital Period (days)"),
    ColumnSpec::numeric("diameter", "Diameter (km)"),
    ColumnSpec::numeric("surface_water", "Surface Water (%)"),
    ColumnSpec::text("climate", "Climate"),
    ColumnSpec::text("terrain", "Terrain"),
    ColumnSpec::text("gravity", "Gravity"),
];

const STARSHIP_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("name", "Name"),
    ColumnSpec::text("model", "Model"),
    ColumnSpec::text("manufacturer", "Manufacturer"),
    ColumnSpec::text("starship_class", "Starship Class"),
    ColumnSpec::numeric("length", "Length (m)"),
    ColumnSpec::numeric("passengers", "Passengers"),
    ColumnSpec::numeric("crew", "Crew"),
    ColumnSpec::text("consumables", "Consumables"),
    ColumnSpec::numeric("max_atmosphering_speed", "Max Atmosphering Speed"),
    ColumnSpec::numeric("MGLT", "MGLT"),
    ColumnSpec::numeric("cargo_capacity", "Cargo Capacity (kg)"),
    ColumnSpec::numeric("hyperdrive_rating", "Hyperdrive Rating"),
    ColumnSpec::numeric("cost_in_credits", "Cost (credits)"),
];

pub fn columns(kind: ResourceKind) -> &'static [ColumnSpec] {
    match kind {
        ResourceKind::People => PEOPLE_COLUMNS,
        ResourceKind::Planets => PLANET_COLUMNS,
        ResourceKind::Starships => STARSHIP_COLUMNS,
    }
}
