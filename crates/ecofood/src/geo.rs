//! Region and commune reference data.
//!
//! Registration forms offer a region and, within it, a commune; both must
//! name a known pair. The table covers the regions the platform currently
//! operates in.

/// Region name → communes.
pub static REGIONS: &[(&str, &[&str])] = &[
    (
        "Arica y Parinacota",
        &["Arica", "Camarones", "Putre", "General Lagos"],
    ),
    (
        "Tarapacá",
        &["Iquique", "Alto Hospicio", "Pozo Almonte", "Pica", "Huara", "Colchane"],
    ),
    (
        "Antofagasta",
        &[
            "Antofagasta",
            "Mejillones",
            "Sierra Gorda",
            "Taltal",
            "Calama",
            "Ollagüe",
            "San Pedro de Atacama",
        ],
    ),
    (
        "Coquimbo",
        &[
            "La Serena",
            "Coquimbo",
            "Andacollo",
            "La Higuera",
            "Ovalle",
            "Combarbalá",
            "Monte Patria",
            "Punitaqui",
            "Illapel",
        ],
    ),
    (
        "Valparaíso",
        &[
            "Valparaíso",
            "Viña del Mar",
            "Quilpué",
            "Villa Alemana",
            "San Antonio",
            "Quintero",
            "Casablanca",
            "San Felipe",
            "Los Andes",
            "La Ligua",
        ],
    ),
    (
        "Metropolitana",
        &[
            "Santiago",
            "Providencia",
            "Las Condes",
            "Ñuñoa",
            "Maipú",
            "La Florida",
            "Puente Alto",
            "San Bernardo",
            "Quilicura",
            "Recoleta",
            "Estación Central",
            "Melipilla",
            "Talagante",
        ],
    ),
];

/// Communes of a region, if the region is known.
pub fn communes_of(region: &str) -> Option<&'static [&'static str]> {
    REGIONS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, communes)| *communes)
}

/// Whether `commune` belongs to `region`.
pub fn is_known_pair(region: &str, commune: &str) -> bool {
    communes_of(region).is_some_and(|communes| communes.contains(&commune))
}
