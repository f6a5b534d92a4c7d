//! Gallery catalog shown on gallery slides

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One image of the gym's photo wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GalleryImage {
    pub id: i64,
    /// Path under the display client's asset root
    pub image: String,
    pub description: String,
}

/// The compiled-in gallery manifest.
///
/// The display cycles these via the gallery sub-index; content updates ship
/// with the build, not through a feed.
pub fn gallery_manifest() -> Vec<GalleryImage> {
    let entries: [(i64, &str, &str); 8] = [
        (
            1,
            "/gallery/comp-1.jpeg",
            "Competencia Tavros — pura energía y pasión por el deporte.",
        ),
        (
            2,
            "/gallery/comp-2.jpeg",
            "Dándolo todo en la segunda competencia Tavros.",
        ),
        (
            3,
            "/gallery/comp-hari-erik.jpeg",
            "Hari y Erik, una dupla que inspira dentro y fuera del gym.",
        ),
        (
            4,
            "/gallery/hari-toro.jpg",
            "Hari y Toro, fuerza y amistad en cada entrenamiento.",
        ),
        (
            5,
            "/gallery/pandemia.jpeg",
            "Ni la pandemia nos detuvo — seguimos entrenando con actitud.",
        ),
        (
            6,
            "/gallery/tequila-tavros.jpeg",
            "Porque después de entrenar, ¡también se celebra!",
        ),
        (
            7,
            "/gallery/posada-tavros.png",
            "Posada Tavros — comunidad, risas y buena energía.",
        ),
        (
            8,
            "/gallery/vinos-tavros.jpeg",
            "Un brindis por los logros, el esfuerzo y la familia Tavros.",
        ),
    ];

    entries
        .into_iter()
        .map(|(id, image, description)| GalleryImage {
            id,
            image: image.to_string(),
            description: description.to_string(),
        })
        .collect()
}
