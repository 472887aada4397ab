//! The shop's built-in product list.

use la_reyna_core::{CatalogKey, Price};

use super::{Audience, Ingredient, Product};

fn ingredients(notes: [(&str, &str); 3]) -> Vec<Ingredient> {
    notes
        .into_iter()
        .map(|(name, description)| Ingredient {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    key: &'static str,
    name: &str,
    title: &str,
    volume: Option<&str>,
    soles: i64,
    image: &str,
    audience: Audience,
    description: Option<&str>,
    notes: Vec<Ingredient>,
) -> Product {
    Product {
        key: CatalogKey::from_static(key),
        name: name.to_string(),
        title: title.to_string(),
        volume: volume.map(String::from),
        price: Price::from_soles(soles),
        image: format!("/static/img/{image}"),
        audience,
        description: description.map(String::from),
        ingredients: notes,
    }
}

/// All built-in products in listing order.
///
/// The first six have full detail pages; the rest are listing entries
/// with name, price and image only.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            "ccori-rose",
            "Set Ccori Rosé: Parfum + Loción Perfumada",
            "SET CCORI ROSÉ: PARFUM + LOCIÓN PERFUMADA",
            Some("75.00ml + 150.00ml"),
            119,
            "prod-frag1.png",
            Audience::Women,
            Some(
                "Este exclusivo set de Ccori Rosé combina un elegante parfum con una lujosa loción perfumada para una experiencia sensorial completa. La fragancia combina notas florales y frutales con un fondo cálido y sensual que perdura durante todo el día.",
            ),
            ingredients([
                (
                    "Notas de salida: Bergamota y Melocotón",
                    "Una combinación refrescante y dulce que abre la experiencia olfativa con un toque frutal vibrante y enérgico.",
                ),
                (
                    "Notas de corazón: Rosa de Damasco y Jazmín",
                    "El corazón floral aporta feminidad y romanticismo, con la rosa aportando elegancia y el jazmín añadiendo un toque exótico y sensual.",
                ),
                (
                    "Notas de fondo: Vainilla y Pachulí",
                    "La base cálida y envolvente proporciona profundidad y duración, con la vainilla aportando dulzura cremosa y el pachulí añadiendo una sensualidad terrosa.",
                ),
            ]),
        ),
        product(
            "cielo-rosa",
            "Cielo en Rosa Eau de Parfum",
            "CIELO EN ROSA EAU DE PARFUM",
            Some("50.00ml"),
            113,
            "prod-frag2.png",
            Audience::Women,
            Some(
                "Un nuevo perfume de la línea Cielo que te invita a asombrarte con su belleza. Cielo en Rosa trae toda la magia floral de la rosa búlgara en una nueva interpretación moderna y llena de contrastes, con almendra tostada y almizcle dulce.",
            ),
            ingredients([
                (
                    "Rosa búlgara",
                    "Una nota floral impactante con toques dulces como de miel, frutales como de liche y un aire fresco como el rocío de la mañana.",
                ),
                (
                    "Almendra tostada",
                    "Una nota innovadora que le agrega carácter al perfume. Su aroma es cálido y suave con textura aterciopelada, dulce y con toques quemados.",
                ),
                (
                    "Almizcle dulce",
                    "O musk dulce, es una nota cálida y sensual que aporta sofisticación y suavidad al aroma. Promueve la duración y potencia las demás notas del perfume.",
                ),
            ]),
        ),
        product(
            "sauvage-dior",
            "Set Sauvage Dior: Parfum + Estuche Elegante",
            "SET SAUVAGE DIOR: PARFUM + ESTUCHE ELEGANTE",
            Some("100.00ml"),
            105,
            "prod-frag3.png",
            Audience::Men,
            Some(
                "El set Sauvage Dior combina el icónico perfume con un estuche elegante para regalo. Una fragancia masculina potente y noble, inspirada en paisajes desérticos bajo cielos azules. Sauvage es una composición de frescura vibrante con matices amaderados y especiados.",
            ),
            ingredients([
                (
                    "Bergamota de Calabria",
                    "Una cítrica jugosa y fresca que aporta luminosidad y un carácter vibrante a la composición.",
                ),
                (
                    "Pimienta de Sichuan",
                    "Especiada y ligeramente cítrica, añade un toque chispeante y sofisticado que hace que la fragancia sea única.",
                ),
                (
                    "Ambroxan",
                    "Derivado del ámbar gris, aporta profundidad y un rastro amaderado sensual que perdura en la piel durante horas.",
                ),
            ]),
        ),
        product(
            "prod-frag6",
            "Bombshell Seduction Eau de Parfum",
            "Bombshell Seduction Eau de Parfum",
            Some("50ml"),
            180,
            "prod-frag6.png",
            Audience::Women,
            Some(
                "Descubre la seducción en su forma más pura. Bombshell Seduction es una fragancia floral oriental que envuelve la piel con un velo de misterio y sensualidad. Ideal para la mujer que no teme destacar.",
            ),
            ingredients([
                (
                    "Tuberosa Blanca",
                    "Una flor opulenta y cremosa que aporta una feminidad embriagadora.",
                ),
                (
                    "Salvia",
                    "Un toque aromático y herbal que añade frescura y un contraste intrigante.",
                ),
                (
                    "Almizcle Aterciopelado",
                    "Proporciona una calidez sensual y una estela duradera y adictiva.",
                ),
            ]),
        ),
        product(
            "prod-frag5",
            "Una Instinct Eau de Parfum",
            "Una Instinct Eau de Parfum",
            Some("75ml"),
            165,
            "prod-frag5.jpg",
            Audience::Women,
            Some(
                "Despierta tus instintos con Una Instinct. Una fragancia chipre frutal que combina la dulzura de las frutas rojas con la intensidad del pachulí y la elegancia de la gardenia. Para una mujer auténtica y poderosa.",
            ),
            ingredients([
                (
                    "Cassis y Frutos Rojos",
                    "Una explosión jugosa y vibrante que aporta un toque frutal adictivo.",
                ),
                (
                    "Gardenia",
                    "Una flor blanca sofisticada y femenina que añade elegancia y luminosidad.",
                ),
                (
                    "Pachulí y Priprioca",
                    "Notas amaderadas y terrosas que otorgan profundidad, misterio y un toque brasileño único.",
                ),
            ]),
        ),
        product(
            "prod-frag4",
            "Fragancia Intensa para Hombre",
            "Fragancia Intensa para Hombre",
            Some("100ml"),
            150,
            "prod-frag4.jpg",
            Audience::Men,
            Some(
                "Una fragancia audaz y cautivadora para el hombre moderno. Con notas amaderadas y especiadas, este perfume deja una impresión duradera y sofisticada, perfecta para cualquier ocasión.",
            ),
            ingredients([
                (
                    "Madera de Cedro",
                    "Aporta una base robusta y masculina, evocando fuerza y estabilidad.",
                ),
                (
                    "Pimienta Negra",
                    "Introduce un toque picante y energizante, añadiendo vitalidad a la fragancia.",
                ),
                (
                    "Cuero",
                    "Una nota rica y envolvente que confiere un carácter lujoso y distintivo.",
                ),
            ]),
        ),
        listing("euforia-floral", "Euforia Floral Collection", 145, "prod-frag7.png", Audience::Women),
        listing("elegance-set", "Set Elegance: Perfume + Body Lotion", 135, "prod-frag8.png", Audience::Women),
        listing("midnight-dreams", "Midnight Dreams Eau de Parfum", 190, "prod-frag9.png", Audience::Women),
        listing("sweet-garden", "Sweet Garden Collection", 170, "prod-frag10.png", Audience::Teens),
        listing("ocean-breeze", "Ocean Breeze For Men", 155, "prod-frag11.png", Audience::Men),
        listing("diamond-rose", "Diamond Rose Limited Edition", 210, "prod-frag12.png", Audience::Women),
    ]
}

fn listing(key: &'static str, name: &str, soles: i64, image: &str, audience: Audience) -> Product {
    product(key, name, name, None, soles, image, audience, None, Vec::new())
}
