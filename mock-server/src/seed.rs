//! Reference data the server starts with.

use crate::{CatalogItem, Location};

const CATALOG: &[(&str, &str, &str, i64)] = &[
    ("PET_BOTTLE_500ML", "PET Bottle 500ml", "Plastic PET bottle 500ml - recyclable", 10),
    ("PET_BOTTLE_1L", "PET Bottle 1L", "Plastic PET bottle 1 liter - recyclable", 15),
    ("PET_BOTTLE_2L", "PET Bottle 2L", "Plastic PET bottle 2 liters - recyclable", 20),
    ("ALUMINUM_CAN_330ML", "Aluminum Can 330ml", "Aluminum beverage can 330ml - recyclable", 12),
    ("GLASS_BOTTLE_500ML", "Glass Bottle 500ml", "Glass bottle 500ml - recyclable", 18),
    ("CARDBOARD_BOX_SMALL", "Small Cardboard Box", "Small cardboard packaging box - recyclable", 8),
    ("CARDBOARD_BOX_LARGE", "Large Cardboard Box", "Large cardboard packaging box - recyclable", 25),
    ("PAPER_BAG", "Paper Shopping Bag", "Paper shopping bag - recyclable", 5),
    ("TETRA_PAK_1L", "Tetra Pak 1L", "Tetra Pak juice/milk carton 1 liter - recyclable", 15),
    ("PLASTIC_BAG", "Plastic Shopping Bag", "Plastic shopping bag - recyclable", 3),
];

const LOCATIONS: &[(&str, &str, f64, f64)] = &[
    ("Korzinka Chilanzar", "Bunyodkor Avenue 7, Chilanzar District, Tashkent", 41.2858, 69.2034),
    ("Korzinka Yunusabad", "Amir Temur Street 129, Yunusabad District, Tashkent", 41.3370, 69.2890),
    ("Korzinka Mirzo Ulugbek", "Buyuk Ipak Yuli 129, Mirzo Ulugbek District, Tashkent", 41.3152, 69.3340),
    ("Korzinka Sergeli", "Fergana Street 45, Sergeli District, Tashkent", 41.2288, 69.2226),
    ("Korzinka Yakkasaray", "Shota Rustaveli Street 89, Yakkasaray District, Tashkent", 41.2989, 69.2745),
    ("Korzinka Olmazor", "Labzak Street 12, Olmazor District, Tashkent", 41.2836, 69.2108),
    ("Korzinka Shaykhontohur", "Navoi Avenue 45, Shaykhontohur District, Tashkent", 41.3250, 69.2486),
    ("Eco Recycling Center - Tashkent City", "Istiklol Street 5, Tashkent City Mall, Tashkent", 41.3111, 69.2797),
];

pub fn catalog() -> Vec<CatalogItem> {
    CATALOG
        .iter()
        .map(|&(sku, name, description, points)| CatalogItem {
            item_sku: sku.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            points_awarded: points,
        })
        .collect()
}

pub fn locations() -> Vec<Location> {
    LOCATIONS
        .iter()
        .zip(1..)
        .map(|(&(name, address, latitude, longitude), id)| Location {
            id,
            name: name.to_string(),
            address: address.to_string(),
            latitude,
            longitude,
        })
        .collect()
}
