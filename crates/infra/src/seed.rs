//! Demo catalog for dev deployments and tests.

use beltline_catalog::Product;
use beltline_core::ProductId;

fn product(
    id: i64,
    name: &str,
    description: &str,
    specs: &str,
    price_cents: u64,
) -> Product {
    Product {
        id: ProductId::from_raw(id),
        name: name.to_string(),
        description: description.to_string(),
        specs: specs.to_string(),
        price_cents,
        // Image references share the product name in the demo set.
        image: name.to_string(),
    }
}

/// The power-transmission component catalog the storefront ships with.
pub fn demo_products() -> Vec<Product> {
    vec![
        product(
            1,
            "V-Belt Pulleys",
            "High-quality V-belt pulleys designed for efficient power transmission in various industrial applications.",
            "Available in multiple sizes, materials, and configurations",
            10000,
        ),
        product(
            2,
            "Flat Pulleys",
            "Durable flat belt pulleys for smooth and reliable power transmission systems.",
            "Various diameters and face widths available",
            8000,
        ),
        product(
            3,
            "Taper Lock Pulleys",
            "Easy-to-install taper lock pulleys with secure shaft mounting for industrial machinery.",
            "Standard taper lock bushings included",
            12000,
        ),
        product(
            4,
            "Variable Speed Pulleys",
            "Adjustable speed pulleys for variable speed applications in industrial equipment.",
            "Adjustable speed ratio, smooth operation",
            15000,
        ),
        product(
            5,
            "Star Couplings",
            "Flexible star couplings for connecting shafts with angular and parallel misalignment tolerance.",
            "High flexibility, vibration damping",
            6000,
        ),
        product(
            6,
            "Flexible Couplings",
            "Versatile flexible couplings for smooth power transmission with misalignment compensation.",
            "Accommodates angular and parallel misalignment",
            7000,
        ),
        product(
            7,
            "Nylon Couplings",
            "Lightweight and durable nylon couplings for light to medium-duty applications.",
            "Corrosion resistant, low maintenance",
            5000,
        ),
        product(
            8,
            "Tyre Couplings",
            "Robust tyre couplings with excellent shock absorption and vibration damping capabilities.",
            "High shock load capacity, flexible",
            9000,
        ),
        product(
            9,
            "Chain Couplings",
            "Heavy-duty chain couplings for high-torque applications with excellent durability.",
            "High torque capacity, compact design",
            11000,
        ),
        product(
            10,
            "Encoder Couplings",
            "Precision encoder couplings for accurate motion control and feedback systems.",
            "Zero backlash, high precision",
            13000,
        ),
        product(
            11,
            "Spur Gears",
            "Precision-cut spur gears for parallel shaft power transmission with high efficiency.",
            "Various modules and pressure angles available",
            20000,
        ),
        product(
            12,
            "Bevel Gears",
            "High-quality bevel gears for right-angle power transmission applications.",
            "Straight and spiral bevel options",
            25000,
        ),
        product(
            13,
            "Worm Gears",
            "Efficient worm gear sets for high reduction ratios and compact design requirements.",
            "High reduction ratios, self-locking capability",
            30000,
        ),
        product(
            14,
            "Racks & Pinions",
            "Precision racks and pinions for linear motion applications in automation systems.",
            "Various modules and lengths available",
            18000,
        ),
        product(
            15,
            "Chain Sprockets",
            "Durable chain sprockets for roller chain drives with precise tooth profiles.",
            "ANSI and ISO standards, various tooth counts",
            4000,
        ),
        product(
            16,
            "Roller Chains",
            "Heavy-duty roller chains for reliable power transmission in industrial machinery.",
            "ANSI standard sizes, high strength",
            3000,
        ),
        product(
            17,
            "Universal Joints",
            "Robust universal joints for connecting shafts at various angles with smooth operation.",
            "High angular capacity, durable construction",
            8500,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_has_unique_ids_and_positive_prices() {
        let products = demo_products();
        assert_eq!(products.len(), 17);

        let mut ids: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 17);

        assert!(products.iter().all(|p| p.price_cents > 0));
    }
}
