//! Product catalog port and the built-in static catalog.

use nepali_shop_core::{Category, Product, ProductId};
use rust_decimal::Decimal;

use crate::error::CatalogError;

/// Read-only product lookup used by the cart store.
pub trait Catalog {
    /// Look up a product by ID.
    fn find_by_id(&self, id: ProductId) -> Option<Product>;
}

impl<T: Catalog + ?Sized> Catalog for &T {
    fn find_by_id(&self, id: ProductId) -> Option<Product> {
        (**self).find_by_id(id)
    }
}

/// An in-memory catalog in display order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if two products share an ID or a price is
    /// negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (index, product) in products.iter().enumerate() {
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if products.iter().take(index).any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Load a catalog from a YAML list of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the YAML is malformed or the product list is
    /// invalid (see [`StaticCatalog::new`]).
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_yaml::from_str(source)?;
        Self::new(products)
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    pub fn in_stock(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.in_stock)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The shop's built-in catalog of Nepali crafts and goods.
    #[must_use]
    pub fn nepali_crafts() -> Self {
        let products = vec![
            product(
                1,
                "Traditional Dhaka Topi",
                Decimal::new(1599, 2),
                "dhaka-topi",
                "Handwoven traditional Nepali hat from Palpa district",
                "The Dhaka topi is a symbol of Nepali national identity, worn during festivals and formal occasions.",
                Category::Clothing,
            ),
            product(
                2,
                "Tibetan Singing Bowl",
                Decimal::new(4500, 2),
                "singing-bowl",
                "Authentic handcrafted singing bowl from Kathmandu",
                "Used in meditation and healing practices for centuries across the Himalayan region.",
                Category::Spiritual,
            ),
            product(
                3,
                "Pashmina Shawl",
                Decimal::new(8999, 2),
                "pashmina",
                "Premium cashmere pashmina from the Himalayan highlands",
                "Prized for its softness and warmth, pashmina has been a luxury textile for over 500 years.",
                Category::Clothing,
            ),
            product(
                4,
                "Lokta Paper Journal",
                Decimal::new(1250, 2),
                "lokta-journal",
                "Handmade journal using traditional Lokta paper",
                "Lokta paper-making is an ancient Nepali craft using bark from the Daphne shrub.",
                Category::Crafts,
            ),
            product(
                5,
                "Khukuri Knife",
                Decimal::new(6500, 2),
                "khukuri",
                "Traditional Gurkha knife, handforged in Dharan",
                "The khukuri is the national weapon of Nepal, symbolizing bravery and honor.",
                Category::Cultural,
            ),
            product(
                6,
                "Prayer Flags Set",
                Decimal::new(1800, 2),
                "prayer-flags",
                "Traditional Buddhist prayer flags - set of 25",
                "Prayer flags carry mantras and prayers, believed to spread goodwill and compassion.",
                Category::Spiritual,
            ),
            product(
                7,
                "Dhaka Fabric Bag",
                Decimal::new(2850, 2),
                "dhaka-bag",
                "Handwoven shoulder bag with traditional Dhaka patterns",
                "Dhaka fabric features intricate geometric patterns unique to Nepal.",
                Category::Accessories,
            ),
            product(
                8,
                "Nepali Tea Set",
                Decimal::new(3200, 2),
                "tea-set",
                "Premium Himalayan tea collection with traditional cups",
                "Nepali tea culture blends Tibetan butter tea traditions with Indian chai.",
                Category::Food,
            ),
            product(
                9,
                "Thangka Painting",
                Decimal::new(12500, 2),
                "thangka",
                "Small traditional Buddhist thangka painting",
                "Thangka paintings are sacred Buddhist art used for meditation and teaching.",
                Category::Art,
            ),
            product(
                10,
                "Bamboo Flute (Bansuri)",
                Decimal::new(2200, 2),
                "bansuri",
                "Handcrafted bamboo flute from traditional artisans",
                "The bansuri is central to Nepali folk music and spiritual practices.",
                Category::Music,
            ),
        ];
        Self { products }
    }
}

impl Catalog for StaticCatalog {
    fn find_by_id(&self, id: ProductId) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }
}

fn product(
    id: i32,
    name: &str,
    price: Decimal,
    slug: &str,
    description: &str,
    cultural_context: &str,
    category: Category,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price,
        image: format!("images/products/{slug}.jpg"),
        description: description.to_string(),
        cultural_context: cultural_context.to_string(),
        category,
        in_stock: true,
    }
}
