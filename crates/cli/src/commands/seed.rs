//! Seed the database with demo catalog and content.
//!
//! Categories are keyed by slug: a category that already exists is skipped
//! together with its products, so the command can be re-run safely. Slides
//! and showcase reviews are only inserted into empty tables.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use shilpini_admin::db::{
    CategoryRepository, ProductRepository, RepositoryError, ReviewRepository, SliderRepository,
};
use shilpini_admin::models::FormError;
use shilpini_admin::models::form::{CategoryForm, OptionForm, ProductForm, ReviewForm, SliderForm};
use shilpini_core::{CategoryId, ProductCollection};

use super::{CommandError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] CommandError),

    #[error("Invalid seed data: {0}")]
    Invalid(#[from] FormError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    price: i64,
    compare_price: Option<i64>,
    stock: i32,
    collections: &'static [ProductCollection],
    options: &'static [(&'static str, &'static [&'static str])],
}

struct DemoCategory {
    name: &'static str,
    description: &'static str,
    products: &'static [DemoProduct],
}

const SIZES: (&str, &[&str]) = ("Size", &["S", "M", "L", "XL"]);

const CATALOG: &[DemoCategory] = &[
    DemoCategory {
        name: "Saree",
        description: "Handwoven jamdani, muslin and tant sarees",
        products: &[
            DemoProduct {
                name: "Dhakai Jamdani Saree",
                description: "Half-silk jamdani with woven floral motifs",
                price: 8500,
                compare_price: Some(9800),
                stock: 6,
                collections: &[ProductCollection::BestSell],
                options: &[("Color", &["Maroon", "Off White", "Teal"])],
            },
            DemoProduct {
                name: "Tangail Tant Saree",
                description: "Soft cotton tant for everyday wear",
                price: 2200,
                compare_price: None,
                stock: 15,
                collections: &[ProductCollection::NewArrival],
                options: &[("Color", &["Red", "Mustard"])],
            },
        ],
    },
    DemoCategory {
        name: "Three Piece",
        description: "Unstitched and ready-made salwar kameez sets",
        products: &[DemoProduct {
            name: "Block Print Three Piece",
            description: "Cotton kameez, salwar and chiffon orna",
            price: 3200,
            compare_price: Some(3600),
            stock: 10,
            collections: &[ProductCollection::Trending, ProductCollection::NewArrival],
            options: &[SIZES, ("Color", &["Indigo", "Peach"])],
        }],
    },
    DemoCategory {
        name: "Kurti",
        description: "Single kurtis and tunics",
        products: &[DemoProduct {
            name: "Embroidered Linen Kurti",
            description: "Hand-embroidered neckline, straight cut",
            price: 1450,
            compare_price: None,
            stock: 0,
            collections: &[ProductCollection::Trending],
            options: &[SIZES],
        }],
    },
];

/// Insert the demo data.
///
/// # Errors
///
/// Returns an error if the connection or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let pool = connect().await?;

    for (position, category) in CATALOG.iter().enumerate() {
        seed_category(&pool, category, i32::try_from(position).unwrap_or(i32::MAX)).await?;
    }
    seed_sliders(&pool).await?;
    seed_reviews(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_category(pool: &PgPool, demo: &DemoCategory, sort_order: i32) -> Result<(), SeedError> {
    let input = CategoryForm {
        name: demo.name.to_owned(),
        slug: None,
        description: Some(demo.description.to_owned()),
        image: None,
        is_active: true,
        sort_order,
    }
    .validate()?;

    let categories = CategoryRepository::new(pool);
    if categories.get_by_slug(&input.slug).await?.is_some() {
        tracing::info!(slug = %input.slug, "Category exists, skipping");
        return Ok(());
    }

    let category = categories.create(&input).await?;
    tracing::info!(slug = %category.slug, "Category created");

    let products = ProductRepository::new(pool);
    for demo_product in demo.products {
        let input = product_form(demo_product, category.id).validate()?;
        let id = products.create(&input).await?;
        tracing::info!(product_id = %id, name = %input.name, "Product created");
    }
    Ok(())
}

fn product_form(demo: &DemoProduct, category_id: CategoryId) -> ProductForm {
    ProductForm {
        name: demo.name.to_owned(),
        description: Some(demo.description.to_owned()),
        price: Decimal::from(demo.price),
        compare_price: demo.compare_price.map(Decimal::from),
        sku: None,
        stock: demo.stock,
        category_id: Some(category_id),
        tags: Vec::new(),
        featured_image: None,
        images: Vec::new(),
        is_active: true,
        is_featured: demo.compare_price.is_some(),
        collections: demo.collections.to_vec(),
        sort_order: 0,
        options: Some(
            demo.options
                .iter()
                .map(|(name, values)| OptionForm {
                    name: (*name).to_owned(),
                    values: values.iter().map(|v| (*v).to_owned()).collect(),
                })
                .collect(),
        ),
    }
}

async fn seed_sliders(pool: &PgPool) -> Result<(), SeedError> {
    let sliders = SliderRepository::new(pool);
    if !sliders.list().await?.is_empty() {
        tracing::info!("Slides exist, skipping");
        return Ok(());
    }

    for (sort_order, (title, button_text)) in [("Eid Collection", "Shop now"), ("New Jamdani Arrivals", "Explore")]
        .into_iter()
        .enumerate()
    {
        let input = SliderForm {
            title: Some(title.to_owned()),
            description: None,
            image: format!("https://placehold.co/1600x600?text={}", title.replace(' ', "+")),
            phone_image: None,
            link: Some("/products".to_owned()),
            button_text: Some(button_text.to_owned()),
            is_active: true,
            sort_order: i32::try_from(sort_order).unwrap_or(i32::MAX),
        }
        .validate()?;
        sliders.create(&input).await?;
    }
    tracing::info!("Slides created");
    Ok(())
}

async fn seed_reviews(pool: &PgPool) -> Result<(), SeedError> {
    let reviews = ReviewRepository::new(pool);
    if !reviews.list().await?.is_empty() {
        tracing::info!("Reviews exist, skipping");
        return Ok(());
    }

    for (user_name, rating, comment) in [
        ("Nusrat J.", 5, "The jamdani is even prettier in person. Delivered in two days."),
        ("Tahmina R.", 4, "Good fabric, the size chart was accurate."),
    ] {
        let input = ReviewForm {
            product_id: None,
            user_name: user_name.to_owned(),
            user_email: None,
            rating,
            comment: comment.to_owned(),
            image: None,
            screenshot_image: None,
            source: Some("facebook".to_owned()),
            is_showcase: true,
            is_approved: true,
        }
        .validate()?;
        reviews.create(&input).await?;
    }
    tracing::info!("Showcase reviews created");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_is_valid() {
        for category in CATALOG {
            CategoryForm {
                name: category.name.to_owned(),
                slug: None,
                description: None,
                image: None,
                is_active: true,
                sort_order: 0,
            }
            .validate()
            .unwrap();

            for product in category.products {
                let input = product_form(product, CategoryId::new(1)).validate().unwrap();
                assert!(input.options.is_some_and(|o| !o.is_empty()));
            }
        }
    }

    #[test]
    fn test_demo_slugs_unique() {
        let mut slugs: Vec<String> = CATALOG
            .iter()
            .map(|c| shilpini_core::slugify(c.name))
            .collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), CATALOG.len());
    }
}
